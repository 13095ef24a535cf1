//! Named, typed knobs bound to debug-panel controls.
//!
//! A [`ParamSet`] keeps controls in insertion order (the panel renders them
//! that way) and validates every write: numbers are snapped to the control's
//! step and clamped to its range, colors and toggles must match their kind.

use crate::color::Color;
use crate::error::{DemoError, Result};
use fnv::FnvHashMap;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParamValue {
    Number(f64),
    Color(Color),
    Toggle(bool),
}

impl ParamValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ParamValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<Color> {
        match self {
            ParamValue::Color(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_toggle(&self) -> Option<bool> {
        match self {
            ParamValue::Toggle(b) => Some(*b),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ControlKind {
    Range { min: f64, max: f64, step: f64 },
    Color,
    Toggle,
}

/// When the panel reports a change back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trigger {
    /// Every intermediate value while dragging.
    Change,
    /// Only once the interaction finishes (slider released, picker closed).
    FinishChange,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Control {
    pub name: &'static str,
    pub kind: ControlKind,
    pub trigger: Trigger,
    pub value: ParamValue,
}

impl Control {
    /// Validate `value` against this control and return the value that would be stored.
    pub fn normalize(&self, value: ParamValue) -> Result<ParamValue> {
        match (self.kind, value) {
            (ControlKind::Range { min, max, step }, ParamValue::Number(v)) => {
                Ok(ParamValue::Number(snap(v, min, max, step)))
            }
            (ControlKind::Color, ParamValue::Color(_)) => Ok(value),
            (ControlKind::Toggle, ParamValue::Toggle(_)) => Ok(value),
            (kind, _) => Err(DemoError::ParamType {
                name: self.name.to_string(),
                expected: kind_name(kind),
            }),
        }
    }

    /// Parse the textual form a panel input or command line produces.
    pub fn parse(&self, text: &str) -> Result<ParamValue> {
        let text = text.trim();
        let invalid = || DemoError::InvalidValue {
            key: self.name.to_string(),
            value: text.to_string(),
        };
        match self.kind {
            ControlKind::Range { .. } => text
                .parse::<f64>()
                .map(ParamValue::Number)
                .map_err(|_| invalid()),
            ControlKind::Color => Color::parse_hex(text).map(ParamValue::Color),
            ControlKind::Toggle => match text {
                "true" | "1" | "on" => Ok(ParamValue::Toggle(true)),
                "false" | "0" | "off" => Ok(ParamValue::Toggle(false)),
                _ => Err(invalid()),
            },
        }
    }
}

fn kind_name(kind: ControlKind) -> &'static str {
    match kind {
        ControlKind::Range { .. } => "number",
        ControlKind::Color => "color",
        ControlKind::Toggle => "boolean",
    }
}

#[inline]
fn snap(value: f64, min: f64, max: f64, step: f64) -> f64 {
    let v = if value.is_finite() { value } else { min };
    let stepped = if step > 0.0 { (v / step).round() * step } else { v };
    stepped.clamp(min, max)
}

#[derive(Clone, Debug, Default)]
pub struct ParamSet {
    controls: Vec<Control>,
    index: FnvHashMap<&'static str, usize>,
}

impl ParamSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn range(
        &mut self,
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
        step: f64,
        trigger: Trigger,
    ) -> &mut Self {
        self.push(Control {
            name,
            kind: ControlKind::Range { min, max, step },
            trigger,
            value: ParamValue::Number(value),
        })
    }

    pub fn color(&mut self, name: &'static str, value: Color, trigger: Trigger) -> &mut Self {
        self.push(Control {
            name,
            kind: ControlKind::Color,
            trigger,
            value: ParamValue::Color(value),
        })
    }

    pub fn toggle(&mut self, name: &'static str, value: bool, trigger: Trigger) -> &mut Self {
        self.push(Control {
            name,
            kind: ControlKind::Toggle,
            trigger,
            value: ParamValue::Toggle(value),
        })
    }

    fn push(&mut self, control: Control) -> &mut Self {
        match self.index.get(control.name) {
            Some(&i) => self.controls[i] = control,
            None => {
                self.index.insert(control.name, self.controls.len());
                self.controls.push(control);
            }
        }
        self
    }

    pub fn control(&self, name: &str) -> Option<&Control> {
        self.index.get(name).map(|&i| &self.controls[i])
    }

    pub fn get(&self, name: &str) -> Option<ParamValue> {
        self.control(name).map(|c| c.value)
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(|v| v.as_number())
    }

    pub fn color_value(&self, name: &str) -> Option<Color> {
        self.get(name).and_then(|v| v.as_color())
    }

    pub fn flag(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(|v| v.as_toggle())
    }

    /// Store `value` under `name`, returning the normalized value actually kept.
    pub fn set(&mut self, name: &str, value: ParamValue) -> Result<ParamValue> {
        let i = *self
            .index
            .get(name)
            .ok_or_else(|| DemoError::UnknownParam(name.to_string()))?;
        let normalized = self.controls[i].normalize(value)?;
        self.controls[i].value = normalized;
        Ok(normalized)
    }

    /// Parse `text` with the control's rules and store it.
    pub fn set_text(&mut self, name: &str, text: &str) -> Result<ParamValue> {
        let value = self
            .control(name)
            .ok_or_else(|| DemoError::UnknownParam(name.to_string()))?
            .parse(text)?;
        self.set(name, value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Control> {
        self.controls.iter()
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }
}
