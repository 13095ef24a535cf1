//! Debug panel: one DOM control per demo parameter.
//!
//! Ranges become sliders, colors become color pickers, toggles become
//! checkboxes. Controls with `Trigger::Change` apply on every `input` event;
//! `Trigger::FinishChange` ones wait for `change` (slider released, picker
//! closed).

use demo_core::{Control, ControlKind, ParamValue, Trigger, PANEL_WIDTH_PX};
use demo_render::DemoApp;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

fn js_err(e: wasm_bindgen::JsValue) -> anyhow::Error {
    anyhow::anyhow!(format!("{:?}", e))
}

pub fn display_value(value: ParamValue) -> String {
    match value {
        ParamValue::Number(v) => format!("{}", v),
        ParamValue::Color(c) => c.to_hex_string(),
        ParamValue::Toggle(on) => on.to_string(),
    }
}

fn input_text(input: &web::HtmlInputElement, kind: ControlKind) -> String {
    match kind {
        ControlKind::Toggle => input.checked().to_string(),
        _ => input.value(),
    }
}

fn event_name(trigger: Trigger) -> &'static str {
    match trigger {
        Trigger::Change => "input",
        Trigger::FinishChange => "change",
    }
}

/// Build the panel and wire every control to `app`. Demos without
/// parameters get no panel.
pub fn build(document: &web::Document, app: Rc<RefCell<DemoApp<'static>>>) -> anyhow::Result<()> {
    let controls: Vec<Control> = app.borrow().params().iter().cloned().collect();
    if controls.is_empty() {
        return Ok(());
    }
    let body = document
        .body()
        .ok_or_else(|| anyhow::anyhow!("no body"))?;
    let panel = document
        .create_element("div")
        .map_err(js_err)?
        .dyn_into::<web::HtmlElement>()
        .map_err(|e| js_err(e.into()))?;
    panel.set_class_name("debug-panel");
    let style = panel.style();
    for (prop, value) in [
        ("position", "fixed".to_string()),
        ("top", "0".to_string()),
        ("right", "0".to_string()),
        ("width", format!("{}px", PANEL_WIDTH_PX)),
        ("padding", "8px".to_string()),
        ("background", "rgba(20, 20, 24, 0.85)".to_string()),
        ("color", "#eee".to_string()),
        ("font", "12px sans-serif".to_string()),
    ] {
        style.set_property(prop, &value).map_err(js_err)?;
    }

    for control in controls {
        let row = build_row(document, &control, app.clone())?;
        panel.append_child(&row).map_err(js_err)?;
    }
    body.append_child(&panel).map_err(js_err)?;
    log::info!("[panel] {} controls", app.borrow().params().len());
    Ok(())
}

fn build_row(
    document: &web::Document,
    control: &Control,
    app: Rc<RefCell<DemoApp<'static>>>,
) -> anyhow::Result<web::Element> {
    let row = document.create_element("label").map_err(js_err)?;
    row.set_attribute("style", "display:flex;gap:8px;align-items:center;margin:4px 0")
        .map_err(js_err)?;
    let name = document.create_element("span").map_err(js_err)?;
    name.set_attribute("style", "flex:0 0 110px").map_err(js_err)?;
    name.set_text_content(Some(control.name));
    let readout = document.create_element("span").map_err(js_err)?;
    readout.set_attribute("style", "flex:0 0 64px;text-align:right").map_err(js_err)?;
    readout.set_text_content(Some(&display_value(control.value)));

    let input = document
        .create_element("input")
        .map_err(js_err)?
        .dyn_into::<web::HtmlInputElement>()
        .map_err(|e| js_err(e.into()))?;
    match control.kind {
        ControlKind::Range { min, max, step } => {
            input.set_type("range");
            input.set_min(&min.to_string());
            input.set_max(&max.to_string());
            input.set_step(&step.to_string());
            input.set_value(&display_value(control.value));
            input.set_attribute("style", "flex:1").map_err(js_err)?;
        }
        ControlKind::Color => {
            input.set_type("color");
            input.set_value(&display_value(control.value));
        }
        ControlKind::Toggle => {
            input.set_type("checkbox");
            input.set_checked(control.value.as_toggle().unwrap_or(false));
        }
    }

    let param = control.name;
    let kind = control.kind;
    let input_m = input.clone();
    let readout_m = readout.clone();
    let closure = Closure::wrap(Box::new(move || {
        let text = input_text(&input_m, kind);
        let result = app.borrow_mut().set_param_text(param, &text);
        match result {
            Ok(stored) => {
                readout_m.set_text_content(Some(&display_value(stored)));
                if let ParamValue::Number(_) = stored {
                    input_m.set_value(&display_value(stored));
                }
            }
            Err(e) => log::warn!("[panel] {}: {}", param, e),
        }
    }) as Box<dyn FnMut()>);
    input
        .add_event_listener_with_callback(event_name(control.trigger), closure.as_ref().unchecked_ref())
        .map_err(js_err)?;
    closure.forget();

    row.append_child(&name).map_err(js_err)?;
    row.append_child(&input).map_err(js_err)?;
    row.append_child(&readout).map_err(js_err)?;
    Ok(row)
}
