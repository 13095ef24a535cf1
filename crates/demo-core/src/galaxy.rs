//! Procedural spiral-galaxy point cloud.
//!
//! Points are spread over `branches` arms by index (point `i` sits on arm
//! `i % branches`), pushed outward by a squared uniform draw so density peaks
//! at the core, twisted by `spin` in proportion to their distance, and
//! scattered per axis by `random()^randomness_power` with a random sign.
//! Colors blend from `inside_color` to `outside_color` with distance.

use crate::color::Color;
use crate::params::{ParamSet, ParamValue, Trigger};
use rand::Rng;
use std::f32::consts::TAU;

pub const PARAM_COUNT: &str = "count";
pub const PARAM_SIZE: &str = "size";
pub const PARAM_RADIUS: &str = "radius";
pub const PARAM_BRANCHES: &str = "branches";
pub const PARAM_SPIN: &str = "spin";
pub const PARAM_RANDOMNESS: &str = "randomness";
pub const PARAM_RANDOMNESS_POWER: &str = "randomnessPower";
pub const PARAM_INSIDE_COLOR: &str = "insideColor";
pub const PARAM_OUTSIDE_COLOR: &str = "outsideColor";

#[derive(Clone, Debug, PartialEq)]
pub struct GalaxyParams {
    pub count: usize,
    pub size: f32,
    pub radius: f32,
    pub branches: u32,
    pub spin: f32,
    /// Shown on the panel and carried along; the scatter formula does not read it.
    pub randomness: f32,
    pub randomness_power: f32,
    pub inside_color: Color,
    pub outside_color: Color,
}

impl Default for GalaxyParams {
    fn default() -> Self {
        Self {
            count: 100_000,
            size: 0.01,
            radius: 5.0,
            branches: 3,
            spin: 1.0,
            randomness: 0.2,
            randomness_power: 3.0,
            inside_color: Color::from_hex(0xff6030),
            outside_color: Color::from_hex(0x1b3984),
        }
    }
}

impl GalaxyParams {
    /// Panel controls with the ranges the generator is tuned for. All of them
    /// regenerate on interaction-finish so dragging never rebuilds mid-way.
    pub fn param_set(&self) -> ParamSet {
        let on_finish = Trigger::FinishChange;
        let mut set = ParamSet::new();
        set.range(PARAM_COUNT, self.count as f64, 100.0, 1_000_000.0, 100.0, on_finish)
            .range(PARAM_SIZE, self.size as f64, 0.001, 0.1, 0.001, on_finish)
            .range(PARAM_RADIUS, self.radius as f64, 0.01, 20.0, 0.01, on_finish)
            .range(PARAM_BRANCHES, self.branches as f64, 2.0, 20.0, 1.0, on_finish)
            .range(PARAM_SPIN, self.spin as f64, -5.0, 5.0, 0.001, on_finish)
            .range(PARAM_RANDOMNESS, self.randomness as f64, 0.0, 2.0, 0.01, on_finish)
            .range(
                PARAM_RANDOMNESS_POWER,
                self.randomness_power as f64,
                1.0,
                10.0,
                0.001,
                on_finish,
            )
            .color(PARAM_INSIDE_COLOR, self.inside_color, on_finish)
            .color(PARAM_OUTSIDE_COLOR, self.outside_color, on_finish);
        set
    }

    /// Copy one already-validated panel value into the record.
    /// Returns false when `name` is not a galaxy parameter.
    pub fn apply(&mut self, name: &str, value: ParamValue) -> bool {
        match (name, value) {
            (PARAM_COUNT, ParamValue::Number(v)) => self.count = v.max(0.0).round() as usize,
            (PARAM_SIZE, ParamValue::Number(v)) => self.size = v as f32,
            (PARAM_RADIUS, ParamValue::Number(v)) => self.radius = v as f32,
            (PARAM_BRANCHES, ParamValue::Number(v)) => self.branches = v.max(0.0).round() as u32,
            (PARAM_SPIN, ParamValue::Number(v)) => self.spin = v as f32,
            (PARAM_RANDOMNESS, ParamValue::Number(v)) => self.randomness = v as f32,
            (PARAM_RANDOMNESS_POWER, ParamValue::Number(v)) => self.randomness_power = v as f32,
            (PARAM_INSIDE_COLOR, ParamValue::Color(c)) => self.inside_color = c,
            (PARAM_OUTSIDE_COLOR, ParamValue::Color(c)) => self.outside_color = c,
            _ => return false,
        }
        true
    }
}

/// Parallel position/color triples, `3 * count` floats each.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointCloud {
    pub positions: Vec<f32>,
    pub colors: Vec<f32>,
}

impl PointCloud {
    pub fn len(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn position(&self, i: usize) -> [f32; 3] {
        let i3 = i * 3;
        [self.positions[i3], self.positions[i3 + 1], self.positions[i3 + 2]]
    }

    pub fn color(&self, i: usize) -> [f32; 3] {
        let i3 = i * 3;
        [self.colors[i3], self.colors[i3 + 1], self.colors[i3 + 2]]
    }
}

/// Arm index of point `i`. Zero branches behaves like a single arm.
#[inline]
pub fn branch_index(i: usize, branches: u32) -> u32 {
    (i % branches.max(1) as usize) as u32
}

#[inline]
pub fn branch_angle(i: usize, branches: u32) -> f32 {
    branch_index(i, branches) as f32 / branches.max(1) as f32 * TAU
}

/// Interpolation factor for a point at `distance` in a disk of `radius`.
/// A zero (or negative) radius yields 0 instead of 0/0.
#[inline]
pub fn color_mix_factor(distance: f32, radius: f32) -> f32 {
    if radius > 0.0 {
        distance / radius
    } else {
        0.0
    }
}

/// Generate a galaxy with a `rand` source.
pub fn generate<R: Rng + ?Sized>(params: &GalaxyParams, rng: &mut R) -> PointCloud {
    generate_with(params, || rng.gen::<f32>())
}

/// Generate a galaxy from any source of uniform `[0, 1)` samples.
///
/// Seven samples are drawn per point, in order: radius, then magnitude and
/// sign for x, y and z.
pub fn generate_with(params: &GalaxyParams, mut random: impl FnMut() -> f32) -> PointCloud {
    let count = params.count;
    let mut positions = vec![0.0_f32; count * 3];
    let mut colors = vec![0.0_f32; count * 3];

    for i in 0..count {
        let i3 = i * 3;

        let radius = random().powi(2) * params.radius;
        let spin_angle = radius * params.spin;
        let angle = branch_angle(i, params.branches) + spin_angle;

        let random_x = scatter(&mut random, params.randomness_power);
        let random_y = scatter(&mut random, params.randomness_power);
        let random_z = scatter(&mut random, params.randomness_power);

        positions[i3] = angle.cos() * radius + random_x;
        positions[i3 + 1] = random_y;
        positions[i3 + 2] = angle.sin() * radius + random_z;

        let mixed = params
            .inside_color
            .lerp(params.outside_color, color_mix_factor(radius, params.radius));
        colors[i3..i3 + 3].copy_from_slice(&mixed.to_array());
    }

    PointCloud { positions, colors }
}

#[inline]
fn scatter(random: &mut impl FnMut() -> f32, power: f32) -> f32 {
    let magnitude = random().powf(power);
    if random() < 0.5 {
        magnitude
    } else {
        -magnitude
    }
}
