// Host-side tests for the parameter set behind the debug panel.

use demo_core::*;

fn sample_set() -> ParamSet {
    let mut set = ParamSet::new();
    set.range("size", 0.01, 0.001, 0.1, 0.001, Trigger::FinishChange)
        .color("tint", Color::WHITE, Trigger::Change)
        .toggle("wireframe", false, Trigger::Change);
    set
}

#[test]
fn numbers_snap_to_step_and_clamp_to_range() {
    let mut set = sample_set();
    let v = set.set("size", ParamValue::Number(0.0234)).unwrap();
    assert!((v.as_number().unwrap() - 0.023).abs() < 1e-12);
    assert_eq!(set.set("size", ParamValue::Number(5.0)).unwrap(), ParamValue::Number(0.1));
    assert_eq!(set.set("size", ParamValue::Number(-1.0)).unwrap(), ParamValue::Number(0.001));
    assert_eq!(
        set.set("size", ParamValue::Number(f64::NAN)).unwrap(),
        ParamValue::Number(0.001)
    );
}

#[test]
fn stored_value_is_the_normalized_one() {
    let mut set = sample_set();
    set.set("size", ParamValue::Number(2.0)).unwrap();
    assert_eq!(set.number("size"), Some(0.1));
}

#[test]
fn kind_mismatch_is_rejected_without_changing_value() {
    let mut set = sample_set();
    let err = set.set("size", ParamValue::Toggle(true)).unwrap_err();
    assert!(matches!(err, DemoError::ParamType { expected: "number", .. }));
    assert_eq!(set.number("size"), Some(0.01));
    assert!(set.set("wireframe", ParamValue::Number(1.0)).is_err());
}

#[test]
fn unknown_names_are_errors() {
    let mut set = sample_set();
    assert!(matches!(
        set.set("nope", ParamValue::Number(1.0)),
        Err(DemoError::UnknownParam(_))
    ));
    assert!(set.set_text("nope", "1").is_err());
    assert_eq!(set.get("nope"), None);
}

#[test]
fn text_values_parse_per_kind() {
    let mut set = sample_set();
    assert_eq!(set.set_text("size", " 0.05 ").unwrap(), ParamValue::Number(0.05));
    assert_eq!(set.set_text("wireframe", "on").unwrap(), ParamValue::Toggle(true));
    assert_eq!(set.set_text("wireframe", "0").unwrap(), ParamValue::Toggle(false));
    assert_eq!(
        set.set_text("tint", "#ff6030").unwrap(),
        ParamValue::Color(Color::from_hex(0xff6030))
    );
    assert!(set.set_text("size", "big").is_err());
    assert!(set.set_text("wireframe", "maybe").is_err());
    assert!(set.set_text("tint", "red").is_err());
}

#[test]
fn controls_keep_insertion_order() {
    let set = sample_set();
    let names: Vec<_> = set.iter().map(|c| c.name).collect();
    assert_eq!(names, vec!["size", "tint", "wireframe"]);
}

#[test]
fn redeclaring_a_control_replaces_it_in_place() {
    let mut set = sample_set();
    set.toggle("tint", true, Trigger::Change);
    assert_eq!(set.len(), 3);
    assert_eq!(set.flag("tint"), Some(true));
    assert_eq!(set.iter().nth(1).map(|c| c.name), Some("tint"));
}

#[test]
fn material_controls_apply_live() {
    let set = material_param_set(1.0, 1.0, false);
    assert_eq!(set.len(), 3);
    assert!(set.iter().all(|c| c.trigger == Trigger::Change));
    assert_eq!(
        set.control(PARAM_ROUGHNESS).map(|c| c.kind),
        Some(ControlKind::Range {
            min: 0.0,
            max: 1.0,
            step: 0.0001
        })
    );
    assert_eq!(set.flag(PARAM_WIREFRAME), Some(false));
}
