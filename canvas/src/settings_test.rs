#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn defaults_match_consts() {
    let s = EngineSettings::default();
    assert_eq!(s.anchor_size, 8.0);
    assert_eq!(s.anchor_hover_size, 20.0);
    assert_eq!(s.line_thickness, 2.0);
    assert_eq!(s.fill_alpha, 0.2);
    assert_eq!(s.active_line_color, "#FFFFFF");
    assert_eq!(s.inactive_line_color, "#FFFF00");
    assert_eq!(s.label_colors.len(), LABEL_COLORS.len());
}

#[test]
fn defaults_are_valid() {
    assert!(EngineSettings::default().validate().is_ok());
}

#[test]
fn partial_json_keeps_defaults() {
    let s = EngineSettings::from_json_str(r#"{"anchor_hover_size": 30}"#).unwrap();
    assert_eq!(s.anchor_hover_size, 30.0);
    assert_eq!(s.anchor_size, 8.0);
    assert_eq!(s.label_colors, EngineSettings::default().label_colors);
}

#[test]
fn empty_object_is_default() {
    assert_eq!(EngineSettings::from_json_str("{}").unwrap(), EngineSettings::default());
}

#[test]
fn malformed_json_is_rejected() {
    let err = EngineSettings::from_json_str("{not json").unwrap_err();
    assert!(matches!(err, SettingsError::Json(_)));
}

#[test]
fn non_positive_sizes_are_rejected() {
    for json in [r#"{"anchor_size": 0}"#, r#"{"anchor_hover_size": -4}"#, r#"{"line_thickness": 0}"#] {
        let err = EngineSettings::from_json_str(json).unwrap_err();
        assert!(matches!(err, SettingsError::NonPositive { .. }), "{json}: {err}");
    }
}

#[test]
fn nan_size_is_rejected() {
    let s = EngineSettings { anchor_size: f64::NAN, ..EngineSettings::default() };
    assert!(matches!(s.validate(), Err(SettingsError::NonPositive { field: "anchor_size", .. })));
}

#[test]
fn alpha_out_of_range_is_rejected() {
    let err = EngineSettings::from_json_str(r#"{"fill_alpha": 1.5}"#).unwrap_err();
    assert!(matches!(err, SettingsError::AlphaOutOfRange(a) if a == 1.5));
    assert!(EngineSettings::from_json_str(r#"{"fill_alpha": 0}"#).is_ok());
    assert!(EngineSettings::from_json_str(r#"{"fill_alpha": 1}"#).is_ok());
}

#[test]
fn bad_colors_are_rejected() {
    let err = EngineSettings::from_json_str(r##"{"active_line_color": "white"}"##).unwrap_err();
    assert!(matches!(err, SettingsError::BadColor { field: "active_line_color", .. }));

    let err = EngineSettings::from_json_str(r##"{"label_colors": ["#00FF00", "#12345"]}"##).unwrap_err();
    assert!(matches!(err, SettingsError::BadColor { field: "label_colors", .. }));
}

#[test]
fn empty_palette_is_rejected() {
    let err = EngineSettings::from_json_str(r#"{"label_colors": []}"#).unwrap_err();
    assert!(matches!(err, SettingsError::EmptyPalette));
}

#[test]
fn error_messages_name_the_field() {
    let err = EngineSettings::from_json_str(r#"{"anchor_size": -1}"#).unwrap_err();
    assert_eq!(err.to_string(), "anchor_size must be positive, got -1");
}
