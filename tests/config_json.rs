use std::path::PathBuf;

use glyphdrift::{Ease, GlyphDriftError, OverlayConfig, Rgba8, Span};

fn write_config(name: &str, json: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("config_json");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    std::fs::write(&path, json).unwrap();
    path
}

#[test]
fn full_config_round_trips_through_a_file() {
    let path = write_config(
        "full.json",
        r##"{
            "label": "HELLO",
            "glyph_size": 24.0,
            "color": "#102030",
            "stroke_width": 1.0,
            "max_paths": 12,
            "spawn_interval": 5,
            "fade_in_frames": 10,
            "fade_out_frames": 20,
            "fade_ease": "in_out_cubic",
            "peak_opacity": { "min": 100.0, "max": 200.0 },
            "lifespan_frames": { "min": 60, "max": 90 },
            "curve": {
                "control_points": { "min": 4, "max": 4 },
                "step_distance": { "min": 50.0, "max": 80.0 },
                "edge_margin": 0.2,
                "samples_per_segment": 10
            },
            "seed": 77
        }"##,
    );

    let cfg = OverlayConfig::from_json_path(&path).unwrap();
    assert_eq!(cfg.label, "HELLO");
    assert_eq!(cfg.color, Rgba8::rgb(0x10, 0x20, 0x30));
    assert_eq!(cfg.fade_ease, Ease::InOutCubic);
    assert_eq!(cfg.lifespan_frames, Span::new(60, 90));
    assert_eq!(cfg.curve.samples_per_segment, 10);
    assert_eq!(cfg.seed, Some(77));
    assert!((cfg.glyph_spacing() - 36.0).abs() < 1e-12);
}

#[test]
fn partial_config_keeps_defaults() {
    let path = write_config("partial.json", r#"{ "label": "ABC" }"#);
    let cfg = OverlayConfig::from_json_path(&path).unwrap();
    assert_eq!(
        cfg,
        OverlayConfig {
            label: "ABC".to_string(),
            ..OverlayConfig::default()
        }
    );
}

#[test]
fn unknown_fields_are_rejected() {
    let path = write_config("unknown.json", r#"{ "lable": "typo" }"#);
    let err = OverlayConfig::from_json_path(&path).unwrap_err();
    assert!(matches!(err, GlyphDriftError::Serde(_)));
}

#[test]
fn inverted_span_fails_validation() {
    let path = write_config(
        "inverted.json",
        r#"{ "peak_opacity": { "min": 255.0, "max": 10.0 } }"#,
    );
    let err = OverlayConfig::from_json_path(&path).unwrap_err();
    assert!(matches!(err, GlyphDriftError::Validation(_)));
}

#[test]
fn missing_file_is_an_io_error() {
    let path = PathBuf::from("target")
        .join("config_json")
        .join("does_not_exist.json");
    let err = OverlayConfig::from_json_path(&path).unwrap_err();
    assert!(matches!(err, GlyphDriftError::Io(_)));
}
