use super::*;

#[test]
fn empty_json_yields_defaults() {
    let cfg = WallConfig::from_json("{}").unwrap();
    assert_eq!(cfg, WallConfig::default());
    assert_eq!(cfg.padding, 6);
    assert_eq!(cfg.target_item_height, 240);
    assert_eq!(cfg.timings(), SchedulerTimings::default());
    assert!((cfg.aspect_ratio - 2.0 / 3.0).abs() < 1e-12);
}

#[test]
fn partial_json_overrides_only_given_fields() {
    let cfg = WallConfig::from_json(r#"{"rows": 3, "flip_ease": "linear", "seed": 11}"#).unwrap();
    assert_eq!(cfg.rows, Some(3));
    assert_eq!(cfg.flip_ease, Ease::Linear);
    assert_eq!(cfg.seed, Some(11));
    assert_eq!(cfg.interval_ms, 3_000);
}

#[test]
fn validation_rejects_degenerate_values() {
    for json in [
        r#"{"aspect_ratio": 0}"#,
        r#"{"aspect_ratio": -1.5}"#,
        r#"{"rows": 0}"#,
        r#"{"rows": 513}"#,
        r#"{"rows": 4294967295}"#,
        r#"{"target_item_height": 0}"#,
        r#"{"interval_ms": 0}"#,
        r#"{"flip_duration_ms": 0}"#,
    ] {
        let err = WallConfig::from_json(json).unwrap_err();
        assert!(matches!(err, WallError::Config(_)), "{json}: {err}");
    }
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = WallConfig::from_json(r#"{"padding": "wide"}"#).unwrap_err();
    assert!(matches!(err, WallError::Serde(_)));
}

#[test]
fn params_override_layout_fields() {
    let params = WallParams::from_hash("aspect=1/1&rows=2&padding=0");
    let cfg = WallConfig::default().with_params(&params);
    assert_eq!(cfg.aspect_ratio, 1.0);
    assert_eq!(cfg.rows, Some(2));
    assert_eq!(cfg.padding, 0);
    assert_eq!(
        cfg.layout_params(),
        LayoutParams {
            padding: 0,
            target_item_height: 240,
            aspect_ratio: 1.0,
            rows: Some(2),
        }
    );
}

#[test]
fn largest_row_count_is_accepted() {
    let cfg = WallConfig {
        rows: Some(MAX_GRID_AXIS),
        ..WallConfig::default()
    };
    assert!(cfg.validate().is_ok());
}
