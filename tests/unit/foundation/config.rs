use super::*;

#[test]
fn screen_classes_follow_breakpoints() {
    assert_eq!(ScreenWidth::classify(320.0), ScreenWidth::S);
    assert_eq!(ScreenWidth::classify(500.0), ScreenWidth::S);
    assert_eq!(ScreenWidth::classify(501.0), ScreenWidth::M);
    assert_eq!(ScreenWidth::classify(1024.0), ScreenWidth::L);
    assert_eq!(ScreenWidth::classify(1920.0), ScreenWidth::XL);
}

#[test]
fn cap_sizes_scale_with_point_size() {
    let cfg = Config::for_viewport_width(700.0);
    assert_eq!(cfg.point_px, 6.0);
    assert!((cfg.cap_px_green - 7.2).abs() < 1e-12);
    assert!((cfg.cap_px_blue - 8.4).abs() < 1e-12);
}

#[test]
fn defaults_validate() {
    let cfg = Config::default();
    cfg.validate().unwrap();
    assert_eq!(cfg.speed, 1.0);
    assert_eq!(cfg.eps, 1e-4);
    assert_eq!(cfg.backward_fade_fraction, 0.4);
}

#[test]
fn partial_json_fills_defaults() {
    let cfg = Config::from_reader(r#"{ "speed": 2.5 }"#.as_bytes()).unwrap();
    assert_eq!(cfg.speed, 2.5);
    assert_eq!(cfg.max_delta_time, 1.0 / 30.0);
}

#[test]
fn unknown_fields_are_rejected() {
    let err = Config::from_reader(r#"{ "sped": 2.5 }"#.as_bytes()).unwrap_err();
    assert!(matches!(err, OrbdrawError::Serde(_)));
}

#[test]
fn out_of_domain_values_are_rejected() {
    let bad = [
        Config {
            speed: 0.0,
            ..Config::default()
        },
        Config {
            max_delta_time: -1.0,
            ..Config::default()
        },
        Config {
            eps: 0.5,
            ..Config::default()
        },
        Config {
            backward_fade_fraction: 0.0,
            ..Config::default()
        },
        Config {
            line_segments: 0,
            ..Config::default()
        },
        Config {
            orb_radius: f64::NAN,
            ..Config::default()
        },
    ];
    for cfg in bad {
        assert!(matches!(cfg.validate(), Err(OrbdrawError::Validation(_))));
    }
}

#[test]
fn missing_file_is_a_validation_error() {
    let err = Config::from_path("target/definitely/not/here.json").unwrap_err();
    assert!(err.to_string().contains("open config JSON"));
}
