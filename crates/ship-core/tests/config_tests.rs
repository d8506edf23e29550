// Host-side tests for flight config parsing and controller construction.

use ship_core::*;

#[test]
fn empty_document_gives_defaults() {
    let config = FlightConfig::from_json_str("{}").unwrap();
    assert_eq!(config, FlightConfig::default());
    assert_eq!(config.keys.exhaust, " ");
    assert_eq!(config.motion.roll.axis, Axis::Z);
    assert_eq!(config.motion.pitch.axis, Axis::X);
}

#[test]
fn partial_sections_keep_remaining_defaults() {
    let json = r#"{
        "keys": { "exhaust": "Shift", "yaw": { "positive": "j", "negative": "l" } },
        "exhaust": { "count": 50, "coneAngle": 20.0 }
    }"#;
    let config = FlightConfig::from_json_str(json).unwrap();

    assert_eq!(config.keys.exhaust, "Shift");
    assert_eq!(config.keys.yaw, KeyPair::new("j", "l"));
    assert_eq!(config.keys.roll, KeyBindings::default().roll);

    assert_eq!(config.exhaust.count, 50);
    assert_eq!(config.exhaust.cone_angle, 20.0);
    assert_eq!(config.exhaust.decay_speed, 0.01);
    assert_eq!(config.motion, MotionConstants::default());
}

#[test]
fn yaw_model_is_selected_by_tag() {
    let json = r#"{
        "motion": {
            "yaw": { "model": "rate", "axis": "y", "rateIncrement": 0.2, "maxRate": 2.0, "decayFactor": 0.9 }
        }
    }"#;
    let config = FlightConfig::from_json_str(json).unwrap();
    match Motion::from_config(MotionKind::Yaw, &config).unwrap() {
        Motion::Rate(m) => {
            assert_eq!(m.config().rate_increment, 0.2);
            assert_eq!(m.config().max_rate, 2.0);
            assert_eq!(m.config().keys, KeyBindings::default().yaw);
        }
        other => panic!("expected rate rotator, got {}", other.variant_name()),
    }

    let default_yaw = Motion::from_config(MotionKind::Yaw, &FlightConfig::default()).unwrap();
    assert_eq!(default_yaw.variant_name(), "yaw");
}

#[test]
fn each_kind_builds_its_controller() {
    let config = FlightConfig::default();
    let names: Vec<&str> = MotionKind::ALL
        .iter()
        .map(|&kind| Motion::from_config(kind, &config).unwrap().variant_name())
        .collect();
    assert_eq!(names, ["harmonic", "harmonic", "yaw", "translation"]);
}

#[test]
fn harmonic_constants_are_converted_from_degrees() {
    let json = r#"{
        "motion": { "pitch": { "axis": "x", "stiffness": 40.0, "damping": 3.0, "maxAngle": 45.0 } }
    }"#;
    let config = FlightConfig::from_json_str(json).unwrap();
    match Motion::from_config(MotionKind::Pitch, &config).unwrap() {
        Motion::Harmonic(m) => {
            assert!((m.max_angle() - std::f32::consts::FRAC_PI_4).abs() < 1e-6);
            assert_eq!(m.spring().params().stiffness, 40.0);
        }
        other => panic!("expected spring, got {}", other.variant_name()),
    }
}

#[test]
fn malformed_json_is_a_parse_error() {
    let unknown_model = r#"{ "motion": { "yaw": { "model": "warp", "axis": "y" } } }"#;
    assert!(matches!(
        FlightConfig::from_json_str(unknown_model),
        Err(ShipError::Parse(_))
    ));
    assert!(matches!(
        FlightConfig::from_json_str("{ not json"),
        Err(ShipError::Parse(_))
    ));
}

#[test]
fn out_of_range_values_fail_at_build_time() {
    let json = r#"{
        "motion": { "roll": { "axis": "z", "stiffness": -1.0, "damping": 4.0, "maxAngle": 15.0 } }
    }"#;
    let config = FlightConfig::from_json_str(json).unwrap();
    assert!(matches!(
        Motion::from_config(MotionKind::Roll, &config),
        Err(ShipError::InvalidParameter {
            field: "stiffness",
            ..
        })
    ));
    assert!(ShipRig::new(&config, 0).is_err());
}

#[test]
fn pretty_json_reads_back() {
    let config = FlightConfig::default();
    let json = config.to_json_pretty().unwrap();
    assert!(json.contains("\"model\": \"accelerated\""));
    assert!(json.contains("\"maxAngle\""));
    assert_eq!(FlightConfig::from_json_str(&json).unwrap(), config);
}

#[test]
fn missing_file_is_an_io_error() {
    let err = FlightConfig::load("/nonexistent/flight.json").unwrap_err();
    assert!(matches!(err, ShipError::Io(_)));
}

#[test]
fn bundled_sample_config_loads() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../assets/flight.json");
    let config = FlightConfig::load(path).unwrap();
    assert!(matches!(config.motion.yaw, YawConstants::Rate { .. }));
    assert!(ShipRig::new(&config, 1).is_ok());
}
