// Host-side tests for the damped spring integrator.

use ship_core::{ShipError, Spring};

const DT: f32 = 1.0 / 60.0;

fn run(spring: &mut Spring, seconds: f32, dt: f32) {
    let frames = (seconds / dt).round() as usize;
    for _ in 0..frames {
        spring.advance(dt);
    }
}

#[test]
fn new_spring_is_at_rest_on_zero() {
    let spring = Spring::new(50.0, 4.0).unwrap();
    assert!(spring.is_resting());
    assert_eq!(spring.value(), 0.0);
    assert_eq!(spring.target(), 0.0);
}

#[test]
fn rejects_bad_constants() {
    assert!(matches!(
        Spring::new(0.0, 1.0),
        Err(ShipError::InvalidParameter {
            field: "stiffness",
            ..
        })
    ));
    assert!(Spring::new(10.0, -1.0).is_err());
    assert!(Spring::new(f32::NAN, 1.0).is_err());
}

#[test]
fn resting_spring_does_not_move() {
    let mut spring = Spring::new(50.0, 4.0).unwrap();
    assert!(!spring.advance(DT));
    assert_eq!(spring.value(), 0.0);
}

#[test]
fn underdamped_spring_overshoots_then_settles_on_target() {
    let mut spring = Spring::new(50.0, 4.0).unwrap();
    spring.set_target(1.0);

    let mut peak = 0.0f32;
    for _ in 0..120 {
        spring.advance(DT);
        peak = peak.max(spring.value());
    }
    assert!(peak > 1.0, "expected overshoot, peak {peak}");

    run(&mut spring, 10.0, DT);
    assert!(spring.is_resting());
    assert_eq!(spring.value(), 1.0);
    assert_eq!(spring.velocity(), 0.0);
}

#[test]
fn result_does_not_depend_on_frame_rate() {
    let mut at_60 = Spring::new(60.0, 6.0).unwrap();
    let mut at_120 = Spring::new(60.0, 6.0).unwrap();
    at_60.set_target(0.5);
    at_120.set_target(0.5);

    run(&mut at_60, 0.25, 1.0 / 60.0);
    run(&mut at_120, 0.25, 1.0 / 120.0);
    // sub-step boundaries may differ by a step between the two runs
    assert!((at_60.value() - at_120.value()).abs() < 0.03);
}

#[test]
fn very_stiff_spring_stays_bounded() {
    let mut spring = Spring::new(1.0e6, 100.0).unwrap();
    spring.set_target(1.0);
    for _ in 0..600 {
        spring.advance(DT);
        assert!(spring.value().is_finite());
        assert!(spring.value().abs() < 10.0);
    }
}

#[test]
fn heavily_damped_spring_creeps_to_target_without_overshoot() {
    for damping in [600.0, 5_000.0, 1.0e5] {
        let mut spring = Spring::new(100.0, damping).unwrap();
        spring.set_target(1.0);
        let mut last = 0.0;
        for _ in 0..60 {
            spring.advance(DT);
            let value = spring.value();
            assert!(value.is_finite(), "damping {damping}: {value}");
            assert!(value >= last && value <= 1.0, "damping {damping}: {value}");
            last = value;
        }
        assert!(last > 0.0, "damping {damping} never moved");
    }
}

#[test]
fn stiff_and_damped_spring_stays_bounded() {
    let mut spring = Spring::new(1.0e6, 600.0).unwrap();
    spring.set_target(1.0);
    for _ in 0..600 {
        spring.advance(DT);
        assert!(spring.value().is_finite());
        assert!(spring.value().abs() < 2.0);
    }
}

#[test]
fn long_stall_is_capped() {
    let mut spring = Spring::new(50.0, 4.0).unwrap();
    spring.set_target(1.0);
    // a ten second hitch only integrates a bounded number of sub-steps
    spring.advance(10.0);
    assert!(spring.value().is_finite());
    assert!(!spring.is_resting());
}

#[test]
fn set_params_keeps_state_and_wakes() {
    let mut spring = Spring::new(50.0, 4.0).unwrap();
    spring.set_target(1.0);
    spring.advance(0.1);
    let (value, velocity) = (spring.value(), spring.velocity());

    spring.set_params(Some(80.0), None).unwrap();
    assert_eq!(spring.value(), value);
    assert_eq!(spring.velocity(), velocity);
    assert_eq!(spring.params().stiffness, 80.0);
    assert_eq!(spring.params().damping, 4.0);
    assert!(!spring.is_resting());
}

#[test]
fn failed_set_params_changes_nothing() {
    let mut spring = Spring::new(50.0, 4.0).unwrap();
    assert!(spring.set_params(Some(-5.0), Some(1.0)).is_err());
    assert_eq!(spring.params().stiffness, 50.0);
    assert_eq!(spring.params().damping, 4.0);
    assert!(spring.is_resting());
}

#[test]
fn reset_puts_spring_at_rest() {
    let mut spring = Spring::new(50.0, 4.0).unwrap();
    spring.set_target(1.0);
    spring.advance(0.2);
    spring.reset(0.3);
    assert!(spring.is_resting());
    assert_eq!(spring.value(), 0.3);
    assert_eq!(spring.target(), 0.3);
    assert_eq!(spring.velocity(), 0.0);
}
