// Host-side tests for the lifetime colour ramp.

use ship_core::{ColorMapEntry, ColorRamp, ShipError};

const EPS: f32 = 1e-5;

fn assert_rgb_near(actual: [f32; 3], expected: [f32; 3]) {
    for i in 0..3 {
        assert!(
            (actual[i] - expected[i]).abs() < EPS,
            "channel {i}: {actual:?} vs {expected:?}"
        );
    }
}

fn entry(limit: f32, color: [f32; 3]) -> ColorMapEntry {
    ColorMapEntry { limit, color }
}

#[test]
fn blends_between_bounding_colors() {
    let ramp = ColorRamp::exhaust();
    // halfway between blue (1.0) and red (0.9)
    assert_rgb_near(ramp.color_for(0.95), [0.5, 0.0, 0.5]);
    // 3/4 of the way from yellow (0.5) to red (0.9)
    assert_rgb_near(ramp.color_for(0.8), [1.0, 0.25, 0.0]);
}

#[test]
fn lower_bound_of_a_range_is_inclusive() {
    let ramp = ColorRamp::exhaust();
    assert_rgb_near(ramp.color_for(0.9), [1.0, 0.0, 0.0]);
    assert_rgb_near(ramp.color_for(0.5), [1.0, 1.0, 0.0]);
}

#[test]
fn out_of_range_falls_back_to_last_color() {
    let ramp = ColorRamp::exhaust();
    assert_eq!(ramp.color_for(0.1), [1.0, 1.0, 0.0]);
    assert_eq!(ramp.color_for(0.0), [1.0, 1.0, 0.0]);
    // the top limit is exclusive
    assert_eq!(ramp.color_for(1.0), [1.0, 1.0, 0.0]);
}

#[test]
fn lookup_is_pure() {
    let ramp = ColorRamp::exhaust();
    let first = ramp.color_for(0.73);
    for ratio in [0.1, 0.99, 0.0, 0.5] {
        ramp.color_for(ratio);
    }
    assert_eq!(ramp.color_for(0.73), first);
}

#[test]
fn ranges_pair_consecutive_limits() {
    let ramp = ColorRamp::exhaust();
    let ranges = ramp.ranges();
    assert_eq!(ranges.len(), 2);
    assert_eq!((ranges[0].start, ranges[0].end), (1.0, 0.9));
    assert_eq!((ranges[1].start, ranges[1].end), (0.9, 0.5));
}

#[test]
fn single_entry_map_is_constant() {
    let ramp = ColorRamp::new([entry(1.0, [0.2, 0.4, 0.6])]).unwrap();
    assert!(ramp.ranges().is_empty());
    assert_eq!(ramp.color_for(0.5), [0.2, 0.4, 0.6]);
    assert_eq!(ramp.first_color(), [0.2, 0.4, 0.6]);
}

#[test]
fn rejects_empty_and_unsorted_maps() {
    assert!(matches!(
        ColorRamp::new(Vec::new()),
        Err(ShipError::EmptyColorMap)
    ));

    let ascending = [entry(0.5, [1.0, 1.0, 0.0]), entry(0.9, [1.0, 0.0, 0.0])];
    assert!(matches!(
        ColorRamp::new(ascending),
        Err(ShipError::UnsortedColorMap { index: 1, .. })
    ));

    let duplicate = [entry(0.9, [1.0, 0.0, 0.0]), entry(0.9, [0.0, 0.0, 1.0])];
    assert!(ColorRamp::new(duplicate).is_err());

    let nan = [entry(f32::NAN, [0.0; 3])];
    assert!(matches!(
        ColorRamp::new(nan),
        Err(ShipError::InvalidParameter { .. })
    ));
}

#[test]
fn set_entries_rebuilds_ranges() {
    let mut ramp = ColorRamp::exhaust();
    ramp.set_entries([entry(1.0, [1.0, 1.0, 1.0]), entry(0.0, [0.0, 0.0, 0.0])])
        .unwrap();
    assert_eq!(ramp.ranges().len(), 1);
    assert_rgb_near(ramp.color_for(0.25), [0.25, 0.25, 0.25]);
}

#[test]
fn failed_set_entries_keeps_current_map() {
    let mut ramp = ColorRamp::exhaust();
    let before = ramp.clone();
    assert!(ramp.set_entries(Vec::new()).is_err());
    assert_eq!(ramp, before);
}
