// Host-side tests for key bookkeeping and the derived control state.

use ship_core::*;
use std::thread;

fn keys(held: &[&str]) -> ActiveInputSet {
    held.iter().copied().collect()
}

#[test]
fn key_down_and_up_report_changes() {
    let mut input = InputState::new();
    assert!(input.key_down("w"));
    assert!(!input.key_down("w"));
    assert!(input.is_down("w"));

    assert!(input.key_up("w"));
    assert!(!input.key_up("w"));
    assert!(!input.is_down("w"));
}

#[test]
fn snapshot_is_frozen() {
    let mut input = InputState::new();
    input.key_down("a");
    input.key_down(" ");
    let frame = input.snapshot();

    input.key_up("a");
    input.key_down("d");
    assert!(frame.contains("a"));
    assert!(frame.contains(" "));
    assert!(!frame.contains("d"));
    assert_eq!(frame.len(), 2);
}

#[test]
fn clear_drops_every_key() {
    let mut input = InputState::new();
    input.key_down("w");
    input.key_down("e");
    input.clear();
    assert!(input.snapshot().is_empty());
}

#[test]
fn active_set_collects_and_iterates() {
    let set = keys(&["w", "a", "w"]);
    assert_eq!(set.len(), 2);
    let mut tokens: Vec<&str> = set.iter().collect();
    tokens.sort_unstable();
    assert_eq!(tokens, ["a", "w"]);
    assert!(ActiveInputSet::new().is_empty());
}

#[test]
fn drive_resolution() {
    assert_eq!(Drive::resolve(&keys(&["e"]), "e", "q"), Drive::Positive);
    assert_eq!(Drive::resolve(&keys(&["q"]), "e", "q"), Drive::Negative);
    assert_eq!(Drive::resolve(&keys(&["x"]), "e", "q"), Drive::Idle);
    assert_eq!(Drive::resolve(&keys(&["e", "q"]), "e", "q"), Drive::Positive);
    assert_eq!(Drive::Negative.sign(), -1.0);
    assert_eq!(Drive::Idle.sign(), 0.0);
}

#[test]
fn control_state_from_default_bindings() {
    let bindings = KeyBindings::default();

    let state = ControlState::from_input(&keys(&["w", "a"]), &bindings);
    assert_eq!(state.direction, Direction::Forward);
    assert_eq!(state.turn, Turn::Left);

    let state = ControlState::from_input(&keys(&["s", "d"]), &bindings);
    assert_eq!(state.direction, Direction::Backward);
    assert_eq!(state.turn, Turn::Right);

    let state = ControlState::from_input(&keys(&["w", "s", "e"]), &bindings);
    assert_eq!(state.direction, Direction::Forward);
    assert_eq!(state.turn, Turn::Neutral);

    assert_eq!(
        ControlState::from_input(&ActiveInputSet::new(), &bindings),
        ControlState::default()
    );
}

#[test]
fn control_state_follows_rebound_keys() {
    let bindings = KeyBindings {
        throttle: KeyPair::new("ArrowUp", "ArrowDown"),
        ..KeyBindings::default()
    };
    let state = ControlState::from_input(&keys(&["ArrowUp"]), &bindings);
    assert_eq!(state.direction, Direction::Forward);
    let state = ControlState::from_input(&keys(&["w"]), &bindings);
    assert_eq!(state.direction, Direction::Neutral);
}

#[test]
fn shared_state_accepts_keys_from_another_thread() {
    let shared = SharedInputState::new();
    let writer = shared.clone();
    thread::spawn(move || {
        writer.key_down("w");
        writer.key_down("a");
        writer.key_up("a");
    })
    .join()
    .unwrap();

    let frame = shared.snapshot();
    assert!(frame.contains("w"));
    assert!(!frame.contains("a"));

    shared.clear();
    assert!(shared.snapshot().is_empty());
}
