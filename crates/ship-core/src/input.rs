//! Active-key bookkeeping and the coarse control state derived from it.
//!
//! Key events land in an [`InputState`] whenever the platform delivers them.
//! Once per frame the driver takes an [`ActiveInputSet`] snapshot and hands
//! that to every controller, so no update ever sees a set that changes
//! halfway through the frame.

use crate::config::KeyBindings;
use fnv::FnvHashSet;
use std::sync::{Arc, Mutex, MutexGuard};

/// Immutable snapshot of the tokens held down for one frame.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActiveInputSet {
    keys: FnvHashSet<String>,
}

impl ActiveInputSet {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn contains(&self, token: &str) -> bool {
        self.keys.contains(token)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for ActiveInputSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Which of a controller's two direction tokens is in effect this frame.
///
/// When both tokens are held the positive one wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Drive {
    Positive,
    Negative,
    Idle,
}

impl Drive {
    #[inline]
    pub fn resolve(input: &ActiveInputSet, positive: &str, negative: &str) -> Self {
        if input.contains(positive) {
            Drive::Positive
        } else if input.contains(negative) {
            Drive::Negative
        } else {
            Drive::Idle
        }
    }

    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Drive::Positive => 1.0,
            Drive::Negative => -1.0,
            Drive::Idle => 0.0,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    Forward,
    #[default]
    Neutral,
    Backward,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Turn {
    Left,
    #[default]
    Neutral,
    Right,
}

/// Coarse throttle/turn state used for on-off effects such as the jets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControlState {
    pub direction: Direction,
    pub turn: Turn,
}

impl ControlState {
    /// Derives the state from the throttle and yaw bindings.
    ///
    /// Positive yaw rotates about +Y, which swings the nose to the left.
    pub fn from_input(input: &ActiveInputSet, keys: &KeyBindings) -> Self {
        let direction = match Drive::resolve(input, &keys.throttle.positive, &keys.throttle.negative)
        {
            Drive::Positive => Direction::Forward,
            Drive::Negative => Direction::Backward,
            Drive::Idle => Direction::Neutral,
        };
        let turn = match Drive::resolve(input, &keys.yaw.positive, &keys.yaw.negative) {
            Drive::Positive => Turn::Left,
            Drive::Negative => Turn::Right,
            Drive::Idle => Turn::Neutral,
        };
        Self { direction, turn }
    }
}

/// Mutable key set fed by key-down/key-up events.
#[derive(Clone, Debug, Default)]
pub struct InputState {
    active: FnvHashSet<String>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the key was not already held.
    pub fn key_down(&mut self, key: &str) -> bool {
        let added = self.active.insert(key.to_owned());
        if added {
            log::trace!("[input] {} down", display_key(key));
        }
        added
    }

    /// Returns true if the key was held.
    pub fn key_up(&mut self, key: &str) -> bool {
        let removed = self.active.remove(key);
        if removed {
            log::trace!("[input] {} up", display_key(key));
        }
        removed
    }

    /// Drops every held key, e.g. when the window loses focus.
    pub fn clear(&mut self) {
        self.active.clear();
    }

    pub fn is_down(&self, key: &str) -> bool {
        self.active.contains(key)
    }

    pub fn snapshot(&self) -> ActiveInputSet {
        ActiveInputSet {
            keys: self.active.clone(),
        }
    }
}

/// [`InputState`] behind a mutex, for key capture on a different thread than
/// the frame driver.
#[derive(Clone, Debug, Default)]
pub struct SharedInputState {
    inner: Arc<Mutex<InputState>>,
}

impl SharedInputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&self, key: &str) -> bool {
        self.lock().key_down(key)
    }

    pub fn key_up(&self, key: &str) -> bool {
        self.lock().key_up(key)
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Copies the set under a single lock so the frame sees one consistent state.
    pub fn snapshot(&self) -> ActiveInputSet {
        self.lock().snapshot()
    }

    fn lock(&self) -> MutexGuard<'_, InputState> {
        // A panic while holding the lock cannot leave the set half-written.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[inline]
fn display_key(key: &str) -> &str {
    if key == " " {
        "space"
    } else {
        key
    }
}
