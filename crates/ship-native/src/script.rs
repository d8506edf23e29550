//! Scripted key timelines replayed by the headless driver.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use ship_core::{InputState, KeyBindings};
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KeyEvent {
    /// seconds from the start of the run
    pub at: f32,
    pub key: String,
    pub down: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Script {
    pub seconds: f32,
    pub events: Vec<KeyEvent>,
}

impl Script {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading script {}", path.display()))?;
        let mut script: Script = serde_json::from_str(&text)
            .with_context(|| format!("parsing script {}", path.display()))?;
        script.sort();
        Ok(script)
    }

    /// Forward burn with a left turn and a roll, a boost, then a reverse
    /// through a right turn.
    pub fn demo(keys: &KeyBindings) -> Self {
        let hold = |key: &str, from: f32, to: f32| {
            [
                KeyEvent {
                    at: from,
                    key: key.to_owned(),
                    down: true,
                },
                KeyEvent {
                    at: to,
                    key: key.to_owned(),
                    down: false,
                },
            ]
        };
        let mut events = Vec::new();
        events.extend(hold(&keys.throttle.positive, 0.0, 3.0));
        events.extend(hold(&keys.yaw.positive, 1.0, 2.0));
        events.extend(hold(&keys.roll.positive, 1.0, 2.0));
        events.extend(hold(&keys.exhaust, 2.5, 3.0));
        events.extend(hold(&keys.pitch.positive, 3.0, 3.5));
        events.extend(hold(&keys.throttle.negative, 4.0, 5.0));
        events.extend(hold(&keys.yaw.negative, 4.2, 4.8));
        let mut script = Self {
            seconds: 6.0,
            events,
        };
        script.sort();
        script
    }

    fn sort(&mut self) {
        self.events.sort_by(|a, b| a.at.total_cmp(&b.at));
    }
}

/// Feeds script events into an [`InputState`] as simulated time advances.
pub struct Playback<'a> {
    events: &'a [KeyEvent],
    next: usize,
}

impl<'a> Playback<'a> {
    pub fn new(script: &'a Script) -> Self {
        Self {
            events: &script.events,
            next: 0,
        }
    }

    /// Applies every event due at or before `now`.
    pub fn advance_to(&mut self, now: f32, input: &mut InputState) {
        while let Some(ev) = self.events.get(self.next) {
            if ev.at > now {
                break;
            }
            if ev.down {
                input.key_down(&ev.key);
            } else {
                input.key_up(&ev.key);
            }
            self.next += 1;
        }
    }
}
