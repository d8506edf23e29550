//! Static tuning data: motion constants, key bindings and exhaust settings.
//!
//! Field names follow the camelCase JSON the scene ships with. Every section
//! defaults to the values in [`crate::constants`], so a file only needs the
//! entries it changes. Angles are stored in degrees here and converted to
//! radians when a controller or emitter is built.

use crate::constants::*;
use crate::error::Result;
use crate::scene::Axis;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Positive/negative token pair driving one motion.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPair {
    pub positive: String,
    pub negative: String,
}

impl KeyPair {
    pub fn new(positive: impl Into<String>, negative: impl Into<String>) -> Self {
        Self {
            positive: positive.into(),
            negative: negative.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub roll: KeyPair,
    pub pitch: KeyPair,
    pub yaw: KeyPair,
    pub throttle: KeyPair,
    pub exhaust: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            roll: KeyPair::new(KEY_ROLL_POSITIVE, KEY_ROLL_NEGATIVE),
            pitch: KeyPair::new(KEY_PITCH_POSITIVE, KEY_PITCH_NEGATIVE),
            yaw: KeyPair::new(KEY_YAW_POSITIVE, KEY_YAW_NEGATIVE),
            throttle: KeyPair::new(KEY_THROTTLE_POSITIVE, KEY_THROTTLE_NEGATIVE),
            exhaust: KEY_EXHAUST.to_owned(),
        }
    }
}

/// Spring oscillator tuning (roll and pitch).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HarmonicConstants {
    pub axis: Axis,
    pub stiffness: f32,
    pub damping: f32,
    /// Degrees.
    pub max_angle: f32,
}

/// Yaw tuning, tagged by integration model.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "lowercase")]
pub enum YawConstants {
    /// Per-frame rate increment with geometric decay.
    #[serde(rename_all = "camelCase")]
    Rate {
        axis: Axis,
        rate_increment: f32,
        max_rate: f32,
        decay_factor: f32,
    },
    /// Acceleration in rad/s² with a per-call decay.
    #[serde(rename_all = "camelCase")]
    Accelerated {
        axis: Axis,
        acceleration: f32,
        max_speed: f32,
        decay_factor: f32,
    },
}

impl Default for YawConstants {
    fn default() -> Self {
        YawConstants::Accelerated {
            axis: Axis::Y,
            acceleration: YAW_ACCELERATION,
            max_speed: YAW_MAX_SPEED,
            decay_factor: YAW_DECAY_FACTOR,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationConstants {
    pub acceleration: f32,
    pub max_speed: f32,
    pub decay_factor: f32,
}

impl Default for TranslationConstants {
    fn default() -> Self {
        Self {
            acceleration: THROTTLE_ACCELERATION,
            max_speed: THROTTLE_MAX_SPEED,
            decay_factor: THROTTLE_DECAY_FACTOR,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConstants {
    pub roll: HarmonicConstants,
    pub pitch: HarmonicConstants,
    pub yaw: YawConstants,
    pub throttle: TranslationConstants,
}

impl Default for MotionConstants {
    fn default() -> Self {
        Self {
            roll: HarmonicConstants {
                axis: Axis::Z,
                stiffness: ROLL_STIFFNESS,
                damping: ROLL_DAMPING,
                max_angle: ROLL_MAX_ANGLE_DEG,
            },
            pitch: HarmonicConstants {
                axis: Axis::X,
                stiffness: PITCH_STIFFNESS,
                damping: PITCH_DAMPING,
                max_angle: PITCH_MAX_ANGLE_DEG,
            },
            yaw: YawConstants::default(),
            throttle: TranslationConstants::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExhaustConstants {
    pub count: usize,
    /// Emission half-angle in degrees.
    pub cone_angle: f32,
    pub decay_speed: f32,
    pub speed_decay: f32,
    pub emission_speed: f32,
    pub left_offset: [f32; 3],
    pub right_offset: [f32; 3],
}

impl Default for ExhaustConstants {
    fn default() -> Self {
        Self {
            count: EXHAUST_PARTICLE_COUNT,
            cone_angle: EXHAUST_CONE_ANGLE_DEG,
            decay_speed: EXHAUST_DECAY_SPEED,
            speed_decay: EXHAUST_SPEED_DECAY,
            emission_speed: EXHAUST_EMISSION_SPEED,
            left_offset: EXHAUST_LEFT_OFFSET,
            right_offset: EXHAUST_RIGHT_OFFSET,
        }
    }
}

/// Everything a [`crate::rig::ShipRig`] is built from.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightConfig {
    pub motion: MotionConstants,
    pub keys: KeyBindings,
    pub exhaust: ExhaustConstants,
}

impl FlightConfig {
    /// Parses JSON. Values are type-checked only; range checks happen when
    /// controllers and emitters are built.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: FlightConfig = serde_json::from_str(json)?;
        log::debug!("[config] parsed flight config ({} bytes)", json.len());
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&text)?;
        log::info!("[config] loaded {}", path.display());
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
