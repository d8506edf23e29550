//! Per-frame motion controllers.
//!
//! Every controller follows the same lifecycle: `attach` to one scene node,
//! `update` once per frame with the elapsed time and that frame's input
//! snapshot, `update_config` to merge a partial patch, and `cleanup` to let
//! go of the node. [`Motion`] wraps the four variants so a rig can hold them
//! side by side.

mod harmonic;
mod rate;
mod translation;
mod yaw;

pub use harmonic::*;
pub use rate::*;
pub use translation::*;
pub use yaw::*;

use crate::config::{FlightConfig, KeyPair, YawConstants};
use crate::error::{Result, ShipError};
use crate::input::ActiveInputSet;
use crate::scene::NodeHandle;

/// Lifecycle shared by all controllers.
pub trait MotionController {
    /// Partial configuration accepted by `update_config`.
    type Patch;

    /// Binds to `node`, replacing any earlier binding and discarding
    /// transient state. Only the property this controller drives is ever
    /// written.
    fn attach(&mut self, node: &NodeHandle);

    /// Advances one frame. Does nothing while unattached.
    fn update(&mut self, delta: f32, input: &ActiveInputSet);

    /// Merges the `Some` fields of `patch` into the live configuration.
    /// Current rate/velocity/spring state is kept. On error nothing changes.
    fn update_config(&mut self, patch: &Self::Patch) -> Result<()>;

    /// Releases the node and resets transient state to rest. Idempotent.
    fn cleanup(&mut self);

    fn is_attached(&self) -> bool;
}

/// Partial update for a controller's key pair.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyPatch {
    pub positive: Option<String>,
    pub negative: Option<String>,
}

impl KeyPatch {
    pub(crate) fn apply(&self, keys: &mut KeyPair) {
        if let Some(positive) = &self.positive {
            keys.positive = positive.clone();
        }
        if let Some(negative) = &self.negative {
            keys.negative = negative.clone();
        }
    }
}

/// The four motions a ship is assembled from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MotionKind {
    Roll,
    Pitch,
    Yaw,
    Throttle,
}

impl MotionKind {
    pub const ALL: [MotionKind; 4] = [
        MotionKind::Roll,
        MotionKind::Pitch,
        MotionKind::Yaw,
        MotionKind::Throttle,
    ];

    pub fn name(self) -> &'static str {
        match self {
            MotionKind::Roll => "roll",
            MotionKind::Pitch => "pitch",
            MotionKind::Yaw => "yaw",
            MotionKind::Throttle => "throttle",
        }
    }
}

#[derive(Clone, Debug)]
pub enum Motion {
    Rate(RateMotion),
    Harmonic(HarmonicMotion),
    Translation(TranslationMotion),
    Yaw(YawMotion),
}

#[derive(Clone, Debug, PartialEq)]
pub enum MotionPatch {
    Rate(RatePatch),
    Harmonic(HarmonicPatch),
    Translation(TranslationPatch),
    Yaw(YawPatch),
}

impl MotionPatch {
    fn variant_name(&self) -> &'static str {
        match self {
            MotionPatch::Rate(_) => "rate",
            MotionPatch::Harmonic(_) => "harmonic",
            MotionPatch::Translation(_) => "translation",
            MotionPatch::Yaw(_) => "yaw",
        }
    }
}

impl Motion {
    /// Builds the controller for `kind` from static config: springs for roll
    /// and pitch, the configured yaw model for yaw, and the planar
    /// translator for throttle.
    pub fn from_config(kind: MotionKind, config: &FlightConfig) -> Result<Self> {
        let constants = &config.motion;
        let keys = &config.keys;
        let motion = match kind {
            MotionKind::Roll | MotionKind::Pitch => {
                let (c, pair) = if kind == MotionKind::Roll {
                    (constants.roll, &keys.roll)
                } else {
                    (constants.pitch, &keys.pitch)
                };
                Motion::Harmonic(HarmonicMotion::new(HarmonicConfig {
                    axis: c.axis,
                    keys: pair.clone(),
                    stiffness: c.stiffness,
                    damping: c.damping,
                    max_angle_deg: c.max_angle,
                })?)
            }
            MotionKind::Yaw => match constants.yaw {
                YawConstants::Rate {
                    axis,
                    rate_increment,
                    max_rate,
                    decay_factor,
                } => Motion::Rate(RateMotion::new(RateConfig {
                    axis,
                    keys: keys.yaw.clone(),
                    rate_increment,
                    max_rate,
                    decay_factor,
                })?),
                YawConstants::Accelerated {
                    axis,
                    acceleration,
                    max_speed,
                    decay_factor,
                } => Motion::Yaw(YawMotion::new(YawConfig {
                    axis,
                    keys: keys.yaw.clone(),
                    acceleration,
                    max_speed,
                    decay_factor,
                })?),
            },
            MotionKind::Throttle => {
                let c = constants.throttle;
                Motion::Translation(TranslationMotion::new(TranslationConfig {
                    keys: keys.throttle.clone(),
                    acceleration: c.acceleration,
                    max_speed: c.max_speed,
                    decay_factor: c.decay_factor,
                })?)
            }
        };
        log::debug!("[motion] built {} as {}", kind.name(), motion.variant_name());
        Ok(motion)
    }

    pub fn variant_name(&self) -> &'static str {
        match self {
            Motion::Rate(_) => "rate",
            Motion::Harmonic(_) => "harmonic",
            Motion::Translation(_) => "translation",
            Motion::Yaw(_) => "yaw",
        }
    }

    pub fn attach(&mut self, node: &NodeHandle) {
        match self {
            Motion::Rate(m) => m.attach(node),
            Motion::Harmonic(m) => m.attach(node),
            Motion::Translation(m) => m.attach(node),
            Motion::Yaw(m) => m.attach(node),
        }
    }

    pub fn update(&mut self, delta: f32, input: &ActiveInputSet) {
        match self {
            Motion::Rate(m) => m.update(delta, input),
            Motion::Harmonic(m) => m.update(delta, input),
            Motion::Translation(m) => m.update(delta, input),
            Motion::Yaw(m) => m.update(delta, input),
        }
    }

    /// Applies a patch of the matching variant; a mismatched patch is
    /// rejected without touching the controller.
    pub fn update_config(&mut self, patch: &MotionPatch) -> Result<()> {
        match (self, patch) {
            (Motion::Rate(m), MotionPatch::Rate(p)) => m.update_config(p),
            (Motion::Harmonic(m), MotionPatch::Harmonic(p)) => m.update_config(p),
            (Motion::Translation(m), MotionPatch::Translation(p)) => m.update_config(p),
            (Motion::Yaw(m), MotionPatch::Yaw(p)) => m.update_config(p),
            (motion, patch) => Err(ShipError::PatchMismatch {
                patch: patch.variant_name(),
                controller: motion.variant_name(),
            }),
        }
    }

    pub fn cleanup(&mut self) {
        match self {
            Motion::Rate(m) => m.cleanup(),
            Motion::Harmonic(m) => m.cleanup(),
            Motion::Translation(m) => m.cleanup(),
            Motion::Yaw(m) => m.cleanup(),
        }
    }

    pub fn is_attached(&self) -> bool {
        match self {
            Motion::Rate(m) => m.is_attached(),
            Motion::Harmonic(m) => m.is_attached(),
            Motion::Translation(m) => m.is_attached(),
            Motion::Yaw(m) => m.is_attached(),
        }
    }
}

/// Frame deltas the controllers accept: finite and not negative.
#[inline]
pub(crate) fn usable_delta(delta: f32) -> bool {
    delta.is_finite() && delta >= 0.0
}
