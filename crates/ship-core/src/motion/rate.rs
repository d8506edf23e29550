use super::{usable_delta, KeyPatch, MotionController};
use crate::config::KeyPair;
use crate::constants::{RATE_REST_THRESHOLD, REFERENCE_FRAME_RATE};
use crate::error::{require_non_negative, require_positive, require_unit_closed, Result};
use crate::input::{ActiveInputSet, Drive};
use crate::scene::{Axis, NodeHandle, NodeLink};

/// Configuration for [`RateMotion`].
///
/// `rate_increment` and `decay_factor` are expressed per reference frame
/// (1/60 s) and scaled by the real frame delta, so the rotator behaves the
/// same at any frame rate.
#[derive(Clone, Debug, PartialEq)]
pub struct RateConfig {
    pub axis: Axis,
    pub keys: KeyPair,
    /// rad/s gained per reference frame while a key is held
    pub rate_increment: f32,
    /// rad/s
    pub max_rate: f32,
    /// multiplier applied per reference frame while idle
    pub decay_factor: f32,
}

impl RateConfig {
    fn validate(&self) -> Result<()> {
        require_positive("rate_increment", self.rate_increment)?;
        require_non_negative("max_rate", self.max_rate)?;
        require_unit_closed("decay_factor", self.decay_factor)?;
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RatePatch {
    pub axis: Option<Axis>,
    pub keys: KeyPatch,
    pub rate_increment: Option<f32>,
    pub max_rate: Option<f32>,
    pub decay_factor: Option<f32>,
}

/// Rotates one axis at a rate that ramps up while a key is held and
/// decays back to zero when released.
#[derive(Clone, Debug)]
pub struct RateMotion {
    config: RateConfig,
    rate: f32,
    link: NodeLink,
}

impl RateMotion {
    pub fn new(config: RateConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            rate: 0.0,
            link: NodeLink::default(),
        })
    }

    pub fn config(&self) -> &RateConfig {
        &self.config
    }

    /// Current angular rate in rad/s.
    pub fn rate(&self) -> f32 {
        self.rate
    }
}

impl MotionController for RateMotion {
    type Patch = RatePatch;

    fn attach(&mut self, node: &NodeHandle) {
        self.link.bind(node);
        self.rate = 0.0;
        log::debug!("[motion] rate rotator attached on {}", self.config.axis.name());
    }

    fn update(&mut self, delta: f32, input: &ActiveInputSet) {
        if !self.link.is_bound() || !usable_delta(delta) {
            return;
        }
        let frames = delta * REFERENCE_FRAME_RATE;
        let RateConfig {
            axis,
            ref keys,
            rate_increment,
            max_rate,
            decay_factor,
        } = self.config;

        match Drive::resolve(input, &keys.positive, &keys.negative) {
            Drive::Positive => {
                self.rate = (self.rate + rate_increment * frames).min(max_rate);
            }
            Drive::Negative => {
                self.rate = (self.rate - rate_increment * frames).max(-max_rate);
            }
            Drive::Idle => {
                self.rate *= decay_factor.powf(frames);
                if self.rate.abs() < RATE_REST_THRESHOLD {
                    self.rate = 0.0;
                }
            }
        }

        let step = self.rate * delta;
        self.link.with_mut(|t| t.add_rotation_on(axis, step));
    }

    fn update_config(&mut self, patch: &RatePatch) -> Result<()> {
        let mut next = self.config.clone();
        if let Some(axis) = patch.axis {
            next.axis = axis;
        }
        patch.keys.apply(&mut next.keys);
        if let Some(v) = patch.rate_increment {
            next.rate_increment = v;
        }
        if let Some(v) = patch.max_rate {
            next.max_rate = v;
        }
        if let Some(v) = patch.decay_factor {
            next.decay_factor = v;
        }
        next.validate()?;
        self.config = next;
        log::debug!("[motion] rate rotator reconfigured: {:?}", self.config);
        Ok(())
    }

    fn cleanup(&mut self) {
        self.link.release();
        self.rate = 0.0;
    }

    fn is_attached(&self) -> bool {
        self.link.is_bound()
    }
}
