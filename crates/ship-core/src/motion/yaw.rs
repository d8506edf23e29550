use super::{usable_delta, KeyPatch, MotionController};
use crate::config::KeyPair;
use crate::constants::RATE_REST_THRESHOLD;
use crate::error::{require_non_negative, require_positive, require_unit_closed, Result};
use crate::input::{ActiveInputSet, Drive};
use crate::scene::{Axis, NodeHandle, NodeLink};

#[derive(Clone, Debug, PartialEq)]
pub struct YawConfig {
    pub axis: Axis,
    pub keys: KeyPair,
    /// rad/s²
    pub acceleration: f32,
    /// rad/s
    pub max_speed: f32,
    /// multiplier applied per update call while idle
    pub decay_factor: f32,
}

impl YawConfig {
    fn validate(&self) -> Result<()> {
        require_positive("acceleration", self.acceleration)?;
        require_non_negative("max_speed", self.max_speed)?;
        require_unit_closed("decay_factor", self.decay_factor)?;
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct YawPatch {
    pub axis: Option<Axis>,
    pub keys: KeyPatch,
    pub acceleration: Option<f32>,
    pub max_speed: Option<f32>,
    pub decay_factor: Option<f32>,
}

/// Turns the ship about its yaw axis with acceleration-limited rate.
#[derive(Clone, Debug)]
pub struct YawMotion {
    config: YawConfig,
    current_rate: f32,
    link: NodeLink,
}

impl YawMotion {
    pub fn new(config: YawConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            current_rate: 0.0,
            link: NodeLink::default(),
        })
    }

    pub fn config(&self) -> &YawConfig {
        &self.config
    }

    /// rad/s
    pub fn rate(&self) -> f32 {
        self.current_rate
    }
}

impl MotionController for YawMotion {
    type Patch = YawPatch;

    fn attach(&mut self, node: &NodeHandle) {
        self.link.bind(node);
        self.current_rate = 0.0;
        log::debug!("[motion] yaw attached on {}", self.config.axis.name());
    }

    fn update(&mut self, delta: f32, input: &ActiveInputSet) {
        if !self.link.is_bound() || !usable_delta(delta) {
            return;
        }
        let YawConfig {
            axis,
            ref keys,
            acceleration,
            max_speed,
            decay_factor,
        } = self.config;

        match Drive::resolve(input, &keys.positive, &keys.negative) {
            Drive::Positive => {
                self.current_rate = (self.current_rate + acceleration * delta).min(max_speed);
            }
            Drive::Negative => {
                self.current_rate = (self.current_rate - acceleration * delta).max(-max_speed);
            }
            Drive::Idle => {
                self.current_rate *= decay_factor;
                if self.current_rate.abs() < RATE_REST_THRESHOLD {
                    self.current_rate = 0.0;
                }
            }
        }

        let step = self.current_rate * delta;
        self.link.with_mut(|t| t.add_rotation_on(axis, step));
    }

    fn update_config(&mut self, patch: &YawPatch) -> Result<()> {
        let mut next = self.config.clone();
        if let Some(axis) = patch.axis {
            next.axis = axis;
        }
        patch.keys.apply(&mut next.keys);
        if let Some(v) = patch.acceleration {
            next.acceleration = v;
        }
        if let Some(v) = patch.max_speed {
            next.max_speed = v;
        }
        if let Some(v) = patch.decay_factor {
            next.decay_factor = v;
        }
        next.validate()?;
        self.config = next;
        log::debug!("[motion] yaw reconfigured: {:?}", self.config);
        Ok(())
    }

    fn cleanup(&mut self) {
        self.link.release();
        self.current_rate = 0.0;
    }

    fn is_attached(&self) -> bool {
        self.link.is_bound()
    }
}
