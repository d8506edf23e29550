use super::{usable_delta, KeyPatch, MotionController};
use crate::config::KeyPair;
use crate::constants::VELOCITY_REST_THRESHOLD;
use crate::error::{require_non_negative, require_positive, require_unit_open, Result};
use crate::input::{ActiveInputSet, Drive};
use crate::scene::{NodeHandle, NodeLink};
use glam::Vec2;

#[derive(Clone, Debug, PartialEq)]
pub struct TranslationConfig {
    pub keys: KeyPair,
    /// velocity gained per second along the heading
    pub acceleration: f32,
    /// cap on velocity magnitude (units per update)
    pub max_speed: f32,
    /// fraction of velocity lost per second while idle
    pub decay_factor: f32,
}

impl TranslationConfig {
    fn validate(&self) -> Result<()> {
        require_positive("acceleration", self.acceleration)?;
        require_non_negative("max_speed", self.max_speed)?;
        require_unit_open("decay_factor", self.decay_factor)?;
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TranslationPatch {
    pub keys: KeyPatch,
    pub acceleration: Option<f32>,
    pub max_speed: Option<f32>,
    pub decay_factor: Option<f32>,
}

/// Moves the node across the XZ plane along its current heading.
///
/// Velocity is kept as `(x, z)`. The heading comes from the node's yaw, so
/// this composes with a yaw controller on the same node: the yaw controller
/// writes rotation, this one reads it and writes position.
#[derive(Clone, Debug)]
pub struct TranslationMotion {
    config: TranslationConfig,
    velocity: Vec2,
    link: NodeLink,
}

impl TranslationMotion {
    pub fn new(config: TranslationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            velocity: Vec2::ZERO,
            link: NodeLink::default(),
        })
    }

    pub fn config(&self) -> &TranslationConfig {
        &self.config
    }

    /// Planar velocity as `(x, z)`.
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }
}

impl MotionController for TranslationMotion {
    type Patch = TranslationPatch;

    fn attach(&mut self, node: &NodeHandle) {
        self.link.bind(node);
        self.velocity = Vec2::ZERO;
        log::debug!("[motion] translator attached");
    }

    fn update(&mut self, delta: f32, input: &ActiveInputSet) {
        if !usable_delta(delta) {
            return;
        }
        let Some(yaw) = self.link.with_mut(|t| t.heading()) else {
            return;
        };
        let TranslationConfig {
            ref keys,
            acceleration,
            max_speed,
            decay_factor,
        } = self.config;

        let forward = Vec2::new(yaw.sin(), yaw.cos());
        match Drive::resolve(input, &keys.positive, &keys.negative) {
            Drive::Positive => self.velocity += forward * acceleration * delta,
            Drive::Negative => self.velocity -= forward * acceleration * delta,
            Drive::Idle => {
                self.velocity *= (1.0 - decay_factor).powf(delta);
                if self.velocity.x.abs() < VELOCITY_REST_THRESHOLD {
                    self.velocity.x = 0.0;
                }
                if self.velocity.y.abs() < VELOCITY_REST_THRESHOLD {
                    self.velocity.y = 0.0;
                }
            }
        }

        // uniform rescale keeps the direction
        let speed = self.velocity.length();
        if speed > max_speed && speed > 0.0 {
            self.velocity *= max_speed / speed;
        }

        let step = self.velocity;
        self.link.with_mut(|t| {
            t.position.x += step.x;
            t.position.z += step.y;
        });
    }

    fn update_config(&mut self, patch: &TranslationPatch) -> Result<()> {
        let mut next = self.config.clone();
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
        log::debug!("[motion] translator reconfigured: {:?}", self.config);
        Ok(())
    }

    fn cleanup(&mut self) {
        self.link.release();
        self.velocity = Vec2::ZERO;
    }

    fn is_attached(&self) -> bool {
        self.link.is_bound()
    }
}
