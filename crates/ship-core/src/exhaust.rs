//! Exhaust particles: a fixed-capacity ring-buffer emitter and the twin-jet
//! arrangement that switches it from the control state.
//!
//! Particle state lives in parallel arrays (position, velocity, lifetime,
//! colour) of length `count`, allocated once in [`ParticleEmitter::new`].
//! Positions are local to the jet; the renderer places the jet at
//! [`ParticleEmitter::offset`] inside the ship.

use crate::color::{ColorRamp, Rgb};
use crate::config::ExhaustConstants;
use crate::constants::LIFETIME_SNAP_FRACTION;
use crate::error::{require_non_negative, require_unit_closed, Result, ShipError};
use crate::input::{ControlState, Direction, Turn};
use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::{PI, TAU};

/// Emitter parameters. `cone_angle` is in radians.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EmitterConfig {
    pub count: usize,
    pub cone_angle: f32,
    /// lifetime lost per frame
    pub decay_speed: f32,
    /// velocity multiplier per frame
    pub speed_decay: f32,
    /// units per frame at spawn
    pub emission_speed: f32,
}

impl EmitterConfig {
    /// Builds from static data, converting the cone angle from degrees.
    pub fn from_constants(constants: &ExhaustConstants) -> Self {
        Self {
            count: constants.count,
            cone_angle: constants.cone_angle.to_radians(),
            decay_speed: constants.decay_speed,
            speed_decay: constants.speed_decay,
            emission_speed: constants.emission_speed,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.count == 0 {
            return Err(ShipError::InvalidParameter {
                field: "count",
                value: 0.0,
                expected: "at least one particle",
            });
        }
        if !(self.cone_angle.is_finite() && (0.0..=PI).contains(&self.cone_angle)) {
            return Err(ShipError::InvalidParameter {
                field: "cone_angle",
                value: self.cone_angle as f64,
                expected: "a half-angle in [0, pi] radians",
            });
        }
        if !(self.decay_speed.is_finite() && self.decay_speed > 0.0 && self.decay_speed <= 1.0) {
            return Err(ShipError::InvalidParameter {
                field: "decay_speed",
                value: self.decay_speed as f64,
                expected: "a value in (0, 1]",
            });
        }
        require_unit_closed("speed_decay", self.speed_decay)?;
        require_non_negative("emission_speed", self.emission_speed)?;
        Ok(())
    }
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self::from_constants(&ExhaustConstants::default())
    }
}

#[derive(Clone, Debug)]
pub struct ParticleEmitter {
    config: EmitterConfig,
    offset: Vec3,
    positions: Vec<Vec3>,
    velocities: Vec<Vec3>,
    lifetimes: Vec<f32>,
    colors: Vec<Rgb>,
    cursor: usize,
    reverse: bool,
    ramp: ColorRamp,
    rng: StdRng,
}

impl ParticleEmitter {
    pub fn new(config: EmitterConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        let n = config.count;
        log::debug!(
            "[exhaust] emitter count={} cone={:.3}rad decay={} speed_decay={}",
            n,
            config.cone_angle,
            config.decay_speed,
            config.speed_decay
        );
        Ok(Self {
            config,
            offset: Vec3::ZERO,
            positions: vec![Vec3::ZERO; n],
            velocities: vec![Vec3::ZERO; n],
            lifetimes: vec![0.0; n],
            colors: vec![[0.0; 3]; n],
            cursor: 0,
            reverse: false,
            ramp: ColorRamp::exhaust(),
            rng: StdRng::seed_from_u64(seed),
        })
    }

    pub fn with_offset(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_ramp(mut self, ramp: ColorRamp) -> Self {
        self.ramp = ramp;
        self
    }

    /// Swaps the colour map; takes effect from the next step.
    pub fn set_ramp(&mut self, ramp: ColorRamp) {
        self.ramp = ramp;
    }

    /// Mirrors the z motion so the trail streams forward while reversing.
    pub fn set_reverse(&mut self, reverse: bool) {
        self.reverse = reverse;
    }

    /// One frame: age every live particle, then spawn at most one.
    ///
    /// Emission is one particle per call no matter how long the frame took.
    pub fn update(&mut self, active: bool) {
        let EmitterConfig {
            decay_speed,
            speed_decay,
            ..
        } = self.config;
        let snap = decay_speed * LIFETIME_SNAP_FRACTION;

        for i in 0..self.lifetimes.len() {
            if self.lifetimes[i] <= 0.0 {
                continue;
            }
            self.velocities[i] *= speed_decay;
            let v = self.velocities[i];
            let dz = if self.reverse { -v.z } else { v.z };
            self.positions[i] += Vec3::new(v.x, v.y, dz);

            let mut life = (self.lifetimes[i] - decay_speed).max(0.0);
            if life < snap {
                life = 0.0;
            }
            self.lifetimes[i] = life;
            self.colors[i] = self.ramp.color_for(life);

            if life == 0.0 {
                self.positions[i] = Vec3::ZERO;
                self.colors[i] = [0.0; 3];
            }
        }

        if active {
            self.spawn();
        }
    }

    fn spawn(&mut self) {
        let theta = self.rng.gen::<f32>() * TAU;
        let phi = self.rng.gen::<f32>() * self.config.cone_angle;
        let dir = Vec3::new(phi.sin() * theta.cos(), phi.sin() * theta.sin(), -phi.cos());

        let slot = self.cursor;
        self.velocities[slot] = dir * self.config.emission_speed;
        self.positions[slot] = Vec3::ZERO;
        self.lifetimes[slot] = 1.0;
        // fresh slots start on the ramp's first colour rather than the dead
        // slot's zero, until the first step recolours them
        self.colors[slot] = self.ramp.first_color();
        self.cursor = (self.cursor + 1) % self.config.count;
        log::trace!("[exhaust] spawned slot {slot}");
    }

    /// Kills every particle and rewinds the cursor. Capacity is unchanged.
    pub fn reset(&mut self) {
        self.positions.fill(Vec3::ZERO);
        self.velocities.fill(Vec3::ZERO);
        self.lifetimes.fill(0.0);
        self.colors.fill([0.0; 3]);
        self.cursor = 0;
    }

    pub fn config(&self) -> &EmitterConfig {
        &self.config
    }

    pub fn capacity(&self) -> usize {
        self.config.count
    }

    pub fn offset(&self) -> Vec3 {
        self.offset
    }

    pub fn is_reverse(&self) -> bool {
        self.reverse
    }

    /// Next slot to be written.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn velocities(&self) -> &[Vec3] {
        &self.velocities
    }

    pub fn lifetimes(&self) -> &[f32] {
        &self.lifetimes
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    pub fn live_count(&self) -> usize {
        self.lifetimes.iter().filter(|&&l| l > 0.0).count()
    }

    /// Position attribute as raw bytes (3 × f32 per particle).
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Colour attribute as raw bytes (3 × f32 per particle).
    pub fn color_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.colors)
    }
}

/// Which jets fire this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct JetActivation {
    pub left: bool,
    pub right: bool,
    pub reverse: bool,
}

impl JetActivation {
    /// Thrust fires both jets; a turn fires the outside jet. Reversing
    /// through a turn swaps which side fires.
    pub fn from_control(state: ControlState) -> Self {
        let moving = state.direction != Direction::Neutral;
        let mut left = (moving && state.turn != Turn::Left) || state.turn == Turn::Right;
        let mut right = (moving && state.turn != Turn::Right) || state.turn == Turn::Left;
        let reverse = state.direction == Direction::Backward;
        if reverse && state.turn != Turn::Neutral {
            left = !left;
            right = !right;
        }
        Self {
            left,
            right,
            reverse,
        }
    }

    /// Holding the boost key lights both jets regardless of steering.
    pub fn with_boost(self, boost: bool) -> Self {
        Self {
            left: self.left || boost,
            right: self.right || boost,
            ..self
        }
    }
}

/// Left and right jets of one ship.
#[derive(Clone, Debug)]
pub struct Exhaust {
    left: ParticleEmitter,
    right: ParticleEmitter,
    last: JetActivation,
}

impl Exhaust {
    pub fn new(constants: &ExhaustConstants, seed: u64) -> Result<Self> {
        let config = EmitterConfig::from_constants(constants);
        let left = ParticleEmitter::new(config, seed)?.with_offset(Vec3::from(constants.left_offset));
        // distinct stream per jet from the same base seed
        let right_seed = seed ^ 0x9E37_79B9_7F4A_7C15;
        let right =
            ParticleEmitter::new(config, right_seed)?.with_offset(Vec3::from(constants.right_offset));
        Ok(Self {
            left,
            right,
            last: JetActivation::default(),
        })
    }

    pub fn update(&mut self, activation: JetActivation) {
        if activation != self.last {
            log::debug!(
                "[exhaust] jets left={} right={} reverse={}",
                activation.left,
                activation.right,
                activation.reverse
            );
            self.last = activation;
        }
        self.left.set_reverse(activation.reverse);
        self.right.set_reverse(activation.reverse);
        self.left.update(activation.left);
        self.right.update(activation.right);
    }

    pub fn set_ramp(&mut self, ramp: ColorRamp) {
        self.left.set_ramp(ramp.clone());
        self.right.set_ramp(ramp);
    }

    pub fn reset(&mut self) {
        self.left.reset();
        self.right.reset();
        self.last = JetActivation::default();
    }

    pub fn left(&self) -> &ParticleEmitter {
        &self.left
    }

    pub fn right(&self) -> &ParticleEmitter {
        &self.right
    }

    pub fn activation(&self) -> JetActivation {
        self.last
    }
}
