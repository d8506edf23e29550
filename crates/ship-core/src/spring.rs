//! Damped second-order spring driven from the frame loop.
//!
//! The spring is advanced by the caller's frame delta, split into fixed
//! sub-steps so the result does not depend on the frame rate. Leftover time
//! carries over to the next frame.

use crate::constants::{
    SPRING_MASS, SPRING_MAX_STEPS_PER_FRAME, SPRING_REST_DISPLACEMENT, SPRING_REST_VELOCITY,
    SPRING_STEP_SEC,
};
use crate::error::{require_non_negative, require_positive, Result};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringParams {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
}

impl SpringParams {
    pub fn new(stiffness: f32, damping: f32) -> Result<Self> {
        Ok(Self {
            stiffness: require_positive("stiffness", stiffness)?,
            damping: require_non_negative("damping", damping)?,
            mass: SPRING_MASS,
        })
    }

    /// Sub-step length: the fixed step, shortened for very stiff or heavily
    /// damped springs so the explicit integration stays stable.
    ///
    /// With `h <= 0.5 / omega` and `h <= mass / damping` the per-step
    /// velocity factor `1 - damping * h / mass` stays in `[0, 1]`.
    fn step_sec(&self) -> f32 {
        let omega = (self.stiffness / self.mass).sqrt();
        let mut h = SPRING_STEP_SEC.min(0.5 / omega);
        if self.damping > 0.0 {
            h = h.min(self.mass / self.damping);
        }
        h
    }
}

#[derive(Clone, Debug)]
pub struct Spring {
    params: SpringParams,
    value: f32,
    velocity: f32,
    target: f32,
    accumulator: f32,
    resting: bool,
}

impl Spring {
    pub fn new(stiffness: f32, damping: f32) -> Result<Self> {
        Ok(Self {
            params: SpringParams::new(stiffness, damping)?,
            value: 0.0,
            velocity: 0.0,
            target: 0.0,
            accumulator: 0.0,
            resting: true,
        })
    }

    pub fn params(&self) -> SpringParams {
        self.params
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn is_resting(&self) -> bool {
        self.resting
    }

    /// Moves the target; wakes the spring if the target changed.
    pub fn set_target(&mut self, target: f32) {
        if target != self.target {
            self.target = target;
            self.resting = false;
        }
    }

    /// Swaps the physical constants without touching value or velocity, and
    /// wakes the spring so they apply from the next step.
    pub fn set_params(&mut self, stiffness: Option<f32>, damping: Option<f32>) -> Result<()> {
        let params = SpringParams::new(
            stiffness.unwrap_or(self.params.stiffness),
            damping.unwrap_or(self.params.damping),
        )?;
        self.params = params;
        self.start();
        Ok(())
    }

    pub fn start(&mut self) {
        self.resting = false;
    }

    /// Puts the spring at rest on `value`.
    pub fn reset(&mut self, value: f32) {
        self.value = value;
        self.velocity = 0.0;
        self.target = value;
        self.accumulator = 0.0;
        self.resting = true;
    }

    /// Advances by `dt` seconds. Returns true if the value moved.
    pub fn advance(&mut self, dt: f32) -> bool {
        if self.resting || !(dt > 0.0) {
            return false;
        }
        let before = self.value;
        let h = self.params.step_sec();
        self.accumulator += dt;
        let mut steps = 0;
        while self.accumulator >= h {
            if steps == SPRING_MAX_STEPS_PER_FRAME {
                // drop the backlog after a long stall instead of spiralling
                self.accumulator = 0.0;
                break;
            }
            self.step(h);
            self.accumulator -= h;
            steps += 1;
            if self.settle() {
                break;
            }
        }
        self.value != before
    }

    fn step(&mut self, h: f32) {
        let SpringParams {
            stiffness,
            damping,
            mass,
        } = self.params;
        let force = -stiffness * (self.value - self.target) - damping * self.velocity;
        self.velocity += force / mass * h;
        self.value += self.velocity * h;
    }

    fn settle(&mut self) -> bool {
        if (self.value - self.target).abs() < SPRING_REST_DISPLACEMENT
            && self.velocity.abs() < SPRING_REST_VELOCITY
        {
            self.value = self.target;
            self.velocity = 0.0;
            self.accumulator = 0.0;
            self.resting = true;
        }
        self.resting
    }
}
