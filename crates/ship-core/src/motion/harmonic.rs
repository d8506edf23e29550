use super::{usable_delta, KeyPatch, MotionController};
use crate::config::KeyPair;
use crate::error::{require_non_negative, Result};
use crate::input::{ActiveInputSet, Drive};
use crate::scene::{Axis, NodeHandle, NodeLink};
use crate::spring::Spring;

/// Configuration for [`HarmonicMotion`]. The tilt limit is in degrees.
#[derive(Clone, Debug, PartialEq)]
pub struct HarmonicConfig {
    pub axis: Axis,
    pub keys: KeyPair,
    pub stiffness: f32,
    pub damping: f32,
    pub max_angle_deg: f32,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct HarmonicPatch {
    pub axis: Option<Axis>,
    pub keys: KeyPatch,
    pub stiffness: Option<f32>,
    pub damping: Option<f32>,
    pub max_angle_deg: Option<f32>,
}

/// Tilts one axis toward ±`max_angle` with a damped spring, giving the
/// lean-and-wobble feel for roll and pitch.
///
/// The spring keeps running between frames; each `update` only moves its
/// target and advances it by the frame delta. The node is written only when
/// the spring value actually changes.
#[derive(Clone, Debug)]
pub struct HarmonicMotion {
    axis: Axis,
    keys: KeyPair,
    /// radians
    max_angle: f32,
    spring: Spring,
    link: NodeLink,
}

impl HarmonicMotion {
    pub fn new(config: HarmonicConfig) -> Result<Self> {
        let max_angle = max_angle_rad(config.max_angle_deg)?;
        let spring = Spring::new(config.stiffness, config.damping)?;
        Ok(Self {
            axis: config.axis,
            keys: config.keys,
            max_angle,
            spring,
            link: NodeLink::default(),
        })
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn keys(&self) -> &KeyPair {
        &self.keys
    }

    /// Tilt limit in radians.
    pub fn max_angle(&self) -> f32 {
        self.max_angle
    }

    /// Current spring output in radians.
    pub fn angle(&self) -> f32 {
        self.spring.value()
    }

    pub fn spring(&self) -> &Spring {
        &self.spring
    }
}

impl MotionController for HarmonicMotion {
    type Patch = HarmonicPatch;

    fn attach(&mut self, node: &NodeHandle) {
        self.link.bind(node);
        // start from the node's pose so attaching never snaps it
        let start = self.link.with_mut(|t| t.rotation_on(self.axis)).unwrap_or(0.0);
        self.spring.reset(start);
        log::debug!("[motion] spring attached on {}", self.axis.name());
    }

    fn update(&mut self, delta: f32, input: &ActiveInputSet) {
        if !self.link.is_bound() || !usable_delta(delta) {
            return;
        }
        let target = Drive::resolve(input, &self.keys.positive, &self.keys.negative).sign()
            * self.max_angle;
        self.spring.set_target(target);
        if self.spring.advance(delta) {
            let (axis, value) = (self.axis, self.spring.value());
            self.link.with_mut(|t| t.set_rotation_on(axis, value));
        }
    }

    fn update_config(&mut self, patch: &HarmonicPatch) -> Result<()> {
        let max_angle = patch.max_angle_deg.map(max_angle_rad).transpose()?;
        if patch.stiffness.is_some() || patch.damping.is_some() {
            // validated before anything else is touched; also wakes the spring
            self.spring.set_params(patch.stiffness, patch.damping)?;
        }
        if let Some(axis) = patch.axis {
            self.axis = axis;
        }
        patch.keys.apply(&mut self.keys);
        if let Some(max_angle) = max_angle {
            self.max_angle = max_angle;
        }
        log::debug!(
            "[motion] spring reconfigured: axis={} max_angle={:.3}rad params={:?}",
            self.axis.name(),
            self.max_angle,
            self.spring.params()
        );
        Ok(())
    }

    fn cleanup(&mut self) {
        self.link.release();
        self.spring.reset(0.0);
    }

    fn is_attached(&self) -> bool {
        self.link.is_bound()
    }
}

fn max_angle_rad(degrees: f32) -> Result<f32> {
    Ok(require_non_negative("max_angle", degrees)?.to_radians())
}
