//! One ship's controllers and jets, stepped together from the frame loop.

use crate::config::{FlightConfig, KeyBindings};
use crate::error::{Result, ShipError};
use crate::exhaust::{Exhaust, JetActivation};
use crate::input::{ActiveInputSet, ControlState};
use crate::motion::{Motion, MotionKind, MotionPatch};
use crate::scene::NodeHandle;

pub struct ShipRig {
    motions: Vec<(MotionKind, Motion)>,
    exhaust: Exhaust,
    keys: KeyBindings,
    control: ControlState,
}

impl ShipRig {
    pub fn new(config: &FlightConfig, seed: u64) -> Result<Self> {
        let motions = MotionKind::ALL
            .iter()
            .map(|&kind| Motion::from_config(kind, config).map(|m| (kind, m)))
            .collect::<Result<Vec<_>>>()?;
        let exhaust = Exhaust::new(&config.exhaust, seed)?;
        log::info!("[rig] ship rig ready ({} motions, 2 jets)", motions.len());
        Ok(Self {
            motions,
            exhaust,
            keys: config.keys.clone(),
            control: ControlState::default(),
        })
    }

    /// Attaches every controller to the ship node.
    pub fn attach(&mut self, node: &NodeHandle) {
        for (_, motion) in &mut self.motions {
            motion.attach(node);
        }
        log::debug!("[rig] attached");
    }

    /// Runs one frame: controllers first, then the jets.
    pub fn frame(&mut self, delta: f32, input: &ActiveInputSet) -> JetActivation {
        for (_, motion) in &mut self.motions {
            motion.update(delta, input);
        }
        self.control = ControlState::from_input(input, &self.keys);
        let activation =
            JetActivation::from_control(self.control).with_boost(input.contains(&self.keys.exhaust));
        self.exhaust.update(activation);
        activation
    }

    /// Forwards `patch` to the controller built for `kind`.
    pub fn update_config(&mut self, kind: MotionKind, patch: &MotionPatch) -> Result<()> {
        let motion = self
            .motion_mut(kind)
            .ok_or(ShipError::MissingMotion { kind: kind.name() })?;
        motion.update_config(patch)
    }

    /// Releases the ship node and clears the jets. Safe to call repeatedly.
    pub fn cleanup(&mut self) {
        for (_, motion) in &mut self.motions {
            motion.cleanup();
        }
        self.exhaust.reset();
        self.control = ControlState::default();
        log::debug!("[rig] cleaned up");
    }

    pub fn motion(&self, kind: MotionKind) -> Option<&Motion> {
        self.motions.iter().find(|(k, _)| *k == kind).map(|(_, m)| m)
    }

    pub fn motion_mut(&mut self, kind: MotionKind) -> Option<&mut Motion> {
        self.motions
            .iter_mut()
            .find(|(k, _)| *k == kind)
            .map(|(_, m)| m)
    }

    pub fn exhaust(&self) -> &Exhaust {
        &self.exhaust
    }

    pub fn control(&self) -> ControlState {
        self.control
    }

    pub fn keys(&self) -> &KeyBindings {
        &self.keys
    }

    pub fn is_attached(&self) -> bool {
        self.motions.iter().any(|(_, m)| m.is_attached())
    }
}
