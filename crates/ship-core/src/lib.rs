//! Real-time ship motion and exhaust effects.
//!
//! Controllers turn the set of held keys into rotation and position changes
//! on a renderer-owned scene node; the exhaust turns the same input into a
//! decaying particle trail. Everything here is stepped once per rendered
//! frame by the owner of the scene (see [`ShipRig`]).

pub mod color;
pub mod config;
pub mod constants;
pub mod error;
pub mod exhaust;
pub mod input;
pub mod motion;
pub mod rig;
pub mod scene;
pub mod spring;

pub use color::*;
pub use config::*;
pub use error::ShipError;
pub use exhaust::*;
pub use input::*;
pub use motion::*;
pub use rig::*;
pub use scene::*;
pub use spring::*;
