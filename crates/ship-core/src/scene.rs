//! Scene-node side of the core.
//!
//! The renderer owns the nodes. Controllers only ever hold a [`NodeLink`],
//! a weak back-reference they use to write one property of the node each
//! frame. Several controllers may link to the same node as long as each one
//! writes a different property (roll, pitch and yaw axes, or position).

use glam::{EulerRot, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// One of the three principal rotation axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn name(self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        }
    }
}

/// Position and Euler rotation (radians, XYZ order) of a scene node.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
}

impl Transform {
    #[inline]
    pub fn rotation_on(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.rotation.x,
            Axis::Y => self.rotation.y,
            Axis::Z => self.rotation.z,
        }
    }

    #[inline]
    pub fn set_rotation_on(&mut self, axis: Axis, radians: f32) {
        match axis {
            Axis::X => self.rotation.x = radians,
            Axis::Y => self.rotation.y = radians,
            Axis::Z => self.rotation.z = radians,
        }
    }

    #[inline]
    pub fn add_rotation_on(&mut self, axis: Axis, radians: f32) {
        let current = self.rotation_on(axis);
        self.set_rotation_on(axis, current + radians);
    }

    /// Heading in the XZ plane, taken from the yaw (Y) rotation.
    #[inline]
    pub fn heading(&self) -> f32 {
        self.rotation.y
    }

    /// Local-to-parent matrix for the renderer.
    pub fn matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        );
        Mat4::from_rotation_translation(rotation, self.position)
    }
}

/// Shared, renderer-owned node.
pub type NodeHandle = Rc<RefCell<Transform>>;

pub fn new_node() -> NodeHandle {
    Rc::new(RefCell::new(Transform::default()))
}

/// Non-owning binding from a controller to the node it drives.
#[derive(Clone, Debug, Default)]
pub struct NodeLink {
    node: Option<Weak<RefCell<Transform>>>,
}

impl NodeLink {
    pub fn bind(&mut self, node: &NodeHandle) {
        self.node = Some(Rc::downgrade(node));
    }

    pub fn release(&mut self) {
        self.node = None;
    }

    /// True while bound to a node that is still alive.
    pub fn is_bound(&self) -> bool {
        self.node
            .as_ref()
            .map(|weak| weak.strong_count() > 0)
            .unwrap_or(false)
    }

    /// Runs `f` against the node if it is bound and alive.
    ///
    /// Returns `None` (and does nothing) when unbound, when the renderer has
    /// dropped the node, or when the node is already mutably borrowed.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut Transform) -> R) -> Option<R> {
        let node = self.node.as_ref()?.upgrade()?;
        let mut transform = node.try_borrow_mut().ok()?;
        Some(f(&mut transform))
    }
}
