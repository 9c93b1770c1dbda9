//! Discrete player commands.  Device events are mapped to these by the host
//! (see `bindings` behind the `input` feature); the state machine never sees
//! raw key codes.

use glam::{UVec2, Vec2, Vec3};

/// Canonical axis for fine rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }
}

/// Direction of one rotation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Spin {
    Negative,
    Positive,
}

impl Spin {
    pub fn sign(self) -> f32 {
        match self {
            Spin::Negative => -1.0,
            Spin::Positive => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TartCommand {
    /// Bring the current idle fruit to its staging position.
    Stage,
    /// Put the staged fruit away and stage the next available one.
    Switch,
    /// Turn the staged fruit one step about its rotation axis.
    Rotate(Spin),
    /// Choose the axis used by `Rotate`.
    SetAxis(Axis),
    /// Throw the staged fruit toward the point under the pointer.
    AimAt { pointer: Vec2, window_size: UVec2 },
    /// Take back the most recent placement.
    Undo,
}
