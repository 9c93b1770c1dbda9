//! tart_core: scene types shared by the tart game mode and its hosts.
//!
//! The game mode never owns scene data.  It keeps [`Handle`]s into a
//! [`World`] that the host creates (usually from a [`SceneDescription`]) and
//! receives that world by reference on every call.

pub mod scene;
pub mod time;
pub mod transform;

pub use scene::{
    Camera, FlyController, FlyInput, Handle, Node, SceneDescription, SceneError, World,
};
pub use time::{FixedStep, Time};
pub use transform::Transform;

// glam is re-exported so hosts use the same math types as the scene
pub use glam;
