//! Scene collaborator types: the named transform table, its camera and the
//! fly-around controller.

pub mod camera;
pub mod controller;
pub mod description;
pub mod world;

pub use camera::Camera;
pub use controller::{FlyController, FlyInput};
pub use description::{CameraDescription, SceneDescription, SceneError, TransformDescription};
// also expose the handle type so callers don't need to reach into the
// submodule.
pub use world::{Handle, Node, World};
