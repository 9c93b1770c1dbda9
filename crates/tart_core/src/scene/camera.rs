use glam::Mat4;

use crate::scene::world::{Handle, World};

/// Perspective camera attached to a node of the [`World`].
///
/// The camera stores only projection parameters; its pose is the transform of
/// the node referenced by `transform`, so fly-around code and the renderer see
/// the same position and orientation.  The view looks down the node's local
/// `−Z` axis.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Node carrying the camera pose.
    pub transform: Handle,
    // --- projection parameters --------------------------------------------
    /// Vertical field of view in radians.
    pub fovy: f32,
    pub aspect: f32,
    pub znear: f32,
}

impl Camera {
    /// Camera with a 60° vertical field of view, square aspect and a near
    /// plane at 0.01.
    pub fn new(transform: Handle) -> Self {
        Self {
            transform,
            fovy: 60.0f32.to_radians(),
            aspect: 1.0,
            znear: 0.01,
        }
    }

    /// Infinite far-plane perspective projection built from the current
    /// parameters.
    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_infinite_rh(self.fovy, self.aspect, self.znear)
    }

    /// Camera-to-world matrix, or `None` once the camera node is despawned.
    pub fn local_to_world(&self, world: &World) -> Option<Mat4> {
        world.transform(self.transform).map(|t| t.matrix())
    }

    /// Update the aspect ratio from drawable dimensions in pixels.  A zero
    /// height leaves the aspect untouched.
    pub fn set_aspect_from_size(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }
}
