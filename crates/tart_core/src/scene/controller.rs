use glam::{Quat, UVec2, Vec2, Vec3};

use crate::scene::camera::Camera;
use crate::scene::world::World;

/// Directional keys currently held, already decoded from the device layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlyInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl FlyInput {
    /// Planar move axes: `x` is strafe (right positive), `y` is forward.
    /// Opposing keys cancel out.
    pub fn axes(&self) -> Vec2 {
        let mut axes = Vec2::ZERO;
        if self.left && !self.right {
            axes.x = -1.0;
        }
        if self.right && !self.left {
            axes.x = 1.0;
        }
        if self.down && !self.up {
            axes.y = -1.0;
        }
        if self.up && !self.down {
            axes.y = 1.0;
        }
        axes
    }
}

/// Free-fly camera motion applied to the camera's node in the [`World`].
///
/// # Example
/// ```rust,ignore
/// let fly = FlyController::new();
/// let cam = world.camera(0).cloned().unwrap();
/// fly.step(&mut world, &cam, FlyInput { up: true, ..Default::default() }, dt);
/// fly.look(&mut world, &cam, Vec2::new(12.0, -3.0), UVec2::new(1280, 720));
/// ```
#[derive(Debug, Clone)]
pub struct FlyController {
    /// Translation speed in world-units per second.
    ///
    /// Default: `30.0`
    pub speed: f32,

    /// Multiplier on the field-of-view based look rotation.
    ///
    /// Default: `1.0` (a drag across the full window height turns by `fovy`)
    pub look_sensitivity: f32,
}

impl Default for FlyController {
    fn default() -> Self {
        Self::new()
    }
}

impl FlyController {
    pub fn new() -> Self {
        Self {
            speed: 30.0,
            look_sensitivity: 1.0,
        }
    }

    /// Moves the camera along its own right / forward directions.  Diagonal
    /// movement is normalized so it is no faster than straight movement.
    pub fn step(&self, world: &mut World, camera: &Camera, input: FlyInput, dt: f32) {
        let axes = input.axes();
        if axes == Vec2::ZERO {
            return;
        }
        let mv = axes.normalize() * self.speed * dt;
        if let Some(t) = world.transform_mut(camera.transform) {
            let offset: Vec3 = mv.x * t.right() + mv.y * t.forward();
            t.translate(offset);
        }
    }

    /// Turns the camera from a relative pointer motion in pixels: yaw about
    /// the local Y axis, pitch about the local X axis.
    pub fn look(&self, world: &mut World, camera: &Camera, motion: Vec2, window_size: UVec2) {
        if window_size.y == 0 {
            return;
        }
        let height = window_size.y as f32;
        let motion = Vec2::new(motion.x / height, -motion.y / height);
        let scale = camera.fovy * self.look_sensitivity;
        if let Some(t) = world.transform_mut(camera.transform) {
            t.rotation = (t.rotation
                * Quat::from_axis_angle(Vec3::Y, -motion.x * scale)
                * Quat::from_axis_angle(Vec3::X, motion.y * scale))
            .normalize();
        }
    }
}
