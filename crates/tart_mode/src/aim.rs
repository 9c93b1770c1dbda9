//! Screen-to-world aiming: a pointer ray cast against the horizontal plane at
//! the tart base depth.

use glam::{Mat4, UVec2, Vec2, Vec3, Vec4};

/// Rays whose `z` component is smaller than this never reach the plane.
pub const PARALLEL_EPSILON: f32 = 1e-6;

/// Homogeneous clip coordinates of a pointer position in window pixels,
/// sampled at the pixel centre.  `None` for an empty window.
pub fn pointer_to_clip(pointer: Vec2, window_size: UVec2) -> Option<Vec4> {
    if window_size.x == 0 || window_size.y == 0 {
        return None;
    }
    let ndc = (pointer + 0.5) / window_size.as_vec2() * Vec2::new(2.0, -2.0) + Vec2::new(-1.0, 1.0);
    Some(Vec4::new(ndc.x, ndc.y, 1.0, 1.0))
}

/// Unit world-space direction of the ray leaving the camera through the
/// pointer.
///
/// The unprojected point is turned into a direction (`z = -1`, `w = 0`) so
/// that only the camera's rotation applies when moving it to world space.
pub fn pointer_ray(
    pointer: Vec2,
    window_size: UVec2,
    projection: Mat4,
    camera_to_world: Mat4,
) -> Option<Vec3> {
    let clip = pointer_to_clip(pointer, window_size)?;
    let mut eye = projection.inverse() * clip;
    eye.z = -1.0;
    eye.w = 0.0;
    let ray = (camera_to_world * eye).truncate().normalize_or_zero();
    (ray != Vec3::ZERO && ray.is_finite()).then_some(ray)
}

/// Where a ray starting at `origin` meets the plane `z = depth`.
///
/// The result has `z` exactly equal to `depth`.  Rays (nearly) parallel to
/// the plane give `None`.
pub fn intersect_depth_plane(origin: Vec3, ray: Vec3, depth: f32) -> Option<Vec3> {
    if ray.z.abs() < PARALLEL_EPSILON {
        return None;
    }
    let t = (depth - origin.z) / ray.z;
    let mut hit = origin + ray * t;
    hit.z = depth;
    hit.is_finite().then_some(hit)
}

/// Landing point of a fruit thrown from `origin` toward the pointer.
pub fn aim_destination(
    pointer: Vec2,
    window_size: UVec2,
    projection: Mat4,
    camera_to_world: Mat4,
    origin: Vec3,
    depth: f32,
) -> Option<Vec3> {
    let ray = pointer_ray(pointer, window_size, projection, camera_to_world)?;
    intersect_depth_plane(origin, ray, depth)
}
