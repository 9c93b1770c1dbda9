//! Position, orientation and scale of a scene node.

use glam::{Mat4, Quat, Vec3};

/// TRS transform of an unparented node.  `rotation` is kept unit length by
/// every method that changes it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    /// Local-to-world matrix, `T * R * S`.
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    pub fn translate(&mut self, offset: Vec3) {
        self.position += offset;
    }

    /// Turns by `angle` radians about `axis` given in the node's own frame.
    ///
    /// ```rust,ignore
    /// let mut t = Transform::IDENTITY;
    /// t.rotate_local(Vec3::Z, 5f32.to_radians());
    /// ```
    pub fn rotate_local(&mut self, axis: Vec3, angle: f32) {
        self.rotation = (self.rotation * Quat::from_axis_angle(axis, angle)).normalize();
    }

    /// Local `−Z` in world space.
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    /// Local `+X` in world space.
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn turned_about_y() -> Transform {
        Transform {
            rotation: Quat::from_rotation_y(FRAC_PI_2),
            ..Transform::IDENTITY
        }
    }

    #[test]
    fn matrix_places_scaled_point() {
        let t = Transform {
            position: Vec3::new(1.0, 2.0, 3.0),
            scale: Vec3::splat(2.0),
            ..Transform::IDENTITY
        };
        let p = t.matrix().transform_point3(Vec3::X);
        assert!(p.abs_diff_eq(Vec3::new(3.0, 2.0, 3.0), 1e-6));
    }

    #[test]
    fn local_rotation_applies_after_existing_one() {
        let mut t = turned_about_y();
        t.rotate_local(Vec3::X, FRAC_PI_2);
        let expected = Quat::from_rotation_y(FRAC_PI_2) * Quat::from_rotation_x(FRAC_PI_2);
        assert!(t.rotation.abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn many_small_turns_stay_normalized() {
        let mut t = Transform::IDENTITY;
        for _ in 0..720 {
            t.rotate_local(Vec3::Z, 5f32.to_radians());
        }
        assert!((t.rotation.length() - 1.0).abs() < 1e-5);
        // ten full turns
        assert!(t.rotation.w.abs() > 1.0 - 1e-3);
    }

    #[test]
    fn basis_follows_rotation() {
        let t = turned_about_y();
        assert!(t.forward().abs_diff_eq(Vec3::NEG_X, 1e-5));
        assert!(t.right().abs_diff_eq(Vec3::NEG_Z, 1e-5));
    }
}
