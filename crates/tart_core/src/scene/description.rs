//! TOML scene description: a flat list of named transforms plus one camera
//! block.  This is what the headless tools load in place of a baked scene.
//!
//! ```toml
//! [[transform]]
//! name = "TartBase"
//! position = [0.0, 0.0, 0.0]
//!
//! [[transform]]
//! name = "Camera"
//! position = [0.0, -12.0, 9.0]
//! rotation = [0.42, 0.0, 0.0, 0.91]
//!
//! [[camera]]
//! transform = "Camera"
//! fovy_degrees = 60.0
//! ```

use std::path::Path;

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::scene::camera::Camera;
use crate::scene::world::World;
use crate::transform::Transform;

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("failed to read scene file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid scene description: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("camera transform '{0}' is not declared in the scene")]
    UnknownCameraTransform(String),
    #[error("transform '{name}' has a rotation of zero or non-finite length: {rotation:?}")]
    InvalidRotation { name: String, rotation: [f32; 4] },
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct TransformDescription {
    pub name: String,
    #[serde(default)]
    pub position: [f32; 3],
    /// Quaternion as `[x, y, z, w]`.
    #[serde(default = "identity_rotation")]
    pub rotation: [f32; 4],
    #[serde(default = "unit_scale")]
    pub scale: [f32; 3],
}

fn identity_rotation() -> [f32; 4] {
    [0.0, 0.0, 0.0, 1.0]
}

fn unit_scale() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

impl TransformDescription {
    /// The transform with its rotation normalized.  A quaternion that cannot
    /// be normalized is rejected.
    pub fn to_transform(&self) -> Result<Transform, SceneError> {
        let rotation = Quat::from_array(self.rotation);
        let length = rotation.length();
        if !length.is_finite() || length < 1e-6 {
            return Err(SceneError::InvalidRotation {
                name: self.name.clone(),
                rotation: self.rotation,
            });
        }
        Ok(Transform {
            position: Vec3::from_array(self.position),
            rotation: rotation / length,
            scale: Vec3::from_array(self.scale),
        })
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct CameraDescription {
    /// Name of the transform carrying the camera pose.
    pub transform: String,
    pub fovy_degrees: f32,
    pub aspect: f32,
    pub znear: f32,
}

impl Default for CameraDescription {
    fn default() -> Self {
        Self {
            transform: "Camera".into(),
            fovy_degrees: 60.0,
            aspect: 1.0,
            znear: 0.01,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct SceneDescription {
    #[serde(default, rename = "transform")]
    pub transforms: Vec<TransformDescription>,
    /// Cameras are optional here; game modes decide how many they need.
    #[serde(default, rename = "camera")]
    pub cameras: Vec<CameraDescription>,
}

impl SceneDescription {
    pub fn from_toml_str(text: &str) -> Result<Self, SceneError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SceneError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}

impl World {
    /// Build a world from a description.  Transforms are spawned in file
    /// order; each camera attaches to the first transform with its name.
    pub fn from_description(desc: &SceneDescription) -> Result<Self, SceneError> {
        let mut world = World::new();
        for t in &desc.transforms {
            world.spawn(t.name.clone()).with_transform(t.to_transform()?).build();
        }
        for c in &desc.cameras {
            let handle = world
                .find(&c.transform)
                .ok_or_else(|| SceneError::UnknownCameraTransform(c.transform.clone()))?;
            world.add_camera(Camera {
                transform: handle,
                fovy: c.fovy_degrees.to_radians(),
                aspect: c.aspect,
                znear: c.znear,
            });
        }
        log::debug!(
            "scene built: {} transforms, {} cameras",
            world.len(),
            world.cameras().len()
        );
        Ok(world)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENE: &str = r#"
        [[transform]]
        name = "TartBase"
        position = [0.0, 0.0, 1.0]

        [[transform]]
        name = "Cherry"
        position = [2.0, 0.0, 4.0]
        rotation = [0.0, 0.0, 0.0, 2.0]

        [[transform]]
        name = "Camera"
        position = [0.0, 0.0, 10.0]

        [[camera]]
        transform = "Camera"
        fovy_degrees = 90.0
    "#;

    #[test]
    fn parses_and_builds_world() {
        let desc = SceneDescription::from_toml_str(SCENE).unwrap();
        assert_eq!(desc.transforms.len(), 3);
        let world = World::from_description(&desc).unwrap();
        assert_eq!(world.len(), 3);
        let cherry = world.find("Cherry").unwrap();
        assert_eq!(world.position(cherry), Some(Vec3::new(2.0, 0.0, 4.0)));
        // rotation is normalized on load
        assert!(world.rotation(cherry).unwrap().abs_diff_eq(Quat::IDENTITY, 1e-6));
        let cam = world.camera(0).unwrap();
        assert_eq!(Some(cam.transform), world.find("Camera"));
        assert!((cam.fovy - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        assert!((cam.znear - 0.01).abs() < 1e-9);
    }

    #[test]
    fn unknown_camera_transform_is_an_error() {
        let desc = SceneDescription::from_toml_str(
            r#"
            [[camera]]
            transform = "Nowhere"
            "#,
        )
        .unwrap();
        let err = World::from_description(&desc).unwrap_err();
        assert!(matches!(err, SceneError::UnknownCameraTransform(name) if name == "Nowhere"));
    }

    #[test]
    fn zero_rotation_is_rejected() {
        let desc = SceneDescription::from_toml_str(
            r#"
            [[transform]]
            name = "Kiwi"
            rotation = [0.0, 0.0, 0.0, 0.0]
            "#,
        )
        .unwrap();
        let err = World::from_description(&desc).unwrap_err();
        assert!(matches!(err, SceneError::InvalidRotation { ref name, .. } if name == "Kiwi"));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = SceneDescription::from_toml_str("[[transform]]\nposition = 3").unwrap_err();
        assert!(matches!(err, SceneError::Parse(_)));
    }
}
