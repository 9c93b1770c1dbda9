//! Named scene nodes and the scene cameras.
//!
//! Game modes never own nodes.  They resolve the names they care about once,
//! keep the [`Handle`]s, and get the world passed in on every call.
//!
//! # Quick start
//! ```rust,ignore
//! use tart_core::{Camera, World};
//! use glam::Vec3;
//!
//! let mut world = World::new();
//! let cherry = world.spawn("Cherry").with_position(Vec3::new(0.0, 0.5, 3.0)).build();
//! let eye = world.spawn("Camera").with_position(Vec3::new(0.0, 0.0, 10.0)).build();
//! world.add_camera(Camera::new(eye));
//!
//! assert_eq!(world.find("Cherry"), Some(cherry));
//! ```

use std::collections::HashMap;

use glam::{Quat, Vec3};

use crate::scene::camera::Camera;
use crate::transform::Transform;

/// Stable reference to a node in a [`World`].
///
/// Handles are issued in increasing order, so sorting them gives spawn order.
/// Once the node is despawned every read through the handle yields `None`
/// and every write is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle(pub u64);

/// A named transform.
#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    pub transform: Transform,
}

/// Returned by [`World::spawn`]; `.build()` inserts the node.
pub struct NodeBuilder<'w> {
    world: &'w mut World,
    handle: Handle,
    node: Node,
}

impl NodeBuilder<'_> {
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.node.transform.position = position;
        self
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.node.transform.rotation = rotation;
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.node.transform = transform;
        self
    }

    pub fn build(self) -> Handle {
        self.world.nodes.insert(self.handle, self.node);
        self.handle
    }
}

#[derive(Debug, Default)]
pub struct World {
    nodes: HashMap<Handle, Node>,
    cameras: Vec<Camera>,
    last_handle: u64,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a node called `name` with an identity transform.  Names need
    /// not be unique; callers that require uniqueness check [`World::find_all`].
    pub fn spawn(&mut self, name: impl Into<String>) -> NodeBuilder<'_> {
        self.last_handle += 1;
        NodeBuilder {
            handle: Handle(self.last_handle),
            node: Node {
                name: name.into(),
                transform: Transform::IDENTITY,
            },
            world: self,
        }
    }

    /// Removes a node.  `false` if it was already gone.
    pub fn despawn(&mut self, handle: Handle) -> bool {
        self.nodes.remove(&handle).is_some()
    }

    /// All nodes called `name`, oldest first.
    pub fn find_all(&self, name: &str) -> Vec<Handle> {
        let mut hits: Vec<Handle> = self
            .nodes
            .iter()
            .filter_map(|(&handle, node)| (node.name == name).then_some(handle))
            .collect();
        hits.sort_unstable();
        hits
    }

    /// Oldest node called `name`.
    pub fn find(&self, name: &str) -> Option<Handle> {
        self.find_all(name).first().copied()
    }

    pub fn name(&self, handle: Handle) -> Option<&str> {
        self.nodes.get(&handle).map(|n| n.name.as_str())
    }

    // ── Transforms ─────────────────────────────────────────────────────────

    pub fn transform(&self, handle: Handle) -> Option<&Transform> {
        self.nodes.get(&handle).map(|n| &n.transform)
    }

    pub fn transform_mut(&mut self, handle: Handle) -> Option<&mut Transform> {
        self.nodes.get_mut(&handle).map(|n| &mut n.transform)
    }

    pub fn position(&self, handle: Handle) -> Option<Vec3> {
        self.transform(handle).map(|t| t.position)
    }

    pub fn set_position(&mut self, handle: Handle, position: Vec3) {
        if let Some(t) = self.transform_mut(handle) {
            t.position = position;
        }
    }

    pub fn translate(&mut self, handle: Handle, offset: Vec3) {
        if let Some(t) = self.transform_mut(handle) {
            t.translate(offset);
        }
    }

    pub fn rotation(&self, handle: Handle) -> Option<Quat> {
        self.transform(handle).map(|t| t.rotation)
    }

    pub fn set_rotation(&mut self, handle: Handle, rotation: Quat) {
        if let Some(t) = self.transform_mut(handle) {
            t.rotation = rotation;
        }
    }

    // ── Cameras ────────────────────────────────────────────────────────────

    /// Registers a camera and returns its index.
    pub fn add_camera(&mut self, camera: Camera) -> usize {
        self.cameras.push(camera);
        self.cameras.len() - 1
    }

    pub fn cameras(&self) -> &[Camera] {
        &self.cameras
    }

    pub fn camera(&self, index: usize) -> Option<&Camera> {
        self.cameras.get(index)
    }

    pub fn camera_mut(&mut self, index: usize) -> Option<&mut Camera> {
        self.cameras.get_mut(index)
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_the_transform() {
        let mut w = World::new();
        let tilt = Quat::from_rotation_x(0.3);
        let h = w
            .spawn("Camera")
            .with_position(Vec3::new(0.0, -4.0, 6.0))
            .with_rotation(tilt)
            .build();
        assert_eq!(w.name(h), Some("Camera"));
        assert_eq!(w.position(h), Some(Vec3::new(0.0, -4.0, 6.0)));
        assert_eq!(w.rotation(h), Some(tilt));
        assert_eq!(w.len(), 1);
    }

    #[test]
    fn translate_accumulates() {
        let mut w = World::new();
        let h = w.spawn("Peach").build();
        w.set_position(h, Vec3::new(1.0, 2.0, 3.0));
        w.translate(h, Vec3::ONE);
        w.translate(h, Vec3::ONE);
        assert_eq!(w.position(h), Some(Vec3::new(3.0, 4.0, 5.0)));
    }

    #[test]
    fn lookup_is_in_spawn_order() {
        let mut w = World::new();
        let first = w.spawn("Kiwi").build();
        w.spawn("Peach").build();
        let second = w.spawn("Kiwi").build();
        assert_eq!(w.find("Kiwi"), Some(first));
        assert_eq!(w.find_all("Kiwi"), vec![first, second]);
        assert_eq!(w.find("Mango"), None);
        assert!(w.find_all("Mango").is_empty());
    }

    #[test]
    fn despawned_handles_read_none_and_drop_writes() {
        let mut w = World::new();
        let gone = w.spawn("X").build();
        let kept = w.spawn("Y").with_position(Vec3::ONE).build();
        assert!(w.despawn(gone));
        assert!(!w.despawn(gone));
        w.set_position(gone, Vec3::splat(9.0));
        w.set_rotation(gone, Quat::from_rotation_z(1.0));
        assert_eq!(w.position(gone), None);
        assert_eq!(w.name(gone), None);
        assert_eq!(w.position(kept), Some(Vec3::ONE));
        assert_eq!(w.len(), 1);
    }

    #[test]
    fn cameras_are_indexed_in_insertion_order() {
        let mut w = World::new();
        assert!(w.is_empty());
        let eye = w.spawn("Camera").build();
        assert_eq!(w.add_camera(Camera::new(eye)), 0);
        assert_eq!(w.cameras().len(), 1);
        assert_eq!(w.camera(0).map(|c| c.transform), Some(eye));
        assert!(w.camera(1).is_none());
    }
}
