//! Fruit kinds and the per-slot fruit entity.

use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use tart_core::{Handle, World};

/// Every fruit that can appear in a roster.
///
/// The display name of a kind is also the name of the scene transform that
/// carries it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FruitKind {
    Cherry,
    Kiwi,
    Peach,
    Blueberry,
    Strawberry,
    Raspberry,
    Blackberry,
    Mango,
    Banana,
    Grape,
}

const NAMES: [&str; 10] = [
    "Cherry",
    "Kiwi",
    "Peach",
    "Blueberry",
    "Strawberry",
    "Raspberry",
    "Blackberry",
    "Mango",
    "Banana",
    "Grape",
];

impl FruitKind {
    /// The four-fruit tart.
    pub const CLASSIC: [FruitKind; 4] = [
        FruitKind::Cherry,
        FruitKind::Kiwi,
        FruitKind::Peach,
        FruitKind::Blueberry,
    ];

    /// Every kind, in declaration order.
    pub const ALL: [FruitKind; 10] = [
        FruitKind::Cherry,
        FruitKind::Kiwi,
        FruitKind::Peach,
        FruitKind::Blueberry,
        FruitKind::Strawberry,
        FruitKind::Raspberry,
        FruitKind::Blackberry,
        FruitKind::Mango,
        FruitKind::Banana,
        FruitKind::Grape,
    ];

    pub fn name(self) -> &'static str {
        NAMES[self as usize]
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }
}

impl fmt::Display for FruitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Lifecycle position of one fruit, derived from its flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FruitState {
    /// Waiting off-scene; may be staged.
    Idle,
    /// Posed at its staging position, accepting rotation and aiming.
    Staged,
    /// Thrown; moving toward its destination every frame.
    InFlight,
    /// Landed on the tart.  Only undo brings it back.
    Placed,
}

impl fmt::Display for FruitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FruitState::Idle => "idle",
            FruitState::Staged => "staged",
            FruitState::InFlight => "in flight",
            FruitState::Placed => "placed",
        };
        f.write_str(s)
    }
}

/// One roster slot.
///
/// The entity never owns scene geometry: `transform` is a handle into the
/// host's [`World`], which must outlive the roster.  Flags are only changed
/// by the transition methods below, which keep `ready ⇒ staged` and
/// `!available ⇒ !staged`.
#[derive(Debug, Clone)]
pub struct FruitEntity {
    kind: FruitKind,
    transform: Handle,
    initial_position: Vec3,
    destination: Vec3,
    rotation_axis: Vec3,
    available: bool,
    staged: bool,
    ready: bool,
}

impl FruitEntity {
    pub(crate) fn new(kind: FruitKind, transform: Handle, initial_position: Vec3) -> Self {
        Self {
            kind,
            transform,
            initial_position,
            destination: Vec3::ZERO,
            rotation_axis: Vec3::X,
            available: true,
            staged: false,
            ready: false,
        }
    }

    pub fn kind(&self) -> FruitKind {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn transform(&self) -> Handle {
        self.transform
    }

    pub fn initial_position(&self) -> Vec3 {
        self.initial_position
    }

    /// Landing point of the last throw.  Only meaningful while in flight or
    /// once placed.
    pub fn destination(&self) -> Vec3 {
        self.destination
    }

    pub fn rotation_axis(&self) -> Vec3 {
        self.rotation_axis
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    pub fn is_staged(&self) -> bool {
        self.staged
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn state(&self) -> FruitState {
        match (self.available, self.staged, self.ready) {
            (false, _, _) => FruitState::Placed,
            (true, false, _) => FruitState::Idle,
            (true, true, false) => FruitState::Staged,
            (true, true, true) => FruitState::InFlight,
        }
    }

    // ── Transitions ────────────────────────────────────────────────────────

    /// Make this the posed fruit, back at its staging position.  Also used to
    /// bring a placed fruit back on undo.
    pub(crate) fn stage(&mut self, world: &mut World) {
        self.available = true;
        self.staged = true;
        self.ready = false;
        world.set_position(self.transform, self.initial_position);
    }

    /// Back to idle, parked at `hidden`.  Cancels any flight in progress.
    pub(crate) fn unload(&mut self, world: &mut World, hidden: Vec3) {
        self.staged = false;
        self.ready = false;
        world.set_position(self.transform, hidden);
    }

    /// Commit a throw toward `destination`.
    pub(crate) fn launch(&mut self, destination: Vec3) {
        self.destination = destination;
        self.ready = true;
    }

    /// Land on the tart, snapping onto the destination.
    pub(crate) fn place(&mut self, world: &mut World) {
        self.available = false;
        self.staged = false;
        self.ready = false;
        world.set_position(self.transform, self.destination);
    }

    pub(crate) fn set_rotation_axis(&mut self, axis: Vec3) {
        self.rotation_axis = axis;
    }
}
