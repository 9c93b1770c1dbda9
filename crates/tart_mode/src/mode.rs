//! The tart placement state machine.
//!
//! Each frame the host calls, in order:
//! 1. [`TartMode::handle_command`] for every decoded input command,
//! 2. [`TartMode::update`] with the frame delta,
//! 3. the read-only queries ([`TartMode::status`], [`TartMode::current`], …)
//!    while drawing.
//!
//! The mode keeps only handles into the host's [`World`]; the world is passed
//! in on every call and must be the one the mode was built from.
//!
//! ```rust,ignore
//! let mut mode = TartMode::new(&mut world, TartConfig::default())?;
//! mode.handle_command(&mut world, TartCommand::Stage);
//! mode.handle_command(&mut world, TartCommand::AimAt { pointer, window_size });
//! mode.update(&mut world, time.delta);
//! println!("{}", mode.status());
//! ```

use std::fmt;

use glam::{UVec2, Vec2, Vec3};
use log::{debug, info, warn};
use tart_core::{Handle, World};

use crate::aim;
use crate::command::{Axis, Spin, TartCommand};
use crate::config::TartConfig;
use crate::error::TartError;
use crate::fruit::{FruitEntity, FruitKind, FruitState};
use crate::roster::{unique_node, Roster};

/// Handles of the tart shell parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TartShell {
    pub base: Handle,
    pub rim: Handle,
}

/// What an overlay needs to describe the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TartStatus {
    pub current: FruitKind,
    pub current_state: FruitState,
    pub placed: usize,
    pub total: usize,
}

impl TartStatus {
    pub fn is_complete(&self) -> bool {
        self.placed == self.total
    }
}

impl fmt::Display for TartStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_complete() {
            write!(f, "tart complete: {}/{} placed", self.placed, self.total)
        } else {
            write!(
                f,
                "{} ({}), {}/{} placed",
                self.current, self.current_state, self.placed, self.total
            )
        }
    }
}

pub struct TartMode {
    config: TartConfig,
    roster: Roster,
    history: Vec<usize>,
    placed_count: usize,
    tart: TartShell,
    tart_base_depth: f32,
    hidden_position: Vec3,
    camera: usize,
}

impl TartMode {
    /// Binds the mode to `world`: finds the single camera, the tart shell and
    /// one transform per roster fruit, then parks every fruit out of sight.
    pub fn new(world: &mut World, config: TartConfig) -> Result<Self, TartError> {
        config.validate()?;

        let cameras = world.cameras().len();
        if cameras != 1 {
            return Err(TartError::CameraCount(cameras));
        }

        let base = unique_node(world, &config.tart_base_name)?
            .ok_or_else(|| TartError::MissingTartBase(config.tart_base_name.clone()))?;
        let rim = unique_node(world, &config.tart_rim_name)?
            .ok_or_else(|| TartError::MissingTartRim(config.tart_rim_name.clone()))?;
        let tart_base_depth = world
            .position(base)
            .map(|p| p.z)
            .ok_or_else(|| TartError::MissingTartBase(config.tart_base_name.clone()))?;

        let roster = Roster::from_world(world, &config.roster)?;
        let hidden_position = Vec3::new(0.0, 0.0, tart_base_depth - config.hidden_depth_offset);
        for fruit in roster.iter() {
            world.set_position(fruit.transform(), hidden_position);
        }

        info!(
            "tart mode ready: {} fruits, base depth {:.3}",
            roster.len(),
            tart_base_depth
        );

        Ok(Self {
            config,
            roster,
            history: Vec::new(),
            placed_count: 0,
            tart: TartShell { base, rim },
            tart_base_depth,
            hidden_position,
            camera: 0,
        })
    }

    // ── Commands ───────────────────────────────────────────────────────────

    /// Applies one command.  Returns `false` when the command does not apply
    /// in the current state, in which case nothing changed.
    pub fn handle_command(&mut self, world: &mut World, command: TartCommand) -> bool {
        let applied = match command {
            TartCommand::Stage => self.stage(world),
            TartCommand::Switch => self.switch_fruit(world),
            TartCommand::Rotate(spin) => self.rotate(world, spin),
            TartCommand::SetAxis(axis) => self.set_rotation_axis(axis),
            TartCommand::AimAt {
                pointer,
                window_size,
            } => self.aim_at(world, pointer, window_size),
            TartCommand::Undo => self.undo(world),
        };
        if !applied {
            debug!(
                "ignored {:?}: {} is {}",
                command,
                self.current().kind(),
                self.current().state()
            );
        }
        applied
    }

    /// Idle → Staged for the current fruit.
    pub fn stage(&mut self, world: &mut World) -> bool {
        let fruit = self.roster.current_mut();
        if fruit.state() != FruitState::Idle {
            return false;
        }
        fruit.stage(world);
        debug!("staged {}", fruit.kind());
        true
    }

    /// Puts the staged fruit away and stages the next available one.  With
    /// nothing else available the same fruit is staged again.
    pub fn switch_fruit(&mut self, world: &mut World) -> bool {
        let hidden = self.hidden_position;
        let fruit = self.roster.current_mut();
        if fruit.state() != FruitState::Staged {
            return false;
        }
        let from = fruit.kind();
        fruit.unload(world, hidden);

        self.roster.find_next_available();
        let next = self.roster.current_mut();
        next.stage(world);
        info!("switched {} -> {}", from, next.kind());
        true
    }

    /// Throws the staged fruit toward the tart point under the pointer.
    pub fn aim_at(&mut self, world: &mut World, pointer: Vec2, window_size: UVec2) -> bool {
        if self.roster.current().state() != FruitState::Staged {
            return false;
        }
        let Some(camera) = world.camera(self.camera) else {
            return false;
        };
        let Some(camera_to_world) = camera.local_to_world(world) else {
            warn!("camera transform is gone; cannot aim");
            return false;
        };
        let projection = camera.projection();

        let depth = self.tart_base_depth;
        let fruit = self.roster.current_mut();
        let origin = fruit.initial_position();
        let Some(destination) =
            aim::aim_destination(pointer, window_size, projection, camera_to_world, origin, depth)
        else {
            warn!(
                "pointer {:?} does not reach the tart plane at z = {}",
                pointer, depth
            );
            return false;
        };

        world.set_position(fruit.transform(), origin);
        fruit.launch(destination);
        debug!("threw {} toward {:?}", fruit.kind(), destination);
        true
    }

    /// Turns the staged fruit one step about its rotation axis.
    pub fn rotate(&mut self, world: &mut World, spin: Spin) -> bool {
        let angle = spin.sign() * self.config.rotation_step_degrees.to_radians();
        let fruit = self.roster.current();
        if fruit.state() != FruitState::Staged {
            return false;
        }
        match world.transform_mut(fruit.transform()) {
            Some(t) => {
                t.rotate_local(fruit.rotation_axis(), angle);
                true
            }
            None => false,
        }
    }

    pub fn set_rotation_axis(&mut self, axis: Axis) -> bool {
        let fruit = self.roster.current_mut();
        if fruit.state() != FruitState::Staged {
            return false;
        }
        fruit.set_rotation_axis(axis.unit());
        true
    }

    /// Takes back the latest placement: the current fruit is put away (unless
    /// it is itself placed) and the restored fruit is staged straight away.
    pub fn undo(&mut self, world: &mut World) -> bool {
        let Some(index) = self.history.pop() else {
            return false;
        };
        let hidden = self.hidden_position;
        let current = self.roster.current_mut();
        if current.is_available() {
            current.unload(world, hidden);
        }

        self.roster.set_cursor(index);
        let restored = self.roster.current_mut();
        restored.stage(world);
        let kind = restored.kind();
        self.placed_count -= 1;
        info!(
            "undid {}: {}/{} placed",
            kind,
            self.placed_count,
            self.roster.len()
        );
        true
    }

    // ── Frame update ───────────────────────────────────────────────────────

    /// Advances the fruit in flight by `elapsed` seconds.  Returns the kind
    /// of the fruit that landed this frame, if any.
    pub fn update(&mut self, world: &mut World, elapsed: f32) -> Option<FruitKind> {
        let fruit = self.roster.current();
        if fruit.state() != FruitState::InFlight {
            return None;
        }
        let position = world.position(fruit.transform())?;
        let to_target = fruit.destination() - position;

        if to_target.length() < self.config.collision_threshold {
            return Some(self.land(world));
        }

        // never past the destination, or long frames would bounce it forever
        let distance = to_target.length();
        let step = to_target / distance * (self.config.speed * elapsed).clamp(0.0, distance);
        world.translate(fruit.transform(), step);
        None
    }

    fn land(&mut self, world: &mut World) -> FruitKind {
        let index = self.roster.cursor();
        let fruit = self.roster.current_mut();
        fruit.place(world);
        let kind = fruit.kind();

        self.history.push(index);
        self.placed_count += 1;
        info!(
            "placed {}: {}/{} placed",
            kind,
            self.placed_count,
            self.roster.len()
        );

        if self.roster.find_next_available().is_none() {
            info!("tart complete");
        }
        kind
    }

    /// Keeps the camera aspect in step with the drawable size.
    pub fn resize(&self, world: &mut World, drawable_size: UVec2) {
        if let Some(camera) = world.camera_mut(self.camera) {
            camera.set_aspect_from_size(drawable_size.x, drawable_size.y);
        }
    }

    // ── Queries ────────────────────────────────────────────────────────────

    pub fn current(&self) -> &FruitEntity {
        self.roster.current()
    }

    pub fn current_kind(&self) -> FruitKind {
        self.current().kind()
    }

    pub fn current_name(&self) -> &'static str {
        self.current().name()
    }

    pub fn cursor(&self) -> usize {
        self.roster.cursor()
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Roster size; the tart is complete once this many fruits are placed.
    pub fn max_fruit(&self) -> usize {
        self.roster.len()
    }

    pub fn placed_count(&self) -> usize {
        self.placed_count
    }

    pub fn is_complete(&self) -> bool {
        self.placed_count == self.roster.len()
    }

    /// Roster indices in placement order, most recent last.
    pub fn history(&self) -> &[usize] {
        &self.history
    }

    pub fn tart(&self) -> TartShell {
        self.tart
    }

    pub fn tart_base_depth(&self) -> f32 {
        self.tart_base_depth
    }

    /// Where idle fruits are parked.
    pub fn hidden_position(&self) -> Vec3 {
        self.hidden_position
    }

    pub fn status(&self) -> TartStatus {
        TartStatus {
            current: self.current_kind(),
            current_state: self.current().state(),
            placed: self.placed_count,
            total: self.roster.len(),
        }
    }
}
