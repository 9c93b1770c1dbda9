//! Tart mode: place a roster of fruit onto a tart, one throw at a time.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use tart_core::{SceneDescription, World};
//! use tart_mode::{TartCommand, TartConfig, TartMode};
//!
//! let mut world = World::from_description(&SceneDescription::load("tart.scene.toml")?)?;
//! let mut mode = TartMode::new(&mut world, TartConfig::default())?;
//!
//! mode.handle_command(&mut world, TartCommand::Stage);
//! mode.handle_command(&mut world, TartCommand::AimAt { pointer, window_size });
//! while mode.update(&mut world, 1.0 / 60.0).is_none() {}
//! assert_eq!(mode.placed_count(), 1);
//! ```

pub mod aim;
#[cfg(feature = "input")]
pub mod bindings;
pub mod command;
pub mod config;
pub mod error;
pub mod fruit;
pub mod mode;
pub mod roster;

pub use command::{Axis, Spin, TartCommand};
pub use config::TartConfig;
pub use error::TartError;
pub use fruit::{FruitEntity, FruitKind, FruitState};
pub use mode::{TartMode, TartShell, TartStatus};
pub use roster::Roster;
