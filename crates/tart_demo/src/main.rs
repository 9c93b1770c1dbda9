//! Headless tart session: loads a scene and a command script, replays the
//! script at a fixed time step and logs what the tart mode does.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use glam::UVec2;
use log::{info, LevelFilter};
use tart_core::{FixedStep, FlyController, FlyInput, SceneDescription, World};
use tart_mode::{TartCommand, TartConfig, TartMode};

mod script;

use script::Step;

const DEFAULT_SCENE: &str = include_str!("../assets/tart.scene.toml");
const DEFAULT_SCRIPT: &str = include_str!("../assets/demo.script");

/// Replay a tart session without a window
#[derive(Parser, Debug)]
#[command(name = "tart_demo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Scene description (TOML); the bundled tart scene when omitted
    #[arg(long)]
    scene: Option<PathBuf>,

    /// Tart mode config (TOML); defaults when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Command script; the bundled demo script when omitted
    #[arg(long)]
    script: Option<PathBuf>,

    /// Seconds per simulated frame
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// Simulated window width in pixels
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Simulated window height in pixels
    #[arg(long, default_value_t = 720)]
    height: u32,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn setup_logging(verbose: bool) -> Result<()> {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{:<5} {}] {}",
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stdout())
        .apply()
        .context("failed to install logger")?;
    Ok(())
}

fn read_or(path: &Option<PathBuf>, fallback: &str) -> Result<String> {
    match path {
        Some(p) => {
            std::fs::read_to_string(p).with_context(|| format!("reading {}", p.display()))
        }
        None => Ok(fallback.to_owned()),
    }
}

struct Session {
    world: World,
    mode: TartMode,
    fly: FlyController,
    clock: FixedStep,
    window: UVec2,
}

impl Session {
    /// Runs frames for `seconds`, optionally steering the camera.
    fn run_frames(&mut self, seconds: f32, steer: Option<FlyInput>) {
        let step = self.clock.step();
        if step <= 0.0 {
            return;
        }
        let frames = (seconds / step).ceil() as u64;
        for _ in 0..frames {
            let time = self.clock.tick();
            if let (Some(input), Some(camera)) = (steer, self.world.camera(0).cloned()) {
                self.fly.step(&mut self.world, &camera, input, time.delta);
            }
            if let Some(kind) = self.mode.update(&mut self.world, time.delta) {
                // the landed fruit is always the newest history entry
                let pos = self
                    .mode
                    .history()
                    .last()
                    .and_then(|&i| self.mode.roster().get(i))
                    .and_then(|fruit| self.world.position(fruit.transform()));
                info!("frame {}: {} landed at {:?}", time.frame_count, kind, pos);
            }
        }
    }

    fn apply(&mut self, step: &Step) {
        let command = match *step {
            Step::Stage => TartCommand::Stage,
            Step::Switch => TartCommand::Switch,
            Step::Undo => TartCommand::Undo,
            Step::Rotate(spin) => TartCommand::Rotate(spin),
            Step::Axis(axis) => TartCommand::SetAxis(axis),
            Step::Aim(pointer) => TartCommand::AimAt {
                pointer,
                window_size: self.window,
            },
            Step::Wait(seconds) => return self.run_frames(seconds, None),
            Step::Fly(input, seconds) => return self.run_frames(seconds, Some(input)),
            Step::Look(motion) => {
                if let Some(camera) = self.world.camera(0).cloned() {
                    self.fly.look(&mut self.world, &camera, motion, self.window);
                }
                return;
            }
        };
        let applied = self.mode.handle_command(&mut self.world, command);
        info!(
            "{:?} -> {} [{}]",
            command,
            if applied { "applied" } else { "ignored" },
            self.mode.status()
        );
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose)?;

    let scene_text = read_or(&cli.scene, DEFAULT_SCENE)?;
    let scene = SceneDescription::from_toml_str(&scene_text).context("loading scene")?;
    let mut world = World::from_description(&scene).context("building scene")?;

    let config = match &cli.config {
        Some(path) => TartConfig::load(path)?,
        None => TartConfig::default(),
    };
    let steps = script::parse(&read_or(&cli.script, DEFAULT_SCRIPT)?)?;

    let mode = TartMode::new(&mut world, config).context("starting tart mode")?;
    let window = UVec2::new(cli.width, cli.height);
    mode.resize(&mut world, window);

    let mut session = Session {
        world,
        mode,
        fly: FlyController::new(),
        clock: FixedStep::new(cli.dt),
        window,
    };

    for step in &steps {
        session.apply(step);
    }

    let status = session.mode.status();
    info!("{}", status);
    for fruit in session.mode.roster().iter() {
        info!(
            "  {:<10} {:<9} at {:?}",
            fruit.name(),
            fruit.state().to_string(),
            session.world.position(fruit.transform())
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundled_session() -> Session {
        let scene = SceneDescription::from_toml_str(DEFAULT_SCENE).unwrap();
        let mut world = World::from_description(&scene).unwrap();
        let mode = TartMode::new(&mut world, TartConfig::default()).unwrap();
        let window = UVec2::new(1280, 720);
        mode.resize(&mut world, window);
        Session {
            world,
            mode,
            fly: FlyController::new(),
            clock: FixedStep::new(1.0 / 60.0),
            window,
        }
    }

    #[test]
    fn bundled_config_matches_defaults() {
        let text = include_str!("../assets/tart.toml");
        let config = TartConfig::from_toml_str(text).unwrap();
        assert_eq!(config.roster, TartConfig::default().roster);
    }

    #[test]
    fn bundled_script_fills_the_tart() {
        let mut session = bundled_session();
        for step in script::parse(DEFAULT_SCRIPT).unwrap() {
            session.apply(&step);
        }
        let status = session.mode.status();
        assert!(status.is_complete(), "{}", status);
        assert_eq!(session.mode.history().len(), 4);
    }

    #[test]
    fn centre_click_throws_along_the_view_direction() {
        let mut session = bundled_session();
        session.apply(&Step::Stage);
        session.apply(&Step::Aim(glam::Vec2::new(640.0, 360.0)));
        session.apply(&Step::Wait(2.0));
        let cherry = session.mode.roster().get(0).unwrap();
        let pos = session.world.position(cherry.transform()).unwrap();
        // thrown from (-3, -8, 4) parallel to the camera's view axis
        assert!(
            pos.abs_diff_eq(glam::Vec3::new(-2.99, -2.41, 0.0), 0.02),
            "landed at {:?}",
            pos
        );
    }
}
