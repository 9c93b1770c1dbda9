//! Plain-text command scripts for headless playback.
//!
//! One step per line, `#` starts a comment:
//!
//! ```text
//! stage
//! axis z
//! rotate +
//! aim 640 360      # pointer position in window pixels
//! wait 1.5         # run frames for 1.5 seconds
//! look 30 -10      # relative mouse motion in pixels
//! fly up 0.5       # hold an arrow key for 0.5 seconds
//! undo
//! ```

use anyhow::{anyhow, bail, Context, Result};
use glam::Vec2;
use tart_core::FlyInput;
use tart_mode::{Axis, Spin};

#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Stage,
    Switch,
    Undo,
    Rotate(Spin),
    Axis(Axis),
    Aim(Vec2),
    Wait(f32),
    Look(Vec2),
    Fly(FlyInput, f32),
}

pub fn parse(text: &str) -> Result<Vec<Step>> {
    let mut steps = Vec::new();
    for (number, raw) in text.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let step = parse_line(line).with_context(|| format!("script line {}: '{}'", number + 1, line))?;
        steps.push(step);
    }
    Ok(steps)
}

fn parse_line(line: &str) -> Result<Step> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let step = match words.as_slice() {
        ["stage"] => Step::Stage,
        ["switch"] => Step::Switch,
        ["undo"] => Step::Undo,
        ["rotate", "+"] => Step::Rotate(Spin::Positive),
        ["rotate", "-"] => Step::Rotate(Spin::Negative),
        ["axis", axis] => Step::Axis(parse_axis(axis)?),
        ["aim", x, y] => Step::Aim(Vec2::new(number(x)?, number(y)?)),
        ["look", dx, dy] => Step::Look(Vec2::new(number(dx)?, number(dy)?)),
        ["wait", secs] => Step::Wait(seconds(secs)?),
        ["fly", dir, secs] => Step::Fly(parse_direction(dir)?, seconds(secs)?),
        _ => bail!("unknown step"),
    };
    Ok(step)
}

fn number(word: &str) -> Result<f32> {
    let value: f32 = word.parse().with_context(|| format!("'{}' is not a number", word))?;
    if !value.is_finite() {
        bail!("'{}' is not finite", word);
    }
    Ok(value)
}

fn seconds(word: &str) -> Result<f32> {
    let value = number(word)?;
    if value < 0.0 {
        bail!("duration {} is negative", value);
    }
    Ok(value)
}

fn parse_axis(word: &str) -> Result<Axis> {
    match word {
        "x" => Ok(Axis::X),
        "y" => Ok(Axis::Y),
        "z" => Ok(Axis::Z),
        other => Err(anyhow!("unknown axis '{}'", other)),
    }
}

fn parse_direction(word: &str) -> Result<FlyInput> {
    let mut input = FlyInput::default();
    match word {
        "left" => input.left = true,
        "right" => input.right = true,
        "up" => input.up = true,
        "down" => input.down = true,
        other => bail!("unknown direction '{}'", other),
    }
    Ok(input)
}
