//! Frame timing utilities.
//!
//! `Time` is a per-frame snapshot handed to game code; its `delta` is what
//! drives in-flight motion.  Headless playback produces snapshots from a
//! [`FixedStep`] clock instead of the wall clock so runs are reproducible.
//!
//! # Example
//! ```rust,ignore
//! let mut clock = FixedStep::new(1.0 / 60.0);
//! for _ in 0..120 {
//!     let time = clock.tick();
//!     mode.update(&mut world, time.delta);
//! }
//! ```

/// Longest frame delta handed to game code, in seconds.
pub const MAX_DELTA: f32 = 0.1;

/// A snapshot of timing information for the current frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Time {
    /// Seconds elapsed since the previous frame, clamped to [`MAX_DELTA`]
    /// so a stalled frame cannot launch a fruit straight through its target.
    pub delta: f32,

    /// Total seconds elapsed since the session started.
    pub elapsed: f64,

    /// Number of frames produced so far (0 for the first frame).
    pub frame_count: u64,
}

// ─── Clock ─────────────────────────────────────────────────────────────────

/// Deterministic clock advancing by the same step every frame.
#[derive(Debug, Clone)]
pub struct FixedStep {
    step: f32,
    elapsed: f64,
    frame_count: u64,
}

impl FixedStep {
    /// A clock stepping `step` seconds per tick.  Negative or non-finite steps
    /// are treated as zero; steps above [`MAX_DELTA`] are clamped.
    pub fn new(step: f32) -> Self {
        let step = if step.is_finite() { step.clamp(0.0, MAX_DELTA) } else { 0.0 };
        Self {
            step,
            elapsed: 0.0,
            frame_count: 0,
        }
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    /// Return the snapshot the next `tick` would report, without advancing.
    pub fn peek(&self) -> Time {
        Time {
            delta: self.step,
            elapsed: self.elapsed + f64::from(self.step),
            frame_count: self.frame_count,
        }
    }

    /// Advance by one frame.  Returns the [`Time`] snapshot for this frame.
    pub fn tick(&mut self) -> Time {
        let time = self.peek();
        self.elapsed = time.elapsed;
        self.frame_count += 1;
        time
    }
}
