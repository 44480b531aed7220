//! Frame clock for the particle field.
//!
//! The window ticks the clock once per redraw and hands the resulting
//! [`FrameTime`] to [`ParticleField::update`](crate::field::ParticleField::update).
//! Tests and benches build `FrameTime` values directly instead.
//!
//! # Example
//!
//! ```ignore
//! use treebites::clock::FrameClock;
//!
//! let mut clock = FrameClock::new();
//! let frame = clock.tick();
//! field.update(&pointer, frame);
//! ```

use std::time::{Duration, Instant};

/// Longest delta handed to the field. A stalled frame (window drag, debugger)
/// would otherwise integrate a huge step and fling particles off screen.
pub const MAX_DELTA: f32 = 0.1;

/// Timing for one frame, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameTime {
    /// Seconds since the clock started (pauses excluded, time scale applied).
    pub elapsed: f32,
    /// Seconds since the previous frame, capped at [`MAX_DELTA`].
    pub delta: f32,
}

impl FrameTime {
    pub fn new(elapsed: f32, delta: f32) -> Self {
        Self { elapsed, delta }
    }

    /// The frame that follows this one after `delta` seconds.
    pub fn advance(self, delta: f32) -> Self {
        Self {
            elapsed: self.elapsed + delta,
            delta,
        }
    }
}

/// Wall-clock frame timer.
#[derive(Debug)]
pub struct FrameClock {
    start: Instant,
    last_frame: Instant,
    elapsed_secs: f32,
    delta_secs: f32,
    frame_count: u64,
    fps: f32,
    fps_frame_count: u64,
    fps_update_time: Instant,
    fps_update_interval: Duration,
    paused: bool,
    pause_elapsed: Duration,
    fixed_delta: Option<f32>,
    time_scale: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_frame: now,
            elapsed_secs: 0.0,
            delta_secs: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            fps_update_interval: Duration::from_millis(500),
            paused: false,
            pause_elapsed: Duration::ZERO,
            fixed_delta: None,
            time_scale: 1.0,
        }
    }

    /// Advance the clock. Call once per rendered frame.
    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();

        if self.paused {
            self.delta_secs = 0.0;
            return self.frame_time();
        }

        let raw_delta = now.duration_since(self.last_frame).as_secs_f32();
        self.delta_secs = (self.fixed_delta.unwrap_or(raw_delta) * self.time_scale).min(MAX_DELTA);
        self.last_frame = now;

        let raw_elapsed = now.duration_since(self.start).saturating_sub(self.pause_elapsed);
        self.elapsed_secs = raw_elapsed.as_secs_f32() * self.time_scale;

        self.frame_count += 1;

        let fps_elapsed = now.duration_since(self.fps_update_time);
        if fps_elapsed >= self.fps_update_interval {
            let frames_since = self.frame_count - self.fps_frame_count;
            self.fps = frames_since as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
        }

        self.frame_time()
    }

    #[inline]
    pub fn frame_time(&self) -> FrameTime {
        FrameTime::new(self.elapsed_secs, self.delta_secs)
    }

    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[inline]
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Freeze the field. While paused `tick` reports a zero delta.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        if self.paused {
            let now = Instant::now();
            self.pause_elapsed += now.duration_since(self.last_frame);
            self.last_frame = now;
            self.paused = false;
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    /// Use a constant step instead of wall-clock deltas.
    pub fn set_fixed_delta(&mut self, delta: Option<f32>) {
        self.fixed_delta = delta;
    }

    /// Negative scales clamp to zero.
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
