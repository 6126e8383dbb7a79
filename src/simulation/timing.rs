//! Frame timing with moving-average smoothing
//!
//! Timestamps are injected by the caller, so the timer itself never reads
//! a clock and can be driven synthetically in tests.

use std::time::Instant;

/// Fixed-size moving average over the most recent samples.
#[derive(Debug, Clone)]
pub struct MovingAverage {
    samples: Vec<f32>,
    next: usize,
}

impl MovingAverage {
    pub fn new(size: usize, initial: f32) -> Self {
        Self {
            samples: vec![initial; size.max(1)],
            next: 0,
        }
    }

    pub fn add(&mut self, value: f32) {
        self.samples[self.next] = value;
        self.next = (self.next + 1) % self.samples.len();
    }

    pub fn result(&self) -> f32 {
        self.samples.iter().sum::<f32>() / self.samples.len() as f32
    }
}

/// Number of frames averaged for the displayed rate
const SMOOTHING_WINDOW: usize = 4;

/// Measures per-frame deltas and a smoothed frame rate.
#[derive(Debug, Clone)]
pub struct FrameTimer {
    target_delta: f32,
    elapsed: MovingAverage,
    last_tick: Option<Instant>,
}

impl FrameTimer {
    pub fn new(target_fps: f32) -> Self {
        let target_delta = 1.0 / target_fps;
        Self {
            target_delta,
            elapsed: MovingAverage::new(SMOOTHING_WINDOW, target_delta),
            last_tick: None,
        }
    }

    /// The fixed delta this timer is aiming for.
    pub fn target_delta(&self) -> f32 {
        self.target_delta
    }

    /// Record a frame boundary and return the measured delta in seconds.
    /// The first tick has nothing to measure against and reports the
    /// target delta.
    pub fn tick(&mut self, now: Instant) -> f32 {
        let delta = match self.last_tick {
            Some(last) => now.duration_since(last).as_secs_f32(),
            None => self.target_delta,
        };
        self.last_tick = Some(now);
        self.elapsed.add(delta);
        delta
    }

    /// Moving average of the recent frame deltas.
    pub fn smoothed_delta(&self) -> f32 {
        self.elapsed.result()
    }

    pub fn fps(&self) -> f32 {
        let delta = self.smoothed_delta();
        if delta > 0.0 {
            1.0 / delta
        } else {
            0.0
        }
    }
}
