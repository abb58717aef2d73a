//! Adaptive quality controller.
//!
//! A feedback loop between measured frame rate and optional cosmetic load.
//! Instantaneous FPS samples fill a fixed rolling window; no adjustment
//! happens until the window has filled once, which prevents single-sample
//! flapping. Degradation is faster than recovery (asymmetric hysteresis) so
//! the level settles instead of oscillating.
//!
//! The level scales connection budget, shooting-star probability and bloom
//! intensity only. Node count is visual identity, never a performance dial.

/// Lowest quality level the controller will degrade to.
pub const QUALITY_FLOOR: f32 = 0.5;
/// Per-tick decrease while the window average is below the low threshold.
const STEP_DOWN: f32 = 0.05;
/// Per-tick increase while the window average is above the high threshold.
const STEP_UP: f32 = 0.01;
/// Degrade below `0.8 * target`, recover above `1.1 * target`.
const LOW_FACTOR: f32 = 0.8;
const HIGH_FACTOR: f32 = 1.1;

/// Rolling-window FPS governor.
#[derive(Debug)]
pub struct QualityController {
    level: f32,
    target_fps: f32,
    window: Vec<f32>,
    head: usize,
    filled: bool,
}

impl QualityController {
    pub fn new(target_fps: f32, window_size: usize) -> Self {
        Self {
            level: 1.0,
            target_fps,
            window: vec![0.0; window_size.max(1)],
            head: 0,
            filled: false,
        }
    }

    /// Feed one instantaneous FPS sample and return the current level.
    pub fn sample(&mut self, fps: f32) -> f32 {
        self.window[self.head] = fps;
        self.head += 1;
        if self.head == self.window.len() {
            self.head = 0;
            self.filled = true;
        }
        if !self.filled {
            return self.level;
        }

        let average = self.window.iter().sum::<f32>() / self.window.len() as f32;
        if average < self.target_fps * LOW_FACTOR {
            self.level = (self.level - STEP_DOWN).max(QUALITY_FLOOR);
        } else if average > self.target_fps * HIGH_FACTOR && self.level < 1.0 {
            self.level = (self.level + STEP_UP).min(1.0);
        }
        self.level
    }

    /// Current quality level in [0.5, 1.0].
    #[inline]
    pub fn level(&self) -> f32 {
        self.level
    }

    /// Scale an integer budget by the current level.
    #[inline]
    pub fn scale_budget(&self, base: usize) -> usize {
        (base as f32 * self.level).round() as usize
    }
}
