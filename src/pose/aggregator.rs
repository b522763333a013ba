//! Temporal score aggregation.
//!
//! Per-frame similarity is too jittery to display. The window accumulates it
//! and emits one rounded 0-100 score per window. The window duration is
//! re-sampled uniformly from the configured range at every emission (and only
//! then), so the score display does not tick on a mechanical cadence.

use rand::Rng;
use serde::Serialize;

use crate::config::ScoreWindowConfig;
use crate::constants::{FEEDBACK_GOOD, FEEDBACK_PERFECT};

/// Grade attached to an emitted score, for UI styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FeedbackLevel {
    Perfect,
    Good,
    NeedsImprovement,
}

impl FeedbackLevel {
    /// Grade a window average in [0, 1].
    pub fn from_average(avg: f64) -> Self {
        if avg >= FEEDBACK_PERFECT {
            FeedbackLevel::Perfect
        } else if avg >= FEEDBACK_GOOD {
            FeedbackLevel::Good
        } else {
            FeedbackLevel::NeedsImprovement
        }
    }
}

/// One emitted window score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreEvent {
    /// Rounded window average, 0-100.
    pub score: u32,
    pub level: FeedbackLevel,
}

/// Mutable aggregation state for one session. Pure bookkeeping, executed
/// synchronously inside the per-frame callback.
#[derive(Debug)]
pub struct ScoreWindow {
    config: ScoreWindowConfig,
    sum: f64,
    frames: u32,
    window_start_ms: f64,
    window_ms: f64,
}

impl ScoreWindow {
    pub fn new(config: ScoreWindowConfig, now_ms: f64) -> Self {
        let window_ms = sample_duration(&config);
        Self {
            config,
            sum: 0.0,
            frames: 0,
            window_start_ms: now_ms,
            window_ms,
        }
    }

    /// Accumulate one frame's similarity; returns a score when the window
    /// closes.
    ///
    /// Gated/zero frames are accumulated too: a prolonged not-visible period
    /// must drag the average down. Emission requires both the sampled window
    /// time to have elapsed and a minimum number of frames, so irregular
    /// frame timing cannot produce a score from one or two samples.
    pub fn push(&mut self, similarity: f64, now_ms: f64) -> Option<ScoreEvent> {
        self.sum += similarity;
        self.frames += 1;

        let elapsed = now_ms - self.window_start_ms;
        if elapsed < self.window_ms || self.frames < self.config.min_sample_floor {
            return None;
        }

        let avg = self.sum / f64::from(self.frames);
        let event = ScoreEvent {
            score: (100.0 * avg).round() as u32,
            level: FeedbackLevel::from_average(avg),
        };
        tracing::debug!(
            score = event.score,
            frames = self.frames,
            window_ms = self.window_ms,
            "score window emitted"
        );

        self.sum = 0.0;
        self.frames = 0;
        self.window_start_ms = now_ms;
        self.window_ms = sample_duration(&self.config);

        Some(event)
    }

    /// Discard accumulated state and restart the window at `now_ms`.
    pub fn reset(&mut self, now_ms: f64) {
        self.sum = 0.0;
        self.frames = 0;
        self.window_start_ms = now_ms;
        self.window_ms = sample_duration(&self.config);
    }

    pub fn frames(&self) -> u32 {
        self.frames
    }

    /// Duration of the currently open window (milliseconds).
    pub fn window_ms(&self) -> f64 {
        self.window_ms
    }
}

fn sample_duration(config: &ScoreWindowConfig) -> f64 {
    rand::thread_rng().gen_range(config.min_interval_ms..=config.max_interval_ms)
}
