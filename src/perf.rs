//! Per-session performance tracking for the detection pipeline.
//!
//! Rolling averages over the last [`PERF_HISTORY_LEN`] frames; old sessions
//! never leak into new ones because the tracker lives on the session.

use std::collections::VecDeque;

use serde::Serialize;

use crate::constants::{DETECTION_WARN_MS, MIN_HEALTHY_FPS, PERF_HISTORY_LEN};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerfMetrics {
    /// Average detection latency over the rolling history (milliseconds).
    pub avg_detection_ms: f64,
    /// Average frame-to-frame cycle time (milliseconds).
    pub avg_cycle_ms: f64,
    /// Frames processed this session.
    pub frame_count: u64,
    /// Effective frame rate derived from the cycle average; 0 until at
    /// least one cycle was measured.
    pub fps: f64,
}

#[derive(Debug, Default)]
pub struct PerfTracker {
    detection_ms: VecDeque<f64>,
    cycle_ms: VecDeque<f64>,
    frame_count: u64,
}

impl PerfTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_detection(&mut self, elapsed_ms: f64) {
        push_capped(&mut self.detection_ms, elapsed_ms);
        self.frame_count += 1;
    }

    pub fn record_cycle(&mut self, elapsed_ms: f64) {
        push_capped(&mut self.cycle_ms, elapsed_ms);
    }

    pub fn metrics(&self) -> PerfMetrics {
        let avg_detection_ms = average(&self.detection_ms);
        let avg_cycle_ms = average(&self.cycle_ms);
        let fps = if avg_cycle_ms > 0.0 {
            1000.0 / avg_cycle_ms
        } else {
            0.0
        };
        PerfMetrics {
            avg_detection_ms,
            avg_cycle_ms,
            frame_count: self.frame_count,
            fps,
        }
    }

    /// Log the current metrics, warning when the pipeline is unhealthy.
    pub fn log_summary(&self) {
        let m = self.metrics();
        tracing::info!(
            frames = m.frame_count,
            avg_detection_ms = m.avg_detection_ms,
            avg_cycle_ms = m.avg_cycle_ms,
            fps = m.fps,
            "pipeline performance"
        );
        if m.avg_detection_ms > DETECTION_WARN_MS {
            tracing::warn!(avg_detection_ms = m.avg_detection_ms, "detection is slow");
        }
        if m.fps > 0.0 && m.fps < MIN_HEALTHY_FPS {
            tracing::warn!(fps = m.fps, "frame rate is low");
        }
    }

    pub fn reset(&mut self) {
        self.detection_ms.clear();
        self.cycle_ms.clear();
        self.frame_count = 0;
    }
}

fn push_capped(history: &mut VecDeque<f64>, value: f64) {
    history.push_back(value);
    while history.len() > PERF_HISTORY_LEN {
        history.pop_front();
    }
}

fn average(history: &VecDeque<f64>) -> f64 {
    if history.is_empty() {
        return 0.0;
    }
    history.iter().sum::<f64>() / history.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tracker_reports_zeroes() {
        let m = PerfTracker::new().metrics();
        assert_eq!(m.avg_detection_ms, 0.0);
        assert_eq!(m.fps, 0.0);
        assert_eq!(m.frame_count, 0);
    }

    #[test]
    fn fps_derives_from_cycle_average() {
        let mut tracker = PerfTracker::new();
        for _ in 0..10 {
            tracker.record_detection(12.0);
            tracker.record_cycle(40.0);
        }
        let m = tracker.metrics();
        assert_eq!(m.frame_count, 10);
        assert!((m.avg_detection_ms - 12.0).abs() < 1e-9);
        assert!((m.fps - 25.0).abs() < 1e-9);
    }

    #[test]
    fn history_is_capped() {
        let mut tracker = PerfTracker::new();
        for i in 0..(PERF_HISTORY_LEN + 50) {
            tracker.record_detection(i as f64);
        }
        // Only the newest PERF_HISTORY_LEN samples contribute.
        let m = tracker.metrics();
        assert!(m.avg_detection_ms >= 50.0);
        assert_eq!(m.frame_count, (PERF_HISTORY_LEN + 50) as u64);
    }

    #[test]
    fn reset_clears_everything() {
        let mut tracker = PerfTracker::new();
        tracker.record_detection(10.0);
        tracker.record_cycle(33.0);
        tracker.reset();
        assert_eq!(tracker.metrics().frame_count, 0);
        assert_eq!(tracker.metrics().avg_cycle_ms, 0.0);
    }
}
