//! Per-session engine object.
//!
//! One [`CoachSession`] owns every piece of mutable per-session state: the
//! aggregation window, the capture controller, the in-flight detection guard,
//! and the performance tracker. Two sessions never share state, and nothing
//! here is global.
//!
//! The host drives one frame like this:
//!
//! 1. `begin_frame(now)` returns a ticket, or `None` when a detection is
//!    already outstanding (the frame is dropped: bounded, lossy,
//!    latest-frame-wins backpressure) or the session is not streaming.
//! 2. Run the external detector.
//! 3. `complete_frame(ticket, result, now)` scores, advises, and aggregates.
//!    A ticket issued before the last `stop` is discarded on arrival, so a
//!    torn-down session never processes a late detection.

use serde::Serialize;

use crate::capture::{
    acquire_stream, CaptureCommand, CaptureController, CaptureDevice, CaptureState,
    FailureReason,
};
use crate::config::CoachConfig;
use crate::error::{ConfigError, DeviceError};
use crate::landmark::LandmarkSet;
use crate::perf::{PerfMetrics, PerfTracker};
use crate::pose::advisor::{advise, Advice};
use crate::pose::aggregator::{ScoreEvent, ScoreWindow};
use crate::pose::normalize::normalize;
use crate::pose::reference::ReferencePose;
use crate::pose::similarity::score_frame;

/// Everything the UI needs from one processed frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameUpdate {
    /// Penalized per-frame similarity in [0, 1].
    pub similarity: f64,
    pub advice: Advice,
    /// Present only on the frames where the aggregation window closes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<ScoreEvent>,
}

/// Proof that a detection slot was claimed for one frame. Single-use, and
/// only valid for the session epoch it was issued in.
#[derive(Debug)]
pub struct DetectionTicket {
    epoch: u64,
    started_ms: f64,
}

#[derive(Debug)]
pub struct CoachSession {
    config: CoachConfig,
    target: ReferencePose,
    window: ScoreWindow,
    capture: CaptureController,
    perf: PerfTracker,
    epoch: u64,
    in_flight: bool,
    dropped_frames: u64,
    last_frame_ms: Option<f64>,
}

impl CoachSession {
    /// Build a session for one target pose. Fails fast on invalid
    /// configuration; nothing past this point returns an error.
    pub fn new(
        target: ReferencePose,
        config: CoachConfig,
        now_ms: f64,
    ) -> Result<Self, ConfigError> {
        config.validate().map_err(ConfigError::Invalid)?;
        let window = ScoreWindow::new(config.window.clone(), now_ms);
        let capture = CaptureController::new(config.capture.clone());
        Ok(Self {
            config,
            target,
            window,
            capture,
            perf: PerfTracker::new(),
            epoch: 0,
            in_flight: false,
            dropped_frames: 0,
            last_frame_ms: None,
        })
    }

    pub fn capture_state(&self) -> CaptureState {
        self.capture.state()
    }

    pub fn target(&self) -> &ReferencePose {
        &self.target
    }

    /// Request camera access and sleep out busy-device retries until the
    /// stream is live or the failure is terminal.
    pub async fn acquire_stream<D: CaptureDevice>(
        &mut self,
        device: &mut D,
    ) -> Result<(), FailureReason> {
        acquire_stream(&mut self.capture, device).await
    }

    /// Lifecycle entry points for hosts that drive the controller manually
    /// (a browser host owns its own timers).
    pub fn start_capture(&mut self) -> Option<CaptureCommand> {
        self.capture.start()
    }

    pub fn on_capture_granted(&mut self) {
        self.capture.on_granted();
    }

    pub fn on_capture_error(&mut self, err: &DeviceError) -> Option<CaptureCommand> {
        self.capture.on_device_error(err)
    }

    pub fn on_retry_elapsed(&mut self) -> Option<CaptureCommand> {
        self.capture.on_retry_elapsed()
    }

    /// Claim the detection slot for a new frame.
    ///
    /// Returns `None` while a detection is outstanding (that frame is
    /// dropped and counted) or when the capture stream is not live.
    pub fn begin_frame(&mut self, now_ms: f64) -> Option<DetectionTicket> {
        if !self.capture.is_streaming() {
            return None;
        }
        if self.in_flight {
            self.dropped_frames += 1;
            tracing::trace!(dropped = self.dropped_frames, "frame dropped, detection in flight");
            return None;
        }
        self.in_flight = true;
        Some(DetectionTicket {
            epoch: self.epoch,
            started_ms: now_ms,
        })
    }

    /// Deliver the detection result for a claimed frame.
    ///
    /// `detection` is `None` when no body was found; that scores exactly
    /// like a failed visibility gate. A stale ticket (the session was
    /// stopped after it was issued) is discarded and yields `None`.
    pub fn complete_frame(
        &mut self,
        ticket: DetectionTicket,
        detection: Option<&LandmarkSet>,
        now_ms: f64,
    ) -> Option<FrameUpdate> {
        if ticket.epoch != self.epoch {
            tracing::debug!("stale detection result discarded");
            return None;
        }
        self.in_flight = false;

        self.perf.record_detection(now_ms - ticket.started_ms);
        if let Some(prev) = self.last_frame_ms {
            self.perf.record_cycle(now_ms - prev);
        }
        self.last_frame_ms = Some(now_ms);

        let (similarity, advice) = match detection {
            None => (0.0, Advice::StandInFrame),
            Some(landmarks) => {
                let current = normalize(landmarks);
                let similarity =
                    score_frame(self.target.vector(), &current, landmarks, &self.config);
                let advice = advise(landmarks, self.target.landmarks(), &self.config);
                (similarity, advice)
            }
        };

        let score = self.window.push(similarity, now_ms);
        Some(FrameUpdate {
            similarity,
            advice,
            score,
        })
    }

    /// Tear the session down: invalidate outstanding detection tickets,
    /// discard window state, and return the controller to `Idle`. The
    /// returned command tells the host whether a device is held.
    pub fn stop(&mut self, now_ms: f64) -> Option<CaptureCommand> {
        self.epoch += 1;
        self.in_flight = false;
        self.last_frame_ms = None;
        self.window.reset(now_ms);
        self.perf.log_summary();
        self.perf.reset();
        self.capture.stop()
    }

    /// Teardown that also releases the device, for hosts using
    /// [`CaptureDevice`]. Releases on every path, whatever state the
    /// controller is in.
    pub fn shutdown<D: CaptureDevice>(&mut self, device: &mut D, now_ms: f64) {
        self.stop(now_ms);
        device.release();
    }

    /// Frames dropped by the single-in-flight backpressure policy.
    pub fn dropped_frames(&self) -> u64 {
        self.dropped_frames
    }

    pub fn perf_metrics(&self) -> PerfMetrics {
        self.perf.metrics()
    }
}
