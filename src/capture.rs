//! Camera/device lifecycle.
//!
//! A small state machine classifies device failures and owns the
//! retry-with-backoff policy; [`acquire_stream`] drives it against a real (or
//! test) [`CaptureDevice`]. Only a busy device is retried, on a fixed delay
//! and with a hard attempt cap. All other failures are terminal for the
//! session, and `Failed` is never left automatically: the caller starts a new
//! session instead.

use std::time::Duration;

use serde::Serialize;

use crate::config::CaptureRetryConfig;
use crate::error::DeviceError;

/// Classified terminal failure, with a distinct user-facing message per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FailureReason {
    DeviceBusy,
    PermissionDenied,
    DeviceNotFound,
    Generic,
}

impl FailureReason {
    pub fn classify(err: &DeviceError) -> Self {
        match err {
            DeviceError::Busy => FailureReason::DeviceBusy,
            DeviceError::PermissionDenied => FailureReason::PermissionDenied,
            DeviceError::NotFound => FailureReason::DeviceNotFound,
            DeviceError::Other(_) => FailureReason::Generic,
        }
    }

    pub fn user_message(self) -> &'static str {
        match self {
            FailureReason::DeviceBusy => {
                "The camera is in use. Close other apps (Zoom, Teams, ...) and try again."
            }
            FailureReason::PermissionDenied => {
                "Camera permission was denied. Allow camera access in your browser settings."
            }
            FailureReason::DeviceNotFound => {
                "No camera was found. Check that a camera is connected."
            }
            FailureReason::Generic => {
                "The camera could not be started. Refresh the page and try again."
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    Idle,
    Requesting,
    Streaming,
    Retrying { attempt: u32 },
    Failed(FailureReason),
}

/// What the driver must do next after a state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureCommand {
    RequestDevice,
    ScheduleRetry { attempt: u32, delay_ms: u64 },
    ReleaseDevice,
}

/// The lifecycle state machine. Pure bookkeeping: the async driver (or a
/// test) performs the actual device calls and timers.
#[derive(Debug)]
pub struct CaptureController {
    state: CaptureState,
    config: CaptureRetryConfig,
    /// 1-based number of the acquisition attempt currently in flight.
    attempt: u32,
}

impl CaptureController {
    pub fn new(config: CaptureRetryConfig) -> Self {
        Self {
            state: CaptureState::Idle,
            config,
            attempt: 0,
        }
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    pub fn is_streaming(&self) -> bool {
        self.state == CaptureState::Streaming
    }

    /// Session start: request camera access. Ignored outside `Idle`.
    pub fn start(&mut self) -> Option<CaptureCommand> {
        if self.state != CaptureState::Idle {
            tracing::debug!(state = ?self.state, "capture start ignored");
            return None;
        }
        self.attempt = 1;
        self.transition(CaptureState::Requesting);
        Some(CaptureCommand::RequestDevice)
    }

    /// Device access granted: frames may flow.
    pub fn on_granted(&mut self) {
        if self.state == CaptureState::Requesting {
            self.transition(CaptureState::Streaming);
        }
    }

    /// Device access failed. Busy devices get a delayed retry until the
    /// attempt cap; everything else fails the session immediately.
    pub fn on_device_error(&mut self, err: &DeviceError) -> Option<CaptureCommand> {
        if self.state != CaptureState::Requesting {
            return None;
        }

        if err.is_transient() && self.attempt <= self.config.max_attempts {
            let retry = self.attempt;
            self.transition(CaptureState::Retrying { attempt: retry });
            return Some(CaptureCommand::ScheduleRetry {
                attempt: retry,
                delay_ms: self.config.retry_delay_ms,
            });
        }

        let reason = FailureReason::classify(err);
        tracing::warn!(error = %err, attempt = self.attempt, "capture failed");
        self.transition(CaptureState::Failed(reason));
        Some(CaptureCommand::ReleaseDevice)
    }

    /// Retry timer expired: re-request the device.
    pub fn on_retry_elapsed(&mut self) -> Option<CaptureCommand> {
        let CaptureState::Retrying { .. } = self.state else {
            return None;
        };
        self.attempt += 1;
        self.transition(CaptureState::Requesting);
        Some(CaptureCommand::RequestDevice)
    }

    /// Explicit session end. Reachable from every state so teardown always
    /// releases the device, and always lands in `Idle`.
    pub fn stop(&mut self) -> Option<CaptureCommand> {
        let was_idle = self.state == CaptureState::Idle;
        self.attempt = 0;
        self.transition(CaptureState::Idle);
        if was_idle {
            None
        } else {
            Some(CaptureCommand::ReleaseDevice)
        }
    }

    fn transition(&mut self, next: CaptureState) {
        if self.state != next {
            tracing::debug!(from = ?self.state, to = ?next, "capture state");
            self.state = next;
        }
    }
}

/// A camera stream the engine can acquire and release.
///
/// `release` must be idempotent and safe to call regardless of whether an
/// acquisition succeeded; teardown calls it on every path.
#[allow(async_fn_in_trait)]
pub trait CaptureDevice {
    async fn acquire(&mut self) -> Result<(), DeviceError>;
    fn release(&mut self);
}

/// Drive the controller to `Streaming` against a device, sleeping out the
/// retry delays. On terminal failure the device is released (via the
/// controller's `ReleaseDevice` command) and the classified reason is
/// returned for display.
pub async fn acquire_stream<D: CaptureDevice>(
    controller: &mut CaptureController,
    device: &mut D,
) -> Result<(), FailureReason> {
    let mut command = controller.start();

    while let Some(cmd) = command {
        match cmd {
            CaptureCommand::RequestDevice => match device.acquire().await {
                Ok(()) => {
                    controller.on_granted();
                    return Ok(());
                }
                Err(err) => command = controller.on_device_error(&err),
            },
            CaptureCommand::ScheduleRetry { delay_ms, .. } => {
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                command = controller.on_retry_elapsed();
            }
            CaptureCommand::ReleaseDevice => {
                device.release();
                command = None;
            }
        }
    }

    match controller.state() {
        CaptureState::Streaming => Ok(()),
        CaptureState::Failed(reason) => Err(reason),
        _ => Err(FailureReason::Generic),
    }
}
