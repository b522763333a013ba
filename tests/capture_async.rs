use std::collections::VecDeque;
use std::time::Duration;

use tokio::time::Instant;

use pose_coach::capture::{CaptureState, FailureReason};
use pose_coach::pose::ReferencePose;
use pose_coach::{CaptureDevice, CoachConfig, CoachSession, DeviceError};

/// Scripted camera: pops one result per acquisition attempt.
struct ScriptedDevice {
    script: VecDeque<Result<(), DeviceError>>,
    acquire_calls: u32,
    released: bool,
}

impl ScriptedDevice {
    fn new(script: Vec<Result<(), DeviceError>>) -> Self {
        Self {
            script: script.into(),
            acquire_calls: 0,
            released: false,
        }
    }
}

impl CaptureDevice for ScriptedDevice {
    async fn acquire(&mut self) -> Result<(), DeviceError> {
        self.acquire_calls += 1;
        self.script.pop_front().unwrap_or(Ok(()))
    }

    fn release(&mut self) {
        self.released = true;
    }
}

fn session() -> CoachSession {
    CoachSession::new(
        ReferencePose::bundled().clone(),
        CoachConfig::default(),
        0.0,
    )
    .expect("default config is valid")
}

#[tokio::test(start_paused = true)]
async fn it_busy_device_is_retried_then_streams() {
    let mut session = session();
    let mut device = ScriptedDevice::new(vec![
        Err(DeviceError::Busy),
        Err(DeviceError::Busy),
        Ok(()),
    ]);

    let started = Instant::now();
    session
        .acquire_stream(&mut device)
        .await
        .expect("third attempt succeeds");

    assert_eq!(device.acquire_calls, 3);
    assert_eq!(session.capture_state(), CaptureState::Streaming);
    // Two retries, one second apart each.
    assert_eq!(started.elapsed(), Duration::from_millis(2000));
}

#[tokio::test(start_paused = true)]
async fn it_busy_device_exhausts_attempts_then_fails() {
    let mut session = session();
    let mut device = ScriptedDevice::new(vec![Err(DeviceError::Busy); 10]);

    let reason = session
        .acquire_stream(&mut device)
        .await
        .expect_err("device never frees up");

    assert_eq!(reason, FailureReason::DeviceBusy);
    // Initial request plus exactly three retries.
    assert_eq!(device.acquire_calls, 4);
    assert!(device.released, "device must be released on failure");
    assert_eq!(
        session.capture_state(),
        CaptureState::Failed(FailureReason::DeviceBusy)
    );
}

#[tokio::test(start_paused = true)]
async fn it_permission_denied_fails_on_first_attempt() {
    let mut session = session();
    let mut device = ScriptedDevice::new(vec![Err(DeviceError::PermissionDenied)]);

    let started = Instant::now();
    let reason = session.acquire_stream(&mut device).await.unwrap_err();

    assert_eq!(reason, FailureReason::PermissionDenied);
    assert_eq!(device.acquire_calls, 1);
    assert!(device.released);
    // No retry delay was slept.
    assert_eq!(started.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn it_not_found_maps_to_its_own_reason() {
    let mut session = session();
    let mut device = ScriptedDevice::new(vec![Err(DeviceError::NotFound)]);

    let reason = session.acquire_stream(&mut device).await.unwrap_err();
    assert_eq!(reason, FailureReason::DeviceNotFound);
    assert_ne!(
        FailureReason::DeviceNotFound.user_message(),
        FailureReason::Generic.user_message()
    );
}

#[tokio::test(start_paused = true)]
async fn it_shutdown_releases_device_after_streaming() {
    let mut session = session();
    let mut device = ScriptedDevice::new(vec![Ok(())]);

    session.acquire_stream(&mut device).await.unwrap();
    assert!(session.begin_frame(10.0).is_some());

    session.shutdown(&mut device, 20.0);
    assert!(device.released);
    assert_eq!(session.capture_state(), CaptureState::Idle);
    assert!(session.begin_frame(30.0).is_none());
}
