/// Number of landmarks the pose model emits per detected body.
pub const EXPECTED_LANDMARK_COUNT: usize = 33;

/// Minimum hip-to-shoulder distance accepted as a normalization scale.
/// Below this the subject is too small or partially occluded and dividing
/// by the measured torso would blow the vector up.
pub const MIN_TORSO_SIZE: f64 = 0.01;

/// Scale used instead of the measured torso when it is degenerate.
pub const DEFAULT_SCALE: f64 = 1.0;

/// A key joint with visibility at or below this fails the full-body gate.
pub const VISIBILITY_THRESHOLD: f64 = 0.5;

/// Shortest score-emission window (milliseconds).
pub const SCORE_INTERVAL_MIN_MS: f64 = 1000.0;

/// Longest score-emission window (milliseconds).
pub const SCORE_INTERVAL_MAX_MS: f64 = 2000.0;

/// Frames that must accumulate before a score may be emitted, even if the
/// window time has elapsed. Roughly one second at 30 fps.
pub const MIN_SAMPLE_FLOOR: u32 = 30;

/// An ankle this far above the ankle-height average counts as a raised leg.
pub const ANKLE_LIFT_THRESHOLD: f64 = 0.05;

/// A knee this far outward of its hip (x axis) counts as a raised leg.
pub const KNEE_SPLAY_THRESHOLD: f64 = 0.1;

/// Similarity multiplier when neither leg qualifies as raised.
pub const GROUNDED_LEGS_PENALTY: f64 = 0.5;

/// Similarity multiplier when the wrists are not both above the nose.
pub const LOWERED_ARMS_PENALTY: f64 = 0.7;

/// Per-limb height difference against the target that triggers a
/// raise/lower correction from the advisor.
pub const LIMB_DELTA_THRESHOLD: f64 = 0.15;

/// Camera re-acquisition attempts after a busy device, before giving up.
pub const MAX_CAPTURE_ATTEMPTS: u32 = 3;

/// Delay between camera re-acquisition attempts (milliseconds).
pub const CAPTURE_RETRY_DELAY_MS: u64 = 1000;

/// Window average at or above this is graded `Perfect`.
pub const FEEDBACK_PERFECT: f64 = 0.95;

/// Window average at or above this is graded `Good`.
pub const FEEDBACK_GOOD: f64 = 0.85;

/// Samples kept in the performance tracker's rolling histories.
pub const PERF_HISTORY_LEN: usize = 100;

/// Average detection latency above this is logged as a warning.
pub const DETECTION_WARN_MS: f64 = 50.0;

/// Frame rate below this is logged as a warning.
pub const MIN_HEALTHY_FPS: f64 = 24.0;
