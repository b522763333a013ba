use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Full engine configuration. All values have sensible defaults; hosts
/// usually only override the archetype block when swapping the target pose.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoachConfig {
    pub window: ScoreWindowConfig,
    pub archetype: ArchetypeConfig,
    pub capture: CaptureRetryConfig,
    /// Key joints with visibility at or below this fail the full-body gate.
    #[serde(default = "default_visibility_threshold")]
    pub visibility_threshold: f64,
}

fn default_visibility_threshold() -> f64 {
    VISIBILITY_THRESHOLD
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreWindowConfig {
    pub min_interval_ms: f64,
    pub max_interval_ms: f64,
    pub min_sample_floor: u32,
}

/// Plausibility thresholds for the single-leg-balance pose archetype.
///
/// These were tuned against one specific reference pose and are carried on
/// the config, not hard-wired: a different target pose needs its own values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchetypeConfig {
    pub ankle_lift_threshold: f64,
    pub knee_splay_threshold: f64,
    pub limb_delta_threshold: f64,
    pub grounded_legs_penalty: f64,
    pub lowered_arms_penalty: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureRetryConfig {
    pub max_attempts: u32,
    pub retry_delay_ms: u64,
}

impl Default for CoachConfig {
    fn default() -> Self {
        Self {
            window: ScoreWindowConfig::default(),
            archetype: ArchetypeConfig::default(),
            capture: CaptureRetryConfig::default(),
            visibility_threshold: VISIBILITY_THRESHOLD,
        }
    }
}

impl Default for ScoreWindowConfig {
    fn default() -> Self {
        Self {
            min_interval_ms: SCORE_INTERVAL_MIN_MS,
            max_interval_ms: SCORE_INTERVAL_MAX_MS,
            min_sample_floor: MIN_SAMPLE_FLOOR,
        }
    }
}

impl Default for ArchetypeConfig {
    fn default() -> Self {
        Self {
            ankle_lift_threshold: ANKLE_LIFT_THRESHOLD,
            knee_splay_threshold: KNEE_SPLAY_THRESHOLD,
            limb_delta_threshold: LIMB_DELTA_THRESHOLD,
            grounded_legs_penalty: GROUNDED_LEGS_PENALTY,
            lowered_arms_penalty: LOWERED_ARMS_PENALTY,
        }
    }
}

impl Default for CaptureRetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: MAX_CAPTURE_ATTEMPTS,
            retry_delay_ms: CAPTURE_RETRY_DELAY_MS,
        }
    }
}

impl CoachConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.window.min_interval_ms <= 0.0 {
            return Err("window.minIntervalMs must be positive".to_string());
        }
        if self.window.max_interval_ms < self.window.min_interval_ms {
            return Err("window.maxIntervalMs must be >= minIntervalMs".to_string());
        }
        if self.window.min_sample_floor == 0 {
            return Err("window.minSampleFloor must be at least 1".to_string());
        }
        if !(0.0..1.0).contains(&self.visibility_threshold) {
            return Err("visibilityThreshold must be in [0, 1)".to_string());
        }
        if self.archetype.ankle_lift_threshold <= 0.0
            || self.archetype.knee_splay_threshold <= 0.0
            || self.archetype.limb_delta_threshold <= 0.0
        {
            return Err("archetype thresholds must be positive".to_string());
        }
        if !(0.0..=1.0).contains(&self.archetype.grounded_legs_penalty)
            || self.archetype.grounded_legs_penalty == 0.0
        {
            return Err("archetype.groundedLegsPenalty must be in (0, 1]".to_string());
        }
        if !(0.0..=1.0).contains(&self.archetype.lowered_arms_penalty)
            || self.archetype.lowered_arms_penalty == 0.0
        {
            return Err("archetype.loweredArmsPenalty must be in (0, 1]".to_string());
        }
        if self.capture.max_attempts == 0 {
            return Err("capture.maxAttempts must be at least 1".to_string());
        }
        Ok(())
    }
}
