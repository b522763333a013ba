//! Per-frame similarity scoring.
//!
//! Base directional similarity between the normalized target and current
//! vectors, behind a hard full-body visibility gate and the archetype's
//! plausibility penalties. Never errors; every degenerate input maps to a
//! numeric fallback.

use crate::config::CoachConfig;
use crate::landmark::{LandmarkSet, KEY_JOINTS};
use crate::pose::heuristics;

/// Cosine similarity of two vectors truncated to the shorter length.
/// A zero norm (or an empty vector) yields 0.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let len = a.len().min(b.len());
    if len == 0 {
        return 0.0;
    }

    let mut dot = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;
    for i in 0..len {
        dot += a[i] * b[i];
        norm_a += a[i] * a[i];
        norm_b += b[i] * b[i];
    }

    if norm_a <= 0.0 || norm_b <= 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// Whether every key joint (shoulders, hips, knees, ankles) is present and
/// visible above `threshold`. Absent visibility counts as visible; an absent
/// joint does not.
pub fn full_body_visible(landmarks: &LandmarkSet, threshold: f64) -> bool {
    KEY_JOINTS
        .iter()
        .all(|&joint| landmarks.get(joint).is_some_and(|lm| lm.is_visible(threshold)))
}

/// Score one frame against the target, in [0, 1].
///
/// The visibility gate is a hard zero, not a penalty: a partial-body frame
/// carries no information about the pose. Once the gate passes, the
/// archetype penalties compose multiplicatively on the clamped cosine value.
/// Penalties depend on `current` only, so the overall scorer is not
/// symmetric even though the base cosine is.
pub fn score_frame(
    target: &[f64],
    current: &[f64],
    raw_current: &LandmarkSet,
    cfg: &CoachConfig,
) -> f64 {
    if !full_body_visible(raw_current, cfg.visibility_threshold) {
        return 0.0;
    }

    let mut similarity = cosine_similarity(target, current).max(0.0);

    if !heuristics::leg_raised(raw_current, &cfg.archetype) {
        similarity *= cfg.archetype.grounded_legs_penalty;
    }
    if !heuristics::arms_overhead(raw_current) {
        similarity *= cfg.archetype.lowered_arms_penalty;
    }

    similarity
}
