//! Plausibility checks for the single-leg-balance pose archetype.
//!
//! Cosine similarity against a static target scores deceptively high when the
//! torso matches but the limbs are in a qualitatively different state (both
//! feet on the ground, arms at the sides). These boolean checks catch that;
//! both the scorer and the advisor consult them.

use crate::config::ArchetypeConfig;
use crate::landmark::{LandmarkSet, PoseJoint};

/// Whether either leg qualifies as raised: its ankle sits notably above the
/// average ankle height, or its knee is splayed outward from the hip.
///
/// Missing leg landmarks never qualify.
pub fn leg_raised(landmarks: &LandmarkSet, cfg: &ArchetypeConfig) -> bool {
    let (Some(left_ankle), Some(right_ankle)) = (
        landmarks.get(PoseJoint::LeftAnkle),
        landmarks.get(PoseJoint::RightAnkle),
    ) else {
        return false;
    };
    let avg_ankle_y = (left_ankle.y + right_ankle.y) / 2.0;

    let left = avg_ankle_y - left_ankle.y > cfg.ankle_lift_threshold
        || knee_splayed(landmarks, PoseJoint::LeftKnee, PoseJoint::LeftHip, cfg);
    let right = avg_ankle_y - right_ankle.y > cfg.ankle_lift_threshold
        || knee_splayed(landmarks, PoseJoint::RightKnee, PoseJoint::RightHip, cfg);

    left || right
}

fn knee_splayed(
    landmarks: &LandmarkSet,
    knee: PoseJoint,
    hip: PoseJoint,
    cfg: &ArchetypeConfig,
) -> bool {
    match (landmarks.get(knee), landmarks.get(hip)) {
        (Some(knee), Some(hip)) => (knee.x - hip.x).abs() > cfg.knee_splay_threshold,
        _ => false,
    }
}

/// Whether both wrists sit above the nose (smaller y is higher on screen).
/// Missing wrists or nose read as arms not raised.
pub fn arms_overhead(landmarks: &LandmarkSet) -> bool {
    let (Some(nose), Some(left_wrist), Some(right_wrist)) = (
        landmarks.get(PoseJoint::Nose),
        landmarks.get(PoseJoint::LeftWrist),
        landmarks.get(PoseJoint::RightWrist),
    ) else {
        return false;
    };
    left_wrist.y < nose.y && right_wrist.y < nose.y
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::EXPECTED_LANDMARK_COUNT;
    use crate::landmark::Landmark;

    fn base_set() -> Vec<Landmark> {
        vec![Landmark::new(0.5, 0.5); EXPECTED_LANDMARK_COUNT]
    }

    fn place(lms: &mut [Landmark], joint: PoseJoint, x: f64, y: f64) {
        lms[joint.index()] = Landmark::new(x, y);
    }

    #[test]
    fn lifted_ankle_counts_as_raised_leg() {
        let mut lms = base_set();
        place(&mut lms, PoseJoint::LeftAnkle, 0.44, 0.80);
        place(&mut lms, PoseJoint::RightAnkle, 0.56, 0.62);
        assert!(leg_raised(&LandmarkSet::new(lms), &ArchetypeConfig::default()));
    }

    #[test]
    fn splayed_knee_counts_as_raised_leg() {
        let mut lms = base_set();
        // Ankles level, but the right knee is pushed far out from the hip.
        place(&mut lms, PoseJoint::LeftAnkle, 0.44, 0.80);
        place(&mut lms, PoseJoint::RightAnkle, 0.56, 0.80);
        place(&mut lms, PoseJoint::RightHip, 0.56, 0.52);
        place(&mut lms, PoseJoint::RightKnee, 0.70, 0.60);
        assert!(leg_raised(&LandmarkSet::new(lms), &ArchetypeConfig::default()));
    }

    #[test]
    fn level_ankles_and_straight_knees_do_not_qualify() {
        let mut lms = base_set();
        place(&mut lms, PoseJoint::LeftAnkle, 0.44, 0.80);
        place(&mut lms, PoseJoint::RightAnkle, 0.56, 0.80);
        place(&mut lms, PoseJoint::LeftHip, 0.44, 0.52);
        place(&mut lms, PoseJoint::RightHip, 0.56, 0.52);
        place(&mut lms, PoseJoint::LeftKnee, 0.44, 0.66);
        place(&mut lms, PoseJoint::RightKnee, 0.56, 0.66);
        assert!(!leg_raised(&LandmarkSet::new(lms), &ArchetypeConfig::default()));
    }

    #[test]
    fn missing_ankles_never_qualify() {
        let set = LandmarkSet::new(vec![Landmark::new(0.5, 0.5); 10]);
        assert!(!leg_raised(&set, &ArchetypeConfig::default()));
    }

    #[test]
    fn arms_overhead_requires_both_wrists_above_nose() {
        let mut lms = base_set();
        place(&mut lms, PoseJoint::Nose, 0.50, 0.20);
        place(&mut lms, PoseJoint::LeftWrist, 0.46, 0.10);
        place(&mut lms, PoseJoint::RightWrist, 0.54, 0.10);
        assert!(arms_overhead(&LandmarkSet::new(lms.clone())));

        place(&mut lms, PoseJoint::RightWrist, 0.54, 0.30);
        assert!(!arms_overhead(&LandmarkSet::new(lms)));
    }
}
