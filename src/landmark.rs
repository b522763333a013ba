//! Landmark types shared by the whole engine.
//!
//! The detector emits one [`LandmarkSet`] per video frame: 33 body joints in
//! a fixed order. Joints are addressed through [`PoseJoint`] only; raw
//! integer indexing is confined to this module.

use serde::{Deserialize, Serialize};

use crate::constants::EXPECTED_LANDMARK_COUNT;

/// One detected body joint for one frame, in normalized image coordinates
/// (0..1 per axis, larger `y` is lower on screen).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
    /// Detection confidence in [0, 1]. Absent means the detector did not
    /// report confidence and the joint is treated as fully visible.
    #[serde(default)]
    pub visibility: Option<f64>,
}

impl Landmark {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            z: 0.0,
            visibility: None,
        }
    }

    pub fn with_visibility(x: f64, y: f64, visibility: f64) -> Self {
        Self {
            x,
            y,
            z: 0.0,
            visibility: Some(visibility),
        }
    }

    /// Whether the joint counts as visible under `threshold`.
    /// Missing visibility is treated as fully visible.
    pub fn is_visible(&self, threshold: f64) -> bool {
        self.visibility.map_or(true, |v| v > threshold)
    }

    pub fn distance(&self, other: &Landmark) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Joint names of the 33-point pose model, in detector order.
///
/// The discriminants are the detector's fixed indices and must never be
/// reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum PoseJoint {
    Nose = 0,
    LeftEyeInner = 1,
    LeftEye = 2,
    LeftEyeOuter = 3,
    RightEyeInner = 4,
    RightEye = 5,
    RightEyeOuter = 6,
    LeftEar = 7,
    RightEar = 8,
    MouthLeft = 9,
    MouthRight = 10,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftPinky = 17,
    RightPinky = 18,
    LeftIndex = 19,
    RightIndex = 20,
    LeftThumb = 21,
    RightThumb = 22,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
    LeftHeel = 29,
    RightHeel = 30,
    LeftFootIndex = 31,
    RightFootIndex = 32,
}

impl PoseJoint {
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Joints that must all be visible before any frame is scored: a partial-body
/// comparison is meaningless for a whole-body balance exercise.
pub const KEY_JOINTS: [PoseJoint; 8] = [
    PoseJoint::LeftShoulder,
    PoseJoint::RightShoulder,
    PoseJoint::LeftHip,
    PoseJoint::RightHip,
    PoseJoint::LeftKnee,
    PoseJoint::RightKnee,
    PoseJoint::LeftAnkle,
    PoseJoint::RightAnkle,
];

/// One detected pose: the ordered, fixed-length joint list for one frame.
///
/// A well-formed set has [`EXPECTED_LANDMARK_COUNT`] entries. Shorter sets
/// can arrive from a degraded detector and are tolerated everywhere: a
/// missing joint reads as `None` and counts as not visible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LandmarkSet(pub Vec<Landmark>);

impl LandmarkSet {
    pub fn new(landmarks: Vec<Landmark>) -> Self {
        Self(landmarks)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.0.len() == EXPECTED_LANDMARK_COUNT
    }

    pub fn get(&self, joint: PoseJoint) -> Option<&Landmark> {
        self.0.get(joint.index())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Landmark> {
        self.0.iter()
    }

    /// Midpoint of two joints, `None` if either is missing.
    pub fn midpoint(&self, a: PoseJoint, b: PoseJoint) -> Option<(f64, f64)> {
        let a = self.get(a)?;
        let b = self.get(b)?;
        Some(((a.x + b.x) / 2.0, (a.y + b.y) / 2.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_visibility_counts_as_visible() {
        let lm = Landmark::new(0.5, 0.5);
        assert!(lm.is_visible(0.5));
        let lm = Landmark::with_visibility(0.5, 0.5, 0.5);
        assert!(!lm.is_visible(0.5));
        let lm = Landmark::with_visibility(0.5, 0.5, 0.51);
        assert!(lm.is_visible(0.5));
    }

    #[test]
    fn short_set_reads_missing_joints_as_none() {
        let set = LandmarkSet::new(vec![Landmark::new(0.5, 0.2); 20]);
        assert!(!set.is_complete());
        assert!(set.get(PoseJoint::Nose).is_some());
        assert!(set.get(PoseJoint::LeftHip).is_none());
        assert!(set.midpoint(PoseJoint::LeftHip, PoseJoint::RightHip).is_none());
    }

    #[test]
    fn joint_indices_match_detector_order() {
        assert_eq!(PoseJoint::Nose.index(), 0);
        assert_eq!(PoseJoint::LeftShoulder.index(), 11);
        assert_eq!(PoseJoint::RightShoulder.index(), 12);
        assert_eq!(PoseJoint::LeftWrist.index(), 15);
        assert_eq!(PoseJoint::RightWrist.index(), 16);
        assert_eq!(PoseJoint::LeftHip.index(), 23);
        assert_eq!(PoseJoint::RightHip.index(), 24);
        assert_eq!(PoseJoint::RightFootIndex.index(), 32);
    }
}
