//! Target pose loading and validation.
//!
//! The reference pose is loaded once at session start and shared read-only by
//! the scorer and the advisor. A missing or malformed asset is a fatal
//! configuration error: the engine refuses to start rather than score against
//! partial data.

use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;

use crate::constants::EXPECTED_LANDMARK_COUNT;
use crate::error::ConfigError;
use crate::landmark::{Landmark, LandmarkSet};
use crate::pose::normalize::{normalize, PoseVector};

/// Tree-pose reference shipped with the crate: one leg raised against the
/// standing knee, arms overhead.
const TREE_POSE_JSON: &str = include_str!("../../assets/tree_pose.json");

static BUNDLED: Lazy<ReferencePose> = Lazy::new(|| {
    // Validated by tests; a broken bundled asset cannot ship.
    ReferencePose::from_json_str(TREE_POSE_JSON).expect("bundled tree pose asset is valid")
});

/// A validated target pose plus its precomputed normalized vector.
#[derive(Debug, Clone)]
pub struct ReferencePose {
    landmarks: LandmarkSet,
    vector: PoseVector,
}

impl ReferencePose {
    /// Validate a landmark set as a reference pose and precompute its vector.
    pub fn new(landmarks: LandmarkSet) -> Result<Self, ConfigError> {
        if landmarks.len() != EXPECTED_LANDMARK_COUNT {
            return Err(ConfigError::LandmarkCount {
                expected: EXPECTED_LANDMARK_COUNT,
                actual: landmarks.len(),
            });
        }
        let vector = normalize(&landmarks);
        Ok(Self { landmarks, vector })
    }

    /// Parse a reference pose from a JSON landmark array.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let landmarks: Vec<Landmark> = serde_json::from_str(json)?;
        Self::new(LandmarkSet::new(landmarks))
    }

    /// Load a reference pose from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// The tree-pose reference bundled with the crate.
    pub fn bundled() -> &'static ReferencePose {
        &BUNDLED
    }

    pub fn landmarks(&self) -> &LandmarkSet {
        &self.landmarks
    }

    pub fn vector(&self) -> &[f64] {
        &self.vector
    }
}
