//! Landmark normalization.
//!
//! Raw landmark coordinates depend on where the subject stands and how far
//! they are from the camera. Re-centering on the hip midpoint and dividing by
//! torso size yields a translation- and scale-invariant vector (not
//! rotation-invariant). Only projected 2D positions enter the vector; z and
//! visibility are dropped.

use crate::constants::{DEFAULT_SCALE, MIN_TORSO_SIZE};
use crate::landmark::{LandmarkSet, PoseJoint};

/// Flat `[x0, y0, x1, y1, ...]` vector, twice the joint count long.
pub type PoseVector = Vec<f64>;

/// Convert a landmark set into a position/scale-invariant vector.
///
/// Never fails: if either hip is missing the raw flattened coordinates are
/// returned unscaled, and a collapsed torso falls back to [`DEFAULT_SCALE`].
/// Callers must tolerate a non-normalized vector on degenerate input; a bad
/// frame must not interrupt the live loop.
pub fn normalize(landmarks: &LandmarkSet) -> PoseVector {
    let Some((hip_x, hip_y)) = landmarks.midpoint(PoseJoint::LeftHip, PoseJoint::RightHip) else {
        return landmarks.iter().flat_map(|lm| [lm.x, lm.y]).collect();
    };

    let scale = match landmarks.midpoint(PoseJoint::LeftShoulder, PoseJoint::RightShoulder) {
        Some((shoulder_x, shoulder_y)) => {
            let torso = ((hip_x - shoulder_x).powi(2) + (hip_y - shoulder_y).powi(2)).sqrt();
            if torso > MIN_TORSO_SIZE {
                torso
            } else {
                DEFAULT_SCALE
            }
        }
        None => DEFAULT_SCALE,
    };

    landmarks
        .iter()
        .flat_map(|lm| [(lm.x - hip_x) / scale, (lm.y - hip_y) / scale])
        .collect()
}
