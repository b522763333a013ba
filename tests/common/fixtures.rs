use pose_coach::landmark::{Landmark, LandmarkSet, PoseJoint};
use pose_coach::pose::ReferencePose;

/// The bundled tree-pose reference: one leg raised, arms overhead, every
/// joint fully visible.
pub fn tree_pose() -> LandmarkSet {
    ReferencePose::bundled().landmarks().clone()
}

/// Both feet on the ground, knees straight, arms at the sides. Fails both
/// archetype checks while keeping the torso identical to the tree pose.
pub fn standing_pose() -> LandmarkSet {
    let mut pose = tree_pose();
    set_joint(&mut pose, PoseJoint::LeftWrist, 0.40, 0.45);
    set_joint(&mut pose, PoseJoint::RightWrist, 0.60, 0.45);
    set_joint(&mut pose, PoseJoint::LeftElbow, 0.41, 0.38);
    set_joint(&mut pose, PoseJoint::RightElbow, 0.59, 0.38);
    set_joint(&mut pose, PoseJoint::RightKnee, 0.56, 0.66);
    set_joint(&mut pose, PoseJoint::LeftAnkle, 0.44, 0.80);
    set_joint(&mut pose, PoseJoint::RightAnkle, 0.56, 0.80);
    set_joint(&mut pose, PoseJoint::RightHeel, 0.57, 0.82);
    set_joint(&mut pose, PoseJoint::RightFootIndex, 0.55, 0.84);
    pose
}

pub fn set_joint(pose: &mut LandmarkSet, joint: PoseJoint, x: f64, y: f64) {
    let visibility = pose.0[joint.index()].visibility;
    pose.0[joint.index()] = Landmark {
        x,
        y,
        z: 0.0,
        visibility,
    };
}

pub fn set_visibility(pose: &mut LandmarkSet, joint: PoseJoint, visibility: f64) {
    pose.0[joint.index()].visibility = Some(visibility);
}

/// Drop every landmark from the ankles down, as a degraded detector would.
pub fn without_ankles(pose: &LandmarkSet) -> LandmarkSet {
    LandmarkSet::new(pose.0[..PoseJoint::LeftAnkle.index()].to_vec())
}
