//! Coaching advice selection.
//!
//! Exactly one message per frame, picked by a fixed priority order so a child
//! is never shown several corrections at once. Advice reacts immediately to
//! the current frame; only the numeric score is smoothed.

use serde::Serialize;

use crate::config::CoachConfig;
use crate::landmark::{LandmarkSet, PoseJoint};
use crate::pose::heuristics;
use crate::pose::similarity::full_body_visible;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Limb {
    LeftArm,
    RightArm,
    LeftLeg,
    RightLeg,
}

/// The single correction (or affirmation) surfaced for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "limb", rename_all = "camelCase")]
pub enum Advice {
    StandInFrame,
    RaiseOneLeg,
    RaiseArms,
    Lift(Limb),
    Lower(Limb),
    Hold,
}

impl Advice {
    /// User-facing coaching text.
    pub fn message(&self) -> &'static str {
        match self {
            Advice::StandInFrame => "Step back so your whole body is in the frame.",
            Advice::RaiseOneLeg => "Lift one foot off the ground.",
            Advice::RaiseArms => "Raise your arms up above your head.",
            Advice::Lift(Limb::LeftArm) => "Lift your left arm a little higher.",
            Advice::Lift(Limb::RightArm) => "Lift your right arm a little higher.",
            Advice::Lift(Limb::LeftLeg) => "Lift your left foot a little higher.",
            Advice::Lift(Limb::RightLeg) => "Lift your right foot a little higher.",
            Advice::Lower(Limb::LeftArm) => "Bring your left arm down a little.",
            Advice::Lower(Limb::RightArm) => "Bring your right arm down a little.",
            Advice::Lower(Limb::LeftLeg) => "Bring your left foot down a little.",
            Advice::Lower(Limb::RightLeg) => "Bring your right foot down a little.",
            Advice::Hold => "Looks great, hold the pose!",
        }
    }
}

const LIMB_JOINTS: [(Limb, PoseJoint); 4] = [
    (Limb::LeftArm, PoseJoint::LeftWrist),
    (Limb::RightArm, PoseJoint::RightWrist),
    (Limb::LeftLeg, PoseJoint::LeftAnkle),
    (Limb::RightLeg, PoseJoint::RightAnkle),
];

/// Pick the most actionable correction for the current frame.
///
/// Priority: whole body visible, then the qualitative archetype checks (one
/// leg raised, arms overhead), then per-limb height corrections against the
/// target, then the affirmation. A positive height difference means the
/// current limb is lower on screen than the target's (larger y is lower).
pub fn advise(current: &LandmarkSet, target: &LandmarkSet, cfg: &CoachConfig) -> Advice {
    if !full_body_visible(current, cfg.visibility_threshold) {
        return Advice::StandInFrame;
    }
    if !heuristics::leg_raised(current, &cfg.archetype) {
        return Advice::RaiseOneLeg;
    }
    if !heuristics::arms_overhead(current) {
        return Advice::RaiseArms;
    }

    for (limb, joint) in LIMB_JOINTS {
        let (Some(cur), Some(tgt)) = (current.get(joint), target.get(joint)) else {
            continue;
        };
        let delta = cur.y - tgt.y;
        if delta > cfg.archetype.limb_delta_threshold {
            return Advice::Lift(limb);
        }
        if delta < -cfg.archetype.limb_delta_threshold {
            return Advice::Lower(limb);
        }
    }

    Advice::Hold
}
