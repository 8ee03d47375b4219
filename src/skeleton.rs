//! Limb vectors compared by the similarity metric and drawn by the overlay.

use crate::{constants::NUM_LIMBS, joint::Joint};

/// Directed segment between two joints of one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limb {
    /// Start joint
    pub from: Joint,
    /// End joint
    pub to: Joint,
}

impl Limb {
    #[must_use]
    pub const fn new(from: Joint, to: Joint) -> Self {
        Self { from, to }
    }
}

/// The fixed limb table; a limb's position here is its index in deviation sets
pub const LIMBS: [Limb; NUM_LIMBS] = [
    Limb::new(Joint::LeftWrist, Joint::LeftElbow),
    Limb::new(Joint::LeftElbow, Joint::LeftShoulder),
    Limb::new(Joint::LeftShoulder, Joint::RightShoulder),
    Limb::new(Joint::RightShoulder, Joint::RightElbow),
    Limb::new(Joint::RightElbow, Joint::RightWrist),
    Limb::new(Joint::LeftShoulder, Joint::LeftHip),
    Limb::new(Joint::LeftHip, Joint::RightHip),
    Limb::new(Joint::RightHip, Joint::RightShoulder),
    Limb::new(Joint::LeftHip, Joint::LeftKnee),
    Limb::new(Joint::LeftKnee, Joint::LeftAnkle),
    Limb::new(Joint::RightHip, Joint::RightKnee),
    Limb::new(Joint::RightKnee, Joint::RightAnkle),
];
