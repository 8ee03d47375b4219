//! Body landmark enumeration shared by the pose estimator, reference assets and the metric.
//!
//! The ordinal of each variant is the index of that landmark in every coordinate
//! list, so the order here must match the estimator output and the recorded
//! reference sequences.

use crate::{constants::NUM_JOINTS, Error, Result};
use std::fmt;

/// Body landmark, in estimator output order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(usize)]
pub enum Joint {
    Nose = 0,
    LeftEye,
    RightEye,
    LeftEar,
    RightEar,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
}

impl Joint {
    /// All joints in index order
    pub const ALL: [Joint; NUM_JOINTS] = [
        Joint::Nose,
        Joint::LeftEye,
        Joint::RightEye,
        Joint::LeftEar,
        Joint::RightEar,
        Joint::LeftShoulder,
        Joint::RightShoulder,
        Joint::LeftElbow,
        Joint::RightElbow,
        Joint::LeftWrist,
        Joint::RightWrist,
        Joint::LeftHip,
        Joint::RightHip,
        Joint::LeftKnee,
        Joint::RightKnee,
        Joint::LeftAnkle,
        Joint::RightAnkle,
    ];

    /// Position of this joint in a coordinate list
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Human readable landmark name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Joint::Nose => "nose",
            Joint::LeftEye => "left eye",
            Joint::RightEye => "right eye",
            Joint::LeftEar => "left ear",
            Joint::RightEar => "right ear",
            Joint::LeftShoulder => "left shoulder",
            Joint::RightShoulder => "right shoulder",
            Joint::LeftElbow => "left elbow",
            Joint::RightElbow => "right elbow",
            Joint::LeftWrist => "left wrist",
            Joint::RightWrist => "right wrist",
            Joint::LeftHip => "left hip",
            Joint::RightHip => "right hip",
            Joint::LeftKnee => "left knee",
            Joint::RightKnee => "right knee",
            Joint::LeftAnkle => "left ankle",
            Joint::RightAnkle => "right ankle",
        }
    }

    /// Whether this is one of the face landmarks (nose, eyes, ears)
    #[must_use]
    pub const fn is_face(self) -> bool {
        (self as usize) < crate::constants::NUM_FACE_JOINTS
    }
}

impl TryFrom<usize> for Joint {
    type Error = Error;

    fn try_from(index: usize) -> Result<Self> {
        Joint::ALL
            .get(index)
            .copied()
            .ok_or_else(|| Error::InvalidInput(format!("Joint index {index} out of range (0..{NUM_JOINTS})")))
    }
}

impl fmt::Display for Joint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
