//! One time sample of a body pose: a 2-D point for every joint.

use crate::{constants::NUM_JOINTS, joint::Joint, skeleton::Limb, Error, Result};
use nalgebra::Vector2;

/// Joint coordinates of a single pose, indexed by [`Joint`]
///
/// The joint count is part of the type, so a frame with the wrong number of
/// joints cannot reach the comparator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    points: [Vector2<f64>; NUM_JOINTS],
}

impl Frame {
    #[must_use]
    pub const fn new(points: [Vector2<f64>; NUM_JOINTS]) -> Self {
        Self { points }
    }

    /// Build a frame from raw `[x, y]` pairs in joint order
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the number of pairs is not exactly [`NUM_JOINTS`]
    pub fn from_positions(positions: &[[f64; 2]]) -> Result<Self> {
        if positions.len() != NUM_JOINTS {
            return Err(Error::InvalidInput(format!(
                "Expected {} joints, got {}",
                NUM_JOINTS,
                positions.len()
            )));
        }

        let mut points = [Vector2::zeros(); NUM_JOINTS];
        for (point, &[x, y]) in points.iter_mut().zip(positions) {
            *point = Vector2::new(x, y);
        }
        Ok(Self { points })
    }

    /// Coordinates of one joint
    #[must_use]
    pub fn joint(&self, joint: Joint) -> Vector2<f64> {
        self.points[joint.index()]
    }

    /// Displacement from the limb's start joint to its end joint
    #[must_use]
    pub fn limb_vector(&self, limb: &Limb) -> Vector2<f64> {
        self.joint(limb.to) - self.joint(limb.from)
    }

    #[must_use]
    pub fn points(&self) -> &[Vector2<f64>; NUM_JOINTS] {
        &self.points
    }

    /// Raw `[x, y]` pairs in joint order
    #[must_use]
    pub fn to_positions(&self) -> Vec<[f64; 2]> {
        self.points.iter().map(|p| [p.x, p.y]).collect()
    }
}
