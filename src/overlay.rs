//! Drawing data for the live skeleton overlay.
//!
//! Rendering belongs to the UI layer. This module only turns estimator output
//! and the current deviation set into dots and lines the UI can draw, flagging
//! the lines of deviated limbs.

use crate::{
    constants::NUM_JOINTS,
    frame::Frame,
    joint::Joint,
    skeleton::{Limb, LIMBS},
    Error, Result,
};
use nalgebra::Vector2;
use std::collections::BTreeSet;

/// One landmark reported by the pose estimator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keypoint {
    pub joint: Joint,
    pub position: Vector2<f64>,
    /// Estimator confidence in 0..=1
    pub score: f64,
}

/// Full estimator output for one camera frame
#[derive(Debug, Clone, PartialEq)]
pub struct PoseEstimate {
    pub keypoints: Vec<Keypoint>,
}

impl PoseEstimate {
    /// Build an estimate from `(x, y, confidence)` triples in joint order
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if there are more triples than joints
    pub fn from_triples(triples: &[[f64; 3]]) -> Result<Self> {
        let keypoints = triples
            .iter()
            .enumerate()
            .map(|(index, &[x, y, score])| -> Result<Keypoint> {
                Ok(Keypoint {
                    joint: Joint::try_from(index)?,
                    position: Vector2::new(x, y),
                    score,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { keypoints })
    }

    /// Mean keypoint confidence
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn score(&self) -> f64 {
        if self.keypoints.is_empty() {
            return 0.0;
        }
        self.keypoints.iter().map(|k| k.score).sum::<f64>() / self.keypoints.len() as f64
    }

    /// Drop confidences and keep the coordinates for comparison
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` unless every joint is present exactly once
    pub fn to_frame(&self) -> Result<Frame> {
        if self.keypoints.len() != NUM_JOINTS {
            return Err(Error::InvalidInput(format!(
                "Expected {} keypoints, got {}",
                NUM_JOINTS,
                self.keypoints.len()
            )));
        }

        let mut positions = [[0.0; 2]; NUM_JOINTS];
        let mut seen = [false; NUM_JOINTS];
        for keypoint in &self.keypoints {
            let index = keypoint.joint.index();
            if seen[index] {
                return Err(Error::InvalidInput(format!("Duplicate keypoint for {}", keypoint.joint)));
            }
            seen[index] = true;
            positions[index] = [keypoint.position.x, keypoint.position.y];
        }
        Frame::from_positions(&positions)
    }

    fn position(&self, joint: Joint) -> Option<Vector2<f64>> {
        self.keypoints.iter().find(|k| k.joint == joint).map(|k| k.position)
    }
}

/// Segment to draw for one limb
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    /// Index into [`LIMBS`]
    pub limb: usize,
    pub from: Vector2<f64>,
    pub to: Vector2<f64>,
    pub deviated: bool,
}

/// Everything the overlay draws for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Strokes {
    /// Body joints only; face landmarks are not drawn
    pub dots: Vec<Vector2<f64>>,
    pub lines: Vec<Line>,
}

impl Strokes {
    /// Build strokes, or `None` if a limb endpoint is missing from the estimate
    #[must_use]
    pub fn build(estimate: &PoseEstimate, deviated: &BTreeSet<usize>) -> Option<Self> {
        let dots = estimate
            .keypoints
            .iter()
            .filter(|k| !k.joint.is_face())
            .map(|k| k.position)
            .collect();

        let lines = LIMBS
            .iter()
            .enumerate()
            .map(|(index, &Limb { from, to })| -> Option<Line> {
                Some(Line {
                    limb: index,
                    from: estimate.position(from)?,
                    to: estimate.position(to)?,
                    deviated: deviated.contains(&index),
                })
            })
            .collect::<Option<Vec<_>>>()?;

        Some(Self { dots, lines })
    }

    /// Lines to highlight
    pub fn deviated_lines(&self) -> impl Iterator<Item = &Line> {
        self.lines.iter().filter(|line| line.deviated)
    }
}

/// Whether the estimate is confident enough to draw a skeleton
#[must_use]
pub fn should_draw(estimate: &PoseEstimate, overlay_threshold: f64) -> bool {
    estimate.score() >= overlay_threshold
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{DEFAULT_OVERLAY_THRESHOLD, NUM_FACE_JOINTS, NUM_LIMBS};

    fn estimate(score: f64) -> PoseEstimate {
        let triples: Vec<[f64; 3]> = (0..NUM_JOINTS).map(|i| [i as f64, 1.0 + i as f64, score]).collect();
        PoseEstimate::from_triples(&triples).unwrap()
    }

    #[test]
    fn test_strokes_flag_deviated_limbs() {
        let strokes = Strokes::build(&estimate(0.9), &BTreeSet::from([2, 7])).unwrap();
        assert_eq!(strokes.dots.len(), NUM_JOINTS - NUM_FACE_JOINTS);
        assert_eq!(strokes.lines.len(), NUM_LIMBS);
        let flagged: Vec<usize> = strokes.deviated_lines().map(|l| l.limb).collect();
        assert_eq!(flagged, vec![2, 7]);
        // left shoulder (5) -> right shoulder (6)
        assert_eq!(strokes.lines[2].from, Vector2::new(5.0, 6.0));
        assert_eq!(strokes.lines[2].to, Vector2::new(6.0, 7.0));
    }

    #[test]
    fn test_missing_joint_yields_no_strokes() {
        let mut partial = estimate(0.9);
        partial.keypoints.retain(|k| k.joint != Joint::LeftKnee);
        assert!(Strokes::build(&partial, &BTreeSet::new()).is_none());
        assert!(partial.to_frame().is_err());
    }

    #[test]
    fn test_overlay_threshold() {
        assert!(should_draw(&estimate(0.5), DEFAULT_OVERLAY_THRESHOLD));
        assert!(!should_draw(&estimate(0.1), DEFAULT_OVERLAY_THRESHOLD));
    }

    #[test]
    fn test_to_frame_keeps_coordinates() {
        let frame = estimate(0.9).to_frame().unwrap();
        assert_eq!(frame.joint(Joint::RightAnkle), Vector2::new(16.0, 17.0));
    }

    #[test]
    fn test_too_many_triples() {
        let triples = vec![[0.0, 0.0, 1.0]; NUM_JOINTS + 1];
        assert!(PoseEstimate::from_triples(&triples).is_err());
    }
}
