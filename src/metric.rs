//! Pose similarity metric based on limb orientation.
//!
//! Two frames are compared limb by limb: for every entry of [`LIMBS`] the
//! cosine distance between the two limb vectors is squared, and the frame
//! distance is the mean over all limbs. 0 means identical limb orientation.
//!
//! A zero-length limb vector (two coincident joints) has no orientation. Its
//! cosine distance evaluates to `NaN` (0 / 0) and that `NaN` is propagated into
//! the frame distance rather than replaced, so callers can see the frame was
//! degenerate. `NaN` is never reported as a deviation.

use crate::{
    constants::NUM_LIMBS,
    frame::Frame,
    skeleton::LIMBS,
};
use nalgebra::Vector2;
use std::collections::BTreeSet;

/// Cosine distance `1 - cos(angle)` between two vectors, in `[0, 2]`
///
/// Returns `NaN` when either vector has zero length.
#[must_use]
pub fn cosine_distance(a: &Vector2<f64>, b: &Vector2<f64>) -> f64 {
    1.0 - a.dot(b) / (a.norm() * b.norm())
}

/// Squared cosine distance of every limb, in [`LIMBS`] order
#[must_use]
pub fn limb_distances(a: &Frame, b: &Frame) -> [f64; NUM_LIMBS] {
    let mut distances = [0.0; NUM_LIMBS];
    for (distance, limb) in distances.iter_mut().zip(LIMBS.iter()) {
        *distance = cosine_distance(&a.limb_vector(limb), &b.limb_vector(limb)).powi(2);
    }
    distances
}

/// Mean squared limb cosine distance between two frames
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn frame_distance(a: &Frame, b: &Frame) -> f64 {
    limb_distances(a, b).iter().sum::<f64>() / NUM_LIMBS as f64
}

/// Indices of limbs whose distance exceeds `threshold`
#[must_use]
pub fn limbs_over_threshold(distances: &[f64; NUM_LIMBS], threshold: f64) -> BTreeSet<usize> {
    distances
        .iter()
        .enumerate()
        .filter(|(_, &d)| d > threshold)
        .map(|(i, _)| i)
        .collect()
}

/// Limbs of `user` whose orientation differs from `reference` by more than `threshold`
#[must_use]
pub fn deviated_limbs(reference: &Frame, user: &Frame, threshold: f64) -> BTreeSet<usize> {
    limbs_over_threshold(&limb_distances(reference, user), threshold)
}
