//! Recorded reference performance ("coach" sequence).
//!
//! The asset is JSON holding a `[frames][joints][2]` nested array, either bare
//! or wrapped as `{"array": ...}`. Frames are shared read-only for the whole
//! session.

use crate::{constants::NUM_JOINTS, frame::Frame, Error, Result};
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;

/// Immutable sequence of reference frames
#[derive(Debug, Clone)]
pub struct ReferenceSequence {
    frames: Arc<[Frame]>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAsset {
    Wrapped { array: Vec<Vec<Vec<f64>>> },
    Bare(Vec<Vec<Vec<f64>>>),
}

impl RawAsset {
    fn into_frames(self) -> Vec<Vec<Vec<f64>>> {
        match self {
            RawAsset::Wrapped { array } | RawAsset::Bare(array) => array,
        }
    }
}

impl Default for ReferenceSequence {
    fn default() -> Self {
        Self::from_frames(Vec::new())
    }
}

impl ReferenceSequence {
    #[must_use]
    pub fn from_frames(frames: Vec<Frame>) -> Self {
        Self { frames: frames.into() }
    }

    /// Load a reference sequence that must exist
    ///
    /// # Errors
    ///
    /// Returns `LoadError` if the file is missing, unreadable or malformed
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::LoadError(format!(
                "Reference asset not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::LoadError(format!("Failed to read {}: {e}", path.display())))?;
        let sequence = Self::parse(&content)?;

        log::info!(
            "Loaded reference sequence with {} frames from {}",
            sequence.len(),
            path.display()
        );
        Ok(sequence)
    }

    /// Load a bundled reference sequence, using an empty one if the file is absent
    ///
    /// A comparator built on an empty sequence never leaves its filling phase.
    ///
    /// # Errors
    ///
    /// Returns `LoadError` if the file exists but cannot be read or parsed
    pub fn load_or_empty<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            log::warn!(
                "Bundled reference asset {} not found, using an empty reference",
                path.display()
            );
            Ok(Self::default())
        }
    }

    /// Parse a reference sequence from JSON text
    ///
    /// # Errors
    ///
    /// Returns `LoadError` if the text is not a `[frames][joints][2]` numeric array
    pub fn parse(content: &str) -> Result<Self> {
        let raw: RawAsset = serde_json::from_str(content).map_err(|e| {
            Error::LoadError(format!(
                "Expected a [frames][{NUM_JOINTS}][2] numeric array: {e}"
            ))
        })?;

        let frames = raw
            .into_frames()
            .iter()
            .enumerate()
            .map(|(index, joints)| parse_frame(index, joints))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::from_frames(frames))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    #[must_use]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Frame> {
        self.frames.iter()
    }
}

fn parse_frame(index: usize, joints: &[Vec<f64>]) -> Result<Frame> {
    if joints.len() != NUM_JOINTS {
        return Err(Error::LoadError(format!(
            "Frame {index}: expected {NUM_JOINTS} joints, got {}",
            joints.len()
        )));
    }

    let mut positions = [[0.0; 2]; NUM_JOINTS];
    for (joint, (position, coords)) in positions.iter_mut().zip(joints).enumerate() {
        match coords.as_slice() {
            &[x, y] if x.is_finite() && y.is_finite() => *position = [x, y],
            _ => {
                return Err(Error::LoadError(format!(
                    "Frame {index}, joint {joint}: expected two finite coordinates, got {coords:?}"
                )))
            }
        }
    }

    Frame::from_positions(&positions)
}

impl<'a> IntoIterator for &'a ReferenceSequence {
    type Item = &'a Frame;
    type IntoIter = std::slice::Iter<'a, Frame>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
