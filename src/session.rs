//! Session facade: one reference performance, one comparator, one live user.

use crate::{
    comparator::{StepResult, StreamingComparator},
    config::Config,
    frame::Frame,
    reference::ReferenceSequence,
    scoring::{ScoreTracker, Verdict},
    Error, Result,
};
use log::info;
use std::collections::BTreeSet;
use std::path::Path;

/// Everything the UI needs after feeding one frame
#[derive(Debug, Clone, PartialEq)]
pub struct SessionUpdate {
    pub score: f64,
    pub matched: bool,
    /// Set on matched steps only
    pub verdict: Option<Verdict>,
    /// Limbs to highlight; empty when the step was good
    pub deviated: BTreeSet<usize>,
    /// Reference performance has been fully consumed
    pub finished: bool,
}

/// Summary of a session so far
#[derive(Debug, Clone, PartialEq)]
pub struct SessionReport {
    pub matched_steps: usize,
    pub good_steps: usize,
    /// Rounded share of good steps, `None` before the first match
    pub percentage: Option<u8>,
    pub mean_score: Option<f64>,
    pub finished: bool,
}

/// Comparison session over one reference sequence
#[derive(Debug, Clone)]
pub struct Session {
    comparator: StreamingComparator,
    scoring: ScoreTracker,
}

impl Session {
    /// Open a session on a reference asset that must exist
    ///
    /// # Errors
    ///
    /// Returns `LoadError` if the asset cannot be loaded, or `ConfigError` if
    /// the comparator settings do not fit the reference
    pub fn open<P: AsRef<Path>>(reference_path: P, config: &Config) -> Result<Self> {
        let reference = ReferenceSequence::load(reference_path)?;
        Self::with_reference(reference, config)
    }

    /// Open a session on a bundled reference asset, tolerating its absence
    ///
    /// Without the asset the session buffers frames but never produces a match.
    ///
    /// # Errors
    ///
    /// Returns `LoadError` if the asset exists but is malformed, or
    /// `ConfigError` if the comparator settings do not fit the reference
    pub fn bundled<P: AsRef<Path>>(reference_path: P, config: &Config) -> Result<Self> {
        let reference = ReferenceSequence::load_or_empty(reference_path)?;
        if reference.is_empty() {
            return Self::without_reference(config);
        }
        Self::with_reference(reference, config)
    }

    /// Open a session as described by the configuration's reference section
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a required reference has no path, otherwise as
    /// [`Session::open`] or [`Session::bundled`]
    pub fn from_config(config: &Config) -> Result<Self> {
        match (&config.reference.path, config.reference.required) {
            (Some(path), true) => Self::open(path, config),
            (Some(path), false) => Self::bundled(path, config),
            (None, true) => Err(Error::ConfigError(
                "A reference path is required but none was configured".to_string(),
            )),
            (None, false) => Self::without_reference(config),
        }
    }

    /// Open a session on an already loaded reference sequence
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the comparator settings do not fit the reference
    pub fn with_reference(reference: ReferenceSequence, config: &Config) -> Result<Self> {
        let frames = reference.len();
        let comparator = StreamingComparator::new(reference, &config.comparison)?;
        info!(
            "Session ready: {} reference frames, windows {}/{}/{}",
            frames,
            config.comparison.waiting_window_length,
            config.comparison.coach_buffer_length,
            config.comparison.trailing_compare_count
        );
        Ok(Self {
            comparator,
            scoring: ScoreTracker::new(config.scoring.evaluation_threshold),
        })
    }

    fn without_reference(config: &Config) -> Result<Self> {
        log::warn!("Session has no reference frames and will never produce a match");
        Ok(Self {
            comparator: StreamingComparator::without_reference(&config.comparison)?,
            scoring: ScoreTracker::new(config.scoring.evaluation_threshold),
        })
    }

    /// Feed one frame straight to the comparator, without scoring
    pub fn receive_frame(&mut self, frame: &Frame) -> StepResult {
        self.comparator.receive_frame(frame)
    }

    /// Feed raw `[x, y]` pairs from the pose estimator
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the joint count is wrong
    pub fn receive_positions(&mut self, positions: &[[f64; 2]]) -> Result<StepResult> {
        let frame = Frame::from_positions(positions)?;
        Ok(self.receive_frame(&frame))
    }

    /// Limbs deviating at the most recent match
    #[must_use]
    pub fn deviated_limbs(&self) -> BTreeSet<usize> {
        self.comparator.deviated_limbs()
    }

    /// Feed one frame and evaluate the step
    pub fn process(&mut self, frame: &Frame) -> SessionUpdate {
        let step = self.comparator.receive_frame(frame);
        let mut deviated = self.comparator.deviated_limbs();

        let verdict = step.matched.then(|| self.scoring.record(step.score));
        if verdict == Some(Verdict::Good) {
            deviated.clear();
        }

        SessionUpdate {
            score: step.score,
            matched: step.matched,
            verdict,
            deviated,
            finished: self.comparator.is_exhausted(),
        }
    }

    /// Number of frames in the reference sequence
    #[must_use]
    pub fn reference_len(&self) -> usize {
        self.comparator.reference().len()
    }

    /// Share of the reference performance matched so far, in 0..=1
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn progress(&self) -> f64 {
        if self.is_finished() {
            return 1.0;
        }
        match self.reference_len() {
            0 => 0.0,
            len => self.comparator.coach_head_index().unwrap_or(0) as f64 / len as f64,
        }
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.comparator.is_exhausted()
    }

    #[must_use]
    pub fn report(&self) -> SessionReport {
        SessionReport {
            matched_steps: self.scoring.total_steps(),
            good_steps: self.scoring.good_steps(),
            percentage: self.scoring.percentage(),
            mean_score: self.scoring.mean_score(),
            finished: self.is_finished(),
        }
    }

    /// Start the same performance over
    pub fn reset(&mut self) {
        self.comparator.prepare();
        self.scoring.reset();
    }

    #[must_use]
    pub fn comparator(&self) -> &StreamingComparator {
        &self.comparator
    }
}
