//! Streaming alignment of a live pose stream against a reference sequence.
//!
//! The comparator keeps two sliding windows: the most recent unmatched user
//! frames (the waiting window) and the next reference frames to be matched
//! (the coach buffer). Once the waiting window is full, every new frame
//! triggers one DTW pass between the two windows. The pass decides which
//! buffered user frame corresponds to the head of the coach buffer; that pair
//! is recorded, the running score is recomputed over the trailing matched
//! pairs, and both windows slide forward.
//!
//! ```text
//!   Filling ──(waiting window full)──> Matching ──(reference consumed)──> Exhausted
//! ```
//!
//! The comparator is single-writer: calls must be serialized by the caller.

use crate::{
    config::ComparisonConfig,
    constants::NO_SCORE,
    dtw::dtw,
    frame::Frame,
    metric::{deviated_limbs, frame_distance},
    reference::ReferenceSequence,
    Error, Result,
};
use log::{debug, info};
use std::collections::{BTreeSet, VecDeque};

/// Comparator phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting window not yet full
    Filling,
    /// One alignment step per received frame
    Matching,
    /// Reference sequence fully consumed; terminal
    Exhausted,
}

/// Result of feeding one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepResult {
    /// Running alignment cost over the trailing matched pairs, lower is better
    pub score: f64,
    /// Whether this frame produced a new match
    pub matched: bool,
}

/// Reference and user frame indices paired by one alignment step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchedPair {
    pub reference_index: usize,
    pub user_index: usize,
}

#[derive(Debug, Clone, Copy)]
struct IndexedFrame {
    frame: Frame,
    index: usize,
}

/// Streaming DTW comparator
#[derive(Debug, Clone)]
pub struct StreamingComparator {
    config: ComparisonConfig,
    reference: ReferenceSequence,
    phase: Phase,
    waiting_window: VecDeque<IndexedFrame>,
    coach_buffer: VecDeque<IndexedFrame>,
    // Trailing matched frames, at most `trailing_compare_count` of each
    matched_coach: VecDeque<Frame>,
    matched_user: VecDeque<Frame>,
    matches: Vec<MatchedPair>,
    distances: Vec<f64>,
    user_counter: usize,
    reference_counter: usize,
    last_distance: f64,
}

impl StreamingComparator {
    /// Create a comparator over `reference`, ready to receive frames
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a window length is zero or the reference is
    /// shorter than the coach buffer
    pub fn new(reference: ReferenceSequence, config: &ComparisonConfig) -> Result<Self> {
        config.validate()?;
        if reference.len() < config.coach_buffer_length {
            return Err(Error::ConfigError(format!(
                "Reference sequence has {} frames, fewer than the coach buffer length {}",
                reference.len(),
                config.coach_buffer_length
            )));
        }

        Ok(Self::build(reference, config))
    }

    /// Create a comparator with no reference frames
    ///
    /// It buffers frames like a normal comparator but never leaves [`Phase::Filling`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a window length is zero
    pub fn without_reference(config: &ComparisonConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(ReferenceSequence::default(), config))
    }

    fn build(reference: ReferenceSequence, config: &ComparisonConfig) -> Self {
        let mut comparator = Self {
            config: config.clone(),
            reference,
            phase: Phase::Filling,
            waiting_window: VecDeque::with_capacity(config.waiting_window_length),
            coach_buffer: VecDeque::with_capacity(config.coach_buffer_length),
            matched_coach: VecDeque::with_capacity(config.trailing_compare_count),
            matched_user: VecDeque::with_capacity(config.trailing_compare_count),
            matches: Vec::new(),
            distances: Vec::new(),
            user_counter: 0,
            reference_counter: 0,
            last_distance: NO_SCORE,
        };
        comparator.prepare();
        comparator
    }

    /// Reset all state and seed the coach buffer with the first reference frames
    pub fn prepare(&mut self) {
        self.phase = Phase::Filling;
        self.waiting_window.clear();
        self.coach_buffer.clear();
        self.matched_coach.clear();
        self.matched_user.clear();
        self.matches.clear();
        self.distances.clear();
        self.user_counter = 0;
        self.last_distance = NO_SCORE;

        let seeded = self.config.coach_buffer_length.min(self.reference.len());
        self.coach_buffer.extend(
            self.reference.frames()[..seeded]
                .iter()
                .enumerate()
                .map(|(index, &frame)| IndexedFrame { frame, index }),
        );
        self.reference_counter = seeded;
    }

    /// Feed the next live frame
    pub fn receive_frame(&mut self, frame: &Frame) -> StepResult {
        match self.phase {
            Phase::Exhausted => StepResult {
                score: 0.0,
                matched: false,
            },
            Phase::Filling => {
                self.buffer_frame(frame);
                StepResult {
                    score: self.last_distance,
                    matched: false,
                }
            }
            Phase::Matching => self.match_step(frame),
        }
    }

    fn buffer_frame(&mut self, frame: &Frame) {
        if self.waiting_window.len() == self.config.waiting_window_length {
            // Only reachable without a reference: keep the newest frames
            self.waiting_window.pop_front();
        }
        self.push_user_frame(frame);

        if self.waiting_window.len() == self.config.waiting_window_length && !self.coach_buffer.is_empty() {
            self.phase = Phase::Matching;
        }
    }

    fn push_user_frame(&mut self, frame: &Frame) {
        self.waiting_window.push_back(IndexedFrame {
            frame: *frame,
            index: self.user_counter,
        });
        self.user_counter += 1;
    }

    fn match_step(&mut self, frame: &Frame) -> StepResult {
        let alignment = dtw(
            self.waiting_window.make_contiguous(),
            self.coach_buffer.make_contiguous(),
            |user, coach| frame_distance(&user.frame, &coach.frame),
        );
        // The path starts at (0, 0), so the coach head always has a match
        let position_match = alignment.first_x_for(0).unwrap_or(0);

        let coach_head = self.coach_buffer[0];
        let user_match = self.waiting_window[position_match];
        self.record_match(coach_head, user_match);

        let running = dtw(
            self.matched_coach.make_contiguous(),
            self.matched_user.make_contiguous(),
            frame_distance,
        );
        self.last_distance = running.cost;
        self.distances.push(running.cost);

        debug!(
            "Matched reference frame {} with user frame {} (window position {}), score {:.4}",
            coach_head.index, user_match.index, position_match, running.cost
        );

        self.coach_buffer.pop_front();
        if let Some(&next) = self.reference.get(self.reference_counter) {
            self.coach_buffer.push_back(IndexedFrame {
                frame: next,
                index: self.reference_counter,
            });
            self.reference_counter += 1;
        } else {
            self.phase = Phase::Exhausted;
            info!(
                "Reference sequence exhausted after {} matches",
                self.matches.len()
            );
        }

        self.waiting_window.drain(..=position_match);
        self.push_user_frame(frame);

        StepResult {
            score: running.cost,
            matched: true,
        }
    }

    fn record_match(&mut self, coach: IndexedFrame, user: IndexedFrame) {
        if self.matched_coach.len() == self.config.trailing_compare_count {
            self.matched_coach.pop_front();
            self.matched_user.pop_front();
        }
        self.matched_coach.push_back(coach.frame);
        self.matched_user.push_back(user.frame);
        self.matches.push(MatchedPair {
            reference_index: coach.index,
            user_index: user.index,
        });
    }

    /// Limbs deviating beyond the threshold at the most recent match
    ///
    /// Empty before the first match.
    #[must_use]
    pub fn deviated_limbs(&self) -> BTreeSet<usize> {
        match (self.matched_coach.back(), self.matched_user.back()) {
            (Some(coach), Some(user)) => deviated_limbs(coach, user, self.config.deviation_threshold),
            _ => BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.phase == Phase::Exhausted
    }

    /// Last published score, [`NO_SCORE`] before the first match
    #[must_use]
    pub fn last_distance(&self) -> f64 {
        self.last_distance
    }

    /// Reference index of the coach buffer head
    #[must_use]
    pub fn coach_head_index(&self) -> Option<usize> {
        self.coach_buffer.front().map(|entry| entry.index)
    }

    /// Number of reference frames taken into the coach buffer so far
    #[must_use]
    pub fn reference_counter(&self) -> usize {
        self.reference_counter
    }

    /// Number of live frames received outside the exhausted phase
    #[must_use]
    pub fn user_counter(&self) -> usize {
        self.user_counter
    }

    #[must_use]
    pub fn waiting_window_len(&self) -> usize {
        self.waiting_window.len()
    }

    /// Every reference/user pairing made so far, in match order
    #[must_use]
    pub fn matches(&self) -> &[MatchedPair] {
        &self.matches
    }

    /// Score published at every match so far
    #[must_use]
    pub fn distances(&self) -> &[f64] {
        &self.distances
    }

    #[must_use]
    pub fn reference(&self) -> &ReferenceSequence {
        &self.reference
    }

    #[must_use]
    pub fn config(&self) -> &ComparisonConfig {
        &self.config
    }
}
