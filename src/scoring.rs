//! Per-session tally of good and bad alignment steps.

/// Outcome of one matched step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Score below the evaluation threshold
    Good,
    /// Score at or above the threshold, or not a number
    Bad,
}

/// Counts matched steps whose score falls below an evaluation threshold
#[derive(Debug, Clone)]
pub struct ScoreTracker {
    evaluation_threshold: f64,
    good_steps: usize,
    total_steps: usize,
    score_sum: f64,
    finite_scores: usize,
}

impl ScoreTracker {
    #[must_use]
    pub fn new(evaluation_threshold: f64) -> Self {
        Self {
            evaluation_threshold,
            good_steps: 0,
            total_steps: 0,
            score_sum: 0.0,
            finite_scores: 0,
        }
    }

    /// Record the score of a matched step
    pub fn record(&mut self, score: f64) -> Verdict {
        self.total_steps += 1;
        if score.is_finite() {
            self.score_sum += score;
            self.finite_scores += 1;
        }

        if score < self.evaluation_threshold {
            self.good_steps += 1;
            Verdict::Good
        } else {
            Verdict::Bad
        }
    }

    #[must_use]
    pub fn good_steps(&self) -> usize {
        self.good_steps
    }

    #[must_use]
    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    /// Share of good steps as a rounded percentage, `None` before the first step
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // value is in 0..=100
    pub fn percentage(&self) -> Option<u8> {
        if self.total_steps == 0 {
            return None;
        }
        let ratio = self.good_steps as f64 / self.total_steps as f64;
        Some((ratio * 100.0).round() as u8)
    }

    /// Mean of all finite recorded scores
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn mean_score(&self) -> Option<f64> {
        (self.finite_scores > 0).then(|| self.score_sum / self.finite_scores as f64)
    }

    pub fn reset(&mut self) {
        self.good_steps = 0;
        self.total_steps = 0;
        self.score_sum = 0.0;
        self.finite_scores = 0;
    }
}
