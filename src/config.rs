//! Configuration management for motion comparison sessions

use crate::{
    constants::{
        DEFAULT_COACH_BUFFER, DEFAULT_DEVIATION_THRESHOLD, DEFAULT_EVALUATION_THRESHOLD, DEFAULT_OVERLAY_THRESHOLD,
        DEFAULT_TRAILING_COMPARE, DEFAULT_WAITING_WINDOW,
    },
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Session configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Streaming comparator windows
    pub comparison: ComparisonConfig,

    /// Reference asset location
    pub reference: ReferenceConfig,

    /// Step evaluation and overlay thresholds
    pub scoring: ScoringConfig,
}

/// Streaming comparator parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparisonConfig {
    /// Number of buffered user frames aligned per step
    pub waiting_window_length: usize,

    /// Number of reference frames aligned per step
    pub coach_buffer_length: usize,

    /// Number of most recent matched pairs used for the running score
    pub trailing_compare_count: usize,

    /// Squared cosine distance above which a limb counts as deviated
    pub deviation_threshold: f64,
}

/// Reference asset configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceConfig {
    /// Path to the recorded reference sequence (JSON)
    pub path: Option<PathBuf>,

    /// Fail if the asset is missing instead of running with an empty reference
    pub required: bool,
}

/// Scoring configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Scores below this value count as a good step
    pub evaluation_threshold: f64,

    /// Mean keypoint confidence below which no skeleton is drawn (0.0-1.0)
    pub overlay_threshold: f64,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            waiting_window_length: DEFAULT_WAITING_WINDOW,
            coach_buffer_length: DEFAULT_COACH_BUFFER,
            trailing_compare_count: DEFAULT_TRAILING_COMPARE,
            deviation_threshold: DEFAULT_DEVIATION_THRESHOLD,
        }
    }
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            path: None,
            required: true,
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            evaluation_threshold: DEFAULT_EVALUATION_THRESHOLD,
            overlay_threshold: DEFAULT_OVERLAY_THRESHOLD,
        }
    }
}

impl ComparisonConfig {
    /// Comparator parameters with all three window lengths set to `length`
    #[must_use]
    pub fn with_windows(length: usize) -> Self {
        Self {
            waiting_window_length: length,
            coach_buffer_length: length,
            trailing_compare_count: length,
            ..Self::default()
        }
    }

    /// Validate comparator parameters
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a window length is zero or the threshold is not a finite non-negative number
    pub fn validate(&self) -> Result<()> {
        if self.waiting_window_length == 0 {
            return Err(Error::ConfigError(
                "Waiting window length must be greater than 0".to_string(),
            ));
        }
        if self.coach_buffer_length == 0 {
            return Err(Error::ConfigError(
                "Coach buffer length must be greater than 0".to_string(),
            ));
        }
        if self.trailing_compare_count == 0 {
            return Err(Error::ConfigError(
                "Trailing compare count must be greater than 0".to_string(),
            ));
        }
        if !self.deviation_threshold.is_finite() || self.deviation_threshold < 0.0 {
            return Err(Error::ConfigError(
                "Deviation threshold must be a finite non-negative number".to_string(),
            ));
        }
        Ok(())
    }
}

impl Config {
    /// Load configuration from a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid YAML
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        serde_yaml::from_str(&content).map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content)?;

        Ok(())
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` describing the first invalid setting
    pub fn validate(&self) -> Result<()> {
        self.comparison.validate()?;

        if !self.scoring.evaluation_threshold.is_finite() {
            return Err(Error::ConfigError(
                "Evaluation threshold must be finite".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.scoring.overlay_threshold) {
            return Err(Error::ConfigError(
                "Overlay threshold must be between 0.0 and 1.0".to_string(),
            ));
        }

        if self.reference.required && self.reference.path.is_none() {
            return Err(Error::ConfigError(
                "A reference path is required but none was configured".to_string(),
            ));
        }

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Motion Coach Configuration

# Streaming comparator windows
comparison:
  waiting_window_length: 15
  coach_buffer_length: 15
  trailing_compare_count: 15
  deviation_threshold: 0.03

# Reference performance
reference:
  path: "assets/coach.json"
  required: true

# Step evaluation
scoring:
  evaluation_threshold: 1.3
  overlay_threshold: 0.2
"#;
