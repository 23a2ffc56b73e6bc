//! Configuration for gesture matching.
//!
//! This module provides the [`MatchingConfig`] struct which centralizes all
//! tunable parameters of a comparison pass, along with presets for offline
//! evaluation and live recognition.
//!
//! # Example
//!
//! ```
//! use sign_embedding::{DtwMethod, MatchingConfig};
//!
//! // Live recognition votes over the single closest reference
//! let live = MatchingConfig::live();
//! assert_eq!(live.batch_size, 1);
//!
//! // Offline evaluation with exact alignment
//! let offline = MatchingConfig::offline().with_dtw_method(DtwMethod::Exact);
//! assert!(offline.validate().is_ok());
//! ```

use crate::error::{Result, SignError};
use crate::math::dtw::{dtw_distance, fast_dtw_distance};

pub use crate::math::dtw::LocalMetric;

/// Alignment algorithm used per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DtwMethod {
    /// Full-grid DTW, `O(n*m)`.
    Exact,
    /// FastDTW with the given search radius.
    Fast {
        /// Cells explored on each side of the projected coarse path.
        radius: usize,
    },
}

impl Default for DtwMethod {
    fn default() -> Self {
        Self::Fast { radius: 1 }
    }
}

/// How two channel sequences are aligned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DtwConfig {
    /// Exact or windowed alignment.
    pub method: DtwMethod,
    /// Local distance between two angle vectors.
    pub metric: LocalMetric,
}

impl DtwConfig {
    /// Exact DTW with Euclidean local distance.
    #[must_use]
    pub const fn exact() -> Self {
        Self {
            method: DtwMethod::Exact,
            metric: LocalMetric::Euclidean,
        }
    }

    /// Alignment distance between two sequences of angle vectors.
    #[must_use]
    pub fn distance(&self, x: &[Vec<f64>], y: &[Vec<f64>]) -> f64 {
        match self.method {
            DtwMethod::Exact => dtw_distance(x, y, self.metric),
            DtwMethod::Fast { radius } => fast_dtw_distance(x, y, radius, self.metric),
        }
    }
}

/// Configuration for a comparison pass and the vote that follows it.
///
/// # Parameters
///
/// - `batch_size`: number of closest references that vote (k).
/// - `threshold`: minimum share of the batch the winning label needs (t).
/// - `record_length`: frames the recorder accumulates before comparing.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchingConfig {
    /// Channel alignment settings.
    pub dtw: DtwConfig,

    /// Number of closest references taken into the vote.
    /// - 1: live, frame-by-frame updates
    /// - 5: offline evaluation
    pub batch_size: usize,

    /// Share of the batch the most frequent label must reach, in `[0, 1]`.
    pub threshold: f64,

    /// Frames accumulated by the recorder before a comparison pass.
    pub record_length: usize,

    /// Ranked entries logged and returned for diagnostics.
    pub diagnostics_top_n: usize,

    /// When set, a comparison that accumulates no channel distance (neither
    /// gesture has a hand) scores infinity instead of 0.
    pub require_hand_presence: bool,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            dtw: DtwConfig::default(),
            batch_size: 5,
            threshold: 0.5,
            record_length: 50,
            diagnostics_top_n: 8,
            require_hand_presence: false,
        }
    }
}

impl MatchingConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any parameter is out of valid range.
    pub fn validate(&self) -> Result<()> {
        if self.batch_size < 1 {
            return Err(SignError::invalid_config("batch_size must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(SignError::invalid_config("threshold must lie in [0, 1]"));
        }
        if self.record_length < 1 {
            return Err(SignError::invalid_config(
                "record_length must be at least 1",
            ));
        }
        Ok(())
    }

    /// Preset for offline batch evaluation (k = 5).
    #[must_use]
    pub fn offline() -> Self {
        Self {
            batch_size: 5,
            ..Self::default()
        }
    }

    /// Preset for live recognition (k = 1).
    #[must_use]
    pub fn live() -> Self {
        Self {
            batch_size: 1,
            ..Self::default()
        }
    }

    /// Set the vote batch size.
    #[must_use]
    pub const fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Set the vote threshold.
    #[must_use]
    pub const fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the recorder target length.
    #[must_use]
    pub const fn with_record_length(mut self, frames: usize) -> Self {
        self.record_length = frames;
        self
    }

    /// Set the alignment algorithm.
    #[must_use]
    pub const fn with_dtw_method(mut self, method: DtwMethod) -> Self {
        self.dtw.method = method;
        self
    }

    /// Set the local distance metric.
    #[must_use]
    pub const fn with_metric(mut self, metric: LocalMetric) -> Self {
        self.dtw.metric = metric;
        self
    }

    /// Require at least one hand channel for a finite distance.
    #[must_use]
    pub const fn with_require_hand_presence(mut self, require: bool) -> Self {
        self.require_hand_presence = require;
        self
    }

    /// Set how many ranked entries are kept for diagnostics.
    #[must_use]
    pub const fn with_diagnostics_top_n(mut self, n: usize) -> Self {
        self.diagnostics_top_n = n;
        self
    }
}
