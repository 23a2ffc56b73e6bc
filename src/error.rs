//! Error types for gesture matching operations.
//!
//! Degenerate geometry, hand-presence mismatches and empty comparison
//! batches are not errors; they are folded into angles of 0, infinite
//! distances and the unknown prediction. What remains here are shape
//! problems in raw clips, invalid configuration and reference-store failures.

use thiserror::Error;

/// Main error type for gesture matching operations.
#[derive(Error, Debug)]
pub enum SignError {
    /// Input validation errors.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The channels of one clip hold different frame counts.
    #[error("Length mismatch: {channel} has {actual} frames, expected {expected}")]
    LengthMismatch {
        channel: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A frame carries the wrong number of landmarks for its topology.
    #[error("Landmark count mismatch in {channel} frame {frame}: expected {expected}, got {actual}")]
    LandmarkCount {
        channel: &'static str,
        frame: usize,
        expected: usize,
        actual: usize,
    },

    /// Configuration validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A stored reference gesture could not be turned into a library entry.
    #[error("Malformed reference '{source_id}': {reason}")]
    MalformedReference { source_id: String, reason: String },

    /// Reading the reference store failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The reference store held invalid JSON.
    #[cfg(feature = "serde")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for gesture matching operations.
pub type Result<T> = std::result::Result<T, SignError>;

impl SignError {
    /// Create an invalid input error.
    #[must_use]
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a channel length mismatch error.
    #[must_use]
    pub const fn length_mismatch(channel: &'static str, expected: usize, actual: usize) -> Self {
        Self::LengthMismatch {
            channel,
            expected,
            actual,
        }
    }

    /// Create a landmark count error.
    #[must_use]
    pub const fn landmark_count(
        channel: &'static str,
        frame: usize,
        expected: usize,
        actual: usize,
    ) -> Self {
        Self::LandmarkCount {
            channel,
            frame,
            expected,
            actual,
        }
    }

    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a malformed reference error.
    #[must_use]
    pub fn malformed_reference(source_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedReference {
            source_id: source_id.into(),
            reason: reason.into(),
        }
    }
}
