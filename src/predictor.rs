//! Majority vote over the closest reference gestures.
//!
//! The first `k` ranked references vote with their labels. The most frequent
//! label wins if its share of the batch reaches the threshold; otherwise the
//! result is [`Prediction::Unknown`].
//!
//! References with an infinite distance (hand-presence mismatch) never vote,
//! but they still occupy their slot in the batch.

use std::fmt;

use crate::distance::Ranking;
use crate::error::{Result, SignError};

/// Text shown for a prediction without a confident match.
pub const UNKNOWN_SIGN: &str = "unknown";

/// Outcome of a vote.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Prediction {
    /// A confident match.
    Sign(String),
    /// No label reached the threshold.
    Unknown,
}

impl Prediction {
    /// Predicted label, if any.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Sign(label) => Some(label.as_str()),
            Self::Unknown => None,
        }
    }

    /// Whether this is the unknown sentinel.
    #[must_use]
    pub const fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sign(label) => f.write_str(label),
            Self::Unknown => f.write_str(UNKNOWN_SIGN),
        }
    }
}

/// Vote over the `batch_size` closest references of `ranking`.
///
/// If `batch_size` exceeds the ranking length, the whole ranking votes. The
/// winning share is `count / min(batch_size, len)`. Among equally frequent
/// labels the one that appears first in the ranking wins.
///
/// # Errors
///
/// Returns an error if `batch_size` is 0 or `threshold` lies outside `[0, 1]`.
///
/// # Example
///
/// ```
/// use sign_embedding::{predict_sign, Prediction, Ranking};
///
/// // Nothing to vote on.
/// let prediction = predict_sign(&Ranking::default(), 5, 0.5)?;
/// assert_eq!(prediction, Prediction::Unknown);
/// # Ok::<(), sign_embedding::SignError>(())
/// ```
pub fn predict_sign(ranking: &Ranking, batch_size: usize, threshold: f64) -> Result<Prediction> {
    if batch_size < 1 {
        return Err(SignError::invalid_config("batch_size must be at least 1"));
    }
    if !(0.0..=1.0).contains(&threshold) {
        return Err(SignError::invalid_config("threshold must lie in [0, 1]"));
    }

    let batch = ranking.top(batch_size);
    if batch.is_empty() {
        return Ok(Prediction::Unknown);
    }

    // (label, count) in first-seen order
    let mut tally: Vec<(&str, usize)> = Vec::new();
    for m in batch.iter().filter(|m| m.breakdown.is_finite()) {
        match tally.iter_mut().find(|(label, _)| *label == m.label) {
            Some((_, count)) => *count += 1,
            None => tally.push((m.label.as_str(), 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for &(label, count) in &tally {
        if best.map_or(true, |(_, c)| count > c) {
            best = Some((label, count));
        }
    }

    let Some((label, count)) = best else {
        return Ok(Prediction::Unknown);
    };

    let share = count as f64 / batch.len() as f64;
    if share >= threshold {
        Ok(Prediction::Sign(label.to_string()))
    } else {
        Ok(Prediction::Unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::{DistanceBreakdown, RankedMatch};

    fn ranking(items: &[(&str, f64)]) -> Ranking {
        let matches = items
            .iter()
            .enumerate()
            .map(|(index, &(label, total))| RankedMatch {
                index,
                label: label.to_string(),
                signer: "s".to_string(),
                source_id: format!("{label}-s-{index}"),
                breakdown: DistanceBreakdown {
                    total,
                    left_hand: 0.0,
                    left_arm: 0.0,
                    right_hand: 0.0,
                    right_arm: 0.0,
                    hands_match: total.is_finite(),
                },
            })
            .collect();
        Ranking::from_matches(matches)
    }

    #[test]
    fn test_majority_wins() {
        let r = ranking(&[("A", 0.1), ("B", 0.2), ("A", 0.3), ("B", 0.4), ("A", 0.5)]);
        assert_eq!(predict_sign(&r, 5, 0.5).unwrap(), Prediction::Sign("A".into()));
    }

    #[test]
    fn test_below_threshold_is_unknown() {
        let r = ranking(&[("A", 0.1), ("B", 0.2), ("A", 0.3), ("B", 0.4), ("C", 0.5)]);
        assert_eq!(predict_sign(&r, 5, 0.5).unwrap(), Prediction::Unknown);
    }

    #[test]
    fn test_tie_goes_to_first_seen() {
        let r = ranking(&[("B", 0.1), ("A", 0.2), ("A", 0.3), ("B", 0.4)]);
        assert_eq!(predict_sign(&r, 4, 0.5).unwrap(), Prediction::Sign("B".into()));
    }

    #[test]
    fn test_batch_of_one() {
        let r = ranking(&[("A", 2.1), ("B", 0.4), ("C", 5.0)]);
        assert_eq!(predict_sign(&r, 1, 0.5).unwrap(), Prediction::Sign("B".into()));
    }

    #[test]
    fn test_batch_larger_than_library() {
        let r = ranking(&[("A", 0.1), ("A", 0.2), ("B", 0.3)]);
        // 2 of 3 available entries.
        assert_eq!(predict_sign(&r, 10, 0.6).unwrap(), Prediction::Sign("A".into()));
    }

    #[test]
    fn test_infinite_distances_never_vote() {
        let r = ranking(&[("A", f64::INFINITY), ("B", f64::INFINITY)]);
        for k in 1..=3 {
            assert_eq!(predict_sign(&r, k, 0.0).unwrap(), Prediction::Unknown);
        }

        // One finite vote out of a batch of two is not enough at t = 0.6.
        let r = ranking(&[("A", 0.5), ("B", f64::INFINITY)]);
        assert_eq!(predict_sign(&r, 2, 0.6).unwrap(), Prediction::Unknown);
        assert_eq!(predict_sign(&r, 2, 0.5).unwrap(), Prediction::Sign("A".into()));
    }

    #[test]
    fn test_empty_ranking() {
        assert_eq!(predict_sign(&Ranking::default(), 1, 0.5).unwrap(), Prediction::Unknown);
    }

    #[test]
    fn test_invalid_arguments() {
        let r = ranking(&[("A", 0.1)]);
        assert!(predict_sign(&r, 0, 0.5).is_err());
        assert!(predict_sign(&r, 1, 1.5).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Prediction::Sign("hello".into()).to_string(), "hello");
        assert_eq!(Prediction::Unknown.to_string(), UNKNOWN_SIGN);
        assert_eq!(Prediction::Unknown.label(), None);
        assert!(Prediction::Unknown.is_unknown());
    }
}
