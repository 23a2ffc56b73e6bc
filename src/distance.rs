//! Similarity ranking of a recorded gesture against the reference library.
//!
//! Each reference receives one scalar distance: the sum of the DTW distances
//! of the channels belonging to the hands present in both gestures. A
//! reference whose hand presence differs from the recording is disqualified
//! with an infinite distance.
//!
//! Ranking is a pure function. The library is only read; the result is a new
//! [`Ranking`] sorted by ascending distance, ties kept in library order.

use std::time::Instant;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::config::MatchingConfig;
use crate::embedding::{Channel, GestureEmbedding};
use crate::library::{ReferenceEntry, ReferenceLibrary};

/// Per-channel distance breakdown between two gestures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceBreakdown {
    /// Sum of the active channel distances, or infinity.
    pub total: f64,
    /// Left-hand DTW distance (0 when the channel is inactive).
    pub left_hand: f64,
    /// Left-arm DTW distance (0 when the channel is inactive).
    pub left_arm: f64,
    /// Right-hand DTW distance (0 when the channel is inactive).
    pub right_hand: f64,
    /// Right-arm DTW distance (0 when the channel is inactive).
    pub right_arm: f64,
    /// Whether both gestures show the same hands.
    pub hands_match: bool,
}

impl DistanceBreakdown {
    fn disqualified(hands_match: bool) -> Self {
        Self {
            total: f64::INFINITY,
            left_hand: 0.0,
            left_arm: 0.0,
            right_hand: 0.0,
            right_arm: 0.0,
            hands_match,
        }
    }

    /// Distance of one channel.
    #[must_use]
    pub const fn channel(&self, channel: Channel) -> f64 {
        match channel {
            Channel::LeftHand => self.left_hand,
            Channel::RightHand => self.right_hand,
            Channel::LeftArm => self.left_arm,
            Channel::RightArm => self.right_arm,
        }
    }

    /// Whether the total distance is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.total.is_finite()
    }
}

/// Distance between a recorded gesture and one reference gesture.
#[must_use]
pub fn compute_gesture_distance(
    recorded: &GestureEmbedding,
    reference: &GestureEmbedding,
    config: &MatchingConfig,
) -> f64 {
    compute_gesture_distance_detailed(recorded, reference, config).total
}

/// Distance with its per-channel breakdown.
///
/// - Hand presence differs: `total` is infinity.
/// - Otherwise `total` sums hand + arm distances for every hand present.
/// - Neither hand present: `total` is 0, or infinity when
///   `config.require_hand_presence` is set.
#[must_use]
pub fn compute_gesture_distance_detailed(
    recorded: &GestureEmbedding,
    reference: &GestureEmbedding,
    config: &MatchingConfig,
) -> DistanceBreakdown {
    if !recorded.same_hands(reference) {
        return DistanceBreakdown::disqualified(false);
    }

    let active = recorded.active_channels();
    if active.is_empty() && config.require_hand_presence {
        return DistanceBreakdown::disqualified(true);
    }

    let mut breakdown = DistanceBreakdown {
        total: 0.0,
        left_hand: 0.0,
        left_arm: 0.0,
        right_hand: 0.0,
        right_arm: 0.0,
        hands_match: true,
    };

    for channel in active {
        let d = config
            .dtw
            .distance(recorded.channel(channel), reference.channel(channel));
        match channel {
            Channel::LeftHand => breakdown.left_hand = d,
            Channel::RightHand => breakdown.right_hand = d,
            Channel::LeftArm => breakdown.left_arm = d,
            Channel::RightArm => breakdown.right_arm = d,
        }
        breakdown.total += d;
    }

    breakdown
}

/// One reference gesture with its distance to the recording.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedMatch {
    /// Position of the entry in the library.
    pub index: usize,
    /// Gesture name.
    pub label: String,
    /// Person who performed the reference.
    pub signer: String,
    /// Identifier of the reference clip.
    pub source_id: String,
    /// Distance to the recording.
    pub breakdown: DistanceBreakdown,
}

impl RankedMatch {
    fn new(index: usize, entry: &ReferenceEntry, breakdown: DistanceBreakdown) -> Self {
        Self {
            index,
            label: entry.label.clone(),
            signer: entry.signer.clone(),
            source_id: entry.source_id.clone(),
            breakdown,
        }
    }

    /// Total distance.
    #[must_use]
    pub const fn distance(&self) -> f64 {
        self.breakdown.total
    }
}

/// Reference gestures sorted by ascending distance to a recording.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ranking {
    matches: Vec<RankedMatch>,
}

impl Ranking {
    /// Sort matches by distance. The sort is stable.
    #[must_use]
    pub fn from_matches(mut matches: Vec<RankedMatch>) -> Self {
        matches.sort_by(|a, b| a.distance().total_cmp(&b.distance()));
        Self { matches }
    }

    /// All matches, closest first.
    #[must_use]
    pub fn matches(&self) -> &[RankedMatch] {
        &self.matches
    }

    /// The `n` closest matches (fewer if the ranking is shorter).
    #[must_use]
    pub fn top(&self, n: usize) -> &[RankedMatch] {
        &self.matches[..n.min(self.matches.len())]
    }

    /// Closest match.
    #[must_use]
    pub fn best(&self) -> Option<&RankedMatch> {
        self.matches.first()
    }

    /// Number of ranked references.
    #[must_use]
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    /// Whether nothing was ranked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Number of references with a finite distance.
    #[must_use]
    pub fn finite_count(&self) -> usize {
        self.matches.iter().filter(|m| m.breakdown.is_finite()).count()
    }

    /// Iterate closest first.
    pub fn iter(&self) -> std::slice::Iter<'_, RankedMatch> {
        self.matches.iter()
    }
}

/// Rank every reference gesture by its distance to `recorded`.
///
/// With the `parallel` feature, references are scored on the rayon pool;
/// the result is identical to the sequential order.
#[must_use]
pub fn rank_references(
    recorded: &GestureEmbedding,
    library: &ReferenceLibrary,
    config: &MatchingConfig,
) -> Ranking {
    let started = Instant::now();

    let score = |(index, entry): (usize, &ReferenceEntry)| {
        let breakdown = compute_gesture_distance_detailed(recorded, &entry.embedding, config);
        RankedMatch::new(index, entry, breakdown)
    };

    #[cfg(feature = "parallel")]
    let matches: Vec<RankedMatch> = library.entries().par_iter().enumerate().map(score).collect();

    #[cfg(not(feature = "parallel"))]
    let matches: Vec<RankedMatch> = library.entries().iter().enumerate().map(score).collect();

    let ranking = Ranking::from_matches(matches);

    log::debug!(
        "Ranked {} references ({} comparable) in {:.3?}",
        ranking.len(),
        ranking.finite_count(),
        started.elapsed(),
    );

    ranking
}
