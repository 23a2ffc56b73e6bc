//! Raw landmark frames as delivered by a holistic pose/hand detector.
//!
//! Every frame has a fixed topology: 33 pose landmarks and 21 landmarks per
//! hand. A body part that was not detected in a frame is represented by an
//! all-zero frame of the right size, never by a shorter one.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One tracked 3D keypoint `[x, y, z]`.
pub type Landmark = [f64; 3];

/// Number of landmarks in a pose frame.
pub const POSE_LANDMARKS: usize = 33;

/// Number of landmarks in a hand frame.
pub const HAND_LANDMARKS: usize = 21;

/// Sum of every raw coordinate in a frame.
#[must_use]
pub fn coordinate_sum(frame: &[Landmark]) -> f64 {
    frame.iter().map(|p| p[0] + p[1] + p[2]).sum()
}

/// Whether a frame counts as "not detected" (raw coordinates sum to exactly zero).
#[must_use]
pub fn is_undetected(frame: &[Landmark]) -> bool {
    coordinate_sum(frame) == 0.0
}

/// Landmarks captured for a single camera frame.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HolisticFrame {
    /// Pose landmarks (33 points).
    pub pose: Vec<Landmark>,
    /// Left-hand landmarks (21 points).
    pub left_hand: Vec<Landmark>,
    /// Right-hand landmarks (21 points).
    pub right_hand: Vec<Landmark>,
}

impl HolisticFrame {
    /// A frame where nothing was detected.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            pose: vec![[0.0; 3]; POSE_LANDMARKS],
            left_hand: vec![[0.0; 3]; HAND_LANDMARKS],
            right_hand: vec![[0.0; 3]; HAND_LANDMARKS],
        }
    }

    /// Build a frame from optional detector outputs, zero-filling missing parts.
    #[must_use]
    pub fn from_detections(
        pose: Option<Vec<Landmark>>,
        left_hand: Option<Vec<Landmark>>,
        right_hand: Option<Vec<Landmark>>,
    ) -> Self {
        Self {
            pose: pose.unwrap_or_else(|| vec![[0.0; 3]; POSE_LANDMARKS]),
            left_hand: left_hand.unwrap_or_else(|| vec![[0.0; 3]; HAND_LANDMARKS]),
            right_hand: right_hand.unwrap_or_else(|| vec![[0.0; 3]; HAND_LANDMARKS]),
        }
    }
}

impl Default for HolisticFrame {
    fn default() -> Self {
        Self::empty()
    }
}

/// A recorded clip: three parallel per-frame landmark sequences.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GestureClip {
    /// Pose frames.
    pub pose: Vec<Vec<Landmark>>,
    /// Left-hand frames.
    pub left_hand: Vec<Vec<Landmark>>,
    /// Right-hand frames.
    pub right_hand: Vec<Vec<Landmark>>,
}

impl GestureClip {
    /// Number of captured frames (length of the pose channel).
    #[must_use]
    pub fn n_frames(&self) -> usize {
        self.pose.len()
    }

    /// Append one captured frame.
    pub fn push(&mut self, frame: HolisticFrame) {
        self.pose.push(frame.pose);
        self.left_hand.push(frame.left_hand);
        self.right_hand.push(frame.right_hand);
    }
}

impl FromIterator<HolisticFrame> for GestureClip {
    fn from_iter<I: IntoIterator<Item = HolisticFrame>>(iter: I) -> Self {
        let mut clip = Self::default();
        for frame in iter {
            clip.push(frame);
        }
        clip
    }
}
