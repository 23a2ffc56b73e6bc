//! Gesture embedding data structures.
//!
//! A [`GestureEmbedding`] holds four independently-lengthed sequences of
//! joint-angle vectors plus the hand presence flags.
//!
//! # Channel Layout
//!
//! | Channel | Source | Angles per frame |
//! |---------|--------|------------------|
//! | `LeftHand` | left-hand frames | 20 |
//! | `RightHand` | right-hand frames | 20 |
//! | `LeftArm` | pose frames | 3 |
//! | `RightArm` | pose frames | 3 |

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One of the four embedding streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Channel {
    /// Left-hand finger angles.
    LeftHand,
    /// Right-hand finger angles.
    RightHand,
    /// Left shoulder/elbow angles.
    LeftArm,
    /// Right shoulder/elbow angles.
    RightArm,
}

impl Channel {
    /// All channels, in storage order.
    pub const ALL: [Self; 4] = [Self::LeftHand, Self::RightHand, Self::LeftArm, Self::RightArm];

    /// Snake-case name used in logs and errors.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::LeftHand => "left_hand",
            Self::RightHand => "right_hand",
            Self::LeftArm => "left_arm",
            Self::RightArm => "right_arm",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Sequence of joint-angle vectors for one channel.
pub type AngleSequence = Vec<Vec<f64>>;

/// Four-channel angle representation of one gesture clip.
///
/// Frames in which a body part was not detected are absent from that
/// channel, so channel lengths may differ from each other and from the
/// clip's frame count.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GestureEmbedding {
    /// Left-hand angle vectors (20D each).
    pub left_hand: AngleSequence,
    /// Right-hand angle vectors (20D each).
    pub right_hand: AngleSequence,
    /// Left-arm angle vectors (3D each).
    pub left_arm: AngleSequence,
    /// Right-arm angle vectors (3D each).
    pub right_arm: AngleSequence,
    /// Left hand detected in at least one frame.
    pub has_left_hand: bool,
    /// Right hand detected in at least one frame.
    pub has_right_hand: bool,
}

impl GestureEmbedding {
    /// Sequence stored for `channel`.
    #[must_use]
    pub fn channel(&self, channel: Channel) -> &[Vec<f64>] {
        match channel {
            Channel::LeftHand => &self.left_hand,
            Channel::RightHand => &self.right_hand,
            Channel::LeftArm => &self.left_arm,
            Channel::RightArm => &self.right_arm,
        }
    }

    /// Whether both gestures agree on which hands were detected.
    #[must_use]
    pub const fn same_hands(&self, other: &Self) -> bool {
        self.has_left_hand == other.has_left_hand && self.has_right_hand == other.has_right_hand
    }

    /// Channels that take part in a comparison, given the hands present.
    ///
    /// A present hand contributes both its finger channel and its arm channel.
    #[must_use]
    pub fn active_channels(&self) -> Vec<Channel> {
        let mut channels = Vec::with_capacity(4);
        if self.has_left_hand {
            channels.extend([Channel::LeftHand, Channel::LeftArm]);
        }
        if self.has_right_hand {
            channels.extend([Channel::RightHand, Channel::RightArm]);
        }
        channels
    }

    /// Whether no frame contributed to any channel.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        Channel::ALL.iter().all(|&c| self.channel(c).is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn embedding(has_left_hand: bool, has_right_hand: bool) -> GestureEmbedding {
        GestureEmbedding {
            has_left_hand,
            has_right_hand,
            ..GestureEmbedding::default()
        }
    }

    #[test]
    fn test_channel_names() {
        let names: Vec<String> = Channel::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(names, ["left_hand", "right_hand", "left_arm", "right_arm"]);
    }

    #[test]
    fn test_channel_access() {
        let mut emb = GestureEmbedding::default();
        emb.right_arm.push(vec![0.1, 0.2, 0.3]);
        assert_eq!(emb.channel(Channel::RightArm).len(), 1);
        assert!(emb.channel(Channel::LeftArm).is_empty());
        assert!(!emb.is_empty());
        assert!(GestureEmbedding::default().is_empty());
    }

    #[test]
    fn test_same_hands() {
        assert!(embedding(true, false).same_hands(&embedding(true, false)));
        assert!(!embedding(true, false).same_hands(&embedding(true, true)));
        assert!(embedding(false, false).same_hands(&embedding(false, false)));
    }

    #[test]
    fn test_active_channels() {
        assert_eq!(
            embedding(false, true).active_channels(),
            vec![Channel::RightHand, Channel::RightArm]
        );
        assert_eq!(embedding(true, true).active_channels().len(), 4);
        assert!(embedding(false, false).active_channels().is_empty());
    }
}
