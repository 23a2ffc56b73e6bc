//! Joint-angle encoding of a single landmark frame.
//!
//! An encoder turns one frame of raw 3D landmarks into a fixed-length vector
//! of joint angles, one per triplet of its [`Topology`]. Angles are invariant
//! to translation, rotation and uniform scaling of the frame.

use crate::landmarks::Landmark;
use crate::math::angles::joint_angle;
use crate::topology::{Topology, HAND, LEFT_ARM, RIGHT_ARM};

/// Converts landmark frames of one topology into joint-angle vectors.
///
/// # Example
///
/// ```
/// use sign_embedding::{JointAngleEncoder, HAND_LANDMARKS};
///
/// let encoder = JointAngleEncoder::hand();
/// let frame = vec![[0.0, 0.0, 0.0]; HAND_LANDMARKS];
///
/// // Fully degenerate geometry encodes as zeros.
/// let angles = encoder.encode(&frame);
/// assert_eq!(angles, vec![0.0; 20]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JointAngleEncoder {
    topology: Topology,
}

impl JointAngleEncoder {
    /// Create an encoder for an arbitrary topology.
    #[must_use]
    pub const fn new(topology: Topology) -> Self {
        Self { topology }
    }

    /// Encoder for 21-point hand frames (20 angles).
    #[must_use]
    pub const fn hand() -> Self {
        Self::new(HAND)
    }

    /// Encoder for the left arm of pose frames (3 angles).
    #[must_use]
    pub const fn left_arm() -> Self {
        Self::new(LEFT_ARM)
    }

    /// Encoder for the right arm of pose frames (3 angles).
    #[must_use]
    pub const fn right_arm() -> Self {
        Self::new(RIGHT_ARM)
    }

    /// Topology this encoder reads.
    #[must_use]
    pub const fn topology(&self) -> &Topology {
        &self.topology
    }

    /// Output vector length.
    #[must_use]
    pub const fn n_angles(&self) -> usize {
        self.topology.n_angles()
    }

    /// Encode one frame.
    ///
    /// Never fails: duplicate, collapsed or missing landmarks produce 0 for
    /// the affected angles.
    #[must_use]
    pub fn encode(&self, frame: &[Landmark]) -> Vec<f64> {
        self.topology
            .triplets
            .iter()
            .map(|triplet| joint_angle(frame, triplet))
            .collect()
    }
}
