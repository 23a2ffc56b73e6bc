//! Landmark topologies and the joint-angle triplets tracked for each.
//!
//! Triplet tables are plain constant data. An encoder is built from a
//! [`Topology`], so alternative skeletons can be plugged in without touching
//! the encoder itself.

use crate::landmarks::{HAND_LANDMARKS, POSE_LANDMARKS};

// ============================================================================
// HAND LANDMARK INDICES
// ============================================================================

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

// ============================================================================
// POSE LANDMARK INDICES
// ============================================================================

pub const LEFT_SHOULDER: usize = 11;
pub const RIGHT_SHOULDER: usize = 12;
pub const LEFT_ELBOW: usize = 13;
pub const RIGHT_ELBOW: usize = 14;
pub const LEFT_WRIST: usize = 15;
pub const RIGHT_WRIST: usize = 16;
pub const LEFT_HIP: usize = 23;
pub const RIGHT_HIP: usize = 24;

/// Angle measured at `vertex` between the rays `vertex -> a` and `vertex -> c`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AngleTriplet {
    /// End of the first ray.
    pub a: usize,
    /// Vertex of the angle.
    pub vertex: usize,
    /// End of the second ray.
    pub c: usize,
}

impl AngleTriplet {
    /// Create a triplet `(a, vertex, c)`.
    #[must_use]
    pub const fn new(a: usize, vertex: usize, c: usize) -> Self {
        Self { a, vertex, c }
    }

    /// Largest landmark index referenced by this triplet.
    #[must_use]
    pub const fn max_index(&self) -> usize {
        let ab = if self.a > self.vertex { self.a } else { self.vertex };
        if ab > self.c {
            ab
        } else {
            self.c
        }
    }
}

/// A landmark layout together with the angles tracked on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Topology {
    /// Human-readable name, used in logs and errors.
    pub name: &'static str,
    /// Number of landmarks a frame of this topology carries.
    pub landmark_count: usize,
    /// Tracked angles, in output order.
    pub triplets: &'static [AngleTriplet],
}

impl Topology {
    /// Number of angles produced per frame.
    #[must_use]
    pub const fn n_angles(&self) -> usize {
        self.triplets.len()
    }

    /// Whether every triplet index fits inside the landmark count.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.triplets
            .iter()
            .all(|t| t.max_index() < self.landmark_count)
    }
}

const HAND_TRIPLETS: [AngleTriplet; 20] = [
    // Thumb
    AngleTriplet::new(WRIST, THUMB_CMC, THUMB_MCP),
    AngleTriplet::new(THUMB_CMC, THUMB_MCP, THUMB_IP),
    AngleTriplet::new(THUMB_MCP, THUMB_IP, THUMB_TIP),
    AngleTriplet::new(THUMB_CMC, WRIST, INDEX_MCP),
    // Index
    AngleTriplet::new(WRIST, INDEX_MCP, INDEX_PIP),
    AngleTriplet::new(INDEX_MCP, INDEX_PIP, INDEX_DIP),
    AngleTriplet::new(INDEX_PIP, INDEX_DIP, INDEX_TIP),
    AngleTriplet::new(INDEX_MCP, WRIST, MIDDLE_MCP),
    // Middle
    AngleTriplet::new(WRIST, MIDDLE_MCP, MIDDLE_PIP),
    AngleTriplet::new(MIDDLE_MCP, MIDDLE_PIP, MIDDLE_DIP),
    AngleTriplet::new(MIDDLE_PIP, MIDDLE_DIP, MIDDLE_TIP),
    AngleTriplet::new(MIDDLE_MCP, WRIST, RING_MCP),
    // Ring
    AngleTriplet::new(WRIST, RING_MCP, RING_PIP),
    AngleTriplet::new(RING_MCP, RING_PIP, RING_DIP),
    AngleTriplet::new(RING_PIP, RING_DIP, RING_TIP),
    AngleTriplet::new(RING_MCP, WRIST, PINKY_MCP),
    // Pinky
    AngleTriplet::new(WRIST, PINKY_MCP, PINKY_PIP),
    AngleTriplet::new(PINKY_MCP, PINKY_PIP, PINKY_DIP),
    AngleTriplet::new(PINKY_PIP, PINKY_DIP, PINKY_TIP),
    AngleTriplet::new(PINKY_MCP, WRIST, RING_MCP),
];

const LEFT_ARM_TRIPLETS: [AngleTriplet; 3] = [
    AngleTriplet::new(RIGHT_SHOULDER, LEFT_SHOULDER, LEFT_ELBOW),
    AngleTriplet::new(LEFT_SHOULDER, LEFT_ELBOW, LEFT_WRIST),
    AngleTriplet::new(LEFT_ELBOW, LEFT_SHOULDER, LEFT_HIP),
];

const RIGHT_ARM_TRIPLETS: [AngleTriplet; 3] = [
    AngleTriplet::new(LEFT_SHOULDER, RIGHT_SHOULDER, RIGHT_ELBOW),
    AngleTriplet::new(RIGHT_SHOULDER, RIGHT_ELBOW, RIGHT_WRIST),
    AngleTriplet::new(RIGHT_ELBOW, RIGHT_SHOULDER, RIGHT_HIP),
];

/// 21-point hand, 20 inter- and intra-finger angles.
pub const HAND: Topology = Topology {
    name: "hand",
    landmark_count: HAND_LANDMARKS,
    triplets: &HAND_TRIPLETS,
};

/// Left arm angles measured on a pose frame.
pub const LEFT_ARM: Topology = Topology {
    name: "left_arm",
    landmark_count: POSE_LANDMARKS,
    triplets: &LEFT_ARM_TRIPLETS,
};

/// Right arm angles measured on a pose frame.
pub const RIGHT_ARM: Topology = Topology {
    name: "right_arm",
    landmark_count: POSE_LANDMARKS,
    triplets: &RIGHT_ARM_TRIPLETS,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_sizes() {
        assert_eq!(HAND.n_angles(), 20);
        assert_eq!(LEFT_ARM.n_angles(), 3);
        assert_eq!(RIGHT_ARM.n_angles(), 3);
    }

    #[test]
    fn test_tables_fit_their_topology() {
        assert!(HAND.is_consistent());
        assert!(LEFT_ARM.is_consistent());
        assert!(RIGHT_ARM.is_consistent());
    }

    #[test]
    fn test_arm_tables_mirror_each_other() {
        for (l, r) in LEFT_ARM.triplets.iter().zip(RIGHT_ARM.triplets) {
            // Left and right pose indices differ by one at every position.
            assert_eq!(l.vertex + 1, r.vertex);
        }
    }

    #[test]
    fn test_inconsistent_topology() {
        const BAD: [AngleTriplet; 1] = [AngleTriplet::new(0, 1, 5)];
        let topology = Topology {
            name: "bad",
            landmark_count: 3,
            triplets: &BAD,
        };
        assert!(!topology.is_consistent());
        assert_eq!(BAD[0].max_index(), 5);
    }
}
