//! Clip-level embedding: raw landmark frames to a [`GestureEmbedding`].
//!
//! # Pipeline Overview
//!
//! 1. Check that the three channels hold the same number of frames, and
//!    that every frame has the landmark count of its topology
//! 2. Derive the hand presence flags from the raw coordinate sums
//! 3. Per channel, drop undetected frames (raw sum exactly zero)
//! 4. Encode the remaining frames; pose frames are encoded twice, once per arm

use crate::embedding::{AngleSequence, GestureEmbedding};
use crate::encoder::JointAngleEncoder;
use crate::error::{Result, SignError};
use crate::landmarks::{coordinate_sum, is_undetected, GestureClip, Landmark, HAND_LANDMARKS, POSE_LANDMARKS};

/// Compute the gesture embedding of a recorded clip.
///
/// # Errors
///
/// Returns an error if the channels hold different frame counts or if a frame
/// has the wrong number of landmarks.
///
/// # Example
///
/// ```
/// use sign_embedding::{compute_gesture_embedding, GestureClip, HolisticFrame};
///
/// let clip: GestureClip = (0..10).map(|_| HolisticFrame::empty()).collect();
/// let embedding = compute_gesture_embedding(&clip)?;
///
/// assert!(!embedding.has_left_hand);
/// assert!(embedding.left_hand.is_empty());
/// # Ok::<(), sign_embedding::SignError>(())
/// ```
pub fn compute_gesture_embedding(clip: &GestureClip) -> Result<GestureEmbedding> {
    compute_embedding_from_frames(&clip.pose, &clip.left_hand, &clip.right_hand)
}

/// Compute a gesture embedding from three parallel frame sequences.
///
/// # Errors
///
/// See [`compute_gesture_embedding`].
pub fn compute_embedding_from_frames(
    pose: &[Vec<Landmark>],
    left_hand: &[Vec<Landmark>],
    right_hand: &[Vec<Landmark>],
) -> Result<GestureEmbedding> {
    validate_frames(pose, left_hand, right_hand)?;

    let hand = JointAngleEncoder::hand();

    let embedding = GestureEmbedding {
        left_hand: encode_detected(left_hand, &hand),
        right_hand: encode_detected(right_hand, &hand),
        left_arm: encode_detected(pose, &JointAngleEncoder::left_arm()),
        right_arm: encode_detected(pose, &JointAngleEncoder::right_arm()),
        has_left_hand: is_present(left_hand),
        has_right_hand: is_present(right_hand),
    };

    log::debug!(
        "Embedded {} frames: lh={} rh={} la={} ra={} (hands: left={}, right={})",
        pose.len(),
        embedding.left_hand.len(),
        embedding.right_hand.len(),
        embedding.left_arm.len(),
        embedding.right_arm.len(),
        embedding.has_left_hand,
        embedding.has_right_hand,
    );

    Ok(embedding)
}

/// A body part is present if its raw coordinates summed over the whole clip are nonzero.
fn is_present(frames: &[Vec<Landmark>]) -> bool {
    frames.iter().map(|f| coordinate_sum(f)).sum::<f64>() != 0.0
}

fn encode_detected(frames: &[Vec<Landmark>], encoder: &JointAngleEncoder) -> AngleSequence {
    frames
        .iter()
        .filter(|frame| !is_undetected(frame))
        .map(|frame| encoder.encode(frame))
        .collect()
}

fn validate_frames(
    pose: &[Vec<Landmark>],
    left_hand: &[Vec<Landmark>],
    right_hand: &[Vec<Landmark>],
) -> Result<()> {
    let n = pose.len();

    if left_hand.len() != n {
        return Err(SignError::length_mismatch("left_hand", n, left_hand.len()));
    }
    if right_hand.len() != n {
        return Err(SignError::length_mismatch("right_hand", n, right_hand.len()));
    }

    let channels: [(&'static str, &[Vec<Landmark>], usize); 3] = [
        ("pose", pose, POSE_LANDMARKS),
        ("left_hand", left_hand, HAND_LANDMARKS),
        ("right_hand", right_hand, HAND_LANDMARKS),
    ];

    for (name, frames, expected) in channels {
        for (i, frame) in frames.iter().enumerate() {
            if frame.len() != expected {
                return Err(SignError::landmark_count(name, i, expected, frame.len()));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::HolisticFrame;
    use crate::topology::{INDEX_MCP, LEFT_ELBOW};

    fn hand_frame(seed: f64) -> Vec<Landmark> {
        (0..HAND_LANDMARKS)
            .map(|i| {
                let t = i as f64 * 0.3 + seed;
                [t.sin(), t.cos(), 0.1 * t]
            })
            .collect()
    }

    fn pose_frame(seed: f64) -> Vec<Landmark> {
        (0..POSE_LANDMARKS)
            .map(|i| {
                let t = i as f64 * 0.2 + seed;
                [t.cos(), 0.5 * t.sin(), 0.0]
            })
            .collect()
    }

    #[test]
    fn test_undetected_frames_are_dropped() {
        let clip: GestureClip = (0..6)
            .map(|i| {
                let lh = (i % 2 == 0).then(|| hand_frame(i as f64));
                HolisticFrame::from_detections(Some(pose_frame(i as f64)), lh, None)
            })
            .collect();

        let emb = compute_gesture_embedding(&clip).unwrap();
        assert_eq!(emb.left_hand.len(), 3);
        assert_eq!(emb.left_arm.len(), 6);
        assert_eq!(emb.right_arm.len(), 6);
        assert!(emb.right_hand.is_empty());
        assert!(emb.has_left_hand);
        assert!(!emb.has_right_hand);
    }

    #[test]
    fn test_vector_dimensions() {
        let clip: GestureClip = (0..3)
            .map(|i| {
                HolisticFrame::from_detections(
                    Some(pose_frame(i as f64)),
                    Some(hand_frame(i as f64)),
                    Some(hand_frame(-(i as f64))),
                )
            })
            .collect();

        let emb = compute_gesture_embedding(&clip).unwrap();
        assert!(emb.left_hand.iter().all(|v| v.len() == 20));
        assert!(emb.right_hand.iter().all(|v| v.len() == 20));
        assert!(emb.left_arm.iter().all(|v| v.len() == 3));
        assert!(emb.right_arm.iter().all(|v| v.len() == 3));
    }

    #[test]
    fn test_all_zero_clip() {
        let clip: GestureClip = (0..5).map(|_| HolisticFrame::empty()).collect();
        let emb = compute_gesture_embedding(&clip).unwrap();
        assert!(emb.is_empty());
        assert!(!emb.has_left_hand);
        assert!(!emb.has_right_hand);
    }

    #[test]
    fn test_empty_clip() {
        let emb = compute_gesture_embedding(&GestureClip::default()).unwrap();
        assert!(emb.is_empty());
    }

    #[test]
    fn test_length_mismatch() {
        let mut clip: GestureClip = (0..4).map(|_| HolisticFrame::empty()).collect();
        clip.right_hand.pop();
        let err = compute_gesture_embedding(&clip).unwrap_err();
        assert!(matches!(
            err,
            SignError::LengthMismatch {
                channel: "right_hand",
                expected: 4,
                actual: 3
            }
        ));
    }

    #[test]
    fn test_wrong_landmark_count() {
        let mut clip: GestureClip = (0..2).map(|_| HolisticFrame::empty()).collect();
        clip.left_hand[1].truncate(20);
        let err = compute_gesture_embedding(&clip).unwrap_err();
        assert!(matches!(err, SignError::LandmarkCount { frame: 1, .. }));
    }

    #[test]
    fn test_non_finite_coordinates_become_zero_angles() {
        let clip: GestureClip = (0..2)
            .map(|i| {
                let mut hand = hand_frame(i as f64);
                hand[INDEX_MCP] = [f64::NAN, 0.2, 0.3];
                let mut pose = pose_frame(i as f64);
                pose[LEFT_ELBOW] = [f64::INFINITY, 0.0, 0.0];
                HolisticFrame::from_detections(Some(pose), Some(hand), None)
            })
            .collect();

        let emb = compute_gesture_embedding(&clip).unwrap();
        assert!(emb.has_left_hand);
        assert_eq!(emb.left_hand.len(), 2);
        assert_eq!(emb.left_arm.len(), 2);

        for angles in &emb.left_hand {
            assert!(angles.iter().all(|a| a.is_finite()));
            for (k, triplet) in JointAngleEncoder::hand().topology().triplets.iter().enumerate() {
                if [triplet.a, triplet.vertex, triplet.c].contains(&INDEX_MCP) {
                    assert_eq!(angles[k], 0.0);
                }
            }
        }
        assert!(emb.left_arm.iter().flatten().all(|&a| a == 0.0));
        assert!(emb.right_arm.iter().flatten().all(|a| a.is_finite()));
    }
}
