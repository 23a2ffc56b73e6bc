//! Sign Embedding Library
//!
//! Sign-language gesture recognition by elastic comparison against a library
//! of reference gestures.
//!
//! Each clip of holistic landmark frames (pose + both hands) becomes a
//! four-channel sequence of joint angles. A recording is aligned channel by
//! channel against every reference with dynamic time warping, the library is
//! ranked by distance, and the closest references vote on the label.
//!
//! # Features
//!
//! - **Invariant features**: joint angles ignore translation, rotation and scale
//! - **Elastic alignment**: exact DTW or FastDTW per channel
//! - **Hand gating**: references showing different hands are never matched
//! - **Live recorder**: frame-driven state machine for camera loops
//!
//! # Quick Start
//!
//! ```
//! use sign_embedding::{
//!     compute_gesture_embedding, predict_sign, rank_references, GestureClip, HolisticFrame,
//!     MatchingConfig, ReferenceEntry, ReferenceLibrary, HAND_LANDMARKS,
//! };
//!
//! let hand = |spread: f64| -> Vec<[f64; 3]> {
//!     (0..HAND_LANDMARKS)
//!         .map(|i| [i as f64 * 0.01, (i as f64 * spread).sin(), 0.0])
//!         .collect()
//! };
//! let clip = |spread: f64| -> GestureClip {
//!     (0..10)
//!         .map(|_| HolisticFrame::from_detections(None, None, Some(hand(spread))))
//!         .collect()
//! };
//!
//! let library: ReferenceLibrary = [
//!     ReferenceEntry::new("open", "ana", "open-ana-0", compute_gesture_embedding(&clip(0.5))?),
//!     ReferenceEntry::new("fist", "ana", "fist-ana-0", compute_gesture_embedding(&clip(2.0))?),
//! ]
//! .into_iter()
//! .collect();
//!
//! let config = MatchingConfig::live();
//! let recorded = compute_gesture_embedding(&clip(0.55))?;
//! let ranking = rank_references(&recorded, &library, &config);
//! let prediction = predict_sign(&ranking, config.batch_size, config.threshold)?;
//!
//! assert_eq!(prediction.label(), Some("open"));
//! # Ok::<(), sign_embedding::SignError>(())
//! ```
//!
//! # Channels
//!
//! | Channel | Angles | Active when |
//! |---------|--------|-------------|
//! | left hand | 20 | left hand detected |
//! | left arm | 3 | left hand detected |
//! | right hand | 20 | right hand detected |
//! | right arm | 3 | right hand detected |

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

pub mod config;
pub mod distance;
pub mod embedder;
pub mod embedding;
pub mod encoder;
pub mod error;
pub mod evaluation;
pub mod landmarks;
pub mod library;
pub mod math;
pub mod predictor;
pub mod recorder;
#[cfg(feature = "serde")]
pub mod store;
pub mod topology;

// Re-exports for convenient access
pub use config::{DtwConfig, DtwMethod, LocalMetric, MatchingConfig};
pub use distance::{
    compute_gesture_distance, compute_gesture_distance_detailed, rank_references,
    DistanceBreakdown, RankedMatch, Ranking,
};
pub use embedder::{compute_embedding_from_frames, compute_gesture_embedding};
pub use embedding::{Channel, GestureEmbedding};
pub use encoder::JointAngleEncoder;
pub use error::{Result, SignError};
pub use evaluation::{evaluate_signer, EvaluationRun, EvaluationSample};
pub use landmarks::{GestureClip, HolisticFrame, Landmark, HAND_LANDMARKS, POSE_LANDMARKS};
pub use library::{ReferenceEntry, ReferenceLibrary, ReferenceRecord};
pub use predictor::{predict_sign, Prediction, UNKNOWN_SIGN};
pub use recorder::{RecorderState, RecorderUpdate, SignRecorder};
#[cfg(feature = "serde")]
pub use store::{load_reference_library, parse_source_id, StoredReference};
pub use topology::{AngleTriplet, Topology};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Angles per hand frame.
pub const HAND_ANGLES: usize = 20;

/// Angles per arm (pose) frame.
pub const ARM_ANGLES: usize = 3;
