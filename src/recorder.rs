//! Frame-synchronous recorder for live recognition.
//!
//! This module provides [`SignRecorder`], a small state machine driven by
//! one [`SignRecorder::process_frame`] call per camera frame:
//!
//! ```text
//! Idle --start_recording()--> Recording { buffer }
//! Recording --buffer reaches record_length--> compare, clear buffer --> Idle
//! ```
//!
//! The comparison pass runs synchronously inside the call that completes the
//! buffer. No background task is involved.

use crate::config::MatchingConfig;
use crate::distance::{rank_references, RankedMatch, Ranking};
use crate::embedder::compute_gesture_embedding;
use crate::error::Result;
use crate::landmarks::{GestureClip, HolisticFrame};
use crate::library::ReferenceLibrary;
use crate::predictor::{predict_sign, Prediction};

/// Recorder state.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RecorderState {
    /// Waiting for a recording trigger.
    #[default]
    Idle,
    /// Accumulating frames.
    Recording {
        /// Frames captured so far.
        buffer: GestureClip,
    },
}

/// What the caller gets back after each frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RecorderUpdate {
    /// Latest prediction; `None` until a comparison pass has completed.
    pub prediction: Option<Prediction>,
    /// Whether the recorder is still accumulating frames.
    pub is_recording: bool,
}

/// Live recorder owning the reference library.
///
/// # Example
///
/// ```
/// use sign_embedding::{HolisticFrame, MatchingConfig, ReferenceLibrary, SignRecorder};
///
/// let config = MatchingConfig::live().with_record_length(3);
/// let mut recorder = SignRecorder::new(ReferenceLibrary::default(), config)?;
///
/// recorder.start_recording();
/// for _ in 0..3 {
///     recorder.process_frame(HolisticFrame::empty())?;
/// }
///
/// // An empty library can only produce the unknown sentinel.
/// let update = recorder.process_frame(HolisticFrame::empty())?;
/// assert!(!update.is_recording);
/// assert!(update.prediction.unwrap().is_unknown());
/// # Ok::<(), sign_embedding::SignError>(())
/// ```
#[derive(Debug)]
pub struct SignRecorder {
    /// Reference gestures, read-only.
    library: ReferenceLibrary,

    /// Matching and vote parameters.
    config: MatchingConfig,

    /// Idle or recording.
    state: RecorderState,

    /// Ranking of the last comparison pass.
    last_ranking: Option<Ranking>,

    /// Prediction of the last comparison pass.
    last_prediction: Option<Prediction>,
}

impl SignRecorder {
    /// Create an idle recorder.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid.
    pub fn new(library: ReferenceLibrary, config: MatchingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            library,
            config,
            state: RecorderState::Idle,
            last_ranking: None,
            last_prediction: None,
        })
    }

    /// Start a new recording, discarding the previous result.
    ///
    /// Calling this while already recording restarts the buffer.
    pub fn start_recording(&mut self) {
        self.last_ranking = None;
        self.last_prediction = None;
        self.state = RecorderState::Recording {
            buffer: GestureClip::default(),
        };
        log::info!(
            "Recording started ({} frames)",
            self.config.record_length
        );
    }

    /// Feed one frame.
    ///
    /// While recording, the frame is buffered. The frame that completes the
    /// buffer triggers a comparison pass and returns the recorder to idle.
    /// Frames received while idle are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the buffered clip cannot be embedded (malformed
    /// frame shapes). The recorder is idle afterwards.
    pub fn process_frame(&mut self, frame: HolisticFrame) -> Result<RecorderUpdate> {
        if let RecorderState::Recording { buffer } = &mut self.state {
            buffer.push(frame);

            if buffer.n_frames() >= self.config.record_length {
                let clip = std::mem::take(buffer);
                self.state = RecorderState::Idle;
                self.compare(&clip)?;
            }
        }

        Ok(RecorderUpdate {
            prediction: self.last_prediction.clone(),
            is_recording: self.is_recording(),
        })
    }

    fn compare(&mut self, clip: &GestureClip) -> Result<()> {
        let recorded = compute_gesture_embedding(clip)?;
        let ranking = rank_references(&recorded, &self.library, &self.config);
        let prediction = predict_sign(&ranking, self.config.batch_size, self.config.threshold)?;

        log::info!("Comparison pass over {} frames: {prediction}", clip.n_frames());
        for m in ranking.top(self.config.diagnostics_top_n) {
            log::debug!(
                "  {:<16} {:<10} {:>10.3} {}",
                m.label,
                m.signer,
                m.distance(),
                m.source_id
            );
        }

        self.last_ranking = Some(ranking);
        self.last_prediction = Some(prediction);
        Ok(())
    }

    /// Whether frames are being accumulated.
    #[must_use]
    pub const fn is_recording(&self) -> bool {
        matches!(self.state, RecorderState::Recording { .. })
    }

    /// Frames buffered so far in the current recording.
    #[must_use]
    pub fn n_buffered(&self) -> usize {
        match &self.state {
            RecorderState::Recording { buffer } => buffer.n_frames(),
            RecorderState::Idle => 0,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &RecorderState {
        &self.state
    }

    /// Prediction of the last comparison pass.
    #[must_use]
    pub const fn last_prediction(&self) -> Option<&Prediction> {
        self.last_prediction.as_ref()
    }

    /// The `n` closest references of the last comparison pass.
    #[must_use]
    pub fn top_matches(&self, n: usize) -> &[RankedMatch] {
        match &self.last_ranking {
            Some(ranking) => ranking.top(n),
            None => &[],
        }
    }

    /// Full ranking of the last comparison pass.
    #[must_use]
    pub const fn last_ranking(&self) -> Option<&Ranking> {
        self.last_ranking.as_ref()
    }

    /// Stop recording and forget the last result.
    pub fn reset(&mut self) {
        self.state = RecorderState::Idle;
        self.last_ranking = None;
        self.last_prediction = None;
        log::debug!("Recorder reset");
    }

    /// Reference library.
    #[must_use]
    pub const fn library(&self) -> &ReferenceLibrary {
        &self.library
    }

    /// Get reference to configuration.
    #[must_use]
    pub const fn config(&self) -> &MatchingConfig {
        &self.config
    }
}
