//! Offline leave-one-signer-out evaluation loop.
//!
//! Every gesture performed by the held-out signer is ranked against the
//! gestures of all other signers and predicted with the configured vote. The
//! result is the list of (true, predicted) pairs; turning it into accuracy
//! figures or reports is left to the caller.

use crate::config::MatchingConfig;
use crate::distance::rank_references;
use crate::error::{Result, SignError};
use crate::library::ReferenceLibrary;
use crate::predictor::{predict_sign, Prediction};

/// Prediction for one held-out gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationSample {
    /// Identifier of the held-out clip.
    pub source_id: String,
    /// Label the clip was recorded as.
    pub true_label: String,
    /// Label predicted from the training library.
    pub predicted: Prediction,
}

impl EvaluationSample {
    /// Whether the prediction names the true label.
    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.predicted.label() == Some(self.true_label.as_str())
    }
}

/// Outcome of holding out one signer.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationRun {
    /// The held-out signer.
    pub signer: String,
    /// References available for comparison.
    pub training_size: usize,
    /// Held-out gestures.
    pub validation_size: usize,
    /// One sample per held-out gesture, in library order.
    pub samples: Vec<EvaluationSample>,
}

impl EvaluationRun {
    /// True labels, in sample order.
    #[must_use]
    pub fn true_labels(&self) -> Vec<&str> {
        self.samples.iter().map(|s| s.true_label.as_str()).collect()
    }

    /// Predictions, in sample order.
    #[must_use]
    pub fn predictions(&self) -> Vec<&Prediction> {
        self.samples.iter().map(|s| &s.predicted).collect()
    }
}

/// Hold out `signer` and predict each of their gestures from the rest.
///
/// # Errors
///
/// Returns an error if `config` is invalid or `signer` has no gestures in
/// the library.
pub fn evaluate_signer(
    library: &ReferenceLibrary,
    signer: &str,
    config: &MatchingConfig,
) -> Result<EvaluationRun> {
    config.validate()?;

    let (training, validation) = library.split_by_signer(signer);
    if validation.is_empty() {
        return Err(SignError::invalid_input(format!(
            "Signer '{signer}' has no gestures in the library"
        )));
    }

    log::info!(
        "Evaluating signer '{signer}': {} training, {} validation",
        training.len(),
        validation.len()
    );

    let mut samples = Vec::with_capacity(validation.len());
    for entry in &validation {
        let ranking = rank_references(&entry.embedding, &training, config);
        let predicted = predict_sign(&ranking, config.batch_size, config.threshold)?;

        log::debug!(
            "{} ({}): predicted {predicted}",
            entry.source_id,
            entry.label
        );
        for m in ranking.top(config.diagnostics_top_n) {
            log::trace!("  {} {} {:.3} {}", m.label, m.signer, m.distance(), m.source_id);
        }

        samples.push(EvaluationSample {
            source_id: entry.source_id.clone(),
            true_label: entry.label.clone(),
            predicted,
        });
    }

    Ok(EvaluationRun {
        signer: signer.to_string(),
        training_size: training.len(),
        validation_size: validation.len(),
        samples,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DtwMethod;
    use crate::embedding::GestureEmbedding;
    use crate::library::ReferenceEntry;

    fn embedding(value: f64) -> GestureEmbedding {
        GestureEmbedding {
            left_hand: vec![vec![value; 20]; 5],
            left_arm: vec![vec![value; 3]; 5],
            has_left_hand: true,
            ..GestureEmbedding::default()
        }
    }

    fn library() -> ReferenceLibrary {
        [
            ReferenceEntry::new("low", "alice", "low-alice-0", embedding(0.1)),
            ReferenceEntry::new("high", "alice", "high-alice-0", embedding(2.0)),
            ReferenceEntry::new("low", "bob", "low-bob-0", embedding(0.15)),
            ReferenceEntry::new("high", "bob", "high-bob-0", embedding(2.1)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_leave_one_signer_out() {
        let config = MatchingConfig::live().with_dtw_method(DtwMethod::Exact);
        let run = evaluate_signer(&library(), "bob", &config).unwrap();

        assert_eq!(run.training_size, 2);
        assert_eq!(run.validation_size, 2);
        assert_eq!(run.true_labels(), ["low", "high"]);
        assert!(run.samples.iter().all(EvaluationSample::is_correct));
    }

    #[test]
    fn test_unknown_signer() {
        let err = evaluate_signer(&library(), "carol", &MatchingConfig::offline()).unwrap_err();
        assert!(matches!(err, SignError::InvalidInput(_)));
    }

    #[test]
    fn test_large_batch_dilutes_vote() {
        // k = 5 over a 2-entry training set: each label holds 1 of 2 slots.
        let config = MatchingConfig::offline().with_threshold(0.6);
        let run = evaluate_signer(&library(), "alice", &config).unwrap();
        assert!(run.predictions().iter().all(|p| p.is_unknown()));
        assert!(!run.samples[0].is_correct());
    }
}
