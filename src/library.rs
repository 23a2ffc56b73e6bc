//! Reference library: the labelled gestures a recording is compared against.
//!
//! The library is built once from stored clips and is read-only afterwards.
//! Ranking never writes into it; see [`crate::distance`].

use std::collections::BTreeMap;

use crate::embedder::compute_gesture_embedding;
use crate::embedding::GestureEmbedding;
use crate::error::{Result, SignError};
use crate::landmarks::GestureClip;

/// Raw stored gesture, before embedding.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceRecord {
    /// Gesture name.
    pub label: String,
    /// Person who performed the gesture.
    pub signer: String,
    /// Identifier of the source clip.
    pub source_id: String,
    /// Landmark frames of the clip.
    pub clip: GestureClip,
}

/// One embedded reference gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceEntry {
    /// Gesture name.
    pub label: String,
    /// Person who performed the gesture.
    pub signer: String,
    /// Identifier of the source clip.
    pub source_id: String,
    /// Angle representation of the clip.
    pub embedding: GestureEmbedding,
}

impl ReferenceEntry {
    /// Create an entry from an already computed embedding.
    #[must_use]
    pub fn new(
        label: impl Into<String>,
        signer: impl Into<String>,
        source_id: impl Into<String>,
        embedding: GestureEmbedding,
    ) -> Self {
        Self {
            label: label.into(),
            signer: signer.into(),
            source_id: source_id.into(),
            embedding,
        }
    }

    /// Embed a stored record.
    ///
    /// # Errors
    ///
    /// Returns [`SignError::MalformedReference`] if the record's clip cannot
    /// be embedded.
    pub fn from_record(record: ReferenceRecord) -> Result<Self> {
        let embedding = compute_gesture_embedding(&record.clip)
            .map_err(|e| SignError::malformed_reference(&record.source_id, e.to_string()))?;

        Ok(Self {
            label: record.label,
            signer: record.signer,
            source_id: record.source_id,
            embedding,
        })
    }
}

/// Ordered collection of reference gestures.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceLibrary {
    entries: Vec<ReferenceEntry>,
}

impl ReferenceLibrary {
    /// Wrap already embedded entries, keeping their order.
    #[must_use]
    pub fn new(entries: Vec<ReferenceEntry>) -> Self {
        Self { entries }
    }

    /// Embed every stored record.
    ///
    /// # Errors
    ///
    /// The first malformed record aborts construction; no partial library is
    /// returned.
    pub fn from_records(records: impl IntoIterator<Item = ReferenceRecord>) -> Result<Self> {
        let entries = records
            .into_iter()
            .map(ReferenceEntry::from_record)
            .collect::<Result<Vec<_>>>()?;

        let library = Self::new(entries);
        log::info!(
            "Loaded {} reference gestures ({} labels, {} signers)",
            library.len(),
            library.label_counts().len(),
            library.signers().len(),
        );
        for (label, count) in library.label_counts() {
            log::debug!("  {label}: {count}");
        }

        Ok(library)
    }

    /// Entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[ReferenceEntry] {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the library holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ReferenceEntry> {
        self.entries.get(index)
    }

    /// Append an entry.
    pub fn push(&mut self, entry: ReferenceEntry) {
        self.entries.push(entry);
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, ReferenceEntry> {
        self.entries.iter()
    }

    /// Number of entries per label, ordered by label.
    #[must_use]
    pub fn label_counts(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for entry in &self.entries {
            *counts.entry(entry.label.as_str()).or_insert(0) += 1;
        }
        counts
    }

    /// Distinct signers, in first-seen order.
    #[must_use]
    pub fn signers(&self) -> Vec<&str> {
        let mut signers: Vec<&str> = Vec::new();
        for entry in &self.entries {
            if !signers.contains(&entry.signer.as_str()) {
                signers.push(&entry.signer);
            }
        }
        signers
    }

    /// Split into `(training, validation)`, where validation holds exactly
    /// the entries performed by `signer`.
    #[must_use]
    pub fn split_by_signer(&self, signer: &str) -> (Self, Self) {
        let (validation, training): (Vec<_>, Vec<_>) = self
            .entries
            .iter()
            .cloned()
            .partition(|entry| entry.signer == signer);
        (Self::new(training), Self::new(validation))
    }
}

impl FromIterator<ReferenceEntry> for ReferenceLibrary {
    fn from_iter<I: IntoIterator<Item = ReferenceEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ReferenceLibrary {
    type Item = &'a ReferenceEntry;
    type IntoIter = std::slice::Iter<'a, ReferenceEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
