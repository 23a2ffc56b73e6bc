//! JSON reference store.
//!
//! Stored gestures are JSON objects holding the raw landmark frames of one
//! clip:
//!
//! ```json
//! {
//!   "source_id": "hello-alice-0",
//!   "label": "hello",
//!   "signer": "alice",
//!   "pose": [[[0.1, 0.2, 0.0], ...], ...],
//!   "left_hand": [...],
//!   "right_hand": [...]
//! }
//! ```
//!
//! `label` and `signer` may be omitted, in which case they are read from a
//! `label-signer-take` source identifier. The three channel arrays are
//! mandatory; a missing or corrupt channel fails the whole load.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SignError};
use crate::landmarks::{GestureClip, Landmark};
use crate::library::{ReferenceLibrary, ReferenceRecord};

/// On-disk form of one reference gesture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredReference {
    /// Identifier of the source clip.
    pub source_id: String,
    /// Gesture name; parsed from `source_id` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Signer; parsed from `source_id` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signer: Option<String>,
    /// Pose frames.
    pub pose: Vec<Vec<Landmark>>,
    /// Left-hand frames.
    pub left_hand: Vec<Vec<Landmark>>,
    /// Right-hand frames.
    pub right_hand: Vec<Vec<Landmark>>,
}

impl StoredReference {
    /// Resolve label and signer and build a record.
    ///
    /// # Errors
    ///
    /// Returns [`SignError::MalformedReference`] when label or signer are
    /// missing and cannot be parsed from the source identifier.
    pub fn into_record(self) -> Result<ReferenceRecord> {
        let (label, signer) = match (self.label, self.signer) {
            (Some(label), Some(signer)) => (label, signer),
            (label, signer) => {
                let (parsed_label, parsed_signer) = parse_source_id(&self.source_id)?;
                (label.unwrap_or(parsed_label), signer.unwrap_or(parsed_signer))
            }
        };

        Ok(ReferenceRecord {
            label,
            signer,
            source_id: self.source_id,
            clip: GestureClip {
                pose: self.pose,
                left_hand: self.left_hand,
                right_hand: self.right_hand,
            },
        })
    }
}

impl From<&ReferenceRecord> for StoredReference {
    fn from(record: &ReferenceRecord) -> Self {
        Self {
            source_id: record.source_id.clone(),
            label: Some(record.label.clone()),
            signer: Some(record.signer.clone()),
            pose: record.clip.pose.clone(),
            left_hand: record.clip.left_hand.clone(),
            right_hand: record.clip.right_hand.clone(),
        }
    }
}

/// Split a `label-signer-take` source identifier into `(label, signer)`.
///
/// # Errors
///
/// Returns [`SignError::MalformedReference`] unless the identifier has
/// exactly three non-empty dash-separated parts.
pub fn parse_source_id(source_id: &str) -> Result<(String, String)> {
    let parts: Vec<&str> = source_id.split('-').collect();
    match parts.as_slice() {
        [label, signer, take] if !label.is_empty() && !signer.is_empty() && !take.is_empty() => {
            Ok(((*label).to_string(), (*signer).to_string()))
        }
        _ => Err(SignError::malformed_reference(
            source_id,
            "expected a 'label-signer-take' source identifier",
        )),
    }
}

/// Read a JSON array of stored references.
///
/// # Errors
///
/// Returns an error on invalid JSON or unresolvable label/signer.
pub fn read_reference_records<R: Read>(reader: R) -> Result<Vec<ReferenceRecord>> {
    let stored: Vec<StoredReference> = serde_json::from_reader(reader)?;
    stored.into_iter().map(StoredReference::into_record).collect()
}

/// Write records as a JSON array.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_reference_records<W: Write>(writer: W, records: &[ReferenceRecord]) -> Result<()> {
    let stored: Vec<StoredReference> = records.iter().map(StoredReference::from).collect();
    serde_json::to_writer(writer, &stored)?;
    Ok(())
}

/// Load a JSON file holding an array of stored references.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_reference_records(path: impl AsRef<Path>) -> Result<Vec<ReferenceRecord>> {
    let path = path.as_ref();
    log::debug!("Reading reference store {}", path.display());
    read_reference_records(BufReader::new(File::open(path)?))
}

/// Save records to a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save_reference_records(path: impl AsRef<Path>, records: &[ReferenceRecord]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_reference_records(&mut writer, records)?;
    writer.flush()?;
    Ok(())
}

/// Load every `*.json` file of a directory, one stored reference per file,
/// in file-name order.
///
/// # Errors
///
/// Returns an error if the directory or any file cannot be read or parsed.
pub fn load_reference_dir(dir: impl AsRef<Path>) -> Result<Vec<ReferenceRecord>> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir.as_ref())?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<_>>()?;
    paths.retain(|p| p.extension().is_some_and(|ext| ext == "json"));
    paths.sort();

    log::debug!(
        "Reading {} stored references from {}",
        paths.len(),
        dir.as_ref().display()
    );

    paths
        .iter()
        .map(|path| {
            let stored: StoredReference = serde_json::from_reader(BufReader::new(File::open(path)?))?;
            stored.into_record()
        })
        .collect()
}

/// Load and embed a reference library from a JSON file or a directory of
/// JSON files.
///
/// # Errors
///
/// Any read, parse or embedding failure aborts the load.
pub fn load_reference_library(path: impl AsRef<Path>) -> Result<ReferenceLibrary> {
    let path = path.as_ref();
    let records = if path.is_dir() {
        load_reference_dir(path)?
    } else {
        load_reference_records(path)?
    };
    ReferenceLibrary::from_records(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::{HolisticFrame, HAND_LANDMARKS};

    fn record(source_id: &str) -> ReferenceRecord {
        let hand = vec![[0.3, 0.2, 0.1]; HAND_LANDMARKS];
        let (label, signer) = parse_source_id(source_id).unwrap();
        ReferenceRecord {
            label,
            signer,
            source_id: source_id.to_string(),
            clip: (0..2)
                .map(|_| HolisticFrame::from_detections(None, Some(hand.clone()), None))
                .collect(),
        }
    }

    #[test]
    fn test_parse_source_id() {
        assert_eq!(
            parse_source_id("hello-alice-03").unwrap(),
            ("hello".to_string(), "alice".to_string())
        );
        assert!(parse_source_id("hello-alice").is_err());
        assert!(parse_source_id("a-b-c-d").is_err());
        assert!(parse_source_id("-alice-0").is_err());
    }

    #[test]
    fn test_label_fallback_to_source_id() {
        let json = r#"[{"source_id": "thanks-bob-1", "pose": [], "left_hand": [], "right_hand": []}]"#;
        let records = read_reference_records(json.as_bytes()).unwrap();
        assert_eq!(records[0].label, "thanks");
        assert_eq!(records[0].signer, "bob");
    }

    #[test]
    fn test_explicit_label_wins() {
        let json = r#"[{"source_id": "clip7", "label": "yes", "signer": "eve",
                        "pose": [], "left_hand": [], "right_hand": []}]"#;
        let records = read_reference_records(json.as_bytes()).unwrap();
        assert_eq!(records[0].label, "yes");
        assert_eq!(records[0].source_id, "clip7");
    }

    #[test]
    fn test_missing_channel_is_an_error() {
        let json = r#"[{"source_id": "thanks-bob-1", "pose": [], "left_hand": []}]"#;
        assert!(matches!(
            read_reference_records(json.as_bytes()),
            Err(SignError::Json(_))
        ));
    }

    #[test]
    fn test_write_then_read() {
        let records = vec![record("hello-alice-0"), record("yes-bob-1")];
        let mut buffer = Vec::new();
        write_reference_records(&mut buffer, &records).unwrap();
        let restored = read_reference_records(buffer.as_slice()).unwrap();
        assert_eq!(restored, records);
    }

    #[test]
    fn test_load_directory() {
        let dir = std::env::temp_dir().join(format!("sign_embedding_store_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        for id in ["b-bob-0", "a-alice-0"] {
            let file = File::create(dir.join(format!("{id}.json"))).unwrap();
            serde_json::to_writer(file, &StoredReference::from(&record(id))).unwrap();
        }
        fs::write(dir.join("notes.txt"), "ignored").unwrap();

        let library = load_reference_library(&dir).unwrap();
        fs::remove_dir_all(&dir).unwrap();

        assert_eq!(library.len(), 2);
        assert_eq!(library.entries()[0].source_id, "a-alice-0");
        assert!(library.entries()[1].embedding.has_left_hand);
    }
}
