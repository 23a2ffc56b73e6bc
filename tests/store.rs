//! Reference store tests (JSON persistence).

#![cfg(feature = "serde")]

use std::fs;

use sign_embedding::store::{load_reference_records, save_reference_records};
use sign_embedding::{
    load_reference_library, GestureClip, HolisticFrame, ReferenceRecord, SignError,
    HAND_LANDMARKS,
};

fn temp_dir(name: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("sign_embedding_{name}_{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn clip(n: usize, tilt: f64) -> GestureClip {
    (0..n)
        .map(|i| {
            let hand = (0..HAND_LANDMARKS)
                .map(|j| [j as f64 * 0.02, (j as f64 * tilt + i as f64 * 0.01).cos(), 0.0])
                .collect();
            HolisticFrame::from_detections(None, Some(hand), None)
        })
        .collect()
}

#[test]
fn test_save_and_load_library() {
    let dir = temp_dir("file");
    let path = dir.join("library.json");

    let records = vec![
        ReferenceRecord {
            label: "hello".into(),
            signer: "alice".into(),
            source_id: "hello-alice-0".into(),
            clip: clip(6, 0.3),
        },
        ReferenceRecord {
            label: "bye".into(),
            signer: "alice".into(),
            source_id: "bye-alice-0".into(),
            clip: clip(4, 0.9),
        },
    ];
    save_reference_records(&path, &records).unwrap();

    assert_eq!(load_reference_records(&path).unwrap(), records);

    let library = load_reference_library(&path).unwrap();
    fs::remove_dir_all(&dir).unwrap();

    assert_eq!(library.len(), 2);
    assert_eq!(library.signers(), ["alice"]);
    assert_eq!(library.entries()[0].embedding.left_hand.len(), 6);
    assert!(!library.entries()[1].embedding.has_right_hand);
}

#[test]
fn test_bad_source_id_is_rejected() {
    let dir = temp_dir("bad_id");
    fs::write(
        dir.join("x.json"),
        r#"{"source_id": "nolabel", "pose": [], "left_hand": [], "right_hand": []}"#,
    )
    .unwrap();

    let err = load_reference_library(&dir).unwrap_err();
    fs::remove_dir_all(&dir).unwrap();
    assert!(matches!(err, SignError::MalformedReference { .. }));
}

#[test]
fn test_missing_file() {
    let err = load_reference_library("/nonexistent/sign_embedding/library.json").unwrap_err();
    assert!(matches!(err, SignError::Io(_)));
}
