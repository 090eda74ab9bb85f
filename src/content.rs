//! Per-difficulty content files and the generator seam.
//!
//! Each difficulty entry in the info document points at a content file
//! holding its notes and lighting events. Filling those files is the job of a
//! [`ContentGenerator`]; this crate ships only [`EmptyContent`], which writes
//! the stub the game accepts for a not-yet-mapped difficulty:
//!
//! ```json
//! {"_version":"2.0.0","_notes":[],"_events":[]}
//! ```
//!
//! A generator receives a [`ContentSlot`], whose file name is rebuilt from
//! the characteristic and difficulty names alone, so it always agrees with
//! the `_beatmapFilename` recorded in `Info.dat`.

use crate::info::{CharacteristicSet, DifficultyEntry};
use crate::naming;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Format version written to content files.
pub const CONTENT_VERSION: &str = "2.0.0";

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Content generation failed: {0}")]
    GenerationFailed(String),
}

/// Notes and events for one difficulty.
///
/// Individual notes and events are opaque to this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyContent {
    #[serde(rename = "_version")]
    pub version: String,
    #[serde(rename = "_notes", default)]
    pub notes: Vec<Value>,
    #[serde(rename = "_events", default)]
    pub events: Vec<Value>,
}

impl DifficultyContent {
    pub fn empty() -> Self {
        Self {
            version: CONTENT_VERSION.to_string(),
            notes: Vec::new(),
            events: Vec::new(),
        }
    }
}

/// Identifies the content file for one (characteristic, difficulty) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentSlot {
    pub characteristic: String,
    pub difficulty: String,
    pub filename: String,
}

impl ContentSlot {
    pub fn new(characteristic: &str, difficulty: &str) -> Self {
        Self {
            characteristic: characteristic.to_string(),
            difficulty: difficulty.to_string(),
            filename: naming::beatmap_filename(difficulty, characteristic),
        }
    }

    pub fn for_entry(set: &CharacteristicSet, entry: &DifficultyEntry) -> Self {
        Self::new(set.name(), &entry.difficulty)
    }
}

/// Produces the content payload for a difficulty slot.
pub trait ContentGenerator {
    fn generate(&self, slot: &ContentSlot) -> Result<DifficultyContent, ContentError>;
}

/// Generator that leaves every difficulty empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyContent;

impl ContentGenerator for EmptyContent {
    fn generate(&self, _slot: &ContentSlot) -> Result<DifficultyContent, ContentError> {
        Ok(DifficultyContent::empty())
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::info::DifficultyParams;
    use crate::test_helpers::*;
    use std::sync::Mutex;

    /// Generator that records the slots it was asked for and returns one
    /// placeholder note per call.
    #[derive(Default)]
    pub struct RecordingGenerator {
        pub slots: Mutex<Vec<ContentSlot>>,
    }

    impl ContentGenerator for RecordingGenerator {
        fn generate(&self, slot: &ContentSlot) -> Result<DifficultyContent, ContentError> {
            self.slots.lock().unwrap().push(slot.clone());
            let mut content = DifficultyContent::empty();
            content
                .notes
                .push(serde_json::json!({"_time": 0.0, "_lineIndex": 1, "_lineLayer": 0}));
            Ok(content)
        }
    }

    /// Generator that always fails.
    pub struct FailingGenerator;

    impl ContentGenerator for FailingGenerator {
        fn generate(&self, slot: &ContentSlot) -> Result<DifficultyContent, ContentError> {
            Err(ContentError::GenerationFailed(format!(
                "no audio for {}",
                slot.filename
            )))
        }
    }

    #[test]
    fn empty_content_shape() {
        let value = serde_json::to_value(DifficultyContent::empty()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"_version": "2.0.0", "_notes": [], "_events": []})
        );
    }

    #[test]
    fn slot_filename_matches_naming() {
        let slot = ContentSlot::new("Standard", "ExpertPlus");
        assert_eq!(slot.filename, "ExpertPlusStandard.dat");
    }

    #[test]
    fn slot_for_entry_matches_recorded_filename() {
        let mut doc = sample_document();
        doc.upsert_difficulty("Lightshow", "Easy", DifficultyParams::new(10.0, 0.0))
            .unwrap();
        doc.upsert_difficulty("Standard", "Expert", DifficultyParams::new(16.0, 0.0))
            .unwrap();

        for set in doc.sets() {
            for entry in set.entries() {
                let slot = ContentSlot::for_entry(set, entry);
                assert_eq!(slot.filename, entry.beatmap_filename);
            }
        }
    }

    #[test]
    fn slot_does_not_depend_on_insertion_order() {
        let mut a = sample_document();
        let mut b = sample_document();
        a.upsert_difficulty("Standard", "Hard", DifficultyParams::new(10.0, 0.0))
            .unwrap();
        b.upsert_difficulty("Standard", "Easy", DifficultyParams::new(10.0, 0.0))
            .unwrap();
        b.upsert_difficulty("Standard", "Hard", DifficultyParams::new(10.0, 0.0))
            .unwrap();

        let set_a = find_set(&a, "Standard");
        let set_b = find_set(&b, "Standard");
        let slot_a = ContentSlot::for_entry(set_a, set_a.find("Hard").unwrap());
        let slot_b = ContentSlot::for_entry(set_b, set_b.find("Hard").unwrap());
        assert_eq!(slot_a, slot_b);
    }

    #[test]
    fn empty_generator_ignores_slot() {
        let content = EmptyContent
            .generate(&ContentSlot::new("OneSaber", "Normal"))
            .unwrap();
        assert!(content.notes.is_empty());
        assert!(content.events.is_empty());
    }

    #[test]
    fn content_deserializes_without_events() {
        let content: DifficultyContent =
            serde_json::from_str(r#"{"_version":"2.0.0","_notes":[]}"#).unwrap();
        assert!(content.events.is_empty());
    }
}
