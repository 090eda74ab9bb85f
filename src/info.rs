//! The info document (`Info.dat`) and its incremental builder.
//!
//! An info document describes one song and every playable difficulty shipped
//! with it. Difficulties are grouped into *characteristic sets* (game modes
//! such as `Standard`, `OneSaber` or `Lightshow`):
//!
//! ```text
//! InfoDocument
//! ├── song / environment / preview fields
//! └── difficulty sets (first-seen order)
//!     ├── Standard
//!     │   ├── Hard        rank 5
//!     │   └── ExpertPlus  rank 9
//!     └── Lightshow
//!         └── Easy        rank 1
//! ```
//!
//! ## Building
//!
//! A document is created once with [`InfoDocument::new`] and then filled by
//! repeated calls to [`InfoDocument::upsert_difficulty`]. Upserts keep these
//! invariants no matter what order they arrive in:
//!
//! - Entries inside a set are strictly ascending by rank.
//! - A set never holds two entries with the same rank; upserting an existing
//!   difficulty replaces it in place.
//! - Sets are appended the first time their characteristic is seen and are
//!   never reordered or removed.
//!
//! An upsert either succeeds completely or fails before touching the
//! document.

use crate::difficulty::RankTable;
use crate::naming;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::cmp::Ordering;
use thiserror::Error;
use tracing::debug;

/// Format version written to `_version`.
pub const INFO_VERSION: &str = "2.0.0";
/// Level author recorded on every generated map.
pub const LEVEL_AUTHOR: &str = "AutoBeat";
/// Environment used by 360/90 degree characteristics.
pub const ALL_DIRECTIONS_ENVIRONMENT: &str = "GlassDesertEnvironment";
const SHUFFLE: u32 = 0;
const SHUFFLE_PERIOD: f64 = 0.5;
const SONG_TIME_OFFSET: f64 = 0.0;

#[derive(Error, Debug, PartialEq)]
pub enum InfoError {
    #[error("Unknown difficulty '{0}'")]
    UnknownDifficulty(String),
    #[error("Invalid {field} for {difficulty}: {value} (must be {rule})")]
    InvalidParameter {
        difficulty: String,
        field: &'static str,
        value: f64,
        rule: &'static str,
    },
}

/// Song-level metadata supplied once when the document is created.
#[derive(Debug, Clone, PartialEq)]
pub struct SongMetadata {
    pub name: String,
    pub sub_name: String,
    pub artist: String,
    /// Tempo in beats per minute.
    pub bpm: f64,
    /// Audio file name, relative to the package folder.
    pub audio: String,
    /// Cover image file name, relative to the package folder. May be empty.
    pub cover: String,
}

/// Preview window played in the song browser, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preview {
    pub start: f64,
    pub duration: f64,
}

/// Per-difficulty parameters passed to an upsert.
#[derive(Debug, Clone, PartialEq)]
pub struct DifficultyParams {
    /// Note jump movement speed.
    pub njs: f64,
    /// Note jump start beat offset.
    pub offset: f64,
    pub custom_data: Option<Value>,
}

impl DifficultyParams {
    pub fn new(njs: f64, offset: f64) -> Self {
        Self {
            njs,
            offset,
            custom_data: None,
        }
    }

    pub fn with_custom_data(mut self, custom_data: Value) -> Self {
        self.custom_data = Some(custom_data);
        self
    }

    /// NJS must be finite and positive, the offset finite.
    pub fn check(&self, difficulty: &str) -> Result<(), InfoError> {
        let invalid = |field, value, rule| InfoError::InvalidParameter {
            difficulty: difficulty.to_string(),
            field,
            value,
            rule,
        };
        if !(self.njs.is_finite() && self.njs > 0.0) {
            return Err(invalid("njs", self.njs, "a positive number"));
        }
        if !self.offset.is_finite() {
            return Err(invalid("offset", self.offset, "a finite number"));
        }
        Ok(())
    }
}

/// What an upsert did to its characteristic set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// A new entry was inserted at this index.
    Inserted(usize),
    /// The entry at this index was replaced.
    Replaced(usize),
}

/// Where a new entry belongs in a rank-sorted entry list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Insert(usize),
    Replace(usize),
}

/// Single pass over `entries`: the first entry with a greater rank marks the
/// insertion point, an equal rank marks a replacement, otherwise append.
fn find_slot(entries: &[DifficultyEntry], rank: u32) -> Slot {
    for (i, entry) in entries.iter().enumerate() {
        match entry.rank.cmp(&rank) {
            Ordering::Greater => return Slot::Insert(i),
            Ordering::Equal => return Slot::Replace(i),
            Ordering::Less => {}
        }
    }
    Slot::Insert(entries.len())
}

/// One playable difficulty within a characteristic set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyEntry {
    #[serde(rename = "_difficulty")]
    pub difficulty: String,
    #[serde(rename = "_difficultyRank")]
    pub rank: u32,
    #[serde(rename = "_beatmapFilename")]
    pub beatmap_filename: String,
    #[serde(rename = "_noteJumpMovementSpeed")]
    pub note_jump_movement_speed: f64,
    #[serde(rename = "_noteJumpStartBeatOffset")]
    pub note_jump_start_beat_offset: f64,
    #[serde(
        rename = "_customData",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub custom_data: Option<Value>,
    /// Keys this crate does not model, written back unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A characteristic (game mode) and its rank-sorted difficulties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacteristicSet {
    #[serde(rename = "_beatmapCharacteristicName")]
    name: String,
    #[serde(rename = "_difficultyBeatmaps", default)]
    entries: Vec<DifficultyEntry>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl CharacteristicSet {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            entries: Vec::new(),
            extra: Map::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Entries in ascending rank order.
    pub fn entries(&self) -> &[DifficultyEntry] {
        &self.entries
    }

    pub fn find(&self, difficulty: &str) -> Option<&DifficultyEntry> {
        self.entries.iter().find(|e| e.difficulty == difficulty)
    }
}

/// Root of the info document, serialized verbatim as `Info.dat`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfoDocument {
    #[serde(rename = "_version")]
    pub version: String,
    #[serde(rename = "_songName")]
    pub song_name: String,
    #[serde(rename = "_songSubName")]
    pub song_sub_name: String,
    #[serde(rename = "_songAuthorName")]
    pub song_author_name: String,
    #[serde(rename = "_levelAuthorName")]
    pub level_author_name: String,
    #[serde(rename = "_beatsPerMinute")]
    pub beats_per_minute: f64,
    #[serde(rename = "_shuffle")]
    pub shuffle: u32,
    #[serde(rename = "_shufflePeriod")]
    pub shuffle_period: f64,
    #[serde(rename = "_previewStartTime")]
    pub preview_start_time: f64,
    #[serde(rename = "_previewDuration")]
    pub preview_duration: f64,
    #[serde(rename = "_songFilename")]
    pub song_filename: String,
    #[serde(rename = "_coverImageFilename")]
    pub cover_image_filename: String,
    #[serde(rename = "_environmentName")]
    pub environment_name: String,
    #[serde(rename = "_allDirectionsEnvironmentName")]
    pub all_directions_environment_name: String,
    #[serde(rename = "_songTimeOffset")]
    pub song_time_offset: f64,
    #[serde(
        rename = "_customData",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub custom_data: Option<Value>,
    #[serde(rename = "_difficultyBeatmapSets", default)]
    sets: Vec<CharacteristicSet>,
    /// Keys this crate does not model (`_editors` and the like), written
    /// back unchanged after the known fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl InfoDocument {
    /// Create a document with no characteristic sets.
    ///
    /// Version, level author, shuffle settings, the all-directions
    /// environment and the song time offset are fixed and not taken from
    /// input.
    pub fn new(
        song: SongMetadata,
        preview: Preview,
        environment_name: impl Into<String>,
        custom_data: Option<Value>,
    ) -> Self {
        Self {
            version: INFO_VERSION.to_string(),
            song_name: song.name,
            song_sub_name: song.sub_name,
            song_author_name: song.artist,
            level_author_name: LEVEL_AUTHOR.to_string(),
            beats_per_minute: song.bpm,
            shuffle: SHUFFLE,
            shuffle_period: SHUFFLE_PERIOD,
            preview_start_time: preview.start,
            preview_duration: preview.duration,
            song_filename: song.audio,
            cover_image_filename: song.cover,
            environment_name: environment_name.into(),
            all_directions_environment_name: ALL_DIRECTIONS_ENVIRONMENT.to_string(),
            song_time_offset: SONG_TIME_OFFSET,
            custom_data,
            sets: Vec::new(),
            extra: Map::new(),
        }
    }

    /// Characteristic sets in the order they were first seen.
    pub fn sets(&self) -> &[CharacteristicSet] {
        &self.sets
    }

    pub fn find_set(&self, characteristic: &str) -> Option<&CharacteristicSet> {
        self.sets.iter().find(|s| s.name == characteristic)
    }

    pub fn entry(&self, characteristic: &str, difficulty: &str) -> Option<&DifficultyEntry> {
        self.find_set(characteristic)?.find(difficulty)
    }

    /// Total number of difficulty entries across all sets.
    pub fn entry_count(&self) -> usize {
        self.sets.iter().map(|s| s.entries.len()).sum()
    }

    /// Add or replace a difficulty using the standard rank table.
    pub fn upsert_difficulty(
        &mut self,
        characteristic: &str,
        difficulty: &str,
        params: DifficultyParams,
    ) -> Result<UpsertOutcome, InfoError> {
        self.upsert_difficulty_with(&RankTable::STANDARD, characteristic, difficulty, params)
    }

    /// Add or replace a difficulty, resolving its rank through `ranks`.
    ///
    /// The characteristic set is created (and appended after all existing
    /// sets) if this is the first difficulty for it. Fails before any
    /// mutation with [`InfoError::UnknownDifficulty`] if `difficulty` is not
    /// in `ranks`, or [`InfoError::InvalidParameter`] if `params` would not
    /// survive a write. A replaced entry keeps its unmodeled keys.
    pub fn upsert_difficulty_with(
        &mut self,
        ranks: &RankTable,
        characteristic: &str,
        difficulty: &str,
        params: DifficultyParams,
    ) -> Result<UpsertOutcome, InfoError> {
        let rank = ranks
            .rank(difficulty)
            .ok_or_else(|| InfoError::UnknownDifficulty(difficulty.to_string()))?;
        params.check(difficulty)?;

        let entry = DifficultyEntry {
            difficulty: difficulty.to_string(),
            rank,
            beatmap_filename: naming::beatmap_filename(difficulty, characteristic),
            note_jump_movement_speed: params.njs,
            note_jump_start_beat_offset: params.offset,
            custom_data: params.custom_data,
            extra: Map::new(),
        };

        let set = self.set_mut_or_insert(characteristic);
        let outcome = match find_slot(&set.entries, rank) {
            Slot::Insert(i) => {
                set.entries.insert(i, entry);
                UpsertOutcome::Inserted(i)
            }
            Slot::Replace(i) => {
                let extra = std::mem::take(&mut set.entries[i].extra);
                set.entries[i] = DifficultyEntry { extra, ..entry };
                UpsertOutcome::Replaced(i)
            }
        };
        debug!(characteristic, difficulty, rank, ?outcome, "upserted difficulty");
        Ok(outcome)
    }

    fn set_mut_or_insert(&mut self, characteristic: &str) -> &mut CharacteristicSet {
        let index = match self.sets.iter().position(|s| s.name == characteristic) {
            Some(i) => i,
            None => {
                debug!(characteristic, "new characteristic set");
                self.sets.push(CharacteristicSet::new(characteristic));
                self.sets.len() - 1
            }
        };
        &mut self.sets[index]
    }
}
