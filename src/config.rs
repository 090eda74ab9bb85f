//! Map configuration module.
//!
//! A map is described by a `map.toml` file: the song, the preview window and
//! environment, and the list of difficulties to put in the package.
//!
//! ## Configuration Options
//!
//! ```toml
//! [song]
//! name = "Markov"
//! sub_name = ""
//! artist = "w/e"
//! bpm = 128.0
//! audio = "song.ogg"
//! cover = ""
//!
//! [map]
//! preview_start = 1.0       # seconds
//! preview_duration = 10.0   # seconds
//! environment = "DefaultEnvironment"
//!
//! [[difficulties]]
//! characteristic = "Standard"   # default
//! difficulty = "ExpertPlus"
//! njs = 20.0
//! offset = 0.067                # default 0.0
//! ```
//!
//! `[song.custom_data]` and `[difficulties.custom_data]` tables are passed
//! through untouched as the `_customData` of the song and of that difficulty.
//!
//! Difficulties are upserted in file order, but the resulting document does
//! not depend on that order (see [`crate::info`]). Listing the same
//! characteristic/difficulty twice is allowed; the later entry wins.
//!
//! Every table and key is optional except `difficulty` and `njs` inside a
//! `[[difficulties]]` block; missing ones take the values shown by
//! `autobeat gen-config`. Unknown keys are rejected to catch typos early.

use crate::difficulty::RankTable;
use crate::info::{DifficultyParams, InfoDocument, InfoError, Preview, SongMetadata};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Map configuration loaded from `map.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MapConfig {
    pub song: SongConfig,
    pub map: MapSettings,
    /// Difficulties to add, in upsert order.
    pub difficulties: Vec<DifficultyConfig>,
}

/// `[song]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SongConfig {
    pub name: String,
    pub sub_name: String,
    pub artist: String,
    /// Tempo in beats per minute.
    pub bpm: f64,
    /// Audio file name inside the package folder.
    pub audio: String,
    /// Cover image file name inside the package folder (may be empty).
    pub cover: String,
    pub custom_data: Option<Value>,
}

impl Default for SongConfig {
    fn default() -> Self {
        Self {
            name: "Untitled".to_string(),
            sub_name: String::new(),
            artist: String::new(),
            bpm: 120.0,
            audio: "song.ogg".to_string(),
            cover: String::new(),
            custom_data: None,
        }
    }
}

/// `[map]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MapSettings {
    /// Preview start, in seconds.
    pub preview_start: f64,
    /// Preview length, in seconds.
    pub preview_duration: f64,
    pub environment: String,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            preview_start: 12.0,
            preview_duration: 10.0,
            environment: "DefaultEnvironment".to_string(),
        }
    }
}

/// One `[[difficulties]]` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DifficultyConfig {
    #[serde(default = "default_characteristic")]
    pub characteristic: String,
    pub difficulty: String,
    /// Note jump movement speed.
    pub njs: f64,
    /// Note jump start beat offset.
    #[serde(default)]
    pub offset: f64,
    #[serde(default)]
    pub custom_data: Option<Value>,
}

fn default_characteristic() -> String {
    "Standard".to_string()
}

impl DifficultyConfig {
    pub fn params(&self) -> DifficultyParams {
        DifficultyParams {
            njs: self.njs,
            offset: self.offset,
            custom_data: self.custom_data.clone(),
        }
    }
}

impl MapConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.song.name.trim().is_empty() {
            return Err(ConfigError::Validation("song.name must not be empty".into()));
        }
        if !(self.song.bpm.is_finite() && self.song.bpm > 0.0) {
            return Err(ConfigError::Validation("song.bpm must be positive".into()));
        }
        if !(self.map.preview_start.is_finite() && self.map.preview_start >= 0.0) {
            return Err(ConfigError::Validation(
                "map.preview_start must not be negative".into(),
            ));
        }
        if !(self.map.preview_duration.is_finite() && self.map.preview_duration >= 0.0) {
            return Err(ConfigError::Validation(
                "map.preview_duration must not be negative".into(),
            ));
        }
        for (i, d) in self.difficulties.iter().enumerate() {
            if d.characteristic.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "difficulties[{i}].characteristic must not be empty"
                )));
            }
            if !RankTable::STANDARD.contains(&d.difficulty) {
                let known: Vec<&str> = RankTable::STANDARD.names().collect();
                return Err(ConfigError::Validation(format!(
                    "difficulties[{i}].difficulty '{}' is not one of {}",
                    d.difficulty,
                    known.join(", ")
                )));
            }
            d.params()
                .check(&d.difficulty)
                .map_err(|e| ConfigError::Validation(format!("difficulties[{i}]: {e}")))?;
        }
        Ok(())
    }

    pub fn song_metadata(&self) -> SongMetadata {
        SongMetadata {
            name: self.song.name.clone(),
            sub_name: self.song.sub_name.clone(),
            artist: self.song.artist.clone(),
            bpm: self.song.bpm,
            audio: self.song.audio.clone(),
            cover: self.song.cover.clone(),
        }
    }

    pub fn preview(&self) -> Preview {
        Preview {
            start: self.map.preview_start,
            duration: self.map.preview_duration,
        }
    }

    /// Build the info document: initialize, then upsert every configured
    /// difficulty in file order.
    pub fn to_document(&self) -> Result<InfoDocument, InfoError> {
        let mut document = InfoDocument::new(
            self.song_metadata(),
            self.preview(),
            self.map.environment.clone(),
            self.song.custom_data.clone(),
        );
        for d in &self.difficulties {
            document.upsert_difficulty(&d.characteristic, &d.difficulty, d.params())?;
        }
        Ok(document)
    }
}

// =============================================================================
// Loading
// =============================================================================

/// Parse and validate the text of a `map.toml`.
pub fn parse_config(text: &str) -> Result<MapConfig, ConfigError> {
    let config: MapConfig = toml::from_str(text)?;
    config.validate()?;
    Ok(config)
}

/// Load `map.toml` from `path`.
///
/// A missing file is not an error: it behaves like an empty file, which
/// describes an `Untitled` song with no difficulties.
pub fn load_config(path: &Path) -> Result<MapConfig, ConfigError> {
    match fs::read_to_string(path) {
        Ok(text) => parse_config(&text),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => parse_config(""),
        Err(e) => Err(e.into()),
    }
}

/// Returns a fully-commented stock `map.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# AutoBeat map configuration
# ==========================
# Describes the song and the difficulties to put in the map package.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Song
# ---------------------------------------------------------------------------
[song]
name = "Untitled"
sub_name = ""
artist = ""
# Tempo in beats per minute.
bpm = 120.0
# Audio and cover files, relative to the package folder.
audio = "song.ogg"
cover = ""

# Anything under [song.custom_data] is copied into Info.dat as _customData.
# [song.custom_data]
# _contributors = []

# ---------------------------------------------------------------------------
# Preview and environment
# ---------------------------------------------------------------------------
[map]
# Song browser preview window, in seconds.
preview_start = 12.0
preview_duration = 10.0
environment = "DefaultEnvironment"

# ---------------------------------------------------------------------------
# Difficulties
# ---------------------------------------------------------------------------
# One block per difficulty. Names: Easy, Normal, Hard, Expert, ExpertPlus.
# characteristic defaults to "Standard", offset defaults to 0.0.
#
# [[difficulties]]
# characteristic = "Standard"
# difficulty = "ExpertPlus"
# njs = 20.0
# offset = 0.067
"##
}
