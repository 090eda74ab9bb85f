//! Centralized file naming for a map package.
//!
//! Every difficulty's content lives in a file named after the difficulty and
//! the characteristic it belongs to, concatenated with no separator:
//!
//! - `ExpertPlus` + `Standard` → `ExpertPlusStandard.dat`
//! - `Easy` + `Lightshow` → `EasyLightshow.dat`
//!
//! The info document records this name in `_beatmapFilename`, and the content
//! generator reconstructs it from the same two values, so it must never depend
//! on anything else (insertion order, timestamps, rank).
//!
//! The package folder itself is named after the song, with characters that
//! are not allowed in a single path component replaced:
//!
//! - `Markov` → `Markov`
//! - `AC/DC` → `AC_DC`
//! - `..` → `Untitled`

use crate::difficulty::RankTable;

/// File name of the info document inside a package folder.
pub const INFO_FILENAME: &str = "Info.dat";

/// Extension shared by the info document and every content file.
pub const DAT_EXTENSION: &str = "dat";

/// Content file name for a difficulty within a characteristic.
pub fn beatmap_filename(difficulty: &str, characteristic: &str) -> String {
    format!("{difficulty}{characteristic}.{DAT_EXTENSION}")
}

/// Folder name used when a song name leaves nothing usable.
pub const FALLBACK_FOLDER: &str = "Untitled";

/// Turn a song name into a single path component for the package folder.
///
/// Path separators, control characters and characters Windows rejects become
/// `_`. Surrounding whitespace and trailing dots are trimmed, so the result is
/// never empty, `.` or `..`.
pub fn package_folder_name(song_name: &str) -> String {
    let replaced: String = song_name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let trimmed = replaced.trim().trim_end_matches('.').trim_end();
    if trimmed.is_empty() {
        FALLBACK_FOLDER.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Result of splitting a content file name back into its two parts.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedBeatmapName {
    pub difficulty: String,
    pub characteristic: String,
}

/// Parse a content file name like `HardStandard.dat`.
///
/// The difficulty prefix is matched against `ranks`, preferring the longest
/// known name so `ExpertPlusStandard.dat` resolves to `ExpertPlus` and not
/// `Expert` + `PlusStandard`. Returns `None` for the info document, for names
/// without a known difficulty prefix, and for names with no characteristic.
pub fn parse_beatmap_filename(filename: &str, ranks: &RankTable) -> Option<ParsedBeatmapName> {
    let stem = filename.strip_suffix(&format!(".{DAT_EXTENSION}"))?;
    let difficulty = ranks
        .names()
        .filter(|name| stem.starts_with(name))
        .max_by_key(|name| name.len())?;
    let characteristic = &stem[difficulty.len()..];
    if characteristic.is_empty() {
        return None;
    }
    Some(ParsedBeatmapName {
        difficulty: difficulty.to_string(),
        characteristic: characteristic.to_string(),
    })
}
