//! Serialization of the info document and writing of a map package.
//!
//! A package is a folder the game loads directly:
//!
//! ```text
//! Markov/
//! ├── Info.dat                 # pretty-printed info document
//! ├── HardStandard.dat         # one content file per difficulty entry
//! └── ExpertPlusStandard.dat
//! ```
//!
//! Audio and cover files are referenced by the info document but are not
//! copied here; they are the caller's responsibility.
//!
//! Stale content files (a `.dat` named like a difficulty the document no
//! longer lists) are reported by [`find_orphans`] but never deleted.
//!
//! Writes are plain `fs::write` calls with no temp-file dance. Any I/O error
//! aborts the call and is returned as-is.

use crate::content::{ContentError, ContentGenerator, ContentSlot};
use crate::difficulty::RankTable;
use crate::info::InfoDocument;
use crate::naming::{self, INFO_FILENAME};
use serde::ser::Error as _;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum PackageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
    #[error("Content error: {0}")]
    Content(#[from] ContentError),
}

/// What to do when a content file already exists in the package folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentPolicy {
    /// Replace it with freshly generated content.
    #[default]
    Overwrite,
    /// Leave it alone; only missing files are generated.
    KeepExisting,
}

/// Files touched by [`write_package`].
#[derive(Debug, Clone, PartialEq)]
pub struct PackageSummary {
    pub folder: PathBuf,
    pub info_path: PathBuf,
    /// Content files written, in document order.
    pub written: Vec<PathBuf>,
    /// Content files left untouched under [`ContentPolicy::KeepExisting`].
    pub kept: Vec<PathBuf>,
    /// Content files in the folder that no entry references.
    pub orphaned: Vec<PathBuf>,
}

/// Encode the document as pretty-printed JSON (two-space indent).
///
/// Fails with [`PackageError::Encoding`] if a song-level number is NaN or
/// infinite; JSON has no spelling for those and serde_json would write
/// `null`. Entry numbers are already checked by the upsert that created them.
pub fn serialize(document: &InfoDocument) -> Result<Vec<u8>, PackageError> {
    check_finite(document)?;
    Ok(serde_json::to_vec_pretty(document)?)
}

fn check_finite(document: &InfoDocument) -> Result<(), PackageError> {
    let song = [
        ("_beatsPerMinute", document.beats_per_minute),
        ("_shufflePeriod", document.shuffle_period),
        ("_previewStartTime", document.preview_start_time),
        ("_previewDuration", document.preview_duration),
        ("_songTimeOffset", document.song_time_offset),
    ];
    match song.into_iter().find(|(_, value)| !value.is_finite()) {
        Some((key, value)) => Err(PackageError::Encoding(serde_json::Error::custom(
            format!("{key} is {value}, not a finite number"),
        ))),
        None => Ok(()),
    }
}

pub fn deserialize(bytes: &[u8]) -> Result<InfoDocument, PackageError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Read `Info.dat` from an existing package folder.
pub fn read_info(folder: &Path) -> Result<InfoDocument, PackageError> {
    let bytes = fs::read(folder.join(INFO_FILENAME))?;
    deserialize(&bytes)
}

/// Write `Info.dat` into `folder`, creating the folder if needed.
pub fn write_info(folder: &Path, document: &InfoDocument) -> Result<PathBuf, PackageError> {
    let bytes = serialize(document)?;
    fs::create_dir_all(folder)?;
    let path = folder.join(INFO_FILENAME);
    fs::write(&path, bytes)?;
    debug!(path = %path.display(), "wrote info document");
    Ok(path)
}

/// Content files in `folder` named like a difficulty the document does not
/// list, sorted by path. `Info.dat` and other `.dat` files that do not parse
/// as `<Difficulty><Characteristic>.dat` are ignored.
pub fn find_orphans(
    folder: &Path,
    document: &InfoDocument,
) -> Result<Vec<PathBuf>, PackageError> {
    let mut orphans = Vec::new();
    for dir_entry in fs::read_dir(folder)? {
        let dir_entry = dir_entry?;
        if !dir_entry.file_type()?.is_file() {
            continue;
        }
        let file_name = dir_entry.file_name();
        let Some(parsed) = file_name
            .to_str()
            .and_then(|name| naming::parse_beatmap_filename(name, &RankTable::STANDARD))
        else {
            continue;
        };
        if document
            .entry(&parsed.characteristic, &parsed.difficulty)
            .is_none()
        {
            orphans.push(dir_entry.path());
        }
    }
    orphans.sort();
    for path in &orphans {
        warn!(path = %path.display(), "content file not listed in Info.dat");
    }
    Ok(orphans)
}

/// Generate and write the content file for one slot.
pub fn write_content(
    folder: &Path,
    slot: &ContentSlot,
    generator: &dyn ContentGenerator,
) -> Result<PathBuf, PackageError> {
    let content = generator.generate(slot)?;
    let bytes = serde_json::to_vec(&content)?;
    fs::create_dir_all(folder)?;
    let path = folder.join(&slot.filename);
    fs::write(&path, bytes)?;
    debug!(path = %path.display(), notes = content.notes.len(), "wrote content");
    Ok(path)
}

/// Write `Info.dat` plus one content file per difficulty entry.
pub fn write_package(
    folder: &Path,
    document: &InfoDocument,
    generator: &dyn ContentGenerator,
    policy: ContentPolicy,
) -> Result<PackageSummary, PackageError> {
    let info_path = write_info(folder, document)?;
    let mut written = Vec::new();
    let mut kept = Vec::new();

    for set in document.sets() {
        for entry in set.entries() {
            let slot = ContentSlot::for_entry(set, entry);
            let path = folder.join(&slot.filename);
            if policy == ContentPolicy::KeepExisting && path.exists() {
                kept.push(path);
                continue;
            }
            written.push(write_content(folder, &slot, generator)?);
        }
    }

    let orphaned = find_orphans(folder, document)?;
    info!(
        folder = %folder.display(),
        written = written.len(),
        kept = kept.len(),
        orphaned = orphaned.len(),
        "package written"
    );
    Ok(PackageSummary {
        folder: folder.to_path_buf(),
        info_path,
        written,
        kept,
        orphaned,
    })
}
