//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Output leads with what the map contains (characteristics and their
//! difficulties in rank order) and shows file names as secondary context
//! after a `→`. Every entry follows the same two-level pattern:
//!
//! 1. **Header line**: positional index + difficulty name + rank
//! 2. **Context lines**: indented jump speed/offset and custom data marker
//!
//! # Output Format
//!
//! ## Document (`check`, `build`)
//!
//! ```text
//! Markov by w/e (128 BPM)
//!     Environment: DefaultEnvironment
//!     Preview: 1s for 10s
//! Standard
//!     001 Hard (rank 5) → HardStandard.dat
//!         NJS 12, offset 0
//!     002 ExpertPlus (rank 9) → ExpertPlusStandard.dat
//!         NJS 20, offset 0.067
//! 1 characteristic, 2 difficulties
//! ```
//!
//! ## Package (`build`, `add`)
//!
//! ```text
//! Info.dat → Markov/Info.dat
//!     HardStandard.dat: written
//!     ExpertPlusStandard.dat: kept
//!     EasyStandard.dat: not in Info.dat
//! ```
//!
//! # Architecture
//!
//! Each view has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure:
//! no I/O, no side effects.

use crate::info::{DifficultyEntry, InfoDocument, UpsertOutcome};
use crate::package::PackageSummary;
use std::path::{Path, PathBuf};

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

/// Header line for a difficulty entry.
///
/// ```text
/// 001 Hard (rank 5) → HardStandard.dat
/// ```
fn entry_line(index: usize, entry: &DifficultyEntry) -> String {
    format!(
        "{} {} (rank {}) \u{2192} {}",
        format_index(index),
        entry.difficulty,
        entry.rank,
        entry.beatmap_filename
    )
}

/// File name for display, falling back to the full path.
fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

// ============================================================================
// Document
// ============================================================================

/// Format the song header and the characteristic/difficulty tree.
pub fn format_document(doc: &InfoDocument) -> Vec<String> {
    let mut lines = Vec::new();

    let title = if doc.song_sub_name.is_empty() {
        doc.song_name.clone()
    } else {
        format!("{} ({})", doc.song_name, doc.song_sub_name)
    };
    if doc.song_author_name.is_empty() {
        lines.push(format!("{} ({} BPM)", title, doc.beats_per_minute));
    } else {
        lines.push(format!(
            "{} by {} ({} BPM)",
            title, doc.song_author_name, doc.beats_per_minute
        ));
    }
    lines.push(format!("{}Environment: {}", indent(1), doc.environment_name));
    lines.push(format!(
        "{}Preview: {}s for {}s",
        indent(1),
        doc.preview_start_time,
        doc.preview_duration
    ));

    for set in doc.sets() {
        lines.push(set.name().to_string());
        for (i, entry) in set.entries().iter().enumerate() {
            lines.push(format!("{}{}", indent(1), entry_line(i + 1, entry)));
            lines.push(format!(
                "{}NJS {}, offset {}",
                indent(2),
                entry.note_jump_movement_speed,
                entry.note_jump_start_beat_offset
            ));
            if entry.custom_data.is_some() {
                lines.push(format!("{}Custom data", indent(2)));
            }
        }
    }

    lines.push(format!(
        "{}, {}",
        plural(doc.sets().len(), "characteristic", "characteristics"),
        plural(doc.entry_count(), "difficulty", "difficulties")
    ));
    lines
}

/// Print the document tree to stdout.
pub fn print_document(doc: &InfoDocument) {
    for line in format_document(doc) {
        println!("{}", line);
    }
}

// ============================================================================
// Upsert
// ============================================================================

/// One-line description of an upsert.
///
/// ```text
/// Added Hard to Standard at 001
/// Replaced Hard in Standard at 002
/// ```
pub fn format_upsert(characteristic: &str, difficulty: &str, outcome: UpsertOutcome) -> String {
    match outcome {
        UpsertOutcome::Inserted(i) => {
            format!("Added {} to {} at {}", difficulty, characteristic, format_index(i + 1))
        }
        UpsertOutcome::Replaced(i) => {
            format!("Replaced {} in {} at {}", difficulty, characteristic, format_index(i + 1))
        }
    }
}

// ============================================================================
// Package
// ============================================================================

/// Format the files written (or kept) for a package.
pub fn format_package_summary(summary: &PackageSummary) -> Vec<String> {
    let mut lines = vec![format!(
        "{} \u{2192} {}",
        file_name(&summary.info_path),
        summary.info_path.display()
    )];
    for path in &summary.written {
        lines.push(format!("{}{}: written", indent(1), file_name(path)));
    }
    for path in &summary.kept {
        lines.push(format!("{}{}: kept", indent(1), file_name(path)));
    }
    lines.extend(format_orphans(&summary.orphaned));
    lines
}

/// One line per content file that no entry references.
pub fn format_orphans(orphans: &[PathBuf]) -> Vec<String> {
    orphans
        .iter()
        .map(|path| format!("{}{}: not in Info.dat", indent(1), file_name(path)))
        .collect()
}

/// Print the package summary to stdout.
pub fn print_package_summary(summary: &PackageSummary) {
    for line in format_package_summary(summary) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
