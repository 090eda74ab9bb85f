//! Shared test utilities for the autobeat test suite.
//!
//! Provides sample inputs, lookup helpers, and a shape assertion for the
//! characteristic-set tree of an [`InfoDocument`].
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let mut doc = sample_document();
//! doc.upsert_difficulty("Standard", "Hard", DifficultyParams::new(12.0, 0.0)).unwrap();
//!
//! assert_set_shape(&doc, &[("Standard", &["Hard"])]);
//! ```

use crate::config::{DifficultyConfig, MapConfig};
use crate::info::{CharacteristicSet, InfoDocument, Preview, SongMetadata};

/// Same map as [`sample_map_config`], as a `map.toml` file body.
pub const SAMPLE_MAP_TOML: &str = r#"
[song]
name = "Markov"
artist = "w/e"
bpm = 128.0
audio = "song.ogg"

[map]
preview_start = 1.0
preview_duration = 10.0

[[difficulties]]
difficulty = "ExpertPlus"
njs = 20.0
offset = 0.067

[[difficulties]]
difficulty = "Hard"
njs = 12.0
"#;

// =========================================================================
// Sample inputs
// =========================================================================

pub fn sample_song() -> SongMetadata {
    SongMetadata {
        name: "Markov".to_string(),
        sub_name: String::new(),
        artist: "w/e".to_string(),
        bpm: 128.0,
        audio: "song.ogg".to_string(),
        cover: String::new(),
    }
}

pub fn sample_preview() -> Preview {
    Preview {
        start: 1.0,
        duration: 10.0,
    }
}

/// A freshly initialized document with no characteristic sets.
pub fn sample_document() -> InfoDocument {
    InfoDocument::new(sample_song(), sample_preview(), "DefaultEnvironment", None)
}

/// ExpertPlus (njs 20, offset 0.067) then Hard (njs 12), both Standard.
pub fn sample_map_config() -> MapConfig {
    let mut config = MapConfig::default();
    config.song.name = "Markov".to_string();
    config.song.artist = "w/e".to_string();
    config.song.bpm = 128.0;
    config.map.preview_start = 1.0;
    config.map.preview_duration = 10.0;
    config.difficulties = vec![
        DifficultyConfig {
            characteristic: "Standard".to_string(),
            difficulty: "ExpertPlus".to_string(),
            njs: 20.0,
            offset: 0.067,
            custom_data: None,
        },
        DifficultyConfig {
            characteristic: "Standard".to_string(),
            difficulty: "Hard".to_string(),
            njs: 12.0,
            offset: 0.0,
            custom_data: None,
        },
    ];
    config
}

// =========================================================================
// Document lookups, panicking with a clear message on miss
// =========================================================================

/// Find a characteristic set by name. Panics if not found.
pub fn find_set<'a>(doc: &'a InfoDocument, name: &str) -> &'a CharacteristicSet {
    doc.find_set(name).unwrap_or_else(|| {
        let names = set_names(doc);
        panic!("characteristic set '{name}' not found. Available: {names:?}")
    })
}

/// All set names in document order.
pub fn set_names(doc: &InfoDocument) -> Vec<&str> {
    doc.sets().iter().map(|s| s.name()).collect()
}

/// Difficulty names of a set, in entry order.
pub fn entry_names<'a>(doc: &'a InfoDocument, set: &str) -> Vec<&'a str> {
    find_set(doc, set)
        .entries()
        .iter()
        .map(|e| e.difficulty.as_str())
        .collect()
}

/// Ranks of a set, in entry order.
pub fn entry_ranks(doc: &InfoDocument, set: &str) -> Vec<u32> {
    find_set(doc, set).entries().iter().map(|e| e.rank).collect()
}

/// Assert the full set/entry tree matches an expected shape.
///
/// Each item is `(characteristic, difficulties)` in expected order.
pub fn assert_set_shape(doc: &InfoDocument, expected: &[(&str, &[&str])]) {
    let expected_names: Vec<&str> = expected.iter().map(|(n, _)| *n).collect();
    assert_eq!(set_names(doc), expected_names, "characteristic sets mismatch");

    for (name, difficulties) in expected {
        assert_eq!(
            entry_names(doc, name),
            difficulties.to_vec(),
            "entries of '{name}' mismatch"
        );
    }
}

// =========================================================================
// Ordering helpers
// =========================================================================

/// Every ordering of `items` (Heap's algorithm). Meant for short slices.
pub fn permutations<T: Clone>(items: &[T]) -> Vec<Vec<T>> {
    fn heap<T: Clone>(k: usize, items: &mut Vec<T>, out: &mut Vec<Vec<T>>) {
        if k <= 1 {
            out.push(items.clone());
            return;
        }
        heap(k - 1, items, out);
        for i in 0..k - 1 {
            let swap = if k % 2 == 0 { i } else { 0 };
            items.swap(swap, k - 1);
            heap(k - 1, items, out);
        }
    }

    let mut items = items.to_vec();
    let mut out = Vec::new();
    heap(items.len(), &mut items, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permutations_count() {
        assert_eq!(permutations(&[1, 2, 3]).len(), 6);
        assert_eq!(permutations(&[1, 2, 3, 4, 5]).len(), 120);
    }

    #[test]
    fn permutations_are_distinct() {
        let mut all = permutations(&[1, 2, 3, 4]);
        all.sort();
        all.dedup();
        assert_eq!(all.len(), 24);
    }
}
