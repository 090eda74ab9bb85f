//! # AutoBeat
//!
//! Builds the metadata side of a rhythm-game custom map package: the
//! `Info.dat` info document and one content file per difficulty.
//!
//! # Pipeline
//!
//! ```text
//! 1. Initialize   map.toml / SongMetadata  →  InfoDocument (no difficulties)
//! 2. Upsert       (characteristic, difficulty, params)  →  InfoDocument, repeated
//! 3. Write        InfoDocument  →  <folder>/Info.dat + <Difficulty><Characteristic>.dat
//! ```
//!
//! Step 2 can happen over several runs: `autobeat add` reopens an existing
//! `Info.dat`, upserts one difficulty and writes it back. The final document
//! is the same whatever order the difficulties arrive in.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`info`] | The info document and the ordered insert-or-replace of difficulties |
//! | [`difficulty`] | Fixed difficulty name → rank table |
//! | [`naming`] | `Info.dat`, `<Difficulty><Characteristic>.dat` and package folder names |
//! | [`content`] | Content files and the [`content::ContentGenerator`] seam |
//! | [`package`] | JSON encoding and writing/reading a package folder |
//! | [`config`] | `map.toml` loading with serde defaults, and validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## One Scan, No Sort
//!
//! Difficulty entries are placed by a single pass that finds either the first
//! higher rank (insert before it) or an equal rank (replace it). The list is
//! never re-sorted, so re-upserting a difficulty keeps its position and any
//! partially built document stays valid.
//!
//! ## Characteristic Sets In First-Seen Order
//!
//! Sets are appended the first time a characteristic is used and are never
//! sorted. The game shows them in file order, and map authors expect the
//! order they wrote.
//!
//! ## Filenames From Names Only
//!
//! A difficulty's content file name is built from its difficulty and
//! characteristic names and nothing else. Content generators rebuild the same
//! name independently, so the two sides never need to share state.
//!
//! ## Unknown Keys Survive
//!
//! `Info.dat` files are also edited by other tools. Keys this crate does not
//! model are carried through a reopen and written back, so `autobeat add`
//! never drops another editor's data.

pub mod config;
pub mod content;
pub mod difficulty;
pub mod info;
pub mod naming;
pub mod output;
pub mod package;

#[cfg(test)]
pub(crate) mod test_helpers;
