//! Difficulty names and the fixed name → rank lookup.
//!
//! The game recognizes exactly five difficulty names per characteristic, each
//! with a fixed numeric rank. Ranks are spaced by two and decide the display
//! order inside a characteristic set:
//!
//! | Name         | Rank |
//! |--------------|------|
//! | `Easy`       | 1    |
//! | `Normal`     | 3    |
//! | `Hard`       | 5    |
//! | `Expert`     | 7    |
//! | `ExpertPlus` | 9    |
//!
//! The table is a value rather than a `match` so builders can be exercised
//! against alternate rank schemes (see
//! [`InfoDocument::upsert_difficulty_with`](crate::info::InfoDocument::upsert_difficulty_with)).

/// An immutable difficulty-name → rank mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankTable {
    ranks: &'static [(&'static str, u32)],
}

impl RankTable {
    /// The rank scheme the game itself uses.
    pub const STANDARD: RankTable = RankTable::new(&[
        ("Easy", 1),
        ("Normal", 3),
        ("Hard", 5),
        ("Expert", 7),
        ("ExpertPlus", 9),
    ]);

    pub const fn new(ranks: &'static [(&'static str, u32)]) -> Self {
        Self { ranks }
    }

    /// Rank for a difficulty name. Names are matched exactly (case-sensitive).
    pub fn rank(&self, name: &str) -> Option<u32> {
        self.ranks
            .iter()
            .find(|(known, _)| *known == name)
            .map(|(_, rank)| *rank)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rank(name).is_some()
    }

    /// All known names, in table order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.ranks.iter().map(|(name, _)| *name)
    }
}

impl Default for RankTable {
    fn default() -> Self {
        Self::STANDARD
    }
}
