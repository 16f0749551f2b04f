//! Cell and direction types.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

/// A single grid cell: either a block or a letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, derive_more::IsVariant)]
pub enum Cell {
    /// A non-playable cell, never part of an answer.
    #[default]
    Block,
    /// A playable cell holding one letter.
    Letter(char),
}

impl Cell {
    /// The wire representation of a block cell.
    pub const BLOCK_TOKEN: &'static str = "#";

    /// Returns the letter, if this is a letter cell.
    #[must_use]
    #[inline]
    pub const fn as_letter(self) -> Option<char> {
        match self {
            Cell::Block => None,
            Cell::Letter(ch) => Some(ch),
        }
    }

    /// Parses a wire token: `"#"` is a block, any single character is a letter cell.
    ///
    /// Returns `None` for empty or multi-character tokens. The character itself is not
    /// checked here; the validator decides which letters are acceptable.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        if token == Self::BLOCK_TOKEN {
            return Some(Cell::Block);
        }
        let mut chars = token.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Some(Cell::Letter(ch)),
            _ => None,
        }
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Block => f.write_str(Self::BLOCK_TOKEN),
            Cell::Letter(ch) => write!(f, "{ch}"),
        }
    }
}

/// Word direction.
///
/// `Across` orders before `Down`, matching the canonical entry order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
    derive_more::IsVariant,
)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Left to right.
    #[default]
    Across,
    /// Top to bottom.
    Down,
}

impl Direction {
    /// Both directions, across first.
    pub const ALL: [Self; 2] = [Self::Across, Self::Down];

    /// Returns the `(row, col)` step for one cell in this direction.
    #[must_use]
    #[inline]
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Direction::Across => (0, 1),
            Direction::Down => (1, 0),
        }
    }

    /// Returns the other direction.
    #[must_use]
    #[inline]
    pub const fn other(self) -> Self {
        match self {
            Direction::Across => Direction::Down,
            Direction::Down => Direction::Across,
        }
    }

    /// Returns the lowercase wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Direction::Across => "across",
            Direction::Down => "down",
        }
    }

    /// Index for two-element per-direction tables (`Across` = 0).
    #[must_use]
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Direction::Across => 0,
            Direction::Down => 1,
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
