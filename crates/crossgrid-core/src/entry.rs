//! Word placements.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::{Direction, Position};

/// Identity of an entry within a crossword: its number and direction.
///
/// Displays as `"3-down"`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct EntryKey {
    /// Anchor number.
    pub number: u32,
    /// Word direction.
    pub direction: Direction,
}

impl EntryKey {
    /// Creates a key.
    #[must_use]
    pub const fn new(number: u32, direction: Direction) -> Self {
        Self { number, direction }
    }

    /// Sort key for the canonical order: all across entries by number, then all down.
    #[must_use]
    pub const fn canonical_order(self) -> (Direction, u32) {
        (self.direction, self.number)
    }
}

impl Display for EntryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.number, self.direction)
    }
}

/// A single across or down word with its clue.
///
/// The serialized form is the canonical wire shape:
/// `{ number, row, col, direction, answer, clue }`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entry {
    /// Anchor number, starting at 1.
    pub number: u32,
    /// Row of the first letter.
    pub row: usize,
    /// Column of the first letter.
    pub col: usize,
    /// Word direction.
    pub direction: Direction,
    /// Canonical answer: uppercase letters only.
    pub answer: String,
    /// Clue text.
    pub clue: String,
}

impl Entry {
    /// Returns the `(number, direction)` key.
    #[must_use]
    pub fn key(&self) -> EntryKey {
        EntryKey::new(self.number, self.direction)
    }

    /// Returns the position of the first letter.
    #[must_use]
    pub fn start(&self) -> Position {
        Position::new(self.row, self.col)
    }

    /// Number of letters (characters, not bytes).
    #[must_use]
    pub fn len(&self) -> usize {
        self.answer.chars().count()
    }

    /// Returns `true` for an empty answer.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.answer.is_empty()
    }

    /// Returns `true` if every covered cell lies inside a `size × size` grid.
    #[must_use]
    pub fn fits_within(&self, size: usize) -> bool {
        let end = match self.direction {
            Direction::Across => self.col.checked_add(self.len()),
            Direction::Down => self.row.checked_add(self.len()),
        };
        self.start().is_within(size) && end.is_some_and(|end| end <= size)
    }

    /// Iterates the covered positions, first letter first.
    ///
    /// No bounds checks are applied; see [`Entry::fits_within`].
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        let start = self.start();
        (0..self.len()).map(move |k| start.advanced(self.direction, k))
    }

    /// Iterates `(position, expected letter)` pairs.
    pub fn cells(&self) -> impl Iterator<Item = (Position, char)> + '_ {
        self.positions().zip(self.answer.chars())
    }

    /// Returns the index of `pos` within this entry, if covered.
    #[must_use]
    pub fn index_of(&self, pos: Position) -> Option<usize> {
        self.positions().position(|p| p == pos)
    }
}

/// Sorts entries into canonical order: across by number, then down by number.
pub fn sort_entries(entries: &mut [Entry]) {
    entries.sort_by_key(|entry| entry.key().canonical_order());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(number: u32, row: usize, col: usize, direction: Direction, answer: &str) -> Entry {
        Entry {
            number,
            row,
            col,
            direction,
            answer: answer.to_owned(),
            clue: "clue".to_owned(),
        }
    }

    #[test]
    fn test_positions_follow_direction() {
        let across = entry(1, 2, 3, Direction::Across, "CAT");
        assert_eq!(
            across.positions().collect::<Vec<_>>(),
            vec![Position::new(2, 3), Position::new(2, 4), Position::new(2, 5)]
        );
        let down = entry(1, 2, 3, Direction::Down, "CAT");
        assert_eq!(down.index_of(Position::new(4, 3)), Some(2));
        assert_eq!(down.index_of(Position::new(2, 4)), None);
    }

    #[test]
    fn test_fits_within() {
        assert!(entry(1, 0, 5, Direction::Across, "ABCD").fits_within(9));
        assert!(!entry(1, 7, 7, Direction::Across, "ABCDE").fits_within(9));
        assert!(!entry(1, 9, 0, Direction::Across, "AB").fits_within(9));
        assert!(entry(1, 7, 0, Direction::Down, "AB").fits_within(9));
    }

    #[test]
    fn test_len_counts_chars() {
        assert_eq!(entry(1, 0, 0, Direction::Across, "AÑO").len(), 3);
    }

    #[test]
    fn test_sort_entries_canonical() {
        let mut entries = vec![
            entry(2, 0, 0, Direction::Down, "AB"),
            entry(3, 0, 0, Direction::Across, "AB"),
            entry(1, 0, 0, Direction::Down, "AB"),
            entry(1, 0, 0, Direction::Across, "AB"),
        ];
        sort_entries(&mut entries);
        let keys: Vec<_> = entries.iter().map(|e| e.key().to_string()).collect();
        assert_eq!(keys, ["1-across", "3-across", "1-down", "2-down"]);
    }

    #[test]
    fn test_entry_wire_shape() {
        let json = serde_json::to_value(entry(4, 1, 2, Direction::Down, "SOL")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "number": 4, "row": 1, "col": 2, "direction": "down",
                "answer": "SOL", "clue": "clue"
            })
        );
    }
}
