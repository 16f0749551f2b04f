//! Cell coordinates on a square crossword grid.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::Direction;

/// A 0-based cell coordinate.
///
/// Positions order row-major: `(0, 8) < (1, 0)`.
///
/// # Examples
///
/// ```
/// use crossgrid_core::{Direction, Position};
///
/// let pos = Position::new(2, 3);
/// assert_eq!(pos.step(Direction::Across, 9), Some(Position::new(2, 4)));
/// assert_eq!(Position::new(2, 8).step(Direction::Across, 9), None);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Position {
    /// Row index, top to bottom.
    pub row: usize,
    /// Column index, left to right.
    pub col: usize,
}

impl Position {
    /// Creates a position from a row and a column.
    #[must_use]
    #[inline]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Returns `true` if the position lies inside a `size × size` grid.
    #[must_use]
    #[inline]
    pub const fn is_within(self, size: usize) -> bool {
        self.row < size && self.col < size
    }

    /// Returns the position shifted by `(dr, dc)`, or `None` if it leaves the grid.
    #[must_use]
    pub fn offset(self, dr: isize, dc: isize, size: usize) -> Option<Self> {
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        let pos = Self::new(row, col);
        pos.is_within(size).then_some(pos)
    }

    /// Returns the next cell along `direction`, or `None` at the grid edge.
    #[must_use]
    #[inline]
    pub fn step(self, direction: Direction, size: usize) -> Option<Self> {
        let (dr, dc) = direction.delta();
        self.offset(dr, dc, size)
    }

    /// Returns the previous cell along `direction`, or `None` at the grid edge.
    #[must_use]
    #[inline]
    pub fn step_back(self, direction: Direction, size: usize) -> Option<Self> {
        let (dr, dc) = direction.delta();
        self.offset(-dr, -dc, size)
    }

    /// Returns the position `k` cells after `self` along `direction`, without bounds checks.
    #[must_use]
    #[inline]
    pub const fn advanced(self, direction: Direction, k: usize) -> Self {
        match direction {
            Direction::Across => Self::new(self.row, self.col + k),
            Direction::Down => Self::new(self.row + k, self.col),
        }
    }

    /// Iterates every position of a `size × size` grid in row-major order.
    pub fn all(size: usize) -> impl DoubleEndedIterator<Item = Self> + Clone {
        (0..size).flat_map(move |row| (0..size).map(move |col| Self::new(row, col)))
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_stays_inside_grid() {
        let pos = Position::new(0, 0);
        assert_eq!(pos.offset(-1, 0, 9), None);
        assert_eq!(pos.offset(0, -1, 9), None);
        assert_eq!(pos.offset(8, 8, 9), Some(Position::new(8, 8)));
        assert_eq!(pos.offset(9, 0, 9), None);
    }

    #[test]
    fn test_step_follows_direction() {
        let pos = Position::new(4, 4);
        assert_eq!(pos.step(Direction::Down, 9), Some(Position::new(5, 4)));
        assert_eq!(pos.step_back(Direction::Down, 9), Some(Position::new(3, 4)));
        assert_eq!(pos.step_back(Direction::Across, 9), Some(Position::new(4, 3)));
        assert_eq!(pos.advanced(Direction::Across, 3), Position::new(4, 7));
    }

    #[test]
    fn test_all_is_row_major() {
        let all: Vec<_> = Position::all(3).collect();
        assert_eq!(all.len(), 9);
        assert_eq!(all[0], Position::new(0, 0));
        assert_eq!(all[3], Position::new(1, 0));
        assert!(all.windows(2).all(|w| w[0] < w[1]));
    }
}
