//! Classical crossword numbering.
//!
//! Cells are scanned row-major. A letter cell starts an across word when it sits on
//! the left edge or right of a block, and a down word when it sits on the top edge or
//! below a block. Each starting cell receives the next number; a cell starting both
//! words gets a single shared number.

use crate::{Direction, Grid, Position};

/// A word start: anchor position and its number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Start {
    /// Anchor cell.
    pub position: Position,
    /// Assigned number.
    pub number: u32,
}

/// Returns `true` if the letter cell at `pos` starts a word in `direction`.
///
/// Blocks and out-of-grid positions never start a word.
#[must_use]
pub fn starts_word(grid: &Grid, pos: Position, direction: Direction) -> bool {
    !grid.is_block(pos)
        && pos
            .step_back(direction, grid.size())
            .is_none_or(|prev| grid.is_block(prev))
}

/// Numbering of a grid.
///
/// # Examples
///
/// ```
/// use crossgrid_core::{Grid, Numbering, Position};
///
/// let grid: Grid = "\
/// CAT
/// A#O
/// BOW
/// ".parse().unwrap();
/// let numbering = Numbering::compute(&grid);
///
/// assert_eq!(numbering.number_at(Position::new(0, 0)), Some(1));
/// assert_eq!(numbering.number_at(Position::new(0, 2)), Some(3));
/// // One-letter runs such as (1, 0) still start a word and take a number.
/// assert_eq!(numbering.number_at(Position::new(1, 0)), Some(4));
/// assert_eq!(numbering.number_at(Position::new(2, 0)), Some(6));
/// assert_eq!(numbering.across().len(), 4);
/// assert_eq!(numbering.down().len(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Numbering {
    size: usize,
    numbers: Vec<Option<u32>>,
    across: Vec<Start>,
    down: Vec<Start>,
}

impl Numbering {
    /// Numbers `grid`. Never fails; an all-block grid yields no numbers.
    #[must_use]
    pub fn compute(grid: &Grid) -> Self {
        let size = grid.size();
        let mut numbers = vec![None; size * size];
        let mut across = Vec::new();
        let mut down = Vec::new();
        let mut next = 1;

        for position in grid.positions() {
            let starts_across = starts_word(grid, position, Direction::Across);
            let starts_down = starts_word(grid, position, Direction::Down);
            if !starts_across && !starts_down {
                continue;
            }
            let number = next;
            next += 1;
            numbers[position.row * size + position.col] = Some(number);
            if starts_across {
                across.push(Start { position, number });
            }
            if starts_down {
                down.push(Start { position, number });
            }
        }

        Self {
            size,
            numbers,
            across,
            down,
        }
    }

    /// Returns the number anchored at `pos`, if any.
    #[must_use]
    pub fn number_at(&self, pos: Position) -> Option<u32> {
        pos.is_within(self.size)
            .then(|| self.numbers[pos.row * self.size + pos.col])
            .flatten()
    }

    /// Across starts in number order.
    #[must_use]
    pub fn across(&self) -> &[Start] {
        &self.across
    }

    /// Down starts in number order.
    #[must_use]
    pub fn down(&self) -> &[Start] {
        &self.down
    }

    /// Starts for one direction.
    #[must_use]
    pub fn starts(&self, direction: Direction) -> &[Start] {
        match direction {
            Direction::Across => &self.across,
            Direction::Down => &self.down,
        }
    }

    /// Iterates `(position, number)` for every numbered cell, in number order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, u32)> + '_ {
        Position::all(self.size)
            .zip(&self.numbers)
            .filter_map(|(pos, number)| number.map(|n| (pos, n)))
    }

    /// Count of numbered cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.numbers.iter().flatten().count()
    }

    /// Returns `true` if no cell is numbered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.across.is_empty() && self.down.is_empty()
    }
}
