//! The player's board: what the solver has typed so far.

use std::fmt::{self, Display};

use crossgrid_core::{
    Cell, Grid, Position,
    letters::{self, Alphabet, DiacriticPolicy},
};

/// State of one board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::IsVariant)]
pub enum CellState {
    /// Not playable.
    #[default]
    Block,
    /// Playable, nothing typed.
    Empty,
    /// Playable, holding a typed letter.
    Filled(char),
}

impl CellState {
    /// Returns the typed letter, if any.
    #[must_use]
    pub const fn as_letter(self) -> Option<char> {
        match self {
            CellState::Filled(ch) => Some(ch),
            CellState::Block | CellState::Empty => None,
        }
    }
}

/// A `size × size` matrix of typed letters with the crossword's blocks.
///
/// The board never changes shape and never turns a block into a playable cell or
/// back; only [`CellState::Empty`] and [`CellState::Filled`] swap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerBoard {
    size: usize,
    cells: Vec<CellState>,
}

impl PlayerBoard {
    /// Creates an empty board with the blocks of `grid`.
    #[must_use]
    pub fn new(grid: &Grid) -> Self {
        let cells = grid
            .positions()
            .map(|pos| match grid[pos] {
                Cell::Block => CellState::Block,
                Cell::Letter(_) => CellState::Empty,
            })
            .collect();
        Self {
            size: grid.size(),
            cells,
        }
    }

    /// Side length.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    fn index(&self, pos: Position) -> Option<usize> {
        pos.is_within(self.size)
            .then_some(pos.row * self.size + pos.col)
    }

    /// Cell state at `pos`; out-of-grid positions read as blocks.
    #[must_use]
    pub fn cell(&self, pos: Position) -> CellState {
        self.index(pos)
            .map_or(CellState::Block, |index| self.cells[index])
    }

    /// Typed letter at `pos`.
    #[must_use]
    pub fn letter(&self, pos: Position) -> Option<char> {
        self.cell(pos).as_letter()
    }

    /// Returns `true` if `pos` is a block or outside the board.
    #[must_use]
    pub fn is_block(&self, pos: Position) -> bool {
        self.cell(pos).is_block()
    }

    /// Writes `letter` at a playable `pos`. Returns `true` if the board changed.
    pub fn set_letter(&mut self, pos: Position, letter: char) -> bool {
        self.replace(pos, CellState::Filled(letter))
    }

    /// Empties a playable `pos`. Returns `true` if the board changed.
    pub fn clear(&mut self, pos: Position) -> bool {
        self.replace(pos, CellState::Empty)
    }

    fn replace(&mut self, pos: Position, state: CellState) -> bool {
        let Some(index) = self.index(pos) else {
            return false;
        };
        let cell = &mut self.cells[index];
        if cell.is_block() || *cell == state {
            return false;
        }
        *cell = state;
        true
    }

    /// Empties every playable cell. Returns `true` if anything was typed.
    pub fn clear_all(&mut self) -> bool {
        let mut changed = false;
        for cell in &mut self.cells {
            if cell.is_filled() {
                *cell = CellState::Empty;
                changed = true;
            }
        }
        changed
    }

    /// Number of filled cells.
    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_filled()).count()
    }

    /// Returns the board as rows of strings: `"#"` for blocks, `""` for empty cells,
    /// the letter otherwise.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<String>> {
        self.cells
            .chunks(self.size.max(1))
            .map(|row| {
                row.iter()
                    .map(|cell| match cell {
                        CellState::Block => Cell::BLOCK_TOKEN.to_owned(),
                        CellState::Empty => String::new(),
                        CellState::Filled(ch) => ch.to_string(),
                    })
                    .collect()
            })
            .collect()
    }

    /// Returns `true` if `rows` is exactly `size × size`.
    #[must_use]
    pub fn matches_shape(&self, rows: &[Vec<String>]) -> bool {
        rows.len() == self.size && rows.iter().all(|row| row.len() == self.size)
    }

    /// Replaces the typed letters with those in `rows`.
    ///
    /// Returns `false` and leaves the board untouched if the shape differs. Tokens at
    /// block cells are ignored; tokens that are not a single letter of `alphabet`
    /// leave the cell empty. Letters are uppercased but keep their diacritics.
    pub fn restore_rows(&mut self, rows: &[Vec<String>], alphabet: Alphabet) -> bool {
        if !self.matches_shape(rows) {
            return false;
        }
        for (cell, token) in self.cells.iter_mut().zip(rows.iter().flatten()) {
            if cell.is_block() {
                continue;
            }
            let mut chars = token.chars();
            *cell = match (chars.next(), chars.next()) {
                (Some(ch), None) => {
                    letters::canonical_letter(ch, alphabet, DiacriticPolicy::Keep)
                        .map_or(CellState::Empty, CellState::Filled)
                }
                _ => CellState::Empty,
            };
        }
        true
    }
}

/// Renders `#` for blocks, `.` for empty cells, one row per line.
impl Display for PlayerBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.size.max(1)) {
            for cell in row {
                match cell {
                    CellState::Block => write!(f, "#")?,
                    CellState::Empty => write!(f, ".")?,
                    CellState::Filled(ch) => write!(f, "{ch}")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
