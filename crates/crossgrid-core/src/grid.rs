//! Square grid of cells.

use std::{
    fmt::{self, Display},
    ops::Index,
    str::FromStr,
};

use crate::{Cell, Position};

/// Errors produced when building a [`Grid`] from rows or text.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GridError {
    /// No rows were supplied.
    #[display("grid has no rows")]
    Empty,
    /// Rows and columns disagree.
    #[display("grid is not square: {rows} rows, row {row} has {cols} cells")]
    NotSquare {
        /// Number of rows.
        rows: usize,
        /// Index of the first offending row.
        row: usize,
        /// Length of that row.
        cols: usize,
    },
    /// A text token is neither a block marker nor a single letter.
    #[display("invalid cell token {token:?} at {position}")]
    InvalidToken {
        /// Where the token was found.
        position: Position,
        /// The raw token.
        token: String,
    },
}

/// A `size × size` matrix of [`Cell`]s, stored row-major.
///
/// The grid is always square. A fresh grid is all blocks.
///
/// # Examples
///
/// ```
/// use crossgrid_core::{Cell, Grid, Position};
///
/// let grid: Grid = "\
/// CAT
/// A#O
/// BOW
/// ".parse().unwrap();
///
/// assert_eq!(grid.size(), 3);
/// assert_eq!(grid[Position::new(1, 1)], Cell::Block);
/// assert_eq!(grid[Position::new(2, 2)], Cell::Letter('W'));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates an all-block grid.
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![Cell::Block; size * size],
        }
    }

    /// Builds a grid from rows.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::Empty`] for no rows and [`GridError::NotSquare`] if any row
    /// length differs from the row count.
    pub fn from_rows<R>(rows: impl IntoIterator<Item = R>) -> Result<Self, GridError>
    where
        R: AsRef<[Cell]>,
    {
        let rows: Vec<R> = rows.into_iter().collect();
        let size = rows.len();
        if size == 0 {
            return Err(GridError::Empty);
        }
        let mut cells = Vec::with_capacity(size * size);
        for (row, cols) in rows.iter().enumerate() {
            let cols = cols.as_ref();
            if cols.len() != size {
                return Err(GridError::NotSquare {
                    rows: size,
                    row,
                    cols: cols.len(),
                });
            }
            cells.extend_from_slice(cols);
        }
        Ok(Self { size, cells })
    }

    /// Returns the side length.
    #[must_use]
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the cell at `pos`, or `None` outside the grid.
    #[must_use]
    #[inline]
    pub fn get(&self, pos: Position) -> Option<Cell> {
        pos.is_within(self.size)
            .then(|| self.cells[pos.row * self.size + pos.col])
    }

    /// Overwrites the cell at `pos`. Positions outside the grid are ignored.
    #[inline]
    pub fn set(&mut self, pos: Position, cell: Cell) {
        if pos.is_within(self.size) {
            self.cells[pos.row * self.size + pos.col] = cell;
        }
    }

    /// Returns `true` if `pos` is outside the grid or holds a block.
    #[must_use]
    #[inline]
    pub fn is_block(&self, pos: Position) -> bool {
        self.get(pos).is_none_or(|cell| cell.is_block())
    }

    /// Iterates all positions in row-major order.
    pub fn positions(&self) -> impl DoubleEndedIterator<Item = Position> + Clone + use<> {
        Position::all(self.size)
    }

    /// Iterates the rows as slices.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.size.max(1))
    }

    /// Number of letter cells.
    #[must_use]
    pub fn letter_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_letter()).count()
    }

    /// Returns the grid in its wire shape: rows of `"#"` or single-letter strings.
    #[must_use]
    pub fn to_string_rows(&self) -> Vec<Vec<String>> {
        self.rows()
            .map(|row| row.iter().map(ToString::to_string).collect())
            .collect()
    }

    /// Returns a copy where every letter rejected by `keep` becomes a block.
    #[must_use]
    pub fn masked(&self, mut keep: impl FnMut(char) -> bool) -> Self {
        let cells = self
            .cells
            .iter()
            .map(|&cell| match cell {
                Cell::Letter(ch) if keep(ch) => cell,
                _ => Cell::Block,
            })
            .collect();
        Self {
            size: self.size,
            cells,
        }
    }
}

impl Index<Position> for Grid {
    type Output = Cell;

    /// # Panics
    ///
    /// Panics if `pos` is outside the grid.
    fn index(&self, pos: Position) -> &Cell {
        assert!(
            pos.is_within(self.size),
            "position {pos} outside {0}x{0} grid",
            self.size
        );
        &self.cells[pos.row * self.size + pos.col]
    }
}

/// Parses one row per line.
///
/// A line containing whitespace is split into tokens; otherwise each character is one
/// cell. `#`, `.` and `_` are blocks, letters are uppercased. Short rows are padded
/// with blocks up to the longest row; the result must still be square.
impl FromStr for Grid {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rows = Vec::new();
        for (row, line) in s.lines().map(str::trim).filter(|l| !l.is_empty()).enumerate() {
            let tokens: Vec<String> = if line.contains(char::is_whitespace) {
                line.split_whitespace().map(str::to_owned).collect()
            } else {
                line.chars().map(String::from).collect()
            };
            let cells = tokens
                .into_iter()
                .enumerate()
                .map(|(col, token)| parse_text_token(&token, Position::new(row, col)))
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(cells);
        }
        let width = rows.iter().map(Vec::len).max().unwrap_or_default();
        for row in &mut rows {
            row.resize(width, Cell::Block);
        }
        Self::from_rows(rows)
    }
}

fn parse_text_token(token: &str, position: Position) -> Result<Cell, GridError> {
    match token {
        "#" | "." | "_" => Ok(Cell::Block),
        _ => match Cell::from_token(token) {
            Some(Cell::Letter(ch)) if ch.is_alphabetic() => {
                Ok(Cell::Letter(crate::letters::upper(ch)))
            }
            _ => Err(GridError::InvalidToken {
                position,
                token: token.to_owned(),
            }),
        },
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for cell in row {
                write!(f, "{cell}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_all_blocks() {
        let grid = Grid::new(9);
        assert_eq!(grid.size(), 9);
        assert_eq!(grid.letter_count(), 0);
        assert!(grid.positions().all(|pos| grid.is_block(pos)));
    }

    #[test]
    fn test_get_and_set_ignore_out_of_bounds() {
        let mut grid = Grid::new(3);
        grid.set(Position::new(3, 0), Cell::Letter('A'));
        assert_eq!(grid.letter_count(), 0);
        assert_eq!(grid.get(Position::new(0, 3)), None);
        assert!(grid.is_block(Position::new(5, 5)));
        grid.set(Position::new(2, 1), Cell::Letter('Q'));
        assert_eq!(grid.get(Position::new(2, 1)), Some(Cell::Letter('Q')));
    }

    #[test]
    fn test_parse_chars_and_tokens() {
        let chars: Grid = "ab#\n#cd\nef.".parse().unwrap();
        let tokens: Grid = "A B #\n# C D\nE F #".parse().unwrap();
        assert_eq!(chars, tokens);
        assert_eq!(chars.to_string(), "AB#\n#CD\nEF#\n");
    }

    #[test]
    fn test_parse_pads_short_rows() {
        let grid: Grid = "AB\nC".parse().unwrap();
        assert_eq!(grid[Position::new(1, 1)], Cell::Block);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!("".parse::<Grid>(), Err(GridError::Empty));
        assert!(matches!(
            "ABC\nDEF".parse::<Grid>(),
            Err(GridError::NotSquare { rows: 2, .. })
        ));
        assert!(matches!(
            "A1\nBC".parse::<Grid>(),
            Err(GridError::InvalidToken { position, .. }) if position == Position::new(0, 1)
        ));
    }

    #[test]
    fn test_wire_rows() {
        let grid: Grid = "A#\nBC".parse().unwrap();
        assert_eq!(
            grid.to_string_rows(),
            vec![vec!["A".to_owned(), "#".to_owned()], vec!["B".to_owned(), "C".to_owned()]]
        );
    }

    #[test]
    fn test_masked_blocks_rejected_letters() {
        let grid: Grid = "AÑ\nBC".parse().unwrap();
        let masked = grid.masked(|ch| ch.is_ascii_uppercase());
        assert_eq!(masked[Position::new(0, 1)], Cell::Block);
        assert_eq!(masked.letter_count(), 3);
    }
}
