//! Core data structures for crossword puzzles.
//!
//! This crate provides the grid model shared by reconstruction, validation and
//! solving, along with the two pure engines that turn a grid into entries.
//!
//! # Overview
//!
//! 1. **Grid model** - Fundamental crossword types
//!    - [`position`]: `(row, col)` coordinates and neighbour stepping
//!    - [`cell`]: [`Cell`] (block or letter) and [`Direction`]
//!    - [`grid`]: the square [`Grid`] of cells, with a text format for fixtures
//!    - [`entry`]: a single placed word ([`Entry`]) and its [`EntryKey`]
//!    - [`crossword`]: the complete, immutable [`Crossword`] and its JSON wire shape
//!
//! 2. **Engines** - Pure functions over a grid
//!    - [`numbering`]: classical across/down numbering ([`Numbering`])
//!    - [`derive`]: walks a numbered grid into its canonical entry list
//!    - [`validate`]: structural checks returning a tagged [`ValidationError`]
//!
//! 3. **Text** - [`letters`]: alphabets, diacritic folding, answer and clue cleanup
//!
//! # Examples
//!
//! ```
//! use crossgrid_core::{DeriveOptions, Grid, Numbering, Position, derive_entries};
//!
//! let grid: Grid = "\
//! SOL
//! O#A
//! LAS
//! ".parse().unwrap();
//!
//! let numbering = Numbering::compute(&grid);
//! assert_eq!(numbering.number_at(Position::new(0, 2)), Some(3));
//!
//! let entries = derive_entries(&grid, &DeriveOptions::default());
//! assert_eq!(entries.len(), 4);
//! assert_eq!(entries[0].answer, "SOL");
//! ```

pub mod cell;
pub mod crossword;
pub mod derive;
pub mod entry;
pub mod grid;
pub mod letters;
pub mod numbering;
pub mod position;
pub mod validate;

// Re-export commonly used types
pub use self::{
    cell::{Cell, Direction},
    crossword::{Crossword, CrosswordDto, Meta},
    derive::{DeriveOptions, PLACEHOLDER_CLUE, derive_entries, derive_entries_with_clues},
    entry::{Entry, EntryKey},
    grid::{Grid, GridError},
    numbering::{Numbering, Start},
    position::Position,
    validate::{
        CrosswordParseError, ValidationError, ValidationPolicy, parse_and_validate, validate,
    },
};
