//! The parse boundary for untrusted candidate puzzles.
//!
//! A candidate is parsed exactly once into typed, optional fields. Nothing here
//! rejects an individual entry: an entry with unusable fields is kept with those
//! fields set to `None` and dropped later by the reconstructor, which records why.

use crossgrid_core::{Cell, Direction, Grid, Meta, letters};
use serde_json::{Map, Value};

/// Largest side a candidate grid is read up to; rows and cells past it are ignored.
pub const MAX_GRID_SIDE: usize = 64;

/// Top-level reasons a candidate cannot be used at all.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::IsVariant)]
pub enum CandidateError {
    /// The text is not JSON.
    #[display("candidate is not valid JSON: {_0}")]
    InvalidJson(serde_json::Error),
    /// The document is not a JSON object.
    #[display("candidate is not a JSON object")]
    NotAnObject,
    /// The object has no `entries` array.
    #[display("candidate has no entries list")]
    MissingEntries,
}

/// An untrusted puzzle proposal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Candidate {
    /// Proposed title.
    pub title: Option<String>,
    /// Theme the puzzle was requested for.
    pub theme: Option<String>,
    /// Proposed language tag.
    pub language: Option<String>,
    /// Declared size. Advisory only.
    pub size: Option<usize>,
    /// Proposed grid, squared up by padding and cut at [`MAX_GRID_SIDE`]. Advisory
    /// only.
    pub grid: Option<Grid>,
    /// Opaque provenance passed through to the result.
    pub meta: Option<Meta>,
    /// Proposed entries in input order.
    pub entries: Vec<CandidateEntry>,
}

/// One untrusted entry proposal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateEntry {
    /// Position in the input list.
    pub index: usize,
    /// Advisory number.
    pub number: Option<u32>,
    /// Start row.
    pub row: Option<usize>,
    /// Start column.
    pub col: Option<usize>,
    /// Direction.
    pub direction: Option<Direction>,
    /// Raw answer text, unnormalized.
    pub answer: String,
    /// Raw clue text.
    pub clue: String,
}

impl Candidate {
    /// Parses candidate JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`CandidateError`] if the text is not JSON, not an object, or lacks an
    /// `entries` array.
    ///
    /// # Examples
    ///
    /// ```
    /// use crossgrid_builder::Candidate;
    /// use crossgrid_core::Direction;
    ///
    /// let candidate = Candidate::from_json_str(r#"{
    ///     "title": "Mate",
    ///     "size": "9",
    ///     "entries": [
    ///         {"number": 1.0, "row": 0, "col": 0, "direction": "Across", "answer": "mate", "clue": "1. Infusión"},
    ///         {"row": 0, "col": 0, "direction": "v", "answer": "MATE"}
    ///     ]
    /// }"#).unwrap();
    /// assert_eq!(candidate.size, Some(9));
    /// assert_eq!(candidate.entries[0].number, Some(1));
    /// assert_eq!(candidate.entries[1].direction, None);
    /// ```
    pub fn from_json_str(text: &str) -> Result<Self, CandidateError> {
        let value: Value = serde_json::from_str(text).map_err(CandidateError::InvalidJson)?;
        Self::from_value(&value)
    }

    /// Reads a candidate out of an already parsed JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`CandidateError::NotAnObject`] or [`CandidateError::MissingEntries`].
    pub fn from_value(value: &Value) -> Result<Self, CandidateError> {
        let object = value.as_object().ok_or(CandidateError::NotAnObject)?;
        let entries = object
            .get("entries")
            .and_then(Value::as_array)
            .ok_or(CandidateError::MissingEntries)?;

        let entries = entries
            .iter()
            .enumerate()
            .map(|(index, value)| CandidateEntry::from_value(index, value))
            .collect();

        Ok(Self {
            title: text_field(object, "title"),
            theme: text_field(object, "theme"),
            language: text_field(object, "language"),
            size: object.get("size").and_then(lenient_count),
            grid: object
                .get("grid")
                .or_else(|| object.get("values"))
                .and_then(lenient_grid),
            meta: object.get("meta").and_then(Value::as_object).cloned(),
            entries,
        })
    }

    /// Row count of the proposed grid, if any.
    #[must_use]
    pub fn grid_rows(&self) -> Option<usize> {
        self.grid.as_ref().map(Grid::size)
    }
}

impl CandidateEntry {
    /// Reads one entry. Never fails; unusable fields become `None` or empty.
    #[must_use]
    pub fn from_value(index: usize, value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            log::debug!("candidate entry #{index} is not an object");
            return Self {
                index,
                ..Self::default()
            };
        };
        let count = |key: &str| object.get(key).and_then(lenient_count);
        Self {
            index,
            number: count("number").and_then(|n| u32::try_from(n).ok()),
            row: count("row"),
            col: count("col"),
            direction: object
                .get("direction")
                .and_then(Value::as_str)
                .and_then(parse_direction),
            answer: string_field(object, "answer"),
            clue: string_field(object, "clue"),
        }
    }
}

/// Parses a loosely written direction: `across`/`a`/`horizontal` or
/// `down`/`d`/`vertical`, in any case.
#[must_use]
pub fn parse_direction(raw: &str) -> Option<Direction> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "across" | "a" | "horizontal" => Some(Direction::Across),
        "down" | "d" | "vertical" => Some(Direction::Down),
        _ => None,
    }
}

fn string_field(object: &Map<String, Value>, key: &str) -> String {
    object
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned()
}

fn text_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    let text = object.get(key)?.as_str()?.trim();
    (!text.is_empty()).then(|| text.to_owned())
}

/// Reads a non-negative integer from a JSON integer, float or numeric string.
/// Fractional values are rounded.
#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn lenient_count(value: &Value) -> Option<usize> {
    let float = match value {
        Value::Number(number) => {
            if let Some(n) = number.as_u64() {
                return usize::try_from(n).ok();
            }
            number.as_f64()?
        }
        Value::String(text) => {
            let text = text.trim();
            if let Ok(n) = text.parse::<usize>() {
                return Some(n);
            }
            text.parse::<f64>().ok()?
        }
        _ => return None,
    };
    let rounded = float.round();
    (rounded.is_finite() && rounded >= 0.0 && rounded <= f64::from(u32::MAX))
        .then_some(rounded as usize)
}

/// Reads a grid given as rows of cell strings or as row strings. Rows are padded
/// with blocks to a square; unreadable cells become blocks. At most
/// [`MAX_GRID_SIDE`] rows and cells per row are read.
fn lenient_grid(value: &Value) -> Option<Grid> {
    let rows: Vec<Vec<Cell>> = value
        .as_array()?
        .iter()
        .take(MAX_GRID_SIDE)
        .map(|row| match row {
            Value::Array(cells) => cells
                .iter()
                .take(MAX_GRID_SIDE)
                .map(|cell| cell.as_str().map_or(Cell::Block, lenient_cell))
                .collect(),
            Value::String(line) if line.trim().contains(char::is_whitespace) => line
                .split_whitespace()
                .take(MAX_GRID_SIDE)
                .map(lenient_cell)
                .collect(),
            Value::String(line) => line
                .trim()
                .chars()
                .take(MAX_GRID_SIDE)
                .map(|ch| lenient_cell(ch.encode_utf8(&mut [0; 4])))
                .collect(),
            _ => Vec::new(),
        })
        .collect();

    let size = rows.iter().map(Vec::len).chain([rows.len()]).max()?;
    if size == 0 {
        return None;
    }
    let mut grid = Grid::new(size);
    for (row, cells) in rows.iter().enumerate() {
        for (col, cell) in cells.iter().enumerate() {
            grid.set(crossgrid_core::Position::new(row, col), *cell);
        }
    }
    Some(grid)
}

fn lenient_cell(token: &str) -> Cell {
    let mut chars = token.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) if ch.is_alphabetic() => Cell::Letter(letters::upper(ch)),
        _ => Cell::Block,
    }
}
