//! The complete, immutable puzzle and its canonical JSON shape.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    Cell, DeriveOptions, Direction, Entry, EntryKey, Grid, Position, ValidationError,
    derive_entries_with_clues,
    entry::sort_entries,
    letters::{self, Alphabet},
};

/// Opaque provenance attached to a crossword (`source`, `reason`, ...).
pub type Meta = Map<String, Value>;

/// A crossword puzzle: title, language tag, square grid and ordered entries.
///
/// Entries are always kept in canonical order (across by number, then down by
/// number). A crossword is immutable once built; solving state lives elsewhere.
///
/// Serializes to and deserializes from the canonical JSON shape through
/// [`CrosswordDto`]. Deserialization checks only the grid shape and cell tokens; run
/// [`validate`](crate::validate) for the full structural check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "CrosswordDto", try_from = "CrosswordDto")]
pub struct Crossword {
    title: String,
    language: String,
    grid: Grid,
    entries: Vec<Entry>,
    meta: Option<Meta>,
}

impl Crossword {
    /// Creates a crossword, putting `entries` into canonical order.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        language: impl Into<String>,
        grid: Grid,
        mut entries: Vec<Entry>,
    ) -> Self {
        sort_entries(&mut entries);
        Self {
            title: title.into(),
            language: language.into(),
            grid,
            entries,
            meta: None,
        }
    }

    /// Builds a crossword from a trusted grid: numbers it and derives its entries,
    /// asking `clue_for` for each clue.
    ///
    /// When `options` strip diacritics, the grid letters are folded as well, so that
    /// every answer still matches the cells it covers.
    ///
    /// # Examples
    ///
    /// ```
    /// use crossgrid_core::{Crossword, DeriveOptions, Grid};
    ///
    /// let grid: Grid = "\
    /// CAT
    /// A#O
    /// BOW
    /// ".parse().unwrap();
    /// let options = DeriveOptions::default();
    /// let crossword = Crossword::from_grid("Mini", "en", grid, &options, |key, answer| {
    ///     format!("Clue for {answer} ({key})")
    /// });
    /// assert_eq!(crossword.entries().len(), 4);
    /// assert_eq!(crossword.entries()[0].clue, "Clue for CAT (1-across)");
    /// ```
    #[must_use]
    pub fn from_grid<F>(
        title: impl Into<String>,
        language: impl Into<String>,
        grid: Grid,
        options: &DeriveOptions,
        clue_for: F,
    ) -> Self
    where
        F: FnMut(EntryKey, &str) -> String,
    {
        let mut grid = grid;
        if options.diacritic_policy().is_strip() {
            for pos in grid.positions() {
                if let Cell::Letter(ch) = grid[pos] {
                    grid.set(pos, Cell::Letter(letters::upper(letters::fold_diacritics(ch))));
                }
            }
        }
        let entries = derive_entries_with_clues(&grid, options, clue_for);
        Self::new(title, language, grid, entries)
    }

    /// Attaches provenance metadata.
    #[must_use]
    pub fn with_meta(mut self, meta: Meta) -> Self {
        self.meta = Some(meta);
        self
    }

    /// Puzzle title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Language tag of the clues.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Letter predicate matching [`Crossword::language`].
    #[must_use]
    pub fn alphabet(&self) -> Alphabet {
        Alphabet::for_language(&self.language)
    }

    /// Grid side length.
    #[must_use]
    pub fn size(&self) -> usize {
        self.grid.size()
    }

    /// The solution grid.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// All entries in canonical order.
    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Entries of one direction, by number.
    pub fn entries_in(&self, direction: Direction) -> impl Iterator<Item = &Entry> {
        self.entries
            .iter()
            .filter(move |entry| entry.direction == direction)
    }

    /// Looks up an entry by key.
    #[must_use]
    pub fn entry(&self, key: EntryKey) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.key() == key)
    }

    /// Solution letter at `pos`, `None` for blocks and out-of-grid positions.
    #[must_use]
    pub fn solution_at(&self, pos: Position) -> Option<char> {
        self.grid.get(pos).and_then(Cell::as_letter)
    }

    /// Provenance metadata, if any.
    #[must_use]
    pub fn meta(&self) -> Option<&Meta> {
        self.meta.as_ref()
    }
}

/// Canonical crossword JSON:
///
/// ```json
/// { "title": "...", "language": "es", "size": 9,
///   "grid": [["#", "A", ...], ...],
///   "entries": [{ "number": 1, "row": 0, "col": 1, "direction": "across",
///                 "answer": "ARGENTINA", "clue": "..." }],
///   "meta": { "source": "..." } }
/// ```
///
/// Missing scalar fields default to empty values so that the validator, not the JSON
/// parser, reports them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CrosswordDto {
    /// Puzzle title.
    #[serde(default)]
    pub title: String,
    /// Language tag.
    #[serde(default)]
    pub language: String,
    /// Declared side length.
    #[serde(default)]
    pub size: usize,
    /// Rows of `"#"` or single letters.
    #[serde(default)]
    pub grid: Vec<Vec<String>>,
    /// Entries in any order.
    #[serde(default)]
    pub entries: Vec<Entry>,
    /// Opaque provenance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}

impl From<Crossword> for CrosswordDto {
    fn from(crossword: Crossword) -> Self {
        Self {
            size: crossword.size(),
            grid: crossword.grid.to_string_rows(),
            title: crossword.title,
            language: crossword.language,
            entries: crossword.entries,
            meta: crossword.meta,
        }
    }
}

impl TryFrom<CrosswordDto> for Crossword {
    type Error = ValidationError;

    fn try_from(dto: CrosswordDto) -> Result<Self, Self::Error> {
        let size = dto.size;
        let shape_error = |cols: usize| ValidationError::GridShapeMismatch {
            expected: size,
            rows: dto.grid.len(),
            cols,
        };
        if dto.grid.len() != size {
            return Err(shape_error(dto.grid.first().map_or(0, Vec::len)));
        }
        if let Some(row) = dto.grid.iter().find(|row| row.len() != size) {
            return Err(shape_error(row.len()));
        }

        let mut grid = Grid::new(size);
        for (row, tokens) in dto.grid.iter().enumerate() {
            for (col, token) in tokens.iter().enumerate() {
                let position = Position::new(row, col);
                let cell =
                    Cell::from_token(token).ok_or_else(|| ValidationError::InvalidCellCharacter {
                        position,
                        found: token.clone(),
                    })?;
                grid.set(position, cell);
            }
        }

        let crossword = Crossword::new(dto.title, dto.language, grid, dto.entries);
        Ok(match dto.meta {
            Some(meta) => crossword.with_meta(meta),
            None => crossword,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::letters::DiacriticPolicy;

    fn sample() -> Crossword {
        let grid: Grid = "CAT\nA#O\nBOW".parse().unwrap();
        Crossword::from_grid("Mini", "en", grid, &DeriveOptions::default(), |_, answer| {
            format!("about {answer}")
        })
    }

    #[test]
    fn test_entries_in_direction() {
        let crossword = sample();
        let down: Vec<_> = crossword
            .entries_in(Direction::Down)
            .map(|e| e.answer.as_str())
            .collect();
        assert_eq!(down, ["CAB", "TOW"]);
        let key = EntryKey::new(3, Direction::Down);
        assert_eq!(crossword.entry(key).map(|e| e.answer.as_str()), Some("TOW"));
    }

    #[test]
    fn test_new_sorts_entries() {
        let crossword = sample();
        let mut reversed = crossword.entries().to_vec();
        reversed.reverse();
        let rebuilt = Crossword::new("Mini", "en", crossword.grid().clone(), reversed);
        assert_eq!(rebuilt.entries(), crossword.entries());
    }

    #[test]
    fn test_json_round_trip_keeps_meta() {
        let mut meta = Meta::new();
        meta.insert("source".to_owned(), json!("test"));
        let crossword = sample().with_meta(meta);
        let json = serde_json::to_value(&crossword).unwrap();
        assert_eq!(json["size"], json!(3));
        assert_eq!(json["grid"][1], json!(["A", "#", "O"]));
        assert_eq!(json["meta"]["source"], json!("test"));
        let back: Crossword = serde_json::from_value(json).unwrap();
        assert_eq!(back, crossword);
    }

    #[test]
    fn test_from_grid_keeps_grid_and_answers_aligned() {
        let grid: Grid = "AÑO\nS#R\nAMO".parse().unwrap();

        let options = DeriveOptions::default();
        let folded = Crossword::from_grid("Año", "es", grid.clone(), &options, |_, a| a.to_owned());
        assert_eq!(folded.solution_at(Position::new(0, 1)), Some('N'));
        assert_eq!(folded.entries()[0].answer, "ANO");

        let options = DeriveOptions::default().diacritics(DiacriticPolicy::Keep);
        let kept = Crossword::from_grid("Año", "es", grid, &options, |_, a| a.to_owned());
        assert_eq!(kept.solution_at(Position::new(0, 1)), Some('Ñ'));
        assert_eq!(kept.entries()[0].answer, "AÑO");
        for entry in kept.entries() {
            assert!(entry.cells().all(|(pos, ch)| kept.solution_at(pos) == Some(ch)));
        }
    }

    #[test]
    fn test_dto_rejects_ragged_grid() {
        let dto = CrosswordDto {
            size: 2,
            grid: vec![vec!["A".into(), "B".into()], vec!["C".into()]],
            ..CrosswordDto::default()
        };
        assert_eq!(
            Crossword::try_from(dto),
            Err(ValidationError::GridShapeMismatch {
                expected: 2,
                rows: 2,
                cols: 1
            })
        );
    }

    #[test]
    fn test_dto_rejects_bad_token() {
        let dto = CrosswordDto {
            size: 2,
            grid: vec![vec!["A".into(), "".into()], vec!["C".into(), "D".into()]],
            ..CrosswordDto::default()
        };
        assert!(matches!(
            Crossword::try_from(dto),
            Err(ValidationError::InvalidCellCharacter { position, .. })
                if position == Position::new(0, 1)
        ));
    }
}
