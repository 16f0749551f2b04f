//! Structural validation of a complete crossword.

use std::collections::HashSet;

use crate::{
    Cell, Crossword, CrosswordDto, Direction, Entry, EntryKey, Position, letters::Alphabet,
};

/// Thresholds applied by [`validate`].
///
/// # Examples
///
/// ```
/// use crossgrid_core::ValidationPolicy;
///
/// let policy = ValidationPolicy::default();
/// assert_eq!(policy.min_entries_for(9), 10);
/// assert_eq!(policy.min_entries_for(13), 15);
///
/// let relaxed = policy.min_entries(4).max_imbalance_percent(50);
/// assert_eq!(relaxed.min_entries_for(9), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationPolicy {
    min_size: usize,
    max_size: usize,
    min_entries: usize,
    reference_size: usize,
    max_imbalance_percent: usize,
    min_answer_len: usize,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            min_size: 9,
            max_size: 13,
            min_entries: 10,
            reference_size: 9,
            max_imbalance_percent: 35,
            min_answer_len: 2,
        }
    }
}

impl ValidationPolicy {
    /// Sets the accepted size range (inclusive).
    #[must_use]
    pub fn size_range(mut self, min: usize, max: usize) -> Self {
        self.min_size = min;
        self.max_size = max.max(min);
        self
    }

    /// Sets the minimum entry count required at the reference size.
    #[must_use]
    pub fn min_entries(mut self, count: usize) -> Self {
        self.min_entries = count;
        self
    }

    /// Sets the size at which [`ValidationPolicy::min_entries`] applies unscaled.
    #[must_use]
    pub fn reference_size(mut self, size: usize) -> Self {
        self.reference_size = size.max(1);
        self
    }

    /// Sets the largest allowed `|across - down|` as a percentage of all entries.
    #[must_use]
    pub fn max_imbalance_percent(mut self, percent: usize) -> Self {
        self.max_imbalance_percent = percent;
        self
    }

    /// Sets the minimum answer length. Values below 2 behave as 2.
    #[must_use]
    pub fn min_answer_len(mut self, len: usize) -> Self {
        self.min_answer_len = len;
        self
    }

    /// Smallest accepted size.
    #[must_use]
    pub fn min_size(&self) -> usize {
        self.min_size
    }

    /// Largest accepted size.
    #[must_use]
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Clamps `size` into the accepted range.
    #[must_use]
    pub fn clamp_size(&self, size: usize) -> usize {
        size.clamp(self.min_size, self.max_size)
    }

    /// Minimum entry count for a grid of `size`, scaled from the reference size and
    /// rounded up.
    #[must_use]
    pub fn min_entries_for(&self, size: usize) -> usize {
        (self.min_entries * size).div_ceil(self.reference_size)
    }

    /// Configured imbalance threshold.
    #[must_use]
    pub fn imbalance_percent(&self) -> usize {
        self.max_imbalance_percent
    }

    /// Minimum answer length actually applied.
    #[must_use]
    pub fn effective_min_answer_len(&self) -> usize {
        self.min_answer_len.max(2)
    }
}

/// Why a crossword was rejected.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    derive_more::Display,
    derive_more::Error,
    derive_more::IsVariant,
)]
pub enum ValidationError {
    /// A required text field is empty.
    #[display("{field} must not be empty")]
    EmptyField {
        /// Field name.
        field: &'static str,
    },
    /// Size outside the accepted range.
    #[display("size {size} is outside {min}..={max}")]
    SizeOutOfRange {
        /// Declared size.
        size: usize,
        /// Smallest accepted.
        min: usize,
        /// Largest accepted.
        max: usize,
    },
    /// Grid is not `size × size`.
    #[display("grid is {rows} rows by {cols} columns, expected {expected}x{expected}")]
    GridShapeMismatch {
        /// Declared size.
        expected: usize,
        /// Row count found.
        rows: usize,
        /// Length of the offending row.
        cols: usize,
    },
    /// A cell is neither `#` nor a single uppercase letter.
    #[display("invalid cell {found:?} at {position}")]
    InvalidCellCharacter {
        /// Offending cell.
        position: Position,
        /// Its content.
        found: String,
    },
    /// Fewer entries than the size-scaled minimum.
    #[display("{found} entries, at least {required} required")]
    TooFewEntries {
        /// Entry count.
        found: usize,
        /// Required count.
        required: usize,
    },
    /// An entry numbered 0.
    #[display("entry {key} has an invalid number")]
    InvalidEntryNumber {
        /// Offending entry.
        key: EntryKey,
    },
    /// An answer that is too short or contains non-letters.
    #[display("entry {key} has invalid answer {answer:?}")]
    InvalidAnswer {
        /// Offending entry.
        key: EntryKey,
        /// Its answer.
        answer: String,
    },
    /// An entry running off the grid.
    #[display("entry {key} runs off the grid")]
    EntryOutOfBounds {
        /// Offending entry.
        key: EntryKey,
    },
    /// An entry covering a block.
    #[display("entry {key} crosses a block at {position}")]
    EntryCrossesBlock {
        /// Offending entry.
        key: EntryKey,
        /// The block.
        position: Position,
    },
    /// An entry letter that disagrees with the grid.
    #[display("entry {key} expects {expected:?} at {position}, grid has {found:?}")]
    EntryGridMismatch {
        /// Offending entry.
        key: EntryKey,
        /// Disagreeing cell.
        position: Position,
        /// Letter from the answer.
        expected: char,
        /// Letter in the grid.
        found: char,
    },
    /// An entry that starts in the middle of a word.
    #[display("entry {key} does not start at a word boundary")]
    EntryNotAnchored {
        /// Offending entry.
        key: EntryKey,
    },
    /// Two entries share `(number, direction)`.
    #[display("duplicate entry {key}")]
    DuplicateEntryKey {
        /// Repeated key.
        key: EntryKey,
    },
    /// Across and down counts too far apart.
    #[display("{across} across vs {down} down exceeds {max_percent}% imbalance")]
    DirectionImbalance {
        /// Across count.
        across: usize,
        /// Down count.
        down: usize,
        /// Threshold.
        max_percent: usize,
    },
}

/// Error from [`parse_and_validate`].
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum CrosswordParseError {
    /// Not well-formed crossword JSON.
    #[display("malformed crossword JSON: {_0}")]
    Json(serde_json::Error),
    /// Well-formed but structurally invalid.
    #[display("invalid crossword: {_0}")]
    Invalid(ValidationError),
}

/// Parses canonical crossword JSON and validates it.
///
/// Header fields are checked before the grid is converted, so the first failure
/// reported follows the same order as [`validate`].
///
/// # Errors
///
/// Returns [`CrosswordParseError::Json`] for malformed JSON (including unknown
/// directions) and [`CrosswordParseError::Invalid`] for the first structural failure.
pub fn parse_and_validate(
    json: &str,
    policy: &ValidationPolicy,
) -> Result<Crossword, CrosswordParseError> {
    let dto: CrosswordDto = serde_json::from_str(json)?;
    check_header(&dto.title, &dto.language, dto.size, policy)?;
    let crossword = Crossword::try_from(dto)?;
    validate(&crossword, policy)?;
    Ok(crossword)
}

/// Checks a crossword, stopping at the first failure.
///
/// Order: title and language, size, cell characters, entry count, each entry in
/// canonical order, duplicate keys, direction balance.
///
/// # Errors
///
/// Returns the first [`ValidationError`] found.
///
/// # Examples
///
/// ```
/// use crossgrid_core::{
///     Crossword, DeriveOptions, Grid, ValidationError, ValidationPolicy, validate,
/// };
///
/// let grid: Grid = "CAT\nA#O\nBOW".parse().unwrap();
/// let options = DeriveOptions::default();
/// let crossword = Crossword::from_grid("Mini", "en", grid, &options, |_, a| a.to_lowercase());
///
/// let policy = ValidationPolicy::default().size_range(3, 13).min_entries(4).reference_size(3);
/// assert_eq!(validate(&crossword, &policy), Ok(()));
///
/// let strict = ValidationPolicy::default();
/// assert!(matches!(validate(&crossword, &strict), Err(ValidationError::SizeOutOfRange { .. })));
/// ```
pub fn validate(crossword: &Crossword, policy: &ValidationPolicy) -> Result<(), ValidationError> {
    let size = crossword.size();
    check_header(crossword.title(), crossword.language(), size, policy)?;

    let alphabet = crossword.alphabet();
    let grid = crossword.grid();
    for pos in grid.positions() {
        if let Cell::Letter(ch) = grid[pos]
            && !is_grid_letter(ch, alphabet)
        {
            return Err(ValidationError::InvalidCellCharacter {
                position: pos,
                found: ch.to_string(),
            });
        }
    }

    let entries = crossword.entries();
    let required = policy.min_entries_for(size);
    if entries.len() < required {
        return Err(ValidationError::TooFewEntries {
            found: entries.len(),
            required,
        });
    }

    for entry in entries {
        check_entry(crossword, entry, policy)?;
    }

    let mut seen = HashSet::new();
    if let Some(entry) = entries.iter().find(|entry| !seen.insert(entry.key())) {
        return Err(ValidationError::DuplicateEntryKey { key: entry.key() });
    }

    let across = crossword.entries_in(Direction::Across).count();
    let down = entries.len() - across;
    let max_percent = policy.imbalance_percent();
    if across.abs_diff(down) * 100 > max_percent * entries.len() {
        return Err(ValidationError::DirectionImbalance {
            across,
            down,
            max_percent,
        });
    }

    Ok(())
}

fn check_header(
    title: &str,
    language: &str,
    size: usize,
    policy: &ValidationPolicy,
) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::EmptyField { field: "title" });
    }
    if language.trim().is_empty() {
        return Err(ValidationError::EmptyField { field: "language" });
    }
    if !(policy.min_size()..=policy.max_size()).contains(&size) {
        return Err(ValidationError::SizeOutOfRange {
            size,
            min: policy.min_size(),
            max: policy.max_size(),
        });
    }
    Ok(())
}

fn check_entry(
    crossword: &Crossword,
    entry: &Entry,
    policy: &ValidationPolicy,
) -> Result<(), ValidationError> {
    let key = entry.key();
    let grid = crossword.grid();
    let alphabet = crossword.alphabet();

    if entry.number == 0 {
        return Err(ValidationError::InvalidEntryNumber { key });
    }
    if entry.len() < policy.effective_min_answer_len()
        || !entry.answer.chars().all(|ch| is_grid_letter(ch, alphabet))
    {
        return Err(ValidationError::InvalidAnswer {
            key,
            answer: entry.answer.clone(),
        });
    }
    if entry.clue.trim().is_empty() {
        return Err(ValidationError::EmptyField { field: "clue" });
    }
    if !entry.fits_within(grid.size()) {
        return Err(ValidationError::EntryOutOfBounds { key });
    }
    for (position, expected) in entry.cells() {
        match grid[position] {
            Cell::Block => return Err(ValidationError::EntryCrossesBlock { key, position }),
            Cell::Letter(found) if found != expected => {
                return Err(ValidationError::EntryGridMismatch {
                    key,
                    position,
                    expected,
                    found,
                });
            }
            Cell::Letter(_) => {}
        }
    }
    if let Some(prev) = entry.start().step_back(entry.direction, grid.size())
        && !grid.is_block(prev)
    {
        return Err(ValidationError::EntryNotAnchored { key });
    }
    Ok(())
}

fn is_grid_letter(ch: char, alphabet: Alphabet) -> bool {
    alphabet.is_letter(ch) && !ch.is_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DeriveOptions, Grid};

    const NINE: &str = "\
CASA#SOL#
A#OLA#ORO
MAR#RIO#S
A#ESE#SAL
#########
PAN#TE#UN
A#ORO#MAS
LUZ#OSO#I
OSA#PIE#N";

    fn crossword(text: &str) -> Crossword {
        let grid: Grid = text.parse().unwrap();
        Crossword::from_grid("Prueba", "es", grid, &DeriveOptions::default(), |key, _| {
            format!("Pista {key}")
        })
    }

    fn relaxed() -> ValidationPolicy {
        ValidationPolicy::default().max_imbalance_percent(100)
    }

    fn with_entries(base: &Crossword, f: impl FnOnce(&mut Vec<Entry>)) -> Crossword {
        let mut entries = base.entries().to_vec();
        f(&mut entries);
        Crossword::new(base.title(), base.language(), base.grid().clone(), entries)
    }

    #[test]
    fn test_accepts_derived_crossword() {
        let crossword = crossword(NINE);
        assert!(crossword.entries().len() >= 10);
        assert_eq!(validate(&crossword, &relaxed()), Ok(()));
    }

    #[test]
    fn test_empty_fields() {
        let base = crossword(NINE);
        let untitled = Crossword::new(" ", "es", base.grid().clone(), base.entries().to_vec());
        assert_eq!(
            validate(&untitled, &relaxed()),
            Err(ValidationError::EmptyField { field: "title" })
        );
        let no_language = Crossword::new("T", "", base.grid().clone(), base.entries().to_vec());
        assert_eq!(
            validate(&no_language, &relaxed()),
            Err(ValidationError::EmptyField { field: "language" })
        );
        let no_clue = with_entries(&base, |entries| entries[0].clue.clear());
        assert_eq!(
            validate(&no_clue, &relaxed()),
            Err(ValidationError::EmptyField { field: "clue" })
        );
    }

    #[test]
    fn test_size_out_of_range() {
        let small = crossword("CAT\nA#O\nBOW");
        assert_eq!(
            validate(&small, &relaxed()),
            Err(ValidationError::SizeOutOfRange { size: 3, min: 9, max: 13 })
        );
    }

    #[test]
    fn test_lowercase_cell_rejected() {
        let base = crossword(NINE);
        let mut grid = base.grid().clone();
        grid.set(Position::new(0, 0), Cell::Letter('c'));
        let bad = Crossword::new("T", "es", grid, base.entries().to_vec());
        assert!(validate(&bad, &relaxed()).unwrap_err().is_invalid_cell_character());
    }

    #[test]
    fn test_too_few_entries() {
        let base = crossword(NINE);
        let few = with_entries(&base, |entries| entries.truncate(3));
        assert_eq!(
            validate(&few, &relaxed()),
            Err(ValidationError::TooFewEntries { found: 3, required: 10 })
        );
    }

    #[test]
    fn test_entry_failures() {
        let base = crossword(NINE);
        let zero = with_entries(&base, |entries| entries[0].number = 0);
        assert!(validate(&zero, &relaxed()).unwrap_err().is_invalid_entry_number());

        let digits = with_entries(&base, |entries| entries[0].answer = "CA5A".into());
        assert!(validate(&digits, &relaxed()).unwrap_err().is_invalid_answer());

        let off_grid = with_entries(&base, |entries| entries[0].col = 7);
        assert!(validate(&off_grid, &relaxed()).unwrap_err().is_entry_out_of_bounds());

        let through_block = with_entries(&base, |entries| entries[0].answer = "CASAS".into());
        assert_eq!(
            validate(&through_block, &relaxed()),
            Err(ValidationError::EntryCrossesBlock {
                key: EntryKey::new(1, Direction::Across),
                position: Position::new(0, 4),
            })
        );

        let mismatch = with_entries(&base, |entries| entries[0].answer = "COSA".into());
        assert_eq!(
            validate(&mismatch, &relaxed()),
            Err(ValidationError::EntryGridMismatch {
                key: EntryKey::new(1, Direction::Across),
                position: Position::new(0, 1),
                expected: 'O',
                found: 'A',
            })
        );

        let mid_word = with_entries(&base, |entries| {
            entries[0].col = 1;
            entries[0].answer = "ASA".into();
        });
        assert!(validate(&mid_word, &relaxed()).unwrap_err().is_entry_not_anchored());
    }

    #[test]
    fn test_duplicate_key() {
        let base = crossword(NINE);
        let duplicated = with_entries(&base, |entries| {
            let copy = entries[0].clone();
            entries.push(copy);
        });
        assert_eq!(
            validate(&duplicated, &relaxed()),
            Err(ValidationError::DuplicateEntryKey {
                key: EntryKey::new(1, Direction::Across)
            })
        );
    }

    #[test]
    fn test_direction_imbalance() {
        let base = crossword(NINE);
        let across_only = with_entries(&base, |entries| {
            entries.retain(|e| e.direction == Direction::Across);
        });
        let policy = ValidationPolicy::default().min_entries(1);
        assert!(validate(&across_only, &policy).unwrap_err().is_direction_imbalance());
    }

    #[test]
    fn test_parse_and_validate() {
        let base = crossword(NINE);
        let json = serde_json::to_string(&base).unwrap();
        assert_eq!(parse_and_validate(&json, &relaxed()).unwrap(), base);

        assert!(matches!(
            parse_and_validate("{", &relaxed()),
            Err(CrosswordParseError::Json(_))
        ));
        assert!(matches!(
            parse_and_validate(r#"{"title":"T","language":"es","size":4}"#, &relaxed()),
            Err(CrosswordParseError::Invalid(ValidationError::SizeOutOfRange { .. }))
        ));
        assert!(matches!(
            parse_and_validate(r#"{"title":"T","language":"es","size":9,"grid":[]}"#, &relaxed()),
            Err(CrosswordParseError::Invalid(ValidationError::GridShapeMismatch { .. }))
        ));
    }
}
