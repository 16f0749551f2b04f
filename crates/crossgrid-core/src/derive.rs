//! Entry derivation from a numbered grid.

use crate::{
    Cell, Direction, Entry, EntryKey, Grid, Numbering, Position,
    letters::{self, Alphabet, DiacriticPolicy},
};

/// Clue text used when no clue is supplied for a derived entry.
pub const PLACEHOLDER_CLUE: &str = "(no clue)";

/// Shortest word the deriver ever emits, regardless of options.
pub const MIN_WORD_LEN: usize = 2;

/// Options for [`derive_entries`].
///
/// # Examples
///
/// ```
/// use crossgrid_core::{DeriveOptions, letters::{Alphabet, DiacriticPolicy}};
///
/// let options = DeriveOptions::default()
///     .min_len(3)
///     .alphabet(Alphabet::Spanish)
///     .diacritics(DiacriticPolicy::Keep);
/// assert_eq!(options.effective_min_len(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeriveOptions {
    min_len: usize,
    alphabet: Alphabet,
    diacritics: DiacriticPolicy,
}

impl Default for DeriveOptions {
    fn default() -> Self {
        Self {
            min_len: MIN_WORD_LEN,
            alphabet: Alphabet::Unicode,
            diacritics: DiacriticPolicy::Strip,
        }
    }
}

impl DeriveOptions {
    /// Sets the minimum word length. Values below 2 behave as 2.
    #[must_use]
    pub fn min_len(mut self, min_len: usize) -> Self {
        self.min_len = min_len;
        self
    }

    /// Sets the letter predicate. Cells failing it break words like blocks do.
    #[must_use]
    pub fn alphabet(mut self, alphabet: Alphabet) -> Self {
        self.alphabet = alphabet;
        self
    }

    /// Sets the diacritic policy applied to emitted answers.
    #[must_use]
    pub fn diacritics(mut self, diacritics: DiacriticPolicy) -> Self {
        self.diacritics = diacritics;
        self
    }

    /// Minimum length actually applied.
    #[must_use]
    pub fn effective_min_len(&self) -> usize {
        self.min_len.max(MIN_WORD_LEN)
    }

    /// The configured alphabet.
    #[must_use]
    pub fn letter_alphabet(&self) -> Alphabet {
        self.alphabet
    }

    /// The configured diacritic policy.
    #[must_use]
    pub fn diacritic_policy(&self) -> DiacriticPolicy {
        self.diacritics
    }
}

/// Derives the canonical entry list of `grid` with placeholder clues.
///
/// See [`derive_entries_with_clues`].
#[must_use]
pub fn derive_entries(grid: &Grid, options: &DeriveOptions) -> Vec<Entry> {
    derive_entries_with_clues(grid, options, |_, _| PLACEHOLDER_CLUE.to_owned())
}

/// Derives the canonical entry list of `grid`, asking `clue_for` for each clue.
///
/// Every across start is walked rightward and every down start downward until a block
/// or the edge. Words shorter than the effective minimum are dropped. The result lists
/// all across entries by number, then all down entries by number. An empty result
/// means the grid is degenerate; callers decide how to treat that.
///
/// # Examples
///
/// ```
/// use crossgrid_core::{DeriveOptions, Direction, Grid, derive_entries};
///
/// let grid: Grid = "\
/// CAT
/// A#O
/// BOW
/// ".parse().unwrap();
/// let entries = derive_entries(&grid, &DeriveOptions::default());
/// let answers: Vec<_> = entries.iter().map(|e| e.answer.as_str()).collect();
/// assert_eq!(answers, ["CAT", "BOW", "CAB", "TOW"]);
/// assert_eq!(entries[2].direction, Direction::Down);
/// ```
pub fn derive_entries_with_clues<F>(
    grid: &Grid,
    options: &DeriveOptions,
    mut clue_for: F,
) -> Vec<Entry>
where
    F: FnMut(EntryKey, &str) -> String,
{
    let alphabet = options.alphabet;
    let masked;
    let grid = if grid
        .positions()
        .any(|pos| matches!(grid[pos], Cell::Letter(ch) if !alphabet.is_letter(ch)))
    {
        log::debug!("treating letters outside {alphabet:?} as word breaks");
        masked = grid.masked(|ch| alphabet.is_letter(ch));
        &masked
    } else {
        grid
    };

    let numbering = Numbering::compute(grid);
    let min_len = options.effective_min_len();
    let mut entries = Vec::new();
    for direction in Direction::ALL {
        for start in numbering.starts(direction) {
            let answer: String = word_letters(grid, start.position, direction)
                .map(|ch| canonical(ch, options.diacritics))
                .collect();
            if answer.chars().count() < min_len {
                continue;
            }
            let key = EntryKey::new(start.number, direction);
            let clue = clue_for(key, &answer);
            entries.push(Entry {
                number: start.number,
                row: start.position.row,
                col: start.position.col,
                direction,
                answer,
                clue,
            });
        }
    }
    entries
}

/// Iterates the letters from `start` along `direction` until a block or the edge.
pub fn word_letters(
    grid: &Grid,
    start: Position,
    direction: Direction,
) -> impl Iterator<Item = char> + '_ {
    std::iter::successors(Some(start), move |pos| pos.step(direction, grid.size()))
        .map_while(move |pos| grid.get(pos).and_then(Cell::as_letter))
}

fn canonical(ch: char, policy: DiacriticPolicy) -> char {
    let ch = match policy {
        DiacriticPolicy::Strip => letters::fold_diacritics(ch),
        DiacriticPolicy::Keep => ch,
    };
    letters::upper(ch)
}
