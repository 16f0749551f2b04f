//! Grid reconstruction from untrusted candidate entries.
//!
//! Candidates are normalized and filtered, written into an all-block grid in a fixed
//! order with one uniform conflict policy, and the resulting grid is then re-numbered
//! and re-derived. The derived entries, not the candidates, are the output, so the
//! result is internally consistent however contradictory the input was.

use std::collections::{BTreeMap, HashSet};

use crossgrid_core::{
    Cell, DeriveOptions, Direction, Entry, EntryKey, Grid, Position, derive_entries,
    letters::{self, Alphabet, DiacriticPolicy},
};

use crate::{BuildPolicy, CandidateEntry, ClueMatcher, ConflictPolicy};

/// Why a candidate entry was discarded.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    derive_more::Display,
    derive_more::IsVariant,
)]
pub enum DropReason {
    /// Missing row, column or direction, or a blank answer.
    #[display("missing field")]
    MissingField,
    /// Normalized answer shorter than the minimum.
    #[display("too short")]
    TooShort,
    /// Start cell outside the grid.
    #[display("out of grid")]
    OutOfGrid,
    /// Answer runs past the grid edge.
    #[display("overflow")]
    Overflow,
    /// Repeats an earlier candidate's `(number, direction)`.
    #[display("duplicate key")]
    DuplicateKey,
}

/// Bookkeeping from one reconstruction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    /// Candidates written into the grid.
    pub accepted: usize,
    /// Dropped candidates per reason.
    pub dropped: BTreeMap<DropReason, usize>,
    /// Cells where a candidate disagreed with a letter already written.
    pub conflicts: usize,
    /// Entries that received the placeholder clue.
    pub needs_review: Vec<EntryKey>,
}

impl Report {
    /// Dropped count for one reason.
    #[must_use]
    pub fn dropped(&self, reason: DropReason) -> usize {
        self.dropped.get(&reason).copied().unwrap_or_default()
    }

    /// Dropped count over all reasons.
    #[must_use]
    pub fn total_dropped(&self) -> usize {
        self.dropped.values().sum()
    }

    fn drop_candidate(&mut self, candidate: &CandidateEntry, reason: DropReason) {
        log::debug!(
            "dropping candidate #{} ({:?}): {reason}",
            candidate.index,
            candidate.answer
        );
        *self.dropped.entry(reason).or_default() += 1;
    }
}

/// Output of [`reconstruct`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconstruction {
    /// The repaired grid.
    pub grid: Grid,
    /// Entries derived from [`Reconstruction::grid`], in canonical order, with clues.
    pub entries: Vec<Entry>,
    /// What happened to the candidates.
    pub report: Report,
}

impl Reconstruction {
    /// Returns `true` when no entry could be derived.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone)]
struct Placement<'a> {
    candidate: &'a CandidateEntry,
    start: Position,
    direction: Direction,
    answer: String,
}

/// Normalizes an answer to the letters a grid of `alphabet` can hold.
fn normalize(raw: &str, alphabet: Alphabet) -> String {
    letters::normalize_answer(raw, DiacriticPolicy::Strip)
        .chars()
        .filter(|&ch| alphabet.is_letter(ch) && !ch.is_lowercase())
        .collect()
}

fn place<'a>(
    candidate: &'a CandidateEntry,
    size: usize,
    alphabet: Alphabet,
    policy: &BuildPolicy,
) -> Result<Placement<'a>, DropReason> {
    let (Some(row), Some(col), Some(direction)) =
        (candidate.row, candidate.col, candidate.direction)
    else {
        return Err(DropReason::MissingField);
    };
    if candidate.answer.trim().is_empty() {
        return Err(DropReason::MissingField);
    }
    let answer = normalize(&candidate.answer, alphabet);
    let len = answer.chars().count();
    if len < policy.answer_len() {
        return Err(DropReason::TooShort);
    }
    let start = Position::new(row, col);
    if !start.is_within(size) {
        return Err(DropReason::OutOfGrid);
    }
    let end = match direction {
        Direction::Across => col + len,
        Direction::Down => row + len,
    };
    if end > size {
        return Err(DropReason::Overflow);
    }
    Ok(Placement {
        candidate,
        start,
        direction,
        answer,
    })
}

/// Rebuilds a `size × size` grid and its canonical entries from candidates.
///
/// Never fails on a bad candidate: each one is either written into the grid or
/// dropped and counted in [`Report::dropped`]. Surviving candidates are written in
/// advisory-number order (ties and missing numbers by input order, missing numbers
/// last). The result is degenerate when nothing survives.
///
/// # Examples
///
/// ```
/// use crossgrid_builder::{BuildPolicy, CandidateEntry, reconstruct};
/// use crossgrid_core::{Direction, Position, letters::Alphabet};
///
/// let candidate = |index, direction, answer: &str| CandidateEntry {
///     index,
///     number: Some(1),
///     row: Some(0),
///     col: Some(0),
///     direction: Some(direction),
///     answer: answer.into(),
///     clue: format!("clue {index}"),
/// };
/// let candidates = [
///     candidate(0, Direction::Across, "Maté"),
///     candidate(1, Direction::Down, "mate"),
/// ];
///
/// let result = reconstruct(&candidates, 9, Alphabet::Spanish, &BuildPolicy::default());
/// assert_eq!(result.entries.len(), 2);
/// assert_eq!(result.grid.get(Position::new(0, 0)).and_then(|c| c.as_letter()), Some('M'));
/// assert_eq!(result.entries[1].clue, "clue 1");
/// ```
#[must_use]
pub fn reconstruct(
    candidates: &[CandidateEntry],
    size: usize,
    alphabet: Alphabet,
    policy: &BuildPolicy,
) -> Reconstruction {
    let mut report = Report::default();
    let mut seen = HashSet::new();
    let mut placements = Vec::new();
    for candidate in candidates {
        let placement = match place(candidate, size, alphabet, policy) {
            Ok(placement) => placement,
            Err(reason) => {
                report.drop_candidate(candidate, reason);
                continue;
            }
        };
        if policy.dedupes_keys()
            && let Some(number) = candidate.number
            && !seen.insert((number, placement.direction))
        {
            report.drop_candidate(candidate, DropReason::DuplicateKey);
            continue;
        }
        placements.push(placement);
    }
    placements.sort_by_key(|p| (p.candidate.number.unwrap_or(u32::MAX), p.candidate.index));
    report.accepted = placements.len();

    let mut grid = Grid::new(size);
    for placement in &placements {
        for (k, ch) in placement.answer.chars().enumerate() {
            let pos = placement.start.advanced(placement.direction, k);
            match grid.get(pos) {
                Some(Cell::Block) => grid.set(pos, Cell::Letter(ch)),
                Some(Cell::Letter(existing)) if existing != ch => {
                    report.conflicts += 1;
                    log::debug!(
                        "conflict at {pos}: {existing:?} vs {ch:?} from candidate #{}",
                        placement.candidate.index
                    );
                    if policy.conflict() == ConflictPolicy::LastWins {
                        grid.set(pos, Cell::Letter(ch));
                    }
                }
                _ => {}
            }
        }
    }

    let mut matcher = ClueMatcher::new();
    for placement in &placements {
        matcher.push(
            &placement.answer,
            placement.start,
            placement.direction,
            &placement.candidate.clue,
        );
    }

    let options = DeriveOptions::default()
        .min_len(policy.answer_len())
        .alphabet(alphabet);
    let mut entries = derive_entries(&grid, &options);
    for entry in &mut entries {
        if let Some(clue) = matcher.take(entry) {
            entry.clue = clue;
        } else {
            log::warn!("no candidate clue for {} {:?}", entry.key(), entry.answer);
            entry.clue = policy.placeholder().to_owned();
            report.needs_review.push(entry.key());
        }
    }

    Reconstruction {
        grid,
        entries,
        report,
    }
}
