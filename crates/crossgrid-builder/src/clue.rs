//! Attaching candidate clues to re-derived entries.

use crossgrid_core::{Direction, Entry, Position, letters};

#[derive(Debug, Clone)]
struct ClueSource<'a> {
    answer: &'a str,
    start: Position,
    direction: Direction,
    clue: &'a str,
    used: bool,
}

/// Matches canonical entries back to the clues of the candidates that produced them.
///
/// Only candidates with the same normalized answer match. Among those, a candidate
/// with the same start and direction ranks first, then one with the same direction,
/// then any other. A candidate whose clue was already handed out ranks below every
/// unused one. Blank clues never match.
///
/// # Examples
///
/// ```
/// use crossgrid_builder::ClueMatcher;
/// use crossgrid_core::{Direction, Entry, Position};
///
/// let mut matcher = ClueMatcher::new();
/// matcher.push("MATE", Position::new(0, 0), Direction::Down, "2. Bebida");
/// matcher.push("MATE", Position::new(0, 0), Direction::Across, "1. Infusión");
///
/// let entry = Entry {
///     number: 1, row: 0, col: 0, direction: Direction::Across,
///     answer: "MATE".into(), clue: String::new(),
/// };
/// assert_eq!(matcher.take(&entry).as_deref(), Some("Infusión"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ClueMatcher<'a> {
    sources: Vec<ClueSource<'a>>,
}

impl<'a> ClueMatcher<'a> {
    /// Creates an empty matcher.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a surviving candidate. `answer` must already be normalized.
    pub fn push(&mut self, answer: &'a str, start: Position, direction: Direction, clue: &'a str) {
        if clue.trim().is_empty() {
            return;
        }
        self.sources.push(ClueSource {
            answer,
            start,
            direction,
            clue,
            used: false,
        });
    }

    /// Returns the cleaned clue of the best candidate for `entry` and marks it used.
    pub fn take(&mut self, entry: &Entry) -> Option<String> {
        let start = entry.start();
        let (_, source) = self
            .sources
            .iter_mut()
            .enumerate()
            .filter(|(_, source)| source.answer == entry.answer)
            .min_by_key(|(index, source)| {
                let tier = if source.direction != entry.direction {
                    2
                } else if source.start != start {
                    1
                } else {
                    0
                };
                (source.used, tier, *index)
            })?;
        source.used = true;
        let clue = letters::clean_clue(source.clue);
        (!clue.is_empty()).then_some(clue)
    }
}
