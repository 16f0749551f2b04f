//! Comparing the board against the solution.

use std::collections::BTreeSet;

use crossgrid_core::{Crossword, Position};

use crate::PlayerBoard;

/// Result of a check: which typed cells are wrong and how many are still empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckReport {
    /// Filled cells whose letter differs from the solution.
    pub wrong: BTreeSet<Position>,
    /// Checked cells with nothing typed.
    pub missing: usize,
}

impl CheckReport {
    /// Compares `positions` of `board` against `crossword`'s solution.
    ///
    /// Blocks and positions without a solution letter are skipped.
    #[must_use]
    pub fn compare(
        crossword: &Crossword,
        board: &PlayerBoard,
        positions: impl IntoIterator<Item = Position>,
    ) -> Self {
        let mut report = Self::default();
        for pos in positions {
            let Some(expected) = crossword.solution_at(pos) else {
                continue;
            };
            match board.letter(pos) {
                None => report.missing += 1,
                Some(typed) if typed != expected => {
                    report.wrong.insert(pos);
                }
                Some(_) => {}
            }
        }
        report
    }

    /// Returns `true` if nothing is wrong or missing.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.wrong.is_empty() && self.missing == 0
    }

    /// Returns `true` if nothing typed is wrong (empty cells allowed).
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.wrong.is_empty()
    }
}
