//! Session lifecycle around a [`Game`] and its persisted progress.

use crossgrid_core::{Crossword, Direction, EntryKey, Position};

use crate::{CheckReport, Cycle, Game, Snapshot, SnapshotStore};

/// Where a [`Session`] is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::IsVariant)]
pub enum SessionState {
    /// No crossword loaded.
    #[default]
    Idle,
    /// A crossword is loaded and no event has been handled yet.
    Loaded,
    /// At least one event has been handled since loading.
    Interacting,
}

/// A solving event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Move the cursor to a cell.
    SelectCell(Position),
    /// Jump to an entry's first cell.
    SelectEntry(EntryKey),
    /// Override the active direction.
    SetDirection(Direction),
    /// Switch direction at a cell anchoring both directions.
    ToggleDirection,
    /// Type a letter.
    InputChar(char),
    /// Erase or step back.
    Backspace,
    /// Move the cursor by a delta, skipping blocks.
    Move {
        /// Row delta.
        dr: isize,
        /// Column delta.
        dc: isize,
    },
    /// Jump to the next or previous entry.
    CycleEntry(Cycle),
    /// Check the active entry.
    CheckWord,
    /// Check the whole board.
    CheckBoard,
    /// Reveal the active entry.
    RevealWord,
    /// Reveal the whole board.
    RevealBoard,
    /// Empty the board.
    ClearBoard,
    /// Empty the board and discard the stored snapshot.
    ClearProgress,
}

/// What handling an [`Action`] did.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum ActionOutcome {
    /// No crossword is loaded.
    Ignored,
    /// The action was a no-op.
    Unchanged,
    /// The board, cursor, direction or solution flag changed.
    Changed,
    /// Result of a check; checks never change anything.
    Checked(CheckReport),
}

/// Owns the active [`Game`] and the injected [`SnapshotStore`].
///
/// Events go through [`Session::handle`]; any change marks the session dirty, and
/// [`Session::persist`] writes the snapshot back to the store only when dirty.
#[derive(Debug)]
pub struct Session<S> {
    store: S,
    game: Option<Game>,
    state: SessionState,
    dirty: bool,
}

impl<S> Session<S>
where
    S: SnapshotStore,
{
    /// Creates an idle session over `store`.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self {
            store,
            game: None,
            state: SessionState::Idle,
            dirty: false,
        }
    }

    /// Lifecycle state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The active game, if loaded.
    #[must_use]
    pub fn game(&self) -> Option<&Game> {
        self.game.as_ref()
    }

    /// Returns `true` if there are changes not yet persisted.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// The snapshot store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The snapshot store, mutably.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Consumes the session, returning its store.
    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }

    /// Starts a game on `crossword` and restores the stored snapshot if its board
    /// has the same shape.
    ///
    /// Returns `true` if progress was restored. A snapshot of another shape is
    /// ignored and left in the store.
    ///
    /// # Errors
    ///
    /// Returns the store's error if it cannot be read.
    pub fn load(&mut self, crossword: Crossword) -> Result<bool, S::Error> {
        let mut game = Game::new(crossword);
        let restored = match self.store.load()? {
            Some(snapshot) => {
                let restored = game.hydrate(&snapshot);
                if !restored {
                    log::warn!(
                        "stored progress does not fit a {size}x{size} grid; starting empty",
                        size = game.board().size(),
                    );
                }
                restored
            }
            None => false,
        };
        log::debug!(
            "loaded \"{}\" ({} entries, restored: {restored})",
            game.crossword().title(),
            game.crossword().entries().len(),
        );
        self.game = Some(game);
        self.state = SessionState::Loaded;
        self.dirty = false;
        Ok(restored)
    }

    /// Drops the active game without persisting it.
    pub fn unload(&mut self) {
        self.game = None;
        self.state = SessionState::Idle;
        self.dirty = false;
    }

    /// Dispatches one event.
    ///
    /// # Errors
    ///
    /// Returns the store's error if [`Action::ClearProgress`] cannot clear it.
    pub fn handle(&mut self, action: Action) -> Result<ActionOutcome, S::Error> {
        let Some(game) = &mut self.game else {
            return Ok(ActionOutcome::Ignored);
        };
        self.state = SessionState::Interacting;

        let cursor = (game.selection(), game.direction());
        let shown = game.is_solution_shown();
        let edited = match action {
            Action::SelectCell(pos) => {
                game.select_cell(pos);
                false
            }
            Action::SelectEntry(key) => {
                game.select_entry(key);
                false
            }
            Action::SetDirection(direction) => {
                game.set_direction(direction);
                false
            }
            Action::ToggleDirection => {
                game.toggle_direction_at_cursor();
                false
            }
            Action::InputChar(ch) => {
                let at = game.selection();
                let before = at.map(|pos| game.board().cell(pos));
                game.input_char(ch);
                before != at.map(|pos| game.board().cell(pos))
            }
            Action::Backspace => game.backspace().is_removed(),
            Action::Move { dr, dc } => {
                game.move_by(dr, dc);
                false
            }
            Action::CycleEntry(cycle) => {
                game.cycle_entry(cycle);
                false
            }
            Action::CheckWord => return Ok(ActionOutcome::Checked(game.check_word())),
            Action::CheckBoard => return Ok(ActionOutcome::Checked(game.check_board())),
            Action::RevealWord => game.reveal_word(),
            Action::RevealBoard => game.reveal_board(),
            Action::ClearBoard => game.clear_board(),
            Action::ClearProgress => {
                self.clear_progress()?;
                return Ok(ActionOutcome::Changed);
            }
        };

        let changed = edited
            || cursor != (game.selection(), game.direction())
            || shown != game.is_solution_shown();
        if !changed {
            return Ok(ActionOutcome::Unchanged);
        }
        self.dirty = true;
        Ok(ActionOutcome::Changed)
    }

    /// Empties the board and discards the stored snapshot.
    ///
    /// # Errors
    ///
    /// Returns the store's error if it cannot be cleared.
    pub fn clear_progress(&mut self) -> Result<(), S::Error> {
        if let Some(game) = &mut self.game {
            game.clear_board();
        }
        self.store.clear()?;
        self.dirty = false;
        log::debug!("progress cleared");
        Ok(())
    }

    /// Snapshot of the active game.
    #[must_use]
    pub fn snapshot(&self) -> Option<Snapshot> {
        self.game.as_ref().map(Game::snapshot)
    }

    /// Restores `snapshot` into the active game. See [`Game::hydrate`].
    pub fn hydrate(&mut self, snapshot: &Snapshot) -> bool {
        let Some(game) = &mut self.game else {
            return false;
        };
        let restored = game.hydrate(snapshot);
        self.dirty |= restored;
        restored
    }

    /// Writes the snapshot to the store if anything changed since the last write.
    ///
    /// Returns `true` if a snapshot was written.
    ///
    /// # Errors
    ///
    /// Returns the store's error if it cannot be written; the session stays dirty.
    pub fn persist(&mut self) -> Result<bool, S::Error> {
        let Some(game) = &self.game else {
            return Ok(false);
        };
        if !self.dirty {
            return Ok(false);
        }
        self.store.save(&game.snapshot())?;
        self.dirty = false;
        Ok(true)
    }
}
