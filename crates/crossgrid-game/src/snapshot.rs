//! Persisted solving progress.

use std::convert::Infallible;

use crossgrid_core::{Direction, Position};
use serde::{Deserialize, Serialize};

/// Board, cursor and direction of a session, in the persisted shape:
///
/// ```json
/// { "board": [["C", "", "#"], ...], "selection": {"row": 0, "col": 1}, "direction": "across" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Typed letters: `"#"` for blocks, `""` for empty cells.
    pub board: Vec<Vec<String>>,
    /// Cursor, if any.
    pub selection: Option<Position>,
    /// Active direction.
    #[serde(default)]
    pub direction: Direction,
}

/// Where a session keeps its snapshot.
///
/// The medium, key scheme and write timing belong to the implementation.
pub trait SnapshotStore {
    /// Error raised by the medium.
    type Error: std::error::Error;

    /// Returns the stored snapshot, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the medium cannot be read.
    fn load(&self) -> Result<Option<Snapshot>, Self::Error>;

    /// Stores `snapshot`, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the medium cannot be written.
    fn save(&mut self, snapshot: &Snapshot) -> Result<(), Self::Error>;

    /// Discards the stored snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the medium cannot be written.
    fn clear(&mut self) -> Result<(), Self::Error>;
}

/// A store that keeps the snapshot in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    snapshot: Option<Snapshot>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store already holding `snapshot`.
    #[must_use]
    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            snapshot: Some(snapshot),
        }
    }

    /// The stored snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }
}

impl SnapshotStore for MemoryStore {
    type Error = Infallible;

    fn load(&self) -> Result<Option<Snapshot>, Self::Error> {
        Ok(self.snapshot.clone())
    }

    fn save(&mut self, snapshot: &Snapshot) -> Result<(), Self::Error> {
        self.snapshot = Some(snapshot.clone());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), Self::Error> {
        self.snapshot = None;
        Ok(())
    }
}
