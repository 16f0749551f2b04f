//! Interactive crossword solving.
//!
//! A [`Game`] holds an immutable [`Crossword`](crossgrid_core::Crossword) next to the
//! player's [`PlayerBoard`], a cursor and an active direction, and exposes the
//! solving events: selection, typing, navigation, checking and revealing. Every event
//! is total; aiming at a block or outside the grid does nothing.
//!
//! [`Session`] wraps a game in the `Idle → Loaded → Interacting` lifecycle and talks
//! to an injected [`SnapshotStore`] for resumable progress.
//!
//! # Examples
//!
//! ```
//! use crossgrid_core::{Crossword, DeriveOptions, Position};
//! use crossgrid_game::{Action, MemoryStore, Session};
//!
//! let crossword = Crossword::from_grid(
//!     "Mini", "en", "CAT\nA#O\nBOW".parse().unwrap(),
//!     &DeriveOptions::default(), |_, answer| answer.to_lowercase(),
//! );
//!
//! let mut session = Session::new(MemoryStore::new());
//! session.load(crossword.clone()).unwrap();
//! session.handle(Action::InputChar('c')).unwrap();
//! session.persist().unwrap();
//!
//! // A new session over the same store resumes where the last one stopped.
//! let mut resumed = Session::new(session.into_store());
//! assert!(resumed.load(crossword).unwrap());
//! let game = resumed.game().unwrap();
//! assert_eq!(game.board().letter(Position::new(0, 0)), Some('C'));
//! ```

pub mod board;
pub mod check;
pub mod game;
pub mod lookup;
pub mod session;
pub mod snapshot;

pub use self::{
    board::{CellState, PlayerBoard},
    check::CheckReport,
    game::{Cycle, Game, InputOperation},
    lookup::EntryLookup,
    session::{Action, ActionOutcome, Session, SessionState},
    snapshot::{MemoryStore, Snapshot, SnapshotStore},
};
