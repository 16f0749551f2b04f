//! Repairing untrusted crossword candidates into validated puzzles.
//!
//! A candidate (typically produced by a generative model) arrives as loose JSON with
//! missing fields, coordinates that run off the grid, letters that disagree where
//! words cross, and mixed-case, accented answers. This crate turns it into a
//! [`Crossword`](crossgrid_core::Crossword) that satisfies every structural invariant,
//! or explains why it could not.
//!
//! # Overview
//!
//! - [`candidate`]: the single parse boundary from JSON into a typed [`Candidate`]
//! - [`policy`]: [`BuildPolicy`] constants and the [`ConflictPolicy`]
//! - [`reconstruct`](mod@reconstruct): writes candidates into a grid and re-derives
//!   its canonical entries
//! - [`clue`]: matches candidate clues back onto the re-derived entries
//! - [`build`]: the full pipeline, ending in validation
//!
//! # Examples
//!
//! ```
//! use crossgrid_builder::{BuildPolicy, Candidate, build_crossword};
//! use crossgrid_core::ValidationPolicy;
//!
//! let candidate = Candidate::from_json_str(r#"{
//!     "title": "Mate",
//!     "language": "es",
//!     "entries": [
//!         {"number": 1, "row": 0, "col": 0, "direction": "across", "answer": "Mate", "clue": "Infusión"},
//!         {"number": 1, "row": 0, "col": 0, "direction": "down", "answer": "mate", "clue": "Bebida"}
//!     ]
//! }"#).unwrap();
//!
//! let policy = BuildPolicy::default().validation(ValidationPolicy::default().min_entries(2));
//! let crossword = build_crossword(&candidate, &policy).unwrap();
//! assert_eq!(crossword.entries()[0].answer, "MATE");
//! ```

pub mod build;
pub mod candidate;
pub mod clue;
pub mod policy;
pub mod reconstruct;

pub use self::{
    build::{Build, BuildError, build_crossword, build_with_report, needs_review},
    candidate::{Candidate, CandidateEntry, CandidateError},
    clue::ClueMatcher,
    policy::{BuildPolicy, ConflictPolicy},
    reconstruct::{DropReason, Reconstruction, Report, reconstruct},
};
