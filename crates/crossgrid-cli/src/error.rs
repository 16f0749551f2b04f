use std::{convert::Infallible, io, path::PathBuf};

use crossgrid_builder::{BuildError, CandidateError};
use crossgrid_core::{CrosswordParseError, GridError};

use crate::{keys::KeyError, store::StoreError};

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub(crate) enum CliError {
    #[display("cannot read {}: {source}", path.display())]
    #[from(ignore)]
    Read { path: PathBuf, source: io::Error },
    #[display("{_0}")]
    Candidate(CandidateError),
    #[display("{_0}")]
    Build(BuildError),
    #[display("{_0}")]
    Crossword(CrosswordParseError),
    #[display("{_0}")]
    Grid(GridError),
    #[display("{_0}")]
    Key(KeyError),
    #[display("{_0}")]
    Store(StoreError),
    #[display("cannot encode output: {_0}")]
    Output(serde_json::Error),
}

impl From<Infallible> for CliError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}
