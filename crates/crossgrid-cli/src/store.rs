use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crossgrid_game::{Snapshot, SnapshotStore};

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub(crate) enum StoreError {
    #[display("cannot access progress file {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
    #[display("cannot encode progress: {_0}")]
    Encode(serde_json::Error),
}

/// Keeps the snapshot as a JSON file.
#[derive(Debug, Clone)]
pub(crate) struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub(crate) fn new(path: &Path) -> Self {
        Self {
            path: path.to_owned(),
        }
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl SnapshotStore for FileStore {
    type Error = StoreError;

    /// A missing file is no progress; an unreadable one is logged and ignored.
    fn load(&self) -> Result<Option<Snapshot>, Self::Error> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(self.io_error(err)),
        };
        match serde_json::from_str(&text) {
            Ok(snapshot) => Ok(Some(snapshot)),
            Err(err) => {
                log::warn!("ignoring progress file {}: {err}", self.path.display());
                Ok(None)
            }
        }
    }

    fn save(&mut self, snapshot: &Snapshot) -> Result<(), Self::Error> {
        let text = serde_json::to_string_pretty(snapshot).map_err(StoreError::Encode)?;
        fs::write(&self.path, text).map_err(|err| self.io_error(err))
    }

    fn clear(&mut self) -> Result<(), Self::Error> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(self.io_error(err)),
        }
    }
}
