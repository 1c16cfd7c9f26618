use std::path::PathBuf;
use thiserror::Error;

/// Per-operand failures. Per-entry problems never end up here, they are
/// dropped by the collector.
#[derive(Debug, Error)]
pub enum ListingError {
    #[error("cannot access '{}': {source}", .path.display())]
    PathInaccessible {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot open directory '{}': {source}", .path.display())]
    DirectoryUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ListingError {
    pub fn path(&self) -> &PathBuf {
        match self {
            ListingError::PathInaccessible { path, .. } => path,
            ListingError::DirectoryUnreadable { path, .. } => path,
        }
    }
}
