// src/error.rs

use std::path::PathBuf;
use thiserror::Error;

/// Failure to read the tracked files of a repository.
///
/// This is the only error the comparison itself can produce; classifying two
/// snapshots never fails.
#[derive(Debug, Error)]
pub enum RepositoryAccessError {
    #[error("repository path does not exist: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("permission denied reading {}", path.display())]
    PermissionDenied { path: PathBuf },

    #[error("cannot access {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("not a git repository: {}", path.display())]
    NotARepository {
        path: PathBuf,
        #[source]
        source: git2::Error,
    },

    #[error("cannot resolve revision '{revision}' in {}", path.display())]
    Revision {
        path: PathBuf,
        revision: String,
        #[source]
        source: git2::Error,
    },

    #[error("tracked path '{name}' in {} is not valid UTF-8", path.display())]
    InvalidPathName { path: PathBuf, name: String },

    #[error("failed to read tracked files of {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: git2::Error,
    },
}

impl RepositoryAccessError {
    /// The repository path the failure refers to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::NotFound { path }
            | Self::PermissionDenied { path }
            | Self::Io { path, .. }
            | Self::NotARepository { path, .. }
            | Self::Revision { path, .. }
            | Self::InvalidPathName { path, .. }
            | Self::Read { path, .. } => path,
        }
    }
}
