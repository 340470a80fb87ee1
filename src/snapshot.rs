// src/snapshot.rs

use crate::error::RepositoryAccessError;
use crate::model::FileSnapshot;
use git2::{ErrorCode, ObjectType, Repository, TreeWalkMode, TreeWalkResult};
use indicatif::ProgressBar;
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, info, trace, warn};

/// Reads every file tracked in `revision` of the repository at `repo_path`.
///
/// Only the committed tree is read, so untracked, ignored and uncommitted
/// files never show up. Symlinks are included like files and submodules with
/// the commit they pin as their fingerprint. A tracked name that is not valid
/// UTF-8 is an error rather than being mangled into a key that could collide
/// with another file. A repository without any commit yields an empty
/// snapshot when asked for `HEAD`.
pub fn snapshot(repo_path: &Path, revision: &str) -> Result<FileSnapshot, RepositoryAccessError> {
    check_readable(repo_path)?;

    let repo = Repository::open(repo_path).map_err(|source| RepositoryAccessError::NotARepository {
        path: repo_path.to_path_buf(),
        source,
    })?;
    debug!(path = %repo_path.display(), revision, "Opened repository");

    if revision == "HEAD" {
        if let Err(e) = repo.head() {
            if e.code() == ErrorCode::UnbornBranch {
                info!(path = %repo_path.display(), "Repository has no commits yet");
                return Ok(FileSnapshot::new());
            }
        }
    }

    let revision_error = |source: git2::Error| RepositoryAccessError::Revision {
        path: repo_path.to_path_buf(),
        revision: revision.to_string(),
        source,
    };
    let tree = repo
        .revparse_single(revision)
        .and_then(|object| object.peel_to_tree())
        .map_err(revision_error)?;

    let mut files = FileSnapshot::new();
    let mut invalid_name = None;
    let walked = tree.walk(TreeWalkMode::PreOrder, |root, entry| {
        let Some(name) = entry.name() else {
            invalid_name = Some(format!("{}{}", root, String::from_utf8_lossy(entry.name_bytes())));
            return TreeWalkResult::Abort;
        };
        // Blobs are files and symlinks, commits are submodule gitlinks
        if let Some(ObjectType::Blob | ObjectType::Commit) = entry.kind() {
            let path = format!("{root}{name}");
            trace!(path = %path, id = %entry.id(), "Tracked file");
            files.insert(path, entry.id());
        }
        TreeWalkResult::Ok
    });

    if let Some(name) = invalid_name {
        warn!(path = %repo_path.display(), name = %name, "Tracked path is not valid UTF-8");
        return Err(RepositoryAccessError::InvalidPathName {
            path: repo_path.to_path_buf(),
            name,
        });
    }
    walked.map_err(|source| RepositoryAccessError::Read {
        path: repo_path.to_path_buf(),
        source,
    })?;

    info!(path = %repo_path.display(), revision, files = files.len(), "Read snapshot");
    Ok(files)
}

/// Reads both repositories in parallel, ticking `bar` once per finished read.
pub fn snapshot_pair(
    first: (&Path, &str),
    second: (&Path, &str),
    bar: &ProgressBar,
) -> Result<(FileSnapshot, FileSnapshot), RepositoryAccessError> {
    // Worker threads log through the caller's subscriber
    let dispatch = tracing::dispatcher::get_default(|current| current.clone());
    let read = |(path, revision): (&Path, &str)| {
        tracing::dispatcher::with_default(&dispatch, || {
            let result = snapshot(path, revision);
            bar.inc(1);
            result
        })
    };

    let (first, second) = rayon::join(|| read(first), || read(second));
    Ok((first?, second?))
}

fn check_readable(repo_path: &Path) -> Result<(), RepositoryAccessError> {
    let io_error = |e: io::Error| match e.kind() {
        io::ErrorKind::NotFound => RepositoryAccessError::NotFound {
            path: repo_path.to_path_buf(),
        },
        io::ErrorKind::PermissionDenied => RepositoryAccessError::PermissionDenied {
            path: repo_path.to_path_buf(),
        },
        _ => RepositoryAccessError::Io {
            path: repo_path.to_path_buf(),
            source: e,
        },
    };

    let metadata = fs::metadata(repo_path).map_err(io_error)?;
    if metadata.is_dir() {
        fs::read_dir(repo_path).map_err(io_error)?;
    }
    Ok(())
}
