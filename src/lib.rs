// src/lib.rs

//! Compare the tracked files of two git repositories.
//!
//! [`snapshot()`] reads a repository into a [`FileSnapshot`], [`classify()`] turns
//! two snapshots into a [`DiffResult`], and the [`report`] formatters render it.

pub mod classify;
pub mod cli;
pub mod error;
pub mod logging;
pub mod model;
pub mod report;
pub mod sbom;
pub mod snapshot;

pub use classify::{classify, classify_with, ClassifyOptions};
pub use error::RepositoryAccessError;
pub use model::{ChangeKind, ChangeRecord, DiffResult, DiffSummary, FileSnapshot, Fingerprint};
pub use snapshot::snapshot;
