// src/model.rs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Identifies file content. Equal fingerprints mean equal content.
///
/// Snapshots read from git use the hex blob id, which is already a digest of
/// the content.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Fingerprint {
    fn from(s: &str) -> Self {
        Fingerprint(s.to_string())
    }
}

impl From<String> for Fingerprint {
    fn from(s: String) -> Self {
        Fingerprint(s)
    }
}

impl From<git2::Oid> for Fingerprint {
    fn from(oid: git2::Oid) -> Self {
        Fingerprint(oid.to_string())
    }
}

/// Every tracked file of one repository at one revision, keyed by its
/// `/`-separated path relative to the repository root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileSnapshot {
    files: BTreeMap<String, Fingerprint>,
}

impl FileSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a file while the snapshot is being built. Returns the previous
    /// fingerprint if the path was already present.
    pub fn insert(&mut self, path: impl Into<String>, fingerprint: impl Into<Fingerprint>) -> Option<Fingerprint> {
        self.files.insert(path.into(), fingerprint.into())
    }

    pub fn get(&self, path: &str) -> Option<&Fingerprint> {
        self.files.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Iterates files in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Fingerprint)> {
        self.files.iter().map(|(path, fp)| (path.as_str(), fp))
    }
}

impl<P, F> FromIterator<(P, F)> for FileSnapshot
where
    P: Into<String>,
    F: Into<Fingerprint>,
{
    fn from_iter<I: IntoIterator<Item = (P, F)>>(iter: I) -> Self {
        let mut snapshot = FileSnapshot::new();
        for (path, fp) in iter {
            snapshot.insert(path, fp);
        }
        snapshot
    }
}

/// The category a change falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Added,
    Removed,
    Modified,
    Renamed,
}

/// One classified difference between two snapshots
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChangeRecord {
    Added {
        path: String,
        new: Fingerprint,
    },
    Removed {
        path: String,
        old: Fingerprint,
    },
    Modified {
        path: String,
        old: Fingerprint,
        new: Fingerprint,
    },
    Renamed {
        old_path: String,
        new_path: String,
        fingerprint: Fingerprint,
    },
}

impl ChangeRecord {
    pub fn kind(&self) -> ChangeKind {
        match self {
            ChangeRecord::Added { .. } => ChangeKind::Added,
            ChangeRecord::Removed { .. } => ChangeKind::Removed,
            ChangeRecord::Modified { .. } => ChangeKind::Modified,
            ChangeRecord::Renamed { .. } => ChangeKind::Renamed,
        }
    }

    /// The path a result is ordered by: the old path for removals and renames,
    /// the new path otherwise.
    pub fn sort_key(&self) -> &str {
        match self {
            ChangeRecord::Added { path, .. }
            | ChangeRecord::Removed { path, .. }
            | ChangeRecord::Modified { path, .. } => path,
            ChangeRecord::Renamed { old_path, .. } => old_path,
        }
    }

    /// The same change seen from the other side of the comparison.
    pub fn inverted(&self) -> ChangeRecord {
        match self.clone() {
            ChangeRecord::Added { path, new } => ChangeRecord::Removed { path, old: new },
            ChangeRecord::Removed { path, old } => ChangeRecord::Added { path, new: old },
            ChangeRecord::Modified { path, old, new } => ChangeRecord::Modified { path, old: new, new: old },
            ChangeRecord::Renamed { old_path, new_path, fingerprint } => ChangeRecord::Renamed {
                old_path: new_path,
                new_path: old_path,
                fingerprint,
            },
        }
    }
}

/// Number of records per category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSummary {
    pub modified: usize,
    pub added: usize,
    pub removed: usize,
    pub renamed: usize,
}

impl DiffSummary {
    pub fn total(&self) -> usize {
        self.modified + self.added + self.removed + self.renamed
    }
}

/// The complete, ordered set of changes between two snapshots
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiffResult {
    changes: Vec<ChangeRecord>,
}

impl DiffResult {
    /// Builds a result, ordering the records by their sort key.
    pub fn from_records(mut changes: Vec<ChangeRecord>) -> Self {
        changes.sort_by(|a, b| a.sort_key().cmp(b.sort_key()));
        DiffResult { changes }
    }

    pub fn records(&self) -> &[ChangeRecord] {
        &self.changes
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn of_kind(&self, kind: ChangeKind) -> impl Iterator<Item = &ChangeRecord> {
        self.changes.iter().filter(move |c| c.kind() == kind)
    }

    pub fn summary(&self) -> DiffSummary {
        let mut summary = DiffSummary::default();
        for change in &self.changes {
            match change.kind() {
                ChangeKind::Added => summary.added += 1,
                ChangeKind::Removed => summary.removed += 1,
                ChangeKind::Modified => summary.modified += 1,
                ChangeKind::Renamed => summary.renamed += 1,
            }
        }
        summary
    }

    /// Relabels every record as if the two snapshots had been swapped.
    pub fn inverted(&self) -> DiffResult {
        DiffResult::from_records(self.changes.iter().map(ChangeRecord::inverted).collect())
    }
}
