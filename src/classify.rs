// src/classify.rs

use crate::model::*;
use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::{debug, trace};

/// Knobs for [`classify_with`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifyOptions {
    /// Pair removed and added paths with identical content into renames
    pub detect_renames: bool,
}

impl Default for ClassifyOptions {
    fn default() -> Self {
        Self { detect_renames: true }
    }
}

/// Classifies every difference between `before` and `after`, with rename
/// detection enabled.
pub fn classify(before: &FileSnapshot, after: &FileSnapshot) -> DiffResult {
    classify_with(before, after, &ClassifyOptions::default())
}

/// Classifies every difference between `before` and `after`.
///
/// Paths only in `before` are removals, paths only in `after` are additions and
/// paths in both with different fingerprints are modifications. When rename
/// detection is on, a removal and an addition with the same fingerprint are
/// merged into one rename (see [`pair_renames`] for how candidates compete).
/// The result is ordered by [`ChangeRecord::sort_key`].
pub fn classify_with(before: &FileSnapshot, after: &FileSnapshot, options: &ClassifyOptions) -> DiffResult {
    let mut changes = Vec::new();
    let mut removed: BTreeMap<&str, &Fingerprint> = BTreeMap::new();

    for (path, old) in before.iter() {
        match after.get(path) {
            Some(new) if new == old => {}
            Some(new) => changes.push(ChangeRecord::Modified {
                path: path.to_string(),
                old: old.clone(),
                new: new.clone(),
            }),
            None => {
                removed.insert(path, old);
            }
        }
    }

    let mut added: BTreeMap<&str, &Fingerprint> =
        after.iter().filter(|(path, _)| !before.contains(path)).collect();

    debug!(
        modified = changes.len(),
        removed = removed.len(),
        added = added.len(),
        "Compared snapshots"
    );

    if options.detect_renames {
        for (old_path, new_path) in pair_renames(&removed, &added) {
            trace!(old_path, new_path, "Paired rename");
            removed.remove(old_path);
            if let Some(fingerprint) = added.remove(new_path) {
                changes.push(ChangeRecord::Renamed {
                    old_path: old_path.to_string(),
                    new_path: new_path.to_string(),
                    fingerprint: fingerprint.clone(),
                });
            }
        }
    }

    changes.extend(removed.into_iter().map(|(path, old)| ChangeRecord::Removed {
        path: path.to_string(),
        old: old.clone(),
    }));
    changes.extend(added.into_iter().map(|(path, new)| ChangeRecord::Added {
        path: path.to_string(),
        new: new.clone(),
    }));

    DiffResult::from_records(changes)
}

/// A removed and an added path sharing a fingerprint
struct RenameCandidate<'a> {
    old_path: &'a str,
    new_path: &'a str,
    prefix: usize,
    suffix: usize,
}

impl<'a> RenameCandidate<'a> {
    fn new(old_path: &'a str, new_path: &'a str) -> Self {
        let prefix = common_prefix_len(old_path, new_path);
        let suffix = common_suffix_len(old_path, new_path);
        Self { old_path, new_path, prefix, suffix }
    }

    /// Lower ranks are paired first. Nothing in the key depends on which side
    /// a path came from, so swapping the snapshots mirrors the pairing.
    fn rank(&self) -> (Reverse<usize>, Reverse<usize>, &'a str, &'a str) {
        let (low, high) = if self.old_path <= self.new_path {
            (self.old_path, self.new_path)
        } else {
            (self.new_path, self.old_path)
        };
        (Reverse(self.prefix), Reverse(self.suffix), low, high)
    }
}

/// Greedily pairs removed paths with added paths of identical content.
///
/// Candidates are ranked by longest common prefix, then longest common
/// suffix, then by the lexicographically smaller path of the pair, then the
/// larger one. Walking the ranking, a pair is accepted when neither path is
/// already taken. For a single removed path this picks the most similar added
/// path, ties going to the smallest one.
fn pair_renames<'a>(
    removed: &BTreeMap<&'a str, &'a Fingerprint>,
    added: &BTreeMap<&'a str, &'a Fingerprint>,
) -> Vec<(&'a str, &'a str)> {
    let mut added_by_fingerprint: HashMap<&Fingerprint, Vec<&'a str>> = HashMap::new();
    for (&path, &fingerprint) in added {
        added_by_fingerprint.entry(fingerprint).or_default().push(path);
    }

    let mut candidates: Vec<RenameCandidate<'a>> = Vec::new();
    for (&old_path, &fingerprint) in removed {
        if let Some(new_paths) = added_by_fingerprint.get(fingerprint) {
            candidates.extend(new_paths.iter().map(|&new_path| RenameCandidate::new(old_path, new_path)));
        }
    }
    candidates.sort_by_key(|c| c.rank());

    let mut taken_old = HashSet::new();
    let mut taken_new = HashSet::new();
    let mut pairs = Vec::new();
    for candidate in candidates {
        if taken_old.contains(candidate.old_path) || taken_new.contains(candidate.new_path) {
            continue;
        }
        taken_old.insert(candidate.old_path);
        taken_new.insert(candidate.new_path);
        pairs.push((candidate.old_path, candidate.new_path));
    }
    pairs
}

fn common_prefix_len(a: &str, b: &str) -> usize {
    a.chars().zip(b.chars()).take_while(|(x, y)| x == y).count()
}

fn common_suffix_len(a: &str, b: &str) -> usize {
    a.chars().rev().zip(b.chars().rev()).take_while(|(x, y)| x == y).count()
}
