// tests/common/mod.rs

use git2::{Commit, Oid, Repository, Signature};
use std::fs;
use std::path::Path;

/// Creates a repository at `dir` with one commit holding `files`.
pub fn repo_with_files(dir: &Path, files: &[(&str, &str)]) -> Repository {
    let repo = Repository::init(dir).unwrap();
    commit_files(&repo, files);
    repo
}

/// Writes `files` into the working tree, stages them and commits on HEAD.
pub fn commit_files(repo: &Repository, files: &[(&str, &str)]) -> Oid {
    let workdir = repo.workdir().unwrap().to_path_buf();
    let mut index = repo.index().unwrap();
    for (path, contents) in files {
        let full = workdir.join(path);
        fs::create_dir_all(full.parent().unwrap()).unwrap();
        fs::write(&full, contents).unwrap();
        index.add_path(Path::new(path)).unwrap();
    }
    index.write().unwrap();

    commit_tree(repo, index.write_tree().unwrap())
}

/// Commits an already written tree on HEAD.
pub fn commit_tree(repo: &Repository, tree_id: Oid) -> Oid {
    let tree = repo.find_tree(tree_id).unwrap();
    let signature = Signature::now("Test", "test@example.com").unwrap();
    let parent = repo.head().ok().and_then(|head| head.peel_to_commit().ok());
    let parents: Vec<&Commit> = parent.iter().collect();
    repo.commit(Some("HEAD"), &signature, &signature, "commit", &tree, &parents)
        .unwrap()
}
