// tests/cli.rs

mod common;

use assert_cmd::Command;
use common::{commit_files, repo_with_files};
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn repo_diff(workdir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("repo-diff").unwrap();
    cmd.current_dir(workdir.path()).env_remove("RUST_LOG");
    cmd
}

#[test]
fn writes_markdown_report_sbom_and_log() -> Result<(), Box<dyn std::error::Error>> {
    let workdir = TempDir::new()?;
    let repo1 = TempDir::new()?;
    let repo2 = TempDir::new()?;
    repo_with_files(
        repo1.path(),
        &[("same.txt", "same"), ("b.txt", "old"), ("old.txt", "moved"), ("gone.txt", "bye")],
    );
    repo_with_files(
        repo2.path(),
        &[("same.txt", "same"), ("b.txt", "new"), ("new.txt", "moved"), ("added.txt", "hi")],
    );

    repo_diff(&workdir)
        .arg("--repo1")
        .arg(repo1.path())
        .arg("--repo2")
        .arg(repo2.path())
        .args(["--output", "report.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 4 changes"))
        .stdout(predicate::str::contains("Comparison results saved to report.md"));

    let report = fs::read_to_string(workdir.path().join("report.md"))?;
    assert!(report.starts_with("# Repository Comparison Results\n"));
    assert!(report.contains("## Modified Files\n\n- b.txt\n"), "{report}");
    assert!(report.contains("## Added Files\n\n- added.txt\n"), "{report}");
    assert!(report.contains("## Removed Files\n\n- gone.txt\n"), "{report}");
    assert!(report.contains("## Renamed Files\n\n- old.txt -> new.txt\n"), "{report}");
    assert!(!report.contains("same.txt"), "{report}");

    let sbom = fs::read_to_string(workdir.path().join("sbom.txt"))?;
    assert!(sbom.starts_with("Software Bill of Materials:\n"));
    assert!(sbom.contains("- Output file: report.md"));

    let log = fs::read_to_string(workdir.path().join("repo_diff.log"))?;
    assert!(log.contains("Read snapshot"), "{log}");
    assert!(log.contains("Comparison completed"), "{log}");
    Ok(())
}

#[test]
fn json_report_without_renames() -> Result<(), Box<dyn std::error::Error>> {
    let workdir = TempDir::new()?;
    let repo1 = TempDir::new()?;
    let repo2 = TempDir::new()?;
    repo_with_files(repo1.path(), &[("old.txt", "moved")]);
    repo_with_files(repo2.path(), &[("new.txt", "moved")]);

    repo_diff(&workdir)
        .arg("--repo1")
        .arg(repo1.path())
        .arg("--repo2")
        .arg(repo2.path())
        .args(["--output", "out/diff", "--format", "json", "--no-renames"])
        .assert()
        .success();

    assert!(!workdir.path().join("out/diff.json").exists());
    let report: serde_json::Value = serde_json::from_str(&fs::read_to_string(workdir.path().join("out/diff"))?)?;
    assert_eq!(report["summary"]["added"], 1);
    assert_eq!(report["summary"]["removed"], 1);
    assert_eq!(report["summary"]["renamed"], 0);
    assert_eq!(report["changes"][0]["path"], "new.txt");
    assert_eq!(report["changes"][1]["path"], "old.txt");
    Ok(())
}

#[test]
fn json_format_defaults_to_json_file() -> Result<(), Box<dyn std::error::Error>> {
    let workdir = TempDir::new()?;
    let repo = TempDir::new()?;
    repo_with_files(repo.path(), &[("a.txt", "v1")]);

    repo_diff(&workdir)
        .arg("--repo1")
        .arg(repo.path())
        .arg("--repo2")
        .arg(repo.path())
        .args(["--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("saved to repo_diff_results.json"));

    assert!(workdir.path().join("repo_diff_results.json").exists());
    assert!(!workdir.path().join("repo_diff_results.md").exists());
    Ok(())
}

#[test]
fn compares_revisions_of_the_same_repository() -> Result<(), Box<dyn std::error::Error>> {
    let workdir = TempDir::new()?;
    let repo = TempDir::new()?;
    let git = repo_with_files(repo.path(), &[("a.txt", "v1")]);
    commit_files(&git, &[("a.txt", "v2")]);

    repo_diff(&workdir)
        .arg("--repo1")
        .arg(repo.path())
        .args(["--rev1", "HEAD~1"])
        .arg("--repo2")
        .arg(repo.path())
        .assert()
        .success();

    let report = fs::read_to_string(workdir.path().join("repo_diff_results.md"))?;
    assert!(report.contains("- Repository 1: "), "{report}");
    assert!(report.contains("at `HEAD~1`"), "{report}");
    assert!(report.contains("## Modified Files\n\n- a.txt\n"), "{report}");
    Ok(())
}

#[test]
fn missing_repository_fails_with_its_path() -> Result<(), Box<dyn std::error::Error>> {
    let workdir = TempDir::new()?;
    let repo1 = TempDir::new()?;
    repo_with_files(repo1.path(), &[("a.txt", "v1")]);
    let missing = workdir.path().join("nowhere");

    repo_diff(&workdir)
        .arg("--repo1")
        .arg(repo1.path())
        .arg("--repo2")
        .arg(&missing)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error: repository path does not exist"))
        .stderr(predicate::str::contains(missing.display().to_string()));

    assert!(!workdir.path().join("repo_diff_results.md").exists());
    let log = fs::read_to_string(workdir.path().join("repo_diff.log"))?;
    assert!(log.contains("ERROR"), "{log}");
    Ok(())
}

#[test]
fn plain_directory_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let workdir = TempDir::new()?;
    let not_a_repo = TempDir::new()?;

    repo_diff(&workdir)
        .arg("--repo1")
        .arg(not_a_repo.path())
        .arg("--repo2")
        .arg(not_a_repo.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a git repository"));
    Ok(())
}
