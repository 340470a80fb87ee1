// src/sbom.rs

use chrono::{DateTime, SecondsFormat, Utc};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Inputs for the software bill of materials written next to a report
#[derive(Debug, Clone)]
pub struct SbomInfo {
    pub generated_at: DateTime<Utc>,
    pub repositories: (PathBuf, PathBuf),
    pub output_file: PathBuf,
    pub log_file: PathBuf,
}

impl SbomInfo {
    pub fn render(&self) -> String {
        let (major, minor, patch) = git2::Version::get().libgit2_version();
        let mut lines = vec![
            "Software Bill of Materials:".to_string(),
            format!("- Tool: {} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            format!("- libgit2: {major}.{minor}.{patch}"),
            format!("- Generated: {}", self.generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)),
            format!(
                "- Repositories compared: {}, {}",
                self.repositories.0.display(),
                self.repositories.1.display()
            ),
            format!("- Output file: {}", self.output_file.display()),
            format!("- Log file: {}", self.log_file.display()),
        ];
        lines.push(String::new());
        lines.join("\n")
    }
}

pub fn write_sbom(path: &Path, info: &SbomInfo) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, info.render())
}
