// src/report.rs

use crate::model::*;
use serde::Serialize;
use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::Path;

/// What was compared, shown alongside the changes
#[derive(Debug, Clone, Serialize)]
pub struct ReportContext {
    pub repo1: String,
    pub rev1: String,
    pub repo2: String,
    pub rev2: String,
}

/// Turns a [`DiffResult`] into a report document.
pub trait ReportFormatter {
    fn render(&self, ctx: &ReportContext, diff: &DiffResult) -> String;

    /// Extension of the default report file for this format
    fn extension(&self) -> &'static str;
}

/// One Markdown section per change category
pub struct MarkdownReport;

impl ReportFormatter for MarkdownReport {
    fn render(&self, ctx: &ReportContext, diff: &DiffResult) -> String {
        let summary = diff.summary();
        let mut out = String::new();

        // Writing to a String cannot fail
        let _ = writeln!(out, "# Repository Comparison Results\n");
        let _ = writeln!(out, "- Repository 1: `{}` at `{}`", ctx.repo1, ctx.rev1);
        let _ = writeln!(out, "- Repository 2: `{}` at `{}`", ctx.repo2, ctx.rev2);
        let _ = writeln!(
            out,
            "- Changes: {} modified, {} added, {} removed, {} renamed",
            summary.modified, summary.added, summary.removed, summary.renamed
        );

        for (title, kind) in [
            ("Modified Files", ChangeKind::Modified),
            ("Added Files", ChangeKind::Added),
            ("Removed Files", ChangeKind::Removed),
            ("Renamed Files", ChangeKind::Renamed),
        ] {
            let _ = writeln!(out, "\n## {title}\n");
            let mut entries = diff.of_kind(kind).peekable();
            if entries.peek().is_none() {
                let _ = writeln!(out, "_None_");
            }
            for change in entries {
                let _ = match change {
                    ChangeRecord::Renamed { old_path, new_path, .. } => {
                        writeln!(out, "- {old_path} -> {new_path}")
                    }
                    other => writeln!(out, "- {}", other.sort_key()),
                };
            }
        }
        out
    }

    fn extension(&self) -> &'static str {
        "md"
    }
}

/// The whole comparison as pretty-printed JSON
pub struct JsonReport;

#[derive(Serialize)]
struct JsonDocument<'a> {
    #[serde(flatten)]
    context: &'a ReportContext,
    summary: DiffSummary,
    changes: &'a DiffResult,
}

impl ReportFormatter for JsonReport {
    fn render(&self, ctx: &ReportContext, diff: &DiffResult) -> String {
        let document = JsonDocument {
            context: ctx,
            summary: diff.summary(),
            changes: diff,
        };
        // Only structs, string-keyed fields and strings: serialization cannot fail
        let mut out = serde_json::to_string_pretty(&document).expect("report document serializes to JSON");
        out.push('\n');
        out
    }

    fn extension(&self) -> &'static str {
        "json"
    }
}

/// Writes a rendered report, creating missing parent directories.
pub fn write_report(path: &Path, contents: &str) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)
}
