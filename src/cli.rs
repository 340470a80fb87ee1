// src/cli.rs

use crate::report::{JsonReport, MarkdownReport, ReportFormatter};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Compare the tracked files of two git repositories", long_about = None)]
pub struct Args {
    /// Path to the first repository
    #[arg(long)]
    pub repo1: PathBuf,

    /// Path to the second repository
    #[arg(long)]
    pub repo2: PathBuf,

    /// Path to save the report to [default: repo_diff_results.md, or .json with --format json]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Revision of the first repository to compare
    #[arg(long, default_value = "HEAD")]
    pub rev1: String,

    /// Revision of the second repository to compare
    #[arg(long, default_value = "HEAD")]
    pub rev2: String,

    /// Report format
    #[arg(long, value_enum, default_value_t = Format::Markdown)]
    pub format: Format,

    /// Report removed and added files separately even when their content matches
    #[arg(long)]
    pub no_renames: bool,

    /// Log file, overwritten on every run
    #[arg(long, default_value = "repo_diff.log")]
    pub log_file: PathBuf,

    /// Where to write the software bill of materials
    #[arg(long, default_value = "sbom.txt")]
    pub sbom: PathBuf,

    /// Log more detail (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(clap::ValueEnum, Clone, Debug, Copy, PartialEq, Eq)]
pub enum Format {
    /// One section per change category
    Markdown,
    /// Machine-readable change list
    Json,
}

impl Args {
    /// The report path: `--output` as given, otherwise `repo_diff_results`
    /// with the extension of the chosen format.
    pub fn output_path(&self) -> PathBuf {
        match &self.output {
            Some(path) => path.clone(),
            None => PathBuf::from("repo_diff_results").with_extension(self.format.formatter().extension()),
        }
    }
}

impl Format {
    pub fn formatter(self) -> Box<dyn ReportFormatter> {
        match self {
            Format::Markdown => Box::new(MarkdownReport),
            Format::Json => Box::new(JsonReport),
        }
    }
}
