// src/main.rs

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::ProgressBar;
use repo_diff::cli::Args;
use repo_diff::report::{write_report, ReportContext};
use repo_diff::sbom::{write_sbom, SbomInfo};
use repo_diff::snapshot::snapshot_pair;
use repo_diff::{classify_with, logging, ClassifyOptions};
use std::time::Instant;
use tracing::{error, info};

fn main() {
    let args = Args::parse();

    let subscriber = match logging::file_subscriber(&args.log_file, args.verbose) {
        Ok(subscriber) => subscriber,
        Err(e) => {
            eprintln!("Error: cannot create log file {}: {}", args.log_file.display(), e);
            std::process::exit(1);
        }
    };

    let result = tracing::subscriber::with_default(subscriber, || {
        let result = run(&args);
        if let Err(e) = &result {
            error!("{e:#}");
        }
        result
    });

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let start_time = Instant::now();
    info!(repo1 = %args.repo1.display(), repo2 = %args.repo2.display(), "Starting comparison");

    let bar = ProgressBar::new(2);
    bar.set_message("Reading repositories");
    let (before, after) = snapshot_pair(
        (args.repo1.as_path(), args.rev1.as_str()),
        (args.repo2.as_path(), args.rev2.as_str()),
        &bar,
    )?;
    bar.finish_and_clear();

    let options = ClassifyOptions {
        detect_renames: !args.no_renames,
    };
    let diff = classify_with(&before, &after, &options);
    let summary = diff.summary();
    info!(
        modified = summary.modified,
        added = summary.added,
        removed = summary.removed,
        renamed = summary.renamed,
        "Classified changes"
    );

    let context = ReportContext {
        repo1: args.repo1.display().to_string(),
        rev1: args.rev1.clone(),
        repo2: args.repo2.display().to_string(),
        rev2: args.rev2.clone(),
    };
    let formatter = args.format.formatter();
    let output = args.output_path();

    info!(path = %output.display(), "Writing results");
    write_report(&output, &formatter.render(&context, &diff))
        .with_context(|| format!("failed to write report to {}", output.display()))?;
    println!(
        "Found {} changes in {:.2?}. Comparison results saved to {}",
        summary.total(),
        start_time.elapsed(),
        output.display()
    );

    let sbom = SbomInfo {
        generated_at: chrono::Utc::now(),
        repositories: (args.repo1.clone(), args.repo2.clone()),
        output_file: output.clone(),
        log_file: args.log_file.clone(),
    };
    write_sbom(&args.sbom, &sbom).with_context(|| format!("failed to write SBOM to {}", args.sbom.display()))?;
    info!(path = %args.sbom.display(), "SBOM written");

    info!(elapsed = ?start_time.elapsed(), "Comparison completed");
    Ok(())
}
