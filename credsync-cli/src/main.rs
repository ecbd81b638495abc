//! Credsync — one-directional credential synchronization CLI.
//!
//! # Usage
//!
//! ```text
//! credsync --source <cfg.yaml> --target <cfg.yaml> \
//!          [--exclude <user>]... [--dry-run] [--verbose]
//! ```
//!
//! Reads every user from the source store, reconciles usernames and bcrypt
//! password hashes into the target store, and reports what was created,
//! updated or already in sync. Exit code 0 on success (and on `--help`),
//! 1 on any configuration, connection or transcoding error.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use credsync_core::types::{Action, ExclusionSet};
use credsync_sync::pipeline::{self, RunOptions, SyncOutcome};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "credsync",
    version,
    about = "Synchronize accounts and password hashes from a source identity store into a target store",
    long_about = None,
)]
struct Cli {
    /// Path to the source store's YAML config.
    #[arg(long, value_name = "FILE")]
    source: PathBuf,

    /// Path to the target store's YAML config.
    #[arg(long, value_name = "FILE")]
    target: PathBuf,

    /// Source username to leave out of synchronization (repeatable),
    /// e.g. `--exclude admin`.
    #[arg(short = 'x', long = "exclude", value_name = "USER")]
    exclude: Vec<String>,

    /// Compute and report actions without writing to the target store.
    #[arg(long)]
    dry_run: bool,

    /// Log every computed action before it is applied.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::LevelFilter::Debug
    } else {
        tracing::LevelFilter::Warn
    };
    env_logger::Builder::new().filter_level(level).init();

    let options = RunOptions {
        source_config: cli.source,
        target_config: cli.target,
        exclusions: ExclusionSet::from_iter(cli.exclude),
        dry_run: cli.dry_run,
    };

    let outcome = pipeline::run(&options).context("credential sync failed")?;
    print_outcome(&outcome, cli.dry_run);
    Ok(())
}

// ---------------------------------------------------------------------------
// Report printing
// ---------------------------------------------------------------------------

fn print_outcome(outcome: &SyncOutcome, dry_run: bool) {
    let prefix = if dry_run { "[dry-run] " } else { "" };
    let report = &outcome.report;

    if outcome.actions.is_empty() {
        println!("{prefix}{} no users to synchronize", "✓".green());
        return;
    }

    if report.is_noop() {
        println!(
            "{prefix}{} all {} users already in sync",
            "✓".green(),
            report.unchanged
        );
        return;
    }

    println!(
        "{prefix}{} {} created, {} updated, {} unchanged",
        "✓".green(),
        report.created,
        report.updated,
        report.unchanged
    );

    for action in &outcome.actions {
        match action {
            Action::Create { username, .. } => println!("  +  {username}"),
            Action::Update { username, .. } => println!("  ~  {username}"),
            Action::NoOp { username } => println!("  ·  {username}"),
        }
    }
}
