//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Zest.
//! The Zest project belongs to the Dunimd Team.
//!
//! Licensed under the Apache License, Version 2.0 (the "License");
//! You may not use this file except in compliance with the License.
//! You may obtain a copy of the License at
//!
//!     http://www.apache.org/licenses/LICENSE-2.0
//!
//! Unless required by applicable law or agreed to in writing, software
//! distributed under the License is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//! See the License for the specific language governing permissions and
//! limitations under the License.

//! Zest CLI - batch normalization of catalog descriptions

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use zest::backup::ZeBackupStyle;
use zest::config::{ZeJobConfig, DEFAULT_STORE_PATH, PRESETS};
use zest::log::{ZeLogConfig, ZeLogger};
use zest::{ZeJob, ZeRunSummary, ZeStoreConfig, ZeTerm, ZeTermMatch};

#[derive(Parser)]
#[command(name = "zest")]
#[command(version)]
#[command(about = "Batch term filtering and description reconstruction for catalog tables", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Debug-level logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log as JSON lines instead of text
    #[arg(long, global = true)]
    log_json: bool,

    /// Also append log lines to this file
    #[arg(long, global = true, env = "ZEST_LOG_FILE")]
    log_file: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a job against the store in one transaction
    Run {
        /// Store file (overrides the job's store)
        #[arg(long, env = "ZEST_DB")]
        db: Option<PathBuf>,

        /// Built-in job (see `zest presets`)
        #[arg(long, conflicts_with = "config")]
        preset: Option<String>,

        /// Job file (.yaml, .yml or .json)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Compute and report changes without writing them
        #[arg(long)]
        dry_run: bool,

        /// Skip the pre-run backup copy
        #[arg(long)]
        no_backup: bool,

        /// Write changed fields to this file (.jsonl or .csv)
        #[arg(long)]
        report: Option<PathBuf>,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Scan the store for terms without modifying it
    Verify {
        /// Store file
        #[arg(long, env = "ZEST_DB", default_value = DEFAULT_STORE_PATH)]
        db: PathBuf,

        /// Whole-word term to look for (repeatable)
        #[arg(long = "term")]
        terms: Vec<String>,

        /// Regular expression to look for (repeatable)
        #[arg(long = "pattern")]
        patterns: Vec<String>,

        /// Exit with status 2 when any field matches
        #[arg(long)]
        fail_on_match: bool,

        /// Print matches as JSON
        #[arg(long)]
        json: bool,
    },

    /// List built-in jobs
    Presets,
}

fn init_logging(cli: &Cli) -> Result<()> {
    let config = ZeLogConfig {
        default_level: if cli.verbose { "DEBUG" } else { "INFO" }.to_string(),
        json_format: cli.log_json,
        file_path: cli.log_file.clone(),
        ..ZeLogConfig::default()
    };
    ZeLogger::init(&config).context("installing logger")?;
    Ok(())
}

fn load_job(
    db: Option<PathBuf>,
    preset: Option<String>,
    config: Option<PathBuf>,
    dry_run: bool,
    no_backup: bool,
    report: Option<PathBuf>,
) -> Result<ZeJobConfig> {
    let mut job = match (preset, config) {
        (_, Some(path)) => ZeJobConfig::from_path(&path)
            .with_context(|| format!("loading job file {}", path.display()))?,
        (Some(name), None) => ZeJobConfig::preset(&name)?,
        (None, None) => ZeJobConfig::preset("update-descriptions")?,
    };
    if let Some(db) = db {
        job.store = db;
    }
    if dry_run {
        job.dry_run = true;
    }
    if no_backup {
        job.backup = ZeBackupStyle::Disabled;
    }
    if report.is_some() {
        job.report = report;
    }
    Ok(job)
}

fn print_summary(summary: &ZeRunSummary, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(summary)?);
        return Ok(());
    }
    if let Some(backup) = &summary.backup {
        println!("Backup created at {}", backup.display());
    }
    if summary.dry_run {
        println!(
            "Dry run: {} of {} rows would change ({}).",
            summary.rows_changed, summary.rows_scanned, summary.operation
        );
    } else {
        println!(
            "Updated {} of {} rows ({}).",
            summary.rows_changed, summary.rows_scanned, summary.operation
        );
    }
    if let Some(report) = &summary.report {
        println!("Change report written to {}", report.display());
    }
    match summary.remaining_matches {
        Some(0) => println!("Verification: no remaining matches."),
        Some(n) => println!("Verification: {n} fields still match."),
        None => {}
    }
    Ok(())
}

fn print_matches(matches: &[ZeTermMatch], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(matches)?);
    } else if matches.is_empty() {
        println!("No rows contain the given terms.");
    } else {
        println!("Found {} fields still containing the given terms:", matches.len());
        for m in matches {
            println!(
                "- {} [{}] {:?}: {}",
                m.id,
                m.field.as_str(),
                m.matches,
                m.value
            );
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    match cli.command {
        Commands::Run {
            db,
            preset,
            config,
            dry_run,
            no_backup,
            report,
            json,
        } => {
            let job = load_job(db, preset, config, dry_run, no_backup, report)?;
            let operation = job.operation.clone();
            let summary = ZeJob::new(job)
                .and_then(|job| job.run())
                .with_context(|| format!("{operation} failed"))?;
            print_summary(&summary, json)
        }

        Commands::Verify {
            db,
            terms,
            patterns,
            fail_on_match,
            json,
        } => {
            let mut all = terms.into_iter().map(ZeTerm::literal).collect::<Vec<_>>();
            all.extend(patterns.into_iter().map(ZeTerm::pattern));
            if all.is_empty() {
                all = vec![ZeTerm::literal("ham"), ZeTerm::literal("pork")];
            }
            let matches = ZeJob::verify(&db, ZeStoreConfig::default(), all)
                .with_context(|| format!("verifying {}", db.display()))?;
            print_matches(&matches, json)?;
            if fail_on_match && !matches.is_empty() {
                std::process::exit(2);
            }
            Ok(())
        }

        Commands::Presets => {
            for (name, about) in PRESETS {
                println!("{name:<22}{about}");
            }
            Ok(())
        }
    }
}
