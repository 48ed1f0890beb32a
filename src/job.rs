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

//! # Batch Orchestrator
//!
//! One run is a single pass over the whole item table:
//!
//! 1. the store file must exist
//! 2. a backup copy is written next to it (unless dry-run or disabled)
//! 3. every row is loaded into a snapshot
//! 4. the pipeline rewrites the snapshot
//! 5. the differ keeps only rows that changed
//! 6. the changes are written in one transaction
//! 7. an optional change report is written
//! 8. optional verification terms are scanned for
//!
//! Any error before the commit leaves the store exactly as it was.

use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::backup::create_backup;
use crate::config::ZeJobConfig;
use crate::diff::diff_items;
use crate::errors::Result;
use crate::pipeline::{ZePipeline, ZePipelineBuilder};
use crate::report::write_report;
use crate::store::{ZeStore, ZeStoreConfig, ZeTermMatch};
use crate::text::terms::{ZeTerm, ZeTermSet};

/// What a run did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZeRunSummary {
    pub operation: String,
    pub store: PathBuf,
    pub rows_scanned: usize,
    /// Rows written, or rows that would have been written on a dry run.
    pub rows_changed: usize,
    pub backup: Option<PathBuf>,
    pub report: Option<PathBuf>,
    pub dry_run: bool,
    /// Rows still matching the job's verification terms after commit.
    pub remaining_matches: Option<usize>,
}

/// A configured, ready-to-run batch job.
#[derive(Debug)]
pub struct ZeJob {
    config: ZeJobConfig,
    pipeline: ZePipeline,
    verify_terms: Option<ZeTermSet>,
}

impl ZeJob {
    /// Builds a job with the bundled operators.
    pub fn new(config: ZeJobConfig) -> Result<Self> {
        Self::with_builder(config, &ZePipelineBuilder::with_defaults())
    }

    /// Builds a job with a caller-supplied operator registry.
    pub fn with_builder(config: ZeJobConfig, builder: &ZePipelineBuilder) -> Result<Self> {
        config.validate()?;
        let pipeline = builder.build_from_config(&config.stages)?;
        let verify_terms = if config.verify_terms.is_empty() {
            None
        } else {
            Some(ZeTermSet::new(config.verify_terms.clone())?)
        };
        Ok(Self {
            config,
            pipeline,
            verify_terms,
        })
    }

    pub fn config(&self) -> &ZeJobConfig {
        &self.config
    }

    pub fn pipeline(&self) -> &ZePipeline {
        &self.pipeline
    }

    pub fn run(&self) -> Result<ZeRunSummary> {
        let started = Instant::now();
        let config = &self.config;
        let operation = config.operation.as_str();
        log::info!(
            "{operation}: starting on {} ({} stages{})",
            config.store.display(),
            self.pipeline.len(),
            if config.dry_run { ", dry run" } else { "" }
        );

        // Both fail with a missing-resource error when the store file is absent.
        let backup = if config.dry_run {
            None
        } else {
            create_backup(&config.store, config.backup, operation)?.map(|backup| backup.path)
        };
        let mut store = ZeStore::open(&config.store, config.layout.clone())?;

        let snapshot = store.load_items()?;
        let processed = self
            .pipeline
            .run_with_progress(snapshot.clone(), |stage, index, total| {
                log::debug!("{operation}: stage {index}/{total} '{stage}' done");
            })?;
        let diffs = diff_items(&snapshot, &processed)?;
        for diff in diffs.iter().filter(|diff| !diff.notes.is_empty()) {
            log::debug!(
                "{operation}: {} {}",
                diff.id,
                serde_json::Value::Object(diff.notes.clone())
            );
        }

        let rows_changed = if config.dry_run {
            diffs.len()
        } else {
            store.apply_changes(&diffs)?
        };

        if let Some(report) = &config.report {
            write_report(report, &diffs)?;
        }

        let remaining_matches = match (&self.verify_terms, config.dry_run) {
            (Some(terms), false) => {
                let matches = store.find_term_matches(terms)?;
                if !matches.is_empty() {
                    log::warn!(
                        "{operation}: {} fields still match the verification terms",
                        matches.len()
                    );
                }
                Some(matches.len())
            }
            _ => None,
        };

        log::info!(
            "{operation}: {} of {} rows {} in {:?}",
            rows_changed,
            snapshot.len(),
            if config.dry_run { "would change" } else { "changed" },
            started.elapsed()
        );

        Ok(ZeRunSummary {
            operation: operation.to_string(),
            store: config.store.clone(),
            rows_scanned: snapshot.len(),
            rows_changed,
            backup,
            report: config.report.clone(),
            dry_run: config.dry_run,
            remaining_matches,
        })
    }

    /// Read-only scan of `store` for fields still containing any of `terms`.
    pub fn verify(
        store: impl AsRef<Path>,
        layout: ZeStoreConfig,
        terms: Vec<ZeTerm>,
    ) -> Result<Vec<ZeTermMatch>> {
        let terms = ZeTermSet::new(terms)?;
        let store = ZeStore::open_read_only(store, layout)?;
        let matches = store.find_term_matches(&terms)?;
        log::info!(
            "verify: {} matching fields in {}",
            matches.len(),
            store.path().display()
        );
        Ok(matches)
    }
}
