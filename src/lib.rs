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

//! # Zest Library
//!
//! Zest rewrites the free-text fields of a small catalog table in one
//! deterministic batch pass: banned terms are removed or substituted, and
//! descriptions are rebuilt from whatever content they carry into a fixed
//! `Topped with <content>. <Theme>-inspired: <suggestion>.` shape. Running a
//! job twice changes nothing the second time.
//!
//! ## Module Overview
//!
//! - **text**: pure string transforms (Term Filter, Description Reconstructor)
//! - **record**: [`ZeItem`] snapshot of one catalog row
//! - **operator**: the [`ZeOperator`] trait
//! - **operators**: bundled operators (`terms.*`, `description.reconstruct`, `descriptions.assign`)
//! - **pipeline**: config-driven pipeline builder
//! - **diff**: changed-field detection between snapshot and result
//! - **store**: SQLite item table with all-or-nothing writes
//! - **backup**: verified pre-run copy of the store file
//! - **config**: job files and presets
//! - **job**: the batch orchestrator
//! - **report**: JSON Lines / CSV change reports
//! - **log**: `log` backend used by the binary
//!
//! ## Feature Flags
//!
//! - `csv`: CSV change reports
//! - `full`: Enables all features (default)
//!
//! ## Quick Start
//!
//! ```rust
//! use zest::{ZeItem, ZePipelineBuilder};
//! use serde_json::json;
//!
//! let pipeline = ZePipelineBuilder::with_defaults()
//!     .build_from_config(&[
//!         json!({"operator": "terms.remove", "config": {"terms": ["ham"]}}),
//!         json!({"operator": "description.reconstruct"}),
//!     ])
//!     .unwrap();
//! let out = pipeline
//!     .run(vec![ZeItem::new("gaza", "The Gaza Classic", "Eggplant - ham - feta")])
//!     .unwrap();
//! assert_eq!(
//!     out[0].description,
//!     "Topped with Eggplant, feta. Palestinian-inspired: za'atar, roasted eggplant and olive oil."
//! );
//! ```
//!
//! ## Error Handling
//!
//! Text transforms are total and never fail. Everything else returns
//! `Result<T, ZeError>`; store errors name the stage that failed.

pub mod backup;
pub mod config;
pub mod diff;
pub mod errors;
pub mod job;
pub mod log;
pub mod operator;
pub mod operators;
pub mod pipeline;
pub mod record;
pub mod report;
pub mod store;
pub mod text;

pub use backup::{ZeBackup, ZeBackupStyle};
pub use config::{ZeJobConfig, PRESETS};
pub use diff::{diff_items, ZeFieldChange, ZeItemDiff};
pub use errors::{Result, ZeError};
pub use job::{ZeJob, ZeRunSummary};
pub use operator::{execute_operator, ZeOperator};
pub use pipeline::{ZePipeline, ZePipelineBuilder};
pub use record::{ZeField, ZeItem, ZeItemBatch, ZeMetadata};
pub use store::{ZeStore, ZeStoreConfig, ZeTermMatch};
pub use text::{
    filter_terms, reconstruct, substitute_terms, ZeKeywordRule, ZeKeywordTable, ZeReconstructor,
    ZeTerm, ZeTermSet, ZeTheme,
};
