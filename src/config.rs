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

//! # Job Configuration
//!
//! A job is an operation name, a store, a backup style and a list of
//! pipeline steps in the `{"operator": ..., "config": ...}` form the
//! pipeline builder reads. Jobs come from a YAML or JSON file or from one of
//! the built-in presets:
//!
//! | preset                | what it does |
//! |-----------------------|--------------|
//! | `update-descriptions` | reconstructs every description under the theme |
//! | `remove-ham-pork`     | removes ham/pork terms from names and descriptions |
//! | `replace-bacon`       | substitutes `Bacon` with `Beef Bacon` |
//! | `remove-no-pork`      | removes the `(no pork)` annotation from descriptions |
//! | `assign-descriptions` | writes the fixed regional descriptions |
//!
//! ```yaml
//! operation: trim-olives
//! store: ./pizza.sqlite
//! backup: fixed
//! stages:
//!   - operator: terms.remove
//!     config:
//!       terms: ["olives"]
//!       fields: ["description"]
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::backup::ZeBackupStyle;
use crate::errors::{Result, ZeError};
use crate::operators::assign::regional_descriptions;
use crate::store::ZeStoreConfig;
use crate::text::reconstruct::FALLBACK_DESCRIPTION;
use crate::text::terms::ZeTerm;

/// Store file used when neither the config nor the command line names one.
pub const DEFAULT_STORE_PATH: &str = "pizza.sqlite";

fn default_store_path() -> PathBuf {
    PathBuf::from(DEFAULT_STORE_PATH)
}

/// Everything one batch run needs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZeJobConfig {
    /// Names the run in logs, the summary and the backup file.
    pub operation: String,
    #[serde(default = "default_store_path")]
    pub store: PathBuf,
    #[serde(default)]
    pub layout: ZeStoreConfig,
    #[serde(default)]
    pub backup: ZeBackupStyle,
    #[serde(default)]
    pub dry_run: bool,
    /// Change report destination (`.jsonl`, or `.csv` with the `csv` feature).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report: Option<PathBuf>,
    #[serde(alias = "steps", alias = "pipeline")]
    pub stages: Vec<Value>,
    /// Terms that must be gone after the run; checked by a read-only scan
    /// once the transaction has committed.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub verify_terms: Vec<ZeTerm>,
}

impl ZeJobConfig {
    pub fn new(operation: impl Into<String>, stages: Vec<Value>) -> Self {
        Self {
            operation: operation.into(),
            store: default_store_path(),
            layout: ZeStoreConfig::default(),
            backup: ZeBackupStyle::default(),
            dry_run: false,
            report: None,
            stages,
            verify_terms: Vec::new(),
        }
    }

    /// Loads a job from `.yaml`/`.yml` or `.json`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ZeError::missing(path.display().to_string()));
        }
        let source = fs::read_to_string(path)?;
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        let config: ZeJobConfig = match extension.as_str() {
            "yaml" | "yml" => serde_yaml::from_str(&source)?,
            "json" => serde_json::from_str(&source)?,
            other => {
                return Err(ZeError::validation(format!(
                    "unsupported config extension '{other}' (expected yaml, yml or json)"
                )))
            }
        };
        config.validate()?;
        Ok(config)
    }

    /// Built-in job by name.
    pub fn preset(name: &str) -> Result<Self> {
        let config = match name {
            "update-descriptions" => {
                Self::new(name, vec![json!({"operator": "description.reconstruct"})])
            }
            "remove-ham-pork" => {
                let mut config = Self::new(
                    name,
                    vec![json!({
                        "operator": "terms.remove",
                        "config": {
                            "terms": [
                                "smoked ham", "sliced ham", "smoked pork", "sliced pork",
                                "ham", "pork"
                            ],
                            "fields": ["name", "description"],
                            "fallback": FALLBACK_DESCRIPTION,
                        }
                    })],
                );
                config.verify_terms = vec![ZeTerm::literal("ham"), ZeTerm::literal("pork")];
                config
            }
            "replace-bacon" => {
                let mut config = Self::new(
                    name,
                    vec![json!({
                        "operator": "terms.substitute",
                        "config": {
                            "rules": [{"term": "Bacon", "replacement": "Beef Bacon"}],
                            "fields": ["name", "description"],
                        }
                    })],
                );
                config.backup = ZeBackupStyle::Fixed;
                config
            }
            "remove-no-pork" => {
                let mut config = Self::new(
                    name,
                    vec![json!({
                        "operator": "terms.remove",
                        "config": {"terms": ["(no pork)"], "fields": ["description"]}
                    })],
                );
                config.verify_terms = vec![ZeTerm::literal("(no pork)")];
                config
            }
            "assign-descriptions" => Self::new(
                name,
                vec![json!({
                    "operator": "descriptions.assign",
                    "config": {"assignments": regional_descriptions()}
                })],
            ),
            other => {
                return Err(ZeError::validation(format!(
                    "unknown preset '{other}' (known: {})",
                    PRESETS.iter().map(|(n, _)| *n).collect::<Vec<_>>().join(", ")
                )))
            }
        };
        Ok(config)
    }

    /// Structural checks that do not need the operator registry.
    pub fn validate(&self) -> Result<()> {
        if self.operation.trim().is_empty() {
            return Err(ZeError::validation("job 'operation' may not be empty"));
        }
        if self
            .operation
            .chars()
            .any(|c| std::path::is_separator(c) || c.is_whitespace())
        {
            return Err(ZeError::validation(format!(
                "job operation '{}' may not contain spaces or path separators",
                self.operation
            )));
        }
        if self.stages.is_empty() {
            return Err(ZeError::pipeline("pipeline", "no stages configured"));
        }
        self.layout.validate()
    }
}

/// Preset names with a one-line description, in display order.
pub const PRESETS: [(&str, &str); 5] = [
    (
        "update-descriptions",
        "rebuild every description as 'Topped with ... <Theme>-inspired: ...'",
    ),
    (
        "remove-ham-pork",
        "remove ham and pork terms from names and descriptions",
    ),
    ("replace-bacon", "replace 'Bacon' with 'Beef Bacon'"),
    ("remove-no-pork", "remove the '(no pork)' annotation from descriptions"),
    ("assign-descriptions", "write the fixed regional descriptions"),
];
