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

use serde::Deserialize;
use serde_json::{json, Value};

use crate::errors::{Result, ZeError};
use crate::operator::ZeOperator;
use crate::record::ZeItemBatch;
use crate::text::keywords::{ZeKeywordRule, ZeKeywordTable};
use crate::text::reconstruct::ZeReconstructor;
use crate::text::terms::{ZeTerm, ZeTermSet};
use crate::text::theme::{ZeTheme, ZeThemeConfig};

#[derive(Debug)]
struct _DescriptionReconstruct {
    reconstructor: ZeReconstructor,
}

impl ZeOperator for _DescriptionReconstruct {
    fn name(&self) -> &'static str {
        "description.reconstruct"
    }

    fn apply(&self, mut batch: ZeItemBatch) -> Result<ZeItemBatch> {
        for item in &mut batch {
            let outcome = self
                .reconstructor
                .reconstruct_detailed(&item.name, &item.description);
            log::debug!(
                "reconstructed '{}' via {} extraction",
                item.id,
                outcome.strategy.as_str()
            );
            let metadata = item.metadata_mut();
            metadata.insert("strategy".to_string(), json!(outcome.strategy.as_str()));
            metadata.insert("suggestion".to_string(), json!(outcome.suggestion));
            item.description = outcome.description;
        }
        Ok(batch)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ReconstructConfig {
    #[serde(default)]
    theme: Option<ZeThemeConfig>,
    #[serde(default)]
    keywords: Option<Vec<ZeKeywordRule>>,
    #[serde(default)]
    default_suggestion: Option<String>,
    #[serde(default)]
    banned_terms: Option<Vec<ZeTerm>>,
}

/// Builds `description.reconstruct`. Every key is optional; `null` or `{}`
/// gives the built-in theme and keyword table.
///
/// ```json
/// {"theme": {"label": "Palestinian", "markers": ["Inspired by Palestine:"]},
///  "keywords": [{"keyword": "gaza", "suggestion": "za'atar and olive oil"}],
///  "default_suggestion": "za'atar, sumac and olive oil",
///  "banned_terms": ["ham", "pork"]}
/// ```
pub fn description_reconstruct_factory(
    config: &Value,
) -> Result<Box<dyn ZeOperator + Send + Sync>> {
    let config: ReconstructConfig = match config {
        Value::Null => ReconstructConfig::default(),
        Value::Object(_) => serde_json::from_value(config.clone()).map_err(|err| {
            ZeError::validation(format!("description.reconstruct config invalid: {err}"))
        })?,
        _ => {
            return Err(ZeError::validation(
                "description.reconstruct config must be object",
            ))
        }
    };

    let theme = match &config.theme {
        Some(theme) => ZeTheme::from_config(theme)?,
        None => ZeTheme::builtin(),
    };

    let builtin = ZeKeywordTable::builtin();
    let default_suggestion = config
        .default_suggestion
        .as_deref()
        .map(str::trim)
        .unwrap_or(builtin.default_suggestion());
    if default_suggestion.is_empty() {
        return Err(ZeError::validation(
            "description.reconstruct 'default_suggestion' may not be empty",
        ));
    }
    let rules = config
        .keywords
        .unwrap_or_else(|| builtin.rules().to_vec());
    let table = ZeKeywordTable::new(rules, default_suggestion)?;

    let mut reconstructor = ZeReconstructor::new(theme, table);
    if let Some(terms) = config.banned_terms {
        reconstructor = reconstructor.with_banned_terms(ZeTermSet::new(terms)?);
    }
    Ok(Box::new(_DescriptionReconstruct { reconstructor }))
}
