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

//! # Term Operators
//!
//! `terms.remove` and `terms.substitute` wrap the Term Filter for use in a
//! pipeline. Both work on a configurable list of fields (default: name and
//! description) and never leave a field empty: an emptied description gets
//! the placeholder, an emptied name gets its original value back.

use serde_json::{json, Value};

use crate::errors::{Result, ZeError};
use crate::operator::ZeOperator;
use crate::record::{ZeField, ZeItemBatch};
use crate::text::punctuation::default_if_empty;
use crate::text::reconstruct::FALLBACK_DESCRIPTION;
use crate::text::terms::{
    filter_terms, substitute_terms, ZeFilterOutcome, ZeSubstitution, ZeSubstitutionRule, ZeTerm,
    ZeTermSet,
};

const DEFAULT_FIELDS: [ZeField; 2] = [ZeField::Name, ZeField::Description];

/// Reads the optional `fields` list of an operator config.
pub(crate) fn parse_fields(
    obj: &serde_json::Map<String, Value>,
    operator: &str,
) -> Result<Vec<ZeField>> {
    let Some(value) = obj.get("fields") else {
        return Ok(DEFAULT_FIELDS.to_vec());
    };
    let list = value
        .as_array()
        .ok_or_else(|| ZeError::validation(format!("{operator} 'fields' must be an array")))?;
    if list.is_empty() {
        return Err(ZeError::validation(format!(
            "{operator} 'fields' may not be empty"
        )));
    }
    let mut fields = Vec::with_capacity(list.len());
    for entry in list {
        let name = entry.as_str().ok_or_else(|| {
            ZeError::validation(format!("{operator} 'fields' entries must be strings"))
        })?;
        let field = ZeField::parse(name)?;
        if !fields.contains(&field) {
            fields.push(field);
        }
    }
    Ok(fields)
}

fn config_object<'a>(
    config: &'a Value,
    operator: &str,
) -> Result<&'a serde_json::Map<String, Value>> {
    config
        .as_object()
        .ok_or_else(|| ZeError::validation(format!("{operator} config must be object")))
}

/// Writes a filtered value back, applying the per-field fallback.
fn settle(field: ZeField, original: &str, outcome: ZeFilterOutcome, fallback: &str) -> String {
    match field {
        ZeField::Name => default_if_empty(outcome.text, original.trim()),
        ZeField::Description => outcome.or_fallback(fallback),
    }
}

#[derive(Debug)]
struct _TermsRemove {
    terms: ZeTermSet,
    fields: Vec<ZeField>,
    fallback: String,
}

impl _TermsRemove {
    fn new(terms: ZeTermSet, fields: Vec<ZeField>, fallback: String) -> Self {
        Self {
            terms,
            fields,
            fallback,
        }
    }
}

impl ZeOperator for _TermsRemove {
    fn name(&self) -> &'static str {
        "terms.remove"
    }

    fn apply(&self, mut batch: ZeItemBatch) -> Result<ZeItemBatch> {
        for item in &mut batch {
            let mut removed = 0;
            for field in &self.fields {
                let original = field.get(item).to_string();
                let outcome = filter_terms(&original, &self.terms);
                removed += outcome.hits;
                let value = settle(*field, &original, outcome, &self.fallback);
                field.set(item, value);
            }
            if removed > 0 {
                item.metadata_mut()
                    .insert("terms_removed".to_string(), json!(removed));
            }
        }
        Ok(batch)
    }
}

/// Builds `terms.remove`.
///
/// ```json
/// {"terms": ["smoked ham", "ham", {"pattern": "pork(?:y)?"}],
///  "fields": ["name", "description"],
///  "fallback": "Delicious toppings."}
/// ```
pub fn terms_remove_factory(config: &Value) -> Result<Box<dyn ZeOperator + Send + Sync>> {
    let obj = config_object(config, "terms.remove")?;
    let terms = obj
        .get("terms")
        .ok_or_else(|| ZeError::validation("terms.remove requires array 'terms'"))?;
    let terms: Vec<ZeTerm> = serde_json::from_value(terms.clone())
        .map_err(|err| ZeError::validation(format!("terms.remove 'terms' invalid: {err}")))?;
    let fields = parse_fields(obj, "terms.remove")?;
    let fallback = obj
        .get("fallback")
        .and_then(Value::as_str)
        .map(str::trim)
        .unwrap_or(FALLBACK_DESCRIPTION);
    if fallback.is_empty() {
        return Err(ZeError::validation("terms.remove 'fallback' may not be empty"));
    }
    Ok(Box::new(_TermsRemove::new(
        ZeTermSet::new(terms)?,
        fields,
        fallback.to_string(),
    )))
}

#[derive(Debug)]
struct _TermsSubstitute {
    rules: Vec<ZeSubstitution>,
    fields: Vec<ZeField>,
}

impl ZeOperator for _TermsSubstitute {
    fn name(&self) -> &'static str {
        "terms.substitute"
    }

    fn apply(&self, mut batch: ZeItemBatch) -> Result<ZeItemBatch> {
        for item in &mut batch {
            let mut replaced = 0;
            for field in &self.fields {
                let original = field.get(item).to_string();
                let outcome = substitute_terms(&original, &self.rules);
                replaced += outcome.hits;
                let value = settle(*field, &original, outcome, FALLBACK_DESCRIPTION);
                field.set(item, value);
            }
            if replaced > 0 {
                item.metadata_mut()
                    .insert("terms_substituted".to_string(), json!(replaced));
            }
        }
        Ok(batch)
    }
}

/// Builds `terms.substitute`.
///
/// ```json
/// {"rules": [{"term": "Bacon", "replacement": "Beef Bacon"}]}
/// ```
pub fn terms_substitute_factory(config: &Value) -> Result<Box<dyn ZeOperator + Send + Sync>> {
    let obj = config_object(config, "terms.substitute")?;
    let rules = obj
        .get("rules")
        .ok_or_else(|| ZeError::validation("terms.substitute requires array 'rules'"))?;
    let rules: Vec<ZeSubstitutionRule> = serde_json::from_value(rules.clone())
        .map_err(|err| ZeError::validation(format!("terms.substitute 'rules' invalid: {err}")))?;
    if rules.is_empty() {
        return Err(ZeError::validation("terms.substitute 'rules' may not be empty"));
    }
    let rules = rules
        .into_iter()
        .map(ZeSubstitution::new)
        .collect::<Result<Vec<_>>>()?;
    let fields = parse_fields(obj, "terms.substitute")?;
    Ok(Box::new(_TermsSubstitute { rules, fields }))
}
