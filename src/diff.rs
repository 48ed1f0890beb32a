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

//! Comparison of a processed batch against the snapshot it came from.
//!
//! Only fields whose value actually changed end up in a diff, so a row is
//! written back only when the pipeline changed it. The operators' notes on
//! a changed item travel with its diff into the change report.

use serde::{Deserialize, Serialize};

use crate::errors::{Result, ZeError};
use crate::record::{ZeField, ZeItem, ZeMetadata};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZeFieldChange {
    pub field: ZeField,
    pub before: String,
    pub after: String,
}

/// Changed fields of one item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZeItemDiff {
    pub id: String,
    pub changes: Vec<ZeFieldChange>,
    /// What the operators recorded about the item (strategy, suggestion,
    /// terms removed or substituted).
    #[serde(default, skip_serializing_if = "ZeMetadata::is_empty")]
    pub notes: ZeMetadata,
}

impl ZeItemDiff {
    pub fn value(&self, field: ZeField) -> Option<&str> {
        self.changes
            .iter()
            .find(|change| change.field == field)
            .map(|change| change.after.as_str())
    }
}

/// Diffs `after` against `before`, item by item.
///
/// Both batches must hold the same ids in the same order; anything else
/// means an operator broke the row set and is an error.
pub fn diff_items(before: &[ZeItem], after: &[ZeItem]) -> Result<Vec<ZeItemDiff>> {
    if before.len() != after.len() {
        return Err(ZeError::pipeline(
            "diff",
            format!("{} items in, {} items out", before.len(), after.len()),
        ));
    }
    let mut diffs = Vec::new();
    for (old, new) in before.iter().zip(after) {
        if old.id != new.id {
            return Err(ZeError::pipeline(
                "diff",
                format!("item '{}' came back as '{}'", old.id, new.id),
            ));
        }
        let changes = [ZeField::Name, ZeField::Description]
            .into_iter()
            .filter(|field| field.get(old) != field.get(new))
            .map(|field| ZeFieldChange {
                field,
                before: field.get(old).to_string(),
                after: field.get(new).to_string(),
            })
            .collect::<Vec<_>>();
        if !changes.is_empty() {
            diffs.push(ZeItemDiff {
                id: old.id.clone(),
                changes,
                notes: new.metadata.clone().unwrap_or_default(),
            });
        }
    }
    Ok(diffs)
}
