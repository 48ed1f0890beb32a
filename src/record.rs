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

//! # Zest Record Module
//!
//! This module provides the in-memory representation of one catalog row.
//! A [`ZeItem`] is a snapshot read from the store: operators rewrite its
//! `name` and `description`, the differ compares it against the snapshot,
//! and only changed fields are written back.
//!
//! ## Usage Example
//!
//! ```rust
//! use zest::record::{ZeField, ZeItem};
//!
//! let mut item = ZeItem::new("hawaiian", "The Hawaiian", "Pineapple and ham");
//! ZeField::Description.set(&mut item, "Pineapple".to_string());
//! assert_eq!(ZeField::Description.get(&item), "Pineapple");
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{Result, ZeError};

/// Generic metadata map that operators use to annotate an item.
pub type ZeMetadata = Map<String, Value>;

/// One catalog row flowing through a Zest pipeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZeItem {
    /// Stable, immutable key of the row.
    pub id: String,

    /// Short display name. May be empty.
    pub name: String,

    /// Freeform description (the `ingredients` column in the default layout).
    pub description: String,

    /// Annotations left by operators; never written to the store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ZeMetadata>,
}

impl ZeItem {
    /// Constructs an item without metadata.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        ZeItem {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            metadata: None,
        }
    }

    /// Returns a mutable reference to the metadata map, creating it if necessary.
    pub fn metadata_mut(&mut self) -> &mut ZeMetadata {
        self.metadata.get_or_insert_with(ZeMetadata::new)
    }
}

/// Convenience alias for working on batches of items.
pub type ZeItemBatch = Vec<ZeItem>;

/// A writable text column of an item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZeField {
    Name,
    #[serde(alias = "ingredients")]
    Description,
}

impl ZeField {
    /// Parses a field name. `ingredients` is accepted for `description`.
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(ZeField::Name),
            "description" | "ingredients" => Ok(ZeField::Description),
            other => Err(ZeError::validation(format!("unknown field '{other}'"))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ZeField::Name => "name",
            ZeField::Description => "description",
        }
    }

    pub fn get<'a>(&self, item: &'a ZeItem) -> &'a str {
        match self {
            ZeField::Name => &item.name,
            ZeField::Description => &item.description,
        }
    }

    pub fn set(&self, item: &mut ZeItem, value: String) {
        match self {
            ZeField::Name => item.name = value,
            ZeField::Description => item.description = value,
        }
    }
}
