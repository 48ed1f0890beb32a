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

//! # Zest Store Module
//!
//! SQLite access for the item table. The store is opened, never created: a
//! missing file is a [`ZeError::MissingResource`]. All writes of a run go
//! through [`ZeStore::apply_changes`], which wraps them in one transaction
//! that is rolled back on the first failure.
//!
//! Table and column names come from configuration, so they are validated as
//! plain identifiers and double-quoted before being spliced into SQL. Values
//! are always bound as parameters.

use std::path::{Path, PathBuf};

use rusqlite::types::ValueRef;
use rusqlite::{params_from_iter, Connection, OpenFlags};
use serde::{Deserialize, Serialize};

use crate::diff::ZeItemDiff;
use crate::errors::{Result, ZeError};
use crate::record::{ZeField, ZeItem, ZeItemBatch};
use crate::text::terms::ZeTermSet;

/// Where the items live inside the database.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZeStoreConfig {
    pub table: String,
    pub id_column: String,
    pub name_column: String,
    pub description_column: String,
}

impl Default for ZeStoreConfig {
    fn default() -> Self {
        Self {
            table: "pizza_types".to_string(),
            id_column: "pizza_type_id".to_string(),
            name_column: "name".to_string(),
            description_column: "ingredients".to_string(),
        }
    }
}

impl ZeStoreConfig {
    /// Checks that every configured name is a plain SQL identifier.
    pub fn validate(&self) -> Result<()> {
        for (what, ident) in [
            ("table", &self.table),
            ("id_column", &self.id_column),
            ("name_column", &self.name_column),
            ("description_column", &self.description_column),
        ] {
            if !is_identifier(ident) {
                return Err(ZeError::validation(format!(
                    "store {what} '{ident}' is not a valid identifier"
                )));
            }
        }
        Ok(())
    }

    fn column(&self, field: ZeField) -> &str {
        match field {
            ZeField::Name => &self.name_column,
            ZeField::Description => &self.description_column,
        }
    }
}

fn is_identifier(ident: &str) -> bool {
    let mut chars = ident.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn quote(ident: &str) -> String {
    format!("\"{ident}\"")
}

/// One field of one row that still contains a banned term.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZeTermMatch {
    pub id: String,
    pub field: ZeField,
    pub value: String,
    pub matches: Vec<String>,
}

/// Handle on the item table of one SQLite file.
#[derive(Debug)]
pub struct ZeStore {
    conn: Connection,
    path: PathBuf,
    config: ZeStoreConfig,
}

impl ZeStore {
    /// Opens an existing store for reading and writing.
    pub fn open(path: impl AsRef<Path>, config: ZeStoreConfig) -> Result<Self> {
        Self::open_with(path.as_ref(), config, OpenFlags::SQLITE_OPEN_READ_WRITE)
    }

    /// Opens an existing store for the read-only verification scan.
    pub fn open_read_only(path: impl AsRef<Path>, config: ZeStoreConfig) -> Result<Self> {
        Self::open_with(path.as_ref(), config, OpenFlags::SQLITE_OPEN_READ_ONLY)
    }

    fn open_with(path: &Path, config: ZeStoreConfig, mode: OpenFlags) -> Result<Self> {
        if !path.is_file() {
            return Err(ZeError::missing(path.display().to_string()));
        }
        config.validate()?;
        let flags = mode | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn = Connection::open_with_flags(path, flags).map_err(ZeError::at_stage("open"))?;
        log::debug!("opened store {}", path.display());
        Ok(Self {
            conn,
            path: path.to_path_buf(),
            config,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> &ZeStoreConfig {
        &self.config
    }

    /// Reads every row ordered by id. NULL text reads as empty; values are
    /// trimmed.
    pub fn load_items(&self) -> Result<ZeItemBatch> {
        let c = &self.config;
        let sql = format!(
            "SELECT {id}, {name}, {desc} FROM {table} ORDER BY {id}",
            id = quote(&c.id_column),
            name = quote(&c.name_column),
            desc = quote(&c.description_column),
            table = quote(&c.table),
        );
        let mut stmt = self.conn.prepare(&sql).map_err(ZeError::at_stage("load"))?;
        let rows = stmt
            .query_map([], |row| {
                Ok(ZeItem::new(
                    text_of(row.get_ref(0)?),
                    text_of(row.get_ref(1)?),
                    text_of(row.get_ref(2)?),
                ))
            })
            .map_err(ZeError::at_stage("load"))?;
        let items = rows
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(ZeError::at_stage("load"))?;
        log::debug!("loaded {} items from {}", items.len(), c.table);
        Ok(items)
    }

    /// Writes every diff inside one transaction and returns the number of
    /// rows updated. Nothing is committed unless every UPDATE hits exactly
    /// its row.
    pub fn apply_changes(&mut self, diffs: &[ZeItemDiff]) -> Result<usize> {
        let tx = self
            .conn
            .transaction()
            .map_err(ZeError::at_stage("begin"))?;
        let mut updated = 0;
        for diff in diffs {
            if diff.changes.is_empty() {
                continue;
            }
            let mut assignments = Vec::with_capacity(diff.changes.len());
            let mut values = Vec::with_capacity(diff.changes.len() + 1);
            for change in &diff.changes {
                if change.after.trim().is_empty() {
                    return Err(ZeError::store(
                        "update",
                        format!(
                            "refusing to write an empty {} for '{}'",
                            change.field.as_str(),
                            diff.id
                        ),
                    ));
                }
                assignments.push(format!(
                    "{} = ?{}",
                    quote(self.config.column(change.field)),
                    values.len() + 1
                ));
                values.push(change.after.as_str());
            }
            values.push(diff.id.as_str());
            let sql = format!(
                "UPDATE {} SET {} WHERE {} = ?{}",
                quote(&self.config.table),
                assignments.join(", "),
                quote(&self.config.id_column),
                values.len()
            );
            let touched = tx
                .execute(&sql, params_from_iter(values.iter()))
                .map_err(|err| {
                    ZeError::store("update", format!("item '{}': {err}", diff.id))
                })?;
            if touched != 1 {
                return Err(ZeError::store(
                    "update",
                    format!("item '{}' matched {touched} rows", diff.id),
                ));
            }
            updated += 1;
        }
        tx.commit().map_err(ZeError::at_stage("commit"))?;
        Ok(updated)
    }

    /// Read-only scan for rows whose name or description still matches any
    /// of `terms`.
    pub fn find_term_matches(&self, terms: &ZeTermSet) -> Result<Vec<ZeTermMatch>> {
        let items = self.load_items().map_err(|err| match err {
            ZeError::Store { message, .. } => ZeError::store("verify", message),
            other => other,
        })?;
        let mut found = Vec::new();
        for item in &items {
            for field in [ZeField::Name, ZeField::Description] {
                let value = field.get(item);
                let matches = terms.find_all(value);
                if !matches.is_empty() {
                    found.push(ZeTermMatch {
                        id: item.id.clone(),
                        field,
                        value: value.to_string(),
                        matches,
                    });
                }
            }
        }
        Ok(found)
    }
}

fn text_of(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Null => String::new(),
        ValueRef::Integer(v) => v.to_string(),
        ValueRef::Real(v) => v.to_string(),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
            String::from_utf8_lossy(bytes).trim().to_string()
        }
    }
}
