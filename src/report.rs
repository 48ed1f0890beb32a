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

//! Change reports: one line per changed field with its value before and
//! after the run.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::diff::ZeItemDiff;
use crate::errors::Result;

/// Output format of a change report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZeReportFormat {
    Jsonl,
    #[cfg(feature = "csv")]
    Csv,
}

impl ZeReportFormat {
    /// `.csv` selects CSV; every other extension gets JSON Lines.
    pub fn detect(path: impl AsRef<Path>) -> Result<Self> {
        let ext = path
            .as_ref()
            .extension()
            .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            #[cfg(feature = "csv")]
            "csv" => Ok(ZeReportFormat::Csv),
            #[cfg(not(feature = "csv"))]
            "csv" => Err(crate::errors::ZeError::validation(
                "csv reports require the 'csv' feature",
            )),
            _ => Ok(ZeReportFormat::Jsonl),
        }
    }
}

/// One changed field of one row. `notes` is the item's operator notes as
/// compact JSON, or empty when there are none.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ZeChangeRecord<'a> {
    pub id: &'a str,
    pub field: &'static str,
    pub before: &'a str,
    pub after: &'a str,
    pub notes: String,
}

/// Flattens diffs into report rows, in diff order.
pub fn change_records(diffs: &[ZeItemDiff]) -> Vec<ZeChangeRecord<'_>> {
    diffs
        .iter()
        .flat_map(|diff| {
            let notes = if diff.notes.is_empty() {
                String::new()
            } else {
                serde_json::Value::Object(diff.notes.clone()).to_string()
            };
            diff.changes.iter().map(move |change| ZeChangeRecord {
                id: &diff.id,
                field: change.field.as_str(),
                before: &change.before,
                after: &change.after,
                notes: notes.clone(),
            })
        })
        .collect()
}

/// Writes the report for `diffs` to `path` and returns the number of rows
/// written.
pub fn write_report(path: impl AsRef<Path>, diffs: &[ZeItemDiff]) -> Result<usize> {
    let path = path.as_ref();
    let records = change_records(diffs);
    match ZeReportFormat::detect(path)? {
        ZeReportFormat::Jsonl => {
            let file = File::create(path)?;
            write_jsonl(BufWriter::new(file), &records)?;
        }
        #[cfg(feature = "csv")]
        ZeReportFormat::Csv => write_csv(path, &records)?,
    }
    log::info!("wrote {} change rows to {}", records.len(), path.display());
    Ok(records.len())
}

/// Writes report rows as JSON Lines to any output supporting [`Write`].
pub fn write_jsonl<W: Write>(mut writer: W, records: &[ZeChangeRecord<'_>]) -> Result<()> {
    for record in records {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(feature = "csv")]
fn write_csv(path: &Path, records: &[ZeChangeRecord<'_>]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(true)
        .from_path(path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}
