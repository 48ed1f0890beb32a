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

//! Pre-run copy of the store file.
//!
//! The backup is written next to the store before the transaction begins and
//! is never read back by Zest. It is checked against the source with a
//! blake3 digest so a truncated copy fails the run before any mutation.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ZeError};

/// How the backup file is named.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeBackupStyle {
    /// `<file>.<operation>.<timestamp>.bak`
    #[default]
    Timestamped,
    /// `<file>.bak`, overwritten on every run.
    Fixed,
    Disabled,
}

/// A backup that was written and verified.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZeBackup {
    pub path: PathBuf,
    pub bytes: u64,
    pub digest: String,
}

/// Backup path for `store`, or `None` when backups are disabled.
///
/// The timestamp is the RFC 3339 UTC time in milliseconds with `:` and `.`
/// replaced by `-`, e.g. `pizza.sqlite.remove-ham-pork.2024-05-01T10-20-30-123Z.bak`.
pub fn backup_path(
    store: &Path,
    style: ZeBackupStyle,
    operation: &str,
    now: DateTime<Utc>,
) -> Option<PathBuf> {
    let file = store.file_name()?.to_string_lossy().into_owned();
    let name = match style {
        ZeBackupStyle::Disabled => return None,
        ZeBackupStyle::Fixed => format!("{file}.bak"),
        ZeBackupStyle::Timestamped => {
            let stamp = now
                .to_rfc3339_opts(SecondsFormat::Millis, true)
                .replace([':', '.'], "-");
            format!("{file}.{operation}.{stamp}.bak")
        }
    };
    Some(store.with_file_name(name))
}

fn digest_file(path: &Path) -> Result<blake3::Hash> {
    let mut hasher = blake3::Hasher::new();
    let mut file = fs::File::open(path)?;
    io::copy(&mut file, &mut hasher)?;
    Ok(hasher.finalize())
}

/// Copies `store` to its backup path and verifies the copy.
pub fn create_backup(
    store: &Path,
    style: ZeBackupStyle,
    operation: &str,
) -> Result<Option<ZeBackup>> {
    if !store.is_file() {
        return Err(ZeError::missing(store.display().to_string()));
    }
    let Some(target) = backup_path(store, style, operation, Utc::now()) else {
        return Ok(None);
    };
    let bytes = fs::copy(store, &target)
        .map_err(|err| ZeError::Io(format!("backup to {}: {err}", target.display())))?;
    let source = digest_file(store)?;
    let copy = digest_file(&target)?;
    if source != copy {
        return Err(ZeError::Io(format!(
            "backup {} does not match {}",
            target.display(),
            store.display()
        )));
    }
    log::info!("backup created at {}", target.display());
    Ok(Some(ZeBackup {
        path: target,
        bytes,
        digest: source.to_hex().to_string(),
    }))
}
