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

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::log::core::ZeLogRecord;
use crate::log::formatters::{ZeJsonFormatter, ZeTextFormatter};

pub trait ZeLogHandler {
    fn handle(&self, record: &ZeLogRecord);

    fn flush(&self) {}
}

fn format_line(record: &ZeLogRecord, json: bool) -> String {
    if json {
        ZeJsonFormatter::format(record)
    } else {
        ZeTextFormatter::format(record)
    }
}

/// Writes lines to stderr.
pub struct ZeStderrHandler {
    json: bool,
}

impl ZeStderrHandler {
    pub fn new(json: bool) -> Self {
        ZeStderrHandler { json }
    }
}

impl ZeLogHandler for ZeStderrHandler {
    fn handle(&self, record: &ZeLogRecord) {
        eprintln!("{}", format_line(record, self.json));
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Appends lines to a file, rotating it by size.
pub struct ZeFileHandler {
    path: PathBuf,
    json: bool,
    max_bytes: Option<u64>,
    backup_count: u32,
    file: Mutex<()>,
}

impl ZeFileHandler {
    pub fn new(
        path: impl Into<PathBuf>,
        json: bool,
        max_bytes: Option<u64>,
        backup_count: u32,
    ) -> Self {
        ZeFileHandler {
            path: path.into(),
            json,
            max_bytes,
            backup_count,
            file: Mutex::new(()),
        }
    }

    fn rotated(path: &Path, index: u32) -> PathBuf {
        let mut name = path.as_os_str().to_owned();
        name.push(format!(".{index}"));
        PathBuf::from(name)
    }

    fn rotate_if_needed(&self) {
        let Some(max_bytes) = self.max_bytes else {
            return;
        };
        match fs::metadata(&self.path) {
            Ok(meta) if meta.len() > max_bytes => {}
            _ => return,
        }
        if self.backup_count == 0 {
            let _ = fs::remove_file(&self.path);
            return;
        }
        // path.N-1 -> path.N, ..., path -> path.1
        for idx in (1..=self.backup_count).rev() {
            let from = if idx == 1 {
                self.path.clone()
            } else {
                Self::rotated(&self.path, idx - 1)
            };
            if from.exists() {
                let _ = fs::rename(&from, Self::rotated(&self.path, idx));
            }
        }
    }
}

impl ZeLogHandler for ZeFileHandler {
    fn handle(&self, record: &ZeLogRecord) {
        let Ok(_guard) = self.file.lock() else {
            return;
        };
        self.rotate_if_needed();
        if let Ok(mut f) = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
        {
            let _ = writeln!(f, "{}", format_line(record, self.json));
        }
    }
}
