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

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Configuration for [`ZeLogger`](crate::log::core::ZeLogger): threshold,
/// line format and where lines go.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZeLogConfig {
    /// `ERROR`, `WARN`, `INFO`, `DEBUG`, `TRACE` or `OFF`.
    pub default_level: String,
    /// Log to stderr. Stdout is reserved for command output.
    pub console_enabled: bool,
    pub json_format: bool,
    /// Append to this file when set.
    pub file_path: Option<String>,
    /// Size in bytes above which the log file is rotated.
    pub max_bytes: Option<u64>,
    /// Number of rotated files to keep.
    pub backup_count: u32,
}

impl Default for ZeLogConfig {
    fn default() -> Self {
        ZeLogConfig {
            default_level: "INFO".to_string(),
            console_enabled: true,
            json_format: false,
            file_path: None,
            max_bytes: Some(10 * 1024 * 1024),
            backup_count: 3,
        }
    }
}

impl ZeLogConfig {
    /// Parsed threshold; unknown names fall back to `Info`.
    pub fn level_filter(&self) -> LevelFilter {
        match self.default_level.trim().to_ascii_uppercase().as_str() {
            "OFF" => LevelFilter::Off,
            "ERROR" => LevelFilter::Error,
            "WARN" | "WARNING" => LevelFilter::Warn,
            "DEBUG" => LevelFilter::Debug,
            "TRACE" => LevelFilter::Trace,
            _ => LevelFilter::Info,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ZeLogConfigBuilder {
    pub default_level: Option<String>,
    pub console_enabled: Option<bool>,
    pub json_format: Option<bool>,
    pub file_path: Option<String>,
    pub max_bytes: Option<u64>,
    pub backup_count: Option<u32>,
}

impl ZeLogConfigBuilder {
    pub fn build(self) -> ZeLogConfig {
        let base = ZeLogConfig::default();
        ZeLogConfig {
            default_level: self.default_level.unwrap_or(base.default_level),
            console_enabled: self.console_enabled.unwrap_or(base.console_enabled),
            json_format: self.json_format.unwrap_or(base.json_format),
            file_path: self.file_path.or(base.file_path),
            max_bytes: self.max_bytes.or(base.max_bytes),
            backup_count: self.backup_count.unwrap_or(base.backup_count),
        }
    }

    /// Builds from a JSON object; missing or malformed keys keep defaults.
    pub fn from_json(value: &Value) -> ZeLogConfig {
        let builder: ZeLogConfigBuilder =
            serde_json::from_value(value.clone()).unwrap_or_default();
        builder.build()
    }
}
