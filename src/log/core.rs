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

use std::sync::OnceLock;

use chrono::{DateTime, SecondsFormat, Utc};
use log::{LevelFilter, Log, Metadata, Record};
use serde_json::{json, Map, Value};

use crate::errors::{Result, ZeError};
use crate::log::config::ZeLogConfig;
use crate::log::handlers::{ZeFileHandler, ZeLogHandler, ZeStderrHandler};

/// One formatted-to-be log line.
#[derive(Clone, Debug)]
pub struct ZeLogRecord {
    pub level: log::Level,
    pub target: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ZeLogRecord {
    pub fn to_json(&self) -> Value {
        let mut data = Map::new();
        data.insert(
            "timestamp".into(),
            json!(self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)),
        );
        data.insert("level".into(), json!(self.level.as_str()));
        data.insert("target".into(), json!(self.target));
        data.insert("message".into(), json!(self.message));
        Value::Object(data)
    }
}

/// `log` backend fanning records out to the configured handlers.
pub struct ZeLogger {
    level: LevelFilter,
    handlers: Vec<Box<dyn ZeLogHandler + Send + Sync>>,
}

static LOGGER: OnceLock<ZeLogger> = OnceLock::new();

impl ZeLogger {
    pub fn new(config: &ZeLogConfig) -> Self {
        let mut handlers: Vec<Box<dyn ZeLogHandler + Send + Sync>> = Vec::new();
        if config.console_enabled {
            handlers.push(Box::new(ZeStderrHandler::new(config.json_format)));
        }
        if let Some(path) = &config.file_path {
            handlers.push(Box::new(ZeFileHandler::new(
                path,
                config.json_format,
                config.max_bytes,
                config.backup_count,
            )));
        }
        ZeLogger {
            level: config.level_filter(),
            handlers,
        }
    }

    /// Installs the global logger. Only the first call in a process succeeds.
    pub fn init(config: &ZeLogConfig) -> Result<()> {
        if LOGGER.get().is_some() {
            return Err(ZeError::internal("logger already initialized"));
        }
        let logger = LOGGER.get_or_init(|| ZeLogger::new(config));
        log::set_logger(logger)
            .map_err(|err| ZeError::internal(format!("cannot install logger: {err}")))?;
        log::set_max_level(logger.level);
        Ok(())
    }
}

impl Log for ZeLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let record = ZeLogRecord {
            level: record.level(),
            target: record.target().to_string(),
            message: record.args().to_string(),
            timestamp: Utc::now(),
        };
        for handler in &self.handlers {
            handler.handle(&record);
        }
    }

    fn flush(&self) {
        for handler in &self.handlers {
            handler.flush();
        }
    }
}
