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

use chrono::SecondsFormat;

use crate::log::core::ZeLogRecord;

pub struct ZeJsonFormatter;

impl ZeJsonFormatter {
    pub fn format(record: &ZeLogRecord) -> String {
        record.to_json().to_string()
    }
}

pub struct ZeTextFormatter;

impl ZeTextFormatter {
    /// `2024-05-01T10:20:30.123Z INFO  zest::job: message`
    pub fn format(record: &ZeLogRecord) -> String {
        format!(
            "{} {:<5} {}: {}",
            record
                .timestamp
                .to_rfc3339_opts(SecondsFormat::Millis, true),
            record.level.as_str(),
            record.target,
            record.message
        )
    }
}
