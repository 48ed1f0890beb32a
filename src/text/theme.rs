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

//! Theme label and the marker phrases that identify a previously injected
//! theme sentence.
//!
//! Stripping a marker removes everything from the marker to the end of the
//! text. Marker phrases are matched loosely: case-insensitive, any
//! whitespace run for a space, optional whitespace before a colon, and any
//! dash-family character, a comma or nothing for a dash.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ZeError};
use crate::text::punctuation::dash_class;

pub const DEFAULT_THEME_LABEL: &str = "Palestinian";

/// Serializable theme settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZeThemeConfig {
    pub label: String,
    /// Extra marker phrases on top of the ones derived from the label.
    #[serde(default)]
    pub markers: Vec<String>,
}

impl Default for ZeThemeConfig {
    fn default() -> Self {
        Self {
            label: DEFAULT_THEME_LABEL.to_string(),
            markers: vec!["Inspired by Palestine:".to_string()],
        }
    }
}

#[derive(Clone, Debug)]
pub struct ZeTheme {
    label: String,
    markers: Vec<String>,
    pattern: Regex,
}

impl ZeTheme {
    /// Theme with the markers derived from `label`: `<label>-inspired:` and
    /// `Inspired by <label> flavors:`.
    pub fn new(label: impl Into<String>) -> Result<Self> {
        Self::from_config(&ZeThemeConfig {
            label: label.into(),
            markers: Vec::new(),
        })
    }

    pub fn from_config(config: &ZeThemeConfig) -> Result<Self> {
        let label = config.label.trim().to_string();
        if label.is_empty() {
            return Err(ZeError::validation("theme label may not be empty"));
        }
        let mut markers = vec![
            format!("{label}-inspired:"),
            format!("Inspired by {label} flavors:"),
        ];
        for marker in &config.markers {
            let marker = marker.trim();
            if marker.is_empty() {
                return Err(ZeError::validation("theme marker may not be empty"));
            }
            if !markers.iter().any(|m| m.eq_ignore_ascii_case(marker)) {
                markers.push(marker.to_string());
            }
        }
        let sources = markers.iter().map(|m| marker_source(m)).collect::<Vec<_>>();
        let pattern = Regex::new(&format!("(?i)(?:{})", sources.join("|")))?;
        Ok(Self {
            label,
            markers,
            pattern,
        })
    }

    /// The default Palestinian theme.
    pub fn builtin() -> Self {
        Self::from_config(&ZeThemeConfig::default()).expect("builtin theme markers are valid")
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn markers(&self) -> &[String] {
        &self.markers
    }

    /// Removes the first marker and everything after it.
    pub fn strip(&self, text: &str) -> String {
        match self.pattern.find(text) {
            Some(found) => text[..found.start()].trim().to_string(),
            None => text.trim().to_string(),
        }
    }

    /// `<label>-inspired: <suggestion>.`
    pub fn sentence(&self, suggestion: &str) -> String {
        format!("{}-inspired: {}.", self.label, suggestion)
    }
}

impl Default for ZeTheme {
    fn default() -> Self {
        Self::builtin()
    }
}

fn marker_source(phrase: &str) -> String {
    let dash = concat!(r"\s*[", dash_class!(), r",]?\s*");
    let mut source = String::new();
    let mut in_space = false;
    for c in phrase.chars() {
        if c.is_whitespace() {
            if !in_space {
                source.push_str(r"\s+");
            }
            in_space = true;
            continue;
        }
        in_space = false;
        match c {
            '-' | '\u{2010}'..='\u{2015}' | '\u{2212}' => source.push_str(dash),
            ':' => source.push_str(r"\s*:"),
            other => source.push_str(&regex::escape(&other.to_string())),
        }
    }
    source
}
