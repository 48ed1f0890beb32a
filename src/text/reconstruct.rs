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

//! # Description Reconstructor
//!
//! Rebuilds a description from whatever was authored before, as a fixed
//! sequence of pure transforms:
//!
//! 1. [`ZeTheme::strip`]: drop a previously injected theme sentence
//! 2. [`normalize_separators`]: dashes to commas, comma runs and spacing
//! 3. [`extract_content`]: `Topped with ...`, then `<name> pizza` prefix, then
//!    the whole text
//! 4. [`ZeKeywordTable::suggest`]: first keyword contained in the name
//! 5. [`strip_self_reference`]: remove the item's own name from the content
//! 6. [`reassemble`]: `Topped with <content>.` + `<Theme>-inspired: <suggestion>.`
//! 7. [`finish_sentences`]: final punctuation pass
//!
//! The content fragment is tidied to a fixed point before reassembly, and the
//! theme label is written verbatim, so reconstructing an already
//! reconstructed description returns it unchanged.
//!
//! ```rust
//! use zest::text::keywords::ZeKeywordTable;
//! use zest::text::reconstruct::reconstruct;
//!
//! let table = ZeKeywordTable::builtin();
//! let out = reconstruct(
//!     "The Farmers Market",
//!     "Farmers Market pizza. Topped with roasted vegetables and herbs.",
//!     &table,
//! );
//! assert_eq!(
//!     out,
//!     "Topped with roasted vegetables and herbs. Palestinian-inspired: \
//!      roasted market vegetables, herbed labneh, za'atar and a tahini drizzle."
//! );
//! ```

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::text::keywords::ZeKeywordTable;
use crate::text::punctuation::{
    default_if_empty, finish_sentences, normalize_separators, tidy_fragment,
};
use crate::text::terms::{filter_terms, ZeTermSet};
use crate::text::theme::ZeTheme;

/// Written when a description would otherwise come out empty.
pub const FALLBACK_DESCRIPTION: &str = "Delicious toppings.";

/// Passes over the content before giving up on reaching a fixed point.
const MAX_CONTENT_PASSES: usize = 8;

fn topped_with() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    CELL.get_or_init(|| Regex::new(r"(?i)\btopped with[\s,:]+(.+?)(?:\.\s|\.?$)").unwrap())
}

fn leading_joiners() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    CELL.get_or_init(|| Regex::new(r"^[:\-\s,]+").unwrap())
}

/// Which extraction strategy produced the content.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeExtractStrategy {
    /// An explicit `Topped with <X>` fragment.
    ToppedWith,
    /// Text after a leading `<name> pizza` prefix.
    NamePrefix,
    /// The whole normalized text.
    WholeText,
}

impl ZeExtractStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ZeExtractStrategy::ToppedWith => "topped_with",
            ZeExtractStrategy::NamePrefix => "name_prefix",
            ZeExtractStrategy::WholeText => "whole_text",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ZeExtraction {
    pub content: String,
    pub strategy: ZeExtractStrategy,
}

/// Everything the reconstructor decided for one description.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ZeReconstruction {
    pub description: String,
    pub content: String,
    pub suggestion: String,
    pub strategy: ZeExtractStrategy,
}

/// Pulls the underlying content out of a separator-normalized description.
///
/// `Topped with <X>` reads up to the next sentence-ending period (a period
/// followed by whitespace or the end of the text). A single leading or
/// trailing period is dropped from the result.
pub fn extract_content(normalized: &str, name: &str) -> ZeExtraction {
    let (content, strategy) = if let Some(caps) = topped_with().captures(normalized) {
        let fragment = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
        (fragment.trim().to_string(), ZeExtractStrategy::ToppedWith)
    } else {
        match strip_name_prefix(normalized, name) {
            Some(rest) => (rest, ZeExtractStrategy::NamePrefix),
            None => (normalized.trim().to_string(), ZeExtractStrategy::WholeText),
        }
    };
    ZeExtraction {
        content: trim_one_period(&content),
        strategy,
    }
}

fn strip_name_prefix(text: &str, name: &str) -> Option<String> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    let prefix = Regex::new(&format!(r"(?i)^{}\s*pizza\.?", regex::escape(name))).ok()?;
    let found = prefix.find(text)?;
    Some(text[found.end()..].trim().to_string())
}

fn trim_one_period(text: &str) -> String {
    let text = text.trim();
    let text = text.strip_prefix('.').unwrap_or(text);
    let text = text.strip_suffix('.').unwrap_or(text);
    text.trim().to_string()
}

/// Removes every case-insensitive occurrence of `name` (and of its
/// separator-normalized form) from `content`, then trims the colon, dash,
/// comma and space left at the front.
pub fn strip_self_reference(content: &str, name: &str) -> String {
    let name = name.trim();
    if name.is_empty() {
        return content.trim().to_string();
    }
    let mut forms = vec![name.to_string()];
    let normalized = normalize_separators(name);
    if !normalized.is_empty() && normalized != name {
        forms.push(normalized);
    }
    let source = forms
        .iter()
        .map(|form| regex::escape(form))
        .collect::<Vec<_>>()
        .join("|");
    let pattern = match Regex::new(&format!("(?i)(?:{source})")) {
        Ok(pattern) => pattern,
        Err(err) => {
            log::debug!("name '{name}' not usable as a pattern: {err}");
            return content.trim().to_string();
        }
    };
    let mut current = content.to_string();
    while pattern.is_match(&current) {
        current = pattern.replace_all(&current, " ").into_owned();
    }
    leading_joiners().replace(current.trim(), "").trim().to_string()
}

/// Joins the content sentence (when there is content) and the theme sentence.
pub fn reassemble(content: &str, theme: &ZeTheme, suggestion: &str) -> String {
    let mut sentences = Vec::with_capacity(2);
    if !content.is_empty() {
        sentences.push(format!("Topped with {content}."));
    }
    sentences.push(theme.sentence(suggestion));
    sentences.join(" ")
}

/// Reconstructs descriptions against a theme and a keyword table.
///
/// The table is passed in rather than read from a global so callers and
/// tests can supply their own.
#[derive(Clone, Debug, Default)]
pub struct ZeReconstructor {
    theme: ZeTheme,
    table: ZeKeywordTable,
    banned: Option<ZeTermSet>,
}

impl ZeReconstructor {
    pub fn new(theme: ZeTheme, table: ZeKeywordTable) -> Self {
        Self {
            theme,
            table,
            banned: None,
        }
    }

    /// Runs the Term Filter over the description before reconstruction.
    pub fn with_banned_terms(mut self, terms: ZeTermSet) -> Self {
        self.banned = Some(terms);
        self
    }

    pub fn theme(&self) -> &ZeTheme {
        &self.theme
    }

    pub fn table(&self) -> &ZeKeywordTable {
        &self.table
    }

    pub fn reconstruct(&self, name: &str, description: &str) -> String {
        self.reconstruct_detailed(name, description).description
    }

    pub fn reconstruct_detailed(&self, name: &str, description: &str) -> ZeReconstruction {
        let name = name.trim();
        let filtered = match &self.banned {
            Some(terms) => filter_terms(description, terms).text,
            None => description.to_string(),
        };

        let stripped = self.theme.strip(&filtered);
        let normalized = normalize_separators(&stripped);
        let extraction = extract_content(&normalized, name);
        let suggestion = tidy_fragment(self.table.suggest(name));
        let content = self.settle_content(&extraction.content, name);

        let assembled = reassemble(&content, &self.theme, &suggestion);
        let description = default_if_empty(finish_sentences(&assembled), FALLBACK_DESCRIPTION);

        ZeReconstruction {
            description,
            content,
            suggestion,
            strategy: extraction.strategy,
        }
    }

    /// Self-reference stripping, marker stripping and tidying, repeated until
    /// the content stops changing.
    fn settle_content(&self, content: &str, name: &str) -> String {
        let mut current = content.to_string();
        for _ in 0..MAX_CONTENT_PASSES {
            let next = tidy_fragment(&self.theme.strip(&strip_self_reference(&current, name)));
            if next == current {
                break;
            }
            current = next;
        }
        current
    }
}

/// Reconstructs one description with the default theme and the given table.
pub fn reconstruct(name: &str, description: &str, table: &ZeKeywordTable) -> String {
    ZeReconstructor::new(ZeTheme::builtin(), table.clone()).reconstruct(name, description)
}
