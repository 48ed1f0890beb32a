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

//! # Term Filter
//!
//! Removes or substitutes banned/obsolete terms in a text field and cleans
//! the punctuation left behind.
//!
//! Terms are literals (matched as whole words, case-insensitively, with any
//! whitespace run standing for the spaces inside a multi-word term) or raw
//! regular expressions. All terms of a set are compiled into one alternation,
//! longest literal first, so `smoked ham` is removed as a unit before `ham`.
//!
//! ```rust
//! use zest::text::terms::{filter_terms, ZeTermSet};
//!
//! let terms = ZeTermSet::from_literals(["smoked ham", "ham", "pork"]).unwrap();
//! let out = filter_terms("Pineapple, smoked ham, and cheese.", &terms);
//! assert_eq!(out.text, "Pineapple, and cheese.");
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ZeError};
use crate::text::punctuation::{clean_orphans, default_if_empty};

/// One banned or obsolete term.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ZeTerm {
    /// Whole-word, case-insensitive literal.
    Literal(String),
    /// Raw regular expression, matched case-insensitively.
    Pattern { pattern: String },
}

impl ZeTerm {
    pub fn literal(term: impl Into<String>) -> Self {
        ZeTerm::Literal(term.into())
    }

    pub fn pattern(pattern: impl Into<String>) -> Self {
        ZeTerm::Pattern {
            pattern: pattern.into(),
        }
    }

    /// Human-readable label used in logs and verification output.
    pub fn label(&self) -> &str {
        match self {
            ZeTerm::Literal(term) => term,
            ZeTerm::Pattern { pattern } => pattern,
        }
    }

    fn source(&self) -> Result<String> {
        match self {
            ZeTerm::Literal(term) => literal_source(term),
            ZeTerm::Pattern { pattern } => {
                Regex::new(pattern)?;
                Ok(format!("(?:{pattern})"))
            }
        }
    }

    fn weight(&self) -> usize {
        match self {
            ZeTerm::Literal(term) => term.trim().chars().count(),
            ZeTerm::Pattern { .. } => 0,
        }
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Builds the regex source of a literal term. Word boundaries are only
/// required on sides where the term starts or ends with a word character,
/// so bracketed terms such as `(no pork)` still match.
fn literal_source(term: &str) -> Result<String> {
    let term = term.trim();
    let (first, last) = match (term.chars().next(), term.chars().last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(ZeError::validation("term may not be empty")),
    };
    let body = term
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+");
    let head = if is_word_char(first) { r"\b" } else { "" };
    let tail = if is_word_char(last) { r"\b" } else { "" };
    Ok(format!("{head}{body}{tail}"))
}

/// Compiled, ordered set of terms.
#[derive(Clone, Debug)]
pub struct ZeTermSet {
    terms: Vec<ZeTerm>,
    combined: Regex,
}

impl ZeTermSet {
    /// Compiles a term set. Rejects an empty set and terms that match empty text.
    pub fn new(terms: Vec<ZeTerm>) -> Result<Self> {
        if terms.is_empty() {
            return Err(ZeError::validation("term set may not be empty"));
        }
        let mut ordered = terms.iter().collect::<Vec<_>>();
        ordered.sort_by(|a, b| b.weight().cmp(&a.weight()));
        let sources = ordered
            .iter()
            .map(|term| term.source())
            .collect::<Result<Vec<_>>>()?;
        let combined = Regex::new(&format!("(?i)(?:{})", sources.join("|")))?;
        if combined.is_match("") {
            return Err(ZeError::validation("term set matches empty text"));
        }
        Ok(Self { terms, combined })
    }

    /// Convenience constructor from literal terms.
    pub fn from_literals<I, S>(terms: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(terms.into_iter().map(ZeTerm::literal).collect())
    }

    pub fn terms(&self) -> &[ZeTerm] {
        &self.terms
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.combined.is_match(text)
    }

    /// Every matched fragment of `text`, in order.
    pub fn find_all(&self, text: &str) -> Vec<String> {
        self.combined
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

/// Result of running the Term Filter on one value.
///
/// An empty `text` is how the filter signals that removal consumed the whole
/// value; the caller picks the fallback.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ZeFilterOutcome {
    pub text: String,
    /// Number of matches removed or substituted.
    pub hits: usize,
}

impl ZeFilterOutcome {
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn into_non_empty(self) -> Option<String> {
        if self.text.is_empty() {
            None
        } else {
            Some(self.text)
        }
    }

    /// Returns the filtered text, or `fallback` when it came out empty.
    pub fn or_fallback(self, fallback: &str) -> String {
        default_if_empty(self.text, fallback)
    }
}

/// Removes every whole-word occurrence of any term, then cleans orphaned
/// punctuation.
///
/// Removal repeats until no term matches, so a removal that brings two
/// fragments together into a new match is also caught.
pub fn filter_terms(text: &str, terms: &ZeTermSet) -> ZeFilterOutcome {
    let mut current = text.to_string();
    let mut hits = 0;
    for _ in 0..=text.len() {
        let found = terms.combined.find_iter(&current).count();
        if found == 0 {
            break;
        }
        hits += found;
        let removed = terms.combined.replace_all(&current, " ");
        current = clean_orphans(&removed);
    }
    ZeFilterOutcome {
        text: clean_orphans(&current),
        hits,
    }
}

/// A `term -> replacement` rule as written in configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZeSubstitutionRule {
    pub term: String,
    pub replacement: String,
}

/// Compiled substitution rule.
#[derive(Clone, Debug)]
pub struct ZeSubstitution {
    rule: ZeSubstitutionRule,
    pattern: Regex,
    /// Occurrences of the replacement itself; `None` for an empty replacement.
    applied: Option<Regex>,
}

impl ZeSubstitution {
    pub fn new(rule: ZeSubstitutionRule) -> Result<Self> {
        let pattern = Regex::new(&format!("(?i){}", literal_source(&rule.term)?))?;
        let applied = match rule.replacement.split_whitespace().collect::<Vec<_>>() {
            words if words.is_empty() => None,
            words => {
                let body = words
                    .into_iter()
                    .map(regex::escape)
                    .collect::<Vec<_>>()
                    .join(r"\s+");
                Some(Regex::new(&format!("(?i){body}"))?)
            }
        };
        Ok(Self {
            rule,
            pattern,
            applied,
        })
    }

    pub fn rule(&self) -> &ZeSubstitutionRule {
        &self.rule
    }

    /// Spans of `text` that already hold the replacement (e.g. `Beef Bacon`
    /// for `Bacon`, or `Bacon bits` for `Bacon`).
    fn applied_spans(&self, text: &str) -> Vec<(usize, usize)> {
        match &self.applied {
            Some(applied) => applied
                .find_iter(text)
                .map(|m| (m.start(), m.end()))
                .collect(),
            None => Vec::new(),
        }
    }

    fn apply(&self, text: &str) -> (String, usize) {
        let applied = self.applied_spans(text);
        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        let mut hits = 0;
        for m in self.pattern.find_iter(text) {
            out.push_str(&text[last..m.start()]);
            let inside = applied
                .iter()
                .any(|&(start, end)| start <= m.start() && m.end() <= end);
            if inside {
                out.push_str(m.as_str());
            } else {
                out.push_str(&self.rule.replacement);
                hits += 1;
            }
            last = m.end();
        }
        out.push_str(&text[last..]);
        (out, hits)
    }
}

/// Applies substitution rules in order, then cleans punctuation.
pub fn substitute_terms(text: &str, rules: &[ZeSubstitution]) -> ZeFilterOutcome {
    let mut current = text.to_string();
    let mut hits = 0;
    for rule in rules {
        let (next, count) = rule.apply(&current);
        current = next;
        hits += count;
    }
    ZeFilterOutcome {
        text: clean_orphans(&current),
        hits,
    }
}
