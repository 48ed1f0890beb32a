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

//! Separator and punctuation normalization shared by the Term Filter and the
//! Description Reconstructor.
//!
//! All functions here are total: any input string, including the empty
//! string, yields a string.

use std::sync::OnceLock;

use regex::Regex;

/// Body of a character class matching the hyphen and every dash-family
/// character (hyphen variants, figure/en/em dashes, horizontal bar, minus,
/// two- and three-em dashes, small and fullwidth hyphen-minus).
macro_rules! dash_class {
    () => {
        r"\-\x{2010}-\x{2015}\x{2212}\x{2E3A}\x{2E3B}\x{FE58}\x{FE63}\x{FF0D}"
    };
}
pub(crate) use dash_class;

macro_rules! static_regex {
    ($name:ident, $pattern:expr) => {
        fn $name() -> &'static Regex {
            static CELL: OnceLock<Regex> = OnceLock::new();
            CELL.get_or_init(|| Regex::new($pattern).unwrap())
        }
    };
}

static_regex!(dashes, concat!("[", dash_class!(), "]"));
static_regex!(whitespace, r"\s+");
static_regex!(comma_run, r"\s*,(?:\s*,)*\s*");
static_regex!(comma_before_period, r"(?:\s*,)+\s*\.");
static_regex!(sentence_break, r"\.+\s+");
static_regex!(space_before_period, r"\s+\.");
static_regex!(empty_brackets, r"\(\s*\)|\[\s*\]");
static_regex!(fragment_edges, r"^[\s,.:;]+|[\s,.:;]+$");
static_regex!(
    orphan_edges,
    concat!(r"^[\s,.", dash_class!(), r"]+|[\s,", dash_class!(), r"]+$")
);

/// Upper bound on repeated passes of a cleanup until it stops changing.
const MAX_PASSES: usize = 16;

fn fixpoint(text: &str, pass: impl Fn(&str) -> String) -> String {
    let mut current = pass(text);
    for _ in 1..MAX_PASSES {
        let next = pass(&current);
        if next == current {
            break;
        }
        current = next;
    }
    current
}

/// Replaces every dash-family character with a comma.
pub fn replace_dashes(text: &str) -> String {
    dashes().replace_all(text, ",").into_owned()
}

/// Collapses runs of whitespace to one space and trims the edges.
pub fn collapse_whitespace(text: &str) -> String {
    whitespace().replace_all(text.trim(), " ").into_owned()
}

/// Dashes become commas, comma runs collapse to one, commas are spaced as
/// `", "`, whitespace collapses and the edges are trimmed.
pub fn normalize_separators(text: &str) -> String {
    let text = replace_dashes(text);
    let text = comma_run().replace_all(&text, ", ");
    collapse_whitespace(&text)
}

/// Canonical form of an extracted fragment (content or suggestion) meant to
/// sit inside one sentence.
///
/// On top of [`normalize_separators`], sentence breaks inside the fragment
/// fold to `", "`, empty brackets disappear and leading/trailing `, . : ;`
/// are dropped. The result is a fixed point: tidying it again returns it
/// unchanged.
pub fn tidy_fragment(text: &str) -> String {
    fixpoint(text, |input| {
        let text = replace_dashes(input);
        let text = empty_brackets().replace_all(&text, "");
        let text = comma_before_period().replace_all(&text, ".");
        let text = sentence_break().replace_all(&text, ", ");
        let text = comma_run().replace_all(&text, ", ");
        let text = collapse_whitespace(&text);
        fragment_edges().replace_all(&text, "").into_owned()
    })
}

/// Cleans punctuation orphaned by term removal: empty brackets, doubled
/// commas, comma before period, space before period, and commas or dashes
/// stranded at either edge. Comma spacing is normalized to `", "`.
pub fn clean_orphans(text: &str) -> String {
    fixpoint(text, |input| {
        let text = collapse_whitespace(input);
        let text = empty_brackets().replace_all(&text, "");
        let text = comma_before_period().replace_all(&text, ".");
        let text = comma_run().replace_all(&text, ", ");
        let text = space_before_period().replace_all(&text, ".");
        let text = orphan_edges().replace_all(&text, "");
        collapse_whitespace(&text)
    })
}

/// Final pass over an assembled description: `", ."` becomes `"."` and the
/// edges are trimmed.
pub fn finish_sentences(text: &str) -> String {
    let text = comma_before_period().replace_all(text, ".");
    collapse_whitespace(&text)
}

/// Returns `value` unless it is empty or whitespace-only, in which case the
/// fallback is returned instead.
pub fn default_if_empty(value: impl Into<String>, fallback: &str) -> String {
    let value = value.into();
    if value.trim().is_empty() {
        fallback.to_string()
    } else {
        value
    }
}
