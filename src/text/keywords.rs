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

//! Keyword table mapping item names to thematic suggestion phrases.
//!
//! Lookup is first match in table order, not best match: `ckn` sits before
//! `chicken` on purpose and must keep winning for names containing both.

use serde::{Deserialize, Serialize};

use crate::errors::{Result, ZeError};

/// Suggestion used when no keyword matches the name.
pub const DEFAULT_SUGGESTION: &str = "za'atar, sumac and olive oil, classic Palestinian flavors";

/// Ordered `(keyword, suggestion)` pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZeKeywordRule {
    pub keyword: String,
    pub suggestion: String,
}

impl ZeKeywordRule {
    pub fn new(keyword: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            suggestion: suggestion.into(),
        }
    }
}

/// Immutable ordered keyword table with a default suggestion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ZeKeywordTable {
    rules: Vec<ZeKeywordRule>,
    default_suggestion: String,
}

impl ZeKeywordTable {
    /// Builds a table. Keywords are matched lowercased; an empty keyword
    /// would match every name and is rejected.
    pub fn new(rules: Vec<ZeKeywordRule>, default_suggestion: impl Into<String>) -> Result<Self> {
        let rules = rules
            .into_iter()
            .map(|rule| {
                let keyword = rule.keyword.trim().to_lowercase();
                if keyword.is_empty() {
                    return Err(ZeError::validation(format!(
                        "keyword for suggestion '{}' may not be empty",
                        rule.suggestion
                    )));
                }
                Ok(ZeKeywordRule {
                    keyword,
                    suggestion: rule.suggestion,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            rules,
            default_suggestion: default_suggestion.into(),
        })
    }

    /// The table shipped with Zest.
    pub fn builtin() -> Self {
        let rules = [
            (
                "farmers market",
                "roasted market vegetables, herbed labneh, za'atar and a tahini drizzle",
            ),
            ("musakhan", "sumac-marinated onions, olive oil and roasted chicken"),
            ("gaza", "za'atar, roasted eggplant and olive oil"),
            ("jenin", "herbed labneh, local cheeses and pine nuts"),
            ("hebron", "smoked paprika, red pepper and zataar notes"),
            ("jericho", "sweet chili, citrus and grilled vegetables"),
            ("haifa", "smoked turkey alternative, olives and pineapple"),
            ("bethlehem", "garlic, roasted peppers and local goat cheese"),
            ("old city", "oregano, za'atar and Mediterranean olives"),
            ("sultan", "spiced lamb-style flavors and warm spices"),
            ("mediterr", "olives, feta and roasted tomatoes"),
            ("spinach", "warm spinach, feta and olive oil"),
            ("pepperoni", "smoked paprika and spicy pepper blend"),
            ("ckn", "grilled chicken, garlic and sumac"),
            ("chicken", "grilled chicken, sumac and zataar"),
            ("veggie", "roasted seasonal vegetables and tahini drizzle"),
            ("four_cheese", "local cheeses and a touch of labneh"),
        ];
        Self {
            rules: rules
                .iter()
                .map(|(keyword, suggestion)| ZeKeywordRule::new(*keyword, *suggestion))
                .collect(),
            default_suggestion: DEFAULT_SUGGESTION.to_string(),
        }
    }

    pub fn rules(&self) -> &[ZeKeywordRule] {
        &self.rules
    }

    pub fn default_suggestion(&self) -> &str {
        &self.default_suggestion
    }

    /// First rule whose keyword is a substring of the lowercased name.
    pub fn lookup(&self, name: &str) -> Option<&ZeKeywordRule> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let lower = name.to_lowercase();
        self.rules.iter().find(|rule| lower.contains(&rule.keyword))
    }

    /// Suggestion for `name`, falling back to the default suggestion.
    pub fn suggest(&self, name: &str) -> &str {
        self.lookup(name)
            .map(|rule| rule.suggestion.as_str())
            .unwrap_or(&self.default_suggestion)
    }
}

impl Default for ZeKeywordTable {
    fn default() -> Self {
        Self::builtin()
    }
}
