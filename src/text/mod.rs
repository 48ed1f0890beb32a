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

//! # Text Module
//!
//! Pure string transforms. Nothing in here touches the store or fails on
//! malformed text.
//!
//! - **punctuation**: separator normalization, orphan cleanup, fallbacks
//! - **terms**: the Term Filter (removal and substitution)
//! - **keywords**: ordered keyword table for thematic suggestions
//! - **theme**: theme label and marker phrases
//! - **reconstruct**: the Description Reconstructor

pub mod keywords;
pub mod punctuation;
pub mod reconstruct;
pub mod terms;
pub mod theme;

pub use keywords::{ZeKeywordRule, ZeKeywordTable, DEFAULT_SUGGESTION};
pub use punctuation::default_if_empty;
pub use reconstruct::{
    reconstruct, ZeExtractStrategy, ZeReconstruction, ZeReconstructor, FALLBACK_DESCRIPTION,
};
pub use terms::{
    filter_terms, substitute_terms, ZeFilterOutcome, ZeSubstitution, ZeSubstitutionRule, ZeTerm,
    ZeTermSet,
};
pub use theme::{ZeTheme, ZeThemeConfig, DEFAULT_THEME_LABEL};
