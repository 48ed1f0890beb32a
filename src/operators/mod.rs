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

//! # Operators Module
//!
//! The pipeline steps bundled with Zest. Each one is created from a JSON
//! config by a factory function and registered by name in
//! [`ZePipelineBuilder::with_defaults`](crate::pipeline::ZePipelineBuilder::with_defaults).
//!
//! ## Operator Catalog
//!
//! - **terms.remove**: banned-term removal with orphan punctuation cleanup
//! - **terms.substitute**: whole-word term substitution (idempotent)
//! - **description.reconstruct**: the Description Reconstructor
//! - **descriptions.assign**: fixed descriptions keyed by item id

pub mod assign;
pub mod reconstruct;
pub mod terms;
