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

//! # Zest Operator Module
//!
//! Operators are the steps of a Zest pipeline. Each one receives the whole
//! item batch and returns it rewritten. Unlike general record pipelines, a
//! Zest operator must return exactly the items it received, in the same
//! order: the pipeline rewrites rows, it never inserts or deletes them.
//!
//! ```rust
//! use zest::operator::ZeOperator;
//! use zest::record::ZeItemBatch;
//! use zest::errors::Result;
//!
//! #[derive(Debug)]
//! struct UppercaseNames;
//!
//! impl ZeOperator for UppercaseNames {
//!     fn name(&self) -> &'static str {
//!         "names.uppercase"
//!     }
//!
//!     fn apply(&self, mut batch: ZeItemBatch) -> Result<ZeItemBatch> {
//!         for item in &mut batch {
//!             item.name = item.name.to_uppercase();
//!         }
//!         Ok(batch)
//!     }
//! }
//! ```

use crate::errors::{Result, ZeError};
use crate::record::ZeItemBatch;

/// Contract every Zest operator fulfills.
///
/// Operators are stateless and deterministic: the same batch always yields
/// the same output, which is what makes a second run of a job a no-op.
pub trait ZeOperator: std::fmt::Debug {
    /// Unique, human-readable name used for registry lookup, logs and errors.
    fn name(&self) -> &'static str;

    /// Applies the operator to an incoming batch of items.
    fn apply(&self, batch: ZeItemBatch) -> Result<ZeItemBatch>;
}

/// Executes an operator, tagging any error with the operator name.
pub fn execute_operator(operator: &dyn ZeOperator, batch: ZeItemBatch) -> Result<ZeItemBatch> {
    let expected = batch.len();
    let output = operator
        .apply(batch)
        .map_err(|err| ZeError::operator(operator.name(), err.to_string()))?;
    if output.len() != expected {
        return Err(ZeError::operator(
            operator.name(),
            format!("returned {} items for a batch of {expected}", output.len()),
        ));
    }
    Ok(output)
}
