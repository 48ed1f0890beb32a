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

//! # Zest Error Module
//!
//! This module defines the error types used throughout Zest for consistent
//! error handling and reporting.
//!
//! ## Error Categories
//!
//! - **Io**: Filesystem errors (backup copies, reports, config files)
//! - **MissingResource**: The store file (or another required file) is absent
//! - **Store**: SQLite failures, tagged with the stage that failed
//! - **Validation**: Invalid configuration or parameters
//! - **Operator**: Failures in operator implementations
//! - **Pipeline**: Pipeline orchestration failures
//! - **Serde**: Serialization/deserialization errors
//! - **Internal**: Unexpected internal failures
//!
//! Text transforms never produce errors: degenerate input is recovered with
//! fallbacks inside the transform. Only store-level and configuration errors
//! reach the job orchestrator.

use std::io;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Convenience result type used throughout Zest.
pub type Result<T> = std::result::Result<T, ZeError>;

/// Canonical error enumeration for Zest.
#[derive(Debug, Error, Serialize, Deserialize)]
pub enum ZeError {
    /// Errors originating from filesystem IO.
    #[error("io error: {0}")]
    Io(String),

    /// A required file does not exist.
    #[error("missing resource: {path}")]
    MissingResource { path: String },

    /// Failures raised by the persistent store.
    #[error("store error during '{stage}': {message}")]
    Store { stage: String, message: String },

    /// Validation errors triggered by invalid parameters or inputs.
    #[error("validation error: {message}")]
    Validation { message: String },

    /// Any failure raised by an operator implementation.
    #[error("operator '{operator}' failed: {message}")]
    Operator { operator: String, message: String },

    /// Failures that occur while orchestrating a pipeline.
    #[error("pipeline error at stage '{stage}': {message}")]
    Pipeline { stage: String, message: String },

    /// Wrapper for serde-style serialization issues.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Catch-all variant for unexpected situations.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<io::Error> for ZeError {
    fn from(err: io::Error) -> Self {
        ZeError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ZeError {
    fn from(err: serde_json::Error) -> Self {
        ZeError::Serde(err.to_string())
    }
}

impl From<serde_yaml::Error> for ZeError {
    fn from(err: serde_yaml::Error) -> Self {
        ZeError::Serde(err.to_string())
    }
}

impl From<regex::Error> for ZeError {
    fn from(err: regex::Error) -> Self {
        ZeError::validation(format!("invalid pattern: {err}"))
    }
}

#[cfg(feature = "csv")]
impl From<csv::Error> for ZeError {
    fn from(err: csv::Error) -> Self {
        ZeError::Io(err.to_string())
    }
}

impl ZeError {
    /// Helper to construct simple validation errors.
    pub fn validation<T: Into<String>>(message: T) -> Self {
        ZeError::Validation {
            message: message.into(),
        }
    }

    /// Helper to construct missing-resource errors.
    pub fn missing(path: impl Into<String>) -> Self {
        ZeError::MissingResource { path: path.into() }
    }

    /// Helper to construct store errors tagged with the failing stage.
    pub fn store(stage: impl Into<String>, message: impl Into<String>) -> Self {
        ZeError::Store {
            stage: stage.into(),
            message: message.into(),
        }
    }

    /// Helper to construct operator errors.
    pub fn operator(name: impl Into<String>, message: impl Into<String>) -> Self {
        ZeError::Operator {
            operator: name.into(),
            message: message.into(),
        }
    }

    /// Helper to construct pipeline errors.
    pub fn pipeline(stage: impl Into<String>, message: impl Into<String>) -> Self {
        ZeError::Pipeline {
            stage: stage.into(),
            message: message.into(),
        }
    }

    /// Helper to construct internal errors.
    pub fn internal<T: Into<String>>(message: T) -> Self {
        ZeError::Internal(message.into())
    }

    /// Returns a closure that maps a rusqlite error into a store error for `stage`.
    pub fn at_stage(stage: &'static str) -> impl Fn(rusqlite::Error) -> ZeError {
        move |err| ZeError::store(stage, err.to_string())
    }
}
