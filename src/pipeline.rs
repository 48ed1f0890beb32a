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

use std::collections::HashMap;

use serde_json::Value;

use crate::errors::{Result, ZeError};
use crate::operator::{execute_operator, ZeOperator};
use crate::record::ZeItemBatch;

pub type OperatorFactory = fn(&Value) -> Result<Box<dyn ZeOperator + Send + Sync>>;

/// Simple linear pipeline composed of sequential operators.
pub struct ZePipeline {
    stages: Vec<Box<dyn ZeOperator + Send + Sync>>,
}

impl ZePipeline {
    /// Constructs a pipeline from a list of operators.
    pub fn new(stages: Vec<Box<dyn ZeOperator + Send + Sync>>) -> Self {
        ZePipeline { stages }
    }

    /// Runs the pipeline, passing the batch through each operator sequentially.
    pub fn run(&self, mut batch: ZeItemBatch) -> Result<ZeItemBatch> {
        for stage in &self.stages {
            batch = execute_operator(stage.as_ref(), batch)?;
        }
        Ok(batch)
    }

    /// Like [`run`](Self::run), reporting each finished stage with its index.
    pub fn run_with_progress(
        &self,
        mut batch: ZeItemBatch,
        progress: impl Fn(&str, usize, usize),
    ) -> Result<ZeItemBatch> {
        let total = self.stages.len();
        for (index, stage) in self.stages.iter().enumerate() {
            batch = execute_operator(stage.as_ref(), batch)?;
            progress(stage.name(), index + 1, total);
        }
        Ok(batch)
    }

    /// Ensures the pipeline contains at least one stage.
    pub fn validate(&self) -> Result<()> {
        if self.stages.is_empty() {
            return Err(ZeError::pipeline("pipeline", "no stages configured"));
        }
        Ok(())
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|stage| stage.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl std::fmt::Debug for ZePipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZePipeline")
            .field("stages", &self.stage_names())
            .finish()
    }
}

/// Builder that knows how to instantiate operators from configuration.
#[derive(Default)]
pub struct ZePipelineBuilder {
    factories: HashMap<String, OperatorFactory>,
}

impl ZePipelineBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        ZePipelineBuilder {
            factories: HashMap::new(),
        }
    }

    /// Creates a builder pre-loaded with the bundled Zest operators.
    pub fn with_defaults() -> Self {
        let mut builder = Self::new();
        builder.register_defaults();
        builder
    }

    /// Registers a factory for the given operator name, replacing any
    /// previous registration.
    pub fn register(&mut self, name: impl Into<String>, factory: OperatorFactory) {
        self.factories.insert(name.into(), factory);
    }

    /// Registers a factory, refusing to replace an existing one.
    pub fn try_register(&mut self, name: impl Into<String>, factory: OperatorFactory) -> Result<()> {
        let name = name.into();
        if self.factories.contains_key(&name) {
            return Err(ZeError::validation(format!(
                "operator '{name}' already registered"
            )));
        }
        self.factories.insert(name, factory);
        Ok(())
    }

    pub fn has_operator(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered operator names, sorted.
    pub fn operator_names(&self) -> Vec<&str> {
        let mut names = self.factories.keys().map(String::as_str).collect::<Vec<_>>();
        names.sort_unstable();
        names
    }

    fn register_defaults(&mut self) {
        // terms
        self.register(
            "terms.remove",
            crate::operators::terms::terms_remove_factory as OperatorFactory,
        );
        self.register(
            "terms.substitute",
            crate::operators::terms::terms_substitute_factory as OperatorFactory,
        );

        // descriptions
        self.register(
            "description.reconstruct",
            crate::operators::reconstruct::description_reconstruct_factory as OperatorFactory,
        );
        self.register(
            "descriptions.assign",
            crate::operators::assign::descriptions_assign_factory as OperatorFactory,
        );
    }

    /// Builds a pipeline from a sequence of configuration steps.
    pub fn build_from_config(&self, steps: &[Value]) -> Result<ZePipeline> {
        let mut stages = Vec::with_capacity(steps.len());
        for (index, step) in steps.iter().enumerate() {
            let object = step.as_object().ok_or_else(|| {
                ZeError::validation(format!("pipeline step #{index} must be an object"))
            })?;

            let operator_name =
                object
                    .get("operator")
                    .and_then(Value::as_str)
                    .ok_or_else(|| {
                        ZeError::validation(format!(
                            "pipeline step #{index} missing string 'operator'"
                        ))
                    })?;

            let factory = self.factories.get(operator_name).ok_or_else(|| {
                ZeError::validation(format!("unknown operator '{operator_name}'"))
            })?;

            let config_value = object.get("config").cloned().unwrap_or(Value::Null);
            let operator = factory(&config_value).map_err(|err| {
                ZeError::pipeline(format!("step #{index} ({operator_name})"), err.to_string())
            })?;
            stages.push(operator);
        }

        let pipeline = ZePipeline::new(stages);
        pipeline.validate()?;
        Ok(pipeline)
    }
}
