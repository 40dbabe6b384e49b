// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Serialization context configuration

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::buffer::DEFAULT_CAPACITY;
use crate::command::MAX_COMMANDS;
use crate::error::{ObjectError, Result};

/// Serialization context configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Bytes reserved by new buffers
    pub buffer_capacity: usize,

    /// Child slots of composites built or decoded by the context
    pub composite_capacity: usize,

    /// First value of every id generator (the first id is `start + step`)
    pub id_start: u64,

    /// Id generator increment, must be non-zero
    pub id_step: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            buffer_capacity: DEFAULT_CAPACITY,
            composite_capacity: MAX_COMMANDS,
            id_start: 0,
            id_step: 1,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Parse and validate a JSON document. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| ObjectError::io(path, e))?;
        Self::from_json_str(&json)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.id_step == 0 {
            return Err(ObjectError::Config("id_step must be non-zero".into()));
        }
        if self.composite_capacity == 0 {
            return Err(ObjectError::Config(
                "composite_capacity must be non-zero".into(),
            ));
        }
        Ok(())
    }
}

/// Config builder for fluent API
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    buffer_capacity: Option<usize>,
    composite_capacity: Option<usize>,
    id_start: Option<u64>,
    id_step: Option<u64>,
}

impl ConfigBuilder {
    /// Set initial buffer capacity in bytes
    pub fn buffer_capacity(mut self, bytes: usize) -> Self {
        self.buffer_capacity = Some(bytes);
        self
    }

    /// Set composite child capacity
    pub fn composite_capacity(mut self, slots: usize) -> Self {
        self.composite_capacity = Some(slots);
        self
    }

    /// Set id generator start value
    pub fn id_start(mut self, start: u64) -> Self {
        self.id_start = Some(start);
        self
    }

    /// Set id generator step
    pub fn id_step(mut self, step: u64) -> Self {
        self.id_step = Some(step);
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<Config> {
        let defaults = Config::default();

        let config = Config {
            buffer_capacity: self.buffer_capacity.unwrap_or(defaults.buffer_capacity),
            composite_capacity: self
                .composite_capacity
                .unwrap_or(defaults.composite_capacity),
            id_start: self.id_start.unwrap_or(defaults.id_start),
            id_step: self.id_step.unwrap_or(defaults.id_step),
        };
        config.validate()?;
        Ok(config)
    }
}
