// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Registry configuration.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// How far a cancellation reaches within a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CancellationScope {
    /// Cancelling a pass only suppresses the rest of that kind's pass.
    #[default]
    PerKind,
    /// One marker for all kinds: cancelling any pass suppresses every kind
    /// of the same multiplexer for the rest of the tick.
    SharedAcrossKinds,
}

/// Configuration for a [`MultiplexerRegistry`](crate::MultiplexerRegistry).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Cancellation scope applied to every multiplexer the registry creates.
    pub cancellation_scope: CancellationScope,
    /// Log multiplexer creation and teardown at `info` level.
    pub log_lookups: bool,
    /// Detach every relay of every entry when the registry is cleared.
    pub detach_on_clear: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            cancellation_scope: CancellationScope::PerKind,
            log_lookups: true,
            detach_on_clear: true,
        }
    }
}

impl RegistryConfig {
    /// Parses a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}
