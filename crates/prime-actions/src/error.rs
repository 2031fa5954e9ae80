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

//! Error types owned by the multiplexer layer.
//!
//! Lookup and value errors live in `prime-core` ([`prime_core::ResolveError`],
//! [`prime_core::ValueError`]) and are returned unchanged.

use prime_core::{ActionPath, EventKind, ListenerId};
use thiserror::Error;

/// An internal bookkeeping mismatch between a multiplexer and its source.
///
/// These are never returned to callers; the multiplexer logs them at `error`
/// level and keeps its own state consistent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    /// The source did not know the relay the multiplexer tried to detach.
    #[error("'{path}': source had no {kind} relay registered as {listener}")]
    UnknownRelay {
        /// Path of the multiplexer.
        path: ActionPath,
        /// Kind being detached.
        kind: EventKind,
        /// The relay id the multiplexer held.
        listener: ListenerId,
    },
    /// A relay was attached for a kind that already had one.
    #[error("'{path}': {kind} relay attached twice")]
    DoubleAttach {
        /// Path of the multiplexer.
        path: ActionPath,
        /// Kind being attached.
        kind: EventKind,
    },
    /// The last subscriber of a kind was removed but no relay was attached.
    #[error("'{path}': {kind} subscribers emptied without an attached relay")]
    MissingRelay {
        /// Path of the multiplexer.
        path: ActionPath,
        /// Kind being detached.
        kind: EventKind,
    },
    /// A relay received an occurrence of another kind.
    #[error("'{path}': {expected} relay received a {received} occurrence")]
    KindMismatch {
        /// Path of the multiplexer.
        path: ActionPath,
        /// Kind the relay was attached for.
        expected: EventKind,
        /// Kind carried by the occurrence.
        received: EventKind,
    },
}

/// Errors raised while loading a [`RegistryConfig`](crate::RegistryConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The JSON document could not be parsed.
    #[error("invalid registry config: {0}")]
    Parse(#[from] serde_json::Error),
}
