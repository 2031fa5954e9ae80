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

//! # Prime Actions
//!
//! Fans the pushes of an [`EventSource`](prime_core::EventSource) out to
//! priority-ordered subscribers, with same-tick cancellation.
//!
//! ## Architecture
//!
//! ```text
//!   EventSource ──push(kind, tick)──► relay (one per kind, attached lazily)
//!                                       │
//!                                       ▼
//!                            SubscriberList (priority desc, ties FIFO)
//!                              ├─► handler (priority 10)  ── may call cancel(kind)
//!                              ├─► handler (priority 5)   ── skipped if cancelled
//!                              └─► handler (priority 0)
//! ```
//!
//! - [`EventMultiplexer`] wraps one source and owns one [`SubscriberList`] per
//!   [`EventKind`](prime_core::EventKind).
//! - [`MultiplexerRegistry`] hands out one multiplexer per action path and
//!   drops them all when its owning scope is torn down.
//!
//! All types here are single-threaded (`Rc`/`RefCell`) and `!Send`. Handlers
//! may subscribe, unsubscribe and cancel from inside a dispatch.

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod multiplexer;
pub mod registry;
pub mod subscriber;

pub use config::{CancellationScope, RegistryConfig};
pub use error::{ConfigError, InvariantViolation};
pub use multiplexer::{EventMultiplexer, SubscriptionHandle};
pub use registry::{MultiplexerRegistry, ScopeId};
pub use subscriber::{Handler, Position, Removal, Subscriber, SubscriberList, SubscriptionId};
