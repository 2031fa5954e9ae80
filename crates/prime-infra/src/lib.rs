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

//! # Prime Infra
//!
//! Concrete implementations of the collaborators `prime-actions` consumes:
//!
//! - [`FrameClock`]: the host's tick counter.
//! - [`InputAction`]: an in-memory [`EventSource`](prime_core::EventSource)
//!   driven by the host (or by a device layer translating raw input).
//! - [`ActionMap`]: a [`SourceResolver`](prime_core::SourceResolver) over a
//!   set of actions, buildable from a JSON definition.

#![warn(missing_docs)]

pub mod action;
pub mod action_map;
pub mod clock;
pub mod definition;

pub use action::InputAction;
pub use action_map::{ActionMap, ActionMapError};
pub use clock::FrameClock;
pub use definition::{ActionDefinition, ActionMapDefinition, GroupDefinition};
