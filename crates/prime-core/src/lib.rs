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

//! # Prime Core
//!
//! Foundational crate containing the types and interface contracts shared by
//! the action multiplexer and its collaborators.
//!
//! Nothing in here dispatches events. It only defines what an event looks like
//! ([`EventOccurrence`]), what pushes them ([`EventSource`]), how sources are
//! looked up ([`SourceResolver`]) and the errors those operations can raise.

#![warn(missing_docs)]

pub mod event;
pub mod path;
pub mod source;
pub mod value;

pub use event::{EventKind, EventOccurrence, Tick};
pub use path::{ActionPath, PathError};
pub use source::{EventSource, Listener, ListenerId, ResolveError, SourceResolver};
pub use value::{ActionValue, ReadableValue, ValueError, ValueKind, Vec2};
