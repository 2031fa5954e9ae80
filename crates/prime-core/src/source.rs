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

//! Contracts for push-based event sources and the lookup that produces them.
//!
//! An [`EventSource`] is owned outside the multiplexer (typically by an action
//! map). It pushes [`EventOccurrence`]s to whatever listeners are registered
//! for each [`EventKind`] and exposes its current value on demand.
//!
//! Everything here is single-threaded: listeners are `Rc` closures and are
//! invoked synchronously on the thread that drives the push.

use crate::event::{EventKind, EventOccurrence};
use crate::path::{ActionPath, PathError};
use crate::value::ActionValue;
use std::fmt;
use std::rc::Rc;
use thiserror::Error;

/// A callback registered on a source for one event kind.
pub type Listener = Rc<dyn Fn(&EventOccurrence)>;

/// Identifies one listener registration on a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener-{}", self.0)
    }
}

/// A push-based producer of events for one action.
///
/// Implementors must tolerate listeners being added or removed while a push
/// is in progress (a listener may cause its own removal).
pub trait EventSource {
    /// Registers `listener` for `kind` and returns its registration id.
    fn add_listener(&self, kind: EventKind, listener: Listener) -> ListenerId;

    /// Removes a listener previously returned by [`add_listener`](Self::add_listener).
    ///
    /// Returns `false` if no such listener was registered for `kind`.
    fn remove_listener(&self, kind: EventKind, id: ListenerId) -> bool;

    /// Returns the current value of the action.
    fn read_raw_value(&self) -> ActionValue;

    /// Returns `true` if the source currently produces events.
    fn is_enabled(&self) -> bool;

    /// Returns `true` if the source performed during the current tick.
    fn triggered(&self) -> bool {
        false
    }
}

/// Looks up the event source backing an action path.
pub trait SourceResolver {
    /// Resolves `path` to its source.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::NotFound`] if nothing is registered under `path`.
    fn resolve(&self, path: &ActionPath) -> Result<Rc<dyn EventSource>, ResolveError>;
}

impl<F> SourceResolver for F
where
    F: Fn(&ActionPath) -> Result<Rc<dyn EventSource>, ResolveError>,
{
    fn resolve(&self, path: &ActionPath) -> Result<Rc<dyn EventSource>, ResolveError> {
        self(path)
    }
}

/// Errors raised while looking up an event source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// No source is registered under the path.
    #[error("no event source found for '{path}'")]
    NotFound {
        /// The path that failed to resolve.
        path: String,
    },
    /// The path string itself is malformed.
    #[error("invalid action path: {0}")]
    InvalidPath(#[from] PathError),
}

impl ResolveError {
    /// Convenience constructor for a missing path.
    pub fn not_found(path: &ActionPath) -> Self {
        ResolveError::NotFound {
            path: path.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_resolver_reports_not_found() {
        let resolver = |path: &ActionPath| -> Result<Rc<dyn EventSource>, ResolveError> {
            Err(ResolveError::not_found(path))
        };
        let path = ActionPath::new("ui", "cancel");

        let err = match resolver.resolve(&path) {
            Err(err) => err,
            Ok(_) => panic!("resolver should not find anything"),
        };
        assert_eq!(err.to_string(), "no event source found for 'ui/cancel'");
    }

    #[test]
    fn test_path_error_converts() {
        let err: ResolveError = PathError::Empty.into();
        assert!(matches!(err, ResolveError::InvalidPath(PathError::Empty)));
    }
}
