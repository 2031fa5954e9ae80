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

//! Path-keyed cache of multiplexers, owned by one host scope.
//!
//! The [`MultiplexerRegistry`] replaces ambient global lookup: the host builds
//! one, shares it (typically as `Rc<MultiplexerRegistry>`) with whatever needs
//! actions, and calls [`clear`](MultiplexerRegistry::clear) when the scope is
//! torn down.

use crate::config::RegistryConfig;
use crate::multiplexer::EventMultiplexer;
use prime_core::{ActionPath, ResolveError, SourceResolver};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

/// Identifies the host scope a registry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(Uuid);

impl ScopeId {
    /// Generates a fresh random scope id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// The underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ScopeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One [`EventMultiplexer`] per event source, created on first lookup.
///
/// Entries are keyed by the path as written. Different spellings that the
/// resolver maps to the same source (`"UI/Cancel"`, `"ui/cancel"`, a unique
/// bare `"cancel"`) share one multiplexer.
///
/// All methods take `&self`, so handlers holding an `Rc` to the registry can
/// look up other actions from inside a dispatch. The registry is `!Send`;
/// hosts driving ticks from several threads must serialize access themselves.
pub struct MultiplexerRegistry {
    resolver: Box<dyn SourceResolver>,
    config: RegistryConfig,
    scope: ScopeId,
    entries: RefCell<HashMap<ActionPath, EventMultiplexer>>,
}

impl MultiplexerRegistry {
    /// Creates a registry with the default configuration.
    pub fn new(resolver: impl SourceResolver + 'static) -> Self {
        Self::with_config(resolver, RegistryConfig::default())
    }

    /// Creates a registry with a custom configuration.
    pub fn with_config(resolver: impl SourceResolver + 'static, config: RegistryConfig) -> Self {
        let scope = ScopeId::new();
        if config.log_lookups {
            log::info!("Multiplexer registry initialized for scope {scope}.");
        }
        Self {
            resolver: Box::new(resolver),
            config,
            scope,
            entries: RefCell::new(HashMap::new()),
        }
    }

    /// The scope this registry belongs to.
    pub fn scope(&self) -> ScopeId {
        self.scope
    }

    /// The configuration this registry was built with.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Returns the multiplexer for `path`, resolving and caching it on first use.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::InvalidPath`] for a malformed path and
    /// [`ResolveError::NotFound`] if the resolver knows no source for it.
    /// Nothing is cached on failure.
    pub fn get_or_create(&self, path: &str) -> Result<EventMultiplexer, ResolveError> {
        let path = ActionPath::parse(path)?;
        self.get_or_create_path(&path)
    }

    /// Same as [`get_or_create`](Self::get_or_create) for an already parsed path.
    pub fn get_or_create_path(&self, path: &ActionPath) -> Result<EventMultiplexer, ResolveError> {
        if let Some(existing) = self.get_path(path) {
            return Ok(existing);
        }

        // No borrow is held while the resolver runs.
        let source = self.resolver.resolve(path).inspect_err(|e| {
            log::warn!("Failed to resolve action '{path}': {e}");
        })?;

        // Spellings that resolve to one source share one multiplexer, so a
        // cancel through either reaches every subscriber.
        let mut entries = self.entries.borrow_mut();
        let multiplexer = match entries.values().find(|m| m.wraps(&source)) {
            Some(existing) => {
                log::debug!("'{path}' aliases multiplexer '{}'", existing.path());
                existing.clone()
            }
            None => {
                if self.config.log_lookups {
                    log::info!("Created multiplexer for '{path}'.");
                }
                EventMultiplexer::new(path.clone(), source, self.config.cancellation_scope)
            }
        };
        entries.insert(path.clone(), multiplexer.clone());
        Ok(multiplexer)
    }

    /// Returns the cached multiplexer for `path` without resolving.
    pub fn get(&self, path: &str) -> Option<EventMultiplexer> {
        ActionPath::parse(path).ok().and_then(|p| self.get_path(&p))
    }

    fn get_path(&self, path: &ActionPath) -> Option<EventMultiplexer> {
        self.entries.borrow().get(path).cloned()
    }

    /// Yields every cached multiplexer that currently has subscribers.
    ///
    /// Works on a snapshot of the entries taken when called, so the registry
    /// stays free for lookups while the iterator is alive. Only the
    /// subscriber check runs lazily, as the iterator advances.
    pub fn list_active(&self) -> impl Iterator<Item = EventMultiplexer> {
        self.distinct()
            .into_iter()
            .filter(EventMultiplexer::has_any_subscribers)
    }

    /// Number of distinct cached multiplexers. Aliased paths count once.
    pub fn len(&self) -> usize {
        self.distinct().len()
    }

    fn distinct(&self) -> Vec<EventMultiplexer> {
        let mut unique: Vec<EventMultiplexer> = Vec::new();
        for multiplexer in self.entries.borrow().values() {
            if !unique.iter().any(|m| m.ptr_eq(multiplexer)) {
                unique.push(multiplexer.clone());
            }
        }
        unique
    }

    /// Returns `true` if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Drops every cached multiplexer. Call once when the owning scope ends.
    ///
    /// With [`RegistryConfig::detach_on_clear`] set, each entry's relays are
    /// detached first so no source keeps calling into a dropped scope.
    pub fn clear(&self) {
        let drained = self.distinct();
        self.entries.borrow_mut().clear();

        if self.config.detach_on_clear {
            for multiplexer in &drained {
                multiplexer.detach_all();
            }
        }

        if self.config.log_lookups {
            log::info!(
                "Cleared {} multiplexer(s) from scope {}.",
                drained.len(),
                self.scope
            );
        }
    }
}

impl fmt::Debug for MultiplexerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultiplexerRegistry")
            .field("scope", &self.scope)
            .field("config", &self.config)
            .field("entries", &self.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prime_core::{ActionValue, EventKind, EventSource, Listener, ListenerId};
    use std::cell::Cell;
    use std::rc::Rc;

    struct NullSource;

    impl EventSource for NullSource {
        fn add_listener(&self, _kind: EventKind, _listener: Listener) -> ListenerId {
            ListenerId(0)
        }

        fn remove_listener(&self, _kind: EventKind, _id: ListenerId) -> bool {
            true
        }

        fn read_raw_value(&self) -> ActionValue {
            ActionValue::None
        }

        fn is_enabled(&self) -> bool {
            true
        }
    }

    fn counting_resolver(
        calls: Rc<Cell<usize>>,
    ) -> impl Fn(&ActionPath) -> Result<Rc<dyn EventSource>, ResolveError> {
        move |path: &ActionPath| {
            calls.set(calls.get() + 1);
            if path.group() == Some("ui") {
                Ok(Rc::new(NullSource) as Rc<dyn EventSource>)
            } else {
                Err(ResolveError::not_found(path))
            }
        }
    }

    #[test]
    fn test_get_or_create_is_idempotent() {
        let calls = Rc::new(Cell::new(0));
        let registry = MultiplexerRegistry::new(counting_resolver(calls.clone()));

        let first = registry.get_or_create("ui/cancel").unwrap();
        let second = registry.get_or_create("ui/cancel").unwrap();

        assert!(first.ptr_eq(&second));
        assert_eq!(calls.get(), 1, "cache hit must not resolve again");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_failed_resolve_is_not_cached() {
        let calls = Rc::new(Cell::new(0));
        let registry = MultiplexerRegistry::new(counting_resolver(calls.clone()));

        let err = registry.get_or_create("game/jump").unwrap_err();
        assert!(matches!(err, ResolveError::NotFound { .. }));
        assert!(registry.get_or_create("game/jump").is_err());

        assert_eq!(calls.get(), 2, "failures are reported, never cached");
        assert!(registry.is_empty());
    }

    #[test]
    fn test_invalid_path_never_reaches_resolver() {
        let calls = Rc::new(Cell::new(0));
        let registry = MultiplexerRegistry::new(counting_resolver(calls.clone()));

        assert!(matches!(
            registry.get_or_create("ui/"),
            Err(ResolveError::InvalidPath(_))
        ));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_get_does_not_create() {
        let registry = MultiplexerRegistry::new(counting_resolver(Rc::default()));
        assert!(registry.get("ui/submit").is_none());

        registry.get_or_create("ui/submit").unwrap();
        assert!(registry.get("ui/submit").is_some());
    }

    #[test]
    fn test_config_is_applied_to_entries() {
        let config = RegistryConfig {
            cancellation_scope: crate::CancellationScope::SharedAcrossKinds,
            log_lookups: false,
            detach_on_clear: true,
        };
        let registry = MultiplexerRegistry::with_config(counting_resolver(Rc::default()), config);

        let mux = registry.get_or_create("ui/cancel").unwrap();
        assert_eq!(
            mux.cancellation_scope(),
            crate::CancellationScope::SharedAcrossKinds
        );
    }

    #[test]
    fn test_scopes_are_unique() {
        let a = MultiplexerRegistry::new(counting_resolver(Rc::default()));
        let b = MultiplexerRegistry::new(counting_resolver(Rc::default()));
        assert_ne!(a.scope(), b.scope());
    }

    #[test]
    fn test_paths_resolving_to_one_source_share_a_multiplexer() {
        let shared: Rc<dyn EventSource> = Rc::new(NullSource);
        let resolver = move |_: &ActionPath| -> Result<Rc<dyn EventSource>, ResolveError> {
            Ok(Rc::clone(&shared))
        };
        let registry = MultiplexerRegistry::new(resolver);

        let lower = registry.get_or_create("ui/cancel").unwrap();
        let upper = registry.get_or_create("UI/Cancel").unwrap();
        let bare = registry.get_or_create("cancel").unwrap();

        assert!(lower.ptr_eq(&upper));
        assert!(lower.ptr_eq(&bare));
        assert_eq!(registry.len(), 1);
        assert!(registry.get("UI/Cancel").is_some());
    }

    #[test]
    fn test_list_active_leaves_registry_free_for_lookups() {
        let registry = MultiplexerRegistry::new(counting_resolver(Rc::default()));
        registry.get_or_create("ui/cancel").unwrap().performed(0, |_| {});

        let mut seen = 0;
        for active in registry.list_active() {
            // Creating entries mid-iteration must not conflict with the walk.
            registry.get_or_create("ui/submit").unwrap();
            assert_eq!(active.path().to_string(), "ui/cancel");
            seen += 1;
        }

        assert_eq!(seen, 1);
        assert_eq!(registry.len(), 2);
    }
}
