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

//! A path-indexed set of [`InputAction`]s that resolves sources by path.

use crate::action::InputAction;
use crate::clock::FrameClock;
use crate::definition::ActionMapDefinition;
use prime_core::{ActionPath, EventSource, PathError, ResolveError, SourceResolver, ValueKind};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::rc::Rc;
use thiserror::Error;

/// Errors raised while building an [`ActionMap`].
#[derive(Debug, Error)]
pub enum ActionMapError {
    /// The definition file could not be read.
    #[error("failed to read action map '{path}': {source}")]
    Io {
        /// File that failed to load.
        path: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },
    /// The JSON definition could not be parsed.
    #[error("invalid action map definition: {0}")]
    Parse(#[from] serde_json::Error),
    /// An action path was malformed.
    #[error(transparent)]
    InvalidPath(#[from] PathError),
    /// Two actions share the same path.
    #[error("duplicate action '{0}'")]
    Duplicate(String),
}

/// A shared table of actions keyed by `group/name`.
///
/// Clones share the same table, so the host can keep one handle to drive
/// actions while a registry owns another for lookups. Lookups ignore ASCII
/// case.
#[derive(Clone, Default)]
pub struct ActionMap {
    actions: Rc<RefCell<HashMap<String, Rc<InputAction>>>>,
    clock: FrameClock,
}

impl ActionMap {
    /// Creates an empty map whose actions stamp pushes with `clock`.
    pub fn new(clock: FrameClock) -> Self {
        Self {
            actions: Rc::default(),
            clock,
        }
    }

    /// Builds a map from a parsed definition.
    pub fn from_definition(
        definition: &ActionMapDefinition,
        clock: FrameClock,
    ) -> Result<Self, ActionMapError> {
        let map = Self::new(clock);
        for group in &definition.groups {
            for def in &group.actions {
                let path = format!("{}/{}", group.name, def.name);
                let action = map.add_action(&path, def.value)?;
                if !def.enabled {
                    action.disable();
                }
            }
        }
        log::info!("Loaded action map with {} action(s).", map.len());
        Ok(map)
    }

    /// Builds a map from a JSON definition.
    pub fn from_json(json: &str, clock: FrameClock) -> Result<Self, ActionMapError> {
        let definition: ActionMapDefinition = serde_json::from_str(json)?;
        Self::from_definition(&definition, clock)
    }

    /// Builds a map from a JSON definition file.
    pub fn load(path: impl AsRef<Path>, clock: FrameClock) -> Result<Self, ActionMapError> {
        let path = path.as_ref();
        log::info!("Loading action map from '{}'", path.display());
        let json = std::fs::read_to_string(path).map_err(|source| ActionMapError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json, clock)
    }

    /// Adds an action under `path` (`"group/name"`).
    ///
    /// # Errors
    ///
    /// Fails for malformed paths, paths without a group and duplicates.
    pub fn add_action(
        &self,
        path: &str,
        value_kind: ValueKind,
    ) -> Result<Rc<InputAction>, ActionMapError> {
        let parsed = ActionPath::parse(path)?;
        if parsed.group().is_none() {
            return Err(PathError::EmptySegment(path.to_string()).into());
        }

        let key = normalize(&parsed);
        let mut actions = self.actions.borrow_mut();
        if actions.contains_key(&key) {
            return Err(ActionMapError::Duplicate(parsed.to_string()));
        }
        let action = Rc::new(InputAction::new(parsed, value_kind, self.clock.clone()));
        actions.insert(key, Rc::clone(&action));
        Ok(action)
    }

    /// Returns the action registered under `path`, if any.
    pub fn action(&self, path: &str) -> Option<Rc<InputAction>> {
        let parsed = ActionPath::parse(path).ok()?;
        self.find(&parsed)
    }

    /// The clock actions stamp their pushes with.
    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Enables every action.
    pub fn enable_all(&self) {
        self.actions.borrow().values().for_each(|a| a.enable());
    }

    /// Disables every action.
    pub fn disable_all(&self) {
        self.actions.borrow().values().for_each(|a| a.disable());
    }

    /// Number of actions.
    pub fn len(&self) -> usize {
        self.actions.borrow().len()
    }

    /// Returns `true` if the map holds no actions.
    pub fn is_empty(&self) -> bool {
        self.actions.borrow().is_empty()
    }

    /// Exact `group/name` match, or a bare name defined by exactly one group.
    fn find(&self, path: &ActionPath) -> Option<Rc<InputAction>> {
        let actions = self.actions.borrow();
        if path.group().is_some() {
            return actions.get(&normalize(path)).cloned();
        }

        let mut matches = actions
            .values()
            .filter(|a| a.path().name().eq_ignore_ascii_case(path.name()));
        let first = matches.next()?;
        if matches.next().is_some() {
            log::warn!("Action name '{path}' is ambiguous; qualify it with a group");
            return None;
        }
        Some(Rc::clone(first))
    }
}

fn normalize(path: &ActionPath) -> String {
    path.to_string().to_ascii_lowercase()
}

impl SourceResolver for ActionMap {
    fn resolve(&self, path: &ActionPath) -> Result<Rc<dyn EventSource>, ResolveError> {
        match self.find(path) {
            Some(action) => Ok(action as Rc<dyn EventSource>),
            None => Err(ResolveError::not_found(path)),
        }
    }
}

impl fmt::Debug for ActionMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut paths: Vec<String> = self.actions.borrow().keys().cloned().collect();
        paths.sort();
        f.debug_struct("ActionMap")
            .field("actions", &paths)
            .field("tick", &self.clock.now())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ActionMap {
        let map = ActionMap::new(FrameClock::new());
        map.add_action("ui/cancel", ValueKind::Button).unwrap();
        map.add_action("ui/submit", ValueKind::Button).unwrap();
        map.add_action("shortcuts/save", ValueKind::Button).unwrap();
        map.add_action("player/cancel", ValueKind::Button).unwrap();
        map
    }

    #[test]
    fn test_resolves_qualified_path_case_insensitively() {
        let map = sample();
        let action = map.action("UI/Cancel").unwrap();
        assert_eq!(action.path().to_string(), "ui/cancel");
    }

    #[test]
    fn test_resolves_unique_bare_name() {
        let map = sample();
        let path = ActionPath::parse("save").unwrap();
        assert!(map.resolve(&path).is_ok());
    }

    #[test]
    fn test_ambiguous_bare_name_is_not_found() {
        let map = sample();
        let path = ActionPath::parse("cancel").unwrap();
        assert!(matches!(
            map.resolve(&path),
            Err(ResolveError::NotFound { .. })
        ));
    }

    #[test]
    fn test_rejects_duplicates_and_ungrouped_paths() {
        let map = sample();
        assert!(matches!(
            map.add_action("ui/CANCEL", ValueKind::Button),
            Err(ActionMapError::Duplicate(_))
        ));
        assert!(matches!(
            map.add_action("lonely", ValueKind::Button),
            Err(ActionMapError::InvalidPath(_))
        ));
    }

    #[test]
    fn test_clones_share_actions() {
        let map = ActionMap::new(FrameClock::new());
        let view = map.clone();
        map.add_action("ui/cancel", ValueKind::Button).unwrap();

        assert_eq!(view.len(), 1);
        assert!(Rc::ptr_eq(
            &map.action("ui/cancel").unwrap(),
            &view.action("ui/cancel").unwrap()
        ));
    }

    #[test]
    fn test_disable_all_reaches_every_action() {
        let map = sample();
        map.disable_all();
        assert!(!map.action("ui/submit").unwrap().is_enabled());
        map.enable_all();
        assert!(map.action("ui/submit").unwrap().is_enabled());
    }
}
