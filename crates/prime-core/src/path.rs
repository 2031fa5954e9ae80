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

//! Hierarchical action identifiers of the form `"group/name"`.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Separator between the group and the action name.
pub const SEPARATOR: char = '/';

/// A namespace-scoped action identifier, e.g. `ui/cancel`.
///
/// The group is optional: a bare `"cancel"` parses into a path with no group,
/// which resolvers may match against any group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActionPath {
    group: Option<String>,
    name: String,
}

impl ActionPath {
    /// Creates a path from a group and a name.
    pub fn new(group: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            group: Some(group.into()),
            name: name.into(),
        }
    }

    /// Parses `"group/name"` or `"name"`.
    ///
    /// Only the first separator splits; the rest belongs to the name.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::Empty`] for an empty string and
    /// [`PathError::EmptySegment`] when either side of the separator is empty.
    pub fn parse(raw: &str) -> Result<Self, PathError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(PathError::Empty);
        }
        match raw.split_once(SEPARATOR) {
            Some((group, name)) => {
                if group.is_empty() || name.is_empty() {
                    return Err(PathError::EmptySegment(raw.to_string()));
                }
                Ok(Self::new(group, name))
            }
            None => Ok(Self {
                group: None,
                name: raw.to_string(),
            }),
        }
    }

    /// The group segment, if any.
    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    /// The action name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for ActionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.group {
            Some(group) => write!(f, "{group}{SEPARATOR}{}", self.name),
            None => f.write_str(&self.name),
        }
    }
}

impl FromStr for ActionPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Errors raised by [`ActionPath::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// The path string was empty.
    #[error("action path is empty")]
    Empty,
    /// The group or name segment was empty.
    #[error("action path '{0}' has an empty segment")]
    EmptySegment(String),
}
