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

//! Serializable description of an action map.
//!
//! ```json
//! {
//!   "groups": [
//!     { "name": "ui", "actions": [ { "name": "cancel" }, { "name": "point", "value": "vector2" } ] }
//!   ]
//! }
//! ```

use prime_core::ValueKind;
use serde::{Deserialize, Serialize};

/// A whole action map: a list of named groups.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ActionMapDefinition {
    /// The groups, each contributing `group/name` paths.
    #[serde(default)]
    pub groups: Vec<GroupDefinition>,
}

/// A named group of actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupDefinition {
    /// Group name, the first path segment.
    pub name: String,
    /// Actions in this group.
    #[serde(default)]
    pub actions: Vec<ActionDefinition>,
}

/// One action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionDefinition {
    /// Action name, the second path segment.
    pub name: String,
    /// Value shape; buttons unless stated.
    #[serde(default = "default_value_kind")]
    pub value: ValueKind,
    /// Whether the action starts enabled.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_value_kind() -> ValueKind {
    ValueKind::Button
}

fn default_enabled() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let def: ActionMapDefinition =
            serde_json::from_str(r#"{ "groups": [ { "name": "ui", "actions": [ { "name": "cancel" } ] } ] }"#)
                .unwrap();

        let action = &def.groups[0].actions[0];
        assert_eq!(action.value, ValueKind::Button);
        assert!(action.enabled);
    }
}
