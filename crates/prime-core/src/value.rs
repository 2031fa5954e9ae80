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

//! Typed values carried by actions.
//!
//! Sources store their current state as an [`ActionValue`]. Callers read it
//! back through [`ActionValue::read`] with any type implementing
//! [`ReadableValue`]; an incompatible read surfaces a
//! [`ValueError::TypeMismatch`] instead of a silent default.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Magnitude above which an axis reads as a pressed button.
pub const PRESS_THRESHOLD: f32 = 0.5;

/// A 2-dimensional vector with `f32` components, used for stick and pointer actions.
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    /// The x component of the vector.
    pub x: f32,
    /// The y component of the vector.
    pub y: f32,
}

impl Vec2 {
    /// A vector with all components set to `0.0`.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Creates a new `Vec2` with the specified components.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Calculates the length (magnitude) of the vector.
    #[inline]
    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

/// The shape of value an action produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    /// No value has been produced yet.
    #[default]
    None,
    /// A digital on/off value.
    Button,
    /// A single analog axis.
    Axis,
    /// A two-axis analog value.
    Vector2,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::None => "none",
            ValueKind::Button => "button",
            ValueKind::Axis => "axis",
            ValueKind::Vector2 => "vector2",
        };
        f.write_str(name)
    }
}

/// The current value of an action.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ActionValue {
    /// No value.
    #[default]
    None,
    /// A digital value.
    Button(bool),
    /// An analog value.
    Axis(f32),
    /// A two-axis analog value.
    Vector2(Vec2),
}

impl ActionValue {
    /// Returns the [`ValueKind`] of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            ActionValue::None => ValueKind::None,
            ActionValue::Button(_) => ValueKind::Button,
            ActionValue::Axis(_) => ValueKind::Axis,
            ActionValue::Vector2(_) => ValueKind::Vector2,
        }
    }

    /// Reads the value as `T`.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::TypeMismatch`] when `T` cannot represent this value.
    pub fn read<T: ReadableValue>(&self) -> Result<T, ValueError> {
        T::from_action_value(self).ok_or(ValueError::TypeMismatch {
            expected: T::TYPE_NAME,
            found: self.kind(),
        })
    }
}

/// A Rust type that can be read out of an [`ActionValue`].
pub trait ReadableValue: Sized {
    /// Name reported in [`ValueError::TypeMismatch`].
    const TYPE_NAME: &'static str;

    /// Converts the value, or returns `None` if the shapes are incompatible.
    fn from_action_value(value: &ActionValue) -> Option<Self>;
}

impl ReadableValue for bool {
    const TYPE_NAME: &'static str = "bool";

    fn from_action_value(value: &ActionValue) -> Option<Self> {
        match *value {
            ActionValue::Button(pressed) => Some(pressed),
            ActionValue::Axis(v) => Some(v.abs() > PRESS_THRESHOLD),
            _ => None,
        }
    }
}

impl ReadableValue for f32 {
    const TYPE_NAME: &'static str = "f32";

    fn from_action_value(value: &ActionValue) -> Option<Self> {
        match *value {
            ActionValue::Axis(v) => Some(v),
            ActionValue::Button(pressed) => Some(if pressed { 1.0 } else { 0.0 }),
            _ => None,
        }
    }
}

impl ReadableValue for Vec2 {
    const TYPE_NAME: &'static str = "Vec2";

    fn from_action_value(value: &ActionValue) -> Option<Self> {
        match *value {
            ActionValue::Vector2(v) => Some(v),
            _ => None,
        }
    }
}

/// Errors raised when reading an action value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValueError {
    /// The requested type cannot represent the stored value.
    #[error("type mismatch: cannot read a {found} value as {expected}")]
    TypeMismatch {
        /// Name of the requested Rust type.
        expected: &'static str,
        /// Kind of the value actually stored.
        found: ValueKind,
    },
}
