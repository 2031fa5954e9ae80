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

use super::{EventKind, Tick};
use crate::value::{ActionValue, ReadableValue, ValueError};

/// An immutable snapshot of one push from an event source.
#[derive(Debug, Clone, PartialEq)]
pub struct EventOccurrence {
    kind: EventKind,
    value: ActionValue,
    tick: Tick,
}

impl EventOccurrence {
    /// Creates a new occurrence.
    pub fn new(kind: EventKind, value: ActionValue, tick: Tick) -> Self {
        Self { kind, value, tick }
    }

    /// The channel this occurrence was pushed on.
    #[inline]
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// The tick this occurrence was pushed in.
    #[inline]
    pub fn tick(&self) -> Tick {
        self.tick
    }

    /// The raw value captured at push time.
    #[inline]
    pub fn raw_value(&self) -> &ActionValue {
        &self.value
    }

    /// Reads the captured value as `T`.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::TypeMismatch`] if the value cannot be read as `T`.
    pub fn read_value<T: ReadableValue>(&self) -> Result<T, ValueError> {
        self.value.read::<T>()
    }
}
