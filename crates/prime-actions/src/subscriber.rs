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

//! Priority-ordered subscriber storage with cursor-based live iteration.

use prime_core::EventOccurrence;
use std::cmp::Reverse;
use std::fmt;
use std::rc::Rc;

/// A subscriber callback.
pub type Handler = Rc<dyn Fn(&EventOccurrence)>;

/// Identifies one subscription within a multiplexer.
///
/// Ids are handed out in increasing order, so comparing ids compares
/// registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub u64);

/// The sort key of a subscriber: priority descending, then registration order.
///
/// A dispatch keeps the position of the last subscriber it invoked and asks
/// the list for whatever comes next, so entries removed or added in between
/// never cause a skip or a repeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    rank: Reverse<i32>,
    id: SubscriptionId,
}

impl Position {
    fn new(priority: i32, id: SubscriptionId) -> Self {
        Self {
            rank: Reverse(priority),
            id,
        }
    }
}

/// Entry in a [`SubscriberList`].
pub struct Subscriber {
    id: SubscriptionId,
    priority: i32,
    handler: Handler,
}

impl Subscriber {
    /// The subscription id.
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// The priority; higher runs earlier.
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// The callback.
    pub fn handler(&self) -> &Handler {
        &self.handler
    }

    /// The sort position of this entry.
    pub fn position(&self) -> Position {
        Position::new(self.priority, self.id)
    }
}

impl fmt::Debug for Subscriber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscriber")
            .field("id", &self.id)
            .field("priority", &self.priority)
            .finish_non_exhaustive()
    }
}

/// Outcome of [`SubscriberList::remove`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    /// No matching entry was present.
    Absent,
    /// The entry was removed and others remain.
    Removed,
    /// The entry was removed and the list is now empty.
    Emptied,
}

/// Subscribers kept sorted by descending priority, stable on ties.
#[derive(Debug, Default)]
pub struct SubscriberList {
    entries: Vec<Subscriber>,
}

impl SubscriberList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Inserts a subscriber at its sorted position.
    ///
    /// `id` must be greater than every id already inserted for ties to keep
    /// registration order.
    pub fn insert(&mut self, id: SubscriptionId, priority: i32, handler: Handler) {
        let position = Position::new(priority, id);
        let index = self.entries.partition_point(|e| e.position() < position);
        self.entries.insert(
            index,
            Subscriber {
                id,
                priority,
                handler,
            },
        );
    }

    /// Removes the first entry matching `priority` and `id`.
    pub fn remove(&mut self, priority: i32, id: SubscriptionId) -> Removal {
        let Some(index) = self
            .entries
            .iter()
            .position(|e| e.id == id && e.priority == priority)
        else {
            return Removal::Absent;
        };
        self.entries.remove(index);
        if self.entries.is_empty() {
            Removal::Emptied
        } else {
            Removal::Removed
        }
    }

    /// Returns the first entry strictly after `cursor`, or the head when `cursor` is `None`.
    pub fn next_after(&self, cursor: Option<Position>) -> Option<&Subscriber> {
        let index = match cursor {
            None => 0,
            Some(cursor) => self.entries.partition_point(|e| e.position() <= cursor),
        };
        self.entries.get(index)
    }

    /// Returns `true` if an entry with `id` is present.
    pub fn contains(&self, id: SubscriptionId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the list holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates the entries in dispatch order.
    pub fn iter(&self) -> impl Iterator<Item = &Subscriber> {
        self.entries.iter()
    }
}
