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

//! Event kinds, ticks and the occurrence snapshot handed to subscribers.
//!
//! An event source exposes three independent notification channels, one per
//! [`EventKind`]. Every push on any channel produces an [`EventOccurrence`]
//! stamped with the [`Tick`] of the host frame it happened in.

mod occurrence;

pub use self::occurrence::EventOccurrence;

use std::fmt;

/// One of the three independent notification channels of an event source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    /// The interaction began (e.g. a key went down).
    Started,
    /// The interaction completed and the action fired.
    Performed,
    /// The interaction was aborted or released.
    Canceled,
}

impl EventKind {
    /// Number of event kinds. Useful for per-kind fixed-size tables.
    pub const COUNT: usize = 3;

    /// All event kinds, in declaration order.
    pub const ALL: [EventKind; Self::COUNT] =
        [EventKind::Started, EventKind::Performed, EventKind::Canceled];

    /// Returns a dense index in `0..EventKind::COUNT` for table lookups.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            EventKind::Started => 0,
            EventKind::Performed => 1,
            EventKind::Canceled => 2,
        }
    }

    /// Returns the lowercase name of the kind.
    pub const fn as_str(self) -> &'static str {
        match self {
            EventKind::Started => "started",
            EventKind::Performed => "performed",
            EventKind::Canceled => "canceled",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier of one discrete dispatch cycle of the host's timing loop.
///
/// Ticks are monotonic: the host advances the counter exactly once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Tick(pub u64);

impl Tick {
    /// The first tick.
    pub const ZERO: Tick = Tick(0);

    /// Returns the tick that follows this one.
    #[inline]
    pub const fn next(self) -> Tick {
        Tick(self.0 + 1)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_indices_are_dense() {
        for (expected, kind) in EventKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), expected);
        }
    }

    #[test]
    fn test_tick_next_is_monotonic() {
        let tick = Tick::ZERO.next().next();
        assert_eq!(tick, Tick(2));
        assert!(tick > Tick::ZERO);
        assert_eq!(tick.to_string(), "#2");
    }
}
