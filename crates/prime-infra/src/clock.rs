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

//! The host-driven frame counter.

use prime_core::Tick;
use std::cell::Cell;
use std::rc::Rc;

/// A shared, monotonically increasing tick counter.
///
/// Clones share the same counter. The host calls [`advance`](Self::advance)
/// exactly once per frame; sources stamp their pushes with [`now`](Self::now).
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    tick: Rc<Cell<Tick>>,
}

impl FrameClock {
    /// Creates a clock at [`Tick::ZERO`].
    pub fn new() -> Self {
        Self::default()
    }

    /// The current tick.
    pub fn now(&self) -> Tick {
        self.tick.get()
    }

    /// Moves to the next tick and returns it.
    pub fn advance(&self) -> Tick {
        let next = self.tick.get().next();
        self.tick.set(next);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_the_counter() {
        let clock = FrameClock::new();
        let view = clock.clone();

        assert_eq!(clock.advance(), Tick(1));
        assert_eq!(clock.advance(), Tick(2));
        assert_eq!(view.now(), Tick(2));
    }
}
