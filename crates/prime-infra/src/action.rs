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

//! An in-memory, host-driven event source.

use crate::clock::FrameClock;
use prime_core::{
    ActionPath, ActionValue, EventKind, EventOccurrence, EventSource, Listener, ListenerId, Tick,
    ValueKind, Vec2,
};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// A named action whose phases are driven explicitly.
///
/// Each phase call updates the current value and pushes an occurrence
/// stamped with the clock's current tick to every listener of that kind.
/// Listeners are snapshotted per push, so they may add or remove listeners
/// (including themselves) while being notified.
pub struct InputAction {
    path: ActionPath,
    value_kind: ValueKind,
    clock: FrameClock,
    value: Cell<ActionValue>,
    enabled: Cell<bool>,
    last_performed: Cell<Option<Tick>>,
    listeners: RefCell<[Vec<(ListenerId, Listener)>; EventKind::COUNT]>,
    next_listener: Cell<u64>,
}

impl InputAction {
    /// Creates an enabled action at rest.
    pub fn new(path: ActionPath, value_kind: ValueKind, clock: FrameClock) -> Self {
        Self {
            path,
            value_kind,
            clock,
            value: Cell::new(rest_value(value_kind)),
            enabled: Cell::new(true),
            last_performed: Cell::new(None),
            listeners: RefCell::new(Default::default()),
            next_listener: Cell::new(0),
        }
    }

    /// The action's path.
    pub fn path(&self) -> &ActionPath {
        &self.path
    }

    /// The shape of value this action produces.
    pub fn value_kind(&self) -> ValueKind {
        self.value_kind
    }

    /// Enables the action.
    pub fn enable(&self) {
        self.enabled.set(true);
    }

    /// Disables the action. Disabled actions push nothing.
    pub fn disable(&self) {
        self.enabled.set(false);
    }

    /// Begins an interaction with `value` and pushes [`EventKind::Started`].
    pub fn start(&self, value: ActionValue) {
        self.push(EventKind::Started, value);
    }

    /// Completes an interaction with `value` and pushes [`EventKind::Performed`].
    pub fn perform(&self, value: ActionValue) {
        if self.push(EventKind::Performed, value) {
            self.last_performed.set(Some(self.clock.now()));
        }
    }

    /// Ends the interaction, resets the value to rest and pushes [`EventKind::Canceled`].
    pub fn cancel(&self) {
        self.push(EventKind::Canceled, rest_value(self.value_kind));
    }

    /// Convenience for a button press: `start` then `perform` with `Button(true)`.
    pub fn press(&self) {
        self.start(ActionValue::Button(true));
        self.perform(ActionValue::Button(true));
    }

    /// Number of listeners registered for `kind`.
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners.borrow()[kind.index()].len()
    }

    fn push(&self, kind: EventKind, value: ActionValue) -> bool {
        if !self.enabled.get() {
            log::trace!("Dropping {kind} push on disabled action '{}'", self.path);
            return false;
        }
        if value.kind() != self.value_kind && value.kind() != ValueKind::None {
            log::warn!(
                "Action '{}' expects {} values but was given {}",
                self.path,
                self.value_kind,
                value.kind()
            );
        }

        self.value.set(value);
        let occurrence = EventOccurrence::new(kind, value, self.clock.now());
        let snapshot: Vec<Listener> = self.listeners.borrow()[kind.index()]
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in snapshot {
            listener(&occurrence);
        }
        true
    }
}

/// The value an action holds when nothing is actuated.
fn rest_value(kind: ValueKind) -> ActionValue {
    match kind {
        ValueKind::None => ActionValue::None,
        ValueKind::Button => ActionValue::Button(false),
        ValueKind::Axis => ActionValue::Axis(0.0),
        ValueKind::Vector2 => ActionValue::Vector2(Vec2::ZERO),
    }
}

impl EventSource for InputAction {
    fn add_listener(&self, kind: EventKind, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_listener.get());
        self.next_listener.set(id.0 + 1);
        self.listeners.borrow_mut()[kind.index()].push((id, listener));
        id
    }

    fn remove_listener(&self, kind: EventKind, id: ListenerId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let list = &mut listeners[kind.index()];
        match list.iter().position(|(existing, _)| *existing == id) {
            Some(index) => {
                list.remove(index);
                true
            }
            None => false,
        }
    }

    fn read_raw_value(&self) -> ActionValue {
        self.value.get()
    }

    fn is_enabled(&self) -> bool {
        self.enabled.get()
    }

    fn triggered(&self) -> bool {
        self.last_performed.get() == Some(self.clock.now())
    }
}

impl fmt::Debug for InputAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputAction")
            .field("path", &self.path)
            .field("value_kind", &self.value_kind)
            .field("value", &self.value.get())
            .field("enabled", &self.enabled.get())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn button(clock: &FrameClock) -> InputAction {
        InputAction::new(ActionPath::new("ui", "submit"), ValueKind::Button, clock.clone())
    }

    #[test]
    fn test_push_reaches_listeners_of_that_kind_only() {
        let clock = FrameClock::new();
        let action = button(&clock);
        let seen = Rc::new(RefCell::new(Vec::new()));

        let seen_clone = Rc::clone(&seen);
        action.add_listener(
            EventKind::Performed,
            Rc::new(move |o: &EventOccurrence| seen_clone.borrow_mut().push((o.kind(), o.tick()))),
        );

        clock.advance();
        action.press();

        assert_eq!(*seen.borrow(), vec![(EventKind::Performed, Tick(1))]);
    }

    #[test]
    fn test_listener_may_remove_itself_mid_push() {
        let clock = FrameClock::new();
        let action = Rc::new(button(&clock));
        let calls = Rc::new(Cell::new(0));
        let own_id = Rc::new(Cell::new(None));

        let (weak, calls_clone, own_clone) =
            (Rc::downgrade(&action), calls.clone(), own_id.clone());
        let id = action.add_listener(
            EventKind::Started,
            Rc::new(move |_: &EventOccurrence| {
                calls_clone.set(calls_clone.get() + 1);
                if let (Some(action), Some(id)) = (weak.upgrade(), own_clone.get()) {
                    action.remove_listener(EventKind::Started, id);
                }
            }),
        );
        own_id.set(Some(id));

        action.start(ActionValue::Button(true));
        action.start(ActionValue::Button(true));

        assert_eq!(calls.get(), 1);
        assert_eq!(action.listener_count(EventKind::Started), 0);
    }

    #[test]
    fn test_disabled_action_pushes_nothing() {
        let clock = FrameClock::new();
        let action = button(&clock);
        let calls = Rc::new(Cell::new(0));
        let calls_clone = calls.clone();
        action.add_listener(
            EventKind::Performed,
            Rc::new(move |_: &EventOccurrence| calls_clone.set(calls_clone.get() + 1)),
        );

        action.disable();
        action.press();
        assert_eq!(calls.get(), 0);
        assert!(!action.is_enabled());
        assert!(!action.triggered());

        action.enable();
        action.press();
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_triggered_only_in_performing_tick() {
        let clock = FrameClock::new();
        let action = button(&clock);

        action.press();
        assert!(action.triggered());

        clock.advance();
        assert!(!action.triggered());
    }

    #[test]
    fn test_cancel_resets_value_to_rest() {
        let clock = FrameClock::new();
        let action = InputAction::new(ActionPath::new("player", "move"), ValueKind::Vector2, clock);

        action.perform(ActionValue::Vector2(Vec2::new(1.0, 0.0)));
        assert_eq!(action.read_raw_value(), ActionValue::Vector2(Vec2::new(1.0, 0.0)));

        action.cancel();
        assert_eq!(action.read_raw_value(), ActionValue::Vector2(Vec2::ZERO));
    }

    #[test]
    fn test_remove_unknown_listener_reports_false() {
        let action = button(&FrameClock::new());
        assert!(!action.remove_listener(EventKind::Canceled, ListenerId(42)));
    }
}
