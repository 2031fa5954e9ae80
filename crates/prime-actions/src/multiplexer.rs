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

//! The per-action event multiplexer.
//!
//! An [`EventMultiplexer`] sits between one [`EventSource`] and any number of
//! subscribers. For each [`EventKind`] it keeps a [`SubscriberList`] and, while
//! that list is non-empty, exactly one relay listener on the source.
//!
//! ## Dispatch
//!
//! When the source pushes an occurrence of kind `K` at tick `T`, the relay:
//!
//! 1. returns immediately if `K` was already cancelled in `T`;
//! 2. walks the *live* subscriber list with a position cursor, so handlers
//!    may subscribe or unsubscribe anything mid-pass;
//! 3. re-checks the cancellation marker before every invocation.
//!
//! ## Cancellation
//!
//! [`EventMultiplexer::cancel`] only has an effect while a pass for that kind
//! is running. It marks the running tick as cancelled, which stops the rest of
//! the pass and any further pass of the same kind in the same tick.

use crate::config::CancellationScope;
use crate::error::InvariantViolation;
use crate::subscriber::{Handler, Position, Removal, SubscriberList, SubscriptionId};
use prime_core::{
    ActionPath, ActionValue, EventKind, EventOccurrence, EventSource, Listener, ListenerId,
    ReadableValue, Tick, ValueError,
};
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

/// Source of multiplexer owner tokens; never reused within a process.
static NEXT_OWNER: AtomicU64 = AtomicU64::new(0);

/// Returned by [`EventMultiplexer::subscribe`]; pass it back to unsubscribe.
///
/// A handle is only meaningful to the multiplexer that issued it. Any other
/// multiplexer, including a fresh one built for the same path after a
/// registry clear, ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionHandle {
    owner: u64,
    kind: EventKind,
    priority: i32,
    id: SubscriptionId,
}

impl SubscriptionHandle {
    /// The event kind subscribed to.
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// The priority the handler was registered with.
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// The subscription id.
    pub fn id(&self) -> SubscriptionId {
        self.id
    }
}

#[derive(Default)]
struct State {
    lists: [Option<SubscriberList>; EventKind::COUNT],
    relays: [Option<ListenerId>; EventKind::COUNT],
    /// Last cancelled tick, indexed by marker slot.
    cancelled: [Option<Tick>; EventKind::COUNT],
    /// Tick of the pass currently running for each kind.
    active: [Option<Tick>; EventKind::COUNT],
    next_id: u64,
}

struct Inner {
    owner: u64,
    path: ActionPath,
    source: Rc<dyn EventSource>,
    scope: CancellationScope,
    state: RefCell<State>,
}

impl Inner {
    fn marker_slot(&self, kind: EventKind) -> usize {
        match self.scope {
            CancellationScope::PerKind => kind.index(),
            CancellationScope::SharedAcrossKinds => 0,
        }
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        let relays = std::mem::take(&mut self.state.get_mut().relays);
        for kind in EventKind::ALL {
            if let Some(listener) = relays[kind.index()] {
                self.source.remove_listener(kind, listener);
                log::debug!("Released {kind} relay of dropped multiplexer '{}'", self.path);
            }
        }
    }
}

/// Restores the active tick of a kind when a pass ends, including on unwind.
struct PassGuard<'a> {
    inner: &'a Inner,
    kind: EventKind,
    previous: Option<Tick>,
}

impl Drop for PassGuard<'_> {
    fn drop(&mut self) {
        self.inner.state.borrow_mut().active[self.kind.index()] = self.previous;
    }
}

/// A priority-ordered, tick-cancelable fan-out over one [`EventSource`].
///
/// Cloning is cheap and yields a handle to the same multiplexer; use
/// [`ptr_eq`](Self::ptr_eq) to compare identity.
#[derive(Clone)]
pub struct EventMultiplexer {
    inner: Rc<Inner>,
}

impl EventMultiplexer {
    /// Wraps `source`. No relay is attached until the first subscription.
    pub fn new(path: ActionPath, source: Rc<dyn EventSource>, scope: CancellationScope) -> Self {
        Self {
            inner: Rc::new(Inner {
                owner: NEXT_OWNER.fetch_add(1, Ordering::Relaxed),
                path,
                source,
                scope,
                state: RefCell::new(State::default()),
            }),
        }
    }

    /// The path this multiplexer was created for.
    pub fn path(&self) -> &ActionPath {
        &self.inner.path
    }

    /// The cancellation scope in effect.
    pub fn cancellation_scope(&self) -> CancellationScope {
        self.inner.scope
    }

    /// Registers `handler` for `kind` at `priority`.
    ///
    /// Higher priorities run first; equal priorities run in registration
    /// order. Attaches the relay for `kind` if this is its first subscriber.
    /// Safe to call from inside a handler.
    pub fn subscribe<F>(&self, kind: EventKind, priority: i32, handler: F) -> SubscriptionHandle
    where
        F: Fn(&EventOccurrence) + 'static,
    {
        let handler: Handler = Rc::new(handler);
        let (id, needs_relay) = {
            let mut state = self.inner.state.borrow_mut();
            let id = SubscriptionId(state.next_id);
            state.next_id += 1;
            state.lists[kind.index()]
                .get_or_insert_with(SubscriberList::new)
                .insert(id, priority, handler);
            (id, state.relays[kind.index()].is_none())
        };

        if needs_relay {
            self.attach(kind);
        }

        SubscriptionHandle {
            owner: self.inner.owner,
            kind,
            priority,
            id,
        }
    }

    /// Subscribes to [`EventKind::Started`].
    pub fn started<F>(&self, priority: i32, handler: F) -> SubscriptionHandle
    where
        F: Fn(&EventOccurrence) + 'static,
    {
        self.subscribe(EventKind::Started, priority, handler)
    }

    /// Subscribes to [`EventKind::Performed`].
    pub fn performed<F>(&self, priority: i32, handler: F) -> SubscriptionHandle
    where
        F: Fn(&EventOccurrence) + 'static,
    {
        self.subscribe(EventKind::Performed, priority, handler)
    }

    /// Subscribes to [`EventKind::Canceled`].
    pub fn canceled<F>(&self, priority: i32, handler: F) -> SubscriptionHandle
    where
        F: Fn(&EventOccurrence) + 'static,
    {
        self.subscribe(EventKind::Canceled, priority, handler)
    }

    /// Removes a subscription.
    ///
    /// Detaches the relay when the last subscriber of the kind goes away.
    /// Unknown or already removed handles are ignored, as are handles issued
    /// by another multiplexer.
    pub fn unsubscribe(&self, handle: SubscriptionHandle) {
        let kind = handle.kind;
        if handle.owner != self.inner.owner {
            log::trace!(
                "Ignoring unsubscribe of foreign {kind} handle {:?} on '{}'",
                handle.id,
                self.inner.path
            );
            return;
        }
        let emptied = {
            let mut state = self.inner.state.borrow_mut();
            let slot = &mut state.lists[kind.index()];
            let removal = match slot.as_mut() {
                Some(list) => list.remove(handle.priority, handle.id),
                None => Removal::Absent,
            };
            match removal {
                Removal::Absent => {
                    log::trace!(
                        "Ignoring unsubscribe of unknown {kind} handle {:?} on '{}'",
                        handle.id,
                        self.inner.path
                    );
                    return;
                }
                Removal::Removed => false,
                Removal::Emptied => {
                    *slot = None;
                    true
                }
            }
        };

        if emptied {
            self.detach(kind);
        }
    }

    /// Cancels the rest of the running pass for `kind`.
    ///
    /// No-op when no pass for `kind` is running.
    pub fn cancel(&self, kind: EventKind) {
        let slot = self.inner.marker_slot(kind);
        let mut state = self.inner.state.borrow_mut();
        match state.active[kind.index()] {
            Some(tick) => {
                state.cancelled[slot] = Some(tick);
                log::trace!("Cancelled {kind} on '{}' for tick {tick}", self.inner.path);
            }
            None => {
                log::trace!(
                    "Ignoring cancel of {kind} on '{}' outside a dispatch",
                    self.inner.path
                );
            }
        }
    }

    /// Returns `true` if `kind` has at least one subscriber.
    pub fn has_subscribers(&self, kind: EventKind) -> bool {
        self.subscriber_count(kind) > 0
    }

    /// Returns `true` if any kind has at least one subscriber.
    pub fn has_any_subscribers(&self) -> bool {
        EventKind::ALL.iter().any(|&kind| self.has_subscribers(kind))
    }

    /// Number of subscribers registered for `kind`.
    pub fn subscriber_count(&self, kind: EventKind) -> usize {
        self.inner.state.borrow().lists[kind.index()]
            .as_ref()
            .map_or(0, SubscriberList::len)
    }

    /// Returns `true` if a relay is currently attached to the source for `kind`.
    pub fn is_attached(&self, kind: EventKind) -> bool {
        self.inner.state.borrow().relays[kind.index()].is_some()
    }

    /// Reads the source's current value as `T`.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::TypeMismatch`] if the value cannot be read as `T`.
    pub fn read_value<T: ReadableValue>(&self) -> Result<T, ValueError> {
        self.inner.source.read_raw_value().read::<T>()
    }

    /// Reads the source's current value untyped.
    pub fn read_raw_value(&self) -> ActionValue {
        self.inner.source.read_raw_value()
    }

    /// Returns `true` if the source is enabled.
    pub fn is_enabled(&self) -> bool {
        self.inner.source.is_enabled()
    }

    /// Returns `true` if the source performed during the current tick.
    pub fn triggered(&self) -> bool {
        self.inner.source.triggered()
    }

    /// Detaches every relay and drops all subscribers.
    ///
    /// Called on scope teardown. The multiplexer stays usable: a later
    /// subscription attaches a fresh relay.
    pub fn detach_all(&self) {
        let relays = {
            let mut state = self.inner.state.borrow_mut();
            state.lists = Default::default();
            std::mem::take(&mut state.relays)
        };

        for kind in EventKind::ALL {
            if let Some(listener) = relays[kind.index()] {
                self.release(kind, listener);
            }
        }
    }

    /// Returns `true` if both handles refer to the same multiplexer.
    pub fn ptr_eq(&self, other: &EventMultiplexer) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Returns `true` if this multiplexer sits on exactly `source`.
    pub fn wraps(&self, source: &Rc<dyn EventSource>) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(&self.inner.source), Rc::as_ptr(source))
    }

    fn attach(&self, kind: EventKind) {
        let weak = Rc::downgrade(&self.inner);
        let relay: Listener = Rc::new(move |occurrence: &EventOccurrence| {
            relay(&weak, kind, occurrence);
        });
        let listener = self.inner.source.add_listener(kind, relay);

        let previous = self.inner.state.borrow_mut().relays[kind.index()].replace(listener);
        log::debug!(
            "Attached {kind} relay {listener} to '{}'",
            self.inner.path
        );

        if let Some(previous) = previous {
            log::error!(
                "{}",
                InvariantViolation::DoubleAttach {
                    path: self.inner.path.clone(),
                    kind,
                }
            );
            self.release(kind, previous);
        }
    }

    fn detach(&self, kind: EventKind) {
        let relay = self.inner.state.borrow_mut().relays[kind.index()].take();
        match relay {
            Some(listener) => self.release(kind, listener),
            None => log::error!(
                "{}",
                InvariantViolation::MissingRelay {
                    path: self.inner.path.clone(),
                    kind,
                }
            ),
        }
    }

    fn release(&self, kind: EventKind, listener: ListenerId) {
        if self.inner.source.remove_listener(kind, listener) {
            log::debug!(
                "Detached {kind} relay {listener} from '{}'",
                self.inner.path
            );
        } else {
            log::error!(
                "{}",
                InvariantViolation::UnknownRelay {
                    path: self.inner.path.clone(),
                    kind,
                    listener,
                }
            );
        }
    }
}

/// Runs one pass for `kind`. Holds no borrow while a handler runs.
fn relay(weak: &Weak<Inner>, kind: EventKind, occurrence: &EventOccurrence) {
    let Some(inner) = weak.upgrade() else {
        return;
    };
    if occurrence.kind() != kind {
        log::error!(
            "{}",
            InvariantViolation::KindMismatch {
                path: inner.path.clone(),
                expected: kind,
                received: occurrence.kind(),
            }
        );
    }

    let tick = occurrence.tick();
    let slot = inner.marker_slot(kind);
    let previous = {
        let mut state = inner.state.borrow_mut();
        if state.cancelled[slot] == Some(tick) {
            log::trace!(
                "Skipping {kind} pass on '{}': already cancelled for tick {tick}",
                inner.path
            );
            return;
        }
        state.active[kind.index()].replace(tick)
    };
    let _guard = PassGuard {
        inner: &inner,
        kind,
        previous,
    };

    let mut cursor: Option<Position> = None;
    loop {
        let handler = {
            let state = inner.state.borrow();
            if state.cancelled[slot] == Some(tick) {
                break;
            }
            let Some(subscriber) = state.lists[kind.index()]
                .as_ref()
                .and_then(|list| list.next_after(cursor))
            else {
                break;
            };
            cursor = Some(subscriber.position());
            Rc::clone(subscriber.handler())
        };
        handler(occurrence);
    }
}

impl fmt::Debug for EventMultiplexer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventMultiplexer")
            .field("path", &self.inner.path)
            .field("started", &self.subscriber_count(EventKind::Started))
            .field("performed", &self.subscriber_count(EventKind::Performed))
            .field("canceled", &self.subscriber_count(EventKind::Canceled))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// A source that records relay registrations and lets tests push by hand.
    #[derive(Default)]
    struct FakeSource {
        listeners: RefCell<Vec<(EventKind, ListenerId, Listener)>>,
        next_listener: Cell<u64>,
        added: Cell<usize>,
        removed: Cell<usize>,
        value: Cell<ActionValue>,
    }

    impl FakeSource {
        fn push(&self, kind: EventKind, tick: Tick) {
            let snapshot: Vec<Listener> = self
                .listeners
                .borrow()
                .iter()
                .filter(|(k, _, _)| *k == kind)
                .map(|(_, _, l)| Rc::clone(l))
                .collect();
            let occurrence = EventOccurrence::new(kind, self.value.get(), tick);
            for listener in snapshot {
                listener(&occurrence);
            }
        }

        fn listener_count(&self, kind: EventKind) -> usize {
            self.listeners
                .borrow()
                .iter()
                .filter(|(k, _, _)| *k == kind)
                .count()
        }
    }

    impl EventSource for FakeSource {
        fn add_listener(&self, kind: EventKind, listener: Listener) -> ListenerId {
            let id = ListenerId(self.next_listener.get());
            self.next_listener.set(id.0 + 1);
            self.added.set(self.added.get() + 1);
            self.listeners.borrow_mut().push((kind, id, listener));
            id
        }

        fn remove_listener(&self, kind: EventKind, id: ListenerId) -> bool {
            let mut listeners = self.listeners.borrow_mut();
            match listeners.iter().position(|(k, i, _)| *k == kind && *i == id) {
                Some(index) => {
                    listeners.remove(index);
                    self.removed.set(self.removed.get() + 1);
                    true
                }
                None => false,
            }
        }

        fn read_raw_value(&self) -> ActionValue {
            self.value.get()
        }

        fn is_enabled(&self) -> bool {
            true
        }
    }

    fn setup(scope: CancellationScope) -> (Rc<FakeSource>, EventMultiplexer) {
        let source = Rc::new(FakeSource::default());
        let mux = EventMultiplexer::new(ActionPath::new("ui", "cancel"), source.clone(), scope);
        (source, mux)
    }

    type Log = Rc<RefCell<Vec<&'static str>>>;

    fn record(log: &Log, name: &'static str) -> impl Fn(&EventOccurrence) + 'static {
        let log = Rc::clone(log);
        move |_: &EventOccurrence| log.borrow_mut().push(name)
    }

    #[test]
    fn test_dispatch_in_priority_order() {
        let (source, mux) = setup(CancellationScope::PerKind);
        let log: Log = Rc::default();
        mux.performed(0, record(&log, "A"));
        mux.performed(10, record(&log, "B"));
        mux.performed(5, record(&log, "C"));

        source.push(EventKind::Performed, Tick(1));

        assert_eq!(*log.borrow(), vec!["B", "C", "A"]);
    }

    #[test]
    fn test_cancel_stops_the_pass_for_this_tick_only() {
        let (source, mux) = setup(CancellationScope::PerKind);
        let log: Log = Rc::default();
        let cancelling = mux.clone();
        let log_a = Rc::clone(&log);
        mux.performed(10, move |_| {
            log_a.borrow_mut().push("A");
            cancelling.cancel(EventKind::Performed);
        });
        mux.performed(5, record(&log, "B"));

        source.push(EventKind::Performed, Tick(1));
        assert_eq!(*log.borrow(), vec!["A"]);

        // A second push in the cancelled tick is suppressed entirely.
        source.push(EventKind::Performed, Tick(1));
        assert_eq!(*log.borrow(), vec!["A"]);

        source.push(EventKind::Performed, Tick(2));
        assert_eq!(*log.borrow(), vec!["A", "A"]);
    }

    #[test]
    fn test_cancel_outside_pass_is_noop() {
        let (source, mux) = setup(CancellationScope::PerKind);
        let log: Log = Rc::default();
        mux.performed(0, record(&log, "A"));

        mux.cancel(EventKind::Performed);
        source.push(EventKind::Performed, Tick(0));

        assert_eq!(*log.borrow(), vec!["A"]);
    }

    #[test]
    fn test_cancel_is_scoped_to_kind() {
        let (source, mux) = setup(CancellationScope::PerKind);
        let log: Log = Rc::default();
        let cancelling = mux.clone();
        mux.performed(1, move |_| cancelling.cancel(EventKind::Performed));
        mux.started(0, record(&log, "started"));

        source.push(EventKind::Performed, Tick(3));
        source.push(EventKind::Started, Tick(3));

        assert_eq!(*log.borrow(), vec!["started"]);
    }

    #[test]
    fn test_shared_scope_suppresses_other_kinds() {
        let (source, mux) = setup(CancellationScope::SharedAcrossKinds);
        let log: Log = Rc::default();
        let cancelling = mux.clone();
        mux.performed(1, move |_| cancelling.cancel(EventKind::Performed));
        mux.started(0, record(&log, "started"));

        source.push(EventKind::Performed, Tick(3));
        source.push(EventKind::Started, Tick(3));
        assert!(log.borrow().is_empty());

        source.push(EventKind::Started, Tick(4));
        assert_eq!(*log.borrow(), vec!["started"]);
    }

    #[test]
    fn test_self_removal_does_not_skip_next() {
        let (source, mux) = setup(CancellationScope::PerKind);
        let log: Log = Rc::default();
        let own: Rc<Cell<Option<SubscriptionHandle>>> = Rc::default();

        let (log_a, own_a, mux_a) = (Rc::clone(&log), Rc::clone(&own), mux.clone());
        let handle = mux.performed(10, move |_| {
            log_a.borrow_mut().push("A");
            if let Some(handle) = own_a.get() {
                mux_a.unsubscribe(handle);
            }
        });
        own.set(Some(handle));
        mux.performed(5, record(&log, "B"));

        source.push(EventKind::Performed, Tick(1));
        source.push(EventKind::Performed, Tick(2));

        assert_eq!(*log.borrow(), vec!["A", "B", "B"]);
    }

    #[test]
    fn test_subscribe_during_pass_runs_lower_priority_only() {
        let (source, mux) = setup(CancellationScope::PerKind);
        let log: Log = Rc::default();
        let added = Rc::new(Cell::new(false));

        let (log_a, mux_a, added_a) = (Rc::clone(&log), mux.clone(), Rc::clone(&added));
        mux.performed(5, move |_| {
            if !added_a.replace(true) {
                mux_a.performed(9, record(&log_a, "high"));
                mux_a.performed(1, record(&log_a, "low"));
            }
        });

        source.push(EventKind::Performed, Tick(1));
        assert_eq!(*log.borrow(), vec!["low"]);
    }

    #[test]
    fn test_relay_attach_and_detach_once() {
        let (source, mux) = setup(CancellationScope::PerKind);

        let first = mux.performed(0, |_| {});
        let second = mux.performed(3, |_| {});
        assert_eq!(source.added.get(), 1);
        assert_eq!(source.listener_count(EventKind::Performed), 1);

        mux.unsubscribe(first);
        assert_eq!(source.removed.get(), 0);
        mux.unsubscribe(second);
        mux.unsubscribe(second);

        assert_eq!(source.removed.get(), 1);
        assert_eq!(source.listener_count(EventKind::Performed), 0);
        assert!(!mux.has_any_subscribers());
        assert!(!mux.is_attached(EventKind::Performed));
    }

    #[test]
    fn test_resubscribe_after_empty_attaches_again() {
        let (source, mux) = setup(CancellationScope::PerKind);
        let handle = mux.canceled(0, |_| {});
        mux.unsubscribe(handle);
        mux.canceled(0, |_| {});

        assert_eq!(source.added.get(), 2);
        assert_eq!(source.removed.get(), 1);
        assert!(mux.has_subscribers(EventKind::Canceled));
    }

    #[test]
    fn test_detach_all_releases_every_relay() {
        let (source, mux) = setup(CancellationScope::PerKind);
        mux.started(0, |_| {});
        mux.performed(0, |_| {});
        mux.canceled(0, |_| {});

        mux.detach_all();

        assert_eq!(source.removed.get(), 3);
        assert!(!mux.has_any_subscribers());
        for kind in EventKind::ALL {
            assert!(!mux.is_attached(kind));
        }
    }

    #[test]
    fn test_dropping_last_handle_releases_relays() {
        let (source, mux) = setup(CancellationScope::PerKind);
        mux.performed(0, |_| {});
        drop(mux);

        assert_eq!(source.listener_count(EventKind::Performed), 0);
    }

    #[test]
    fn test_read_value_delegates_to_source() {
        let (source, mux) = setup(CancellationScope::PerKind);
        source.value.set(ActionValue::Button(true));

        assert!(mux.read_value::<bool>().unwrap());
        assert_eq!(mux.read_raw_value(), ActionValue::Button(true));
        assert!(matches!(
            mux.read_value::<prime_core::Vec2>(),
            Err(ValueError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_foreign_handle_is_ignored() {
        let (source_a, a) = setup(CancellationScope::PerKind);
        let (source_b, b) = setup(CancellationScope::PerKind);
        let log: Log = Rc::default();

        // Both multiplexers issue their first id at the same priority.
        let from_a = a.performed(0, |_| {});
        b.performed(0, record(&log, "B"));

        b.unsubscribe(from_a);

        assert_eq!(b.subscriber_count(EventKind::Performed), 1);
        assert_eq!(a.subscriber_count(EventKind::Performed), 1);
        assert_eq!(source_a.listener_count(EventKind::Performed), 1);
        source_b.push(EventKind::Performed, Tick(1));
        assert_eq!(*log.borrow(), vec!["B"]);
    }

    #[test]
    fn test_nested_pass_restores_outer_tick() {
        let (source, mux) = setup(CancellationScope::PerKind);
        let log: Log = Rc::default();
        let outer = Rc::new(Cell::new(true));

        let (log_a, mux_a, source_a, outer_a) = (
            Rc::clone(&log),
            mux.clone(),
            Rc::clone(&source),
            Rc::clone(&outer),
        );
        mux.performed(10, move |_| {
            log_a.borrow_mut().push("A");
            if outer_a.replace(false) {
                source_a.push(EventKind::Performed, Tick(1));
                // The nested pass has ended; cancelling must still stop this one.
                mux_a.cancel(EventKind::Performed);
            }
        });
        mux.performed(5, record(&log, "B"));

        source.push(EventKind::Performed, Tick(1));

        assert_eq!(*log.borrow(), vec!["A", "A", "B"]);
    }

    #[test]
    fn test_detach_all_during_pass_stops_it() {
        let (source, mux) = setup(CancellationScope::PerKind);
        let log: Log = Rc::default();

        let (log_a, mux_a) = (Rc::clone(&log), mux.clone());
        mux.performed(10, move |_| {
            log_a.borrow_mut().push("A");
            mux_a.detach_all();
        });
        mux.performed(5, record(&log, "B"));

        source.push(EventKind::Performed, Tick(1));
        source.push(EventKind::Performed, Tick(2));

        assert_eq!(*log.borrow(), vec!["A"]);
        assert_eq!(source.listener_count(EventKind::Performed), 0);
        assert!(!mux.has_any_subscribers());
    }

    #[test]
    fn test_wraps_compares_source_identity() {
        let (source, mux) = setup(CancellationScope::PerKind);
        let same: Rc<dyn EventSource> = source;
        let other: Rc<dyn EventSource> = Rc::new(FakeSource::default());

        assert!(mux.wraps(&same));
        assert!(!mux.wraps(&other));
    }
}
