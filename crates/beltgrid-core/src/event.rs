//! Typed simulation events with pre-allocated ring buffers.
//!
//! Events are emitted while a step runs (and by immediate edits) and are
//! delivered in batch to passive listeners once the step has finished. Each
//! event kind has its own [`EventBuffer`] with a fixed capacity; when a buffer
//! is full the oldest event is dropped.
//!
//! Kinds can be suppressed via [`EventBus::suppress`], in which case they are
//! never allocated or recorded.

use crate::cell::Item;
use crate::grid::GridPosition;
use crate::sim::Ticks;

// ---------------------------------------------------------------------------
// Event types
// ---------------------------------------------------------------------------

/// A simulation event. All events carry the tick at which they occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// An item left `from` and arrived at `to`. `item` is the arriving kind.
    ItemMoved {
        from: GridPosition,
        to: GridPosition,
        item: Item,
        tick: Ticks,
    },
    /// A transmutator at `at` changed the kind of a departing item.
    ItemTransmuted {
        at: GridPosition,
        from_item: Item,
        to_item: Item,
        tick: Ticks,
    },
    /// The chain starting at `at` loops back on itself; its items stay put
    /// for this tick.
    ChainBlocked { at: GridPosition, tick: Ticks },
    /// A cell was overwritten or had its item changed by an edit.
    CellEdited { at: GridPosition, tick: Ticks },
}

/// Discriminant tag for event types, used for suppression and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    ItemMoved,
    ItemTransmuted,
    ChainBlocked,
    CellEdited,
}

const EVENT_KIND_COUNT: usize = 4;

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::ItemMoved { .. } => EventKind::ItemMoved,
            Event::ItemTransmuted { .. } => EventKind::ItemTransmuted,
            Event::ChainBlocked { .. } => EventKind::ChainBlocked,
            Event::CellEdited { .. } => EventKind::CellEdited,
        }
    }

    pub fn tick(&self) -> Ticks {
        match self {
            Event::ItemMoved { tick, .. }
            | Event::ItemTransmuted { tick, .. }
            | Event::ChainBlocked { tick, .. }
            | Event::CellEdited { tick, .. } => *tick,
        }
    }
}

impl EventKind {
    pub fn all() -> [EventKind; EVENT_KIND_COUNT] {
        [
            EventKind::ItemMoved,
            EventKind::ItemTransmuted,
            EventKind::ChainBlocked,
            EventKind::CellEdited,
        ]
    }

    fn index(self) -> usize {
        self as usize
    }
}

// ---------------------------------------------------------------------------
// EventSink
// ---------------------------------------------------------------------------

/// Anything that accepts events. The propagation step writes through this so
/// it can run against a plain `Vec` in tests.
pub trait EventSink {
    fn emit(&mut self, event: Event);
}

impl EventSink for Vec<Event> {
    fn emit(&mut self, event: Event) {
        self.push(event);
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: Event) {}
}

// ---------------------------------------------------------------------------
// EventBuffer
// ---------------------------------------------------------------------------

/// A pre-allocated ring buffer for events. Fixed capacity; when full, the
/// oldest events are dropped.
#[derive(Debug)]
pub struct EventBuffer {
    events: Vec<Option<Event>>,
    /// Next write position.
    head: usize,
    len: usize,
    /// Total events ever written (including dropped).
    total_written: u64,
}

impl EventBuffer {
    /// A capacity of 0 is clamped to 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            events: (0..capacity).map(|_| None).collect(),
            head: 0,
            len: 0,
            total_written: 0,
        }
    }

    pub fn push(&mut self, event: Event) {
        self.events[self.head] = Some(event);
        self.head = (self.head + 1) % self.capacity();
        if self.len < self.capacity() {
            self.len += 1;
        }
        self.total_written += 1;
    }

    pub fn capacity(&self) -> usize {
        self.events.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn total_written(&self) -> u64 {
        self.total_written
    }

    /// Iterate from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        let start = if self.len < self.capacity() { 0 } else { self.head };
        let cap = self.capacity();
        (0..self.len).filter_map(move |i| self.events[(start + i) % cap].as_ref())
    }

    pub fn clear(&mut self) {
        for slot in &mut self.events {
            *slot = None;
        }
        self.head = 0;
        self.len = 0;
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// A passive listener receives events read-only.
pub type PassiveListener = Box<dyn FnMut(&Event)>;

/// Holds one ring buffer per event kind, listener lists, and suppression flags.
pub struct EventBus {
    buffers: [Option<EventBuffer>; EVENT_KIND_COUNT],
    suppressed: [bool; EVENT_KIND_COUNT],
    listeners: [Vec<PassiveListener>; EVENT_KIND_COUNT],
    default_capacity: usize,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("buffers", &self.buffers)
            .field("suppressed", &self.suppressed)
            .field("default_capacity", &self.default_capacity)
            .finish_non_exhaustive()
    }
}

impl EventBus {
    /// Create a bus with the given buffer capacity per kind.
    pub fn new(default_capacity: usize) -> Self {
        Self {
            buffers: Default::default(),
            suppressed: [false; EVENT_KIND_COUNT],
            listeners: Default::default(),
            default_capacity,
        }
    }

    /// Suppressed kinds are never allocated or buffered.
    pub fn suppress(&mut self, kind: EventKind) {
        self.suppressed[kind.index()] = true;
        self.buffers[kind.index()] = None;
    }

    pub fn is_suppressed(&self, kind: EventKind) -> bool {
        self.suppressed[kind.index()]
    }

    /// Register a listener, called in registration order during delivery.
    pub fn on_passive(&mut self, kind: EventKind, listener: PassiveListener) {
        self.listeners[kind.index()].push(listener);
    }

    /// Deliver every buffered event to its listeners, oldest first, then
    /// clear the buffers.
    pub fn deliver(&mut self) {
        for idx in 0..EVENT_KIND_COUNT {
            let Some(buffer) = self.buffers[idx].as_mut() else {
                continue;
            };
            if buffer.is_empty() {
                continue;
            }
            for event in buffer.iter() {
                for listener in &mut self.listeners[idx] {
                    listener(event);
                }
            }
            buffer.clear();
        }
    }

    pub fn buffer(&self, kind: EventKind) -> Option<&EventBuffer> {
        self.buffers[kind.index()].as_ref()
    }

    /// Events currently waiting for delivery.
    pub fn buffered_count(&self, kind: EventKind) -> usize {
        self.buffer(kind).map(|b| b.len()).unwrap_or(0)
    }

    /// Total events ever emitted for a kind (including dropped).
    pub fn total_emitted(&self, kind: EventKind) -> u64 {
        self.buffer(kind).map(|b| b.total_written()).unwrap_or(0)
    }
}

impl EventSink for EventBus {
    fn emit(&mut self, event: Event) {
        let idx = event.kind().index();
        if self.suppressed[idx] {
            return;
        }
        let capacity = self.default_capacity;
        self.buffers[idx]
            .get_or_insert_with(|| EventBuffer::new(capacity))
            .push(event);
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(1024)
    }
}
