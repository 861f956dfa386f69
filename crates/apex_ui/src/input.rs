//! Pointer input and page events.
//!
//! [`InputState`] is the pointer snapshot widgets read during a frame.
//! [`EventHub`] delivers page events to the components listening for
//! them:
//!
//! ```text
//!  page ──► EventHub::emit(UiEvent) ──► inbox per matching Subscription
//!                                              │
//!  component::update ◄── Subscription::drain ──┘
//! ```
//!
//! A component keeps its [`Subscription`] for as long as it is mounted;
//! dropping it removes the listener and discards anything still queued.

use std::sync::{Arc, Weak};

use parking_lot::Mutex;

/// Pointer state for the current frame.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Current pointer X position (viewport space).
    pub pointer_x: f32,
    /// Current pointer Y position (viewport space).
    pub pointer_y: f32,
    /// True once the pointer has moved at least once.
    pub pointer_seen: bool,
}

impl InputState {
    /// Creates a new empty input state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates pointer position.
    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.pointer_x = x;
        self.pointer_y = y;
        self.pointer_seen = true;
    }
}

/// Page-level event a component can listen for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// The document scroll offset changed.
    Scroll,
    /// The pointer moved.
    PointerMove,
    /// The pointer entered a new element.
    PointerOver,
    /// A click landed.
    Click,
    /// The viewport was resized.
    Resize,
}

/// A page event with its payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UiEvent {
    /// New document scroll offset.
    Scroll {
        /// Offset in pixels.
        y: f32,
    },
    /// Pointer position in viewport space.
    PointerMove {
        /// Viewport x.
        x: f32,
        /// Viewport y.
        y: f32,
    },
    /// The pointer entered a new element.
    PointerOver {
        /// Whether the element (or an ancestor) is a link, a button or
        /// `cursor-pointer`.
        interactive: bool,
    },
    /// A click at a viewport position.
    Click {
        /// Viewport x.
        x: f32,
        /// Viewport y.
        y: f32,
    },
    /// New viewport size.
    Resize {
        /// Width in pixels.
        width: f32,
        /// Height in pixels.
        height: f32,
    },
}

impl UiEvent {
    /// The kind listeners subscribe to.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::Scroll { .. } => EventKind::Scroll,
            Self::PointerMove { .. } => EventKind::PointerMove,
            Self::PointerOver { .. } => EventKind::PointerOver,
            Self::Click { .. } => EventKind::Click,
            Self::Resize { .. } => EventKind::Resize,
        }
    }
}

#[derive(Debug)]
struct Listener {
    id: u64,
    kind: EventKind,
    inbox: Vec<UiEvent>,
}

#[derive(Debug, Default)]
struct Listeners {
    next_id: u64,
    active: Vec<Listener>,
}

/// Registry of live event listeners and their queued events.
///
/// Cloning yields another handle to the same registry.
#[derive(Debug, Clone, Default)]
pub struct EventHub {
    inner: Arc<Mutex<Listeners>>,
}

impl EventHub {
    /// Creates an empty hub.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a listener for `kind`. It stays registered while the subscription lives.
    #[must_use = "dropping the subscription removes the listener"]
    pub fn subscribe(&self, kind: EventKind) -> Subscription {
        let mut listeners = self.inner.lock();
        let id = listeners.next_id;
        listeners.next_id += 1;
        listeners.active.push(Listener {
            id,
            kind,
            inbox: Vec::new(),
        });
        Subscription {
            id,
            kind,
            hub: Arc::downgrade(&self.inner),
        }
    }

    /// Queues `event` for every listener of its kind. Returns how many
    /// listeners received it.
    pub fn emit(&self, event: UiEvent) -> usize {
        let kind = event.kind();
        let mut listeners = self.inner.lock();
        let mut delivered = 0;
        for listener in listeners.active.iter_mut().filter(|l| l.kind == kind) {
            listener.inbox.push(event);
            delivered += 1;
        }
        tracing::trace!(?kind, delivered, "event emitted");
        delivered
    }

    /// Number of live listeners for `kind`.
    #[must_use]
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.inner
            .lock()
            .active
            .iter()
            .filter(|listener| listener.kind == kind)
            .count()
    }

    /// Total number of live listeners.
    #[must_use]
    pub fn total_listeners(&self) -> usize {
        self.inner.lock().active.len()
    }
}

/// A live listener registration. Dropping it unsubscribes.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    kind: EventKind,
    hub: Weak<Mutex<Listeners>>,
}

impl Subscription {
    /// The event kind this subscription listens for.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// Returns true while the listener is registered.
    #[must_use]
    pub fn is_active(&self) -> bool {
        let Some(hub) = self.hub.upgrade() else {
            return false;
        };
        let listeners = hub.lock();
        listeners.active.iter().any(|listener| listener.id == self.id)
    }

    /// Takes every event queued since the last drain, oldest first.
    #[must_use]
    pub fn drain(&self) -> Vec<UiEvent> {
        let Some(hub) = self.hub.upgrade() else {
            return Vec::new();
        };
        let mut listeners = hub.lock();
        listeners
            .active
            .iter_mut()
            .find(|listener| listener.id == self.id)
            .map(|listener| std::mem::take(&mut listener.inbox))
            .unwrap_or_default()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(hub) = self.hub.upgrade() {
            hub.lock().active.retain(|listener| listener.id != self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_seen() {
        let mut input = InputState::new();
        assert!(!input.pointer_seen);
        input.set_pointer(15.0, 7.0);
        assert_eq!((input.pointer_x, input.pointer_y), (15.0, 7.0));
        assert!(input.pointer_seen);
    }

    #[test]
    fn test_subscriptions_unregister_on_drop() {
        let hub = EventHub::new();
        let moves = hub.subscribe(EventKind::PointerMove);
        let overs = hub.subscribe(EventKind::PointerOver);
        assert_eq!(hub.listener_count(EventKind::PointerMove), 1);
        assert_eq!(hub.total_listeners(), 2);
        assert!(moves.is_active());

        drop(moves);
        assert_eq!(hub.listener_count(EventKind::PointerMove), 0);
        assert_eq!(overs.kind(), EventKind::PointerOver);
        drop(overs);
        assert_eq!(hub.total_listeners(), 0);
    }

    #[test]
    fn test_emit_reaches_matching_listeners_only() {
        let hub = EventHub::new();
        let scroll = hub.subscribe(EventKind::Scroll);
        let moves = hub.subscribe(EventKind::PointerMove);

        assert_eq!(hub.emit(UiEvent::Scroll { y: 10.0 }), 1);
        assert_eq!(hub.emit(UiEvent::Scroll { y: 60.0 }), 1);
        assert_eq!(hub.emit(UiEvent::Click { x: 1.0, y: 1.0 }), 0);

        assert_eq!(
            scroll.drain(),
            vec![UiEvent::Scroll { y: 10.0 }, UiEvent::Scroll { y: 60.0 }]
        );
        assert!(scroll.drain().is_empty());
        assert!(moves.drain().is_empty());
    }

    #[test]
    fn test_dropped_listener_stops_receiving() {
        let hub = EventHub::new();
        let moves = hub.subscribe(EventKind::PointerMove);
        drop(moves);
        assert_eq!(hub.emit(UiEvent::PointerMove { x: 3.0, y: 4.0 }), 0);

        let orphan = EventHub::new().subscribe(EventKind::Scroll);
        assert!(!orphan.is_active());
        assert!(orphan.drain().is_empty());
    }
}
