//! Typed notifications published by widgets and windows.
//!
//! Each window's tree receives an [`EventSink`] when the window is added to a
//! manager. Trees that have never been attached have no sink and their
//! notifications are dropped.

use std::{
    collections::VecDeque,
    sync::mpsc::{self, Receiver, Sender},
};

use parking_lot::Mutex;

use serde::{Deserialize, Serialize};

use crate::{
    core::{
        event::{key::Key, mouse::Button},
        id::{NodeId, WindowId},
    },
    geom::Point,
};

/// A notification payload.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// The node was attached or its window was added.
    Create,
    /// The node is being torn down.
    Destroy,
    /// The node became visible.
    Show,
    /// The node became hidden.
    Hide,
    /// The node was enabled.
    Enable,
    /// The node was disabled.
    Disable,
    /// The node gained focus within its tree.
    GotFocus,
    /// The node lost focus within its tree.
    LostFocus,
    /// The window became the manager's focused window.
    WindowGotFocus,
    /// The window stopped being the manager's focused window.
    WindowLostFocus,
    /// The node changed size.
    Resize,
    /// The node moved.
    Move,
    /// A key-down reached the focused node.
    KeyDown(Key),
    /// A key-up reached the focused node.
    KeyUp(Key),
    /// A button press reached the node.
    MouseDown {
        /// The button.
        button: Button,
        /// Window-local position.
        pos: Point,
    },
    /// A button release reached the node.
    MouseUp {
        /// The button.
        button: Button,
        /// Window-local position.
        pos: Point,
    },
    /// A button was clicked.
    Click,
    /// A range selector's value changed.
    ValueChange {
        /// New value.
        value: f32,
        /// Value before the change.
        previous: f32,
    },
    /// A range selector's bounds changed.
    RangeChange {
        /// Lower bound.
        min: f32,
        /// Upper bound.
        max: f32,
        /// Current value.
        value: f32,
    },
    /// A text editor's contents changed.
    TextChange(String),
}

/// Payload-free discriminant of [`UiEvent`], used to filter the bus.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    Create,
    Destroy,
    Show,
    Hide,
    Enable,
    Disable,
    GotFocus,
    LostFocus,
    WindowGotFocus,
    WindowLostFocus,
    Resize,
    Move,
    KeyDown,
    KeyUp,
    MouseDown,
    MouseUp,
    Click,
    ValueChange,
    RangeChange,
    TextChange,
}

impl UiEvent {
    /// The event's kind.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Create => EventKind::Create,
            Self::Destroy => EventKind::Destroy,
            Self::Show => EventKind::Show,
            Self::Hide => EventKind::Hide,
            Self::Enable => EventKind::Enable,
            Self::Disable => EventKind::Disable,
            Self::GotFocus => EventKind::GotFocus,
            Self::LostFocus => EventKind::LostFocus,
            Self::WindowGotFocus => EventKind::WindowGotFocus,
            Self::WindowLostFocus => EventKind::WindowLostFocus,
            Self::Resize => EventKind::Resize,
            Self::Move => EventKind::Move,
            Self::KeyDown(_) => EventKind::KeyDown,
            Self::KeyUp(_) => EventKind::KeyUp,
            Self::MouseDown { .. } => EventKind::MouseDown,
            Self::MouseUp { .. } => EventKind::MouseUp,
            Self::Click => EventKind::Click,
            Self::ValueChange { .. } => EventKind::ValueChange,
            Self::RangeChange { .. } => EventKind::RangeChange,
            Self::TextChange(_) => EventKind::TextChange,
        }
    }
}

/// A notification published onto the bus.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    /// Window that owns the source node.
    pub window: WindowId,
    /// Source node.
    pub node: NodeId,
    /// Payload.
    pub event: UiEvent,
}

/// Sending half of the bus, bound into each attached tree.
#[derive(Debug, Clone)]
pub struct EventSink {
    /// Channel sender.
    tx: Sender<Notification>,
}

impl EventSink {
    /// Publish a notification. A closed bus drops it silently.
    pub fn send(&self, n: Notification) {
        if self.tx.send(n).is_err() {
            tracing::trace!("event bus closed, notification dropped");
        }
    }
}

/// Receiving half of the bus, owned by the window manager.
#[derive(Debug)]
pub struct EventBus {
    /// Sender handed out through [`EventBus::sink`].
    tx: Sender<Notification>,
    /// Channel receiver.
    rx: Receiver<Notification>,
    /// Notifications passed over by [`EventBus::drain_kind`], delivered
    /// before anything still in the channel.
    held: Mutex<VecDeque<Notification>>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    /// Create an empty bus.
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            tx,
            rx,
            held: Mutex::new(VecDeque::new()),
        }
    }

    /// A sink publishing onto this bus.
    pub fn sink(&self) -> EventSink {
        EventSink {
            tx: self.tx.clone(),
        }
    }

    /// Take the next pending notification, if any.
    pub fn poll(&self) -> Option<Notification> {
        self.held
            .lock()
            .pop_front()
            .or_else(|| self.rx.try_recv().ok())
    }

    /// Take every pending notification in publication order.
    pub fn drain(&self) -> Vec<Notification> {
        let mut held = self.held.lock();
        held.extend(self.rx.try_iter());
        held.drain(..).collect()
    }

    /// Take the pending notifications of `kind`. Notifications of other kinds
    /// stay queued, in order, for the next `poll` or `drain`.
    pub fn drain_kind(&self, kind: EventKind) -> Vec<Notification> {
        let mut held = self.held.lock();
        held.extend(self.rx.try_iter());
        let (matched, rest): (Vec<_>, Vec<_>) =
            held.drain(..).partition(|n| n.event.kind() == kind);
        *held = rest.into();
        matched
    }
}

#[cfg(test)]
mod tests {
    use slotmap::KeyData;

    use super::*;

    fn note(event: UiEvent) -> Notification {
        Notification {
            window: WindowId::new(1),
            node: NodeId::from(KeyData::from_ffi(1)),
            event,
        }
    }

    #[test]
    fn drain_preserves_order() {
        let bus = EventBus::new();
        let sink = bus.sink();
        sink.send(note(UiEvent::Create));
        sink.send(note(UiEvent::Click));
        sink.send(note(UiEvent::TextChange("x".into())));
        let kinds: Vec<_> = bus.drain().iter().map(|n| n.event.kind()).collect();
        assert_eq!(
            kinds,
            vec![EventKind::Create, EventKind::Click, EventKind::TextChange]
        );
        assert!(bus.poll().is_none());
    }

    #[test]
    fn drain_kind_keeps_other_kinds() {
        let bus = EventBus::new();
        let sink = bus.sink();
        sink.send(note(UiEvent::Click));
        sink.send(note(UiEvent::Show));
        sink.send(note(UiEvent::Click));
        sink.send(note(UiEvent::TextChange("x".into())));
        assert_eq!(bus.drain_kind(EventKind::Click).len(), 2);
        sink.send(note(UiEvent::Hide));
        assert_eq!(bus.poll().map(|n| n.event), Some(UiEvent::Show));
        let kinds: Vec<_> = bus.drain().iter().map(|n| n.event.kind()).collect();
        assert_eq!(kinds, vec![EventKind::TextChange, EventKind::Hide]);
        assert!(bus.drain_kind(EventKind::Click).is_empty());
    }

    #[test]
    fn closed_bus_drops() {
        let bus = EventBus::new();
        let sink = bus.sink();
        drop(bus);
        sink.send(note(UiEvent::Click));
    }
}
