//! DOM Events
//!
//! Event objects, targets and the listener registry.

use folio_dom::NodeId;

/// Event types a page script can listen for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    DomContentLoaded,
    Unload,
    Click,
    MouseMove,
    MouseLeave,
    Scroll,
}

impl EventKind {
    /// Whether the event propagates to ancestors, the document and the window
    pub fn bubbles(self) -> bool {
        matches!(self, Self::DomContentLoaded | Self::Click | Self::MouseMove)
    }

    /// Whether `prevent_default` has an effect
    pub fn cancelable(self) -> bool {
        matches!(self, Self::Click | Self::MouseMove)
    }

    /// DOM event type name
    pub fn name(self) -> &'static str {
        match self {
            Self::DomContentLoaded => "DOMContentLoaded",
            Self::Unload => "unload",
            Self::Click => "click",
            Self::MouseMove => "mousemove",
            Self::MouseLeave => "mouseleave",
            Self::Scroll => "scroll",
        }
    }
}

/// Where a listener is attached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventTarget {
    Window,
    Document,
    Node(NodeId),
}

/// Listener handle returned by `add_event_listener`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// Event being dispatched
#[derive(Debug, Clone)]
pub struct Event {
    pub kind: EventKind,
    pub target: EventTarget,
    pub current_target: EventTarget,
    /// Pointer position in viewport coordinates (pointer events only)
    pub client_x: f64,
    pub client_y: f64,
    pub timestamp: f64,
    default_prevented: bool,
}

impl Event {
    /// Create a non-pointer event
    pub fn new(kind: EventKind, target: EventTarget, timestamp: f64) -> Self {
        Self {
            kind,
            target,
            current_target: target,
            client_x: 0.0,
            client_y: 0.0,
            timestamp,
            default_prevented: false,
        }
    }

    /// Create a pointer event at viewport coordinates
    pub fn pointer(kind: EventKind, node: NodeId, client_x: f64, client_y: f64, timestamp: f64) -> Self {
        Self { client_x, client_y, ..Self::new(kind, EventTarget::Node(node), timestamp) }
    }

    /// Target element, if the event was fired at one
    pub fn target_node(&self) -> Option<NodeId> {
        match self.target {
            EventTarget::Node(node) => Some(node),
            _ => None,
        }
    }

    /// Prevent default action
    pub fn prevent_default(&mut self) {
        if self.kind.cancelable() {
            self.default_prevented = true;
        }
    }

    /// Check if default was prevented
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

#[derive(Debug, Clone, Copy)]
struct Listener {
    id: ListenerId,
    target: EventTarget,
    kind: EventKind,
}

/// Registry of attached listeners, in registration order
#[derive(Debug, Default)]
pub struct EventListeners {
    next_id: u64,
    listeners: Vec<Listener>,
}

impl EventListeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a listener
    pub fn add(&mut self, target: EventTarget, kind: EventKind) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.listeners.push(Listener { id, target, kind });
        id
    }

    /// Detach a listener; returns false if it was not attached
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| l.id != id);
        self.listeners.len() != before
    }

    pub fn contains(&self, id: ListenerId) -> bool {
        self.listeners.iter().any(|l| l.id == id)
    }

    /// Listeners for `kind` on `target`, in registration order
    pub fn matching(&self, target: EventTarget, kind: EventKind) -> Vec<ListenerId> {
        self.listeners
            .iter()
            .filter(|l| l.target == target && l.kind == kind)
            .map(|l| l.id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}
