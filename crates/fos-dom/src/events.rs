//! DOM Events
//!
//! Event objects passed to listeners: type, target, keyboard data and the
//! cancellation flags.

use crate::NodeId;

/// DOM event types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    Click,
    KeyDown,
    DOMContentLoaded,
}

impl EventType {
    pub fn bubbles(&self) -> bool {
        true
    }

    pub fn cancelable(&self) -> bool {
        matches!(self, Self::Click | Self::KeyDown)
    }
}

/// Keyboard event payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyData {
    /// `KeyboardEvent.key` value ("Tab", "Enter", " ", "Escape", ...)
    pub key: String,
    pub shift: bool,
}

impl KeyData {
    pub fn new(key: &str) -> Self {
        Self {
            key: key.into(),
            shift: false,
        }
    }

    /// Same key with Shift held
    pub fn shift(mut self) -> Self {
        self.shift = true;
        self
    }
}

impl From<&str> for KeyData {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

/// DOM event
#[derive(Debug, Clone)]
pub struct DomEvent {
    pub event_type: EventType,
    pub target: NodeId,
    pub current_target: Option<NodeId>,
    pub key: Option<KeyData>,
    pub bubbles: bool,
    pub cancelable: bool,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl DomEvent {
    pub fn new(event_type: EventType, target: NodeId) -> Self {
        Self {
            event_type,
            target,
            current_target: None,
            key: None,
            bubbles: event_type.bubbles(),
            cancelable: event_type.cancelable(),
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    pub fn click(target: NodeId) -> Self {
        Self::new(EventType::Click, target)
    }

    pub fn key_down(target: NodeId, key: impl Into<KeyData>) -> Self {
        Self {
            key: Some(key.into()),
            ..Self::new(EventType::KeyDown, target)
        }
    }

    /// DOMContentLoaded, fired at the document node
    pub fn content_loaded() -> Self {
        Self::new(EventType::DOMContentLoaded, NodeId::ROOT)
    }

    /// Key value, for keyboard events
    pub fn key(&self) -> Option<&str> {
        self.key.as_ref().map(|k| k.key.as_str())
    }

    pub fn shift_key(&self) -> bool {
        self.key.as_ref().is_some_and(|k| k.shift)
    }

    /// Prevent default action (only for cancelable events)
    pub fn prevent_default(&mut self) {
        if self.cancelable {
            self.default_prevented = true;
        }
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}
