//! Listener Registry
//!
//! Owns every event listener and mutation observer the bindings install,
//! so a page can be torn down deterministically.

use fos_dom::{EventType, NodeId, ObserverId};

/// Listener handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

/// What a listener does when its event fires. Per-binding state lives in
/// the page's binding tables; dialog listeners refer to it by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listener {
    /// Run the binders once the document structure is ready
    Bootstrap,
    /// Enter/Space on a trigger acts as a click
    KeyActivation { trigger: NodeId },
    /// Tab wrapping inside a dialog
    FocusTrap { container: NodeId },
    /// Escape closes the dialog
    DialogEscape { dialog: usize },
    /// Trigger click toggles the dialog
    DialogTrigger { dialog: usize },
}

/// A registered listener
#[derive(Debug, Clone)]
pub struct Registration {
    pub id: ListenerId,
    pub target: NodeId,
    pub event_type: EventType,
    pub listener: Listener,
}

/// Registry of listeners and observers
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    next_id: u64,
    listeners: Vec<Registration>,
    observers: Vec<ObserverId>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener, returning its handle
    pub fn add(&mut self, target: NodeId, event_type: EventType, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push(Registration { id, target, event_type, listener });
        id
    }

    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|r| r.id != id);
        before != self.listeners.len()
    }

    pub fn contains(&self, id: ListenerId) -> bool {
        self.listeners.iter().any(|r| r.id == id)
    }

    /// Listeners on `target` for `event_type`, in registration order
    pub fn listeners_for(&self, target: NodeId, event_type: EventType) -> Vec<Registration> {
        self.listeners
            .iter()
            .filter(|r| r.target == target && r.event_type == event_type)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Take ownership of an observer for teardown
    pub fn track_observer(&mut self, observer: ObserverId) {
        if !self.observers.contains(&observer) {
            self.observers.push(observer);
        }
    }

    pub fn observers(&self) -> &[ObserverId] {
        &self.observers
    }

    /// Remove everything, handing back what was registered
    pub fn drain(&mut self) -> (Vec<Registration>, Vec<ObserverId>) {
        (std::mem::take(&mut self.listeners), std::mem::take(&mut self.observers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_lookup_remove() {
        let mut registry = ListenerRegistry::new();
        let trigger = NodeId::ROOT;
        let a = registry.add(trigger, EventType::KeyDown, Listener::KeyActivation { trigger });
        let b = registry.add(trigger, EventType::Click, Listener::DialogTrigger { dialog: 0 });

        let keys = registry.listeners_for(trigger, EventType::KeyDown);
        assert_eq!(keys.len(), 1);
        assert_eq!(keys[0].id, a);
        assert_eq!(registry.listeners_for(trigger, EventType::Click).len(), 1);
        assert_eq!(registry.len(), 2);

        assert!(registry.remove(a));
        assert!(!registry.remove(a));
        assert!(registry.contains(b));
    }

    #[test]
    fn test_drain() {
        let mut registry = ListenerRegistry::new();
        registry.add(NodeId::ROOT, EventType::DOMContentLoaded, Listener::Bootstrap);
        registry.track_observer(ObserverId(4));
        registry.track_observer(ObserverId(4));

        let (listeners, observers) = registry.drain();
        assert_eq!(listeners.len(), 1);
        assert_eq!(observers, vec![ObserverId(4)]);
        assert!(registry.is_empty());
        assert!(registry.observers().is_empty());
    }
}
