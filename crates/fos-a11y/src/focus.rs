//! Focus Management
//!
//! Focusable-element discovery, sequential (Tab) navigation and focus
//! trapping for dialogs.

use fos_dom::{Document, DomEvent, EventType, NodeId};

use crate::registry::{Listener, ListenerId, ListenerRegistry};

/// Tab index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabIndex {
    /// Negative or unparsable
    NotFocusable,
    /// Zero or positive
    Sequential(i32),
}

impl TabIndex {
    pub fn parse(value: &str) -> Self {
        match value.trim().parse::<i32>() {
            Ok(n) if n >= 0 => Self::Sequential(n),
            _ => Self::NotFocusable,
        }
    }

    pub fn of(doc: &Document, element: NodeId) -> Option<Self> {
        doc.get_attribute(element, "tabindex").map(Self::parse)
    }

    pub fn is_focusable(&self) -> bool {
        matches!(self, Self::Sequential(_))
    }
}

/// Interactive tags, anything with `href`, or a non-negative `tabindex`
pub fn is_focusable_candidate(doc: &Document, element: NodeId) -> bool {
    let Some(tag) = doc.tree().tag_name(element) else { return false };
    matches!(tag, "button" | "input" | "select" | "textarea")
        || doc.has_attribute(element, "href")
        || TabIndex::of(doc, element).is_some_and(|t| t.is_focusable())
}

/// Focusable candidates inside `container`, in document order
pub fn focusable_descendants(doc: &Document, container: NodeId) -> Vec<NodeId> {
    doc.tree()
        .descendants(container)
        .filter(|&n| is_focusable_candidate(doc, n))
        .collect()
}

/// First focusable candidate inside `container`
pub fn first_focusable_descendant(doc: &Document, container: NodeId) -> Option<NodeId> {
    doc.tree()
        .descendants(container)
        .find(|&n| is_focusable_candidate(doc, n))
}

/// Document-wide Tab order: positive tabindex ascending first, then the
/// rest in document order.
pub fn sequential_focus_order(doc: &Document) -> Vec<NodeId> {
    let mut order: Vec<(i32, NodeId)> = doc
        .tree()
        .descendants(doc.tree().root())
        .filter(|&n| doc.is_focusable_area(n))
        .filter_map(|n| match TabIndex::of(doc, n) {
            None => Some((0, n)),
            Some(TabIndex::Sequential(i)) => Some((i, n)),
            Some(TabIndex::NotFocusable) => None,
        })
        .collect();
    // Stable sort keeps document order among equal indices
    order.sort_by_key(|&(i, _)| if i > 0 { i } else { i32::MAX });
    order.into_iter().map(|(_, n)| n).collect()
}

/// Next element in Tab order from `from`, wrapping at the ends
pub fn next_in_sequence(doc: &Document, from: Option<NodeId>, backwards: bool) -> Option<NodeId> {
    let order = sequential_focus_order(doc);
    let len = order.len();
    if len == 0 {
        return None;
    }
    let pos = from.and_then(|f| order.iter().position(|&n| n == f));
    let next = match (pos, backwards) {
        (None, false) => 0,
        (None, true) => len - 1,
        (Some(p), false) => (p + 1) % len,
        (Some(p), true) => (p + len - 1) % len,
    };
    Some(order[next])
}

/// Confines Tab cycling to a container's focusable descendants
#[derive(Debug, Clone)]
pub struct FocusTrap {
    container: NodeId,
    focusable: Vec<NodeId>,
    listener: Option<ListenerId>,
}

impl FocusTrap {
    /// Build a trap; membership is computed now
    pub fn new(doc: &Document, container: NodeId) -> Self {
        Self {
            container,
            focusable: Self::collect(doc, container),
            listener: None,
        }
    }

    /// Candidates with a non-empty box, plus whatever currently has focus
    fn collect(doc: &Document, container: NodeId) -> Vec<NodeId> {
        focusable_descendants(doc, container)
            .into_iter()
            .filter(|&n| {
                doc.offset_width(n) > 0.0 || doc.offset_height(n) > 0.0 || doc.active_element() == Some(n)
            })
            .collect()
    }

    /// Recompute membership against the current document
    pub fn refresh(&mut self, doc: &Document) {
        self.focusable = Self::collect(doc, self.container);
    }

    pub fn container(&self) -> NodeId {
        self.container
    }

    pub fn elements(&self) -> &[NodeId] {
        &self.focusable
    }

    pub fn first(&self) -> Option<NodeId> {
        self.focusable.first().copied()
    }

    pub fn last(&self) -> Option<NodeId> {
        self.focusable.last().copied()
    }

    pub fn is_active(&self) -> bool {
        self.listener.is_some()
    }

    /// Start intercepting Tab at the container
    pub fn activate(&mut self, registry: &mut ListenerRegistry) -> ListenerId {
        if let Some(id) = self.listener {
            return id;
        }
        let id = registry.add(
            self.container,
            EventType::KeyDown,
            Listener::FocusTrap { container: self.container },
        );
        self.listener = Some(id);
        id
    }

    pub fn deactivate(&mut self, registry: &mut ListenerRegistry) -> bool {
        self.listener.take().is_some_and(|id| registry.remove(id))
    }

    /// Keydown handler: wrap Tab past the last element and Shift+Tab past
    /// the first. Returns whether focus was redirected.
    pub fn handle_key(&self, doc: &mut Document, event: &mut DomEvent) -> bool {
        if event.key() != Some("Tab") {
            return false;
        }
        let (Some(first), Some(last)) = (self.first(), self.last()) else {
            return false;
        };

        let active = doc.active_element();
        let destination = if event.shift_key() && active == Some(first) {
            last
        } else if !event.shift_key() && active == Some(last) {
            first
        } else {
            return false;
        };

        event.prevent_default();
        doc.focus(destination);
        true
    }
}
