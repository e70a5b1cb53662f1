//! Mutation Observers
//!
//! Observers register interest in attributes of target nodes; the document
//! queues a record for every matching attribute write and the host drains
//! the queue at its checkpoints.

use std::collections::BTreeMap;

use crate::NodeId;

/// Observer handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(pub u32);

/// Mutation observer options
#[derive(Debug, Clone, Default)]
pub struct MutationObserverInit {
    pub attributes: bool,
    pub attribute_filter: Option<Vec<String>>,
}

impl MutationObserverInit {
    /// Watch the named attributes of the target
    pub fn attributes(filter: &[&str]) -> Self {
        Self {
            attributes: true,
            attribute_filter: Some(filter.iter().map(|s| s.to_string()).collect()),
        }
    }

    fn wants_attribute(&self, name: &str) -> bool {
        self.attributes
            && self
                .attribute_filter
                .as_ref()
                .is_none_or(|filter| filter.iter().any(|f| f == name))
    }
}

/// Attribute mutation record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationRecord {
    pub target: NodeId,
    pub attribute_name: String,
}

#[derive(Debug, Default)]
struct Observation {
    targets: Vec<(NodeId, MutationObserverInit)>,
    records: Vec<MutationRecord>,
}

/// All observers of one document
#[derive(Debug, Default)]
pub struct MutationObservers {
    next_id: u32,
    observers: BTreeMap<ObserverId, Observation>,
}

impl MutationObservers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a new observer with no targets
    pub fn create(&mut self) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.observers.insert(id, Observation::default());
        id
    }

    /// Start (or re-configure) observing a target. Returns false for an
    /// unknown observer.
    pub fn observe(&mut self, observer: ObserverId, target: NodeId, init: MutationObserverInit) -> bool {
        let Some(obs) = self.observers.get_mut(&observer) else { return false };
        match obs.targets.iter_mut().find(|(t, _)| *t == target) {
            Some(entry) => entry.1 = init,
            None => obs.targets.push((target, init)),
        }
        true
    }

    /// Disconnect and forget an observer, dropping queued records
    pub fn remove(&mut self, observer: ObserverId) -> bool {
        self.observers.remove(&observer).is_some()
    }

    /// Number of live observers
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Queue an attribute record for every observer watching `target`
    pub fn notify_attribute(&mut self, target: NodeId, name: &str) {
        for obs in self.observers.values_mut() {
            if obs.targets.iter().any(|(t, init)| *t == target && init.wants_attribute(name)) {
                obs.records.push(MutationRecord { target, attribute_name: name.to_string() });
            }
        }
    }

    /// Take the queued records of one observer
    pub fn take_records(&mut self, observer: ObserverId) -> Vec<MutationRecord> {
        self.observers
            .get_mut(&observer)
            .map(|o| std::mem::take(&mut o.records))
            .unwrap_or_default()
    }

    pub fn has_pending(&self) -> bool {
        self.observers.values().any(|o| !o.records.is_empty())
    }

    /// Take all queued records, grouped by observer in creation order
    pub fn drain_pending(&mut self) -> Vec<(ObserverId, Vec<MutationRecord>)> {
        self.observers
            .iter_mut()
            .filter(|(_, o)| !o.records.is_empty())
            .map(|(id, o)| (*id, std::mem::take(&mut o.records)))
            .collect()
    }
}
