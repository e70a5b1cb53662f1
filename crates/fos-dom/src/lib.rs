//! fOS DOM - Document Object Model
//!
//! Arena-allocated DOM tree. Besides the tree itself this crate carries the
//! host pieces scripts observe: attributes, class lists, inline style and
//! display rules, box geometry, mutation observers and events.

mod node;
mod tree;
mod document;
mod interner;
pub mod classlist;
pub mod events;
pub mod geometry;
pub mod observer;
pub mod selector;
pub mod style;

pub use node::{Node, NodeData, ElementData, Attribute};
pub use tree::{DomTree, Children, Descendants, Ancestors};
pub use document::{Document, ReadyState};
pub use interner::{StringInterner, InternedString};
pub use classlist::DOMTokenList;
pub use events::{DomEvent, EventType, KeyData};
pub use geometry::{DOMRect, DOMRectList, ElementGeometry};
pub use observer::{MutationObserverInit, MutationObservers, MutationRecord, ObserverId};
pub use selector::SimpleSelector;
pub use style::{Declaration, Display, InlineStyle, StyleRule, StyleSheet};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root (document) node ID
    pub const ROOT: NodeId = NodeId(0);

    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Whether this ID refers to a node slot at all
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    /// Arena index
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// DOM error
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DomError {
    #[error("No such node: {0:?}")]
    UnknownNode(NodeId),

    #[error("Node {0:?} is not an element")]
    NotAnElement(NodeId),

    #[error("Cannot insert {child:?} into {parent:?}")]
    HierarchyRequest { parent: NodeId, child: NodeId },
}

/// Result alias for DOM operations
pub type Result<T> = std::result::Result<T, DomError>;
