//! Change records emitted by the reconciler
//!
//! A [`Change`] is pure data: it names its target by [`NodeId`] into the
//! *new* tree, except where the target is a live object the new tree no
//! longer holds (the replaced or removed child, the removed listener). Those
//! handles travel inside the change by value.

use std::fmt;

use crate::event::{Callback, EventKind};
use crate::handle::{ListenerHandle, NodeHandle};
use crate::node::NodeId;
use crate::surface::CanvasDraw;

// =============================================================================
// Parent
// =============================================================================

/// Attachment point of an inserted, replaced or removed child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parent {
    /// The live root element the tree is mounted under
    Root,
    /// An element of the new tree
    Node(NodeId),
}

impl Parent {
    /// Id of the parent element, `None` for the mount root.
    pub fn node(self) -> Option<NodeId> {
        match self {
            Self::Root => None,
            Self::Node(id) => Some(id),
        }
    }

    pub fn is_root(self) -> bool {
        matches!(self, Self::Root)
    }
}

impl fmt::Display for Parent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => f.write_str("<mount root>"),
            Self::Node(id) => fmt::Display::fmt(id, f),
        }
    }
}

// =============================================================================
// ChangeKind
// =============================================================================

/// Discriminant of a [`Change`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    Insert,
    Replace,
    Remove,
    SetAttribute,
    DeleteAttribute,
    SetValue,
    AddListener,
    RemoveListener,
    DrawCanvas,
}

impl ChangeKind {
    /// Upper-case name used in logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Insert => "INSERT",
            Self::Replace => "REPLACE",
            Self::Remove => "REMOVE",
            Self::SetAttribute => "ATTR_SET",
            Self::DeleteAttribute => "ATTR_DELETE",
            Self::SetValue => "VALUE_SET",
            Self::AddListener => "LISTENER_ADD",
            Self::RemoveListener => "LISTENER_DELETE",
            Self::DrawCanvas => "CANVAS_DRAW",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Change
// =============================================================================

/// One surface mutation, in application order.
pub enum Change {
    /// Create the live object for `node` and append it to `parent`
    Insert { parent: Parent, node: NodeId },

    /// Create the live object for `node` and put it in place of `old`
    Replace {
        parent: Parent,
        old: NodeHandle,
        node: NodeId,
    },

    /// Detach `node` from `parent`
    Remove { parent: Parent, node: NodeHandle },

    /// Set an attribute (`"style"` carries the serialized inline style)
    SetAttribute {
        node: NodeId,
        key: String,
        value: String,
    },

    /// Delete an attribute
    DeleteAttribute { node: NodeId, key: String },

    /// Push the live value of an input control
    SetValue { node: NodeId, value: String },

    /// Register a native listener for a declared handler
    AddListener {
        node: NodeId,
        kind: EventKind,
        callback: Callback,
    },

    /// Unregister a native listener
    RemoveListener {
        node: NodeId,
        kind: EventKind,
        listener: ListenerHandle,
    },

    /// Run a canvas draw callback
    DrawCanvas { node: NodeId, draw: CanvasDraw },
}

impl Change {
    pub fn kind(&self) -> ChangeKind {
        match self {
            Self::Insert { .. } => ChangeKind::Insert,
            Self::Replace { .. } => ChangeKind::Replace,
            Self::Remove { .. } => ChangeKind::Remove,
            Self::SetAttribute { .. } => ChangeKind::SetAttribute,
            Self::DeleteAttribute { .. } => ChangeKind::DeleteAttribute,
            Self::SetValue { .. } => ChangeKind::SetValue,
            Self::AddListener { .. } => ChangeKind::AddListener,
            Self::RemoveListener { .. } => ChangeKind::RemoveListener,
            Self::DrawCanvas { .. } => ChangeKind::DrawCanvas,
        }
    }

    /// New-tree node this change targets.
    ///
    /// `None` for [`Change::Remove`], whose target only exists on the surface.
    pub fn target(&self) -> Option<NodeId> {
        match self {
            Self::Insert { node, .. }
            | Self::Replace { node, .. }
            | Self::SetAttribute { node, .. }
            | Self::DeleteAttribute { node, .. }
            | Self::SetValue { node, .. }
            | Self::AddListener { node, .. }
            | Self::RemoveListener { node, .. }
            | Self::DrawCanvas { node, .. } => Some(*node),
            Self::Remove { .. } => None,
        }
    }

    /// Check if this change attaches or detaches a live child.
    pub fn is_structural(&self) -> bool {
        matches!(
            self.kind(),
            ChangeKind::Insert | ChangeKind::Replace | ChangeKind::Remove
        )
    }
}

impl fmt::Debug for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Insert { parent, node } => f
                .debug_struct("Insert")
                .field("parent", parent)
                .field("node", node)
                .finish(),
            Self::Replace { parent, old, node } => f
                .debug_struct("Replace")
                .field("parent", parent)
                .field("old", old)
                .field("node", node)
                .finish(),
            Self::Remove { parent, node } => f
                .debug_struct("Remove")
                .field("parent", parent)
                .field("node", node)
                .finish(),
            Self::SetAttribute { node, key, value } => f
                .debug_struct("SetAttribute")
                .field("node", node)
                .field("key", key)
                .field("value", value)
                .finish(),
            Self::DeleteAttribute { node, key } => f
                .debug_struct("DeleteAttribute")
                .field("node", node)
                .field("key", key)
                .finish(),
            Self::SetValue { node, value } => f
                .debug_struct("SetValue")
                .field("node", node)
                .field("value", value)
                .finish(),
            Self::AddListener { node, kind, .. } => f
                .debug_struct("AddListener")
                .field("node", node)
                .field("kind", kind)
                .finish_non_exhaustive(),
            Self::RemoveListener {
                node,
                kind,
                listener,
            } => f
                .debug_struct("RemoveListener")
                .field("node", node)
                .field("kind", kind)
                .field("listener", listener)
                .finish(),
            Self::DrawCanvas { node, .. } => f
                .debug_struct("DrawCanvas")
                .field("node", node)
                .finish_non_exhaustive(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_and_target() {
        let change = Change::SetAttribute {
            node: NodeId::from_index(1),
            key: "id".into(),
            value: "x".into(),
        };
        assert_eq!(change.kind(), ChangeKind::SetAttribute);
        assert_eq!(change.target(), Some(NodeId::from_index(1)));
        assert!(!change.is_structural());

        let change = Change::Remove {
            parent: Parent::Root,
            node: NodeHandle::from_raw(4),
        };
        assert_eq!(change.target(), None);
        assert!(change.is_structural());
    }

    #[test]
    fn test_debug_hides_callbacks() {
        let change = Change::AddListener {
            node: NodeId::ROOT,
            kind: EventKind::Click,
            callback: std::sync::Arc::new(|_| {}),
        };
        let debug = format!("{change:?}");
        assert!(debug.starts_with("AddListener"));
        assert!(debug.contains(".."));
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(ChangeKind::SetAttribute.to_string(), "ATTR_SET");
        assert_eq!(ChangeKind::RemoveListener.as_str(), "LISTENER_DELETE");
    }

    #[test]
    fn test_parent_display() {
        assert_eq!(Parent::Root.to_string(), "<mount root>");
        assert_eq!(Parent::Node(NodeId::from_index(3)).to_string(), "#3");
        assert!(Parent::Root.node().is_none());
    }
}
