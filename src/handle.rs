//! Opaque references to live surface objects.
//!
//! A surface adapter hands out handles when it materializes an object or
//! registers a listener. The crate never duplicates them:
//!
//! - **Not `Copy`, not `Clone`**: a handle has exactly one owner at a time
//! - **Moved on reconcile**: a surviving node's binding is moved into the new tree
//! - **Consumed on release**: `replace_child`, `remove_child` and
//!   `remove_listener` take the handle by value
//!
//! Adapters build handles from their own raw identifiers with `from_raw`.

use std::fmt;

// =============================================================================
// NodeHandle
// =============================================================================

/// Handle to a live surface node (element or text).
#[derive(PartialEq, Eq, Hash)]
#[must_use]
pub struct NodeHandle(u64);

impl NodeHandle {
    /// Create a handle from the adapter's raw identifier.
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw identifier.
    #[inline]
    pub const fn as_raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for NodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeHandle({:x})", self.0)
    }
}

impl fmt::Display for NodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:x}", self.0)
    }
}

// =============================================================================
// ElementHandle
// =============================================================================

/// Handle to a live element: the node handle plus the element capability
/// (attributes, live value, drawing context).
#[derive(PartialEq, Eq, Hash)]
#[must_use]
pub struct ElementHandle(NodeHandle);

impl ElementHandle {
    /// Create an element handle from the adapter's raw identifier.
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self(NodeHandle(raw))
    }

    /// Get the raw identifier.
    #[inline]
    pub const fn as_raw(&self) -> u64 {
        self.0.0
    }

    /// Borrow the element as a plain node.
    #[inline]
    pub fn as_node(&self) -> &NodeHandle {
        &self.0
    }

    /// Give up the element capability, keeping the node handle.
    #[inline]
    pub fn into_node(self) -> NodeHandle {
        self.0
    }
}

impl fmt::Debug for ElementHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ElementHandle({:x})", self.as_raw())
    }
}

impl fmt::Display for ElementHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

// =============================================================================
// ListenerHandle
// =============================================================================

/// Handle to a native event listener registered on a live node.
#[derive(PartialEq, Eq, Hash)]
#[must_use]
pub struct ListenerHandle(u64);

impl ListenerHandle {
    /// Create a listener handle from the adapter's raw identifier.
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw identifier.
    #[inline]
    pub const fn as_raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for ListenerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ListenerHandle({:x})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_handle_shares_node_identity() {
        let elem = ElementHandle::from_raw(0x2a);
        assert_eq!(elem.as_node().as_raw(), 0x2a);
        assert_eq!(elem.to_string(), "#2a");

        let node = elem.into_node();
        assert_eq!(node, NodeHandle::from_raw(42));
    }

    #[test]
    fn test_handles_are_not_copy() {
        static_assertions::assert_not_impl_any!(NodeHandle: Clone, Copy);
        static_assertions::assert_not_impl_any!(ElementHandle: Clone, Copy);
        static_assertions::assert_not_impl_any!(ListenerHandle: Clone, Copy);
    }

    #[test]
    fn test_debug_is_hex() {
        assert_eq!(format!("{:?}", ListenerHandle::from_raw(255)), "ListenerHandle(ff)");
    }
}
