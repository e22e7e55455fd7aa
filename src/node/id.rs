//! Pre-order node numbering
//!
//! A [`NodeId`] is the position of a node in a pre-order walk of its tree. The
//! root is `#0` and its first child `#1`; a subtree of `n` nodes rooted at `#k`
//! occupies `#k` up to `#k + n - 1`. Reconciler changes address nodes of the
//! new tree this way, so a single flat index resolves any of them.

use std::fmt;

/// Pre-order index of a node within one tree.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// The root node.
    pub const ROOT: Self = Self(0);

    #[inline]
    pub const fn from_index(index: usize) -> Self {
        Self(index)
    }

    /// Position in pre-order.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }

    pub const fn is_root(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}
