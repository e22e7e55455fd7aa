//! Child-index addressing within one tree
//!
//! A [`NodePath`] lists the child index taken at each level, starting from the
//! root node. The empty path is the root itself.

use std::fmt;

use smallvec::SmallVec;

/// Path from a tree's root to one of its nodes.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodePath(SmallVec<[u32; 8]>);

impl NodePath {
    /// The root node's path.
    pub fn root() -> Self {
        Self::default()
    }

    /// Build a path from child indices.
    pub fn from_indices(indices: impl IntoIterator<Item = u32>) -> Self {
        Self(indices.into_iter().collect())
    }

    /// Path of this node's `index`th child.
    pub fn child(&self, index: usize) -> Self {
        let mut path = self.clone();
        path.push(index);
        path
    }

    /// Descend into the `index`th child in place.
    pub fn push(&mut self, index: usize) {
        self.0.push(u32::try_from(index).unwrap_or(u32::MAX));
    }

    /// Path of the parent, `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        let (_, parent) = self.0.split_last()?;
        Some(Self(parent.iter().copied().collect()))
    }

    /// Child index of this node within its parent, `None` for the root.
    pub fn index(&self) -> Option<usize> {
        self.0.last().map(|&i| i as usize)
    }

    /// Number of levels below the root.
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Child indices from the root down.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().map(|&i| i as usize)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            return f.write_str("<root>");
        }
        for index in &self.0 {
            write!(f, "/{index}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodePath({self})")
    }
}
