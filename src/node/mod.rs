//! Virtual tree node types.
//!
//! A tree is plain data built fresh on every render. The only state the crate
//! writes into it is the *binding* of each node to its live surface object,
//! which the reconciler moves from the previous tree into the new one.
//!
//! # Key Features
//!
//! - `Node` is an `Element` / `Text` enum: text nodes cannot carry attributes,
//!   styles or canvas draws by construction
//! - Bindings and native listeners are exclusively owned; cloning a node
//!   yields an unmounted copy
//! - [`NodeId`] numbers nodes in pre-order; [`NodePath`] addresses them by
//!   child index from the root

mod element;
mod handlers;
mod id;
mod path;
mod text;

pub use element::Element;
pub use handlers::{HandlerSlot, Handlers};
pub use id::NodeId;
pub use path::NodePath;
pub use text::Text;

use std::ops::ControlFlow;

use smallvec::SmallVec;

use crate::handle::NodeHandle;

/// Type alias for children collection.
pub type Children = SmallVec<[Node; 4]>;

/// Node in a virtual tree - either Element or Text.
#[derive(Debug, Clone)]
pub enum Node {
    Element(Box<Element>),
    Text(Text),
}

impl Node {
    impl_enum_accessors!(element: Element, text: Text);

    /// Tag name, for elements.
    pub fn tag(&self) -> Option<&str> {
        self.as_element().map(|elem| elem.tag.as_str())
    }

    /// Child nodes (always empty for text).
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Element(elem) => &elem.children,
            Node::Text(_) => &[],
        }
    }

    /// Declared event handlers.
    pub fn handlers(&self) -> &Handlers {
        match self {
            Node::Element(elem) => &elem.handlers,
            Node::Text(text) => &text.handlers,
        }
    }

    /// Mutable declared event handlers.
    pub fn handlers_mut(&mut self) -> &mut Handlers {
        match self {
            Node::Element(elem) => &mut elem.handlers,
            Node::Text(text) => &mut text.handlers,
        }
    }

    /// Live node this tree node is bound to, once mounted.
    pub fn binding(&self) -> Option<&NodeHandle> {
        match self {
            Node::Element(elem) => elem.binding().map(|handle| handle.as_node()),
            Node::Text(text) => text.binding(),
        }
    }

    /// Check if this node is bound to a live object.
    pub fn is_mounted(&self) -> bool {
        self.binding().is_some()
    }

    /// Give up this node's binding.
    pub(crate) fn take_binding(&mut self) -> Option<NodeHandle> {
        match self {
            Node::Element(elem) => elem.binding.take().map(|handle| handle.into_node()),
            Node::Text(text) => text.binding.take(),
        }
    }

    /// Resolve a path relative to this node.
    pub fn at(&self, path: &NodePath) -> Option<&Node> {
        path.indices()
            .try_fold(self, |node, index| node.children().get(index))
    }

    /// Resolve a path relative to this node, mutably.
    pub fn at_mut(&mut self, path: &NodePath) -> Option<&mut Node> {
        path.indices().try_fold(self, |node, index| match node {
            Node::Element(elem) => elem.children.get_mut(index),
            Node::Text(_) => None,
        })
    }

    /// Iterate over this node and its descendants in pre-order, with ids.
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: vec![self],
            next: 0,
        }
    }

    /// Find a node by its pre-order id. Walks the tree up to `id`.
    pub fn find(&self, id: NodeId) -> Option<&Node> {
        self.walk().nth(id.index()).map(|(_, node)| node)
    }

    /// Total number of nodes in this subtree.
    pub fn node_count(&self) -> usize {
        self.walk().count()
    }

    /// Visit this node and its descendants mutably, in pre-order, until `f`
    /// breaks.
    pub(crate) fn visit_mut(&mut self, mut f: impl FnMut(NodeId, &mut Node) -> ControlFlow<()>) {
        let mut stack: Vec<&mut Node> = vec![self];
        let mut next = 0;
        while let Some(node) = stack.pop() {
            if f(NodeId::from_index(next), &mut *node).is_break() {
                return;
            }
            next += 1;
            if let Node::Element(elem) = node {
                stack.extend(elem.children.iter_mut().rev());
            }
        }
    }
}

impl From<Element> for Node {
    fn from(elem: Element) -> Self {
        Node::Element(Box::new(elem))
    }
}

impl From<Text> for Node {
    fn from(text: Text) -> Self {
        Node::Text(text)
    }
}

impl From<&str> for Node {
    fn from(content: &str) -> Self {
        Node::Text(Text::new(content))
    }
}

impl From<String> for Node {
    fn from(content: String) -> Self {
        Node::Text(Text::new(content))
    }
}

/// Pre-order iterator returned by [`Node::walk`].
pub struct Walk<'a> {
    stack: Vec<&'a Node>,
    next: usize,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        let id = NodeId::from_index(self.next);
        self.next += 1;
        self.stack.extend(node.children().iter().rev());
        Some((id, node))
    }
}
