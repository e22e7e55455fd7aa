//! Helpers for building mounted trees without a surface.

use std::ops::ControlFlow;

use crate::event::EventKind;
use crate::handle::{ElementHandle, ListenerHandle, NodeHandle};
use crate::node::{Element, Node, Text};

/// Bind every node and declared handler of `tree` to made-up live handles.
///
/// Nodes get `1, 2, 3, ...` in pre-order; listeners get `1000 + n`.
pub(crate) fn bind_all(tree: &mut Node) {
    let mut next_listener = 1000;
    tree.visit_mut(|id, node| {
        let raw = id.index() as u64 + 1;
        match &mut *node {
            Node::Element(elem) => elem.binding = Some(ElementHandle::from_raw(raw)),
            Node::Text(text) => text.binding = Some(NodeHandle::from_raw(raw)),
        }
        let handlers = node.handlers_mut();
        for &kind in EventKind::ALL {
            if let Some(slot) = handlers.get_mut(kind) {
                let _ = slot.attach_listener(ListenerHandle::from_raw(next_listener));
                next_listener += 1;
            }
        }
        ControlFlow::Continue(())
    });
}

/// `depth` nested `div`s around a single text leaf.
pub(crate) fn chain(depth: usize, leaf: &str) -> Node {
    let mut node: Node = Text::new(leaf).into();
    for _ in 0..depth {
        node = Element::new("div").child(node).into();
    }
    node
}
