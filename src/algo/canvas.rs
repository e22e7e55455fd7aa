//! Canvas redraw

use std::sync::Arc;

use crate::node::{Element, NodeId};

use super::Change;

/// Schedule the draw callback of a canvas element.
///
/// Canvas content has no retained model to compare, so every render of a
/// `canvas` element with a draw callback repaints it. Non-canvas elements and
/// canvases without a callback yield nothing.
pub fn diff_canvas(node: NodeId, elem: &Element) -> Option<Change> {
    if !elem.is_canvas() {
        return None;
    }
    let draw = elem.canvas.as_ref()?;
    Some(Change::DrawCanvas {
        node,
        draw: Arc::clone(draw),
    })
}
