//! Rendering surface adapter boundary
//!
//! The [`Surface`] trait is the only way the crate touches live objects. It
//! mirrors the DOM operations a browser exposes: create, attach, replace,
//! detach, attributes, listeners and 2D drawing.
//!
//! # Handle ownership
//!
//! Operations that end a live object's life take its handle by value:
//! [`Surface::replace_child`] and [`Surface::remove_child`] consume the detached
//! child, [`Surface::remove_listener`] consumes the listener. The adapter owns a
//! detached subtree from then on and releases its live objects and listeners.
//!
//! [`MemorySurface`] is a complete headless adapter used for tests, snapshots
//! and server-side rendering.

mod memory;

pub use memory::{DrawCommand, MemorySurface, RecordingContext, SurfaceCall};

use std::sync::Arc;

use crate::error::SurfaceResult;
use crate::event::{Callback, EventKind};
use crate::handle::{ElementHandle, ListenerHandle, NodeHandle};

/// Draw callback of a canvas element.
pub type CanvasDraw = Arc<dyn Fn(&mut dyn DrawContext) + Send + Sync>;

// =============================================================================
// Canvas
// =============================================================================

/// Logical canvas size and backing-store scale requested before each draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
    /// Device pixels per logical pixel
    pub scale: f64,
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self {
            width: 200,
            height: 100,
            scale: 10.0,
        }
    }
}

/// 2D drawing context handed to canvas draw callbacks.
///
/// Acquiring the context resets the canvas; a draw callback always paints a
/// full frame.
pub trait DrawContext {
    /// Size the context was acquired with.
    fn size(&self) -> CanvasSize;

    /// Clear the whole canvas.
    fn clear(&mut self);

    fn set_fill_style(&mut self, style: &str);

    fn set_stroke_style(&mut self, style: &str);

    fn set_line_width(&mut self, width: f64);

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    fn begin_path(&mut self);

    fn move_to(&mut self, x: f64, y: f64);

    fn line_to(&mut self, x: f64, y: f64);

    fn stroke(&mut self);

    fn fill(&mut self);

    fn fill_text(&mut self, text: &str, x: f64, y: f64);
}

// =============================================================================
// Surface
// =============================================================================

/// Capability set of a rendering surface.
///
/// Every operation may fail with [`SurfaceError`](crate::error::SurfaceError).
/// Failures other than [`SurfaceError::NotFound`](crate::error::SurfaceError::NotFound)
/// from [`find_element`](Surface::find_element) abort the render cycle.
pub trait Surface {
    /// Create a detached element.
    fn create_element(&mut self, tag: &str) -> SurfaceResult<ElementHandle>;

    /// Create a detached text node.
    fn create_text(&mut self, content: &str) -> SurfaceResult<NodeHandle>;

    /// Append `child` as the last child of `parent`.
    fn append_child(&mut self, parent: &NodeHandle, child: &NodeHandle) -> SurfaceResult<()>;

    /// Put `new` in place of `old` under `parent`, releasing `old`.
    fn replace_child(
        &mut self,
        parent: &NodeHandle,
        old: NodeHandle,
        new: &NodeHandle,
    ) -> SurfaceResult<()>;

    /// Detach `child` from `parent`, releasing it.
    fn remove_child(&mut self, parent: &NodeHandle, child: NodeHandle) -> SurfaceResult<()>;

    fn set_attribute(&mut self, element: &ElementHandle, key: &str, value: &str)
    -> SurfaceResult<()>;

    fn remove_attribute(&mut self, element: &ElementHandle, key: &str) -> SurfaceResult<()>;

    /// Set the live value of an input control.
    fn set_value(&mut self, element: &ElementHandle, value: &str) -> SurfaceResult<()>;

    /// Register a native listener.
    fn add_listener(
        &mut self,
        target: &NodeHandle,
        kind: EventKind,
        callback: Callback,
    ) -> SurfaceResult<ListenerHandle>;

    /// Unregister a native listener.
    fn remove_listener(
        &mut self,
        target: &NodeHandle,
        kind: EventKind,
        listener: ListenerHandle,
    ) -> SurfaceResult<()>;

    /// Acquire a reset 2D drawing context for a canvas element.
    fn drawing_context(
        &mut self,
        element: &ElementHandle,
        size: CanvasSize,
    ) -> SurfaceResult<&mut dyn DrawContext>;

    /// Look up an attached element by its `id` attribute.
    fn find_element(&mut self, id: &str) -> SurfaceResult<ElementHandle>;
}
