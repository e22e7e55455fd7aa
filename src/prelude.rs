//! Prelude module for common imports.
//!
//! ```
//! use tola_mount::prelude::*;
//! ```

// Node types
pub use crate::node::{Children, Element, Handlers, Node, NodeId, NodePath, Text};

// Attributes and events
pub use crate::attr::{Attrs, AttrsExt};
pub use crate::event::{Callback, Event, EventKind};

// Style
pub use crate::style::{
    AlignItems, Border, BoxShadow, Cursor, Display, FlexDirection, JustifyContent, Outline,
    Position, Size, Style, TextAlign,
};

// Handles
pub use crate::handle::{ElementHandle, ListenerHandle, NodeHandle};

// Reconciler
pub use crate::algo::{
    Change, ChangeKind, Parent, ReconcileConfig, ReconcileStats, Reconciliation, reconcile,
    reconcile_with_config,
};

// Mounting
pub use crate::mount::{MountConfig, MountStats, Mounter};
pub use crate::surface::{CanvasSize, DrawContext, MemorySurface, Surface};

// Dispatch
pub use crate::dispatch::{App, Dispatcher, Inbox, RenderLoop, channel};

// Error
pub use crate::error::{ContractViolation, MountError, MountResult, SurfaceError, SurfaceResult};

// Render
pub use crate::render::{DEFAULT_ID_ATTR, RenderConfig, render_html};
