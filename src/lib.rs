//! tola-mount - Virtual tree reconciler for live UI surfaces
//!
//! ## Core Concepts
//!
//! A view is a plain [`Node`] tree built fresh on every render. A [`Mounter`]
//! reconciles each new tree against the previous one and applies the ordered
//! [`Change`](algo::Change) list to a [`Surface`](surface::Surface), the only
//! component that touches live objects.
//!
//! ## Modules
//! - `node`: Node/Element/Text types, handler tables, node ids and paths
//! - `style`: Sparse inline style model and its CSS serialization
//! - `algo`: Structural reconciler and per-node differs
//! - `mount`: Change application, one render cycle at a time
//! - `surface`: Surface adapter trait and the headless `MemorySurface`
//! - `dispatch`: Render queue serializing event-driven re-renders
//! - `render`: Static HTML rendering
//!
//! ## Usage
//!
//! ```
//! use tola_mount::prelude::*;
//!
//! let surface = MemorySurface::new();
//! let root = surface.body();
//! let mut mounter = Mounter::new(surface, root);
//!
//! let view = |label: &str| -> Node {
//!     Element::new("button")
//!         .with_id("go")
//!         .styled(|s| s.cursor(Cursor::Pointer))
//!         .on_click_cached("go", |_| {})
//!         .text(label)
//!         .into()
//! };
//!
//! mounter.mount(view("Start")).unwrap();
//! let stats = mounter.mount(view("Stop")).unwrap();
//! assert_eq!(stats.changes_applied, 1);
//! assert_eq!(stats.reconcile.listeners_carried, 1);
//! ```

#[macro_use]
mod macros;

// =============================================================================
// Core modules
// =============================================================================

/// Opaque live-object handles
pub mod handle;

/// Attribute types
pub mod attr;

/// Event kinds and payloads
pub mod event;

/// Inline style model
pub mod style;

/// Node types: Element, Node, Text
pub mod node;

/// Algorithms: reconciler and differs
pub mod algo;

/// Surface adapter boundary
pub mod surface;

/// Change application
pub mod mount;

/// Render queue and render loop
pub mod dispatch;

/// Error types
pub mod error;

/// Prelude for common imports
pub mod prelude;

/// HTML rendering
pub mod render;

// =============================================================================
// Re-exports
// =============================================================================

// Node types
pub use node::{Children, Element, Node, NodeId, NodePath, Text};

// Reconciler
pub use algo::{Change, ChangeKind, Reconciliation, reconcile, reconcile_with_config};

// Mounting
pub use mount::{MountConfig, MountStats, Mounter};

// Error types
pub use error::{ContractViolation, MountError, MountResult};
