//! Reconciliation of virtual trees.
//!
//! - `reconcile`: positional tree reconciler producing ordered changes
//! - `attrs`, `style`, `handlers`, `canvas`: per-node differs
//! - `change`: the change records themselves

mod attrs;
mod canvas;
mod change;
mod handlers;
mod reconcile;
mod style;

#[cfg(test)]
pub(crate) mod testing;

pub use attrs::diff_attributes;
pub use canvas::diff_canvas;
pub use change::{Change, ChangeKind, Parent};
pub use handlers::diff_handlers;
pub use reconcile::{
    ReconcileConfig, ReconcileStats, Reconciliation, reconcile, reconcile_with_config,
};
pub use style::{STYLE_ATTR, diff_style};
