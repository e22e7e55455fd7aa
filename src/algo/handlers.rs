//! Event handler differ
//!
//! Handlers are compared per [`EventKind`], in the fixed order of
//! [`EventKind::ALL`]. With listener caching on, a handler redeclared under the
//! same non-empty cache key keeps its native listener: the listener and the
//! callback it was registered with move onto the new node and no change is
//! emitted.

use std::sync::Arc;

use crate::error::ContractViolation;
use crate::event::EventKind;
use crate::node::{HandlerSlot, Handlers, NodeId};

use super::Change;

/// Diff the handlers of one node.
///
/// `old` is `None` for fresh nodes. Listeners of removed or re-registered
/// handlers are taken out of `old`; carried listeners are moved into `new`.
pub fn diff_handlers(
    node: NodeId,
    old: Option<&mut Handlers>,
    new: &mut Handlers,
    cache_listeners: bool,
) -> Result<Vec<Change>, ContractViolation> {
    let mut changes = Vec::new();
    diff_handlers_into(&mut changes, node, old, new, cache_listeners)?;
    Ok(changes)
}

/// Returns the number of listeners carried over.
pub(crate) fn diff_handlers_into(
    out: &mut Vec<Change>,
    node: NodeId,
    mut old: Option<&mut Handlers>,
    new: &mut Handlers,
    cache_listeners: bool,
) -> Result<usize, ContractViolation> {
    let mut carried = 0;

    for &kind in EventKind::ALL {
        let old_slot = old.as_deref_mut().and_then(|handlers| handlers.get_mut(kind));
        let new_slot = new.get_mut(kind);

        match (old_slot, new_slot) {
            (None, None) => {}
            (Some(old_slot), None) => {
                out.push(remove_listener(node, old_slot)?);
            }
            (None, Some(new_slot)) => {
                out.push(add_listener(node, new_slot));
            }
            (Some(old_slot), Some(new_slot)) => {
                if cache_listeners && same_cache_key(old_slot, new_slot) {
                    carry_listener(node, old_slot, new_slot)?;
                    carried += 1;
                } else {
                    out.push(remove_listener(node, old_slot)?);
                    out.push(add_listener(node, new_slot));
                }
            }
        }
    }

    Ok(carried)
}

/// Emit listener registrations for every handler of an unmounted node.
pub(crate) fn fresh_listeners(out: &mut Vec<Change>, node: NodeId, handlers: &Handlers) {
    for &kind in EventKind::ALL {
        if let Some(slot) = handlers.get(kind) {
            out.push(add_listener(node, slot));
        }
    }
}

fn same_cache_key(old: &HandlerSlot, new: &HandlerSlot) -> bool {
    matches!((old.cache_key(), new.cache_key()), (Some(a), Some(b)) if a == b)
}

fn add_listener(node: NodeId, slot: &HandlerSlot) -> Change {
    Change::AddListener {
        node,
        kind: slot.kind(),
        callback: Arc::clone(&slot.callback),
    }
}

fn remove_listener(node: NodeId, slot: &mut HandlerSlot) -> Result<Change, ContractViolation> {
    let kind = slot.kind();
    let listener = slot
        .take_listener()
        .ok_or(ContractViolation::MissingListener { kind, node })?;
    Ok(Change::RemoveListener {
        node,
        kind,
        listener,
    })
}

fn carry_listener(
    node: NodeId,
    old: &mut HandlerSlot,
    new: &mut HandlerSlot,
) -> Result<(), ContractViolation> {
    let kind = old.kind();
    let listener = old
        .take_listener()
        .ok_or(ContractViolation::MissingListener { kind, node })?;
    new.callback = Arc::clone(&old.callback);
    match new.attach_listener(listener) {
        None => Ok(()),
        Some(_) => Err(ContractViolation::DuplicateListener { kind, node }),
    }
}
