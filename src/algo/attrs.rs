//! Attribute differ

use rustc_hash::FxHashMap;

use crate::attr::{Attrs, VALUE_ATTR, accepts_live_value};
use crate::node::NodeId;

use super::Change;

/// Diff the attributes of one element.
///
/// Sets come first, in the order of `new`; a `value` set on an input control
/// is followed by a [`Change::SetValue`] so the live control follows the
/// markup. Deletes follow, in the order of `old`.
pub fn diff_attributes(node: NodeId, tag: &str, old: &Attrs, new: &Attrs) -> Vec<Change> {
    let mut changes = Vec::new();
    diff_attributes_into(&mut changes, node, tag, old, new);
    changes
}

pub(crate) fn diff_attributes_into(
    out: &mut Vec<Change>,
    node: NodeId,
    tag: &str,
    old: &Attrs,
    new: &Attrs,
) {
    let previous: FxHashMap<&str, &str> = old
        .iter()
        .map(|(key, value)| (key.as_str(), value.as_str()))
        .collect();
    let live_value = accepts_live_value(tag);

    for (key, value) in new {
        if previous.get(key.as_str()) == Some(&value.as_str()) {
            continue;
        }
        out.push(Change::SetAttribute {
            node,
            key: key.clone(),
            value: value.clone(),
        });
        if live_value && key == VALUE_ATTR {
            out.push(Change::SetValue {
                node,
                value: value.clone(),
            });
        }
    }

    if old.is_empty() {
        return;
    }
    let current: FxHashMap<&str, ()> = new.iter().map(|(key, _)| (key.as_str(), ())).collect();
    for (key, _) in old {
        if !current.contains_key(key.as_str()) {
            out.push(Change::DeleteAttribute {
                node,
                key: key.clone(),
            });
        }
    }
}
