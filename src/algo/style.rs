//! Inline style differ

use crate::node::NodeId;
use crate::style::Style;

use super::Change;

/// Attribute carrying the serialized inline style.
pub const STYLE_ATTR: &str = "style";

/// Diff the inline style of one element.
///
/// Styles are compared as a whole: any difference rewrites the `style`
/// attribute with the full serialization of `new`. A style that becomes unset
/// is cleared by writing an empty string. `old` is `None` for fresh elements.
pub fn diff_style(node: NodeId, old: Option<&Style>, new: &Style) -> Option<Change> {
    let unchanged = match old {
        Some(old) => old == new,
        None => new.is_unset(),
    };
    if unchanged {
        return None;
    }

    Some(Change::SetAttribute {
        node,
        key: STYLE_ATTR.to_owned(),
        value: new.to_css(),
    })
}
