//! Element attributes
//!
//! Attributes are plain `(key, value)` string pairs. Keys are unique within one
//! element; order carries no meaning (the attribute differ works on maps).

/// Element attributes as key-value pairs
pub type Attrs = Vec<(String, String)>;

/// Attribute key whose live state diverges from its markup on input controls
pub const VALUE_ATTR: &str = "value";

/// Extension trait for attribute operations on Attrs
pub trait AttrsExt {
    /// Get an attribute value by name
    fn get_attr(&self, name: &str) -> Option<&str>;

    /// Check if an attribute exists
    fn has_attr(&self, name: &str) -> bool;

    /// Set an attribute value, replacing an existing one with the same key
    fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>);

    /// Remove an attribute by name, returning the old value if present
    fn remove_attr(&mut self, name: &str) -> Option<String>;
}

impl AttrsExt for Attrs {
    fn get_attr(&self, name: &str) -> Option<&str> {
        self.iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    fn has_attr(&self, name: &str) -> bool {
        self.iter().any(|(k, _)| k == name)
    }

    fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = value,
            None => self.push((name, value)),
        }
    }

    fn remove_attr(&mut self, name: &str) -> Option<String> {
        let pos = self.iter().position(|(k, _)| k == name)?;
        Some(self.remove(pos).1)
    }
}

/// Check whether elements with this tag keep a live `value` separate from
/// the `value` attribute.
///
/// Covers the native form controls and custom elements named after them
/// (`date-input`, `rich-textarea`, ...).
pub fn accepts_live_value(tag: &str) -> bool {
    const CONTROLS: [&str; 3] = ["input", "textarea", "select"];

    let tag = tag.trim();
    CONTROLS.iter().any(|control| {
        tag.eq_ignore_ascii_case(control)
            || tag
                .len()
                .checked_sub(control.len() + 1)
                .and_then(|split| tag.get(split..))
                .and_then(|suffix| suffix.strip_prefix('-'))
                .is_some_and(|rest| rest.eq_ignore_ascii_case(control))
    })
}

// =============================================================================
// Tests
// =============================================================================
