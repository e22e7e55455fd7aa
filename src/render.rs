//! HTML rendering of virtual trees
//!
//! Renders a [`Node`] tree to a static HTML string: server-side first paint,
//! debug snapshots, golden tests. Handlers and canvas draws have no markup and
//! are skipped.

use crate::attr::Attrs;
use crate::node::{Element, Node};

// =============================================================================
// RenderConfig
// =============================================================================

/// Default attribute name for live binding ids.
pub const DEFAULT_ID_ATTR: &str = "data-mount-id";

/// Configuration for HTML rendering.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Emit the inline style as a `style` attribute.
    pub emit_style: bool,
    /// Emit the live binding of mounted elements as an attribute.
    pub emit_ids: bool,
    /// Attribute name for binding ids (default: "data-mount-id").
    pub id_attr_name: String,
}

impl RenderConfig {
    /// Snapshot config (styles, no binding ids).
    pub const SNAPSHOT: Self = Self {
        emit_style: true,
        emit_ids: false,
        id_attr_name: String::new(),
    };

    /// Debug config (styles and binding ids).
    pub const DEBUG: Self = Self {
        emit_style: true,
        emit_ids: true,
        id_attr_name: String::new(),
    };

    /// Set custom attribute name for binding ids.
    pub fn with_id_attr(mut self, attr_name: impl Into<String>) -> Self {
        self.id_attr_name = attr_name.into();
        self
    }

    /// Get the attribute name for binding ids.
    pub fn id_attr(&self) -> &str {
        if self.id_attr_name.is_empty() {
            DEFAULT_ID_ATTR
        } else {
            &self.id_attr_name
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::SNAPSHOT
    }
}

// =============================================================================
// Tree Rendering
// =============================================================================

/// Render a tree to an HTML string.
pub fn render_html(node: &Node, config: &RenderConfig) -> String {
    let mut output = String::new();
    let mut stack = vec![Step::Enter(node)];

    while let Some(step) = stack.pop() {
        let elem = match step {
            Step::Close(tag) => {
                close_tag(&mut output, tag);
                continue;
            }
            Step::Enter(Node::Text(text)) => {
                output.push_str(&escape_html(&text.content));
                continue;
            }
            Step::Enter(Node::Element(elem)) => elem,
        };
        if open_element(elem, config, &mut output) {
            stack.push(Step::Close(&elem.tag));
            stack.extend(elem.children.iter().rev().map(Step::Enter));
        }
    }
    output
}

enum Step<'a> {
    Enter(&'a Node),
    Close(&'a str),
}

/// Write the opening tag. Returns `false` for void elements, which take no
/// children and no closing tag.
fn open_element(elem: &Element, config: &RenderConfig, output: &mut String) -> bool {
    output.push('<');
    output.push_str(&elem.tag);
    render_attrs(&elem.attrs, output);

    if config.emit_style && !elem.style.is_unset() {
        push_attr(output, "style", &elem.style.to_css());
    }

    if config.emit_ids {
        if let Some(binding) = elem.binding() {
            push_attr(output, config.id_attr(), &format!("{:x}", binding.as_raw()));
        }
    }

    if is_void_element(&elem.tag) {
        output.push_str(" />");
        return false;
    }
    output.push('>');
    true
}

pub(crate) fn render_attrs(attrs: &Attrs, output: &mut String) {
    for (name, value) in attrs {
        push_attr(output, name, value);
    }
}

fn push_attr(output: &mut String, name: &str, value: &str) {
    output.push(' ');
    output.push_str(name);
    output.push_str("=\"");
    output.push_str(&escape_attr(value));
    output.push('"');
}

pub(crate) fn close_tag(output: &mut String, tag: &str) {
    output.push_str("</");
    output.push_str(tag);
    output.push('>');
}

/// Escape HTML special characters.
pub(crate) fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape attribute value special characters.
pub(crate) fn escape_attr(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '"' => result.push_str("&quot;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(c),
        }
    }
    result
}

/// Check if element is a void element (self-closing).
pub(crate) fn is_void_element(tag: &str) -> bool {
    matches!(
        tag,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handle::ElementHandle;
    use crate::node::Text;
    use crate::style::Display;

    #[test]
    fn test_render_tree() {
        let tree: Node = Element::new("div")
            .with_id("app")
            .child(Element::new("p").text("a < b"))
            .child(Element::new("input").attr("value", "\"hi\""))
            .into();

        assert_eq!(
            render_html(&tree, &RenderConfig::default()),
            r#"<div id="app"><p>a &lt; b</p><input value="&quot;hi&quot;" /></div>"#
        );
    }

    #[test]
    fn test_render_deep_tree() {
        let mut tree: Node = Text::new("x").into();
        for _ in 0..100_000 {
            tree = Element::new("b").child(tree).into();
        }
        let html = render_html(&tree, &RenderConfig::default());
        assert!(html.starts_with("<b><b>"));
        assert!(html.ends_with("x</b></b>"));
        assert_eq!(html.len(), 100_000 * "<b></b>".len() + 1);
    }

    #[test]
    fn test_render_style() {
        let tree: Node = Element::new("span")
            .styled(|s| s.display(Display::None))
            .into();

        assert_eq!(
            render_html(&tree, &RenderConfig::default()),
            r#"<span style="display:none;"></span>"#
        );

        let config = RenderConfig {
            emit_style: false,
            ..RenderConfig::default()
        };
        assert_eq!(render_html(&tree, &config), "<span></span>");
    }

    #[test]
    fn test_render_binding_ids() {
        let mut elem = Element::new("b");
        elem.binding = Some(ElementHandle::from_raw(123));
        let tree: Node = elem.into();

        let html = render_html(&tree, &RenderConfig::DEBUG);
        assert_eq!(html, r#"<b data-mount-id="7b"></b>"#);

        let html = render_html(&tree, &RenderConfig::DEBUG.with_id_attr("data-live"));
        assert!(html.contains(r#"data-live="7b""#));
        assert!(!render_html(&tree, &RenderConfig::SNAPSHOT).contains("data-mount-id"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<script>"), "&lt;script&gt;");
        assert_eq!(escape_html("a & b"), "a &amp; b");
        assert_eq!(render_html(&Text::new("x&y").into(), &RenderConfig::default()), "x&amp;y");
    }
}
