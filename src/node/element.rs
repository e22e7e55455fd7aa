//! Element type
//!
//! The core building block of the virtual tree. Elements carry the attribute,
//! style, handler and canvas data that text nodes cannot.

use std::fmt;
use std::sync::Arc;

use compact_str::CompactString;

use crate::attr::{Attrs, AttrsExt};
use crate::event::{Event, EventKind};
use crate::handle::ElementHandle;
use crate::style::{AlignItems, Cursor, Display, JustifyContent, Size, Style};
use crate::surface::{CanvasDraw, DrawContext};

use super::{Children, Handlers, Node, Text};

/// Element with attributes, inline style, handlers and children
pub struct Element {
    /// Tag name, compared case-sensitively
    pub tag: CompactString,
    /// Element attributes
    pub attrs: Attrs,
    /// Inline style
    pub style: Style,
    /// Declared event handlers
    pub handlers: Handlers,
    /// Draw callback, only used by `canvas` elements
    pub canvas: Option<CanvasDraw>,
    /// Child nodes
    pub children: Children,
    pub(crate) binding: Option<ElementHandle>,
}

impl Element {
    /// Create an empty element.
    pub fn new(tag: impl Into<CompactString>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Attrs::new(),
            style: Style::default(),
            handlers: Handlers::default(),
            canvas: None,
            children: Children::new(),
            binding: None,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Attributes
    // ─────────────────────────────────────────────────────────────────────────

    /// Set an attribute.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.set_attr(name, value);
        self
    }

    /// Set the `id` attribute.
    pub fn with_id(self, id: impl Into<String>) -> Self {
        self.attr("id", id)
    }

    /// Set the `class` attribute.
    pub fn with_class(self, class: impl Into<String>) -> Self {
        self.attr("class", class)
    }

    /// Get an attribute value by name.
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.get_attr(name)
    }

    /// The `id` attribute.
    pub fn id(&self) -> Option<&str> {
        self.get_attr("id")
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Children
    // ─────────────────────────────────────────────────────────────────────────

    /// Append a child.
    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append several children.
    pub fn with_children<N: Into<Node>>(mut self, children: impl IntoIterator<Item = N>) -> Self {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    /// Append a text child.
    pub fn text(self, content: impl Into<String>) -> Self {
        self.child(Text::new(content))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Style
    // ─────────────────────────────────────────────────────────────────────────

    /// Replace the inline style.
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Edit the inline style in place.
    pub fn styled(mut self, f: impl FnOnce(Style) -> Style) -> Self {
        self.style = f(std::mem::take(&mut self.style));
        self
    }

    pub fn width_px(self, px: f64) -> Self {
        self.styled(|s| s.width(Size::px(px)))
    }

    pub fn height_px(self, px: f64) -> Self {
        self.styled(|s| s.height(Size::px(px)))
    }

    pub fn padding_px(self, px: f64) -> Self {
        self.styled(|s| s.padding(Size::px(px)))
    }

    pub fn margin_px(self, px: f64) -> Self {
        self.styled(|s| s.margin(Size::px(px)))
    }

    /// Flex container centering its children on both axes.
    pub fn flex_center(self) -> Self {
        self.styled(|s| {
            s.display(Display::Flex)
                .align_items(AlignItems::Center)
                .justify_content(JustifyContent::Center)
        })
    }

    pub fn cursor_pointer(self) -> Self {
        self.styled(|s| s.cursor(Cursor::Pointer))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Handlers and canvas
    // ─────────────────────────────────────────────────────────────────────────

    /// Declare a handler.
    pub fn on(mut self, kind: EventKind, f: impl Fn(&Event) + Send + Sync + 'static) -> Self {
        self.handlers.on(kind, f);
        self
    }

    /// Declare a handler with a cache key.
    pub fn on_cached(
        mut self,
        kind: EventKind,
        key: impl Into<CompactString>,
        f: impl Fn(&Event) + Send + Sync + 'static,
    ) -> Self {
        self.handlers.on_cached(kind, key, f);
        self
    }

    impl_all_handler_builders!();

    /// Set the canvas draw callback.
    pub fn draw(mut self, f: impl Fn(&mut dyn DrawContext) + Send + Sync + 'static) -> Self {
        self.canvas = Some(Arc::new(f));
        self
    }

    /// Check if this element is a drawing surface.
    pub fn is_canvas(&self) -> bool {
        self.tag.eq_ignore_ascii_case("canvas")
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Binding
    // ─────────────────────────────────────────────────────────────────────────

    /// Live element this node is bound to, once mounted.
    pub fn binding(&self) -> Option<&ElementHandle> {
        self.binding.as_ref()
    }

    pub fn is_mounted(&self) -> bool {
        self.binding.is_some()
    }
}

/// Clones are unmounted: live bindings and listeners stay with the original.
impl Clone for Element {
    fn clone(&self) -> Self {
        Self {
            tag: self.tag.clone(),
            attrs: self.attrs.clone(),
            style: self.style.clone(),
            handlers: self.handlers.clone(),
            canvas: self.canvas.clone(),
            children: self.children.clone(),
            binding: None,
        }
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("tag", &self.tag)
            .field("attrs", &self.attrs)
            .field("style", &self.style)
            .field("handlers", &self.handlers)
            .field("canvas", &self.canvas.is_some())
            .field("children", &self.children)
            .field("binding", &self.binding)
            .finish()
    }
}

/// Deep trees are legal input: tear children down iteratively.
impl Drop for Element {
    fn drop(&mut self) {
        let mut stack: Vec<Node> = self.children.drain(..).collect();
        while let Some(mut node) = stack.pop() {
            if let Node::Element(elem) = &mut node {
                stack.extend(elem.children.drain(..));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let elem = Element::new("button")
            .with_id("save")
            .with_class("primary")
            .text("Save")
            .width_px(80.0)
            .cursor_pointer()
            .on_click(|_| {});

        assert_eq!(elem.id(), Some("save"));
        assert_eq!(elem.get_attr("class"), Some("primary"));
        assert_eq!(elem.children.len(), 1);
        assert_eq!(elem.style.width, Some(Size::px(80.0)));
        assert_eq!(elem.style.cursor, Some(Cursor::Pointer));
        assert!(elem.handlers.contains(EventKind::Click));
        assert!(!elem.is_canvas());
    }

    #[test]
    fn test_cached_builder() {
        let elem = Element::new("li").on_dblclick_cached("row-3", |_| {});
        let slot = elem.handlers.get(EventKind::DoubleClick).unwrap();
        assert_eq!(slot.cache_key(), Some("row-3"));
    }

    #[test]
    fn test_clone_is_unmounted() {
        let mut elem = Element::new("div").child(Element::new("span"));
        elem.binding = Some(ElementHandle::from_raw(1));

        let copy = elem.clone();
        assert!(elem.is_mounted());
        assert!(!copy.is_mounted());
        assert_eq!(copy.children.len(), 1);
    }

    #[test]
    fn test_deep_drop() {
        let mut root = Element::new("div");
        for _ in 0..100_000 {
            root = Element::new("div").child(root);
        }
        drop(root);
    }

    #[test]
    fn test_canvas_tag() {
        let canvas = Element::new("CANVAS").draw(|ctx| ctx.clear());
        assert!(canvas.is_canvas());
        assert!(canvas.canvas.is_some());
    }
}
