//! Headless in-memory surface
//!
//! Keeps a table of live objects keyed by raw id, records every call it
//! receives, and lets tests fire events at attached elements.

use std::fmt;

use rustc_hash::FxHashMap;

use crate::attr::{Attrs, AttrsExt};
use crate::error::{SurfaceError, SurfaceResult};
use crate::event::{Callback, Event, EventKind};
use crate::handle::{ElementHandle, ListenerHandle, NodeHandle};
use crate::render::{close_tag, escape_html, is_void_element, render_attrs};

use super::{CanvasSize, DrawContext, Surface};

// =============================================================================
// Recorded calls
// =============================================================================

/// One recorded surface call, with raw ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceCall {
    CreateElement { id: u64, tag: String },
    CreateText { id: u64, content: String },
    AppendChild { parent: u64, child: u64 },
    ReplaceChild { parent: u64, old: u64, new: u64 },
    RemoveChild { parent: u64, child: u64 },
    SetAttribute { element: u64, key: String, value: String },
    RemoveAttribute { element: u64, key: String },
    SetValue { element: u64, value: String },
    AddListener { target: u64, kind: EventKind, listener: u64 },
    RemoveListener { target: u64, kind: EventKind, listener: u64 },
    DrawingContext { element: u64 },
}

/// One recorded canvas operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    FillStyle(String),
    StrokeStyle(String),
    LineWidth(f64),
    FillRect { x: f64, y: f64, width: f64, height: f64 },
    StrokeRect { x: f64, y: f64, width: f64, height: f64 },
    BeginPath,
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    Stroke,
    Fill,
    FillText { text: String, x: f64, y: f64 },
}

/// Drawing context that records commands instead of painting.
#[derive(Debug, Clone, Default)]
pub struct RecordingContext {
    size: CanvasSize,
    commands: Vec<DrawCommand>,
}

impl RecordingContext {
    /// Commands recorded since the context was last acquired.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    fn reset(&mut self, size: CanvasSize) {
        self.size = size;
        self.commands.clear();
    }
}

impl DrawContext for RecordingContext {
    fn size(&self) -> CanvasSize {
        self.size
    }

    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn set_fill_style(&mut self, style: &str) {
        self.commands.push(DrawCommand::FillStyle(style.to_owned()));
    }

    fn set_stroke_style(&mut self, style: &str) {
        self.commands.push(DrawCommand::StrokeStyle(style.to_owned()));
    }

    fn set_line_width(&mut self, width: f64) {
        self.commands.push(DrawCommand::LineWidth(width));
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.commands.push(DrawCommand::FillRect { x, y, width, height });
    }

    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.commands.push(DrawCommand::StrokeRect { x, y, width, height });
    }

    fn begin_path(&mut self) {
        self.commands.push(DrawCommand::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.commands.push(DrawCommand::MoveTo { x, y });
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.commands.push(DrawCommand::LineTo { x, y });
    }

    fn stroke(&mut self) {
        self.commands.push(DrawCommand::Stroke);
    }

    fn fill(&mut self) {
        self.commands.push(DrawCommand::Fill);
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.commands.push(DrawCommand::FillText {
            text: text.to_owned(),
            x,
            y,
        });
    }
}

// =============================================================================
// Live objects
// =============================================================================

enum LiveKind {
    Element {
        tag: String,
        attrs: Attrs,
        value: Option<String>,
        canvas: Option<RecordingContext>,
    },
    Text(String),
}

struct Listener {
    id: u64,
    kind: EventKind,
    callback: Callback,
}

struct LiveObject {
    kind: LiveKind,
    parent: Option<u64>,
    children: Vec<u64>,
    listeners: Vec<Listener>,
}

impl LiveObject {
    fn new(kind: LiveKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
            listeners: Vec::new(),
        }
    }
}

// =============================================================================
// MemorySurface
// =============================================================================

/// Headless [`Surface`] backed by an in-memory object table.
///
/// A `body` element exists from the start and never gets released; mount
/// trees under [`body`](MemorySurface::body).
pub struct MemorySurface {
    objects: FxHashMap<u64, LiveObject>,
    body: u64,
    next_id: u64,
    calls: Vec<SurfaceCall>,
}

impl Default for MemorySurface {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySurface {
    /// Create a surface holding only the `body` element.
    pub fn new() -> Self {
        let mut objects = FxHashMap::default();
        objects.insert(
            1,
            LiveObject::new(LiveKind::Element {
                tag: "body".to_owned(),
                attrs: Attrs::new(),
                value: None,
                canvas: None,
            }),
        );
        Self {
            objects,
            body: 1,
            next_id: 2,
            calls: Vec::new(),
        }
    }

    /// Handle to the `body` element.
    pub fn body(&self) -> ElementHandle {
        ElementHandle::from_raw(self.body)
    }

    /// Calls received so far, in order.
    pub fn calls(&self) -> &[SurfaceCall] {
        &self.calls
    }

    /// Forget recorded calls.
    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// Number of live objects, `body` excluded.
    pub fn live_count(&self) -> usize {
        self.objects.len() - 1
    }

    /// Number of registered listeners across all live objects.
    pub fn listener_count(&self) -> usize {
        self.objects.values().map(|obj| obj.listeners.len()).sum()
    }

    /// Check if a raw id refers to a live object.
    pub fn is_live(&self, raw: u64) -> bool {
        self.objects.contains_key(&raw)
    }

    /// Attribute of the attached element with the given `id`.
    pub fn attribute(&self, id: &str, key: &str) -> Option<&str> {
        match &self.objects.get(&self.lookup(id)?)?.kind {
            LiveKind::Element { attrs, .. } => attrs.get_attr(key),
            LiveKind::Text(_) => None,
        }
    }

    /// Live value of the attached element with the given `id`.
    pub fn value(&self, id: &str) -> Option<&str> {
        match &self.objects.get(&self.lookup(id)?)?.kind {
            LiveKind::Element { value, .. } => value.as_deref(),
            LiveKind::Text(_) => None,
        }
    }

    /// Canvas commands of the last draw on the attached element with the
    /// given `id`.
    pub fn draw_commands(&self, id: &str) -> Option<&[DrawCommand]> {
        match &self.objects.get(&self.lookup(id)?)?.kind {
            LiveKind::Element {
                canvas: Some(ctx), ..
            } => Some(ctx.commands()),
            _ => None,
        }
    }

    /// Fire an event at the attached element with the given `id`.
    ///
    /// Returns how many listeners ran.
    pub fn fire(&self, id: &str, event: &Event) -> SurfaceResult<usize> {
        let raw = self
            .lookup(id)
            .ok_or_else(|| SurfaceError::not_found(format!("element #{id}")))?;
        Ok(self.fire_raw(raw, event))
    }

    /// Fire an event at a live object by raw id. Returns how many listeners ran.
    pub fn fire_raw(&self, raw: u64, event: &Event) -> usize {
        let Some(obj) = self.objects.get(&raw) else {
            return 0;
        };
        let mut ran = 0;
        for listener in obj.listeners.iter().filter(|l| l.kind == event.kind) {
            (listener.callback)(event);
            ran += 1;
        }
        ran
    }

    /// Serialize the `body` subtree as HTML (live values and listeners omitted).
    pub fn to_html(&self) -> String {
        let mut output = String::new();
        self.write_html(self.body, &mut output);
        output
    }

    fn write_html(&self, root: u64, output: &mut String) {
        enum Step<'a> {
            Enter(u64),
            Close(&'a str),
        }

        let mut stack = vec![Step::Enter(root)];
        while let Some(step) = stack.pop() {
            let raw = match step {
                Step::Enter(raw) => raw,
                Step::Close(tag) => {
                    close_tag(output, tag);
                    continue;
                }
            };
            let Some(obj) = self.objects.get(&raw) else {
                continue;
            };
            match &obj.kind {
                LiveKind::Text(content) => output.push_str(&escape_html(content)),
                LiveKind::Element { tag, attrs, .. } => {
                    output.push('<');
                    output.push_str(tag);
                    render_attrs(attrs, output);
                    if is_void_element(tag) {
                        output.push_str(" />");
                        continue;
                    }
                    output.push('>');
                    stack.push(Step::Close(tag));
                    stack.extend(obj.children.iter().rev().map(|&child| Step::Enter(child)));
                }
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internals
    // ─────────────────────────────────────────────────────────────────────────

    fn alloc(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Find an element attached under `body` by its `id` attribute.
    fn lookup(&self, id: &str) -> Option<u64> {
        self.objects
            .iter()
            .filter(|(_, obj)| match &obj.kind {
                LiveKind::Element { attrs, .. } => attrs.get_attr("id") == Some(id),
                LiveKind::Text(_) => false,
            })
            .map(|(&raw, _)| raw)
            .find(|&raw| self.is_attached(raw))
    }

    fn is_attached(&self, mut raw: u64) -> bool {
        loop {
            if raw == self.body {
                return true;
            }
            match self.objects.get(&raw).and_then(|obj| obj.parent) {
                Some(parent) => raw = parent,
                None => return false,
            }
        }
    }

    fn object(&self, raw: u64, operation: &'static str) -> SurfaceResult<&LiveObject> {
        self.objects
            .get(&raw)
            .ok_or_else(|| SurfaceError::rejected(operation, format!("no live object {raw:x}")))
    }

    fn object_mut(&mut self, raw: u64, operation: &'static str) -> SurfaceResult<&mut LiveObject> {
        self.objects
            .get_mut(&raw)
            .ok_or_else(|| SurfaceError::rejected(operation, format!("no live object {raw:x}")))
    }

    fn element_mut(
        &mut self,
        raw: u64,
        operation: &'static str,
    ) -> SurfaceResult<(&mut Attrs, &mut Option<String>, &mut Option<RecordingContext>, &str)> {
        match &mut self.object_mut(raw, operation)?.kind {
            LiveKind::Element {
                tag,
                attrs,
                value,
                canvas,
            } => Ok((attrs, value, canvas, tag.as_str())),
            LiveKind::Text(_) => Err(SurfaceError::rejected(operation, "target is a text node")),
        }
    }

    fn check_container(&self, parent: u64, operation: &'static str) -> SurfaceResult<()> {
        match self.object(parent, operation)?.kind {
            LiveKind::Element { .. } => Ok(()),
            LiveKind::Text(_) => Err(SurfaceError::rejected(operation, "parent is a text node")),
        }
    }

    /// Unlink a node from its current parent, if any.
    fn detach(&mut self, raw: u64) {
        let parent = self.objects.get_mut(&raw).and_then(|obj| obj.parent.take());
        if let Some(parent) = parent.and_then(|parent| self.objects.get_mut(&parent)) {
            parent.children.retain(|&child| child != raw);
        }
    }

    /// Drop a detached subtree with its listeners.
    fn release(&mut self, raw: u64) {
        let mut stack = vec![raw];
        let mut released = 0usize;
        while let Some(raw) = stack.pop() {
            if let Some(obj) = self.objects.remove(&raw) {
                stack.extend(obj.children);
                released += 1;
            }
        }
        tracing::trace!(root = raw, released, "released detached subtree");
    }
}

impl fmt::Debug for MemorySurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemorySurface")
            .field("live", &self.live_count())
            .field("listeners", &self.listener_count())
            .field("calls", &self.calls.len())
            .finish_non_exhaustive()
    }
}

impl Surface for MemorySurface {
    fn create_element(&mut self, tag: &str) -> SurfaceResult<ElementHandle> {
        if tag.is_empty() {
            return Err(SurfaceError::rejected("create_element", "empty tag"));
        }
        let id = self.alloc();
        self.objects.insert(
            id,
            LiveObject::new(LiveKind::Element {
                tag: tag.to_owned(),
                attrs: Attrs::new(),
                value: None,
                canvas: None,
            }),
        );
        self.calls.push(SurfaceCall::CreateElement {
            id,
            tag: tag.to_owned(),
        });
        Ok(ElementHandle::from_raw(id))
    }

    fn create_text(&mut self, content: &str) -> SurfaceResult<NodeHandle> {
        let id = self.alloc();
        self.objects
            .insert(id, LiveObject::new(LiveKind::Text(content.to_owned())));
        self.calls.push(SurfaceCall::CreateText {
            id,
            content: content.to_owned(),
        });
        Ok(NodeHandle::from_raw(id))
    }

    fn append_child(&mut self, parent: &NodeHandle, child: &NodeHandle) -> SurfaceResult<()> {
        let (parent, child) = (parent.as_raw(), child.as_raw());
        self.check_container(parent, "append_child")?;
        // Only a node with children can be an ancestor of `parent`.
        let has_children = !self.object(child, "append_child")?.children.is_empty();
        if parent == child || (has_children && self.is_descendant(parent, child)) {
            return Err(SurfaceError::rejected("append_child", "would create a cycle"));
        }

        self.detach(child);
        self.object_mut(child, "append_child")?.parent = Some(parent);
        self.object_mut(parent, "append_child")?.children.push(child);
        self.calls.push(SurfaceCall::AppendChild { parent, child });
        Ok(())
    }

    fn replace_child(
        &mut self,
        parent: &NodeHandle,
        old: NodeHandle,
        new: &NodeHandle,
    ) -> SurfaceResult<()> {
        let (parent, old, new) = (parent.as_raw(), old.as_raw(), new.as_raw());
        self.check_container(parent, "replace_child")?;
        self.object(new, "replace_child")?;
        if self.object(old, "replace_child")?.parent != Some(parent) {
            return Err(SurfaceError::rejected(
                "replace_child",
                format!("{old:x} is not a child of {parent:x}"),
            ));
        }

        self.detach(new);
        let siblings = &mut self.object_mut(parent, "replace_child")?.children;
        if let Some(slot) = siblings.iter_mut().find(|child| **child == old) {
            *slot = new;
        }
        self.object_mut(new, "replace_child")?.parent = Some(parent);
        self.release(old);
        self.calls.push(SurfaceCall::ReplaceChild { parent, old, new });
        Ok(())
    }

    fn remove_child(&mut self, parent: &NodeHandle, child: NodeHandle) -> SurfaceResult<()> {
        let (parent, child) = (parent.as_raw(), child.as_raw());
        if self.object(child, "remove_child")?.parent != Some(parent) {
            return Err(SurfaceError::rejected(
                "remove_child",
                format!("{child:x} is not a child of {parent:x}"),
            ));
        }

        self.detach(child);
        self.release(child);
        self.calls.push(SurfaceCall::RemoveChild { parent, child });
        Ok(())
    }

    fn set_attribute(
        &mut self,
        element: &ElementHandle,
        key: &str,
        value: &str,
    ) -> SurfaceResult<()> {
        let raw = element.as_raw();
        let (attrs, ..) = self.element_mut(raw, "set_attribute")?;
        attrs.set_attr(key, value);
        self.calls.push(SurfaceCall::SetAttribute {
            element: raw,
            key: key.to_owned(),
            value: value.to_owned(),
        });
        Ok(())
    }

    fn remove_attribute(&mut self, element: &ElementHandle, key: &str) -> SurfaceResult<()> {
        let raw = element.as_raw();
        let (attrs, ..) = self.element_mut(raw, "remove_attribute")?;
        attrs.remove_attr(key);
        self.calls.push(SurfaceCall::RemoveAttribute {
            element: raw,
            key: key.to_owned(),
        });
        Ok(())
    }

    fn set_value(&mut self, element: &ElementHandle, value: &str) -> SurfaceResult<()> {
        let raw = element.as_raw();
        let (_, live, ..) = self.element_mut(raw, "set_value")?;
        *live = Some(value.to_owned());
        self.calls.push(SurfaceCall::SetValue {
            element: raw,
            value: value.to_owned(),
        });
        Ok(())
    }

    fn add_listener(
        &mut self,
        target: &NodeHandle,
        kind: EventKind,
        callback: Callback,
    ) -> SurfaceResult<ListenerHandle> {
        let raw = target.as_raw();
        let id = self.alloc();
        self.object_mut(raw, "add_listener")?
            .listeners
            .push(Listener { id, kind, callback });
        self.calls.push(SurfaceCall::AddListener {
            target: raw,
            kind,
            listener: id,
        });
        Ok(ListenerHandle::from_raw(id))
    }

    fn remove_listener(
        &mut self,
        target: &NodeHandle,
        kind: EventKind,
        listener: ListenerHandle,
    ) -> SurfaceResult<()> {
        let (raw, id) = (target.as_raw(), listener.as_raw());
        let listeners = &mut self.object_mut(raw, "remove_listener")?.listeners;
        let pos = listeners
            .iter()
            .position(|l| l.id == id && l.kind == kind)
            .ok_or_else(|| {
                SurfaceError::rejected("remove_listener", format!("no {kind} listener {id:x}"))
            })?;
        listeners.remove(pos);
        self.calls.push(SurfaceCall::RemoveListener {
            target: raw,
            kind,
            listener: id,
        });
        Ok(())
    }

    fn drawing_context(
        &mut self,
        element: &ElementHandle,
        size: CanvasSize,
    ) -> SurfaceResult<&mut dyn DrawContext> {
        let raw = element.as_raw();
        self.calls.push(SurfaceCall::DrawingContext { element: raw });
        let (_, _, canvas, tag) = self.element_mut(raw, "drawing_context")?;
        if !tag.eq_ignore_ascii_case("canvas") {
            return Err(SurfaceError::rejected("drawing_context", "not a canvas element"));
        }
        let ctx = canvas.get_or_insert_with(RecordingContext::default);
        ctx.reset(size);
        Ok(ctx)
    }

    fn find_element(&mut self, id: &str) -> SurfaceResult<ElementHandle> {
        self.lookup(id)
            .map(ElementHandle::from_raw)
            .ok_or_else(|| SurfaceError::not_found(format!("element #{id}")))
    }
}

impl MemorySurface {
    /// Check if `raw` lies inside the subtree rooted at `ancestor`.
    fn is_descendant(&self, mut raw: u64, ancestor: u64) -> bool {
        loop {
            if raw == ancestor {
                return true;
            }
            match self.objects.get(&raw).and_then(|obj| obj.parent) {
                Some(parent) => raw = parent,
                None => return false,
            }
        }
    }
}
