//! Text node type

use std::fmt;

use compact_str::CompactString;

use crate::event::{Event, EventKind};
use crate::handle::NodeHandle;

use super::Handlers;

/// Text content node
///
/// Text is never mutated in place: a content change replaces the live node.
pub struct Text {
    /// Text content
    pub content: String,
    /// Declared event handlers
    pub handlers: Handlers,
    pub(crate) binding: Option<NodeHandle>,
}

impl Text {
    /// Create a text node.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            handlers: Handlers::default(),
            binding: None,
        }
    }

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

    /// Live node this text is bound to, once mounted.
    pub fn binding(&self) -> Option<&NodeHandle> {
        self.binding.as_ref()
    }

    pub fn is_mounted(&self) -> bool {
        self.binding.is_some()
    }
}

impl Clone for Text {
    fn clone(&self) -> Self {
        Self {
            content: self.content.clone(),
            handlers: self.handlers.clone(),
            binding: None,
        }
    }
}

impl fmt::Debug for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Text")
            .field("content", &self.content)
            .field("handlers", &self.handlers)
            .field("binding", &self.binding)
            .finish()
    }
}

impl PartialEq<str> for Text {
    fn eq(&self, other: &str) -> bool {
        self.content == other
    }
}
