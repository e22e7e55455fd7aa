//! Event handler table of a node
//!
//! A node declares at most one handler per [`EventKind`]. Each declared handler
//! may carry a cache key, and once mounted owns the native listener the surface
//! registered for it.

use std::fmt;
use std::sync::Arc;

use compact_str::CompactString;
use smallvec::SmallVec;

use crate::event::{Callback, Event, EventKind};
use crate::handle::ListenerHandle;

/// One declared handler.
pub struct HandlerSlot {
    kind: EventKind,
    /// Callback invoked when the event fires
    pub callback: Callback,
    cache_key: Option<CompactString>,
    listener: Option<ListenerHandle>,
}

impl HandlerSlot {
    /// Event kind this slot handles.
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// Cache key, if one was declared. An empty key counts as absent.
    pub fn cache_key(&self) -> Option<&str> {
        self.cache_key.as_deref().filter(|key| !key.is_empty())
    }

    /// Native listener registered for this handler, once mounted.
    pub fn listener(&self) -> Option<&ListenerHandle> {
        self.listener.as_ref()
    }

    /// Check if a native listener is attached.
    pub fn is_mounted(&self) -> bool {
        self.listener.is_some()
    }

    pub(crate) fn take_listener(&mut self) -> Option<ListenerHandle> {
        self.listener.take()
    }

    /// Store a freshly registered listener, handing back one that was
    /// already there.
    pub(crate) fn attach_listener(&mut self, listener: ListenerHandle) -> Option<ListenerHandle> {
        self.listener.replace(listener)
    }
}

/// Clones are unmounted: the native listener stays with the original.
impl Clone for HandlerSlot {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            callback: Arc::clone(&self.callback),
            cache_key: self.cache_key.clone(),
            listener: None,
        }
    }
}

impl fmt::Debug for HandlerSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerSlot")
            .field("kind", &self.kind)
            .field("cache_key", &self.cache_key)
            .field("listener", &self.listener)
            .finish_non_exhaustive()
    }
}

/// Sparse table of declared handlers, at most one per event kind.
#[derive(Clone, Debug, Default)]
pub struct Handlers {
    slots: SmallVec<[HandlerSlot; 1]>,
}

impl Handlers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare (or redeclare) the handler for `kind`.
    ///
    /// Redeclaring keeps the native listener of the previous declaration.
    pub fn set(&mut self, kind: EventKind, callback: Callback, cache_key: Option<CompactString>) {
        match self.get_mut(kind) {
            Some(slot) => {
                slot.callback = callback;
                slot.cache_key = cache_key;
            }
            None => self.slots.push(HandlerSlot {
                kind,
                callback,
                cache_key,
                listener: None,
            }),
        }
    }

    /// Declare a handler from a closure.
    pub fn on(&mut self, kind: EventKind, f: impl Fn(&Event) + Send + Sync + 'static) {
        self.set(kind, Arc::new(f), None);
    }

    /// Declare a handler from a closure, with a cache key.
    pub fn on_cached(
        &mut self,
        kind: EventKind,
        key: impl Into<CompactString>,
        f: impl Fn(&Event) + Send + Sync + 'static,
    ) {
        self.set(kind, Arc::new(f), Some(key.into()));
    }

    /// Get the handler declared for `kind`.
    pub fn get(&self, kind: EventKind) -> Option<&HandlerSlot> {
        self.slots.iter().find(|slot| slot.kind == kind)
    }

    pub(crate) fn get_mut(&mut self, kind: EventKind) -> Option<&mut HandlerSlot> {
        self.slots.iter_mut().find(|slot| slot.kind == kind)
    }

    /// Remove the handler declared for `kind`, with its listener if mounted.
    pub fn remove(&mut self, kind: EventKind) -> Option<HandlerSlot> {
        let pos = self.slots.iter().position(|slot| slot.kind == kind)?;
        Some(self.slots.remove(pos))
    }

    /// Check if `kind` has a handler.
    pub fn contains(&self, kind: EventKind) -> bool {
        self.get(kind).is_some()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Iterate over declared handlers, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &HandlerSlot> {
        self.slots.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut HandlerSlot> {
        self.slots.iter_mut()
    }

    /// Number of handlers holding a native listener.
    pub fn mounted_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_mounted()).count()
    }
}
