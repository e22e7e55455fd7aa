//! Render queue
//!
//! Event handlers never re-render directly. They enqueue application events
//! through a [`Dispatcher`]; a single [`RenderLoop`] drains the [`Inbox`],
//! updates the application state and mounts the next view. Renders are thereby
//! strictly serialized: no render can start while another one is applying
//! changes.
//!
//! # Example
//!
//! ```
//! use tola_mount::dispatch::{channel, App, Dispatcher, RenderLoop};
//! use tola_mount::event::{Event, EventKind};
//! use tola_mount::mount::Mounter;
//! use tola_mount::node::{Element, Node};
//! use tola_mount::surface::MemorySurface;
//!
//! #[derive(Clone)]
//! enum Msg {
//!     Inc,
//! }
//!
//! struct Counter {
//!     count: u32,
//!     dispatcher: Dispatcher<Msg>,
//! }
//!
//! impl App for Counter {
//!     type Event = Msg;
//!
//!     fn update(&mut self, event: Msg) {
//!         match event {
//!             Msg::Inc => self.count += 1,
//!         }
//!     }
//!
//!     fn view(&self) -> Node {
//!         Element::new("button")
//!             .with_id("inc")
//!             .on_click_cached("inc", self.dispatcher.handler(Msg::Inc))
//!             .text(self.count.to_string())
//!             .into()
//!     }
//! }
//!
//! let (dispatcher, inbox) = channel();
//! let surface = MemorySurface::new();
//! let root = surface.body();
//! let app = Counter { count: 0, dispatcher };
//! let mut render_loop = RenderLoop::new(app, Mounter::new(surface, root), inbox);
//!
//! render_loop.render().unwrap();
//! let surface = render_loop.mounter().surface().unwrap();
//! surface.fire("inc", &Event::new(EventKind::Click)).unwrap();
//! assert_eq!(render_loop.run_pending().unwrap(), 1);
//! assert_eq!(render_loop.app().count, 1);
//! ```

use async_channel::{Receiver, Sender, unbounded};

use crate::error::{DispatchError, MountResult};
use crate::event::Event;
use crate::mount::{MountStats, Mounter};
use crate::node::Node;
use crate::surface::Surface;

/// Create a render queue.
pub fn channel<E>() -> (Dispatcher<E>, Inbox<E>) {
    let (sender, receiver) = unbounded();
    (Dispatcher { sender }, Inbox { receiver })
}

// =============================================================================
// Dispatcher
// =============================================================================

/// Sending side of the render queue. Cheap to clone.
pub struct Dispatcher<E> {
    sender: Sender<E>,
}

impl<E> Clone for Dispatcher<E> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<E> std::fmt::Debug for Dispatcher<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("pending", &self.sender.len())
            .field("closed", &self.sender.is_closed())
            .finish()
    }
}

impl<E> Dispatcher<E> {
    /// Enqueue an event.
    pub fn dispatch(&self, event: E) -> Result<(), DispatchError> {
        self.sender.try_send(event).map_err(|_| DispatchError::Closed)
    }

    /// Close the queue for every dispatcher.
    ///
    /// Events already queued are still delivered; the render loop stops once
    /// they are drained. Returns `false` if the queue was already closed.
    pub fn close(&self) -> bool {
        self.sender.close()
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

impl<E: Send + Sync + 'static> Dispatcher<E> {
    /// Build an event handler that enqueues a copy of `event` on every call.
    pub fn handler(&self, event: E) -> impl Fn(&Event) + Send + Sync + 'static
    where
        E: Clone,
    {
        self.map_handler(move |_| event.clone())
    }

    /// Build an event handler that enqueues `f(event)` on every call.
    pub fn map_handler(
        &self,
        f: impl Fn(&Event) -> E + Send + Sync + 'static,
    ) -> impl Fn(&Event) + Send + Sync + 'static {
        let sender = self.sender.clone();
        move |event: &Event| {
            if sender.try_send(f(event)).is_err() {
                tracing::warn!(kind = %event.kind, "dropping event: render queue is closed");
            }
        }
    }
}

// =============================================================================
// Inbox
// =============================================================================

/// Receiving side of the render queue.
pub struct Inbox<E> {
    receiver: Receiver<E>,
}

impl<E> Inbox<E> {
    /// Take the next queued event without waiting.
    pub fn try_next(&self) -> Option<E> {
        self.receiver.try_recv().ok()
    }

    /// Wait for the next event. `None` once the queue is closed and drained.
    pub async fn next(&self) -> Option<E> {
        self.receiver.recv().await.ok()
    }

    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }
}

// =============================================================================
// RenderLoop
// =============================================================================

/// Application driven by a [`RenderLoop`].
pub trait App {
    /// Event type handlers enqueue
    type Event;

    /// Apply one event to the state.
    fn update(&mut self, event: Self::Event);

    /// Build the tree for the current state.
    fn view(&self) -> Node;
}

/// Owns the application state, its render queue and the Mounter.
pub struct RenderLoop<A: App, S> {
    app: A,
    mounter: Mounter<S>,
    inbox: Inbox<A::Event>,
}

impl<A: App, S: Surface> RenderLoop<A, S> {
    pub fn new(app: A, mounter: Mounter<S>, inbox: Inbox<A::Event>) -> Self {
        Self {
            app,
            mounter,
            inbox,
        }
    }

    /// Mount the view of the current state.
    pub fn render(&mut self) -> MountResult<MountStats> {
        let tree = self.app.view();
        self.mounter.mount(tree)
    }

    /// Handle every queued event, re-rendering after each one.
    ///
    /// Returns the number of events handled.
    pub fn run_pending(&mut self) -> MountResult<usize> {
        let mut handled = 0;
        while let Some(event) = self.inbox.try_next() {
            self.step(event)?;
            handled += 1;
        }
        if handled > 0 {
            tracing::debug!(handled, "drained render queue");
        }
        Ok(handled)
    }

    /// Handle events as they arrive until the queue is closed and drained.
    ///
    /// Renders the initial view first if nothing is mounted yet. Returns the
    /// number of events handled.
    #[cfg(feature = "async")]
    pub async fn run(&mut self) -> MountResult<usize> {
        if self.mounter.last().is_none() {
            let _ = self.render()?;
        }
        let mut handled = 0;
        while let Some(event) = self.inbox.next().await {
            self.step(event)?;
            handled += 1;
        }
        tracing::debug!(handled, "render queue closed");
        Ok(handled)
    }

    fn step(&mut self, event: A::Event) -> MountResult<()> {
        self.app.update(event);
        let stats = self.render()?;
        tracing::trace!(changes = stats.changes_applied, "re-rendered");
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn app(&self) -> &A {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut A {
        &mut self.app
    }

    pub fn mounter(&self) -> &Mounter<S> {
        &self.mounter
    }

    pub fn mounter_mut(&mut self) -> &mut Mounter<S> {
        &mut self.mounter
    }

    /// Split the loop back into its parts.
    pub fn into_parts(self) -> (A, Mounter<S>, Inbox<A::Event>) {
        (self.app, self.mounter, self.inbox)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventKind;
    use crate::node::Element;
    use crate::surface::MemorySurface;

    #[derive(Debug, Clone, PartialEq)]
    enum Msg {
        Add(i32),
        Typed(String),
    }

    struct Model {
        total: i32,
        text: String,
        dispatcher: Dispatcher<Msg>,
    }

    impl App for Model {
        type Event = Msg;

        fn update(&mut self, event: Msg) {
            match event {
                Msg::Add(n) => self.total += n,
                Msg::Typed(text) => self.text = text,
            }
        }

        fn view(&self) -> Node {
            Element::new("div")
                .child(
                    Element::new("button")
                        .with_id("add")
                        .on_click_cached("add", self.dispatcher.handler(Msg::Add(2))),
                )
                .child(Element::new("input").with_id("field").on_input_cached(
                    "field",
                    self.dispatcher
                        .map_handler(|event| Msg::Typed(event.value.clone().unwrap_or_default())),
                ))
                .child(
                    Element::new("span")
                        .with_id("out")
                        .text(format!("{} {}", self.total, self.text)),
                )
                .into()
        }
    }

    fn render_loop() -> (RenderLoop<Model, MemorySurface>, Dispatcher<Msg>) {
        let (dispatcher, inbox) = channel();
        let surface = MemorySurface::new();
        let root = surface.body();
        let model = Model {
            total: 0,
            text: String::new(),
            dispatcher: dispatcher.clone(),
        };
        (RenderLoop::new(model, Mounter::new(surface, root), inbox), dispatcher)
    }

    fn output(render_loop: &RenderLoop<Model, MemorySurface>) -> String {
        render_loop.mounter().surface().unwrap().to_html()
    }

    #[test]
    fn test_queue_is_fifo() {
        let (dispatcher, inbox) = channel();
        dispatcher.dispatch(1).unwrap();
        dispatcher.clone().dispatch(2).unwrap();
        assert_eq!(inbox.len(), 2);
        assert_eq!(inbox.try_next(), Some(1));
        assert_eq!(inbox.try_next(), Some(2));
        assert_eq!(inbox.try_next(), None);
    }

    #[test]
    fn test_dispatch_after_inbox_drop() {
        let (dispatcher, inbox) = channel::<u8>();
        drop(inbox);
        assert_eq!(dispatcher.dispatch(1), Err(DispatchError::Closed));
        assert!(dispatcher.is_closed());
    }

    #[test]
    fn test_handler_enqueues_event() {
        let (dispatcher, inbox) = channel();
        let handler = dispatcher.handler(Msg::Add(5));
        handler(&Event::new(EventKind::Click));
        handler(&Event::new(EventKind::Click));
        assert_eq!(inbox.try_next(), Some(Msg::Add(5)));
        assert_eq!(inbox.try_next(), Some(Msg::Add(5)));
    }

    #[test]
    fn test_events_rerender() {
        let (mut render_loop, _dispatcher) = render_loop();
        let _ = render_loop.render().unwrap();
        assert!(output(&render_loop).contains("<span id=\"out\">0 </span>"));

        {
            let surface = render_loop.mounter().surface().unwrap();
            surface.fire("add", &Event::new(EventKind::Click)).unwrap();
            surface.fire("add", &Event::new(EventKind::Click)).unwrap();
            surface
                .fire("field", &Event::new(EventKind::Input).with_value("hi"))
                .unwrap();
        }
        assert_eq!(render_loop.run_pending().unwrap(), 3);
        assert_eq!(render_loop.app().total, 4);
        assert!(output(&render_loop).contains("<span id=\"out\">4 hi</span>"));
        assert_eq!(render_loop.mounter().surface().unwrap().listener_count(), 2);
        assert_eq!(render_loop.run_pending().unwrap(), 0);
    }

    #[cfg(feature = "async")]
    #[tokio::test]
    async fn test_run_until_closed() {
        let (mut render_loop, dispatcher) = render_loop();
        dispatcher.dispatch(Msg::Add(1)).unwrap();
        dispatcher.dispatch(Msg::Add(10)).unwrap();
        assert!(dispatcher.close());

        assert_eq!(render_loop.run().await.unwrap(), 2);
        assert_eq!(render_loop.app().total, 11);
        assert!(output(&render_loop).contains("11"));
    }
}
