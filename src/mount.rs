//! Mounting virtual trees onto a surface
//!
//! A [`Mounter`] owns one surface, the live root element trees are mounted
//! under, and the last tree it mounted. Each [`Mounter::mount`] reconciles the
//! new tree against the last one and applies the resulting changes in order.
//!
//! Changes address nodes by pre-order [`NodeId`]. Applying resolves them
//! through a flat index of the new tree built once per mount; live objects and
//! listeners created along the way are stored into the tree in one walk after
//! the last change.
//!
//! # Failure
//!
//! Changes are applied without rollback. If any change fails, the surface may
//! be half-updated and the bindings in the stored tree may not match it, so the
//! Mounter is *poisoned*: every later `mount` fails with
//! [`MountError::Poisoned`]. Recover by building a new Mounter on a fresh root.
//!
//! # Example
//!
//! ```
//! use tola_mount::mount::Mounter;
//! use tola_mount::node::Element;
//! use tola_mount::surface::MemorySurface;
//!
//! let surface = MemorySurface::new();
//! let root = surface.body();
//! let mut mounter = Mounter::new(surface, root);
//!
//! mounter.mount(Element::new("p").with_id("msg").text("one").into()).unwrap();
//! mounter.mount(Element::new("p").with_id("msg").text("two").into()).unwrap();
//!
//! let surface = mounter.surface().unwrap();
//! assert_eq!(surface.to_html(), r#"<body><p id="msg">two</p></body>"#);
//! ```

use std::ops::ControlFlow;

use rustc_hash::FxHashMap;

use crate::algo::{Change, Parent, ReconcileConfig, ReconcileStats, reconcile_with_config};
use crate::error::{ContractViolation, MountError, MountResult};
use crate::event::EventKind;
use crate::handle::{ElementHandle, ListenerHandle, NodeHandle};
use crate::node::{Node, NodeId};
use crate::surface::{CanvasSize, Surface};

// =============================================================================
// Configuration
// =============================================================================

/// Configuration for a [`Mounter`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MountConfig {
    /// Reconciler settings
    pub reconcile: ReconcileConfig,
    /// Size requested for every canvas draw
    pub canvas: CanvasSize,
}

/// Statistics from one [`Mounter::mount`]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MountStats {
    /// Number of changes applied to the surface
    pub changes_applied: usize,
    /// Statistics of the reconcile pass
    pub reconcile: ReconcileStats,
}

// =============================================================================
// Mounter
// =============================================================================

/// Applies successive virtual trees to a surface.
pub struct Mounter<S> {
    surface: Option<S>,
    root: Option<ElementHandle>,
    last: Option<Node>,
    config: MountConfig,
    poisoned: bool,
}

impl<S: Surface> Mounter<S> {
    /// Create a Mounter drawing under `root`.
    pub fn new(surface: S, root: ElementHandle) -> Self {
        Self {
            surface: Some(surface),
            root: Some(root),
            last: None,
            config: MountConfig::default(),
            poisoned: false,
        }
    }

    /// Create a Mounter with no surface and no root yet.
    pub fn detached() -> Self {
        Self {
            surface: None,
            root: None,
            last: None,
            config: MountConfig::default(),
            poisoned: false,
        }
    }

    /// Set the surface.
    pub fn with_surface(mut self, surface: S) -> Self {
        self.surface = Some(surface);
        self
    }

    /// Set the root element.
    pub fn with_root(mut self, root: ElementHandle) -> Self {
        self.root = Some(root);
        self
    }

    /// Set the configuration.
    pub fn with_config(mut self, config: MountConfig) -> Self {
        self.config = config;
        self
    }

    /// Use the element with the given `id` attribute as the root.
    ///
    /// A missing element is reported as the recoverable
    /// [`SurfaceError::NotFound`](crate::error::SurfaceError::NotFound); the
    /// Mounter is left unchanged. On success the last mounted tree is
    /// forgotten, since the new root holds none of it.
    pub fn attach_by_id(&mut self, id: &str) -> MountResult<()> {
        let surface = self
            .surface
            .as_mut()
            .ok_or(MountError::Config { missing: "surface" })?;
        let root = surface.find_element(id)?;
        tracing::debug!(id, root = %root, "attached mount root");
        self.root = Some(root);
        self.last = None;
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// The last tree passed to [`mount`](Self::mount).
    pub fn last(&self) -> Option<&Node> {
        self.last.as_ref()
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    pub fn root(&self) -> Option<&ElementHandle> {
        self.root.as_ref()
    }

    pub fn config(&self) -> &MountConfig {
        &self.config
    }

    /// Check if an earlier render failed.
    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }

    /// Give back the surface.
    pub fn into_surface(self) -> Option<S> {
        self.surface
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mounting
    // ─────────────────────────────────────────────────────────────────────────

    /// Make the surface under the root match `tree`.
    ///
    /// The tree becomes the new [`last`](Self::last) tree as soon as it has
    /// been reconciled, before any change is applied.
    pub fn mount(&mut self, mut tree: Node) -> MountResult<MountStats> {
        if self.poisoned {
            return Err(MountError::Poisoned);
        }
        let Self {
            surface,
            root,
            last,
            config,
            poisoned,
        } = self;
        let Some(surface) = surface.as_mut() else {
            return Err(MountError::Config { missing: "surface" });
        };
        let Some(root) = root.as_ref() else {
            return Err(MountError::Config { missing: "root element" });
        };

        let span = tracing::debug_span!("mount", initial = last.is_none());
        let _guard = span.enter();

        let reconciliation = match reconcile_with_config(last.as_mut(), &mut tree, config.reconcile)
        {
            Ok(reconciliation) => reconciliation,
            Err(err) => {
                *poisoned = true;
                tracing::error!(%err, "reconcile failed, mounter poisoned");
                return Err(err.into());
            }
        };
        let mut stats = MountStats {
            changes_applied: 0,
            reconcile: reconciliation.stats,
        };
        tracing::debug!(
            changes = reconciliation.changes.len(),
            kept = stats.reconcile.nodes_kept,
            "reconciled"
        );

        let tree = last.insert(tree);
        if reconciliation.changes.is_empty() {
            return Ok(stats);
        }

        let mut applier = Applier::new(surface, root, tree, config.canvas);
        let mut outcome = Ok(());
        for change in reconciliation.changes {
            tracing::trace!(kind = %change.kind(), "apply");
            if let Err(err) = applier.apply(change) {
                outcome = Err(err);
                break;
            }
            stats.changes_applied += 1;
        }
        applier.into_pending().commit(tree);

        if let Err(err) = outcome {
            *poisoned = true;
            tracing::error!(
                %err,
                applied = stats.changes_applied,
                "apply failed, mounter poisoned"
            );
            return Err(err);
        }
        Ok(stats)
    }
}

impl<S: Surface + Default> Default for Mounter<S> {
    fn default() -> Self {
        Self::detached().with_surface(S::default())
    }
}

// =============================================================================
// Change Application
// =============================================================================

/// Live object created for a new-tree node during one apply pass.
enum Created {
    Element(ElementHandle),
    Text(NodeHandle),
}

impl Created {
    fn as_node(&self) -> &NodeHandle {
        match self {
            Self::Element(handle) => handle.as_node(),
            Self::Text(handle) => handle,
        }
    }
}

/// Bindings of the new tree during one apply pass.
///
/// Nodes are looked up by id in a flat pre-order index of the tree. Objects
/// created by this pass are kept beside it until [`Pending::commit`].
struct Bindings<'t> {
    nodes: Vec<&'t Node>,
    created: FxHashMap<NodeId, Created>,
}

impl<'t> Bindings<'t> {
    fn new(tree: &'t Node) -> Self {
        Self {
            nodes: tree.walk().map(|(_, node)| node).collect(),
            created: FxHashMap::default(),
        }
    }

    fn get(&self, id: NodeId) -> Result<&'t Node, ContractViolation> {
        self.nodes
            .get(id.index())
            .copied()
            .ok_or(ContractViolation::DanglingNode { node: id })
    }

    /// Create the live object for node `id`.
    fn materialize<S: Surface>(&mut self, surface: &mut S, id: NodeId) -> MountResult<()> {
        let node = self.get(id)?;
        if node.is_mounted() || self.created.contains_key(&id) {
            return Err(ContractViolation::AlreadyMounted { node: id }.into());
        }
        let created = match node {
            Node::Element(elem) => {
                if elem.tag.is_empty() {
                    return Err(ContractViolation::EmptyTag { node: id }.into());
                }
                Created::Element(surface.create_element(&elem.tag)?)
            }
            Node::Text(text) => Created::Text(surface.create_text(&text.content)?),
        };
        self.created.insert(id, created);
        Ok(())
    }

    fn node(&self, id: NodeId) -> Result<&NodeHandle, ContractViolation> {
        if let Some(created) = self.created.get(&id) {
            return Ok(created.as_node());
        }
        self.get(id)?
            .binding()
            .ok_or(ContractViolation::Unmounted { node: id })
    }

    fn element(&self, id: NodeId) -> Result<&ElementHandle, ContractViolation> {
        match self.created.get(&id) {
            Some(Created::Element(handle)) => return Ok(handle),
            Some(Created::Text(_)) => return Err(ContractViolation::NotAnElement { node: id }),
            None => {}
        }
        self.get(id)?
            .as_element()
            .ok_or(ContractViolation::NotAnElement { node: id })?
            .binding()
            .ok_or(ContractViolation::Unmounted { node: id })
    }

    fn parent<'s>(
        &'s self,
        root: &'s ElementHandle,
        parent: Parent,
    ) -> Result<&'s NodeHandle, ContractViolation> {
        let Parent::Node(id) = parent else {
            return Ok(root.as_node());
        };
        match self.element(id) {
            Ok(handle) => Ok(handle.as_node()),
            Err(ContractViolation::Unmounted { node }) => {
                Err(ContractViolation::UnmountedParent { node })
            }
            Err(err) => Err(err),
        }
    }
}

/// Applies changes to the surface in order.
struct Applier<'t, S> {
    surface: &'t mut S,
    root: &'t ElementHandle,
    bindings: Bindings<'t>,
    listeners: FxHashMap<(NodeId, EventKind), ListenerHandle>,
    canvas: CanvasSize,
}

impl<'t, S: Surface> Applier<'t, S> {
    fn new(surface: &'t mut S, root: &'t ElementHandle, tree: &'t Node, canvas: CanvasSize) -> Self {
        Self {
            surface,
            root,
            bindings: Bindings::new(tree),
            listeners: FxHashMap::default(),
            canvas,
        }
    }

    fn apply(&mut self, change: Change) -> MountResult<()> {
        match change {
            Change::Insert { parent, node } => {
                self.bindings.materialize(&mut *self.surface, node)?;
                let parent = self.bindings.parent(self.root, parent)?;
                let child = self.bindings.node(node)?;
                self.surface.append_child(parent, child)?;
            }
            Change::Replace { parent, old, node } => {
                self.bindings.materialize(&mut *self.surface, node)?;
                let parent = self.bindings.parent(self.root, parent)?;
                let child = self.bindings.node(node)?;
                self.surface.replace_child(parent, old, child)?;
            }
            Change::Remove { parent, node } => {
                let parent = self.bindings.parent(self.root, parent)?;
                self.surface.remove_child(parent, node)?;
            }
            Change::SetAttribute { node, key, value } => {
                let element = self.bindings.element(node)?;
                self.surface.set_attribute(element, &key, &value)?;
            }
            Change::DeleteAttribute { node, key } => {
                let element = self.bindings.element(node)?;
                self.surface.remove_attribute(element, &key)?;
            }
            Change::SetValue { node, value } => {
                let element = self.bindings.element(node)?;
                self.surface.set_value(element, &value)?;
            }
            Change::AddListener {
                node,
                kind,
                callback,
            } => {
                let target = self.bindings.node(node)?;
                let slot = self
                    .bindings
                    .get(node)?
                    .handlers()
                    .get(kind)
                    .ok_or(ContractViolation::UndeclaredHandler { kind, node })?;
                if slot.is_mounted() || self.listeners.contains_key(&(node, kind)) {
                    return Err(ContractViolation::DuplicateListener { kind, node }.into());
                }
                let listener = self.surface.add_listener(target, kind, callback)?;
                self.listeners.insert((node, kind), listener);
            }
            Change::RemoveListener {
                node,
                kind,
                listener,
            } => {
                let target = self.bindings.node(node)?;
                self.surface.remove_listener(target, kind, listener)?;
            }
            Change::DrawCanvas { node, draw } => {
                let element = self.bindings.element(node)?;
                let ctx = self.surface.drawing_context(element, self.canvas)?;
                draw(ctx);
            }
        }
        Ok(())
    }

    fn into_pending(self) -> Pending {
        Pending {
            created: self.bindings.created,
            listeners: self.listeners,
        }
    }
}

/// Live objects and listeners created by an apply pass, not yet stored in the
/// tree.
struct Pending {
    created: FxHashMap<NodeId, Created>,
    listeners: FxHashMap<(NodeId, EventKind), ListenerHandle>,
}

impl Pending {
    /// Store everything into `tree` in one pre-order walk.
    fn commit(mut self, tree: &mut Node) {
        if self.created.is_empty() && self.listeners.is_empty() {
            return;
        }
        tree.visit_mut(|id, node| {
            if let Some(created) = self.created.remove(&id) {
                match (&mut *node, created) {
                    (Node::Element(elem), Created::Element(handle)) => elem.binding = Some(handle),
                    (Node::Text(text), Created::Text(handle)) => text.binding = Some(handle),
                    // materialize picks the variant from the node itself
                    _ => {}
                }
            }
            if !self.listeners.is_empty() {
                for slot in node.handlers_mut().iter_mut() {
                    if let Some(listener) = self.listeners.remove(&(id, slot.kind())) {
                        let _ = slot.attach_listener(listener);
                    }
                }
            }
            if self.created.is_empty() && self.listeners.is_empty() {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use super::*;
    use crate::event::{Event, EventKind};
    use crate::node::{Element, Text};
    use crate::surface::{DrawCommand, MemorySurface, SurfaceCall};

    fn mounter() -> Mounter<MemorySurface> {
        let surface = MemorySurface::new();
        let root = surface.body();
        Mounter::new(surface, root)
    }

    fn surface(mounter: &Mounter<MemorySurface>) -> &MemorySurface {
        mounter.surface().unwrap()
    }

    fn counter_view(count: u32, log: &Arc<Mutex<Vec<String>>>) -> Node {
        let log = Arc::clone(log);
        Element::new("div")
            .with_id("app")
            .child(Element::new("span").with_id("count").text(count.to_string()))
            .child(
                Element::new("button")
                    .with_id("inc")
                    .on_click_cached("inc", move |_| log.lock().push("inc".to_owned()))
                    .text("+"),
            )
            .into()
    }

    #[test]
    fn test_missing_surface_or_root() {
        let mut mounter: Mounter<MemorySurface> = Mounter::detached();
        let err = mounter.mount(Element::new("div").into()).unwrap_err();
        assert!(matches!(err, MountError::Config { missing: "surface" }));

        let mut mounter = Mounter::<MemorySurface>::default();
        let err = mounter.mount(Element::new("div").into()).unwrap_err();
        assert!(matches!(err, MountError::Config { missing: "root element" }));
        assert!(!mounter.is_poisoned());
    }

    #[test]
    fn test_initial_mount_builds_surface() {
        let mut mounter = mounter();
        let log = Arc::new(Mutex::new(Vec::new()));
        let stats = mounter.mount(counter_view(0, &log)).unwrap();

        assert_eq!(stats.reconcile.nodes_inserted, 5);
        assert_eq!(
            surface(&mounter).to_html(),
            r#"<body><div id="app"><span id="count">0</span><button id="inc">+</button></div></body>"#
        );
        assert_eq!(surface(&mounter).live_count(), 5);
        assert_eq!(surface(&mounter).listener_count(), 1);
        assert!(mounter.last().unwrap().walk().all(|(_, node)| node.is_mounted()));
    }

    #[test]
    fn test_remount_of_equal_tree_touches_nothing() {
        let mut mounter = mounter();
        let log = Arc::new(Mutex::new(Vec::new()));
        let _ = mounter.mount(counter_view(1, &log)).unwrap();
        mounter.surface_mut().unwrap().clear_calls();

        let stats = mounter.mount(counter_view(1, &log)).unwrap();
        assert_eq!(stats.changes_applied, 0);
        assert_eq!(stats.reconcile.listeners_carried, 1);
        assert!(surface(&mounter).calls().is_empty());
    }

    #[test]
    fn test_update_replaces_only_changed_text() {
        let mut mounter = mounter();
        let log = Arc::new(Mutex::new(Vec::new()));
        let _ = mounter.mount(counter_view(1, &log)).unwrap();
        mounter.surface_mut().unwrap().clear_calls();

        let _ = mounter.mount(counter_view(2, &log)).unwrap();
        let calls = surface(&mounter).calls();
        assert!(matches!(
            calls,
            [SurfaceCall::CreateText { content, .. }, SurfaceCall::ReplaceChild { .. }] if content == "2"
        ));
        assert!(surface(&mounter).to_html().contains(r#"<span id="count">2</span>"#));
        assert_eq!(surface(&mounter).live_count(), 5);
    }

    #[test]
    fn test_click_reaches_carried_callback() {
        let mut mounter = mounter();
        let log = Arc::new(Mutex::new(Vec::new()));
        let _ = mounter.mount(counter_view(0, &log)).unwrap();
        let _ = mounter.mount(counter_view(1, &log)).unwrap();

        let fired = surface(&mounter)
            .fire("inc", &Event::new(EventKind::Click))
            .unwrap();
        assert_eq!(fired, 1);
        assert_eq!(*log.lock(), ["inc"]);
    }

    #[test]
    fn test_removed_children_are_released() {
        let mut mounter = mounter();
        let list = |n: usize| -> Node {
            Element::new("ul")
                .with_children((0..n).map(|i| Element::new("li").text(i.to_string())))
                .into()
        };
        let _ = mounter.mount(list(4)).unwrap();
        assert_eq!(surface(&mounter).live_count(), 9);

        let stats = mounter.mount(list(1)).unwrap();
        assert_eq!(stats.reconcile.nodes_removed, 3);
        assert_eq!(surface(&mounter).live_count(), 3);
        assert_eq!(surface(&mounter).to_html(), "<body><ul><li>0</li></ul></body>");
    }

    #[test]
    fn test_handler_removal_unregisters() {
        let mut mounter = mounter();
        let _ = mounter
            .mount(Element::new("a").with_id("link").on_mouseenter(|_| {}).into())
            .unwrap();
        assert_eq!(surface(&mounter).listener_count(), 1);

        let _ = mounter.mount(Element::new("a").with_id("link").into()).unwrap();
        assert_eq!(surface(&mounter).listener_count(), 0);
        assert_eq!(surface(&mounter).fire("link", &Event::new(EventKind::MouseEnter)).unwrap(), 0);
    }

    #[test]
    fn test_input_value_follows_attribute() {
        let mut mounter = mounter();
        let field = |v: &str| -> Node { Element::new("input").with_id("f").attr("value", v).into() };
        let _ = mounter.mount(field("a")).unwrap();
        let _ = mounter.mount(field("b")).unwrap();

        assert_eq!(surface(&mounter).attribute("f", "value"), Some("b"));
        assert_eq!(surface(&mounter).value("f"), Some("b"));
    }

    #[test]
    fn test_canvas_is_redrawn_each_mount() {
        let mut mounter = mounter().with_config(MountConfig {
            canvas: CanvasSize {
                width: 40,
                height: 20,
                scale: 2.0,
            },
            ..MountConfig::default()
        });
        let draws = Arc::new(Mutex::new(0u32));
        let view = |draws: &Arc<Mutex<u32>>| -> Node {
            let draws = Arc::clone(draws);
            Element::new("canvas")
                .with_id("c")
                .draw(move |ctx| {
                    *draws.lock() += 1;
                    let size = ctx.size();
                    ctx.fill_rect(0.0, 0.0, f64::from(size.width), f64::from(size.height));
                })
                .into()
        };

        let _ = mounter.mount(view(&draws)).unwrap();
        let _ = mounter.mount(view(&draws)).unwrap();
        assert_eq!(*draws.lock(), 2);
        assert_eq!(
            surface(&mounter).draw_commands("c"),
            Some(
                &[DrawCommand::FillRect {
                    x: 0.0,
                    y: 0.0,
                    width: 40.0,
                    height: 20.0,
                }][..]
            )
        );
    }

    #[test]
    fn test_failure_poisons() {
        let mut mounter = mounter();
        let err = mounter
            .mount(Element::new("div").child(Element::new("")).into())
            .unwrap_err();
        assert!(matches!(
            err,
            MountError::Contract(ContractViolation::EmptyTag { .. })
        ));
        assert!(mounter.is_poisoned());
        assert!(mounter.last().is_some());

        let err = mounter.mount(Element::new("div").into()).unwrap_err();
        assert!(matches!(err, MountError::Poisoned));
    }

    #[test]
    fn test_attach_by_id() {
        let mut mounter = mounter();
        let _ = mounter
            .mount(Element::new("main").with_id("slot").into())
            .unwrap();

        let err = mounter.attach_by_id("nope").unwrap_err();
        assert!(err.is_not_found());
        assert!(!mounter.is_poisoned());

        mounter.attach_by_id("slot").unwrap();
        assert!(mounter.last().is_none());
        let _ = mounter.mount(Text::new("inside").into()).unwrap();
        assert_eq!(
            surface(&mounter).to_html(),
            r#"<body><main id="slot">inside</main></body>"#
        );
    }

    #[test]
    fn test_deep_tree_mounts() {
        const DEPTH: usize = 20_000;
        let mut mounter = mounter();
        let stats = mounter.mount(crate::algo::testing::chain(DEPTH, "x")).unwrap();
        assert_eq!(stats.changes_applied, DEPTH + 1);
        assert!(mounter.last().unwrap().walk().all(|(_, node)| node.is_mounted()));

        let stats = mounter.mount(crate::algo::testing::chain(DEPTH, "y")).unwrap();
        assert_eq!(stats.changes_applied, 1);
        assert_eq!(surface(&mounter).live_count(), DEPTH + 1);
        assert!(surface(&mounter).to_html().contains("<div>y</div>"));
    }

    #[test]
    fn test_replaced_subtree_is_bound_for_next_mount() {
        let mut mounter = mounter();
        let clicks = Arc::new(Mutex::new(0u32));
        let view = |tag: &str, clicks: &Arc<Mutex<u32>>| -> Node {
            let clicks = Arc::clone(clicks);
            Element::new("div")
                .child(Element::new("p").text("intro"))
                .child(
                    Element::new(tag).child(
                        Element::new("button")
                            .with_id("go")
                            .on_click_cached("go", move |_| *clicks.lock() += 1),
                    ),
                )
                .into()
        };

        let _ = mounter.mount(view("section", &clicks)).unwrap();
        let stats = mounter.mount(view("article", &clicks)).unwrap();
        assert_eq!(stats.reconcile.nodes_replaced, 1);
        let tree = mounter.last().unwrap();
        assert!(tree.walk().all(|(_, node)| node.is_mounted()));
        assert!(
            tree.find(NodeId::from_index(4))
                .unwrap()
                .handlers()
                .get(EventKind::Click)
                .unwrap()
                .is_mounted()
        );

        let stats = mounter.mount(view("article", &clicks)).unwrap();
        assert_eq!(stats.changes_applied, 0);
        assert_eq!(stats.reconcile.listeners_carried, 1);
        assert_eq!(surface(&mounter).fire("go", &Event::new(EventKind::Click)).unwrap(), 1);
        assert_eq!(*clicks.lock(), 1);
        assert_eq!(surface(&mounter).listener_count(), 1);
    }

    #[test]
    fn test_change_for_missing_node_is_rejected() {
        let mut surface = MemorySurface::new();
        let root = surface.body();
        let tree: Node = Element::new("div").into();
        let mut applier = Applier::new(&mut surface, &root, &tree, CanvasSize::default());

        let err = applier
            .apply(Change::Insert {
                parent: Parent::Root,
                node: NodeId::from_index(3),
            })
            .unwrap_err();
        assert!(matches!(
            err,
            MountError::Contract(ContractViolation::DanglingNode { .. })
        ));

        applier
            .apply(Change::Insert {
                parent: Parent::Root,
                node: NodeId::ROOT,
            })
            .unwrap();
        let err = applier
            .apply(Change::Insert {
                parent: Parent::Root,
                node: NodeId::ROOT,
            })
            .unwrap_err();
        assert!(matches!(
            err,
            MountError::Contract(ContractViolation::AlreadyMounted { .. })
        ));
    }
}
