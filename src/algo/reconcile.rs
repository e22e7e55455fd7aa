//! Tree reconciler
//!
//! Compares the previously mounted tree with a freshly built one and produces
//! the ordered [`Change`] list that brings the surface from the first to the
//! second. Matching is positional: the `i`th child of an old element is only
//! ever compared with the `i`th child of the new one.
//!
//! # Algorithm
//!
//! Pairs of (old, new) nodes are processed from an explicit work stack, so tree
//! depth is bounded by memory rather than the call stack:
//!
//! 1. Elements with the same tag and texts with the same content are kept: the
//!    live binding moves from the old node to the new one, then style, handler,
//!    attribute and canvas changes are emitted.
//! 2. Anything else is replaced: one [`Change::Replace`] for the node, then the
//!    setup of the new node and an insert of each of its children.
//! 3. For kept elements, surplus new children are inserted as full subtrees,
//!    surplus old children are removed, and the common prefix is pushed as new
//!    work items, in ascending sibling order.
//!
//! # Addressing
//!
//! Changes name new-tree nodes by [`NodeId`], their pre-order index. Each work
//! item carries the id of its new node; the ids of a kept element's children
//! follow from the subtree sizes of the new tree, computed once per pass. Every
//! change therefore costs constant space whatever the depth of its target.
//!
//! # Binding transfer
//!
//! Reconciling mutates both trees: bindings and carried listeners are taken out
//! of `old` and stored into `new`. Bindings of replaced and removed nodes leave
//! the trees inside the emitted changes. After a successful pass, `old` holds no
//! binding the surface still needs.

use crate::error::ContractViolation;
use crate::node::{Element, Node, NodeId, Text};

use super::attrs::diff_attributes_into;
use super::canvas::diff_canvas;
use super::handlers::{diff_handlers_into, fresh_listeners};
use super::style::diff_style;
use super::{Change, Parent};

/// Default nesting level past which a warning is logged.
const DEFAULT_DEPTH_WARNING: usize = 512;

// =============================================================================
// Public Types
// =============================================================================

/// Configuration for the reconciler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileConfig {
    /// Carry native listeners across renders for handlers redeclared under
    /// the same non-empty cache key.
    /// Default: true
    pub cache_listeners: bool,
    /// Nesting level past which a warning is logged once per pass.
    /// Default: 512
    pub depth_warning: usize,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            cache_listeners: true,
            depth_warning: DEFAULT_DEPTH_WARNING,
        }
    }
}

impl ReconcileConfig {
    /// Create config with custom settings.
    pub fn new(cache_listeners: bool, depth_warning: usize) -> Self {
        Self {
            cache_listeners,
            depth_warning,
        }
    }

    /// Config that re-registers every listener on every render.
    pub fn uncached() -> Self {
        Self {
            cache_listeners: false,
            ..Self::default()
        }
    }
}

/// Statistics from a reconcile pass
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct ReconcileStats {
    /// Number of element pairs compared
    pub elements_compared: usize,
    /// Number of text pairs compared
    pub text_nodes_compared: usize,
    /// Number of nodes whose live object was kept
    pub nodes_kept: usize,
    /// Number of nodes inserted (including descendants of replacements)
    pub nodes_inserted: usize,
    /// Number of nodes replaced
    pub nodes_replaced: usize,
    /// Number of surplus old children removed
    pub nodes_removed: usize,
    /// Number of native listeners carried over by cache key
    pub listeners_carried: usize,
    /// Deepest nesting level visited
    pub max_level: usize,
}

/// Result of a reconcile pass
#[derive(Debug)]
#[must_use]
pub struct Reconciliation {
    /// Changes in application order
    pub changes: Vec<Change>,
    /// Statistics about the pass
    pub stats: ReconcileStats,
}

impl Reconciliation {
    /// Check if any changes were produced
    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

// =============================================================================
// Public API
// =============================================================================

/// Reconcile `new` against the previously mounted tree.
///
/// With `old == None` the whole of `new` is inserted under the mount root.
///
/// # Example
///
/// ```
/// use tola_mount::algo::{reconcile, ChangeKind};
/// use tola_mount::node::{Element, Node};
///
/// let mut tree: Node = Element::new("div").with_id("app").text("hi").into();
/// let result = reconcile(None, &mut tree).unwrap();
/// assert_eq!(result.changes[0].kind(), ChangeKind::Insert);
/// assert_eq!(result.stats.nodes_inserted, 2);
/// ```
pub fn reconcile(
    old: Option<&mut Node>,
    new: &mut Node,
) -> Result<Reconciliation, ContractViolation> {
    reconcile_with_config(old, new, ReconcileConfig::default())
}

/// Reconcile with custom configuration.
pub fn reconcile_with_config(
    old: Option<&mut Node>,
    new: &mut Node,
    config: ReconcileConfig,
) -> Result<Reconciliation, ContractViolation> {
    let mut ctx = ReconcileContext::new(config);
    match old {
        None => {
            let _ = ctx.insert_subtree(Parent::Root, NodeId::ROOT, new, 0)?;
        }
        Some(old) => ctx.run(old, new)?,
    }
    Ok(ctx.into_result())
}

// =============================================================================
// Internal Implementation
// =============================================================================

/// One (old, new) pair awaiting comparison.
struct WorkItem<'a> {
    parent: Parent,
    id: NodeId,
    old: &'a mut Node,
    new: &'a mut Node,
    level: usize,
}

/// Internal context for a reconcile pass
struct ReconcileContext {
    changes: Vec<Change>,
    stats: ReconcileStats,
    config: ReconcileConfig,
    depth_warned: bool,
    /// Subtree size of every new-tree node, by pre-order id
    sizes: Vec<usize>,
}

impl ReconcileContext {
    fn new(config: ReconcileConfig) -> Self {
        Self {
            changes: Vec::new(),
            stats: ReconcileStats::default(),
            config,
            depth_warned: false,
            sizes: Vec::new(),
        }
    }

    fn into_result(self) -> Reconciliation {
        Reconciliation {
            changes: self.changes,
            stats: self.stats,
        }
    }

    fn run(&mut self, old: &mut Node, new: &mut Node) -> Result<(), ContractViolation> {
        self.sizes = subtree_sizes(new);
        let mut stack = vec![WorkItem {
            parent: Parent::Root,
            id: NodeId::ROOT,
            old,
            new,
            level: 0,
        }];

        while let Some(item) = stack.pop() {
            self.visit(item.level);
            self.reconcile_pair(item, &mut stack)?;
        }
        Ok(())
    }

    fn reconcile_pair<'a>(
        &mut self,
        item: WorkItem<'a>,
        stack: &mut Vec<WorkItem<'a>>,
    ) -> Result<(), ContractViolation> {
        let WorkItem {
            parent,
            id,
            old,
            new,
            level,
        } = item;

        let keep = match (&*old, &*new) {
            (Node::Element(old), Node::Element(new)) => old.tag == new.tag,
            (Node::Text(old), Node::Text(new)) => old.content == new.content,
            _ => false,
        };
        match &*new {
            Node::Element(_) => self.stats.elements_compared += 1,
            Node::Text(_) => self.stats.text_nodes_compared += 1,
        }
        if !keep {
            return self.replace(parent, id, old, new, level);
        }

        match (old, new) {
            (Node::Element(old), Node::Element(new)) => {
                self.keep_element(id, old, new)?;
                self.align_children(id, &mut old.children, &mut new.children, level, stack)
            }
            (Node::Text(old), Node::Text(new)) => self.keep_text(id, old, new),
            // kept pairs always share their kind
            _ => Ok(()),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Kept nodes
    // ─────────────────────────────────────────────────────────────────────────

    fn keep_element(
        &mut self,
        id: NodeId,
        old: &mut Element,
        new: &mut Element,
    ) -> Result<(), ContractViolation> {
        if new.binding.is_some() {
            return Err(ContractViolation::AlreadyMounted { node: id });
        }
        let binding = old
            .binding
            .take()
            .ok_or(ContractViolation::Unmounted { node: id })?;
        new.binding = Some(binding);
        self.stats.nodes_kept += 1;

        self.changes.extend(diff_style(id, Some(&old.style), &new.style));
        self.stats.listeners_carried += diff_handlers_into(
            &mut self.changes,
            id,
            Some(&mut old.handlers),
            &mut new.handlers,
            self.config.cache_listeners,
        )?;
        diff_attributes_into(&mut self.changes, id, &new.tag, &old.attrs, &new.attrs);
        self.changes.extend(diff_canvas(id, new));
        Ok(())
    }

    fn keep_text(
        &mut self,
        id: NodeId,
        old: &mut Text,
        new: &mut Text,
    ) -> Result<(), ContractViolation> {
        if new.binding.is_some() {
            return Err(ContractViolation::AlreadyMounted { node: id });
        }
        let binding = old
            .binding
            .take()
            .ok_or(ContractViolation::Unmounted { node: id })?;
        new.binding = Some(binding);
        self.stats.nodes_kept += 1;

        self.stats.listeners_carried += diff_handlers_into(
            &mut self.changes,
            id,
            Some(&mut old.handlers),
            &mut new.handlers,
            self.config.cache_listeners,
        )?;
        Ok(())
    }

    /// Insert surplus new children, remove surplus old ones, and queue the
    /// common prefix.
    fn align_children<'a>(
        &mut self,
        id: NodeId,
        old: &'a mut [Node],
        new: &'a mut [Node],
        level: usize,
        stack: &mut Vec<WorkItem<'a>>,
    ) -> Result<(), ContractViolation> {
        let shared = old.len().min(new.len());
        let parent = Parent::Node(id);

        let mut child_ids = Vec::with_capacity(new.len());
        let mut next = id.index() + 1;
        for _ in 0..new.len() {
            child_ids.push(NodeId::from_index(next));
            next += self.sizes.get(next).copied().unwrap_or(1);
        }

        for (child, &child_id) in new.iter().zip(&child_ids).skip(shared) {
            let _ = self.insert_subtree(parent, child_id, child, level + 1)?;
        }

        for (index, child) in old.iter_mut().enumerate().skip(shared) {
            let handle = child
                .take_binding()
                .ok_or(ContractViolation::UnmountedChild { parent: id, index })?;
            self.changes.push(Change::Remove {
                parent,
                node: handle,
            });
            self.stats.nodes_removed += 1;
        }

        let pairs = old.iter_mut().zip(new.iter_mut()).enumerate().rev();
        for (index, (old, new)) in pairs {
            stack.push(WorkItem {
                parent,
                id: child_ids[index],
                old,
                new,
                level: level + 1,
            });
        }
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Fresh nodes
    // ─────────────────────────────────────────────────────────────────────────

    fn replace(
        &mut self,
        parent: Parent,
        id: NodeId,
        old: &mut Node,
        new: &Node,
        level: usize,
    ) -> Result<(), ContractViolation> {
        if new.is_mounted() {
            return Err(ContractViolation::AlreadyMounted { node: id });
        }
        let old_handle = old
            .take_binding()
            .ok_or(ContractViolation::Unmounted { node: id })?;

        self.changes.push(Change::Replace {
            parent,
            old: old_handle,
            node: id,
        });
        self.stats.nodes_replaced += 1;
        self.describe_fresh(id, new);

        let mut next = NodeId::from_index(id.index() + 1);
        for child in new.children() {
            next = self.insert_subtree(Parent::Node(id), next, child, level + 1)?;
        }
        Ok(())
    }

    /// Insert a whole unmounted subtree rooted at `id`, parents before
    /// children.
    ///
    /// Returns the id following the subtree.
    fn insert_subtree(
        &mut self,
        parent: Parent,
        id: NodeId,
        node: &Node,
        level: usize,
    ) -> Result<NodeId, ContractViolation> {
        let mut next = id.index();
        let mut stack = vec![(parent, node, level)];

        while let Some((parent, node, level)) = stack.pop() {
            let id = NodeId::from_index(next);
            next += 1;
            self.visit(level);
            if node.is_mounted() {
                return Err(ContractViolation::AlreadyMounted { node: id });
            }

            self.changes.push(Change::Insert { parent, node: id });
            self.stats.nodes_inserted += 1;
            self.describe_fresh(id, node);

            let child_parent = Parent::Node(id);
            stack.extend(
                node.children()
                    .iter()
                    .rev()
                    .map(|child| (child_parent, child, level + 1)),
            );
        }
        Ok(NodeId::from_index(next))
    }

    /// Emit the setup of a node that has just been created.
    fn describe_fresh(&mut self, id: NodeId, node: &Node) {
        match node {
            Node::Element(elem) => {
                self.changes.extend(diff_style(id, None, &elem.style));
                fresh_listeners(&mut self.changes, id, &elem.handlers);
                diff_attributes_into(&mut self.changes, id, &elem.tag, &Vec::new(), &elem.attrs);
                self.changes.extend(diff_canvas(id, elem));
            }
            Node::Text(text) => fresh_listeners(&mut self.changes, id, &text.handlers),
        }
    }

    fn visit(&mut self, level: usize) {
        self.stats.max_level = self.stats.max_level.max(level);
        if level > self.config.depth_warning && !self.depth_warned {
            self.depth_warned = true;
            tracing::warn!(
                level,
                limit = self.config.depth_warning,
                "virtual tree nesting is unusually deep"
            );
        }
    }
}

/// Size of every subtree of `root`, indexed by pre-order id.
fn subtree_sizes(root: &Node) -> Vec<usize> {
    let mut parents = Vec::new();
    let mut stack = vec![(0, root)];
    while let Some((parent, node)) = stack.pop() {
        let id = parents.len();
        parents.push(parent);
        stack.extend(node.children().iter().rev().map(|child| (id, child)));
    }

    // Children come after their parent in pre-order.
    let mut sizes = vec![1; parents.len()];
    for id in (1..parents.len()).rev() {
        sizes[parents[id]] += sizes[id];
    }
    sizes
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::algo::ChangeKind;
    use crate::algo::testing::{bind_all, chain};
    use crate::event::EventKind;
    use crate::handle::NodeHandle;
    use crate::node::NodePath;
    use crate::style::Display;

    fn id(index: usize) -> NodeId {
        NodeId::from_index(index)
    }

    fn kinds(result: &Reconciliation) -> Vec<ChangeKind> {
        result.changes.iter().map(Change::kind).collect()
    }

    fn raw(node: &Node, path: &[u32]) -> u64 {
        node.at(&NodePath::from_indices(path.iter().copied()))
            .and_then(Node::binding)
            .map(NodeHandle::as_raw)
            .unwrap()
    }

    #[test]
    fn test_initial_render_inserts_everything() {
        let mut tree: Node = Element::new("div")
            .with_id("app")
            .styled(|s| s.display(Display::Flex))
            .on_click(|_| {})
            .child(Element::new("span").text("hi"))
            .into();

        let result = reconcile(None, &mut tree).unwrap();
        assert_eq!(
            kinds(&result),
            [
                ChangeKind::Insert,
                ChangeKind::SetAttribute,
                ChangeKind::AddListener,
                ChangeKind::SetAttribute,
                ChangeKind::Insert,
                ChangeKind::Insert,
            ]
        );
        assert_eq!(result.stats.nodes_inserted, 3);

        let parents: Vec<String> = result
            .changes
            .iter()
            .filter_map(|change| match change {
                Change::Insert { parent, node } => Some(format!("{parent} <- {node}")),
                _ => None,
            })
            .collect();
        assert_eq!(parents, ["<mount root> <- #0", "#0 <- #1", "#1 <- #2"]);
    }

    #[test]
    fn test_identical_trees_produce_nothing() {
        let build = || -> Node {
            Element::new("ul")
                .with_class("list")
                .child(Element::new("li").text("a"))
                .child(Element::new("li").text("b"))
                .into()
        };
        let mut old = build();
        bind_all(&mut old);
        let text = raw(&old, &[1, 0]);
        let mut new = build();

        let result = reconcile(Some(&mut old), &mut new).unwrap();
        assert!(!result.has_changes());
        assert_eq!(result.stats.nodes_kept, 5);
        assert_eq!(raw(&new, &[1, 0]), text);
        assert!(old.walk().all(|(_, node)| !node.is_mounted()));
    }

    #[test]
    fn test_text_change_replaces_only_the_text() {
        let mut old: Node = Element::new("p").text("old").into();
        bind_all(&mut old);
        let old_text = raw(&old, &[0]);
        let mut new: Node = Element::new("p").text("new").into();

        let result = reconcile(Some(&mut old), &mut new).unwrap();
        match result.changes.as_slice() {
            [Change::Replace { parent, old, node }] => {
                assert_eq!(parent, &Parent::Node(NodeId::ROOT));
                assert_eq!(old.as_raw(), old_text);
                assert_eq!(*node, id(1));
            }
            other => panic!("unexpected changes {other:?}"),
        }
    }

    #[test]
    fn test_tag_change_replaces_subtree() {
        let mut old: Node = Element::new("div")
            .child(Element::new("span").child(Element::new("b")))
            .into();
        bind_all(&mut old);
        let mut new: Node = Element::new("div")
            .child(Element::new("em").with_id("x").text("t"))
            .into();

        let result = reconcile(Some(&mut old), &mut new).unwrap();
        assert_eq!(
            kinds(&result),
            [ChangeKind::Replace, ChangeKind::SetAttribute, ChangeKind::Insert]
        );
        assert_eq!(result.stats.nodes_replaced, 1);
        assert_eq!(result.stats.nodes_inserted, 1);
        // The abandoned grandchild keeps its binding; the surface releases it.
        assert!(old.at(&NodePath::from_indices([0, 0])).unwrap().is_mounted());
    }

    #[test]
    fn test_kind_change_replaces() {
        let mut old: Node = Element::new("div").text("x").into();
        bind_all(&mut old);
        let mut new: Node = Element::new("div").child(Element::new("x")).into();

        let result = reconcile(Some(&mut old), &mut new).unwrap();
        assert_eq!(kinds(&result), [ChangeKind::Replace]);
    }

    #[test]
    fn test_surplus_children() {
        let mut old: Node = Element::new("ul")
            .child(Element::new("li").text("a"))
            .child(Element::new("li").text("b"))
            .child(Element::new("li").text("c"))
            .into();
        bind_all(&mut old);
        let removed: Vec<u64> = vec![raw(&old, &[1]), raw(&old, &[2])];

        let mut shorter: Node = Element::new("ul").child(Element::new("li").text("a")).into();
        let result = reconcile(Some(&mut old), &mut shorter).unwrap();
        let handles: Vec<u64> = result
            .changes
            .iter()
            .map(|change| match change {
                Change::Remove { parent, node } => {
                    assert_eq!(parent, &Parent::Node(NodeId::ROOT));
                    node.as_raw()
                }
                other => panic!("unexpected change {other:?}"),
            })
            .collect();
        assert_eq!(handles, removed);

        let mut longer: Node = Element::new("ul")
            .child(Element::new("li").text("a"))
            .child(Element::new("li").text("b"))
            .into();
        let result = reconcile(Some(&mut shorter), &mut longer).unwrap();
        assert_eq!(kinds(&result), [ChangeKind::Insert, ChangeKind::Insert]);
        // li "a" is #1 and its text #2, so the new li is #3
        assert_eq!(result.changes[0].target(), Some(id(3)));
        assert_eq!(result.changes[1].target(), Some(id(4)));
    }

    #[test]
    fn test_siblings_in_ascending_order() {
        let build = |a: &str, b: &str| -> Node {
            Element::new("div")
                .child(Element::new("p").attr("title", a))
                .child(Element::new("p").attr("title", b))
                .into()
        };
        let mut old = build("1", "1");
        bind_all(&mut old);
        let mut new = build("2", "2");

        let result = reconcile(Some(&mut old), &mut new).unwrap();
        let targets: Vec<String> = result
            .changes
            .iter()
            .filter_map(|c| c.target().map(|id| id.to_string()))
            .collect();
        assert_eq!(targets, ["#1", "#2"]);
    }

    #[test]
    fn test_cached_listener_is_carried() {
        let build = || -> Node { Element::new("button").on_click_cached("inc", |_| {}).into() };
        let mut old = build();
        bind_all(&mut old);
        let mut new = build();

        let result = reconcile(Some(&mut old), &mut new).unwrap();
        assert!(!result.has_changes());
        assert_eq!(result.stats.listeners_carried, 1);
        assert!(new.handlers().get(EventKind::Click).unwrap().is_mounted());

        let mut uncached = build();
        let result =
            reconcile_with_config(Some(&mut new), &mut uncached, ReconcileConfig::uncached())
                .unwrap();
        assert_eq!(kinds(&result), [ChangeKind::RemoveListener, ChangeKind::AddListener]);
    }

    #[test]
    fn test_text_handlers_are_diffed() {
        let mut old: Node = Text::new("a").on_click(|_| {}).into();
        bind_all(&mut old);
        let mut new: Node = Text::new("a").into();

        let result = reconcile(Some(&mut old), &mut new).unwrap();
        assert_eq!(kinds(&result), [ChangeKind::RemoveListener]);
    }

    #[test]
    fn test_canvas_redraws_every_pass() {
        let build = || -> Node { Element::new("canvas").draw(|ctx| ctx.clear()).into() };
        let mut old = build();
        bind_all(&mut old);
        let mut new = build();

        let result = reconcile(Some(&mut old), &mut new).unwrap();
        assert_eq!(kinds(&result), [ChangeKind::DrawCanvas]);
    }

    #[test]
    fn test_mounted_new_tree_is_rejected() {
        let mut old: Node = Element::new("div").into();
        bind_all(&mut old);
        let mut new: Node = Element::new("div").into();
        bind_all(&mut new);

        let err = reconcile(Some(&mut old), &mut new).unwrap_err();
        assert_eq!(err, ContractViolation::AlreadyMounted { node: NodeId::ROOT });

        let err = reconcile(None, &mut new).unwrap_err();
        assert!(matches!(err, ContractViolation::AlreadyMounted { .. }));
    }

    #[test]
    fn test_unmounted_old_tree_is_rejected() {
        let mut old: Node = Element::new("div").into();
        let mut new: Node = Element::new("div").into();
        let err = reconcile(Some(&mut old), &mut new).unwrap_err();
        assert_eq!(err, ContractViolation::Unmounted { node: NodeId::ROOT });
    }

    #[test]
    fn test_deep_trees_do_not_recurse() {
        let mut old = chain(2_000, "a");
        bind_all(&mut old);
        let mut new = chain(2_000, "b");

        let result = reconcile(Some(&mut old), &mut new).unwrap();
        assert_eq!(kinds(&result), [ChangeKind::Replace]);
        assert_eq!(result.stats.max_level, 2_000);
        assert_eq!(result.stats.nodes_kept, 2_000);

        let mut fresh = chain(2_000, "c");
        let result = reconcile(None, &mut fresh).unwrap();
        assert_eq!(result.stats.nodes_inserted, 2_001);
    }

    #[test]
    fn test_deep_chain_changes_stay_constant_size() {
        const DEPTH: usize = 50_000;
        static_assertions::const_assert!(std::mem::size_of::<Change>() <= 64);

        let mut tree = chain(DEPTH, "x");
        let result = reconcile(None, &mut tree).unwrap();
        assert_eq!(result.len(), DEPTH + 1);
        assert!(
            result
                .changes
                .iter()
                .enumerate()
                .all(|(index, change)| change.target() == Some(id(index)))
        );

        bind_all(&mut tree);
        let mut next = chain(DEPTH, "y");
        let result = reconcile(Some(&mut tree), &mut next).unwrap();
        match result.changes.as_slice() {
            [Change::Replace { parent, node, .. }] => {
                assert_eq!(*parent, Parent::Node(id(DEPTH - 1)));
                assert_eq!(*node, id(DEPTH));
            }
            other => panic!("unexpected changes {other:?}"),
        }
    }

    #[test]
    fn test_subtree_sizes() {
        let tree: Node = Element::new("div")
            .child(Element::new("p").text("a").text("b"))
            .child(Element::new("hr"))
            .into();
        assert_eq!(subtree_sizes(&tree), [5, 3, 1, 1, 1]);
    }

    #[test]
    fn test_ids_after_a_replaced_sibling() {
        let mut old: Node = Element::new("div")
            .child(Element::new("p").text("a"))
            .child(Element::new("b"))
            .into();
        bind_all(&mut old);
        let mut new: Node = Element::new("div")
            .child(Element::new("ul").child(Element::new("li")).child(Element::new("li")))
            .child(Element::new("b").with_id("x"))
            .into();

        let result = reconcile(Some(&mut old), &mut new).unwrap();
        let targets: Vec<(ChangeKind, usize)> = result
            .changes
            .iter()
            .map(|change| (change.kind(), change.target().unwrap().index()))
            .collect();
        assert_eq!(
            targets,
            [
                (ChangeKind::Replace, 1),
                (ChangeKind::Insert, 2),
                (ChangeKind::Insert, 3),
                (ChangeKind::SetAttribute, 4),
            ]
        );
    }

    #[test]
    fn test_callbacks_are_shared_not_copied() {
        let mut tree: Node = Element::new("a").on_mouseover(|_| {}).into();
        let result = reconcile(None, &mut tree).unwrap();
        let declared = &tree.handlers().get(EventKind::MouseOver).unwrap().callback;
        let emitted = result
            .changes
            .iter()
            .find_map(|change| match change {
                Change::AddListener { callback, .. } => Some(callback),
                _ => None,
            })
            .unwrap();
        assert!(Arc::ptr_eq(declared, emitted));
    }
}
