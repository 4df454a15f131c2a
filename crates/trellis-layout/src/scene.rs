//! The scene: tree, styles, layout state and the update queue.
//!
//! # Scheduling
//!
//! Mutations never lay anything out directly. They mark boxes dirty through
//! [`Scene::request_update`], which walks toward the root and enqueues the
//! node where the walk stops. [`Scene::update`] then drains the queue once
//! per frame. A node is enqueued at most once while it stays dirty, so many
//! mutations in one frame coalesce into one update per stopping node.

use std::collections::VecDeque;

use kurbo::Affine;
use tracing::debug;
use trellis_scene::{NodeId, NodeKind, SceneTree, TreeError};
use trellis_style::{ComputedStyle, StyleChange, diff};

use crate::config::LayoutConfig;
use crate::content::ContentProvider;
use crate::geometry::{Edges, Offset, Size};
use crate::paint::RectRecord;
use crate::state::BoxState;

/// Side-table entry for one node id.
#[derive(Debug, Default)]
pub(crate) struct NodeData {
    pub(crate) style: ComputedStyle,
    pub(crate) state: BoxState,
    pub(crate) provider: Option<Box<dyn ContentProvider>>,
}

/// What one [`Scene::update`] did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateReport {
    /// Boxes whose bottom-up pass ran.
    pub updated: usize,
    /// Layout roots whose resolved size changed.
    pub resized_roots: Vec<NodeId>,
}

/// A tree of layout boxes plus everything needed to keep it laid out.
#[derive(Debug, Default)]
pub struct Scene {
    pub(crate) tree: SceneTree,
    /// Indexed by `NodeId`. Entries of disposed nodes are reset, never
    /// removed.
    pub(crate) nodes: Vec<NodeData>,
    pub(crate) config: LayoutConfig,
    queue: VecDeque<NodeId>,
    pub(crate) transform_queue: Vec<NodeId>,
}

impl Scene {
    /// An empty scene.
    #[must_use]
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Current configuration.
    #[must_use]
    pub const fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Change the percentage base of layout roots.
    pub fn set_viewport(&mut self, viewport: Size) {
        if self.config.viewport == viewport {
            return;
        }
        self.config.viewport = viewport;
        let roots: Vec<NodeId> = self.tree.layout_roots().collect();
        for root in roots {
            if !self.st(root).parent_dependency.is_empty() {
                self.request_update(root, true);
            }
        }
    }

    /// The underlying tree.
    #[must_use]
    pub const fn tree(&self) -> &SceneTree {
        &self.tree
    }

    // ========== node creation ==========

    /// Create a detached box.
    pub fn create_box(&mut self, style: ComputedStyle) -> NodeId {
        self.alloc(NodeKind::Element, style, None)
    }

    /// Create a detached leaf whose content comes from `provider`.
    pub fn create_leaf(
        &mut self,
        style: ComputedStyle,
        provider: impl ContentProvider + 'static,
    ) -> NodeId {
        self.alloc(NodeKind::Leaf, style, Some(Box::new(provider)))
    }

    /// Create a detached slot. Its children are laid out by the slot's host.
    pub fn create_slot(&mut self) -> NodeId {
        self.alloc(NodeKind::Slot, ComputedStyle::default(), None)
    }

    fn alloc(
        &mut self,
        kind: NodeKind,
        style: ComputedStyle,
        provider: Option<Box<dyn ContentProvider>>,
    ) -> NodeId {
        let id = self.tree.alloc(kind);
        debug_assert_eq!(id.index(), self.nodes.len());
        self.nodes.push(NodeData {
            style,
            state: BoxState {
                content_dirty: provider.is_some(),
                ..BoxState::default()
            },
            provider,
        });
        if kind != NodeKind::Slot {
            self.update_state(id);
            self.update_rect(id);
            self.mark_transform_dirty(id);
        }
        id
    }

    // ========== tree mutation ==========

    /// Append `child` as the last child of `parent`.
    ///
    /// # Errors
    ///
    /// Propagates [`TreeError`] from the tree.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        self.insert_before(parent, child, None)
    }

    /// Insert `child` into `parent` before `reference`, or at the end.
    ///
    /// # Errors
    ///
    /// Propagates [`TreeError`] from the tree.
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    ) -> Result<(), TreeError> {
        self.tree.insert_before(parent, child, reference)?;
        self.reparented(child, None);
        Ok(())
    }

    /// Detach `child` from its parent. Detached boxes become layout roots
    /// until they are attached again or disposed.
    ///
    /// # Errors
    ///
    /// Fails if `child` is unknown.
    pub fn detach(&mut self, child: NodeId) -> Result<(), TreeError> {
        if !self.tree.contains(child) {
            return Err(TreeError::UnknownNode(child));
        }
        let Some(parent) = self.tree.parent(child) else {
            return Ok(());
        };
        let old_layout_parent = self.tree.layout_parent(child);
        self.tree.remove_child(parent, child)?;
        self.reparented(child, old_layout_parent);
        Ok(())
    }

    /// Free a detached node, its subtree, and all of their layout state.
    ///
    /// # Errors
    ///
    /// Fails if `id` is unknown or still attached.
    pub fn dispose(&mut self, id: NodeId) -> Result<(), TreeError> {
        let freed = self.tree.dispose(id)?;
        for node in &freed {
            self.nodes[node.index()] = NodeData::default();
        }
        debug!(node = %id, freed = freed.len(), "disposed subtree");
        Ok(())
    }

    /// Move registrations after `id` changed parents. For a slot, every node
    /// it splices into its host moves with it.
    fn reparented(&mut self, id: NodeId, old_layout_parent: Option<NodeId>) {
        let moved: Vec<NodeId> = if self.tree.kind(id) == Some(NodeKind::Slot) {
            self.tree.effective_children(id).collect()
        } else {
            vec![id]
        };
        for node in moved {
            if let Some(old) = old_layout_parent {
                let _ = self.st_mut(old).dependents.remove(&node);
            }
            self.update_state(node);
            self.mark_transform_dirty(node);
        }
        if let Some(old) = old_layout_parent {
            self.request_update(old, true);
        }
        if let Some(new) = self.tree.layout_parent(id) {
            self.request_update(new, true);
        }
    }

    // ========== style and content ==========

    /// Computed style of a live node.
    #[must_use]
    pub fn style(&self, id: NodeId) -> Option<&ComputedStyle> {
        self.tree.contains(id).then(|| &self.nodes[id.index()].style)
    }

    /// Replace a node's computed style and react to whatever changed.
    ///
    /// Returns the change mask; empty when the node is unknown or nothing
    /// differs.
    pub fn set_style(&mut self, id: NodeId, style: ComputedStyle) -> StyleChange {
        if !self.tree.contains(id) {
            return StyleChange::empty();
        }
        let mask = diff(&self.nodes[id.index()].style, &style);
        self.nodes[id.index()].style = style;
        self.on_style_changed(id, mask);
        mask
    }

    /// React to a style change that has already been stored.
    pub fn on_style_changed(&mut self, id: NodeId, mask: StyleChange) {
        if mask.is_empty() || !self.tree.contains(id) {
            return;
        }
        if self.tree.kind(id) == Some(NodeKind::Slot) {
            return;
        }
        if mask.affects_paint_only() {
            self.update_rect(id);
            return;
        }
        let parent = self.tree.layout_parent(id);

        if mask.contains(StyleChange::VISIBILITY) {
            if self.is_hidden(id) {
                if let Some(parent) = parent {
                    self.request_update(parent, true);
                }
            } else {
                self.update_state(id);
                // Still dirty from while it was hidden; the walk above stopped
                // right here.
                if self.st(id).dirty {
                    self.enqueue(id);
                }
                if let Some(parent) = parent {
                    self.request_update(parent, true);
                }
            }
        }

        if mask.affects_layout() {
            self.update_state(id);
        } else if mask.contains(StyleChange::ALIGNMENT) {
            self.request_update(parent.unwrap_or(id), false);
        }

        if mask.contains(StyleChange::TRANSFORM) {
            self.mark_transform_dirty(id);
        }
        if mask.intersects(StyleChange::BACKGROUND | StyleChange::BORDER) {
            self.update_rect(id);
        }
    }

    /// Swap the provider of a leaf. The leaf is re-measured on the next
    /// update.
    ///
    /// # Errors
    ///
    /// Fails if `id` is unknown or not a leaf.
    pub fn set_content(
        &mut self,
        id: NodeId,
        provider: impl ContentProvider + 'static,
    ) -> Result<(), TreeError> {
        self.leaf(id)?;
        self.nodes[id.index()].provider = Some(Box::new(provider));
        self.mark_content_dirty(id)
    }

    /// Tell layout a leaf's content changed.
    ///
    /// # Errors
    ///
    /// Fails if `id` is unknown or not a leaf.
    pub fn mark_content_dirty(&mut self, id: NodeId) -> Result<(), TreeError> {
        self.leaf(id)?;
        self.st_mut(id).content_dirty = true;
        self.request_update(id, true);
        Ok(())
    }

    fn leaf(&self, id: NodeId) -> Result<(), TreeError> {
        match self.tree.kind(id) {
            None => Err(TreeError::UnknownNode(id)),
            Some(NodeKind::Leaf) => Ok(()),
            Some(_) => Err(TreeError::NotALeaf(id)),
        }
    }

    // ========== scheduling ==========

    /// Mark `id` and, where needed, its ancestors dirty.
    ///
    /// The walk stops at a node that is already dirty or hidden. Otherwise it
    /// marks the node and moves on to the layout parent, unless the node is
    /// not parent-dependent and `affects_boundings` is false, or it has no
    /// layout parent. The node where the walk ends is enqueued.
    pub fn request_update(&mut self, id: NodeId, affects_boundings: bool) {
        let mut current = match self.tree.kind(id) {
            None => return,
            Some(NodeKind::Slot) => match self.tree.layout_parent(id) {
                Some(host) => host,
                None => return,
            },
            Some(_) => id,
        };
        loop {
            if self.st(current).dirty || self.is_hidden(current) {
                return;
            }
            self.st_mut(current).dirty = true;
            let parent = self.tree.layout_parent(current);
            let stop = self.st(current).parent_dependency.is_empty() && !affects_boundings;
            match parent {
                Some(parent) if !stop => current = parent,
                _ => {
                    self.enqueue(current);
                    return;
                }
            }
        }
    }

    fn enqueue(&mut self, id: NodeId) {
        let state = self.st_mut(id);
        if !state.queued {
            state.queued = true;
            self.queue.push_back(id);
        }
    }

    /// Whether [`Scene::update`] has anything to do.
    #[must_use]
    pub fn has_pending_update(&self) -> bool {
        !self.queue.is_empty() || !self.transform_queue.is_empty()
    }

    /// Run every queued update, then refresh stale transforms.
    pub fn update(&mut self) -> UpdateReport {
        let mut report = UpdateReport::default();
        if !self.has_pending_update() {
            return report;
        }
        debug!(queued = self.queue.len(), "layout update");
        while let Some(id) = self.queue.pop_front() {
            if !self.tree.contains(id) {
                continue;
            }
            self.st_mut(id).queued = false;
            if !self.st(id).dirty || self.is_hidden(id) {
                continue;
            }
            self.update_box(id, &mut report);
        }
        self.flush_transforms();
        debug!(
            updated = report.updated,
            resized_roots = report.resized_roots.len(),
            "layout update finished"
        );
        report
    }

    // ========== read access ==========

    /// Layout state of a live box.
    #[must_use]
    pub fn layout(&self, id: NodeId) -> Option<&BoxState> {
        match self.tree.kind(id) {
            Some(NodeKind::Element | NodeKind::Leaf) => Some(self.st(id)),
            _ => None,
        }
    }

    /// Final content-box size.
    #[must_use]
    pub fn resolved_size(&self, id: NodeId) -> Option<Size> {
        self.layout(id).map(BoxState::resolved_size)
    }

    /// Border-box size.
    #[must_use]
    pub fn boundings(&self, id: NodeId) -> Option<Size> {
        self.layout(id).map(BoxState::boundings)
    }

    /// Resolved margin.
    #[must_use]
    pub fn margin(&self, id: NodeId) -> Option<Edges> {
        self.layout(id).map(BoxState::margin)
    }

    /// Resolved padding.
    #[must_use]
    pub fn padding(&self, id: NodeId) -> Option<Edges> {
        self.layout(id).map(BoxState::padding)
    }

    /// Resolved border thickness.
    #[must_use]
    pub fn border(&self, id: NodeId) -> Option<Edges> {
        self.layout(id).map(BoxState::border)
    }

    /// Border-box top-left in the layout parent's space.
    #[must_use]
    pub fn offset(&self, id: NodeId) -> Option<Offset> {
        self.layout(id).map(BoxState::offset)
    }

    /// Local-to-world transform.
    #[must_use]
    pub fn transform(&self, id: NodeId) -> Option<Affine> {
        self.layout(id).map(BoxState::transform)
    }

    /// Distance from the border-box top to the baseline.
    #[must_use]
    pub fn baseline(&self, id: NodeId) -> Option<i32> {
        self.layout(id).map(BoxState::baseline)
    }

    /// Line height the baseline belongs to.
    #[must_use]
    pub fn line_height(&self, id: NodeId) -> Option<u32> {
        self.layout(id).map(BoxState::line_height)
    }

    /// Paint and hit-test record.
    #[must_use]
    pub fn rect(&self, id: NodeId) -> Option<&RectRecord> {
        self.layout(id).map(BoxState::rect)
    }

    /// Whether the box waits for the next update.
    #[must_use]
    pub fn is_dirty(&self, id: NodeId) -> Option<bool> {
        self.layout(id).map(BoxState::is_dirty)
    }

    // ========== internal access ==========

    pub(crate) fn st(&self, id: NodeId) -> &BoxState {
        &self.nodes[id.index()].state
    }

    pub(crate) fn st_mut(&mut self, id: NodeId) -> &mut BoxState {
        &mut self.nodes[id.index()].state
    }

    pub(crate) fn style_of(&self, id: NodeId) -> &ComputedStyle {
        &self.nodes[id.index()].style
    }

    pub(crate) fn is_hidden(&self, id: NodeId) -> bool {
        self.style_of(id).hidden
    }

    /// Effective children that take part in layout.
    pub(crate) fn visible_children(&self, id: NodeId) -> Vec<NodeId> {
        self.tree
            .effective_children(id)
            .filter(|&child| !self.is_hidden(child))
            .collect()
    }

    pub(crate) fn mark_transform_dirty(&mut self, id: NodeId) {
        let state = self.st_mut(id);
        if !state.transform_dirty {
            state.transform_dirty = true;
            self.transform_queue.push(id);
        }
    }
}
