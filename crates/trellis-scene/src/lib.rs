//! Scene tree for the Trellis layout engine.
//!
//! This crate provides an arena-based tree of scene nodes. Layout state is
//! kept outside the tree, in side tables indexed by [`NodeId`].
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all relationships,
//! providing O(1) access and traversal without borrow checker issues. Disposed
//! slots are tombstoned and never reused, so a stale id can never alias a new
//! node.
//!
//! Slot nodes are transparent: [`SceneTree::effective_children`] splices a
//! slot's children into its host's child list, and
//! [`SceneTree::layout_parent`] skips slots when walking upward.

mod error;

pub use error::TreeError;

use std::fmt;
use std::slice;

/// A type-safe index into the scene tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The raw arena index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a node contributes to layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// A box that stacks structural children.
    Element,
    /// A content leaf (text, icon). Never has children.
    Leaf,
    /// A transparent container whose children belong to the slot's host.
    Slot,
}

/// One node of the scene tree.
#[derive(Debug, Clone)]
pub struct Node {
    /// What kind of node this is.
    pub kind: NodeKind,
    /// Structural parent, if attached.
    pub parent: Option<NodeId>,
    /// Structural children in order.
    pub children: Vec<NodeId>,
}

/// Arena-backed scene tree.
#[derive(Debug, Clone, Default)]
pub struct SceneTree {
    /// All nodes ever allocated, indexed by `NodeId`. `None` once disposed.
    nodes: Vec<Option<Node>>,
}

impl SceneTree {
    /// Create an empty tree.
    #[must_use]
    pub const fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Number of live nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    /// Whether the tree holds no live nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.iter().all(Option::is_none)
    }

    /// Upper bound of all ids ever handed out. Side tables size themselves
    /// with this.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.nodes.len()
    }

    /// Whether `id` refers to a live node.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0).and_then(Option::as_mut)
    }

    fn node(&self, id: NodeId) -> Result<&Node, TreeError> {
        self.get(id).ok_or(TreeError::UnknownNode(id))
    }

    /// Kind of a live node.
    #[must_use]
    pub fn kind(&self, id: NodeId) -> Option<NodeKind> {
        self.get(id).map(|n| n.kind)
    }

    /// Allocate a new detached node and return its ID.
    pub fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Some(Node {
            kind,
            parent: None,
            children: Vec::new(),
        }));
        id
    }

    /// Append `child` as the last child of `parent`.
    ///
    /// # Errors
    ///
    /// See [`SceneTree::insert_before`].
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        self.insert_before(parent, child, None)
    }

    /// Insert `child` into `parent` before `reference`, or at the end when
    /// `reference` is `None`.
    ///
    /// # Errors
    ///
    /// Fails if either node is unknown, `child` is already attached,
    /// `parent` is a leaf, the insertion would create a cycle, or
    /// `reference` is not a child of `parent`.
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    ) -> Result<(), TreeError> {
        let parent_node = self.node(parent)?;
        if parent_node.kind == NodeKind::Leaf {
            return Err(TreeError::LeafCannotHaveChildren(parent));
        }
        let position = match reference {
            Some(reference) => Some(
                parent_node
                    .children
                    .iter()
                    .position(|&c| c == reference)
                    .ok_or(TreeError::NotAChild {
                        parent,
                        child: reference,
                    })?,
            ),
            None => None,
        };

        if let Some(existing) = self.node(child)?.parent {
            return Err(TreeError::AlreadyAttached {
                child,
                parent: existing,
            });
        }
        if child == parent || self.is_descendant_of(parent, child) {
            return Err(TreeError::Cycle { parent, child });
        }

        if let Some(node) = self.get_mut(parent) {
            match position {
                Some(index) => node.children.insert(index, child),
                None => node.children.push(child),
            }
        }
        if let Some(node) = self.get_mut(child) {
            node.parent = Some(parent);
        }
        Ok(())
    }

    /// Detach `child` from `parent`. The child keeps its own subtree.
    ///
    /// # Errors
    ///
    /// Fails if either node is unknown or `child` is not a child of `parent`.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        let _ = self.node(child)?;
        let index = self
            .node(parent)?
            .children
            .iter()
            .position(|&c| c == child)
            .ok_or(TreeError::NotAChild { parent, child })?;

        if let Some(node) = self.get_mut(parent) {
            let _ = node.children.remove(index);
        }
        if let Some(node) = self.get_mut(child) {
            node.parent = None;
        }
        Ok(())
    }

    /// Free a detached node and its whole subtree.
    ///
    /// Returns the freed ids in pre-order.
    ///
    /// # Errors
    ///
    /// Fails if `id` is unknown or still attached to a parent.
    pub fn dispose(&mut self, id: NodeId) -> Result<Vec<NodeId>, TreeError> {
        if self.node(id)?.parent.is_some() {
            return Err(TreeError::StillAttached(id));
        }
        let freed: Vec<NodeId> = self.descendants(id).collect();
        for &node in &freed {
            if let Some(entry) = self.nodes.get_mut(node.0) {
                *entry = None;
            }
        }
        Ok(freed)
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all structural children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Check if `descendant` is a descendant of `ancestor`.
    #[must_use]
    pub fn is_descendant_of(&self, descendant: NodeId, ancestor: NodeId) -> bool {
        self.ancestors(descendant).any(|id| id == ancestor)
    }

    /// Iterate over all ancestors of a node, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// The nearest ancestor that is not a slot.
    ///
    /// This is the box whose size a node's percentages refer to.
    #[must_use]
    pub fn layout_parent(&self, id: NodeId) -> Option<NodeId> {
        self.ancestors(id)
            .find(|&a| self.kind(a) != Some(NodeKind::Slot))
    }

    /// Children as layout sees them: structural children in order, with every
    /// slot replaced by its own effective children.
    #[must_use]
    pub fn effective_children(&self, id: NodeId) -> EffectiveChildren<'_> {
        EffectiveChildren {
            tree: self,
            stack: vec![self.children(id).iter()],
        }
    }

    /// Pre-order walk of `id` and every structural descendant.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            tree: self,
            stack: if self.contains(id) { vec![id] } else { Vec::new() },
        }
    }

    /// Live non-slot nodes that have no layout parent, in allocation order.
    pub fn layout_roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(index, node)| node.as_ref().map(|n| (NodeId(index), n.kind)))
            .filter(|&(id, kind)| kind != NodeKind::Slot && self.layout_parent(id).is_none())
            .map(|(id, _)| id)
    }
}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a> {
    tree: &'a SceneTree,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}

/// Iterator over the effective children of a node.
pub struct EffectiveChildren<'a> {
    tree: &'a SceneTree,
    stack: Vec<slice::Iter<'a, NodeId>>,
}

impl Iterator for EffectiveChildren<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let frame = self.stack.last_mut()?;
            match frame.next() {
                None => {
                    let _ = self.stack.pop();
                }
                Some(&id) if self.tree.kind(id) == Some(NodeKind::Slot) => {
                    self.stack.push(self.tree.children(id).iter());
                }
                Some(&id) => return Some(id),
            }
        }
    }
}

/// Pre-order iterator over a subtree.
pub struct Descendants<'a> {
    tree: &'a SceneTree,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}
