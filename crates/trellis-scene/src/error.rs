//! Tree mutation errors.

use thiserror::Error;

use crate::NodeId;

/// Reasons a tree mutation can be rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// The id was never allocated or has been disposed.
    #[error("unknown node {0}")]
    UnknownNode(NodeId),
    /// The node must be detached before it can be attached elsewhere.
    #[error("node {child} is already attached to {parent}")]
    AlreadyAttached {
        /// Node being attached.
        child: NodeId,
        /// Its current parent.
        parent: NodeId,
    },
    /// The node would become its own ancestor.
    #[error("attaching {child} under {parent} would create a cycle")]
    Cycle {
        /// Requested parent.
        parent: NodeId,
        /// Node being attached.
        child: NodeId,
    },
    /// Leaves carry content, not children.
    #[error("leaf node {0} cannot have children")]
    LeafCannotHaveChildren(NodeId),
    /// The node is not a direct child of the given parent.
    #[error("node {child} is not a child of {parent}")]
    NotAChild {
        /// Expected parent.
        parent: NodeId,
        /// The node that was looked up.
        child: NodeId,
    },
    /// Content providers belong to leaves only.
    #[error("node {0} is not a leaf")]
    NotALeaf(NodeId),
    /// Only detached subtrees can be disposed.
    #[error("node {0} is still attached")]
    StillAttached(NodeId),
}
