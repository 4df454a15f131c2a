//! Tests for scene tree mutation and slot-aware traversal.

use trellis_scene::{NodeId, NodeKind, SceneTree, TreeError};

fn element(tree: &mut SceneTree) -> NodeId {
    tree.alloc(NodeKind::Element)
}

// ========== append / insert / remove ==========

#[test]
fn test_append_and_insert_before_keep_order() {
    let mut tree = SceneTree::new();
    let parent = element(&mut tree);
    let a = element(&mut tree);
    let b = element(&mut tree);
    let c = element(&mut tree);

    tree.append_child(parent, a).unwrap();
    tree.append_child(parent, c).unwrap();
    tree.insert_before(parent, b, Some(c)).unwrap();

    assert_eq!(tree.children(parent), &[a, b, c]);
    assert_eq!(tree.parent(b), Some(parent));
}

#[test]
fn test_remove_child_detaches() {
    let mut tree = SceneTree::new();
    let parent = element(&mut tree);
    let a = element(&mut tree);
    let b = element(&mut tree);
    tree.append_child(parent, a).unwrap();
    tree.append_child(parent, b).unwrap();

    tree.remove_child(parent, a).unwrap();

    assert_eq!(tree.children(parent), &[b]);
    assert_eq!(tree.parent(a), None);
    assert_eq!(
        tree.remove_child(parent, a),
        Err(TreeError::NotAChild { parent, child: a })
    );
}

#[test]
fn test_attach_twice_is_rejected() {
    let mut tree = SceneTree::new();
    let p1 = element(&mut tree);
    let p2 = element(&mut tree);
    let child = element(&mut tree);
    tree.append_child(p1, child).unwrap();

    assert_eq!(
        tree.append_child(p2, child),
        Err(TreeError::AlreadyAttached { child, parent: p1 })
    );
}

#[test]
fn test_cycles_are_rejected() {
    let mut tree = SceneTree::new();
    let a = element(&mut tree);
    let b = element(&mut tree);
    tree.append_child(a, b).unwrap();

    assert_eq!(
        tree.append_child(b, a),
        Err(TreeError::Cycle { parent: b, child: a })
    );
    assert_eq!(
        tree.append_child(a, a),
        Err(TreeError::Cycle { parent: a, child: a })
    );
}

#[test]
fn test_leaf_cannot_have_children() {
    let mut tree = SceneTree::new();
    let leaf = tree.alloc(NodeKind::Leaf);
    let child = element(&mut tree);

    assert_eq!(
        tree.append_child(leaf, child),
        Err(TreeError::LeafCannotHaveChildren(leaf))
    );
}

// ========== dispose ==========

#[test]
fn test_dispose_frees_subtree() {
    let mut tree = SceneTree::new();
    let root = element(&mut tree);
    let mid = element(&mut tree);
    let leaf = tree.alloc(NodeKind::Leaf);
    tree.append_child(root, mid).unwrap();
    tree.append_child(mid, leaf).unwrap();

    assert_eq!(tree.dispose(mid), Err(TreeError::StillAttached(mid)));
    tree.remove_child(root, mid).unwrap();

    assert_eq!(tree.dispose(mid), Ok(vec![mid, leaf]));
    assert!(!tree.contains(mid));
    assert!(!tree.contains(leaf));
    assert_eq!(tree.len(), 1);
    assert_eq!(tree.append_child(root, mid), Err(TreeError::UnknownNode(mid)));

    // Ids are never reused.
    let fresh = element(&mut tree);
    assert_eq!(fresh, NodeId(3));
}

// ========== slots ==========

#[test]
fn test_effective_children_splice_slots() {
    let mut tree = SceneTree::new();
    let host = element(&mut tree);
    let a = element(&mut tree);
    let slot = tree.alloc(NodeKind::Slot);
    let b = element(&mut tree);
    let nested = tree.alloc(NodeKind::Slot);
    let c = element(&mut tree);
    let d = element(&mut tree);

    tree.append_child(host, a).unwrap();
    tree.append_child(host, slot).unwrap();
    tree.append_child(slot, b).unwrap();
    tree.append_child(slot, nested).unwrap();
    tree.append_child(nested, c).unwrap();
    tree.append_child(host, d).unwrap();

    let children: Vec<NodeId> = tree.effective_children(host).collect();
    assert_eq!(children, vec![a, b, c, d]);

    assert_eq!(tree.layout_parent(c), Some(host));
    assert_eq!(tree.layout_parent(a), Some(host));
    assert_eq!(tree.layout_parent(host), None);
}

#[test]
fn test_layout_roots_skip_slots_and_children() {
    let mut tree = SceneTree::new();
    let root = element(&mut tree);
    let child = element(&mut tree);
    let orphan_slot = tree.alloc(NodeKind::Slot);
    let slotted = element(&mut tree);
    tree.append_child(root, child).unwrap();
    tree.append_child(orphan_slot, slotted).unwrap();

    let roots: Vec<NodeId> = tree.layout_roots().collect();
    assert_eq!(roots, vec![root, slotted]);
}

#[test]
fn test_descendants_pre_order() {
    let mut tree = SceneTree::new();
    let root = element(&mut tree);
    let a = element(&mut tree);
    let a1 = element(&mut tree);
    let b = element(&mut tree);
    tree.append_child(root, a).unwrap();
    tree.append_child(a, a1).unwrap();
    tree.append_child(root, b).unwrap();

    let order: Vec<NodeId> = tree.descendants(root).collect();
    assert_eq!(order, vec![root, a, a1, b]);
    assert!(tree.is_descendant_of(a1, root));
    assert!(!tree.is_descendant_of(root, a1));
}
