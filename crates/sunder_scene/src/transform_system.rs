//! Transform System
//!
//! Propagates world matrices through the hierarchy, decoupled from [`Scene`]
//! so that it only borrows the node arena and the root list.
//!
//! The explosion engine itself never depends on cached world matrices (it
//! composes them on demand); this pass exists for the host, which reads
//! [`Node::world_matrix`] after each tick.
//!
//! [`Scene`]: crate::Scene

use glam::Affine3A;
use slotmap::SlotMap;

use crate::NodeHandle;
use crate::node::Node;

/// Updates the world matrix of every node reachable from `roots`.
///
/// Uses an explicit stack instead of recursion so deep hierarchies cannot
/// overflow. A node's world matrix is only recomputed when its local matrix
/// or an ancestor's world matrix changed.
pub fn update_hierarchy_iterative(nodes: &mut SlotMap<NodeHandle, Node>, roots: &[NodeHandle]) {
    // (node, parent world matrix, parent changed)
    let mut stack: Vec<(NodeHandle, Affine3A, bool)> = Vec::with_capacity(64);

    for &root in roots.iter().rev() {
        stack.push((root, Affine3A::IDENTITY, false));
    }

    while let Some((handle, parent_world, parent_changed)) = stack.pop() {
        let Some(node) = nodes.get_mut(handle) else {
            continue;
        };

        let local_changed = node.transform.update_local_matrix();
        let world_needs_update = local_changed || parent_changed;

        if world_needs_update {
            let new_world = parent_world * *node.transform.local_matrix();
            node.transform.set_world_matrix(new_world);
        }

        let current_world = node.transform.world_matrix;
        for &child in node.children.iter().rev() {
            stack.push((child, current_world, world_needs_update));
        }
    }
}

/// Updates the subtree rooted at `root`, reading the parent's cached world
/// matrix as the starting point.
pub fn update_subtree(nodes: &mut SlotMap<NodeHandle, Node>, root: NodeHandle) {
    let Some(node) = nodes.get(root) else {
        return;
    };
    let parent_world = node
        .parent
        .and_then(|p| nodes.get(p))
        .map_or(Affine3A::IDENTITY, |p| p.transform.world_matrix);

    let mut stack = vec![(root, parent_world)];
    while let Some((handle, parent_world)) = stack.pop() {
        let Some(node) = nodes.get_mut(handle) else {
            continue;
        };
        node.transform.update_local_matrix();
        let world = parent_world * *node.transform.local_matrix();
        node.transform.set_world_matrix(world);
        for &child in node.children.iter().rev() {
            stack.push((child, world));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_hierarchy_update() {
        let mut nodes: SlotMap<NodeHandle, Node> = SlotMap::with_key();

        let mut parent = Node::new();
        parent.transform.position = Vec3::new(1.0, 0.0, 0.0);
        let parent_handle = nodes.insert(parent);

        let mut child = Node::new();
        child.transform.position = Vec3::new(0.0, 1.0, 0.0);
        child.parent = Some(parent_handle);
        let child_handle = nodes.insert(child);

        nodes.get_mut(parent_handle).unwrap().children.push(child_handle);

        update_hierarchy_iterative(&mut nodes, &[parent_handle]);

        let child_world_pos = nodes.get(child_handle).unwrap().transform.world_matrix.translation;
        assert!((child_world_pos.x - 1.0).abs() < 1e-5);
        assert!((child_world_pos.y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_subtree_update_uses_parent_cache() {
        let mut nodes: SlotMap<NodeHandle, Node> = SlotMap::with_key();

        let mut parent = Node::new();
        parent.transform.position = Vec3::new(0.0, 0.0, 5.0);
        let parent_handle = nodes.insert(parent);

        let mut child = Node::new();
        child.parent = Some(parent_handle);
        let child_handle = nodes.insert(child);
        nodes.get_mut(parent_handle).unwrap().children.push(child_handle);

        update_hierarchy_iterative(&mut nodes, &[parent_handle]);

        nodes.get_mut(child_handle).unwrap().transform.position = Vec3::X;
        update_subtree(&mut nodes, child_handle);

        let pos = nodes.get(child_handle).unwrap().transform.world_matrix.translation;
        assert!((pos.x - 1.0).abs() < 1e-5);
        assert!((pos.z - 5.0).abs() < 1e-5);
    }
}
