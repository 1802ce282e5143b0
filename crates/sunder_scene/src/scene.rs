use glam::{Affine3A, Vec3};
use slotmap::{SlotMap, SparseSecondaryMap};

use crate::NodeHandle;
use crate::bounds::{BoundingBox, Renderer};
use crate::node::Node;
use crate::transform_system;
use crate::wrapper::SceneNode;

/// Scene graph container.
///
/// The scene owns the node arena and the renderer capability map. It plays
/// the role of the host engine for the explosion system: hierarchy
/// iteration, transform access, world-space helpers and capability queries.
///
/// World-space helpers ([`world_matrix`](Self::world_matrix) and friends)
/// compose local matrices up the parent chain on demand, so they are valid
/// immediately after any transform edit, without a propagation pass.
#[derive(Debug, Default)]
pub struct Scene {
    pub nodes: SlotMap<NodeHandle, Node>,
    pub root_nodes: Vec<NodeHandle>,

    renderers: SparseSecondaryMap<NodeHandle, Renderer>,
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            root_nodes: Vec::new(),
            renderers: SparseSecondaryMap::new(),
        }
    }

    // ========================================================================
    // Node creation & removal
    // ========================================================================

    /// Creates an unnamed root node.
    pub fn create_node(&mut self) -> NodeHandle {
        self.add_node(Node::new())
    }

    /// Creates a named root node.
    pub fn create_node_with_name(&mut self, name: &str) -> NodeHandle {
        self.add_node(Node::with_name(name))
    }

    /// Adds a node to the scene as a root node.
    pub fn add_node(&mut self, node: Node) -> NodeHandle {
        let handle = self.nodes.insert(node);
        self.root_nodes.push(handle);
        handle
    }

    /// Adds a node directly under `parent`. Falls back to a root node when
    /// the parent handle is stale.
    pub fn add_to_parent(&mut self, child: Node, parent: NodeHandle) -> NodeHandle {
        if !self.nodes.contains_key(parent) {
            log::warn!("add_to_parent: parent {parent:?} not found, adding as root");
            return self.add_node(child);
        }

        let handle = self.nodes.insert(child);
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(handle);
        }
        if let Some(c) = self.nodes.get_mut(handle) {
            c.parent = Some(parent);
        }
        handle
    }

    /// Removes a node and its entire subtree, including attached renderers.
    pub fn remove_node(&mut self, handle: NodeHandle) {
        let Some(node) = self.nodes.get(handle) else {
            return;
        };
        let parent = node.parent;

        match parent {
            Some(parent) => {
                if let Some(p) = self.nodes.get_mut(parent)
                    && let Some(pos) = p.children.iter().position(|&x| x == handle)
                {
                    p.children.remove(pos);
                }
            }
            None => {
                if let Some(pos) = self.root_nodes.iter().position(|&x| x == handle) {
                    self.root_nodes.remove(pos);
                }
            }
        }

        let mut stack = vec![handle];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.remove(current) {
                stack.extend(node.children);
            }
            self.renderers.remove(current);
        }
    }

    /// Makes `child` a child of `parent`, detaching it from its old parent.
    ///
    /// Requests that would create a cycle are rejected with a warning.
    pub fn attach(&mut self, child: NodeHandle, parent: NodeHandle) {
        if child == parent {
            log::warn!("Cannot attach node to itself!");
            return;
        }
        if !self.nodes.contains_key(child) || !self.nodes.contains_key(parent) {
            log::error!("attach: node not found ({child:?} -> {parent:?})");
            return;
        }
        if self.is_ancestor(child, parent) {
            log::warn!("attach: {child:?} is an ancestor of {parent:?}, ignoring");
            return;
        }

        self.detach_from_parent(child);

        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(child);
        }
        if let Some(c) = self.nodes.get_mut(child) {
            c.parent = Some(parent);
            c.transform.mark_dirty();
        }
    }

    /// Detaches a node from its parent and makes it a root node.
    pub fn detach(&mut self, child: NodeHandle) {
        if !self.nodes.contains_key(child) {
            return;
        }
        if self.detach_from_parent(child) {
            self.root_nodes.push(child);
            if let Some(c) = self.nodes.get_mut(child) {
                c.parent = None;
                c.transform.mark_dirty();
            }
        }
    }

    /// Unlinks `child` from its parent (or the root list). Returns true if it
    /// had a parent.
    fn detach_from_parent(&mut self, child: NodeHandle) -> bool {
        let old_parent = self.nodes.get(child).and_then(|n| n.parent);
        if let Some(p) = old_parent {
            if let Some(n) = self.nodes.get_mut(p)
                && let Some(i) = n.children.iter().position(|&x| x == child)
            {
                n.children.remove(i);
            }
            true
        } else {
            if let Some(i) = self.root_nodes.iter().position(|&x| x == child) {
                self.root_nodes.remove(i);
            }
            false
        }
    }

    /// Returns true if `ancestor` appears on the parent chain of `node`.
    #[must_use]
    pub fn is_ancestor(&self, ancestor: NodeHandle, node: NodeHandle) -> bool {
        let mut current = self.parent(node);
        while let Some(p) = current {
            if p == ancestor {
                return true;
            }
            current = self.parent(p);
        }
        false
    }

    // ========================================================================
    // Node access
    // ========================================================================

    #[must_use]
    pub fn contains(&self, handle: NodeHandle) -> bool {
        self.nodes.contains_key(handle)
    }

    #[must_use]
    pub fn get_node(&self, handle: NodeHandle) -> Option<&Node> {
        self.nodes.get(handle)
    }

    pub fn get_node_mut(&mut self, handle: NodeHandle) -> Option<&mut Node> {
        self.nodes.get_mut(handle)
    }

    /// Chainable wrapper for fluent edits.
    pub fn node(&mut self, handle: NodeHandle) -> SceneNode<'_> {
        SceneNode::new(self, handle)
    }

    #[must_use]
    pub fn get_name(&self, handle: NodeHandle) -> Option<&str> {
        self.nodes.get(handle).map(|n| n.name.as_str())
    }

    pub fn set_name(&mut self, handle: NodeHandle, name: &str) {
        if let Some(node) = self.nodes.get_mut(handle) {
            node.name = name.to_string();
        }
    }

    #[must_use]
    pub fn parent(&self, handle: NodeHandle) -> Option<NodeHandle> {
        self.nodes.get(handle).and_then(|n| n.parent)
    }

    /// Children of `handle` in insertion order; empty for stale handles.
    #[must_use]
    pub fn children(&self, handle: NodeHandle) -> &[NodeHandle] {
        self.nodes.get(handle).map_or(&[], |n| n.children.as_slice())
    }

    /// First direct child of `parent` called `name`.
    #[must_use]
    pub fn find_child(&self, parent: NodeHandle, name: &str) -> Option<NodeHandle> {
        self.children(parent)
            .iter()
            .copied()
            .find(|&c| self.get_name(c) == Some(name))
    }

    // ========================================================================
    // Renderer capability
    // ========================================================================

    pub fn set_renderer(&mut self, handle: NodeHandle, renderer: Renderer) {
        if self.nodes.contains_key(handle) {
            self.renderers.insert(handle, renderer);
        }
    }

    pub fn remove_renderer(&mut self, handle: NodeHandle) -> Option<Renderer> {
        self.renderers.remove(handle)
    }

    #[must_use]
    pub fn renderer(&self, handle: NodeHandle) -> Option<&Renderer> {
        self.renderers.get(handle)
    }

    #[must_use]
    pub fn has_renderer(&self, handle: NodeHandle) -> bool {
        self.renderers.contains_key(handle)
    }

    /// Whether `handle` or any of its descendants carries a renderer.
    #[must_use]
    pub fn subtree_has_renderer(&self, handle: NodeHandle) -> bool {
        let mut stack = vec![handle];
        while let Some(current) = stack.pop() {
            if self.renderers.contains_key(current) {
                return true;
            }
            stack.extend_from_slice(self.children(current));
        }
        false
    }

    // ========================================================================
    // World-space helpers
    // ========================================================================

    /// World matrix of `handle`, composed fresh from the parent chain.
    #[must_use]
    pub fn world_matrix(&self, handle: NodeHandle) -> Option<Affine3A> {
        self.chain_to_ancestor(handle, None)
    }

    /// Matrix mapping `handle`'s child space into `ancestor`'s child space
    /// (world space for `None`), composed from local matrices only.
    ///
    /// Returns `None` if `ancestor` is not on the parent chain of `handle`.
    #[must_use]
    pub fn chain_to_ancestor(&self, handle: NodeHandle, ancestor: Option<NodeHandle>) -> Option<Affine3A> {
        let node = self.nodes.get(handle)?;
        let mut matrix = node.transform.compute_local_matrix();
        let mut current = node.parent;
        while current != ancestor {
            let parent = self.nodes.get(current?)?;
            matrix = parent.transform.compute_local_matrix() * matrix;
            current = parent.parent;
        }
        Some(matrix)
    }

    /// Matrix of the coordinate space spanned by `handle`'s children.
    /// `None` denotes world space.
    #[must_use]
    pub fn space_matrix(&self, handle: Option<NodeHandle>) -> Option<Affine3A> {
        match handle {
            Some(h) => self.world_matrix(h),
            None => Some(Affine3A::IDENTITY),
        }
    }

    #[must_use]
    pub fn world_position(&self, handle: NodeHandle) -> Option<Vec3> {
        self.world_matrix(handle).map(|m| Vec3::from(m.translation))
    }

    /// Converts a world-space vector into the space of `handle`'s children.
    ///
    /// `None` when that space is degenerate (e.g. a zero-scale ancestor).
    #[must_use]
    pub fn inverse_transform_vector(&self, handle: Option<NodeHandle>, vector: Vec3) -> Option<Vec3> {
        let inverse = try_inverse(&self.space_matrix(handle)?)?;
        Some(inverse.transform_vector3(vector))
    }

    /// Matrix mapping points expressed in `from`'s child space into `to`'s
    /// child space.
    ///
    /// Identical spaces yield the exact identity, and spaces on the same
    /// parent chain are related through local matrices only, so identity
    /// transforms along the way introduce no rounding. `None` when the
    /// conversion would invert a singular matrix.
    #[must_use]
    pub fn space_to_space(&self, from: Option<NodeHandle>, to: Option<NodeHandle>) -> Option<Affine3A> {
        if from == to {
            return match from {
                Some(h) if !self.nodes.contains_key(h) => None,
                _ => Some(Affine3A::IDENTITY),
            };
        }
        if let Some(f) = from
            && let Some(m) = self.chain_to_ancestor(f, to)
        {
            return Some(m);
        }
        if let Some(t) = to
            && let Some(m) = self.chain_to_ancestor(t, from)
        {
            return try_inverse(&m);
        }
        let from_world = self.space_matrix(from)?;
        let to_world = self.space_matrix(to)?;
        Some(try_inverse(&to_world)? * from_world)
    }

    /// Centre of the world-space union of all renderer bounds in the subtree
    /// rooted at `handle`. `None` if the subtree has no renderer.
    #[must_use]
    pub fn world_bounds_center(&self, handle: NodeHandle) -> Option<Vec3> {
        let root_world = self.world_matrix(handle)?;
        let mut combined: Option<BoundingBox> = None;
        let mut stack = vec![(handle, root_world)];

        while let Some((current, world)) = stack.pop() {
            if let Some(renderer) = self.renderers.get(current) {
                let bbox = renderer.bounds.transform(&world);
                combined = Some(match combined {
                    Some(existing) => existing.union(&bbox),
                    None => bbox,
                });
            }
            for &child in self.children(current) {
                if let Some(node) = self.nodes.get(child) {
                    stack.push((child, world * node.transform.compute_local_matrix()));
                }
            }
        }

        combined.map(|b| b.center())
    }

    // ========================================================================
    // Matrix propagation
    // ========================================================================

    /// Refreshes the cached world matrix of every node.
    pub fn update_matrix_world(&mut self) {
        transform_system::update_hierarchy_iterative(&mut self.nodes, &self.root_nodes);
    }

    /// Refreshes cached world matrices below `root` only.
    pub fn update_subtree(&mut self, root: NodeHandle) {
        transform_system::update_subtree(&mut self.nodes, root);
    }
}

/// Inverse of `m`, or `None` for singular and non-finite matrices.
fn try_inverse(m: &Affine3A) -> Option<Affine3A> {
    let det = m.matrix3.determinant();
    if det == 0.0 || !det.is_finite() {
        return None;
    }
    Some(m.inverse()).filter(Affine3A::is_finite)
}
