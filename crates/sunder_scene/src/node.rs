use crate::NodeHandle;
use crate::transform::Transform;
use glam::Affine3A;

/// A minimal scene node containing only hierarchy and transform data.
///
/// # Design Principles
///
/// - Only keeps data that the explosion engine traverses (hierarchy, name, transform)
/// - Capabilities (renderers, managers, special animators) live in side maps
///   keyed by [`NodeHandle`], so a node never needs to know what is attached to it
///
/// # Hierarchy
///
/// Nodes form a tree structure through parent-child relationships:
/// - `parent`: Optional handle to parent node (None for root nodes)
/// - `children`: Ordered list of child node handles
#[derive(Debug, Clone)]
pub struct Node {
    /// Display name, also used to derive auxiliary anchor names.
    pub name: String,

    // === Core Hierarchy ===
    pub(crate) parent: Option<NodeHandle>,
    pub(crate) children: Vec<NodeHandle>,

    // === Core Spatial Data ===
    /// Local transform relative to the parent node.
    pub transform: Transform,

    /// Visibility flag, carried for the host renderer.
    pub visible: bool,
}

impl Node {
    /// Creates a new unnamed node with identity transform.
    #[must_use]
    pub fn new() -> Self {
        Self::with_name("")
    }

    /// Creates a new node with the given name and identity transform.
    #[must_use]
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            children: Vec::new(),
            transform: Transform::new(),
            visible: true,
        }
    }

    /// Returns the parent node handle, if any.
    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeHandle> {
        self.parent
    }

    /// Returns a read-only slice of child node handles.
    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeHandle] {
        &self.children
    }

    /// Returns the cached world matrix written by the last propagation pass.
    ///
    /// Use [`Scene::world_matrix`](crate::Scene::world_matrix) when the value
    /// must reflect transform edits made since then.
    #[inline]
    #[must_use]
    pub fn world_matrix(&self) -> &Affine3A {
        &self.transform.world_matrix
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new()
    }
}
