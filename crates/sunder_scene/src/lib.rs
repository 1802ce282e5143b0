//! Scene graph module
//!
//! Manages the node hierarchy that explosion managers operate on:
//! - [`Node`]: a scene node (parent/child links and a transform)
//! - [`Transform`]: local position, rotation and scale with cached matrices
//! - [`Scene`]: node arena plus capability components (renderers)
//! - [`transform_system`]: decoupled world-matrix propagation

pub mod bounds;
pub mod node;
pub mod scene;
pub mod transform;
pub mod transform_system;
pub mod wrapper;

pub use bounds::{BoundingBox, Renderer};
pub use node::Node;
pub use scene::Scene;
pub use sunder_core::NodeHandle;
pub use transform::Transform;
pub use wrapper::SceneNode;
