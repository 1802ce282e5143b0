use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use sunder_core::NodeHandle;
use sunder_scene::Transform;

/// Local transform captured at setup; the pose every displacement starts from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RestPose {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl RestPose {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    #[must_use]
    pub fn capture(transform: &Transform) -> Self {
        Self {
            position: transform.position,
            rotation: transform.rotation,
            scale: transform.scale,
        }
    }

    pub fn apply(&self, transform: &mut Transform) {
        transform.position = self.position;
        transform.rotation = self.rotation;
        transform.scale = self.scale;
    }
}

/// Displacement strategy of a part, resolved once at setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PartAnimator {
    /// Follow the owning manager's [`ExplosionMode`](crate::ExplosionMode).
    #[default]
    Displace,
    /// Delegate to the special animator attached to the given node.
    Custom(NodeHandle),
}

/// One part directly animated by a manager.
///
/// All handles are weak: a handle that no longer resolves in the scene is
/// treated as absent and only affects this part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartRecord {
    /// The controlled node.
    pub node: NodeHandle,
    pub rest: RestPose,
    /// World-unit direction expressed in the part's parent space. Radial mode only.
    pub direction: Vec3,
    /// Endpoint anchor for fixed-endpoint and curved modes.
    pub target: Option<NodeHandle>,
    /// Intermediate Bézier control points, in curve order.
    pub control_points: SmallVec<[NodeHandle; 2]>,
    pub animator: PartAnimator,
}

impl PartRecord {
    #[must_use]
    pub fn new(node: NodeHandle, rest: RestPose, direction: Vec3) -> Self {
        Self {
            node,
            rest,
            direction,
            target: None,
            control_points: SmallVec::new(),
            animator: PartAnimator::Displace,
        }
    }

    /// Position reached by radial displacement at `factor`.
    #[inline]
    #[must_use]
    pub fn radial_position(&self, factor: f32, sensitivity: f32) -> Vec3 {
        self.rest.position + self.direction * (factor * sensitivity)
    }
}
