//! Target anchor and control point provisioning
//!
//! Anchors are plain scene nodes, so hosts can move them and their
//! placements persist with the scene. Layout under a manager node:
//!
//! ```text
//! manager
//! └── ExplosionTargets
//!     ├── Target_Bolt
//!     │   ├── ControlPoint_0
//!     │   └── ControlPoint_1
//!     └── Target_Cover
//! ```
//!
//! Target positions live in the container's space and control points in
//! their target's space. Readers convert them into the part's parent space
//! with [`anchor_position`].

use glam::{Vec3, Vec3A};
use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use sunder_core::{NodeHandle, Result, SunderError};
use sunder_scene::{Node, Scene, Transform};

use crate::manager::ExplosionManager;
use crate::settings::ExplosionMode;
use crate::system::ExplosionSystem;

pub const TARGET_CONTAINER_NAME: &str = "ExplosionTargets";
pub const TARGET_PREFIX: &str = "Target_";
pub const CONTROL_POINT_PREFIX: &str = "ControlPoint_";

/// Number of control points seeded for a curved path.
const DEFAULT_CONTROL_POINTS: usize = 2;
/// Path parameter of the first seeded control point; later ones are spaced evenly.
const CONTROL_POINT_STEP: f32 = 0.05;
/// Peak sideways bend relative to path length.
const CONTROL_POINT_BEND: f32 = 0.1;

impl ExplosionSystem {
    /// Ensures every part of `manager` has a target anchor, plus control
    /// points in curved mode. Existing anchors are kept as placed.
    pub fn initialize_target_mode(&mut self, scene: &mut Scene, manager: NodeHandle) -> Result<()> {
        if !scene.contains(manager) {
            return Err(SunderError::NodeNotFound(manager));
        }
        let record = self.require_manager_mut(manager)?;
        provision_all(scene, manager, record);
        Ok(())
    }

    /// Returns the target anchor for the part driving `node`, creating it
    /// if needed.
    pub fn ensure_target(&mut self, scene: &mut Scene, manager: NodeHandle, node: NodeHandle) -> Result<Option<NodeHandle>> {
        if !scene.contains(manager) {
            return Err(SunderError::NodeNotFound(manager));
        }
        let record = self.require_manager_mut(manager)?;
        let Some(index) = record.parts.iter().position(|p| p.node == node) else {
            return Ok(None);
        };
        Ok(ensure_target(scene, manager, record, index))
    }

    /// Destroys the anchor container and forgets every part's anchors.
    pub fn clear_targets(&mut self, scene: &mut Scene, manager: NodeHandle) -> Result<()> {
        let record = self.require_manager_mut(manager)?;
        for part in &mut record.parts {
            part.target = None;
            part.control_points.clear();
        }
        if let Some(container) = scene.find_child(manager, TARGET_CONTAINER_NAME) {
            scene.remove_node(container);
            log::debug!("Cleared explosion targets of {manager:?}");
        }
        Ok(())
    }

    /// Target anchors currently stored under the manager's container.
    #[must_use]
    pub fn targets(&self, scene: &Scene, manager: NodeHandle) -> Vec<NodeHandle> {
        scene
            .find_child(manager, TARGET_CONTAINER_NAME)
            .map(|c| scene.children(c).to_vec())
            .unwrap_or_default()
    }
}

/// Provisions targets for all parts, and control points in curved mode.
pub(crate) fn provision_all(scene: &mut Scene, manager_node: NodeHandle, manager: &mut ExplosionManager) {
    let curved = manager.mode() == ExplosionMode::Curved;
    for index in 0..manager.parts.len() {
        ensure_target(scene, manager_node, manager, index);
        if curved {
            ensure_control_points(scene, manager, index);
        }
    }
}

/// Position of `anchor` expressed in the child space of `space`.
pub(crate) fn anchor_position(scene: &Scene, anchor: NodeHandle, space: Option<NodeHandle>) -> Option<Vec3> {
    let node = scene.get_node(anchor)?;
    let matrix = scene.space_to_space(node.parent(), space)?;
    Some(matrix.transform_point3(node.transform.position))
}

fn ensure_container(scene: &mut Scene, manager_node: NodeHandle) -> NodeHandle {
    if let Some(container) = scene.find_child(manager_node, TARGET_CONTAINER_NAME) {
        return container;
    }
    scene.add_to_parent(Node::with_name(TARGET_CONTAINER_NAME), manager_node)
}

fn ensure_target(
    scene: &mut Scene,
    manager_node: NodeHandle,
    manager: &mut ExplosionManager,
    index: usize,
) -> Option<NodeHandle> {
    let part = manager.parts.get(index)?;
    if let Some(target) = part.target
        && scene.contains(target)
    {
        return Some(target);
    }
    let part_name = scene.get_name(part.node)?;
    let part_name = if part_name.is_empty() { "Unnamed" } else { part_name };
    let base = format!("{TARGET_PREFIX}{part_name}");

    let claimed: FxHashSet<NodeHandle> = manager
        .parts
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != index)
        .filter_map(|(_, p)| p.target)
        .collect();

    let container = ensure_container(scene, manager_node);

    let mut suffix = 0usize;
    let target = loop {
        let name = if suffix == 0 {
            base.clone()
        } else {
            format!("{base}_{suffix}")
        };
        match scene.find_child(container, &name) {
            Some(existing) if claimed.contains(&existing) => suffix += 1,
            Some(existing) => break existing,
            None => {
                let part = &manager.parts[index];
                let seed = part.radial_position(1.0, manager.settings.sensitivity);
                let position = scene
                    .space_to_space(scene.parent(part.node), Some(container))
                    .map_or(seed, |m| m.transform_point3(seed));

                let mut node = Node::with_name(name);
                node.transform = Transform::from_trs(position, part.rest.rotation, part.rest.scale);
                let created = scene.add_to_parent(node, container);
                log::debug!("Created explosion target {created:?} for part {:?}", part.node);
                break created;
            }
        }
    };

    manager.parts[index].target = Some(target);
    Some(target)
}

fn ensure_control_points(scene: &mut Scene, manager: &mut ExplosionManager, index: usize) {
    let Some(part) = manager.parts.get_mut(index) else {
        return;
    };
    part.control_points.retain(|cp| scene.contains(*cp));
    if !part.control_points.is_empty() {
        return;
    }
    let Some(target) = part.target.filter(|t| scene.contains(*t)) else {
        return;
    };

    let parent = scene.parent(part.node);
    let Some(end) = anchor_position(scene, target, parent) else {
        return;
    };
    let start = part.rest.position;
    let to_target_space = scene.space_to_space(parent, Some(target));

    let mut points: SmallVec<[NodeHandle; 2]> = SmallVec::new();
    for i in 0..DEFAULT_CONTROL_POINTS {
        let name = format!("{CONTROL_POINT_PREFIX}{i}");
        if let Some(existing) = scene.find_child(target, &name) {
            points.push(existing);
            continue;
        }
        let t = CONTROL_POINT_STEP * (i + 1) as f32;
        let local = seed_control_point(start, end, t);
        let position = to_target_space.map_or(local, |m| m.transform_point3(local));

        let mut node = Node::with_name(name);
        node.transform.position = position;
        points.push(scene.add_to_parent(node, target));
    }
    part.control_points = points;
}

/// Point at parameter `t` on the segment `start..end`, bent sideways by a
/// parabolic arc that vanishes at both ends.
fn seed_control_point(start: Vec3, end: Vec3, t: f32) -> Vec3 {
    let axis = Vec3A::from(end - start);
    let len = axis.length();
    let mut side = axis.cross(Vec3A::Y);
    if side.length_squared() < 1e-8 {
        side = axis.cross(Vec3A::X);
    }
    let side = side.normalize_or_zero();
    let bend = len * CONTROL_POINT_BEND * 4.0 * t * (1.0 - t);
    Vec3::from(Vec3A::from(start) + axis * t + side * bend)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_point_lies_near_the_path() {
        let p = seed_control_point(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), 0.05);
        assert!((p.x - 0.5).abs() < 1e-5);
        // Bend is perpendicular to the path.
        assert!(p.y.abs() < 1e-5);
        assert!((p.z.abs() - 10.0 * 0.1 * 4.0 * 0.05 * 0.95).abs() < 1e-4);
    }

    #[test]
    fn vertical_path_bends_along_fallback_axis() {
        let p = seed_control_point(Vec3::ZERO, Vec3::new(0.0, 4.0, 0.0), 0.1);
        assert!((p.y - 0.4).abs() < 1e-5);
        assert!(p.x.abs() < 1e-5);
        assert!(p.z.abs() > 0.0);
    }

    #[test]
    fn zero_length_path_stays_at_start() {
        let start = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(seed_control_point(start, start, 0.1), start);
    }
}
