//! Part discovery and rest-pose capture.
//!
//! Discovery walks the manager node's subtree depth-first and stops at the
//! first node that is either a manager or a renderer. Such nodes are the
//! manager's significant parts; everything above them is a transparent
//! container.

use glam::Vec3;
use rustc_hash::FxHashSet;
use sunder_core::{NodeHandle, Result, SunderError};
use sunder_scene::Scene;

use crate::manager::ExplosionManager;
use crate::part::{PartAnimator, PartRecord, RestPose};
use crate::settings::ExplosionSettings;
use crate::system::ExplosionSystem;
use crate::targets::{self, TARGET_CONTAINER_NAME};

impl ExplosionSystem {
    /// Rebuilds the part list and manager tree below `manager` from the
    /// current scene state.
    ///
    /// Existing parts are returned to their rest pose first, so repeated
    /// calls never capture a displaced pose. Sub-managers are set up
    /// recursively.
    pub fn setup_explosion(&mut self, scene: &mut Scene, manager: NodeHandle) -> Result<()> {
        let mut visiting = FxHashSet::default();
        self.setup_manager(scene, manager, &mut visiting)
    }

    fn setup_manager(
        &mut self,
        scene: &mut Scene,
        manager: NodeHandle,
        visiting: &mut FxHashSet<NodeHandle>,
    ) -> Result<()> {
        if !scene.contains(manager) {
            return Err(SunderError::NodeNotFound(manager));
        }
        let record = self.require_manager(manager)?;
        if !visiting.insert(manager) {
            log::warn!("Manager {manager:?} reached twice during setup, skipping");
            return Ok(());
        }
        let settings = record.settings;

        if settings.auto_group_children {
            let factor = record.explosion_factor;
            self.auto_group(scene, manager, &settings, factor);
        }

        let record = self.require_manager_mut(manager)?;
        restore_rest_poses(scene, record);
        record.explosion_factor = 0.0;
        record.parts.clear();
        record.sub_managers.clear();
        let center = record.center;

        let reference = center
            .and_then(|c| scene.world_position(c))
            .or_else(|| scene.world_position(manager))
            .unwrap_or(Vec3::ZERO);

        for node in self.discover(scene, manager) {
            if let Some(child) = self.managers.get_mut(node) {
                child.settings.mode = settings.mode;
                child.settings.use_bounds_center = settings.use_bounds_center;
                child.settings.use_hierarchical_center = settings.use_hierarchical_center;

                self.require_manager_mut(manager)?.sub_managers.push(node);
                self.setup_manager(scene, node, visiting)?;
            }

            let part = self.build_part(scene, manager, &settings, reference, node);
            self.require_manager_mut(manager)?.parts.push(part);
        }

        let record = self.require_manager_mut(manager)?;
        if settings.mode.uses_targets() {
            targets::provision_all(scene, manager, record);
        }

        log::info!(
            "Explosion setup complete for {:?} ({manager:?}): {} parts, {} sub-managers",
            scene.get_name(manager).unwrap_or_default(),
            record.parts.len(),
            record.sub_managers.len()
        );
        Ok(())
    }

    /// Attaches managers to immediate children that group renderable content.
    fn auto_group(&mut self, scene: &Scene, manager: NodeHandle, settings: &ExplosionSettings, factor: f32) {
        for &child in scene.children(manager) {
            if self.managers.contains_key(child)
                || scene.get_name(child) == Some(TARGET_CONTAINER_NAME)
                || scene.children(child).is_empty()
                || !scene.subtree_has_renderer(child)
            {
                continue;
            }
            let mut group = ExplosionManager::new(settings.inherited());
            group.explosion_factor = factor;
            self.managers.insert(child, group);
            log::debug!(
                "Auto-added group manager to {:?} ({child:?})",
                scene.get_name(child).unwrap_or_default()
            );
        }
    }

    /// Significant nodes below `manager`, in depth-first child order.
    fn discover(&self, scene: &Scene, manager: NodeHandle) -> Vec<NodeHandle> {
        let container = scene.find_child(manager, TARGET_CONTAINER_NAME);
        let mut found = Vec::new();
        let mut stack: Vec<NodeHandle> = scene.children(manager).iter().rev().copied().collect();

        while let Some(node) = stack.pop() {
            if Some(node) == container {
                continue;
            }
            if self.managers.contains_key(node) || scene.has_renderer(node) {
                found.push(node);
            } else {
                stack.extend(scene.children(node).iter().rev().copied());
            }
        }
        found
    }

    fn build_part(
        &mut self,
        scene: &Scene,
        manager: NodeHandle,
        settings: &ExplosionSettings,
        reference: Vec3,
        node: NodeHandle,
    ) -> PartRecord {
        let rest = scene
            .get_node(node)
            .map(|n| RestPose::capture(&n.transform))
            .unwrap_or(RestPose::IDENTITY);
        let parent = scene.parent(node);

        let reference = match parent {
            Some(p) if settings.use_hierarchical_center && p != manager => {
                scene.world_position(p).unwrap_or(reference)
            }
            _ => reference,
        };
        let subject = settings
            .use_bounds_center
            .then(|| scene.world_bounds_center(node))
            .flatten()
            .or_else(|| scene.world_position(node))
            .unwrap_or(reference);

        let mut world_dir = (subject - reference).normalize_or_zero();
        if world_dir == Vec3::ZERO {
            world_dir = Vec3::Y;
        }
        let direction = scene
            .inverse_transform_vector(parent, world_dir)
            .filter(|d| d.is_finite())
            .unwrap_or(world_dir);

        let mut part = PartRecord::new(node, rest, direction);
        if let Some(animator) = self.animators.get_mut(node) {
            animator.init(rest.position, rest.rotation);
            part.animator = PartAnimator::Custom(node);
        }
        part
    }
}

/// Puts every live part back into its rest pose.
pub(crate) fn restore_rest_poses(scene: &mut Scene, manager: &ExplosionManager) {
    for part in &manager.parts {
        if let Some(node) = scene.get_node_mut(part.node) {
            part.rest.apply(&mut node.transform);
        }
    }
}
