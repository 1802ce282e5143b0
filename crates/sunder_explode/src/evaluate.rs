//! Per-tick evaluation
//!
//! Managers are evaluated top-down from the roots. For every manager:
//!
//! 1. Decompose the stored factors into local movement and orchestration
//!    (skipped when a parent already assigned them this tick).
//! 2. Time-slice the orchestration factor across sub-managers.
//! 3. Place the manager's own parts.
//! 4. Recurse into sub-managers.

use glam::Vec3;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use sunder_core::{Interpolatable, NodeHandle, de_casteljau, slice_factor};
use sunder_scene::Scene;

use crate::part::{PartAnimator, PartRecord};
use crate::settings::ExplosionMode;
use crate::system::ExplosionSystem;
use crate::targets::anchor_position;

impl ExplosionSystem {
    /// Prunes components of removed nodes, runs one evaluation pass,
    /// refreshes annotations, then applies queued commands.
    pub fn update(&mut self, scene: &mut Scene) {
        self.prune(scene);
        let mut visited = FxHashSet::default();
        for root in self.root_managers() {
            self.evaluate_manager(scene, root, false, &mut visited);
        }
        self.refresh_annotation_anchors(scene);
        self.apply_commands(scene);
    }

    fn evaluate_manager(
        &mut self,
        scene: &mut Scene,
        handle: NodeHandle,
        driven: bool,
        visited: &mut FxHashSet<NodeHandle>,
    ) {
        if !visited.insert(handle) {
            return;
        }
        let Some(manager) = self.managers.get(handle) else {
            log::warn!("Skipping stale sub-manager {handle:?}");
            return;
        };

        let (local, orchestration) = if driven {
            (manager.explosion_factor, manager.orchestration_factor)
        } else {
            manager.effective_factors()
        };
        log::trace!("{handle:?}: local {local:.3}, orchestration {orchestration:.3}");

        let orchestrate = manager.settings.orchestrate_sub_managers;
        let sub_managers: SmallVec<[NodeHandle; 8]> = manager.sub_managers.iter().copied().collect();

        if orchestrate {
            let count = sub_managers.len();
            for (i, &sub) in sub_managers.iter().enumerate() {
                if let Some(child) = self.managers.get_mut(sub) {
                    child.drive(slice_factor(i, count, orchestration));
                }
            }
        }

        self.place_parts(scene, handle, local);

        for sub in sub_managers {
            self.evaluate_manager(scene, sub, orchestrate, visited);
        }
    }

    fn place_parts(&mut self, scene: &mut Scene, handle: NodeHandle, local: f32) {
        let Some(manager) = self.managers.get(handle) else {
            return;
        };
        let settings = manager.settings;
        let count = manager.parts.len();

        for (i, part) in manager.parts.iter().enumerate() {
            if !scene.contains(part.node) {
                continue;
            }
            let factor = if settings.orchestrate_parts {
                slice_factor(i, count, local)
            } else {
                local
            };

            if let Some(annotation) = self.annotations.get_mut(part.node) {
                annotation.frame.visibility = annotation.visibility(factor);
            }

            if let PartAnimator::Custom(owner) = part.animator
                && let Some(animator) = self.animators.get_mut(owner)
            {
                if let Some(node) = scene.get_node_mut(part.node) {
                    animator.animate(factor, &mut node.transform);
                }
                continue;
            }

            let Some(position) = displaced_position(scene, part, settings.mode, factor, settings.sensitivity) else {
                continue;
            };
            if let Some(node) = scene.get_node_mut(part.node) {
                node.transform.position = position;
            }
        }
    }

    fn refresh_annotation_anchors(&mut self, scene: &Scene) {
        for (node, annotation) in &mut self.annotations {
            if let Some(world) = scene.world_matrix(node) {
                annotation.frame.anchor = world.transform_point3(annotation.position_offset);
            }
        }
    }
}

/// Local position of `part` at `factor`, in the part's parent space.
///
/// Target-based modes return `None` while the target anchor is missing.
pub(crate) fn displaced_position(
    scene: &Scene,
    part: &PartRecord,
    mode: ExplosionMode,
    factor: f32,
    sensitivity: f32,
) -> Option<Vec3> {
    match mode {
        ExplosionMode::Radial => Some(part.radial_position(factor, sensitivity)),
        ExplosionMode::FixedEndpoint => {
            let space = scene.parent(part.node);
            let end = anchor_position(scene, part.target?, space)?;
            Some(Vec3::interpolate_linear(part.rest.position, end, factor))
        }
        ExplosionMode::Curved => {
            let space = scene.parent(part.node);
            let end = anchor_position(scene, part.target?, space)?;

            let mut polygon: SmallVec<[Vec3; 8]> = SmallVec::new();
            polygon.push(part.rest.position);
            polygon.extend(
                part.control_points
                    .iter()
                    .filter_map(|&cp| anchor_position(scene, cp, space)),
            );
            polygon.push(end);
            de_casteljau(polygon.as_slice(), factor)
        }
    }
}
