use std::collections::VecDeque;

use rustc_hash::FxHashSet;
use slotmap::{SecondaryMap, SparseSecondaryMap};
use sunder_core::{NodeHandle, Result, SunderError};
use sunder_scene::Scene;

use crate::animator::SpecialAnimator;
use crate::annotation::{Annotation, AnnotationFrame};
use crate::command::ExplosionCommand;
use crate::manager::ExplosionManager;
use crate::part::PartRecord;
use crate::settings::{ExplosionMode, ExplosionSettings};
use crate::snapshot::ExplosionSnapshot;

/// Owner of all explosion state for one [`Scene`].
///
/// Components are stored in side tables keyed by the scene node that
/// carries them, so the scene itself stays free of explosion concerns:
///
/// - managers: `SecondaryMap` (one per manager node)
/// - special animators: `SparseSecondaryMap` (rare)
/// - annotations: `SecondaryMap`
///
/// Setup, provisioning, evaluation and cleanup live in their own modules as
/// further `impl ExplosionSystem` blocks.
#[derive(Debug, Default)]
pub struct ExplosionSystem {
    pub(crate) managers: SecondaryMap<NodeHandle, ExplosionManager>,
    pub(crate) animators: SparseSecondaryMap<NodeHandle, Box<dyn SpecialAnimator>>,
    pub(crate) annotations: SecondaryMap<NodeHandle, Annotation>,
    pub(crate) commands: VecDeque<ExplosionCommand>,
}

impl ExplosionSystem {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Manager capability
    // ========================================================================

    /// Attaches a manager to `node`.
    pub fn add_manager(&mut self, scene: &Scene, node: NodeHandle, settings: ExplosionSettings) -> Result<()> {
        if !scene.contains(node) {
            return Err(SunderError::NodeNotFound(node));
        }
        if self.managers.contains_key(node) {
            return Err(SunderError::ManagerAlreadyAttached(node));
        }
        self.managers.insert(node, ExplosionManager::new(settings));
        Ok(())
    }

    /// Drops managers, animators and annotations whose node no longer exists
    /// in `scene`. Called at the start of every [`update`](Self::update).
    pub fn prune(&mut self, scene: &Scene) {
        self.managers.retain(|h, _| scene.contains(h));
        self.animators.retain(|h, _| scene.contains(h));
        self.annotations.retain(|h, _| scene.contains(h));
    }

    /// Detaches the manager from `node` without touching the scene.
    /// Use [`cleanup`](Self::cleanup) to restore rest poses first.
    pub fn remove_manager(&mut self, node: NodeHandle) -> Option<ExplosionManager> {
        self.managers.remove(node)
    }

    #[inline]
    #[must_use]
    pub fn is_manager(&self, node: NodeHandle) -> bool {
        self.managers.contains_key(node)
    }

    #[must_use]
    pub fn manager(&self, node: NodeHandle) -> Option<&ExplosionManager> {
        self.managers.get(node)
    }

    pub fn manager_mut(&mut self, node: NodeHandle) -> Option<&mut ExplosionManager> {
        self.managers.get_mut(node)
    }

    /// All managers in slot order.
    pub fn managers(&self) -> impl Iterator<Item = (NodeHandle, &ExplosionManager)> {
        self.managers.iter()
    }

    pub(crate) fn require_manager(&self, node: NodeHandle) -> Result<&ExplosionManager> {
        self.managers.get(node).ok_or(SunderError::ManagerNotFound(node))
    }

    pub(crate) fn require_manager_mut(&mut self, node: NodeHandle) -> Result<&mut ExplosionManager> {
        self.managers.get_mut(node).ok_or(SunderError::ManagerNotFound(node))
    }

    /// Sets the primary driving factor of a manager.
    pub fn set_explosion_factor(&mut self, manager: NodeHandle, factor: f32) -> Result<()> {
        self.require_manager_mut(manager)?.explosion_factor = factor;
        Ok(())
    }

    pub fn set_orchestration_factor(&mut self, manager: NodeHandle, factor: f32) -> Result<()> {
        self.require_manager_mut(manager)?.orchestration_factor = factor;
        Ok(())
    }

    /// Switches the displacement mode. Entering a target-based mode
    /// provisions any missing anchors right away.
    pub fn set_mode(&mut self, scene: &mut Scene, manager: NodeHandle, mode: ExplosionMode) -> Result<()> {
        self.require_manager_mut(manager)?.settings.mode = mode;
        if mode.uses_targets() {
            self.initialize_target_mode(scene, manager)?;
        }
        Ok(())
    }

    // ========================================================================
    // Part-level components
    // ========================================================================

    /// Attaches a special animator to a part node. Takes effect at the next setup.
    pub fn attach_animator(&mut self, node: NodeHandle, animator: Box<dyn SpecialAnimator>) {
        self.animators.insert(node, animator);
    }

    pub fn detach_animator(&mut self, node: NodeHandle) -> Option<Box<dyn SpecialAnimator>> {
        self.animators.remove(node)
    }

    #[must_use]
    pub fn has_animator(&self, node: NodeHandle) -> bool {
        self.animators.contains_key(node)
    }

    /// Attaches a label to `node`.
    ///
    /// Visibility is driven by the factor of the part `node` belongs to, so
    /// it only changes for part nodes (renderer leaves and sub-managers).
    /// On a transparent container the anchor still follows the node but
    /// visibility stays at its last value.
    pub fn attach_annotation(&mut self, node: NodeHandle, annotation: Annotation) {
        self.annotations.insert(node, annotation);
    }

    pub fn detach_annotation(&mut self, node: NodeHandle) -> Option<Annotation> {
        self.annotations.remove(node)
    }

    #[must_use]
    pub fn annotation(&self, node: NodeHandle) -> Option<&Annotation> {
        self.annotations.get(node)
    }

    /// Latest visibility and anchor computed for the annotation on `node`.
    #[must_use]
    pub fn annotation_frame(&self, node: NodeHandle) -> Option<AnnotationFrame> {
        self.annotations.get(node).map(|a| a.frame)
    }

    // ========================================================================
    // Inspection
    // ========================================================================

    /// The record through which `manager` animates `node`.
    #[must_use]
    pub fn part_for(&self, manager: NodeHandle, node: NodeHandle) -> Option<&PartRecord> {
        self.managers.get(manager)?.part_for(node)
    }

    /// Managers that no other manager lists as a sub-manager, in slot order.
    #[must_use]
    pub fn root_managers(&self) -> Vec<NodeHandle> {
        let children: FxHashSet<NodeHandle> = self
            .managers
            .values()
            .flat_map(|m| m.sub_managers.iter().copied())
            .collect();

        self.managers
            .keys()
            .filter(|h| !children.contains(h))
            .collect()
    }

    /// Depth-first `(depth, manager)` listing of the live managers below `root`.
    #[must_use]
    pub fn manager_tree(&self, root: NodeHandle) -> Vec<(usize, NodeHandle)> {
        let mut out = Vec::new();
        let mut visited = FxHashSet::default();
        let mut stack = vec![(0usize, root)];

        while let Some((depth, handle)) = stack.pop() {
            let Some(manager) = self.managers.get(handle) else {
                continue;
            };
            if !visited.insert(handle) {
                continue;
            }
            out.push((depth, handle));
            for &child in manager.sub_managers.iter().rev() {
                stack.push((depth + 1, child));
            }
        }
        out
    }

    /// Whether the manager is in a target-based mode with at least one part
    /// still lacking a target anchor.
    #[must_use]
    pub fn needs_targets(&self, manager: NodeHandle) -> bool {
        self.managers
            .get(manager)
            .is_some_and(|m| m.mode().uses_targets() && m.parts.iter().any(|p| p.target.is_none()))
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    #[must_use]
    pub fn snapshot(&self) -> ExplosionSnapshot {
        ExplosionSnapshot {
            managers: self.managers.clone(),
            annotations: self.annotations.clone(),
        }
    }

    /// Replaces managers and annotations with the snapshot contents.
    /// Attached special animators and queued commands are kept.
    pub fn restore(&mut self, snapshot: ExplosionSnapshot) {
        self.managers = snapshot.managers;
        self.annotations = snapshot.annotations;
    }

    // ========================================================================
    // Command queue
    // ========================================================================

    pub fn enqueue(&mut self, command: ExplosionCommand) {
        self.commands.push_back(command);
    }

    #[must_use]
    pub fn pending_commands(&self) -> usize {
        self.commands.len()
    }

    /// Applies queued commands in FIFO order. A failing command is logged
    /// and skipped.
    pub fn apply_commands(&mut self, scene: &mut Scene) {
        while let Some(command) = self.commands.pop_front() {
            let result = match command {
                ExplosionCommand::Setup(h) => self.setup_explosion(scene, h),
                ExplosionCommand::Cleanup {
                    manager,
                    remove_from_tree,
                } => {
                    self.cleanup(scene, manager, remove_from_tree);
                    Ok(())
                }
                ExplosionCommand::InitializeTargetMode(h) => self.initialize_target_mode(scene, h),
                ExplosionCommand::ClearTargets(h) => self.clear_targets(scene, h),
            };
            if let Err(e) = result {
                log::warn!("Explosion command {command:?} failed: {e}");
            }
        }
    }
}
