use serde::{Deserialize, Serialize};
use sunder_core::{NodeHandle, split_phases};

use crate::part::PartRecord;
use crate::settings::{ExplosionMode, ExplosionSettings};

/// Explosion state attached to one scene node.
///
/// `parts` and `sub_managers` are rebuilt by
/// [`setup_explosion`](crate::ExplosionSystem::setup_explosion); everything
/// else is configuration the host may read and write at any time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExplosionManager {
    pub settings: ExplosionSettings,

    /// Primary driving scalar, nominally in `[0, 1]`.
    pub explosion_factor: f32,
    /// Drives sequencing of sub-managers when factors are not linked.
    pub orchestration_factor: f32,

    /// Explicit explosion centre. Falls back to the manager node's position.
    pub center: Option<NodeHandle>,

    pub parts: Vec<PartRecord>,
    pub sub_managers: Vec<NodeHandle>,
}

impl ExplosionManager {
    #[must_use]
    pub fn new(settings: ExplosionSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    #[inline]
    #[must_use]
    pub fn mode(&self) -> ExplosionMode {
        self.settings.mode
    }

    /// Decomposes the stored factors into `(local movement, orchestration)`.
    ///
    /// Linked factors derive both values from `explosion_factor`, either
    /// simultaneously or as two sequential phases. Unlinked factors are used
    /// as stored.
    #[must_use]
    pub fn effective_factors(&self) -> (f32, f32) {
        if !self.settings.link_explosion_factors {
            return (self.explosion_factor, self.orchestration_factor);
        }
        if self.settings.separate_movement_and_orchestration {
            split_phases(self.explosion_factor)
        } else {
            (self.explosion_factor, self.explosion_factor)
        }
    }

    /// Assigns a slice value handed down by a parent's orchestration.
    pub(crate) fn drive(&mut self, value: f32) {
        if self.settings.separate_movement_and_orchestration {
            let (movement, orchestration) = split_phases(value);
            self.explosion_factor = movement;
            self.orchestration_factor = orchestration;
        } else {
            self.explosion_factor = value;
            self.orchestration_factor = value;
        }
    }

    /// The record controlling `node`, if any.
    #[must_use]
    pub fn part_for(&self, node: NodeHandle) -> Option<&PartRecord> {
        self.parts.iter().find(|p| p.node == node)
    }

    pub fn part_for_mut(&mut self, node: NodeHandle) -> Option<&mut PartRecord> {
        self.parts.iter_mut().find(|p| p.node == node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlinked_factors_are_independent() {
        let mut m = ExplosionManager::default();
        m.explosion_factor = 0.3;
        m.orchestration_factor = 0.8;
        assert_eq!(m.effective_factors(), (0.3, 0.8));
    }

    #[test]
    fn linked_factors_follow_explosion_factor() {
        let mut m = ExplosionManager::default();
        m.settings.link_explosion_factors = true;
        m.explosion_factor = 0.4;
        m.orchestration_factor = 0.9;
        assert_eq!(m.effective_factors(), (0.4, 0.4));
    }

    #[test]
    fn separated_phases_are_sequential() {
        let mut m = ExplosionManager::default();
        m.settings.link_explosion_factors = true;
        m.settings.separate_movement_and_orchestration = true;

        m.explosion_factor = 0.25;
        assert_eq!(m.effective_factors(), (0.5, 0.0));

        m.explosion_factor = 0.75;
        assert_eq!(m.effective_factors(), (1.0, 0.5));
    }

    #[test]
    fn drive_splits_for_separated_child() {
        let mut m = ExplosionManager::default();
        m.settings.separate_movement_and_orchestration = true;
        m.drive(0.75);
        assert_eq!((m.explosion_factor, m.orchestration_factor), (1.0, 0.5));

        m.settings.separate_movement_and_orchestration = false;
        m.drive(0.75);
        assert_eq!((m.explosion_factor, m.orchestration_factor), (0.75, 0.75));
    }
}
