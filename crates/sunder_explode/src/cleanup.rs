use rustc_hash::FxHashSet;
use sunder_core::NodeHandle;
use sunder_scene::Scene;

use crate::setup::restore_rest_poses;
use crate::system::ExplosionSystem;
use crate::targets::TARGET_CONTAINER_NAME;

impl ExplosionSystem {
    /// Undoes setup below `manager`: restores rest poses, destroys anchor
    /// containers and empties part lists, recursively.
    ///
    /// With `remove_from_tree` the manager capability is also detached from
    /// every visited node. Unknown managers are ignored.
    pub fn cleanup(&mut self, scene: &mut Scene, manager: NodeHandle, remove_from_tree: bool) {
        let mut visited = FxHashSet::default();
        self.cleanup_manager(scene, manager, remove_from_tree, &mut visited);
    }

    fn cleanup_manager(
        &mut self,
        scene: &mut Scene,
        manager: NodeHandle,
        remove_from_tree: bool,
        visited: &mut FxHashSet<NodeHandle>,
    ) {
        if !visited.insert(manager) {
            return;
        }
        let Some(record) = self.managers.get_mut(manager) else {
            return;
        };

        restore_rest_poses(scene, record);
        record.parts.clear();
        let sub_managers = std::mem::take(&mut record.sub_managers);

        if let Some(container) = scene.find_child(manager, TARGET_CONTAINER_NAME) {
            scene.remove_node(container);
        }

        for sub in sub_managers {
            self.cleanup_manager(scene, sub, remove_from_tree, visited);
        }

        if remove_from_tree {
            self.managers.remove(manager);
        }
        log::debug!("Cleaned up explosion manager {manager:?}");
    }
}
