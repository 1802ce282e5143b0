use sunder_core::NodeHandle;

/// Structural request applied at the end of [`ExplosionSystem::update`](crate::ExplosionSystem::update).
///
/// Queueing keeps setup and cleanup out of an in-progress evaluation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExplosionCommand {
    Setup(NodeHandle),
    Cleanup {
        manager: NodeHandle,
        remove_from_tree: bool,
    },
    InitializeTargetMode(NodeHandle),
    ClearTargets(NodeHandle),
}

impl ExplosionCommand {
    /// The manager node the command acts on.
    #[must_use]
    pub fn manager(&self) -> NodeHandle {
        match *self {
            Self::Setup(h) | Self::InitializeTargetMode(h) | Self::ClearTargets(h) => h,
            Self::Cleanup { manager, .. } => manager,
        }
    }
}
