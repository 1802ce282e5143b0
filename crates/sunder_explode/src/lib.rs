//! Exploded-view engine.
//!
//! An [`ExplosionSystem`] stores one [`ExplosionManager`] per scene node that
//! carries the manager capability. Each manager owns a flat list of
//! [`PartRecord`]s it animates directly and an ordered list of sub-managers
//! (sub-assemblies).
//!
//! Lifecycle:
//!
//! 1. [`ExplosionSystem::add_manager`] attaches a manager to a node.
//! 2. [`ExplosionSystem::setup_explosion`] discovers significant parts,
//!    captures rest poses and provisions target anchors.
//! 3. Every tick the host writes factors and calls [`ExplosionSystem::update`],
//!    which orchestrates sub-managers top-down and places every part.
//! 4. [`ExplosionSystem::cleanup`] restores rest poses and removes anchors.
//!
//! ```rust,ignore
//! let mut system = ExplosionSystem::new();
//! system.add_manager(&scene, engine, ExplosionSettings::default())?;
//! system.setup_explosion(&mut scene, engine)?;
//! system.set_explosion_factor(engine, 0.5);
//! system.update(&mut scene);
//! ```

pub mod animator;
pub mod annotation;
pub mod cleanup;
pub mod command;
pub mod evaluate;
pub mod manager;
pub mod part;
pub mod settings;
pub mod setup;
pub mod snapshot;
pub mod system;
pub mod targets;

pub use animator::{BoltUnscrew, SpecialAnimator};
pub use annotation::{Annotation, AnnotationFrame, FadeRange};
pub use command::ExplosionCommand;
pub use manager::ExplosionManager;
pub use part::{PartAnimator, PartRecord, RestPose};
pub use settings::{ExplosionMode, ExplosionSettings};
pub use snapshot::ExplosionSnapshot;
pub use system::ExplosionSystem;
pub use targets::{CONTROL_POINT_PREFIX, TARGET_CONTAINER_NAME, TARGET_PREFIX};
