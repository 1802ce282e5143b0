#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

//! Sunder: hierarchical exploded-view animation for scene graphs.
//!
//! This crate re-exports the workspace crates under one roof:
//!
//! - [`core`]: handles, errors, interpolation math
//! - [`scene`]: the arena scene graph the engine animates
//! - [`explode`]: managers, setup, evaluation and cleanup

pub use sunder_core as core;
pub use sunder_explode as explode;
pub use sunder_scene as scene;

pub use sunder_core::{NodeHandle, Result, SunderError};
pub use sunder_explode::{
    Annotation, AnnotationFrame, BoltUnscrew, ExplosionCommand, ExplosionManager, ExplosionMode, ExplosionSettings,
    ExplosionSnapshot, ExplosionSystem, FadeRange, PartAnimator, PartRecord, RestPose, SpecialAnimator,
};
pub use sunder_scene::{BoundingBox, Node, Renderer, Scene, Transform};

pub mod prelude {
    pub use crate::{
        BoundingBox, ExplosionMode, ExplosionSettings, ExplosionSystem, NodeHandle, Result, Scene, SunderError,
    };
    pub use glam::{Quat, Vec3};
}
