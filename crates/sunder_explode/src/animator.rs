//! Special animators
//!
//! A special animator replaces mode-based displacement for one part. The
//! host attaches it to the part's node with
//! [`ExplosionSystem::attach_animator`](crate::ExplosionSystem::attach_animator);
//! setup then resolves the part to [`PartAnimator::Custom`](crate::PartAnimator::Custom)
//! and calls [`SpecialAnimator::init`] with the captured rest pose.

use std::f32::consts::TAU;

use glam::{Quat, Vec3};
use sunder_scene::Transform;

/// Per-part animation strategy driven by the part's effective factor.
pub trait SpecialAnimator: std::fmt::Debug {
    /// Receives the rest pose captured at setup.
    fn init(&mut self, rest_position: Vec3, rest_rotation: Quat);

    /// Writes the pose for `factor` into the part's local transform.
    fn animate(&mut self, factor: f32, transform: &mut Transform);
}

/// Threaded-fastener behaviour: backs out along an axis while spinning.
#[derive(Debug, Clone, PartialEq)]
pub struct BoltUnscrew {
    /// Local axis to unscrew along.
    pub axis: Vec3,
    /// Travel at factor 1.
    pub distance: f32,
    /// Full turns at factor 1.
    pub rotations: f32,
    /// Reverse thread direction.
    pub invert_rotation: bool,

    rest: Option<(Vec3, Quat)>,
}

impl BoltUnscrew {
    #[must_use]
    pub fn new(axis: Vec3, distance: f32, rotations: f32) -> Self {
        Self {
            axis,
            distance,
            rotations,
            invert_rotation: false,
            rest: None,
        }
    }

    #[must_use]
    pub fn inverted(mut self) -> Self {
        self.invert_rotation = true;
        self
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.rest.is_some()
    }
}

impl Default for BoltUnscrew {
    fn default() -> Self {
        Self::new(Vec3::Z, 1.0, 5.0)
    }
}

impl SpecialAnimator for BoltUnscrew {
    fn init(&mut self, rest_position: Vec3, rest_rotation: Quat) {
        self.rest = Some((rest_position, rest_rotation));
    }

    fn animate(&mut self, factor: f32, transform: &mut Transform) {
        // Not initialised by setup: treat the current pose as closed.
        let (rest_position, rest_rotation) = *self
            .rest
            .get_or_insert((transform.position, transform.rotation));

        let axis = self.axis.normalize_or_zero();
        transform.position = rest_position + axis * (self.distance * factor);

        let mut angle = TAU * self.rotations * factor;
        if self.invert_rotation {
            angle = -angle;
        }
        let spin = if axis == Vec3::ZERO {
            Quat::IDENTITY
        } else {
            Quat::from_axis_angle(axis, angle)
        };
        transform.rotation = rest_rotation * spin;
    }
}
