//! Interpolation helpers used by the explosion evaluator.
//!
//! All parameter remapping goes through [`inverse_lerp`], which clamps to
//! `[0, 1]`. Plain interpolation ([`Interpolatable::interpolate_linear`]) does
//! not clamp, so out-of-range factors extrapolate.

use glam::{Quat, Vec3};
use smallvec::SmallVec;

/// Values that can be blended linearly.
pub trait Interpolatable: Copy + Sized {
    /// Blends `start` towards `end`. `t` is not clamped.
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self;
}

impl Interpolatable for f32 {
    #[inline]
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start * (1.0 - t) + end * t
    }
}

impl Interpolatable for Vec3 {
    // Weighted form so that t = 0 and t = 1 reproduce the endpoints bit-exactly.
    #[inline]
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start * (1.0 - t) + end * t
    }
}

impl Interpolatable for Quat {
    #[inline]
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start.slerp(end, t)
    }
}

/// Returns where `value` lies between `a` and `b`, clamped to `[0, 1]`.
///
/// A degenerate range (`a == b`) yields `0.0`.
#[inline]
#[must_use]
pub fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
    if a == b {
        0.0
    } else {
        ((value - a) / (b - a)).clamp(0.0, 1.0)
    }
}

/// Remaps `factor` into the local parameter of slice `index` out of `count`
/// equal-width slices of `[0, 1]`.
///
/// Slices before the one containing `factor` saturate at `1.0`, slices after
/// it stay at `0.0`. A `count` of zero returns `factor` unchanged.
#[must_use]
pub fn slice_factor(index: usize, count: usize, factor: f32) -> f32 {
    if count == 0 {
        return factor;
    }
    let count = count as f32;
    let start = index as f32 / count;
    let end = (index + 1) as f32 / count;
    inverse_lerp(start, end, factor)
}

/// Splits one driving factor into sequential `(movement, orchestration)`
/// phases: movement runs over `[0, 0.5]`, orchestration over `[0.5, 1]`.
#[inline]
#[must_use]
pub fn split_phases(factor: f32) -> (f32, f32) {
    (inverse_lerp(0.0, 0.5, factor), inverse_lerp(0.5, 1.0, factor))
}

/// Evaluates the Bézier curve defined by `points` at `t` with de Casteljau's
/// algorithm. Any number of control points is supported; two points reduce
/// to linear interpolation.
///
/// Returns `None` for an empty polygon.
#[must_use]
pub fn de_casteljau<T: Interpolatable>(points: &[T], t: f32) -> Option<T> {
    let mut work: SmallVec<[T; 8]> = SmallVec::from_slice(points);
    let n = work.len();
    if n == 0 {
        return None;
    }

    for level in (1..n).rev() {
        for i in 0..level {
            work[i] = T::interpolate_linear(work[i], work[i + 1], t);
        }
    }

    Some(work[0])
}
