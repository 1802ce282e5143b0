//! Label visibility driven by the explosion factor.
//!
//! Rendering a label is the host's job. The engine only produces one
//! [`AnnotationFrame`] per annotated part per tick.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use sunder_core::inverse_lerp;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FadeRange {
    pub start: f32,
    pub end: f32,
}

impl FadeRange {
    #[must_use]
    pub const fn new(start: f32, end: f32) -> Self {
        Self { start, end }
    }

    /// Rising edge: 0 before `start`, 1 after `end`.
    /// A range with `start >= end` switches instantly at `start`.
    #[must_use]
    pub fn rise(&self, factor: f32) -> f32 {
        if self.start < self.end {
            inverse_lerp(self.start, self.end, factor)
        } else if factor >= self.start {
            1.0
        } else {
            0.0
        }
    }
}

/// Per-frame output consumed by the label renderer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnnotationFrame {
    /// Opacity in `[0, 1]`.
    pub visibility: f32,
    /// World-space label position.
    pub anchor: Vec3,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Annotation {
    pub fade_in: Option<FadeRange>,
    pub fade_out: Option<FadeRange>,
    /// Offset from the node origin, in node space.
    pub position_offset: Vec3,

    #[serde(skip)]
    pub frame: AnnotationFrame,
}

impl Default for Annotation {
    fn default() -> Self {
        Self {
            fade_in: Some(FadeRange::new(0.2, 0.4)),
            fade_out: Some(FadeRange::new(0.7, 0.9)),
            position_offset: Vec3::new(0.0, 0.2, 0.0),
            frame: AnnotationFrame::default(),
        }
    }
}

impl Annotation {
    /// An annotation that is always fully visible.
    #[must_use]
    pub fn always_visible() -> Self {
        Self {
            fade_in: None,
            fade_out: None,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn visibility(&self, factor: f32) -> f32 {
        let fade_in = self.fade_in.map_or(1.0, |r| r.rise(factor));
        let fade_out = self.fade_out.map_or(1.0, |r| 1.0 - r.rise(factor));
        fade_in.min(fade_out).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_ranges_fade_in_then_out() {
        let a = Annotation::default();
        assert_eq!(a.visibility(0.0), 0.0);
        assert!((a.visibility(0.3) - 0.5).abs() < 1e-5);
        assert_eq!(a.visibility(0.5), 1.0);
        assert!((a.visibility(0.8) - 0.5).abs() < 1e-5);
        assert_eq!(a.visibility(1.0), 0.0);
    }

    #[test]
    fn degenerate_range_is_a_step() {
        let a = Annotation {
            fade_in: Some(FadeRange::new(0.5, 0.5)),
            fade_out: None,
            ..Annotation::default()
        };
        assert_eq!(a.visibility(0.49), 0.0);
        assert_eq!(a.visibility(0.5), 1.0);

        let b = Annotation {
            fade_in: None,
            fade_out: Some(FadeRange::new(0.6, 0.1)),
            ..Annotation::default()
        };
        assert_eq!(b.visibility(0.59), 1.0);
        assert_eq!(b.visibility(0.6), 0.0);
    }

    #[test]
    fn disabled_ranges_are_always_visible() {
        let a = Annotation::always_visible();
        assert_eq!(a.visibility(0.0), 1.0);
        assert_eq!(a.visibility(1.0), 1.0);
    }
}
