use serde::{Deserialize, Serialize};
use sunder_core::Result;

/// How a manager displaces its parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ExplosionMode {
    /// Move along the precomputed direction, scaled by sensitivity.
    #[default]
    Radial,
    /// Interpolate linearly towards a persisted target anchor.
    FixedEndpoint,
    /// Follow a Bézier curve through control points to the target anchor.
    Curved,
}

impl ExplosionMode {
    /// Whether parts need a target anchor in this mode.
    #[must_use]
    pub fn uses_targets(self) -> bool {
        match self {
            Self::Radial => false,
            Self::FixedEndpoint | Self::Curved => true,
        }
    }
}

/// Per-manager configuration.
///
/// Every field has a default, so partial JSON documents are accepted:
///
/// ```json
/// { "mode": "Curved", "sensitivity": 2.5, "orchestrate_sub_managers": true }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplosionSettings {
    pub mode: ExplosionMode,
    /// Distance multiplier for radial displacement and default target placement.
    pub sensitivity: f32,
    /// Explode nested parts away from their own parent instead of the manager center.
    pub use_hierarchical_center: bool,
    /// Measure each part from the centre of its renderer bounds instead of its origin.
    pub use_bounds_center: bool,
    /// Attach child managers to immediate children that group renderable content.
    pub auto_group_children: bool,
    /// Time-slice the orchestration factor across sub-managers.
    pub orchestrate_sub_managers: bool,
    /// Time-slice the local factor across this manager's own parts.
    pub orchestrate_parts: bool,
    /// Derive both effective factors from `explosion_factor`.
    pub link_explosion_factors: bool,
    /// With linked factors, move own parts over [0, 0.5] and orchestrate over [0.5, 1].
    pub separate_movement_and_orchestration: bool,
}

impl Default for ExplosionSettings {
    fn default() -> Self {
        Self {
            mode: ExplosionMode::Radial,
            sensitivity: 1.0,
            use_hierarchical_center: false,
            use_bounds_center: false,
            auto_group_children: false,
            orchestrate_sub_managers: false,
            orchestrate_parts: false,
            link_explosion_factors: false,
            separate_movement_and_orchestration: false,
        }
    }
}

impl ExplosionSettings {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Settings handed to a manager created by auto-grouping.
    #[must_use]
    pub fn inherited(&self) -> Self {
        Self {
            sensitivity: self.sensitivity,
            use_hierarchical_center: self.use_hierarchical_center,
            use_bounds_center: self.use_bounds_center,
            auto_group_children: true,
            ..Self::default()
        }
    }
}
