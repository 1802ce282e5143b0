use serde::{Deserialize, Serialize};
use slotmap::SecondaryMap;
use sunder_core::{NodeHandle, Result};

use crate::annotation::Annotation;
use crate::manager::ExplosionManager;

/// Serializable state of an [`ExplosionSystem`](crate::ExplosionSystem).
///
/// Handles stay valid only against the scene they were taken from, so a
/// snapshot must be restored alongside that scene. Special animators are
/// host behaviour and are not captured.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExplosionSnapshot {
    pub managers: SecondaryMap<NodeHandle, ExplosionManager>,
    #[serde(default)]
    pub annotations: SecondaryMap<NodeHandle, Annotation>,
}

impl ExplosionSnapshot {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}
