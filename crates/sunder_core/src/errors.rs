//! Error Types
//!
//! # Overview
//!
//! [`SunderError`] covers the failure modes visible at API boundaries:
//! - Operations addressed to a node that no longer exists
//! - Operations addressed to a node that carries no explosion manager
//! - Snapshot and settings (de)serialization
//!
//! Missing references *inside* an evaluation pass (destroyed parts, anchors
//! or animators) are not errors; the engine skips the affected part.
//!
//! ```rust,ignore
//! use sunder_core::{Result, SunderError};
//!
//! fn setup() -> Result<()> {
//!     Ok(())
//! }
//! ```

use thiserror::Error;

use crate::handles::NodeHandle;

/// The main error type for Sunder.
#[derive(Error, Debug)]
pub enum SunderError {
    // ========================================================================
    // Scene Errors
    // ========================================================================
    /// The handle does not resolve to a live scene node.
    #[error("Scene node not found: {0:?}")]
    NodeNotFound(NodeHandle),

    // ========================================================================
    // Explosion Errors
    // ========================================================================
    /// The node exists but carries no explosion manager.
    #[error("No explosion manager attached to node {0:?}")]
    ManagerNotFound(NodeHandle),

    /// A manager is already attached to the node.
    #[error("An explosion manager is already attached to node {0:?}")]
    ManagerAlreadyAttached(NodeHandle),

    // ========================================================================
    // Serialization Errors
    // ========================================================================
    /// JSON parsing or encoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Alias for `Result<T, SunderError>`.
pub type Result<T> = std::result::Result<T, SunderError>;
