//! Sunder Core
//!
//! Foundational types shared by every Sunder crate:
//!
//! - [`NodeHandle`]: generational key addressing a scene node
//! - [`SunderError`]: the error type returned at API boundaries
//! - [`math`]: inverse-lerp, orchestration slicing and de Casteljau evaluation

pub mod errors;
pub mod handles;
pub mod math;

pub use errors::{Result, SunderError};
pub use handles::NodeHandle;
pub use math::{Interpolatable, de_casteljau, inverse_lerp, slice_factor, split_phases};
