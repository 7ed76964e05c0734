//! Core value types, error taxonomy and small numeric helpers.

/// Geometry and color value types shared across the crate.
pub mod core;
/// Error taxonomy and result alias.
pub mod error;
pub(crate) mod math;
