//! Display leaves and their shared node contract.
//!
//! Leaves are driven by an external tree walker: one `layout` pass then one
//! conditional `paint` pass per frame, with `on_attach`/`on_detach`
//! bracketing renderer-side resource lifetimes.

/// Raster-image leaf.
pub mod bitmap;
/// Vector-path geometry object.
pub mod graphics;
/// Node trait, shared base state and dirty bitmasks.
pub mod node;
/// Named-property dispatch for the animation boundary.
pub mod property;
/// Vector-shape leaf.
pub mod shape;
