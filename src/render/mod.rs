//! Renderer boundary, cache lifecycle and draw-parameter packing.

/// Idempotent cache-handle lifecycle guard.
pub mod cache;
/// Alpha-map compositing.
pub mod composer;
/// Packed draw-parameter blocks.
pub mod params;
/// Renderer trait, cache handles and the recording test double.
pub mod renderer;
