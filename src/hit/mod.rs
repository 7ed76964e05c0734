//! Coordinate-space hit testing with a pixel-accurate fallback.

/// Persisted 1x1 readback probe.
pub mod probe;
/// Point-in-leaf resolution and memoization.
pub mod tester;
