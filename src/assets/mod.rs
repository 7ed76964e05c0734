//! Decoded images and the asynchronous resolver boundary.
//!
//! The core never performs IO. Resolvers fetch and decode; leaves consume
//! decoded `PixelImage` values and pending-load events.

/// Image decoding into premultiplied RGBA8.
pub mod decode;
/// Decoded raster image handle.
pub mod image;
/// Resolver trait, load tickets and the frame-thread event queue.
pub mod resolver;
