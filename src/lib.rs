//! Vexel is a display-object rendering and caching pipeline.
//!
//! Vector shapes and raster bitmaps are leaves of a display tree owned by an
//! external walker: one [`layout`](DisplayNode::layout) pass then one
//! conditional [`paint`](DisplayNode::paint) pass per frame. The crate tracks
//! dirty state, bounding boxes, renderer-side caches, packed draw parameters
//! and hit-test results; rasterization itself stays behind the [`Renderer`]
//! trait, and image IO stays behind [`ImageResolver`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Decoded images and the asynchronous resolver boundary.
pub mod assets;
/// Display leaves and their shared node contract.
pub mod display;
/// Coordinate-space hit testing with a pixel-accurate fallback.
pub mod hit;
/// Renderer boundary, cache lifecycle and draw-parameter packing.
pub mod render;

pub use crate::foundation::core::{
    Affine, BezPath, Point, Rect, Rgba8Premul, SourceRect, Vec2,
};
pub use crate::foundation::error::{VexelError, VexelResult};

pub use crate::assets::decode::decode_image;
pub use crate::assets::image::PixelImage;
pub use crate::assets::resolver::{
    ImageEvent, ImageEventKind, ImageEvents, ImageResolver, ImageTicket, Resolution,
};
pub use crate::display::bitmap::Bitmap;
pub use crate::display::graphics::{Graphics, SharedGraphics};
pub use crate::display::node::{
    AttachFlags, DirtyCell, DirtyFlags, DisplayNode, HitMemo, NodeBase,
};
pub use crate::display::property::{ApplyProperty, PropertyValue};
pub use crate::display::shape::Shape;
pub use crate::hit::probe::PixelProbe;
pub use crate::hit::tester::{HitTestOpts, HitTester};
pub use crate::render::cache::CacheSlot;
pub use crate::render::composer::Composer;
pub use crate::render::params::DrawParams;
pub use crate::render::renderer::{CacheHandle, DrawCall, RecordingRenderer, Renderer};
