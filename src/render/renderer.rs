use std::collections::BTreeSet;

use kurbo::{BezPath, Rect};

use crate::assets::image::PixelImage;
use crate::render::params::DrawParams;

/// Opaque handle to a renderer-owned cached resource.
///
/// Handles are minted by the renderer and mean nothing to the core beyond
/// identity; the cache lifecycle contract only requires that every handle
/// handed out is eventually passed back to [`Renderer::uncache`] exactly once.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CacheHandle(u64);

impl CacheHandle {
    /// Wrap a renderer-chosen raw value.
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw value, for renderer bookkeeping.
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Boundary to the rasterizing renderer.
///
/// The pipeline issues draw calls and cache requests through this trait and
/// never rasterizes anything itself. A renderer is free to decline a cache
/// request by answering `None`; leaves then draw uncached.
pub trait Renderer {
    /// Rasterize and retain a vector path covering `bounds`.
    fn cache_path(&mut self, path: &BezPath, bounds: Rect) -> Option<CacheHandle>;

    /// Upload and retain a decoded image.
    fn cache_image(&mut self, image: &PixelImage) -> Option<CacheHandle>;

    /// Release a previously issued handle.
    fn uncache(&mut self, handle: CacheHandle);

    /// Draw a vector path, preferring the cached form when present.
    fn draw_path(&mut self, path: &BezPath, cache: Option<CacheHandle>);

    /// Draw the sub-rectangle of `image` selected by `params`.
    fn draw_partial(&mut self, image: &PixelImage, params: &DrawParams);

    /// Install or clear the color matrix applied to subsequent draws.
    ///
    /// Row-major 4x5 matrix over straight-alpha RGBA: four rows of
    /// `[r, g, b, a, bias]`.
    fn set_color_matrix(&mut self, matrix: Option<[f32; 20]>);
}

/// One call recorded by [`RecordingRenderer`].
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    /// A path was cached; carries the element count of the path.
    CachePath {
        /// Number of path elements rasterized.
        elements: usize,
    },
    /// An image was cached; carries its dimensions and top-left pixel.
    CacheImage {
        /// Image width in pixels.
        width: u32,
        /// Image height in pixels.
        height: u32,
        /// Premultiplied RGBA of pixel `(0, 0)`.
        top_left: [u8; 4],
    },
    /// A handle was released.
    Uncache(CacheHandle),
    /// A path draw.
    Path {
        /// Number of path elements drawn.
        elements: usize,
        /// Cache handle supplied with the draw, if any.
        cached: Option<CacheHandle>,
    },
    /// A partial-image draw.
    Partial {
        /// Image width in pixels.
        width: u32,
        /// Image height in pixels.
        height: u32,
        /// Premultiplied RGBA of pixel `(0, 0)` of the drawn image.
        top_left: [u8; 4],
        /// Parameter block supplied with the draw.
        params: DrawParams,
    },
    /// The color matrix changed.
    SetColorMatrix(Option<[f32; 20]>),
}

/// Renderer test double that records calls and accounts cache handles.
///
/// Useful in tests and for downstream consumers verifying their own frame
/// drivers: every minted handle is tracked until released, so lifecycle bugs
/// show up as leftover live handles.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    calls: Vec<DrawCall>,
    next_handle: u64,
    live: BTreeSet<CacheHandle>,
    released: Vec<CacheHandle>,
}

impl RecordingRenderer {
    /// Fresh renderer with no recorded calls.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call in issue order.
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Forget recorded calls, keeping handle accounting.
    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// Number of handles issued and not yet released.
    pub fn live_handles(&self) -> usize {
        self.live.len()
    }

    /// Return `true` while `handle` is issued and unreleased.
    pub fn is_live(&self, handle: CacheHandle) -> bool {
        self.live.contains(&handle)
    }

    /// Handles released so far, in release order.
    pub fn released(&self) -> &[CacheHandle] {
        &self.released
    }

    fn mint(&mut self) -> CacheHandle {
        self.next_handle += 1;
        let handle = CacheHandle::new(self.next_handle);
        self.live.insert(handle);
        handle
    }
}

impl Renderer for RecordingRenderer {
    fn cache_path(&mut self, path: &BezPath, _bounds: Rect) -> Option<CacheHandle> {
        self.calls.push(DrawCall::CachePath {
            elements: path.elements().len(),
        });
        Some(self.mint())
    }

    fn cache_image(&mut self, image: &PixelImage) -> Option<CacheHandle> {
        self.calls.push(DrawCall::CacheImage {
            width: image.width(),
            height: image.height(),
            top_left: image.pixel_at(0, 0),
        });
        Some(self.mint())
    }

    fn uncache(&mut self, handle: CacheHandle) {
        self.live.remove(&handle);
        self.released.push(handle);
        self.calls.push(DrawCall::Uncache(handle));
    }

    fn draw_path(&mut self, path: &BezPath, cache: Option<CacheHandle>) {
        self.calls.push(DrawCall::Path {
            elements: path.elements().len(),
            cached: cache,
        });
    }

    fn draw_partial(&mut self, image: &PixelImage, params: &DrawParams) {
        self.calls.push(DrawCall::Partial {
            width: image.width(),
            height: image.height(),
            top_left: image.pixel_at(0, 0),
            params: *params,
        });
    }

    fn set_color_matrix(&mut self, matrix: Option<[f32; 20]>) {
        self.calls.push(DrawCall::SetColorMatrix(matrix));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/renderer.rs"]
mod tests;
