use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Context;
use kurbo::{BezPath, Point, Rect, Shape};

use crate::foundation::error::VexelResult;
use crate::render::cache::CacheSlot;
use crate::render::renderer::{CacheHandle, Renderer};

/// Shared handle to a [`Graphics`] object.
///
/// The display tree is single-threaded, so sharing is `Rc<RefCell<_>>`: a
/// shape leaf owns its geometry through one handle while sibling mask lists
/// hold others.
pub type SharedGraphics = Rc<RefCell<Graphics>>;

/// Vector-path geometry backing a shape leaf.
///
/// Owns the path, a dirty bit set by mutation and consumed by bounds
/// refresh, the cached bounding box, and the slot for the rasterized render
/// cache.
#[derive(Debug, Default)]
pub struct Graphics {
    path: BezPath,
    dirty: bool,
    bounds: Rect,
    cache: CacheSlot,
}

impl Graphics {
    /// Empty geometry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Geometry from a ready-built path, with bounds computed eagerly.
    pub fn from_path(path: BezPath) -> Self {
        let mut graphics = Self {
            path,
            ..Self::default()
        };
        graphics.refresh_bounds();
        graphics
    }

    /// Geometry from SVG path data, e.g. `"M0,0 L10,0 L10,10 Z"`.
    pub fn from_svg(data: &str) -> VexelResult<Self> {
        let path = BezPath::from_svg(data).context("parse svg path data")?;
        Ok(Self::from_path(path))
    }

    /// Wrap into the shared handle leaves and mask lists hold.
    pub fn shared(self) -> SharedGraphics {
        Rc::new(RefCell::new(self))
    }

    /// The current path.
    pub fn path(&self) -> &BezPath {
        &self.path
    }

    /// Replace the path, marking the geometry dirty.
    pub fn set_path(&mut self, path: BezPath) {
        self.path = path;
        self.dirty = true;
    }

    /// Return `true` when there is no path content.
    pub fn is_empty(&self) -> bool {
        self.path.elements().is_empty()
    }

    /// Return `true` while a mutation has not been consumed by a bounds
    /// refresh.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Bounding box computed by the most recent refresh.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Recompute the bounding box from the current path and clear the dirty
    /// bit.
    pub fn refresh_bounds(&mut self) -> Rect {
        self.bounds = if self.is_empty() {
            Rect::ZERO
        } else {
            self.path.bounding_box()
        };
        self.dirty = false;
        self.bounds
    }

    /// Build or refresh the renderer cache for the current path.
    ///
    /// An empty path has nothing to rasterize; any previously cached form is
    /// released instead.
    pub fn build_cache(&mut self, renderer: &mut dyn Renderer) {
        let bounds = self.refresh_bounds();
        if self.is_empty() {
            self.cache.release(renderer);
            return;
        }
        let handle = renderer.cache_path(&self.path, bounds);
        self.cache.install(renderer, handle);
    }

    /// Release the renderer cache if one is live.
    pub fn release_cache(&mut self, renderer: &mut dyn Renderer) {
        self.cache.release(renderer);
    }

    /// Handle of the live render cache, if any.
    pub fn cache_handle(&self) -> Option<CacheHandle> {
        self.cache.handle()
    }

    /// Draw the path, preferring the cached form.
    pub fn paint(&self, renderer: &mut dyn Renderer) {
        if self.is_empty() {
            return;
        }
        renderer.draw_path(&self.path, self.cache.handle());
    }

    /// Nonzero-winding containment test at `point`, in geometry-local space.
    pub fn hit_test_point(&self, point: Point) -> bool {
        !self.is_empty() && self.path.contains(point)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/display/graphics.rs"]
mod tests;
