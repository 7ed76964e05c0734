use kurbo::{Affine, Rect};

use crate::assets::image::PixelImage;
use crate::assets::resolver::{ImageEvent, ImageEventKind, ImageResolver, ImageTicket, Resolution};
use crate::display::node::{AttachFlags, DirtyFlags, DisplayNode, NodeBase};
use crate::foundation::core::SourceRect;
use crate::foundation::error::VexelResult;
use crate::render::cache::CacheSlot;
use crate::render::composer::Composer;
use crate::render::params::DrawParams;
use crate::render::renderer::Renderer;

/// Raster-image display leaf.
///
/// Draws a sub-rectangle of a backing image through a packed parameter
/// block. The image may arrive asynchronously; until it does the leaf is not
/// ready and contributes nothing. Optional filters: an alpha map composited
/// on attach, and a color matrix applied around the draw.
#[derive(Debug)]
pub struct Bitmap {
    base: NodeBase,
    image: Option<PixelImage>,
    source_rect: Option<SourceRect>,
    params: DrawParams,
    ready: bool,
    nominal_bounds: Option<Rect>,
    pending: Option<ImageTicket>,
    composer: Option<Composer>,
    cache: CacheSlot,
    alpha_map: Option<PixelImage>,
    color_matrix: Option<[f32; 20]>,
}

impl Bitmap {
    /// Uninitialized leaf; the image arrives later via [`Bitmap::initialize`]
    /// or a load event.
    pub fn new() -> Self {
        Self {
            base: NodeBase::new(),
            image: None,
            source_rect: None,
            params: DrawParams::zeroed(),
            ready: false,
            nominal_bounds: None,
            pending: None,
            composer: None,
            cache: CacheSlot::new(),
            alpha_map: None,
            color_matrix: None,
        }
    }

    /// Leaf initialized from an already-decoded image.
    pub fn from_image(image: PixelImage) -> Self {
        let mut bitmap = Self::new();
        bitmap.initialize(image);
        bitmap
    }

    /// Leaf backed by the resolver's answer for `key`.
    ///
    /// A pending resolution stores the ticket; the leaf stays not ready until
    /// the matching event is delivered.
    pub fn from_key(resolver: &mut dyn ImageResolver, key: &str) -> VexelResult<Self> {
        let mut bitmap = Self::new();
        match resolver.resolve(key)? {
            Resolution::Ready(image) => bitmap.initialize(image),
            Resolution::Pending(ticket) => bitmap.pending = Some(ticket),
        }
        Ok(bitmap)
    }

    /// Builder: nominal design-time bounds used to center smaller images.
    pub fn with_nominal_bounds(mut self, bounds: Rect) -> Self {
        self.nominal_bounds = Some(bounds);
        if self.ready {
            self.refresh_params();
        }
        self
    }

    /// Resolve `image` into leaf state.
    ///
    /// Readiness follows the image's reported size; a source region spanning
    /// the full image is derived when none exists yet; the parameter block is
    /// packed against the nominal bounds; the bounding box becomes
    /// `(0, 0, width, height)`.
    pub fn initialize(&mut self, image: PixelImage) {
        self.ready = image.has_dimensions();
        if self.source_rect.is_none() {
            self.source_rect = Some(SourceRect::from_size(
                f64::from(image.width()),
                f64::from(image.height()),
            ));
        }
        self.base.set_bounds(Rect::new(
            0.0,
            0.0,
            f64::from(image.width()),
            f64::from(image.height()),
        ));
        self.image = Some(image);
        self.refresh_params();
    }

    /// The backing image, if one is held.
    pub fn image(&self) -> Option<&PixelImage> {
        self.image.as_ref()
    }

    /// Hot-swap the backing image: detach, replace, recompute readiness,
    /// attach with caching enabled.
    pub fn set_image(&mut self, renderer: &mut dyn Renderer, image: PixelImage) {
        self.on_detach(renderer);
        self.initialize(image);
        self.on_attach(renderer, AttachFlags::CACHE);
    }

    /// The source sub-rectangle, if one has been derived or set.
    pub fn source_rect(&self) -> Option<SourceRect> {
        self.source_rect
    }

    /// Select a sub-rectangle of the backing image.
    ///
    /// The bounding box becomes `(0, 0, width, height)` of the rectangle and
    /// the parameter block is repacked from it; explicit region selection
    /// does not recenter against nominal bounds.
    pub fn set_source_rect(&mut self, rect: SourceRect) {
        self.source_rect = Some(rect);
        self.base
            .set_bounds(Rect::new(0.0, 0.0, rect.width, rect.height));
        let (width, height) = self.image_size();
        self.params = DrawParams::pack(rect, width, height, None);
        self.base.clear_memo();
    }

    /// Return `true` once the backing image is decoded and usable.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Nominal design-time bounds, if supplied.
    pub fn nominal_bounds(&self) -> Option<Rect> {
        self.nominal_bounds
    }

    /// Ticket of the in-flight load, while one is pending.
    pub fn pending_ticket(&self) -> Option<ImageTicket> {
        self.pending
    }

    /// The current parameter block.
    pub fn draw_params(&self) -> DrawParams {
        self.params
    }

    /// Configure or clear the alpha-map filter.
    ///
    /// Takes effect on the next attach; the map is blended into the source
    /// image by the composer and draws read the composited output.
    pub fn set_alpha_map(&mut self, map: Option<PixelImage>) {
        self.alpha_map = map;
    }

    /// The configured alpha map, if any.
    pub fn alpha_map(&self) -> Option<&PixelImage> {
        self.alpha_map.as_ref()
    }

    /// Configure or clear the color-matrix filter applied around draws.
    pub fn set_color_matrix(&mut self, matrix: Option<[f32; 20]>) {
        self.color_matrix = matrix;
    }

    /// The configured color matrix, if any.
    pub fn color_matrix(&self) -> Option<[f32; 20]> {
        self.color_matrix
    }

    /// Offer a load completion to this leaf.
    ///
    /// Returns `true` when the event matched the pending ticket. The ticket
    /// is consumed exactly once per delivered event regardless of outcome: a
    /// load installs the image and re-attaches with caching enabled, a
    /// failure leaves the leaf not ready with no image reference.
    #[tracing::instrument(skip(self, renderer, event))]
    pub fn handle_image_event(
        &mut self,
        renderer: &mut dyn Renderer,
        event: &ImageEvent,
    ) -> bool {
        let Some(ticket) = self.pending else {
            return false;
        };
        if event.ticket != ticket {
            return false;
        }
        self.pending = None;

        match &event.kind {
            ImageEventKind::Loaded(image) => {
                // Region rebuilt at the now-known dimensions, then the usual
                // initialize path recenters against nominal bounds.
                self.source_rect = Some(SourceRect::from_size(
                    f64::from(image.width()),
                    f64::from(image.height()),
                ));
                self.initialize(image.clone());
                self.on_attach(renderer, AttachFlags::CACHE);
            }
            ImageEventKind::Failed(reason) => {
                tracing::debug!(%reason, "image load failed, leaf stays not ready");
                self.ready = false;
                self.image = None;
            }
        }
        true
    }

    fn refresh_params(&mut self) {
        let Some(region) = self.source_rect else {
            return;
        };
        let (width, height) = self.image_size();
        // Whole-block swap; live blocks are never patched slot by slot.
        self.params = DrawParams::pack(region, width, height, self.nominal_bounds);
    }

    fn image_size(&self) -> (u32, u32) {
        match &self.image {
            Some(image) => (image.width(), image.height()),
            None => (0, 0),
        }
    }

    pub(crate) fn source_origin(&self) -> (f64, f64) {
        match self.source_rect {
            Some(rect) => (rect.x, rect.y),
            None => (0.0, 0.0),
        }
    }

    pub(crate) fn active_image(&self) -> Option<&PixelImage> {
        self.composer
            .as_ref()
            .and_then(Composer::output)
            .or(self.image.as_ref())
    }
}

impl Default for Bitmap {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayNode for Bitmap {
    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }

    fn layout(
        &mut self,
        _renderer: &mut dyn Renderer,
        parent: &Affine,
        dirty: DirtyFlags,
        _time: f64,
        _draw: bool,
    ) -> DirtyFlags {
        self.base.layout(parent, dirty)
    }

    fn paint(&self, renderer: &mut dyn Renderer) {
        let Some(image) = self.active_image() else {
            return;
        };
        if let Some(matrix) = self.color_matrix {
            renderer.set_color_matrix(Some(matrix));
        }
        renderer.draw_partial(image, &self.params);
        if self.color_matrix.is_some() {
            renderer.set_color_matrix(None);
        }
    }

    fn is_visible(&self) -> bool {
        self.ready && self.base.base_visible()
    }

    fn on_attach(&mut self, renderer: &mut dyn Renderer, flags: AttachFlags) {
        if !flags.contains(AttachFlags::CACHE) || !self.ready {
            return;
        }
        let Some(image) = &self.image else {
            return;
        };
        if let Some(map) = &self.alpha_map {
            let composer = self.composer.get_or_insert_with(Composer::new);
            if let Err(error) = composer.compose_alpha_map(image, map) {
                tracing::warn!(%error, "alpha map rejected, drawing the raw image");
                composer.clear();
            }
        }
        let active = self
            .composer
            .as_ref()
            .and_then(Composer::output)
            .unwrap_or(image);
        let handle = renderer.cache_image(active);
        self.cache.install(renderer, handle);
    }

    fn on_detach(&mut self, renderer: &mut dyn Renderer) {
        self.cache.release(renderer);
        self.composer = None;
        self.base.clear_memo();
    }

    fn remove_all_children(&mut self, renderer: &mut dyn Renderer) {
        self.on_detach(renderer);
        self.image = None;
        self.source_rect = None;
        self.ready = false;
        self.pending = None;
        self.params = DrawParams::zeroed();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/display/bitmap.rs"]
mod tests;
