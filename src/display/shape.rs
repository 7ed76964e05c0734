use kurbo::Affine;

use crate::display::graphics::{Graphics, SharedGraphics};
use crate::display::node::{AttachFlags, DirtyFlags, DisplayNode, NodeBase};
use crate::render::renderer::Renderer;

/// Vector-shape display leaf.
///
/// Owns one geometry object and optionally a list of sibling geometries that
/// consume this shape as a mask. Geometry mutations accumulate dirty state
/// that the next layout pass folds into the frame's dirty mask.
#[derive(Debug)]
pub struct Shape {
    base: NodeBase,
    graphics: Option<SharedGraphics>,
    mask_consumers: Option<Vec<SharedGraphics>>,
}

impl Shape {
    /// Shape with default empty geometry.
    pub fn new() -> Self {
        Self::with_graphics(Graphics::new().shared())
    }

    /// Shape owning `graphics`, with bounds taken from it eagerly.
    pub fn with_graphics(graphics: SharedGraphics) -> Self {
        let mut base = NodeBase::new();
        let bounds = graphics.borrow_mut().refresh_bounds();
        base.set_bounds(bounds);
        Self {
            base,
            graphics: Some(graphics),
            mask_consumers: None,
        }
    }

    /// The owned geometry, absent only after detach.
    pub fn graphics(&self) -> Option<&SharedGraphics> {
        self.graphics.as_ref()
    }

    /// Hot-swap the geometry while acting as a mask.
    ///
    /// No-op while the leaf has no owners; geometry cannot be swapped on an
    /// unattached node. With owners, the new geometry's bounds are forced
    /// fresh, applied as the node bounds, and every owner is marked with a
    /// mask-changed flag.
    pub fn set_graphics(&mut self, graphics: SharedGraphics) {
        if self.base.owner_count() == 0 {
            return;
        }
        let bounds = graphics.borrow_mut().refresh_bounds();
        self.base.set_bounds(bounds);
        self.graphics = Some(graphics);
        self.base.clear_memo();
        self.base.mark_owners(DirtyFlags::MASK);
    }

    /// Register a sibling geometry that uses this shape as its clip.
    ///
    /// The list is append-only while attached; detach clears it without
    /// touching the referenced geometries.
    pub fn add_mask_consumer(&mut self, consumer: SharedGraphics) {
        self.mask_consumers
            .get_or_insert_with(Vec::new)
            .push(consumer);
    }

    /// Number of registered mask consumers.
    pub fn mask_consumer_count(&self) -> usize {
        self.mask_consumers.as_ref().map_or(0, Vec::len)
    }
}

impl Default for Shape {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayNode for Shape {
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
        let refreshed = match &self.graphics {
            Some(graphics) => {
                let mut graphics = graphics.borrow_mut();
                graphics.is_dirty().then(|| graphics.refresh_bounds())
            }
            None => None,
        };
        if let Some(bounds) = refreshed {
            self.base.mark_dirty(DirtyFlags::SHAPE);
            self.base.set_bounds(bounds);
        }
        self.base.layout(parent, dirty)
    }

    fn paint(&self, renderer: &mut dyn Renderer) {
        if let Some(graphics) = &self.graphics {
            graphics.borrow().paint(renderer);
        }
    }

    fn is_visible(&self) -> bool {
        match &self.graphics {
            Some(graphics) if !graphics.borrow().is_empty() => self.base.base_visible(),
            _ => false,
        }
    }

    fn on_attach(&mut self, renderer: &mut dyn Renderer, flags: AttachFlags) {
        let Some(graphics) = &self.graphics else {
            return;
        };
        if !flags.is_empty() {
            graphics.borrow_mut().build_cache(renderer);
        }
        if flags.contains(AttachFlags::MASK)
            && let Some(consumers) = &self.mask_consumers
        {
            for consumer in consumers {
                consumer.borrow_mut().build_cache(renderer);
            }
        }
        // Bounds track current geometry even on a flagless attach.
        let bounds = graphics.borrow_mut().refresh_bounds();
        self.base.set_bounds(bounds);
    }

    fn on_detach(&mut self, renderer: &mut dyn Renderer) {
        if let Some(graphics) = self.graphics.take() {
            graphics.borrow_mut().release_cache(renderer);
        }
        if let Some(consumers) = self.mask_consumers.take() {
            for consumer in &consumers {
                consumer.borrow_mut().release_cache(renderer);
            }
        }
        self.base.clear_memo();
    }

    fn remove_all_children(&mut self, renderer: &mut dyn Renderer) {
        self.on_detach(renderer);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/display/shape.rs"]
mod tests;
