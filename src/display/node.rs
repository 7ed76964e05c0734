use std::cell::Cell;
use std::rc::Rc;

use bitflags::bitflags;
use kurbo::{Affine, Point, Rect};

use crate::render::renderer::Renderer;

bitflags! {
    /// Invalidation channels accumulated on a leaf until a layout pass
    /// consumes them.
    ///
    /// Bits are independent: marking one never clears another, and the merged
    /// mask a layout pass returns carries every bit that was set upstream or
    /// on the leaf itself.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct DirtyFlags: u32 {
        /// Leaf content (vector geometry or raster source) changed.
        const SHAPE = 1 << 0;
        /// A geometry this owner uses as a mask changed.
        const MASK = 1 << 1;
    }
}

bitflags! {
    /// Capabilities requested when a leaf enters the live tree.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct AttachFlags: u32 {
        /// Renderer-side caching is enabled for the leaf's content.
        const CACHE = 1 << 0;
        /// The leaf participates as a mask for sibling content.
        const MASK = 1 << 1;
    }
}

/// Shared invalidation cell an owning composition registers on a leaf.
///
/// The tree stays external to this crate, so ownership is expressed as a
/// writable cell rather than a parent pointer: the owner keeps one clone and
/// reads accumulated flags each frame, the leaf keeps the other and marks it
/// when a mutation must invalidate the owner.
#[derive(Clone, Debug)]
pub struct DirtyCell(Rc<Cell<DirtyFlags>>);

impl DirtyCell {
    /// Cell with no accumulated flags.
    pub fn new() -> Self {
        Self(Rc::new(Cell::new(DirtyFlags::empty())))
    }

    /// OR `flags` into the cell.
    pub fn mark(&self, flags: DirtyFlags) {
        self.0.set(self.0.get() | flags);
    }

    /// Read and clear accumulated flags.
    pub fn take(&self) -> DirtyFlags {
        self.0.replace(DirtyFlags::empty())
    }

    /// Read without clearing.
    pub fn peek(&self) -> DirtyFlags {
        self.0.get()
    }

    fn same_cell(&self, other: &DirtyCell) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Default for DirtyCell {
    fn default() -> Self {
        Self::new()
    }
}

/// Memoized result of the last pixel-accurate query against a leaf.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitMemo {
    /// Query point of the memoized result, in screen space.
    pub point: Point,
    /// Whether that query hit.
    pub hit: bool,
}

/// State shared by every display leaf.
///
/// Concrete leaves embed a `NodeBase` and delegate the bookkeeping half of
/// the tree contract to it: bounding box, accumulated dirty bits, base
/// visibility, the world transform most recently supplied by the walker, the
/// owners list and the hit-test memo.
#[derive(Debug)]
pub struct NodeBase {
    bounds: Rect,
    dirty: DirtyFlags,
    alpha: f64,
    hidden: bool,
    world_transform: Affine,
    pixel_hit_test: bool,
    memo: Option<HitMemo>,
    owners: Vec<DirtyCell>,
}

impl NodeBase {
    /// Fresh base: empty bounds, no dirt, opaque, identity transform.
    pub fn new() -> Self {
        Self {
            bounds: Rect::ZERO,
            dirty: DirtyFlags::empty(),
            alpha: 1.0,
            hidden: false,
            world_transform: Affine::IDENTITY,
            pixel_hit_test: false,
            memo: None,
            owners: Vec::new(),
        }
    }

    /// Local-space bounding box of the leaf's content.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub(crate) fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    /// Dirty bits accumulated since the last layout pass.
    pub fn dirty(&self) -> DirtyFlags {
        self.dirty
    }

    /// OR `flags` into the accumulated dirty bits.
    pub fn mark_dirty(&mut self, flags: DirtyFlags) {
        self.dirty |= flags;
    }

    /// Base opacity.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Set the base opacity; zero makes the leaf invisible.
    pub fn set_alpha(&mut self, alpha: f64) {
        self.alpha = alpha;
    }

    /// Return `true` when the leaf is explicitly hidden.
    pub fn hidden(&self) -> bool {
        self.hidden
    }

    /// Hide or show the leaf independent of opacity.
    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    /// Visibility as far as the base state is concerned.
    ///
    /// Leaves AND this with their own content checks.
    pub fn base_visible(&self) -> bool {
        self.alpha > 0.0 && !self.hidden
    }

    /// World transform stored by the most recent layout pass.
    pub fn world_transform(&self) -> Affine {
        self.world_transform
    }

    /// Whether hit tests on this leaf sample pixels after the box test.
    pub fn pixel_hit_test(&self) -> bool {
        self.pixel_hit_test
    }

    /// Opt the leaf in or out of pixel-accurate hit testing.
    pub fn set_pixel_hit_test(&mut self, enabled: bool) {
        self.pixel_hit_test = enabled;
        self.memo = None;
    }

    pub(crate) fn memo(&self) -> Option<HitMemo> {
        self.memo
    }

    pub(crate) fn set_memo(&mut self, memo: HitMemo) {
        self.memo = Some(memo);
    }

    /// Forget the memoized hit result.
    ///
    /// Mutations that change what a pixel query would see call this; distance
    /// alone invalidates the memo otherwise.
    pub fn clear_memo(&mut self) {
        self.memo = None;
    }

    /// Register an owning composition's invalidation cell.
    pub fn add_owner(&mut self, owner: DirtyCell) {
        self.owners.push(owner);
    }

    /// Unregister a previously added cell. Returns `true` when found.
    pub fn remove_owner(&mut self, owner: &DirtyCell) -> bool {
        match self.owners.iter().position(|o| o.same_cell(owner)) {
            Some(idx) => {
                self.owners.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Number of registered owners.
    pub fn owner_count(&self) -> usize {
        self.owners.len()
    }

    pub(crate) fn mark_owners(&self, flags: DirtyFlags) {
        for owner in &self.owners {
            owner.mark(flags);
        }
    }

    /// Bookkeeping half of the per-frame layout pass.
    ///
    /// Stores the walker-supplied transform, merges the leaf's accumulated
    /// bits into the incoming mask, clears them, and returns the merged mask
    /// for downstream consumers.
    pub fn layout(&mut self, parent: &Affine, dirty: DirtyFlags) -> DirtyFlags {
        self.world_transform = *parent;
        let merged = dirty | self.dirty;
        self.dirty = DirtyFlags::empty();
        merged
    }
}

impl Default for NodeBase {
    fn default() -> Self {
        Self::new()
    }
}

/// Uniform contract the external tree walker drives leaves through.
///
/// One layout pass then one conditional paint pass per frame; attach and
/// detach bracket a leaf's time in the live tree. Transform composition,
/// z-ordering and event routing all live in the walker, not here.
pub trait DisplayNode {
    /// Shared leaf state.
    fn base(&self) -> &NodeBase;

    /// Shared leaf state, mutable.
    fn base_mut(&mut self) -> &mut NodeBase;

    /// Per-frame layout: refresh derived state, merge and consume dirty bits.
    ///
    /// `parent` is the walker-composed world transform for this leaf; `time`
    /// is the frame timestamp in seconds; `draw` tells the leaf whether a
    /// paint pass will follow. Returns the merged dirty mask.
    fn layout(
        &mut self,
        renderer: &mut dyn Renderer,
        parent: &Affine,
        dirty: DirtyFlags,
        time: f64,
        draw: bool,
    ) -> DirtyFlags;

    /// Per-frame paint; called only when the walker decides to draw.
    fn paint(&self, renderer: &mut dyn Renderer);

    /// Whether the leaf can contribute pixels this frame.
    fn is_visible(&self) -> bool;

    /// Enter the live tree. `flags` selects cache and mask participation;
    /// empty flags attach without renderer-side resources.
    fn on_attach(&mut self, renderer: &mut dyn Renderer, flags: AttachFlags);

    /// Leave the live tree, releasing renderer-side resources. Idempotent.
    fn on_detach(&mut self, renderer: &mut dyn Renderer);

    /// Full teardown for the uniform tree contract: detach plus dropping
    /// content references.
    fn remove_all_children(&mut self, renderer: &mut dyn Renderer);
}

#[cfg(test)]
#[path = "../../tests/unit/display/node.rs"]
mod tests;
