use kurbo::Point;

use crate::display::bitmap::Bitmap;
use crate::display::node::{DisplayNode, HitMemo, NodeBase};
use crate::display::shape::Shape;
use crate::hit::probe::PixelProbe;

/// Options for [`HitTester`].
#[derive(Clone, Copy, Debug)]
pub struct HitTestOpts {
    pub(crate) memo_tolerance_sq: f64,
}

impl HitTestOpts {
    /// Return options with a configured memo tolerance.
    ///
    /// A repeated query within this squared distance (device units) of the
    /// last query against the same leaf is answered from the leaf's memo
    /// without re-sampling.
    pub fn with_memo_tolerance_sq(mut self, tolerance_sq: f64) -> Self {
        self.memo_tolerance_sq = tolerance_sq;
        self
    }
}

impl Default for HitTestOpts {
    fn default() -> Self {
        Self {
            memo_tolerance_sq: 4.0,
        }
    }
}

/// Resolves screen-space points against display leaves.
///
/// Every query starts with a bounding-box test in leaf-local space through
/// the inverse of the world transform stored by the last layout pass. Leaves
/// opted into pixel-accurate testing then fall through to content sampling:
/// a winding test for shapes, an alpha readback through the persisted probe
/// for bitmaps. Sampling results are memoized per leaf.
#[derive(Debug, Default)]
pub struct HitTester {
    probe: PixelProbe,
    opts: HitTestOpts,
}

impl HitTester {
    /// Tester with a fresh probe.
    pub fn new(opts: HitTestOpts) -> Self {
        Self {
            probe: PixelProbe::new(),
            opts,
        }
    }

    /// The probe, for sampling diagnostics.
    pub fn probe(&self) -> &PixelProbe {
        &self.probe
    }

    /// Resolve `point` against a shape leaf.
    pub fn hit_shape(&mut self, shape: &mut Shape, point: Point) -> bool {
        let Some(local) = to_local(shape.base(), point) else {
            return false;
        };
        if !shape.base().bounds().contains(local) {
            return false;
        }
        if !shape.base().pixel_hit_test() {
            return true;
        }
        if let Some(memo) = shape.base().memo()
            && sq_dist(memo.point, point) <= self.opts.memo_tolerance_sq
        {
            return memo.hit;
        }

        let hit = match shape.graphics() {
            Some(graphics) => graphics.borrow().hit_test_point(local),
            None => false,
        };
        shape.base_mut().set_memo(HitMemo { point, hit });
        hit
    }

    /// Resolve `point` against a bitmap leaf.
    pub fn hit_bitmap(&mut self, bitmap: &mut Bitmap, point: Point) -> bool {
        let Some(local) = to_local(bitmap.base(), point) else {
            return false;
        };
        if !bitmap.base().bounds().contains(local) {
            return false;
        }
        if !bitmap.base().pixel_hit_test() {
            return true;
        }
        if let Some(memo) = bitmap.base().memo()
            && sq_dist(memo.point, point) <= self.opts.memo_tolerance_sq
        {
            return memo.hit;
        }

        let hit = match bitmap.image() {
            Some(image) => {
                // The raw image is probed even when a composer output backs
                // the draws; hit opacity follows the source pixels.
                let (sx, sy) = bitmap.source_origin();
                self.probe.draw_image(image, -(local.x + sx), -(local.y + sy));
                self.probe.alpha() > 0
            }
            None => false,
        };
        bitmap.base_mut().set_memo(HitMemo { point, hit });
        hit
    }
}

fn to_local(base: &NodeBase, point: Point) -> Option<Point> {
    let transform = base.world_transform();
    if transform.determinant().abs() < f64::EPSILON {
        // Degenerate transform collapses the leaf; nothing can hit it.
        return None;
    }
    Some(transform.inverse() * point)
}

fn sq_dist(a: Point, b: Point) -> f64 {
    (a - b).hypot2()
}

#[cfg(test)]
#[path = "../../tests/unit/hit/tester.rs"]
mod tests;
