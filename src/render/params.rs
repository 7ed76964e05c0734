use crate::foundation::core::{Rect, SourceRect};

/// Packed per-draw parameter block consumed by partial-image draws.
///
/// Fixed 12-slot layout:
/// `[src_x, src_y, src_w, src_h, offset_x, offset_y, box_w, box_h, 0, 0, 0, 0]`.
/// The trailing four slots are reserved and always zero.
///
/// Blocks are recomputed whole whenever any input changes and swapped in as a
/// unit; nothing ever patches individual slots of a live block.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct DrawParams([f32; 12]);

impl DrawParams {
    /// Number of slots in a block.
    pub const SLOTS: usize = 12;

    /// All-zero block, the state of a leaf before its image resolves.
    pub fn zeroed() -> Self {
        Self([0.0; Self::SLOTS])
    }

    /// Pack a block from a source region, the backing image dimensions and
    /// optional nominal design-time bounds.
    ///
    /// Offsets center the image inside the nominal bounds when the image is
    /// smaller along that axis: `floor((nominal - image) / 2)`, never
    /// negative. Without nominal bounds, or when the image fills them, the
    /// offsets are zero. The box slots carry the region extents.
    pub fn pack(
        region: SourceRect,
        image_width: u32,
        image_height: u32,
        nominal: Option<Rect>,
    ) -> Self {
        let offset_x = center_offset(image_width, nominal.map(|r| r.width()));
        let offset_y = center_offset(image_height, nominal.map(|r| r.height()));
        Self([
            region.x as f32,
            region.y as f32,
            region.width as f32,
            region.height as f32,
            offset_x,
            offset_y,
            region.width as f32,
            region.height as f32,
            0.0,
            0.0,
            0.0,
            0.0,
        ])
    }

    /// Source region left edge.
    pub fn src_x(&self) -> f32 {
        self.0[0]
    }

    /// Source region top edge.
    pub fn src_y(&self) -> f32 {
        self.0[1]
    }

    /// Source region width.
    pub fn src_width(&self) -> f32 {
        self.0[2]
    }

    /// Source region height.
    pub fn src_height(&self) -> f32 {
        self.0[3]
    }

    /// Horizontal centering offset in destination space.
    pub fn offset_x(&self) -> f32 {
        self.0[4]
    }

    /// Vertical centering offset in destination space.
    pub fn offset_y(&self) -> f32 {
        self.0[5]
    }

    /// Destination box width.
    pub fn box_width(&self) -> f32 {
        self.0[6]
    }

    /// Destination box height.
    pub fn box_height(&self) -> f32 {
        self.0[7]
    }

    /// The whole block in slot order.
    pub fn as_slice(&self) -> &[f32; 12] {
        &self.0
    }
}

impl Default for DrawParams {
    fn default() -> Self {
        Self::zeroed()
    }
}

fn center_offset(image_dim: u32, nominal_dim: Option<f64>) -> f32 {
    match nominal_dim {
        Some(nominal) if f64::from(image_dim) < nominal => {
            ((nominal - f64::from(image_dim)) / 2.0).floor() as f32
        }
        _ => 0.0,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/params.rs"]
mod tests;
