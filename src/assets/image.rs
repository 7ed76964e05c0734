use std::sync::Arc;

use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::{VexelError, VexelResult};

/// Decoded raster image in premultiplied RGBA8 form.
///
/// Pixel storage is shared, so cloning a `PixelImage` is cheap; leaves hand
/// clones to composers and renderers without copying the payload.
#[derive(Clone, Debug)]
pub struct PixelImage {
    width: u32,
    height: u32,
    rgba8_premul: Arc<Vec<u8>>,
}

impl PixelImage {
    /// Wrap premultiplied RGBA8 bytes with validated dimensions.
    pub fn new(width: u32, height: u32, rgba8_premul: Vec<u8>) -> VexelResult<Self> {
        let expected = (width as usize) * (height as usize) * 4;
        if rgba8_premul.len() != expected {
            return Err(VexelError::validation(format!(
                "PixelImage buffer is {} bytes, expected {expected} for {width}x{height} rgba8",
                rgba8_premul.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba8_premul),
        })
    }

    /// Image of one solid premultiplied color.
    pub fn solid(width: u32, height: u32, color: Rgba8Premul) -> Self {
        let px = color.to_array();
        let mut rgba8_premul = Vec::with_capacity((width as usize) * (height as usize) * 4);
        for _ in 0..(width as usize) * (height as usize) {
            rgba8_premul.extend_from_slice(&px);
        }
        Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba8_premul),
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Premultiplied RGBA8 bytes, row-major.
    pub fn pixels(&self) -> &[u8] {
        &self.rgba8_premul
    }

    /// Return `true` when the image reports a usable size.
    ///
    /// Leaves gate their ready flag on this; a zero-sized image models a
    /// handle whose pixels have not arrived yet.
    pub fn has_dimensions(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Premultiplied RGBA of the pixel at `(x, y)`.
    ///
    /// Coordinates outside the image read as transparent black, which is what
    /// the pixel hit test wants for points past the backing store.
    pub fn pixel_at(&self, x: i64, y: i64) -> [u8; 4] {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return [0, 0, 0, 0];
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = &self.rgba8_premul[idx..idx + 4];
        [px[0], px[1], px[2], px[3]]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/image.rs"]
mod tests;
