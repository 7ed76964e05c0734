use crate::assets::image::PixelImage;
use crate::foundation::error::{VexelError, VexelResult};
use crate::foundation::math::mul_div255_u8;

/// Blends an alpha map into a source image, keeping the composited output.
///
/// A bitmap leaf creates its composer lazily on first attach with an alpha
/// map configured, draws from the composer output while attached, and drops
/// the composer on detach. The source and map stay untouched; composition
/// always produces a fresh image.
#[derive(Debug, Default)]
pub struct Composer {
    output: Option<PixelImage>,
}

impl Composer {
    /// Composer with no output yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Multiply `source` by the alpha channel of `map`, all four channels.
    ///
    /// Both images are premultiplied, so scaling every channel by the map
    /// alpha is the whole blend. The images must agree on dimensions.
    pub fn compose_alpha_map(
        &mut self,
        source: &PixelImage,
        map: &PixelImage,
    ) -> VexelResult<()> {
        if source.width() != map.width() || source.height() != map.height() {
            return Err(VexelError::render(format!(
                "alpha map is {}x{}, source image is {}x{}",
                map.width(),
                map.height(),
                source.width(),
                source.height()
            )));
        }

        let mut out = vec![0u8; source.pixels().len()];
        for ((s, m), d) in source
            .pixels()
            .chunks_exact(4)
            .zip(map.pixels().chunks_exact(4))
            .zip(out.chunks_exact_mut(4))
        {
            let w = u16::from(m[3]);
            d[0] = mul_div255_u8(u16::from(s[0]), w);
            d[1] = mul_div255_u8(u16::from(s[1]), w);
            d[2] = mul_div255_u8(u16::from(s[2]), w);
            d[3] = mul_div255_u8(u16::from(s[3]), w);
        }

        self.output = Some(PixelImage::new(source.width(), source.height(), out)?);
        Ok(())
    }

    /// The composited image, if a blend has succeeded.
    pub fn output(&self) -> Option<&PixelImage> {
        self.output.as_ref()
    }

    /// Drop the composited image.
    pub fn clear(&mut self) {
        self.output = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/composer.rs"]
mod tests;
