use crate::assets::image::PixelImage;

/// Persisted 1x1 readback target for pixel-accurate hit tests.
///
/// One probe is created per [`HitTester`](crate::hit::tester::HitTester) and
/// reused by every query; each draw overwrites the single cell with copy
/// semantics, so no clear is needed between samples. The probe is mutated on
/// every sample and stays confined to the frame thread.
#[derive(Debug, Default)]
pub struct PixelProbe {
    target: [u8; 4],
    samples: u64,
}

impl PixelProbe {
    /// Fresh probe with a transparent cell.
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw `image` translated by `(dx, dy)` into the probe.
    ///
    /// The cell at `(0, 0)` receives the image pixel containing
    /// `(-dx, -dy)`; translations that put the cell outside the image leave
    /// it transparent black. The previous cell content is always replaced.
    pub fn draw_image(&mut self, image: &PixelImage, dx: f64, dy: f64) {
        self.samples += 1;
        let x = (-dx).floor() as i64;
        let y = (-dy).floor() as i64;
        self.target = image.pixel_at(x, y);
    }

    /// Alpha of the probe cell after the last draw.
    pub fn alpha(&self) -> u8 {
        self.target[3]
    }

    /// Premultiplied RGBA of the probe cell after the last draw.
    pub fn pixel(&self) -> [u8; 4] {
        self.target
    }

    /// Number of draws since construction.
    ///
    /// Memoization diagnostics: a repeated query answered from a leaf's memo
    /// leaves this counter untouched.
    pub fn sample_count(&self) -> u64 {
        self.samples
    }
}

#[cfg(test)]
#[path = "../../tests/unit/hit/probe.rs"]
mod tests;
