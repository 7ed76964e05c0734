use crate::foundation::error::{VexelError, VexelResult};
use crate::foundation::math::mul_div255_u8;

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    /// Red channel premultiplied by alpha.
    pub r: u8,
    /// Green channel premultiplied by alpha.
    pub g: u8,
    /// Blue channel premultiplied by alpha.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8Premul {
    /// Fully transparent black.
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    /// Convert straight-alpha RGBA8 into premultiplied RGBA8.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        let a16 = u16::from(a);
        Self {
            r: mul_div255_u8(u16::from(r), a16),
            g: mul_div255_u8(u16::from(g), a16),
            b: mul_div255_u8(u16::from(b), a16),
            a,
        }
    }

    /// Channels in memory order `[r, g, b, a]`.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Axis-aligned sub-rectangle of a backing image, in source pixel coordinates.
///
/// Unlike [`Rect`] this carries origin plus extent, matching the layout of the
/// packed draw-parameter block it feeds.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SourceRect {
    /// Left edge in source pixels.
    pub x: f64,
    /// Top edge in source pixels.
    pub y: f64,
    /// Extent along x, non-negative.
    pub width: f64,
    /// Extent along y, non-negative.
    pub height: f64,
}

impl SourceRect {
    /// Create a validated rectangle with non-negative extents.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> VexelResult<Self> {
        if width < 0.0 || height < 0.0 {
            return Err(VexelError::validation(
                "SourceRect width and height must be >= 0",
            ));
        }
        Ok(Self {
            x,
            y,
            width,
            height,
        })
    }

    /// Rectangle at the origin spanning `width` by `height` pixels.
    pub fn from_size(width: f64, height: f64) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Top-left corner as a point.
    pub fn origin(self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Return `true` when the rectangle selects no pixels.
    pub fn is_empty(self) -> bool {
        self.width == 0.0 || self.height == 0.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
