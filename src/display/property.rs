use crate::assets::image::PixelImage;
use crate::display::bitmap::Bitmap;
use crate::display::graphics::SharedGraphics;
use crate::display::node::DisplayNode;
use crate::display::shape::Shape;
use crate::foundation::core::SourceRect;
use crate::foundation::error::{VexelError, VexelResult};
use crate::render::renderer::Renderer;

/// Value kinds the animation boundary can write through the setter tables.
///
/// Tween systems deliver `(name, value)` pairs; dispatch is a lookup in a
/// per-leaf-type table of typed setters rather than dynamic field access, so
/// an unknown name or a mismatched kind is a boundary error instead of a
/// silent property bag write.
#[derive(Clone, Debug)]
pub enum PropertyValue {
    /// Replacement geometry for a shape leaf.
    Graphics(SharedGraphics),
    /// Replacement backing image for a bitmap leaf.
    Image(PixelImage),
    /// Replacement source sub-rectangle for a bitmap leaf.
    SourceRect(SourceRect),
    /// Base opacity.
    Alpha(f64),
    /// Base hidden flag.
    Hidden(bool),
}

impl PropertyValue {
    fn kind(&self) -> &'static str {
        match self {
            Self::Graphics(_) => "graphics",
            Self::Image(_) => "image",
            Self::SourceRect(_) => "source rect",
            Self::Alpha(_) => "alpha",
            Self::Hidden(_) => "hidden",
        }
    }
}

/// Named-property application for leaves driven by a tween system.
pub trait ApplyProperty {
    /// Apply `value` to the property called `name`.
    fn apply_property(
        &mut self,
        renderer: &mut dyn Renderer,
        name: &str,
        value: PropertyValue,
    ) -> VexelResult<()>;
}

type ShapeSetter = fn(&mut Shape, &mut dyn Renderer, PropertyValue) -> VexelResult<()>;
type BitmapSetter = fn(&mut Bitmap, &mut dyn Renderer, PropertyValue) -> VexelResult<()>;

static SHAPE_SETTERS: &[(&str, ShapeSetter)] = &[
    ("alpha", shape_alpha),
    ("graphics", shape_graphics),
    ("hidden", shape_hidden),
];

static BITMAP_SETTERS: &[(&str, BitmapSetter)] = &[
    ("alpha", bitmap_alpha),
    ("hidden", bitmap_hidden),
    ("image", bitmap_image),
    ("source_rect", bitmap_source_rect),
];

impl ApplyProperty for Shape {
    fn apply_property(
        &mut self,
        renderer: &mut dyn Renderer,
        name: &str,
        value: PropertyValue,
    ) -> VexelResult<()> {
        match SHAPE_SETTERS.iter().find(|(n, _)| *n == name) {
            Some((_, setter)) => setter(self, renderer, value),
            None => Err(unknown_property(name)),
        }
    }
}

impl ApplyProperty for Bitmap {
    fn apply_property(
        &mut self,
        renderer: &mut dyn Renderer,
        name: &str,
        value: PropertyValue,
    ) -> VexelResult<()> {
        match BITMAP_SETTERS.iter().find(|(n, _)| *n == name) {
            Some((_, setter)) => setter(self, renderer, value),
            None => Err(unknown_property(name)),
        }
    }
}

fn shape_graphics(
    shape: &mut Shape,
    _renderer: &mut dyn Renderer,
    value: PropertyValue,
) -> VexelResult<()> {
    match value {
        PropertyValue::Graphics(graphics) => {
            shape.set_graphics(graphics);
            Ok(())
        }
        other => Err(kind_mismatch("graphics", &other)),
    }
}

fn shape_alpha(
    shape: &mut Shape,
    _renderer: &mut dyn Renderer,
    value: PropertyValue,
) -> VexelResult<()> {
    match value {
        PropertyValue::Alpha(alpha) => {
            shape.base_mut().set_alpha(alpha);
            Ok(())
        }
        other => Err(kind_mismatch("alpha", &other)),
    }
}

fn shape_hidden(
    shape: &mut Shape,
    _renderer: &mut dyn Renderer,
    value: PropertyValue,
) -> VexelResult<()> {
    match value {
        PropertyValue::Hidden(hidden) => {
            shape.base_mut().set_hidden(hidden);
            Ok(())
        }
        other => Err(kind_mismatch("hidden", &other)),
    }
}

fn bitmap_image(
    bitmap: &mut Bitmap,
    renderer: &mut dyn Renderer,
    value: PropertyValue,
) -> VexelResult<()> {
    match value {
        PropertyValue::Image(image) => {
            bitmap.set_image(renderer, image);
            Ok(())
        }
        other => Err(kind_mismatch("image", &other)),
    }
}

fn bitmap_source_rect(
    bitmap: &mut Bitmap,
    _renderer: &mut dyn Renderer,
    value: PropertyValue,
) -> VexelResult<()> {
    match value {
        PropertyValue::SourceRect(rect) => {
            bitmap.set_source_rect(rect);
            Ok(())
        }
        other => Err(kind_mismatch("source_rect", &other)),
    }
}

fn bitmap_alpha(
    bitmap: &mut Bitmap,
    _renderer: &mut dyn Renderer,
    value: PropertyValue,
) -> VexelResult<()> {
    match value {
        PropertyValue::Alpha(alpha) => {
            bitmap.base_mut().set_alpha(alpha);
            Ok(())
        }
        other => Err(kind_mismatch("alpha", &other)),
    }
}

fn bitmap_hidden(
    bitmap: &mut Bitmap,
    _renderer: &mut dyn Renderer,
    value: PropertyValue,
) -> VexelResult<()> {
    match value {
        PropertyValue::Hidden(hidden) => {
            bitmap.base_mut().set_hidden(hidden);
            Ok(())
        }
        other => Err(kind_mismatch("hidden", &other)),
    }
}

fn unknown_property(name: &str) -> VexelError {
    VexelError::validation(format!("unknown property `{name}`"))
}

fn kind_mismatch(name: &str, value: &PropertyValue) -> VexelError {
    VexelError::validation(format!(
        "property `{name}` cannot take {} values",
        value.kind()
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/display/property.rs"]
mod tests;
