//! Stateful drawing surface over an `embedded-graphics` target.

use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::image::{Image, ImageRaw};
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::{BinaryColor, Gray4};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};

use super::pen::{Font, Pen, TextSize};

/// Pen-carrying wrapper around a `Gray4` draw target.
///
/// `embedded-graphics` targets are stateless, while the badge pages are
/// written against a panel with an implicit "current pen". The canvas keeps
/// that pen explicitly: `set_pen`, `set_thickness` and `set_font` change it,
/// and every subsequent draw call uses it until it is changed again.
pub struct Canvas<'a, D>
where
    D: DrawTarget<Color = Gray4>,
{
    target: &'a mut D,
    pen: Pen,
}

impl<'a, D> Canvas<'a, D>
where
    D: DrawTarget<Color = Gray4>,
{
    pub fn new(target: &'a mut D) -> Self {
        Self {
            target,
            pen: Pen::default(),
        }
    }

    pub fn pen(&self) -> Pen {
        self.pen
    }

    pub fn set_pen(&mut self, color: Gray4) {
        self.pen.color = color;
    }

    pub fn set_thickness(&mut self, thickness: u8) {
        self.pen.thickness = thickness;
    }

    pub fn set_font(&mut self, font: Font) {
        self.pen.font = font;
    }

    /// Fill the whole target with the pen color.
    pub fn clear(&mut self) -> Result<(), D::Error> {
        self.target.clear(self.pen.color)
    }

    /// Fill a rectangle with the pen color. Zero-sized rectangles draw nothing.
    pub fn rectangle(&mut self, x: i32, y: i32, width: u32, height: u32) -> Result<(), D::Error> {
        Rectangle::new(Point::new(x, y), Size::new(width, height))
            .into_styled(PrimitiveStyle::with_fill(self.pen.color))
            .draw(&mut *self.target)
    }

    /// Draw left-aligned text whose vertical middle sits on `y`.
    pub fn text(&mut self, text: &str, x: i32, y: i32, size: TextSize) -> Result<(), D::Error> {
        self.text_aligned(text, x, y, size, Alignment::Left)
    }

    /// Draw text anchored at `x` according to `alignment`, vertically
    /// centered on `y`.
    pub fn text_aligned(
        &mut self,
        text: &str,
        x: i32,
        y: i32,
        size: TextSize,
        alignment: Alignment,
    ) -> Result<(), D::Error> {
        let character_style = MonoTextStyle::new(self.pen.mono_font(size), self.pen.color);
        let text_style = TextStyleBuilder::new()
            .alignment(alignment)
            .baseline(Baseline::Middle)
            .build();

        EgDrawable::draw(
            &Text::with_text_style(text, Point::new(x, y), character_style, text_style),
            &mut *self.target,
        )?;
        Ok(())
    }

    /// Blit a packed 1-bit bitmap, `width` pixels per row, at `(x, y)`.
    ///
    /// Set bits are drawn white and clear bits black; the pen is ignored.
    pub fn image(&mut self, data: &[u8], width: u32, x: i32, y: i32) -> Result<(), D::Error> {
        let raw = ImageRaw::<BinaryColor>::new(data, width);
        Image::new(&raw, Point::new(x, y))
            .draw(&mut self.target.color_converted::<BinaryColor>())
    }
}
