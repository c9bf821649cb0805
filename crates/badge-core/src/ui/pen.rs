//! Pen state: color, stroke thickness and font.

use embedded_graphics::mono_font::MonoFont;
use embedded_graphics::mono_font::ascii::{
    FONT_6X10, FONT_6X13_BOLD, FONT_6X13_ITALIC, FONT_7X13_BOLD, FONT_7X13_ITALIC, FONT_8X13,
    FONT_8X13_BOLD, FONT_9X15, FONT_9X15_BOLD, FONT_9X18_BOLD, FONT_10X20,
};
use embedded_graphics::pixelcolor::{Gray4, GrayColor};

/// Darkest ink (gray level 0)
pub const PEN_BLACK: Gray4 = Gray4::BLACK;

/// Paper white (gray level 15)
pub const PEN_WHITE: Gray4 = Gray4::WHITE;

/// Status page background (gray level 12)
pub const PEN_MID_GRAY: Gray4 = Gray4::new(12);

/// Thickness from which text is drawn with a bold face.
pub const BOLD_THICKNESS: u8 = 3;

/// Font family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Sans,
    Serif,
}

/// Text size presets, mapped onto the `embedded-graphics` mono fonts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSize {
    Small,
    Medium,
    Large,
}

/// The implicit drawing mode of the panel.
///
/// Every draw call on a [`Canvas`](super::Canvas) uses the pen as it stands
/// at that moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pen {
    pub color: Gray4,
    pub thickness: u8,
    pub font: Font,
}

impl Default for Pen {
    fn default() -> Self {
        Self {
            color: PEN_BLACK,
            thickness: 1,
            font: Font::Sans,
        }
    }
}

impl Pen {
    /// Whether text drawn with this pen uses a bold face.
    pub fn is_bold(&self) -> bool {
        self.thickness >= BOLD_THICKNESS
    }

    /// Mono font used for `size` under the current font and thickness.
    pub fn mono_font(&self, size: TextSize) -> &'static MonoFont<'static> {
        match (self.font, size, self.is_bold()) {
            (Font::Sans, TextSize::Large, false) => &FONT_10X20,
            (Font::Sans, TextSize::Large, true) => &FONT_9X18_BOLD,
            (Font::Sans, TextSize::Medium, false) => &FONT_8X13,
            (Font::Sans, TextSize::Medium, true) => &FONT_8X13_BOLD,
            (Font::Sans, TextSize::Small, false) => &FONT_6X10,
            (Font::Sans, TextSize::Small, true) => &FONT_6X13_BOLD,
            (Font::Serif, TextSize::Large, false) => &FONT_9X15,
            (Font::Serif, TextSize::Large, true) => &FONT_9X15_BOLD,
            (Font::Serif, TextSize::Medium, false) => &FONT_7X13_ITALIC,
            (Font::Serif, TextSize::Medium, true) => &FONT_7X13_BOLD,
            (Font::Serif, TextSize::Small, false) => &FONT_6X13_ITALIC,
            (Font::Serif, TextSize::Small, true) => &FONT_6X13_BOLD,
        }
    }
}
