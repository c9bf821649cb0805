//! Drawing primitives shared by every page.
//!
//! The badge display is a 296x128 e-paper panel with 16 gray levels. Pages
//! never talk to an `embedded-graphics` target directly; they go through a
//! [`Canvas`], which carries the current [`Pen`] the way the panel driver
//! does, so the order of pen changes and draw calls is what ends up on
//! screen.

pub mod canvas;
pub mod pen;

pub use canvas::Canvas;
pub use pen::{BOLD_THICKNESS, Font, PEN_BLACK, PEN_MID_GRAY, PEN_WHITE, Pen, TextSize};

/// Panel width in pixels
pub const DISPLAY_WIDTH_PX: u32 = 296;

/// Panel height in pixels
pub const DISPLAY_HEIGHT_PX: u32 = 128;

/// One formatted line of page text. Longer lines are cut, never dropped.
pub type TextLine = heapless::String<64>;

pub fn text_line(args: core::fmt::Arguments<'_>) -> TextLine {
    crate::storage::truncated(args)
}
