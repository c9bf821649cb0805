//! Header banner and body text shared by the counter and about-me pages.

use embedded_graphics::pixelcolor::Gray4;
use embedded_graphics::prelude::*;
use embedded_graphics::text::Alignment;

use super::constants::{
    BODY_THICKNESS, HEADER_HEIGHT_PX, HEADER_TEXT_Y, HEADER_THICKNESS, LINE_PITCH_PX,
    LINE_START_Y, LINE_X,
};
use crate::ui::{Canvas, DISPLAY_WIDTH_PX, Font, PEN_BLACK, PEN_WHITE, TextSize, text_line};

/// Draw the black banner with `"<display_name>!"` centered in white.
///
/// Leaves a black pen at body thickness for the lines that follow.
pub fn draw_header<D>(canvas: &mut Canvas<'_, D>, display_name: &str) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Gray4>,
{
    canvas.set_pen(PEN_BLACK);
    canvas.rectangle(0, 0, DISPLAY_WIDTH_PX, HEADER_HEIGHT_PX)?;

    canvas.set_thickness(HEADER_THICKNESS);
    canvas.set_font(Font::Sans);
    canvas.set_pen(PEN_WHITE);
    canvas.text_aligned(
        &text_line(format_args!("{}!", display_name)),
        (DISPLAY_WIDTH_PX / 2) as i32,
        HEADER_TEXT_Y,
        TextSize::Large,
        Alignment::Center,
    )?;

    canvas.set_thickness(BODY_THICKNESS);
    canvas.set_pen(PEN_BLACK);
    Ok(())
}

/// Vertical middle of body line `index`.
pub fn line_y(index: usize) -> i32 {
    LINE_START_Y + LINE_PITCH_PX * index as i32
}

/// Draw body lines top to bottom at the fixed pitch with the current pen.
pub fn draw_lines<'s, D>(
    canvas: &mut Canvas<'_, D>,
    lines: impl IntoIterator<Item = &'s str>,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Gray4>,
{
    for (index, line) in lines.into_iter().enumerate() {
        canvas.text(line, LINE_X, line_y(index), TextSize::Medium)?;
    }
    Ok(())
}
