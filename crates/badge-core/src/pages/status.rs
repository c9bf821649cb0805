use embedded_graphics::pixelcolor::Gray4;
use embedded_graphics::prelude::*;

use super::constants::{BODY_THICKNESS, STATUS_TEXT_Y};
use super::page::{PageRender, RenderContext};
use crate::state::BadgeState;
use crate::ui::{Font, PEN_BLACK, PEN_MID_GRAY, TextSize};

const STATUS_TEXT: &str = "Status page coming soon";

/// Gray placeholder screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusPage;

impl StatusPage {
    pub fn new() -> Self {
        Self
    }
}

impl PageRender for StatusPage {
    fn title(&self) -> &str {
        "Status"
    }

    fn render<D: DrawTarget<Color = Gray4>>(
        &self,
        ctx: &mut RenderContext<'_, D>,
        _state: &BadgeState,
    ) -> Result<(), D::Error> {
        let canvas = &mut ctx.canvas;
        canvas.set_pen(PEN_MID_GRAY);
        canvas.clear()?;

        canvas.set_pen(PEN_BLACK);
        canvas.set_thickness(BODY_THICKNESS);
        canvas.set_font(Font::Serif);
        canvas.text(STATUS_TEXT, 0, STATUS_TEXT_Y, TextSize::Small)
    }
}
