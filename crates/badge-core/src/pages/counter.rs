use embedded_graphics::pixelcolor::Gray4;
use embedded_graphics::prelude::*;

use super::constants::{THUMBNAIL_X, THUMBNAIL_Y};
use super::header::{draw_header, draw_lines};
use super::page::{PageRender, RenderContext};
use crate::picture::{Picture, THUMBNAIL_SIZE_PX};
use crate::state::BadgeState;
use crate::ui::{TextLine, text_line};

/// Tally page: one `"<label>: <count>"` line per configured counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterPage {
    picture: Picture,
}

impl CounterPage {
    pub fn new(picture: Picture) -> Self {
        Self { picture }
    }
}

impl PageRender for CounterPage {
    fn title(&self) -> &str {
        "Counters"
    }

    fn render<D: DrawTarget<Color = Gray4>>(
        &self,
        ctx: &mut RenderContext<'_, D>,
        state: &BadgeState,
    ) -> Result<(), D::Error> {
        let config = ctx.config;
        draw_header(&mut ctx.canvas, config.display_name())?;

        // Keys missing from the state read as zero.
        let lines: alloc::vec::Vec<TextLine> = config
            .counters()
            .iter()
            .map(|c| text_line(format_args!("{}: {}", c.label, state.count(&c.key))))
            .collect();
        draw_lines(&mut ctx.canvas, lines.iter().map(|l| l.as_str()))?;

        self.picture
            .render(&mut ctx.canvas, THUMBNAIL_X, THUMBNAIL_Y, THUMBNAIL_SIZE_PX)
    }
}
