use alloc::string::String;
use alloc::vec::Vec;
use embedded_graphics::pixelcolor::Gray4;
use embedded_graphics::prelude::*;

use super::constants::{THUMBNAIL_X, THUMBNAIL_Y};
use super::header::{draw_header, draw_lines};
use super::page::{PageRender, RenderContext};
use crate::picture::{Picture, THUMBNAIL_SIZE_PX};
use crate::state::BadgeState;

/// Bio card: a few static lines next to a thumbnail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AboutMePage {
    lines: Vec<String>,
    picture: Picture,
}

impl AboutMePage {
    pub fn new(lines: Vec<String>, picture: Picture) -> Self {
        Self { lines, picture }
    }
}

impl PageRender for AboutMePage {
    fn title(&self) -> &str {
        "About me"
    }

    fn render<D: DrawTarget<Color = Gray4>>(
        &self,
        ctx: &mut RenderContext<'_, D>,
        _state: &BadgeState,
    ) -> Result<(), D::Error> {
        draw_header(&mut ctx.canvas, ctx.config.display_name())?;
        draw_lines(&mut ctx.canvas, self.lines.iter().map(String::as_str))?;
        self.picture
            .render(&mut ctx.canvas, THUMBNAIL_X, THUMBNAIL_Y, THUMBNAIL_SIZE_PX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BadgeConfig;
    use crate::framebuffer::FrameBuffer;
    use crate::pages::Page;
    use crate::picture::{IMAGE_BYTES, ImagePicture};
    use crate::ui::{PEN_BLACK, PEN_WHITE};
    use alloc::string::ToString;
    use alloc::vec;
    use embedded_graphics::primitives::Rectangle;

    fn page() -> AboutMePage {
        let photo = ImagePicture::from_bytes(&[0x00; IMAGE_BYTES]).unwrap();
        AboutMePage::new(
            vec!["barq.social".to_string(), "Free hugs!!".to_string()],
            Picture::Image(photo),
        )
    }

    #[test]
    fn test_renders_header_lines_and_photo() {
        let config = BadgeConfig::new("p", "Noah", vec![], vec![Page::AboutMe(page())]).unwrap();
        let mut fb = FrameBuffer::new();
        page()
            .render(&mut RenderContext::new(&mut fb, &config), &BadgeState::default())
            .unwrap();

        assert_eq!(fb.pixel(10, 10), Some(PEN_BLACK));

        let first = Rectangle::new(Point::new(0, 50), Size::new(190, 20));
        let second = Rectangle::new(Point::new(0, 75), Size::new(190, 20));
        let third = Rectangle::new(Point::new(0, 100), Size::new(190, 20));
        assert!(fb.count_in(&first, PEN_BLACK) > 0);
        assert!(fb.count_in(&second, PEN_BLACK) > 0);
        assert_eq!(fb.count_in(&third, PEN_BLACK), 0);

        // All-clear bitmap fills the slot black.
        let slot = Rectangle::new(Point::new(198, 40), Size::new(96, 88));
        assert_eq!(fb.count_in(&slot, PEN_BLACK), 96 * 88);
        assert_eq!(fb.pixel(197, 100), Some(PEN_WHITE));
    }

    #[test]
    fn test_state_does_not_affect_render() {
        let config = BadgeConfig::new("p", "Noah", vec![], vec![Page::AboutMe(page())]).unwrap();
        let mut busy = BadgeState::default();
        busy.increment("drinks");
        busy.page = 3;

        let mut a = FrameBuffer::new();
        let mut b = FrameBuffer::new();
        page()
            .render(&mut RenderContext::new(&mut a, &config), &BadgeState::default())
            .unwrap();
        page()
            .render(&mut RenderContext::new(&mut b, &config), &busy)
            .unwrap();

        assert!((0..296).all(|x| (0..128).all(|y| a.pixel(x, y) == b.pixel(x, y))));
    }
}
