//! RAM framebuffer with changed-region tracking.
//!
//! Pages draw into this buffer instead of the panel. E-paper refreshes are
//! slow, so after drawing only the bounding box of changed pixels is handed
//! to the panel driver (or the simulator window) in one transfer.

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;
use core::convert::Infallible;
use embedded_graphics::pixelcolor::{Gray4, GrayColor};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use log::debug;

use crate::ui::{DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX};

/// Total number of pixels in the framebuffer (296 x 128 = 37,888).
const PIXEL_COUNT: usize = DISPLAY_WIDTH_PX as usize * DISPLAY_HEIGHT_PX as usize;

/// Bounding box of pixels that have changed since the last flush.
#[derive(Debug, Clone, Copy)]
struct DirtyRect {
    min_x: usize,
    min_y: usize,
    max_x: usize,
    max_y: usize,
}

impl DirtyRect {
    /// Expand the dirty region to include the given pixel coordinate.
    fn expand(&mut self, x: usize, y: usize) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    fn from_point(x: usize, y: usize) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        }
    }

    fn to_rectangle(self) -> Rectangle {
        Rectangle::new(
            Point::new(self.min_x as i32, self.min_y as i32),
            Size::new(
                (self.max_x - self.min_x + 1) as u32,
                (self.max_y - self.min_y + 1) as u32,
            ),
        )
    }
}

/// Heap-allocated `Gray4` framebuffer covering the whole panel.
///
/// Starts out paper white. Pixels are stored one per byte; the panel driver
/// packs them when flushing.
pub struct FrameBuffer {
    pixels: Vec<Gray4>,
    dirty: Option<DirtyRect>,
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self {
            pixels: vec![Gray4::WHITE; PIXEL_COUNT],
            dirty: None,
        }
    }

    /// Color at `(x, y)`, or `None` outside the panel.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Gray4> {
        if x < 0 || y < 0 || x as u32 >= DISPLAY_WIDTH_PX || y as u32 >= DISPLAY_HEIGHT_PX {
            return None;
        }
        Some(self.pixels[y as usize * DISPLAY_WIDTH_PX as usize + x as usize])
    }

    /// Number of pixels inside `area` that have exactly `color`.
    pub fn count_in(&self, area: &Rectangle, color: Gray4) -> usize {
        area.points()
            .filter(|p| self.pixel(p.x, p.y) == Some(color))
            .count()
    }

    /// Take the changed region accumulated since the last call or flush.
    pub fn take_dirty_region(&mut self) -> Option<Rectangle> {
        self.dirty.take().map(DirtyRect::to_rectangle)
    }

    /// Write a single pixel, expanding the dirty rect only if the color changed.
    #[inline]
    fn set_pixel(&mut self, x: usize, y: usize, color: Gray4) {
        let idx = y * DISPLAY_WIDTH_PX as usize + x;
        if self.pixels[idx] != color {
            self.pixels[idx] = color;
            match &mut self.dirty {
                Some(rect) => rect.expand(x, y),
                None => self.dirty = Some(DirtyRect::from_point(x, y)),
            }
        }
    }

    /// Send the changed region to `display`, then reset the dirty state.
    ///
    /// Returns the flushed area, or `None` when nothing changed.
    pub fn flush<D>(&mut self, display: &mut D) -> Result<Option<Rectangle>, D::Error>
    where
        D: DrawTarget<Color = Gray4>,
    {
        let Some(rect) = self.dirty.take() else {
            return Ok(None);
        };

        let area = rect.to_rectangle();
        debug!(
            "Flushing {}x{} dirty region at ({}, {})",
            area.size.width, area.size.height, rect.min_x, rect.min_y
        );

        let width = area.size.width as usize;
        let pixels = &self.pixels;
        let stride = DISPLAY_WIDTH_PX as usize;
        let pixel_iter = (rect.min_y..=rect.max_y).flat_map(move |y| {
            let row_start = y * stride + rect.min_x;
            pixels[row_start..row_start + width].iter().copied()
        });

        display.fill_contiguous(&area, pixel_iter)?;
        Ok(Some(area))
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = Gray4;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let w = DISPLAY_WIDTH_PX as usize;
        let h = DISPLAY_HEIGHT_PX as usize;

        for Pixel(coord, color) in pixels {
            let x = coord.x;
            let y = coord.y;
            if x >= 0 && y >= 0 && (x as usize) < w && (y as usize) < h {
                self.set_pixel(x as usize, y as usize, color);
            }
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let w = DISPLAY_WIDTH_PX as i64;
        let h = DISPLAY_HEIGHT_PX as i64;

        let x_start = (area.top_left.x as i64).clamp(0, w);
        let y_start = (area.top_left.y as i64).clamp(0, h);
        let x_end = (area.top_left.x as i64 + area.size.width as i64).clamp(0, w);
        let y_end = (area.top_left.y as i64 + area.size.height as i64).clamp(0, h);

        for y in y_start..y_end {
            for x in x_start..x_end {
                self.set_pixel(x as usize, y as usize, color);
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        let w = DISPLAY_WIDTH_PX as usize;
        let h = DISPLAY_HEIGHT_PX as usize;

        for y in 0..h {
            for x in 0..w {
                self.set_pixel(x, y, color);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::primitives::PrimitiveStyle;

    #[test]
    fn test_starts_white_and_clean() {
        let mut fb = FrameBuffer::new();
        assert_eq!(fb.pixel(0, 0), Some(Gray4::WHITE));
        assert_eq!(fb.pixel(295, 127), Some(Gray4::WHITE));
        assert_eq!(fb.pixel(296, 0), None);
        assert_eq!(fb.take_dirty_region(), None);
    }

    #[test]
    fn test_dirty_region_bounds_changes() {
        let mut fb = FrameBuffer::new();
        Rectangle::new(Point::new(10, 20), Size::new(5, 3))
            .into_styled(PrimitiveStyle::with_fill(Gray4::BLACK))
            .draw(&mut fb)
            .unwrap();

        assert_eq!(
            fb.take_dirty_region(),
            Some(Rectangle::new(Point::new(10, 20), Size::new(5, 3)))
        );
        assert_eq!(fb.take_dirty_region(), None);
    }

    #[test]
    fn test_unchanged_pixels_stay_clean() {
        let mut fb = FrameBuffer::new();
        fb.clear(Gray4::WHITE).unwrap();
        assert_eq!(fb.take_dirty_region(), None);
    }

    #[test]
    fn test_fill_solid_clips_to_panel() {
        let mut fb = FrameBuffer::new();
        fb.fill_solid(
            &Rectangle::new(Point::new(290, -5), Size::new(20, 10)),
            Gray4::BLACK,
        )
        .unwrap();

        assert_eq!(fb.pixel(295, 0), Some(Gray4::BLACK));
        assert_eq!(fb.pixel(295, 4), Some(Gray4::BLACK));
        assert_eq!(fb.pixel(295, 5), Some(Gray4::WHITE));
        assert_eq!(
            fb.take_dirty_region(),
            Some(Rectangle::new(Point::new(290, 0), Size::new(6, 5)))
        );
    }

    #[test]
    fn test_flush_copies_dirty_region() {
        let mut fb = FrameBuffer::new();
        fb.fill_solid(&Rectangle::new(Point::new(3, 4), Size::new(2, 2)), Gray4::BLACK)
            .unwrap();

        let mut panel = FrameBuffer::new();
        let flushed = fb.flush(&mut panel).unwrap();

        assert_eq!(flushed, Some(Rectangle::new(Point::new(3, 4), Size::new(2, 2))));
        assert_eq!(panel.pixel(4, 5), Some(Gray4::BLACK));
        assert_eq!(fb.flush(&mut panel).unwrap(), None);
    }
}
