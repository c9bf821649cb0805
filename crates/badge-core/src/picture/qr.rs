//! QR thumbnails: module grids and their rasterization into a pixel box.
//!
//! Encoding text into modules is left to a [`QrEncoder`]; this module only
//! scales and centers a finished grid. With `w` modules per side and a box
//! of `size` pixels, each module is `size / w` pixels (truncated), the code
//! occupies `module_size * w` pixels, and the leftover space is split evenly
//! on both sides. A box smaller than the grid gives `module_size == 0` and
//! nothing is drawn.

use alloc::vec::Vec;
use embedded_graphics::pixelcolor::Gray4;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use thiserror_no_std::Error;

use crate::storage::ErrorMessage;
use crate::ui::{Canvas, PEN_BLACK, PEN_WHITE};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QrEncodeError {
    #[error("Text does not fit in a QR code")]
    DataTooLong,
    #[error("Module grid is not square (side {side}, {modules} modules)")]
    NotSquare { side: usize, modules: usize },
    #[error("QR encoder failed: {0}")]
    Encoder(ErrorMessage),
}

/// Square grid of QR modules, `true` meaning dark.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleGrid {
    side: usize,
    modules: Vec<bool>,
}

impl ModuleGrid {
    /// Build a grid from row-major modules; `modules.len()` must be `side²`.
    pub fn new(side: usize, modules: Vec<bool>) -> Result<Self, QrEncodeError> {
        if side.checked_mul(side) != Some(modules.len()) {
            return Err(QrEncodeError::NotSquare {
                side,
                modules: modules.len(),
            });
        }
        Ok(Self { side, modules })
    }

    /// Build a grid by asking `dark(x, y)` for every module.
    pub fn from_fn(side: usize, mut dark: impl FnMut(usize, usize) -> bool) -> Self {
        let mut modules = Vec::with_capacity(side * side);
        for y in 0..side {
            for x in 0..side {
                modules.push(dark(x, y));
            }
        }
        Self { side, modules }
    }

    /// Modules per side.
    pub fn side(&self) -> usize {
        self.side
    }

    /// Whether the module at `(x, y)` is dark. Out-of-range is light.
    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        x < self.side && y < self.side && self.modules[y * self.side + x]
    }

    /// Coordinates of every dark module, row by row.
    pub fn dark_modules(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let side = self.side;
        self.modules
            .iter()
            .enumerate()
            .filter(|(_, dark)| **dark)
            .map(move |(idx, _)| (idx % side, idx / side))
    }
}

/// Turns text into a module grid. Implemented outside the core.
pub trait QrEncoder {
    fn encode(&self, text: &str) -> Result<ModuleGrid, QrEncodeError>;
}

/// Scaled, centered placement of a grid inside a square box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QrLayout {
    /// Box origin
    pub origin: Point,
    /// Pixels per module side
    pub module_size: u32,
    /// Pixels covered by the whole code
    pub actual_size: u32,
    /// Offset of the code from the box origin on both axes
    pub adjust: u32,
}

impl QrLayout {
    /// Fit `modules` modules per side into a `size` pixel box at `origin`.
    pub fn measure(origin: Point, size: u32, modules: usize) -> Self {
        let module_size = match u32::try_from(modules) {
            Ok(0) | Err(_) => 0,
            Ok(w) => size / w,
        };
        let actual_size = module_size.saturating_mul(modules as u32);
        let adjust = size.saturating_sub(actual_size) / 2;

        Self {
            origin,
            module_size,
            actual_size,
            adjust,
        }
    }

    /// Light rectangle the code sits on.
    pub fn background(&self) -> Rectangle {
        Rectangle::new(
            self.origin + Point::new(self.adjust as i32, self.adjust as i32),
            Size::new(self.actual_size, self.actual_size),
        )
    }

    /// Dark rectangle for module `(x, y)`.
    pub fn module(&self, x: usize, y: usize) -> Rectangle {
        let step = self.module_size as i32;
        Rectangle::new(
            self.origin
                + Point::new(
                    self.adjust as i32 + x as i32 * step,
                    self.adjust as i32 + y as i32 * step,
                ),
            Size::new(self.module_size, self.module_size),
        )
    }
}

/// Paint `grid` into the `size` pixel box at `(x, y)`.
///
/// Leaves the pen black.
pub fn rasterize<D>(
    canvas: &mut Canvas<'_, D>,
    grid: &ModuleGrid,
    x: i32,
    y: i32,
    size: u32,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Gray4>,
{
    let layout = QrLayout::measure(Point::new(x, y), size, grid.side());

    let background = layout.background();
    canvas.set_pen(PEN_WHITE);
    canvas.rectangle(
        background.top_left.x,
        background.top_left.y,
        background.size.width,
        background.size.height,
    )?;

    canvas.set_pen(PEN_BLACK);
    if layout.module_size == 0 {
        return Ok(());
    }
    for (mx, my) in grid.dark_modules() {
        let module = layout.module(mx, my);
        canvas.rectangle(
            module.top_left.x,
            module.top_left.y,
            module.size.width,
            module.size.height,
        )?;
    }
    Ok(())
}

/// QR thumbnail whose module grid is computed once at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrPicture {
    grid: ModuleGrid,
}

impl QrPicture {
    /// Encode `text` with `encoder` and keep the resulting grid.
    pub fn encode(text: &str, encoder: &impl QrEncoder) -> Result<Self, QrEncodeError> {
        Ok(Self::from_grid(encoder.encode(text)?))
    }

    pub fn from_grid(grid: ModuleGrid) -> Self {
        Self { grid }
    }

    pub fn grid(&self) -> &ModuleGrid {
        &self.grid
    }

    pub fn render<D>(
        &self,
        canvas: &mut Canvas<'_, D>,
        x: i32,
        y: i32,
        size: u32,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Gray4>,
    {
        rasterize(canvas, &self.grid, x, y, size)
    }
}
