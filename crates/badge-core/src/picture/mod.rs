//! Thumbnails shown in the right-hand slot of the badge pages.
//!
//! A [`Picture`] is either a stored bitmap or a QR code. Both are prepared
//! once at startup and render through the same `render(canvas, x, y, size)`
//! call, so pages hold a `Picture` without caring which one it is.

pub mod image;
pub mod qr;

pub use image::{IMAGE_BYTES, ImagePicture};
pub use qr::{ModuleGrid, QrEncodeError, QrEncoder, QrLayout, QrPicture, rasterize};

use embedded_graphics::pixelcolor::Gray4;
use embedded_graphics::prelude::*;
use thiserror_no_std::Error;

use crate::storage::{Storage, StorageError};
use crate::ui::Canvas;

/// Side of the square thumbnail slot in pixels.
pub const THUMBNAIL_SIZE_PX: u32 = 96;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PictureError {
    #[error("Failed to read picture: {0}")]
    Storage(StorageError),
    #[error("Picture file too short: expected {expected} bytes, got {actual}")]
    ShortRead { expected: usize, actual: usize },
    #[error("Failed to encode QR code: {0}")]
    Encode(QrEncodeError),
}

/// Thumbnail variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Picture {
    Image(ImagePicture),
    Qr(QrPicture),
}

impl Picture {
    /// Load a bitmap thumbnail from `path`.
    pub fn image<S: Storage>(storage: &mut S, path: &str) -> Result<Self, PictureError> {
        ImagePicture::load(storage, path).map(Picture::Image)
    }

    /// Encode `text` as a QR thumbnail.
    pub fn qr(text: &str, encoder: &impl QrEncoder) -> Result<Self, PictureError> {
        QrPicture::encode(text, encoder)
            .map(Picture::Qr)
            .map_err(PictureError::Encode)
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
        match self {
            Picture::Image(image) => image.render(canvas, x, y, size),
            Picture::Qr(qr) => qr.render(canvas, x, y, size),
        }
    }
}
