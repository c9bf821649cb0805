//! Precomputed 1-bit thumbnails loaded from storage.

use alloc::vec::Vec;
use embedded_graphics::pixelcolor::Gray4;
use embedded_graphics::prelude::*;
use log::debug;

use super::{PictureError, THUMBNAIL_SIZE_PX};
use crate::storage::Storage;
use crate::ui::Canvas;

/// Bytes in a packed 96x96 1-bit thumbnail.
pub const IMAGE_BYTES: usize = (THUMBNAIL_SIZE_PX * THUMBNAIL_SIZE_PX / 8) as usize;

/// A thumbnail bitmap, read once and kept in RAM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePicture {
    data: Vec<u8>,
}

impl ImagePicture {
    /// Read the bitmap at `path`.
    ///
    /// The file must hold at least [`IMAGE_BYTES`] bytes; anything after that
    /// is ignored. A shorter file is an error rather than a padded image.
    pub fn load<S: Storage>(storage: &mut S, path: &str) -> Result<Self, PictureError> {
        let mut data = storage.read_file(path).map_err(PictureError::Storage)?;
        if data.len() < IMAGE_BYTES {
            return Err(PictureError::ShortRead {
                expected: IMAGE_BYTES,
                actual: data.len(),
            });
        }
        data.truncate(IMAGE_BYTES);
        debug!("Loaded {} byte thumbnail from {}", IMAGE_BYTES, path);
        Ok(Self { data })
    }

    /// Wrap an in-memory bitmap, with the same length rules as [`Self::load`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PictureError> {
        match bytes.get(..IMAGE_BYTES) {
            Some(data) => Ok(Self {
                data: data.to_vec(),
            }),
            None => Err(PictureError::ShortRead {
                expected: IMAGE_BYTES,
                actual: bytes.len(),
            }),
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Blit the bitmap with its top-left corner at `(x, y)`.
    ///
    /// The bitmap has a fixed size, so `_size` only exists to share the
    /// picture render signature.
    pub fn render<D>(
        &self,
        canvas: &mut Canvas<'_, D>,
        x: i32,
        y: i32,
        _size: u32,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Gray4>,
    {
        canvas.image(&self.data, THUMBNAIL_SIZE_PX, x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::FrameBuffer;
    use crate::storage::{MemoryStorage, StorageError};
    use crate::ui::{PEN_BLACK, PEN_WHITE};
    use alloc::vec;

    #[test]
    fn test_load_exact_size() {
        let mut storage = MemoryStorage::new().with_file("/pfp.bin", &[0xAA; IMAGE_BYTES]);
        let picture = ImagePicture::load(&mut storage, "/pfp.bin").unwrap();
        assert_eq!(picture.data().len(), IMAGE_BYTES);
    }

    #[test]
    fn test_load_ignores_trailing_bytes() {
        let mut storage = MemoryStorage::new().with_file("/pfp.bin", &[0u8; IMAGE_BYTES + 10]);
        let picture = ImagePicture::load(&mut storage, "/pfp.bin").unwrap();
        assert_eq!(picture.data().len(), IMAGE_BYTES);
    }

    #[test]
    fn test_short_read_is_an_error() {
        let mut storage = MemoryStorage::new().with_file("/pfp.bin", &[0u8; 100]);
        assert_eq!(
            ImagePicture::load(&mut storage, "/pfp.bin"),
            Err(PictureError::ShortRead {
                expected: IMAGE_BYTES,
                actual: 100
            })
        );
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let mut storage = MemoryStorage::new();
        assert_eq!(
            ImagePicture::load(&mut storage, "/pfp.bin"),
            Err(PictureError::Storage(StorageError::NotFound))
        );
    }

    #[test]
    fn test_render_blits_at_position() {
        // First row fully set, everything else clear.
        let mut bytes = vec![0u8; IMAGE_BYTES];
        bytes[..12].fill(0xFF);
        let picture = ImagePicture::from_bytes(&bytes).unwrap();

        let mut fb = FrameBuffer::new();
        let mut canvas = Canvas::new(&mut fb);
        picture.render(&mut canvas, 198, 20, 96).unwrap();

        assert_eq!(fb.pixel(198, 20), Some(PEN_WHITE));
        assert_eq!(fb.pixel(198, 21), Some(PEN_BLACK));
        assert_eq!(fb.pixel(197, 21), Some(PEN_WHITE));
        assert_eq!(fb.pixel(293, 115), Some(PEN_BLACK));
        assert_eq!(fb.pixel(294, 115), Some(PEN_WHITE));
    }
}
