use badge_core::picture::{ModuleGrid, QrEncodeError, QrEncoder};
use qrcodegen::{QrCode, QrCodeEcc};

/// [`QrEncoder`] backed by `qrcodegen`, medium error correction.
pub struct QrcodegenEncoder;

impl QrEncoder for QrcodegenEncoder {
    fn encode(&self, text: &str) -> Result<ModuleGrid, QrEncodeError> {
        let code =
            QrCode::encode_text(text, QrCodeEcc::Medium).map_err(|_| QrEncodeError::DataTooLong)?;
        let side = code.size() as usize;
        Ok(ModuleGrid::from_fn(side, |x, y| {
            code.get_module(x as i32, y as i32)
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_link_is_version_two() {
        let grid = QrcodegenEncoder.encode("f.noahstride.co.uk").unwrap();
        // 18 bytes exceed version 1 at medium correction.
        assert_eq!(grid.side(), 25);
        // Finder pattern corners and the separator next to one.
        assert!(grid.is_dark(0, 0));
        assert!(grid.is_dark(24, 0));
        assert!(!grid.is_dark(7, 0));
    }
}
