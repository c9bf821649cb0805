//! Shared layout constants for the badge pages
//!
//! All pages share the same header banner, body line pitch and thumbnail
//! slot so that flipping between them only changes the content.

/// Height of the black header banner in pixels
pub const HEADER_HEIGHT_PX: u32 = 40;

/// Vertical middle of the greeting text inside the banner
pub const HEADER_TEXT_Y: i32 = 20;

/// Pen thickness for the greeting (bold)
pub const HEADER_THICKNESS: u8 = 4;

/// Pen thickness for body lines
pub const BODY_THICKNESS: u8 = 2;

/// Left margin of body lines in pixels
pub const LINE_X: i32 = 8;

/// Vertical middle of the first body line
pub const LINE_START_Y: i32 = 60;

/// Distance between consecutive body lines in pixels
pub const LINE_PITCH_PX: i32 = 25;

/// Top-left corner of the thumbnail slot
pub const THUMBNAIL_X: i32 = 198;
pub const THUMBNAIL_Y: i32 = 40;

/// Vertical middle of the status page text line
pub const STATUS_TEXT_Y: i32 = 50;
