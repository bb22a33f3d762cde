//! PNG encoding for captured desktop frames
//!
//! Screenshots are always written as lossless RGBA PNG with adaptive
//! per-scanline filtering.
//!
//! # Examples
//!
//! ```
//! use qr_finder_mcp::{capture::DesktopImage, util::encode::encode_png};
//!
//! let img = DesktopImage::from_test_pattern(320, 240);
//! let png_bytes = encode_png(&img).unwrap();
//! assert_eq!(&png_bytes[..8], b"\x89PNG\r\n\x1a\n");
//! ```

use std::io::Cursor;

use image::{
    ImageEncoder,
    codecs::png::{CompressionType, FilterType, PngEncoder},
};

use crate::{
    capture::DesktopImage,
    error::{ToolError, ToolResult},
};

/// Encodes an image as PNG with default compression
pub fn encode_png(image: &DesktopImage) -> ToolResult<Vec<u8>> {
    encode_png_with_compression(image, CompressionType::Default)
}

/// Encodes an image as PNG with the given compression level
///
/// # Errors
///
/// Returns [`ToolError::EncodingFailed`] if the frame has zero area or the
/// encoder rejects it.
pub fn encode_png_with_compression(
    image: &DesktopImage,
    compression: CompressionType,
) -> ToolResult<Vec<u8>> {
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();

    if width == 0 || height == 0 {
        return Err(ToolError::EncodingFailed {
            format: "png".to_string(),
            reason: format!("invalid dimensions {}x{}", width, height),
        });
    }

    let mut output = Vec::new();
    let encoder =
        PngEncoder::new_with_quality(Cursor::new(&mut output), compression, FilterType::Adaptive);

    encoder
        .write_image(rgba.as_raw(), width, height, image::ExtendedColorType::Rgba8)
        .map_err(|e| ToolError::EncodingFailed {
            format: "png".to_string(),
            reason: e.to_string(),
        })?;

    Ok(output)
}
