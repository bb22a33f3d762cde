//! QR code location and decoding
//!
//! Detection is delegated to `rqrr`: the image is converted to 8-bit luma,
//! every QR grid in it is located, and each grid is decoded independently.
//! A grid that is found but fails to decode still produces a record, with
//! `decoded_text` left empty (`None`).
//!
//! The image format is sniffed from the file contents, so the extension does
//! not need to match. Images that cannot be opened (missing file, directory,
//! unsupported or corrupt data) are treated as containing no codes.
//!
//! # Examples
//!
//! ```
//! use qr_finder_mcp::qr::find_qr_locations;
//!
//! let records = find_qr_locations("/definitely/not/here.png");
//! assert!(records.is_empty());
//! ```

use std::path::Path;

use image::{DynamicImage, ImageReader, ImageResult};

use crate::model::DetectionRecord;

/// Loads the image at `path` and locates every QR code in it
///
/// Returns an empty list when the image cannot be loaded or holds no codes.
pub fn find_qr_locations(path: impl AsRef<Path>) -> Vec<DetectionRecord> {
    let path = path.as_ref();

    let image = match load_image(path) {
        Ok(image) => image,
        Err(e) => {
            tracing::warn!("Could not load image {}: {}", path.display(), e);
            return Vec::new();
        }
    };

    let records = detect_in_image(&image);
    tracing::info!("Found {} QR code(s) in {}", records.len(), path.display());
    records
}

/// Opens `path` and decodes it, detecting the format from its leading bytes
///
/// Falls back to the extension only when the contents are not recognized.
fn load_image(path: &Path) -> ImageResult<DynamicImage> {
    let image = ImageReader::open(path)?.with_guessed_format()?.decode()?;
    Ok(image)
}

/// Locates and decodes every QR code in an already loaded image
///
/// Records follow the detector's order; nothing is sorted or deduplicated.
pub fn detect_in_image(image: &DynamicImage) -> Vec<DetectionRecord> {
    let luma = image.to_luma8();
    let (width, height) = luma.dimensions();

    let mut prepared =
        rqrr::PreparedImage::prepare_from_greyscale(width as usize, height as usize, |x, y| {
            luma.get_pixel(x as u32, y as u32)[0]
        });

    prepared
        .detect_grids()
        .into_iter()
        .map(|grid| {
            let points: [[i32; 2]; 4] =
                std::array::from_fn(|i| [grid.bounds[i].x, grid.bounds[i].y]);

            match grid.decode() {
                Ok((_meta, text)) => DetectionRecord::decoded(points, text),
                Err(e) => {
                    tracing::debug!("QR code at {:?} located but not decoded: {}", points, e);
                    DetectionRecord::undecoded(points)
                }
            }
        })
        .collect()
}
