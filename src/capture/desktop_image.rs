//! Captured desktop frame
//!
//! `DesktopImage` wraps `image::DynamicImage` and adds the handful of
//! operations the screenshot path needs: composing monitor tiles into one
//! virtual-desktop frame and producing the RGBA buffer handed to the PNG
//! encoder.
//!
//! # Examples
//!
//! ```
//! use qr_finder_mcp::capture::DesktopImage;
//!
//! let img = DesktopImage::from_test_pattern(640, 480);
//! assert_eq!(img.dimensions(), (640, 480));
//! ```

use image::{GenericImageView, RgbaImage, imageops};

use crate::error::{ToolError, ToolResult};

/// One monitor's captured frame and its position on the virtual desktop
#[derive(Debug, Clone)]
pub struct MonitorTile {
    /// Left edge of the monitor in desktop coordinates
    pub x:     i32,
    /// Top edge of the monitor in desktop coordinates
    pub y:     i32,
    /// Captured pixels
    pub image: RgbaImage,
}

impl MonitorTile {
    /// Creates a tile at the given desktop position
    pub fn new(x: i32, y: i32, image: RgbaImage) -> Self {
        Self { x, y, image }
    }
}

/// Wrapper around `image::DynamicImage` for a captured desktop frame
#[derive(Clone, Debug)]
pub struct DesktopImage {
    inner: image::DynamicImage,
}

impl DesktopImage {
    /// Creates a new DesktopImage from a DynamicImage
    pub fn new(image: image::DynamicImage) -> Self {
        Self { inner: image }
    }

    /// Composes monitor tiles into a single virtual-desktop image
    ///
    /// The result covers the bounding box of every tile; regions not covered
    /// by any monitor stay transparent black. A single tile is returned
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::NoMonitors`] for an empty tile list and
    /// [`ToolError::ImageError`] if the bounding box has no area.
    ///
    /// # Examples
    ///
    /// ```
    /// use image::RgbaImage;
    /// use qr_finder_mcp::capture::desktop_image::{DesktopImage, MonitorTile};
    ///
    /// let tiles = vec![
    ///     MonitorTile::new(0, 0, RgbaImage::new(1920, 1080)),
    ///     MonitorTile::new(1920, 0, RgbaImage::new(1280, 1024)),
    /// ];
    /// let desktop = DesktopImage::compose(tiles).unwrap();
    /// assert_eq!(desktop.dimensions(), (3200, 1080));
    /// ```
    pub fn compose(tiles: Vec<MonitorTile>) -> ToolResult<Self> {
        if tiles.len() == 1 {
            let tile = tiles.into_iter().next().ok_or(ToolError::NoMonitors)?;
            return Ok(Self::new(image::DynamicImage::ImageRgba8(tile.image)));
        }

        let min_x = tiles.iter().map(|t| t.x as i64).min().ok_or(ToolError::NoMonitors)?;
        let min_y = tiles.iter().map(|t| t.y as i64).min().ok_or(ToolError::NoMonitors)?;
        let max_x = tiles
            .iter()
            .map(|t| t.x as i64 + t.image.width() as i64)
            .max()
            .ok_or(ToolError::NoMonitors)?;
        let max_y = tiles
            .iter()
            .map(|t| t.y as i64 + t.image.height() as i64)
            .max()
            .ok_or(ToolError::NoMonitors)?;

        let width = u32::try_from(max_x - min_x)
            .map_err(|_| ToolError::ImageError("desktop width out of range".to_string()))?;
        let height = u32::try_from(max_y - min_y)
            .map_err(|_| ToolError::ImageError("desktop height out of range".to_string()))?;
        if width == 0 || height == 0 {
            return Err(ToolError::ImageError(format!(
                "desktop has no area ({}x{})",
                width, height
            )));
        }

        let mut canvas = RgbaImage::new(width, height);
        for tile in &tiles {
            imageops::overlay(&mut canvas, &tile.image, tile.x as i64 - min_x, tile.y as i64 - min_y);
        }

        Ok(Self::new(image::DynamicImage::ImageRgba8(canvas)))
    }

    /// Returns the dimensions of the image as (width, height)
    pub fn dimensions(&self) -> (u32, u32) {
        self.inner.dimensions()
    }

    /// Returns the image width in pixels
    pub fn width(&self) -> u32 {
        self.dimensions().0
    }

    /// Returns the image height in pixels
    pub fn height(&self) -> u32 {
        self.dimensions().1
    }

    /// Converts the image to RGBA8 format
    pub fn to_rgba8(&self) -> RgbaImage {
        self.inner.to_rgba8()
    }

    /// Creates a test pattern image with the given dimensions
    ///
    /// Produces a horizontal/vertical color gradient, useful for tests that
    /// need a non-uniform frame.
    pub fn from_test_pattern(width: u32, height: u32) -> Self {
        let img = RgbaImage::from_fn(width, height, |x, y| {
            let r = ((x as f32 / width.max(1) as f32) * 255.0) as u8;
            let g = ((y as f32 / height.max(1) as f32) * 255.0) as u8;
            image::Rgba([r, g, 128, 255])
        });
        Self::new(image::DynamicImage::ImageRgba8(img))
    }
}
