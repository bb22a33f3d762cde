//! Screenshot file placement
//!
//! Screenshots are written as `screenshot_YYYYMMDD_HHMMSS.png` (local time,
//! second resolution) into a single directory, by default `screenshots/`
//! under the process working directory. Files are never deleted by the
//! server; the caller owns them.
//!
//! Two captures within the same second map to the same file name and the
//! later one overwrites the earlier file.
//!
//! # Examples
//!
//! ```
//! use chrono::{Local, TimeZone};
//! use qr_finder_mcp::util::screenshot_store::ScreenshotStore;
//!
//! let store = ScreenshotStore::new("/var/tmp/shots");
//! let taken_at = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
//! let path = store.path_for(&taken_at);
//! assert!(path.ends_with("screenshot_20240309_140507.png"));
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Local};

use crate::{capture::DesktopImage, error::ToolResult, util::encode::encode_png};

/// Name of the screenshot directory under the working directory
pub const SCREENSHOT_DIR_NAME: &str = "screenshots";

/// Writes timestamped PNG screenshots into one directory
#[derive(Debug, Clone)]
pub struct ScreenshotStore {
    /// Directory receiving screenshot files
    dir: PathBuf,
}

impl ScreenshotStore {
    /// Creates a store writing into `dir`
    ///
    /// A relative `dir` is resolved against the working directory when a
    /// path is produced.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the directory this store writes into
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the file path for a screenshot taken at `taken_at`
    pub fn path_for(&self, taken_at: &DateTime<Local>) -> PathBuf {
        let filename = format!("screenshot_{}.png", taken_at.format("%Y%m%d_%H%M%S"));
        self.dir.join(filename)
    }

    /// Creates the directory if needed and returns the absolute target path
    ///
    /// Creating an existing directory is not an error.
    pub fn prepare(&self, taken_at: &DateTime<Local>) -> ToolResult<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        Ok(std::path::absolute(self.path_for(taken_at))?)
    }

    /// Encodes `image` as PNG and writes it to `path`
    ///
    /// An existing file at `path` is truncated and replaced. Returns the
    /// number of bytes written.
    pub fn write_png(&self, path: &Path, image: &DesktopImage) -> ToolResult<u64> {
        let data = encode_png(image)?;
        fs::write(path, &data)?;

        tracing::debug!("Wrote {} bytes to {}", data.len(), path.display());
        Ok(data.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use image::GenericImageView;

    use super::*;

    fn at(hour: u32, min: u32, sec: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 1, 31, hour, min, sec).unwrap()
    }

    fn save(store: &ScreenshotStore, image: &DesktopImage, taken_at: &DateTime<Local>) -> PathBuf {
        let path = store.prepare(taken_at).unwrap();
        store.write_png(&path, image).unwrap();
        path
    }

    #[test]
    fn test_path_format() {
        let store = ScreenshotStore::new("/data/shots");
        let path = store.path_for(&at(9, 3, 1));

        assert_eq!(path, PathBuf::from("/data/shots/screenshot_20250131_090301.png"));
    }

    #[test]
    fn test_prepare_creates_directory_idempotently() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ScreenshotStore::new(tmp.path().join("nested").join(SCREENSHOT_DIR_NAME));

        let first = store.prepare(&at(10, 0, 0)).unwrap();
        let second = store.prepare(&at(10, 0, 0)).unwrap();

        assert!(store.dir().is_dir());
        assert_eq!(first, second);
        assert!(first.is_absolute());
    }

    #[test]
    fn test_save_writes_valid_png() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ScreenshotStore::new(tmp.path());

        let image = DesktopImage::from_test_pattern(120, 90);
        let path = save(&store, &image, &at(11, 22, 33));

        assert!(path.exists());
        assert!(path.is_absolute());
        let decoded = image::open(&path).unwrap();
        assert_eq!(decoded.dimensions(), (120, 90));
    }

    #[test]
    fn test_same_second_overwrites() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ScreenshotStore::new(tmp.path());
        let taken_at = at(12, 0, 0);

        let first = save(&store, &DesktopImage::from_test_pattern(40, 40), &taken_at);
        let second = save(&store, &DesktopImage::from_test_pattern(80, 20), &taken_at);

        assert_eq!(first, second);
        assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 1);
        assert_eq!(image::open(&second).unwrap().dimensions(), (80, 20));
    }

    #[test]
    fn test_different_seconds_produce_distinct_files() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ScreenshotStore::new(tmp.path());
        let image = DesktopImage::from_test_pattern(16, 16);

        let first = save(&store, &image, &at(12, 0, 0));
        let second = save(&store, &image, &at(12, 0, 1));

        assert_ne!(first, second);
        assert!(first.exists());
        assert!(second.exists());
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ScreenshotStore::new(tmp.path().join("missing"));
        let path = store.path_for(&at(1, 2, 3));

        let result = store.write_png(&path, &DesktopImage::from_test_pattern(8, 8));
        assert!(matches!(result, Err(crate::error::ToolError::IoError(_))));
    }
}
