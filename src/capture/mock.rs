//! Mock capture backend for testing
//!
//! `MockBackend` implements [`DesktopCapture`] without touching a real
//! display. It returns a synthetic gradient frame of configurable size and
//! can be told to fail, which lets the MCP layer be exercised headless.
//!
//! # Examples
//!
//! ```
//! use qr_finder_mcp::{
//!     capture::{DesktopCapture, MockBackend},
//!     error::ToolError,
//! };
//!
//! #[tokio::main]
//! async fn main() {
//!     let backend = MockBackend::new().with_dimensions(800, 600);
//!     let image = backend.capture_desktop().await.unwrap();
//!     assert_eq!(image.dimensions(), (800, 600));
//!
//!     let failing = MockBackend::new().with_error(ToolError::NoMonitors);
//!     assert!(failing.capture_desktop().await.is_err());
//! }
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::{DesktopCapture, DesktopImage};
use crate::error::{ToolError, ToolResult};

/// Default mock desktop width
pub const MOCK_WIDTH: u32 = 1920;
/// Default mock desktop height
pub const MOCK_HEIGHT: u32 = 1080;

/// Mock capture backend for testing and development
#[derive(Debug)]
pub struct MockBackend {
    /// Frame size returned by `capture_desktop`
    dimensions:      (u32, u32),
    /// Optional error to inject for testing error handling
    error_injection: Option<ToolError>,
    /// Number of capture calls served so far
    captures:        AtomicUsize,
}

impl MockBackend {
    /// Creates a new MockBackend producing 1920x1080 frames
    pub fn new() -> Self {
        Self {
            dimensions:      (MOCK_WIDTH, MOCK_HEIGHT),
            error_injection: None,
            captures:        AtomicUsize::new(0),
        }
    }

    /// Sets the size of the frames returned by this backend
    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.dimensions = (width, height);
        self
    }

    /// Injects an error that will be returned by every capture
    pub fn with_error(mut self, error: ToolError) -> Self {
        self.error_injection = Some(error);
        self
    }

    /// Returns how many times `capture_desktop` has been called
    pub fn capture_count(&self) -> usize {
        self.captures.load(Ordering::SeqCst)
    }

    /// Rebuilds the injected error, if any
    ///
    /// `ToolError` is not `Clone` (it wraps `std::io::Error`), so each
    /// variant is copied field by field.
    fn check_error_injection(&self) -> ToolResult<()> {
        let Some(ref error) = self.error_injection else {
            return Ok(());
        };

        Err(match error {
            ToolError::NoMonitors => ToolError::NoMonitors,
            ToolError::CaptureFailed { reason } => ToolError::CaptureFailed {
                reason: reason.clone(),
            },
            ToolError::PermissionDenied { platform } => ToolError::PermissionDenied {
                platform: platform.clone(),
            },
            ToolError::BackendNotAvailable { display } => {
                ToolError::BackendNotAvailable { display: *display }
            }
            ToolError::EncodingFailed { format, reason } => ToolError::EncodingFailed {
                format: format.clone(),
                reason: reason.clone(),
            },
            ToolError::IoError(e) => ToolError::IoError(std::io::Error::new(e.kind(), e.to_string())),
            ToolError::ImageError(msg) => ToolError::ImageError(msg.clone()),
            ToolError::DetectionFailed { reason } => ToolError::DetectionFailed {
                reason: reason.clone(),
            },
        })
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DesktopCapture for MockBackend {
    async fn capture_desktop(&self) -> ToolResult<DesktopImage> {
        self.captures.fetch_add(1, Ordering::SeqCst);
        self.check_error_injection()?;

        let (width, height) = self.dimensions;
        Ok(DesktopImage::from_test_pattern(width, height))
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
