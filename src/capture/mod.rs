//! Desktop capture backends
//!
//! This module provides the abstraction over the OS screen capture facility:
//!
//! - `DesktopImage`: A wrapper around `image::DynamicImage` holding one
//!   captured frame
//! - `DesktopCapture`: Trait implemented by capture backends
//! - `XcapBackend`: Real backend built on the `xcap` crate
//! - `MockBackend`: Synthetic backend for headless tests

use async_trait::async_trait;

use crate::error::ToolResult;

pub mod desktop_image;
pub mod mock;
pub mod xcap_backend;

pub use desktop_image::DesktopImage;
pub use mock::MockBackend;
pub use xcap_backend::XcapBackend;

/// Core trait for desktop capture backends
///
/// A backend captures the whole desktop as it looks at call time. When
/// several monitors are attached the returned image covers all of them.
///
/// Implementations must be `Send + Sync` so a single backend can be shared
/// by the MCP server across concurrent tool calls.
///
/// # Examples
///
/// ```
/// use qr_finder_mcp::capture::{DesktopCapture, MockBackend};
///
/// #[tokio::main]
/// async fn main() {
///     let backend = MockBackend::new();
///     let image = backend.capture_desktop().await.unwrap();
///     assert_eq!(image.dimensions(), (1920, 1080));
/// }
/// ```
#[async_trait]
pub trait DesktopCapture: Send + Sync {
    /// Captures the full desktop
    ///
    /// # Errors
    ///
    /// - [`ToolError::NoMonitors`](crate::error::ToolError::NoMonitors) - no
    ///   monitor reported by the OS
    /// - [`ToolError::BackendNotAvailable`](crate::error::ToolError::BackendNotAvailable)
    ///   - no reachable display server
    /// - [`ToolError::CaptureFailed`](crate::error::ToolError::CaptureFailed)
    ///   - the capture facility failed
    async fn capture_desktop(&self) -> ToolResult<DesktopImage>;

    /// Short backend name used in log lines
    fn name(&self) -> &'static str;
}
