//! Desktop capture backend using xcap
//!
//! Enumerates every monitor reported by the OS, captures each one and
//! composes the frames into a single virtual-desktop image. xcap performs
//! blocking calls into X11, Wayland (via screencopy), Windows GDI/DXGI or
//! CoreGraphics, so the whole capture runs on the blocking thread pool.

use async_trait::async_trait;
use xcap::Monitor;

use super::{
    DesktopCapture, DesktopImage,
    desktop_image::MonitorTile,
};
use crate::{
    error::{ToolError, ToolResult},
    model::{DisplayServer, PlatformInfo},
    util::detect::detect_platform,
};

/// Screen capture backend built on `xcap`
///
/// Stateless: monitors are enumerated on every call so hot-plugged displays
/// are picked up without restarting the server.
#[derive(Debug, Clone)]
pub struct XcapBackend {
    /// Platform detected at construction, used to explain failures
    platform: PlatformInfo,
}

impl XcapBackend {
    /// Creates a backend for the current platform
    pub fn new() -> Self {
        Self::with_platform(detect_platform())
    }

    /// Creates a backend with an explicit platform description
    pub fn with_platform(platform: PlatformInfo) -> Self {
        Self { platform }
    }

    /// Returns the platform this backend reports errors against
    pub fn platform(&self) -> &PlatformInfo {
        &self.platform
    }

    /// Captures every monitor and returns the tiles in enumeration order
    fn capture_tiles(platform: &PlatformInfo) -> ToolResult<Vec<MonitorTile>> {
        let monitors = Monitor::all().map_err(|e| {
            tracing::error!("xcap failed to enumerate monitors: {}", e);
            map_xcap_error(platform, &e)
        })?;

        if monitors.is_empty() {
            tracing::error!("No monitors available for capture");
            return Err(ToolError::NoMonitors);
        }

        let mut tiles = Vec::with_capacity(monitors.len());
        for monitor in monitors {
            let x = monitor.x().map_err(|e| map_xcap_error(platform, &e))?;
            let y = monitor.y().map_err(|e| map_xcap_error(platform, &e))?;

            let image = monitor.capture_image().map_err(|e| {
                tracing::error!("xcap monitor capture failed: {}", e);
                map_xcap_error(platform, &e)
            })?;

            tracing::debug!(
                "Captured monitor at ({}, {}): {}x{}",
                x,
                y,
                image.width(),
                image.height()
            );
            tiles.push(MonitorTile::new(x, y, image));
        }

        Ok(tiles)
    }
}

impl Default for XcapBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Maps an xcap error to a [`ToolError`]
///
/// xcap reports every failure as a string-bearing error, so the mapping is
/// keyed on the message text.
fn map_xcap_error(platform: &PlatformInfo, e: &impl std::fmt::Display) -> ToolError {
    let message = e.to_string();
    let lower = message.to_lowercase();

    if lower.contains("permission denied") || lower.contains("access denied") {
        tracing::warn!("xcap permission denied on {}", platform.os);
        return ToolError::PermissionDenied {
            platform: platform.os.clone(),
        };
    }

    if platform.os == "linux"
        && (platform.display == DisplayServer::None
            || lower.contains("display")
            || lower.contains("connection"))
    {
        tracing::warn!("xcap could not reach the {} display server", platform.display);
        return ToolError::BackendNotAvailable {
            display: platform.display,
        };
    }

    ToolError::CaptureFailed { reason: message }
}

#[async_trait]
impl DesktopCapture for XcapBackend {
    async fn capture_desktop(&self) -> ToolResult<DesktopImage> {
        let platform = self.platform.clone();

        let tiles = tokio::task::spawn_blocking(move || Self::capture_tiles(&platform))
            .await
            .map_err(|e| {
                tracing::error!("Screen capture task failed: {}", e);
                ToolError::CaptureFailed {
                    reason: format!("capture task failed: {}", e),
                }
            })??;

        let image = DesktopImage::compose(tiles)?;
        tracing::info!("Captured desktop: {}x{}", image.width(), image.height());
        Ok(image)
    }

    fn name(&self) -> &'static str {
        "xcap"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linux(display: DisplayServer) -> PlatformInfo {
        PlatformInfo::new("linux".to_string(), display)
    }

    #[test]
    fn test_map_permission_denied() {
        let error = map_xcap_error(&linux(DisplayServer::X11), &"Permission denied by server");
        assert!(matches!(error, ToolError::PermissionDenied { ref platform } if platform == "linux"));
    }

    #[test]
    fn test_map_display_connection_failure() {
        let error = map_xcap_error(&linux(DisplayServer::X11), &"failed to open display connection");
        assert!(matches!(
            error,
            ToolError::BackendNotAvailable {
                display: DisplayServer::X11
            }
        ));
    }

    #[test]
    fn test_map_without_display_server() {
        let error = map_xcap_error(&linux(DisplayServer::None), &"something odd");
        assert!(matches!(
            error,
            ToolError::BackendNotAvailable {
                display: DisplayServer::None
            }
        ));
    }

    #[test]
    fn test_map_generic_failure() {
        let platform = PlatformInfo::new("windows".to_string(), DisplayServer::Windows);
        let error = map_xcap_error(&platform, &"BitBlt failed");

        match error {
            ToolError::CaptureFailed { reason } => assert_eq!(reason, "BitBlt failed"),
            other => panic!("expected CaptureFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_backend_keeps_platform() {
        let backend = XcapBackend::with_platform(linux(DisplayServer::Wayland));
        assert_eq!(backend.platform().display, DisplayServer::Wayland);
        assert_eq!(backend.name(), "xcap");
    }

    #[tokio::test]
    #[ignore = "Requires a live desktop session"]
    async fn test_live_capture_matches_monitor_extent() {
        let backend = XcapBackend::new();
        let image = backend.capture_desktop().await.unwrap();

        let monitors = Monitor::all().unwrap();
        let widest = monitors.iter().map(|m| m.width().unwrap()).max().unwrap();
        assert!(image.width() >= widest);
        assert!(image.height() > 0);
    }
}
