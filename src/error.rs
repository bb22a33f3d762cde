//! Error types for the screenshot and QR detection tools
//!
//! Every failure that reaches a tool caller is a [`ToolError`]. Each variant
//! carries enough context to build a readable message, exposes a stable
//! machine-readable [`kind`](ToolError::kind), and offers a remediation hint
//! that is forwarded in the MCP error payload.
//!
//! Tolerated failures (an unreadable image, no QR codes found) are not errors
//! at all: the QR tool reports them as an empty result list.

use crate::model::DisplayServer;

/// Result type alias for tool operations
pub type ToolResult<T> = Result<T, ToolError>;

/// Error type for screenshot capture and QR detection
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    /// The capture backend could not find any monitor to capture
    #[error("No monitors available for screen capture")]
    NoMonitors,

    /// The OS capture facility reported a failure
    #[error("Screen capture failed: {reason}")]
    CaptureFailed {
        /// Reason reported by the capture facility
        reason: String,
    },

    /// Permission denied by the OS for screen capture
    #[error("Permission denied for screen capture on {platform}")]
    PermissionDenied {
        /// Platform where permission was denied
        platform: String,
    },

    /// No display server is reachable for capture
    #[error("Display server {display} is not available for screen capture")]
    BackendNotAvailable {
        /// Display server that was detected (or `none`)
        display: DisplayServer,
    },

    /// Image encoding failed
    #[error("Failed to encode image as {format}: {reason}")]
    EncodingFailed {
        /// Image format that failed
        format: String,
        /// Reason for encoding failure
        reason: String,
    },

    /// I/O error occurred
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Image processing error
    #[error("Image processing error: {0}")]
    ImageError(String),

    /// The QR detection library failed unexpectedly
    #[error("QR detection failed: {reason}")]
    DetectionFailed {
        /// Reason for the failure
        reason: String,
    },
}

impl ToolError {
    /// Returns a stable snake_case identifier for this error's kind
    ///
    /// The kind is included in the MCP error payload so callers can branch
    /// on it without parsing the message.
    ///
    /// # Examples
    ///
    /// ```
    /// use qr_finder_mcp::error::ToolError;
    ///
    /// let error = ToolError::CaptureFailed {
    ///     reason: "no frame".to_string(),
    /// };
    /// assert_eq!(error.kind(), "capture_failed");
    /// ```
    pub fn kind(&self) -> &'static str {
        match self {
            ToolError::NoMonitors => "no_monitors",
            ToolError::CaptureFailed { .. } => "capture_failed",
            ToolError::PermissionDenied { .. } => "permission_denied",
            ToolError::BackendNotAvailable { .. } => "backend_not_available",
            ToolError::EncodingFailed { .. } => "encoding_failed",
            ToolError::IoError(_) => "io_error",
            ToolError::ImageError(_) => "image_error",
            ToolError::DetectionFailed { .. } => "detection_failed",
        }
    }

    /// Returns an actionable remediation hint for this error
    pub fn remediation_hint(&self) -> &str {
        match self {
            ToolError::NoMonitors => {
                "No monitor was reported by the OS. Ensure a display is attached and the server \
                 runs inside a graphical session."
            }
            ToolError::CaptureFailed { .. } => {
                "The OS screen capture facility failed. Check that the session is unlocked and \
                 retry the capture."
            }
            ToolError::PermissionDenied { .. } => {
                "Grant screen recording permission to the host process (macOS: System Settings > \
                 Privacy & Security > Screen Recording; Windows: Settings > Privacy > Screen \
                 recording)."
            }
            ToolError::BackendNotAvailable { display } => match display {
                DisplayServer::Wayland => {
                    "Wayland capture requires a compositor exposing the screencopy protocol or a \
                     portal. Try running under XWayland with DISPLAY set."
                }
                DisplayServer::X11 => {
                    "X11 server is unreachable. Verify the DISPLAY environment variable and X \
                     authority."
                }
                _ => {
                    "No display server detected. Set DISPLAY or WAYLAND_DISPLAY, or run the server \
                     inside a desktop session."
                }
            },
            ToolError::EncodingFailed { .. } => {
                "PNG encoding failed. The captured frame may be empty or malformed; retry the \
                 capture."
            }
            ToolError::IoError(_) => {
                "An I/O error occurred. Check permissions and free space for the screenshots \
                 directory under the working directory."
            }
            ToolError::ImageError(_) => {
                "Image processing failed. Ensure the captured frame has non-zero dimensions."
            }
            ToolError::DetectionFailed { .. } => {
                "The QR detector failed on this image. The image may be malformed; try another \
                 image or re-capture it."
            }
        }
    }
}
