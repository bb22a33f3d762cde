//! Data models and type definitions for qr-finder-mcp
//!
//! This module defines the types exchanged through the MCP tools:
//! - Platform and display-server detection types
//! - QR detection records returned by `find_qr_locations`
//! - Tool parameter structures (with JSON schemas for the MCP tool list)

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Display server (or OS capture facility) available to the process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum DisplayServer {
    /// No display server detected
    None,
    /// Wayland compositor (Linux)
    Wayland,
    /// X11 server (Linux)
    X11,
    /// Windows desktop
    Windows,
    /// macOS window server
    #[serde(rename = "macos")]
    MacOS,
}

impl DisplayServer {
    /// Returns the display server as a lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayServer::None => "none",
            DisplayServer::Wayland => "wayland",
            DisplayServer::X11 => "x11",
            DisplayServer::Windows => "windows",
            DisplayServer::MacOS => "macos",
        }
    }
}

impl std::fmt::Display for DisplayServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Platform information including OS and display server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PlatformInfo {
    /// Operating system name (e.g., "linux", "windows", "macos")
    pub os:      String,
    /// Detected display server
    pub display: DisplayServer,
}

impl PlatformInfo {
    /// Creates a new PlatformInfo instance
    pub fn new(os: String, display: DisplayServer) -> Self {
        Self { os, display }
    }
}

/// One located QR code
///
/// `points` are the four corners of the code's quadrilateral in the order
/// the detector reports them. `decoded_text` is `None` when the code was
/// located but its payload could not be decoded; it serializes as `null`.
/// A payload that decodes to the empty string is `Some("")`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DetectionRecord {
    /// Corner coordinates as `[x, y]` pixel pairs
    pub points:       [[i32; 2]; 4],
    /// Decoded payload, or `null` if decoding failed
    pub decoded_text: Option<String>,
}

impl DetectionRecord {
    /// Creates a record for a code whose payload decoded successfully
    pub fn decoded(points: [[i32; 2]; 4], text: impl Into<String>) -> Self {
        Self {
            points,
            decoded_text: Some(text.into()),
        }
    }

    /// Creates a record for a code that was located but not decoded
    pub fn undecoded(points: [[i32; 2]; 4]) -> Self {
        Self {
            points,
            decoded_text: None,
        }
    }

    /// Returns true if the payload was decoded
    pub fn is_decoded(&self) -> bool {
        self.decoded_text.is_some()
    }
}

/// Parameters for the find_qr_locations tool
#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
pub struct FindQrLocationsParams {
    /// The local file path to the image (e.g., '/path/to/image.png')
    pub image_path: String,
}
