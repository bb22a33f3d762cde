//! Platform detection for qr-finder-mcp
//!
//! Detects the operating system and display server at runtime. The result is
//! logged at startup and used by the capture backend to turn opaque capture
//! failures into actionable errors.

use std::env;

use crate::model::{DisplayServer, PlatformInfo};

/// Detects the current platform and display server
///
/// On Linux `$WAYLAND_DISPLAY` is checked first, then `$DISPLAY`; empty
/// values count as unset. Windows and macOS always report their native
/// display server.
///
/// # Examples
///
/// ```
/// use qr_finder_mcp::util::detect::detect_platform;
///
/// let platform = detect_platform();
/// println!("Running on: {} with display: {}", platform.os, platform.display);
/// ```
pub fn detect_platform() -> PlatformInfo {
    detect_platform_with_env(|key| env::var(key).ok())
}

/// Platform detection with an injectable environment lookup
fn detect_platform_with_env<F>(_env_provider: F) -> PlatformInfo
where
    F: Fn(&str) -> Option<String>,
{
    #[cfg(target_os = "linux")]
    {
        PlatformInfo::new("linux".to_string(), detect_linux_display(&_env_provider))
    }

    #[cfg(target_os = "windows")]
    {
        PlatformInfo::new("windows".to_string(), DisplayServer::Windows)
    }

    #[cfg(target_os = "macos")]
    {
        PlatformInfo::new("macos".to_string(), DisplayServer::MacOS)
    }

    #[cfg(not(any(target_os = "linux", target_os = "windows", target_os = "macos")))]
    {
        PlatformInfo::new("unknown".to_string(), DisplayServer::None)
    }
}

#[cfg(target_os = "linux")]
fn detect_linux_display<F>(env_provider: &F) -> DisplayServer
where
    F: Fn(&str) -> Option<String>,
{
    let is_set = |key: &str| env_provider(key).is_some_and(|value| !value.is_empty());

    if is_set("WAYLAND_DISPLAY") {
        DisplayServer::Wayland
    } else if is_set("DISPLAY") {
        DisplayServer::X11
    } else {
        DisplayServer::None
    }
}
