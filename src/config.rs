//! Server configuration
//!
//! All settings are fixed at startup. The defaults mirror where the server
//! has always put things: screenshots under `<cwd>/screenshots` and the log
//! file in the system temp directory. Log verbosity is the only knob, taken
//! from `RUST_LOG` by the logging layer.

use std::path::PathBuf;

use crate::{error::ToolResult, util::screenshot_store::SCREENSHOT_DIR_NAME};

/// Name advertised in the MCP handshake
pub const DEFAULT_SERVER_NAME: &str = "qr-finder";

/// Default `EnvFilter` directive when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "qr_finder_mcp=info";

/// Startup configuration for the server process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Name advertised to MCP clients
    pub server_name:    String,
    /// Directory receiving screenshot files
    pub screenshot_dir: PathBuf,
    /// File receiving a copy of every log line
    pub log_file:       PathBuf,
}

impl ServerConfig {
    /// Builds the default configuration relative to `working_dir`
    pub fn for_working_dir(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            server_name:    DEFAULT_SERVER_NAME.to_string(),
            screenshot_dir: working_dir.into().join(SCREENSHOT_DIR_NAME),
            log_file:       std::env::temp_dir().join(format!("{}-mcp.log", DEFAULT_SERVER_NAME)),
        }
    }

    /// Builds the default configuration for the process working directory
    pub fn from_working_dir() -> ToolResult<Self> {
        let cwd = std::env::current_dir()?;
        Ok(Self::for_working_dir(cwd))
    }
}
