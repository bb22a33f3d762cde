//! qr-finder-mcp: screenshot and QR code detection MCP server
//!
//! Serves the `take_screenshot` and `find_qr_locations` tools over stdio.

use std::sync::Arc;

use anyhow::Result;
use qr_finder_mcp::{
    capture::XcapBackend, config::ServerConfig, logging, mcp::QrFinderMcpServer,
};
use rmcp::{ServiceExt, transport::stdio};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::from_working_dir()?;

    // Respects RUST_LOG; logs go to stderr and the log file
    let file_logging = logging::init(&config);

    info!("Initializing qr-finder MCP server...");
    if file_logging {
        info!("Logging to {}", config.log_file.display());
    }

    let backend = Arc::new(XcapBackend::new());
    info!(
        "Capture backend: xcap (os={}, display={})",
        backend.platform().os,
        backend.platform().display
    );
    info!("Screenshots directory: {}", config.screenshot_dir.display());

    let server = QrFinderMcpServer::from_config(backend, &config);
    info!("qr-finder MCP server initialized successfully");

    info!("Starting MCP server on stdio transport...");
    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("Error running MCP server: {}", e);
    })?;

    info!("Server info: {:?}", service.peer_info());
    info!("Waiting for MCP requests...");

    service.waiting().await.inspect_err(|e| {
        error!("Error running MCP server: {}", e);
    })?;

    info!("qr-finder MCP server shutting down");
    Ok(())
}
