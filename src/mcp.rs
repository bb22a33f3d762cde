//! MCP service implementation with tool routing
//!
//! This module provides the qr-finder MCP server with two tools:
//!
//! - `take_screenshot`: capture the full desktop to a PNG file
//! - `find_qr_locations`: locate and decode QR codes in an image file
//!
//! Tool failures are [`ToolError`]s; [`convert_tool_error_to_mcp`] turns them
//! into MCP error responses carrying the error kind and a remediation hint.

use std::{path::PathBuf, sync::Arc};

use chrono::Local;
use rmcp::{
    ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{
        CallToolResult, Content, ErrorData as McpError, Implementation, ServerCapabilities,
        ServerInfo,
    },
    tool, tool_handler, tool_router,
};
use serde_json::json;

use crate::{
    capture::{DesktopCapture, MockBackend},
    config::ServerConfig,
    error::{ToolError, ToolResult},
    model::{DetectionRecord, FindQrLocationsParams},
    qr,
    util::screenshot_store::ScreenshotStore,
};

/// Converts a ToolError to an MCP ErrorData
///
/// Every tool error is a server-side failure, so all of them map to
/// `internal_error`. The error kind and remediation hint travel in `data`.
pub fn convert_tool_error_to_mcp(error: ToolError) -> McpError {
    let data = json!({
        "kind": error.kind(),
        "hint": error.remediation_hint(),
    });
    McpError::internal_error(error.to_string(), Some(data))
}

/// QR finder MCP server
///
/// # Tools
///
/// - `take_screenshot`: Capture the desktop and return the PNG path
/// - `find_qr_locations`: Return the corners and payloads of QR codes found
///   in an image
#[derive(Clone)]
pub struct QrFinderMcpServer {
    /// Tool router for dispatching tool calls
    tool_router: ToolRouter<Self>,
    /// Backend used for desktop capture
    backend:     Arc<dyn DesktopCapture>,
    /// Destination for screenshot files
    store:       Arc<ScreenshotStore>,
    /// Name advertised in the MCP handshake
    name:        String,
}

#[tool_router]
impl QrFinderMcpServer {
    /// Creates a server with the given capture backend and screenshot store
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    ///
    /// use qr_finder_mcp::{
    ///     capture::MockBackend, mcp::QrFinderMcpServer,
    ///     util::screenshot_store::ScreenshotStore,
    /// };
    ///
    /// let backend = Arc::new(MockBackend::new());
    /// let store = Arc::new(ScreenshotStore::new("screenshots"));
    /// let server = QrFinderMcpServer::new(backend, store);
    /// ```
    pub fn new(backend: Arc<dyn DesktopCapture>, store: Arc<ScreenshotStore>) -> Self {
        Self {
            tool_router: Self::tool_router(),
            backend,
            store,
            name: crate::config::DEFAULT_SERVER_NAME.to_string(),
        }
    }

    /// Creates a server from a [`ServerConfig`]
    pub fn from_config(backend: Arc<dyn DesktopCapture>, config: &ServerConfig) -> Self {
        let store = Arc::new(ScreenshotStore::new(config.screenshot_dir.clone()));
        let mut server = Self::new(backend, store);
        server.name = config.server_name.clone();
        server
    }

    /// Creates a server with a MockBackend writing into `screenshot_dir`
    pub fn new_with_mock(screenshot_dir: impl Into<PathBuf>) -> Self {
        Self::new(
            Arc::new(MockBackend::new()),
            Arc::new(ScreenshotStore::new(screenshot_dir)),
        )
    }

    /// Captures the desktop and writes it to a timestamped PNG
    ///
    /// Returns the absolute path of the written file.
    ///
    /// # Examples
    ///
    /// Request:
    /// ```json
    /// {
    ///   "method": "tools/call",
    ///   "params": { "name": "take_screenshot", "arguments": {} }
    /// }
    /// ```
    ///
    /// Response:
    /// ```json
    /// {
    ///   "content": [{
    ///     "type": "text",
    ///     "text": "/home/me/project/screenshots/screenshot_20250131_120000.png"
    ///   }]
    /// }
    /// ```
    #[tool(
        description = "Captures a screenshot of the full desktop and returns the local file path to the saved image. Returns the absolute path to the saved screenshot PNG file."
    )]
    pub async fn take_screenshot(&self) -> Result<CallToolResult, McpError> {
        tracing::info!("take_screenshot tool called");

        let path = self.capture_to_file().await.map_err(|e| {
            tracing::error!("Error taking screenshot: {}", e);
            convert_tool_error_to_mcp(e)
        })?;

        tracing::info!("Screenshot saved successfully: {}", path.display());
        Ok(CallToolResult::success(vec![Content::text(path.display().to_string())]))
    }

    /// Locates QR codes in the image at `image_path`
    ///
    /// Returns a JSON array of detection records. An image that cannot be
    /// loaded, or that holds no codes, yields `[]`.
    ///
    /// # Examples
    ///
    /// Request:
    /// ```json
    /// {
    ///   "method": "tools/call",
    ///   "params": {
    ///     "name": "find_qr_locations",
    ///     "arguments": { "image_path": "/tmp/code.png" }
    ///   }
    /// }
    /// ```
    ///
    /// Response:
    /// ```json
    /// {
    ///   "content": [{
    ///     "type": "text",
    ///     "text": "[{\"points\":[[32,32],[200,32],[200,200],[32,200]],\"decoded_text\":\"HELLO\"}]"
    ///   }]
    /// }
    /// ```
    #[tool(
        description = "Detects QR codes in the given image and returns their locations. Each result has 'points' (four [x, y] corner coordinates of the code) and 'decoded_text' (the decoded content, or null if decoding failed). Returns an empty list if the image cannot be loaded or no QR codes are found."
    )]
    pub async fn find_qr_locations(
        &self,
        Parameters(params): Parameters<FindQrLocationsParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("find_qr_locations tool called for {}", params.image_path);

        let records = self.locate(params.image_path).await.map_err(|e| {
            tracing::error!("Error finding QR codes: {}", e);
            convert_tool_error_to_mcp(e)
        })?;

        let json_str = serde_json::to_string(&records).map_err(|e| {
            McpError::internal_error(format!("Failed to serialize QR locations: {}", e), None)
        })?;

        Ok(CallToolResult::success(vec![Content::text(json_str)]))
    }
}

impl QrFinderMcpServer {
    /// Returns the screenshot store used by this server
    pub fn store(&self) -> &ScreenshotStore {
        &self.store
    }

    /// Computes the target path, captures the desktop and persists it
    async fn capture_to_file(&self) -> ToolResult<PathBuf> {
        let taken_at = Local::now();
        let path = self.store.prepare(&taken_at)?;
        tracing::info!(
            "Taking screenshot with {} backend, saving to: {}",
            self.backend.name(),
            path.display()
        );

        let image = self.backend.capture_desktop().await?;

        let store = Arc::clone(&self.store);
        let target = path.clone();
        tokio::task::spawn_blocking(move || store.write_png(&target, &image))
            .await
            .map_err(|e| ToolError::EncodingFailed {
                format: "png".to_string(),
                reason: format!("write task failed: {}", e),
            })??;

        Ok(path)
    }

    /// Runs QR detection on the blocking pool
    ///
    /// A panic inside the detector surfaces as
    /// [`ToolError::DetectionFailed`].
    async fn locate(&self, image_path: String) -> ToolResult<Vec<DetectionRecord>> {
        tokio::task::spawn_blocking(move || qr::find_qr_locations(&image_path))
            .await
            .map_err(|e| ToolError::DetectionFailed {
                reason: e.to_string(),
            })
    }
}

// Implement ServerHandler to make QrFinderMcpServer a valid Service
#[tool_handler]
impl ServerHandler for QrFinderMcpServer {
    fn get_info(&self) -> ServerInfo {
        let mut server_info = Implementation::from_build_env();
        server_info.name = self.name.clone();
        server_info.version = env!("CARGO_PKG_VERSION").to_string();

        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info,
            instructions: Some(
                "Use take_screenshot to capture the desktop to a PNG file, then pass that path \
                 (or any image path) to find_qr_locations to locate and decode QR codes."
                    .to_string(),
            ),
            ..Default::default()
        }
    }
}
