//! MCP Server Test Harness
//!
//! Wraps a `QrFinderMcpServer` backed by `MockBackend` with a scratch
//! directory, and parses tool responses.

#![allow(dead_code)]

use std::{path::PathBuf, sync::Arc};

use qr_finder_mcp::{
    capture::{DesktopCapture, MockBackend},
    mcp::QrFinderMcpServer,
    model::{DetectionRecord, FindQrLocationsParams},
    util::screenshot_store::ScreenshotStore,
};
use rmcp::{
    handler::server::wrapper::Parameters,
    model::{CallToolResult, ErrorData as McpError},
};
use tempfile::TempDir;

/// Test fixture for MCP server integration tests
pub struct McpTestContext {
    /// The MCP server instance
    pub server:  QrFinderMcpServer,
    /// Scratch directory; screenshots land in `<scratch>/screenshots`
    pub scratch: TempDir,
}

impl McpTestContext {
    /// Create test context with a default MockBackend
    pub fn new_with_mock() -> Self {
        Self::new_with_backend(Arc::new(MockBackend::new()))
    }

    /// Create test context with a specific backend
    pub fn new_with_backend(backend: Arc<dyn DesktopCapture>) -> Self {
        let scratch = tempfile::tempdir().expect("should create scratch dir");
        let store = Arc::new(ScreenshotStore::new(scratch.path().join("screenshots")));
        let server = QrFinderMcpServer::new(backend, store);
        Self { server, scratch }
    }

    /// Directory screenshots are written into
    pub fn screenshot_dir(&self) -> PathBuf {
        self.scratch.path().join("screenshots")
    }

    /// Calls take_screenshot
    pub async fn take_screenshot(&self) -> Result<CallToolResult, McpError> {
        self.server.take_screenshot().await
    }

    /// Calls find_qr_locations for `path`
    pub async fn find_qr_locations(
        &self,
        path: impl Into<PathBuf>,
    ) -> Result<CallToolResult, McpError> {
        let params = FindQrLocationsParams {
            image_path: path.into().display().to_string(),
        };
        self.server.find_qr_locations(Parameters(params)).await
    }
}

/// Returns the text of the first content item
pub fn first_text(result: &CallToolResult) -> Option<String> {
    result.content.first()?.as_text().map(|t| t.text.clone())
}

/// Parses the screenshot path from a take_screenshot response
pub fn parse_screenshot_path(result: &CallToolResult) -> Option<PathBuf> {
    first_text(result).map(PathBuf::from)
}

/// Parses detection records from a find_qr_locations response
pub fn parse_records(result: &CallToolResult) -> Option<Vec<DetectionRecord>> {
    serde_json::from_str(&first_text(result)?).ok()
}
