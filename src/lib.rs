//! qr-finder-mcp: screenshot and QR code detection MCP server
//!
//! This library provides a Model Context Protocol (MCP) server exposing two
//! tools: capturing the desktop to a PNG file, and locating/decoding QR codes
//! in an image file.

pub mod capture;
pub mod config;
pub mod error;
pub mod logging;
pub mod mcp;
pub mod model;
pub mod qr;
pub mod util;
