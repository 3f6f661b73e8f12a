//! Shared MCP plumbing
//!
//! - [`init_tracing`] sets up stderr logging, since stdout carries the protocol
//! - [`serve_stdio`] runs a server handler over stdin/stdout until the client leaves
//! - [`json_success`] / [`text_success`] build tool results
//! - [`invalid_params`] / [`internal_error`] and [`ResultExt`] map errors
//!
//! ```rust,ignore
//! use mcp_common::{json_success, ResultExt};
//!
//! async fn pr_view(&self, ...) -> Result<CallToolResult, McpError> {
//!     let pr = self.client.get_pull(&repo, number).await.to_mcp_err()?;
//!     json_success(&pr)
//! }
//! ```

pub mod error;
pub mod init;
pub mod result;

pub use error::{internal_error, invalid_params, IntoMcpError, McpResult, ResultExt};
pub use init::{init_tracing, level_for_verbosity, serve_stdio};
pub use result::{json_success, text_success};

pub use rmcp::{model::CallToolResult, ErrorData as McpError};
