//! Error conversion for MCP tools

use rmcp::ErrorData as McpError;

/// Result type for tool implementations
pub type McpResult<T> = Result<T, McpError>;

/// Conversion into an MCP error
///
/// Implement this for a crate's own error type to use [`ResultExt::to_mcp_err`].
pub trait IntoMcpError {
    fn into_mcp_error(self) -> McpError;
}

impl IntoMcpError for serde_json::Error {
    fn into_mcp_error(self) -> McpError {
        McpError::internal_error(format!("JSON error: {}", self), None)
    }
}

impl IntoMcpError for anyhow::Error {
    fn into_mcp_error(self) -> McpError {
        McpError::internal_error(format!("{:#}", self), None)
    }
}

/// `to_mcp_err()` for any `Result` whose error converts
pub trait ResultExt<T> {
    fn to_mcp_err(self) -> Result<T, McpError>;
}

impl<T, E: IntoMcpError> ResultExt<T> for Result<T, E> {
    fn to_mcp_err(self) -> Result<T, McpError> {
        self.map_err(IntoMcpError::into_mcp_error)
    }
}

/// The request was understood but the server failed to answer it
pub fn internal_error(message: impl Into<String>) -> McpError {
    McpError::internal_error(message.into(), None)
}

/// The caller sent arguments that cannot be used
pub fn invalid_params(message: impl Into<String>) -> McpError {
    McpError::invalid_params(message.into(), None)
}
