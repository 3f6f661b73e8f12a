//! Tool result builders

use rmcp::{
    model::{CallToolResult, Content},
    ErrorData as McpError,
};
use serde::Serialize;

/// Pretty-printed JSON tool result
pub fn json_success<T: Serialize>(data: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| McpError::internal_error(e.to_string(), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

/// Plain text tool result, e.g. a unified diff
pub fn text_success(text: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text.into())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_success_is_pretty() {
        let result = json_success(&json!({"number": 1})).unwrap();
        assert!(!result.is_error.unwrap_or(false));
        let content = serde_json::to_value(&result.content[0]).unwrap();
        assert_eq!(content["text"], "{\n  \"number\": 1\n}");
    }

    #[test]
    fn test_text_success() {
        let result = text_success("diff --git a/x b/x");
        assert_eq!(result.content.len(), 1);
    }
}
