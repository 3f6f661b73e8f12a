//! Error types for GitHub REST API operations

use thiserror::Error;

/// Errors that can occur when talking to the GitHub API
#[derive(Error, Debug)]
pub enum GitHubError {
    /// Transport-level failure (DNS, TLS, connection reset, ...)
    #[error("GitHub API request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// GitHub answered with a non-success status
    #[error("GitHub API error: {message} (HTTP {status})")]
    Api {
        /// HTTP status code
        status: u16,
        /// `message` field of the error body, or the raw body
        message: String,
    },

    /// Response body did not match the expected shape
    #[error("failed to parse GitHub response: {0}")]
    Parse(#[from] serde_json::Error),

    /// No token available for an endpoint that needs one
    #[error("not authenticated - run 'ghub auth login' or set GH_TOKEN")]
    NotAuthenticated,
}

impl GitHubError {
    /// HTTP status for API errors
    pub fn status(&self) -> Option<u16> {
        match self {
            GitHubError::Api { status, .. } => Some(*status),
            GitHubError::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Build an API error from a status and raw response body
    pub(crate) fn from_body(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
            .unwrap_or_else(|| {
                let trimmed = body.trim();
                if trimmed.is_empty() {
                    "empty response".to_string()
                } else {
                    trimmed.to_string()
                }
            });
        GitHubError::Api { status, message }
    }
}

/// Result type alias for GitHub operations
pub type GitHubResult<T> = Result<T, GitHubError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_body_uses_message_field() {
        let err = GitHubError::from_body(404, r#"{"message":"Not Found","documentation_url":"x"}"#);
        assert_eq!(err.to_string(), "GitHub API error: Not Found (HTTP 404)");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_from_body_falls_back_to_raw_text() {
        let err = GitHubError::from_body(502, "Bad Gateway\n");
        assert_eq!(err.to_string(), "GitHub API error: Bad Gateway (HTTP 502)");

        let err = GitHubError::from_body(500, "");
        assert_eq!(err.to_string(), "GitHub API error: empty response (HTTP 500)");
    }
}
