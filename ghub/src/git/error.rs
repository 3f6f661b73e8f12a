//! Error types for git CLI operations

use thiserror::Error;

/// Errors that can occur when executing git commands
#[derive(Error, Debug)]
pub enum GitError {
    /// The git command failed with a non-zero exit code
    #[error("git command failed (exit code {code}): {stderr}")]
    CommandFailed {
        /// Exit code from the git process
        code: i32,
        /// Standard error output from git
        stderr: String,
    },

    /// Failed to spawn the git process
    #[error("failed to spawn git process: {0}")]
    SpawnError(#[from] std::io::Error),

    /// git is not installed or not in PATH
    #[error("git not found - ensure git is installed and in PATH")]
    NotFound,
}

/// Result type alias for git operations
pub type GitResult<T> = Result<T, GitError>;
