//! Reference resolution
//!
//! Turns what a user typed (or didn't type) into concrete API coordinates:
//! `owner/repo` from a flag or git remotes, a PR number from a number, branch
//! or URL, and a workflow run id.

pub mod pr;
pub mod repo;
pub mod run;

pub use pr::{parse_pr_ref, resolve_pr_number, PrRef, ResolvedPr};
pub use repo::{parse_repo_ref, resolve_repository};
pub use run::{parse_run_ref, resolve_run_id, ResolvedRun, RunRef};

use thiserror::Error;

use crate::git::GitError;
use crate::github::GitHubError;

/// Resolution failure
///
/// `Validation` means the input itself is malformed; `Lookup` means the input
/// was fine but git or GitHub could not produce an answer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Lookup(String),
}

impl ResolveError {
    pub fn is_validation(&self) -> bool {
        matches!(self, ResolveError::Validation(_))
    }
}

impl From<GitError> for ResolveError {
    fn from(err: GitError) -> Self {
        ResolveError::Lookup(err.to_string())
    }
}

impl From<GitHubError> for ResolveError {
    fn from(err: GitHubError) -> Self {
        ResolveError::Lookup(err.to_string())
    }
}

/// Result type alias for resolvers
pub type ResolveResult<T> = Result<T, ResolveError>;

/// Current branch, or a lookup error when HEAD is detached or unreadable
pub(crate) async fn require_current_branch(
    git: &dyn crate::git::GitRunner,
) -> ResolveResult<String> {
    match crate::git::current_branch(git).await {
        Ok(Some(branch)) => Ok(branch),
        Ok(None) | Err(_) => Err(ResolveError::Lookup(
            "Could not determine current branch".to_string(),
        )),
    }
}
