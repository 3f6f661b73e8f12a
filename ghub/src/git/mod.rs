//! git CLI wrapper module
//!
//! Thin async wrappers over the `git` binary: repository detection, remotes,
//! the current branch and commit messages.

pub mod error;
pub mod executor;
pub mod remote;

pub use error::{GitError, GitResult};
pub use executor::{commits_since, current_branch, is_git_repository, CommitMessage, GitRunner, SystemGit};
pub use remote::{list_remotes, parse_github_remote_url, parse_remotes, Remote};
