//! GitHub REST API access
//!
//! [`GitHubClient`] talks HTTP. The lister traits are the narrow seams the
//! resolvers depend on, so reference resolution can be tested without a server.

pub mod client;
pub mod error;

pub use client::{GitHubClient, MergeMethod, PrListFilter, RunListFilter, DEFAULT_API_URL};
pub use error::{GitHubError, GitHubResult};

use async_trait::async_trait;

use crate::types::{PullRequest, RepoRef, WorkflowRun};

/// Lists pull requests of a repository
#[async_trait]
pub trait PullRequestLister: Send + Sync {
    async fn list_pull_requests(
        &self,
        repo: &RepoRef,
        filter: &PrListFilter,
    ) -> GitHubResult<Vec<PullRequest>>;
}

/// Lists workflow runs of a repository
#[async_trait]
pub trait WorkflowRunLister: Send + Sync {
    async fn list_workflow_runs(
        &self,
        repo: &RepoRef,
        filter: &RunListFilter,
    ) -> GitHubResult<Vec<WorkflowRun>>;
}

#[async_trait]
impl PullRequestLister for GitHubClient {
    async fn list_pull_requests(
        &self,
        repo: &RepoRef,
        filter: &PrListFilter,
    ) -> GitHubResult<Vec<PullRequest>> {
        self.list_pulls(repo, filter).await
    }
}

#[async_trait]
impl WorkflowRunLister for GitHubClient {
    async fn list_workflow_runs(
        &self,
        repo: &RepoRef,
        filter: &RunListFilter,
    ) -> GitHubResult<Vec<WorkflowRun>> {
        self.list_runs(repo, filter).await
    }
}
