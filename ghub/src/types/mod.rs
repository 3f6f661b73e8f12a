//! Type definitions for GitHub entities
//!
//! Rust structs for the REST API JSON shapes this tool consumes.

pub mod common;
pub mod pull_request;
pub mod repo;
pub mod search;
pub mod workflow;

pub use common::{Label, Milestone, RepoRef, User};
pub use pull_request::{BranchRef, CheckRun, CheckRunList, MergeResult, NewPullRequest, PullRequest};
pub use repo::{License, Repository};
pub use search::{CodeHit, CommitHit, IssueHit, SearchResults};
pub use workflow::{RunDetail, WorkflowJob, WorkflowJobList, WorkflowRun, WorkflowRunList};
