//! Pull request type definitions
//!
//! Structs representing GitHub pull request data as returned by the REST API.

use super::common::{Label, Milestone, User};
use serde::{Deserialize, Serialize};

/// Represents a GitHub pull request
///
/// List endpoints omit the size and mergeability fields, so those default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PullRequest {
    /// PR number (unique within repository)
    pub number: u64,

    /// PR title
    pub title: String,

    /// PR state (open, closed)
    pub state: String,

    /// PR body/description (markdown)
    #[serde(default)]
    pub body: Option<String>,

    /// PR author
    pub user: User,

    /// Applied labels
    #[serde(default)]
    pub labels: Vec<Label>,

    /// Assigned users
    #[serde(default)]
    pub assignees: Vec<User>,

    /// Requested reviewers
    #[serde(default)]
    pub requested_reviewers: Vec<User>,

    /// Associated milestone
    #[serde(default)]
    pub milestone: Option<Milestone>,

    /// Head branch
    pub head: BranchRef,

    /// Base branch
    pub base: BranchRef,

    /// Whether PR is in draft mode
    #[serde(default)]
    pub draft: bool,

    /// Whether the PR has been merged (detail endpoint only)
    #[serde(default)]
    pub merged: Option<bool>,

    /// Whether the PR can be merged (detail endpoint only)
    #[serde(default)]
    pub mergeable: Option<bool>,

    /// Creation timestamp (ISO 8601)
    pub created_at: String,

    /// Last update timestamp (ISO 8601)
    pub updated_at: String,

    /// Merged timestamp (ISO 8601), if merged
    #[serde(default)]
    pub merged_at: Option<String>,

    /// Closed timestamp (ISO 8601), if closed
    #[serde(default)]
    pub closed_at: Option<String>,

    /// PR URL on GitHub
    pub html_url: String,

    #[serde(default)]
    pub additions: Option<u64>,

    #[serde(default)]
    pub deletions: Option<u64>,

    #[serde(default)]
    pub changed_files: Option<u64>,
}

/// Head or base side of a pull request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchRef {
    /// Branch name
    #[serde(rename = "ref")]
    pub ref_name: String,

    /// Commit SHA at the tip of the branch
    pub sha: String,

    /// `owner:branch` label
    #[serde(default)]
    pub label: Option<String>,
}

impl PullRequest {
    /// Display state, folding merged PRs out of `closed`
    pub fn display_state(&self) -> &str {
        if self.merged == Some(true) || self.merged_at.is_some() {
            "merged"
        } else if self.draft && self.state == "open" {
            "draft"
        } else {
            &self.state
        }
    }
}

/// Body for `POST /repos/{owner}/{repo}/pulls`
#[derive(Debug, Clone, Serialize)]
pub struct NewPullRequest {
    pub title: String,
    pub head: String,
    pub base: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    pub draft: bool,
}

/// Result of `PUT /repos/{owner}/{repo}/pulls/{number}/merge`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergeResult {
    #[serde(default)]
    pub sha: Option<String>,
    pub merged: bool,
    pub message: String,
}

/// A check run reported against a commit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckRun {
    pub id: u64,
    pub name: String,
    /// queued, in_progress, completed
    pub status: String,
    /// success, failure, neutral, cancelled, skipped, timed_out, action_required
    #[serde(default)]
    pub conclusion: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub started_at: Option<String>,
    #[serde(default)]
    pub completed_at: Option<String>,
}

impl CheckRun {
    /// Whether the check finished without a failing conclusion
    pub fn is_passing(&self) -> bool {
        matches!(
            self.conclusion.as_deref(),
            Some("success") | Some("neutral") | Some("skipped")
        )
    }

    pub fn is_pending(&self) -> bool {
        self.status != "completed"
    }
}

/// Envelope of `GET /repos/{owner}/{repo}/commits/{ref}/check-runs`
#[derive(Debug, Clone, Deserialize)]
pub struct CheckRunList {
    pub total_count: u64,
    pub check_runs: Vec<CheckRun>,
}
