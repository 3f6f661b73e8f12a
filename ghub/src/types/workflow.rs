//! Workflow run type definitions
//!
//! Structs representing GitHub Actions runs and jobs as returned by the REST API.

use serde::{Deserialize, Serialize};

/// Represents a GitHub Actions workflow run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowRun {
    /// Database ID for the run
    pub id: u64,

    /// Run number (sequential within workflow)
    pub run_number: u64,

    /// Workflow name
    #[serde(default)]
    pub name: Option<String>,

    /// Display title (commit message or PR title)
    #[serde(default)]
    pub display_title: Option<String>,

    /// Run status (queued, in_progress, completed)
    pub status: String,

    /// Run conclusion (success, failure, cancelled, etc.)
    #[serde(default)]
    pub conclusion: Option<String>,

    /// Event that triggered the run (push, pull_request, etc.)
    pub event: String,

    /// Branch name
    #[serde(default)]
    pub head_branch: Option<String>,

    /// Commit SHA
    pub head_sha: String,

    /// Run URL on GitHub
    pub html_url: String,

    /// Attempt number, starting at 1
    #[serde(default)]
    pub run_attempt: Option<u64>,

    /// Creation timestamp (ISO 8601)
    pub created_at: String,

    /// Update timestamp (ISO 8601)
    pub updated_at: String,

    /// Start time (ISO 8601)
    #[serde(default)]
    pub run_started_at: Option<String>,
}

impl WorkflowRun {
    /// Conclusion when finished, otherwise the in-flight status
    pub fn outcome(&self) -> &str {
        self.conclusion.as_deref().unwrap_or(&self.status)
    }
}

/// Envelope of `GET /repos/{owner}/{repo}/actions/runs`
#[derive(Debug, Clone, Deserialize)]
pub struct WorkflowRunList {
    pub total_count: u64,
    pub workflow_runs: Vec<WorkflowRun>,
}

/// Represents a job within a workflow run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowJob {
    /// Job ID
    pub id: u64,

    /// Job name
    pub name: String,

    /// Job status
    pub status: String,

    /// Job conclusion
    #[serde(default)]
    pub conclusion: Option<String>,

    #[serde(default)]
    pub started_at: Option<String>,

    #[serde(default)]
    pub completed_at: Option<String>,

    #[serde(default)]
    pub html_url: Option<String>,

    /// Job steps
    #[serde(default)]
    pub steps: Vec<JobStep>,
}

/// Represents a step within a job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobStep {
    pub name: String,
    pub status: String,
    #[serde(default)]
    pub conclusion: Option<String>,
    pub number: u64,
}

/// Envelope of `GET /repos/{owner}/{repo}/actions/runs/{id}/jobs`
#[derive(Debug, Clone, Deserialize)]
pub struct WorkflowJobList {
    pub total_count: u64,
    pub jobs: Vec<WorkflowJob>,
}

/// A run together with its jobs, as shown by `run view`
#[derive(Debug, Clone, Serialize)]
pub struct RunDetail {
    #[serde(flatten)]
    pub run: WorkflowRun,
    pub jobs: Vec<WorkflowJob>,
}
