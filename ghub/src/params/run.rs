//! Workflow run parameter types

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct RunListParams {
    #[schemars(description = "Repository in OWNER/REPO format (default: detected from git)")]
    pub repo: Option<String>,
    #[schemars(description = "Filter by workflow ID or filename")]
    pub workflow: Option<String>,
    #[schemars(description = "Filter by branch")]
    pub branch: Option<String>,
    #[schemars(description = "Filter by status (queued, in_progress, completed, success, failure)")]
    pub status: Option<String>,
    #[schemars(description = "Filter by triggering event (push, pull_request, ...)")]
    pub event: Option<String>,
    #[schemars(description = "Maximum number of runs to return (1-100)")]
    pub limit: Option<u32>,
    #[schemars(description = "Comma-separated fields to include in each result")]
    pub fields: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct RunViewParams {
    #[schemars(description = "Repository in OWNER/REPO format (default: detected from git)")]
    pub repo: Option<String>,
    #[schemars(description = "Run ID or run URL (default: latest run on the current branch)")]
    pub run: Option<String>,
    #[schemars(description = "Comma-separated fields to include in the result")]
    pub fields: Option<String>,
}
