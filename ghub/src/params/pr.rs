//! Pull request parameter types

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct PrListParams {
    #[schemars(description = "Repository in OWNER/REPO format (default: detected from git)")]
    pub repo: Option<String>,
    #[schemars(description = "PR state filter (open, closed, all). Default: open")]
    pub state: Option<String>,
    #[schemars(description = "Filter by head branch (BRANCH or OWNER:BRANCH)")]
    pub head: Option<String>,
    #[schemars(description = "Filter by base branch")]
    pub base: Option<String>,
    #[schemars(description = "Maximum number of PRs to return (1-100)")]
    pub limit: Option<u32>,
    #[schemars(description = "Comma-separated fields to include in each result")]
    pub fields: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct PrRefParams {
    #[schemars(description = "Repository in OWNER/REPO format (default: detected from git)")]
    pub repo: Option<String>,
    #[schemars(
        description = "PR number, PR URL or head branch name (default: the current branch's open PR)"
    )]
    pub pr: Option<String>,
    #[schemars(description = "Comma-separated fields to include in the result")]
    pub fields: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct PrDiffParams {
    #[schemars(description = "Repository in OWNER/REPO format (default: detected from git)")]
    pub repo: Option<String>,
    #[schemars(
        description = "PR number, PR URL or head branch name (default: the current branch's open PR)"
    )]
    pub pr: Option<String>,
}
