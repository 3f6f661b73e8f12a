//! Repository parameter types

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct RepoViewParams {
    #[schemars(description = "Repository in OWNER/REPO format (default: detected from git)")]
    pub repo: Option<String>,
    #[schemars(description = "Comma-separated fields to include in the result")]
    pub fields: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct RepoListParams {
    #[schemars(description = "User or organization (default: the authenticated user)")]
    pub owner: Option<String>,
    #[schemars(description = "Maximum number of repos to return (1-100)")]
    pub limit: Option<u32>,
    #[schemars(description = "Comma-separated fields to include in each result")]
    pub fields: Option<String>,
}
