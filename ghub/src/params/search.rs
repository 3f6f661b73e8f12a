//! Search parameter types
//!
//! Filters are the same structs the CLI uses, flattened into the tool input.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::search::{
    CodeSearchFilters, CommitSearchFilters, IssueSearchFilters, PrSearchFilters,
    RepoSearchFilters, SearchOptions,
};

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct SearchReposParams {
    #[serde(flatten)]
    pub filters: RepoSearchFilters,
    #[serde(flatten)]
    pub options: SearchOptions,
    #[schemars(description = "Comma-separated fields to include in each result")]
    pub fields: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct SearchIssuesParams {
    #[serde(flatten)]
    pub filters: IssueSearchFilters,
    #[serde(flatten)]
    pub options: SearchOptions,
    #[schemars(description = "Comma-separated fields to include in each result")]
    pub fields: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct SearchPrsParams {
    #[serde(flatten)]
    pub filters: PrSearchFilters,
    #[serde(flatten)]
    pub options: SearchOptions,
    #[schemars(description = "Comma-separated fields to include in each result")]
    pub fields: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct SearchCommitsParams {
    #[serde(flatten)]
    pub filters: CommitSearchFilters,
    #[serde(flatten)]
    pub options: SearchOptions,
    #[schemars(description = "Comma-separated fields to include in each result")]
    pub fields: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct SearchCodeParams {
    #[serde(flatten)]
    pub filters: CodeSearchFilters,
    #[serde(flatten)]
    pub options: SearchOptions,
    #[schemars(description = "Comma-separated fields to include in each result")]
    pub fields: Option<String>,
}
