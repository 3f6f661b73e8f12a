//! Parameter types for MCP tools
//!
//! `repo` is optional everywhere; when omitted the server detects it from the
//! git checkout it was started in. `fields` limits JSON output to the named
//! keys (comma-separated).

pub mod pr;
pub mod repo;
pub mod run;
pub mod search;

pub use pr::{PrDiffParams, PrListParams, PrRefParams};
pub use repo::{RepoListParams, RepoViewParams};
pub use run::{RunListParams, RunViewParams};
pub use search::{
    SearchCodeParams, SearchCommitsParams, SearchIssuesParams, SearchPrsParams,
    SearchReposParams,
};
