//! GitHub search: typed filters and qualifier query builders

pub mod filters;
pub mod query;

pub use filters::{
    CodeSearchFilters, CommitSearchFilters, ForkFilter, IssueSearchFilters, PrSearchFilters,
    RepoSearchFilters, SearchOptions,
};
pub use query::{
    build_code_query, build_commit_query, build_issue_query, build_pr_query, build_repo_query,
};

/// Which `/search/*` endpoint a query targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    Repositories,
    Issues,
    PullRequests,
    Commits,
    Code,
}

impl SearchKind {
    /// Path segment under `/search/`; PRs share the issues endpoint
    pub fn endpoint(&self) -> &'static str {
        match self {
            SearchKind::Repositories => "repositories",
            SearchKind::Issues | SearchKind::PullRequests => "issues",
            SearchKind::Commits => "commits",
            SearchKind::Code => "code",
        }
    }
}
