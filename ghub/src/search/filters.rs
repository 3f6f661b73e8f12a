//! Typed search filters, one struct per search kind
//!
//! The same structs back the CLI flags (clap) and the MCP tool parameters
//! (serde + schemars). Free text lives in `query`; the CLI fills it from
//! positional words.

use clap::{Args, ValueEnum};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How forks are treated in repository search
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ForkFilter {
    /// Include forks alongside sources (`fork:true`)
    True,
    /// Only forks (`fork:only`)
    Only,
}

impl ForkFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            ForkFilter::True => "true",
            ForkFilter::Only => "only",
        }
    }
}

/// Filters for `/search/repositories`
#[derive(Debug, Clone, Default, PartialEq, Args, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct RepoSearchFilters {
    /// Free-text keywords
    #[arg(skip)]
    pub query: Option<String>,
    /// Filter by owner (repeatable)
    #[arg(long)]
    pub owner: Vec<String>,
    /// Filter by primary language
    #[arg(long)]
    pub language: Option<String>,
    /// Filter by topic (repeatable)
    #[arg(long)]
    pub topic: Vec<String>,
    /// Star count, e.g. ">100" or "10..50"
    #[arg(long)]
    pub stars: Option<String>,
    /// Fork count
    #[arg(long)]
    pub forks: Option<String>,
    /// Size in kilobytes
    #[arg(long)]
    pub size: Option<String>,
    /// Follower count
    #[arg(long)]
    pub followers: Option<String>,
    /// Number of topics
    #[arg(long)]
    pub number_topics: Option<String>,
    /// Number of issues labeled good-first-issue
    #[arg(long)]
    pub good_first_issues: Option<String>,
    /// Number of issues labeled help-wanted
    #[arg(long)]
    pub help_wanted_issues: Option<String>,
    /// Creation date
    #[arg(long)]
    pub created: Option<String>,
    /// Last push date
    #[arg(long)]
    pub updated: Option<String>,
    /// License keyword, e.g. "mit"
    #[arg(long)]
    pub license: Option<String>,
    /// Visibility: public, private, internal (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub visibility: Vec<String>,
    /// Archived state
    #[arg(long)]
    pub archived: Option<bool>,
    /// Include forks in results
    #[arg(long, value_enum)]
    pub include_forks: Option<ForkFilter>,
    /// Restrict match to name, description, readme (comma-separated)
    #[arg(long = "match", value_delimiter = ',')]
    #[serde(rename = "match")]
    pub match_in: Vec<String>,
}

/// Filters for issue search (`/search/issues` with `type:issue`)
#[derive(Debug, Clone, Default, PartialEq, Args, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct IssueSearchFilters {
    /// Free-text keywords
    #[arg(skip)]
    pub query: Option<String>,
    /// Filter by repository in OWNER/REPO format (repeatable)
    #[arg(long)]
    pub repo: Vec<String>,
    /// Filter by owner (repeatable)
    #[arg(long)]
    pub owner: Vec<String>,
    /// Filter by author
    #[arg(long)]
    pub author: Option<String>,
    /// Filter by assignee
    #[arg(long)]
    pub assignee: Option<String>,
    /// Filter by mentioned user
    #[arg(long)]
    pub mentions: Option<String>,
    /// Filter by commenter
    #[arg(long)]
    pub commenter: Option<String>,
    /// Filter by involved user
    #[arg(long)]
    pub involves: Option<String>,
    /// Filter by label (repeatable)
    #[arg(long)]
    pub label: Vec<String>,
    /// open or closed
    #[arg(long)]
    pub state: Option<String>,
    /// Milestone title
    #[arg(long)]
    pub milestone: Option<String>,
    /// Repository language
    #[arg(long)]
    pub language: Option<String>,
    /// Creation date
    #[arg(long)]
    pub created: Option<String>,
    /// Last update date
    #[arg(long)]
    pub updated: Option<String>,
    /// Close date
    #[arg(long)]
    pub closed: Option<String>,
    /// Comment count
    #[arg(long)]
    pub comments: Option<String>,
    /// Reaction count
    #[arg(long)]
    pub reactions: Option<String>,
    /// Reactions plus comments
    #[arg(long)]
    pub interactions: Option<String>,
    /// Authored by a GitHub App
    #[arg(long)]
    pub app: Option<String>,
    /// Mentioned team
    #[arg(long)]
    pub team_mentions: Option<String>,
    /// Repository visibility: public, private, internal (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub visibility: Vec<String>,
    /// Repository archived state
    #[arg(long)]
    pub archived: Option<bool>,
    /// Only locked conversations
    #[arg(long)]
    pub locked: bool,
    /// Only items without labels
    #[arg(long)]
    pub no_label: bool,
    /// Only unassigned items
    #[arg(long)]
    pub no_assignee: bool,
    /// Only items without a milestone
    #[arg(long)]
    pub no_milestone: bool,
    /// Restrict match to title, body, comments (comma-separated)
    #[arg(long = "match", value_delimiter = ',')]
    #[serde(rename = "match")]
    pub match_in: Vec<String>,
    /// Include pull requests in the results
    #[arg(long)]
    pub include_prs: bool,
}

/// Filters for pull request search (`/search/issues` with `type:pr`)
#[derive(Debug, Clone, Default, PartialEq, Args, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct PrSearchFilters {
    /// Free-text keywords
    #[arg(skip)]
    pub query: Option<String>,
    /// Filter by repository in OWNER/REPO format (repeatable)
    #[arg(long)]
    pub repo: Vec<String>,
    /// Filter by owner (repeatable)
    #[arg(long)]
    pub owner: Vec<String>,
    /// Filter by author
    #[arg(long)]
    pub author: Option<String>,
    /// Filter by assignee
    #[arg(long)]
    pub assignee: Option<String>,
    /// Filter by mentioned user
    #[arg(long)]
    pub mentions: Option<String>,
    /// Filter by commenter
    #[arg(long)]
    pub commenter: Option<String>,
    /// Filter by involved user
    #[arg(long)]
    pub involves: Option<String>,
    /// Filter by label (repeatable)
    #[arg(long)]
    pub label: Vec<String>,
    /// open or closed
    #[arg(long)]
    pub state: Option<String>,
    /// Milestone title
    #[arg(long)]
    pub milestone: Option<String>,
    /// Repository language
    #[arg(long)]
    pub language: Option<String>,
    /// Creation date
    #[arg(long)]
    pub created: Option<String>,
    /// Last update date
    #[arg(long)]
    pub updated: Option<String>,
    /// Close date
    #[arg(long)]
    pub closed: Option<String>,
    /// Comment count
    #[arg(long)]
    pub comments: Option<String>,
    /// Reaction count
    #[arg(long)]
    pub reactions: Option<String>,
    /// Reactions plus comments
    #[arg(long)]
    pub interactions: Option<String>,
    /// Authored by a GitHub App
    #[arg(long)]
    pub app: Option<String>,
    /// Mentioned team
    #[arg(long)]
    pub team_mentions: Option<String>,
    /// Repository visibility: public, private, internal (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub visibility: Vec<String>,
    /// Repository archived state
    #[arg(long)]
    pub archived: Option<bool>,
    /// Only locked conversations
    #[arg(long)]
    pub locked: bool,
    /// Only PRs without labels
    #[arg(long)]
    pub no_label: bool,
    /// Only unassigned PRs
    #[arg(long)]
    pub no_assignee: bool,
    /// Only PRs without a milestone
    #[arg(long)]
    pub no_milestone: bool,
    /// Restrict match to title, body, comments (comma-separated)
    #[arg(long = "match", value_delimiter = ',')]
    #[serde(rename = "match")]
    pub match_in: Vec<String>,
    /// Base branch name
    #[arg(long)]
    pub base: Option<String>,
    /// Head branch name
    #[arg(long)]
    pub head: Option<String>,
    /// Draft state
    #[arg(long)]
    pub draft: Option<bool>,
    /// true for merged, false for unmerged
    #[arg(long)]
    pub merged: Option<bool>,
    /// Merge date
    #[arg(long)]
    pub merged_at: Option<String>,
    /// Review status: none, required, approved, changes_requested
    #[arg(long)]
    pub review: Option<String>,
    /// Reviewed by user
    #[arg(long)]
    pub reviewed_by: Option<String>,
    /// Review requested from user
    #[arg(long)]
    pub review_requested: Option<String>,
    /// Review requested from team
    #[arg(long)]
    pub team_review_requested: Option<String>,
    /// Check status: pending, success, failure
    #[arg(long)]
    pub checks: Option<String>,
}

/// Filters for `/search/commits`
#[derive(Debug, Clone, Default, PartialEq, Args, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct CommitSearchFilters {
    /// Free-text keywords
    #[arg(skip)]
    pub query: Option<String>,
    /// Filter by repository in OWNER/REPO format (repeatable)
    #[arg(long)]
    pub repo: Vec<String>,
    /// Filter by owner (repeatable)
    #[arg(long)]
    pub owner: Vec<String>,
    /// Author login
    #[arg(long)]
    pub author: Option<String>,
    /// Committer login
    #[arg(long)]
    pub committer: Option<String>,
    /// Author name
    #[arg(long)]
    pub author_name: Option<String>,
    /// Author email
    #[arg(long)]
    pub author_email: Option<String>,
    /// Authored date
    #[arg(long)]
    pub author_date: Option<String>,
    /// Committer name
    #[arg(long)]
    pub committer_name: Option<String>,
    /// Committer email
    #[arg(long)]
    pub committer_email: Option<String>,
    /// Committed date
    #[arg(long)]
    pub committer_date: Option<String>,
    /// Commit hash
    #[arg(long)]
    pub hash: Option<String>,
    /// Parent hash
    #[arg(long)]
    pub parent: Option<String>,
    /// Tree hash
    #[arg(long)]
    pub tree: Option<String>,
    /// Merge commits only (true) or exclude them (false)
    #[arg(long)]
    pub merge: Option<bool>,
    /// Repository visibility: public, private, internal (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub visibility: Vec<String>,
}

/// Filters for `/search/code`
#[derive(Debug, Clone, Default, PartialEq, Args, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct CodeSearchFilters {
    /// Free-text keywords
    #[arg(skip)]
    pub query: Option<String>,
    /// Filter by repository in OWNER/REPO format (repeatable)
    #[arg(long)]
    pub repo: Vec<String>,
    /// Filter by owner (repeatable)
    #[arg(long)]
    pub owner: Vec<String>,
    /// Language
    #[arg(long)]
    pub language: Option<String>,
    /// File name
    #[arg(long)]
    pub filename: Option<String>,
    /// File extension
    #[arg(long)]
    pub extension: Option<String>,
    /// File size in kilobytes
    #[arg(long)]
    pub size: Option<String>,
    /// Restrict match to file, path (comma-separated)
    #[arg(long = "match", value_delimiter = ',')]
    #[serde(rename = "match")]
    pub match_in: Vec<String>,
}

/// API parameters that accompany a search query
#[derive(Debug, Clone, Default, PartialEq, Args, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SearchOptions {
    /// Sort field (e.g. stars, updated, comments)
    #[arg(long)]
    pub sort: Option<String>,
    /// Sort order: asc or desc
    #[arg(long)]
    pub order: Option<String>,
    /// Maximum number of results (1-100)
    #[arg(short = 'L', long)]
    pub limit: Option<u32>,
}
