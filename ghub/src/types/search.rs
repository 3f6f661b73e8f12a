//! Search result type definitions

use super::common::{Label, User};
use serde::{Deserialize, Serialize};

/// Envelope shared by every `/search/*` endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResults<T> {
    pub total_count: u64,
    #[serde(default)]
    pub incomplete_results: bool,
    pub items: Vec<T>,
}

/// Issue or pull request hit from `/search/issues`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueHit {
    pub number: u64,
    pub title: String,
    pub state: String,
    pub user: User,
    #[serde(default)]
    pub labels: Vec<Label>,
    pub html_url: String,
    /// API URL of the containing repository
    pub repository_url: String,
    #[serde(default)]
    pub comments: u64,
    #[serde(default)]
    pub draft: Option<bool>,
    /// Present only when the hit is a pull request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pull_request: Option<serde_json::Value>,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default)]
    pub closed_at: Option<String>,
}

impl IssueHit {
    /// `owner/repo` derived from `repository_url`
    pub fn repository(&self) -> &str {
        self.repository_url
            .split("/repos/")
            .nth(1)
            .unwrap_or(&self.repository_url)
    }
}

/// Commit hit from `/search/commits`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitHit {
    pub sha: String,
    pub html_url: String,
    pub commit: CommitDetail,
    #[serde(default)]
    pub author: Option<User>,
    pub repository: RepositoryName,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitDetail {
    pub message: String,
    #[serde(default)]
    pub author: Option<GitSignature>,
    #[serde(default)]
    pub committer: Option<GitSignature>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GitSignature {
    pub name: String,
    pub email: String,
    pub date: String,
}

/// Code hit from `/search/code`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeHit {
    pub name: String,
    pub path: String,
    pub sha: String,
    pub html_url: String,
    pub repository: RepositoryName,
}

/// Minimal repository shape embedded in commit and code hits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryName {
    pub full_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_hit_repository() {
        let hit: IssueHit = serde_json::from_value(serde_json::json!({
            "number": 4,
            "title": "Crash",
            "state": "open",
            "user": {"login": "octo"},
            "html_url": "https://github.com/o/r/issues/4",
            "repository_url": "https://api.github.com/repos/o/r",
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-02T00:00:00Z"
        }))
        .unwrap();
        assert_eq!(hit.repository(), "o/r");
        assert!(hit.pull_request.is_none());
    }
}
