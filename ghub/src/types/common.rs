//! Common types shared across GitHub entities
//!
//! Users, labels and the owner/repo reference used to address a repository.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents a GitHub user (author, assignee, reviewer, etc.)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// GitHub login/username
    pub login: String,

    /// Profile URL
    #[serde(default)]
    pub html_url: Option<String>,

    /// Display name, only present on `GET /user`
    #[serde(default)]
    pub name: Option<String>,
}

/// Represents a GitHub label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    /// Label name
    pub name: String,

    /// Label color (hex without #)
    #[serde(default)]
    pub color: Option<String>,
}

/// Represents a GitHub milestone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    /// Milestone title
    pub title: String,

    /// Milestone number
    pub number: u64,
}

/// An owner/repository pair addressing a GitHub repository
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoRef {
    pub owner: String,
    pub repo: String,
}

impl RepoRef {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}
