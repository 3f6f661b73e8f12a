//! Repository type definitions

use super::common::User;
use serde::{Deserialize, Serialize};

/// Represents a GitHub repository
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    /// Repository name
    pub name: String,

    /// `owner/name`
    pub full_name: String,

    /// Repository owner
    pub owner: User,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub private: bool,

    #[serde(default)]
    pub fork: bool,

    #[serde(default)]
    pub archived: bool,

    /// public, private, internal
    #[serde(default)]
    pub visibility: Option<String>,

    pub html_url: String,

    #[serde(default)]
    pub default_branch: Option<String>,

    /// Primary language
    #[serde(default)]
    pub language: Option<String>,

    #[serde(default)]
    pub stargazers_count: u64,

    #[serde(default)]
    pub forks_count: u64,

    #[serde(default)]
    pub open_issues_count: u64,

    #[serde(default)]
    pub topics: Vec<String>,

    #[serde(default)]
    pub license: Option<License>,

    #[serde(default)]
    pub created_at: Option<String>,

    #[serde(default)]
    pub updated_at: Option<String>,

    #[serde(default)]
    pub pushed_at: Option<String>,
}

/// License summary attached to a repository
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct License {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub spdx_id: Option<String>,
}
