//! Git remote listing and GitHub URL parsing

use regex::Regex;
use std::sync::LazyLock;

use super::error::GitResult;
use super::executor::GitRunner;
use crate::types::RepoRef;

static GITHUB_HTTPS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https://github\.com/([^/]+)/([^/]+?)(?:\.git)?$").expect("valid regex")
});

static GITHUB_SSH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^git@github\.com:([^/]+)/([^/]+?)(?:\.git)?$").expect("valid regex")
});

/// A named git remote with its fetch URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Remote {
    pub name: String,
    pub url: String,
}

/// Parse `git remote -v` output into remotes, keeping first-seen order.
///
/// Lines look like `origin\thttps://github.com/o/r.git (fetch)`. Each remote
/// appears twice (fetch and push); the first URL seen wins.
pub fn parse_remotes(output: &str) -> Vec<Remote> {
    let mut remotes: Vec<Remote> = Vec::new();

    for line in output.lines() {
        let Some((name, rest)) = line.split_once('\t') else {
            continue;
        };
        let url = rest
            .trim()
            .trim_end_matches("(fetch)")
            .trim_end_matches("(push)")
            .trim();
        if name.is_empty() || url.is_empty() {
            continue;
        }
        if remotes.iter().any(|r| r.name == name) {
            continue;
        }
        remotes.push(Remote {
            name: name.to_string(),
            url: url.to_string(),
        });
    }

    remotes
}

/// List the remotes of the current repository
pub async fn list_remotes(git: &dyn GitRunner) -> GitResult<Vec<Remote>> {
    let output = git.run(&["remote", "-v"]).await?;
    Ok(parse_remotes(&output))
}

/// Extract owner/repo from a GitHub HTTPS or SSH remote URL.
///
/// Only a trailing `.git` is stripped, so repository names containing dots
/// survive intact.
pub fn parse_github_remote_url(url: &str) -> Option<RepoRef> {
    let url = url.trim();
    let captures = GITHUB_HTTPS_RE
        .captures(url)
        .or_else(|| GITHUB_SSH_RE.captures(url))?;

    let owner = captures.get(1)?.as_str();
    let repo = captures.get(2)?.as_str();
    if owner.is_empty() || repo.is_empty() {
        return None;
    }
    Some(RepoRef::new(owner, repo))
}
