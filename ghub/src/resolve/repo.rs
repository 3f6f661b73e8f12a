//! Repository reference resolution

use tracing::debug;

use super::{ResolveError, ResolveResult};
use crate::git::{is_git_repository, list_remotes, parse_github_remote_url, GitRunner};
use crate::types::RepoRef;

/// Owner and repository names are limited to GitHub's name charset, so they
/// can be placed into REST paths as they are.
fn is_valid_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
}

/// Parse an explicit `owner/repo` string
pub fn parse_repo_ref(s: &str) -> ResolveResult<RepoRef> {
    let mut parts = s.split('/');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(owner), Some(repo), None) if is_valid_segment(owner) && is_valid_segment(repo) => {
            Ok(RepoRef::new(owner, repo))
        }
        _ => Err(ResolveError::Validation(format!(
            "Invalid repository format: '{}'. Expected 'owner/repo'",
            s
        ))),
    }
}

/// Resolve the target repository
///
/// An explicit value wins. Otherwise the GitHub remote of the current git
/// repository is used: `origin` when it points at GitHub, else the first
/// GitHub remote in `git remote -v` order.
pub async fn resolve_repository(
    explicit: Option<&str>,
    git: &dyn GitRunner,
) -> ResolveResult<RepoRef> {
    if let Some(s) = explicit {
        return parse_repo_ref(s);
    }

    if !is_git_repository(git).await {
        return Err(ResolveError::Lookup(
            "Not a git repository. Use --repo owner/repo to specify a repository".to_string(),
        ));
    }

    let remotes = list_remotes(git).await?;
    if remotes.is_empty() {
        return Err(ResolveError::Lookup(
            "No git remotes found. Use --repo owner/repo to specify a repository".to_string(),
        ));
    }

    let origin = remotes
        .iter()
        .find(|r| r.name == "origin")
        .and_then(|r| parse_github_remote_url(&r.url));
    if let Some(repo) = origin {
        debug!(%repo, "resolved repository from origin");
        return Ok(repo);
    }

    if let Some((name, repo)) = remotes
        .iter()
        .find_map(|r| parse_github_remote_url(&r.url).map(|repo| (&r.name, repo)))
    {
        debug!(%repo, remote = %name, "resolved repository from remote");
        return Ok(repo);
    }

    let names: Vec<&str> = remotes.iter().map(|r| r.name.as_str()).collect();
    Err(ResolveError::Lookup(format!(
        "No GitHub remote found (checked: {}). Use --repo owner/repo to specify a repository",
        names.join(", ")
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::executor::testing::FakeGit;

    #[tokio::test]
    async fn test_explicit_repo() {
        let git = FakeGit::new();
        let repo = resolve_repository(Some("a/b"), &git).await.unwrap();
        assert_eq!(repo, RepoRef::new("a", "b"));
        assert!(git.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_invalid_explicit_repo() {
        for bad in ["abc", "a/b/c", "/b", "a/", ""] {
            let err = parse_repo_ref(bad).unwrap_err();
            assert!(err.is_validation(), "{bad}");
            assert!(err.to_string().starts_with("Invalid repository format"));
        }
    }

    #[test]
    fn test_repo_names_outside_charset_rejected() {
        for bad in ["a?x=1/b", "a b/c", "o/r#frag", "o/r%2F", "ö/r"] {
            let err = parse_repo_ref(bad).unwrap_err();
            assert!(err.is_validation(), "{bad}");
        }
        assert_eq!(
            parse_repo_ref("rust-lang/rust.vim_2").unwrap(),
            RepoRef::new("rust-lang", "rust.vim_2")
        );
    }

    #[tokio::test]
    async fn test_not_a_git_repository() {
        let git = FakeGit::new().fail("rev-parse --git-dir", "fatal: not a git repository");
        let err = resolve_repository(None, &git).await.unwrap_err();
        assert!(err.to_string().starts_with("Not a git repository"));
    }

    #[tokio::test]
    async fn test_no_remotes() {
        let git = FakeGit::repo_with_remotes("");
        let err = resolve_repository(None, &git).await.unwrap_err();
        assert!(err.to_string().starts_with("No git remotes found"));
    }

    #[tokio::test]
    async fn test_origin_preferred() {
        let git = FakeGit::repo_with_remotes(
            "upstream\thttps://github.com/up/proj.git (fetch)\n\
             upstream\thttps://github.com/up/proj.git (push)\n\
             origin\tgit@github.com:me/proj.git (fetch)\n\
             origin\tgit@github.com:me/proj.git (push)\n",
        );
        let repo = resolve_repository(None, &git).await.unwrap();
        assert_eq!(repo, RepoRef::new("me", "proj"));
    }

    #[tokio::test]
    async fn test_falls_back_to_first_github_remote() {
        let git = FakeGit::repo_with_remotes(
            "origin\thttps://gitlab.com/me/proj.git (fetch)\n\
             mirror\thttps://example.com/x.git (fetch)\n\
             gh\thttps://github.com/me/proj (fetch)\n",
        );
        let repo = resolve_repository(None, &git).await.unwrap();
        assert_eq!(repo, RepoRef::new("me", "proj"));
    }

    #[tokio::test]
    async fn test_no_github_remote_lists_checked_names() {
        let git = FakeGit::repo_with_remotes(
            "origin\thttps://gitlab.com/me/proj.git (fetch)\n\
             upstream\thttps://gitlab.com/up/proj.git (fetch)\n",
        );
        let err = resolve_repository(None, &git).await.unwrap_err();
        assert!(err
            .to_string()
            .starts_with("No GitHub remote found (checked: origin, upstream)"));
    }
}
