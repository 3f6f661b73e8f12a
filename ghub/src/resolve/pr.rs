//! Pull request reference resolution

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::{require_current_branch, ResolveError, ResolveResult};
use crate::git::GitRunner;
use crate::github::{PrListFilter, PullRequestLister};
use crate::types::RepoRef;

static PR_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:https?://)?(?:www\.)?github\.com/([A-Za-z0-9._-]+)/([A-Za-z0-9._-]+)/pull/(\d+)(?:[/?#]\S*)?$",
    )
    .expect("valid regex")
});

static SIGNED_DIGITS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?\d+$").expect("valid regex"));

/// A classified pull request argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrRef {
    /// A PR number; `repo` is set when it came from a URL
    Number { number: u64, repo: Option<RepoRef> },
    /// A head branch name to look up
    Branch(String),
}

/// The outcome of PR resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPr {
    pub number: u64,
    /// Repository named by a PR URL; overrides the caller's repository
    pub repo: Option<RepoRef>,
}

impl ResolvedPr {
    /// The repository to address: the URL's when present, else `fallback`
    pub fn repo_or<'a>(&'a self, fallback: &'a RepoRef) -> &'a RepoRef {
        self.repo.as_ref().unwrap_or(fallback)
    }
}

/// Classify a PR argument
///
/// Returns `None` for input that is neither a canonical number, a PR URL, nor
/// a plausible branch name. Numeric-looking strings that are not canonical
/// (`0123`, `-4`) are rejected rather than treated as branches.
pub fn parse_pr_ref(arg: &str) -> Option<PrRef> {
    if SIGNED_DIGITS_RE.is_match(arg) {
        return arg
            .parse::<u64>()
            .ok()
            .filter(|n| n.to_string() == arg)
            .map(|number| PrRef::Number { number, repo: None });
    }

    if let Some(caps) = PR_URL_RE.captures(arg) {
        let number = caps[3].parse::<u64>().ok()?;
        return Some(PrRef::Number {
            number,
            repo: Some(RepoRef::new(&caps[1], &caps[2])),
        });
    }

    if arg.is_empty() || arg.chars().any(char::is_whitespace) {
        return None;
    }
    Some(PrRef::Branch(arg.to_string()))
}

/// Resolve a PR argument to a number
///
/// With no argument the current branch is used. Branches are looked up as open
/// PRs whose head is `<owner>:<branch>`; the first match wins.
pub async fn resolve_pr_number(
    arg: Option<&str>,
    repo: &RepoRef,
    git: &dyn GitRunner,
    lister: &dyn PullRequestLister,
) -> ResolveResult<ResolvedPr> {
    let branch = match arg {
        None => require_current_branch(git).await?,
        Some(arg) => match parse_pr_ref(arg) {
            Some(PrRef::Number { number, repo }) => return Ok(ResolvedPr { number, repo }),
            Some(PrRef::Branch(branch)) => branch,
            None => {
                return Err(ResolveError::Validation(format!(
                    "Invalid pull request reference: '{}'",
                    arg
                )))
            }
        },
    };

    find_open_pr_for_branch(&branch, repo, lister).await
}

async fn find_open_pr_for_branch(
    branch: &str,
    repo: &RepoRef,
    lister: &dyn PullRequestLister,
) -> ResolveResult<ResolvedPr> {
    let filter = PrListFilter {
        state: Some("open".to_string()),
        head: Some(format!("{}:{}", repo.owner, branch)),
        base: None,
        limit: Some(1),
    };
    let prs = lister.list_pull_requests(repo, &filter).await?;

    match prs.first() {
        Some(pr) => {
            debug!(number = pr.number, branch, "resolved PR from branch");
            Ok(ResolvedPr {
                number: pr.number,
                repo: None,
            })
        }
        None => Err(ResolveError::Lookup(format!(
            "No open PR found for branch '{}'",
            branch
        ))),
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{pull_request, FakeLister};
    use super::*;
    use crate::git::executor::testing::FakeGit;

    fn repo() -> RepoRef {
        RepoRef::new("o", "r")
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(
            parse_pr_ref("123"),
            Some(PrRef::Number {
                number: 123,
                repo: None
            })
        );
        assert_eq!(
            parse_pr_ref("0"),
            Some(PrRef::Number {
                number: 0,
                repo: None
            })
        );
    }

    #[test]
    fn test_parse_non_canonical_numbers_are_invalid() {
        assert_eq!(parse_pr_ref("0123"), None);
        assert_eq!(parse_pr_ref("-4"), None);
        assert_eq!(parse_pr_ref("+4"), None);
        assert_eq!(parse_pr_ref("99999999999999999999999"), None);
    }

    #[test]
    fn test_parse_url() {
        let expected = Some(PrRef::Number {
            number: 9,
            repo: Some(RepoRef::new("x", "y")),
        });
        assert_eq!(parse_pr_ref("https://github.com/x/y/pull/9"), expected);
        assert_eq!(parse_pr_ref("github.com/x/y/pull/9"), expected);
        assert_eq!(parse_pr_ref("https://github.com/x/y/pull/9/files"), expected);
        assert_eq!(parse_pr_ref("https://github.com/x/y/pull/9#discussion"), expected);
    }

    #[test]
    fn test_parse_branch_and_invalid() {
        assert_eq!(
            parse_pr_ref("my-branch"),
            Some(PrRef::Branch("my-branch".to_string()))
        );
        assert_eq!(
            parse_pr_ref("feature/login"),
            Some(PrRef::Branch("feature/login".to_string()))
        );
        assert_eq!(parse_pr_ref("has space"), None);
        assert_eq!(parse_pr_ref(""), None);
    }

    #[tokio::test]
    async fn test_url_skips_lookup() {
        let git = FakeGit::new();
        let lister = FakeLister::with(vec![pull_request(1, "x")]);

        let resolved = resolve_pr_number(Some("https://github.com/x/y/pull/9"), &repo(), &git, &lister)
            .await
            .unwrap();

        assert_eq!(resolved.number, 9);
        assert_eq!(resolved.repo, Some(RepoRef::new("x", "y")));
        assert_eq!(resolved.repo_or(&repo()), &RepoRef::new("x", "y"));
        assert!(lister.calls.lock().unwrap().is_empty());
        assert!(git.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_current_branch_without_open_pr() {
        let git = FakeGit::new().ok("rev-parse --abbrev-ref HEAD", "feat\n");
        let lister = FakeLister::with(vec![]);

        let err = resolve_pr_number(None, &repo(), &git, &lister)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "No open PR found for branch 'feat'");
        let calls = lister.calls.lock().unwrap();
        assert_eq!(calls[0].head.as_deref(), Some("o:feat"));
        assert_eq!(calls[0].state.as_deref(), Some("open"));
    }

    #[tokio::test]
    async fn test_branch_lookup_takes_first_match() {
        let git = FakeGit::new();
        let lister = FakeLister::with(vec![pull_request(7, "topic"), pull_request(3, "topic")]);

        let resolved = resolve_pr_number(Some("topic"), &repo(), &git, &lister)
            .await
            .unwrap();
        assert_eq!(resolved, ResolvedPr { number: 7, repo: None });
    }

    #[tokio::test]
    async fn test_detached_head() {
        let git = FakeGit::new().ok("rev-parse --abbrev-ref HEAD", "HEAD\n");
        let lister = FakeLister::default();

        let err = resolve_pr_number(None, &repo(), &git, &lister)
            .await
            .unwrap_err();
        assert_eq!(err, ResolveError::Lookup("Could not determine current branch".to_string()));
    }

    #[tokio::test]
    async fn test_invalid_reference() {
        let err = resolve_pr_number(Some("0123"), &repo(), &FakeGit::new(), &FakeLister::default())
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "Invalid pull request reference: '0123'");
    }

    #[tokio::test]
    async fn test_lister_failure_is_lookup_error() {
        let err = resolve_pr_number(Some("topic"), &repo(), &FakeGit::new(), &FakeLister::failing())
            .await
            .unwrap_err();
        assert!(!err.is_validation());
        assert!(err.to_string().contains("Server Error"));
    }
}
