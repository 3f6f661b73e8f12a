//! Workflow run reference resolution

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::{require_current_branch, ResolveError, ResolveResult};
use crate::git::GitRunner;
use crate::github::{RunListFilter, WorkflowRunLister};
use crate::types::RepoRef;

static RUN_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:https?://)?(?:www\.)?github\.com/([A-Za-z0-9._-]+)/([A-Za-z0-9._-]+)/actions/runs/(\d+)(?:[/?#]\S*)?$",
    )
    .expect("valid regex")
});

/// A workflow run id, optionally with the repository named by a run URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRef {
    pub id: u64,
    pub repo: Option<RepoRef>,
}

/// The run to act on
pub type ResolvedRun = RunRef;

impl RunRef {
    pub fn repo_or<'a>(&'a self, fallback: &'a RepoRef) -> &'a RepoRef {
        self.repo.as_ref().unwrap_or(fallback)
    }
}

/// Parse a run id or run URL
pub fn parse_run_ref(arg: &str) -> Option<RunRef> {
    if let Ok(id) = arg.parse::<u64>() {
        if id.to_string() == arg {
            return Some(RunRef { id, repo: None });
        }
        return None;
    }
    let caps = RUN_URL_RE.captures(arg)?;
    Some(RunRef {
        id: caps[3].parse().ok()?,
        repo: Some(RepoRef::new(&caps[1], &caps[2])),
    })
}

/// Resolve a run argument, defaulting to the latest run on the current branch
pub async fn resolve_run_id(
    arg: Option<&str>,
    repo: &RepoRef,
    git: &dyn GitRunner,
    lister: &dyn WorkflowRunLister,
) -> ResolveResult<ResolvedRun> {
    if let Some(arg) = arg {
        return parse_run_ref(arg).ok_or_else(|| {
            ResolveError::Validation(format!("Invalid run reference: '{}'", arg))
        });
    }

    let branch = require_current_branch(git).await?;
    let filter = RunListFilter {
        branch: Some(branch.clone()),
        limit: Some(1),
        ..Default::default()
    };
    let runs = lister.list_workflow_runs(repo, &filter).await?;

    match runs.first() {
        Some(run) => {
            debug!(run_id = run.id, %branch, "resolved latest run for branch");
            Ok(RunRef {
                id: run.id,
                repo: None,
            })
        }
        None => Err(ResolveError::Lookup(format!(
            "No workflow runs found for branch '{}'",
            branch
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::executor::testing::FakeGit;
    use crate::github::GitHubResult;
    use crate::types::WorkflowRun;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeRuns {
        ids: Vec<u64>,
        calls: Mutex<Vec<RunListFilter>>,
    }

    #[async_trait]
    impl WorkflowRunLister for FakeRuns {
        async fn list_workflow_runs(
            &self,
            _repo: &RepoRef,
            filter: &RunListFilter,
        ) -> GitHubResult<Vec<WorkflowRun>> {
            self.calls.lock().unwrap().push(filter.clone());
            Ok(self
                .ids
                .iter()
                .map(|&id| WorkflowRun {
                    id,
                    run_number: 1,
                    name: Some("CI".to_string()),
                    display_title: None,
                    status: "completed".to_string(),
                    conclusion: Some("success".to_string()),
                    event: "push".to_string(),
                    head_branch: Some("feat".to_string()),
                    head_sha: "abc".to_string(),
                    html_url: format!("https://github.com/o/r/actions/runs/{}", id),
                    run_attempt: None,
                    created_at: "2024-01-01T00:00:00Z".to_string(),
                    updated_at: "2024-01-01T00:00:00Z".to_string(),
                    run_started_at: None,
                })
                .collect())
        }
    }

    #[test]
    fn test_parse_run_ref() {
        assert_eq!(parse_run_ref("42"), Some(RunRef { id: 42, repo: None }));
        assert_eq!(
            parse_run_ref("https://github.com/x/y/actions/runs/77/job/1"),
            Some(RunRef {
                id: 77,
                repo: Some(RepoRef::new("x", "y"))
            })
        );
        assert_eq!(parse_run_ref("042"), None);
        assert_eq!(parse_run_ref("latest"), None);
    }

    #[tokio::test]
    async fn test_explicit_run_skips_lookup() {
        let runs = FakeRuns::default();
        let run = resolve_run_id(Some("42"), &RepoRef::new("o", "r"), &FakeGit::new(), &runs)
            .await
            .unwrap();
        assert_eq!(run.id, 42);
        assert!(runs.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_latest_run_for_branch() {
        let git = FakeGit::new().ok("rev-parse --abbrev-ref HEAD", "feat\n");
        let runs = FakeRuns {
            ids: vec![900, 800],
            ..Default::default()
        };
        let run = resolve_run_id(None, &RepoRef::new("o", "r"), &git, &runs)
            .await
            .unwrap();
        assert_eq!(run.id, 900);
        assert_eq!(runs.calls.lock().unwrap()[0].branch.as_deref(), Some("feat"));
    }

    #[tokio::test]
    async fn test_no_runs_for_branch() {
        let git = FakeGit::new().ok("rev-parse --abbrev-ref HEAD", "feat\n");
        let err = resolve_run_id(None, &RepoRef::new("o", "r"), &git, &FakeRuns::default())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "No workflow runs found for branch 'feat'");
    }

    #[tokio::test]
    async fn test_invalid_run_reference() {
        let err = resolve_run_id(Some("abc"), &RepoRef::new("o", "r"), &FakeGit::new(), &FakeRuns::default())
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }
}
