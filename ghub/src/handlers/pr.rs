//! Pull request handlers

use anyhow::Result;
use tracing::{debug, warn};

use super::CommandContext;
use crate::cli::PrCommands;
use crate::git::{commits_since, CommitMessage};
use crate::github::{MergeMethod, PrListFilter};
use crate::output::{ChecksSummary, CommandResult};
use crate::resolve::{parse_pr_ref, require_current_branch, resolve_pr_number, PrRef};
use crate::types::{MergeResult, NewPullRequest, PullRequest, RepoRef};

/// Inputs for [`create_pr`]; unset fields are derived from git and the repo
#[derive(Debug, Clone, Default)]
pub struct CreatePr {
    pub title: Option<String>,
    pub body: Option<String>,
    pub base: Option<String>,
    pub head: Option<String>,
    pub draft: bool,
}

/// Qualify a bare head branch with the repository owner
fn qualify_head(head: &str, repo: &RepoRef) -> String {
    if head.contains(':') {
        head.to_string()
    } else {
        format!("{}:{}", repo.owner, head)
    }
}

pub async fn list_prs(
    ctx: &CommandContext,
    repo: Option<&str>,
    mut filter: PrListFilter,
) -> Result<Vec<PullRequest>> {
    let repo = ctx.repo(repo).await?;
    filter.head = filter.head.map(|h| qualify_head(&h, &repo));
    filter.limit = ctx.limit(filter.limit);
    Ok(ctx.client().await?.list_pulls(&repo, &filter).await?)
}

/// Resolve the repository and PR number a command targets
///
/// A PR URL overrides the repository from `--repo` or git, and skips remote
/// detection entirely.
pub async fn resolve_target(
    ctx: &CommandContext,
    repo: Option<&str>,
    pr: Option<&str>,
) -> Result<(RepoRef, u64)> {
    let repo = match pr.and_then(parse_pr_ref) {
        Some(PrRef::Number {
            repo: Some(url_repo),
            ..
        }) => url_repo,
        _ => ctx.repo(repo).await?,
    };
    let client = ctx.client().await?;
    let resolved = resolve_pr_number(pr, &repo, ctx.git(), client).await?;
    let target = resolved.repo_or(&repo).clone();
    debug!(repo = %target, number = resolved.number, "resolved pull request");
    Ok((target, resolved.number))
}

pub async fn view_pr(ctx: &CommandContext, repo: Option<&str>, pr: Option<&str>) -> Result<PullRequest> {
    let (repo, number) = resolve_target(ctx, repo, pr).await?;
    Ok(ctx.client().await?.get_pull(&repo, number).await?)
}

pub async fn pr_diff(ctx: &CommandContext, repo: Option<&str>, pr: Option<&str>) -> Result<String> {
    let (repo, number) = resolve_target(ctx, repo, pr).await?;
    Ok(ctx.client().await?.get_pull_diff(&repo, number).await?)
}

/// Check runs on the PR's head commit
pub async fn pr_checks(
    ctx: &CommandContext,
    repo: Option<&str>,
    pr: Option<&str>,
) -> Result<ChecksSummary> {
    let (repo, number) = resolve_target(ctx, repo, pr).await?;
    let client = ctx.client().await?;
    let pull = client.get_pull(&repo, number).await?;
    let checks = client.list_check_runs(&repo, &pull.head.sha).await?;
    Ok(ChecksSummary { number, checks })
}

pub async fn create_pr(ctx: &CommandContext, repo: Option<&str>, opts: CreatePr) -> Result<PullRequest> {
    let repo = ctx.repo(repo).await?;
    let client = ctx.client().await?;

    let head = match opts.head {
        Some(head) => head,
        None => require_current_branch(ctx.git()).await?,
    };
    let base = match opts.base {
        Some(base) => base,
        None => client
            .get_repo(&repo)
            .await?
            .default_branch
            .unwrap_or_else(|| "main".to_string()),
    };

    let (title, body) = match (opts.title, opts.body) {
        (Some(title), body) => (title, body),
        (None, body) => {
            let commits = match commits_since(ctx.git(), &base).await {
                Ok(commits) => commits,
                Err(e) => {
                    warn!("Could not read commits since {}: {}", base, e);
                    Vec::new()
                }
            };
            let (title, default_body) = default_title_body(&head, &commits);
            (title, body.or(default_body))
        }
    };

    let pull = NewPullRequest {
        title,
        head,
        base,
        body,
        draft: opts.draft,
    };
    Ok(client.create_pull(&repo, &pull).await?)
}

/// Title and body derived from the commits on a branch
///
/// One commit supplies both; several give the branch name as title and a
/// bullet list of subjects as body.
pub fn default_title_body(branch: &str, commits: &[CommitMessage]) -> (String, Option<String>) {
    match commits {
        [] => (branch.to_string(), None),
        [only] => {
            let body = only.body.trim();
            (
                only.subject.clone(),
                (!body.is_empty()).then(|| body.to_string()),
            )
        }
        many => {
            let bullets: Vec<String> = many.iter().map(|c| format!("- {}", c.subject)).collect();
            (branch.to_string(), Some(bullets.join("\n")))
        }
    }
}

pub async fn merge_pr(
    ctx: &CommandContext,
    repo: Option<&str>,
    pr: Option<&str>,
    method: MergeMethod,
) -> Result<MergeResult> {
    let (repo, number) = resolve_target(ctx, repo, pr).await?;
    Ok(ctx.client().await?.merge_pull(&repo, number, method).await?)
}

/// Entry point for `ghub pr ...`
pub async fn run_pr_command(ctx: &CommandContext, cmd: PrCommands) -> Result<CommandResult> {
    match cmd {
        PrCommands::List {
            target,
            state,
            head,
            base,
            limit,
        } => {
            let filter = PrListFilter {
                state: Some(state),
                head,
                base,
                limit,
            };
            let prs = list_prs(ctx, target.repo.as_deref(), filter).await?;
            ctx.render(&prs)
        }
        PrCommands::View { pr, target } => {
            let pull = view_pr(ctx, target.repo.as_deref(), pr.as_deref()).await?;
            ctx.render(&pull)
        }
        PrCommands::Diff { pr, target } => {
            let diff = pr_diff(ctx, target.repo.as_deref(), pr.as_deref()).await?;
            Ok(CommandResult::success(diff))
        }
        PrCommands::Checks { pr, target } => {
            let summary = pr_checks(ctx, target.repo.as_deref(), pr.as_deref()).await?;
            let (_, failing, _) = summary.counts();
            let mut result = ctx.render(&summary)?;
            if failing > 0 {
                result.exit_code = 1;
            }
            Ok(result)
        }
        PrCommands::Create {
            target,
            title,
            body,
            base,
            head,
            draft,
        } => {
            let opts = CreatePr {
                title,
                body,
                base,
                head,
                draft,
            };
            let pull = create_pr(ctx, target.repo.as_deref(), opts).await?;
            Ok(CommandResult::success(format!("{}\n", pull.html_url)).with_stderr(format!(
                "Created pull request #{}",
                pull.number
            )))
        }
        PrCommands::Merge {
            pr,
            target,
            squash,
            rebase,
        } => {
            let method = if squash {
                MergeMethod::Squash
            } else if rebase {
                MergeMethod::Rebase
            } else {
                MergeMethod::Merge
            };
            let result = merge_pr(ctx, target.repo.as_deref(), pr.as_deref(), method).await?;
            let mut out = ctx.render(&result)?;
            if !result.merged {
                out.exit_code = 1;
            }
            Ok(out)
        }
    }
}
