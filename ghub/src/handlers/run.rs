//! Workflow run handlers

use anyhow::Result;

use super::CommandContext;
use crate::cli::RunCommands;
use crate::github::RunListFilter;
use crate::output::CommandResult;
use crate::resolve::{parse_run_ref, resolve_run_id};
use crate::types::{RepoRef, RunDetail, WorkflowRun};

pub async fn list_runs(
    ctx: &CommandContext,
    repo: Option<&str>,
    mut filter: RunListFilter,
) -> Result<Vec<WorkflowRun>> {
    let repo = ctx.repo(repo).await?;
    filter.limit = ctx.limit(filter.limit);
    Ok(ctx.client().await?.list_runs(&repo, &filter).await?)
}

/// Repository and run id a command targets; a run URL overrides the repository
pub async fn resolve_target(
    ctx: &CommandContext,
    repo: Option<&str>,
    run: Option<&str>,
) -> Result<(RepoRef, u64)> {
    let repo = match run.and_then(parse_run_ref).and_then(|r| r.repo) {
        Some(url_repo) => url_repo,
        None => ctx.repo(repo).await?,
    };
    let client = ctx.client().await?;
    let resolved = resolve_run_id(run, &repo, ctx.git(), client).await?;
    Ok((resolved.repo_or(&repo).clone(), resolved.id))
}

/// A run with its jobs
pub async fn view_run(ctx: &CommandContext, repo: Option<&str>, run: Option<&str>) -> Result<RunDetail> {
    let (repo, id) = resolve_target(ctx, repo, run).await?;
    let client = ctx.client().await?;
    let run = client.get_run(&repo, id).await?;
    let jobs = client.list_run_jobs(&repo, id).await?;
    Ok(RunDetail { run, jobs })
}

/// Entry point for `ghub run ...`
pub async fn run_run_command(ctx: &CommandContext, cmd: RunCommands) -> Result<CommandResult> {
    match cmd {
        RunCommands::List {
            target,
            workflow,
            branch,
            status,
            event,
            limit,
        } => {
            let filter = RunListFilter {
                workflow,
                branch,
                status,
                event,
                limit,
            };
            ctx.render(&list_runs(ctx, target.repo.as_deref(), filter).await?)
        }
        RunCommands::View { run, target } => {
            ctx.render(&view_run(ctx, target.repo.as_deref(), run.as_deref()).await?)
        }
        RunCommands::Rerun {
            run,
            target,
            failed,
        } => {
            let (repo, id) = resolve_target(ctx, target.repo.as_deref(), run.as_deref()).await?;
            ctx.client().await?.rerun(&repo, id, failed).await?;
            let what = if failed { "failed jobs of run" } else { "run" };
            Ok(CommandResult::success(format!(
                "{} Requested rerun of {} {}\n",
                ctx.printer.style().success_mark(),
                what,
                id
            )))
        }
        RunCommands::Cancel { run, target } => {
            let (repo, id) = resolve_target(ctx, target.repo.as_deref(), run.as_deref()).await?;
            ctx.client().await?.cancel_run(&repo, id).await?;
            Ok(CommandResult::success(format!(
                "{} Requested cancellation of run {}\n",
                ctx.printer.style().success_mark(),
                id
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::executor::testing::FakeGit;
    use crate::handlers::testing::context;
    use crate::output::OutputFormat;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn run_json(id: u64) -> serde_json::Value {
        json!({
            "id": id,
            "run_number": 4,
            "name": "CI",
            "display_title": "Fix build",
            "status": "completed",
            "conclusion": "failure",
            "event": "push",
            "head_branch": "feat",
            "head_sha": "0123456789abcdef",
            "html_url": format!("https://github.com/o/r/actions/runs/{}", id),
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:05:00Z"
        })
    }

    #[tokio::test]
    async fn test_view_latest_run_on_branch() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/o/r/actions/runs"))
            .and(query_param("branch", "feat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "total_count": 1,
                "workflow_runs": [run_json(55)]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/repos/o/r/actions/runs/55"))
            .respond_with(ResponseTemplate::new(200).set_body_json(run_json(55)))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/repos/o/r/actions/runs/55/jobs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "total_count": 1,
                "jobs": [{
                    "id": 1,
                    "name": "test",
                    "status": "completed",
                    "conclusion": "failure",
                    "steps": [
                        {"name": "checkout", "status": "completed", "conclusion": "success", "number": 1},
                        {"name": "cargo test", "status": "completed", "conclusion": "failure", "number": 2}
                    ]
                }]
            })))
            .mount(&server)
            .await;

        let git = FakeGit::new().ok("rev-parse --abbrev-ref HEAD", "feat\n");
        let ctx = context(&server.uri(), git, OutputFormat::Text);
        let result = run_run_command(
            &ctx,
            RunCommands::View {
                run: None,
                target: crate::cli::RepoArg {
                    repo: Some("o/r".to_string()),
                },
            },
        )
        .await
        .unwrap();

        assert!(result.stdout.contains("failure test"));
        assert!(result.stdout.contains("failure cargo test"));
        assert!(!result.stdout.contains("checkout"));
    }

    #[tokio::test]
    async fn test_view_run_url_outside_checkout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/x/y/actions/runs/77"))
            .respond_with(ResponseTemplate::new(200).set_body_json(run_json(77)))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/repos/x/y/actions/runs/77/jobs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "total_count": 0,
                "jobs": []
            })))
            .mount(&server)
            .await;

        let ctx = context(&server.uri(), FakeGit::new(), OutputFormat::Text);
        let detail = view_run(&ctx, None, Some("https://github.com/x/y/actions/runs/77"))
            .await
            .unwrap();
        assert_eq!(detail.run.id, 77);
        assert!(detail.jobs.is_empty());
    }

    #[tokio::test]
    async fn test_rerun_failed_jobs() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/repos/x/y/actions/runs/77/rerun-failed-jobs"))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let ctx = context(&server.uri(), FakeGit::new(), OutputFormat::Text);
        let result = run_run_command(
            &ctx,
            RunCommands::Rerun {
                run: Some("https://github.com/x/y/actions/runs/77".to_string()),
                target: crate::cli::RepoArg {
                    repo: Some("o/r".to_string()),
                },
                failed: true,
            },
        )
        .await
        .unwrap();
        assert_eq!(result.stdout, "✓ Requested rerun of failed jobs of run 77\n");
    }
}
