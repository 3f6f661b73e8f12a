//! Repository handlers

use anyhow::Result;

use super::CommandContext;
use crate::cli::RepoCommands;
use crate::output::CommandResult;
use crate::types::Repository;

pub async fn view_repo(ctx: &CommandContext, repo: Option<&str>) -> Result<Repository> {
    let repo = ctx.repo(repo).await?;
    Ok(ctx.client().await?.get_repo(&repo).await?)
}

/// Repositories of `owner`, or of the authenticated user
pub async fn list_repos(
    ctx: &CommandContext,
    owner: Option<&str>,
    limit: Option<u32>,
) -> Result<Vec<Repository>> {
    let client = ctx.client().await?;
    Ok(client.list_repos(owner, ctx.limit(limit)).await?)
}

/// Entry point for `ghub repo ...`
pub async fn run_repo_command(ctx: &CommandContext, cmd: RepoCommands) -> Result<CommandResult> {
    match cmd {
        RepoCommands::View { repo } => ctx.render(&view_repo(ctx, repo.as_deref()).await?),
        RepoCommands::List { owner, limit } => {
            ctx.render(&list_repos(ctx, owner.as_deref(), limit).await?)
        }
    }
}
