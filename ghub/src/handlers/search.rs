//! Search handlers

use anyhow::Result;
use tracing::debug;

use super::CommandContext;
use crate::cli::SearchCommands;
use crate::output::CommandResult;
use crate::resolve::ResolveError;
use crate::search::{
    build_code_query, build_commit_query, build_issue_query, build_pr_query, build_repo_query,
    CodeSearchFilters, CommitSearchFilters, IssueSearchFilters, PrSearchFilters,
    RepoSearchFilters, SearchKind, SearchOptions,
};
use crate::types::{CodeHit, CommitHit, IssueHit, Repository, SearchResults};

fn require_query(query: String) -> Result<String> {
    if query.trim().is_empty() {
        return Err(ResolveError::Validation(
            "Provide search keywords or at least one filter".to_string(),
        )
        .into());
    }
    Ok(query)
}

async fn search<T: serde::de::DeserializeOwned>(
    ctx: &CommandContext,
    kind: SearchKind,
    query: String,
    options: &SearchOptions,
) -> Result<SearchResults<T>> {
    let query = require_query(query)?;
    debug!(?kind, %query, "searching");
    let mut options = options.clone();
    options.limit = ctx.limit(options.limit);
    Ok(ctx.client().await?.search(kind, &query, &options).await?)
}

pub async fn search_repos(
    ctx: &CommandContext,
    filters: &RepoSearchFilters,
    options: &SearchOptions,
) -> Result<SearchResults<Repository>> {
    search(ctx, SearchKind::Repositories, build_repo_query(filters), options).await
}

pub async fn search_issues(
    ctx: &CommandContext,
    filters: &IssueSearchFilters,
    options: &SearchOptions,
) -> Result<SearchResults<IssueHit>> {
    search(ctx, SearchKind::Issues, build_issue_query(filters), options).await
}

pub async fn search_prs(
    ctx: &CommandContext,
    filters: &PrSearchFilters,
    options: &SearchOptions,
) -> Result<SearchResults<IssueHit>> {
    search(ctx, SearchKind::PullRequests, build_pr_query(filters), options).await
}

pub async fn search_commits(
    ctx: &CommandContext,
    filters: &CommitSearchFilters,
    options: &SearchOptions,
) -> Result<SearchResults<CommitHit>> {
    search(ctx, SearchKind::Commits, build_commit_query(filters), options).await
}

pub async fn search_code(
    ctx: &CommandContext,
    filters: &CodeSearchFilters,
    options: &SearchOptions,
) -> Result<SearchResults<CodeHit>> {
    search(ctx, SearchKind::Code, build_code_query(filters), options).await
}

/// Positional words become the free-text part of the query
fn keywords(words: Vec<String>) -> Option<String> {
    let joined = words.join(" ");
    (!joined.trim().is_empty()).then_some(joined)
}

/// Entry point for `ghub search ...`
pub async fn run_search_command(ctx: &CommandContext, cmd: SearchCommands) -> Result<CommandResult> {
    match cmd {
        SearchCommands::Repos {
            query,
            mut filters,
            options,
        } => {
            filters.query = keywords(query);
            ctx.render(&search_repos(ctx, &filters, &options).await?)
        }
        SearchCommands::Issues {
            query,
            mut filters,
            options,
        } => {
            filters.query = keywords(query);
            ctx.render(&search_issues(ctx, &filters, &options).await?)
        }
        SearchCommands::Prs {
            query,
            mut filters,
            options,
        } => {
            filters.query = keywords(query);
            ctx.render(&search_prs(ctx, &filters, &options).await?)
        }
        SearchCommands::Commits {
            query,
            mut filters,
            options,
        } => {
            filters.query = keywords(query);
            ctx.render(&search_commits(ctx, &filters, &options).await?)
        }
        SearchCommands::Code {
            query,
            mut filters,
            options,
        } => {
            filters.query = keywords(query);
            ctx.render(&search_code(ctx, &filters, &options).await?)
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

    #[test]
    fn test_keywords() {
        assert_eq!(keywords(vec![]), None);
        assert_eq!(
            keywords(vec!["memory".to_string(), "leak".to_string()]),
            Some("memory leak".to_string())
        );
    }

    #[tokio::test]
    async fn test_issue_search_sends_built_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search/issues"))
            .and(query_param("q", "bug type:issue label:p1 label:urgent state:open"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "total_count": 0,
                "incomplete_results": false,
                "items": []
            })))
            .expect(1)
            .mount(&server)
            .await;

        let ctx = context(&server.uri(), FakeGit::new(), OutputFormat::Json);
        let cmd = SearchCommands::Issues {
            query: vec!["bug".to_string()],
            filters: IssueSearchFilters {
                label: vec!["p1".to_string(), "urgent".to_string()],
                state: Some("open".to_string()),
                ..Default::default()
            },
            options: SearchOptions::default(),
        };
        let result = run_search_command(&ctx, cmd).await.unwrap();
        assert_eq!(result.stdout, "[]");
    }

    #[tokio::test]
    async fn test_empty_repo_search_is_rejected() {
        let ctx = context("http://127.0.0.1:9", FakeGit::new(), OutputFormat::Text);
        let err = search_repos(&ctx, &RepoSearchFilters::default(), &SearchOptions::default())
            .await
            .unwrap_err();
        assert!(err.downcast_ref::<ResolveError>().is_some_and(ResolveError::is_validation));
    }
}
