//! MCP Server implementation
//!
//! Exposes the read-only pull request, repository, workflow run and search
//! operations as tools. Each tool calls the same handler functions as the CLI
//! and returns pretty JSON, optionally projected through `fields`.

use std::sync::Arc;

use mcp_common::{internal_error, invalid_params, json_success, text_success, IntoMcpError};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ErrorData as McpError,
};
use serde_json::Value;

use crate::github::{PrListFilter, RunListFilter};
use crate::handlers::{pr, repo, run, search, CommandContext};
use crate::output::View;
use crate::params::{
    PrDiffParams, PrListParams, PrRefParams, RepoListParams, RepoViewParams, RunListParams,
    RunViewParams, SearchCodeParams, SearchCommitsParams, SearchIssuesParams, SearchPrsParams,
    SearchReposParams,
};
use crate::projection::{parse_fields, project_value};
use crate::resolve::ResolveError;

/// The ghub MCP server
#[derive(Clone)]
pub struct GhubMcpServer {
    ctx: Arc<CommandContext>,
    tool_router: ToolRouter<Self>,
}

impl IntoMcpError for ResolveError {
    fn into_mcp_error(self) -> McpError {
        match self {
            ResolveError::Validation(msg) => invalid_params(msg),
            ResolveError::Lookup(msg) => internal_error(msg),
        }
    }
}

/// Resolver failures keep their kind; everything else is internal
fn to_mcp_error(err: anyhow::Error) -> McpError {
    match err.downcast::<ResolveError>() {
        Ok(resolve) => resolve.into_mcp_error(),
        Err(other) => other.into_mcp_error(),
    }
}

/// Serialize a view, keeping only `fields` when given
fn projected<V: View>(view: &V, fields: Option<&str>) -> Result<CallToolResult, McpError> {
    let value: Value = view.json().map_err(IntoMcpError::into_mcp_error)?;
    let fields = fields.map(parse_fields);
    json_success(&project_value(value, fields.as_deref()))
}

#[tool_router]
impl GhubMcpServer {
    pub fn new(ctx: CommandContext) -> Self {
        Self {
            ctx: Arc::new(ctx),
            tool_router: Self::tool_router(),
        }
    }

    // ========================================================================
    // Pull Request Tools
    // ========================================================================

    #[tool(description = "List pull requests in a GitHub repository")]
    async fn pr_list(
        &self,
        Parameters(params): Parameters<PrListParams>,
    ) -> Result<CallToolResult, McpError> {
        let filter = PrListFilter {
            state: Some(params.state.unwrap_or_else(|| "open".to_string())),
            head: params.head,
            base: params.base,
            limit: params.limit,
        };
        let prs = pr::list_prs(&self.ctx, params.repo.as_deref(), filter)
            .await
            .map_err(to_mcp_error)?;
        projected(&prs, params.fields.as_deref())
    }

    #[tool(
        description = "View a pull request by number, URL or branch (default: the current branch's open PR)"
    )]
    async fn pr_view(
        &self,
        Parameters(params): Parameters<PrRefParams>,
    ) -> Result<CallToolResult, McpError> {
        let pull = pr::view_pr(&self.ctx, params.repo.as_deref(), params.pr.as_deref())
            .await
            .map_err(to_mcp_error)?;
        projected(&pull, params.fields.as_deref())
    }

    #[tool(description = "Get the unified diff of a pull request")]
    async fn pr_diff(
        &self,
        Parameters(params): Parameters<PrDiffParams>,
    ) -> Result<CallToolResult, McpError> {
        let diff = pr::pr_diff(&self.ctx, params.repo.as_deref(), params.pr.as_deref())
            .await
            .map_err(to_mcp_error)?;
        Ok(text_success(diff))
    }

    #[tool(description = "List CI check runs for a pull request's head commit")]
    async fn pr_checks(
        &self,
        Parameters(params): Parameters<PrRefParams>,
    ) -> Result<CallToolResult, McpError> {
        let summary = pr::pr_checks(&self.ctx, params.repo.as_deref(), params.pr.as_deref())
            .await
            .map_err(to_mcp_error)?;
        projected(&summary, params.fields.as_deref())
    }

    // ========================================================================
    // Repository Tools
    // ========================================================================

    #[tool(description = "View repository details")]
    async fn repo_view(
        &self,
        Parameters(params): Parameters<RepoViewParams>,
    ) -> Result<CallToolResult, McpError> {
        let repository = repo::view_repo(&self.ctx, params.repo.as_deref())
            .await
            .map_err(to_mcp_error)?;
        projected(&repository, params.fields.as_deref())
    }

    #[tool(description = "List repositories of a user or organization")]
    async fn repo_list(
        &self,
        Parameters(params): Parameters<RepoListParams>,
    ) -> Result<CallToolResult, McpError> {
        let repos = repo::list_repos(&self.ctx, params.owner.as_deref(), params.limit)
            .await
            .map_err(to_mcp_error)?;
        projected(&repos, params.fields.as_deref())
    }

    // ========================================================================
    // Workflow Run Tools
    // ========================================================================

    #[tool(description = "List recent GitHub Actions workflow runs")]
    async fn run_list(
        &self,
        Parameters(params): Parameters<RunListParams>,
    ) -> Result<CallToolResult, McpError> {
        let filter = RunListFilter {
            workflow: params.workflow,
            branch: params.branch,
            status: params.status,
            event: params.event,
            limit: params.limit,
        };
        let runs = run::list_runs(&self.ctx, params.repo.as_deref(), filter)
            .await
            .map_err(to_mcp_error)?;
        projected(&runs, params.fields.as_deref())
    }

    #[tool(description = "View a workflow run with its jobs and steps")]
    async fn run_view(
        &self,
        Parameters(params): Parameters<RunViewParams>,
    ) -> Result<CallToolResult, McpError> {
        let detail = run::view_run(&self.ctx, params.repo.as_deref(), params.run.as_deref())
            .await
            .map_err(to_mcp_error)?;
        projected(&detail, params.fields.as_deref())
    }

    // ========================================================================
    // Search Tools
    // ========================================================================

    #[tool(description = "Search repositories with GitHub search qualifiers")]
    async fn search_repos(
        &self,
        Parameters(params): Parameters<SearchReposParams>,
    ) -> Result<CallToolResult, McpError> {
        let results = search::search_repos(&self.ctx, &params.filters, &params.options)
            .await
            .map_err(to_mcp_error)?;
        projected(&results, params.fields.as_deref())
    }

    #[tool(description = "Search issues with GitHub search qualifiers")]
    async fn search_issues(
        &self,
        Parameters(params): Parameters<SearchIssuesParams>,
    ) -> Result<CallToolResult, McpError> {
        let results = search::search_issues(&self.ctx, &params.filters, &params.options)
            .await
            .map_err(to_mcp_error)?;
        projected(&results, params.fields.as_deref())
    }

    #[tool(description = "Search pull requests with GitHub search qualifiers")]
    async fn search_prs(
        &self,
        Parameters(params): Parameters<SearchPrsParams>,
    ) -> Result<CallToolResult, McpError> {
        let results = search::search_prs(&self.ctx, &params.filters, &params.options)
            .await
            .map_err(to_mcp_error)?;
        projected(&results, params.fields.as_deref())
    }

    #[tool(description = "Search commits with GitHub search qualifiers")]
    async fn search_commits(
        &self,
        Parameters(params): Parameters<SearchCommitsParams>,
    ) -> Result<CallToolResult, McpError> {
        let results = search::search_commits(&self.ctx, &params.filters, &params.options)
            .await
            .map_err(to_mcp_error)?;
        projected(&results, params.fields.as_deref())
    }

    #[tool(description = "Search code with GitHub search qualifiers")]
    async fn search_code(
        &self,
        Parameters(params): Parameters<SearchCodeParams>,
    ) -> Result<CallToolResult, McpError> {
        let results = search::search_code(&self.ctx, &params.filters, &params.options)
            .await
            .map_err(to_mcp_error)?;
        projected(&results, params.fields.as_deref())
    }
}

#[tool_handler]
impl rmcp::ServerHandler for GhubMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "ghub MCP server - read GitHub pull requests, repositories, Actions runs \
                 and search results through the REST API. Repository arguments default to \
                 the git checkout the server runs in."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
