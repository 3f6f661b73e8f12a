//! Command handlers
//!
//! Each area module exposes data operations (shared with the MCP server) and a
//! `run_*_command` entry point that renders them for the CLI.
//! [`CommandContext`] carries the per-invocation resources.

use anyhow::Result;
use tokio::sync::OnceCell;
use tracing::debug;

use crate::auth::{discover_token, CredentialStore};
use crate::cli::Commands;
use crate::config::Config;
use crate::git::{GitRunner, SystemGit};
use crate::github::GitHubClient;
use crate::output::{CommandResult, Printer, View};
use crate::resolve::{resolve_repository, ResolveResult};
use crate::types::RepoRef;

pub mod auth;
pub mod pr;
pub mod repo;
pub mod run;
pub mod search;

pub use auth::run_auth_command;
pub use pr::run_pr_command;
pub use repo::run_repo_command;
pub use run::run_run_command;
pub use search::run_search_command;

// =============================================================================
// CommandContext - shared state with lazy-loading
// =============================================================================

/// Resources shared by handlers for one invocation
///
/// The GitHub client is built on first use, so commands that never touch the
/// API (e.g. `auth logout`) never look for a token.
pub struct CommandContext {
    pub config: Config,
    pub printer: Printer,
    git: Box<dyn GitRunner>,
    store: Option<CredentialStore>,
    client: OnceCell<GitHubClient>,
}

impl CommandContext {
    pub fn new(config: Config, printer: Printer) -> Self {
        let store = match CredentialStore::default_location() {
            Ok(store) => Some(store),
            Err(e) => {
                debug!("Credential storage unavailable: {}", e);
                None
            }
        };
        Self {
            config,
            printer,
            git: Box::new(SystemGit::new()),
            store,
            client: OnceCell::new(),
        }
    }

    /// Replace the git collaborator
    pub fn with_git(mut self, git: Box<dyn GitRunner>) -> Self {
        self.git = git;
        self
    }

    /// Replace the credential store
    pub fn with_store(mut self, store: Option<CredentialStore>) -> Self {
        self.store = store;
        self
    }

    /// Use a prebuilt client instead of discovering a token
    pub fn with_client(mut self, client: GitHubClient) -> Self {
        self.client = OnceCell::new_with(Some(client));
        self
    }

    pub fn git(&self) -> &dyn GitRunner {
        self.git.as_ref()
    }

    pub fn store(&self) -> Option<&CredentialStore> {
        self.store.as_ref()
    }

    /// GitHub client, created lazily with the discovered token
    pub async fn client(&self) -> Result<&GitHubClient> {
        self.client
            .get_or_try_init(|| async {
                let token = match discover_token(self.store.as_ref()) {
                    Some((token, source)) => {
                        debug!(%source, "Using token");
                        Some(token)
                    }
                    None => {
                        debug!("No token found, requests are unauthenticated");
                        None
                    }
                };
                let client = GitHubClient::new(
                    self.config.github.api_url.as_str(),
                    token,
                    &self.config.github.user_agent,
                )?;
                Ok::<_, anyhow::Error>(client)
            })
            .await
    }

    /// Explicit `owner/repo` or the current checkout's GitHub remote
    pub async fn repo(&self, explicit: Option<&str>) -> ResolveResult<RepoRef> {
        resolve_repository(explicit, self.git()).await
    }

    /// Page size for a command, defaulting to the configured one
    pub fn limit(&self, limit: Option<u32>) -> Option<u32> {
        Some(limit.unwrap_or(self.config.github.per_page))
    }

    pub fn render<V: View>(&self, view: &V) -> Result<CommandResult> {
        Ok(CommandResult::success(self.printer.render(view)?))
    }
}

/// Run one parsed command to completion
pub async fn dispatch(ctx: CommandContext, command: Commands) -> Result<CommandResult> {
    match command {
        Commands::Pr(cmd) => run_pr_command(&ctx, cmd).await,
        Commands::Repo(cmd) => run_repo_command(&ctx, cmd).await,
        Commands::Run(cmd) => run_run_command(&ctx, cmd).await,
        Commands::Search(cmd) => run_search_command(&ctx, cmd).await,
        Commands::Auth(cmd) => run_auth_command(&ctx, cmd).await,
        Commands::Mcp(crate::cli::McpCommands::Serve) => {
            let server = crate::server::GhubMcpServer::new(ctx);
            mcp_common::serve_stdio(server, "ghub").await?;
            Ok(CommandResult::success(""))
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::git::executor::testing::FakeGit;
    use crate::output::{OutputFormat, Style};

    /// Context against a mock API with scripted git
    pub fn context(api_url: &str, git: FakeGit, format: OutputFormat) -> CommandContext {
        let client = GitHubClient::new(api_url, Some("test-token".to_string()), "ghub-test")
            .expect("client");
        CommandContext::new(Config::default(), Printer::new(format, None, Style::plain()))
            .with_git(Box::new(git))
            .with_store(None)
            .with_client(client)
    }
}
