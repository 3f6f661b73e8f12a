//! ghub - GitHub from the command line and over MCP
//!
//! The library holds everything the `ghub` binary runs:
//!
//! - [`resolve`]: turns `--repo`, git remotes, PR numbers/URLs/branches and run
//!   ids into API coordinates
//! - [`search`]: typed search filters and the qualifier query builders
//! - [`projection`]: `--json a,b` field selection
//! - [`github`]: the REST client
//! - [`handlers`] + [`cli`]: command implementations and clap definitions
//! - [`server`]: the same operations as MCP tools
//!
//! # Usage as Library
//!
//! ```rust,ignore
//! use ghub::search::{build_issue_query, IssueSearchFilters};
//!
//! let filters = IssueSearchFilters {
//!     query: Some("bug".into()),
//!     label: vec!["p1".into()],
//!     ..Default::default()
//! };
//! assert_eq!(build_issue_query(&filters), "bug type:issue label:p1");
//! ```

pub mod auth;
pub mod cli;
pub mod config;
pub mod git;
pub mod github;
pub mod handlers;
pub mod output;
pub mod params;
pub mod projection;
pub mod resolve;
pub mod search;
pub mod server;
pub mod types;

pub use server::GhubMcpServer;

use cli::Cli;
use config::Config;
use handlers::CommandContext;
use output::{CommandResult, OutputFormat, Printer, Style};

/// Run a parsed command line and collect its output
///
/// Errors never escape: they become a failed [`CommandResult`].
pub async fn run(cli: Cli) -> CommandResult {
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => return CommandResult::failure(format!("{:#}", e)),
    };

    let format = if cli.json.is_some() {
        OutputFormat::Json
    } else if cli.markdown {
        OutputFormat::Markdown
    } else {
        OutputFormat::from_name(&config.output.format)
    };
    let fields = cli
        .json
        .as_deref()
        .map(projection::parse_fields)
        .filter(|f| !f.is_empty());
    let style = Style::auto(config.output.color);

    let ctx = CommandContext::new(config, Printer::new(format, fields, style));
    match handlers::dispatch(ctx, cli.command).await {
        Ok(result) => result,
        Err(e) => {
            tracing::debug!("command failed: {:?}", e);
            CommandResult::failure(format!("{:#}", e))
        }
    }
}
