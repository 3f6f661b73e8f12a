//! Contains the main CLI struct and the per-area subcommand enums.

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::search::{
    CodeSearchFilters, CommitSearchFilters, IssueSearchFilters, PrSearchFilters,
    RepoSearchFilters, SearchOptions,
};

#[derive(Parser, Debug)]
#[command(name = "ghub")]
#[command(version, about = "Work with GitHub pull requests, repositories, runs and search")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output JSON, optionally limited to comma-separated fields
    #[arg(
        long,
        global = true,
        num_args = 0..=1,
        default_missing_value = "",
        value_name = "FIELDS"
    )]
    pub json: Option<String>,

    /// Output Markdown
    #[arg(long, global = true, conflicts_with = "json")]
    pub markdown: bool,

    /// Increase verbosity (-v info, -vv debug, -vvv trace). Default is warn.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// Target repository selection shared by repository-scoped commands
#[derive(Args, Debug, Clone, Default)]
pub struct RepoArg {
    /// Repository as OWNER/REPO (default: detected from git remotes)
    #[arg(short = 'R', long, value_name = "OWNER/REPO")]
    pub repo: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Work with pull requests
    #[command(subcommand)]
    Pr(PrCommands),
    /// Work with repositories
    #[command(subcommand)]
    Repo(RepoCommands),
    /// Work with GitHub Actions workflow runs
    #[command(subcommand)]
    Run(RunCommands),
    /// Search GitHub
    #[command(subcommand)]
    Search(SearchCommands),
    /// Manage authentication
    #[command(subcommand)]
    Auth(AuthCommands),
    /// Model Context Protocol server
    #[command(subcommand)]
    Mcp(McpCommands),
}

#[derive(Subcommand, Debug)]
pub enum PrCommands {
    /// List pull requests
    List {
        #[command(flatten)]
        target: RepoArg,
        /// State: open, closed, all
        #[arg(short, long, default_value = "open")]
        state: String,
        /// Head branch (OWNER:BRANCH or BRANCH)
        #[arg(short = 'H', long)]
        head: Option<String>,
        /// Base branch
        #[arg(short = 'B', long)]
        base: Option<String>,
        /// Maximum number of pull requests
        #[arg(short = 'L', long)]
        limit: Option<u32>,
    },
    /// Show a pull request (number, URL or branch; default: current branch)
    View {
        pr: Option<String>,
        #[command(flatten)]
        target: RepoArg,
    },
    /// Show the diff of a pull request
    Diff {
        pr: Option<String>,
        #[command(flatten)]
        target: RepoArg,
    },
    /// Show CI check runs for a pull request
    Checks {
        pr: Option<String>,
        #[command(flatten)]
        target: RepoArg,
    },
    /// Create a pull request from the current branch
    Create {
        #[command(flatten)]
        target: RepoArg,
        /// Title (default: from commits)
        #[arg(short, long)]
        title: Option<String>,
        /// Body (default: from commits)
        #[arg(short, long)]
        body: Option<String>,
        /// Branch to merge into (default: the repository's default branch)
        #[arg(short = 'B', long)]
        base: Option<String>,
        /// Branch with the changes (default: current branch)
        #[arg(short = 'H', long)]
        head: Option<String>,
        /// Open as a draft
        #[arg(short, long)]
        draft: bool,
    },
    /// Merge a pull request
    Merge {
        pr: Option<String>,
        #[command(flatten)]
        target: RepoArg,
        /// Squash commits into one
        #[arg(long, conflicts_with = "rebase")]
        squash: bool,
        /// Rebase commits onto the base branch
        #[arg(long)]
        rebase: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum RepoCommands {
    /// Show a repository (default: the current one)
    View {
        /// Repository as OWNER/REPO
        repo: Option<String>,
    },
    /// List repositories of an owner (default: yours)
    List {
        owner: Option<String>,
        /// Maximum number of repositories
        #[arg(short = 'L', long)]
        limit: Option<u32>,
    },
}

#[derive(Subcommand, Debug)]
pub enum RunCommands {
    /// List recent workflow runs
    List {
        #[command(flatten)]
        target: RepoArg,
        /// Workflow file name or ID
        #[arg(short, long)]
        workflow: Option<String>,
        /// Branch
        #[arg(short, long)]
        branch: Option<String>,
        /// Status: queued, in_progress, completed, success, failure, ...
        #[arg(short, long)]
        status: Option<String>,
        /// Triggering event: push, pull_request, ...
        #[arg(short, long)]
        event: Option<String>,
        /// Maximum number of runs
        #[arg(short = 'L', long)]
        limit: Option<u32>,
    },
    /// Show a run and its jobs (ID or URL; default: latest on current branch)
    View {
        run: Option<String>,
        #[command(flatten)]
        target: RepoArg,
    },
    /// Re-run a workflow run
    Rerun {
        run: Option<String>,
        #[command(flatten)]
        target: RepoArg,
        /// Only re-run failed jobs
        #[arg(long)]
        failed: bool,
    },
    /// Cancel a workflow run
    Cancel {
        run: Option<String>,
        #[command(flatten)]
        target: RepoArg,
    },
}

#[derive(Subcommand, Debug)]
pub enum SearchCommands {
    /// Search repositories
    Repos {
        /// Search keywords
        query: Vec<String>,
        #[command(flatten)]
        filters: RepoSearchFilters,
        #[command(flatten)]
        options: SearchOptions,
    },
    /// Search issues
    Issues {
        query: Vec<String>,
        #[command(flatten)]
        filters: IssueSearchFilters,
        #[command(flatten)]
        options: SearchOptions,
    },
    /// Search pull requests
    Prs {
        query: Vec<String>,
        #[command(flatten)]
        filters: PrSearchFilters,
        #[command(flatten)]
        options: SearchOptions,
    },
    /// Search commits
    Commits {
        query: Vec<String>,
        #[command(flatten)]
        filters: CommitSearchFilters,
        #[command(flatten)]
        options: SearchOptions,
    },
    /// Search code
    Code {
        query: Vec<String>,
        #[command(flatten)]
        filters: CodeSearchFilters,
        #[command(flatten)]
        options: SearchOptions,
    },
}

#[derive(Subcommand, Debug)]
pub enum AuthCommands {
    /// Store a token after validating it against the API
    Login {
        /// Read the token from standard input
        #[arg(long)]
        with_token: bool,
    },
    /// Show the active account and where its token comes from
    Status,
    /// Remove the stored token
    Logout,
    /// Print the active token
    Token,
}

#[derive(Subcommand, Debug)]
pub enum McpCommands {
    /// Serve tools over stdio
    Serve,
}
