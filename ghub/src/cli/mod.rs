//! CLI argument definitions

mod args;

pub use args::{
    AuthCommands, Cli, Commands, McpCommands, PrCommands, RepoArg, RepoCommands, RunCommands,
    SearchCommands,
};
