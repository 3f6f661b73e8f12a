//! ghub command-line entry point
//!
//! ```bash
//! ghub pr view              # PR for the current branch
//! ghub search issues crash --label bug --json number,title
//! ghub mcp serve            # MCP server over stdio
//! ```

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use ghub::cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = mcp_common::level_for_verbosity(cli.verbose);
    if let Err(e) = mcp_common::init_tracing("ghub", level) {
        eprintln!("Error: failed to initialize logging: {}", e);
    }

    let result = ghub::run(cli).await;

    if !result.stdout.is_empty() {
        let mut stdout = std::io::stdout().lock();
        let _ = stdout.write_all(result.stdout.as_bytes());
        if !result.stdout.ends_with('\n') {
            let _ = stdout.write_all(b"\n");
        }
        let _ = stdout.flush();
    }
    if !result.stderr.is_empty() {
        eprintln!("{}", result.stderr);
    }

    ExitCode::from(u8::try_from(result.exit_code).unwrap_or(1))
}
