//! Logging and stdio serving

use rmcp::{ServerHandler, ServiceExt};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing to stderr
///
/// `RUST_LOG` is honored; `crate_name` additionally gets `default_level`
/// (e.g. `"ghub=warn"`). Set `LOG_FORMAT=json` for JSON lines.
pub fn init_tracing(crate_name: &str, default_level: &str) -> anyhow::Result<()> {
    let directive = format!("{}={}", crate_name, default_level);
    let filter = EnvFilter::from_default_env().add_directive(directive.parse()?);

    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);

    if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .try_init()?;
    }

    Ok(())
}

/// Serve `server` over stdin/stdout and wait for the client to disconnect
pub async fn serve_stdio<S: ServerHandler>(server: S, name: &str) -> anyhow::Result<()> {
    tracing::info!("Starting {} MCP server", name);

    let service = server.serve(rmcp::transport::stdio()).await?;
    tracing::info!("Server running, waiting for requests...");

    service.waiting().await?;
    tracing::info!("Server shutting down");
    Ok(())
}

/// Map a `-v` count to a level name: warn, info, debug, trace
pub fn level_for_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for_verbosity() {
        assert_eq!(level_for_verbosity(0), "warn");
        assert_eq!(level_for_verbosity(1), "info");
        assert_eq!(level_for_verbosity(2), "debug");
        assert_eq!(level_for_verbosity(9), "trace");
    }
}
