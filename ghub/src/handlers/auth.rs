//! Authentication handlers

use std::io::IsTerminal;

use anyhow::{bail, Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tracing::warn;

use super::CommandContext;
use crate::auth::{discover_token, mask_token, Credential, TokenSource};
use crate::cli::AuthCommands;
use crate::github::{GitHubClient, DEFAULT_API_URL};
use crate::output::{AuthStatus, CommandResult};

/// Host shown to the user for the configured API URL
fn host_name(api_url: &str) -> String {
    if api_url.trim_end_matches('/') == DEFAULT_API_URL {
        return "github.com".to_string();
    }
    let without_scheme = api_url.split_once("://").map_or(api_url, |(_, rest)| rest);
    without_scheme
        .split('/')
        .next()
        .unwrap_or(without_scheme)
        .to_string()
}

#[derive(Debug, PartialEq, Eq)]
enum Entry {
    Continue,
    Done,
    Cancelled,
}

/// Apply one key press to the hidden input buffer
fn apply_key(input: &mut String, key: KeyEvent) -> Entry {
    if key.kind != KeyEventKind::Press {
        return Entry::Continue;
    }
    match key.code {
        KeyCode::Enter => Entry::Done,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Entry::Cancelled,
        KeyCode::Esc => Entry::Cancelled,
        KeyCode::Backspace => {
            input.pop();
            Entry::Continue
        }
        KeyCode::Char(c) => {
            input.push(c);
            Entry::Continue
        }
        _ => Entry::Continue,
    }
}

/// Leaves raw mode on drop, so early returns restore the terminal
struct RawMode;

impl RawMode {
    fn enable() -> std::io::Result<Self> {
        enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

/// Read a line from the terminal with echo off
fn read_hidden_line() -> Result<String> {
    let _raw = RawMode::enable()?;
    let mut input = String::new();
    loop {
        if let Event::Key(key) = event::read()? {
            match apply_key(&mut input, key) {
                Entry::Continue => {}
                Entry::Done => return Ok(input),
                Entry::Cancelled => bail!("Cancelled"),
            }
        }
    }
}

async fn read_token(from_stdin: bool) -> Result<String> {
    let mut input = String::new();
    if from_stdin {
        tokio::io::stdin().read_to_string(&mut input).await?;
    } else {
        let mut stderr = tokio::io::stderr();
        stderr.write_all(b"Paste your authentication token: ").await?;
        stderr.flush().await?;
        if std::io::stdin().is_terminal() {
            let hidden = tokio::task::spawn_blocking(read_hidden_line).await?;
            stderr.write_all(b"\n").await?;
            input = hidden?;
        } else {
            BufReader::new(tokio::io::stdin()).read_line(&mut input).await?;
        }
    }
    let token = input.trim().to_string();
    if token.is_empty() {
        bail!("No token provided");
    }
    Ok(token)
}

/// Validate `token` against the API and store it
pub async fn login(ctx: &CommandContext, token: String) -> Result<Credential> {
    let client = GitHubClient::new(
        ctx.config.github.api_url.as_str(),
        Some(token.clone()),
        &ctx.config.github.user_agent,
    )?;
    let user = client
        .current_user()
        .await
        .context("token validation failed")?;

    let store = ctx
        .store()
        .context("no config directory available to store credentials")?;
    let credential = Credential {
        token,
        login: Some(user.login),
    };
    store.save(&credential)?;
    Ok(credential)
}

pub async fn status(ctx: &CommandContext) -> Result<AuthStatus> {
    let Some((token, source)) = discover_token(ctx.store()) else {
        bail!("Not logged in. Run 'ghub auth login' or set GH_TOKEN");
    };
    let user = ctx.client().await?.current_user().await?;
    Ok(AuthStatus {
        host: host_name(&ctx.config.github.api_url),
        login: user.login,
        source: source.to_string(),
        token: mask_token(&token),
    })
}

/// Entry point for `ghub auth ...`
pub async fn run_auth_command(ctx: &CommandContext, cmd: AuthCommands) -> Result<CommandResult> {
    let host = host_name(&ctx.config.github.api_url);
    match cmd {
        AuthCommands::Login { with_token } => {
            let token = read_token(with_token).await?;
            let credential = login(ctx, token).await?;
            if let Some((_, source)) = discover_token(None) {
                warn!("{} is set and takes precedence over the stored token", source);
            }
            Ok(CommandResult::success(format!(
                "{} Logged in to {} as {}\n",
                ctx.printer.style().success_mark(),
                host,
                credential.login.as_deref().unwrap_or("unknown")
            )))
        }
        AuthCommands::Status => ctx.render(&status(ctx).await?),
        AuthCommands::Logout => {
            let store = ctx.store().context("no credential storage available")?;
            if store.delete()? {
                Ok(CommandResult::success(format!(
                    "{} Logged out of {}\n",
                    ctx.printer.style().success_mark(),
                    host
                )))
            } else {
                Ok(CommandResult::failure(format!("Not logged in to {}", host)))
            }
        }
        AuthCommands::Token => match discover_token(ctx.store()) {
            Some((token, source)) => {
                let result = CommandResult::success(format!("{}\n", token));
                Ok(if source == TokenSource::Stored {
                    result
                } else {
                    result.with_stderr(format!("Token from {}", source))
                })
            }
            None => Ok(CommandResult::failure("No token found")),
        },
    }
}
