//! Token discovery and the stored credential
//!
//! A token comes from `GH_TOKEN`, then `GITHUB_TOKEN`, then the single
//! credential saved by `ghub auth login`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors from credential storage
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("no config directory available to store credentials")]
    NoConfigDir,

    #[error("credential file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid credential file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to encode credential: {0}")]
    Encode(#[from] toml::ser::Error),
}

pub type AuthResult<T> = Result<T, AuthError>;

/// Where the active token came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    GhToken,
    GithubToken,
    Stored,
}

impl fmt::Display for TokenSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenSource::GhToken => write!(f, "GH_TOKEN"),
            TokenSource::GithubToken => write!(f, "GITHUB_TOKEN"),
            TokenSource::Stored => write!(f, "credentials file"),
        }
    }
}

/// The persisted token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credential {
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,
}

/// File-backed storage for a single [`Credential`]
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config_dir>/ghub/credentials.toml`
    pub fn default_location() -> AuthResult<Self> {
        dirs::config_dir()
            .map(|dir| Self::new(dir.join("ghub").join("credentials.toml")))
            .ok_or(AuthError::NoConfigDir)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> AuthResult<Option<Credential>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)?;
        Ok(Some(toml::from_str(&content)?))
    }

    /// Write the credential, readable by the owner only
    pub fn save(&self, credential: &Credential) -> AuthResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        write_private(&self.path, toml::to_string(credential)?.as_bytes())?;
        debug!("Saved credential to {}", self.path.display());
        Ok(())
    }

    /// Remove the stored credential; `false` when there was none
    pub fn delete(&self) -> AuthResult<bool> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

/// Create the file as 0600 from the start. An existing file keeps its mode on
/// open, so it is tightened before anything is written.
#[cfg(unix)]
fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    use std::io::Write;
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
    file.write_all(contents)
}

#[cfg(not(unix))]
fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    std::fs::write(path, contents)
}

/// Find a token using the process environment
pub fn discover_token(store: Option<&CredentialStore>) -> Option<(String, TokenSource)> {
    discover_token_with(|key| std::env::var(key).ok(), store)
}

/// Find a token with an explicit environment lookup
pub fn discover_token_with(
    env: impl Fn(&str) -> Option<String>,
    store: Option<&CredentialStore>,
) -> Option<(String, TokenSource)> {
    for (key, source) in [
        ("GH_TOKEN", TokenSource::GhToken),
        ("GITHUB_TOKEN", TokenSource::GithubToken),
    ] {
        if let Some(token) = env(key).filter(|t| !t.trim().is_empty()) {
            return Some((token.trim().to_string(), source));
        }
    }

    match store.map(CredentialStore::load) {
        Some(Ok(Some(credential))) => Some((credential.token, TokenSource::Stored)),
        Some(Err(e)) => {
            tracing::warn!("Ignoring unreadable credential file: {}", e);
            None
        }
        _ => None,
    }
}

/// Mask all but the last four characters of a token
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - 4), tail)
}
