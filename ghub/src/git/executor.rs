//! Async executor for git commands
//!
//! Every git interaction goes through the [`GitRunner`] trait so resolvers can
//! be exercised against a scripted fake instead of a real repository.

use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, instrument};

use super::error::{GitError, GitResult};

/// Capability to run a git subcommand and capture its stdout
#[async_trait]
pub trait GitRunner: Send + Sync {
    /// Run `git <args>` and return stdout on success
    async fn run(&self, args: &[&str]) -> GitResult<String>;
}

/// Runs the system `git` binary in the process working directory
#[derive(Debug, Clone, Default)]
pub struct SystemGit;

impl SystemGit {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl GitRunner for SystemGit {
    #[instrument(skip(self), fields(cmd = %args.join(" ")))]
    async fn run(&self, args: &[&str]) -> GitResult<String> {
        debug!("executing: git {}", args.join(" "));

        let output = Command::new("git")
            .args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    GitError::NotFound
                } else {
                    GitError::SpawnError(e)
                }
            })?
            .wait_with_output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let code = output.status.code().unwrap_or(-1);
            debug!(code, stderr = %stderr, "git command failed");
            return Err(GitError::CommandFailed { code, stderr });
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

/// Whether the working directory is inside a git repository
pub async fn is_git_repository(git: &dyn GitRunner) -> bool {
    git.run(&["rev-parse", "--git-dir"]).await.is_ok()
}

/// Current branch name, or `None` on a detached HEAD
pub async fn current_branch(git: &dyn GitRunner) -> GitResult<Option<String>> {
    let output = git.run(&["rev-parse", "--abbrev-ref", "HEAD"]).await?;
    let branch = output.trim();
    if branch.is_empty() || branch == "HEAD" {
        Ok(None)
    } else {
        Ok(Some(branch.to_string()))
    }
}

/// A commit subject/body pair from `git log`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitMessage {
    pub subject: String,
    pub body: String,
}

/// Commits on HEAD that are not on `base`, newest first
pub async fn commits_since(git: &dyn GitRunner, base: &str) -> GitResult<Vec<CommitMessage>> {
    let range = format!("{}..HEAD", base);
    // NUL-terminated records so multi-line bodies stay attached to their subject
    let output = git.run(&["log", &range, "--format=%s|%b%x00"]).await?;
    Ok(parse_commit_log(&output))
}

fn parse_commit_log(output: &str) -> Vec<CommitMessage> {
    output
        .split('\0')
        .map(|record| record.trim_matches('\n'))
        .filter(|record| !record.trim().is_empty())
        .map(|record| match record.split_once('|') {
            Some((subject, body)) => CommitMessage {
                subject: subject.trim().to_string(),
                body: body.trim().to_string(),
            },
            None => CommitMessage {
                subject: record.trim().to_string(),
                body: String::new(),
            },
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Scripted git runner keyed by the joined argument list
    #[derive(Default)]
    pub struct FakeGit {
        responses: HashMap<String, Result<String, (i32, String)>>,
        pub calls: Mutex<Vec<String>>,
    }

    impl FakeGit {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn ok(mut self, args: &str, stdout: &str) -> Self {
            self.responses.insert(args.to_string(), Ok(stdout.to_string()));
            self
        }

        pub fn fail(mut self, args: &str, stderr: &str) -> Self {
            self.responses
                .insert(args.to_string(), Err((128, stderr.to_string())));
            self
        }

        /// A repository whose `git remote -v` prints `remotes`
        pub fn repo_with_remotes(remotes: &str) -> Self {
            Self::new()
                .ok("rev-parse --git-dir", ".git\n")
                .ok("remote -v", remotes)
        }
    }

    #[async_trait]
    impl GitRunner for FakeGit {
        async fn run(&self, args: &[&str]) -> GitResult<String> {
            let key = args.join(" ");
            self.calls.lock().unwrap().push(key.clone());
            match self.responses.get(&key) {
                Some(Ok(stdout)) => Ok(stdout.clone()),
                Some(Err((code, stderr))) => Err(GitError::CommandFailed {
                    code: *code,
                    stderr: stderr.clone(),
                }),
                None => Err(GitError::CommandFailed {
                    code: 128,
                    stderr: format!("fatal: unexpected git call: {}", key),
                }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::FakeGit;
    use super::*;

    #[tokio::test]
    async fn test_current_branch() {
        let git = FakeGit::new().ok("rev-parse --abbrev-ref HEAD", "feat/login\n");
        assert_eq!(
            current_branch(&git).await.unwrap(),
            Some("feat/login".to_string())
        );
    }

    #[tokio::test]
    async fn test_current_branch_detached() {
        let git = FakeGit::new().ok("rev-parse --abbrev-ref HEAD", "HEAD\n");
        assert_eq!(current_branch(&git).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_is_git_repository() {
        let git = FakeGit::new().ok("rev-parse --git-dir", ".git\n");
        assert!(is_git_repository(&git).await);

        let git = FakeGit::new().fail("rev-parse --git-dir", "fatal: not a git repository");
        assert!(!is_git_repository(&git).await);
    }

    #[test]
    fn test_parse_commit_log() {
        let output = "Add login|Implements OAuth flow\n\nCloses #3\0\nFix typo|\0\n";
        let commits = parse_commit_log(output);
        assert_eq!(commits.len(), 2);
        assert_eq!(commits[0].subject, "Add login");
        assert_eq!(commits[0].body, "Implements OAuth flow\n\nCloses #3");
        assert_eq!(commits[1].subject, "Fix typo");
        assert!(commits[1].body.is_empty());
    }

    #[test]
    fn test_parse_commit_log_empty() {
        assert!(parse_commit_log("").is_empty());
    }

    #[tokio::test]
    async fn test_commits_since() {
        let git = FakeGit::new().ok("log main..HEAD --format=%s|%b%x00", "Only commit|\0\n");
        let commits = commits_since(&git, "main").await.unwrap();
        assert_eq!(
            commits,
            vec![CommitMessage {
                subject: "Only commit".to_string(),
                body: String::new(),
            }]
        );
    }
}
