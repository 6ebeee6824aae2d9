//! git command executor
//!
//! Handles running git commands against a repository working directory
//! and capturing their output for the parsers. Stdout is fully buffered
//! before any parsing starts.

use std::path::PathBuf;

use tokio::process::Command;
use tracing::debug;

use crate::model::{ChangeSet, ChangeSetDetail, FileStatus};

use super::ScmError;
use super::constants::{self, commands, flags, markers};
use super::parser::Parser;
use super::reader::StringReader;

/// Executor for git commands
#[derive(Debug, Clone)]
pub struct GitExecutor {
    /// Path to the repository working directory
    repo_path: PathBuf,
}

impl GitExecutor {
    /// Create a new executor for a repository path
    pub fn new(repo_path: impl Into<PathBuf>) -> Self {
        Self {
            repo_path: repo_path.into(),
        }
    }

    /// The repository working directory this executor targets
    pub fn repo_path(&self) -> &PathBuf {
        &self.repo_path
    }

    /// Run a git command and return stdout
    ///
    /// The child runs with the invariant locale so commit dates keep
    /// their fixed English format.
    pub async fn run(&self, args: &[&str]) -> Result<String, ScmError> {
        let (stdout, stderr, status) = self.run_raw(args).await?;
        match status {
            Some(0) => Ok(stdout),
            code => Err(ScmError::CommandFailed {
                stderr,
                exit_code: code.unwrap_or(-1),
            }),
        }
    }

    /// Run a git command, returning output even on non-zero exit
    ///
    /// Some commands report expected conditions through a failing exit
    /// code (commit with a clean tree); callers inspect stdout first.
    async fn run_raw(&self, args: &[&str]) -> Result<(String, String, Option<i32>), ScmError> {
        debug!("git {}", args.join(" "));

        let output = Command::new(constants::GIT_COMMAND)
            .args(args)
            .current_dir(&self.repo_path)
            .env("LC_ALL", "C")
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ScmError::GitNotFound
                } else {
                    ScmError::IoError(e)
                }
            })?;

        Ok((
            String::from_utf8_lossy(&output.stdout).into_owned(),
            String::from_utf8_lossy(&output.stderr).into_owned(),
            output.status.code(),
        ))
    }

    /// Get the git version
    pub async fn version(&self) -> Result<String, ScmError> {
        let output = self.run(&[flags::VERSION]).await?;
        // Output format: "git version 2.39.2"
        let trimmed = output.trim();
        Ok(trimmed
            .strip_prefix(markers::VERSION_PREFIX)
            .unwrap_or(trimmed)
            .to_string())
    }

    /// Check if the installed git version is supported
    pub async fn check_version(&self) -> Result<(), ScmError> {
        let version = self.version().await?;
        if !is_version_supported(&version, constants::MIN_GIT_VERSION) {
            return Err(ScmError::ParseError(format!(
                "git {} is older than the minimum supported {}",
                version,
                constants::MIN_GIT_VERSION
            )));
        }
        Ok(())
    }

    /// Get the id of the current HEAD commit
    pub async fn current_id(&self) -> Result<String, ScmError> {
        let output = self.run(&[commands::REV_PARSE, "HEAD"]).await?;
        Ok(output.trim().to_string())
    }

    /// Initialize a repository in the working directory
    pub async fn initialize(&self) -> Result<(), ScmError> {
        self.run(&[commands::INIT]).await?;
        self.run(&[commands::CONFIG, "core.autocrlf", "true"])
            .await?;
        Ok(())
    }

    /// Run `status --porcelain` and parse the output
    pub async fn status(&self) -> Result<Vec<FileStatus>, ScmError> {
        let output = self.run(&[commands::STATUS, flags::PORCELAIN]).await?;
        Parser::parse_status(&output).collect()
    }

    /// Run `log --all` and parse the output into change sets
    pub async fn log(&self) -> Result<Vec<ChangeSet>, ScmError> {
        let output = self.run(&[commands::LOG, flags::ALL]).await?;
        Parser::parse_log(&output).collect()
    }

    /// Run `log --all` with paging and parse the output
    pub async fn log_page(&self, skip: usize, take: usize) -> Result<Vec<ChangeSet>, ScmError> {
        let skip_arg = skip.to_string();
        let take_arg = take.to_string();
        let output = self
            .run(&[commands::LOG, flags::ALL, "--skip", &skip_arg, "-n", &take_arg])
            .await?;
        Parser::parse_log(&output).collect()
    }

    /// Stage one path
    pub async fn add(&self, path: &str) -> Result<(), ScmError> {
        self.run(&[commands::ADD, path]).await?;
        Ok(())
    }

    /// Stage everything under the working directory
    pub async fn add_all(&self) -> Result<(), ScmError> {
        self.run(&[commands::ADD, "."]).await?;
        Ok(())
    }

    /// Remove one path from the index, keeping it on disk
    pub async fn remove(&self, path: &str) -> Result<(), ScmError> {
        self.run(&[commands::RM, path, flags::CACHED]).await?;
        Ok(())
    }

    /// Commit staged changes
    ///
    /// Returns `None` without touching `show` when the tree was already
    /// clean; otherwise the new HEAD commit.
    pub async fn commit(
        &self,
        message: &str,
        author: &str,
    ) -> Result<Option<ChangeSet>, ScmError> {
        let author_arg = format!("--author={}", author);
        let (stdout, stderr, status) = self
            .run_raw(&[commands::COMMIT, "-m", message, &author_arg])
            .await?;

        if stdout.contains(markers::WORKING_DIR_CLEAN) {
            return Ok(None);
        }
        if status != Some(0) {
            return Err(ScmError::CommandFailed {
                stderr,
                exit_code: status.unwrap_or(-1),
            });
        }

        let output = self.run(&[commands::SHOW, "HEAD"]).await?;
        let mut reader = StringReader::new(&output);
        Ok(Some(Parser::parse_commit(&mut reader)?))
    }

    /// Check out a commit, discarding local modifications
    pub async fn checkout(&self, id: &str) -> Result<(), ScmError> {
        self.run(&[commands::CHECKOUT, id, flags::FORCE]).await?;
        Ok(())
    }

    /// Get the full detail of one commit
    ///
    /// Combines the patch/numstat form of `show` with a `--name-status`
    /// pass that fills in per-file change types.
    pub async fn details(&self, id: &str) -> Result<ChangeSetDetail, ScmError> {
        let output = self
            .run(&[
                commands::SHOW,
                id,
                flags::MERGE_PARENTS,
                flags::PATCH,
                flags::NUMSTAT,
                flags::SHORTSTAT,
            ])
            .await?;
        let mut reader = StringReader::new(&output);
        let mut detail = Parser::parse_show(&mut reader, true)?;

        let statuses = self
            .run(&[
                commands::SHOW,
                id,
                flags::MERGE_PARENTS,
                flags::NAME_STATUS,
                "--format=%H",
            ])
            .await?;
        Parser::parse_name_status(&statuses, &mut detail)?;

        Ok(detail)
    }

    /// Get the staged working-tree changes, if any
    ///
    /// An empty status short-circuits to `None`; otherwise everything
    /// is staged and the staged diff is parsed into a detail with no
    /// change set attached.
    pub async fn working_changes(&self) -> Result<Option<ChangeSetDetail>, ScmError> {
        let status = self.run(&[commands::STATUS, flags::PORCELAIN]).await?;
        if status.trim().is_empty() {
            return Ok(None);
        }

        self.add_all().await?;

        let output = self
            .run(&[
                commands::DIFF,
                flags::NO_EXT_DIFF,
                flags::PATCH,
                flags::NUMSTAT,
                flags::SHORTSTAT,
                flags::STAGED,
            ])
            .await?;
        let mut reader = StringReader::new(&output);
        let mut detail = Parser::parse_show(&mut reader, false)?;

        let statuses = self
            .run(&[commands::DIFF, flags::NAME_STATUS, flags::STAGED])
            .await?;
        Parser::parse_name_status(&statuses, &mut detail)?;

        Ok(Some(detail))
    }

    /// Is the repository empty (no branches yet)?
    pub async fn is_empty(&self) -> Result<bool, ScmError> {
        let output = self.run(&[commands::BRANCH]).await?;
        Ok(output.trim().is_empty())
    }
}

/// Compare version strings (simple semver comparison)
///
/// Handles suffixes like "2.39.2.windows.1" by ignoring anything past
/// the third numeric component.
fn is_version_supported(version: &str, minimum: &str) -> bool {
    let parse_version = |v: &str| -> Option<(u32, u32, u32)> {
        let parts: Vec<&str> = v.split('.').collect();
        if parts.len() >= 2 {
            let major = parts[0].parse().ok()?;
            let minor = parts[1].parse().ok()?;
            let patch = parts
                .get(2)
                .and_then(|p| p.split('-').next().and_then(|n| n.parse().ok()))
                .unwrap_or(0);
            Some((major, minor, patch))
        } else {
            None
        }
    };

    match (parse_version(version), parse_version(minimum)) {
        (Some(v), Some(m)) => v >= m,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_comparison() {
        assert!(is_version_supported("2.39.2", "1.7.0"));
        assert!(is_version_supported("1.7.0", "1.7.0"));
        assert!(!is_version_supported("1.6.9", "1.7.0"));
    }

    #[test]
    fn test_version_comparison_vendor_suffix() {
        assert!(is_version_supported("2.39.2.windows.1", "1.7.0"));
        assert!(is_version_supported("2.43.0-rc0", "1.7.0"));
    }

    #[test]
    fn test_executor_repo_path() {
        let executor = GitExecutor::new("/tmp/site");
        assert_eq!(executor.repo_path(), &PathBuf::from("/tmp/site"));
    }
}
