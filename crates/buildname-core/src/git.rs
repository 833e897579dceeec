//! The process-backed metadata source.
//!
//! Queries are issued to the `git` binary against a configured working
//! directory. The child environment forces `TZ=UTC0` so that any date the
//! tool renders itself (short-form mode delegates datetime formatting to
//! `--date=format-local:`) comes out in UTC regardless of the host.

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::Error;
use crate::Result;
use crate::metadata::MetadataSource;

/// A metadata source that shells out to `git`.
#[derive(Debug, Clone)]
pub struct GitMetadataSource {
    /// The working directory for queries.
    repository: PathBuf,
}

impl GitMetadataSource {
    /// Creates a source querying the repository at the given path.
    pub fn new(repository: impl Into<PathBuf>) -> Self {
        Self {
            repository: repository.into(),
        }
    }

    /// Runs a `git` subcommand and captures its stdout.
    ///
    /// A missing binary and a non-zero exit are distinct failures; both
    /// abort the remainder of the run.
    async fn run(&self, args: &[&str]) -> Result<String> {
        let git = which::which("git").map_err(Error::GitNotFound)?;

        debug!(
            "running `git {}` in `{}`",
            args.join(" "),
            self.repository.display()
        );

        let output = Command::new(git)
            .args(args)
            .current_dir(&self.repository)
            .env("TZ", "UTC0")
            .stdin(Stdio::null())
            .output()
            .await?;

        if !output.status.success() {
            return Err(Error::GitFailure {
                command: args.join(" "),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl MetadataSource for GitMetadataSource {
    async fn head_commit_hash(&self) -> Result<String> {
        let output = self.run(&["log", "-1", "--pretty=%H"]).await?;
        Ok(output.trim().to_string())
    }

    async fn head_commit_timestamp(&self) -> Result<i64> {
        let output = self.run(&["log", "-1", "--pretty=%ct"]).await?;
        let timestamp = output.trim();
        timestamp.parse().map_err(|_| Error::UnexpectedToolOutput {
            command: "log -1 --pretty=%ct".to_string(),
            output: timestamp.to_string(),
        })
    }

    async fn formatted_head(&self, pretty: &str, date_format: &str) -> Result<String> {
        let output = self
            .run(&[
                "log",
                "-1",
                &format!("--date=format-local:{date_format}"),
                &format!("--pretty={pretty}"),
            ])
            .await?;
        Ok(output.trim().to_string())
    }
}
