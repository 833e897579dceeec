//! The seam between the pipeline and whatever supplies commit metadata.
//!
//! The pipeline only ever sees [`MetadataSource`]; the process-backed
//! implementation lives in [`crate::git`], and tests substitute a fixed
//! source. Explicit caller overrides are layered on top of the source by the
//! `resolve_*` functions so a fully overridden run never touches version
//! control at all.

use async_trait::async_trait;

use crate::CommitDate;
use crate::Result;

/// The number of characters an abbreviated commit hash is truncated to.
const ABBREVIATED_HASH_LEN: usize = 7;

/// A supplier of commit metadata for the configured repository.
#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// Gets the full hash of the most recent commit.
    async fn head_commit_hash(&self) -> Result<String>;

    /// Gets the Unix timestamp of the most recent commit.
    async fn head_commit_timestamp(&self) -> Result<i64>;

    /// Renders the most recent commit through the tool's own pretty
    /// formatter, with dates rendered per `date_format` in UTC.
    async fn formatted_head(&self, pretty: &str, date_format: &str) -> Result<String>;
}

/// Normalizes a commit ref to the abbreviated form used in build names:
/// truncated to seven characters and lowercased.
pub fn abbreviate_hash(full: &str) -> String {
    let end = full
        .char_indices()
        .nth(ABBREVIATED_HASH_LEN)
        .map(|(i, _)| i)
        .unwrap_or(full.len());
    full[..end].to_lowercase()
}

/// Resolves the abbreviated commit hash, preferring an explicit ref.
pub async fn resolve_commit_hash(
    source: &dyn MetadataSource,
    explicit_ref: Option<&str>,
) -> Result<String> {
    match explicit_ref {
        Some(explicit) => Ok(abbreviate_hash(explicit)),
        None => Ok(abbreviate_hash(&source.head_commit_hash().await?)),
    }
}

/// Resolves the commit date, preferring an explicit override.
///
/// The override is validated and parsed before any source query happens, so
/// a malformed override never causes an external invocation.
pub async fn resolve_commit_date(
    source: &dyn MetadataSource,
    explicit_date: Option<&str>,
) -> Result<CommitDate> {
    match explicit_date {
        Some(explicit) => CommitDate::parse_override(explicit),
        None => CommitDate::from_unix(source.head_commit_timestamp().await?),
    }
}

/// The metadata a single pipeline run resolves exactly once and then derives
/// every output from.
#[derive(Debug, Clone)]
pub struct BuildMetadata {
    /// The abbreviated commit hash (seven lowercase hex characters).
    pub commit_hash: String,

    /// The commit date, in UTC.
    pub commit_date: CommitDate,

    /// The project name, lowercased.
    pub project_name: String,

    /// The branch name, lowercased.
    pub branch_name: String,

    /// The run's numeric sequence identifier.
    pub run_number: u64,

    /// The build configuration, if one was supplied.
    pub build_configuration: Option<String>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn hashes_are_truncated_and_lowercased() {
        assert_eq!(abbreviate_hash("ABC1234DEF5678"), "abc1234");
        assert_eq!(abbreviate_hash("abc1234"), "abc1234");
        assert_eq!(abbreviate_hash("abc12"), "abc12");
    }
}
