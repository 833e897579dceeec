//! Errors produced while resolving metadata and deriving build names.

use thiserror::Error;

use crate::date;

/// An error that can occur when deriving build names.
#[derive(Error, Debug)]
pub enum Error {
    /// A required input was not supplied.
    #[error("no `{0}` input was supplied")]
    MissingInput(&'static str),

    /// A required environment value was not present at capture time.
    #[error("`{0}` is not set in the environment")]
    MissingEnvironment(&'static str),

    /// An explicit date override was supplied without the anti-interpolation
    /// suffix.
    #[error(
        "date override `{0}` is missing the `{marker}` suffix",
        marker = date::OVERRIDE_SUFFIX
    )]
    MalformedDateOverride(String),

    /// An explicit date override could not be parsed once the suffix was
    /// stripped.
    #[error("invalid date override `{date}`")]
    InvalidDateOverride {
        /// The override as supplied by the caller, suffix included.
        date: String,

        /// The underlying parse error.
        #[source]
        source: chrono::ParseError,
    },

    /// The version-control tool reported a commit timestamp that does not
    /// map to a valid instant.
    #[error("commit timestamp `{0}` is out of range")]
    InvalidTimestamp(i64),

    /// The version-control tool reported output that could not be parsed.
    #[error("unexpected output from `git {command}`: `{output}`")]
    UnexpectedToolOutput {
        /// The subcommand that produced the output.
        command: String,

        /// The output that failed to parse.
        output: String,
    },

    /// The `git` binary was not found on the execution path.
    #[error("failed to locate `git` on the execution path")]
    GitNotFound(#[source] which::Error),

    /// An invoked `git` command exited with a non-zero status.
    #[error("`git {command}` exited with {status}: {stderr}")]
    GitFailure {
        /// The subcommand that failed.
        command: String,

        /// The exit status of the process.
        status: std::process::ExitStatus,

        /// Anything the process wrote to stderr.
        stderr: String,
    },

    /// A word list asset was empty.
    #[error("the {0} word list is empty")]
    EmptyWordList(&'static str),

    /// An I/O error occurred while invoking the version-control tool.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A [`Result`](std::result::Result) with an [`Error`](enum@self::Error).
pub type Result<T> = std::result::Result<T, Error>;
