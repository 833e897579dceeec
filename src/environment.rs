//! Capture of the CI environment at the process boundary.
//!
//! The pipeline is a pure function of its inputs; this module is the one
//! place the process environment is read. Everything the pipeline may need
//! is captured up front into a [`CiEnvironment`] value.

use buildname_core::CiEnvironment;
use tracing::warn;

/// Captures the environment-derived values the pipeline consumes.
///
/// Unset and empty variables are captured as `None`; the pipeline decides
/// whether an absent value is an error.
pub fn capture() -> CiEnvironment {
    CiEnvironment {
        repository_owner: var("GITHUB_REPOSITORY_OWNER"),
        repository: var("GITHUB_REPOSITORY"),
        ref_name: var("GITHUB_REF_NAME"),
        run_number: var("GITHUB_RUN_NUMBER").and_then(|value| match value.parse() {
            Ok(number) => Some(number),
            Err(_) => {
                warn!("ignoring non-numeric GITHUB_RUN_NUMBER `{}`", value);
                None
            }
        }),
    }
}

/// Reads one environment variable, treating empty as unset.
fn var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}
