//! Literal placeholder substitution over build-name templates.
//!
//! A template is a plain string containing zero or more recognized tokens
//! written as `{token}`. Substitution is a single-pass literal replacement:
//! every occurrence of the token is replaced, values are never re-scanned
//! for further tokens, and unrecognized placeholders are left untouched.

/// The token resolved to the project name.
pub const PROJECT: &str = "project";

/// The token resolved to the uppercased build configuration.
pub const CONFIGURATION: &str = "configuration";

/// The token resolved to the numbered branch.
pub const BRANCH: &str = "branch";

/// The token resolved to the `YYMMDD-HHMMSS` commit datetime.
pub const DATETIME: &str = "datetime";

/// The token resolved to the codename.
pub const SHORTNAME: &str = "shortname";

/// The token resolved to the abbreviated commit hash.
pub const HASH: &str = "hash";

/// The token resolved to a platform tag, once per platform variant.
pub const PLATFORM: &str = "platform";

/// Replaces every occurrence of `{token}` in `template` with `value`.
///
/// A template that does not contain the token is returned unchanged.
pub fn substitute(template: &str, token: &str, value: &str) -> String {
    template.replace(&format!("{{{token}}}"), value)
}
