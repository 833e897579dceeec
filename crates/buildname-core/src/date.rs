//! Commit date normalization.
//!
//! All date handling is UTC. A commit date enters the system either as a
//! Unix timestamp queried from version control or as an explicit caller
//! override; it leaves as the two zero-padded fields build names are
//! composed from: `YYMMDD-HHMMSS` and `MMDD`.

use chrono::DateTime;
use chrono::NaiveDateTime;
use chrono::Utc;

use crate::Error;
use crate::Result;

/// The suffix an explicit date override must carry.
///
/// Calling platforms are prone to rewriting bare datetime strings into the
/// runner's local time zone when they interpolate them; the suffix keeps the
/// value opaque to that rewriting and is stripped before parsing.
pub const OVERRIDE_SUFFIX: &str = "!!";

/// A commit date with UTC semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitDate(DateTime<Utc>);

impl CommitDate {
    /// Creates a commit date from Unix epoch seconds.
    pub fn from_unix(seconds: i64) -> Result<Self> {
        DateTime::from_timestamp(seconds, 0)
            .map(Self)
            .ok_or(Error::InvalidTimestamp(seconds))
    }

    /// Parses an explicit date override.
    ///
    /// The override must end with [`OVERRIDE_SUFFIX`]; this is checked before
    /// anything else so that a malformed override fails the run before any
    /// external query is attempted. The remainder is parsed as RFC 3339, or
    /// as a bare `YYYY-MM-DDTHH:MM:SS` taken to be UTC.
    pub fn parse_override(raw: &str) -> Result<Self> {
        let Some(stripped) = raw.strip_suffix(OVERRIDE_SUFFIX) else {
            return Err(Error::MalformedDateOverride(raw.to_string()));
        };

        match DateTime::parse_from_rfc3339(stripped) {
            Ok(date) => Ok(Self(date.with_timezone(&Utc))),
            Err(_) => NaiveDateTime::parse_from_str(stripped, "%Y-%m-%dT%H:%M:%S")
                .map(|naive| Self(naive.and_utc()))
                .map_err(|source| Error::InvalidDateOverride {
                    date: raw.to_string(),
                    source,
                }),
        }
    }

    /// Gets the `YYMMDD-HHMMSS` form of the date.
    pub fn long(&self) -> String {
        self.0.format("%y%m%d-%H%M%S").to_string()
    }

    /// Gets the `MMDD` form of the date.
    pub fn short(&self) -> String {
        self.0.format("%m%d").to_string()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    /// 2024-03-05T07:08:09Z.
    const TIMESTAMP: i64 = 1709622489;

    #[test]
    fn unix_timestamp_round_trips_to_padded_utc_fields() {
        let date = CommitDate::from_unix(TIMESTAMP).unwrap();
        assert_eq!(date.long(), "240305-070809");
        assert_eq!(date.short(), "0305");
    }

    #[test]
    fn override_without_suffix_is_rejected() {
        let err = CommitDate::parse_override("2024-03-05T07:08:09").unwrap_err();
        assert!(matches!(err, Error::MalformedDateOverride(_)));
    }

    #[test]
    fn override_with_suffix_parses_as_utc() {
        let date = CommitDate::parse_override("2024-03-05T07:08:09!!").unwrap();
        assert_eq!(date, CommitDate::from_unix(TIMESTAMP).unwrap());
    }

    #[test]
    fn rfc3339_override_is_converted_to_utc() {
        let date = CommitDate::parse_override("2024-03-05T09:08:09+02:00!!").unwrap();
        assert_eq!(date.long(), "240305-070809");
    }

    #[test]
    fn unparseable_override_is_rejected() {
        let err = CommitDate::parse_override("yesterday!!").unwrap_err();
        assert!(matches!(err, Error::InvalidDateOverride { .. }));
    }

    #[test]
    fn out_of_range_timestamp_is_rejected() {
        let err = CommitDate::from_unix(i64::MAX).unwrap_err();
        assert!(matches!(err, Error::InvalidTimestamp(_)));
    }
}
