//! Timestamp parsing for server-assigned dates.
//!
//! The story API emits either RFC 3339 timestamps or zone-less ISO 8601
//! timestamps (`2024-01-15T10:30:00.123456`). Zone-less values are UTC.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Parses an RFC 3339 or zone-less ISO 8601 timestamp.
///
/// # Examples
///
/// ```
/// use storyloom_domain::common::parse_timestamp;
/// use chrono::Datelike;
///
/// let dt = parse_timestamp("2024-01-15T10:30:00Z").unwrap();
/// assert_eq!(dt.year(), 2024);
///
/// let naive = parse_timestamp("2024-01-15T10:30:00.250000").unwrap();
/// assert_eq!(naive, dt + chrono::Duration::milliseconds(250));
/// ```
///
/// # Errors
///
/// Returns `chrono::ParseError` if the string matches neither format.
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| s.parse::<NaiveDateTime>().map(|naive| naive.and_utc()))
}

/// Serde adapter for optional timestamps. Pair with `#[serde(default)]`.
pub mod option_timestamp {
    use chrono::{DateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(dt) => serializer.serialize_some(&dt.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) => super::parse_timestamp(&raw).map(Some).map_err(de::Error::custom),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone, Timelike};

    #[test]
    fn test_parse_rfc3339() {
        let dt = parse_timestamp("2024-01-15T10:30:00Z").unwrap();
        assert_eq!(dt.year(), 2024);
        assert_eq!(dt.month(), 1);
        assert_eq!(dt.day(), 15);
        assert_eq!(dt.hour(), 10);
        assert_eq!(dt.minute(), 30);
    }

    #[test]
    fn test_parse_with_offset_converts_to_utc() {
        let dt = parse_timestamp("2024-01-15T10:30:00+05:00").unwrap();
        assert_eq!(dt.hour(), 5);
    }

    #[test]
    fn test_parse_naive_is_utc() {
        let dt = parse_timestamp("2024-01-15T10:30:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_invalid() {
        assert!(parse_timestamp("not-a-date").is_err());
        assert!(parse_timestamp("").is_err());
        assert!(parse_timestamp("2024-01-15").is_err());
    }
}
