//! Timezone handling for measurement and log timestamps.
//!
//! History timestamps are stored timezone-naive. When a client sends an
//! offset-bearing timestamp, the offset is discarded and the wall-clock
//! time is kept as written. It is never converted to another zone.

use chrono::{DateTime, NaiveDateTime};

/// Parse a timestamp string, dropping any trailing offset.
pub fn parse_naive(value: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    match DateTime::parse_from_rfc3339(value) {
        Ok(dt) => Ok(dt.naive_local()),
        Err(_) => value.parse::<NaiveDateTime>(),
    }
}

/// Serde adapter for `NaiveDateTime` fields fed by client input.
pub mod naive {
    use chrono::NaiveDateTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format("%Y-%m-%dT%H:%M:%S%.f").to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_naive(&raw).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};

    #[test]
    fn offset_is_discarded_not_converted() {
        let parsed = parse_naive("2024-05-01T10:30:00+05:00").unwrap();
        assert_eq!(parsed.hour(), 10);
        assert_eq!(parsed.minute(), 30);

        let parsed = parse_naive("2024-05-01T10:30:00Z").unwrap();
        assert_eq!(parsed.hour(), 10);
    }

    #[test]
    fn naive_input_parses_as_is() {
        let parsed = parse_naive("2024-05-01T10:30:00").unwrap();
        assert_eq!(
            parsed.date(),
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
        );
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(parse_naive("yesterday").is_err());
    }
}
