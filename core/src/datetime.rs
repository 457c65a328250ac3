//! Wire timestamps for the time-tracking API.
//!
//! The API transmits instants as Unix epoch milliseconds — quoted as a
//! decimal string in response bodies, bare digits in query strings.
//! [`Timestamp`] keeps a `chrono` instant in memory and converts at the
//! serde boundary, accepting either wire form on input.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An instant transmitted as epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Builds a timestamp from epoch milliseconds. `None` when the value
    /// falls outside chrono's representable range.
    pub fn from_millis(millis: i64) -> Option<Self> {
        DateTime::from_timestamp_millis(millis).map(Timestamp)
    }

    /// Epoch milliseconds, the wire representation.
    pub fn millis(&self) -> i64 {
        self.0.timestamp_millis()
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(value: DateTime<Utc>) -> Self {
        Timestamp(value)
    }
}

impl From<Timestamp> for DateTime<Utc> {
    fn from(value: Timestamp) -> Self {
        value.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.millis())
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.millis())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MillisVisitor;

        impl Visitor<'_> for MillisVisitor {
            type Value = Timestamp;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("epoch milliseconds as an integer or decimal string")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Timestamp, E> {
                Timestamp::from_millis(v)
                    .ok_or_else(|| E::custom(format!("timestamp out of range: {v}")))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Timestamp, E> {
                let v = i64::try_from(v)
                    .map_err(|_| E::custom(format!("timestamp out of range: {v}")))?;
                self.visit_i64(v)
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Timestamp, E> {
                let millis: i64 = v
                    .parse()
                    .map_err(|_| E::custom(format!("invalid timestamp string: {v:?}")))?;
                self.visit_i64(millis)
            }
        }

        deserializer.deserialize_any(MillisVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn millis_roundtrip() {
        let ts = Timestamp::from_millis(1_719_830_000_000).unwrap();
        assert_eq!(ts.millis(), 1_719_830_000_000);
    }

    #[test]
    fn deserializes_from_quoted_millis() {
        let ts: Timestamp = serde_json::from_str(r#""1719830000000""#).unwrap();
        assert_eq!(ts.millis(), 1_719_830_000_000);
    }

    #[test]
    fn deserializes_from_bare_millis() {
        let ts: Timestamp = serde_json::from_str("1719830000000").unwrap();
        assert_eq!(ts.millis(), 1_719_830_000_000);
    }

    #[test]
    fn deserializes_negative_millis() {
        // Instants before 1970 are valid.
        let ts: Timestamp = serde_json::from_str("-1000").unwrap();
        assert_eq!(ts.millis(), -1000);
    }

    #[test]
    fn serializes_as_quoted_millis() {
        let ts = Timestamp::from_millis(1_719_830_000_000).unwrap();
        assert_eq!(serde_json::to_string(&ts).unwrap(), r#""1719830000000""#);
    }

    #[test]
    fn rejects_non_numeric_string() {
        let result: Result<Timestamp, _> = serde_json::from_str(r#""yesterday""#);
        assert!(result.is_err());
    }
}
