//! Timestamp value object for credential issue and expiry instants.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Returns the timestamp as Unix seconds.
    pub fn as_unix_secs(&self) -> i64 {
        self.0.timestamp()
    }

    /// Adds a std duration, keeping sub-minute precision.
    ///
    /// Returns `None` when the duration or the result is outside chrono's range.
    pub fn checked_add(&self, duration: std::time::Duration) -> Option<Self> {
        let duration = chrono::Duration::from_std(duration).ok()?;
        self.0.checked_add_signed(duration).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn at(secs: i64) -> Timestamp {
        Timestamp(DateTime::from_timestamp(secs, 0).unwrap())
    }

    #[test]
    fn timestamp_now_creates_current_time() {
        let before = Utc::now();
        let ts = Timestamp::now();
        let after = Utc::now();

        assert!(ts.as_datetime() >= &before);
        assert!(ts.as_datetime() <= &after);
    }

    #[test]
    fn timestamp_serializes_to_json() {
        // 2024-01-15T00:00:00Z
        let json = serde_json::to_string(&at(1705276800)).unwrap();
        assert!(json.contains("2024-01-15"));
    }

    #[test]
    fn checked_add_keeps_seconds() {
        let ts = at(1000);

        let half_hour = ts.checked_add(Duration::from_secs(30 * 60)).unwrap();
        let sub_minute = ts.checked_add(Duration::from_secs(45)).unwrap();

        assert_eq!(half_hour.as_unix_secs(), 2800);
        assert_eq!(sub_minute.as_unix_secs(), 1045);
        assert!(sub_minute > ts);
    }

    #[test]
    fn checked_add_out_of_range_is_none() {
        assert_eq!(at(1000).checked_add(Duration::MAX), None);
    }
}
