//! Temporal option sets for reads and writes.
//!
//! Absence is meaningful: an unset read coordinate defaults to the store
//! clock's current instant, an unset `valid_time` defaults to the write's
//! `now`, and an unset `end_valid_time` leaves the valid-time interval open.

use bon::Builder;
use chrono::{DateTime, Utc};

/// Bitemporal coordinates for `get` and `list`.
#[derive(Debug, Clone, Copy, Default, Builder)]
pub struct ReadOptions {
    /// Valid-time point to resolve at. Defaults to now.
    pub as_of_valid_time: Option<DateTime<Utc>>,
    /// Transaction-time point to resolve at. Defaults to now.
    pub as_of_transaction_time: Option<DateTime<Utc>>,
}

/// Valid-time window for `set` and `delete`.
#[derive(Debug, Clone, Copy, Default, Builder)]
pub struct WriteOptions {
    /// Inclusive valid-time start. Defaults to now.
    pub valid_time: Option<DateTime<Utc>>,
    /// Exclusive valid-time end. Unset means open.
    pub end_valid_time: Option<DateTime<Utc>>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_defaults_leave_coordinates_unset() {
        let read = ReadOptions::default();
        assert!(read.as_of_valid_time.is_none());
        assert!(read.as_of_transaction_time.is_none());

        let write = WriteOptions::default();
        assert!(write.valid_time.is_none());
        assert!(write.end_valid_time.is_none());
    }

    #[test]
    fn test_builder_sets_fields() {
        let t = Utc.with_ymd_and_hms(2022, 1, 2, 0, 0, 0).single().expect("valid date");
        let write = WriteOptions::builder().valid_time(t).build();
        assert_eq!(write.valid_time, Some(t));
        assert!(write.end_valid_time.is_none());
    }
}
