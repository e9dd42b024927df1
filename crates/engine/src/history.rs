//! Ordering for the `history` operation.

use chronica_types::VersionedRecord;

/// Sorts versions by descending transaction-time end, then descending
/// valid-time end, with open ends treated as later than any concrete
/// instant on both keys.
///
/// Most recently believed versions come first; among versions retired (or
/// still held) at the same transaction instant, the one reaching furthest
/// into valid time leads.
pub(crate) fn sort_for_history<V>(records: &mut [VersionedRecord<V>]) {
    records.sort_by(|a, b| {
        (b.tx_time.end, b.valid_time.end).cmp(&(a.tx_time.end, a.valid_time.end))
    });
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use chronica_types::Interval;
    use chrono::{DateTime, TimeZone, Utc};

    use super::*;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2022, 1, d, 0, 0, 0).single().expect("valid date")
    }

    fn record(value: &'static str, tx: Interval, valid: Interval) -> VersionedRecord<&'static str> {
        VersionedRecord { key: "A".to_owned(), value, tx_time: tx, valid_time: valid }
    }

    #[test]
    fn test_open_transaction_end_sorts_first() {
        let mut records = vec![
            record("closed", Interval::bounded(day(1), day(3)), Interval::open_ended(day(1))),
            record("current-late", Interval::open_ended(day(3)), Interval::open_ended(day(3))),
            record("current-early", Interval::open_ended(day(3)), Interval::bounded(day(1), day(3))),
        ];
        sort_for_history(&mut records);

        let order: Vec<_> = records.iter().map(|r| r.value).collect();
        assert_eq!(order, vec!["current-late", "current-early", "closed"]);
    }

    #[test]
    fn test_closed_ends_sort_descending() {
        let mut records = vec![
            record("first", Interval::bounded(day(1), day(2)), Interval::open_ended(day(1))),
            record("second", Interval::bounded(day(1), day(4)), Interval::open_ended(day(1))),
        ];
        sort_for_history(&mut records);

        let order: Vec<_> = records.iter().map(|r| r.value).collect();
        assert_eq!(order, vec!["second", "first"]);
    }
}
