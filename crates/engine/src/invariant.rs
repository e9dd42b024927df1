//! Bitemporal overlap guard.
//!
//! Two records for the same key may overlap on one time axis but never on
//! both at once; otherwise point resolution would be ambiguous.

use chronica_types::VersionedRecord;

/// Returns `true` when the two records occupy intersecting regions on both
/// the transaction-time and valid-time axes.
pub(crate) fn bitemporal_overlap<V, W>(
    a: &VersionedRecord<V>,
    b: &VersionedRecord<W>,
) -> bool {
    a.tx_time.overlaps(&b.tx_time) && a.valid_time.overlaps(&b.valid_time)
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

    fn record(tx: Interval, valid: Interval) -> VersionedRecord<&'static str> {
        VersionedRecord { key: "A".to_owned(), value: "v", tx_time: tx, valid_time: valid }
    }

    #[test]
    fn test_overlap_on_both_axes_detected() {
        let a = record(Interval::open_ended(day(1)), Interval::open_ended(day(1)));
        let b = record(Interval::open_ended(day(2)), Interval::bounded(day(1), day(5)));
        assert!(bitemporal_overlap(&a, &b));
    }

    #[test]
    fn test_single_axis_overlap_allowed() {
        // same valid-time region, disjoint transaction-time: a closed record
        // and its successor
        let a = record(Interval::bounded(day(1), day(3)), Interval::open_ended(day(1)));
        let b = record(Interval::open_ended(day(3)), Interval::open_ended(day(1)));
        assert!(!bitemporal_overlap(&a, &b));

        // same transaction-time layer, disjoint valid-time slivers
        let c = record(Interval::open_ended(day(3)), Interval::bounded(day(1), day(2)));
        let d = record(Interval::open_ended(day(3)), Interval::bounded(day(2), day(4)));
        assert!(!bitemporal_overlap(&c, &d));
    }
}
