//! Write planning: the edits one mutation applies.
//!
//! A mutation at instant `now` replaces the valid-time window it targets
//! within the currently-believed layer. Every record overlapping the window
//! in valid time is closed on the transaction-time axis, the parts of its
//! valid-time range falling outside the window (the overhangs) are re-emitted
//! as fresh records so the surrounding facts keep holding, and a `set` emits
//! one new record for the window itself. The plan is computed in full before
//! the store applies any of it.

use chrono::{DateTime, Utc};
use chronica_types::{Interval, VersionedRecord};

/// The edits computed for one mutation.
#[derive(Debug)]
pub(crate) struct WritePlan<V> {
    /// Indices into the key's version list of records to close at `now`.
    pub close: Vec<usize>,
    /// Records to append, all stamped with transaction time `[now, open)`.
    pub emit: Vec<VersionedRecord<V>>,
}

/// Plans a mutation of `key` over the valid-time `window` executed at `now`.
///
/// `value` is `Some` for a set and `None` for a delete; a delete produces the
/// same closes and overhang re-emits but no new record, leaving a hole in the
/// current layer's valid-time coverage.
pub(crate) fn plan_mutation<V: Clone>(
    key: &str,
    versions: &[VersionedRecord<V>],
    value: Option<V>,
    window: Interval,
    now: DateTime<Utc>,
) -> WritePlan<V> {
    let mut plan = WritePlan { close: Vec::new(), emit: Vec::new() };

    for (idx, version) in versions.iter().enumerate() {
        // only the currently-believed layer participates
        if !version.tx_time.contains(now) {
            continue;
        }
        if !version.valid_time.overlaps(&window) {
            continue;
        }
        plan.close.push(idx);
        for overhang in version.valid_time.overhangs_outside(&window) {
            plan.emit.push(VersionedRecord {
                key: key.to_owned(),
                value: version.value.clone(),
                tx_time: Interval::open_ended(now),
                valid_time: overhang,
            });
        }
    }

    if let Some(value) = value {
        plan.emit.push(VersionedRecord {
            key: key.to_owned(),
            value,
            tx_time: Interval::open_ended(now),
            valid_time: window,
        });
    }

    plan
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use chronica_types::IntervalEnd;
    use chrono::TimeZone;

    use super::*;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2022, 1, d, 0, 0, 0).single().expect("valid date")
    }

    fn version(value: &'static str, tx: Interval, valid: Interval) -> VersionedRecord<&'static str> {
        VersionedRecord { key: "A".to_owned(), value, tx_time: tx, valid_time: valid }
    }

    #[test]
    fn test_write_inside_existing_interval() {
        let versions =
            vec![version("old", Interval::open_ended(day(1)), Interval::open_ended(day(1)))];
        let plan = plan_mutation(
            "A",
            &versions,
            Some("new"),
            Interval::bounded(day(2), day(3)),
            day(4),
        );

        assert_eq!(plan.close, vec![0]);
        assert_eq!(plan.emit.len(), 3, "two overhangs plus the new record");
        assert_eq!(plan.emit[0].valid_time, Interval::bounded(day(1), day(2)));
        assert_eq!(plan.emit[0].value, "old");
        assert_eq!(plan.emit[1].valid_time, Interval::open_ended(day(3)));
        assert_eq!(plan.emit[1].value, "old");
        assert_eq!(plan.emit[2].valid_time, Interval::bounded(day(2), day(3)));
        assert_eq!(plan.emit[2].value, "new");
        for emitted in &plan.emit {
            assert_eq!(emitted.tx_time, Interval::open_ended(day(4)));
        }
    }

    #[test]
    fn test_write_covering_exactly_leaves_no_overhang() {
        let versions =
            vec![version("old", Interval::open_ended(day(1)), Interval::bounded(day(1), day(3)))];
        let plan = plan_mutation(
            "A",
            &versions,
            Some("new"),
            Interval::bounded(day(1), day(3)),
            day(4),
        );

        assert_eq!(plan.close, vec![0]);
        assert_eq!(plan.emit.len(), 1);
        assert_eq!(plan.emit[0].value, "new");
    }

    #[test]
    fn test_write_straddling_multiple_versions() {
        let versions = vec![
            version("a", Interval::open_ended(day(3)), Interval::bounded(day(1), day(3))),
            version("b", Interval::open_ended(day(3)), Interval::open_ended(day(3))),
        ];
        let plan = plan_mutation(
            "A",
            &versions,
            Some("c"),
            Interval::bounded(day(2), day(4)),
            day(4),
        );

        assert_eq!(plan.close, vec![0, 1]);
        let valid_times: Vec<_> = plan.emit.iter().map(|r| r.valid_time).collect();
        assert_eq!(
            valid_times,
            vec![
                Interval::bounded(day(1), day(2)),
                Interval::open_ended(day(4)),
                Interval::bounded(day(2), day(4)),
            ],
        );
    }

    #[test]
    fn test_closed_layer_not_touched() {
        let versions =
            vec![version("old", Interval::bounded(day(1), day(2)), Interval::open_ended(day(1)))];
        let plan = plan_mutation("A", &versions, Some("new"), Interval::open_ended(day(3)), day(3));

        assert!(plan.close.is_empty());
        assert_eq!(plan.emit.len(), 1, "only the new record");
    }

    #[test]
    fn test_delete_emits_no_new_record() {
        let versions =
            vec![version("old", Interval::open_ended(day(1)), Interval::open_ended(day(1)))];
        let plan =
            plan_mutation("A", &versions, None::<&str>, Interval::bounded(day(2), day(3)), day(4));

        assert_eq!(plan.close, vec![0]);
        assert_eq!(plan.emit.len(), 2, "only the overhangs");
        assert!(plan.emit.iter().all(|r| r.value == "old"));
    }

    #[test]
    fn test_delete_without_overlap_is_empty_plan() {
        let versions =
            vec![version("old", Interval::open_ended(day(1)), Interval::bounded(day(1), day(2)))];
        let plan =
            plan_mutation("A", &versions, None::<&str>, Interval::bounded(day(2), day(3)), day(4));

        assert!(plan.close.is_empty());
        assert!(plan.emit.is_empty());
    }

    #[test]
    fn test_open_against_open_has_no_trailing_overhang() {
        let versions =
            vec![version("old", Interval::open_ended(day(1)), Interval::open_ended(day(1)))];
        let plan = plan_mutation("A", &versions, Some("new"), Interval::open_ended(day(3)), day(3));

        assert_eq!(plan.close, vec![0]);
        assert_eq!(plan.emit.len(), 2);
        assert_eq!(plan.emit[0].valid_time, Interval::bounded(day(1), day(3)));
        assert_eq!(plan.emit[1].valid_time.end, IntervalEnd::Open);
    }
}
