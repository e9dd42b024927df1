//! Proptest strategies for chronica domain types.
//!
//! Reusable generators for property-based testing across crates. Strategies
//! produce well-formed domain values while exploring edge cases through
//! random variation.
//!
//! # Usage
//!
//! ```no_run
//! use chronica_test_utils::strategies;
//! use proptest::prelude::*;
//!
//! proptest! {
//!     #[test]
//!     fn my_property(record in strategies::arb_record()) {
//!         // test invariant with a randomly generated record
//!     }
//! }
//! ```

use chrono::{DateTime, Duration, TimeZone, Utc};
use chronica_types::{Interval, IntervalEnd, VersionedRecord};
use proptest::prelude::*;

/// Generates an arbitrary record key of 1-32 characters matching
/// `[a-z][a-z0-9]{0,31}`.
pub fn arb_key() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,31}"
}

/// Generates an arbitrary payload of 0-255 random bytes.
pub fn arb_value() -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(any::<u8>(), 0..256)
}

/// Generates a small payload of 0-31 random bytes for compact tests.
pub fn arb_small_value() -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(any::<u8>(), 0..32)
}

/// Generates an arbitrary [`DateTime<Utc>`] between 2020-01-01 and
/// 2030-01-01.
pub fn arb_instant() -> impl Strategy<Value = DateTime<Utc>> {
    (1_577_836_800i64..1_893_456_000i64).prop_map(|secs| {
        Utc.timestamp_opt(secs, 0)
            .single()
            .unwrap_or_else(|| DateTime::<Utc>::from(std::time::UNIX_EPOCH))
    })
}

/// Generates a well-formed [`Interval`]: open-ended, or bounded with a span
/// of 1-365 days.
pub fn arb_interval() -> impl Strategy<Value = Interval> {
    (arb_instant(), proptest::option::of(1i64..365)).prop_map(|(start, span_days)| {
        match span_days {
            Some(days) => Interval::bounded(start, start + Duration::days(days)),
            None => Interval::open_ended(start),
        }
    })
}

/// Generates an arbitrary [`IntervalEnd`], open or bounded.
pub fn arb_interval_end() -> impl Strategy<Value = IntervalEnd> {
    prop_oneof![Just(IntervalEnd::Open), arb_instant().prop_map(IntervalEnd::Closed)]
}

/// Generates a well-formed [`VersionedRecord`] with a byte payload and
/// random intervals on both axes.
pub fn arb_record() -> impl Strategy<Value = VersionedRecord<Vec<u8>>> {
    (arb_key(), arb_small_value(), arb_interval(), arb_interval()).prop_map(
        |(key, value, tx_time, valid_time)| VersionedRecord { key, value, tx_time, valid_time },
    )
}
