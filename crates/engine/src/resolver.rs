//! Point-in-time resolution over a key's versions.

use chrono::{DateTime, Utc};
use chronica_types::VersionedRecord;

/// Failure modes of [`resolve_point`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PointError {
    /// No record contains the point.
    NoMatch,
    /// More than one record contains the point. The no-bitemporal-overlap
    /// invariant is broken.
    MultipleMatches,
}

/// Returns the unique record whose valid-time interval contains `valid_time`
/// and whose transaction-time interval contains `tx_time`.
pub(crate) fn resolve_point<'a, V>(
    versions: &'a [VersionedRecord<V>],
    valid_time: DateTime<Utc>,
    tx_time: DateTime<Utc>,
) -> Result<&'a VersionedRecord<V>, PointError> {
    let mut found = None;
    for version in versions {
        if version.valid_time.contains(valid_time) && version.tx_time.contains(tx_time) {
            if found.is_some() {
                return Err(PointError::MultipleMatches);
            }
            found = Some(version);
        }
    }
    found.ok_or(PointError::NoMatch)
}
