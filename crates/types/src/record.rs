//! Versioned records, the single unit of storage.
//!
//! A record binds a key and an opaque payload to one interval on each
//! temporal axis. Records are born with an open transaction-time end and are
//! retired by closing that end; no other field ever changes after emission.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use snafu::{ensure, Snafu};

use crate::interval::{Interval, IntervalEnd};

/// Temporal axis named in validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeAxis {
    /// When the store held the belief.
    Transaction,
    /// When the fact was true in the modeled world.
    Valid,
}

impl fmt::Display for TimeAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeAxis::Transaction => write!(f, "transaction time"),
            TimeAxis::Valid => write!(f, "valid time"),
        }
    }
}

/// Errors returned by [`VersionedRecord::validate`].
#[derive(Debug, Snafu)]
pub enum RecordError {
    /// Record key is empty.
    #[snafu(display("record key must not be empty"))]
    MissingKey,

    /// An interval bound carries the epoch-default sentinel.
    #[snafu(display("{axis} bound cannot be the epoch default"))]
    ZeroTimestamp {
        /// Axis carrying the sentinel bound.
        axis: TimeAxis,
    },

    /// A closed interval does not satisfy start-before-end.
    #[snafu(display("{axis} start {start} must be before end {end}"))]
    InvertedInterval {
        /// Axis carrying the inverted interval.
        axis: TimeAxis,
        /// Interval start.
        start: DateTime<Utc>,
        /// Interval end.
        end: DateTime<Utc>,
    },
}

/// A single bitemporal version of a key's value.
///
/// The payload type is supplied by the caller and is opaque to the engine.
/// Nullability is the caller's concern: a record whose payload happens to be
/// a "null" value (say `V = Option<T>` holding `None`) is a real record,
/// distinct from the absence of any record at a query point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionedRecord<V> {
    /// Identifier of the logical entity this record describes.
    pub key: String,
    /// The domain fact.
    pub value: V,
    /// When the store held this belief. Open end: still believed.
    pub tx_time: Interval,
    /// When the fact was true in the modeled world. Open end: indefinitely.
    pub valid_time: Interval,
}

impl<V> VersionedRecord<V> {
    /// Checks field presence and ordering on both axes.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::MissingKey`] for an empty key,
    /// [`RecordError::ZeroTimestamp`] for an epoch-default bound, and
    /// [`RecordError::InvertedInterval`] when a closed interval does not
    /// satisfy start-before-end.
    pub fn validate(&self) -> Result<(), RecordError> {
        ensure!(!self.key.is_empty(), MissingKeySnafu);
        validate_axis(TimeAxis::Transaction, &self.tx_time)?;
        validate_axis(TimeAxis::Valid, &self.valid_time)?;
        Ok(())
    }
}

fn validate_axis(axis: TimeAxis, interval: &Interval) -> Result<(), RecordError> {
    ensure!(interval.start != DateTime::UNIX_EPOCH, ZeroTimestampSnafu { axis });
    if let IntervalEnd::Closed(end) = interval.end {
        ensure!(end != DateTime::UNIX_EPOCH, ZeroTimestampSnafu { axis });
        ensure!(interval.start < end, InvertedIntervalSnafu { axis, start: interval.start, end });
    }
    Ok(())
}
