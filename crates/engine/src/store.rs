//! The owning store component.
//!
//! A [`Store`] maps each key to the unordered collection of its versioned
//! records and serializes mutations behind a readers-writer lock. Reads
//! delegate to the point resolver; writes run the planner, vet every edit
//! against the no-bitemporal-overlap invariant, and only then mutate state,
//! so a failing write leaves the store untouched.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use chronica_types::{Interval, IntervalEnd, RecordError, VersionedRecord};
use parking_lot::RwLock;
use snafu::{ensure, ResultExt, Snafu};
use tracing::{debug, instrument};

use crate::clock::{Clock, ClockError, WallClock};
use crate::history::sort_for_history;
use crate::invariant::bitemporal_overlap;
use crate::options::{ReadOptions, WriteOptions};
use crate::planner::{plan_mutation, WritePlan};
use crate::resolver::{resolve_point, PointError};

/// Errors returned by [`Store`] operations.
#[derive(Debug, Snafu)]
pub enum StoreError {
    /// No record for this key contains the queried bitemporal point.
    #[snafu(display("key '{key}' not found"))]
    NotFound {
        /// The queried key.
        key: String,
    },

    /// The key is empty.
    #[snafu(display("key must not be empty"))]
    EmptyKey,

    /// The valid-time window is inverted or empty.
    #[snafu(display("valid time start {start} must be before end {end}"))]
    InvertedWindow {
        /// Window start.
        start: DateTime<Utc>,
        /// Window end.
        end: DateTime<Utc>,
    },

    /// A valid-time bound lies in the future of the write's clock reading.
    #[snafu(display("valid time {requested} is in the future of now {now}"))]
    FutureValidTime {
        /// The offending bound.
        requested: DateTime<Utc>,
        /// The write's clock reading.
        now: DateTime<Utc>,
    },

    /// The clock reading moved behind transaction times already in the store.
    #[snafu(display("now {now} is earlier than the latest transaction time {latest} in the store"))]
    ClockRegressed {
        /// The write's clock reading.
        now: DateTime<Utc>,
        /// The latest transaction-time instant observable in the store.
        latest: DateTime<Utc>,
    },

    /// A seed or emitted record failed validation.
    #[snafu(display("invalid record: {source}"))]
    InvalidRecord {
        /// The underlying validation error.
        source: RecordError,
    },

    /// Internal: a record would overlap an existing record for the same key
    /// on both time axes. Indicates a planner bug or a corrupted seed set.
    #[snafu(display("versions of key '{key}' overlap in both transaction and valid time"))]
    OverlapViolation {
        /// The offending key.
        key: String,
    },

    /// Internal: more than one record contains a single bitemporal point.
    /// Indicates a broken overlap invariant.
    #[snafu(display(
        "multiple versions of key '{key}' match valid time {valid_time}, transaction time {tx_time}"
    ))]
    Ambiguous {
        /// The queried key.
        key: String,
        /// The valid-time coordinate of the read.
        valid_time: DateTime<Utc>,
        /// The transaction-time coordinate of the read.
        tx_time: DateTime<Utc>,
    },
}

impl From<ClockError> for StoreError {
    fn from(err: ClockError) -> Self {
        match err {
            ClockError::Regressed { requested, current } => {
                StoreError::ClockRegressed { now: requested, latest: current }
            },
        }
    }
}

/// Result type for store operations.
pub type Result<T, E = StoreError> = std::result::Result<T, E>;

/// In-process bitemporal key-value store.
///
/// The payload type `V` is opaque to the store; overhang re-emits clone it.
/// All operations are synchronous: reads take shared access to the version
/// map, mutations exclusive access.
pub struct Store<V> {
    /// key to all versioned records with that key
    versions: RwLock<HashMap<String, Vec<VersionedRecord<V>>>>,
    clock: Arc<dyn Clock>,
}

impl<V: Clone> Store<V> {
    /// Creates an empty store stamped by the system wall clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(WallClock))
    }

    /// Creates an empty store reading transaction times from `clock`.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self { versions: RwLock::new(HashMap::new()), clock }
    }

    /// Creates a store seeded with existing versioned records.
    ///
    /// Seeds only pass the record validator; unlike writes they may carry any
    /// well-formed instants, since a seed set replays history whose "now"
    /// has already advanced.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidRecord`] when a seed fails validation and
    /// [`StoreError::OverlapViolation`] when two seeds for the same key
    /// overlap on both time axes.
    pub fn with_seeds(
        seeds: impl IntoIterator<Item = VersionedRecord<V>>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let mut versions: HashMap<String, Vec<VersionedRecord<V>>> = HashMap::new();
        for seed in seeds {
            seed.validate().context(InvalidRecordSnafu)?;
            let slot = versions.entry(seed.key.clone()).or_default();
            if slot.iter().any(|existing| bitemporal_overlap(&seed, existing)) {
                return OverlapViolationSnafu { key: seed.key.clone() }.fail();
            }
            slot.push(seed);
        }
        Ok(Self { versions: RwLock::new(versions), clock })
    }

    /// Returns the unique record containing the read's bitemporal point.
    ///
    /// Unset coordinates default to the clock's current instant.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when no record contains the point and
    /// [`StoreError::Ambiguous`] when more than one does.
    pub fn get(&self, key: &str, options: ReadOptions) -> Result<VersionedRecord<V>> {
        let now = self.clock.now();
        let valid_time = options.as_of_valid_time.unwrap_or(now);
        let tx_time = options.as_of_transaction_time.unwrap_or(now);

        let versions = self.versions.read();
        let records = versions.get(key).ok_or_else(|| StoreError::NotFound { key: key.to_owned() })?;
        match resolve_point(records, valid_time, tx_time) {
            Ok(record) => Ok(record.clone()),
            Err(PointError::NoMatch) => NotFoundSnafu { key }.fail(),
            Err(PointError::MultipleMatches) => {
                AmbiguousSnafu { key, valid_time, tx_time }.fail()
            },
        }
    }

    /// Returns one record per key resolving at the read's bitemporal point,
    /// sorted by key. Keys with no match are omitted.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Ambiguous`] when a key resolves to more than one
    /// record.
    pub fn list(&self, options: ReadOptions) -> Result<Vec<VersionedRecord<V>>> {
        let now = self.clock.now();
        let valid_time = options.as_of_valid_time.unwrap_or(now);
        let tx_time = options.as_of_transaction_time.unwrap_or(now);

        let versions = self.versions.read();
        let mut out = Vec::new();
        for (key, records) in versions.iter() {
            match resolve_point(records, valid_time, tx_time) {
                Ok(record) => out.push(record.clone()),
                Err(PointError::NoMatch) => continue,
                Err(PointError::MultipleMatches) => {
                    return AmbiguousSnafu { key: key.as_str(), valid_time, tx_time }.fail();
                },
            }
        }
        out.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(out)
    }

    /// Stores `value` over the write's valid-time window.
    ///
    /// The window defaults to `[now, open)`. Existing records overlapping the
    /// window in the currently-believed layer are closed at `now` and their
    /// overhangs re-emitted, so every valid-time point outside the window
    /// keeps resolving to the value it had before.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::EmptyKey`], [`StoreError::InvertedWindow`], or
    /// [`StoreError::FutureValidTime`] for contract violations,
    /// [`StoreError::ClockRegressed`] when the clock moved behind recorded
    /// transaction times, and the internal [`StoreError::OverlapViolation`]
    /// if an emitted record would break the overlap invariant. Failed writes
    /// leave the store unchanged.
    #[instrument(skip(self, value, options))]
    pub fn set(&self, key: &str, value: V, options: WriteOptions) -> Result<()> {
        self.mutate(key, Some(value), options)
    }

    /// Removes the write's valid-time window from the currently-believed
    /// layer, leaving a hole.
    ///
    /// Past transaction-time layers are untouched and keep answering
    /// `as_of_transaction_time` reads. Deleting a window no record overlaps,
    /// or a key never written, is a success no-op.
    ///
    /// # Errors
    ///
    /// Same contract as [`Store::set`].
    #[instrument(skip(self, options))]
    pub fn delete(&self, key: &str, options: WriteOptions) -> Result<()> {
        self.mutate(key, None, options)
    }

    /// Returns every record ever stored for `key`, closed or current,
    /// ordered by descending transaction-time end then descending valid-time
    /// end, open ends first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when the key has never been written.
    pub fn history(&self, key: &str) -> Result<Vec<VersionedRecord<V>>> {
        let versions = self.versions.read();
        let records = versions.get(key).ok_or_else(|| StoreError::NotFound { key: key.to_owned() })?;
        let mut out = records.clone();
        sort_for_history(&mut out);
        Ok(out)
    }

    /// Common logic of set and delete; `value` is `None` for a delete.
    fn mutate(&self, key: &str, value: Option<V>, options: WriteOptions) -> Result<()> {
        ensure!(!key.is_empty(), EmptyKeySnafu);

        let now = self.clock.now();
        let mut versions = self.versions.write();
        Self::ensure_clock_not_regressed(&versions, now)?;

        let window = Interval::new(
            options.valid_time.unwrap_or(now),
            IntervalEnd::from(options.end_valid_time),
        );
        if let IntervalEnd::Closed(end) = window.end {
            ensure!(window.start < end, InvertedWindowSnafu { start: window.start, end });
            ensure!(end <= now, FutureValidTimeSnafu { requested: end, now });
        }
        ensure!(window.start <= now, FutureValidTimeSnafu { requested: window.start, now });

        let current = versions.get(key).map_or(&[][..], Vec::as_slice);
        let plan = plan_mutation(key, current, value, window, now);
        debug!(closes = plan.close.len(), emits = plan.emit.len(), "planned mutation");

        // vet the whole plan before touching state
        for emitted in &plan.emit {
            emitted.validate().context(InvalidRecordSnafu)?;
        }
        Self::ensure_plan_consistent(key, current, &plan, now)?;

        if plan.close.is_empty() && plan.emit.is_empty() {
            // delete with nothing to delete
            return Ok(());
        }

        let slot = versions.entry(key.to_owned()).or_default();
        for &idx in &plan.close {
            slot[idx].tx_time.end = IntervalEnd::Closed(now);
        }
        slot.extend(plan.emit);
        Ok(())
    }

    /// Asserts `now` has not moved behind any transaction-time instant
    /// already observable in the store.
    fn ensure_clock_not_regressed(
        versions: &HashMap<String, Vec<VersionedRecord<V>>>,
        now: DateTime<Utc>,
    ) -> Result<()> {
        let latest = versions
            .values()
            .flatten()
            .flat_map(|record| {
                [Some(record.tx_time.start), record.tx_time.end.instant()].into_iter().flatten()
            })
            .max();
        if let Some(latest) = latest {
            ensure!(now >= latest, ClockRegressedSnafu { now, latest });
        }
        Ok(())
    }

    /// Checks every emitted record against the post-close state and against
    /// the other emits. A violation means the planner is broken; the caller
    /// aborts without mutating.
    fn ensure_plan_consistent(
        key: &str,
        current: &[VersionedRecord<V>],
        plan: &WritePlan<V>,
        now: DateTime<Utc>,
    ) -> Result<()> {
        for (i, candidate) in plan.emit.iter().enumerate() {
            for (idx, existing) in current.iter().enumerate() {
                let tx_time = if plan.close.contains(&idx) {
                    Interval::bounded(existing.tx_time.start, now)
                } else {
                    existing.tx_time
                };
                if candidate.tx_time.overlaps(&tx_time)
                    && candidate.valid_time.overlaps(&existing.valid_time)
                {
                    return OverlapViolationSnafu { key }.fail();
                }
            }
            for other in &plan.emit[i + 1..] {
                if bitemporal_overlap(candidate, other) {
                    return OverlapViolationSnafu { key }.fail();
                }
            }
        }
        Ok(())
    }
}

impl<V: Clone> Default for Store<V> {
    fn default() -> Self {
        Self::new()
    }
}
