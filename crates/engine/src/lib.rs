//! Temporal versioning engine for bitemporal key-value data.
//!
//! For each key the store preserves a full two-dimensional history over valid
//! time (when a fact was true in the modeled world) and transaction time
//! (when the store learned the fact). Callers can read the value of a key as
//! of any pair of instants, retroactively correct facts without losing prior
//! beliefs, and inspect the complete audit trail.
//!
//! This crate provides:
//! - [`Store`]: the owning component with Get / List / Set / Delete / History
//! - A write planner that splices valid-time intervals and closes
//!   transaction-time intervals so both histories survive every mutation
//! - A point resolver with a uniqueness guarantee backed by the
//!   no-bitemporal-overlap invariant
//! - The [`Clock`] port with a wall clock and a monotonic test clock
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use chronica_engine::{ReadOptions, Store, TestClock, WriteOptions};
//! use chrono::{TimeZone, Utc};
//!
//! let t1 = Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap();
//! let t3 = Utc.with_ymd_and_hms(2022, 1, 3, 0, 0, 0).unwrap();
//!
//! let clock = TestClock::new(t1);
//! let store = Store::with_clock(Arc::new(clock.clone()));
//!
//! store.set("price", 100, WriteOptions::default())?;
//! clock.set(t3)?;
//! store.set("price", 120, WriteOptions::default())?;
//!
//! // The current belief.
//! assert_eq!(store.get("price", ReadOptions::default())?.value, 120);
//! // What was true on January 2nd.
//! let jan_2 = Utc.with_ymd_and_hms(2022, 1, 2, 0, 0, 0).unwrap();
//! let opts = ReadOptions::builder().as_of_valid_time(jan_2).build();
//! assert_eq!(store.get("price", opts)?.value, 100);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod clock;
pub mod options;
pub mod store;

mod history;
mod invariant;
mod planner;
mod resolver;

pub use clock::{Clock, ClockError, TestClock, WallClock};
pub use options::{ReadOptions, WriteOptions};
pub use store::{Store, StoreError};

// Re-export the record types for convenience
pub use chronica_types::{Interval, IntervalEnd, RecordError, TimeAxis, VersionedRecord};
