//! Core types for the chronica bitemporal key-value engine.
//!
//! This crate provides the foundational types used throughout the engine:
//! - Half-open time intervals with explicit open ends ([`Interval`],
//!   [`IntervalEnd`])
//! - The versioned record, the single unit of storage ([`VersionedRecord`])
//! - Record validation ([`VersionedRecord::validate`], [`RecordError`])
//!
//! Both temporal axes, valid time (when a fact was true in the modeled world)
//! and transaction time (when the store learned the fact), share the same
//! interval representation.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod interval;
pub mod record;

// Re-export commonly used types at crate root
pub use interval::{Interval, IntervalEnd};
pub use record::{RecordError, TimeAxis, VersionedRecord};
