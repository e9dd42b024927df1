//! Clock port used to stamp transaction times.
//!
//! The store reads its clock exactly once per mutation and uses that instant
//! for every stamp the mutation produces, so a write appears atomic on the
//! transaction-time axis. Production code uses [`WallClock`]; tests install a
//! [`TestClock`] and advance it by hand.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use snafu::{ensure, Snafu};

/// Errors returned by clock implementations.
#[derive(Debug, Snafu)]
pub enum ClockError {
    /// Attempted to move a test clock backward.
    #[snafu(display("clock regressed: {requested} is earlier than {current}"))]
    Regressed {
        /// The instant the caller tried to set.
        requested: DateTime<Utc>,
        /// The clock's current instant.
        current: DateTime<Utc>,
    },
}

/// Source of "now" for transaction-time stamps.
pub trait Clock: Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// Clock backed by the system time.
#[derive(Debug, Default, Clone, Copy)]
pub struct WallClock;

impl Clock for WallClock {
    // the only direct wall-clock read in the workspace
    #[allow(clippy::disallowed_methods)]
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Settable clock for tests.
///
/// Instants must be set monotonically non-decreasing; moving the clock
/// backward fails with [`ClockError::Regressed`]. Clones share the same
/// underlying instant, so a test can keep a handle while the store owns
/// another.
#[derive(Debug, Clone)]
pub struct TestClock {
    now: Arc<RwLock<DateTime<Utc>>>,
}

impl TestClock {
    /// Creates a test clock reading `start`.
    pub fn new(start: DateTime<Utc>) -> Self {
        Self { now: Arc::new(RwLock::new(start)) }
    }

    /// Moves the clock to `t`.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::Regressed`] when `t` is earlier than the
    /// clock's current instant. Setting the same instant again is allowed.
    pub fn set(&self, t: DateTime<Utc>) -> Result<(), ClockError> {
        let mut now = self.now.write();
        ensure!(t >= *now, RegressedSnafu { requested: t, current: *now });
        *now = t;
        Ok(())
    }
}

impl Clock for TestClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.read()
    }
}
