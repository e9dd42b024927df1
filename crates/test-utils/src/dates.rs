//! Fixed calendar shared by scenario tests.
//!
//! Six consecutive calendar days straddling 2022-01-01, always in the
//! real-world past so they stay behind any wall-clock default.

use chrono::{DateTime, TimeZone, Utc};

/// Midnight UTC on the given calendar day.
pub fn day(year: i32, month: u32, day_of_month: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day_of_month, 0, 0, 0)
        .single()
        .expect("valid calendar day")
}

/// 2021-12-31.
pub fn t0() -> DateTime<Utc> {
    day(2021, 12, 31)
}

/// 2022-01-01.
pub fn t1() -> DateTime<Utc> {
    day(2022, 1, 1)
}

/// 2022-01-02.
pub fn t2() -> DateTime<Utc> {
    day(2022, 1, 2)
}

/// 2022-01-03.
pub fn t3() -> DateTime<Utc> {
    day(2022, 1, 3)
}

/// 2022-01-04.
pub fn t4() -> DateTime<Utc> {
    day(2022, 1, 4)
}

/// 2022-01-05.
pub fn t5() -> DateTime<Utc> {
    day(2022, 1, 5)
}
