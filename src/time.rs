// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 rds-encoder contributors

//! Injectable wall-clock source for the CT (clock-time) emitter.
//!
//! the reference C encoder this was ported from's `get_rds_ct_group` calls `time()`/`gmtime()`/
//! `localtime()` directly, which makes minute-rollover behavior impossible to
//! drive deterministically in a test. `spec.md` §9 calls this out explicitly:
//! "The CT emitter should accept an injected wall-clock + local-offset
//! provider so tests can drive minute rollovers deterministically."

/// A broken-down UTC timestamp, as needed to build a CT group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UtcTime {
    /// Years since 1900 (matches `struct tm::tm_year`, the field the MJD
    /// formula in `spec.md` §4.6 is defined in terms of).
    pub year: i32,
    /// 0-based month (0 = January).
    pub month: u32,
    /// Day of month, 1-based.
    pub day: u32,
    /// Hour, 0..23.
    pub hour: u32,
    /// Minute, 0..59.
    pub minute: u32,
    /// Local UTC offset, in seconds (east positive), at this instant.
    pub local_utc_offset_seconds: i32,
}

/// Supplies the current UTC time. Implementations must be cheap and
/// non-blocking: the scheduler calls this on every `next_bits()` pull.
pub trait TimeProvider {
    /// Current UTC broken-down time plus local offset.
    fn now(&self) -> UtcTime;
}

/// Default [`TimeProvider`] backed by the system clock via `chrono`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeProvider;

impl TimeProvider for SystemTimeProvider {
    fn now(&self) -> UtcTime {
        use chrono::{Datelike, Timelike};

        let utc = chrono::Utc::now();
        let local = chrono::Local::now();

        UtcTime {
            year: utc.year() - 1900,
            month: utc.month0(),
            day: utc.day(),
            hour: utc.hour(),
            minute: utc.minute(),
            local_utc_offset_seconds: local.offset().local_minus_utc(),
        }
    }
}
