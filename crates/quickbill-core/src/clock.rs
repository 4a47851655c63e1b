//! # Clock Readings
//!
//! Formatting of the date/time shown on the console and stamped on the
//! receipt. The refresh task itself lives in the console app; this module
//! only turns an instant into display strings.

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default interval between clock refreshes.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(60);

/// A formatted date/time pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockReading {
    /// `DD Mon YYYY`, e.g. `19 Oct 2026`.
    pub date: String,
    /// `HH:MM`, 24-hour.
    pub time: String,
}

impl ClockReading {
    /// Formats a local date/time.
    ///
    /// ## Example
    /// ```rust
    /// use chrono::NaiveDate;
    /// use quickbill_core::ClockReading;
    ///
    /// let at = NaiveDate::from_ymd_opt(2026, 10, 19)
    ///     .and_then(|d| d.and_hms_opt(9, 5, 0))
    ///     .unwrap();
    /// let reading = ClockReading::from_datetime(at);
    /// assert_eq!(reading.date, "19 Oct 2026");
    /// assert_eq!(reading.time, "09:05");
    /// ```
    pub fn from_datetime(at: NaiveDateTime) -> Self {
        ClockReading {
            date: at.format("%d %b %Y").to_string(),
            time: at.format("%H:%M").to_string(),
        }
    }

    /// Reads the local wall clock.
    pub fn now() -> Self {
        Self::from_datetime(Local::now().naive_local())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|date| date.and_hms_opt(h, min, 59))
            .unwrap()
    }

    #[test]
    fn test_pads_day_and_uses_24_hour_time() {
        let reading = ClockReading::from_datetime(at(2026, 3, 4, 21, 7));
        assert_eq!(reading.date, "04 Mar 2026");
        assert_eq!(reading.time, "21:07");
    }

    #[test]
    fn test_seconds_are_not_shown() {
        let reading = ClockReading::from_datetime(at(2025, 12, 31, 0, 0));
        assert_eq!(reading.time, "00:00");
    }

    #[test]
    fn test_now_has_expected_shape() {
        let reading = ClockReading::now();
        assert_eq!(reading.time.len(), 5);
        assert_eq!(reading.date.len(), 11);
    }
}
