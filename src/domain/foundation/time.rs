//! Calendar and wall-clock value objects for the weekly schedule.

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Day of the week a recurring availability window falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DayOfWeek {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl DayOfWeek {
    /// Returns the day of week a calendar date falls on.
    pub fn of(date: NaiveDate) -> Self {
        Self::from(date.weekday())
    }

    /// Checks whether a calendar date falls on this day of week.
    pub fn matches(&self, date: NaiveDate) -> bool {
        *self == Self::of(date)
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Mon => DayOfWeek::Mon,
            Weekday::Tue => DayOfWeek::Tue,
            Weekday::Wed => DayOfWeek::Wed,
            Weekday::Thu => DayOfWeek::Thu,
            Weekday::Fri => DayOfWeek::Fri,
            Weekday::Sat => DayOfWeek::Sat,
            Weekday::Sun => DayOfWeek::Sun,
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DayOfWeek::Mon => "MON",
            DayOfWeek::Tue => "TUE",
            DayOfWeek::Wed => "WED",
            DayOfWeek::Thu => "THU",
            DayOfWeek::Fri => "FRI",
            DayOfWeek::Sat => "SAT",
            DayOfWeek::Sun => "SUN",
        };
        write!(f, "{}", s)
    }
}

/// Half-open wall-clock interval `[start, end)` at minute resolution.
///
/// # Invariants
///
/// - `start < end`
/// - both bounds have zero seconds (minute resolution)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    start: NaiveTime,
    end: NaiveTime,
}

impl TimeRange {
    /// Creates a validated time range.
    ///
    /// # Errors
    ///
    /// - `InvalidFormat` if either bound carries sub-minute precision
    /// - `InvalidFormat` if `start >= end`
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self, ValidationError> {
        if start.second() != 0 || start.nanosecond() != 0 {
            return Err(ValidationError::invalid_format(
                "start_time",
                "must be at minute resolution",
            ));
        }
        if end.second() != 0 || end.nanosecond() != 0 {
            return Err(ValidationError::invalid_format(
                "end_time",
                "must be at minute resolution",
            ));
        }
        if start >= end {
            return Err(ValidationError::invalid_format(
                "time_range",
                "start_time must be before end_time",
            ));
        }
        Ok(Self { start, end })
    }

    /// Returns the start of the window (inclusive).
    pub fn start(&self) -> NaiveTime {
        self.start
    }

    /// Returns the end of the window (exclusive).
    pub fn end(&self) -> NaiveTime {
        self.end
    }

    /// Checks whether two half-open windows intersect.
    ///
    /// Touching endpoints (one window ending exactly where the other
    /// starts) do not count as an intersection.
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}
