//! Clock times and calendar keys.
//!
//! Routes carry their departure and arrival as `HMM`/`HHMM` integers
//! (715 is 07:15). Flights are keyed by a `YYYY-MM-DD` date string; only the
//! month is ever interpreted.

use std::fmt;
use std::ops::Sub;
use std::str::FromStr;
use std::sync::Arc;

pub const MINUTES_PER_DAY: u32 = 1440;

/// Error returned when a clock time or a date cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {what} '{input}': {reason}")]
pub struct TimeError {
    what: &'static str,
    input: String,
    reason: &'static str,
}

impl TimeError {
    fn clock(input: &str, reason: &'static str) -> Self {
        Self { what: "time", input: input.to_string(), reason }
    }

    fn date(input: &str, reason: &'static str) -> Self {
        Self { what: "date", input: input.to_string(), reason }
    }
}

/// A time of day in the `HHMM` integer encoding.
#[derive(Debug, Clone, Copy, Ord, Eq, PartialEq, PartialOrd, Hash)]
pub struct ClockTime(u16);

impl ClockTime {
    pub fn from_hhmm(value: u16) -> Result<Self, TimeError> {
        let text = value.to_string();
        if value / 100 > 23 {
            return Err(TimeError::clock(&text, "hour must be 0-23"));
        }
        if value % 100 > 59 {
            return Err(TimeError::clock(&text, "minute must be 0-59"));
        }
        Ok(ClockTime(value))
    }

    pub fn hhmm(self) -> u16 {
        self.0
    }

    /// The stored text form: `HHMM` zero-padded to at least three digits,
    /// so 00:05 is "005" and parses back to the same time.
    pub fn encoded(self) -> String {
        format!("{:03}", self.0)
    }

    pub fn hours(self) -> u32 {
        u32::from(self.0 / 100)
    }

    pub fn minutes(self) -> u32 {
        u32::from(self.0 % 100)
    }

    pub fn minute_of_day(self) -> u32 {
        self.hours() * 60 + self.minutes()
    }
}

impl FromStr for ClockTime {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !(3..=4).contains(&s.len()) {
            return Err(TimeError::clock(s, "expected 3 or 4 digits"));
        }
        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TimeError::clock(s, "expected digits only"));
        }
        let value = s.parse::<u16>().map_err(|_| TimeError::clock(s, "not a number"))?;
        ClockTime::from_hhmm(value)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hours(), self.minutes())
    }
}

/// Minutes elapsed from `rhs` to `self`, wrapping past midnight.
impl Sub<ClockTime> for ClockTime {
    type Output = u32;

    fn sub(self, rhs: ClockTime) -> Self::Output {
        (self.minute_of_day() + MINUTES_PER_DAY - rhs.minute_of_day()) % MINUTES_PER_DAY
    }
}

/// Calendar key of a flight, `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FlightDate(Arc<str>);

impl FlightDate {
    pub fn parse(s: &str) -> Result<Self, TimeError> {
        let parts: Vec<&str> = s.split('-').collect();
        let [year, month, day] = parts.as_slice() else {
            return Err(TimeError::date(s, "expected YYYY-MM-DD"));
        };
        let widths_ok = year.len() == 4 && month.len() == 2 && day.len() == 2;
        if !widths_ok || !s.bytes().all(|b| b.is_ascii_digit() || b == b'-') {
            return Err(TimeError::date(s, "expected YYYY-MM-DD"));
        }
        let month = month.parse::<u8>().map_err(|_| TimeError::date(s, "invalid month"))?;
        if !(1..=12).contains(&month) {
            return Err(TimeError::date(s, "month must be 01-12"));
        }
        let day = day.parse::<u8>().map_err(|_| TimeError::date(s, "invalid day"))?;
        if !(1..=31).contains(&day) {
            return Err(TimeError::date(s, "day must be 01-31"));
        }
        Ok(FlightDate(Arc::from(s)))
    }

    pub fn month(&self) -> u8 {
        // validated by `parse`
        self.0[5..7].parse().unwrap_or(0)
    }
}

impl fmt::Display for FlightDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
