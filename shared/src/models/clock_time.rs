//! Wall-clock time of day (`HH:MM`)

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::eligibility::{PolicyError, PolicyResult};

/// A 24-hour wall-clock time with minute precision.
///
/// Only the exact `HH:MM` shape is accepted: two-digit hour 00-23, colon,
/// two-digit minute 00-59.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    pub const MIDNIGHT: ClockTime = ClockTime(NaiveTime::MIN);

    /// Build from hour/minute, rejecting out-of-range components.
    pub fn from_hm(hour: u32, minute: u32) -> PolicyResult<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(Self)
            .ok_or_else(|| {
                PolicyError::Validation(format!("time {hour:02}:{minute:02} is out of range"))
            })
    }

    /// Parse an `HH:MM` string.
    pub fn parse(s: &str) -> PolicyResult<Self> {
        let bytes = s.as_bytes();
        let digits = |r: std::ops::Range<usize>| bytes[r].iter().all(u8::is_ascii_digit);
        if bytes.len() != 5 || bytes[2] != b':' || !digits(0..2) || !digits(3..5) {
            return Err(PolicyError::Validation(format!(
                "invalid time '{s}', expected HH:MM"
            )));
        }
        NaiveTime::parse_from_str(s, "%H:%M")
            .map(Self)
            .map_err(|e| PolicyError::Validation(format!("invalid time '{s}': {e}")))
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    pub fn as_naive(&self) -> NaiveTime {
        self.0
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

impl FromStr for ClockTime {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
