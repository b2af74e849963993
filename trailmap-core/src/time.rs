//! pure time-of-day arithmetic confined to `HH:MM`. the core never carries a
//! date across the planning loop; overnight slot semantics live in
//! [`crate::place`], not here (see DESIGN NOTES in the spec this crate
//! implements).

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeError {
    #[error("bad time format '{0}', expected HH:MM")]
    BadTimeFormat(String),
}

fn time_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^([01]\d|2[0-3]):[0-5]\d$").expect("static regex"))
}

/// a time-of-day, stored as minutes since midnight in `[0, 1440)`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(u16);

impl ClockTime {
    pub const MIDNIGHT: ClockTime = ClockTime(0);

    pub fn from_hm(hour: u8, minute: u8) -> ClockTime {
        ClockTime((hour as u16) * 60 + minute as u16)
    }

    pub fn minutes_since_midnight(self) -> u16 {
        self.0
    }

    /// `parse(s)` from `spec.md` 4.C1: `^([01]\d|2[0-3]):[0-5]\d$`.
    pub fn parse(s: &str) -> Result<ClockTime, TimeError> {
        if !time_pattern().is_match(s) {
            return Err(TimeError::BadTimeFormat(s.to_string()));
        }
        let (h, m) = s.split_once(':').expect("regex guarantees a colon");
        let hour: u16 = h.parse().expect("regex guarantees digits");
        let minute: u16 = m.parse().expect("regex guarantees digits");
        Ok(ClockTime(hour * 60 + minute))
    }

    /// adds (or subtracts, for negative deltas) minutes, wrapping modulo 24h.
    /// callers track day-change externally if relevant.
    pub fn add_minutes(self, delta: i32) -> ClockTime {
        let total = self.0 as i32 + delta;
        let wrapped = total.rem_euclid(24 * 60);
        ClockTime(wrapped as u16)
    }

    /// `in_range(t, start, end, allow_overnight)` from `spec.md` 4.C1.
    pub fn in_range(self, start: ClockTime, end: ClockTime, allow_overnight: bool) -> bool {
        if allow_overnight && end < start {
            self >= start || self <= end
        } else {
            start <= self && self <= end
        }
    }

    /// `duration(start, end, allow_overnight)` from `spec.md` 4.C1.
    /// overnight: `(1440 - start) + end`.
    pub fn duration_until(self, end: ClockTime, allow_overnight: bool) -> u32 {
        let start = self.0 as i32;
        let end = end.0 as i32;
        if allow_overnight && end < start {
            ((24 * 60 - start) + end) as u32
        } else {
            (end - start).max(0) as u32
        }
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl fmt::Debug for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClockTime({self})")
    }
}

impl TryFrom<String> for ClockTime {
    type Error = TimeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ClockTime::parse(&value)
    }
}

impl From<ClockTime> for String {
    fn from(value: ClockTime) -> Self {
        value.to_string()
    }
}

/// 1-indexed ISO weekday (1 = Monday .. 7 = Sunday), matching the catalog's
/// `hours: weekday:1..7 -> slots` mapping.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Weekday(u8);

impl Weekday {
    pub fn new(n: u8) -> Option<Weekday> {
        (1..=7).contains(&n).then_some(Weekday(n))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// the weekday following this one, wrapping Sunday -> Monday.
    pub fn next(self) -> Weekday {
        Weekday(if self.0 == 7 { 1 } else { self.0 + 1 })
    }

    pub fn from_chrono(d: chrono::Weekday) -> Weekday {
        use chrono::Weekday::*;
        Weekday(match d {
            Mon => 1,
            Tue => 2,
            Wed => 3,
            Thu => 4,
            Fri => 5,
            Sat => 6,
            Sun => 7,
        })
    }
}

impl fmt::Debug for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Weekday({})", self.0)
    }
}
