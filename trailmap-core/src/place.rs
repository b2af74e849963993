//! the POI value object and its opening-hours query logic.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;
use crate::time::{ClockTime, Weekday};

/// coarse time-of-day fit tag attached to each POI.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Morning,
    Lunch,
    Afternoon,
    Dinner,
    Night,
}

impl Period {
    /// the canonical ordering used to measure "how many periods apart" two
    /// tags are (`spec.md` 4.C6 period_score).
    const ORDER: [Period; 5] = [
        Period::Morning,
        Period::Lunch,
        Period::Afternoon,
        Period::Dinner,
        Period::Night,
    ];

    pub fn index(self) -> usize {
        Self::ORDER.iter().position(|p| *p == self).expect("exhaustive order")
    }

    pub fn periods_apart(self, other: Period) -> u32 {
        (self.index() as i32 - other.index() as i32).unsigned_abs()
    }
}

/// a single opening-hours slot for one weekday. `end < start` denotes an
/// overnight slot that wraps past midnight.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HourSlot {
    pub start: ClockTime,
    pub end: ClockTime,
}

impl HourSlot {
    pub fn new(start: ClockTime, end: ClockTime) -> HourSlot {
        // the sentinel `end == 00:00` is normalized to `23:59`.
        let end = if end == ClockTime::MIDNIGHT {
            ClockTime::from_hm(23, 59)
        } else {
            end
        };
        HourSlot { start, end }
    }

    pub fn is_overnight(&self) -> bool {
        self.end < self.start
    }

    pub fn contains(&self, t: ClockTime) -> bool {
        t.in_range(self.start, self.end, self.is_overnight())
    }

    /// minutes remaining in this slot from `t`, assuming `contains(t)`.
    pub fn remaining_from(&self, t: ClockTime) -> u32 {
        t.duration_until(self.end, self.is_overnight())
    }

    pub fn is_24_hour(&self) -> bool {
        self.start == ClockTime::MIDNIGHT && self.end == ClockTime::from_hm(23, 59)
    }
}

/// one weekday's opening-hours entry: either an ordered list of slots, or
/// closed for the whole day.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Default)]
pub struct DaySchedule(pub Vec<HourSlot>);

impl DaySchedule {
    pub fn closed() -> DaySchedule {
        DaySchedule(Vec::new())
    }

    pub fn is_closed(&self) -> bool {
        self.0.is_empty()
    }
}

/// the set `{restaurant, street-food, night-market}` from `spec.md`
/// GLOSSARY. labels are free-form strings in the catalog; this just checks
/// case-insensitive membership.
pub fn is_meal_capable(label: &str) -> bool {
    matches!(
        label.to_ascii_lowercase().as_str(),
        "restaurant" | "street-food" | "night-market"
    )
}

/// an immutable, validated catalog entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlaceRecord {
    pub name: String,
    pub coordinate: Coordinate,
    pub rating: Option<f32>,
    pub duration_min: u32,
    pub label: String,
    pub period: Period,
    pub hours: HashMap<u8, DaySchedule>,
}

impl PlaceRecord {
    pub fn is_meal_capable(&self) -> bool {
        is_meal_capable(&self.label)
    }

    fn schedule_for(&self, weekday: Weekday) -> Option<&DaySchedule> {
        self.hours.get(&weekday.value())
    }

    /// true if some slot on `weekday` is open at `hhmm` (`spec.md` 4.C3).
    pub fn is_open_at(&self, weekday: Weekday, hhmm: ClockTime) -> bool {
        self.slot_open_at(weekday, hhmm).is_some()
    }

    /// the containing slot on `weekday`, if any. an overnight slot is
    /// attributed to the day it starts on, so a slot begun the previous day
    /// is looked up under that prior weekday, not under `weekday` here.
    pub fn slot_open_at(&self, weekday: Weekday, hhmm: ClockTime) -> Option<&HourSlot> {
        if let Some(schedule) = self.schedule_for(weekday) {
            if let Some(slot) = schedule.0.iter().find(|s| s.contains(hhmm)) {
                return Some(slot);
            }
        }
        None
    }

    pub fn is_24_hour(&self) -> bool {
        (1..=7).all(|d| {
            self.hours
                .get(&d)
                .map(|s| s.0.iter().any(HourSlot::is_24_hour))
                .unwrap_or(false)
        })
    }

    /// `next_available(from_weekday, from_hhmm)` from `spec.md` 4.C3: scans
    /// the current day's remaining slots, then the next 6 days in order.
    pub fn next_available(
        &self,
        from_weekday: Weekday,
        from_hhmm: ClockTime,
    ) -> Option<(Weekday, HourSlot)> {
        if let Some(schedule) = self.schedule_for(from_weekday) {
            if let Some(slot) = schedule
                .0
                .iter()
                .find(|s| s.end >= from_hhmm || s.is_overnight())
            {
                return Some((from_weekday, *slot));
            }
        }
        let mut day = from_weekday.next();
        for _ in 0..6 {
            if let Some(schedule) = self.schedule_for(day) {
                if let Some(slot) = schedule.0.first() {
                    return Some((day, *slot));
                }
            }
            day = day.next();
        }
        None
    }
}
