//! meal-time detection and current-period classification.

use crate::place::Period;
use crate::time::ClockTime;

/// window width around a configured meal time (`spec.md` 9: "fix at ±60
/// minutes per 4.C5").
const MEAL_WINDOW_MIN: i32 = 60;

#[derive(Clone, Copy, Debug, Default)]
pub struct TimeService {
    pub lunch_time: Option<ClockTime>,
    pub dinner_time: Option<ClockTime>,
}

impl TimeService {
    pub fn new(lunch_time: Option<ClockTime>, dinner_time: Option<ClockTime>) -> TimeService {
        TimeService {
            lunch_time,
            dinner_time,
        }
    }

    fn within_window(t: ClockTime, center: ClockTime) -> bool {
        let lo = center.add_minutes(-MEAL_WINDOW_MIN);
        let hi = center.add_minutes(MEAL_WINDOW_MIN);
        // a ±60 window around a time near midnight can itself wrap, so
        // treat it as an overnight-capable range.
        t.in_range(lo, hi, lo > hi)
    }

    /// `is_meal_time(t)` from `spec.md` 4.C5.
    pub fn is_meal_time(&self, t: ClockTime) -> bool {
        self.lunch_time.map(|l| Self::within_window(t, l)).unwrap_or(false)
            || self.dinner_time.map(|d| Self::within_window(t, d)).unwrap_or(false)
    }

    /// which meal window (if any) `t` currently falls in.
    pub fn active_meal(&self, t: ClockTime) -> Option<Period> {
        if self.lunch_time.map(|l| Self::within_window(t, l)).unwrap_or(false) {
            Some(Period::Lunch)
        } else if self.dinner_time.map(|d| Self::within_window(t, d)).unwrap_or(false) {
            Some(Period::Dinner)
        } else {
            None
        }
    }

    /// `current_period(t)` from `spec.md` 4.C5: uses the meal windows when
    /// configured, else fixed thresholds.
    pub fn current_period(&self, t: ClockTime) -> Period {
        if let Some(meal) = self.active_meal(t) {
            return meal;
        }
        let minutes = t.minutes_since_midnight();
        if minutes < 11 * 60 {
            Period::Morning
        } else if minutes < 14 * 60 {
            Period::Lunch
        } else if minutes < 17 * 60 {
            Period::Afternoon
        } else if minutes < 20 * 60 {
            Period::Dinner
        } else {
            Period::Night
        }
    }
}
