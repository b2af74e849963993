//! the composite scoring function (`spec.md` 4.C6): combines rating,
//! time-efficiency, period fit, distance fit, and closing-time urgency into
//! a single `[0, 1]` score, or `f64::NEG_INFINITY` when infeasible.

use crate::oracle::TravelInfo;
use crate::place::PlaceRecord;
use crate::time::{ClockTime, Weekday};
use crate::time_service::TimeService;

/// tunable weights for the composite score. defaults match `spec.md` 4.C6
/// exactly; implementers should expose new knobs here rather than invent
/// ad hoc ones elsewhere (per the "Scorer coupling" design note).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScoringWeights {
    pub rating: f64,
    pub efficiency: f64,
    pub period: f64,
    pub distance: f64,
    /// baseline `dwell / travel` ratio considered "efficient" for a
    /// generic POI; attractions and meal labels scale it.
    pub efficiency_baseline: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        ScoringWeights {
            rating: 0.3,
            efficiency: 0.3,
            period: 0.2,
            distance: 0.2,
            efficiency_baseline: 1.5,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ScoreContext<'a> {
    pub current: &'a PlaceRecord,
    pub candidate: &'a PlaceRecord,
    pub clock: ClockTime,
    pub weekday: Weekday,
    pub travel: &'a TravelInfo,
    pub end_time: ClockTime,
    pub distance_threshold_km: f64,
}

#[derive(Clone, Copy, Debug)]
pub struct Scorer {
    pub weights: ScoringWeights,
}

impl Default for Scorer {
    fn default() -> Self {
        Scorer {
            weights: ScoringWeights::default(),
        }
    }
}

impl Scorer {
    pub fn new(weights: ScoringWeights) -> Scorer {
        Scorer { weights }
    }

    /// returns a score in `[0, 1]`, or `f64::NEG_INFINITY` if the candidate
    /// is infeasible at this step.
    pub fn score(&self, ctx: &ScoreContext, time_service: &TimeService) -> f64 {
        let arrive = ctx.clock.add_minutes(ctx.travel.duration_min as i32);
        let depart = arrive.add_minutes(ctx.candidate.duration_min as i32);

        let slot = ctx.candidate.slot_open_at(ctx.weekday, arrive);
        let slot = match slot {
            Some(s) => *s,
            None => return f64::NEG_INFINITY,
        };
        if depart > ctx.end_time {
            return f64::NEG_INFINITY;
        }
        let haversine_km = ctx.current.coordinate.haversine_km(ctx.candidate.coordinate);
        if haversine_km > ctx.distance_threshold_km {
            return f64::NEG_INFINITY;
        }

        let remaining = slot.remaining_from(arrive);
        if remaining < ctx.candidate.duration_min {
            // caller should already have excluded this via the depart-time
            // check above; treated as infeasible defensively.
            return f64::NEG_INFINITY;
        }

        let rating_score = rating_score(ctx.candidate.rating);
        let efficiency_score = efficiency_score(ctx.candidate, ctx.travel, self.weights.efficiency_baseline);
        let period_score = period_score(ctx.candidate, ctx.clock, time_service);
        let distance_score = distance_score(ctx.candidate, ctx.travel.distance_km, ctx.distance_threshold_km);
        let hours_score = hours_score(ctx.candidate, &slot, remaining);

        let composite = self.weights.rating * rating_score
            + self.weights.efficiency * efficiency_score
            + self.weights.period * period_score
            + self.weights.distance * distance_score;

        let final_score = (composite * hours_score).clamp(0.0, 1.0);
        if final_score.is_nan() {
            log::warn!(
                "scorer produced NaN for candidate '{}', treating as infeasible",
                ctx.candidate.name
            );
            return f64::NEG_INFINITY;
        }
        final_score
    }
}

fn rating_score(rating: Option<f32>) -> f64 {
    match rating {
        // `spec.md` 9 Open Questions: rating == 0 (unset or explicit) means
        // "unrated", not "worst".
        None => 0.5,
        Some(r) if r == 0.0 => 0.5,
        Some(r) => {
            let r = r as f64;
            let base = (r / 5.0).min(1.0);
            if r >= 4.5 {
                (base + 0.1 * (r - 4.5)).min(1.0)
            } else {
                base
            }
        }
    }
}

fn efficiency_score(candidate: &PlaceRecord, travel: &TravelInfo, baseline: f64) -> f64 {
    let label_factor = if candidate.label.eq_ignore_ascii_case("attraction") {
        0.8
    } else if candidate.is_meal_capable() {
        1.2
    } else {
        1.0
    };
    let adjusted_baseline = baseline * label_factor;
    let travel_min = (travel.duration_min as f64).max(1.0);
    let ratio = candidate.duration_min as f64 / travel_min / adjusted_baseline;
    ratio.clamp(0.0, 1.0)
}

fn period_score(candidate: &PlaceRecord, clock: ClockTime, time_service: &TimeService) -> f64 {
    if let Some(meal_period) = time_service.active_meal(clock) {
        let _ = meal_period;
        return if candidate.is_meal_capable() { 1.0 } else { 0.3 };
    }
    let current = time_service.current_period(clock);
    if candidate.period == current {
        1.0
    } else {
        let apart = candidate.period.periods_apart(current);
        (1.0 - 0.2 * apart as f64).max(0.3)
    }
}

fn distance_score(candidate: &PlaceRecord, distance_km: f64, threshold_km: f64) -> f64 {
    let label_factor = if candidate.label.eq_ignore_ascii_case("attraction") {
        1.2
    } else if candidate.is_meal_capable() {
        0.8
    } else {
        1.0
    };
    let adjusted_threshold = (threshold_km * label_factor).max(f64::EPSILON);
    (1.0 - distance_km / adjusted_threshold).max(0.0)
}

fn hours_score(candidate: &PlaceRecord, slot: &crate::place::HourSlot, remaining_min: u32) -> f64 {
    if slot.is_24_hour() {
        return 0.8;
    }
    let dwell = candidate.duration_min;
    if remaining_min as f64 >= 1.5 * dwell as f64 {
        1.0
    } else if remaining_min >= dwell {
        0.5
    } else {
        0.0
    }
}
