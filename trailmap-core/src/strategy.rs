//! `spec.md` 4.C7: per-step POI selection.

use ordered_float::OrderedFloat;
use rand::seq::SliceRandom;

use crate::oracle::{TravelInfo, TravelMode, TravelOracle};
use crate::place::{Period, PlaceRecord};
use crate::requirement::TripRequirement;
use crate::scorer::{ScoreContext, Scorer};
use crate::time::{ClockTime, Weekday};
use crate::time_service::TimeService;

/// how many top-scoring candidates to randomize across. `spec.md` 9 Open
/// Questions: "the spec leaves it configurable with default k=1
/// (deterministic)".
#[derive(Clone, Copy, Debug)]
pub struct StrategyConfig {
    pub top_k: usize,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        StrategyConfig { top_k: 1 }
    }
}

pub struct Strategy<'a> {
    pub requirement: &'a TripRequirement,
    pub time_service: TimeService,
    pub scorer: Scorer,
    pub config: StrategyConfig,
}

impl<'a> Strategy<'a> {
    pub fn new(requirement: &'a TripRequirement, scorer: Scorer, config: StrategyConfig) -> Self {
        Strategy {
            requirement,
            time_service: TimeService::new(requirement.lunch_time, requirement.dinner_time),
            scorer,
            config,
        }
    }

    /// candidates eligible at `clock` given which meals have already been
    /// taken (`spec.md` 4.C7 steps 2-3).
    fn eligible_candidates<'c>(
        &self,
        candidates: &[&'c PlaceRecord],
        clock: ClockTime,
        had_lunch: bool,
        had_dinner: bool,
    ) -> Vec<&'c PlaceRecord> {
        let current_period = self.time_service.current_period(clock);
        let meal_pending = match current_period {
            Period::Lunch => !had_lunch,
            Period::Dinner => !had_dinner,
            _ => false,
        };

        candidates
            .iter()
            .copied()
            .filter(|p| {
                if meal_pending {
                    p.is_meal_capable()
                } else {
                    p.period == current_period || p.is_24_hour()
                }
            })
            .collect()
    }

    /// returns the selected POI and its travel info, or `None` if nothing
    /// is feasible.
    pub fn select<'c>(
        &self,
        current: &PlaceRecord,
        candidates: &[&'c PlaceRecord],
        clock: ClockTime,
        weekday: Weekday,
        had_lunch: bool,
        had_dinner: bool,
        oracle: &dyn TravelOracle,
        rng: &mut impl rand::Rng,
    ) -> Option<(&'c PlaceRecord, TravelInfo)> {
        let eligible = self.eligible_candidates(candidates, clock, had_lunch, had_dinner);

        let mut scored: Vec<(&'c PlaceRecord, f64, TravelInfo)> = Vec::new();
        for poi in eligible {
            let travel = match oracle.route(
                current.coordinate,
                poi.coordinate,
                self.requirement.transport_mode,
                Some(clock),
            ) {
                Ok(info) => info,
                Err(e) => {
                    log::warn!("oracle failed for '{}': {e}", poi.name);
                    continue;
                }
            };

            let ctx = ScoreContext {
                current,
                candidate: poi,
                clock,
                weekday,
                travel: &travel,
                end_time: self.requirement.end_time,
                distance_threshold_km: self.requirement.distance_threshold_km,
            };
            let score = self.scorer.score(&ctx, &self.time_service);
            if score.is_finite() {
                scored.push((poi, score, travel));
            }
        }

        if scored.is_empty() {
            return None;
        }

        // `f64` scores have no total order (NaN), so sort on `OrderedFloat`
        // rather than juggling `partial_cmp` fallbacks by hand.
        scored.sort_by_key(|(poi, score, travel)| {
            (
                std::cmp::Reverse(OrderedFloat(*score)),
                std::cmp::Reverse(OrderedFloat(poi.rating.unwrap_or(0.0))),
                travel.duration_min,
                poi.name.clone(),
            )
        });

        let k = self.config.top_k.max(1).min(scored.len());
        let chosen = if k == 1 {
            &scored[0]
        } else {
            scored[..k].choose(rng).expect("k >= 1")
        };
        Some((chosen.0, chosen.2.clone()))
    }
}

/// unused in the default transport-mode constructor path but kept for
/// callers building a `TravelOracle` implementation that wants the mode's
/// display label without a `Strategy` in scope.
pub fn transport_label(mode: TravelMode) -> &'static str {
    mode.label()
}
