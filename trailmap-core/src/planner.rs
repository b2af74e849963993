//! `spec.md` 4.C8: the main greedy loop plus return-leg adjustment.

use rand::Rng;

use crate::error::{TrailmapError, TrailmapResult};
use crate::oracle::TravelOracle;
use crate::place::{Period, PlaceRecord};
use crate::plan::{PlanStep, PlannerState};
use crate::requirement::TripRequirement;
use crate::scorer::Scorer;
use crate::strategy::{Strategy, StrategyConfig};
use crate::time_service::TimeService;

/// minutes a trimmed visit's dwell is shortened by per retry, and the floor
/// it will not go below (`spec.md` 4.C8 return-leg adjustment).
const TRIM_STEP_MIN: i32 = 30;
const TRIM_FLOOR_MIN: u32 = 30;

pub struct Planner<'a> {
    pub requirement: &'a TripRequirement,
    pub origin: &'a PlaceRecord,
    pub destination: &'a PlaceRecord,
    pub catalog: &'a [PlaceRecord],
    pub oracle: &'a dyn TravelOracle,
    pub scorer: Scorer,
    pub strategy_config: StrategyConfig,
}

impl<'a> Planner<'a> {
    pub fn plan(&self, rng: &mut impl Rng) -> TrailmapResult<Vec<PlanStep>> {
        let req = self.requirement;
        let time_service = TimeService::new(req.lunch_time, req.dinner_time);
        let strategy = Strategy::new(req, self.scorer, self.strategy_config);

        let mut state = PlannerState::new(self.origin, req.start_time, self.catalog);

        while !state.remaining.is_empty() && state.clock < req.end_time {
            let candidates: Vec<&PlaceRecord> = state.remaining.clone();
            let selected = strategy.select(
                state.here,
                &candidates,
                state.clock,
                req.weekday,
                state.had_lunch,
                state.had_dinner,
                self.oracle,
                rng,
            );

            let (poi, travel) = match selected {
                Some(v) => v,
                None => break,
            };

            let arrive = state.clock.add_minutes(travel.duration_min as i32);
            let depart = arrive.add_minutes(poi.duration_min as i32);
            if depart > req.end_time {
                break;
            }

            if time_service.active_meal(state.clock) == Some(Period::Lunch) && poi.is_meal_capable() {
                state.had_lunch = true;
            }
            if time_service.active_meal(state.clock) == Some(Period::Dinner) && poi.is_meal_capable() {
                state.had_dinner = true;
            }

            state.output.push(PlanStep {
                step: state.output.len(),
                name: poi.name.clone(),
                arrive_hhmm: arrive,
                depart_hhmm: depart,
                dwell_min: poi.duration_min,
                transport_label: travel.label.clone(),
                travel_min: travel.duration_min,
                route_detail: travel.route_detail.clone(),
            });

            state.here = poi;
            state.clock = depart;
            state.remove_visited(&poi.name);
        }

        self.append_return_leg(state)
    }

    fn append_return_leg(&self, mut state: PlannerState<'a>) -> TrailmapResult<Vec<PlanStep>> {
        let req = self.requirement;
        loop {
            let travel = self
                .oracle
                .route(
                    state.here.coordinate,
                    self.destination.coordinate,
                    req.transport_mode,
                    Some(state.clock),
                )
                .map_err(|e| TrailmapError::OracleUnavailable(e.to_string()))?;
            let arrive = state.clock.add_minutes(travel.duration_min as i32);

            if arrive <= req.end_time {
                state.output.push(PlanStep {
                    step: state.output.len(),
                    name: self.destination.name.clone(),
                    arrive_hhmm: arrive,
                    depart_hhmm: arrive,
                    dwell_min: 0,
                    transport_label: travel.label,
                    travel_min: travel.duration_min,
                    route_detail: travel.route_detail,
                });
                return Ok(state.output);
            }

            // try shrinking the last visit's dwell in 30-minute steps down to
            // a 30-minute floor before giving up on it entirely.
            if let Some(last) = state.output.last().cloned() {
                if last.step == 0 {
                    // only the origin is left; nothing more to trim or pop.
                    return Err(TrailmapError::plan_failed(
                        "could not fit the return leg before the trip's end time",
                    ));
                }

                if last.dwell_min > TRIM_FLOOR_MIN {
                    let shortened = (last.dwell_min as i32 - TRIM_STEP_MIN).max(TRIM_FLOOR_MIN as i32) as u32;
                    let new_depart = last.arrive_hhmm.add_minutes(shortened as i32);
                    let idx = state.output.len() - 1;
                    state.output[idx].dwell_min = shortened;
                    state.output[idx].depart_hhmm = new_depart;
                    state.clock = new_depart;
                    continue;
                }

                // floor reached: pop the visit entirely and retry from the
                // prior step's departure.
                state.output.pop();
                let prior = state.output.last().expect("origin step always present");
                let prior_depart = prior.depart_hhmm;
                let prior_name = prior.name.clone();
                state.clock = prior_depart;
                state.here = self.place_named(&prior_name).unwrap_or(self.origin);
                continue;
            }

            return Err(TrailmapError::plan_failed(
                "could not fit the return leg before the trip's end time",
            ));
        }
    }

    fn place_named(&self, name: &str) -> Option<&'a PlaceRecord> {
        if name == self.origin.name {
            return Some(self.origin);
        }
        self.catalog.iter().find(|p| p.name == name)
    }
}
