//! `PlanStep` and `PlannerState` from `spec.md` 3.

use serde::{Deserialize, Serialize};

use crate::oracle::RouteDetail;
use crate::place::PlaceRecord;
use crate::time::ClockTime;

/// one element of the returned itinerary.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlanStep {
    pub step: usize,
    pub name: String,
    pub arrive_hhmm: ClockTime,
    pub depart_hhmm: ClockTime,
    pub dwell_min: u32,
    pub transport_label: String,
    pub travel_min: u32,
    pub route_detail: Option<RouteDetail>,
}

/// transient planner state, mutated in-loop and discarded once `output` is
/// returned.
pub struct PlannerState<'a> {
    pub clock: ClockTime,
    pub here: &'a PlaceRecord,
    pub remaining: Vec<&'a PlaceRecord>,
    pub had_lunch: bool,
    pub had_dinner: bool,
    pub output: Vec<PlanStep>,
}

impl<'a> PlannerState<'a> {
    pub fn new(origin: &'a PlaceRecord, start_time: ClockTime, catalog: &'a [PlaceRecord]) -> Self {
        PlannerState {
            clock: start_time,
            here: origin,
            remaining: catalog.iter().collect(),
            had_lunch: false,
            had_dinner: false,
            output: vec![PlanStep {
                step: 0,
                name: origin.name.clone(),
                arrive_hhmm: start_time,
                depart_hhmm: start_time,
                dwell_min: 0,
                transport_label: String::new(),
                travel_min: 0,
                route_detail: None,
            }],
        }
    }

    pub fn remove_visited(&mut self, name: &str) {
        self.remaining.retain(|p| p.name != name);
    }
}
