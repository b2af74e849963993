//! the travel-time oracle contract (`spec.md` 4.C4) and its deterministic
//! fallback estimator. provider-backed implementations live outside this
//! crate (in `trailmap-directions`) so the planner stays testable offline.

use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;
use crate::time::ClockTime;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    Transit,
    Driving,
    Walking,
    Bicycling,
}

impl TravelMode {
    pub fn label(self) -> &'static str {
        match self {
            TravelMode::Transit => "transit",
            TravelMode::Driving => "driving",
            TravelMode::Walking => "walking",
            TravelMode::Bicycling => "bicycling",
        }
    }

    /// `speed(mode)` km/h defaults from `spec.md` 4.C4.
    fn speed_kmh(self) -> f64 {
        match self {
            TravelMode::Driving => 40.0,
            TravelMode::Transit => 30.0,
            TravelMode::Walking => 5.0,
            TravelMode::Bicycling => 15.0,
        }
    }

    /// detour distance factor from `spec.md` 4.C4.
    fn distance_factor(self) -> f64 {
        match self {
            TravelMode::Driving => 1.3,
            _ => 1.2,
        }
    }

    /// duration inflation factor from `spec.md` 4.C4.
    fn time_factor(self) -> f64 {
        match self {
            TravelMode::Driving => 1.4,
            _ => 1.3,
        }
    }
}

impl std::str::FromStr for TravelMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "transit" => Ok(TravelMode::Transit),
            "driving" => Ok(TravelMode::Driving),
            "walking" => Ok(TravelMode::Walking),
            "bicycling" => Ok(TravelMode::Bicycling),
            other => Err(format!("unknown transport mode '{other}'")),
        }
    }
}

/// extra structured detail a provider may attach to a route (steps,
/// polyline, etc). the estimator never populates this.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteDetail {
    pub summary: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TravelInfo {
    pub duration_min: u32,
    pub distance_km: f64,
    pub label: String,
    pub route_detail: Option<RouteDetail>,
    pub is_estimated: bool,
}

/// `route(origin, destination, mode, depart_at?)` from `spec.md` 4.C4.
/// implementations must never fail outright: a provider-backed oracle
/// degrades to the fallback estimator on any transport error, marking
/// `is_estimated = true`; `OracleUnavailable` is reserved for the case
/// where even the fallback's own inputs (coordinates) are invalid.
pub trait TravelOracle {
    fn route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        mode: TravelMode,
        depart_at: Option<ClockTime>,
    ) -> crate::error::TrailmapResult<TravelInfo>;
}

/// deterministic closed-form travel estimate, used standalone in tests and
/// as the guaranteed-to-succeed fallback behind any provider-backed oracle.
#[derive(Clone, Copy, Debug, Default)]
pub struct EstimatorOracle;

impl EstimatorOracle {
    pub fn estimate(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        mode: TravelMode,
    ) -> TravelInfo {
        let straight_km = origin.haversine_km(destination);
        let distance_km = straight_km * mode.distance_factor();
        let hours = distance_km / mode.speed_kmh();
        let duration_min = (hours * 60.0 * mode.time_factor()).round().max(0.0) as u32;
        TravelInfo {
            duration_min,
            distance_km,
            label: mode.label().to_string(),
            route_detail: None,
            is_estimated: true,
        }
    }
}

impl TravelOracle for EstimatorOracle {
    fn route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        mode: TravelMode,
        _depart_at: Option<ClockTime>,
    ) -> crate::error::TrailmapResult<TravelInfo> {
        Ok(self.estimate(origin, destination, mode))
    }
}
