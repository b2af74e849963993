//! `TripRequirement` from `spec.md` 3: the user-facing trip parameters,
//! before (`RawTripRequirement`) and after (`TripRequirement`) validation.

use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;
use crate::oracle::TravelMode;
use crate::time::{ClockTime, Weekday};

/// the hard-coded default origin/destination named in `spec.md` 3.
pub const DEFAULT_START_POINT_NAME: &str = "Taipei Main Station";
const DEFAULT_START_POINT_LAT: f64 = 25.0478;
const DEFAULT_START_POINT_LON: f64 = 121.5170;

/// resolves a place name to a coordinate. geocoding itself is an external
/// collaborator (`spec.md` 1: "Coordinate-from-name geocoding is specified
/// only at its interface") — this trait is that interface.
pub trait Geocoder {
    fn geocode(&self, name: &str) -> Option<Coordinate>;
}

/// the only geocoder the core crate itself can vouch for: the literal
/// default start point. any other name must come back `None`, pushing the
/// caller to supply a real geocoder (CLI / catalog lookup).
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultOnlyGeocoder;

impl Geocoder for DefaultOnlyGeocoder {
    fn geocode(&self, name: &str) -> Option<Coordinate> {
        if name == DEFAULT_START_POINT_NAME {
            Coordinate::new(DEFAULT_START_POINT_LAT, DEFAULT_START_POINT_LON).ok()
        } else {
            None
        }
    }
}

/// the unvalidated, wire-shaped trip requirement (`spec.md` 6: "structured
/// record; fields as enumerated in §3").
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RawTripRequirement {
    pub start_time: String,
    pub end_time: String,
    #[serde(default = "default_start_point")]
    pub start_point: String,
    pub end_point: Option<String>,
    pub transport_mode: Option<String>,
    pub distance_threshold_km: Option<f64>,
    pub lunch_time: Option<String>,
    pub dinner_time: Option<String>,
    pub breakfast_time: Option<String>,
    pub date: Option<String>,
    pub budget: Option<i64>,
}

fn default_start_point() -> String {
    DEFAULT_START_POINT_NAME.to_string()
}

/// the validated trip requirement, defaults filled per `spec.md` 4.C9.
#[derive(Clone, Debug, PartialEq)]
pub struct TripRequirement {
    pub start_time: ClockTime,
    pub end_time: ClockTime,
    pub start_point_name: String,
    pub start_point: Coordinate,
    pub end_point_name: String,
    pub end_point: Coordinate,
    pub transport_mode: TravelMode,
    pub distance_threshold_km: f64,
    pub lunch_time: Option<ClockTime>,
    pub dinner_time: Option<ClockTime>,
    pub breakfast_time: Option<ClockTime>,
    pub weekday: Weekday,
    pub budget: Option<i64>,
}
