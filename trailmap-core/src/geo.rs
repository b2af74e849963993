//! coordinate validation, great-circle distance, and bounding-box helpers.

use serde::{Deserialize, Serialize};

const EARTH_RADIUS_KM: f64 = 6371.0087714;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GeoError {
    #[error("bad coordinate: lat={lat}, lon={lon}")]
    BadCoordinate { lat: f64, lon: f64 },
}

/// a validated lat/lon pair. `Coordinate::new` is the only constructor, so
/// any `Coordinate` in circulation is already within range.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Result<Coordinate, GeoError> {
        validate(lat, lon)?;
        Ok(Coordinate { lat, lon })
    }

    pub fn haversine_km(self, other: Coordinate) -> f64 {
        haversine(self, other)
    }
}

/// `validate(lat, lon)` from `spec.md` 4.C2.
pub fn validate(lat: f64, lon: f64) -> Result<(), GeoError> {
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
        return Err(GeoError::BadCoordinate { lat, lon });
    }
    Ok(())
}

/// `haversine(a, b)` from `spec.md` 4.C2, rounded to 1 decimal place.
pub fn haversine(a: Coordinate, b: Coordinate) -> f64 {
    let (lat1, lon1) = (a.lat.to_radians(), a.lon.to_radians());
    let (lat2, lon2) = (b.lat.to_radians(), b.lon.to_radians());
    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;
    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().asin();
    let km = EARTH_RADIUS_KM * c;
    (km * 10.0).round() / 10.0
}

/// axis-aligned bounding box around `center` out to `radius_km`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

/// `bounds(center, radius_km)` from `spec.md` 4.C2: 111 km/deg latitude,
/// `111 * cos(lat)` km/deg longitude.
pub fn bounds(center: Coordinate, radius_km: f64) -> Bounds {
    let lat_delta = radius_km / 111.0;
    let lon_delta = radius_km / (111.0 * center.lat.to_radians().cos()).max(f64::EPSILON);
    Bounds {
        min_lat: center.lat - lat_delta,
        max_lat: center.lat + lat_delta,
        min_lon: center.lon - lon_delta,
        max_lon: center.lon + lon_delta,
    }
}
