//! the provider-backed `TravelOracle` (`spec.md` 4.C4 implementation 1).
//!
//! any transport failure — timeout, non-success status, or an unparsable
//! body — degrades to [`trailmap_core::oracle::EstimatorOracle`] rather
//! than propagating an error; callers always get a `TravelInfo` back.

use reqwest::blocking::Client;
use serde::Deserialize;

use trailmap_core::error::TrailmapResult;
use trailmap_core::geo::Coordinate;
use trailmap_core::oracle::{EstimatorOracle, RouteDetail, TravelInfo, TravelMode, TravelOracle};
use trailmap_core::time::ClockTime;

const DIRECTIONS_ENDPOINT: &str = "https://directions.example.com/v1/route";

#[derive(Deserialize)]
struct DirectionsResponse {
    duration_min: u32,
    distance_km: f64,
    #[serde(default)]
    details: Option<String>,
}

/// a directions-API client carrying its own credential and HTTP client
/// (`spec.md` 5: "pass credentials via dependency injection"; no
/// process-global API key).
pub struct HttpDirectionsOracle {
    api_key: String,
    client: Client,
}

impl HttpDirectionsOracle {
    pub fn new(api_key: String) -> HttpDirectionsOracle {
        HttpDirectionsOracle::with_timeout(api_key, crate::DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(api_key: String, timeout: std::time::Duration) -> HttpDirectionsOracle {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                log::warn!("falling back to a default reqwest client: {e}");
                Client::new()
            });
        HttpDirectionsOracle { api_key, client }
    }

    fn fetch(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        mode: TravelMode,
        depart_at: Option<ClockTime>,
    ) -> Result<TravelInfo, reqwest::Error> {
        let mut request = self
            .client
            .get(DIRECTIONS_ENDPOINT)
            .header("x-api-key", &self.api_key)
            .query(&[
                ("origin", format!("{},{}", origin.lat, origin.lon)),
                ("destination", format!("{},{}", destination.lat, destination.lon)),
                ("mode", mode.label().to_string()),
            ]);
        if let Some(t) = depart_at {
            request = request.query(&[("depart_at", t.to_string())]);
        }

        let response = request.send()?.error_for_status()?;
        let body: DirectionsResponse = response.json()?;
        Ok(TravelInfo {
            duration_min: body.duration_min,
            distance_km: body.distance_km,
            label: mode.label().to_string(),
            route_detail: body.details.map(|summary| RouteDetail { summary }),
            is_estimated: false,
        })
    }
}

impl TravelOracle for HttpDirectionsOracle {
    fn route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        mode: TravelMode,
        depart_at: Option<ClockTime>,
    ) -> TrailmapResult<TravelInfo> {
        match self.fetch(origin, destination, mode, depart_at) {
            Ok(info) => Ok(info),
            Err(e) => {
                log::warn!("directions API call failed, falling back to the estimator: {e}");
                EstimatorOracle.route(origin, destination, mode, depart_at)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreachable_endpoint_degrades_to_the_estimator() {
        let oracle = HttpDirectionsOracle::new("test-key".to_string());
        let a = Coordinate::new(25.047, 121.517).unwrap();
        let b = Coordinate::new(25.034, 121.564).unwrap();
        let info = oracle.route(a, b, TravelMode::Driving, None).unwrap();
        assert!(info.is_estimated);
    }
}
