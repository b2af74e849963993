//! directions-API transport and the per-run LRU cache decorator around
//! [`trailmap_core`]'s `TravelOracle` contract.
//!
//! kept out of `trailmap-core` so the planner stays testable without any
//! I/O: this crate owns the one blocking network call in the system.

mod http;

use std::cell::RefCell;
use std::time::Duration;

use trailmap_core::cache::{round_coord, LruCache};
use trailmap_core::error::TrailmapResult;
use trailmap_core::geo::Coordinate;
use trailmap_core::oracle::{TravelInfo, TravelMode, TravelOracle};
use trailmap_core::time::ClockTime;

pub use http::HttpDirectionsOracle;

/// default request timeout for the directions API (`spec.md` 5: "default
/// 5 s").
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// default `LruCache` capacity (`spec.md` 4.C10: "LRU of size 128-256").
pub const DEFAULT_CACHE_CAPACITY: usize = 256;

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
struct CacheKey {
    origin_lat: i64,
    origin_lon: i64,
    destination_lat: i64,
    destination_lon: i64,
    mode: TravelMode,
    depart_hour: Option<u8>,
}

fn cache_key(origin: Coordinate, destination: Coordinate, mode: TravelMode, depart_at: Option<ClockTime>) -> CacheKey {
    CacheKey {
        origin_lat: round_coord(origin.lat),
        origin_lon: round_coord(origin.lon),
        destination_lat: round_coord(destination.lat),
        destination_lon: round_coord(destination.lon),
        mode,
        depart_hour: depart_at.map(|t| (t.minutes_since_midnight() / 60) as u8),
    }
}

/// wraps any `TravelOracle` with a per-run LRU cache keyed as specified in
/// `spec.md` 4.C10: rounded coordinates, mode, and depart-time bucketed to
/// the hour.
pub struct CachedOracle<O: TravelOracle> {
    inner: O,
    cache: RefCell<LruCache<CacheKey, TravelInfo>>,
}

impl<O: TravelOracle> CachedOracle<O> {
    pub fn new(inner: O) -> CachedOracle<O> {
        CachedOracle::with_capacity(inner, DEFAULT_CACHE_CAPACITY)
    }

    pub fn with_capacity(inner: O, capacity: usize) -> CachedOracle<O> {
        CachedOracle {
            inner,
            cache: RefCell::new(LruCache::new(capacity)),
        }
    }
}

impl<O: TravelOracle> TravelOracle for CachedOracle<O> {
    fn route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        mode: TravelMode,
        depart_at: Option<ClockTime>,
    ) -> TrailmapResult<TravelInfo> {
        let key = cache_key(origin, destination, mode, depart_at);
        if let Some(hit) = self.cache.borrow_mut().get(&key) {
            return Ok(hit.clone());
        }
        let info = self.inner.route(origin, destination, mode, depart_at)?;
        self.cache.borrow_mut().insert(key, info.clone());
        Ok(info)
    }
}

/// builds the oracle the CLI wires up by default: provider-backed and
/// cached when a directions-API credential is present, otherwise the bare
/// estimator (`spec.md` 6: "Absence degrades TravelOracle to fallback-only
/// mode").
pub fn default_oracle(api_key: Option<String>) -> Box<dyn TravelOracle> {
    match api_key {
        Some(key) => Box::new(CachedOracle::new(HttpDirectionsOracle::new(key))),
        None => Box::new(trailmap_core::oracle::EstimatorOracle),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use trailmap_core::oracle::EstimatorOracle;

    struct CountingOracle<'a> {
        calls: &'a Cell<u32>,
    }

    impl<'a> TravelOracle for CountingOracle<'a> {
        fn route(
            &self,
            origin: Coordinate,
            destination: Coordinate,
            mode: TravelMode,
            depart_at: Option<ClockTime>,
        ) -> TrailmapResult<TravelInfo> {
            self.calls.set(self.calls.get() + 1);
            EstimatorOracle.route(origin, destination, mode, depart_at)
        }
    }

    #[test]
    fn repeated_lookups_hit_the_cache() {
        let calls = Cell::new(0);
        let oracle = CachedOracle::new(CountingOracle { calls: &calls });
        let a = Coordinate::new(25.0, 121.0).unwrap();
        let b = Coordinate::new(25.05, 121.05).unwrap();

        oracle.route(a, b, TravelMode::Driving, None).unwrap();
        oracle.route(a, b, TravelMode::Driving, None).unwrap();
        oracle.route(a, b, TravelMode::Driving, None).unwrap();

        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn distinct_modes_are_distinct_cache_entries() {
        let calls = Cell::new(0);
        let oracle = CachedOracle::new(CountingOracle { calls: &calls });
        let a = Coordinate::new(25.0, 121.0).unwrap();
        let b = Coordinate::new(25.05, 121.05).unwrap();

        oracle.route(a, b, TravelMode::Driving, None).unwrap();
        oracle.route(a, b, TravelMode::Walking, None).unwrap();

        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn default_oracle_falls_back_without_a_credential() {
        let oracle = default_oracle(None);
        let a = Coordinate::new(25.0, 121.0).unwrap();
        let b = Coordinate::new(25.05, 121.05).unwrap();
        let info = oracle.route(a, b, TravelMode::Driving, None).unwrap();
        assert!(info.is_estimated);
    }
}
