//! a minimal `Geocoder` for the CLI: resolves the hard-coded default start
//! point, then falls back to matching the requested name against the
//! loaded catalog. real place-name geocoding is out of core scope
//! (`spec.md` §1: "Coordinate-from-name geocoding is specified only at its
//! interface") — this is the thin interface realization, not a geocoding
//! service client.

use trailmap_core::geo::Coordinate;
use trailmap_core::requirement::{DefaultOnlyGeocoder, Geocoder};
use trailmap_core::PlaceRecord;

pub struct CatalogFallbackGeocoder<'a> {
    default: DefaultOnlyGeocoder,
    catalog: &'a [PlaceRecord],
}

impl<'a> CatalogFallbackGeocoder<'a> {
    pub fn new(catalog: &'a [PlaceRecord]) -> CatalogFallbackGeocoder<'a> {
        CatalogFallbackGeocoder {
            default: DefaultOnlyGeocoder,
            catalog,
        }
    }
}

impl<'a> Geocoder for CatalogFallbackGeocoder<'a> {
    fn geocode(&self, name: &str) -> Option<Coordinate> {
        self.default
            .geocode(name)
            .or_else(|| self.catalog.iter().find(|p| p.name == name).map(|p| p.coordinate))
    }
}
