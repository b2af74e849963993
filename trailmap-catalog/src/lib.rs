//! CSV ingest for the POI catalog consumed by `trailmap-core`'s `Planner`.
//!
//! kept out of `trailmap-core` as an external collaborator (`spec.md` §1:
//! "POI catalog loading from CSV (tabular-to-record parsing is trivial)")
//! the same way the teacher workspace keeps its GTFS/OMF tabular ingest out
//! of `bambam-core`.

pub mod error;
pub mod raw;

use std::collections::HashSet;
use std::path::Path;

use itertools::Itertools;

use trailmap_core::validator::validate_place;
use trailmap_core::PlaceRecord;

pub use error::CatalogError;
pub use raw::RawCatalogRow;

/// reads and validates the whole catalog at `path` (`spec.md` §6: "one row
/// per POI"). every row is validated through
/// [`trailmap_core::validator::validate_place`]; the first invalid row
/// aborts the load with a [`CatalogError`] pinpointing the offending row
/// and field, matching the "never reach the Planner" input-error contract.
pub fn load_csv(path: &Path) -> Result<Vec<PlaceRecord>, CatalogError> {
    let mut reader = csv::ReaderBuilder::new()
        .from_path(path)
        .map_err(|e| CatalogError::Io {
            path: path.display().to_string(),
            source: e,
        })?;

    let mut places = Vec::new();
    let mut seen_names: HashSet<String> = HashSet::new();

    for (idx, result) in reader.deserialize::<RawCatalogRow>().enumerate() {
        let row_number = idx + 1; // header is row 0
        let row = result.map_err(|e| CatalogError::Io {
            path: path.display().to_string(),
            source: e,
        })?;

        let hours = raw::parse_hours_column(&row.hours).map_err(|reason| CatalogError::MalformedHours {
            row: row_number,
            name: row.place_name.clone(),
            reason,
        })?;

        let place = validate_place(
            &row.place_name,
            row.lat,
            row.lon,
            row.rating,
            row.duration_min,
            &row.label,
            &row.period,
            hours,
        )
        .map_err(|source| CatalogError::Row {
            row: row_number,
            name: row.place_name.clone(),
            source,
        })?;

        if !seen_names.insert(place.name.clone()) {
            return Err(CatalogError::DuplicateName(place.name));
        }
        places.push(place);
    }

    log::debug!(
        "loaded {} catalog rows from '{}'",
        places.len(),
        path.display()
    );
    Ok(places)
}

/// the distinct `label` values present in a loaded catalog, for CLI
/// summaries. purely a convenience built on `itertools::unique` over the
/// borrowed labels.
pub fn distinct_labels(catalog: &[PlaceRecord]) -> Vec<&str> {
    catalog.iter().map(|p| p.label.as_str()).unique().sorted().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp_csv(contents: &str) -> tempfile_path::TempCsv {
        tempfile_path::TempCsv::new(contents)
    }

    /// minimal in-module temp-file helper, avoiding a `tempfile` dev-dependency
    /// for a single test fixture.
    mod tempfile_path {
        use std::fs::File;
        use std::path::PathBuf;

        pub struct TempCsv {
            pub path: PathBuf,
        }

        impl TempCsv {
            pub fn new(contents: &str) -> TempCsv {
                let mut path = std::env::temp_dir();
                path.push(format!("trailmap-catalog-test-{}.csv", std::process::id()));
                let mut file = File::create(&path).expect("create temp csv");
                use std::io::Write;
                file.write_all(contents.as_bytes()).expect("write temp csv");
                TempCsv { path }
            }
        }

        impl Drop for TempCsv {
            fn drop(&mut self) {
                let _ = std::fs::remove_file(&self.path);
            }
        }
    }

    #[test]
    fn loads_a_valid_single_row_catalog() {
        let csv = "place_name,rating,lat,lon,duration_min,label,period,hours\n\
                    Museum,4.5,25.034,121.564,60,attraction,morning,\"{\"\"1\"\": [{\"\"start\"\": \"\"09:00\"\", \"\"end\"\": \"\"18:00\"\"}]}\"\n";
        let temp = write_temp_csv(csv);
        let places = load_csv(&temp.path).unwrap();
        assert_eq!(places.len(), 1);
        assert_eq!(places[0].name, "Museum");
    }

    #[test]
    fn rejects_duplicate_names() {
        let csv = "place_name,rating,lat,lon,duration_min,label,period,hours\n\
                    Museum,4.5,25.034,121.564,60,attraction,morning,\"{}\"\n\
                    Museum,4.0,25.04,121.56,30,restaurant,lunch,\"{}\"\n";
        let temp = write_temp_csv(csv);
        let result = load_csv(&temp.path);
        assert!(matches!(result, Err(CatalogError::DuplicateName(_))));
    }

    #[test]
    fn rejects_malformed_hours_json() {
        let csv = "place_name,rating,lat,lon,duration_min,label,period,hours\n\
                    Museum,4.5,25.034,121.564,60,attraction,morning,not-json\n";
        let temp = write_temp_csv(csv);
        let result = load_csv(&temp.path);
        assert!(matches!(result, Err(CatalogError::MalformedHours { .. })));
    }
}
