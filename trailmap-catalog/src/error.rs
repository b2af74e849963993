use trailmap_core::TrailmapError;

/// errors specific to turning catalog rows on disk into validated
/// [`trailmap_core::PlaceRecord`]s. a bad individual row surfaces as
/// [`CatalogError::Row`] wrapping the [`TrailmapError::BadInput`] the
/// validator raised for it; everything else here is about the file itself.
#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    #[error("failed reading catalog file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: csv::Error,
    },
    #[error("row {row} ('{name}') has malformed 'hours' column: {reason}")]
    MalformedHours {
        row: usize,
        name: String,
        reason: String,
    },
    #[error("row {row} ('{name}') failed validation: {source}")]
    Row {
        row: usize,
        name: String,
        #[source]
        source: TrailmapError,
    },
    #[error("catalog has duplicate POI name '{0}'; POI identity must be unique within a run")]
    DuplicateName(String),
}
