/// the CLI's own error type, wrapping everything that can go wrong at the
/// process boundary (config loading, catalog I/O, bad requirement JSON).
/// `trailmap_core::TrailmapError` and `trailmap_catalog::CatalogError` flow
/// through `#[from]`; `main` maps the final `Result` to an exit code
/// (`spec.md` §6 CLI: "exit 0 on success, non-zero on BadInput or
/// PlanFailed").
#[derive(thiserror::Error, Debug)]
pub enum CliError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("catalog error: {0}")]
    Catalog(#[from] trailmap_catalog::CatalogError),

    #[error("requirement error: {0}")]
    Requirement(#[from] trailmap_core::TrailmapError),

    #[error("could not read requirement file '{path}': {source}")]
    RequirementIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse requirement JSON: {0}")]
    RequirementJson(#[from] serde_json::Error),
}

impl CliError {
    /// process exit code, per `spec.md` §6: 0 success, non-zero on
    /// `BadInput` or `PlanFailed`. the CLI distinguishes the two causes the
    /// same way the spec's error surface does: malformed input is `1`,
    /// a structurally unsatisfiable plan is `2`.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Requirement(trailmap_core::TrailmapError::PlanFailed { .. }) => 2,
            _ => 1,
        }
    }
}
