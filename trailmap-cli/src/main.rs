//! `trailmap`: the CLI entry point for the one-day POI itinerary planner
//! (`spec.md` §1, §6 CLI). wires together `trailmap-catalog` (CSV ingest),
//! `trailmap-core` (validation + planning), and `trailmap-directions`
//! (travel oracle) — mirroring how `bambam/src/main.rs` wires its own
//! domain crates behind a single `clap::Parser` binary.

mod config;
mod error;
mod format;
mod geocode;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use trailmap_catalog::load_csv;
use trailmap_core::oracle::TravelOracle;
use trailmap_core::planner::Planner;
use trailmap_core::requirement::RawTripRequirement;
use trailmap_core::scorer::Scorer;
use trailmap_core::strategy::StrategyConfig;
use trailmap_core::validator::validate_requirement;
use trailmap_core::PlaceRecord;
use trailmap_directions::{CachedOracle, DEFAULT_CACHE_CAPACITY};

use error::CliError;

/// plans and prints a one-day POI itinerary.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// path to the POI catalog CSV
    catalog: PathBuf,

    /// path to a trip requirement JSON file; if omitted, a default
    /// requirement (09:00-18:00 from Taipei Main Station) is used
    /// (`spec.md` §6 CLI).
    #[arg(short, long)]
    requirement: Option<PathBuf>,

    /// path to a `trailmap.toml` configuration file (`spec.md` §6
    /// Configuration).
    #[arg(long)]
    config: Option<PathBuf>,

    /// output rendering
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// number of top-scoring candidates to randomize across at each step
    /// (`spec.md` §4.C7; default 1 is fully deterministic).
    #[arg(long, default_value_t = 1)]
    top_k: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Text,
    Line,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(rendered) => {
            println!("{rendered}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e}");
            eprintln!("{e}");
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn run(args: &Args) -> Result<String, CliError> {
    let settings = config::load_settings(args.config.as_deref())?;

    let catalog = load_csv(&args.catalog)?;

    let raw_requirement = match &args.requirement {
        Some(path) => {
            let text = std::fs::read_to_string(path).map_err(|e| CliError::RequirementIo {
                path: path.display().to_string(),
                source: e,
            })?;
            serde_json::from_str::<RawTripRequirement>(&text)?
        }
        None => default_requirement(),
    };

    let geocoder = geocode::CatalogFallbackGeocoder::new(&catalog);
    let today = chrono::Local::now().date_naive();
    let requirement = validate_requirement(&raw_requirement, &geocoder, today)?;

    let origin = place_at(&requirement.start_point_name, requirement.start_point);
    let destination = place_at(&requirement.end_point_name, requirement.end_point);

    let timeout = config::resolve_timeout(&settings);
    let cache_capacity = settings.cache_capacity.unwrap_or(DEFAULT_CACHE_CAPACITY);
    let oracle: Box<dyn TravelOracle> = match &settings.directions_api_key {
        Some(key) => Box::new(CachedOracle::with_capacity(
            trailmap_directions::HttpDirectionsOracle::with_timeout(key.clone(), timeout),
            cache_capacity,
        )),
        None => Box::new(trailmap_core::oracle::EstimatorOracle),
    };

    let planner = Planner {
        requirement: &requirement,
        origin: &origin,
        destination: &destination,
        catalog: &catalog,
        oracle: oracle.as_ref(),
        scorer: Scorer::default(),
        strategy_config: StrategyConfig { top_k: args.top_k },
    };

    let mut rng = rand::thread_rng();
    let steps = planner.plan(&mut rng)?;

    let rendered = match args.format {
        Format::Json => format::render_json(&steps)?,
        Format::Text => format::render_text(&steps),
        Format::Line => format::render_line_message(&steps),
    };
    Ok(rendered)
}

/// a synthetic, hours-less record standing in for the trip's fixed
/// origin/destination — these are not catalog POIs, so only their name and
/// coordinate are ever consulted by the planner.
fn place_at(name: &str, coordinate: trailmap_core::geo::Coordinate) -> PlaceRecord {
    PlaceRecord {
        name: name.to_string(),
        coordinate,
        rating: None,
        duration_min: 0,
        label: "endpoint".to_string(),
        period: trailmap_core::place::Period::Morning,
        hours: std::collections::HashMap::new(),
    }
}

/// `spec.md` §4.C9 defaults, used when no `--requirement` file is given.
fn default_requirement() -> RawTripRequirement {
    RawTripRequirement {
        start_time: "09:00".to_string(),
        end_time: "18:00".to_string(),
        start_point: trailmap_core::requirement::DEFAULT_START_POINT_NAME.to_string(),
        end_point: None,
        transport_mode: None,
        distance_threshold_km: None,
        lunch_time: None,
        dinner_time: None,
        breakfast_time: None,
        date: None,
        budget: None,
    }
}
