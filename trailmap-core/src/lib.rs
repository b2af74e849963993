//! greedy one-day POI itinerary planning engine.
//!
//! this crate is the tightly-coupled core named in the system this repo
//! implements: time/geo primitives, the POI data model, the pluggable
//! travel-time oracle contract, the scoring function, and the planner loop
//! that ties them together. CSV catalog ingest, the HTTP directions
//! transport, and the CLI presentation layer live in sibling crates.

pub mod cache;
pub mod error;
pub mod geo;
pub mod oracle;
pub mod place;
pub mod plan;
pub mod planner;
pub mod requirement;
pub mod scorer;
pub mod strategy;
pub mod time;
pub mod time_service;
pub mod validator;

pub use error::{TrailmapError, TrailmapResult};
pub use place::PlaceRecord;
pub use plan::PlanStep;
pub use planner::Planner;
pub use requirement::{RawTripRequirement, TripRequirement};
