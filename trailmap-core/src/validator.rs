//! `spec.md` 4.C9: input validation for POI records and the trip
//! requirement, with default-filling for optional fields. input errors are
//! caught here and never reach the planner.

use std::collections::HashMap;
use std::str::FromStr;

use crate::error::{TrailmapError, TrailmapResult};
use crate::geo::Coordinate;
use crate::oracle::TravelMode;
use crate::place::{DaySchedule, HourSlot, Period, PlaceRecord};
use crate::requirement::{Geocoder, RawTripRequirement, TripRequirement};
use crate::time::{ClockTime, Weekday};

/// a single raw `{start, end}` hours slot as read from the catalog, prior
/// to `ClockTime` parsing.
#[derive(Clone, Debug)]
pub struct RawSlot {
    pub start: String,
    pub end: String,
}

/// builds and validates a [`PlaceRecord`] from loosely-typed catalog
/// fields. the shape mirrors the catalog ingest format in `spec.md` 6:
/// `place_name, rating, lat, lon, label, period, hours`.
pub fn validate_place(
    name: &str,
    lat: f64,
    lon: f64,
    rating: Option<f32>,
    duration_min: i64,
    label: &str,
    period: &str,
    hours: HashMap<u8, Vec<RawSlot>>,
) -> TrailmapResult<PlaceRecord> {
    if name.trim().is_empty() {
        return Err(TrailmapError::bad_input("name", "must not be empty"));
    }
    let coordinate = Coordinate::new(lat, lon)
        .map_err(|e| TrailmapError::bad_input("coordinate", e.to_string()))?;
    if let Some(r) = rating {
        if !(0.0..=5.0).contains(&r) {
            return Err(TrailmapError::bad_input(
                "rating",
                format!("must be within [0.0, 5.0], got {r}"),
            ));
        }
    }
    if duration_min < 0 {
        return Err(TrailmapError::bad_input(
            "duration_min",
            "must be non-negative",
        ));
    }
    let period = parse_period(period)?;

    let mut parsed_hours = HashMap::new();
    for (weekday, slots) in hours {
        if !(1..=7).contains(&weekday) {
            return Err(TrailmapError::bad_input(
                "hours.weekday",
                format!("must be within 1..=7, got {weekday}"),
            ));
        }
        let mut day_slots = Vec::with_capacity(slots.len());
        for raw in slots {
            let start = ClockTime::parse(&raw.start)?;
            let end = ClockTime::parse(&raw.end)?;
            day_slots.push(HourSlot::new(start, end));
        }
        parsed_hours.insert(weekday, DaySchedule(day_slots));
    }

    Ok(PlaceRecord {
        name: name.to_string(),
        coordinate,
        rating,
        duration_min: duration_min as u32,
        label: label.to_string(),
        period,
        hours: parsed_hours,
    })
}

fn parse_period(s: &str) -> TrailmapResult<Period> {
    match s.to_ascii_lowercase().as_str() {
        "morning" => Ok(Period::Morning),
        "lunch" => Ok(Period::Lunch),
        "afternoon" => Ok(Period::Afternoon),
        "dinner" => Ok(Period::Dinner),
        "night" => Ok(Period::Night),
        other => Err(TrailmapError::bad_input(
            "period",
            format!("unknown period '{other}'"),
        )),
    }
}

fn parse_optional_meal_time(field: &str, value: &Option<String>) -> TrailmapResult<Option<ClockTime>> {
    match value.as_deref() {
        None => Ok(None),
        Some(s) if s.eq_ignore_ascii_case("none") => Ok(None),
        Some(s) => ClockTime::parse(s)
            .map(Some)
            .map_err(|e| TrailmapError::bad_input(field, e.to_string())),
    }
}

/// `spec.md` 4.C9 defaults: lunch 12:00, dinner 18:00, threshold 30, mode
/// `driving`, `end_point = start_point` when absent.
pub fn validate_requirement(
    raw: &RawTripRequirement,
    geocoder: &dyn Geocoder,
    today: chrono::NaiveDate,
) -> TrailmapResult<TripRequirement> {
    let start_time = ClockTime::parse(&raw.start_time)?;
    let end_time = ClockTime::parse(&raw.end_time)?;
    if start_time >= end_time {
        return Err(TrailmapError::bad_input(
            "start_time",
            format!("start_time ({start_time}) must be before end_time ({end_time})"),
        ));
    }

    let start_point = geocoder.geocode(&raw.start_point).ok_or_else(|| {
        TrailmapError::bad_input(
            "start_point",
            format!("could not resolve coordinates for '{}'", raw.start_point),
        )
    })?;

    let end_point_name = raw
        .end_point
        .clone()
        .unwrap_or_else(|| raw.start_point.clone());
    let end_point = if raw.end_point.is_none() {
        start_point
    } else {
        geocoder.geocode(&end_point_name).ok_or_else(|| {
            TrailmapError::bad_input(
                "end_point",
                format!("could not resolve coordinates for '{end_point_name}'"),
            )
        })?
    };

    let transport_mode = match &raw.transport_mode {
        None => TravelMode::Driving,
        Some(m) => TravelMode::from_str(m).map_err(|e| TrailmapError::bad_input("transport_mode", e))?,
    };

    let distance_threshold_km = raw.distance_threshold_km.unwrap_or(30.0);
    if distance_threshold_km <= 0.0 {
        return Err(TrailmapError::bad_input(
            "distance_threshold_km",
            "must be positive",
        ));
    }

    let lunch_time = match &raw.lunch_time {
        None => Some(ClockTime::from_hm(12, 0)),
        Some(_) => parse_optional_meal_time("lunch_time", &raw.lunch_time)?,
    };
    let dinner_time = match &raw.dinner_time {
        None => Some(ClockTime::from_hm(18, 0)),
        Some(_) => parse_optional_meal_time("dinner_time", &raw.dinner_time)?,
    };
    let breakfast_time = parse_optional_meal_time("breakfast_time", &raw.breakfast_time)?;

    let weekday = match &raw.date {
        None => Weekday::from_chrono(today.weekday()),
        Some(mm_dd) => Weekday::from_chrono(parse_weekday_from_mm_dd(mm_dd, today)?),
    };

    Ok(TripRequirement {
        start_time,
        end_time,
        start_point_name: raw.start_point.clone(),
        start_point,
        end_point_name,
        end_point,
        transport_mode,
        distance_threshold_km,
        lunch_time,
        dinner_time,
        breakfast_time,
        weekday,
        budget: raw.budget,
    })
}

fn parse_weekday_from_mm_dd(mm_dd: &str, today: chrono::NaiveDate) -> TrailmapResult<chrono::Weekday> {
    use chrono::Datelike;
    let (month, day) = mm_dd.split_once('-').ok_or_else(|| {
        TrailmapError::bad_input("date", format!("expected MM-DD, got '{mm_dd}'"))
    })?;
    let month: u32 = month
        .parse()
        .map_err(|_| TrailmapError::bad_input("date", format!("bad month in '{mm_dd}'")))?;
    let day: u32 = day
        .parse()
        .map_err(|_| TrailmapError::bad_input("date", format!("bad day in '{mm_dd}'")))?;
    chrono::NaiveDate::from_ymd_opt(today.year(), month, day)
        .map(|d| d.weekday())
        .ok_or_else(|| TrailmapError::bad_input("date", format!("'{mm_dd}' is not a valid date")))
}
