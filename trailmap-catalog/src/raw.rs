//! the on-disk catalog row shape (`spec.md` 6: "place_name, rating, lat,
//! lon, label, period, hours") and its `hours` sub-parser. the `hours`
//! column is itself a serialized mapping, not a flat CSV field, so it gets
//! a hand-rolled JSON parse rather than a derived `csv` deserialize.

use std::collections::HashMap;

use serde::Deserialize;

use trailmap_core::validator::RawSlot;

/// one line of the catalog CSV, deserialized by `csv`'s serde integration.
/// `duration_min` defaults to `0` (pass-through anchors, `spec.md` §3) when
/// the column is blank.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCatalogRow {
    pub place_name: String,
    #[serde(default)]
    pub rating: Option<f32>,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub duration_min: i64,
    pub label: String,
    pub period: String,
    pub hours: String,
}

#[derive(Debug, Deserialize)]
struct RawHoursSlot {
    start: String,
    end: String,
}

/// parses the `hours` column: a JSON object keyed by weekday (`"1"`..`"7"`)
/// whose value is either `null` (closed all day) or an array of
/// `{"start", "end"}` slot objects.
pub fn parse_hours_column(raw: &str) -> Result<HashMap<u8, Vec<RawSlot>>, String> {
    let parsed: HashMap<String, Option<Vec<RawHoursSlot>>> =
        serde_json::from_str(raw).map_err(|e| e.to_string())?;

    let mut hours = HashMap::new();
    for (weekday_str, slots) in parsed {
        let weekday: u8 = weekday_str
            .parse()
            .map_err(|_| format!("weekday key '{weekday_str}' is not an integer"))?;
        let raw_slots = match slots {
            None => Vec::new(),
            Some(list) => list
                .into_iter()
                .map(|s| RawSlot {
                    start: s.start,
                    end: s.end,
                })
                .collect(),
        };
        hours.insert(weekday, raw_slots);
    }
    Ok(hours)
}
