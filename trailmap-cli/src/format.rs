//! output rendering: the wire JSON shape named in `spec.md` §6, a
//! human-readable itinerary table, and a LINE-message-style text block
//! (`spec.md` §1: "LINE-message formatting" is an out-of-core external
//! collaborator — it lives here, not in `trailmap-core`).

use serde::Serialize;

use trailmap_core::oracle::RouteDetail;
use trailmap_core::PlanStep;

/// the itinerary element shape from `spec.md` §6: `{step, name, start_time,
/// end_time, duration, transport_details, travel_time, route_info?}`. field
/// names here are the wire contract, distinct from `PlanStep`'s internal
/// field names.
#[derive(Debug, Clone, Serialize)]
pub struct WireStep {
    pub step: usize,
    pub name: String,
    pub start_time: String,
    pub end_time: String,
    pub duration: u32,
    pub transport_details: String,
    pub travel_time: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_info: Option<RouteDetail>,
}

impl From<&PlanStep> for WireStep {
    fn from(step: &PlanStep) -> Self {
        WireStep {
            step: step.step,
            name: step.name.clone(),
            start_time: step.arrive_hhmm.to_string(),
            end_time: step.depart_hhmm.to_string(),
            duration: step.dwell_min,
            transport_details: step.transport_label.clone(),
            travel_time: step.travel_min,
            route_info: step.route_detail.clone(),
        }
    }
}

pub fn render_json(steps: &[PlanStep]) -> Result<String, serde_json::Error> {
    let wire: Vec<WireStep> = steps.iter().map(WireStep::from).collect();
    serde_json::to_string_pretty(&wire)
}

/// a human-readable itinerary table, one line per step.
pub fn render_text(steps: &[PlanStep]) -> String {
    let mut out = String::new();
    for step in steps {
        if step.step == 0 {
            out.push_str(&format!("{:>2}. {:<28} depart {}\n", step.step, step.name, step.depart_hhmm));
            continue;
        }
        out.push_str(&format!(
            "{:>2}. {:<28} arrive {}  depart {}  ({} via {}, {} min travel)\n",
            step.step,
            step.name,
            step.arrive_hhmm,
            step.depart_hhmm,
            dwell_label(step.dwell_min),
            step.transport_label,
            step.travel_min,
        ));
    }
    out
}

fn dwell_label(dwell_min: u32) -> String {
    if dwell_min == 0 {
        "pass-through".to_string()
    } else {
        format!("{dwell_min} min")
    }
}

/// a compact LINE-message-style text block: one emoji-free line per stop,
/// suited to a chat bubble rather than a table.
pub fn render_line_message(steps: &[PlanStep]) -> String {
    let mut lines = Vec::with_capacity(steps.len() + 1);
    lines.push("Today's itinerary:".to_string());
    for step in steps {
        if step.step == 0 {
            lines.push(format!("- Start at {} ({})", step.name, step.depart_hhmm));
            continue;
        }
        if step.dwell_min == 0 {
            lines.push(format!("- Arrive {} at {}", step.arrive_hhmm, step.name));
        } else {
            lines.push(format!(
                "- {} : {}-{} ({} by {})",
                step.name, step.arrive_hhmm, step.depart_hhmm, dwell_label(step.dwell_min), step.transport_label
            ));
        }
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use trailmap_core::time::ClockTime;

    fn step(step: usize, name: &str, arrive: (u8, u8), depart: (u8, u8), dwell: u32, travel: u32) -> PlanStep {
        PlanStep {
            step,
            name: name.to_string(),
            arrive_hhmm: ClockTime::from_hm(arrive.0, arrive.1),
            depart_hhmm: ClockTime::from_hm(depart.0, depart.1),
            dwell_min: dwell,
            transport_label: "driving".to_string(),
            travel_min: travel,
            route_detail: None,
        }
    }

    #[test]
    fn json_uses_wire_field_names() {
        let steps = vec![step(0, "Origin", (9, 0), (9, 0), 0, 0)];
        let json = render_json(&steps).unwrap();
        assert!(json.contains("\"start_time\""));
        assert!(json.contains("\"travel_time\""));
        assert!(!json.contains("arrive_hhmm"));
    }

    #[test]
    fn text_marks_origin_as_pass_through() {
        let steps = vec![step(0, "Origin", (9, 0), (9, 0), 0, 0)];
        let text = render_text(&steps);
        assert!(text.contains("Origin"));
    }

    #[test]
    fn line_message_renders_one_block_per_step() {
        let steps = vec![
            step(0, "Origin", (9, 0), (9, 0), 0, 0),
            step(1, "Museum", (9, 10), (10, 10), 60, 10),
        ];
        let msg = render_line_message(&steps);
        assert!(msg.starts_with("Today's itinerary:"));
        assert_eq!(msg.lines().count(), 3);
    }
}
