use anyhow::Result;
use serde_json::{Value, json};

use crate::plan::generator::ScheduleResult;
use crate::plan::time::TimeDisplayMode;

pub const NOOP_MESSAGE: &str = "Already at target bedtime; no adjustment needed.";

pub fn render_text(result: &ScheduleResult, mode: TimeDisplayMode) -> String {
    if result.is_noop() {
        return format!("{NOOP_MESSAGE}\n");
    }

    let nights = result.nights();
    let unit = if nights == 1 { "night" } else { "nights" };
    let mut out = format!("Direction: {} ({nights} {unit})\n", result.resolved_direction);
    for entry in &result.days {
        out.push_str(&format!(
            "Day {}: sleep {}, wake {}\n",
            entry.day,
            entry.sleep_time.display(mode),
            entry.wake_time.display(mode)
        ));
    }
    out
}

pub fn render_json(result: &ScheduleResult, mode: TimeDisplayMode) -> Result<String> {
    let days = result
        .days
        .iter()
        .map(|entry| {
            json!({
                "day": entry.day,
                "sleep": entry.sleep_time.display(mode),
                "wake": entry.wake_time.display(mode),
            })
        })
        .collect::<Vec<_>>();

    let payload = json!({
        "direction": result.resolved_direction,
        "nights": result.nights(),
        "days": Value::Array(days),
    });
    let text = serde_json::to_string_pretty(&payload)?;
    Ok(format!("{text}\n"))
}
