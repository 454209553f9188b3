use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailableSlotsResponse {
    pub page: i64,
    pub week_start: String,
    pub week_end: String,
    pub available_slots: Vec<String>,
    #[serde(default)]
    pub count: i64,
    pub has_previous: bool,
    #[serde(default)]
    pub previous_page: Option<i64>,
    #[serde(default)]
    pub next_page: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub iso: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayAvailability {
    pub iso_date: String,
    pub day_label: String,
    pub date_label: String,
    pub slots: Vec<TimeSlot>,
}

impl DayAvailability {
    /// Three-letter weekday, e.g. "MON".
    pub fn short_day_label(&self) -> String {
        self.day_label.chars().take(3).collect::<String>().to_uppercase()
    }

    pub fn first_slot(&self) -> Option<&TimeSlot> {
        self.slots.first()
    }
}

/// Converts an ISO timestamp (already in the business timezone) into a
/// 12-hour label such as `3:30 PM`. Only the `HH:MM` part is read.
pub fn format_time_label(iso: &str) -> Option<String> {
    let time = iso.get(11..16)?;
    let (hour, minute) = time.split_once(':')?;
    let hours: u32 = hour.parse().ok()?;
    if hours > 23 || minute.len() != 2 || !minute.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let period = if hours >= 12 { "PM" } else { "AM" };
    let normalized = ((hours + 11) % 12) + 1;
    Some(format!("{normalized}:{minute} {period}"))
}

/// Weekday and short date labels for a `YYYY-MM-DD` date, e.g.
/// `("Monday", "Jun 16")`.
pub fn format_day_labels(iso_date: &str) -> Option<(String, String)> {
    let date = NaiveDate::parse_from_str(iso_date, "%Y-%m-%d").ok()?;
    Some((
        date.format("%A").to_string(),
        date.format("%b %-d").to_string(),
    ))
}

/// Groups raw ISO slots by calendar day. Days and the slots inside each day
/// come out in ascending order; repeated timestamps collapse into one slot.
pub fn group_slots_by_day<S: AsRef<str>>(slots: &[S]) -> Vec<DayAvailability> {
    let mut grouping: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();

    for iso in slots {
        let iso = iso.as_ref();
        let (Some(iso_date), Some(label)) = (iso.get(0..10), format_time_label(iso)) else {
            tracing::warn!(slot = %iso, "skipping malformed slot timestamp");
            continue;
        };
        if format_day_labels(iso_date).is_none() {
            tracing::warn!(slot = %iso, "skipping slot with invalid date");
            continue;
        }
        grouping
            .entry(iso_date.to_string())
            .or_default()
            .insert(iso.to_string(), label);
    }

    grouping
        .into_iter()
        .filter_map(|(iso_date, slots)| {
            let (day_label, date_label) = format_day_labels(&iso_date)?;
            Some(DayAvailability {
                iso_date,
                day_label,
                date_label,
                slots: slots
                    .into_iter()
                    .map(|(iso, label)| TimeSlot { iso, label })
                    .collect(),
            })
        })
        .collect()
}
