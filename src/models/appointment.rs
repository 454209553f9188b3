use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    pub start_time: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
    pub created_at: String,
}

impl Appointment {
    pub fn start_utc(&self) -> Option<NaiveDateTime> {
        parse_iso_utc(&self.start_time)
    }

    /// Calendar date of the start time in UTC, used to locate the week the
    /// appointment falls in.
    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start_utc().map(|dt| dt.date())
    }

    /// Reason text for display, `None` when missing or blank.
    pub fn display_reason(&self) -> Option<&str> {
        self.reason.as_deref().filter(|r| !r.trim().is_empty())
    }
}

/// Parses a backend timestamp into naive UTC. Offsets are honoured; naive
/// timestamps are taken as UTC already.
pub fn parse_iso_utc(s: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc).naive_utc());
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S"))
        .ok()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentsResponse {
    pub page: i64,
    pub week_start: String,
    pub week_end: String,
    pub appointments: Vec<Appointment>,
    #[serde(default)]
    pub count: i64,
    pub has_previous: bool,
    #[serde(default)]
    pub previous_page: Option<i64>,
    #[serde(default)]
    pub next_page: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateAppointmentPayload {
    pub start_time: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateAppointmentPayload {
    pub start_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}
