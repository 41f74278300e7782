use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use shared_models::records::{Appointment, Patient};

/// Slot length used for the daily grid.
pub const DEFAULT_INTERVAL_MIN: u32 = 30;

/// A contiguous working period within a day, in wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl Segment {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }
}

/// Business hours: morning, afternoon and evening blocks.
pub fn default_segments() -> Vec<Segment> {
    let t = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
    vec![
        Segment::new(t(8, 30), t(12, 0)),
        Segment::new(t(13, 30), t(17, 30)),
        Segment::new(t(18, 30), t(21, 30)),
    ]
}

/// A bookable time window: wall-clock label plus absolute start instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    pub label: String,
    pub starts_at: DateTime<Utc>,
}

/// One row of the daily grid: the slot and, when occupied, the matched
/// appointment with its patient resolved.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRow {
    pub slot: Slot,
    pub appointment: Option<Appointment>,
    pub patient: Option<Patient>,
}
