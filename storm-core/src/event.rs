use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use storm_utils::dates;

/// Identifier of an uploaded rainfall/flow dataset.
pub type DatasetId = i64;

/// Classification outcome for a candidate storm event.
///
/// `Event` and `PartialEvent` satisfied the depth/intensity criteria fully or
/// partially and count as "passing"; `NoEvent` did not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventStatus {
    Event,
    #[serde(alias = "Partial Event")]
    PartialEvent,
    #[serde(alias = "No Event")]
    NoEvent,
}

impl EventStatus {
    /// True for statuses that produce storm spans.
    pub fn is_passing(self) -> bool {
        matches!(self, EventStatus::Event | EventStatus::PartialEvent)
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EventStatus::Event => "Event",
            EventStatus::PartialEvent => "Partial Event",
            EventStatus::NoEvent => "No Event",
        };
        f.write_str(label)
    }
}

/// A candidate storm event detected in one dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: i64,
    pub dataset_id: DatasetId,
    pub dataset_name: String,
    #[serde(with = "timestamp")]
    pub start_time: NaiveDateTime,
    #[serde(with = "timestamp")]
    pub end_time: NaiveDateTime,
    /// Total rainfall depth in mm.
    #[serde(default)]
    pub total_depth: f64,
    #[serde(default)]
    pub duration_hours: f64,
    /// Peak intensity in mm/hr.
    #[serde(default)]
    pub peak_intensity: f64,
    pub status: EventStatus,
}

impl Event {
    /// Events are identified by dataset and per-dataset id.
    pub fn key(&self) -> (DatasetId, i64) {
        (self.dataset_id, self.id)
    }

    pub fn is_passing(&self) -> bool {
        self.status.is_passing()
    }

    /// True when `end_time <= start_time`.
    pub fn is_malformed(&self) -> bool {
        self.end_time <= self.start_time
    }
}

/// A calendar day classified as rainfall-free within tolerance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DryDay {
    pub dataset_id: DatasetId,
    pub dataset_name: String,
    #[serde(with = "calendar_date")]
    pub date: NaiveDate,
    #[serde(default)]
    pub total_depth: f64,
}

impl DryDay {
    /// Local midnight at the start of the day.
    pub fn start(&self) -> NaiveDateTime {
        dates::day_start(&self.date)
    }

    /// Local midnight 24h after [`start`](Self::start).
    pub fn end(&self) -> NaiveDateTime {
        dates::day_end(&self.date)
    }
}

/// Lenient timestamp (de)serialization shared by the wire types.
pub(crate) mod timestamp {
    use crate::error::TimelineError;
    use chrono::NaiveDateTime;
    use serde::{de, Deserialize, Deserializer, Serializer};
    use storm_utils::dates;

    pub fn serialize<S: Serializer>(ts: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&dates::format_timestamp(ts))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        dates::parse_timestamp(&raw)
            .map_err(|e| de::Error::custom(TimelineError::TimestampParse(format!("{}: {}", raw, e))))
    }
}

mod calendar_date {
    use crate::error::TimelineError;
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};
    use storm_utils::dates;

    pub fn serialize<S: Serializer>(date: &NaiveDate, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&date.format("%Y-%m-%d").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(d)?;
        dates::parse_date(&raw)
            .map_err(|e| de::Error::custom(TimelineError::TimestampParse(format!("{}: {}", raw, e))))
    }
}
