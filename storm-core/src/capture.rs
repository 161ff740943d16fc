use crate::error::{Result, TimelineError};
use crate::event::timestamp;
use crate::span::SpanKind;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Capture persistence endpoint, relative to the API base URL.
pub const CAPTURES_PATH: &str = "/captures";

/// A span the user clicked, handed to the capture modal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureRequest {
    #[serde(rename = "type")]
    pub kind: SpanKind,
    #[serde(with = "timestamp")]
    pub start_time: NaiveDateTime,
    #[serde(with = "timestamp")]
    pub end_time: NaiveDateTime,
}

/// Editable state of the capture modal.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureForm {
    pub name: String,
    pub kind: SpanKind,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
}

impl From<CaptureRequest> for CaptureForm {
    fn from(request: CaptureRequest) -> Self {
        CaptureForm {
            name: String::new(),
            kind: request.kind,
            start_time: request.start_time,
            end_time: request.end_time,
        }
    }
}

impl CaptureForm {
    /// Check the form and produce the record to save.
    pub fn validate(&self) -> Result<NamedCapture> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(TimelineError::CaptureNameRequired);
        }
        if self.end_time <= self.start_time {
            return Err(TimelineError::CaptureInvertedInterval);
        }
        Ok(NamedCapture {
            name: name.to_string(),
            kind: self.kind,
            start_time: self.start_time,
            end_time: self.end_time,
        })
    }
}

/// A validated capture, ready for the save operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedCapture {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: SpanKind,
    #[serde(with = "timestamp")]
    pub start_time: NaiveDateTime,
    #[serde(with = "timestamp")]
    pub end_time: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn form(name: &str, start_hour: u32, end_hour: u32) -> CaptureForm {
        let day = NaiveDate::from_ymd_opt(2023, 3, 1).unwrap();
        CaptureForm {
            name: name.to_string(),
            kind: SpanKind::Storm,
            start_time: day.and_hms_opt(start_hour, 0, 0).unwrap(),
            end_time: day.and_hms_opt(end_hour, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_validate_trims_name() {
        let capture = form("  March storm ", 2, 9).validate().unwrap();
        assert_eq!(capture.name, "March storm");
        assert_eq!(capture.kind, SpanKind::Storm);
    }

    #[test]
    fn test_validate_requires_name() {
        assert_eq!(form("   ", 2, 9).validate(), Err(TimelineError::CaptureNameRequired));
    }

    #[test]
    fn test_validate_rejects_inverted_interval() {
        assert_eq!(
            form("x", 9, 9).validate(),
            Err(TimelineError::CaptureInvertedInterval)
        );
    }

    #[test]
    fn test_capture_request_wire_format() {
        let request = CaptureRequest {
            kind: SpanKind::DryDay,
            start_time: form("x", 0, 1).start_time,
            end_time: form("x", 0, 1).end_time,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["type"], "dryDay");
        assert_eq!(json["startTime"], "2023-03-01T00:00:00");
        assert_eq!(json["endTime"], "2023-03-01T01:00:00");
    }
}
