//! Wire types for the classification service and response sequencing.
//!
//! The dashboard POSTs an [`AnalysisRequest`] and receives an
//! [`AnalysisResponse`] listing detected events and dry days. Requests may
//! overlap when the user re-runs an analysis before the previous one
//! returned; [`RequestSequencer`] decides which responses are still wanted.

use crate::error::Result;
use crate::event::{DatasetId, DryDay, Event};
use serde::{Deserialize, Serialize};

/// Classification endpoint, relative to the API base URL.
pub const ANALYSIS_PATH: &str = "/storm-analysis";

/// Thresholds forwarded to the server-side storm/dry-day classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisParams {
    /// Daily depth (mm) at or below which a day still counts as dry.
    pub dry_day_tolerance: f64,
    pub preceding_dry_days: u32,
    pub consecutive_zero_threshold: u32,
    /// Minimum gap between two events, in minutes.
    pub inter_event_gap: u32,
    /// Required event depth in mm.
    pub required_depth: f64,
    /// Required intensity in mm/hr.
    pub required_intensity: f64,
    /// Minutes the required intensity must be sustained.
    pub required_intensity_duration: u32,
    pub partial_event_percent: f64,
    pub check_consecutive_intensity: bool,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            dry_day_tolerance: 0.2,
            preceding_dry_days: 4,
            consecutive_zero_threshold: 6,
            inter_event_gap: 360,
            required_depth: 5.0,
            required_intensity: 2.0,
            required_intensity_duration: 60,
            partial_event_percent: 80.0,
            check_consecutive_intensity: false,
        }
    }
}

/// Body of the classification request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    pub dataset_ids: Vec<DatasetId>,
    pub params: AnalysisParams,
}

/// Classification result: every candidate event plus detected dry days.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub dry_days: Vec<DryDay>,
}

impl AnalysisResponse {
    /// Decode a response body.
    pub fn from_json(body: &str) -> Result<Self> {
        let response: AnalysisResponse = serde_json::from_str(body)?;
        log::info!(
            "[Analysis] decoded {} events and {} dry days",
            response.events.len(),
            response.dry_days.len()
        );
        Ok(response)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.dry_days.is_empty()
    }
}

/// Ticket identifying one in-flight classification request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(u64);

/// Orders overlapping requests so a stale response never replaces a newer one.
///
/// A request is settled once its response has been applied or it failed;
/// nothing at or below the settled ticket is accepted afterwards.
#[derive(Debug, Clone, Default)]
pub struct RequestSequencer {
    issued: u64,
    settled: Option<u64>,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket for a request about to be sent.
    pub fn begin(&mut self) -> RequestTicket {
        self.issued += 1;
        RequestTicket(self.issued)
    }

    /// Record that the response for `ticket` arrived.
    ///
    /// Returns `false` if a newer request was already settled, in which case
    /// the caller must discard this one.
    pub fn accept(&mut self, ticket: RequestTicket) -> bool {
        match self.settled {
            Some(settled) if ticket.0 <= settled => {
                log::info!(
                    "[Analysis] discarding stale response #{} (request #{} already settled)",
                    ticket.0,
                    settled
                );
                false
            }
            _ => {
                self.settled = Some(ticket.0);
                true
            }
        }
    }

    /// Record that the request for `ticket` failed.
    ///
    /// Older responses still in flight are discarded from now on, so the
    /// failure is not papered over by a stale success.
    pub fn fail(&mut self, ticket: RequestTicket) {
        if self.settled.map_or(true, |settled| ticket.0 > settled) {
            self.settled = Some(ticket.0);
        }
    }

    /// True while `ticket` is the most recently issued request.
    pub fn is_latest(&self, ticket: RequestTicket) -> bool {
        ticket.0 == self.issued
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESPONSE_JSON: &str = r#"{
        "events": [
            {"id": 1, "datasetId": 10, "datasetName": "North", "startTime": "2023-01-01T00:00:00",
             "endTime": "2023-01-01T06:00:00", "totalDepth": 12.0, "durationHours": 6.0,
             "peakIntensity": 4.0, "status": "Event"},
            {"id": 2, "datasetId": 11, "datasetName": "South", "startTime": "2023-01-02T00:00:00",
             "endTime": "2023-01-02T01:00:00", "totalDepth": 0.4, "durationHours": 1.0,
             "peakIntensity": 0.4, "status": "NoEvent"}
        ],
        "dryDays": [
            {"datasetId": 10, "datasetName": "North", "date": "2023-01-04", "totalDepth": 0.0},
            {"datasetId": 12, "datasetName": "East", "date": "2023-01-04", "totalDepth": 0.1}
        ]
    }"#;

    #[test]
    fn test_response_decodes() {
        let response = AnalysisResponse::from_json(RESPONSE_JSON).unwrap();
        assert_eq!(response.events.len(), 2);
        assert_eq!(response.dry_days.len(), 2);
        assert!(response.events[0].is_passing());
        assert!(!response.events[1].is_passing());
        assert_eq!(response.dry_days[1].dataset_name, "East");
    }

    #[test]
    fn test_missing_collections_default_to_empty() {
        let response = AnalysisResponse::from_json("{}").unwrap();
        assert!(response.is_empty());
    }

    #[test]
    fn test_malformed_body_is_decode_error() {
        let err = AnalysisResponse::from_json("{\"events\": 3}").unwrap_err();
        assert!(matches!(err, crate::error::TimelineError::ResponseDecode(_)));
    }

    #[test]
    fn test_request_serializes_camel_case() {
        let request = AnalysisRequest {
            dataset_ids: vec![1, 2],
            params: AnalysisParams::default(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["datasetIds"], serde_json::json!([1, 2]));
        assert_eq!(json["params"]["interEventGap"], 360);
        assert_eq!(json["params"]["checkConsecutiveIntensity"], false);
    }

    #[test]
    fn test_sequencer_discards_superseded_response() {
        let mut seq = RequestSequencer::new();
        let first = seq.begin();
        let second = seq.begin();
        assert!(!seq.is_latest(first));
        assert!(seq.is_latest(second));

        // Newer response lands first; the older one must be dropped.
        assert!(seq.accept(second));
        assert!(!seq.accept(first));
    }

    #[test]
    fn test_sequencer_accepts_in_order_responses() {
        let mut seq = RequestSequencer::new();
        let first = seq.begin();
        assert!(seq.accept(first));
        let second = seq.begin();
        assert!(seq.accept(second));
        assert!(!seq.accept(second));
    }

    #[test]
    fn test_failed_latest_request_blocks_older_success() {
        let mut seq = RequestSequencer::new();
        let first = seq.begin();
        let second = seq.begin();

        // The newest request fails before the older one answers.
        seq.fail(second);
        assert!(!seq.accept(first));

        // A retry after the failure is accepted as usual.
        let retry = seq.begin();
        assert!(seq.accept(retry));
    }

    #[test]
    fn test_stale_failure_does_not_unsettle_newer_response() {
        let mut seq = RequestSequencer::new();
        let first = seq.begin();
        let second = seq.begin();
        assert!(seq.accept(second));
        seq.fail(first);
        assert!(!seq.accept(second));
    }
}
