use crate::capture::CaptureCoordinator;
use crate::config::TimelineConfig;
use crate::extent::TimeExtent;
use crate::histogram::{build_histogram, HistogramPoint};
use crate::merge::{merge_dry_days, merge_spans};
use crate::rows::{build_rows, StackedLayout};
use storm_core::analysis::AnalysisResponse;
use storm_core::span::Span;

/// Everything the two timeline views derive from one analysis response.
///
/// Building is a pure function of the response and configuration, so a
/// caller may cache the model for as long as both are unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimelineModel {
    pub extent: Option<TimeExtent>,
    pub storm_spans: Vec<Span>,
    pub dry_spans: Vec<Span>,
    pub histogram: Vec<HistogramPoint>,
    pub layout: StackedLayout,
}

impl TimelineModel {
    pub fn build(response: &AnalysisResponse, config: &TimelineConfig) -> Self {
        let min_segment = config.min_segment();
        let Some(extent) = TimeExtent::from_events(&response.events, min_segment) else {
            log::info!("[Timeline] model: no events, nothing to lay out");
            return Self::default();
        };
        let storm_spans = merge_spans(
            &response.events,
            &extent,
            min_segment,
            config.merge_strategy,
        );
        let dry_spans = merge_dry_days(&response.dry_days, &extent);
        let histogram = build_histogram(
            &response.events,
            &response.dry_days,
            Some(&extent),
            min_segment,
        );
        let layout = build_rows(&response.events, Some(&extent), min_segment);
        log::info!(
            "[Timeline] model: {} storm spans, {} dry spans, {} rows",
            storm_spans.len(),
            dry_spans.len(),
            layout.rows.len()
        );
        Self {
            extent: Some(extent),
            storm_spans,
            dry_spans,
            histogram,
            layout,
        }
    }

    /// True when there is nothing to draw; views show a "no data" state.
    pub fn is_empty(&self) -> bool {
        self.extent.is_none()
    }

    /// Coordinator over this model's spans, or `None` for an empty model.
    pub fn capture_coordinator(&self) -> Option<CaptureCoordinator> {
        let extent = self.extent?;
        Some(CaptureCoordinator::new(
            extent.reference_epoch,
            self.storm_spans.clone(),
            self.dry_spans.clone(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MergeStrategy;
    use crate::extent::fixtures::*;
    use storm_core::event::EventStatus;

    fn config() -> TimelineConfig {
        TimelineConfig {
            min_segment_ms: 1,
            ..TimelineConfig::default()
        }
    }

    #[test]
    fn test_empty_response_is_empty_model() {
        let model = TimelineModel::build(&AnalysisResponse::default(), &config());
        assert!(model.is_empty());
        assert!(model.histogram.is_empty());
        assert!(model.layout.is_empty());
        assert!(model.capture_coordinator().is_none());
    }

    #[test]
    fn test_build_combines_all_views() {
        let response = AnalysisResponse {
            events: vec![
                storm(1, 1, 0, 5),
                storm(2, 1, 10, 15),
                storm(3, 1, 4, 11),
                event(3, 2, 20, 30, EventStatus::NoEvent),
            ],
            dry_days: vec![dry_day(1, 1)],
        };
        let model = TimelineModel::build(&response, &config());
        assert_eq!(model.storm_spans, vec![Span::new(0, 15)]);
        assert_eq!(model.dry_spans, vec![Span::new(86_400_000, 172_800_000)]);
        assert_eq!(model.layout.rows.len(), 3);
        assert_eq!(model.extent.unwrap().total_duration_ms, 30);
        assert!(!model.histogram.is_empty());

        let legacy = TimelineModel::build(
            &response,
            &TimelineConfig {
                merge_strategy: MergeStrategy::SinglePass,
                ..config()
            },
        );
        assert_eq!(legacy.storm_spans, vec![Span::new(0, 11), Span::new(10, 15)]);
    }
}
