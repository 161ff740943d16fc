//! Tunables shared by the timeline builders, the window controller and the
//! chart renderer.

use serde::{Deserialize, Serialize};

/// Shortest bar drawn for an event, in ms. Keeps zero-length events visible
/// and clickable.
pub const MIN_SEGMENT_MS: i64 = 60_000;

/// Plot margins in CSS pixels.
///
/// The renderer lays its axes out inside these margins and the pointer
/// mapper inverts the same numbers, so there is exactly one copy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartMargins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl ChartMargins {
    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }
}

/// Margins used by both the Gantt and the concurrency chart so their x-axes
/// line up. The wide left margin holds the dataset names.
pub const CHART_MARGINS: ChartMargins = ChartMargins {
    top: 20.0,
    right: 30.0,
    bottom: 30.0,
    left: 140.0,
};

/// How overlapping storm intervals are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MergeStrategy {
    /// Sort by start and merge in one sweep; output never overlaps.
    #[default]
    Sweep,
    /// Extend the first touching span per event, without cascading.
    /// Matches results captured with the legacy dashboard.
    SinglePass,
}

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TimelineConfig {
    pub min_segment_ms: i64,
    /// Width multiplier applied by zoom-in.
    pub zoom_in_factor: f64,
    /// Width multiplier applied by zoom-out.
    pub zoom_out_factor: f64,
    /// Fraction of the window width moved per pan step.
    pub pan_fraction: f64,
    /// Narrowest window zoom-in may produce, in ms.
    pub min_window_ms: f64,
    pub merge_strategy: MergeStrategy,
    pub margins: ChartMargins,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            min_segment_ms: MIN_SEGMENT_MS,
            zoom_in_factor: 0.6,
            zoom_out_factor: 1.4,
            pan_fraction: 0.25,
            min_window_ms: MIN_SEGMENT_MS as f64,
            merge_strategy: MergeStrategy::default(),
            margins: CHART_MARGINS,
        }
    }
}

impl TimelineConfig {
    /// Read a configuration from JSON; missing keys keep their defaults.
    pub fn from_json(json: &str) -> storm_core::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Minimum segment length, never below 1 ms.
    pub fn min_segment(&self) -> i64 {
        self.min_segment_ms.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            TimelineConfig::from_json(r#"{"minSegmentMs": 1000, "mergeStrategy": "single-pass"}"#)
                .unwrap();
        assert_eq!(config.min_segment_ms, 1000);
        assert_eq!(config.merge_strategy, MergeStrategy::SinglePass);
        assert_eq!(config.zoom_in_factor, 0.6);
        assert_eq!(config.margins, CHART_MARGINS);
    }

    #[test]
    fn test_min_segment_never_zero() {
        let config = TimelineConfig {
            min_segment_ms: 0,
            ..TimelineConfig::default()
        };
        assert_eq!(config.min_segment(), 1);
    }

    #[test]
    fn test_margins_totals() {
        assert_eq!(CHART_MARGINS.horizontal(), 170.0);
        assert_eq!(CHART_MARGINS.vertical(), 50.0);
    }
}
