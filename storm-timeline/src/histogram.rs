//! Concurrency histogram: how many datasets are in a storm (or dry) at each
//! boundary timestamp.

use crate::extent::TimeExtent;
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};
use storm_core::event::{DatasetId, DryDay, Event};

/// One step of the histogram. Counts hold from `offset` until the next point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistogramPoint {
    pub offset: i64,
    pub storm_count: usize,
    pub dry_count: usize,
}

/// Build the right-continuous step series for "step-after" rendering.
///
/// Sample points are every passing event start/end, every dry-day start and
/// start+24h, plus both ends of the extent. Each count is the number of
/// distinct datasets whose interval covers the sample under `[start, end)`.
/// Returns an empty series when there are no events.
pub fn build_histogram(
    events: &[Event],
    dry_days: &[DryDay],
    extent: Option<&TimeExtent>,
    min_segment_ms: i64,
) -> Vec<HistogramPoint> {
    let Some(extent) = extent else {
        return Vec::new();
    };
    if events.is_empty() {
        return Vec::new();
    }

    let storms: Vec<(i64, i64, DatasetId)> = events
        .iter()
        .filter(|e| e.is_passing())
        .map(|e| {
            let (start, end) = extent.event_interval(e, min_segment_ms);
            (start, end, e.dataset_id)
        })
        .collect();
    let dries: Vec<(i64, i64, DatasetId)> = dry_days
        .iter()
        .map(|d| {
            let (start, end) = extent.dry_day_interval(d);
            (start, end, d.dataset_id)
        })
        .collect();

    let mut samples: BTreeSet<i64> = BTreeSet::new();
    samples.insert(0);
    samples.insert(extent.total_duration_ms);
    for &(start, end, _) in storms.iter().chain(dries.iter()) {
        samples.insert(start);
        samples.insert(end);
    }

    let series: Vec<HistogramPoint> = samples
        .into_iter()
        .map(|t| HistogramPoint {
            offset: t,
            storm_count: active_datasets(&storms, t),
            dry_count: active_datasets(&dries, t),
        })
        .collect();
    log::debug!(
        "[Timeline] histogram: {} points from {} storms / {} dry days",
        series.len(),
        storms.len(),
        dries.len()
    );
    series
}

fn active_datasets(intervals: &[(i64, i64, DatasetId)], t: i64) -> usize {
    intervals
        .iter()
        .filter(|&&(start, end, _)| start <= t && t < end)
        .map(|&(_, _, dataset)| dataset)
        .collect::<HashSet<_>>()
        .len()
}

/// Largest storm or dry count in the series, for sizing the y-axis.
pub fn peak_count(series: &[HistogramPoint]) -> usize {
    series
        .iter()
        .map(|p| p.storm_count.max(p.dry_count))
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extent::fixtures::*;
    use storm_core::event::EventStatus;

    fn histogram(events: &[Event], dry_days: &[DryDay]) -> Vec<HistogramPoint> {
        let extent = TimeExtent::from_events(events, 1);
        build_histogram(events, dry_days, extent.as_ref(), 1)
    }

    fn counts(series: &[HistogramPoint]) -> Vec<(i64, usize, usize)> {
        series
            .iter()
            .map(|p| (p.offset, p.storm_count, p.dry_count))
            .collect()
    }

    #[test]
    fn test_no_events_empty_series() {
        assert!(histogram(&[], &[dry_day(1, 0)]).is_empty());
    }

    #[test]
    fn test_single_event_step() {
        // A NoEvent record pulls the reference epoch 100 ms earlier.
        let events = vec![
            event(2, 1, 0, 50, EventStatus::NoEvent),
            storm(1, 1, 100, 200),
            event(2, 2, 300, 400, EventStatus::NoEvent),
        ];
        let series = histogram(&events, &[]);
        assert_eq!(counts(&series), vec![(0, 0, 0), (100, 1, 0), (200, 0, 0), (400, 0, 0)]);
    }

    #[test]
    fn test_counts_distinct_datasets() {
        let events = vec![
            storm(1, 1, 0, 100),
            storm(1, 2, 50, 150),
            storm(2, 1, 60, 80),
        ];
        let series = histogram(&events, &[]);
        assert_eq!(
            counts(&series),
            vec![
                (0, 1, 0),
                (50, 1, 0),
                (60, 2, 0),
                (80, 1, 0),
                (100, 1, 0),
                (150, 0, 0),
            ]
        );
        assert_eq!(peak_count(&series), 2);
    }

    #[test]
    fn test_dry_days_counted_per_dataset() {
        let day = 86_400_000;
        let events = vec![storm(1, 1, 0, 1_000)];
        let days = vec![dry_day(1, 1), dry_day(2, 1), dry_day(2, 2)];
        let series = histogram(&events, &days);
        assert_eq!(
            counts(&series),
            vec![
                (0, 1, 0),
                (1_000, 0, 0),
                (day, 0, 2),
                (2 * day, 0, 1),
                (3 * day, 0, 0),
            ]
        );
    }
}
