//! Span merging: per-dataset intervals in, dataset-independent spans out.

use crate::config::MergeStrategy;
use crate::extent::TimeExtent;
use storm_core::event::{DryDay, Event};
use storm_core::span::Span;

/// Merge passing storm events into activity spans, sorted by start.
///
/// Events with status `NoEvent` are ignored. Touching intervals (one ends
/// exactly where the next starts) are merged.
pub fn merge_spans(
    events: &[Event],
    extent: &TimeExtent,
    min_segment_ms: i64,
    strategy: MergeStrategy,
) -> Vec<Span> {
    let intervals: Vec<(i64, i64)> = events
        .iter()
        .filter(|e| e.is_passing())
        .map(|e| extent.event_interval(e, min_segment_ms))
        .collect();

    let spans = match strategy {
        MergeStrategy::Sweep => sweep(intervals),
        MergeStrategy::SinglePass => single_pass(&intervals),
    };
    log::debug!(
        "[Timeline] merge ({:?}): {} spans from {} events",
        strategy,
        spans.len(),
        events.len()
    );
    spans
}

/// Sort by start, then extend the last span while the next interval touches it.
fn sweep(mut intervals: Vec<(i64, i64)>) -> Vec<Span> {
    intervals.sort_unstable();
    let mut spans: Vec<Span> = Vec::with_capacity(intervals.len());
    for (start, end) in intervals {
        match spans.last_mut() {
            Some(last) if last.touches(start, end) => last.extend(start, end),
            _ => spans.push(Span::new(start, end)),
        }
    }
    spans
}

/// Input-order merge: each interval extends the first span it touches and
/// stops there. A span grown this way is not re-merged with later spans it
/// now reaches, so the output can contain overlapping neighbours.
fn single_pass(intervals: &[(i64, i64)]) -> Vec<Span> {
    let mut spans: Vec<Span> = Vec::new();
    for &(start, end) in intervals {
        match spans.iter_mut().find(|span| span.touches(start, end)) {
            Some(span) => span.extend(start, end),
            None => spans.push(Span::new(start, end)),
        }
    }
    spans.sort_by_key(|span| span.start);
    spans
}

/// One 24-hour span per dry day, collapsing days that share a start offset.
pub fn merge_dry_days(dry_days: &[DryDay], extent: &TimeExtent) -> Vec<Span> {
    let mut spans: Vec<Span> = dry_days
        .iter()
        .map(|day| {
            let (start, end) = extent.dry_day_interval(day);
            Span::new(start, end)
        })
        .collect();
    spans.sort_by_key(|span| span.start);
    spans.dedup_by_key(|span| span.start);
    spans
}
