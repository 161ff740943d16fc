//! Stacked row layout for the Gantt view.
//!
//! Each dataset becomes one row of alternating (gap, duration) pairs. A
//! stacked-bar renderer draws the gap transparent and the duration filled, so
//! the running sum of a row's pairs walks forward along the time axis.

use crate::extent::TimeExtent;
use serde::Serialize;
use std::collections::BTreeMap;
use storm_core::event::Event;

/// One event bar preceded by its transparent gap, both in ms.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub gap: i64,
    pub duration: i64,
    #[serde(rename = "event")]
    pub source_event: Event,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StackedRow {
    pub dataset_name: String,
    pub segments: Vec<Segment>,
}

/// One stacked-bar pair across all rows; `None` where a row has fewer events.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentColumn {
    pub gaps: Vec<Option<i64>>,
    pub durations: Vec<Option<i64>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StackedLayout {
    pub rows: Vec<StackedRow>,
    /// Largest per-dataset event count.
    pub max_segments: usize,
}

impl StackedLayout {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Transpose rows into `max_segments` columns of per-row values.
    pub fn series(&self) -> Vec<SegmentColumn> {
        (0..self.max_segments)
            .map(|i| SegmentColumn {
                gaps: self
                    .rows
                    .iter()
                    .map(|row| row.segments.get(i).map(|s| s.gap))
                    .collect(),
                durations: self
                    .rows
                    .iter()
                    .map(|row| row.segments.get(i).map(|s| s.duration))
                    .collect(),
            })
            .collect()
    }
}

/// Group events by dataset name (rows in name order) and lay each row out.
///
/// `duration` is floored at `min_segment_ms`. When a floored bar would run
/// past the next event's start, that next gap is clamped to zero and its bar
/// starts at the end of the previous one, so bars in a row never overlap.
pub fn build_rows(events: &[Event], extent: Option<&TimeExtent>, min_segment_ms: i64) -> StackedLayout {
    let Some(extent) = extent else {
        return StackedLayout::default();
    };

    let mut groups: BTreeMap<&str, Vec<&Event>> = BTreeMap::new();
    for event in events {
        groups.entry(event.dataset_name.as_str()).or_default().push(event);
    }

    let rows: Vec<StackedRow> = groups
        .into_iter()
        .map(|(name, mut group)| {
            group.sort_by_key(|e| e.start_time);
            let mut cursor = 0i64;
            let segments = group
                .into_iter()
                .map(|event| {
                    let start = extent.offset_of(&event.start_time);
                    let end = extent.offset_of(&event.end_time);
                    let duration = (end - start).max(min_segment_ms);
                    let bar_start = start.max(cursor);
                    let gap = bar_start - cursor;
                    cursor = bar_start + duration;
                    Segment {
                        gap,
                        duration,
                        source_event: event.clone(),
                    }
                })
                .collect();
            StackedRow {
                dataset_name: name.to_string(),
                segments,
            }
        })
        .collect();

    let max_segments = rows.iter().map(|r| r.segments.len()).max().unwrap_or(0);
    log::debug!(
        "[Timeline] rows: {} datasets, up to {} segments each",
        rows.len(),
        max_segments
    );
    StackedLayout { rows, max_segments }
}
