//! Run the timeline engine over a saved analysis response and print CSV.

use anyhow::Context;
use log::info;
use std::io::Write;
use storm_core::analysis::AnalysisResponse;
use storm_core::span::SpanKind;
use storm_timeline::histogram::build_histogram;
use storm_timeline::merge::{merge_dry_days, merge_spans};
use storm_timeline::rows::build_rows;
use storm_timeline::{MergeStrategy, TimeExtent, MIN_SEGMENT_MS};
use storm_utils::dates;

fn load_response(path: &str) -> anyhow::Result<AnalysisResponse> {
    let body = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read analysis response {}", path))?;
    let response = AnalysisResponse::from_json(&body)
        .with_context(|| format!("Failed to decode analysis response {}", path))?;
    Ok(response)
}

/// Absolute wall-clock time of an offset, as written to CSV.
fn time_column(extent: &TimeExtent, offset: i64) -> String {
    dates::format_timestamp(&extent.time_at(offset as f64))
}

/// Write merged spans as `kind,start_ms,end_ms,start_time,end_time`.
///
/// Returns the number of spans written.
pub fn write_spans<W: Write>(
    writer: W,
    response: &AnalysisResponse,
    strategy: MergeStrategy,
    dry_days: bool,
) -> anyhow::Result<usize> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["kind", "start_ms", "end_ms", "start_time", "end_time"])?;

    let mut count = 0;
    if let Some(extent) = TimeExtent::from_events(&response.events, MIN_SEGMENT_MS) {
        let (kind, spans) = if dry_days {
            (SpanKind::DryDay, merge_dry_days(&response.dry_days, &extent))
        } else {
            (
                SpanKind::Storm,
                merge_spans(&response.events, &extent, MIN_SEGMENT_MS, strategy),
            )
        };
        for span in &spans {
            wtr.write_record([
                kind.to_string(),
                span.start.to_string(),
                span.end.to_string(),
                time_column(&extent, span.start),
                time_column(&extent, span.end),
            ])?;
        }
        count = spans.len();
    }
    wtr.flush()?;
    Ok(count)
}

/// Write the concurrency series as `offset_ms,time,storm_count,dry_count`.
pub fn write_histogram<W: Write>(writer: W, response: &AnalysisResponse) -> anyhow::Result<usize> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["offset_ms", "time", "storm_count", "dry_count"])?;

    let extent = TimeExtent::from_events(&response.events, MIN_SEGMENT_MS);
    let series = build_histogram(
        &response.events,
        &response.dry_days,
        extent.as_ref(),
        MIN_SEGMENT_MS,
    );
    if let Some(extent) = extent {
        for point in &series {
            wtr.write_record([
                point.offset.to_string(),
                time_column(&extent, point.offset),
                point.storm_count.to_string(),
                point.dry_count.to_string(),
            ])?;
        }
    }
    wtr.flush()?;
    Ok(series.len())
}

/// Write stacked row segments as
/// `dataset,segment,gap_ms,duration_ms,event_id,status`.
pub fn write_rows<W: Write>(
    writer: W,
    response: &AnalysisResponse,
    min_segment_ms: i64,
) -> anyhow::Result<usize> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record([
        "dataset",
        "segment",
        "gap_ms",
        "duration_ms",
        "event_id",
        "status",
    ])?;

    let min_segment_ms = min_segment_ms.max(1);
    let extent = TimeExtent::from_events(&response.events, min_segment_ms);
    let layout = build_rows(&response.events, extent.as_ref(), min_segment_ms);
    let mut count = 0;
    for row in &layout.rows {
        for (index, segment) in row.segments.iter().enumerate() {
            wtr.write_record([
                row.dataset_name.clone(),
                index.to_string(),
                segment.gap.to_string(),
                segment.duration.to_string(),
                segment.source_event.id.to_string(),
                segment.source_event.status.to_string(),
            ])?;
            count += 1;
        }
    }
    wtr.flush()?;
    Ok(count)
}

pub fn run_spans(input: &str, strategy: MergeStrategy, dry_days: bool) -> anyhow::Result<()> {
    let response = load_response(input)?;
    let count = write_spans(std::io::stdout().lock(), &response, strategy, dry_days)?;
    info!("Wrote {} spans from {}", count, input);
    Ok(())
}

pub fn run_histogram(input: &str) -> anyhow::Result<()> {
    let response = load_response(input)?;
    let count = write_histogram(std::io::stdout().lock(), &response)?;
    info!("Wrote {} histogram points from {}", count, input);
    Ok(())
}

pub fn run_rows(input: &str, min_segment_ms: i64) -> anyhow::Result<()> {
    let response = load_response(input)?;
    let count = write_rows(std::io::stdout().lock(), &response, min_segment_ms)?;
    info!("Wrote {} row segments from {}", count, input);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESPONSE: &str = r#"{
        "events": [
            {"id": 1, "datasetId": 1, "datasetName": "North",
             "startTime": "2024-01-01T00:00:00", "endTime": "2024-01-01T02:00:00",
             "status": "Event"},
            {"id": 2, "datasetId": 2, "datasetName": "South",
             "startTime": "2024-01-01T01:00:00", "endTime": "2024-01-01T03:00:00",
             "status": "Partial Event"},
            {"id": 3, "datasetId": 1, "datasetName": "North",
             "startTime": "2024-01-01T05:00:00", "endTime": "2024-01-01T06:00:00",
             "status": "No Event"}
        ],
        "dryDays": [
            {"datasetId": 2, "datasetName": "South", "date": "2024-01-02"}
        ]
    }"#;

    fn response() -> AnalysisResponse {
        AnalysisResponse::from_json(RESPONSE).unwrap()
    }

    fn lines(buf: Vec<u8>) -> Vec<String> {
        String::from_utf8(buf)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_write_spans_merges_overlapping_storms() {
        let mut buf = Vec::new();
        let count = write_spans(&mut buf, &response(), MergeStrategy::Sweep, false).unwrap();
        assert_eq!(count, 1);
        let lines = lines(buf);
        assert_eq!(lines[0], "kind,start_ms,end_ms,start_time,end_time");
        assert_eq!(
            lines[1],
            "storm,0,10800000,2024-01-01T00:00:00,2024-01-01T03:00:00"
        );
    }

    #[test]
    fn test_write_spans_dry_days() {
        let mut buf = Vec::new();
        let count = write_spans(&mut buf, &response(), MergeStrategy::Sweep, true).unwrap();
        assert_eq!(count, 1);
        assert_eq!(
            lines(buf)[1],
            "dryDay,86400000,172800000,2024-01-02T00:00:00,2024-01-03T00:00:00"
        );
    }

    #[test]
    fn test_write_histogram_starts_with_both_storms() {
        let mut buf = Vec::new();
        let count = write_histogram(&mut buf, &response()).unwrap();
        assert!(count > 0);
        let lines = lines(buf);
        assert_eq!(lines[0], "offset_ms,time,storm_count,dry_count");
        assert_eq!(lines[1], "0,2024-01-01T00:00:00,1,0");
        assert!(lines.contains(&"3600000,2024-01-01T01:00:00,2,0".to_string()));
    }

    #[test]
    fn test_write_rows_groups_by_dataset() {
        let mut buf = Vec::new();
        let count = write_rows(&mut buf, &response(), MIN_SEGMENT_MS).unwrap();
        assert_eq!(count, 3);
        let lines = lines(buf);
        assert_eq!(lines[1], "North,0,0,7200000,1,Event");
        assert_eq!(lines[2], "North,1,10800000,3600000,3,No Event");
        assert_eq!(lines[3], "South,0,3600000,7200000,2,Partial Event");
    }

    #[test]
    fn test_empty_response_writes_header_only() {
        let empty = AnalysisResponse::default();
        let mut buf = Vec::new();
        assert_eq!(write_rows(&mut buf, &empty, MIN_SEGMENT_MS).unwrap(), 0);
        assert_eq!(lines(buf).len(), 1);
    }
}
