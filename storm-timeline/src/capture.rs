//! Hover resolution and click-to-capture.

use crate::pointer::TimePoint;
use chrono::NaiveDateTime;
use serde::Serialize;
use storm_core::capture::CaptureRequest;
use storm_core::span::{Span, SpanKind};
use storm_utils::dates;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolvedSpan {
    pub kind: SpanKind,
    pub span: Span,
}

/// Find the span containing `offset` (half-open). Storm spans are checked
/// before dry-day spans.
pub fn resolve_span(offset: f64, storm_spans: &[Span], dry_spans: &[Span]) -> Option<ResolvedSpan> {
    let find = |spans: &[Span], kind: SpanKind| {
        spans
            .iter()
            .find(|span| span.contains(offset))
            .map(|&span| ResolvedSpan { kind, span })
    };
    find(storm_spans, SpanKind::Storm).or_else(|| find(dry_spans, SpanKind::DryDay))
}

/// Absolute-time capture request for a resolved span.
pub fn capture_request(resolved: &ResolvedSpan, reference_epoch: &NaiveDateTime) -> CaptureRequest {
    CaptureRequest {
        kind: resolved.kind,
        start_time: dates::add_millis(reference_epoch, resolved.span.start as f64),
        end_time: dates::add_millis(reference_epoch, resolved.span.end as f64),
    }
}

/// Tracks the span under the pointer and turns a click into a capture.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureCoordinator {
    reference_epoch: NaiveDateTime,
    storm_spans: Vec<Span>,
    dry_spans: Vec<Span>,
    hovered: Option<ResolvedSpan>,
}

impl CaptureCoordinator {
    pub fn new(reference_epoch: NaiveDateTime, storm_spans: Vec<Span>, dry_spans: Vec<Span>) -> Self {
        Self {
            reference_epoch,
            storm_spans,
            dry_spans,
            hovered: None,
        }
    }

    /// Update the hover target from a mapped pointer position.
    pub fn hover(&mut self, point: Option<TimePoint>) -> Option<ResolvedSpan> {
        self.hovered =
            point.and_then(|p| resolve_span(p.offset, &self.storm_spans, &self.dry_spans));
        self.hovered
    }

    pub fn clear_hover(&mut self) {
        self.hovered = None;
    }

    pub fn hovered(&self) -> Option<ResolvedSpan> {
        self.hovered
    }

    /// Capture request for the hovered span, if any.
    pub fn confirm(&self) -> Option<CaptureRequest> {
        let resolved = self.hovered?;
        let request = capture_request(&resolved, &self.reference_epoch);
        log::info!(
            "[Timeline] capture: {} {} → {}",
            request.kind,
            dates::format_timestamp(&request.start_time),
            dates::format_timestamp(&request.end_time)
        );
        Some(request)
    }
}
