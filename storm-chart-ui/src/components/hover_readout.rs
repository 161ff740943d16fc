use crate::state::AppState;
use chrono::NaiveDateTime;
use dioxus::prelude::*;
use storm_core::span::SpanKind;
use storm_utils::dates;

/// Readout fragment for a merged span under the pointer.
fn describe_span(kind: SpanKind, start: &NaiveDateTime, end: &NaiveDateTime) -> String {
    format!(
        "{} {} to {} (click to capture)",
        kind.label(),
        dates::format_display(start),
        dates::format_display(end)
    )
}

#[derive(Props, Clone, PartialEq)]
pub struct HoverReadoutProps {
    /// Gantt row labels, top to bottom
    #[props(default)]
    pub row_labels: Vec<String>,
}

/// One-line description of what is under the pointer.
#[component]
pub fn HoverReadout(props: HoverReadoutProps) -> Element {
    let state = use_context::<AppState>();
    let text = match (state.hover)() {
        None => "Hover a chart to inspect; click a span to capture it.".to_string(),
        Some(hover) => {
            let mut parts = vec![dates::format_display(&hover.point.time)];
            if let Some(label) = hover.row.and_then(|row| props.row_labels.get(row)) {
                parts.push(label.clone());
            }
            if let Some(resolved) = hover.resolved {
                let (start, end) = match (state.visible)() {
                    Some(update) => (
                        dates::add_millis(&update.reference_epoch, resolved.span.start as f64),
                        dates::add_millis(&update.reference_epoch, resolved.span.end as f64),
                    ),
                    None => (hover.point.time, hover.point.time),
                };
                parts.push(describe_span(resolved.kind, &start, &end));
            }
            parts.join(" · ")
        }
    };

    rsx! {
        div {
            style: "font-size: 12px; color: #444; min-height: 18px; margin: 4px 0;",
            "{text}"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_span_uses_readable_kind() {
        let start = dates::parse_timestamp("2024-01-02T00:00:00").unwrap();
        let end = dates::parse_timestamp("2024-01-03T00:00:00").unwrap();
        assert_eq!(
            describe_span(SpanKind::DryDay, &start, &end),
            "Dry day 2024-01-02 00:00 to 2024-01-03 00:00 (click to capture)"
        );
        assert!(describe_span(SpanKind::Storm, &start, &end).starts_with("Storm "));
    }
}
