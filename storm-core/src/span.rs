use serde::{Deserialize, Serialize};
use std::fmt;

/// A dataset-agnostic interval of activity, in milliseconds relative to the
/// reference epoch of the event set it was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: i64,
    pub end: i64,
}

impl Span {
    pub fn new(start: i64, end: i64) -> Self {
        Span { start, end }
    }

    pub fn width(&self) -> i64 {
        self.end - self.start
    }

    /// Half-open membership: `start <= offset < end`.
    pub fn contains(&self, offset: f64) -> bool {
        self.start as f64 <= offset && offset < self.end as f64
    }

    /// True when the closed intervals overlap or share an endpoint.
    pub fn touches(&self, start: i64, end: i64) -> bool {
        start <= self.end && end >= self.start
    }

    /// Grow this span to cover `[start, end]` as well.
    pub fn extend(&mut self, start: i64, end: i64) {
        self.start = self.start.min(start);
        self.end = self.end.max(end);
    }
}

/// Which derived collection a span belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SpanKind {
    Storm,
    DryDay,
}

impl SpanKind {
    /// Human-readable name for readouts and menus.
    pub fn label(self) -> &'static str {
        match self {
            SpanKind::Storm => "Storm",
            SpanKind::DryDay => "Dry day",
        }
    }
}

/// Wire tag, as sent to the captures endpoint.
impl fmt::Display for SpanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpanKind::Storm => f.write_str("storm"),
            SpanKind::DryDay => f.write_str("dryDay"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_half_open() {
        let span = Span::new(0, 10);
        assert!(span.contains(0.0));
        assert!(span.contains(9.999));
        assert!(!span.contains(10.0));
        assert!(!span.contains(-0.5));
    }

    #[test]
    fn test_touching_endpoints_count() {
        let span = Span::new(0, 10);
        assert!(span.touches(10, 20));
        assert!(span.touches(-5, 0));
        assert!(!span.touches(11, 20));
    }

    #[test]
    fn test_extend_takes_union() {
        let mut span = Span::new(5, 10);
        span.extend(0, 7);
        assert_eq!(span, Span::new(0, 10));
        span.extend(8, 15);
        assert_eq!(span, Span::new(0, 15));
        assert_eq!(span.width(), 15);
    }

    #[test]
    fn test_kind_label_differs_from_wire_tag() {
        assert_eq!(SpanKind::DryDay.label(), "Dry day");
        assert_eq!(SpanKind::DryDay.to_string(), "dryDay");
        assert_eq!(SpanKind::Storm.label(), "Storm");
        assert_eq!(SpanKind::Storm.to_string(), "storm");
    }
}
