//! Pixel ↔ time conversion for hover and click handling.
//!
//! The forward scale ([`time_to_pixel`]) and its inverse ([`pixel_to_time`])
//! take the same [`ChartMargins`], so a point the renderer draws at `x`
//! maps back to the time it was drawn for.

use crate::config::ChartMargins;
use crate::window::TimeWindow;
use chrono::NaiveDateTime;
use serde::Serialize;
use storm_utils::dates;

/// Bounding box of a chart container, in client pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ContainerRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Pointer position relative to the container's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pointer {
    pub x: f64,
    pub y: f64,
}

impl Pointer {
    /// Convert client coordinates (e.g. from a mouse event) into
    /// container-relative ones.
    pub fn from_client(client_x: f64, client_y: f64, rect: &ContainerRect) -> Self {
        Pointer {
            x: client_x - rect.left,
            y: client_y - rect.top,
        }
    }
}

/// A hovered instant, both as offset and as wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimePoint {
    pub offset: f64,
    pub time: NaiveDateTime,
}

fn drawable_width(container: &ContainerRect, margins: &ChartMargins) -> Option<f64> {
    let width = container.width - margins.horizontal();
    (width.is_finite() && width > 0.0).then_some(width)
}

/// Time under the pointer, or `None` when the pointer is in a margin or the
/// container has not been laid out yet.
pub fn pixel_to_time(
    pointer: Pointer,
    container: &ContainerRect,
    margins: &ChartMargins,
    window: &TimeWindow,
    reference_epoch: &NaiveDateTime,
) -> Option<TimePoint> {
    let drawable = drawable_width(container, margins)?;
    let right_edge = container.width - margins.right;
    if !(pointer.x >= margins.left && pointer.x <= right_edge) {
        return None;
    }
    let ratio = (pointer.x - margins.left) / drawable;
    let offset = window.start + ratio * window.width();
    Some(TimePoint {
        offset,
        time: dates::add_millis(reference_epoch, offset),
    })
}

/// Container-relative x at which the renderer draws `offset`.
///
/// Offsets outside the window map outside the drawable area; callers clip.
pub fn time_to_pixel(
    offset: f64,
    container: &ContainerRect,
    margins: &ChartMargins,
    window: &TimeWindow,
) -> Option<f64> {
    let drawable = drawable_width(container, margins)?;
    Some(margins.left + (offset - window.start) / window.width() * drawable)
}

/// Gantt row under the pointer, for rows of equal height filling the
/// drawable height.
pub fn pixel_to_row(
    pointer: Pointer,
    container: &ContainerRect,
    margins: &ChartMargins,
    row_count: usize,
) -> Option<usize> {
    let height = container.height - margins.vertical();
    if row_count == 0 || !(height.is_finite() && height > 0.0) {
        return None;
    }
    let y = pointer.y - margins.top;
    if !(y >= 0.0 && y < height) {
        return None;
    }
    let row = (y / (height / row_count as f64)).floor() as usize;
    Some(row.min(row_count - 1))
}
