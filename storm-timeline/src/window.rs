//! The shared zoom/pan window.
//!
//! [`WindowController`] is the only writer of the visible time range. The
//! Gantt and the concurrency chart subscribe as [`WindowObserver`]s and are
//! told about every change, so they always show the same domain.

use crate::config::TimelineConfig;
use crate::extent::TimeExtent;
use chrono::NaiveDateTime;
use serde::Serialize;
use storm_core::error::{Result, TimelineError};

/// Visible range in ms offsets, `0 <= start < end <= total_duration`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeWindow {
    pub start: f64,
    pub end: f64,
}

impl TimeWindow {
    pub fn new(start: f64, end: f64) -> Result<Self> {
        if !(start.is_finite() && end.is_finite() && start < end) {
            return Err(TimelineError::InvalidWindow { start, end });
        }
        Ok(TimeWindow { start, end })
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }

    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn contains(&self, offset: f64) -> bool {
        self.start <= offset && offset <= self.end
    }
}

/// Broadcast to observers after every window change while data is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowUpdate {
    pub window: TimeWindow,
    pub reference_epoch: NaiveDateTime,
    pub total_duration: f64,
}

/// Receives the new window, or `None` once the event set is cleared.
pub trait WindowObserver {
    fn window_changed(&mut self, update: Option<&WindowUpdate>);
}

impl<F: FnMut(Option<&WindowUpdate>)> WindowObserver for F {
    fn window_changed(&mut self, update: Option<&WindowUpdate>) {
        self(update)
    }
}

pub struct WindowController {
    extent: Option<TimeExtent>,
    window: Option<TimeWindow>,
    zoom_in_factor: f64,
    zoom_out_factor: f64,
    pan_fraction: f64,
    min_window_ms: f64,
    observers: Vec<Box<dyn WindowObserver>>,
}

impl WindowController {
    pub fn new(config: &TimelineConfig) -> Self {
        Self {
            extent: None,
            window: None,
            zoom_in_factor: config.zoom_in_factor,
            zoom_out_factor: config.zoom_out_factor,
            pan_fraction: config.pan_fraction,
            min_window_ms: config.min_window_ms,
            observers: Vec::new(),
        }
    }

    /// Register an observer. It is not called until the next change.
    pub fn subscribe(&mut self, observer: impl WindowObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn window(&self) -> Option<TimeWindow> {
        self.window
    }

    /// Current window with its epoch and total, if an event set is loaded.
    pub fn snapshot(&self) -> Option<WindowUpdate> {
        let extent = self.extent?;
        let window = self.window?;
        Some(WindowUpdate {
            window,
            reference_epoch: extent.reference_epoch,
            total_duration: extent.total_duration(),
        })
    }

    /// Switch to a new event set.
    ///
    /// Without an imposed window the full range is shown. Observers are
    /// notified exactly once.
    pub fn load(&mut self, extent: TimeExtent, imposed: Option<TimeWindow>) {
        self.extent = Some(extent);
        let total = extent.total_duration();
        let window = imposed
            .and_then(|w| clamp_window(w.start, w.end, total))
            .unwrap_or(TimeWindow { start: 0.0, end: total });
        log::info!(
            "[Timeline] window: loaded extent of {} ms, showing [{}, {}]",
            extent.total_duration_ms,
            window.start,
            window.end
        );
        self.window = Some(window);
        self.notify();
    }

    /// Drop the event set (e.g. an analysis returned nothing).
    ///
    /// Observers get `None` if a window was showing.
    pub fn clear(&mut self) {
        self.extent = None;
        if self.window.take().is_some() {
            log::info!("[Timeline] window: cleared");
            self.broadcast(None);
        }
    }

    pub fn zoom_in(&mut self) {
        self.scale(self.zoom_in_factor);
    }

    pub fn zoom_out(&mut self) {
        self.scale(self.zoom_out_factor);
    }

    pub fn reset(&mut self) {
        if let Some(total) = self.total() {
            self.apply(0.0, total);
        }
    }

    pub fn pan_left(&mut self) {
        self.pan(-self.pan_fraction);
    }

    pub fn pan_right(&mut self) {
        self.pan(self.pan_fraction);
    }

    /// Show an externally chosen range, clamped to the extent.
    pub fn set_window(&mut self, start: f64, end: f64) -> Result<()> {
        TimeWindow::new(start, end)?;
        let Some(total) = self.total() else {
            return Ok(());
        };
        let window =
            clamp_window(start, end, total).ok_or(TimelineError::InvalidWindow { start, end })?;
        self.apply(window.start, window.end);
        Ok(())
    }

    fn total(&self) -> Option<f64> {
        self.extent.map(|e| e.total_duration())
    }

    /// Resize around the center by `factor`, keeping at least `min_window_ms`.
    fn scale(&mut self, factor: f64) {
        let (Some(window), Some(total)) = (self.window, self.total()) else {
            return;
        };
        let center = window.center();
        let width = (window.width() * factor).max(self.min_window_ms).min(total);
        let start = (center - width / 2.0).max(0.0);
        let end = (center + width / 2.0).min(total);
        self.apply(start, end);
    }

    /// Shift by `fraction` of the width; stops flush against either edge.
    fn pan(&mut self, fraction: f64) {
        let (Some(window), Some(total)) = (self.window, self.total()) else {
            return;
        };
        let width = window.width().min(total);
        let shift = width * fraction;
        let mut start = window.start + shift;
        let mut end = window.end + shift;
        if start < 0.0 {
            start = 0.0;
            end = width;
        }
        if end > total {
            end = total;
            start = (total - width).max(0.0);
        }
        self.apply(start, end);
    }

    fn apply(&mut self, start: f64, end: f64) {
        if !(start < end) {
            log::warn!("[Timeline] window: refusing inverted window [{}, {}]", start, end);
            return;
        }
        let next = TimeWindow { start, end };
        if self.window == Some(next) {
            return;
        }
        self.window = Some(next);
        self.notify();
    }

    fn notify(&mut self) {
        let Some(update) = self.snapshot() else {
            return;
        };
        log::debug!(
            "[Timeline] window: [{:.0}, {:.0}] of {:.0}",
            update.window.start,
            update.window.end,
            update.total_duration
        );
        self.broadcast(Some(&update));
    }

    fn broadcast(&mut self, update: Option<&WindowUpdate>) {
        for observer in self.observers.iter_mut() {
            observer.window_changed(update);
        }
    }
}

/// Intersect `[start, end]` with `[0, total]`; `None` if nothing is left.
fn clamp_window(start: f64, end: f64, total: f64) -> Option<TimeWindow> {
    TimeWindow::new(start.max(0.0), end.min(total)).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extent::fixtures::epoch;
    use std::cell::RefCell;
    use std::rc::Rc;

    const EPS: f64 = 1e-9;

    fn controller(total_ms: i64) -> WindowController {
        let config = TimelineConfig {
            min_window_ms: 1.0,
            ..TimelineConfig::default()
        };
        let mut controller = WindowController::new(&config);
        controller.load(
            TimeExtent {
                reference_epoch: epoch(),
                total_duration_ms: total_ms,
            },
            None,
        );
        controller
    }

    fn bounds(controller: &WindowController) -> (f64, f64) {
        let w = controller.window().unwrap();
        (w.start, w.end)
    }

    fn assert_window(controller: &WindowController, start: f64, end: f64) {
        let (s, e) = bounds(controller);
        assert!((s - start).abs() < EPS && (e - end).abs() < EPS, "got [{}, {}]", s, e);
    }

    #[test]
    fn test_load_shows_full_range() {
        let c = controller(100);
        assert_window(&c, 0.0, 100.0);
    }

    #[test]
    fn test_zoom_in_then_out_keeps_center() {
        let mut c = controller(100);
        c.zoom_in();
        assert_window(&c, 20.0, 80.0);
        c.zoom_out();
        let w = c.window().unwrap();
        assert!((w.center() - 50.0).abs() < EPS);
        assert!((w.width() - 100.0 * 0.6 * 1.4).abs() < EPS);
    }

    #[test]
    fn test_zoom_out_clamps_to_extent() {
        let mut c = controller(100);
        c.set_window(70.0, 100.0).unwrap();
        c.zoom_out();
        assert_window(&c, 64.0, 100.0);
        for _ in 0..10 {
            c.zoom_out();
        }
        let (s, e) = bounds(&c);
        assert!(s >= 0.0 && e <= 100.0 && s < e);
    }

    #[test]
    fn test_zoom_in_respects_min_window() {
        let mut c = controller(100);
        for _ in 0..50 {
            c.zoom_in();
        }
        let w = c.window().unwrap();
        assert!((w.width() - 1.0).abs() < EPS);
        assert!((w.center() - 50.0).abs() < EPS);
    }

    #[test]
    fn test_pan_right_clamps_at_end() {
        let mut c = controller(100);
        c.set_window(0.0, 50.0).unwrap();
        c.pan_right();
        assert_window(&c, 12.5, 62.5);
        for _ in 0..10 {
            c.pan_right();
        }
        assert_window(&c, 50.0, 100.0);
    }

    #[test]
    fn test_pan_left_clamps_at_start() {
        let mut c = controller(100);
        c.set_window(10.0, 50.0).unwrap();
        c.pan_left();
        assert_window(&c, 0.0, 40.0);
        c.pan_left();
        assert_window(&c, 0.0, 40.0);
    }

    #[test]
    fn test_reset() {
        let mut c = controller(100);
        c.zoom_in();
        c.pan_left();
        c.reset();
        assert_window(&c, 0.0, 100.0);
    }

    #[test]
    fn test_set_window_validates_and_clamps() {
        let mut c = controller(100);
        assert!(c.set_window(40.0, 40.0).is_err());
        assert!(c.set_window(f64::NAN, 40.0).is_err());
        assert!(c.set_window(150.0, 200.0).is_err());
        c.set_window(-20.0, 30.0).unwrap();
        assert_window(&c, 0.0, 30.0);
    }

    #[test]
    fn test_imposed_window_on_load() {
        let mut c = WindowController::new(&TimelineConfig::default());
        let extent = TimeExtent {
            reference_epoch: epoch(),
            total_duration_ms: 1_000_000,
        };
        c.load(extent, Some(TimeWindow::new(100.0, 2_000_000.0).unwrap()));
        assert_window(&c, 100.0, 1_000_000.0);
    }

    #[test]
    fn test_observers_see_every_change() {
        let seen: Rc<RefCell<Vec<TimeWindow>>> = Rc::new(RefCell::new(Vec::new()));
        let gantt = seen.clone();
        let histogram_calls = Rc::new(RefCell::new(0usize));
        let histogram = histogram_calls.clone();

        let mut c = WindowController::new(&TimelineConfig {
            min_window_ms: 1.0,
            ..TimelineConfig::default()
        });
        c.subscribe(move |u: Option<&WindowUpdate>| {
            if let Some(u) = u {
                gantt.borrow_mut().push(u.window);
            }
        });
        c.subscribe(move |u: Option<&WindowUpdate>| {
            assert_eq!(u.map(|u| u.total_duration), Some(100.0));
            *histogram.borrow_mut() += 1;
        });

        c.load(
            TimeExtent {
                reference_epoch: epoch(),
                total_duration_ms: 100,
            },
            None,
        );
        c.zoom_in();
        c.reset();
        // Already at full range: no change, no notification.
        c.reset();

        let seen = seen.borrow();
        assert_eq!(seen.len(), 3);
        assert_eq!(*histogram_calls.borrow(), 3);
        assert!((seen[1].start - 20.0).abs() < EPS && (seen[1].end - 80.0).abs() < EPS);
    }

    #[test]
    fn test_clear_broadcasts_once() {
        let seen: Rc<RefCell<Vec<Option<TimeWindow>>>> = Rc::new(RefCell::new(Vec::new()));
        let mirror = seen.clone();
        let mut c = controller(100);
        c.subscribe(move |u: Option<&WindowUpdate>| mirror.borrow_mut().push(u.map(|u| u.window)));

        c.clear();
        // Nothing left to clear: no second notification.
        c.clear();

        assert!(c.window().is_none());
        assert!(c.snapshot().is_none());
        assert_eq!(*seen.borrow(), vec![None]);
    }

    #[test]
    fn test_operations_without_data_are_noops() {
        let mut c = WindowController::new(&TimelineConfig::default());
        c.zoom_in();
        c.pan_right();
        c.reset();
        assert!(c.window().is_none());
        assert!(c.set_window(0.0, 10.0).is_ok());
        assert!(c.snapshot().is_none());
    }
}
