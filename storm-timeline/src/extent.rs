use chrono::NaiveDateTime;
use serde::Serialize;
use storm_core::event::{DryDay, Event};
use storm_utils::dates;

/// Time origin and length of one event set.
///
/// Offsets throughout the engine are milliseconds after `reference_epoch`,
/// the earliest event start.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeExtent {
    pub reference_epoch: NaiveDateTime,
    /// Length of the timeline in ms; at least the minimum segment so a
    /// non-empty window always fits.
    pub total_duration_ms: i64,
}

impl TimeExtent {
    /// Extent covering every event regardless of status.
    ///
    /// Returns `None` for an empty event set.
    pub fn from_events(events: &[Event], min_segment_ms: i64) -> Option<Self> {
        let reference_epoch = events
            .iter()
            .map(|e| e.start_time.min(e.end_time))
            .min()?;
        let latest = events
            .iter()
            .map(|e| e.start_time.max(e.end_time))
            .max()?;
        let span = dates::millis_between(&reference_epoch, &latest);
        Some(TimeExtent {
            reference_epoch,
            total_duration_ms: span.max(min_segment_ms.max(1)),
        })
    }

    pub fn total_duration(&self) -> f64 {
        self.total_duration_ms as f64
    }

    /// Offset of `ts` from the reference epoch.
    pub fn offset_of(&self, ts: &NaiveDateTime) -> i64 {
        dates::millis_between(&self.reference_epoch, ts)
    }

    /// Absolute time at `offset` ms.
    pub fn time_at(&self, offset: f64) -> NaiveDateTime {
        dates::add_millis(&self.reference_epoch, offset)
    }

    /// Offset interval of an event.
    ///
    /// An inverted or empty interval is treated as lasting `min_segment_ms`
    /// from its start instead of being dropped.
    pub fn event_interval(&self, event: &Event, min_segment_ms: i64) -> (i64, i64) {
        let start = self.offset_of(&event.start_time);
        if event.is_malformed() {
            log::warn!(
                "[Timeline] event {:?} of {} ends before it starts; using {} ms",
                event.key(),
                event.dataset_name,
                min_segment_ms
            );
            return (start, start + min_segment_ms);
        }
        (start, self.offset_of(&event.end_time))
    }

    /// Offset interval of a dry day: local midnight to midnight.
    pub fn dry_day_interval(&self, day: &DryDay) -> (i64, i64) {
        (self.offset_of(&day.start()), self.offset_of(&day.end()))
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
    use storm_core::event::{DatasetId, DryDay, Event, EventStatus};

    /// Origin used by the offset-based fixtures.
    pub fn epoch() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    /// Event spanning `[start_ms, end_ms]` after [`epoch`].
    pub fn event(
        dataset_id: DatasetId,
        id: i64,
        start_ms: i64,
        end_ms: i64,
        status: EventStatus,
    ) -> Event {
        Event {
            id,
            dataset_id,
            dataset_name: format!("Gauge {}", dataset_id),
            start_time: epoch() + TimeDelta::milliseconds(start_ms),
            end_time: epoch() + TimeDelta::milliseconds(end_ms),
            total_depth: 10.0,
            duration_hours: (end_ms - start_ms) as f64 / 3_600_000.0,
            peak_intensity: 2.5,
            status,
        }
    }

    pub fn storm(dataset_id: DatasetId, id: i64, start_ms: i64, end_ms: i64) -> Event {
        event(dataset_id, id, start_ms, end_ms, EventStatus::Event)
    }

    /// Dry day `day` days after [`epoch`].
    pub fn dry_day(dataset_id: DatasetId, day: i64) -> DryDay {
        DryDay {
            dataset_id,
            dataset_name: format!("Gauge {}", dataset_id),
            date: epoch().date() + TimeDelta::days(day),
            total_depth: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use storm_core::event::EventStatus;

    #[test]
    fn test_extent_spans_all_statuses() {
        let events = vec![
            storm(1, 1, 5_000, 9_000),
            event(2, 1, 1_000, 2_000, EventStatus::NoEvent),
            storm(1, 2, 20_000, 30_000),
        ];
        let extent = TimeExtent::from_events(&events, 1).unwrap();
        assert_eq!(extent.offset_of(&epoch()), -1_000);
        assert_eq!(extent.total_duration_ms, 29_000);
    }

    #[test]
    fn test_extent_empty() {
        assert!(TimeExtent::from_events(&[], 60_000).is_none());
    }

    #[test]
    fn test_extent_of_instant_is_min_segment() {
        let events = vec![storm(1, 1, 0, 0)];
        let extent = TimeExtent::from_events(&events, 60_000).unwrap();
        assert_eq!(extent.total_duration_ms, 60_000);
    }

    #[test]
    fn test_malformed_interval_uses_min_segment() {
        let events = vec![storm(1, 1, 10_000, 4_000)];
        let extent = TimeExtent::from_events(&events, 1).unwrap();
        assert_eq!(extent.event_interval(&events[0], 500), (6_000, 6_500));
    }

    #[test]
    fn test_time_at_inverts_offset_of() {
        let events = vec![storm(1, 1, 0, 3_600_000)];
        let extent = TimeExtent::from_events(&events, 1).unwrap();
        let mid = extent.time_at(1_800_000.0);
        assert_eq!(extent.offset_of(&mid), 1_800_000);
    }

    #[test]
    fn test_dry_day_interval_is_24h() {
        let events = vec![storm(1, 1, 0, 1_000)];
        let extent = TimeExtent::from_events(&events, 1).unwrap();
        let (start, end) = extent.dry_day_interval(&dry_day(1, 2));
        assert_eq!(start, 2 * 86_400_000);
        assert_eq!(end - start, 86_400_000);
    }
}
