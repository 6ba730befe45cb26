//! Compute facility free/busy time from events and bookings.
//!
//! Collects the occurrences of active events and the active bookings held at a
//! facility, sorts them by start time, merges overlapping busy periods, then
//! computes the gaps between merged periods within a given time window.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::model::{Booking, Event, Facility};
use crate::occurrence::expand;
use crate::tenant::in_tenant;

/// A half-open UTC time range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// A free time slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeSlot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration_minutes: i64,
}

/// Every interval during which `facility` is held.
///
/// Includes occurrences of pending/scheduled events and pending/confirmed
/// bookings of the facility's tenant. Zero-length occurrences hold nothing and
/// are left out. The result is unsorted.
pub fn facility_intervals(
    facility: &Facility,
    events: &[Event],
    bookings: &[Booking],
    config: &EngineConfig,
) -> Vec<Interval> {
    let from_events = in_tenant(events, facility.tenant)
        .filter(|e| e.is_active() && e.facility_id == Some(facility.id))
        .flat_map(|e| expand(e, config))
        .map(|o| Interval {
            start: o.start,
            end: o.end,
        });

    let from_bookings = in_tenant(bookings, facility.tenant)
        .filter(|b| b.status.is_active() && b.facility_id == facility.id)
        .map(|b| Interval {
            start: b.start_at,
            end: b.end_at,
        });

    from_events
        .chain(from_bookings)
        .filter(|i| i.start < i.end)
        .collect()
}

/// Merge overlapping or adjacent busy periods, clipped to the given window.
///
/// Returns a sorted, non-overlapping list of intervals.
pub fn merge_busy_periods(
    intervals: &[Interval],
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
) -> Vec<Interval> {
    // Discard empty intervals and those entirely outside the window, clip the rest.
    let mut clipped: Vec<Interval> = intervals
        .iter()
        .filter(|i| i.start < i.end && i.start < window_end && i.end > window_start)
        .map(|i| Interval {
            start: i.start.max(window_start),
            end: i.end.min(window_end),
        })
        .collect();

    clipped.sort_by_key(|i| (i.start, i.end));

    let mut merged: Vec<Interval> = Vec::new();
    for interval in clipped {
        if let Some(last) = merged.last_mut() {
            if interval.start <= last.end {
                last.end = last.end.max(interval.end);
                continue;
            }
        }
        merged.push(interval);
    }

    merged
}

/// Find free time slots within a window, given busy intervals.
///
/// Busy intervals may overlap; they are merged before gaps are computed.
/// Returns free slots sorted by start time.
pub fn find_free_slots(
    intervals: &[Interval],
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
) -> Vec<FreeSlot> {
    let merged = merge_busy_periods(intervals, window_start, window_end);

    let mut free_slots = Vec::new();
    let mut cursor = window_start;

    for busy in &merged {
        if cursor < busy.start {
            free_slots.push(FreeSlot {
                start: cursor,
                end: busy.start,
                duration_minutes: (busy.start - cursor).num_minutes(),
            });
        }
        cursor = cursor.max(busy.end);
    }

    if cursor < window_end {
        free_slots.push(FreeSlot {
            start: cursor,
            end: window_end,
            duration_minutes: (window_end - cursor).num_minutes(),
        });
    }

    free_slots
}

/// First free slot of at least `min_duration_minutes` within the window.
pub fn first_free_slot(
    intervals: &[Interval],
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
    min_duration_minutes: i64,
) -> Option<FreeSlot> {
    find_free_slots(intervals, window_start, window_end)
        .into_iter()
        .find(|slot| slot.duration_minutes >= min_duration_minutes)
}
