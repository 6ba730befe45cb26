//! Occurrence generation -- expands an event's recurrence into concrete instances.
//!
//! Expansion walks every calendar day between the event's start date and its
//! recurrence end, capped at the configured horizon, asking the [`Recurrence`] which
//! slots fall on that day. Dates and times-of-day are read in the configured
//! community timezone; absolute instants are UTC.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::dst::resolve_local;
use crate::model::Event;
use crate::recurrence::{DaySlot, Recurrence};

/// One concrete instance of an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occurrence {
    /// Local calendar date the occurrence starts on.
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Occurrence {
    /// Local window as `HH:MM–HH:MM`.
    pub fn window(&self) -> String {
        format!(
            "{}–{}",
            self.start_time.format("%H:%M"),
            self.end_time.format("%H:%M")
        )
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Same calendar date and strictly intersecting intervals.
    ///
    /// Touching boundaries (`self.end == other.start`) do not overlap.
    pub fn overlaps(&self, other: &Occurrence) -> bool {
        self.date == other.date && self.start < other.end && self.end > other.start
    }
}

/// Expand an event into its ordered list of occurrences.
///
/// A well-formed event always yields at least one occurrence: when the cadence
/// selects no day in range, the event's own start/end is returned.
pub fn expand(event: &Event, config: &EngineConfig) -> Vec<Occurrence> {
    let recurrence = Recurrence::from_event(event);
    if !recurrence.is_recurring() {
        return vec![single_occurrence(event, config)];
    }

    let local_start = event.start.with_timezone(&config.timezone).naive_local();
    let anchor = local_start.date();
    let base = DaySlot {
        start: local_start.time(),
        // Recurring events without an end produce zero-length occurrences.
        length: event.end.map_or(Duration::zero(), |end| end - event.start),
    };
    let (_, last_day) = occurrence_dates(event, config);

    let mut occurrences = Vec::new();
    for day in anchor.iter_days().take_while(|d| *d <= last_day) {
        for slot in recurrence.slots_on(anchor, day, base) {
            if let Some(occurrence) = build(day, slot, config) {
                occurrences.push(occurrence);
            }
        }
    }

    if occurrences.is_empty() {
        tracing::debug!(event_id = event.id, "cadence selected no day, using base occurrence");
        return vec![single_occurrence(event, config)];
    }

    tracing::trace!(
        event_id = event.id,
        count = occurrences.len(),
        last_day = %last_day,
        "expanded recurrence"
    );
    occurrences
}

/// First and last calendar date that may carry an occurrence of `event`.
///
/// The range never extends past the `horizon_days` days starting at the start
/// date, even when the recurrence end lies further out. A recurrence end before
/// the start date collapses the range to the start date.
pub fn occurrence_dates(event: &Event, config: &EngineConfig) -> (NaiveDate, NaiveDate) {
    let first = event.start.with_timezone(&config.timezone).date_naive();
    if !Recurrence::from_event(event).is_recurring() {
        return (first, first);
    }

    let horizon_end = first
        .checked_add_signed(Duration::days(i64::from(config.horizon_days.max(1)) - 1))
        .unwrap_or(NaiveDate::MAX);
    let last = event
        .recurrence_end
        .map_or(horizon_end, |end| end.min(horizon_end));
    (first, last.max(first))
}

/// Total scheduled minutes across all occurrences.
pub fn total_minutes(occurrences: &[Occurrence]) -> i64 {
    occurrences.iter().map(Occurrence::duration_minutes).sum()
}

/// The event's own start/end as a single occurrence.
///
/// A missing end is read as 23:59 on the local start date.
fn single_occurrence(event: &Event, config: &EngineConfig) -> Occurrence {
    let local_start = event.start.with_timezone(&config.timezone);
    let end = event.end.unwrap_or_else(|| {
        let end_of_day = local_start.date_naive().and_time(end_of_day());
        resolve_local(&config.timezone, end_of_day, config.dst_policy)
            .unwrap_or(event.start)
            .max(event.start)
    });

    Occurrence {
        date: local_start.date_naive(),
        start_time: local_start.time(),
        end_time: end.with_timezone(&config.timezone).time(),
        start: event.start,
        end,
    }
}

fn build(day: NaiveDate, slot: DaySlot, config: &EngineConfig) -> Option<Occurrence> {
    let local_start: NaiveDateTime = day.and_time(slot.start);
    let local_end = local_start + slot.length;

    let start = resolve_local(&config.timezone, local_start, config.dst_policy)?;
    let end = resolve_local(&config.timezone, local_end, config.dst_policy)?.max(start);

    Some(Occurrence {
        date: day,
        start_time: local_start.time(),
        end_time: local_end.time(),
        start,
        end,
    })
}

fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 0).unwrap_or_default()
}
