//! Detect overlapping events at a shared facility.
//!
//! Both sides are expanded into occurrences and compared pairwise. Two
//! occurrences conflict only when they share a calendar date and their
//! intervals strictly intersect; adjacent windows (one ends exactly when the
//! other starts) are NOT conflicts.

use crate::config::EngineConfig;
use crate::error::{BarrioError, Result};
use crate::model::{Event, Facility};
use crate::occurrence::{expand, occurrence_dates, Occurrence};
use crate::tenant::in_tenant;

/// A detected conflict between two occurrences.
#[derive(Debug, Clone, PartialEq)]
pub struct Conflict {
    pub occurrence_a: Occurrence,
    pub occurrence_b: Occurrence,
    pub overlap_minutes: i64,
}

/// Find all pairwise conflicts between two occurrence lists.
///
/// The overlap duration is `min(a.end, b.end) - max(a.start, b.start)`.
pub fn find_conflicts(occurrences_a: &[Occurrence], occurrences_b: &[Occurrence]) -> Vec<Conflict> {
    let mut conflicts = Vec::new();

    for a in occurrences_a {
        for b in occurrences_b {
            if a.overlaps(b) {
                let overlap_start = a.start.max(b.start);
                let overlap_end = a.end.min(b.end);

                conflicts.push(Conflict {
                    occurrence_a: a.clone(),
                    occurrence_b: b.clone(),
                    overlap_minutes: (overlap_end - overlap_start).num_minutes(),
                });
            }
        }
    }

    conflicts
}

/// The first overlapping pair, in the order of `occurrences_a`.
pub fn first_conflict<'a>(
    occurrences_a: &'a [Occurrence],
    occurrences_b: &'a [Occurrence],
) -> Option<(&'a Occurrence, &'a Occurrence)> {
    occurrences_a
        .iter()
        .find_map(|a| occurrences_b.iter().find(|b| a.overlaps(b)).map(|b| (a, b)))
}

/// Whether two events would occupy the same facility at the same time.
///
/// Symmetric: `events_conflict(a, b, c) == events_conflict(b, a, c)`.
pub fn events_conflict(a: &Event, b: &Event, config: &EngineConfig) -> bool {
    competes_with(a, b, config)
        && first_conflict(&expand(a, config), &expand(b, config)).is_some()
}

/// Check `candidate` against every other event at its facility.
///
/// Events without a facility, and inactive candidates, are exempt. Structural
/// validation runs before any expansion. The first overlap found is returned as
/// [`BarrioError::ScheduleConflict`].
pub fn validate_facility_schedule(
    candidate: &Event,
    others: &[Event],
    config: &EngineConfig,
) -> Result<()> {
    candidate.validate()?;

    if candidate.facility_id.is_none() || !candidate.is_active() {
        return Ok(());
    }

    let rivals: Vec<&Event> = in_tenant(others, candidate.tenant)
        .filter(|other| competes_with(candidate, other, config))
        .collect();

    tracing::debug!(
        event_id = candidate.id,
        facility_id = ?candidate.facility_id,
        candidates = rivals.len(),
        "checking facility schedule"
    );

    if rivals.is_empty() {
        return Ok(());
    }

    let mine = expand(candidate, config);
    for other in rivals {
        let theirs = expand(other, config);
        if let Some((ours, existing)) = first_conflict(&mine, &theirs) {
            tracing::debug!(
                event_id = candidate.id,
                conflicting_event_id = other.id,
                date = %ours.date,
                "facility schedule conflict"
            );
            return Err(BarrioError::ScheduleConflict {
                title: other.title.clone(),
                date: ours.date,
                window: ours.window(),
                existing_window: existing.window(),
            });
        }
    }

    Ok(())
}

/// Full write-path validation for an event.
///
/// Checks the event's structure, the assigned facility (same tenant, active,
/// large enough), then the facility schedule. `facility` must be the record
/// referenced by `event.facility_id` when one is set.
pub fn validate_event(
    event: &Event,
    facility: Option<&Facility>,
    others: &[Event],
    config: &EngineConfig,
) -> Result<()> {
    event.validate()?;

    if let Some(facility_id) = event.facility_id {
        let facility = facility
            .filter(|f| f.id == facility_id && f.tenant == event.tenant)
            .ok_or(BarrioError::FacilityMismatch { facility_id })?;

        if !facility.is_active {
            return Err(BarrioError::FacilityInactive(facility.id));
        }
        if let Some(requested) = event.capacity {
            if requested > facility.capacity {
                return Err(BarrioError::CapacityExceeded {
                    requested,
                    available: facility.capacity,
                });
            }
        }
    }

    validate_facility_schedule(event, others, config)
}

/// Pre-filter shared by both directions of the check.
///
/// Both events must be distinct, active, in the same tenant and at the same
/// facility, and their occurrence date ranges must intersect.
fn competes_with(a: &Event, b: &Event, config: &EngineConfig) -> bool {
    if a.id == b.id || a.tenant != b.tenant || !a.is_active() || !b.is_active() {
        return false;
    }
    match (a.facility_id, b.facility_id) {
        (Some(fa), Some(fb)) if fa == fb => {}
        _ => return false,
    }

    let (a_first, a_last) = occurrence_dates(a, config);
    let (b_first, b_last) = occurrence_dates(b, config);
    a_first <= b_last && b_first <= a_last
}
