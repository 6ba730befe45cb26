//! Single-interval overlap checks for literal facility bookings.

use chrono::{DateTime, Utc};

use crate::error::{BarrioError, Result};
use crate::model::{Booking, Facility};
use crate::tenant::in_tenant;

/// Strict interval overlap: touching boundaries do not overlap.
pub fn intervals_overlap(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    a_start < b_end && a_end > b_start
}

/// Validate a booking request against the facility and its existing bookings.
///
/// `end_at <= start_at` is rejected before anything else is looked at.
/// Only pending and confirmed bookings of the same facility and tenant are
/// compared; the candidate itself is skipped when re-validated on update.
pub fn validate_booking(candidate: &Booking, facility: &Facility, existing: &[Booking]) -> Result<()> {
    if candidate.end_at <= candidate.start_at {
        return Err(BarrioError::EndNotAfterStart);
    }

    if facility.id != candidate.facility_id || facility.tenant != candidate.tenant {
        return Err(BarrioError::FacilityMismatch {
            facility_id: candidate.facility_id,
        });
    }
    if !facility.is_active {
        return Err(BarrioError::FacilityInactive(facility.id));
    }

    if !candidate.status.is_active() {
        return Ok(());
    }

    let clash = in_tenant(existing, candidate.tenant)
        .filter(|b| b.id != candidate.id && b.facility_id == candidate.facility_id)
        .filter(|b| b.status.is_active())
        .find(|b| intervals_overlap(candidate.start_at, candidate.end_at, b.start_at, b.end_at));

    match clash {
        Some(other) => {
            tracing::debug!(
                booking_id = candidate.id,
                conflicting_booking_id = other.id,
                facility_id = candidate.facility_id,
                "booking conflict"
            );
            Err(BarrioError::BookingConflict {
                booking_id: other.id,
                window: format!(
                    "{} – {}",
                    other.start_at.format("%Y-%m-%d %H:%M"),
                    other.end_at.format("%Y-%m-%d %H:%M")
                ),
            })
        }
        None => Ok(()),
    }
}
