//! Tests for single-interval facility booking validation.

use barrio_engine::booking::intervals_overlap;
use barrio_engine::{validate_booking, BarrioError, Booking, BookingStatus, Facility, TenantId};
use chrono::{DateTime, TimeZone, Utc};

fn at(hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, hour, min, 0).unwrap()
}

fn tenant(id: u64) -> TenantId {
    TenantId::new(id).unwrap()
}

fn facility() -> Facility {
    Facility {
        id: 3,
        tenant: tenant(1),
        name: "Multicancha".to_string(),
        capacity: 20,
        is_active: true,
    }
}

fn booking(id: u64, start: DateTime<Utc>, end: DateTime<Utc>) -> Booking {
    Booking {
        id,
        tenant: tenant(1),
        facility_id: 3,
        start_at: start,
        end_at: end,
        status: BookingStatus::Confirmed,
    }
}

#[test]
fn end_not_after_start_is_rejected_before_overlap_check() {
    let existing = vec![booking(1, at(9, 0), at(12, 0))];

    let backwards = booking(2, at(11, 0), at(10, 0));
    assert_eq!(
        validate_booking(&backwards, &facility(), &existing),
        Err(BarrioError::EndNotAfterStart)
    );

    let empty = booking(3, at(10, 0), at(10, 0));
    assert_eq!(
        validate_booking(&empty, &facility(), &existing),
        Err(BarrioError::EndNotAfterStart)
    );
}

#[test]
fn overlapping_booking_is_rejected() {
    let existing = vec![booking(1, at(9, 0), at(11, 0))];
    let candidate = booking(2, at(10, 30), at(12, 0));

    match validate_booking(&candidate, &facility(), &existing) {
        Err(BarrioError::BookingConflict { booking_id, window }) => {
            assert_eq!(booking_id, 1);
            assert_eq!(window, "2026-03-14 09:00 – 2026-03-14 11:00");
        }
        other => panic!("expected a booking conflict, got {other:?}"),
    }
}

#[test]
fn touching_bookings_do_not_conflict() {
    let existing = vec![booking(1, at(9, 0), at(11, 0))];

    assert!(validate_booking(&booking(2, at(11, 0), at(12, 0)), &facility(), &existing).is_ok());
    assert!(validate_booking(&booking(3, at(8, 0), at(9, 0)), &facility(), &existing).is_ok());
}

#[test]
fn inactive_bookings_are_ignored() {
    let mut cancelled = booking(1, at(9, 0), at(11, 0));
    cancelled.status = BookingStatus::Cancelled;
    let mut rejected = booking(2, at(9, 0), at(11, 0));
    rejected.status = BookingStatus::Rejected;
    let mut pending = booking(3, at(9, 0), at(11, 0));
    pending.status = BookingStatus::Pending;

    let candidate = booking(4, at(10, 0), at(10, 30));
    assert!(validate_booking(&candidate, &facility(), &[cancelled, rejected]).is_ok());
    assert!(validate_booking(&candidate, &facility(), &[pending]).is_err());
}

#[test]
fn update_skips_the_booking_itself() {
    let original = booking(1, at(9, 0), at(11, 0));
    let moved = booking(1, at(10, 0), at(12, 0));

    assert!(validate_booking(&moved, &facility(), &[original]).is_ok());
}

#[test]
fn other_facilities_and_tenants_do_not_count() {
    let mut other_room = booking(1, at(9, 0), at(11, 0));
    other_room.facility_id = 4;
    let mut other_tenant = booking(2, at(9, 0), at(11, 0));
    other_tenant.tenant = tenant(2);

    let candidate = booking(3, at(10, 0), at(10, 30));
    assert!(validate_booking(&candidate, &facility(), &[other_room, other_tenant]).is_ok());
}

#[test]
fn facility_must_match_and_be_active() {
    let candidate = booking(1, at(10, 0), at(11, 0));

    let mut foreign = facility();
    foreign.tenant = tenant(9);
    assert_eq!(
        validate_booking(&candidate, &foreign, &[]),
        Err(BarrioError::FacilityMismatch { facility_id: 3 })
    );

    let mut closed = facility();
    closed.is_active = false;
    assert_eq!(
        validate_booking(&candidate, &closed, &[]),
        Err(BarrioError::FacilityInactive(3))
    );
}

#[test]
fn interval_overlap_is_strict_and_symmetric() {
    let cases = [
        ((9, 11), (10, 12), true),
        ((9, 11), (11, 12), false),
        ((9, 12), (10, 11), true),
        ((9, 10), (13, 14), false),
    ];

    for ((a_s, a_e), (b_s, b_e), expected) in cases {
        let (a_start, a_end, b_start, b_end) = (at(a_s, 0), at(a_e, 0), at(b_s, 0), at(b_e, 0));
        assert_eq!(intervals_overlap(a_start, a_end, b_start, b_end), expected);
        assert_eq!(intervals_overlap(b_start, b_end, a_start, a_end), expected);
    }
}
