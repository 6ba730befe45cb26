//! Tests for facility free/busy computation.

use barrio_engine::freebusy::merge_busy_periods;
use barrio_engine::request::FacilityLoad;
use barrio_engine::{
    facility_intervals, find_free_slots, first_free_slot, Booking, BookingStatus, EngineConfig,
    Event, EventStatus, Facility, Interval, RecurrenceType, TenantId,
};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};

fn utc(day: u32, hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, day, hour, min, 0).unwrap()
}

fn interval(day: u32, start_hour: u32, end_hour: u32) -> Interval {
    Interval {
        start: utc(day, start_hour, 0),
        end: utc(day, end_hour, 0),
    }
}

fn tenant() -> TenantId {
    TenantId::new(1).unwrap()
}

fn facility() -> Facility {
    Facility {
        id: 7,
        tenant: tenant(),
        name: "Salón".to_string(),
        capacity: 30,
        is_active: true,
    }
}

/// Daily 18:00-20:00 from 2026-03-02 to 2026-03-04 at facility 7.
fn daily_event() -> Event {
    Event {
        id: 1,
        tenant: tenant(),
        title: "Zumba".to_string(),
        facility_id: Some(7),
        location: None,
        start: utc(2, 18, 0),
        end: Some(utc(2, 20, 0)),
        capacity: None,
        recurrence_type: RecurrenceType::Daily,
        recurrence_interval: 1,
        recurrence_end: NaiveDate::from_ymd_opt(2026, 3, 4),
        recurrence_days: Vec::new(),
        time_table: Vec::new(),
        status: EventStatus::Scheduled,
    }
}

fn booking(id: u64, start: DateTime<Utc>, end: DateTime<Utc>, status: BookingStatus) -> Booking {
    Booking {
        id,
        tenant: tenant(),
        facility_id: 7,
        start_at: start,
        end_at: end,
        status,
    }
}

#[test]
fn empty_window_is_all_free() {
    let slots = find_free_slots(&[], utc(2, 8, 0), utc(2, 20, 0));

    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].duration_minutes, 12 * 60);
}

#[test]
fn overlapping_and_adjacent_periods_merge() {
    let busy = vec![interval(2, 9, 11), interval(2, 10, 12), interval(2, 12, 13), interval(2, 15, 16)];

    let merged = merge_busy_periods(&busy, utc(2, 8, 0), utc(2, 18, 0));

    assert_eq!(merged, vec![interval(2, 9, 13), interval(2, 15, 16)]);
}

#[test]
fn busy_and_free_tile_the_window() {
    let busy = vec![interval(2, 7, 9), interval(2, 12, 13), interval(2, 17, 21)];
    let (start, end) = (utc(2, 8, 0), utc(2, 18, 0));

    let merged = merge_busy_periods(&busy, start, end);
    let free = find_free_slots(&busy, start, end);

    let busy_minutes: i64 = merged.iter().map(|i| (i.end - i.start).num_minutes()).sum();
    let free_minutes: i64 = free.iter().map(|s| s.duration_minutes).sum();
    assert_eq!(busy_minutes + free_minutes, 10 * 60);
    assert_eq!(free[0].start, utc(2, 9, 0));
    assert_eq!(free.last().unwrap().end, utc(2, 17, 0));
}

#[test]
fn first_free_slot_respects_minimum_duration() {
    let busy = vec![
        interval(2, 9, 10),
        Interval {
            start: utc(2, 10, 30),
            end: utc(2, 12, 0),
        },
    ];

    // 08:00-09:00 and 10:00-10:30 are too short.
    let slot = first_free_slot(&busy, utc(2, 8, 0), utc(2, 18, 0), 120).unwrap();
    assert_eq!(slot.start, utc(2, 12, 0));

    assert!(first_free_slot(&busy, utc(2, 8, 0), utc(2, 9, 0), 120).is_none());
}

#[test]
fn facility_intervals_include_active_events_and_bookings_only() {
    let mut cancelled = daily_event();
    cancelled.id = 2;
    cancelled.status = EventStatus::Cancelled;
    let mut elsewhere = daily_event();
    elsewhere.id = 3;
    elsewhere.facility_id = Some(8);

    let bookings = vec![
        booking(1, utc(3, 9, 0), utc(3, 10, 0), BookingStatus::Confirmed),
        booking(2, utc(3, 11, 0), utc(3, 12, 0), BookingStatus::Cancelled),
    ];

    let intervals = facility_intervals(
        &facility(),
        &[daily_event(), cancelled, elsewhere],
        &bookings,
        &EngineConfig::default(),
    );

    // Three daily occurrences plus one confirmed booking.
    assert_eq!(intervals.len(), 4);
    assert!(intervals.contains(&interval(3, 9, 10)));
    assert!(intervals.contains(&interval(4, 18, 20)));
}

#[test]
fn facility_load_reports_busy_and_free() {
    let load = FacilityLoad {
        facility: facility(),
        events: vec![daily_event()],
        bookings: vec![booking(1, utc(3, 9, 0), utc(3, 10, 0), BookingStatus::Pending)],
        window_start: utc(3, 8, 0),
        window_end: utc(3, 22, 0),
        min_duration_minutes: Some(90),
    };

    let availability = load.run(&EngineConfig::default());

    assert_eq!(availability.facility_id, 7);
    assert_eq!(availability.busy, vec![interval(3, 9, 10), interval(3, 18, 20)]);
    // 08:00-09:00 is shorter than 90 minutes and is dropped.
    assert_eq!(availability.free.len(), 2);
    assert_eq!(availability.free[0].start, utc(3, 10, 0));
    assert_eq!(availability.free[1].start, utc(3, 20, 0));
}

#[test]
fn zero_length_occurrences_hold_nothing() {
    let mut open_ended = daily_event();
    open_ended.id = 2;
    open_ended.end = None;
    open_ended.start = utc(2, 12, 0);

    let intervals = facility_intervals(
        &facility(),
        &[daily_event(), open_ended],
        &[],
        &EngineConfig::default(),
    );
    assert_eq!(intervals.len(), 3);

    let free = find_free_slots(
        &[
            interval(3, 18, 20),
            Interval {
                start: utc(3, 12, 0),
                end: utc(3, 12, 0),
            },
        ],
        utc(3, 8, 0),
        utc(3, 22, 0),
    );
    assert_eq!(free.len(), 2);
    assert_eq!(free[0].end, utc(3, 18, 0));
}
