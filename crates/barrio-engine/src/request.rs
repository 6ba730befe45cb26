//! Self-contained validation requests.
//!
//! The write path ships one of these documents (as JSON) to the engine: the
//! record being written plus the rows it must be checked against. The CLI and
//! the Python bindings both accept exactly these shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::booking::validate_booking;
use crate::config::EngineConfig;
use crate::conflict::validate_event;
use crate::error::Result;
use crate::freebusy::{facility_intervals, find_free_slots, merge_busy_periods, FreeSlot, Interval};
use crate::model::{Booking, Event, Facility};

/// An event write plus the tenant's other events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleCheck {
    pub event: Event,
    /// The facility referenced by `event.facility_id`, if any.
    #[serde(default)]
    pub facility: Option<Facility>,
    #[serde(default)]
    pub existing: Vec<Event>,
}

impl ScheduleCheck {
    pub fn run(&self, config: &EngineConfig) -> Result<()> {
        validate_event(&self.event, self.facility.as_ref(), &self.existing, config)
    }
}

/// A booking write plus the facility's other bookings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingCheck {
    pub booking: Booking,
    pub facility: Facility,
    #[serde(default)]
    pub existing: Vec<Booking>,
}

impl BookingCheck {
    pub fn run(&self) -> Result<()> {
        validate_booking(&self.booking, &self.facility, &self.existing)
    }
}

/// Occupancy query for one facility over a window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacilityLoad {
    pub facility: Facility,
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub bookings: Vec<Booking>,
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
    /// Drop free slots shorter than this many minutes.
    #[serde(default)]
    pub min_duration_minutes: Option<i64>,
}

/// Busy and free time of a facility within a window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Availability {
    pub facility_id: u64,
    pub busy: Vec<Interval>,
    pub free: Vec<FreeSlot>,
}

impl FacilityLoad {
    pub fn run(&self, config: &EngineConfig) -> Availability {
        let intervals = facility_intervals(&self.facility, &self.events, &self.bookings, config);
        let min = self.min_duration_minutes.unwrap_or(0);

        Availability {
            facility_id: self.facility.id,
            busy: merge_busy_periods(&intervals, self.window_start, self.window_end),
            free: find_free_slots(&intervals, self.window_start, self.window_end)
                .into_iter()
                .filter(|slot| slot.duration_minutes >= min)
                .collect(),
        }
    }
}
