//! Error types for barrio-engine operations.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BarrioError {
    #[error("an end time is required when a facility is assigned")]
    EndRequired,

    #[error("end time must be after start time")]
    EndNotAfterStart,

    #[error("recurrence interval must be at least 1 (got {0})")]
    InvalidInterval(u32),

    #[error("invalid time slot: {0}")]
    InvalidTimeSlot(String),

    #[error(
        "facility already booked by \"{title}\" on {date}: {window} overlaps existing {existing_window}"
    )]
    ScheduleConflict {
        title: String,
        date: NaiveDate,
        window: String,
        existing_window: String,
    },

    #[error("facility already booked for {window} (booking {booking_id})")]
    BookingConflict { booking_id: u64, window: String },

    #[error("facility {0} is not active")]
    FacilityInactive(u64),

    #[error("capacity {requested} exceeds facility capacity {available}")]
    CapacityExceeded { requested: u32, available: u32 },

    #[error("facility {facility_id} does not match the record's facility or tenant")]
    FacilityMismatch { facility_id: u64 },

    #[error("a tenant is required")]
    TenantRequired,

    #[error("tenant {requested} is not accessible from tenant {actual}")]
    TenantMismatch { requested: u64, actual: u64 },

    #[error("invalid national id: {0}")]
    InvalidNationalId(String),

    #[error("invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, BarrioError>;
