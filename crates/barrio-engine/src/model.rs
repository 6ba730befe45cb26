//! Persisted records consumed by the engine: events, facilities and bookings.
//!
//! These mirror the rows the web backend stores. Occurrences are never part of
//! a record; they are derived by [`crate::occurrence::expand`].

use chrono::{DateTime, NaiveDate, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{BarrioError, Result};
use crate::tenant::{TenantId, TenantScoped};

/// Lifecycle state of an event. Events are cancelled, never deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    Pending,
    #[default]
    Scheduled,
    Cancelled,
    Completed,
}

impl EventStatus {
    /// Pending and scheduled events hold their facility; the others never conflict.
    pub fn is_active(self) -> bool {
        matches!(self, EventStatus::Pending | EventStatus::Scheduled)
    }
}

/// Recurrence kind as stored on the event row.
///
/// The engine works with [`crate::recurrence::Recurrence`]; this flat form only
/// exists at the persistence boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecurrenceType {
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    Semestral,
    Yearly,
}

/// One entry of an explicit per-weekday time table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub weekday: Weekday,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

fn default_interval() -> u32 {
    1
}

/// A community event, optionally held at a facility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: u64,
    pub tenant: TenantId,
    pub title: String,
    #[serde(default)]
    pub facility_id: Option<u64>,
    /// Free-text place used when no facility is assigned.
    #[serde(default)]
    pub location: Option<String>,
    pub start: DateTime<Utc>,
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub recurrence_type: RecurrenceType,
    #[serde(default = "default_interval")]
    pub recurrence_interval: u32,
    /// Last calendar day (inclusive, local time) that may hold an occurrence.
    #[serde(default)]
    pub recurrence_end: Option<NaiveDate>,
    /// Weekly cadence days. Empty means "the start date's weekday".
    #[serde(default)]
    pub recurrence_days: Vec<Weekday>,
    #[serde(default)]
    pub time_table: Vec<TimeSlot>,
    #[serde(default)]
    pub status: EventStatus,
}

impl Event {
    /// Structural checks that must pass before any occurrence is expanded.
    pub fn validate(&self) -> Result<()> {
        if self.recurrence_interval == 0 {
            return Err(BarrioError::InvalidInterval(self.recurrence_interval));
        }

        for slot in &self.time_table {
            if slot.end <= slot.start {
                return Err(BarrioError::InvalidTimeSlot(format!(
                    "{} {} ends before it starts",
                    slot.weekday,
                    slot.start.format("%H:%M")
                )));
            }
        }

        match self.end {
            None if self.facility_id.is_some() => Err(BarrioError::EndRequired),
            Some(end) if end <= self.start => Err(BarrioError::EndNotAfterStart),
            _ => Ok(()),
        }
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}

impl TenantScoped for Event {
    fn tenant(&self) -> TenantId {
        self.tenant
    }
}

/// A bookable space managed by a tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facility {
    pub id: u64,
    pub tenant: TenantId,
    pub name: String,
    pub capacity: u32,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl TenantScoped for Facility {
    fn tenant(&self) -> TenantId {
        self.tenant
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
    Rejected,
}

impl BookingStatus {
    pub fn is_active(self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Confirmed)
    }
}

/// A literal, non-recurring reservation of a facility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: u64,
    pub tenant: TenantId,
    pub facility_id: u64,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    #[serde(default)]
    pub status: BookingStatus,
}

impl TenantScoped for Booking {
    fn tenant(&self) -> TenantId {
        self.tenant
    }
}
