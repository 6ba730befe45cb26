//! # barrio-engine
//!
//! Occurrence expansion and facility conflict validation for community event
//! scheduling.
//!
//! The web backend stores events, facilities and bookings; before an event or
//! booking write is committed it asks this engine whether the write is
//! structurally sound and whether it would double-book a facility.
//!
//! ## Modules
//!
//! - [`occurrence`] — recurrence → ordered list of concrete occurrences
//! - [`recurrence`] — recurrence rules as a sum type
//! - [`conflict`] — facility double-booking detection between events
//! - [`booking`] — single-interval overlap checks for literal bookings
//! - [`freebusy`] — facility busy periods and free slots
//! - [`dst`] — DST gap policies
//! - [`tenant`] — explicit tenant resolution
//! - [`national_id`] — RUT and national id validation
//! - [`model`] — events, facilities and bookings as stored by the backend
//! - [`config`] — horizon, community timezone and DST policy
//! - [`request`] — self-contained validation requests
//! - [`error`] — Error types

pub mod booking;
pub mod config;
pub mod conflict;
pub mod dst;
pub mod error;
pub mod freebusy;
pub mod model;
pub mod national_id;
pub mod occurrence;
pub mod recurrence;
pub mod request;
pub mod tenant;

pub use booking::validate_booking;
pub use config::EngineConfig;
pub use conflict::{find_conflicts, validate_event, validate_facility_schedule};
pub use error::BarrioError;
pub use freebusy::{facility_intervals, find_free_slots, first_free_slot, FreeSlot, Interval};
pub use model::{Booking, BookingStatus, Event, EventStatus, Facility, RecurrenceType, TimeSlot};
pub use national_id::{validate_national_id_format, validate_rut};
pub use occurrence::{expand, total_minutes, Occurrence};
pub use recurrence::Recurrence;
pub use tenant::{resolve_tenant, TenantId};
