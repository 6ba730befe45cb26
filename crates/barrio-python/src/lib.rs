//! # barrio-python
//!
//! Python bindings for the BarrioLink scheduling engine, built with PyO3.
//!
//! Exposes the following functions to Python as the `barrio._native` module:
//!
//! - `expand_occurrences(event_json, config_json=None)` -- event -> JSON array of occurrences
//! - `check_schedule(request_json, config_json=None)` -- raises on a facility conflict
//! - `check_booking(request_json)` -- raises on an overlapping booking
//! - `find_free_slots(request_json, config_json=None)` -- busy/free time of a facility
//! - `validate_rut(value)` -- raises on a malformed RUT
//!
//! Every document crosses the boundary as a JSON string, in the same shapes
//! the `barrio` CLI reads.

use barrio_engine::request::{BookingCheck, FacilityLoad, ScheduleCheck};
use barrio_engine::{EngineConfig, Event};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use serde::de::DeserializeOwned;

fn parse<T: DeserializeOwned>(json: &str, what: &str) -> PyResult<T> {
    serde_json::from_str(json).map_err(|e| PyValueError::new_err(format!("Invalid {} JSON: {}", what, e)))
}

fn to_json<T: serde::Serialize>(value: &T) -> PyResult<String> {
    serde_json::to_string(value)
        .map_err(|e| PyValueError::new_err(format!("Serialization error: {}", e)))
}

fn engine_config(config_json: Option<&str>) -> PyResult<EngineConfig> {
    let config: EngineConfig = match config_json {
        Some(json) => parse(json, "config")?,
        None => EngineConfig::default(),
    };
    config.validate().map_err(|e| PyValueError::new_err(e.to_string()))?;
    Ok(config)
}

/// Expand an event into its concrete occurrences.
///
/// Args:
///     event_json: The event as a JSON object.
///     config_json: Optional engine config, e.g.
///         `{"horizon_days": 180, "timezone": "America/Santiago"}`.
///
/// Returns:
///     A JSON array of `{date, start_time, end_time, start, end}` objects.
///
/// Raises:
///     ValueError: If the event is malformed or invalid.
#[pyfunction]
#[pyo3(signature = (event_json, config_json=None))]
fn expand_occurrences(event_json: &str, config_json: Option<&str>) -> PyResult<String> {
    let config = engine_config(config_json)?;
    let event: Event = parse(event_json, "event")?;
    event.validate().map_err(|e| PyValueError::new_err(e.to_string()))?;

    to_json(&barrio_engine::expand(&event, &config))
}

/// Validate an event write against the other events of its tenant.
///
/// Args:
///     request_json: `{"event": ..., "facility": ..., "existing": [...]}`.
///     config_json: Optional engine config.
///
/// Raises:
///     ValueError: With a user-facing message naming the conflicting event,
///         date and windows, or the structural problem.
#[pyfunction]
#[pyo3(signature = (request_json, config_json=None))]
fn check_schedule(request_json: &str, config_json: Option<&str>) -> PyResult<()> {
    let config = engine_config(config_json)?;
    let check: ScheduleCheck = parse(request_json, "schedule check")?;
    check.run(&config).map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Validate a facility booking against the facility's other bookings.
///
/// Args:
///     request_json: `{"booking": ..., "facility": ..., "existing": [...]}`.
///
/// Raises:
///     ValueError: If the window is empty or overlaps an active booking.
#[pyfunction]
fn check_booking(request_json: &str) -> PyResult<()> {
    let check: BookingCheck = parse(request_json, "booking check")?;
    check.run().map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Busy periods and free slots of one facility within a window.
///
/// Args:
///     request_json: `{"facility", "events", "bookings", "window_start",
///         "window_end", "min_duration_minutes"}`.
///     config_json: Optional engine config.
///
/// Returns:
///     A JSON string with `{facility_id, busy, free}`.
///
/// Raises:
///     ValueError: If the JSON input is malformed or the window is empty.
#[pyfunction]
#[pyo3(signature = (request_json, config_json=None))]
fn find_free_slots(request_json: &str, config_json: Option<&str>) -> PyResult<String> {
    let config = engine_config(config_json)?;
    let load: FacilityLoad = parse(request_json, "facility load")?;
    if load.window_end <= load.window_start {
        return Err(PyValueError::new_err("window_end must be after window_start"));
    }

    to_json(&load.run(&config))
}

/// Validate a Chilean RUT (dots and dash optional).
///
/// Raises:
///     ValueError: If the format or check digit is wrong.
#[pyfunction]
fn validate_rut(value: &str) -> PyResult<()> {
    barrio_engine::validate_rut(value).map_err(|e| PyValueError::new_err(e.to_string()))
}

/// The native extension module, exposed as `barrio._native`.
#[pymodule]
fn _native(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(expand_occurrences, m)?)?;
    m.add_function(wrap_pyfunction!(check_schedule, m)?)?;
    m.add_function(wrap_pyfunction!(check_booking, m)?)?;
    m.add_function(wrap_pyfunction!(find_free_slots, m)?)?;
    m.add_function(wrap_pyfunction!(validate_rut, m)?)?;
    Ok(())
}
