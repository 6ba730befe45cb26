//! Engine configuration.

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::dst::DstPolicy;
use crate::error::{BarrioError, Result};

/// Default forward range for recurrences without an end date.
pub const DEFAULT_HORIZON_DAYS: u32 = 365;

/// Largest accepted horizon, about five years.
pub const MAX_HORIZON_DAYS: u32 = 1830;

/// Settings shared by every expansion and validation call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Days covered by a recurrence, counted from its start date.
    pub horizon_days: u32,
    /// Timezone in which calendar dates and times-of-day are read.
    pub timezone: Tz,
    pub dst_policy: DstPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            horizon_days: DEFAULT_HORIZON_DAYS,
            timezone: Tz::UTC,
            dst_policy: DstPolicy::default(),
        }
    }
}

impl EngineConfig {
    /// Build a config for a community timezone given by IANA name.
    pub fn with_timezone(name: &str) -> Result<Self> {
        let timezone = parse_timezone(name)?;
        Ok(Self {
            timezone,
            ..Self::default()
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.horizon_days == 0 {
            return Err(BarrioError::InvalidConfig(
                "horizon_days must be at least 1".to_string(),
            ));
        }
        if self.horizon_days > MAX_HORIZON_DAYS {
            return Err(BarrioError::InvalidConfig(format!(
                "horizon_days must be at most {MAX_HORIZON_DAYS}"
            )));
        }
        Ok(())
    }
}

/// Parse an IANA timezone name such as `America/Santiago`.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse()
        .map_err(|_| BarrioError::InvalidTimezone(name.to_string()))
}
