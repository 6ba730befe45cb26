//! DST transition policies for recurring occurrences.
//!
//! Occurrences are generated as local wall-clock times. Around a DST change a
//! wall-clock time can be missing (spring forward) or repeated (fall back).
//! Repeated times always resolve to the earliest instant; missing ones follow
//! the configured [`DstPolicy`].

use chrono::{DateTime, Duration, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Longest DST gap probed when resolving a missing local time.
const MAX_GAP_MINUTES: i64 = 180;

/// Policy for handling occurrences that fall into a DST gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DstPolicy {
    /// Drop occurrences that fall in the DST gap
    Skip,
    /// Move to the first valid local time after the gap
    ShiftForward,
    /// Keep the wall-clock reading and apply the offset in force before the gap
    #[default]
    WallClock,
}

/// Convert a local wall-clock time in `tz` into a UTC instant.
///
/// Returns `None` only when `policy` is [`DstPolicy::Skip`] and the time does
/// not exist in `tz`.
pub fn resolve_local(tz: &Tz, local: NaiveDateTime, policy: DstPolicy) -> Option<DateTime<Utc>> {
    if let Some(dt) = tz.from_local_datetime(&local).earliest() {
        return Some(dt.with_timezone(&Utc));
    }

    match policy {
        DstPolicy::Skip => None,
        DstPolicy::ShiftForward => (1..=MAX_GAP_MINUTES)
            .filter_map(|m| tz.from_local_datetime(&(local + Duration::minutes(m))).earliest())
            .next()
            .map(|dt| dt.with_timezone(&Utc)),
        DstPolicy::WallClock => {
            let before = tz
                .from_local_datetime(&(local - Duration::minutes(MAX_GAP_MINUTES)))
                .earliest()?;
            let offset = before.offset().fix().local_minus_utc();
            Some(Utc.from_utc_datetime(&(local - Duration::seconds(i64::from(offset)))))
        }
    }
}
