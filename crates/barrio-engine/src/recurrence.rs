//! Recurrence rules as a sum type.
//!
//! Each variant carries only what its cadence needs. The flat columns stored on
//! an [`Event`] are converted once by [`Recurrence::from_event`].

use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Weekday};

use crate::model::{Event, RecurrenceType, TimeSlot};

/// How an event repeats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recurrence {
    /// A single occurrence at the event's own start/end.
    None,
    /// Every `interval` days from the start date.
    Daily { interval: u32 },
    /// On `days` (or the start weekday when empty), every `interval` weeks.
    Weekly { interval: u32, days: Vec<Weekday> },
    /// Same day of month, every `interval` months.
    Monthly { interval: u32 },
    /// Same day of month, every `3 * interval` months.
    Quarterly { interval: u32 },
    /// Same day of month, every `6 * interval` months.
    Semestral { interval: u32 },
    /// Same calendar day, every `interval` years.
    Yearly { interval: u32 },
    /// Explicit weekday slots, each with its own start/end time.
    TimeTable { slots: Vec<TimeSlot> },
}

/// A wall-clock window on a single day: start time plus length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaySlot {
    pub start: NaiveTime,
    pub length: Duration,
}

impl Recurrence {
    /// Read the recurrence columns of an event.
    ///
    /// A non-empty time table takes precedence over the cadence of every
    /// recurring type.
    pub fn from_event(event: &Event) -> Self {
        let interval = event.recurrence_interval.max(1);
        match event.recurrence_type {
            RecurrenceType::None => Recurrence::None,
            _ if !event.time_table.is_empty() => Recurrence::TimeTable {
                slots: event.time_table.clone(),
            },
            RecurrenceType::Daily => Recurrence::Daily { interval },
            RecurrenceType::Weekly => Recurrence::Weekly {
                interval,
                days: event.recurrence_days.clone(),
            },
            RecurrenceType::Monthly => Recurrence::Monthly { interval },
            RecurrenceType::Quarterly => Recurrence::Quarterly { interval },
            RecurrenceType::Semestral => Recurrence::Semestral { interval },
            RecurrenceType::Yearly => Recurrence::Yearly { interval },
        }
    }

    pub fn is_recurring(&self) -> bool {
        !matches!(self, Recurrence::None)
    }

    /// Slots that fall on `day` for a rule anchored at `anchor`.
    ///
    /// `base` is the event's own start time and length, used by every variant
    /// except [`Recurrence::TimeTable`].
    pub fn slots_on(&self, anchor: NaiveDate, day: NaiveDate, base: DaySlot) -> Vec<DaySlot> {
        let include = match self {
            Recurrence::None => day == anchor,
            Recurrence::Daily { interval } => {
                (day - anchor).num_days() % i64::from(*interval) == 0
            }
            Recurrence::Weekly { interval, days } => {
                let on_day = if days.is_empty() {
                    day.weekday() == anchor.weekday()
                } else {
                    days.contains(&day.weekday())
                };
                on_day && weeks_between(anchor, day) % i64::from(*interval) == 0
            }
            Recurrence::Monthly { interval } => {
                on_month_cadence(anchor, day, i64::from(*interval))
            }
            Recurrence::Quarterly { interval } => {
                on_month_cadence(anchor, day, 3 * i64::from(*interval))
            }
            Recurrence::Semestral { interval } => {
                on_month_cadence(anchor, day, 6 * i64::from(*interval))
            }
            Recurrence::Yearly { interval } => {
                on_month_cadence(anchor, day, 12 * i64::from(*interval))
            }
            Recurrence::TimeTable { slots } => {
                let mut on_day: Vec<DaySlot> = slots
                    .iter()
                    .filter(|slot| slot.weekday == day.weekday())
                    .map(|slot| DaySlot {
                        start: slot.start,
                        length: slot.end - slot.start,
                    })
                    .collect();
                on_day.sort_by_key(|slot| slot.start);
                return on_day;
            }
        };

        if include {
            vec![base]
        } else {
            Vec::new()
        }
    }
}

/// Whole weeks between the Monday-starting weeks of `anchor` and `day`.
fn weeks_between(anchor: NaiveDate, day: NaiveDate) -> i64 {
    let week_start = |d: NaiveDate| d - Duration::days(i64::from(d.weekday().num_days_from_monday()));
    (week_start(day) - week_start(anchor)).num_days() / 7
}

/// `day` repeats `anchor`'s day of month, `step` months apart.
///
/// Anchors past the end of a shorter month land on that month's last day.
fn on_month_cadence(anchor: NaiveDate, day: NaiveDate, step: i64) -> bool {
    let months = i64::from(day.year() - anchor.year()) * 12 + i64::from(day.month())
        - i64::from(anchor.month());
    if months < 0 || months % step != 0 {
        return false;
    }
    day.day() == anchor.day().min(last_day_of_month(day.year(), day.month()))
}

fn last_day_of_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map_or(28, |d| d.day())
}
