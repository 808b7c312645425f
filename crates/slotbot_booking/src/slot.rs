// --- File: crates/slotbot_booking/src/slot.rs ---
//! Slots and the rolling-window slot generator.

use chrono::{DateTime, Datelike, Days, Duration, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Serialize, Serializer};
use slotbot_config::SlotsConfig;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::error::BookingError;

/// Display and wire format of a slot, e.g. `10.06.2024 10:00`.
pub const SLOT_FORMAT: &str = "%d.%m.%Y %H:%M";

/// A bookable window, identified by its local start time in the configured zone.
///
/// Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Slot(NaiveDateTime);

impl Slot {
    pub fn new(start: NaiveDateTime) -> Self {
        Self(start)
    }

    pub fn start(&self) -> NaiveDateTime {
        self.0
    }

    /// The start instant in `tz`, or `None` if the local time does not exist there.
    pub fn localize(&self, tz: &Tz) -> Option<DateTime<Tz>> {
        tz.from_local_datetime(&self.0).earliest()
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(SLOT_FORMAT))
    }
}

impl FromStr for Slot {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDateTime::parse_from_str(s.trim(), SLOT_FORMAT)
            .map(Slot)
            .map_err(|_| BookingError::InvalidSlot(s.to_string()))
    }
}

impl Serialize for Slot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Source of "now". Swapped for a fixed clock in tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Produces the offerable slots for a rolling window of days.
#[derive(Debug, Clone)]
pub struct SlotGenerator {
    time_zone: Tz,
    days_ahead: u32,
    open_hour: u32,
    close_hour: u32,
    duration: Duration,
}

impl SlotGenerator {
    /// Hourly slots starting at `open_hour` up to but excluding `close_hour`,
    /// each lasting one hour.
    pub fn new(time_zone: Tz, days_ahead: u32, open_hour: u32, close_hour: u32) -> Self {
        Self {
            time_zone,
            days_ahead,
            open_hour,
            close_hour,
            duration: Duration::hours(1),
        }
    }

    pub fn from_config(config: &SlotsConfig) -> Result<Self, BookingError> {
        let time_zone = config
            .time_zone
            .parse::<Tz>()
            .map_err(|_| BookingError::InvalidTimeZone(config.time_zone.clone()))?;
        Ok(Self {
            duration: Duration::minutes(config.duration_minutes),
            ..Self::new(
                time_zone,
                config.days_ahead,
                config.open_hour,
                config.close_hour,
            )
        })
    }

    pub fn time_zone(&self) -> Tz {
        self.time_zone
    }

    /// Length of the calendar event created for a slot.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// `now` as wall-clock time in the configured zone.
    pub fn local_time(&self, now: DateTime<Utc>) -> NaiveDateTime {
        now.with_timezone(&self.time_zone).naive_local()
    }

    /// All slots of the window whose start lies strictly after `now`, in order.
    pub fn generate(&self, now: DateTime<Utc>) -> Vec<Slot> {
        let local_now = now.with_timezone(&self.time_zone);
        let today = local_now.date_naive();

        let slots: Vec<Slot> = (0..self.days_ahead)
            .filter_map(|offset| today.checked_add_days(Days::new(u64::from(offset))))
            .flat_map(|date| {
                (self.open_hour..self.close_hour).filter_map(move |hour| date.and_hms_opt(hour, 0, 0))
            })
            .map(Slot::new)
            .filter(|slot| {
                slot.localize(&self.time_zone)
                    .is_some_and(|start| start > local_now)
            })
            .collect();

        debug!(
            "Generated {} slots from {} ({} days, {:02}:00-{:02}:00, weekday {})",
            slots.len(),
            local_now.format(SLOT_FORMAT),
            self.days_ahead,
            self.open_hour,
            self.close_hour,
            local_now.weekday()
        );
        slots
    }
}
