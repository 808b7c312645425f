// --- File: crates/slotbot_booking/src/action.rs ---
//! Button action identifiers and their string encoding.

use std::fmt;
use std::str::FromStr;

use crate::error::BookingError;
use crate::slot::Slot;

const SELECT_PREFIX: &str = "select_";
const CANCEL_PREFIX: &str = "cancel_specific_";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// `start`: main menu.
    Start,
    /// `booking`: list available slots.
    Browse,
    /// `refresh`: regenerate availability, then list it.
    Refresh,
    /// `select_<slot>`
    Select(Slot),
    /// `confirm_booking`
    ConfirmBooking,
    /// `mybooking`: list own bookings with cancel buttons.
    MyBookings,
    /// `cancel_specific_<slot>`
    SelectCancel(Slot),
    /// `execute_cancel`
    ExecuteCancel,
    /// `info`
    Info,
}

impl Action {
    pub fn encode(&self) -> String {
        self.to_string()
    }

    pub fn parse(data: &str) -> Result<Self, BookingError> {
        data.parse()
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Start => f.write_str("start"),
            Action::Browse => f.write_str("booking"),
            Action::Refresh => f.write_str("refresh"),
            Action::Select(slot) => write!(f, "{}{}", SELECT_PREFIX, slot),
            Action::ConfirmBooking => f.write_str("confirm_booking"),
            Action::MyBookings => f.write_str("mybooking"),
            Action::SelectCancel(slot) => write!(f, "{}{}", CANCEL_PREFIX, slot),
            Action::ExecuteCancel => f.write_str("execute_cancel"),
            Action::Info => f.write_str("info"),
        }
    }
}

impl FromStr for Action {
    type Err = BookingError;

    fn from_str(data: &str) -> Result<Self, Self::Err> {
        let action = match data {
            "start" => Action::Start,
            "booking" => Action::Browse,
            "refresh" => Action::Refresh,
            "confirm_booking" => Action::ConfirmBooking,
            "mybooking" => Action::MyBookings,
            "execute_cancel" => Action::ExecuteCancel,
            "info" => Action::Info,
            other => {
                if let Some(slot) = other.strip_prefix(SELECT_PREFIX) {
                    Action::Select(slot.parse()?)
                } else if let Some(slot) = other.strip_prefix(CANCEL_PREFIX) {
                    Action::SelectCancel(slot.parse()?)
                } else {
                    return Err(BookingError::InvalidAction(other.to_string()));
                }
            }
        };
        Ok(action)
    }
}
