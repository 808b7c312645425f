// --- File: crates/slotbot_booking/src/error.rs ---
use slotbot_common::SlotbotError;
use thiserror::Error;

use crate::slot::Slot;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    #[error("Unknown action identifier: {0}")]
    InvalidAction(String),
    #[error("Invalid slot '{0}', expected DD.MM.YYYY HH:MM")]
    InvalidSlot(String),
    #[error("Invalid time zone: {0}")]
    InvalidTimeZone(String),
    #[error("Slot {0} is no longer available")]
    SlotUnavailable(Slot),
    #[error("Slot {0} has already started")]
    SlotExpired(Slot),
    #[error("Slot {0} does not exist in the configured time zone")]
    NonexistentLocalTime(Slot),
    #[error("Calendar error: {0}")]
    Calendar(String),
    #[error("Calendar returned no event id")]
    MissingEventId,
}

impl From<BookingError> for SlotbotError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::InvalidTimeZone(_) => SlotbotError::ConfigError(err.to_string()),
            BookingError::Calendar(message) => SlotbotError::ExternalServiceError {
                service_name: "calendar".to_string(),
                message,
            },
            BookingError::InvalidAction(_)
            | BookingError::InvalidSlot(_)
            | BookingError::NonexistentLocalTime(_) => {
                SlotbotError::ValidationError(err.to_string())
            }
            _ => SlotbotError::InternalError(err.to_string()),
        }
    }
}
