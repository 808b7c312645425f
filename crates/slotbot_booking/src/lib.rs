// --- File: crates/slotbot_booking/src/lib.rs ---
//! Appointment booking core: slot generation, the availability pool, the
//! booking ledger and the conversational flows built on them.
//!
//! Everything here is platform-neutral. Flows return a [`Screen`] which the
//! chat adapter renders.

pub mod action;
pub mod assistant;
pub mod booking;
pub mod cancellation;
pub mod error;
pub mod menu;
pub mod messages;
pub mod screen;
pub mod session;
pub mod slot;
pub mod store;

#[cfg(test)]
mod testutils;

#[cfg(test)]
mod store_proptest;
#[cfg(test)]
mod store_test;

pub use action::Action;
pub use assistant::{AssistantSettings, BookingAssistant};
pub use error::BookingError;
pub use screen::{Button, Screen};
pub use session::{Session, Sessions};
pub use slot::{Clock, Slot, SlotGenerator, SystemClock, SLOT_FORMAT};
pub use store::{Booking, BookingStore, Reservation, UserId};

/// The person behind an action, as reported by the chat platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatUser {
    pub id: UserId,
    pub first_name: String,
}

impl ChatUser {
    pub fn new(id: u64, first_name: impl Into<String>) -> Self {
        Self {
            id: UserId(id),
            first_name: first_name.into(),
        }
    }
}
