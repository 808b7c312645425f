// --- File: crates/slotbot_booking/src/messages.rs ---
//! User-facing texts and button labels.

use std::fmt::Display;

use crate::slot::Slot;

pub const WELCOME: &str = "👋 Hello! I can book you an appointment. What would you like to do?";
pub const BOOK: &str = "📅 Book an appointment";
pub const MY_BOOKINGS: &str = "📋 My bookings";
pub const CANCEL_BOOKING: &str = "🗑 Cancel a booking";
pub const ABOUT: &str = "ℹ️ About";
pub const BACK: &str = "⬅️ Back";
pub const REFRESH: &str = "🔄 Refresh list";
pub const YES: &str = "✅ Yes";
pub const NO: &str = "❌ No";
pub const YES_CANCEL: &str = "✅ Yes, cancel";

pub const CHOOSE_SLOT: &str = "🗓 Choose a convenient time:";
pub const NO_SLOTS: &str = "😔 No available slots right now. Try refreshing the list later.";
pub const SELECTION_EXPIRED: &str = "⌛ Your selection has expired. Please choose a time again.";
pub const BOOKING_FAILED: &str =
    "⚠️ Could not create the appointment right now. The slot is still free, please try again.";
pub const YOUR_BOOKINGS: &str = "📋 Your bookings (tap one to cancel it):";
pub const NO_BOOKINGS: &str = "You have no active bookings.";
pub const NO_PENDING_CANCEL: &str = "⚠️ Something went wrong. Please pick the booking to cancel again.";
pub const BOOKING_NOT_FOUND: &str = "⚠️ Booking not found.";
pub const UNKNOWN_ACTION: &str = "🤔 This button is no longer valid. Here is the main menu.";

pub fn confirm_booking(slot: &Slot) -> String {
    format!("Book an appointment on {}?", slot)
}

pub fn booked(slot: &Slot) -> String {
    format!("✅ You are booked for {}. See you then!", slot)
}

pub fn slot_taken(slot: &Slot) -> String {
    format!("😔 Sorry, {} is no longer available. Please choose another time.", slot)
}

pub fn slot_passed(slot: &Slot) -> String {
    format!("⌛ {} has already started. Please choose a later time.", slot)
}

pub fn cancel_label(slot: &Slot) -> String {
    format!("❌ Cancel {}", slot)
}

pub fn confirm_cancel(slot: &Slot) -> String {
    format!("Cancel your booking on {}?", slot)
}

pub fn cancelled(slot: &Slot) -> String {
    format!("✅ Your booking on {} has been cancelled.", slot)
}

pub fn cancel_failed(error: impl Display) -> String {
    format!("❌ Could not cancel the booking: {}", error)
}

pub fn event_summary(first_name: &str) -> String {
    format!("Appointment: {}", first_name)
}
