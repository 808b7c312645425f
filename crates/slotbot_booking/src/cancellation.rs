// --- File: crates/slotbot_booking/src/cancellation.rs ---
//! List own bookings, pick one, confirm its cancellation.

use slotbot_common::services::CalendarService;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::action::Action;
use crate::messages;
use crate::screen::{Button, Screen};
use crate::session::Sessions;
use crate::slot::Slot;
use crate::store::BookingStore;
use crate::ChatUser;

pub struct CancellationFlow<C> {
    store: Arc<BookingStore>,
    sessions: Arc<Sessions>,
    calendar: Arc<C>,
    calendar_id: String,
}

impl<C: CalendarService> CancellationFlow<C> {
    pub fn new(
        store: Arc<BookingStore>,
        sessions: Arc<Sessions>,
        calendar: Arc<C>,
        calendar_id: String,
    ) -> Self {
        Self {
            store,
            sessions,
            calendar,
            calendar_id,
        }
    }

    pub fn list(&self, user: &ChatUser) -> Screen {
        let bookings = self.store.bookings(user.id);
        if bookings.is_empty() {
            return Screen::new(messages::NO_BOOKINGS).button(messages::BACK, Action::Start);
        }

        bookings
            .iter()
            .fold(Screen::new(messages::YOUR_BOOKINGS), |screen, booking| {
                screen.button(
                    messages::cancel_label(&booking.slot),
                    Action::SelectCancel(booking.slot),
                )
            })
            .button(messages::BACK, Action::Start)
    }

    pub fn select(&self, user: &ChatUser, slot: Slot) -> Screen {
        self.sessions.set_slot_to_cancel(user.id, slot);
        Screen::new(messages::confirm_cancel(&slot)).row(vec![
            Button::new(messages::YES_CANCEL, Action::ExecuteCancel),
            Button::new(messages::NO, Action::MyBookings),
        ])
    }

    /// Deletes the calendar event first; local state changes only after that succeeds.
    pub async fn execute(&self, user: &ChatUser) -> Screen {
        let Some(slot) = self.sessions.slot_to_cancel(user.id) else {
            warn!("User {} confirmed a cancellation without a pending slot", user.id);
            return Screen::new(messages::NO_PENDING_CANCEL)
                .button(messages::MY_BOOKINGS, Action::MyBookings);
        };
        let Some(booking) = self.store.find_booking(user.id, slot) else {
            warn!("User {} has no booking for {}", user.id, slot);
            self.sessions.clear_slot_to_cancel(user.id);
            return Screen::new(messages::BOOKING_NOT_FOUND)
                .button(messages::MY_BOOKINGS, Action::MyBookings);
        };

        if let Err(e) = self
            .calendar
            .delete_event(&self.calendar_id, &booking.event_id)
            .await
        {
            error!(
                "Deleting event {} for user {} failed: {}",
                booking.event_id, user.id, e
            );
            return Screen::new(messages::cancel_failed(&e))
                .button(messages::BACK, Action::MyBookings);
        }

        if self.store.cancel(user.id, slot).is_none() {
            warn!("Booking {} of user {} vanished during cancellation", slot, user.id);
        }
        self.sessions.clear_slot_to_cancel(user.id);
        info!("User {} cancelled {}", user.id, slot);
        Screen::new(messages::cancelled(&slot)).button(messages::BACK, Action::Start)
    }
}
