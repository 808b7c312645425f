// --- File: crates/slotbot_booking/src/booking.rs ---
//! Browse, select and confirm.

use slotbot_common::services::{
    BookingNotification, CalendarEvent, CalendarService, NotificationService,
};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::action::Action;
use crate::error::BookingError;
use crate::messages;
use crate::screen::{Button, Screen};
use crate::session::Sessions;
use crate::slot::{Clock, Slot, SlotGenerator};
use crate::store::{Booking, BookingStore};
use crate::ChatUser;

pub struct BookingFlow<C, N> {
    store: Arc<BookingStore>,
    sessions: Arc<Sessions>,
    generator: SlotGenerator,
    clock: Arc<dyn Clock>,
    calendar: Arc<C>,
    calendar_id: String,
    notifier: Option<Arc<N>>,
}

impl<C, N> BookingFlow<C, N>
where
    C: CalendarService,
    N: NotificationService + 'static,
{
    pub fn new(
        store: Arc<BookingStore>,
        sessions: Arc<Sessions>,
        generator: SlotGenerator,
        clock: Arc<dyn Clock>,
        calendar: Arc<C>,
        calendar_id: String,
        notifier: Option<Arc<N>>,
    ) -> Self {
        Self {
            store,
            sessions,
            generator,
            clock,
            calendar,
            calendar_id,
            notifier,
        }
    }

    /// Lists the pool after dropping slots that already started.
    pub fn browse(&self) -> Screen {
        let now = self.generator.local_time(self.clock.now());
        self.store.prune_expired(now);
        let slots = self.store.available_slots();

        if slots.is_empty() {
            return Screen::new(messages::NO_SLOTS)
                .button(messages::REFRESH, Action::Refresh)
                .button(messages::BACK, Action::Start);
        }

        slots
            .into_iter()
            .fold(Screen::new(messages::CHOOSE_SLOT), |screen, slot| {
                screen.button(slot.to_string(), Action::Select(slot))
            })
            .button(messages::REFRESH, Action::Refresh)
            .button(messages::BACK, Action::Start)
    }

    pub fn refresh(&self) -> Screen {
        let generated = self.generator.generate(self.clock.now());
        self.store.refresh(generated);
        self.browse()
    }

    /// Remembers the choice; availability is checked on confirm.
    pub fn select(&self, user: &ChatUser, slot: Slot) -> Screen {
        debug!("User {} selected {}", user.id, slot);
        self.sessions.select_slot(user.id, slot);
        Screen::new(messages::confirm_booking(&slot)).row(vec![
            Button::new(messages::YES, Action::ConfirmBooking),
            Button::new(messages::NO, Action::Browse),
        ])
    }

    pub async fn confirm(&self, user: &ChatUser) -> Screen {
        let Some(slot) = self.sessions.take_selected(user.id) else {
            info!("User {} confirmed without a pending selection", user.id);
            return self.with_notice(messages::SELECTION_EXPIRED);
        };

        match self.book(user, slot).await {
            Ok(booking) => {
                self.dispatch_notification(user, &booking);
                Screen::new(messages::booked(&slot)).button(messages::BACK, Action::Start)
            }
            Err(BookingError::SlotUnavailable(_)) => {
                self.with_notice(&messages::slot_taken(&slot))
            }
            Err(BookingError::SlotExpired(_)) => {
                info!("User {} confirmed {} after it started", user.id, slot);
                self.with_notice(&messages::slot_passed(&slot))
            }
            Err(e) => {
                error!("Booking {} for user {} failed: {}", slot, user.id, e);
                Screen::new(messages::BOOKING_FAILED)
                    .button(messages::BOOK, Action::Browse)
                    .button(messages::BACK, Action::Start)
            }
        }
    }

    /// Reserves `slot`, creates its calendar event and records the booking.
    ///
    /// Slots that already started are refused. The slot goes back to the pool
    /// on any error.
    pub async fn book(&self, user: &ChatUser, slot: Slot) -> Result<Booking, BookingError> {
        if slot.start() <= self.generator.local_time(self.clock.now()) {
            return Err(BookingError::SlotExpired(slot));
        }
        let reservation = self.store.reserve(slot)?;
        let event = self.event_for(user, slot)?;

        let created = self
            .calendar
            .create_event(&self.calendar_id, event)
            .await
            .map_err(|e| BookingError::Calendar(e.to_string()))?;
        let event_id = created.event_id.ok_or(BookingError::MissingEventId)?;

        Ok(reservation.commit(user.id, event_id))
    }

    fn event_for(&self, user: &ChatUser, slot: Slot) -> Result<CalendarEvent, BookingError> {
        let tz = self.generator.time_zone();
        let start = slot
            .localize(&tz)
            .ok_or(BookingError::NonexistentLocalTime(slot))?;
        let end = start + self.generator.duration();
        Ok(CalendarEvent {
            summary: messages::event_summary(&user.first_name),
            start_time: start.to_rfc3339(),
            end_time: end.to_rfc3339(),
            time_zone: tz.name().to_string(),
        })
    }

    fn dispatch_notification(&self, user: &ChatUser, booking: &Booking) {
        let Some(notifier) = self.notifier.as_ref().map(Arc::clone) else {
            debug!("No webhook configured, skipping notification");
            return;
        };
        let notification = BookingNotification {
            user: user.first_name.clone(),
            slot: booking.slot.to_string(),
            user_id: user.id.0,
            event_id: booking.event_id.clone(),
        };
        tokio::spawn(async move {
            match notifier.notify_booking(notification).await {
                Ok(result) => debug!("Webhook answered {}", result.status),
                Err(e) => warn!("Booking notification failed: {}", e),
            }
        });
    }

    /// A notice followed by the current slot list.
    fn with_notice(&self, notice: &str) -> Screen {
        let listing = self.browse();
        Screen {
            text: format!("{}\n\n{}", notice, listing.text),
            rows: listing.rows,
        }
    }
}
