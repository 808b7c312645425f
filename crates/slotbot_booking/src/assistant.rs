// --- File: crates/slotbot_booking/src/assistant.rs ---
//! Entry point for every user action, whatever the chat platform.

use slotbot_common::services::{CalendarService, NotificationService};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::action::Action;
use crate::booking::BookingFlow;
use crate::cancellation::CancellationFlow;
use crate::menu::MenuController;
use crate::screen::Screen;
use crate::session::Sessions;
use crate::slot::{Clock, SlotGenerator};
use crate::store::BookingStore;
use crate::ChatUser;

/// Static inputs of the assistant, resolved from configuration at startup.
#[derive(Debug, Clone)]
pub struct AssistantSettings {
    pub generator: SlotGenerator,
    pub calendar_id: String,
    pub info_text: String,
}

pub struct BookingAssistant<C, N> {
    store: Arc<BookingStore>,
    sessions: Arc<Sessions>,
    booking: BookingFlow<C, N>,
    cancellation: CancellationFlow<C>,
    menu: MenuController,
}

impl<C, N> BookingAssistant<C, N>
where
    C: CalendarService,
    N: NotificationService + 'static,
{
    /// Seeds the pool from the generator at the clock's current time.
    pub fn new(
        settings: AssistantSettings,
        calendar: Arc<C>,
        notifier: Option<Arc<N>>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let AssistantSettings {
            generator,
            calendar_id,
            info_text,
        } = settings;

        let store = Arc::new(BookingStore::new(generator.generate(clock.now())));
        let sessions = Arc::new(Sessions::new());
        info!(
            "Booking assistant ready with {} slots in {}",
            store.available_slots().len(),
            generator.time_zone()
        );

        let cancellation = CancellationFlow::new(
            Arc::clone(&store),
            Arc::clone(&sessions),
            Arc::clone(&calendar),
            calendar_id.clone(),
        );
        let booking = BookingFlow::new(
            Arc::clone(&store),
            Arc::clone(&sessions),
            generator,
            clock,
            calendar,
            calendar_id,
            notifier,
        );

        Self {
            store,
            sessions,
            booking,
            cancellation,
            menu: MenuController::new(info_text),
        }
    }

    pub fn store(&self) -> Arc<BookingStore> {
        Arc::clone(&self.store)
    }

    pub fn sessions(&self) -> &Sessions {
        &self.sessions
    }

    pub async fn handle(&self, user: &ChatUser, action: Action) -> Screen {
        debug!("User {} triggered '{}'", user.id, action);
        match action {
            Action::Start => self.menu.main_menu(),
            Action::Browse => self.booking.browse(),
            Action::Refresh => self.booking.refresh(),
            Action::Select(slot) => self.booking.select(user, slot),
            Action::ConfirmBooking => self.booking.confirm(user).await,
            Action::MyBookings => self.cancellation.list(user),
            Action::SelectCancel(slot) => self.cancellation.select(user, slot),
            Action::ExecuteCancel => self.cancellation.execute(user).await,
            Action::Info => self.menu.info(),
        }
    }

    /// Decodes raw button data; unknown data falls back to the main menu.
    pub async fn handle_data(&self, user: &ChatUser, data: &str) -> Screen {
        match Action::parse(data) {
            Ok(action) => self.handle(user, action).await,
            Err(e) => {
                warn!("User {} sent undecodable data '{}': {}", user.id, data, e);
                self.menu.unknown_action()
            }
        }
    }
}
