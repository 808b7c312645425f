// --- File: crates/services/slotbot_backend/src/app_state.rs ---
use slotbot_booking::{BookingStore, Clock, SlotGenerator};
use std::sync::Arc;

/// State shared by the status routes.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<BookingStore>,
    pub generator: SlotGenerator,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(store: Arc<BookingStore>, generator: SlotGenerator, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            generator,
            clock,
        }
    }
}
