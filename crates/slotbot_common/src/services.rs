// --- File: crates/slotbot_common/src/services.rs ---
//! Service abstractions for external services.
//!
//! The booking core only talks to the outside world through these traits, so
//! the flows can be exercised against in-memory fakes.

use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// Calendar operations used by the booking flows.
///
/// Only event creation and deletion; availability is owned by the bot, not
/// read back from the calendar.
pub trait CalendarService: Send + Sync {
    /// Error type returned by calendar service operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Create a calendar event.
    fn create_event(
        &self,
        calendar_id: &str,
        event: CalendarEvent,
    ) -> BoxFuture<'_, CalendarEventResult, Self::Error>;

    /// Delete a calendar event.
    fn delete_event(&self, calendar_id: &str, event_id: &str) -> BoxFuture<'_, (), Self::Error>;
}

/// Outbound notification about a completed booking.
pub trait NotificationService: Send + Sync {
    /// Error type returned by notification service operations.
    type Error: std::error::Error + Send + Sync + 'static;

    fn notify_booking(
        &self,
        notification: BookingNotification,
    ) -> BoxFuture<'_, NotificationResult, Self::Error>;
}

/// Data structures for calendar service operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// The summary or title of the event.
    pub summary: String,
    /// RFC 3339 start time, carrying the local offset.
    pub start_time: String,
    /// RFC 3339 end time, carrying the local offset.
    pub end_time: String,
    /// IANA zone name the event is displayed in.
    pub time_zone: String,
}

/// Represents the result of a calendar event operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarEventResult {
    /// The ID of the event.
    pub event_id: Option<String>,
    /// The status of the event.
    pub status: String,
}

/// Payload sent to the booking webhook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingNotification {
    /// Display name of the user who booked.
    pub user: String,
    /// The booked slot in its display form.
    pub slot: String,
    pub user_id: u64,
    pub event_id: String,
}

/// Represents the result of a notification operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationResult {
    /// HTTP status code returned by the receiver.
    pub status: u16,
}
