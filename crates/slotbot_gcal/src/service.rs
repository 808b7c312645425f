// --- File: crates/slotbot_gcal/src/service.rs ---
//! Google Calendar service implementation.
//!
//! This module provides an implementation of the CalendarService trait for Google Calendar.

use chrono::{DateTime, Utc};
use google_calendar3::api::{Event, EventDateTime};
use slotbot_common::services::{BoxFuture, CalendarEvent, CalendarEventResult, CalendarService};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use crate::auth::HubType;

/// Errors that can occur when interacting with Google Calendar.
#[derive(Error, Debug)]
pub enum GcalServiceError {
    #[error("Google API Error: {0}")]
    ApiError(#[from] google_calendar3::Error),
    #[error("Google authentication error: {0}")]
    Auth(String),
    #[error("Failed to parse time: {0}")]
    TimeParseError(String),
    #[error("Calculation error: {0}")]
    CalculationError(String),
}

/// Google Calendar service implementation.
pub struct GoogleCalendarService {
    calendar_hub: Arc<HubType>,
}

impl GoogleCalendarService {
    /// Create a new Google Calendar service.
    pub fn new(calendar_hub: Arc<HubType>) -> Self {
        Self { calendar_hub }
    }
}

/// Builds the Google event body for a booking.
///
/// Times are sent as instants with the configured zone name attached so the
/// calendar shows them in local time.
pub(crate) fn to_google_event(event: &CalendarEvent) -> Result<Event, GcalServiceError> {
    let start_dt = DateTime::parse_from_rfc3339(&event.start_time)
        .map_err(|e| GcalServiceError::TimeParseError(format!("Invalid start_time: {}", e)))?
        .with_timezone(&Utc);
    let end_dt = DateTime::parse_from_rfc3339(&event.end_time)
        .map_err(|e| GcalServiceError::TimeParseError(format!("Invalid end_time: {}", e)))?
        .with_timezone(&Utc);

    if end_dt <= start_dt {
        return Err(GcalServiceError::CalculationError(
            "End time must be after start time".to_string(),
        ));
    }

    Ok(Event {
        summary: Some(event.summary.clone()),
        start: Some(EventDateTime {
            date_time: Some(start_dt),
            time_zone: Some(event.time_zone.clone()),
            ..Default::default()
        }),
        end: Some(EventDateTime {
            date_time: Some(end_dt),
            time_zone: Some(event.time_zone.clone()),
            ..Default::default()
        }),
        ..Default::default()
    })
}

/// Google answers 404 for unknown and 410 for already deleted events.
///
/// Only the HTTP status decides; transport and client-side errors never count.
pub(crate) fn is_gone(error: &google_calendar3::Error) -> bool {
    match error {
        google_calendar3::Error::Failure(response) => {
            is_gone_status(response.status().as_u16())
        }
        google_calendar3::Error::BadRequest(body) => body
            .pointer("/error/code")
            .and_then(|code| code.as_u64())
            .and_then(|code| u16::try_from(code).ok())
            .is_some_and(is_gone_status),
        _ => false,
    }
}

pub(crate) fn is_gone_status(status: u16) -> bool {
    status == 404 || status == 410
}

impl CalendarService for GoogleCalendarService {
    type Error = GcalServiceError;

    /// Creates a new event and returns its id.
    ///
    /// No free/busy check is made: which slots are bookable is decided by the
    /// bot's own availability pool.
    fn create_event(
        &self,
        calendar_id: &str,
        event: CalendarEvent,
    ) -> BoxFuture<'_, CalendarEventResult, Self::Error> {
        let calendar_id = calendar_id.to_string();
        let calendar_hub = self.calendar_hub.clone();

        Box::pin(async move {
            let new_event = to_google_event(&event)?;

            let (_response, created_event) = calendar_hub
                .events()
                .insert(new_event, &calendar_id)
                .doit()
                .await?;

            info!(
                "Created calendar event {:?} for '{}' at {}",
                created_event.id, event.summary, event.start_time
            );
            Ok(CalendarEventResult {
                event_id: created_event.id,
                status: created_event
                    .status
                    .unwrap_or_else(|| "confirmed".to_string()),
            })
        })
    }

    /// Deletes an event.
    ///
    /// An event that no longer exists counts as deleted, so a booking whose
    /// event was removed by hand can still be cancelled in the bot.
    fn delete_event(&self, calendar_id: &str, event_id: &str) -> BoxFuture<'_, (), Self::Error> {
        let calendar_id = calendar_id.to_string();
        let event_id = event_id.to_string();
        let calendar_hub = self.calendar_hub.clone();

        Box::pin(async move {
            match calendar_hub
                .events()
                .delete(&calendar_id, &event_id)
                .doit()
                .await
            {
                Ok(_) => {
                    info!("Deleted calendar event {}", event_id);
                    Ok(())
                }
                Err(e) if is_gone(&e) => {
                    warn!("Calendar event {} was already gone: {}", event_id, e);
                    Ok(())
                }
                Err(e) => Err(GcalServiceError::ApiError(e)),
            }
        })
    }
}
