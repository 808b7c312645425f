// --- File: crates/slotbot_booking/src/testutils.rs ---
//! In-memory stand-ins for the calendar, the webhook and the clock.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use slotbot_common::services::{
    BookingNotification, BoxFuture, CalendarEvent, CalendarEventResult, CalendarService,
    NotificationResult, NotificationService,
};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tokio::sync::mpsc;

use crate::assistant::{AssistantSettings, BookingAssistant};
use crate::slot::{Clock, Slot, SlotGenerator};

pub const OMSK: Tz = chrono_tz::Asia::Omsk;

#[derive(Error, Debug)]
#[error("{0}")]
pub struct FakeError(pub String);

pub struct FixedClock(Mutex<DateTime<Utc>>);

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.0.lock().unwrap() = now;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap()
    }
}

/// 2024-06-10 at `hour`:00 Asia/Omsk, as UTC.
pub fn omsk(day: u32, hour: u32) -> DateTime<Utc> {
    OMSK.with_ymd_and_hms(2024, 6, day, hour, 0, 0)
        .single()
        .unwrap()
        .with_timezone(&Utc)
}

/// A slot on June `day`, 2024 at `hour`:00 local time.
pub fn slot(day: u32, hour: u32) -> Slot {
    Slot::new(
        NaiveDate::from_ymd_opt(2024, 6, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap(),
    )
}

#[derive(Default)]
pub struct FakeCalendar {
    pub created: Mutex<Vec<CalendarEvent>>,
    pub deleted: Mutex<Vec<String>>,
    pub fail_create: AtomicBool,
    pub fail_delete: AtomicBool,
    pub omit_event_id: AtomicBool,
    next_id: AtomicUsize,
}

impl FakeCalendar {
    pub fn created_count(&self) -> usize {
        self.created.lock().unwrap().len()
    }

    pub fn deleted_ids(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }
}

impl CalendarService for FakeCalendar {
    type Error = FakeError;

    fn create_event(
        &self,
        _calendar_id: &str,
        event: CalendarEvent,
    ) -> BoxFuture<'_, CalendarEventResult, Self::Error> {
        Box::pin(async move {
            // Lets a concurrently polled confirm run while this one is in flight.
            tokio::task::yield_now().await;
            if self.fail_create.load(Ordering::SeqCst) {
                return Err(FakeError("calendar unavailable".to_string()));
            }
            self.created.lock().unwrap().push(event);
            let event_id = if self.omit_event_id.load(Ordering::SeqCst) {
                None
            } else {
                Some(format!("evt-{}", self.next_id.fetch_add(1, Ordering::SeqCst)))
            };
            Ok(CalendarEventResult {
                event_id,
                status: "confirmed".to_string(),
            })
        })
    }

    fn delete_event(&self, _calendar_id: &str, event_id: &str) -> BoxFuture<'_, (), Self::Error> {
        let event_id = event_id.to_string();
        Box::pin(async move {
            if self.fail_delete.load(Ordering::SeqCst) {
                return Err(FakeError("delete rejected".to_string()));
            }
            self.deleted.lock().unwrap().push(event_id);
            Ok(())
        })
    }
}

pub struct FakeNotifier {
    sender: mpsc::UnboundedSender<BookingNotification>,
    fail: bool,
}

impl FakeNotifier {
    pub fn new(fail: bool) -> (Self, mpsc::UnboundedReceiver<BookingNotification>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender, fail }, receiver)
    }
}

impl NotificationService for FakeNotifier {
    type Error = FakeError;

    fn notify_booking(
        &self,
        notification: BookingNotification,
    ) -> BoxFuture<'_, NotificationResult, Self::Error> {
        Box::pin(async move {
            let _ = self.sender.send(notification);
            if self.fail {
                Err(FakeError("webhook down".to_string()))
            } else {
                Ok(NotificationResult { status: 200 })
            }
        })
    }
}

pub struct Harness {
    pub assistant: BookingAssistant<FakeCalendar, FakeNotifier>,
    pub calendar: Arc<FakeCalendar>,
    pub clock: Arc<FixedClock>,
    pub notifications: mpsc::UnboundedReceiver<BookingNotification>,
}

/// Assistant at 2024-06-10 09:00 Omsk with the default window (5 days, 10-18).
pub fn harness() -> Harness {
    harness_with(false)
}

pub fn harness_with(failing_webhook: bool) -> Harness {
    let calendar = Arc::new(FakeCalendar::default());
    let clock = Arc::new(FixedClock::new(omsk(10, 9)));
    let (notifier, notifications) = FakeNotifier::new(failing_webhook);
    let settings = AssistantSettings {
        generator: SlotGenerator::new(OMSK, 5, 10, 18),
        calendar_id: "primary".to_string(),
        info_text: "Nail studio, Lenina 1".to_string(),
    };
    let assistant = BookingAssistant::new(
        settings,
        Arc::clone(&calendar),
        Some(Arc::new(notifier)),
        clock.clone(),
    );
    Harness {
        assistant,
        calendar,
        clock,
        notifications,
    }
}
