// --- File: crates/services/slotbot_backend/src/service_factory.rs ---
//! Builds the production assistant out of configuration.

use slotbot_booking::{AssistantSettings, BookingAssistant, Clock, SlotGenerator};
use slotbot_common::{config_error, external_service_error, Context, SlotbotError};
use slotbot_config::AppConfig;
use slotbot_gcal::{create_calendar_hub, GoogleCalendarService};
use slotbot_webhook::WebhookNotifier;
use std::sync::Arc;
use tracing::info;

pub type Assistant = BookingAssistant<GoogleCalendarService, WebhookNotifier>;

pub fn assistant_settings(config: &AppConfig) -> Result<AssistantSettings, SlotbotError> {
    let generator = SlotGenerator::from_config(&config.slots)?;
    let calendar_id = config
        .gcal
        .calendar_id
        .clone()
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| config_error("gcal.calendar_id is not set"))?;
    Ok(AssistantSettings {
        generator,
        calendar_id,
        info_text: config.info.text.clone(),
    })
}

pub async fn build_assistant(
    config: &AppConfig,
    settings: AssistantSettings,
    clock: Arc<dyn Clock>,
) -> Result<Arc<Assistant>, SlotbotError> {
    let hub = create_calendar_hub(&config.gcal)
        .await
        .map_err(|e| external_service_error("google-calendar", e))?;
    let calendar = Arc::new(GoogleCalendarService::new(Arc::new(hub)));

    let notifier =
        WebhookNotifier::from_config(&config.webhook).context("building webhook client")?;
    if let Some(notifier) = &notifier {
        info!("Booking notifications go to {}", notifier.url());
    }

    Ok(Arc::new(BookingAssistant::new(
        settings,
        calendar,
        notifier.map(Arc::new),
        clock,
    )))
}
