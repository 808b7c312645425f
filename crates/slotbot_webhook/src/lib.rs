// --- File: crates/slotbot_webhook/src/lib.rs ---
//! Posts a JSON notification to an external webhook (e.g. an n8n workflow)
//! whenever a booking is confirmed.

use reqwest::Client;
use slotbot_common::services::{
    BookingNotification, BoxFuture, NotificationResult, NotificationService,
};
use slotbot_config::WebhookConfig;
use thiserror::Error;
use tracing::{debug, info};

const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Error, Debug)]
pub enum WebhookError {
    #[error("Webhook request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Webhook answered {status}: {body}")]
    Status { status: u16, body: String },
}

#[derive(Clone)]
pub struct WebhookNotifier {
    url: String,
    client: Client,
}

impl WebhookNotifier {
    pub fn new(url: impl Into<String>, client: Client) -> Self {
        Self {
            url: url.into(),
            client,
        }
    }

    /// Builds a notifier from config, or `None` when no URL is configured.
    pub fn from_config(config: &WebhookConfig) -> Result<Option<Self>, WebhookError> {
        let Some(url) = config.url.as_deref().filter(|u| !u.trim().is_empty()) else {
            info!("Webhook URL not set; booking notifications are disabled");
            return Ok(None);
        };
        let timeout = config.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        let client = slotbot_common::create_client(timeout)?;
        Ok(Some(Self::new(url, client)))
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl NotificationService for WebhookNotifier {
    type Error = WebhookError;

    fn notify_booking(
        &self,
        notification: BookingNotification,
    ) -> BoxFuture<'_, NotificationResult, Self::Error> {
        Box::pin(async move {
            debug!(
                "Posting booking of {} by user {} to webhook",
                notification.slot, notification.user_id
            );
            let response = self
                .client
                .post(&self.url)
                .json(&notification)
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(WebhookError::Status {
                    status: status.as_u16(),
                    body,
                });
            }
            Ok(NotificationResult {
                status: status.as_u16(),
            })
        })
    }
}
