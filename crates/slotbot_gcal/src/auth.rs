// File: crates/slotbot_gcal/src/auth.rs
use crate::service::GcalServiceError;
use google_calendar3::{
    hyper_rustls::{self, HttpsConnectorBuilder},
    hyper_util::client::legacy::connect::HttpConnector,
    hyper_util::client::legacy::Client,
    yup_oauth2::{
        parse_service_account_key, read_service_account_key, ServiceAccountAuthenticator,
        ServiceAccountKey,
    },
    CalendarHub,
};
use slotbot_config::GcalConfig;
use std::path::Path;
use tracing::info;

// Type aliases for clarity
type Connector = hyper_rustls::HttpsConnector<HttpConnector>;

pub type HubType = CalendarHub<Connector>;

/// Reads the service account key, preferring inline JSON over a key file.
pub async fn load_service_account_key(
    config: &GcalConfig,
) -> Result<ServiceAccountKey, GcalServiceError> {
    if let Some(json) = config.service_account_json.as_deref() {
        return parse_service_account_key(json).map_err(|e| {
            GcalServiceError::Auth(format!("Invalid service account JSON: {}", e))
        });
    }

    let key_path = config
        .key_path
        .as_deref()
        .ok_or_else(|| GcalServiceError::Auth("Missing key_path in GcalConfig".to_string()))?;

    read_service_account_key(Path::new(key_path))
        .await
        .map_err(|e| GcalServiceError::Auth(format!("Cannot read {}: {}", key_path, e)))
}

pub async fn create_calendar_hub(config: &GcalConfig) -> Result<HubType, GcalServiceError> {
    let sa_key = load_service_account_key(config).await?;
    info!(
        "Authenticating against Google Calendar as {}",
        sa_key.client_email
    );

    let auth = ServiceAccountAuthenticator::builder(sa_key)
        .build()
        .await
        .map_err(|e| GcalServiceError::Auth(e.to_string()))?;

    let https = HttpsConnectorBuilder::new()
        .with_native_roots()
        .map_err(|e| GcalServiceError::Auth(format!("No native TLS roots: {}", e)))?
        .https_or_http()
        .enable_http1()
        .build();

    let client = Client::builder(hyper_util::rt::TokioExecutor::new()).build(https);

    Ok(CalendarHub::new(client, auth))
}
