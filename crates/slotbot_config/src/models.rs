// --- File: crates/slotbot_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
// Only the status endpoint listens here; the bot itself uses long polling.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

// --- Telegram Config ---
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct TelegramConfig {
    pub bot_token: Option<String>, // Mandatory, legacy env var: TELEGRAM_BOT_TOKEN
}

// --- Google Calendar Config ---
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct GcalConfig {
    pub calendar_id: Option<String>, // Mandatory, legacy env var: GOOGLE_CALENDAR_ID
    /// Path to a service account key file.
    pub key_path: Option<String>,
    /// Inline service account key JSON, legacy env var: GOOGLE_SERVICE_ACCOUNT.
    /// Takes precedence over `key_path`.
    pub service_account_json: Option<String>,
}

// --- Webhook Config ---
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct WebhookConfig {
    pub url: Option<String>, // Optional, legacy env var: N8N_WEBHOOK_URL
    pub timeout_secs: Option<u64>,
}

// --- Slot Window Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct SlotsConfig {
    /// IANA zone all slots and calendar events live in.
    pub time_zone: String,
    /// Number of calendar days offered, today included.
    pub days_ahead: u32,
    /// First bookable start hour (inclusive).
    pub open_hour: u32,
    /// Hour at which the working day ends (exclusive for start hours).
    pub close_hour: u32,
    pub duration_minutes: i64,
}

impl Default for SlotsConfig {
    fn default() -> Self {
        Self {
            time_zone: "Asia/Omsk".to_string(),
            days_ahead: 5,
            open_hour: 10,
            close_hour: 18,
            duration_minutes: 60,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct InfoConfig {
    pub text: String,
}

impl Default for InfoConfig {
    fn default() -> Self {
        Self {
            text: "🌸 Beauty master\n📍 Omsk\n📞 +7 (999) 999-99-99\n🕒 Working hours: 10:00 - 18:00\n🎁 Offers and discounts in our group".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// When set, logs are additionally written to a daily rolling file here.
    pub directory: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}

// --- Unified App Configuration ---
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: Option<ServerConfig>,
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub gcal: GcalConfig,
    #[serde(default)]
    pub webhook: WebhookConfig,
    #[serde(default)]
    pub slots: SlotsConfig,
    #[serde(default)]
    pub info: InfoConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}
