// --- File: crates/slotbot_config/src/lib.rs ---
use config::{Config, Environment, File};
use once_cell::sync::OnceCell;
use std::env;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

pub mod env_vars;
pub mod models;
pub use models::*;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("Failed to process configuration: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Missing required configuration value: {0}")]
    Missing(&'static str),
    #[error("Invalid configuration value for {field}: {message}")]
    Invalid {
        field: &'static str,
        message: String,
    },
}

/// Configuration together with the `secret_from_env` paths nothing filled.
///
/// The paths are reported by the caller, once logging is set up.
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: AppConfig,
    pub unresolved_secrets: Vec<String>,
}

/// Loads the layered application configuration.
///
/// Unresolved secrets are logged; use [`load_config_with_report`] when no
/// subscriber is installed yet.
pub fn load_config() -> Result<AppConfig, SettingsError> {
    let loaded = load_config_with_report()?;
    for path in &loaded.unresolved_secrets {
        warn!(
            "Env var {} not found for secret_from_env at {}",
            env_vars::secret_path_to_env_var(path),
            path
        );
    }
    Ok(loaded.config)
}

/// Loads the layered application configuration without logging about it.
///
/// Sources, later ones winning: `config/default.*`, `config/<RUN_ENV>.*`,
/// `SLOTBOT__SECTION__KEY` variables. Afterwards `secret_from_env` markers are
/// resolved and unset values are filled from the legacy variable names.
/// The result is not validated; call [`AppConfig::validate`] before use.
pub fn load_config_with_report() -> Result<LoadedConfig, SettingsError> {
    ensure_dotenv_loaded();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let prefix = env_vars::get_config_prefix();
    let config_dir = env::var("CONFIG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config"));

    let default_path = config_dir.join("default");
    let env_path = config_dir.join(&run_env);

    let builder = Config::builder()
        .add_source(File::with_name(&default_path.to_string_lossy()).required(false))
        .add_source(File::with_name(&env_path.to_string_lossy()).required(false))
        .add_source(
            Environment::with_prefix(&prefix)
                .separator(env_vars::CONFIG_SEPARATOR)
                .try_parsing(true),
        );

    let raw_config: AppConfig = builder.build()?.try_deserialize()?;
    resolve_secrets(raw_config)
}

/// Resolves `secret_from_env` markers, then applies the legacy variables.
///
/// A marker path counts as unresolved only if the legacy variables did not
/// fill it either.
pub fn resolve_secrets(config: AppConfig) -> Result<LoadedConfig, SettingsError> {
    let mut json = serde_json::to_value(&config)?;
    let missing = env_vars::inject_env_vars(&mut json);
    let mut config: AppConfig = serde_json::from_value(json)?;
    env_vars::apply_legacy_env(&mut config);

    let resolved = serde_json::to_value(&config)?;
    let unresolved_secrets = missing
        .into_iter()
        .filter(|path| {
            let pointer = format!("/{}", path.replace('.', "/"));
            resolved.pointer(&pointer).map_or(true, |v| v.is_null())
        })
        .collect();

    Ok(LoadedConfig {
        config,
        unresolved_secrets,
    })
}

impl AppConfig {
    /// Checks everything the process cannot start without.
    ///
    /// The webhook URL is optional; without it notifications are disabled.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if is_blank(&self.telegram.bot_token) {
            return Err(SettingsError::Missing("telegram.bot_token"));
        }
        if is_blank(&self.gcal.calendar_id) {
            return Err(SettingsError::Missing("gcal.calendar_id"));
        }
        if is_blank(&self.gcal.service_account_json) && is_blank(&self.gcal.key_path) {
            return Err(SettingsError::Missing(
                "gcal.service_account_json or gcal.key_path",
            ));
        }
        if let Some(json) = self.gcal.service_account_json.as_deref() {
            serde_json::from_str::<serde_json::Value>(json).map_err(|e| {
                SettingsError::Invalid {
                    field: "gcal.service_account_json",
                    message: e.to_string(),
                }
            })?;
        }
        self.slots.validate()
    }
}

impl SlotsConfig {
    pub fn validate(&self) -> Result<(), SettingsError> {
        self.time_zone
            .parse::<chrono_tz::Tz>()
            .map_err(|e| SettingsError::Invalid {
                field: "slots.time_zone",
                message: e.to_string(),
            })?;
        if self.open_hour >= self.close_hour || self.close_hour > 24 {
            return Err(SettingsError::Invalid {
                field: "slots.open_hour",
                message: format!(
                    "working hours {}..{} are not a valid range",
                    self.open_hour, self.close_hour
                ),
            });
        }
        if self.days_ahead == 0 {
            return Err(SettingsError::Invalid {
                field: "slots.days_ahead",
                message: "must be at least 1".to_string(),
            });
        }
        if self.duration_minutes <= 0 {
            return Err(SettingsError::Invalid {
                field: "slots.duration_minutes",
                message: "must be positive".to_string(),
            });
        }
        Ok(())
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Ensures that the dotenv file is loaded into the environment variables.
///
/// The file is `DOTENV_OVERRIDE` if set, else the first command line argument
/// when it starts with `.env`, else `.env`. Loading happens at most once per
/// process; the chosen path is returned.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path_override = env::var("DOTENV_OVERRIDE").ok();
    let dotenv_path_arg = env::args().nth(1).filter(|s| s.starts_with(".env"));

    let dotenv_path = dotenv_path_override
        .or(dotenv_path_arg)
        .unwrap_or_else(|| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> AppConfig {
        AppConfig {
            telegram: TelegramConfig {
                bot_token: Some("123:abc".to_string()),
            },
            gcal: GcalConfig {
                calendar_id: Some("primary".to_string()),
                key_path: None,
                service_account_json: Some(r#"{"type":"service_account"}"#.to_string()),
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_missing_bot_token_is_fatal() {
        let mut config = valid_config();
        config.telegram.bot_token = Some("   ".to_string());
        assert!(matches!(
            config.validate(),
            Err(SettingsError::Missing("telegram.bot_token"))
        ));
    }

    #[test]
    fn test_missing_credentials_is_fatal() {
        let mut config = valid_config();
        config.gcal.service_account_json = None;
        assert!(matches!(config.validate(), Err(SettingsError::Missing(_))));

        config.gcal.key_path = Some("/etc/slotbot/key.json".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_malformed_credentials_json_is_fatal() {
        let mut config = valid_config();
        config.gcal.service_account_json = Some("{not json".to_string());
        assert!(matches!(
            config.validate(),
            Err(SettingsError::Invalid {
                field: "gcal.service_account_json",
                ..
            })
        ));
    }

    #[test]
    fn test_missing_webhook_is_not_fatal() {
        let mut config = valid_config();
        config.webhook.url = None;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_slot_window_validation() {
        let mut slots = SlotsConfig::default();
        assert!(slots.validate().is_ok());

        slots.time_zone = "Mars/Olympus".to_string();
        assert!(slots.validate().is_err());

        slots = SlotsConfig {
            open_hour: 18,
            close_hour: 10,
            ..SlotsConfig::default()
        };
        assert!(slots.validate().is_err());

        slots = SlotsConfig {
            days_ahead: 0,
            ..SlotsConfig::default()
        };
        assert!(slots.validate().is_err());
    }

    #[test]
    fn test_unresolved_secret_is_reported_and_nulled() {
        for name in ["SLOTBOT_SECRET_WEBHOOK_URL", "WEBHOOK_URL", env_vars::LEGACY_WEBHOOK_URL] {
            env::remove_var(name);
        }
        let mut config = valid_config();
        config.webhook.url = Some(env_vars::SECRET_MARKER.to_string());

        let loaded = resolve_secrets(config).unwrap();

        assert_eq!(loaded.unresolved_secrets, vec!["webhook.url".to_string()]);
        assert_eq!(loaded.config.webhook.url, None);
        assert_eq!(loaded.config.telegram.bot_token.as_deref(), Some("123:abc"));
    }

    #[test]
    fn test_secret_filled_by_legacy_variable_is_not_reported() {
        for name in ["SLOTBOT_SECRET_GCAL_CALENDAR_ID", "GCAL_CALENDAR_ID"] {
            env::remove_var(name);
        }
        env::set_var(env_vars::LEGACY_CALENDAR_ID, "studio@group.calendar.google.com");
        let mut config = valid_config();
        config.gcal.calendar_id = Some(env_vars::SECRET_MARKER.to_string());

        let loaded = resolve_secrets(config).unwrap();

        assert!(loaded.unresolved_secrets.is_empty());
        assert_eq!(
            loaded.config.gcal.calendar_id.as_deref(),
            Some("studio@group.calendar.google.com")
        );
    }

    #[test]
    fn test_defaults_match_default_window() {
        let slots = SlotsConfig::default();
        assert_eq!(slots.time_zone, "Asia/Omsk");
        assert_eq!(slots.days_ahead, 5);
        assert_eq!((slots.open_hour, slots.close_hour), (10, 18));
        assert_eq!(slots.duration_minutes, 60);
    }
}
