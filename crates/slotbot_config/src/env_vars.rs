//! Environment variable handling for the Slotbot application.
//!
//! Configuration values can come from three places besides the config files:
//! the prefixed variables read by the `config` crate (`SLOTBOT__SECTION__KEY`),
//! `secret_from_env` markers resolved here, and the plain variable names the
//! bot was historically deployed with.

use std::env;

use crate::models::AppConfig;

/// The prefix for configuration environment variables
pub const DEFAULT_PREFIX: &str = "SLOTBOT";

/// The prefix for secret environment variables
pub const SECRET_PREFIX: &str = "SLOTBOT_SECRET";

/// The separator for configuration environment variables
pub const CONFIG_SEPARATOR: &str = "__";

/// The separator for secret environment variables
pub const SECRET_SEPARATOR: &str = "_";

/// Marker value that asks for a secret to be read from the environment.
pub const SECRET_MARKER: &str = "secret_from_env";

pub const LEGACY_BOT_TOKEN: &str = "TELEGRAM_BOT_TOKEN";
pub const LEGACY_SERVICE_ACCOUNT: &str = "GOOGLE_SERVICE_ACCOUNT";
pub const LEGACY_CALENDAR_ID: &str = "GOOGLE_CALENDAR_ID";
pub const LEGACY_WEBHOOK_URL: &str = "N8N_WEBHOOK_URL";

/// Get the prefix for configuration environment variables
pub fn get_config_prefix() -> String {
    env::var("PREFIX").unwrap_or_else(|_| DEFAULT_PREFIX.to_string())
}

/// Convert a secret path to an environment variable name
///
/// `"telegram.bot_token"` becomes `"SLOTBOT_SECRET_TELEGRAM_BOT_TOKEN"`.
pub fn secret_path_to_env_var(path: &str) -> String {
    let path = path.replace('.', SECRET_SEPARATOR);
    format!("{}{}{}", SECRET_PREFIX, SECRET_SEPARATOR, path).to_uppercase()
}

/// Convert a secret path to the unprefixed variable name
///
/// `"telegram.bot_token"` becomes `"TELEGRAM_BOT_TOKEN"`.
pub fn legacy_secret_path_to_env_var(path: &str) -> String {
    path.replace('.', SECRET_SEPARATOR).to_uppercase()
}

/// Get an environment variable for a secret path, trying the prefixed name first.
pub fn get_secret_env_var(path: &str) -> Option<String> {
    env::var(secret_path_to_env_var(path))
        .or_else(|_| env::var(legacy_secret_path_to_env_var(path)))
        .ok()
        .filter(|value| !value.trim().is_empty())
}

/// Recursively replaces `secret_from_env` markers with environment values.
///
/// Returns the paths whose variable could not be found; those values are set to
/// null so that validation reports them as missing instead of using the marker.
pub fn inject_env_vars(value: &mut serde_json::Value) -> Vec<String> {
    use serde_json::Value;

    fn walk(path: &mut Vec<String>, obj: &mut Value, missing: &mut Vec<String>) {
        match obj {
            Value::Object(map) => {
                for (k, v) in map.iter_mut() {
                    path.push(k.to_string());
                    walk(path, v, missing);
                    path.pop();
                }
            }
            Value::String(s) if s == SECRET_MARKER => {
                let path_str = path.join(".");
                match get_secret_env_var(&path_str) {
                    Some(env_val) => *s = env_val,
                    None => {
                        missing.push(path_str);
                        *obj = Value::Null;
                    }
                }
            }
            _ => {}
        }
    }

    let mut missing = Vec::new();
    walk(&mut Vec::new(), value, &mut missing);
    missing
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

/// Fills values that are still unset from the historical variable names.
pub fn apply_legacy_env(config: &mut AppConfig) {
    if config.telegram.bot_token.is_none() {
        config.telegram.bot_token = non_empty_var(LEGACY_BOT_TOKEN);
    }
    if config.gcal.service_account_json.is_none() {
        config.gcal.service_account_json = non_empty_var(LEGACY_SERVICE_ACCOUNT);
    }
    if config.gcal.calendar_id.is_none() {
        config.gcal.calendar_id = non_empty_var(LEGACY_CALENDAR_ID);
    }
    if config.webhook.url.is_none() {
        config.webhook.url = non_empty_var(LEGACY_WEBHOOK_URL);
    }
}
