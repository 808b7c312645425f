// File: services/slotbot_backend/src/main.rs
use slotbot_backend::{app_state::AppState, service_factory, status};
use slotbot_booking::{Clock, SystemClock};
use slotbot_common::{config_error, logging, SlotbotError};
use slotbot_config::{env_vars, load_config_with_report};
use std::sync::Arc;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<(), SlotbotError> {
    let loaded = load_config_with_report()?;
    let config = loaded.config;
    let _log_guard = logging::init_from_config(&config.logging);
    for path in &loaded.unresolved_secrets {
        warn!(
            "Env var {} not found for secret_from_env at {}",
            env_vars::secret_path_to_env_var(path),
            path
        );
    }

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(e.into());
    }

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let settings = service_factory::assistant_settings(&config)?;
    let generator = settings.generator.clone();
    let assistant = service_factory::build_assistant(&config, settings, Arc::clone(&clock)).await?;

    match config.server.clone() {
        Some(server) => {
            let state = AppState::new(assistant.store(), generator, clock);
            tokio::spawn(async move {
                if let Err(e) = status::serve(&server, state).await {
                    error!("Status API stopped: {}", e);
                }
            });
        }
        None => info!("No [server] section, status API disabled"),
    }

    let token = config
        .telegram
        .bot_token
        .clone()
        .ok_or_else(|| config_error("telegram.bot_token is not set"))?;
    slotbot_telegram::run(token, assistant).await;
    Ok(())
}
