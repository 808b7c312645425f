// --- File: crates/services/slotbot_backend/src/status.rs ---
//! Read-only HTTP endpoints for monitoring the bot.

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use slotbot_booking::Slot;
use slotbot_common::SlotbotError;
use slotbot_config::ServerConfig;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::app_state::AppState;

#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    pub slots: Vec<Slot>,
    pub time_zone: String,
}

async fn health() -> &'static str {
    "OK"
}

/// Pool snapshot without slots that already started.
async fn availability(State(state): State<AppState>) -> Json<AvailabilityResponse> {
    let now = state.generator.local_time(state.clock.now());
    let slots = state
        .store
        .available_slots()
        .into_iter()
        .filter(|slot| slot.start() > now)
        .collect();
    Json(AvailabilityResponse {
        slots,
        time_zone: state.generator.time_zone().name().to_string(),
    })
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/availability", get(availability))
        .with_state(state)
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .nest("/api", routes(state))
        .layer(TraceLayer::new_for_http())
}

pub async fn serve(config: &ServerConfig, state: AppState) -> Result<(), SlotbotError> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Status API listening on http://{}/api", addr);
    axum::serve(listener, app(state).into_make_service()).await?;
    Ok(())
}
