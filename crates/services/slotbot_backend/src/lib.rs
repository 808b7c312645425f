// --- File: crates/services/slotbot_backend/src/lib.rs ---
pub mod app_state;
pub mod service_factory;
pub mod status;
