// --- File: crates/slotbot_common/src/lib.rs ---

pub mod error; // Error handling
pub mod http; // Shared outbound HTTP client
pub mod logging; // Logging utilities
pub mod services; // Service abstractions

// Re-export error types and utilities for easier access
pub use error::{config_error, external_service_error, Context, SlotbotError};

pub use http::client::create_client;

pub use logging::init_from_config;
