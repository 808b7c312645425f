// --- File: crates/slotbot_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The process-level error type.
///
/// Feature crates keep their own error enums and convert into this one where
/// an error has to cross into the backend binary.
#[derive(Error, Debug)]
pub enum SlotbotError {
    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error occurred during validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error occurred during external service call
    #[error("External service error: {service_name} - {message}")]
    ExternalServiceError {
        service_name: String,
        message: String,
    },

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// A trait for adding context to errors.
pub trait Context<T, E> {
    /// Adds context to an error.
    fn context<C>(self, context: C) -> Result<T, SlotbotError>
    where
        C: fmt::Display + Send + Sync + 'static;
}

impl<T, E: std::error::Error + Send + Sync + 'static> Context<T, E> for Result<T, E> {
    fn context<C>(self, context: C) -> Result<T, SlotbotError>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|error| SlotbotError::InternalError(format!("{}: {}", context, error)))
    }
}

// Common error conversions
impl From<std::io::Error> for SlotbotError {
    fn from(err: std::io::Error) -> Self {
        SlotbotError::InternalError(err.to_string())
    }
}

impl From<slotbot_config::SettingsError> for SlotbotError {
    fn from(err: slotbot_config::SettingsError) -> Self {
        SlotbotError::ConfigError(err.to_string())
    }
}

// Utility functions for error handling
pub fn config_error<T: fmt::Display>(message: T) -> SlotbotError {
    SlotbotError::ConfigError(message.to_string())
}

pub fn external_service_error<T: fmt::Display>(service_name: &str, message: T) -> SlotbotError {
    SlotbotError::ExternalServiceError {
        service_name: service_name.to_string(),
        message: message.to_string(),
    }
}
