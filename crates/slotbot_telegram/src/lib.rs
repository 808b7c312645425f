// --- File: crates/slotbot_telegram/src/lib.rs ---
//! Telegram front end: maps commands and button presses onto the booking
//! assistant and renders its screens as inline keyboards.

pub mod commands;
pub mod handlers;
pub mod render;
pub mod routes;

pub use commands::Command;
pub use routes::{run, schema};

