// --- File: crates/slotbot_common/src/http.rs ---
pub mod client;
