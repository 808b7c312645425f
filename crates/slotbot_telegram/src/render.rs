// --- File: crates/slotbot_telegram/src/render.rs ---
use slotbot_booking::Screen;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

/// Turns screen buttons into an inline keyboard, one keyboard row per screen row.
pub fn keyboard(screen: &Screen) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(screen.rows.iter().map(|row| {
        row.iter()
            .map(|button| InlineKeyboardButton::callback(button.label.clone(), button.action.encode()))
    }))
}
