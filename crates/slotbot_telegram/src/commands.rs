// --- File: crates/slotbot_telegram/src/commands.rs ---
use slotbot_booking::Action;
use teloxide::utils::command::BotCommands;

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "These commands are supported:")]
pub enum Command {
    #[command(description = "open the main menu")]
    Start,
    #[command(description = "book an appointment")]
    Booking,
    #[command(description = "show your bookings")]
    MyBooking,
    #[command(description = "cancel a booking")]
    Cancel,
    #[command(description = "about the master")]
    Info,
}

impl Command {
    /// The screen a command opens.
    pub fn action(&self) -> Action {
        match self {
            Command::Start => Action::Start,
            Command::Booking => Action::Browse,
            Command::MyBooking | Command::Cancel => Action::MyBookings,
            Command::Info => Action::Info,
        }
    }
}
