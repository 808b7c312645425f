// --- File: crates/slotbot_telegram/src/routes.rs ---
use slotbot_booking::BookingAssistant;
use slotbot_common::services::{CalendarService, NotificationService};
use std::sync::Arc;
use teloxide::dispatching::{HandlerExt, UpdateFilterExt, UpdateHandler};
use teloxide::error_handlers::LoggingErrorHandler;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use tracing::{debug, info, warn};

use crate::commands::Command;
use crate::handlers::{callback_handler, command_handler, HandlerError};

/// Update routing: slash commands and button presses.
pub fn schema<C, N>() -> UpdateHandler<HandlerError>
where
    C: CalendarService + 'static,
    N: NotificationService + 'static,
{
    dptree::entry()
        .branch(
            Update::filter_message()
                .filter_command::<Command>()
                .endpoint(command_handler::<C, N>),
        )
        .branch(Update::filter_callback_query().endpoint(callback_handler::<C, N>))
}

/// Long-polls Telegram until Ctrl-C.
pub async fn run<C, N>(token: String, assistant: Arc<BookingAssistant<C, N>>)
where
    C: CalendarService + 'static,
    N: NotificationService + 'static,
{
    let bot = Bot::new(token);

    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        warn!("Could not register bot commands: {}", e);
    }

    info!("Starting Telegram dispatcher");
    Dispatcher::builder(bot, schema::<C, N>())
        .dependencies(dptree::deps![assistant])
        .default_handler(|update| async move {
            debug!("Unhandled update {:?}", update.id);
        })
        .error_handler(LoggingErrorHandler::with_custom_text(
            "An error has occurred in the dispatcher",
        ))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
    info!("Telegram dispatcher stopped");
}
