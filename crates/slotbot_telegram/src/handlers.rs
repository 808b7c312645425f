// --- File: crates/slotbot_telegram/src/handlers.rs ---
use slotbot_booking::{BookingAssistant, ChatUser};
use slotbot_common::services::{CalendarService, NotificationService};
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::User;
use teloxide::{ApiError, RequestError};
use tracing::{debug, warn};

use crate::commands::Command;
use crate::render;

pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;
pub type HandlerResult = Result<(), HandlerError>;

fn chat_user(user: &User) -> ChatUser {
    ChatUser::new(user.id.0, user.first_name.clone())
}

/// Commands always answer with a new message.
pub async fn command_handler<C, N>(
    bot: Bot,
    msg: Message,
    cmd: Command,
    assistant: Arc<BookingAssistant<C, N>>,
) -> HandlerResult
where
    C: CalendarService + 'static,
    N: NotificationService + 'static,
{
    let Some(user) = msg.from.as_ref().map(chat_user) else {
        debug!("Ignoring {:?} without a sender", cmd);
        return Ok(());
    };
    let screen = assistant.handle(&user, cmd.action()).await;
    bot.send_message(msg.chat.id, screen.text.clone())
        .reply_markup(render::keyboard(&screen))
        .await?;
    Ok(())
}

/// Button presses are acknowledged first, then the pressed message is edited in place.
pub async fn callback_handler<C, N>(
    bot: Bot,
    q: CallbackQuery,
    assistant: Arc<BookingAssistant<C, N>>,
) -> HandlerResult
where
    C: CalendarService + 'static,
    N: NotificationService + 'static,
{
    bot.answer_callback_query(q.id.clone()).await?;

    let Some(data) = q.data.as_deref() else {
        debug!("Callback query {} carries no data", q.id);
        return Ok(());
    };
    let user = chat_user(&q.from);
    let screen = assistant.handle_data(&user, data).await;
    let keyboard = render::keyboard(&screen);

    let Some(message) = q.message.as_ref() else {
        bot.send_message(ChatId::from(q.from.id), screen.text)
            .reply_markup(keyboard)
            .await?;
        return Ok(());
    };

    let chat_id = message.chat().id;
    match bot
        .edit_message_text(chat_id, message.id(), screen.text.clone())
        .reply_markup(keyboard.clone())
        .await
    {
        Ok(_) => {}
        Err(RequestError::Api(ApiError::MessageNotModified)) => {
            debug!("Screen unchanged for user {}", user.id);
        }
        Err(e) => {
            warn!("Editing message failed ({}), sending a new one", e);
            bot.send_message(chat_id, screen.text)
                .reply_markup(keyboard)
                .await?;
        }
    }
    Ok(())
}
