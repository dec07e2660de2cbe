//! /start command plugin.
//!
//! Sends the welcome message with the main menu. Stateless: every /start gets
//! the same reply.

use teloxide::prelude::*;
use tracing::debug;

use crate::bot::dispatcher::AppState;
use crate::bot::outbound::Outbox;
use crate::templates::{self, Profile};

/// Send the welcome message to a chat.
pub async fn send_start(outbox: &dyn Outbox, profile: &Profile, chat_id: ChatId) -> anyhow::Result<()> {
    debug!(chat_id = chat_id.0, "sending start menu");
    outbox.send(chat_id, templates::start_message(profile)).await
}

/// Handle the /start command.
pub async fn start_handler(msg: Message, state: AppState) -> anyhow::Result<()> {
    send_start(state.outbox.as_ref(), &state.profile, msg.chat.id).await
}
