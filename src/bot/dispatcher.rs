//! Message dispatcher setup.
//!
//! Builds the dispatcher with the command handler and the callback handler.

use std::sync::Arc;

use teloxide::dispatching::{DefaultKey, UpdateHandler};
use teloxide::prelude::*;

use super::outbound::Outbox;
use crate::plugins;
use crate::templates::Profile;

/// Dispatcher over the plain Telegram bot.
pub type BotDispatcher = Dispatcher<Bot, anyhow::Error, DefaultKey>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Identity rendered into every reply.
    pub profile: Arc<Profile>,

    /// Where handlers send replies and callback answers.
    pub outbox: Arc<dyn Outbox>,
}

impl AppState {
    pub fn new(profile: Profile, outbox: Arc<dyn Outbox>) -> Self {
        Self { profile: Arc::new(profile), outbox }
    }
}

/// Build the dispatcher with all handlers.
pub fn build_dispatcher(bot: Bot, profile: Profile) -> BotDispatcher {
    let state = AppState::new(profile, Arc::new(bot.clone()));

    Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![state])
        .enable_ctrlc_handler()
        .build()
}

/// Build the handler schema.
fn schema() -> UpdateHandler<anyhow::Error> {
    let message_handler = Update::filter_message().branch(plugins::command_handler());

    dptree::entry()
        .branch(message_handler)
        .branch(plugins::callback_handler())
}
