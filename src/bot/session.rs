//! Authenticated session with Telegram.

use anyhow::Context;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use tracing::info;

use crate::config::Config;
use crate::plugins::Command;

/// One long-lived authenticated connection, owned by `main`.
pub struct Session {
    name: String,
    username: String,
    bot: Bot,
}

impl Session {
    /// Build the client and authenticate via `getMe`. Failure is fatal.
    pub async fn connect(config: &Config) -> anyhow::Result<Self> {
        let bot = Bot::new(&config.credentials.token);

        let me = bot
            .get_me()
            .await
            .context("authentication with Telegram failed")?;

        info!(session = %config.session_name, "Authenticated as @{}", me.username());

        Ok(Self {
            name: config.session_name.clone(),
            username: me.username().to_string(),
            bot,
        })
    }

    /// Publish the command list shown in Telegram clients.
    pub async fn register_commands(&self) -> anyhow::Result<()> {
        self.bot
            .set_my_commands(Command::bot_commands())
            .await
            .context("failed to register bot commands")?;
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn bot(&self) -> &Bot {
        &self.bot
    }
}
