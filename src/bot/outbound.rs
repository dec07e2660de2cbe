//! Outbound messages and the send/answer seam.
//!
//! Handlers build [`OutboundMessage`] values and hand them to an [`Outbox`].
//! The Telegram implementation lives here; tests use a recording one.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, ParseMode};
use url::Url;

use crate::plugins::callbacks::CallbackAction;

/// Text formatting mode of an outbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextFormat {
    Html,
}

impl From<TextFormat> for ParseMode {
    fn from(format: TextFormat) -> Self {
        match format {
            TextFormat::Html => ParseMode::Html,
        }
    }
}

/// What pressing a menu button does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ButtonAction {
    /// Sends a callback event carrying this action's code back to the bot.
    Callback(CallbackAction),
    /// Opens a URL on the client.
    OpenUrl(Url),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuButton {
    pub label: String,
    pub action: ButtonAction,
}

impl MenuButton {
    pub fn callback(label: impl Into<String>, action: CallbackAction) -> Self {
        Self { label: label.into(), action: ButtonAction::Callback(action) }
    }

    pub fn url(label: impl Into<String>, url: Url) -> Self {
        Self { label: label.into(), action: ButtonAction::OpenUrl(url) }
    }
}

/// Inline menu attached to a message, as rows of buttons.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Menu {
    pub rows: Vec<Vec<MenuButton>>,
}

impl Menu {
    /// One button per row.
    pub fn stacked(buttons: impl IntoIterator<Item = MenuButton>) -> Self {
        Self { rows: buttons.into_iter().map(|b| vec![b]).collect() }
    }

    #[cfg(test)]
    pub fn buttons(&self) -> impl Iterator<Item = &MenuButton> {
        self.rows.iter().flatten()
    }
}

impl From<&Menu> for InlineKeyboardMarkup {
    fn from(menu: &Menu) -> Self {
        InlineKeyboardMarkup::new(menu.rows.iter().map(|row| {
            row.iter()
                .map(|button| match &button.action {
                    ButtonAction::Callback(action) => {
                        InlineKeyboardButton::callback(button.label.clone(), action.code())
                    }
                    ButtonAction::OpenUrl(url) => {
                        InlineKeyboardButton::url(button.label.clone(), url.clone())
                    }
                })
                .collect::<Vec<_>>()
        }))
    }
}

/// A reply to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub text: String,
    pub format: Option<TextFormat>,
    pub menu: Option<Menu>,
}

impl OutboundMessage {
    pub fn plain(text: impl Into<String>) -> Self {
        Self { text: text.into(), format: None, menu: None }
    }

    pub fn html(text: impl Into<String>) -> Self {
        Self { text: text.into(), format: Some(TextFormat::Html), menu: None }
    }

    pub fn with_menu(mut self, menu: Menu) -> Self {
        self.menu = Some(menu);
        self
    }
}

/// Outgoing side of the session, shared read-only by all handlers.
#[async_trait]
pub trait Outbox: Send + Sync {
    /// Send a message to a chat.
    async fn send(&self, chat_id: ChatId, message: OutboundMessage) -> anyhow::Result<()>;

    /// Acknowledge a callback query so the client clears the button's loading state.
    async fn answer(&self, callback_id: String) -> anyhow::Result<()>;
}

#[async_trait]
impl Outbox for Bot {
    async fn send(&self, chat_id: ChatId, message: OutboundMessage) -> anyhow::Result<()> {
        let mut request = self.send_message(chat_id, message.text);

        if let Some(format) = message.format {
            request = request.parse_mode(format.into());
        }
        if let Some(menu) = &message.menu {
            request = request.reply_markup(InlineKeyboardMarkup::from(menu));
        }

        request.await?;
        Ok(())
    }

    async fn answer(&self, callback_id: String) -> anyhow::Result<()> {
        self.answer_callback_query(callback_id).await?;
        Ok(())
    }
}

#[cfg(test)]
pub mod testing {
    //! Recording outbox for handler tests.

    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    pub struct RecordingOutbox {
        pub sent: Mutex<Vec<(ChatId, OutboundMessage)>>,
        pub answered: Mutex<Vec<String>>,
        pub fail_sends: bool,
    }

    impl RecordingOutbox {
        pub fn failing() -> Self {
            Self { fail_sends: true, ..Self::default() }
        }

        pub fn sent(&self) -> Vec<(ChatId, OutboundMessage)> {
            self.sent.lock().unwrap().clone()
        }

        pub fn answered(&self) -> Vec<String> {
            self.answered.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Outbox for RecordingOutbox {
        async fn send(&self, chat_id: ChatId, message: OutboundMessage) -> anyhow::Result<()> {
            if self.fail_sends {
                anyhow::bail!("send failed");
            }
            self.sent.lock().unwrap().push((chat_id, message));
            Ok(())
        }

        async fn answer(&self, callback_id: String) -> anyhow::Result<()> {
            self.answered.lock().unwrap().push(callback_id);
            Ok(())
        }
    }
}
