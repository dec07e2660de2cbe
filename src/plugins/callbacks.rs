//! Inline-button callback plugin.
//!
//! Callback codes are decoded into [`CallbackAction`] at the boundary. Every
//! callback is answered exactly once, after the reply (if any) was attempted.

use teloxide::prelude::*;
use tracing::{debug, warn};

use crate::bot::dispatcher::AppState;
use crate::bot::outbound::{OutboundMessage, Outbox};
use crate::config::Variant;
use crate::templates::{self, Profile};

/// Action carried by a callback button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackAction {
    About,
    Support,
    /// Code this bot never issued. Acknowledged without a reply.
    Unknown(String),
}

impl CallbackAction {
    pub fn decode(code: &str) -> Self {
        match code {
            "about" => Self::About,
            "support" => Self::Support,
            other => Self::Unknown(other.to_string()),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            Self::About => "about",
            Self::Support => "support",
            Self::Unknown(code) => code,
        }
    }
}

/// A button press, reduced to what the handler needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackEvent {
    pub id: String,
    /// Chat of the message carrying the button, if still accessible.
    pub chat_id: Option<ChatId>,
    pub action: CallbackAction,
}

impl From<&CallbackQuery> for CallbackEvent {
    fn from(q: &CallbackQuery) -> Self {
        Self {
            id: q.id.clone(),
            chat_id: q.message.as_ref().map(|m| m.chat().id),
            action: CallbackAction::decode(q.data.as_deref().unwrap_or_default()),
        }
    }
}

/// Reply for an action, if the variant has one.
pub fn reply_for(action: &CallbackAction, profile: &Profile) -> Option<OutboundMessage> {
    match (action, profile.variant) {
        (CallbackAction::About, _) => Some(templates::about_message(profile)),
        (CallbackAction::Support, Variant::Base) => Some(templates::support_message(profile)),
        (CallbackAction::Support, Variant::Support) | (CallbackAction::Unknown(_), _) => None,
    }
}

/// Reply to a callback event, then acknowledge it.
pub async fn handle_event(
    outbox: &dyn Outbox,
    profile: &Profile,
    event: CallbackEvent,
) -> anyhow::Result<()> {
    let replied = match (reply_for(&event.action, profile), event.chat_id) {
        (Some(message), Some(chat_id)) => outbox.send(chat_id, message).await,
        (Some(_), None) => {
            debug!(code = event.action.code(), "origin message unavailable, skipping reply");
            Ok(())
        }
        (None, _) => {
            debug!(code = event.action.code(), "no reply for callback");
            Ok(())
        }
    };

    let answered = outbox.answer(event.id).await;

    if let (Err(e), Err(_)) = (&replied, &answered) {
        warn!("Reply failed before callback answer also failed: {e}");
    }

    replied.and(answered)
}

/// Handle any callback query.
pub async fn callback_handler(q: CallbackQuery, state: AppState) -> anyhow::Result<()> {
    handle_event(state.outbox.as_ref(), &state.profile, CallbackEvent::from(&q)).await
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::bot::outbound::testing::RecordingOutbox;
    use crate::templates::profile;

    fn event(code: &str) -> CallbackEvent {
        CallbackEvent {
            id: "cb-1".to_string(),
            chat_id: Some(ChatId(99)),
            action: CallbackAction::decode(code),
        }
    }

    #[test]
    fn test_decode() {
        assert_eq!(CallbackAction::decode("about"), CallbackAction::About);
        assert_eq!(CallbackAction::decode("support"), CallbackAction::Support);
        assert_eq!(
            CallbackAction::decode("help:main"),
            CallbackAction::Unknown("help:main".to_string())
        );
        assert_eq!(CallbackAction::decode("about").code(), "about");
    }

    fn query(data: Option<&str>, with_message: bool) -> CallbackQuery {
        let mut value = json!({
            "id": "cb-2",
            "from": { "id": 7, "is_bot": false, "first_name": "Ravi" },
            "chat_instance": "ci-1"
        });
        if let Some(data) = data {
            value["data"] = json!(data);
        }
        if with_message {
            value["message"] = json!({
                "message_id": 3,
                "date": 1_700_000_000,
                "chat": { "id": -100123, "type": "supergroup", "title": "Study Group" },
                "text": "menu"
            });
        } else {
            value["inline_message_id"] = json!("inline-1");
        }
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_event_from_query_with_message() {
        let event = CallbackEvent::from(&query(Some("about"), true));

        assert_eq!(event.id, "cb-2");
        assert_eq!(event.chat_id, Some(ChatId(-100123)));
        assert_eq!(event.action, CallbackAction::About);
    }

    #[test]
    fn test_event_from_query_without_message() {
        let event = CallbackEvent::from(&query(Some("support"), false));

        assert_eq!(event.chat_id, None);
        assert_eq!(event.action, CallbackAction::Support);
    }

    #[test]
    fn test_event_from_query_without_data() {
        let event = CallbackEvent::from(&query(None, true));

        assert_eq!(event.action, CallbackAction::Unknown(String::new()));
    }

    #[tokio::test]
    async fn test_about_replies_once_and_answers_once() {
        let outbox = RecordingOutbox::default();
        let profile = profile(Variant::Support, "Help Desk");

        handle_event(&outbox, &profile, event("about")).await.unwrap();

        let sent = outbox.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, ChatId(99));
        assert!(sent[0].1.text.contains("Help Desk"));
        assert_eq!(outbox.answered(), vec!["cb-1".to_string()]);
    }

    #[tokio::test]
    async fn test_support_in_base_variant() {
        let outbox = RecordingOutbox::default();
        let profile = profile(Variant::Base, "Amrendra Bot");

        handle_event(&outbox, &profile, event("support")).await.unwrap();

        let sent = outbox.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].1.text, "🛠 For support, please contact the owner.");
        assert_eq!(outbox.answered().len(), 1);
    }

    #[tokio::test]
    async fn test_support_code_ignored_in_support_variant() {
        let outbox = RecordingOutbox::default();
        let profile = profile(Variant::Support, "Help Desk");

        handle_event(&outbox, &profile, event("support")).await.unwrap();

        assert!(outbox.sent().is_empty());
        assert_eq!(outbox.answered().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_code_only_answers() {
        let outbox = RecordingOutbox::default();
        let profile = profile(Variant::Base, "Amrendra Bot");

        handle_event(&outbox, &profile, event("bogus")).await.unwrap();

        assert!(outbox.sent().is_empty());
        assert_eq!(outbox.answered(), vec!["cb-1".to_string()]);
    }

    #[tokio::test]
    async fn test_answers_even_when_reply_fails() {
        let outbox = RecordingOutbox::failing();
        let profile = profile(Variant::Base, "Amrendra Bot");

        let result = handle_event(&outbox, &profile, event("about")).await;

        assert!(result.is_err());
        assert_eq!(outbox.answered().len(), 1);
    }

    #[tokio::test]
    async fn test_inaccessible_message_still_answers() {
        let outbox = RecordingOutbox::default();
        let profile = profile(Variant::Base, "Amrendra Bot");
        let event = CallbackEvent { chat_id: None, ..event("about") };

        handle_event(&outbox, &profile, event).await.unwrap();

        assert!(outbox.sent().is_empty());
        assert_eq!(outbox.answered().len(), 1);
    }
}
