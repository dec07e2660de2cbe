//! Message templates for both bot variants.
//!
//! The base variant renders with HTML (bold display name); the support
//! variant sends plain text and links to the owner instead of a support reply.

use url::Url;

use crate::bot::outbound::{Menu, MenuButton, OutboundMessage};
use crate::config::{Config, Variant};
use crate::plugins::callbacks::CallbackAction;
use crate::utils::html_escape;

/// Identity the handlers render from. Shared read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub variant: Variant,
    pub display_name: String,
    pub support_url: Url,
}

impl Profile {
    pub fn from_config(config: &Config) -> Self {
        Self {
            variant: config.variant,
            display_name: config.credentials.display_name.clone(),
            support_url: config.support_url.clone(),
        }
    }

    fn name(&self) -> String {
        match self.variant {
            Variant::Base => html_escape(&self.display_name),
            Variant::Support => self.display_name.clone(),
        }
    }

    fn message(&self, text: String) -> OutboundMessage {
        match self.variant {
            Variant::Base => OutboundMessage::html(text),
            Variant::Support => OutboundMessage::plain(text),
        }
    }
}

/// Welcome message with the main menu.
pub fn start_message(profile: &Profile) -> OutboundMessage {
    let text = match profile.variant {
        Variant::Base => format!(
            "👋 Welcome to <b>{}</b>\n\n\
            This bot is powered by Amrendra base template.\n\
            Choose an option below.",
            profile.name()
        ),
        Variant::Support => format!(
            "👋 Welcome to {}\n\n\
            This is the official support bot.\n\
            Please choose an option below.",
            profile.name()
        ),
    };

    profile.message(text).with_menu(menu(profile))
}

pub fn about_message(profile: &Profile) -> OutboundMessage {
    let text = match profile.variant {
        Variant::Base => format!(
            "🤖 <b>{}</b>\n\n\
            This bot runs on a shared base template.\n\
            Logic is common, identity is unique.",
            profile.name()
        ),
        Variant::Support => format!(
            "🤖 {}\n\n\
            This bot is built using a shared base template.\n\
            Purpose: user support & assistance.",
            profile.name()
        ),
    };

    profile.message(text)
}

pub fn support_message(profile: &Profile) -> OutboundMessage {
    profile.message("🛠 For support, please contact the owner.".to_string())
}

/// Two-item main menu: about callback, then support (callback or URL).
pub fn menu(profile: &Profile) -> Menu {
    let second = match profile.variant {
        Variant::Base => MenuButton::callback("🛠 Support", CallbackAction::Support),
        Variant::Support => MenuButton::url("🛠 Contact Owner", profile.support_url.clone()),
    };

    Menu::stacked([MenuButton::callback("ℹ️ About", CallbackAction::About), second])
}

#[cfg(test)]
pub(crate) fn profile(variant: Variant, name: &str) -> Profile {
    Profile {
        variant,
        display_name: name.to_string(),
        support_url: Url::parse(crate::config::DEFAULT_SUPPORT_URL).unwrap(),
    }
}
