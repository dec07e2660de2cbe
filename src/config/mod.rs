//! Configuration module.
//!
//! Loads configuration from environment variables (with an optional `.env`
//! file) and validates the credentials required by the selected variant.

use std::env;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use url::Url;

/// Display name used when `BOT_NAME` is not set.
pub const DEFAULT_BOT_NAME: &str = "Amrendra Bot";

/// Target of the support variant's contact button when `SUPPORT_URL` is not set.
pub const DEFAULT_SUPPORT_URL: &str = "https://t.me/amrendra_support_bot";

/// Fatal configuration errors. Startup halts on any of these.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required configuration for the {variant} bot: {}", .fields.join(" / "))]
    Missing {
        variant: Variant,
        fields: Vec<&'static str>,
    },

    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Which template the bot runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Variant {
    /// Token-only bot with an about/support callback menu.
    #[default]
    Base,
    /// Support bot: needs api id/hash and links to the owner by URL.
    Support,
}

impl Variant {
    /// Credential keys that must be present for this variant.
    pub fn required_fields(self) -> &'static [&'static str] {
        match self {
            Self::Base => &["BOT_TOKEN"],
            Self::Support => &["BOT_TOKEN", "API_ID", "API_HASH"],
        }
    }

    pub fn default_session_name(self) -> &'static str {
        match self {
            Self::Base => "amrendra_base_bot",
            Self::Support => "amrendra_support_bot",
        }
    }
}

impl FromStr for Variant {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "base" => Ok(Self::Base),
            "support" => Ok(Self::Support),
            other => Err(ConfigError::Invalid {
                key: "BOT_VARIANT",
                reason: format!("expected `base` or `support`, got `{other}`"),
            }),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Base => f.write_str("base"),
            Self::Support => f.write_str("support"),
        }
    }
}

/// Bot identity secrets. Immutable once loaded.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub token: String,
    pub api_id: Option<i32>,
    pub api_hash: Option<String>,
    pub display_name: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &redact(&self.token))
            .field("api_id", &self.api_id)
            .field("api_hash", &self.api_hash.as_deref().map(redact))
            .field("display_name", &self.display_name)
            .finish()
    }
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() { "<empty>" } else { "<redacted>" }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub variant: Variant,
    pub credentials: Credentials,

    /// Local identity name of the session.
    pub session_name: String,

    /// Where the support variant's contact button points.
    pub support_url: Url,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// A missing `.env` file is not an error; unset variables fall back to
    /// empty credentials and the default display name, then validation runs.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let variant = match get("BOT_VARIANT") {
            Some(v) => v.parse()?,
            None => Variant::default(),
        };

        // Only variants that need API_ID look at it; zero counts as unset.
        let api_id = match get("API_ID") {
            Some(raw) if variant.required_fields().contains(&"API_ID") => {
                let id = raw.parse::<i32>().map_err(|e| ConfigError::Invalid {
                    key: "API_ID",
                    reason: e.to_string(),
                })?;
                if id < 0 {
                    return Err(ConfigError::Invalid {
                        key: "API_ID",
                        reason: format!("must be positive, got {id}"),
                    });
                }
                Some(id).filter(|id| *id > 0)
            }
            _ => None,
        };

        let credentials = Credentials {
            token: get("BOT_TOKEN").unwrap_or_default(),
            api_id,
            api_hash: get("API_HASH"),
            display_name: get("BOT_NAME").unwrap_or_else(|| DEFAULT_BOT_NAME.to_string()),
        };

        validate(variant, &credentials)?;

        let support_url = parse_url(
            "SUPPORT_URL",
            &get("SUPPORT_URL").unwrap_or_else(|| DEFAULT_SUPPORT_URL.to_string()),
        )?;

        Ok(Self {
            variant,
            credentials,
            session_name: get("SESSION_NAME")
                .unwrap_or_else(|| variant.default_session_name().to_string()),
            support_url,
        })
    }
}

/// Check that every field the variant requires is present.
fn validate(variant: Variant, credentials: &Credentials) -> Result<(), ConfigError> {
    let fields: Vec<&'static str> = variant
        .required_fields()
        .iter()
        .copied()
        .filter(|field| match *field {
            "BOT_TOKEN" => credentials.token.is_empty(),
            "API_ID" => credentials.api_id.is_none(),
            "API_HASH" => credentials.api_hash.is_none(),
            _ => false,
        })
        .collect();

    if fields.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::Missing { variant, fields })
    }
}

fn parse_url(key: &'static str, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw).map_err(|e| ConfigError::Invalid {
        key,
        reason: e.to_string(),
    })
}
