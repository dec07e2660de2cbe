//! Amrendra Bot - Template Telegram bot.
//!
//! Answers `/start` with a welcome menu and replies to the menu's buttons.
//! One binary covers both deployments; `BOT_VARIANT` picks the template.
//!
//! ## Architecture
//!
//! - `config` - Environment configuration and credential validation
//! - `bot` - Session, dispatcher and outbound messages
//! - `plugins` - Command and callback handlers
//! - `templates` - Message texts and menus per variant
//! - `utils` - Utility functions

mod bot;
mod config;
mod plugins;
mod templates;
mod utils;

use tracing::info;
use tracing_subscriber::EnvFilter;

use bot::Session;
use config::Config;
use templates::Profile;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // If RUST_LOG is not set, default to "info" level for our crate
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("amrendra_bot=info,teloxide=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .init();

    // Missing credentials end the process here, before any connection.
    let config = Config::from_env()?;
    info!("Configuration loaded ({} variant)", config.variant);

    let session = Session::connect(&config).await?;
    session.register_commands().await?;

    let profile = Profile::from_config(&config);
    let dispatcher = bot::build_dispatcher(session.bot().clone(), profile);

    println!("✅ {} is running as @{}...", config.credentials.display_name, session.username());

    bot::run(&session, dispatcher).await;

    Ok(())
}
