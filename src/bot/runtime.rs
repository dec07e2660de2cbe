//! Bot runtime - long polling until Ctrl+C.

use tracing::info;

use super::dispatcher::BotDispatcher;
use super::session::Session;

/// Dispatch updates for the session until the process is interrupted.
pub async fn run(session: &Session, mut dispatcher: BotDispatcher) {
    info!(session = session.name(), "Starting bot in polling mode...");
    dispatcher.dispatch().await;
    info!(session = session.name(), "Session stopped");
}
