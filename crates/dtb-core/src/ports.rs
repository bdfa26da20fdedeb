use async_trait::async_trait;

use crate::{domain::Platform, state::AppState, Result};

/// Hexagonal port for a chat-platform bot.
///
/// Adapters wrap a platform client library (Discord, Twitch) and pull their
/// credentials from `state.cfg`. The core never looks at protocol traffic.
#[async_trait]
pub trait ChatBot: Send + Sync {
    fn platform(&self) -> Platform;

    /// Connect and serve until the platform session ends.
    async fn run(&self, state: AppState) -> Result<()>;
}
