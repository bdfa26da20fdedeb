use std::fmt;

use crate::utils::redact;

/// Chat platform a bot connects to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Platform {
    Discord,
    Twitch,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Discord => f.write_str("discord"),
            Platform::Twitch => f.write_str("twitch"),
        }
    }
}

/// Bot token handed to the Discord client.
#[derive(Clone, PartialEq, Eq)]
pub struct DiscordCredentials {
    pub token: String,
}

impl fmt::Debug for DiscordCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiscordCredentials")
            .field("token", &redact(&self.token))
            .finish()
    }
}

/// Client id + credentials string handed to the Twitch bot.
#[derive(Clone, PartialEq, Eq)]
pub struct TwitchCredentials {
    pub client_id: String,
    pub credentials: String,
}

impl fmt::Debug for TwitchCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TwitchCredentials")
            .field("client_id", &self.client_id)
            .field("credentials", &redact(&self.credentials))
            .finish()
    }
}
