use std::{env, fmt, path::Path};

use crate::{
    domain::{DiscordCredentials, TwitchCredentials},
    errors::{Error, FieldIssue, FieldProblem},
    json::{read_json, write_json},
    logging::{log, LogLevel},
    outcome::JsonMap,
    utils::redact,
    Result,
};

pub const CONFIG_SAMPLE_FILE: &str = "config_sample.json";
pub const CONFIG_FILE: &str = "config.json";

/// Validated bot configuration.
///
/// Built once at startup by [`Config::load`]; there is no way to change a
/// field afterwards. Values are trimmed and never equal the placeholder from
/// the sample file.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    discord_token: String,
    twitch_client_id: String,
    twitch_credentials: String,
}

impl Config {
    /// Required keys, in sample-file order.
    pub const FIELDS: [&'static str; 3] =
        ["discord_token", "twitch_client_id", "twitch_credentials"];

    /// Load `config.json` from the process working directory.
    pub fn load() -> Result<Self> {
        let cwd = env::current_dir()?;
        Self::load_from(&cwd)
    }

    /// Load `config.json` from `dir`, bootstrapping `config_sample.json` next to it
    /// when that file is missing or unreadable.
    pub fn load_from(dir: &Path) -> Result<Self> {
        ensure_sample(&dir.join(CONFIG_SAMPLE_FILE))?;

        let path = dir.join(CONFIG_FILE);
        let loaded = read_json(&path);
        if !loaded.is_success() {
            log(LogLevel::Critical, "failed to load the config file");
            return Err(Error::LoadConfig {
                path,
                outcome: loaded.outcome(),
            });
        }
        let data = loaded.into_data();

        let issues = Self::FIELDS
            .iter()
            .filter_map(|&field| check_field(&data, field))
            .collect::<Vec<_>>();
        if !issues.is_empty() {
            log(LogLevel::Critical, "invalid data in config file");
            return Err(Error::InvalidConfig { issues });
        }

        let get = |key: &str| {
            data.get(key)
                .map(|v| v.trim().to_string())
                .unwrap_or_default()
        };
        Ok(Self {
            discord_token: get("discord_token"),
            twitch_client_id: get("twitch_client_id"),
            twitch_credentials: get("twitch_credentials"),
        })
    }

    /// Sample mapping: every field set to its own uppercased name.
    pub fn default_sample() -> JsonMap {
        Self::FIELDS
            .iter()
            .map(|f| (f.to_string(), placeholder(f)))
            .collect()
    }

    pub fn discord_token(&self) -> &str {
        &self.discord_token
    }

    pub fn twitch_client_id(&self) -> &str {
        &self.twitch_client_id
    }

    pub fn twitch_credentials(&self) -> &str {
        &self.twitch_credentials
    }

    pub fn discord(&self) -> DiscordCredentials {
        DiscordCredentials {
            token: self.discord_token.clone(),
        }
    }

    pub fn twitch(&self) -> TwitchCredentials {
        TwitchCredentials {
            client_id: self.twitch_client_id.clone(),
            credentials: self.twitch_credentials.clone(),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("discord_token", &redact(&self.discord_token))
            .field("twitch_client_id", &self.twitch_client_id)
            .field("twitch_credentials", &redact(&self.twitch_credentials))
            .finish()
    }
}

fn placeholder(field: &str) -> String {
    field.to_uppercase()
}

fn ensure_sample(path: &Path) -> Result<()> {
    let existing = read_json(path);
    if existing.is_success() {
        let missing = Config::FIELDS
            .iter()
            .copied()
            .filter(|f| !existing.data().contains_key(*f))
            .collect::<Vec<_>>();
        if !missing.is_empty() {
            log(
                LogLevel::Error,
                &format!(
                    "config sample file is missing keys: {}",
                    missing.join(", ")
                ),
            );
        }
        return Ok(());
    }

    log(LogLevel::Info, "config sample file does not exist, creating it");
    let written = write_json(path, &Config::default_sample());
    if !written.is_success() {
        log(LogLevel::Critical, "failed to create a config sample file");
        return Err(Error::SampleConfig {
            path: path.to_path_buf(),
            outcome: written.outcome(),
        });
    }
    Ok(())
}

/// Validate one required key. Empty values are reported but tolerated.
fn check_field(data: &JsonMap, field: &'static str) -> Option<FieldIssue> {
    let Some(raw) = data.get(field) else {
        log(
            LogLevel::Error,
            &format!("config file does not contain required key {field}"),
        );
        return Some(FieldIssue {
            field,
            problem: FieldProblem::Missing,
        });
    };

    let value = raw.trim();
    let default = placeholder(field);
    if value == default {
        log(
            LogLevel::Error,
            &format!("config entry {field} has default value {default}"),
        );
        return Some(FieldIssue {
            field,
            problem: FieldProblem::Placeholder,
        });
    }

    if value.is_empty() {
        log(LogLevel::Error, &format!("config entry {field} is empty"));
    }
    None
}
