mod defaults;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{is_valid_token, PigeonError};
use defaults::*;

/// Environment variable consulted when `bot.token` is empty.
pub const TOKEN_ENV: &str = "TELEGRAM_BOT_TOKEN";

/// Top-level Pigeon configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub polling: PollingConfig,
    #[serde(default)]
    pub dispatch: DispatchConfig,
}

/// Credentials and endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    #[serde(default)]
    pub token: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Log every request body at debug level.
    #[serde(default)]
    pub debug: bool,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            api_url: default_api_url(),
            debug: false,
            log_level: default_log_level(),
        }
    }
}

/// Long-polling parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingConfig {
    /// Starting cursor. 0 = oldest unconfirmed update.
    #[serde(default)]
    pub offset: i64,
    #[serde(default = "default_limit")]
    pub limit: u32,
    /// Server-side long-poll wait.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Extra client-side wait on top of `timeout_secs` before giving up on a poll.
    #[serde(default = "default_request_slack_secs")]
    pub request_slack_secs: u64,
    #[serde(default = "default_max_backoff_secs")]
    pub max_backoff_secs: u64,
    /// Capacity of the poller → dispatcher queue.
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
    /// Update kinds to receive (e.g. `["message", "callback_query"]`). Empty = all.
    #[serde(default)]
    pub allowed_updates: Vec<String>,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: default_limit(),
            timeout_secs: default_timeout_secs(),
            request_slack_secs: default_request_slack_secs(),
            max_backoff_secs: default_max_backoff_secs(),
            queue_capacity: default_queue_capacity(),
            allowed_updates: Vec::new(),
        }
    }
}

/// How plain messages are answered.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplyMode {
    /// Send the same message back.
    #[default]
    Echo,
    /// Greet and offer a button that shares the user's location.
    Greeting,
    /// Ask the prompt question with an inline keyboard of choices.
    Survey,
}

impl ReplyMode {
    pub fn display_name(&self) -> &str {
        match self {
            Self::Echo => "echo",
            Self::Greeting => "greeting",
            Self::Survey => "survey",
        }
    }
}

/// One inline keyboard choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub label: String,
    pub data: String,
}

/// Dispatcher behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchConfig {
    #[serde(default)]
    pub reply: ReplyMode,
    #[serde(default = "default_greeting")]
    pub greeting: String,
    #[serde(default = "default_location_button")]
    pub location_button: String,
    #[serde(default = "default_prompt")]
    pub prompt: String,
    /// Callback data starting with this prefix is a recognized choice.
    #[serde(default = "default_choice_prefix")]
    pub choice_prefix: String,
    #[serde(default = "default_choices")]
    pub choices: Vec<Choice>,
    /// Text the prompt message is edited to once a choice is made.
    /// `{choice}` is replaced with the chosen value.
    #[serde(default = "default_choice_reply")]
    pub choice_reply: String,
    /// Notification shown when a choice is acknowledged.
    #[serde(default = "default_ack_text")]
    pub ack_text: String,
    /// Answer `/start` and `/help` and register them in the command menu.
    #[serde(default = "default_true")]
    pub commands: bool,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            reply: ReplyMode::default(),
            greeting: default_greeting(),
            location_button: default_location_button(),
            prompt: default_prompt(),
            choice_prefix: default_choice_prefix(),
            choices: default_choices(),
            choice_reply: default_choice_reply(),
            ack_text: default_ack_text(),
            commands: true,
        }
    }
}

impl Config {
    /// Fill an empty token from the environment.
    pub fn apply_env(&mut self) {
        if self.bot.token.is_empty() {
            if let Ok(token) = std::env::var(TOKEN_ENV) {
                self.bot.token = token.trim().to_string();
            }
        }
    }

    /// Reject settings that would fail at the first request.
    pub fn validate(&self) -> Result<(), PigeonError> {
        if self.bot.token.is_empty() {
            return Err(PigeonError::Unauthorized(format!(
                "bot token is empty. Set bot.token in the config file, \
                 the {TOKEN_ENV} env var, or --token."
            )));
        }
        if !is_valid_token(&self.bot.token) {
            return Err(PigeonError::Unauthorized(
                "bot token is malformed (expected <bot id>:<secret>)".to_string(),
            ));
        }
        if !(1..=100).contains(&self.polling.limit) {
            return Err(PigeonError::Config(format!(
                "polling.limit must be between 1 and 100, got {}",
                self.polling.limit
            )));
        }
        if self.polling.queue_capacity == 0 {
            return Err(PigeonError::Config(
                "polling.queue_capacity must be at least 1".to_string(),
            ));
        }
        if self.polling.offset < 0 {
            return Err(PigeonError::Config(
                "polling.offset must not be negative".to_string(),
            ));
        }
        if self.dispatch.reply == ReplyMode::Survey && self.dispatch.choices.is_empty() {
            return Err(PigeonError::Config(
                "dispatch.reply = \"survey\" needs at least one dispatch.choices entry"
                    .to_string(),
            ));
        }
        Ok(())
    }

    /// Token with everything after the bot id masked, for logs and `status`.
    pub fn masked_token(&self) -> String {
        mask_token(&self.bot.token)
    }
}

/// `123456:ABC...` → `123456:***`.
pub fn mask_token(token: &str) -> String {
    match token.split_once(':') {
        Some((id, _)) => format!("{id}:***"),
        None if token.is_empty() => String::new(),
        None => "***".to_string(),
    }
}

/// Load configuration from a TOML file.
///
/// Falls back to defaults if the file does not exist.
pub fn load(path: &str) -> Result<Config, PigeonError> {
    let path = Path::new(path);
    if !path.exists() {
        tracing::info!(
            "Config file not found at {}, using defaults",
            path.display()
        );
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| PigeonError::Config(format!("failed to read {}: {}", path.display(), e)))?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| PigeonError::Config(format!("failed to parse config: {}", e)))?;

    Ok(config)
}
