//! Configuration, built from environment variables.

use std::path::PathBuf;

use secrecy::SecretString;

use crate::error::ConfigError;

/// Bot configuration.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Telegram Bot API token.
    pub bot_token: SecretString,
    /// Telegram usernames or numeric ids allowed to talk to the bot;
    /// `"*"` allows everyone.
    pub allowed_users: Vec<String>,
    /// Path to the user-profile database.
    pub profile_db_path: PathBuf,
    /// Path to the institution-catalog database.
    pub catalog_db_path: PathBuf,
}

impl BotConfig {
    /// Read configuration from the environment.
    ///
    /// `TELEGRAM_BOT_TOKEN` is required; everything else has defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bot_token = std::env::var("TELEGRAM_BOT_TOKEN")
            .map_err(|_| ConfigError::MissingEnvVar("TELEGRAM_BOT_TOKEN".to_string()))?;

        let allowed_users: Vec<String> = std::env::var("UNI_ASSIST_ALLOWED_USERS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let profile_db_path = std::env::var("UNI_ASSIST_PROFILE_DB")
            .unwrap_or_else(|_| "./data/uni-assist.db".to_string())
            .into();
        let catalog_db_path = std::env::var("UNI_ASSIST_CATALOG_DB")
            .unwrap_or_else(|_| "./data/catalog.db".to_string())
            .into();

        Ok(Self {
            bot_token: SecretString::from(bot_token),
            allowed_users,
            profile_db_path,
            catalog_db_path,
        })
    }
}
