use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

pub const DEFAULT_WEBAPP_URL: &str = "https://igor-ivanov-consult.lovable.app";
pub const DEFAULT_PORT: u16 = 3000;

/// How updates reach the bot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateMode {
    /// An upstream proxy owns the webhook and forwards updates to `POST /webhook`.
    #[default]
    Proxy,
    /// Long polling, for local runs.
    Polling,
}

impl UpdateMode {
    pub fn as_str(self) -> &'static str {
        match self {
            UpdateMode::Proxy => "proxy",
            UpdateMode::Polling => "polling",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    pub telegram_bot_token: String,
    pub supabase_url: String,
    pub supabase_service_key: String,
    pub webhook_secret: String,
    #[serde(default = "default_webapp_url")]
    pub webapp_url: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub bot_username: Option<String>,
    #[serde(default)]
    pub update_mode: UpdateMode,
}

fn default_webapp_url() -> String {
    DEFAULT_WEBAPP_URL.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

impl BotConfig {
    /// Reads `giftloop.toml` if present, then lets environment variables
    /// override it.
    pub fn load() -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::with_name("giftloop").required(false))
            .add_source(Environment::default().try_parsing(true))
            .build()
            .context("Failed to read configuration")?;
        Self::from_settings(settings)
    }

    pub fn from_settings(settings: Config) -> Result<Self> {
        let config: Self = settings
            .try_deserialize()
            .context("Invalid configuration")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let required = [
            ("TELEGRAM_BOT_TOKEN", &self.telegram_bot_token),
            ("SUPABASE_URL", &self.supabase_url),
            ("SUPABASE_SERVICE_KEY", &self.supabase_service_key),
            ("WEBHOOK_SECRET", &self.webhook_secret),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                anyhow::bail!("{} is not set", name);
            }
        }
        Ok(())
    }

    /// Configured username without a leading `@`, if any.
    pub fn bot_username(&self) -> Option<&str> {
        self.bot_username
            .as_deref()
            .map(|u| u.trim().trim_start_matches('@'))
            .filter(|u| !u.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> config::ConfigBuilder<config::builder::DefaultState> {
        Config::builder()
            .set_override("telegram_bot_token", "123:abc")
            .unwrap()
            .set_override("supabase_url", "https://project.supabase.co")
            .unwrap()
            .set_override("supabase_service_key", "service")
            .unwrap()
            .set_override("webhook_secret", "s3cret")
            .unwrap()
    }

    #[test]
    fn defaults_apply() {
        let config = BotConfig::from_settings(base().build().unwrap()).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.webapp_url, DEFAULT_WEBAPP_URL);
        assert_eq!(config.update_mode, UpdateMode::Proxy);
        assert_eq!(config.bot_username(), None);
    }

    #[test]
    fn overrides_are_read() {
        let settings = base()
            .set_override("port", 8080)
            .unwrap()
            .set_override("update_mode", "polling")
            .unwrap()
            .set_override("bot_username", "@gift_bot")
            .unwrap()
            .build()
            .unwrap();
        let config = BotConfig::from_settings(settings).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.update_mode, UpdateMode::Polling);
        assert_eq!(config.bot_username(), Some("gift_bot"));
    }

    #[test]
    fn missing_token_is_fatal() {
        let settings = Config::builder()
            .set_override("supabase_url", "https://project.supabase.co")
            .unwrap()
            .set_override("supabase_service_key", "service")
            .unwrap()
            .set_override("webhook_secret", "s3cret")
            .unwrap()
            .build()
            .unwrap();
        assert!(BotConfig::from_settings(settings).is_err());
    }

    #[test]
    fn blank_secret_is_fatal() {
        let settings = base()
            .set_override("webhook_secret", "  ")
            .unwrap()
            .build()
            .unwrap();
        let err = BotConfig::from_settings(settings).unwrap_err();
        assert!(err.to_string().contains("WEBHOOK_SECRET"));
    }
}
