use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Sentinel values that mean "Telegram has not been set up".
pub const PLACEHOLDER_BOT_TOKEN: &str = "YOUR_BOT_TOKEN_HERE";
pub const PLACEHOLDER_CHAT_ID: &str = "YOUR_CHAT_ID_HERE";

const ENV_PREFIX: &str = "SALE_WATCHER";
const DEFAULT_CONFIG_FILE: &str = "config/default";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub telegram: TelegramConfig,
    pub scraper: ScraperConfig,
    /// Product page URLs, checked in this order.
    pub products: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub chat_id: String,
    pub api_base_url: String,
    pub alert_title: String,
    /// Seconds before the sendMessage request is abandoned.
    pub request_timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    pub chrome_path: Option<String>,
    pub headless: bool,
    pub user_agent: Option<String>,
    /// Seconds to wait for the product title to appear.
    pub element_timeout: u64,
    /// Pause between two product pages.
    pub pacing_delay_ms: u64,
    pub title_selector: String,
    pub price_selector: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            telegram: TelegramConfig::default(),
            scraper: ScraperConfig::default(),
            products: vec![
                "https://www.uniqlo.com/id/id/products/E479169-000?colorCode=COL09&sizeCode=SMA007".to_string(),
                "https://www.uniqlo.com/id/id/products/E474437-000?colorCode=COL00&sizeCode=SMA007".to_string(),
                "https://www.uniqlo.com/id/id/products/E478913-000?colorCode=COL00&sizeCode=SMA006".to_string(),
                "https://www.uniqlo.com/id/id/products/E474432-000?colorCode=COL09&sizeCode=SMA007".to_string(),
            ],
        }
    }
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: PLACEHOLDER_BOT_TOKEN.to_string(),
            chat_id: PLACEHOLDER_CHAT_ID.to_string(),
            api_base_url: "https://api.telegram.org".to_string(),
            alert_title: "Uniqlo Sale Alert!".to_string(),
            request_timeout: 30,
        }
    }
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            chrome_path: None,
            headless: true,
            user_agent: None,
            element_timeout: 15,
            pacing_delay_ms: 2000,
            title_selector: "h1.fr-head".to_string(),
            price_selector: ".fr-price-currency".to_string(),
        }
    }
}

impl TelegramConfig {
    /// False while either credential is empty or still a placeholder.
    pub fn is_configured(&self) -> bool {
        is_set(&self.bot_token, PLACEHOLDER_BOT_TOKEN) && is_set(&self.chat_id, PLACEHOLDER_CHAT_ID)
    }

    pub fn send_message_url(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.api_base_url.trim_end_matches('/'),
            self.bot_token
        )
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}

impl ScraperConfig {
    pub fn element_timeout(&self) -> Duration {
        Duration::from_secs(self.element_timeout)
    }

    pub fn pacing_delay(&self) -> Duration {
        Duration::from_millis(self.pacing_delay_ms)
    }
}

fn is_set(value: &str, placeholder: &str) -> bool {
    let value = value.trim();
    !value.is_empty() && value != placeholder
}

impl AppConfig {
    /// Loads defaults, then the config file, then `SALE_WATCHER__*` variables.
    ///
    /// Without an explicit path, `config/default.{toml,json,yaml}` is read if present.
    pub fn load(path: Option<&Path>) -> crate::utils::error::Result<Self> {
        let file = match path {
            Some(path) => File::from(path),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let s = Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("products"),
            )
            .build()?;

        let mut config: AppConfig = s.try_deserialize()?;
        config.apply_env_fallbacks(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Fills values still unset from the conventional unprefixed variables
    /// (`TELEGRAM_BOT_TOKEN`, `TELEGRAM_CHAT_ID`, `CHROME_PATH`).
    pub fn apply_env_fallbacks<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if !is_set(&self.telegram.bot_token, PLACEHOLDER_BOT_TOKEN) {
            if let Some(token) = lookup("TELEGRAM_BOT_TOKEN").filter(|v| !v.trim().is_empty()) {
                self.telegram.bot_token = token;
            }
        }

        if !is_set(&self.telegram.chat_id, PLACEHOLDER_CHAT_ID) {
            if let Some(chat_id) = lookup("TELEGRAM_CHAT_ID").filter(|v| !v.trim().is_empty()) {
                self.telegram.chat_id = chat_id;
            }
        }

        if self.scraper.chrome_path.is_none() {
            self.scraper.chrome_path = lookup("CHROME_PATH");
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for product in &self.products {
            if Url::parse(product).is_err() {
                return Err(ConfigError::Message(format!("Invalid product URL: {}", product)));
            }
        }

        if Url::parse(&self.telegram.api_base_url).is_err() {
            return Err(ConfigError::Message("Invalid Telegram API base URL".into()));
        }

        if self.telegram.request_timeout == 0 {
            return Err(ConfigError::Message("Telegram request_timeout must be greater than 0".into()));
        }

        if self.scraper.element_timeout == 0 {
            return Err(ConfigError::Message("Scraper element_timeout must be greater than 0".into()));
        }

        if self.scraper.title_selector.trim().is_empty() || self.scraper.price_selector.trim().is_empty() {
            return Err(ConfigError::Message("Scraper selectors must not be empty".into()));
        }

        Ok(())
    }
}
