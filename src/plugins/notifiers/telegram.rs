use crate::config::TelegramConfig;
use crate::deep_link::to_deep_link;
use crate::models::ProductSnapshot;
use crate::plugins::traits::{NotificationResult, NotifierPlugin};
use crate::utils::error::{AppError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

const PARSE_MODE: &str = "Markdown";

/// Builds the Markdown sale summary sent to Telegram.
///
/// One block per item, in the given order, each linking to the app deep link
/// derived from the item's web URL.
pub fn format_sale_message(title: &str, items: &[ProductSnapshot]) -> String {
    let header = format!(
        "🔥 *{}* 🔥\n\nYou have {} item(s) on sale:\n",
        title,
        items.len()
    );

    let details: Vec<String> = items
        .iter()
        .map(|item| {
            format!(
                "\n*{}*\nNow *{}* (was ~{}~)\n[Tap to open in app]({})",
                item.name,
                item.current_price,
                item.original_price.as_deref().unwrap_or_default(),
                to_deep_link(&item.url)
            )
        })
        .collect();

    header + &details.join("\n")
}

pub struct TelegramNotifier {
    client: Client,
    config: TelegramConfig,
}

impl TelegramNotifier {
    pub fn new(config: TelegramConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self { client, config })
    }

    fn create_payload(&self, text: &str) -> serde_json::Value {
        json!({
            "chat_id": self.config.chat_id,
            "text": text,
            "parse_mode": PARSE_MODE,
            "disable_web_page_preview": true,
        })
    }
}

#[async_trait]
impl NotifierPlugin for TelegramNotifier {
    fn name(&self) -> &str {
        "Telegram Notifier"
    }

    fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    async fn notify(&self, items: &[ProductSnapshot]) -> Result<NotificationResult> {
        if !self.is_configured() {
            tracing::warn!("Telegram is not configured: set the bot token and chat id to enable notifications");
            return Ok(NotificationResult::skipped("Telegram bot token or chat id not set"));
        }

        let message = format_sale_message(&self.config.alert_title, items);
        let payload = self.create_payload(&message);

        let response = self
            .client
            .post(self.config.send_message_url())
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Delivery {
                status: status.as_u16(),
                body,
            });
        }

        let message_id = response
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|body| body["result"]["message_id"].as_i64());

        tracing::info!("Notification sent successfully to Telegram");
        Ok(NotificationResult::delivered(message_id))
    }
}
