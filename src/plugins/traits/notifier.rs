use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::models::ProductSnapshot;
use crate::utils::error::Result;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotificationResult {
    /// True only when the message was accepted by the remote service.
    pub delivered: bool,
    pub message_id: Option<i64>,
    /// Why nothing was sent, when `delivered` is false.
    pub skipped_reason: Option<String>,
}

impl NotificationResult {
    pub fn delivered(message_id: Option<i64>) -> Self {
        Self {
            delivered: true,
            message_id,
            skipped_reason: None,
        }
    }

    pub fn skipped(reason: impl Into<String>) -> Self {
        Self {
            delivered: false,
            message_id: None,
            skipped_reason: Some(reason.into()),
        }
    }
}

/// Trait for delivering the sale summary of a run (Telegram, ...)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotifierPlugin: Send + Sync {
    /// Plugin metadata
    fn name(&self) -> &str;

    /// Whether credentials are present. Unconfigured notifiers skip sending.
    fn is_configured(&self) -> bool;

    /// Formats `items` into one message and sends it.
    ///
    /// Returns a skipped result instead of an error when not configured.
    async fn notify(&self, items: &[ProductSnapshot]) -> Result<NotificationResult>;
}
