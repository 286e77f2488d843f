use chrono::Local;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::AppConfig;
use crate::extractor::PageExtractor;
use crate::models::{ProductQuery, ProductSnapshot, SaleReport};
use crate::plugins::traits::NotifierPlugin;
use crate::scraper::PageDriver;

pub type NotifierPluginBox = Box<dyn NotifierPlugin>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum NotificationOutcome {
    /// Nothing was on sale, so the notifier was not called.
    NoSales,
    Delivered { message_id: Option<i64> },
    Skipped { reason: String },
    Failed { error: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub products_checked: usize,
    pub products_degraded: usize,
    pub sale_items: Vec<ProductSnapshot>,
    pub notification: NotificationOutcome,
}

/// Checks every configured product once and reports the sales found.
pub struct PriceChecker<D: PageDriver> {
    driver: D,
    notifier: NotifierPluginBox,
    extractor: PageExtractor,
    pacing_delay: Duration,
}

impl<D: PageDriver> PriceChecker<D> {
    pub fn new(driver: D, notifier: NotifierPluginBox, config: &AppConfig) -> Self {
        Self {
            driver,
            notifier,
            extractor: PageExtractor::from_config(&config.scraper),
            pacing_delay: config.scraper.pacing_delay(),
        }
    }

    pub fn with_pacing_delay(mut self, pacing_delay: Duration) -> Self {
        self.pacing_delay = pacing_delay;
        self
    }

    /// Runs one pass over `queries` in order.
    ///
    /// Pages are visited one at a time with the pacing delay between them.
    /// The notifier is called at most once, after the last page, and only
    /// when at least one product is on sale. Per-page and delivery failures
    /// are logged and reflected in the summary, never returned.
    pub async fn run(&self, queries: &[ProductQuery]) -> RunSummary {
        let total = queries.len();
        tracing::info!(
            "[{}] Starting multi-item price check for {} products...",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            total
        );

        let mut report = SaleReport::new();
        let mut degraded = 0;

        for (index, query) in queries.iter().enumerate() {
            tracing::info!("Checking item {}/{}: {}", index + 1, total, query.url);

            let outcome = self.extractor.extract(&self.driver, query);
            if outcome.is_degraded() {
                degraded += 1;
            }

            let snapshot = outcome.into_snapshot();
            tracing::debug!(
                "{}: {} (on sale: {})",
                snapshot.name,
                snapshot.current_price,
                snapshot.is_on_sale
            );
            if report.record(snapshot) {
                tracing::info!("Item {}/{} is on sale", index + 1, total);
            }

            if index + 1 < total && !self.pacing_delay.is_zero() {
                tokio::time::sleep(self.pacing_delay).await;
            }
        }

        let notification = self.send_report(&report).await;

        tracing::info!(
            "[{}] Price check complete.",
            Local::now().format("%Y-%m-%d %H:%M:%S")
        );

        RunSummary {
            products_checked: total,
            products_degraded: degraded,
            sale_items: report.into_items(),
            notification,
        }
    }

    async fn send_report(&self, report: &SaleReport) -> NotificationOutcome {
        if report.is_empty() {
            tracing::info!("Finished check. No items are on sale today.");
            return NotificationOutcome::NoSales;
        }

        tracing::info!(
            "Found {} item(s) on sale! Preparing summary notification...",
            report.len()
        );

        match self.notifier.notify(report.items()).await {
            Ok(result) if result.delivered => NotificationOutcome::Delivered {
                message_id: result.message_id,
            },
            Ok(result) => NotificationOutcome::Skipped {
                reason: result.skipped_reason.unwrap_or_default(),
            },
            Err(e) => {
                tracing::error!("Error sending notification: {}", e);
                NotificationOutcome::Failed {
                    error: e.to_string(),
                }
            }
        }
    }
}
