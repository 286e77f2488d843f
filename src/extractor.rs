use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::ScraperConfig;
use crate::models::{NAME_NOT_FOUND, PriceState, ProductQuery, ProductSnapshot};
use crate::scraper::PageDriver;
use crate::utils::error::{AppError, Result};

/// What came out of extracting one product page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum ExtractionOutcome {
    Complete(ProductSnapshot),
    /// The page could not be read; the snapshot holds placeholders.
    Degraded {
        snapshot: ProductSnapshot,
        reason: String,
    },
}

impl ExtractionOutcome {
    pub fn snapshot(&self) -> &ProductSnapshot {
        match self {
            ExtractionOutcome::Complete(snapshot) => snapshot,
            ExtractionOutcome::Degraded { snapshot, .. } => snapshot,
        }
    }

    pub fn into_snapshot(self) -> ProductSnapshot {
        match self {
            ExtractionOutcome::Complete(snapshot) => snapshot,
            ExtractionOutcome::Degraded { snapshot, .. } => snapshot,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, ExtractionOutcome::Degraded { .. })
    }
}

/// Reads the product name and price state off a Uniqlo product page.
#[derive(Debug, Clone)]
pub struct PageExtractor {
    title_selector: String,
    price_selector: String,
    timeout: Duration,
}

impl Default for PageExtractor {
    fn default() -> Self {
        Self::from_config(&ScraperConfig::default())
    }
}

impl PageExtractor {
    pub fn new(title_selector: impl Into<String>, price_selector: impl Into<String>, timeout: Duration) -> Self {
        Self {
            title_selector: title_selector.into(),
            price_selector: price_selector.into(),
            timeout,
        }
    }

    pub fn from_config(config: &ScraperConfig) -> Self {
        Self::new(
            config.title_selector.clone(),
            config.price_selector.clone(),
            config.element_timeout(),
        )
    }

    /// Navigates `driver` to the query URL and extracts the product.
    ///
    /// Never fails: any problem is logged and yields a degraded snapshot with
    /// the placeholder price, so one bad page cannot abort the run. A name
    /// that was already read is kept.
    pub fn extract<D: PageDriver + ?Sized>(&self, driver: &D, query: &ProductQuery) -> ExtractionOutcome {
        let url = &query.url;

        let name = match self.read_title(driver, url) {
            Ok(name) => name,
            Err(e) => return degraded(url, NAME_NOT_FOUND, e),
        };

        match driver.find_all(&self.price_selector) {
            Ok(prices) => {
                tracing::debug!("Found {} price element(s) on {}", prices.len(), url);
                ExtractionOutcome::Complete(ProductSnapshot::new(url, name, PriceState::classify(&prices)))
            }
            Err(e) => degraded(url, &name, e),
        }
    }

    fn read_title<D: PageDriver + ?Sized>(&self, driver: &D, url: &str) -> Result<String> {
        driver.navigate(url)?;
        let name = driver.wait_for(&self.title_selector, self.timeout)?;
        Ok(name.trim().to_string())
    }
}

fn degraded(url: &str, name: &str, err: AppError) -> ExtractionOutcome {
    tracing::warn!("An error occurred while checking {}: {}", url, err);
    ExtractionOutcome::Degraded {
        snapshot: ProductSnapshot::new(url, name, PriceState::Unknown),
        reason: err.to_string(),
    }
}
