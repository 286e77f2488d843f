pub mod config;
pub mod deep_link;
pub mod extractor;
pub mod models;
pub mod plugins;
pub mod price_checker;
pub mod scraper;
pub mod utils;

// Re-export commonly used types
pub use config::AppConfig;
pub use extractor::{ExtractionOutcome, PageExtractor};
pub use models::{PriceState, ProductQuery, ProductSnapshot, SaleReport};
pub use price_checker::{NotificationOutcome, PriceChecker, RunSummary};
pub use scraper::{ChromePage, PageDriver};
pub use utils::error::AppError;

pub type Result<T> = std::result::Result<T, AppError>;
