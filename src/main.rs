use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};

use sale_watcher::plugins::{NotifierPlugin, TelegramNotifier};
use sale_watcher::{AppConfig, ChromePage, NotificationOutcome, PriceChecker, ProductQuery};

#[derive(Parser, Debug)]
#[command(name = "sale-watcher")]
#[command(about = "Checks Uniqlo product pages for sales and posts a summary to Telegram")]
#[command(version)]
struct Args {
    /// Configuration file (TOML, JSON or YAML); defaults to config/default.* if present
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Product URL to check instead of the configured list (repeatable)
    #[arg(short, long = "product", value_name = "URL")]
    products: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("sale_watcher=info".parse()?),
        )
        .init();

    let args = Args::parse();

    let mut config = AppConfig::load(args.config.as_deref())?;
    if !args.products.is_empty() {
        config.products = args.products;
        config.validate()?;
    }

    let queries = ProductQuery::from_urls(config.products.iter().cloned());

    let notifier = TelegramNotifier::new(config.telegram.clone())?;
    if !notifier.is_configured() {
        warn!("Telegram credentials are not set; sales will be logged but not sent");
    }

    // The browser is closed when `checker` drops, on every path out of main
    let page = ChromePage::launch(&config.scraper)?;
    let checker = PriceChecker::new(page, Box::new(notifier), &config);

    let summary = checker.run(&queries).await;

    info!(
        "Checked {} product(s): {} on sale, {} unreadable",
        summary.products_checked,
        summary.sale_items.len(),
        summary.products_degraded
    );
    if let NotificationOutcome::Failed { error } = &summary.notification {
        warn!("Sale notification was not delivered: {}", error);
    }

    Ok(())
}
