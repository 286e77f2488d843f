use super::*;
use sale_watcher::plugins::TelegramNotifier;
use sale_watcher::{NotificationOutcome, PriceChecker, ProductQuery};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn three_products() -> ScriptedBrowser {
    ScriptedBrowser::new()
        .with_page(JEANS_URL, "Ultra Stretch Jeans", &["Rp 599.000"])
        .with_page(SHIRT_URL, "AIRism Cotton Oversized T-Shirt", &["Rp 199.000", "Rp 149.000"])
        .with_page(PARKA_URL, "Pocketable UV Protection Parka", &["Rp 499.000"])
}

fn queries() -> Vec<ProductQuery> {
    ProductQuery::from_urls([JEANS_URL, SHIRT_URL, PARKA_URL])
}

#[tokio::test]
async fn test_middle_product_on_sale_sends_one_block() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/bot{}/sendMessage", TEST_TOKEN)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "result": { "message_id": 1001 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = get_test_config(&server.uri());
    let notifier = TelegramNotifier::new(config.telegram.clone())?;
    let checker = PriceChecker::new(three_products(), Box::new(notifier), &config);

    let summary = checker.run(&queries()).await;

    assert_eq!(summary.products_checked, 3);
    assert_eq!(summary.products_degraded, 0);
    assert_eq!(summary.sale_items.len(), 1);
    assert_eq!(summary.sale_items[0].url, SHIRT_URL);
    assert_eq!(
        summary.notification,
        NotificationOutcome::Delivered { message_id: Some(1001) }
    );

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body)?;
    let text = body["text"].as_str().unwrap();

    assert!(text.contains("You have 1 item(s) on sale:"));
    assert_eq!(text.matches("[Tap to open in app]").count(), 1);
    assert!(text.contains("*AIRism Cotton Oversized T-Shirt*"));
    assert!(text.contains("Now *Rp 149.000* (was ~Rp 199.000~)"));
    assert!(text.contains("(https://s.uniqlo.com/id/en/product/E479169-000)"));
    assert!(!text.contains("Ultra Stretch Jeans"));
    assert!(!text.contains("Pocketable UV Protection Parka"));

    Ok(())
}

#[tokio::test]
async fn test_notifier_receives_only_sale_items() {
    let notifier = RecordingNotifier::default();
    let calls = Arc::clone(&notifier.calls);
    let config = get_test_config("http://127.0.0.1:1");
    let checker = PriceChecker::new(three_products(), Box::new(notifier), &config);

    let summary = checker.run(&queries()).await;

    assert_eq!(summary.products_checked, 3);
    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].len(), 1);
    assert_eq!(calls[0][0].name, "AIRism Cotton Oversized T-Shirt");
}

#[test]
fn test_browser_visits_each_query_once() {
    let browser = three_products();
    let config = get_test_config("http://127.0.0.1:1");
    let extractor = sale_watcher::PageExtractor::from_config(&config.scraper);

    for query in queries() {
        extractor.extract(&browser, &query);
    }

    assert_eq!(browser.visits(), vec![JEANS_URL, SHIRT_URL, PARKA_URL]);
}

#[tokio::test]
async fn test_no_sales_sends_nothing() {
    let browser = ScriptedBrowser::new()
        .with_page(JEANS_URL, "Ultra Stretch Jeans", &["Rp 599.000"])
        .with_page(PARKA_URL, "Pocketable UV Protection Parka", &[]);
    let notifier = RecordingNotifier::default();
    let calls = Arc::clone(&notifier.calls);
    let config = get_test_config("http://127.0.0.1:1");
    let checker = PriceChecker::new(browser, Box::new(notifier), &config);

    let summary = checker
        .run(&ProductQuery::from_urls([JEANS_URL, SHIRT_URL, PARKA_URL]))
        .await;

    // SHIRT_URL is not scripted, so that page degrades
    assert_eq!(summary.products_degraded, 1);
    assert!(summary.sale_items.is_empty());
    assert_eq!(summary.notification, NotificationOutcome::NoSales);
    assert!(calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_unconfigured_telegram_still_completes() {
    let mut config = get_test_config("http://127.0.0.1:1");
    config.telegram = TelegramConfig::default();

    let notifier = TelegramNotifier::new(config.telegram.clone()).unwrap();
    let checker = PriceChecker::new(three_products(), Box::new(notifier), &config);

    let summary = checker.run(&queries()).await;

    assert_eq!(summary.sale_items.len(), 1);
    assert!(matches!(summary.notification, NotificationOutcome::Skipped { .. }));
}
