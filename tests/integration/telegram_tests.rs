use super::*;
use sale_watcher::plugins::TelegramNotifier;
use sale_watcher::PriceState;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sale_item(name: &str, url: &str) -> ProductSnapshot {
    ProductSnapshot::new(
        url,
        name,
        PriceState::Sale {
            original: "Rp 399.000".to_string(),
            current: "Rp 299.000".to_string(),
        },
    )
}

fn send_message_path() -> String {
    format!("/bot{}/sendMessage", TEST_TOKEN)
}

#[tokio::test]
async fn test_sends_markdown_message() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(send_message_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "result": { "message_id": 42 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = get_test_config(&server.uri());
    let notifier = TelegramNotifier::new(config.telegram)?;

    let result = notifier.notify(&[sale_item("Parka", PARKA_URL)]).await?;
    assert!(result.delivered);
    assert_eq!(result.message_id, Some(42));

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body)?;
    assert_eq!(body["chat_id"], TEST_CHAT_ID);
    assert_eq!(body["parse_mode"], "Markdown");
    assert_eq!(body["disable_web_page_preview"], true);

    let text = body["text"].as_str().unwrap();
    assert!(text.contains("You have 1 item(s) on sale:"));
    assert!(text.contains("*Parka*"));
    assert!(text.contains("Now *Rp 299.000* (was ~Rp 399.000~)"));
    assert!(text.contains("[Tap to open in app](https://s.uniqlo.com/id/en/product/E478913-000)"));

    Ok(())
}

#[tokio::test]
async fn test_error_status_is_a_delivery_failure() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(send_message_path()))
        .respond_with(ResponseTemplate::new(400).set_body_string(
            r#"{"ok":false,"error_code":400,"description":"Bad Request: chat not found"}"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let config = get_test_config(&server.uri());
    let notifier = TelegramNotifier::new(config.telegram)?;

    let err = notifier
        .notify(&[sale_item("Parka", PARKA_URL)])
        .await
        .unwrap_err();

    match err {
        AppError::Delivery { status, body } => {
            assert_eq!(status, 400);
            assert!(body.contains("chat not found"));
        }
        other => panic!("expected delivery error, got {:?}", other),
    }

    Ok(())
}

#[tokio::test]
async fn test_placeholder_credentials_make_no_request() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let telegram = TelegramConfig {
        api_base_url: server.uri(),
        ..TelegramConfig::default()
    };
    let notifier = TelegramNotifier::new(telegram)?;

    let result = notifier.notify(&[sale_item("Parka", PARKA_URL)]).await?;
    assert!(!result.delivered);

    let requests = server.received_requests().await.unwrap();
    assert!(requests.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_unreachable_api_is_an_http_error() -> anyhow::Result<()> {
    // Nothing listens on port 1
    let config = get_test_config("http://127.0.0.1:1");
    let notifier = TelegramNotifier::new(config.telegram)?;

    let err = notifier
        .notify(&[sale_item("Parka", PARKA_URL)])
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Http(_)));

    Ok(())
}
