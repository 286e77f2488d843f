use regex::Regex;
use std::sync::LazyLock;

/// Base of the app link that opens a product in the Uniqlo mobile app.
pub const APP_LINK_BASE: &str = "https://s.uniqlo.com/id/en/product/";

static PRODUCT_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z]\d{6}-\d{3}").expect("product id pattern is valid"));

/// Returns the product identifier (e.g. `E479169-000`) embedded in a URL.
pub fn product_id(url: &str) -> Option<&str> {
    PRODUCT_ID.find(url).map(|m| m.as_str())
}

/// Converts a product web URL into an app deep link.
///
/// URLs without a recognisable product identifier are returned unchanged.
pub fn to_deep_link(url: &str) -> String {
    match product_id(url) {
        Some(id) => format!("{APP_LINK_BASE}{id}"),
        None => url.to_string(),
    }
}
