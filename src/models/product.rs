use serde::{Deserialize, Serialize};

pub const NAME_NOT_FOUND: &str = "Name not found";
pub const PRICE_NOT_FOUND: &str = "Price not found";

/// One configured product page to check.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductQuery {
    pub url: String,
}

impl ProductQuery {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn from_urls<I, S>(urls: I) -> Vec<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        urls.into_iter().map(Self::new).collect()
    }
}

/// Price information read off a product page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum PriceState {
    /// Two prices shown: the struck-through original and the discounted one.
    Sale { original: String, current: String },
    Regular { current: String },
    /// Nothing usable on the page.
    Unknown,
}

impl PriceState {
    /// Classifies the trimmed texts of the price elements found on a page.
    ///
    /// Two or more texts mean a sale when the first two are both non-empty.
    /// A single text is the regular price. Anything else is `Unknown`.
    pub fn classify<S: AsRef<str>>(texts: &[S]) -> Self {
        match texts {
            [] => PriceState::Unknown,
            [only] => PriceState::Regular {
                current: only.as_ref().trim().to_string(),
            },
            [first, second, ..] => {
                let original = first.as_ref().trim();
                let current = second.as_ref().trim();
                if original.is_empty() || current.is_empty() {
                    PriceState::Unknown
                } else {
                    PriceState::Sale {
                        original: original.to_string(),
                        current: current.to_string(),
                    }
                }
            }
        }
    }

    pub fn is_sale(&self) -> bool {
        matches!(self, PriceState::Sale { .. })
    }
}

/// Result of extracting a single product page.
///
/// Only built through [`ProductSnapshot::new`] or [`ProductSnapshot::placeholder`],
/// so `original_price` is set exactly when `is_on_sale` is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductSnapshot {
    pub name: String,
    pub current_price: String,
    pub is_on_sale: bool,
    pub original_price: Option<String>,
    /// The query URL, never the deep link.
    pub url: String,
}

impl ProductSnapshot {
    pub fn new(url: impl Into<String>, name: impl Into<String>, price: PriceState) -> Self {
        let is_on_sale = price.is_sale();
        let (current_price, original_price) = match price {
            PriceState::Sale { original, current } => (current, Some(original)),
            PriceState::Regular { current } => (current, None),
            PriceState::Unknown => (PRICE_NOT_FOUND.to_string(), None),
        };

        Self {
            name: name.into(),
            is_on_sale,
            current_price,
            original_price,
            url: url.into(),
        }
    }

    pub fn placeholder(url: impl Into<String>) -> Self {
        Self::new(url, NAME_NOT_FOUND, PriceState::Unknown)
    }
}
