use headless_chrome::browser::tab::NoElementFound;
use headless_chrome::{Browser, LaunchOptions, Tab};
use std::ffi::OsStr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::config::ScraperConfig;
use crate::utils::error::{AppError, Result};

/// The browser capabilities the price checker needs.
///
/// Implemented by [`ChromePage`] for real runs and by scripted fakes in tests.
pub trait PageDriver {
    /// Loads `url` and waits for the navigation to finish.
    fn navigate(&self, url: &str) -> Result<()>;

    /// Waits up to `timeout` for `selector` and returns the element's text.
    fn wait_for(&self, selector: &str, timeout: Duration) -> Result<String>;

    /// Returns the text of every element matching `selector`, in document order.
    fn find_all(&self, selector: &str) -> Result<Vec<String>>;
}

/// A single headless Chrome tab.
///
/// The browser process is shut down when this value is dropped.
pub struct ChromePage {
    // Field order matters: the tab must drop before its browser.
    tab: Arc<Tab>,
    _browser: Browser,
}

impl ChromePage {
    pub fn launch(config: &ScraperConfig) -> Result<Self> {
        let mut launch_options = LaunchOptions::default_builder()
            .headless(config.headless)
            .sandbox(false) // Often needed in containerized environments
            .args(vec![
                OsStr::new("--no-sandbox"),
                OsStr::new("--disable-dev-shm-usage"),
                OsStr::new("--disable-gpu"),
                OsStr::new("--disable-extensions"),
                OsStr::new("--log-level=3"),
            ])
            .build()
            .map_err(|e| AppError::browser(format!("Failed to create launch options: {}", e)))?;

        if let Some(chrome_path) = &config.chrome_path {
            launch_options.path = Some(PathBuf::from(chrome_path));
        }

        let browser = Browser::new(launch_options)
            .map_err(|e| AppError::browser(format!("Failed to launch browser: {}", e)))?;

        let tab = browser
            .new_tab()
            .map_err(|e| AppError::browser(format!("Failed to create tab: {}", e)))?;

        if let Some(user_agent) = &config.user_agent {
            tab.set_user_agent(user_agent, None, None)
                .map_err(|e| AppError::browser(format!("Failed to set user agent: {}", e)))?;
        }

        tracing::debug!("Launched headless Chrome (headless = {})", config.headless);

        Ok(Self {
            tab,
            _browser: browser,
        })
    }
}

impl PageDriver for ChromePage {
    fn navigate(&self, url: &str) -> Result<()> {
        self.tab
            .navigate_to(url)
            .map_err(|e| AppError::browser(format!("Navigation failed: {}", e)))?
            .wait_until_navigated()
            .map_err(|e| AppError::browser(format!("Page load failed: {}", e)))?;
        Ok(())
    }

    fn wait_for(&self, selector: &str, timeout: Duration) -> Result<String> {
        let element = self
            .tab
            .wait_for_element_with_custom_timeout(selector, timeout)
            .map_err(|e| {
                tracing::debug!("Wait for '{}' failed: {}", selector, e);
                AppError::ElementWait {
                    selector: selector.to_string(),
                    timeout_secs: timeout.as_secs(),
                }
            })?;

        element
            .get_inner_text()
            .map_err(|e| AppError::browser(format!("Failed to read text of '{}': {}", selector, e)))
    }

    fn find_all(&self, selector: &str) -> Result<Vec<String>> {
        let elements = match self.tab.find_elements(selector) {
            Ok(elements) => elements,
            // headless_chrome reports an empty match as an error
            Err(e) if is_no_match(&e) => return Ok(Vec::new()),
            Err(e) => {
                return Err(AppError::browser(format!(
                    "Failed to query '{}': {}",
                    selector, e
                )));
            }
        };

        elements
            .iter()
            .map(|element| {
                element.get_inner_text().map_err(|e| {
                    AppError::browser(format!("Failed to read text of '{}': {}", selector, e))
                })
            })
            .collect()
    }
}

fn is_no_match(err: &anyhow::Error) -> bool {
    err.downcast_ref::<NoElementFound>().is_some()
}
