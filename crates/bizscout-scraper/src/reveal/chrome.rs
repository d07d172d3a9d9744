//! [`BrowserSession`] backed by a local Chrome/Chromium via `headless_chrome`.
//!
//! All calls block; run them on a blocking thread.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use headless_chrome::browser::tab::NoElementFound;
use headless_chrome::{Browser, Element, LaunchOptions, Tab};

use super::{BrowserSession, SessionLauncher};
use crate::error::ScraperError;

fn browser_error(step: &'static str, err: impl std::fmt::Display) -> ScraperError {
    ScraperError::Browser {
        step,
        reason: err.to_string(),
    }
}

/// `true` only for the "nothing matched" outcome of an element lookup.
/// Transport and protocol failures are not a miss.
fn is_no_match(err: &(dyn std::error::Error + Send + Sync + 'static)) -> bool {
    err.is::<NoElementFound>()
}

/// First element matching `xpath`, or `None` when nothing matches.
fn find_first<'a>(tab: &'a Tab, xpath: &str) -> Result<Option<Element<'a>>, ScraperError> {
    match tab.find_element_by_xpath(xpath) {
        Ok(element) => Ok(Some(element)),
        Err(e) if is_no_match(&*e) => Ok(None),
        Err(e) => Err(browser_error("find element", e)),
    }
}

/// Launches one Chrome process per session.
#[derive(Debug, Clone)]
pub struct ChromeLauncher {
    headless: bool,
    chrome_path: Option<PathBuf>,
    idle_timeout: Duration,
}

impl ChromeLauncher {
    #[must_use]
    pub fn new(headless: bool, chrome_path: Option<PathBuf>, idle_timeout: Duration) -> Self {
        Self {
            headless,
            chrome_path,
            idle_timeout,
        }
    }
}

impl SessionLauncher for ChromeLauncher {
    fn launch(&self) -> Result<Box<dyn BrowserSession>, ScraperError> {
        let options = LaunchOptions::default_builder()
            .headless(self.headless)
            .path(self.chrome_path.clone())
            .idle_browser_timeout(self.idle_timeout)
            .build()
            .map_err(|e| browser_error("launch", e))?;
        let browser = Browser::new(options).map_err(|e| browser_error("launch", e))?;
        let tab = browser.new_tab().map_err(|e| browser_error("launch", e))?;
        tracing::debug!(headless = self.headless, "chrome session started");
        Ok(Box::new(ChromeSession {
            tab,
            _browser: browser,
        }))
    }
}

/// A single tab in a dedicated browser process.
///
/// The tab is closed in `Drop`; dropping `_browser` afterwards kills the process.
pub struct ChromeSession {
    tab: Arc<Tab>,
    _browser: Browser,
}

impl BrowserSession for ChromeSession {
    fn navigate(&mut self, url: &str) -> Result<(), ScraperError> {
        self.tab
            .navigate_to(url)
            .and_then(|tab| tab.wait_until_navigated())
            .map_err(|e| browser_error("navigate", e))?;
        Ok(())
    }

    fn click(&mut self, xpath: &str) -> Result<bool, ScraperError> {
        let Some(element) = find_first(&self.tab, xpath)? else {
            return Ok(false);
        };
        element.click().map_err(|e| browser_error("click", e))?;
        Ok(true)
    }

    fn texts(&mut self, xpath: &str) -> Result<Vec<String>, ScraperError> {
        // An empty search makes `find_elements_by_xpath` fail on the result
        // range, so look for a first match before asking for all of them.
        if find_first(&self.tab, xpath)?.is_none() {
            tracing::debug!(xpath, "no elements matched");
            return Ok(Vec::new());
        }
        let elements = self
            .tab
            .find_elements_by_xpath(xpath)
            .map_err(|e| browser_error("find elements", e))?;
        elements
            .iter()
            .map(|el| {
                el.get_inner_text()
                    .map(|text| text.trim().to_owned())
                    .map_err(|e| browser_error("read text", e))
            })
            .collect()
    }
}

impl Drop for ChromeSession {
    fn drop(&mut self) {
        if let Err(e) = self.tab.close(true) {
            tracing::debug!(error = %e, "closing chrome tab failed");
        }
        tracing::debug!("chrome session closed");
    }
}
