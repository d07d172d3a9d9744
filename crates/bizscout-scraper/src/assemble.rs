//! Record assembly: one [`BusinessRecord`] per page visit.
//!
//! Steps run in a fixed order: document extraction, API lookup, per-field
//! reconciliation, then the two browser procedures. Nothing runs in
//! parallel.

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use bizscout_core::AppConfig;

use crate::api::{ApiInfo, ApiLookup, YelpClient};
use crate::document::DocumentExtractor;
use crate::error::ScraperError;
use crate::locators::LocatorSet;
use crate::reconcile::reconcile;
use crate::reveal::{reveal_amenities, reveal_blurb, ChromeLauncher, SessionLauncher};
use crate::types::{Blurb, BusinessRecord, PageCandidates};

const DEFAULT_BROWSER_TIMEOUT_SECS: u64 = 90;

/// Drives every extraction stage for a listing page.
pub struct ListingExtractor {
    locators: LocatorSet,
    document: DocumentExtractor,
    api: Option<YelpClient>,
    launcher: Option<Arc<dyn SessionLauncher>>,
    browser_timeout: Duration,
}

impl ListingExtractor {
    /// An extractor with no API client and no browser. Blurb and amenities
    /// come out empty until a launcher is attached.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidLocator`] if a CSS locator does not parse.
    pub fn new(locators: LocatorSet) -> Result<Self, ScraperError> {
        Ok(Self {
            locators,
            document: DocumentExtractor::new(locators)?,
            api: None,
            launcher: None,
            browser_timeout: Duration::from_secs(DEFAULT_BROWSER_TIMEOUT_SECS),
        })
    }

    /// Builds the production extractor: locators for the configured markup
    /// version, the Yelp client, and a Chrome launcher.
    ///
    /// # Errors
    ///
    /// Propagates locator, HTTP client, and base URL construction failures.
    pub fn from_config(config: &AppConfig) -> Result<Self, ScraperError> {
        let api = YelpClient::with_base_url(
            config.api_key.as_deref(),
            config.request_timeout_secs,
            &config.user_agent,
            &config.api_base_url,
        )?;
        let browser_timeout = Duration::from_secs(config.browser_timeout_secs);
        let launcher = ChromeLauncher::new(
            config.browser_headless,
            config.chrome_path.as_ref().map(PathBuf::from),
            browser_timeout,
        );

        Ok(Self::new(LocatorSet::for_version(config.markup_version))?
            .with_api_client(api)
            .with_launcher(Arc::new(launcher))
            .with_browser_timeout(browser_timeout))
    }

    #[must_use]
    pub fn with_api_client(mut self, api: YelpClient) -> Self {
        self.api = Some(api);
        self
    }

    #[must_use]
    pub fn with_launcher(mut self, launcher: Arc<dyn SessionLauncher>) -> Self {
        self.launcher = Some(launcher);
        self
    }

    /// Drops any configured launcher; the browser procedures are skipped.
    #[must_use]
    pub fn without_browser(mut self) -> Self {
        self.launcher = None;
        self
    }

    #[must_use]
    pub fn with_browser_timeout(mut self, timeout: Duration) -> Self {
        self.browser_timeout = timeout;
        self
    }

    /// Extracts, reconciles, and reveals one listing page.
    ///
    /// `page_url` is where `html` was fetched from; it becomes the record URL.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::ExtractionFailed`] if the page has no business id or
    ///   the "Read more" control is missing.
    /// - [`ScraperError::ApiFieldMissing`] if a page field is absent and the
    ///   API record lacks it too.
    /// - [`ScraperError::Timeout`] if a browser procedure overruns.
    /// - Any browser failure.
    pub async fn extract(
        &self,
        page_url: &str,
        html: &str,
    ) -> Result<BusinessRecord, ScraperError> {
        let candidates = self.document.extract(page_url, html)?;

        let lookup = match &self.api {
            Some(client) => client.fetch(&candidates.id).await,
            None => ApiLookup::Unavailable,
        };
        tracing::info!(
            business_id = %candidates.id,
            api_available = lookup.is_available(),
            "document extracted"
        );

        let mut record = merge(candidates, lookup.info())?;

        if let Some(launcher) = &self.launcher {
            record.read_more = self
                .run_browser_step("editorial blurb", Arc::clone(launcher), {
                    let locators = self.locators;
                    let url = page_url.to_owned();
                    move |launcher| reveal_blurb(launcher, &locators, &url)
                })
                .await?;
            record.amenities_and_more = self
                .run_browser_step("amenities", Arc::clone(launcher), {
                    let locators = self.locators;
                    let url = page_url.to_owned();
                    move |launcher| reveal_amenities(launcher, &locators, &url)
                })
                .await?;
        } else {
            tracing::debug!(
                page_url,
                "no browser configured; blurb and amenities left empty"
            );
        }

        tracing::info!(business_id = %record.id, "record assembled");
        Ok(record)
    }

    /// Runs one blocking browser procedure on the blocking pool, bounded by
    /// the browser timeout. A timed-out procedure is abandoned, not stopped:
    /// its session closes when it returns, and the binary shuts its runtime
    /// down without waiting for it.
    fn run_browser_step<T, F>(
        &self,
        step: &'static str,
        launcher: Arc<dyn SessionLauncher>,
        procedure: F,
    ) -> impl Future<Output = Result<T, ScraperError>>
    where
        T: Send + 'static,
        F: FnOnce(&dyn SessionLauncher) -> Result<T, ScraperError> + Send + 'static,
    {
        let timeout = self.browser_timeout;
        async move {
            let task = tokio::task::spawn_blocking(move || procedure(launcher.as_ref()));
            match tokio::time::timeout(timeout, task).await {
                Ok(joined) => joined?,
                Err(_) => {
                    tracing::warn!(step, limit = ?timeout, "browser procedure timed out");
                    Err(ScraperError::Timeout {
                        step,
                        limit: timeout,
                    })
                }
            }
        }
    }
}

/// Reconciles every document-backed field against the API record.
fn merge(page: PageCandidates, api: Option<&ApiInfo>) -> Result<BusinessRecord, ScraperError> {
    Ok(BusinessRecord {
        title: reconcile("name", page.title, api, ApiInfo::title)?,
        url: page.url,
        id: page.id,
        business_image_url: reconcile("image_url", page.image_url, api, ApiInfo::image)?,
        website: reconcile("url", page.website, api, ApiInfo::page_url)?,
        phone_number: reconcile("display_phone", page.phone, api, ApiInfo::phone)?,
        location: reconcile("location", page.location, api, ApiInfo::address)?,
        rating: reconcile("rating", page.rating, api, ApiInfo::rating_text)?,
        reviews: reconcile("review_count", page.reviews, api, ApiInfo::review_count_text)?,
        categories: reconcile("categories", page.categories, api, ApiInfo::category_titles)?,
        schedule: reconcile("hours", page.schedule, api, ApiInfo::schedule)?,
        read_more: Blurb::new(),
        amenities_and_more: String::new(),
    })
}
