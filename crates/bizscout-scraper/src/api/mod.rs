//! HTTP client for the Yelp Fusion business-details endpoint.
//!
//! The API is a fallback source only: any failure here degrades to
//! [`ApiLookup::Unavailable`] and extraction carries on with page values.

mod types;

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::ScraperError;

pub use types::{ApiCategory, ApiField, ApiHours, ApiInfo, ApiLocation, ApiOpenSlot};

pub const DEFAULT_BASE_URL: &str = "https://api.yelp.com/v3/";

/// Outcome of one API lookup for the current page visit.
#[derive(Debug, Clone)]
pub enum ApiLookup {
    Available(Box<ApiInfo>),
    /// No credential configured, or the call failed.
    Unavailable,
}

impl ApiLookup {
    #[must_use]
    pub fn info(&self) -> Option<&ApiInfo> {
        match self {
            ApiLookup::Available(info) => Some(&**info),
            ApiLookup::Unavailable => None,
        }
    }

    #[must_use]
    pub fn is_available(&self) -> bool {
        matches!(self, ApiLookup::Available(_))
    }
}

/// Client for `GET {base}/businesses/{id}` with bearer authentication.
///
/// Holds an optional credential; without one, [`YelpClient::fetch`] returns
/// [`ApiLookup::Unavailable`] and makes no request.
pub struct YelpClient {
    client: Client,
    api_key: Option<String>,
    base_url: Url,
}

impl YelpClient {
    /// Creates a client pointed at the production Yelp API.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        api_key: Option<&str>,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ScraperError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the `reqwest::Client` cannot be
    /// constructed, or [`ScraperError::InvalidUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        api_key: Option<&str>,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash so joined segments land under the base path.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ScraperError::InvalidUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.map(str::to_owned),
            base_url,
        })
    }

    #[must_use]
    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    /// Looks up `business_id`, folding every failure into
    /// [`ApiLookup::Unavailable`].
    pub async fn fetch(&self, business_id: &str) -> ApiLookup {
        let Some(api_key) = self.api_key.as_deref() else {
            tracing::debug!(business_id, "no API credential configured; skipping API lookup");
            return ApiLookup::Unavailable;
        };

        match self.get_business(api_key, business_id).await {
            Ok(info) => {
                tracing::debug!(business_id, "API record fetched");
                ApiLookup::Available(Box::new(info))
            }
            Err(e) => {
                tracing::warn!(
                    business_id,
                    error = %e,
                    "API lookup failed; continuing without API fallback"
                );
                ApiLookup::Unavailable
            }
        }
    }

    /// Fetches and decodes one business record.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::InvalidUrl`] if the endpoint URL cannot be built.
    /// - [`ScraperError::Http`] on network failure.
    /// - [`ScraperError::UnexpectedStatus`] on any non-2xx status.
    /// - [`ScraperError::Deserialize`] if the body is not a JSON object of the
    ///   expected shape.
    pub async fn get_business(
        &self,
        api_key: &str,
        business_id: &str,
    ) -> Result<ApiInfo, ScraperError> {
        let url = self.business_url(business_id)?;
        let response = self
            .client
            .get(url.clone())
            .bearer_auth(api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str::<ApiInfo>(&body).map_err(|e| ScraperError::Deserialize {
            context: format!("business {business_id}"),
            source: e,
        })
    }

    fn business_url(&self, business_id: &str) -> Result<Url, ScraperError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ScraperError::InvalidUrl {
                url: self.base_url.to_string(),
                reason: "base URL cannot carry path segments".to_owned(),
            })?
            .pop_if_empty()
            .push("businesses")
            .push(business_id);
        Ok(url)
    }
}

#[cfg(test)]
#[path = "../api_test.rs"]
mod tests;
