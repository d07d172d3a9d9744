//! Listing page download.

use std::time::Duration;

use reqwest::Client;

use crate::error::ScraperError;

/// A downloaded listing page.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects. This is the record URL.
    pub url: String,
    pub html: String,
}

/// Builds the HTTP client used for page downloads.
///
/// # Errors
///
/// Returns [`ScraperError::Http`] if the client cannot be constructed.
pub fn build_page_client(timeout_secs: u64, user_agent: &str) -> Result<Client, ScraperError> {
    Ok(Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(user_agent)
        .build()?)
}

/// GETs `url` once and returns its body with the post-redirect URL.
///
/// # Errors
///
/// - [`ScraperError::InvalidUrl`] if `url` does not parse.
/// - [`ScraperError::Http`] on network failure or an unreadable body.
/// - [`ScraperError::UnexpectedStatus`] on any non-2xx status.
pub async fn fetch_page(client: &Client, url: &str) -> Result<FetchedPage, ScraperError> {
    let parsed = reqwest::Url::parse(url).map_err(|e| ScraperError::InvalidUrl {
        url: url.to_owned(),
        reason: e.to_string(),
    })?;

    let response = client
        .get(parsed)
        .header(reqwest::header::ACCEPT, "text/html,application/xhtml+xml")
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(ScraperError::UnexpectedStatus {
            status: status.as_u16(),
            url: url.to_owned(),
        });
    }

    let final_url = response.url().to_string();
    let html = response.text().await?;
    tracing::debug!(url = %final_url, bytes = html.len(), "listing page fetched");

    Ok(FetchedPage {
        url: final_url,
        html,
    })
}
