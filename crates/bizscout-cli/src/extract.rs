//! `extract` command handler.

use std::path::PathBuf;

use anyhow::Context;
use bizscout_core::AppConfig;
use bizscout_scraper::{
    build_page_client, fetch_page, BusinessRecord, FetchedPage, ListingExtractor,
};

#[derive(Debug, Default)]
pub(crate) struct ExtractOptions {
    pub html_file: Option<PathBuf>,
    pub no_browser: bool,
    pub compact: bool,
}

/// Loads the page (from disk or the network), runs the extractor, and prints
/// the record to stdout.
pub(crate) async fn run_extract(
    config: &AppConfig,
    url: &str,
    options: &ExtractOptions,
) -> anyhow::Result<()> {
    let page = load_page(config, url, options.html_file.as_ref()).await?;

    let mut extractor = ListingExtractor::from_config(config)?;
    if options.no_browser {
        extractor = extractor.without_browser();
    }

    tracing::info!(
        url = %page.url,
        markup = %config.markup_version,
        api = config.api_key.is_some(),
        browser = !options.no_browser,
        "extracting listing"
    );
    let record = extractor
        .extract(&page.url, &page.html)
        .await
        .with_context(|| format!("extraction failed for {}", page.url))?;

    println!("{}", render_record(&record, options.compact)?);
    Ok(())
}

async fn load_page(
    config: &AppConfig,
    url: &str,
    html_file: Option<&PathBuf>,
) -> anyhow::Result<FetchedPage> {
    if let Some(path) = html_file {
        let html = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?;
        return Ok(FetchedPage {
            url: url.to_owned(),
            html,
        });
    }

    let client = build_page_client(config.request_timeout_secs, &config.user_agent)?;
    fetch_page(&client, url)
        .await
        .with_context(|| format!("failed to fetch {url}"))
}

fn render_record(record: &BusinessRecord, compact: bool) -> anyhow::Result<String> {
    let rendered = if compact {
        serde_json::to_string(record)?
    } else {
        serde_json::to_string_pretty(record)?
    };
    Ok(rendered)
}
