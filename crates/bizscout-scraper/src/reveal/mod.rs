//! Click-to-reveal extraction through a live browser.
//!
//! Some listing content only exists after a user clicks "Read more" or
//! "More Attributes". Each procedure here launches its own session, drives
//! it through navigate → click → read, and drops it before returning. The
//! session closes on drop, so every exit path releases the browser.

mod chrome;

use crate::error::ScraperError;
use crate::locators::LocatorSet;
use crate::parse_helpers::join_amenities;
use crate::types::Blurb;

pub use chrome::{ChromeLauncher, ChromeSession};

/// One exclusively-owned browser tab. Dropping it closes the tab.
pub trait BrowserSession {
    /// Loads `url` and waits for navigation to settle.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Browser`] if the page cannot be loaded.
    fn navigate(&mut self, url: &str) -> Result<(), ScraperError>;

    /// Clicks the first element matching `xpath`.
    ///
    /// Returns `Ok(false)` when nothing matches.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Browser`] if the element exists but the click fails.
    fn click(&mut self, xpath: &str) -> Result<bool, ScraperError>;

    /// Visible text of every element matching `xpath`, in document order.
    /// No match yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Browser`] if text cannot be read from a match.
    fn texts(&mut self, xpath: &str) -> Result<Vec<String>, ScraperError>;

    /// Number of elements matching `xpath`.
    ///
    /// # Errors
    ///
    /// Same as [`BrowserSession::texts`].
    fn count(&mut self, xpath: &str) -> Result<usize, ScraperError> {
        Ok(self.texts(xpath)?.len())
    }
}

/// Opens a fresh [`BrowserSession`] per call.
pub trait SessionLauncher: Send + Sync {
    /// # Errors
    ///
    /// Returns [`ScraperError::Browser`] if the browser cannot be started.
    fn launch(&self) -> Result<Box<dyn BrowserSession>, ScraperError>;
}

/// XPath for the `index`-th (1-based) match of `base`, then `suffix` under it.
fn nth(base: &str, index: usize, suffix: &str) -> String {
    format!("({base})[{index}]{suffix}")
}

/// Reads the "From the business" editorial sections.
///
/// Clicks "Read more", seeds one empty entry per sub-heading, then appends
/// the text of every paragraph that is a direct child of a section container
/// to that container's heading.
///
/// # Errors
///
/// Returns [`ScraperError::ExtractionFailed`] when the "Read more" control
/// is missing, and propagates any browser failure.
pub fn reveal_blurb(
    launcher: &dyn SessionLauncher,
    locators: &LocatorSet,
    url: &str,
) -> Result<Blurb, ScraperError> {
    let mut session = launcher.launch()?;
    tracing::debug!(url, "browser session launched for editorial blurb");
    session.navigate(url)?;

    if !session.click(locators.read_more_control)? {
        tracing::warn!(url, "\"Read more\" control not found");
        return Err(ScraperError::ExtractionFailed {
            what: "\"Read more\" control not found".to_owned(),
        });
    }

    let mut blurb = Blurb::new();
    for header in session.texts(locators.blurb_headers)? {
        blurb.entry(header).or_default();
    }

    let sections = session.count(locators.blurb_sections)?;
    for index in 1..=sections {
        let Some(heading) = session
            .texts(&nth(locators.blurb_sections, index, "//h5"))?
            .into_iter()
            .next()
        else {
            tracing::debug!(index, "blurb section without a heading");
            continue;
        };
        let paragraphs = session.texts(&nth(locators.blurb_sections, index, "/p"))?;
        let entry = blurb.entry(heading).or_default();
        for paragraph in paragraphs {
            entry.push_str(&paragraph);
        }
    }

    tracing::debug!(url, sections = blurb.len(), "editorial blurb read");
    Ok(blurb)
}

/// Reads the "Amenities and More" tag list as one `", "`-terminated string.
///
/// The "More Attributes" expander is optional; without it, whatever tags are
/// already visible are used.
///
/// # Errors
///
/// Propagates browser failures other than a missing expander.
pub fn reveal_amenities(
    launcher: &dyn SessionLauncher,
    locators: &LocatorSet,
    url: &str,
) -> Result<String, ScraperError> {
    let mut session = launcher.launch()?;
    tracing::debug!(url, "browser session launched for amenities");
    session.navigate(url)?;

    if !session.click(locators.more_attributes_control)? {
        tracing::info!(url, "no \"More Attributes\" control; using visible amenities");
    }

    let tags = session.texts(locators.amenity_tags)?;
    let amenities = join_amenities(&tags);
    tracing::debug!(url, tags = tags.len(), "amenities read");
    Ok(amenities)
}

#[cfg(test)]
#[path = "../reveal_test.rs"]
mod tests;
