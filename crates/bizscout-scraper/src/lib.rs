pub mod api;
pub mod assemble;
pub mod document;
pub mod error;
pub mod fetch;
pub mod locators;
pub mod parse_helpers;
pub mod reconcile;
pub mod reveal;
pub mod types;

pub use api::{ApiField, ApiInfo, ApiLookup, YelpClient};
pub use assemble::ListingExtractor;
pub use document::DocumentExtractor;
pub use error::ScraperError;
pub use fetch::{build_page_client, fetch_page, FetchedPage};
pub use locators::LocatorSet;
pub use reconcile::reconcile;
pub use reveal::{
    reveal_amenities, reveal_blurb, BrowserSession, ChromeLauncher, SessionLauncher,
};
pub use types::{Blurb, BusinessRecord, Location, PageCandidates, Schedule};
