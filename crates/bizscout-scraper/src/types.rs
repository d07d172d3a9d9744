//! Output record and the intermediate per-page candidate values.

use indexmap::IndexMap;
use serde::Serialize;

/// Day label → opening hours, in page order (`"Mon"` first).
pub type Schedule = IndexMap<String, String>;

/// "From the business" sub-heading → concatenated paragraph text.
pub type Blurb = IndexMap<String, String>;

/// Postal address keyed `address1`, `address2`, ..., `city`, `state`, `zip_code`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Location(IndexMap<String, String>);

impl Location {
    #[must_use]
    pub fn new<I, S>(address_lines: I, city: &str, state: &str, zip_code: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut fields = IndexMap::new();
        for (idx, line) in address_lines.into_iter().enumerate() {
            fields.insert(format!("address{}", idx + 1), line.into());
        }
        fields.insert("city".to_owned(), city.to_owned());
        fields.insert("state".to_owned(), state.to_owned());
        fields.insert("zip_code".to_owned(), zip_code.to_owned());
        Self(fields)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        self.0.keys().map(String::as_str).collect()
    }
}

/// One listing page, fully extracted and reconciled.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BusinessRecord {
    pub title: Option<String>,
    /// The URL the page was fetched from. Always taken from the fetch, never the API.
    pub url: String,
    pub id: String,
    pub business_image_url: Option<String>,
    pub website: Option<String>,
    pub phone_number: Option<String>,
    pub location: Option<Location>,
    pub rating: Option<String>,
    pub reviews: Option<String>,
    pub categories: Option<Vec<String>>,
    pub schedule: Option<Schedule>,
    pub read_more: Blurb,
    pub amenities_and_more: String,
}

/// Raw values pulled from the static document before reconciliation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageCandidates {
    pub id: String,
    pub url: String,
    pub title: Option<String>,
    pub image_url: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub location: Option<Location>,
    pub rating: Option<String>,
    pub reviews: Option<String>,
    pub categories: Option<Vec<String>>,
    pub schedule: Option<Schedule>,
}
