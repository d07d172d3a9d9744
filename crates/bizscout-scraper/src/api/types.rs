//! Yelp Fusion `GET /v3/businesses/{id}` response shape.
//!
//! Top-level fields are [`ApiField`]s so a key sent as `null` stays distinct
//! from a key that is not in the response at all. The Reconciler decides
//! whether either matters, and only when the page lacked the value.
//!
//! ### `hours`
//! An array of hour sets; the first (`hours_type = "REGULAR"`) is the weekly
//! schedule. `day` is `0` for Monday through `6` for Sunday; `start`/`end`
//! are `"HHMM"` 24-hour strings.

use serde::{Deserialize, Deserializer};

use crate::types::{Location, Schedule};

const DAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// One top-level response key.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiField<T> {
    /// Key not in the response.
    Missing,
    /// Key present with a `null` value.
    Null,
    Value(T),
}

impl<T> Default for ApiField<T> {
    fn default() -> Self {
        ApiField::Missing
    }
}

impl<T> ApiField<T> {
    #[must_use]
    pub fn as_ref(&self) -> ApiField<&T> {
        match self {
            ApiField::Missing => ApiField::Missing,
            ApiField::Null => ApiField::Null,
            ApiField::Value(v) => ApiField::Value(v),
        }
    }

    #[must_use]
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> ApiField<U> {
        match self {
            ApiField::Missing => ApiField::Missing,
            ApiField::Null => ApiField::Null,
            ApiField::Value(v) => ApiField::Value(f(v)),
        }
    }

    /// The value, treating `null` and a missing key alike.
    #[must_use]
    pub fn value(self) -> Option<T> {
        match self {
            ApiField::Value(v) => Some(v),
            ApiField::Missing | ApiField::Null => None,
        }
    }
}

// Only called for keys that are present; `#[serde(default)]` covers the rest.
impl<'de, T: Deserialize<'de>> Deserialize<'de> for ApiField<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(v) => ApiField::Value(v),
            None => ApiField::Null,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiInfo {
    pub name: ApiField<String>,
    pub url: ApiField<String>,
    pub image_url: ApiField<String>,
    pub display_phone: ApiField<String>,
    pub location: ApiField<ApiLocation>,
    pub rating: ApiField<f64>,
    pub review_count: ApiField<u64>,
    pub categories: ApiField<Vec<ApiCategory>>,
    pub hours: ApiField<Vec<ApiHours>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiLocation {
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub address3: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiCategory {
    #[serde(default)]
    pub alias: String,
    pub title: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiHours {
    #[serde(default)]
    pub open: Vec<ApiOpenSlot>,
    pub hours_type: Option<String>,
    pub is_open_now: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiOpenSlot {
    pub day: u8,
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub is_overnight: bool,
}

impl ApiInfo {
    #[must_use]
    pub fn title(&self) -> ApiField<String> {
        self.name.clone()
    }

    /// Business page URL on the vendor site. Also used as the website fallback.
    #[must_use]
    pub fn page_url(&self) -> ApiField<String> {
        self.url.clone()
    }

    #[must_use]
    pub fn image(&self) -> ApiField<String> {
        self.image_url.clone()
    }

    #[must_use]
    pub fn phone(&self) -> ApiField<String> {
        self.display_phone.clone()
    }

    #[must_use]
    pub fn address(&self) -> ApiField<Location> {
        self.location.as_ref().map(ApiLocation::to_location)
    }

    #[must_use]
    pub fn rating_text(&self) -> ApiField<String> {
        self.rating.as_ref().map(ToString::to_string)
    }

    #[must_use]
    pub fn review_count_text(&self) -> ApiField<String> {
        self.review_count.as_ref().map(ToString::to_string)
    }

    #[must_use]
    pub fn category_titles(&self) -> ApiField<Vec<String>> {
        self.categories
            .as_ref()
            .map(|cats| cats.iter().map(|c| c.title.clone()).collect())
    }

    /// Weekly schedule from the first hour set, one entry per day `Mon`..`Sun`.
    ///
    /// Days without an open slot read `"Closed"`; several slots on one day are
    /// joined with `", "`. An empty `hours` array reads as `null`.
    #[must_use]
    pub fn schedule(&self) -> ApiField<Schedule> {
        match self.hours.as_ref() {
            ApiField::Missing => ApiField::Missing,
            ApiField::Null => ApiField::Null,
            ApiField::Value(sets) => sets
                .first()
                .map_or(ApiField::Null, |regular| ApiField::Value(weekly_schedule(regular))),
        }
    }
}

fn weekly_schedule(regular: &ApiHours) -> Schedule {
    let mut schedule: Schedule = DAY_LABELS
        .iter()
        .map(|day| ((*day).to_owned(), String::new()))
        .collect();

    for slot in &regular.open {
        let Some(label) = DAY_LABELS.get(usize::from(slot.day)) else {
            tracing::debug!(day = slot.day, "ignoring out-of-range day in API hours");
            continue;
        };
        if let Some(hours) = schedule.get_mut(*label) {
            if !hours.is_empty() {
                hours.push_str(", ");
            }
            hours.push_str(&slot.display());
        }
    }

    for hours in schedule.values_mut() {
        if hours.is_empty() {
            hours.push_str("Closed");
        }
    }
    schedule
}

impl ApiLocation {
    fn to_location(&self) -> Location {
        let lines = [&self.address1, &self.address2, &self.address3]
            .into_iter()
            .flatten()
            .filter(|line| !line.trim().is_empty())
            .cloned();
        Location::new(
            lines,
            self.city.as_deref().unwrap_or_default(),
            self.state.as_deref().unwrap_or_default(),
            self.zip_code.as_deref().unwrap_or_default(),
        )
    }
}

impl ApiOpenSlot {
    /// `"9:00 AM - 5:00 PM"`, with `" (Next day)"` for overnight slots.
    fn display(&self) -> String {
        let mut out = format!("{} - {}", clock_12h(&self.start), clock_12h(&self.end));
        if self.is_overnight {
            out.push_str(" (Next day)");
        }
        out
    }
}

/// Renders `"HHMM"` as a 12-hour clock; anything unparseable passes through.
fn clock_12h(hhmm: &str) -> String {
    let Some((hour, minute)) = parse_hhmm(hhmm) else {
        return hhmm.to_owned();
    };
    let suffix = if hour < 12 { "AM" } else { "PM" };
    let display_hour = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{display_hour}:{minute:02} {suffix}")
}

fn parse_hhmm(hhmm: &str) -> Option<(u32, u32)> {
    if hhmm.len() != 4 {
        return None;
    }
    let hour = hhmm.get(..2)?.parse::<u32>().ok()?;
    let minute = hhmm.get(2..)?.parse::<u32>().ok()?;
    (hour < 24 && minute < 60).then_some((hour, minute))
}
