//! Text-level transforms applied to values the locators return.
//!
//! Everything here is pure and operates on already-collected strings, so the
//! document walker and the browser revealer can share the same routines.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::{Location, Schedule};

static BIZ_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/biz/([a-zA-Z0-9-]*)\?").expect("valid biz link regex"));

// Anchored at the start only: "Wifi 2" is kept because its prefix matches.
static AMENITY_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z ]+").expect("valid amenity regex"));

/// Days in a weekly schedule table.
const SCHEDULE_DAYS: usize = 7;

const AMENITY_SEPARATOR: &str = ", ";

/// Returns the business id from the first `/biz/<id>?` occurrence in `href`.
#[must_use]
pub fn capture_business_id(href: &str) -> Option<String> {
    BIZ_LINK_RE
        .captures(href)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_owned())
}

/// Builds a [`Location`] from address lines where the last line reads
/// `"<City>, <STATE> <ZIP>"`.
///
/// Returns `None` when there are no lines, the last line has no comma, or
/// the part after the comma has fewer than two whitespace-separated tokens.
#[must_use]
pub fn split_location(lines: &[String]) -> Option<Location> {
    let (last, street) = lines.split_last()?;
    let mut parts = last.split(',');
    let city = parts.next()?;
    let mut tail = parts.next()?.split_whitespace();
    let state = tail.next()?;
    let zip_code = tail.next()?;
    Some(Location::new(street.iter().cloned(), city, state, zip_code))
}

/// Pairs `[day, hours, day, hours, ...]` into a seven-day schedule.
///
/// Returns `None` when fewer than 14 tokens are available. Tokens past the
/// fourteenth are ignored.
#[must_use]
pub fn pair_schedule(tokens: &[String]) -> Option<Schedule> {
    if tokens.len() < SCHEDULE_DAYS * 2 {
        return None;
    }
    let schedule = tokens
        .chunks_exact(2)
        .take(SCHEDULE_DAYS)
        .map(|pair| (pair[0].clone(), pair[1].clone()))
        .collect();
    Some(schedule)
}

/// Second paragraph under the "Phone number" label; the first is the label itself.
#[must_use]
pub fn phone_from_label_group(texts: &[String]) -> Option<String> {
    texts.get(1).cloned()
}

/// Joins amenity tags that start with letters/spaces, each followed by `", "`.
///
/// The trailing separator is kept: `["Parking", "Wifi"]` → `"Parking, Wifi, "`.
#[must_use]
pub fn join_amenities<S: AsRef<str>>(tokens: &[S]) -> String {
    let mut joined = String::new();
    for token in tokens {
        let token = token.as_ref();
        if AMENITY_TOKEN_RE.is_match(token) {
            joined.push_str(token);
            joined.push_str(AMENITY_SEPARATOR);
        }
    }
    joined
}
