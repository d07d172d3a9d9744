//! Page-versus-API reconciliation.
//!
//! The page value wins whenever it is present. The API is consulted only to
//! fill a field the page left empty, and never to override or cross-check a
//! value the page did provide.

use crate::api::{ApiField, ApiInfo};
use crate::error::ScraperError;

/// Resolves one field.
///
/// - `api` is `None` (lookup unavailable): `local` is returned as-is.
/// - `local` is `Some`: returned unchanged, `pick` is never called.
/// - `local` is `None`: `pick(api)` is substituted. A key sent as `null`
///   leaves the field absent.
///
/// # Errors
///
/// Returns [`ScraperError::ApiFieldMissing`] when a substitution is needed
/// but the API response does not carry the `field` key at all.
pub fn reconcile<T, F>(
    field: &'static str,
    local: Option<T>,
    api: Option<&ApiInfo>,
    pick: F,
) -> Result<Option<T>, ScraperError>
where
    F: FnOnce(&ApiInfo) -> ApiField<T>,
{
    let Some(info) = api else {
        return Ok(local);
    };
    if local.is_some() {
        return Ok(local);
    }

    tracing::warn!(field, "markup mismatch, API value substituted");
    match pick(info) {
        ApiField::Value(value) => Ok(Some(value)),
        ApiField::Null => {
            tracing::debug!(field, "API value is null; field left absent");
            Ok(None)
        }
        ApiField::Missing => Err(ScraperError::ApiFieldMissing { field }),
    }
}
