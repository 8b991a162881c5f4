//! Request parameter validation
//!
//! Validation runs before any store access, so a malformed request never
//! costs a network round trip.

use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum accepted slug length
pub const MAX_SLUG_LEN: usize = 100;

static SLUG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9-]+$").expect("slug pattern is valid"));

static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date pattern is valid"));

/// Whether `slug` is a valid animal slug: lowercase letters, digits and
/// hyphens, 1 to 100 characters
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty() && slug.len() <= MAX_SLUG_LEN && SLUG_RE.is_match(slug)
}

/// Whether `date` matches `YYYY-MM-DD`
///
/// Format check only; calendar validity is left to the store, which simply
/// finds no rows for an impossible date.
pub fn is_valid_date(date: &str) -> bool {
    DATE_RE.is_match(date)
}
