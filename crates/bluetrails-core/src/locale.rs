//! The recognized locale set
//!
//! Content is translated into a fixed set of locales. English is the default
//! and the fallback target when a translation has no rows.

use serde::{Deserialize, Serialize};

/// A recognized content locale
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English, the default and fallback locale
    #[default]
    En,
    /// Indonesian
    Id,
    /// Hindi
    Hi,
    /// Chinese
    Zh,
}

impl Locale {
    /// All locales accepted by the `locale` query parameter
    pub const SUPPORTED: [Locale; 4] = [Locale::En, Locale::Id, Locale::Hi, Locale::Zh];

    /// Parse a locale code, returning `None` for anything outside the set
    pub fn parse(code: &str) -> Option<Self> {
        match code {
            "en" => Some(Locale::En),
            "id" => Some(Locale::Id),
            "hi" => Some(Locale::Hi),
            "zh" => Some(Locale::Zh),
            _ => None,
        }
    }

    /// The locale code as it appears in store rows and query parameters
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Id => "id",
            Locale::Hi => "hi",
            Locale::Zh => "zh",
        }
    }

    /// Whether this is the default locale (no fallback applies)
    pub fn is_default(&self) -> bool {
        *self == Locale::En
    }

    /// Comma-separated list of supported codes, for error messages
    pub fn supported_codes() -> String {
        Self::SUPPORTED
            .iter()
            .map(|l| l.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
