//! CMS locales and site language codes.

use serde::{Deserialize, Serialize};

/// Locale a content node was authored in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "en-US")]
    EnUs,

    #[serde(rename = "fi-FI")]
    FiFi,
}

impl Locale {
    /// Map a site language code ("en", "fi") to its CMS locale.
    ///
    /// Unknown languages fall back to English.
    pub fn from_language(language: &str) -> Self {
        match language.to_lowercase().as_str() {
            "fi" => Locale::FiFi,
            _ => Locale::EnUs,
        }
    }

    /// CMS locale code
    pub fn code(self) -> &'static str {
        match self {
            Locale::EnUs => "en-US",
            Locale::FiFi => "fi-FI",
        }
    }

    /// Site language code
    pub fn language(self) -> &'static str {
        match self {
            Locale::EnUs => "en",
            Locale::FiFi => "fi",
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Locale {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "en-us" | "en" => Ok(Locale::EnUs),
            "fi-fi" | "fi" => Ok(Locale::FiFi),
            _ => anyhow::bail!("Unknown locale: {}", s),
        }
    }
}
