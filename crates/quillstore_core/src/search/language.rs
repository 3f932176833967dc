//! Search language negotiation from weighted header input.
//!
//! # Responsibility
//! - Map `Accept-Language`-style header values onto the closed set of
//!   languages the text index supports.
//! - Guarantee a non-empty result via the `En` fallback.
//!
//! # Invariants
//! - Result order follows entry weights, ties keep header order.
//! - Duplicates collapse to their first occurrence.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

// Primary language subtag, optional region subtags, optional quality weight.
static LANGUAGE_RANGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(\*|[a-z]{1,8})(?:-[a-z0-9]{1,8})*\s*(?:;\s*q\s*=\s*(\d+(?:\.\d{0,3})?)\s*)?$")
        .expect("valid language range regex")
});

/// Languages the text index supports, per the store's text-search
/// language list. Closed set; no runtime extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchLanguage {
    Da,
    De,
    En,
    Es,
    Fi,
    Fr,
    Hu,
    It,
    Nb,
    Nl,
    Pt,
    Ro,
    Ru,
    Sv,
    Tr,
}

impl SearchLanguage {
    /// Fallback used whenever negotiation produces nothing.
    pub const DEFAULT: Self = Self::En;

    pub fn code(self) -> &'static str {
        match self {
            Self::Da => "da",
            Self::De => "de",
            Self::En => "en",
            Self::Es => "es",
            Self::Fi => "fi",
            Self::Fr => "fr",
            Self::Hu => "hu",
            Self::It => "it",
            Self::Nb => "nb",
            Self::Nl => "nl",
            Self::Pt => "pt",
            Self::Ro => "ro",
            Self::Ru => "ru",
            Self::Sv => "sv",
            Self::Tr => "tr",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_ascii_lowercase().as_str() {
            "da" => Some(Self::Da),
            "de" => Some(Self::De),
            "en" => Some(Self::En),
            "es" => Some(Self::Es),
            "fi" => Some(Self::Fi),
            "fr" => Some(Self::Fr),
            "hu" => Some(Self::Hu),
            "it" => Some(Self::It),
            "nb" => Some(Self::Nb),
            "nl" => Some(Self::Nl),
            "pt" => Some(Self::Pt),
            "ro" => Some(Self::Ro),
            "ru" => Some(Self::Ru),
            "sv" => Some(Self::Sv),
            "tr" => Some(Self::Tr),
            _ => None,
        }
    }
}

struct LanguageRange {
    primary: String,
    weight: f32,
}

/// Resolves preferred search languages from a weighted header value.
///
/// Returns a priority-ordered, duplicate-free list. Missing, blank or
/// fully unmatched input yields `[SearchLanguage::DEFAULT]`. Region
/// subtags are ignored (`fr-CA` counts as `fr`), `q=0` entries are
/// excluded, and wildcard ranges fall through to the default.
pub fn negotiate_languages(header_value: Option<&str>) -> Vec<SearchLanguage> {
    let Some(raw) = header_value else {
        return vec![SearchLanguage::DEFAULT];
    };
    if raw.trim().is_empty() {
        return vec![SearchLanguage::DEFAULT];
    }

    let mut ranges: Vec<LanguageRange> = raw.split(',').filter_map(parse_range).collect();
    // Stable sort: equal weights keep header order.
    ranges.sort_by(|a, b| b.weight.partial_cmp(&a.weight).unwrap_or(std::cmp::Ordering::Equal));

    let mut languages = Vec::new();
    for range in &ranges {
        if let Some(language) = SearchLanguage::from_code(&range.primary) {
            if !languages.contains(&language) {
                languages.push(language);
            }
        }
    }

    if languages.is_empty() {
        return vec![SearchLanguage::DEFAULT];
    }

    languages
}

fn parse_range(entry: &str) -> Option<LanguageRange> {
    let captures = LANGUAGE_RANGE_RE.captures(entry)?;

    let primary = captures.get(1)?.as_str();
    if primary == "*" {
        return None;
    }

    let weight = match captures.get(2) {
        Some(quality) => quality.as_str().parse::<f32>().ok()?,
        None => 1.0,
    };
    if weight <= 0.0 {
        return None;
    }

    Some(LanguageRange {
        primary: primary.to_string(),
        weight,
    })
}
