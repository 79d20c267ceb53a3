//! Per-request locale resolution.
//!
//! The locale is derived from the `Accept-Language` header once per request
//! and passed explicitly to whatever needs it; nothing is stored server-side.
//! Tags are not validated for well-formedness beyond a non-blank check.

use std::fmt;

use axum::http::{header::ACCEPT_LANGUAGE, HeaderMap};

/// A language tag selecting translated text (e.g. "en", "es", "zh-CN").
///
/// Tags are normalized to lowercase so catalog lookups are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
    tag: String,
}

impl Locale {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().trim().to_ascii_lowercase(),
        }
    }

    /// The full normalized tag (e.g. "es-mx").
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// The primary language subtag (e.g. "es" for "es-MX"), used as a
    /// catalog bucket when the full tag has no bundle.
    pub fn primary(&self) -> &str {
        self.tag
            .split(['-', '_'])
            .next()
            .unwrap_or(self.tag.as_str())
    }

    /// Derive the request locale from the `Accept-Language` header.
    ///
    /// A present, non-blank header yields a locale built from its first
    /// listed tag (quality weights are ignored); anything else yields the
    /// process-wide default. Pure function of its inputs.
    pub fn resolve(headers: &HeaderMap, default: &Locale) -> Locale {
        match headers.get(ACCEPT_LANGUAGE).and_then(|v| v.to_str().ok()) {
            Some(value) if !value.trim().is_empty() => Self::from_header_value(value),
            _ => default.clone(),
        }
    }

    /// First tag of an `Accept-Language` value, with any `;q=` weight
    /// stripped ("es-ES;q=0.9, en" -> "es-es").
    fn from_header_value(value: &str) -> Locale {
        let first = value.split(',').next().unwrap_or(value);
        let tag = first.split(';').next().unwrap_or(first);
        Locale::new(tag)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag)
    }
}
