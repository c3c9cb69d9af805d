//! Size and count extraction from description text.
//!
//! Descriptions like "Aquafina Water 16.9 oz 24 ct" carry the only size
//! and count data many feeds have. Extraction is regex based over the
//! lowercased text: one size quantity with a known unit, one count with
//! a `ct` marker. Text that matches neither yields empty attributes,
//! which is not an error.

use std::sync::LazyLock;

use pyo3::prelude::*;
use regex::Regex;

use crate::models;

/// Unit label reported for item counts.
pub const COUNT_UNIT: &str = "CT";

static SIZE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+(\.\d+)?)\s?(oz|fl oz|l|ml|gallon|gal)").unwrap());

static COUNT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)\s?ct").unwrap());

// ---------------------------------------------------------------------------
// Units
// ---------------------------------------------------------------------------

/// Canonical size units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeUnit {
    Oz,
    Gallon,
    Liter,
    Milliliter,
}

impl SizeUnit {
    fn from_token(token: &str) -> Option<SizeUnit> {
        match token {
            "oz" | "fl oz" => Some(SizeUnit::Oz),
            "gal" | "gallon" => Some(SizeUnit::Gallon),
            "l" => Some(SizeUnit::Liter),
            "ml" => Some(SizeUnit::Milliliter),
            _ => None,
        }
    }

    /// Uppercase label written to the catalog.
    pub fn label(self) -> &'static str {
        match self {
            SizeUnit::Oz => "OZ",
            SizeUnit::Gallon => "GALLON",
            SizeUnit::Liter => "L",
            SizeUnit::Milliliter => "ML",
        }
    }
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

/// Attributes parsed out of one description.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedAttributes {
    pub size_value: Option<String>,
    pub size_measure: Option<SizeUnit>,
    pub count_value: Option<String>,
}

impl ParsedAttributes {
    /// Count unit label, present whenever a count was found.
    pub fn count_measure(&self) -> Option<&'static str> {
        self.count_value.as_ref().map(|_| COUNT_UNIT)
    }
}

/// Parse size and count attributes from description text.
pub fn parse_description_impl(description: &str) -> ParsedAttributes {
    let lowered = description.to_lowercase();
    let mut parsed = ParsedAttributes::default();

    if let Some(caps) = SIZE_RE.captures(&lowered) {
        parsed.size_value = Some(caps[1].to_string());
        parsed.size_measure = SizeUnit::from_token(&caps[3]);
    }
    if let Some(caps) = COUNT_RE.captures(&lowered) {
        parsed.count_value = Some(caps[1].to_string());
    }

    parsed
}

/// Python-facing attribute extraction.
#[pyfunction]
pub fn parse_description(description: &str) -> models::ParsedAttributes {
    models::ParsedAttributes::from(&parse_description_impl(description))
}
