/*!
 * Font-family names that drive per-run conversion decisions.
 */

use serde::{Deserialize, Serialize};

use crate::conversion::ConversionDirection;

/// Default legacy family markers, matched as case-insensitive substrings
pub const DEFAULT_LEGACY_MARKERS: &[&str] = &["sutonny", "suttony", "bijoy"];

/// Font forced onto Bengali text converted to the legacy encoding
pub const DEFAULT_LEGACY_FONT: &str = "SutonnyMJ";

/// Font given to runs converted from the legacy encoding
pub const DEFAULT_UNICODE_FONT: &str = "Bornomala";

const LATIN_FONTS: &[&str] = &[
    "calibri",
    "arial",
    "times new roman",
    "cambria",
    "verdana",
    "tahoma",
    "segoe ui",
    "trebuchet ms",
    "courier new",
    "georgia",
    "garamond",
    "helvetica",
];

const UNICODE_BENGALI_FONTS: &[&str] = &[
    "vrinda",
    "nikosh",
    "solaimanlipi",
    "kalpurush",
    "siyam rupali",
    "adelon",
    "akashee",
    "ani",
    "asomiya",
    "benesen",
    "beneseniap",
    "bengali",
    "mukti",
    "sagormy",
    "shonar",
];

const CODE_FONTS: &[&str] = &[
    "consolas",
    "courier",
    "monaco",
    "menlo",
    "lucida",
    "fira",
    "roboto",
    "open sans",
    "lato",
];

fn owned(names: &[&[&str]]) -> Vec<String> {
    names
        .iter()
        .flat_map(|group| group.iter())
        .map(|name| name.to_string())
        .collect()
}

fn contains_any(font: &str, needles: &[String]) -> bool {
    let font = font.to_lowercase();
    needles
        .iter()
        .any(|needle| !needle.is_empty() && font.contains(&needle.to_lowercase()))
}

/// Font names used to decide which runs convert and what they become
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FontPolicy {
    /// Substrings identifying a legacy-encoded font family
    pub legacy_markers: Vec<String>,

    /// Font forced onto text converted to the legacy encoding
    pub legacy_font: String,

    /// Font given to runs converted to Unicode
    pub unicode_font: String,

    /// Fonts never converted to Unicode, even in force mode
    pub unicode_skip_fonts: Vec<String>,

    /// Fonts whose runs are never converted to the legacy encoding
    pub legacy_skip_fonts: Vec<String>,
}

impl Default for FontPolicy {
    fn default() -> Self {
        Self {
            legacy_markers: owned(&[DEFAULT_LEGACY_MARKERS]),
            legacy_font: DEFAULT_LEGACY_FONT.to_string(),
            unicode_font: DEFAULT_UNICODE_FONT.to_string(),
            unicode_skip_fonts: owned(&[LATIN_FONTS, UNICODE_BENGALI_FONTS]),
            legacy_skip_fonts: owned(&[LATIN_FONTS, CODE_FONTS]),
        }
    }
}

impl FontPolicy {
    /// `true` when `font` names a legacy-encoded family
    pub fn is_legacy_font(&self, font: &str) -> bool {
        contains_any(font, &self.legacy_markers)
    }

    /// `true` when runs in `font` must be left alone in `direction`
    pub fn is_skipped_font(&self, font: &str, direction: ConversionDirection) -> bool {
        match direction {
            ConversionDirection::LegacyToUnicode => contains_any(font, &self.unicode_skip_fonts),
            ConversionDirection::UnicodeToLegacy => contains_any(font, &self.legacy_skip_fonts),
        }
    }
}
