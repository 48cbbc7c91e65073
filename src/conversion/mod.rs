/*!
 * Text conversion between the SutonnyMJ/Bijoy legacy encoding and Unicode Bengali.
 *
 * This module contains the pure, reentrant text layer:
 * - `glyph_tables`: The two direction-specific glyph tables
 * - `typography`: Sentence-final punctuation spacing
 * - `classifier`: Heuristic deciding whether ASCII text is legacy-encoded Bengali
 * - `legacy_to_unicode`: Legacy → Unicode converter
 * - `unicode_to_legacy`: Unicode → legacy converter
 * - `segmenter`: Bengali/Latin segmentation of mixed-script text
 *
 * Nothing in here touches documents or performs IO.
 */

pub mod classifier;
pub mod clusters;
pub mod glyph_tables;
pub mod legacy_to_unicode;
pub mod segmenter;
pub mod typography;
pub mod unicode_to_legacy;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

pub use classifier::{classify_script, is_likely_legacy_bengali, ScriptVerdict, VerdictReason};
pub use glyph_tables::GlyphMap;
pub use legacy_to_unicode::convert_legacy_to_unicode;
pub use segmenter::{segment, Segment};
pub use typography::normalize_typography;
pub use unicode_to_legacy::convert_unicode_to_legacy;

/// Direction of a conversion
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ConversionDirection {
    /// SutonnyMJ/Bijoy glyph text to Unicode Bengali
    #[default]
    LegacyToUnicode,
    /// Unicode Bengali to SutonnyMJ/Bijoy glyph text
    UnicodeToLegacy,
}

impl ConversionDirection {
    // @returns: Human readable direction label
    pub fn display_name(&self) -> &str {
        match self {
            Self::LegacyToUnicode => "Bijoy → Unicode",
            Self::UnicodeToLegacy => "Unicode → Bijoy",
        }
    }

    /// Convert `text` in this direction.
    pub fn convert(&self, text: &str) -> String {
        match self {
            Self::LegacyToUnicode => convert_legacy_to_unicode(text),
            Self::UnicodeToLegacy => convert_unicode_to_legacy(text),
        }
    }
}

impl std::fmt::Display for ConversionDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LegacyToUnicode => write!(f, "legacy-to-unicode"),
            Self::UnicodeToLegacy => write!(f, "unicode-to-legacy"),
        }
    }
}

impl std::str::FromStr for ConversionDirection {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "legacy-to-unicode" | "bijoy-to-unicode" | "l2u" => Ok(Self::LegacyToUnicode),
            "unicode-to-legacy" | "unicode-to-bijoy" | "u2l" => Ok(Self::UnicodeToLegacy),
            _ => Err(anyhow!("Invalid conversion direction: {}", s)),
        }
    }
}
