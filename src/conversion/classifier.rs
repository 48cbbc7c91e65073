/*!
 * Heuristic deciding whether ASCII-range text is legacy-encoded Bengali.
 *
 * Only consulted in force mode, when a run's font does not say which
 * encoding it holds. The rules are ordered; the first one that fires wins.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use super::clusters::is_bengali;

/// Which rule produced a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerdictReason {
    /// Empty or whitespace-only text
    Empty,
    /// Already contains Unicode Bengali
    ContainsUnicodeBengali,
    /// Extended-ASCII bytes or the dagger vowel-lead glyphs
    LegacyMarkers,
    /// A characteristic legacy ASCII sequence
    LegacyPattern,
    /// Plain ASCII holding a common English word
    EnglishWords,
    /// Nothing decided; the default bias applies
    Ambiguous,
}

/// Outcome of [`classify_script`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptVerdict {
    pub is_legacy: bool,
    pub reason: VerdictReason,
}

impl ScriptVerdict {
    fn new(is_legacy: bool, reason: VerdictReason) -> Self {
        Self { is_legacy, reason }
    }

    /// `true` when the default bias decided
    pub fn is_ambiguous(&self) -> bool {
        self.reason == VerdictReason::Ambiguous
    }
}

/// Characteristic legacy ASCII sequences
static LEGACY_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // aa-sign between letters
        r"[A-Za-z]v[A-Za-z]",
        // word-initial e
        r"^G[A-Za-z]",
        r"[†‡][A-Za-z]",
        // legacy danda at the end
        r"\|$",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("Invalid legacy pattern regex"))
    .collect()
});

static SIMPLE_ENGLISH_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^[a-zA-Z0-9\s.,;:!?'"()\-/\\@#$%&*+=\[\]{}<>|_]+$"#).expect("Invalid simple English regex")
});

static COMMON_ENGLISH_WORDS_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(the|and|this|that|with|from|your|have|will|shall|been|should|would|could|about|which|there|their|after|before|between|under|over|through|during|including|against|without|because|although|though|since|until|while)\b",
    )
    .expect("Invalid common English words regex")
});

fn has_legacy_markers(text: &str) -> bool {
    text.chars()
        .any(|c| ('\u{80}'..='\u{FF}').contains(&c) || c == '†' || c == '‡')
}

fn looks_like_english(text: &str) -> bool {
    SIMPLE_ENGLISH_REGEX.is_match(text) && COMMON_ENGLISH_WORDS_REGEX.is_match(text)
}

/// Classify `text`, reporting which rule decided.
pub fn classify_script(text: &str) -> ScriptVerdict {
    if text.trim().is_empty() {
        return ScriptVerdict::new(false, VerdictReason::Empty);
    }

    if text.chars().any(is_bengali) {
        return ScriptVerdict::new(false, VerdictReason::ContainsUnicodeBengali);
    }

    if has_legacy_markers(text) {
        return ScriptVerdict::new(true, VerdictReason::LegacyMarkers);
    }

    if LEGACY_PATTERNS.iter().any(|pattern| pattern.is_match(text)) {
        return ScriptVerdict::new(true, VerdictReason::LegacyPattern);
    }

    if looks_like_english(text) {
        return ScriptVerdict::new(false, VerdictReason::EnglishWords);
    }

    ScriptVerdict::new(true, VerdictReason::Ambiguous)
}

/// `true` when `text` should be treated as legacy-encoded Bengali.
pub fn is_likely_legacy_bengali(text: &str) -> bool {
    classify_script(text).is_legacy
}
