/*!
 * Glyph tables for the SutonnyMJ/Bijoy legacy encoding.
 *
 * The legacy fonts place Bengali glyphs on ASCII and Windows-1252 code
 * points in visual order. Two independently authored tables describe the
 * mapping, one per direction; the Unicode→legacy table carries conjunct
 * clusters that never need to be read back, the legacy→Unicode table carries
 * disambiguation entries for common typing and OCR variants.
 */

use once_cell::sync::Lazy;
use std::collections::HashMap;

use super::ConversionDirection;

/// Legacy glyph that renders a reph above the preceding cluster.
pub const REPH_GLYPH: &str = "\u{A9}";

/// Legacy composite glyph for a ra-phala below the preceding consonant.
pub const RA_PHALA_GLYPH: &str = "\u{D6}";

/// An immutable key/value glyph table with a longest-first match index.
#[derive(Debug)]
pub struct GlyphMap {
    entries: HashMap<&'static str, &'static str>,
    sorted_keys: Vec<&'static str>,
    by_first_char: HashMap<char, Vec<&'static str>>,
}

impl GlyphMap {
    /// Build a table from literal pairs. A repeated key keeps its first
    /// position in the key order but takes the last value.
    pub fn from_entries(pairs: &'static [(&'static str, &'static str)]) -> Self {
        let mut entries = HashMap::with_capacity(pairs.len());
        let mut sorted_keys = Vec::with_capacity(pairs.len());

        for &(key, value) in pairs {
            if key.is_empty() {
                continue;
            }
            if entries.insert(key, value).is_none() {
                sorted_keys.push(key);
            }
        }

        // Stable, so equal-length keys keep table order
        sorted_keys.sort_by_key(|key| std::cmp::Reverse(key.chars().count()));

        let mut by_first_char: HashMap<char, Vec<&'static str>> = HashMap::new();
        for &key in &sorted_keys {
            if let Some(first) = key.chars().next() {
                by_first_char.entry(first).or_default().push(key);
            }
        }

        Self {
            entries,
            sorted_keys,
            by_first_char,
        }
    }

    /// Look up the value mapped to an exact key.
    pub fn get(&self, key: &str) -> Option<&'static str> {
        self.entries.get(key).copied()
    }

    /// All keys, longest first.
    pub fn sorted_keys(&self) -> &[&'static str] {
        &self.sorted_keys
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find the longest key that is a prefix of `text`.
    ///
    /// Returns the matched key and its mapped value. Only keys sharing the
    /// first character are tried, which gives the same answer as walking
    /// the whole longest-first key list.
    pub fn longest_match(&self, text: &str) -> Option<(&'static str, &'static str)> {
        let first = text.chars().next()?;
        self.by_first_char
            .get(&first)?
            .iter()
            .find(|key| text.starts_with(**key))
            .and_then(|key| self.entries.get(key).map(|value| (*key, *value)))
    }
}

/// Legacy→Unicode table.
pub static LEGACY_TO_UNICODE: Lazy<GlyphMap> =
    Lazy::new(|| GlyphMap::from_entries(LEGACY_TO_UNICODE_ENTRIES));

/// Unicode→legacy table.
pub static UNICODE_TO_LEGACY: Lazy<GlyphMap> =
    Lazy::new(|| GlyphMap::from_entries(UNICODE_TO_LEGACY_ENTRIES));

/// Table used when converting in the given direction.
pub fn table(direction: ConversionDirection) -> &'static GlyphMap {
    match direction {
        ConversionDirection::LegacyToUnicode => &LEGACY_TO_UNICODE,
        ConversionDirection::UnicodeToLegacy => &UNICODE_TO_LEGACY,
    }
}

/// Keys of the table for `direction`, longest first.
pub fn sorted_keys(direction: ConversionDirection) -> &'static [&'static str] {
    table(direction).sorted_keys()
}

/// Map a legacy glyph sequence to Unicode.
pub fn legacy_to_unicode(key: &str) -> Option<&'static str> {
    LEGACY_TO_UNICODE.get(key)
}

/// Map a Unicode grapheme or conjunct to its legacy glyph sequence.
pub fn unicode_to_legacy(key: &str) -> Option<&'static str> {
    UNICODE_TO_LEGACY.get(key)
}

/// Literal replace-all passes applied to legacy text before mapping, in
/// order. They undo substitutions produced by broken keyboard drivers.
pub const ANSI_FIXUPS: &[(&str, &str)] = &[
    ("GZ†", "G†Z"), ("†ga¨", "g†a¨"), ("P&P", "”P"), ("¨y", "y¨"),
    ("©„", "©…"), ("vu", "uv"), ("xu", "ux"),
];

#[rustfmt::skip]
const LEGACY_TO_UNICODE_ENTRIES: &[(&str, &str)] = &[
    ("0", "০"), ("1", "১"), ("2", "২"), ("3", "৩"),
    ("4", "৪"), ("5", "৫"), ("6", "৬"), ("7", "৭"),
    ("8", "৮"), ("9", "৯"), ("A", "অ"), ("Av", "আ"),
    ("B", "ই"), ("C", "ঈ"), ("D", "উ"), ("E", "ঊ"),
    ("F", "ঋ"), ("G", "এ"), ("H", "ঐ"), ("I", "ও"),
    ("J", "ঔ"), ("K", "ক"), ("L", "খ"), ("M", "গ"),
    ("N", "ঘ"), ("O", "ঙ"), ("P", "চ"), ("Q", "ছ"),
    ("R", "জ"), ("S", "ঝ"), ("T", "ঞ"), ("U", "ট"),
    ("V", "ঠ"), ("W", "ড"), ("X", "ঢ"), ("Y", "ণ"),
    ("Z", "ত"), ("_", "থ"), ("`", "দ"), ("a", "ধ"),
    ("b", "ন"), ("c", "প"), ("d", "ফ"), ("e", "ব"),
    ("f", "ভ"), ("g", "ম"), ("h", "য"), ("i", "র"),
    ("j", "ল"), ("k", "শ"), ("l", "ষ"), ("m", "স"),
    ("n", "হ"), ("o", "ড়"), ("p", "ঢ়"), ("q", "য়"),
    ("r", "ৎ"), ("s", "ং"), ("t", "ঃ"), ("u", "ঁ"),
    ("v", "া"), ("w", "ি"), ("x", "ী"), ("y", "ু"),
    ("~", "ূ"), ("¨", "্য"), ("„", "ৃ"), ("^", "ৈ"),
    ("†Š", "ৌ"), ("Š", "ৗ"), ("†", "ে"), ("†v", "ো"),
    ("&", "্"), ("|", "।"), ("||", "॥"), ("Ô", "‘"),
    ("Õ", "’"), ("Ò", "“"), ("Ó", "”"), ("$", "৳"),
    ("¸", "গু"), ("¶", "ক্ষ"), ("¤œ", "ম্ন"), ("µ", "ক্র"),
    ("°", "ক্ক"), ("¤ª", "ম্র"), ("±", "ক্ট"), ("³", "ক্ত"),
    ("K¡", "ক্ব"), ("wK¬", "ক্লি"), ("K¬", "ক্ল"), ("·", "ক্স"),
    ("Lª", "খ্র"), ("M&`", "গ্দ"), ("»", "গ্ধ"), ("Mœ", "গ্ন"),
    ("M¥", "গ্ম"), ("MÖ", "গ্র"), ("Mø", "গ্ল"), ("¼", "ঙ্ক"),
    ("•L", "ঙ্খ"), ("½", "ঙ্গ"), ("•N", "ঙ্ঘ"), ("”P", "চ্চ"),
    ("”Q", "চ্ছ"), ("¾", "জ্জ"), ("À", "জ্ঝ"), ("Á", "জ্ঞ"),
    ("R¡", "জ্ব"), ("Rª", "জ্র"), ("Â", "ঞ্চ"), ("Ã", "ঞ্ছ"),
    ("Ä", "ঞ্জ"), ("Å", "ঞ্ঝ"), ("Æ", "ট্ট"), ("U¡", "ট্ব"),
    ("U¥", "ট্ম"), ("Uª", "ট্র"), ("Ç", "ড্ড"), ("Wª", "ড্র"),
    ("Xª", "ঢ্র"), ("È", "ণ্ট"), ("É", "ণ্ঠ"), ("Ð", "ণ্ড"),
    ("Yœ", "ণ্ণ"), ("Ë", "ত্ত"), ("Ì", "ত্থ"), ("Zœ", "ত্ন"),
    ("Z¥", "ত্ম"), ("Î", "ত্র"), ("Ï", "দ্দ"), ("×", "দ্ধ"),
    ("Ø", "দ্ব"), ("™¢", "দ্ভ"), ("Ù", "দ্ম"), ("`ª", "দ্র"),
    ("aŸ", "ধ্ব"), ("a¥", "ধ্ম"), ("šÍ", "ন্ত"), ("Ý", "ন্স"),
    ("š’", "ন্থ"), ("›`", "ন্দ"), ("Ü", "ন্ধ"), ("bœ", "ন্ন"),
    ("b¥", "ন্ম"), ("Þ", "প্ট"), ("ß", "প্ত"), ("cœ", "প্ন"),
    ("à", "প্প"), ("cÖ", "প্র"), ("cø", "প্ল"), ("á", "প্স"),
    ("d«", "ফ্র"), ("d¬", "ফ্ল"), ("â", "ব্জ"), ("ã", "ব্দ"),
    ("ä", "ব্ধ"), ("eŸ", "ব্ব"), ("eª", "ব্র"), ("eø", "ব্ল"),
    ("å", "ভ্র"), ("ç", "ম্ফ"), ("¤^", "ম্ব"), ("¤¢", "ম্ভ"),
    ("¤§", "ম্ম"), ("¤ø", "ম্ল"), ("é", "ল্ক"), ("ê", "ল্গ"),
    ("ë", "ল্ট"), ("ì", "ল্ড"), ("í", "ল্প"), ("j¦", "ল্ব"),
    ("j¥", "ল্ম"), ("jø", "ল্ল"), ("ð", "শ্চ"), ("kœ", "শ্ন"),
    ("k^", "শ্ব"), ("k¥", "শ্ম"), ("kø", "শ্ল"), ("®‹", "ষ্ক"),
    ("ó", "ষ্ট"), ("ô", "ষ্ঠ"), ("ò", "ষ্ণ"), ("®ú", "ষ্প"),
    ("õ", "ষ্ফ"), ("®§", "ষ্ম"), ("¯‹", "স্ক"), ("ö", "স্খ"),
    ("÷", "স্ট"), ("¯Í", "স্ত"), ("¯’", "স্থ"), ("mœ", "স্ন"),
    ("¯ú", "স্প"), ("ù", "স্ফ"), ("¯^", "স্ব"), ("¯§", "স্ম"),
    ("¯ø", "স্ল"), ("nè", "হ্ণ"), ("ý", "হ্ন"), ("þ", "হ্ম"),
    ("n¬", "হ্ল"), ("û", "হু"), ("ü", "হৃ"), ("ï", "শু"),
    ("³ª", "ক্ত্র"), ("Kè", "ক্ন"), ("òœ", "ক্ষ্ণ"), ("²", "ক্ষ্ম"),
    ("ÿ«", "ক্ষ্র"), ("M&e", "গ্ব"), ("Nœ", "ঘ্ন"), ("Nª", "ঘ্র"),
    ("½y", "ঙ্গু"), ("¾¡", "জ্জ্ব"), ("Ë¡", "ত্ত্ব"), ("Îæ", "ত্রু"),
    ("`ªæ", "দ্রু"), ("åæ", "ভ্রু"), ("kÖæ", "শ্রু"), ("¤ú", "ম্প"),
    ("i¨", "র\u{200C}্য"), ("K¨", "ক্য"), ("j¨y", "ল্যু"), ("K¬z", "ক্লু"),
    ("Î¨", "ত্র্য"), ("¯’¨", "স্থ্য"), ("`¨", "দ্য"), ("f¨", "ভ্য"),
    ("j¨", "ল্য"), ("g¨", "ম্য"), ("b¨", "ন্য"), ("Y¨", "ণ্য"),
    ("ey¨", "ব্যু"), ("Z¡", "ত্ব"), ("nŸ", "হ্ব"), ("Mœy", "গ্নু"),
    ("š¿", "ন্ত্র"), ("Ûª", "ন্ড্র"), ("iƒ", "রূ"), ("¯‘", "স্তু"),
    ("Û", "ন্ড"), ("›`¦", "ন্দ্ব"), ("›U", "ন্ট"), ("¯¿", "স্ত্র"),
    ("¯¿x", "স্ত্রী"), ("y¨", "্যু"), ("z¨", "্যু"), ("¨y", "্যু"),
    ("¨z", "্যু"), ("¨~", "্যূ"), ("~¨", "্যূ"), ("vu", "াঁ"),
    ("uv", "াঁ"), ("ˆ", "ৈ"), ("‡", "ে"), ("‰", "ৈ"),
    ("œ", "্ন"), ("¤", "ম"), ("z", "ু"), ("©", "র্"),
    ("ÿ", "ক্ষ"), ("æ", "ু"), ("Ö", "্র"), ("ª", "্র"),
    ("…", "ৃ"), ("‚", "ূ"), ("¦", "্ব"),
];

#[rustfmt::skip]
const UNICODE_TO_LEGACY_ENTRIES: &[(&str, &str)] = &[
    ("অ", "A"), ("আ", "Av"), ("ই", "B"), ("ঈ", "C"),
    ("উ", "D"), ("ঊ", "E"), ("ঋ", "F"), ("এ", "G"),
    ("ঐ", "H"), ("ও", "I"), ("ঔ", "J"), ("ক", "K"),
    ("খ", "L"), ("গ", "M"), ("ঘ", "N"), ("ঙ", "O"),
    ("চ", "P"), ("ছ", "Q"), ("জ", "R"), ("ঝ", "S"),
    ("ঞ", "T"), ("ট", "U"), ("ঠ", "V"), ("ড", "W"),
    ("ঢ", "X"), ("ণ", "Y"), ("ত", "Z"), ("থ", "_"),
    ("দ", "`"), ("ধ", "a"), ("ন", "b"), ("প", "c"),
    ("ফ", "d"), ("ব", "e"), ("ভ", "f"), ("ম", "g"),
    ("য", "h"), ("র", "i"), ("ল", "j"), ("শ", "k"),
    ("ষ", "l"), ("স", "m"), ("হ", "n"), ("ড়", "o"),
    ("ঢ়", "p"), ("য়", "q"), ("ৎ", "r"), ("ং", "s"),
    ("ঃ", "t"), ("ঁ", "u"), ("০", "0"), ("১", "1"),
    ("২", "2"), ("৩", "3"), ("৪", "4"), ("৫", "5"),
    ("৬", "6"), ("৭", "7"), ("৮", "8"), ("৯", "9"),
    ("া", "v"), ("ি", "w"), ("ী", "x"), ("ু", "y"),
    ("ূ", "~"), ("্য", "¨"), ("ৃ", "„"), ("ৈ", "ˆ"),
    ("ৌ", "†Š"), ("ৗ", "Š"), ("ে", "‡"), ("ো", "†v"),
    ("্", "&"), ("।", "|"), ("॥", "||"), ("‘", "Ô"),
    ("’", "Õ"), ("“", "Ò"), ("”", "Ó"), ("৳", "$"),
    ("্র্র", "Ö"), ("কু", "Kz"), ("ঙু", "Oz"), ("চু", "Pz"),
    ("ছু", "Qz"), ("ঝু", "Sz"), ("ঞু", "Tz"), ("টু", "Uz"),
    ("ঠু", "Vz"), ("ডু", "Wz"), ("ঢু", "Xz"), ("তু", "Zz"),
    ("ফু", "dz"), ("ভু", "fz"), ("ভূ", "f‚"), ("কৃ", "K…"),
    ("চৃ", "P…"), ("ছৃ", "Q…"), ("ঝৃ", "S…"), ("ঞৃ", "T…"),
    ("টৃ", "U…"), ("ঠৃ", "V…"), ("ডৃ", "W…"), ("ঢৃ", "X…"),
    ("তৃ", "Z…"), ("ভৃ", "f…"), ("ফৃ", "d…"), ("হৃ", "ü"),
    ("গু", "¸"), ("ক্ষ", "¶"), ("ম্ন", "¤œ"), ("ক্র", "µ"),
    ("ক্ক", "°"), ("ম্র", "¤ª"), ("ক্ট", "±"), ("ক্ত", "³"),
    ("ক্ব", "K¡"), ("ক্লি", "wK¬"), ("ক্ল", "K¬"), ("ক্স", "·"),
    ("খ্র", "Lª"), ("গ্দ", "M&`"), ("গ্ধ", "»"), ("গ্ন", "Mœ"),
    ("গ্ম", "M¥"), ("গ্র", "MÖ"), ("গ্ল", "Mø"), ("ঙ্ক", "¼"),
    ("ঙ্খ", "•L"), ("ঙ্গ", "½"), ("ঙ্ঘ", "•N"), ("চ্চ", "”P"),
    ("চ্ছ", "”Q"), ("জ্জ", "¾"), ("জ্ঝ", "À"), ("জ্ঞ", "Á"),
    ("জ্ব", "R¡"), ("জ্র", "Rª"), ("ঞ্চ", "Â"), ("ঞ্ছ", "Ã"),
    ("ঞ্জ", "Ä"), ("ঞ্ঝ", "Å"), ("ট্ট", "Æ"), ("ট্ব", "U¡"),
    ("ট্ম", "U¥"), ("ট্র", "Uª"), ("ড্ড", "Ç"), ("ড্র", "Wª"),
    ("ঢ্র", "Xª"), ("ণ্ট", "È"), ("ণ্ঠ", "É"), ("ণ্ড", "Ð"),
    ("ণ্ণ", "Yœ"), ("ত্ত", "Ë"), ("ত্থ", "Ì"), ("থ্র", "_ª"),
    ("ত্ন", "Zœ"), ("ত্ম", "Z¥"), ("ত্র", "Î"), ("দ্দ", "Ï"),
    ("দ্ধ", "×"), ("দ্ব", "Ø"), ("দ্ভ", "™¢"), ("দ্ম", "Ù"),
    ("দ্র", "`ª"), ("ধ্র", "aª"), ("ধ্ব", "aŸ"), ("ধ্ম", "a¥"),
    ("ন্ত", "šÍ"), ("ন্থ", "š’"), ("ন্দ", "›`"), ("ন্ধ", "Ü"),
    ("ন্ন", "bœ"), ("ন্ম", "b¥"), ("প্ট", "Þ"), ("প্ত", "ß"),
    ("প্ন", "cœ"), ("প্প", "à"), ("প্র", "cÖ"), ("প্ল", "cø"),
    ("প্স", "á"), ("ফ্র", "d«"), ("ফ্ল", "d¬"), ("ব্জ", "â"),
    ("ব্দ", "ã"), ("ব্ধ", "ä"), ("ব্ব", "eŸ"), ("ব্র", "eª"),
    ("ব্ল", "eø"), ("ভ্র", "å"), ("ম্ফ", "ç"), ("ম্ব", "¤^"),
    ("ম্ভ", "¤¢"), ("ম্ম", "¤§"), ("ম্ল", "¤ø"), ("ল্ক", "é"),
    ("ল্গ", "ê"), ("ল্ট", "ë"), ("ল্ড", "ì"), ("ল্প", "í"),
    ("ল্ব", "j¦"), ("ল্ম", "j¥"), ("ল্ল", "jø"), ("শ্চ", "ð"),
    ("শ্ন", "kœ"), ("শ্ব", "k¦"), ("শ্ম", "k¥"), ("শ্ল", "kø"),
    ("ষ্ক", "®‹"), ("ষ্ট", "ó"), ("ষ্ট্র", "óª"), ("ষ্ঠ", "ô"),
    ("ষ্ণ", "ò"), ("ষ্প", "®ú"), ("ষ্ফ", "õ"), ("ষ্ম", "®§"),
    ("স্ক", "¯‹"), ("স্খ", "ö"), ("স্র", "¯ª"), ("স্ট", "÷"),
    ("স্ট্র", "÷ª"), ("স্ত", "¯Í"), ("স্ত্র", "¯¿"), ("স্থ", "¯’"),
    ("স্ন", "mœ"), ("স্প", "¯ú"), ("স্প্র", "¯úª"), ("স্ফ", "ù"),
    ("স্ব", "¯^"), ("স্ম", "¯§"), ("স্ল", "¯ø"), ("হ্ণ", "nè"),
    ("হ্ন", "ý"), ("হ্ম", "þ"), ("হ্ল", "n¬"), ("হু", "û"),
    ("শু", "ï"), ("ক্ত্র", "³ª"), ("ক্ন", "Kè"), ("ন্স", "Ý"),
    ("ক্ষ্ণ", "òœ"), ("ক্ষ্ম", "²"), ("ক্ষ্র", "ÿ«"), ("গ্ব", "M&e"),
    ("ঘ্ন", "Nœ"), ("ঘ্র", "Nª"), ("ঙ্গু", "½y"), ("জ্জ্ব", "¾¡"),
    ("ত্ত্ব", "Ë¡"), ("ত্রু", "Îæ"), ("দ্রু", "`ªæ"), ("ভ্রু", "åæ"),
    ("শ্রু", "kÖæ"), ("ম্প", "¤ú"), ("ম্প্র", "¤úª"), ("র\u{200C}্য", "i¨"),
    ("ক্য", "K¨"), ("ল্যু", "jy¨"), ("ক্লু", "K¬z"), ("ত্র্য", "Î¨"),
    ("স্থয", "¯’¨"), ("দ্য", "`¨"), ("ভ্য", "f¨"), ("ল্য", "j¨"),
    ("ম্য", "g¨"), ("ন্য", "b¨"), ("ণ্য", "Y¨"), ("ব্যু", "ey¨"),
    ("ত্ব", "Z¡"), ("হ্ব", "nŸ"), ("গ্নু", "Mœy"), ("ন্ত্র", "š¿"),
    ("ন্ড্র", "Ûª"), ("রূ", "iƒ"), ("স্তু", "¯‘"), ("ণ্ড্র", "Ðª"),
    ("রু", "iæ"), ("ন্দ্র", "›`ª"), ("স্মৃ", "¯§„"), ("শ্র", "kÖ"),
    ("চ্যু", "Pz¨"), ("ন্ড", "Û"), ("ন্দ্ব", "›`¦"), ("ন্ট", "›U"),
    ("র্ড", "W©"),
];
