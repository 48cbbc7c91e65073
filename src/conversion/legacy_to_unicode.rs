/*!
 * Legacy (SutonnyMJ/Bijoy) → Unicode Bengali conversion.
 *
 * The legacy byte order is visual: pre-base vowel signs come before their
 * consonant and the reph glyph comes after its cluster. The converter first
 * repairs known keyboard-driver corruptions, substitutes glyphs greedily
 * (longest key first), then moves the marks back into logical order with a
 * fixed sequence of reordering rules.
 */

use log::trace;

use super::clusters::{
    cluster_ends, is_consonant, is_pre_base_vowel, is_reph_at, is_vowel_sign, AA_SIGN,
    AU_LENGTH_MARK, AU_SIGN, DANDA, E_SIGN, O_SIGN, RA, VIRAMA, YA,
};
use super::glyph_tables::{ANSI_FIXUPS, LEGACY_TO_UNICODE};
use super::typography::{normalize_danda_spacing, normalize_typography};

/// Convert legacy glyph text to Unicode Bengali.
///
/// Unmapped characters pass through unchanged.
pub fn convert_legacy_to_unicode(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let fixed = apply_ansi_fixups(text);
    let substituted = substitute_glyphs(&fixed);

    let mut chars: Vec<char> = substituted.chars().collect();
    chars = move_reph_before_cluster(&chars);
    chars = move_pre_base_vowels_after_cluster(&chars);
    chars = move_ya_phala_before_vowel(&chars);
    chars = join_split_vowels(&chars);

    let result: String = chars
        .into_iter()
        .map(|c| if c == '|' { DANDA } else { c })
        .collect();

    trace!("legacy→unicode: {:?} → {:?}", text, result);
    normalize_typography(&result)
}

/// Literal replace-all passes, in table order, then danda spacing.
pub fn apply_ansi_fixups(text: &str) -> String {
    let mut fixed = text.to_string();
    for &(wrong, correct) in ANSI_FIXUPS {
        if fixed.contains(wrong) {
            fixed = fixed.replace(wrong, correct);
        }
    }
    normalize_danda_spacing(&fixed)
}

/// Greedy left-to-right substitution with the legacy table.
fn substitute_glyphs(text: &str) -> String {
    let mut output = String::with_capacity(text.len() * 3);
    let mut pos = 0;

    while pos < text.len() {
        let rest = &text[pos..];
        match LEGACY_TO_UNICODE.longest_match(rest) {
            Some((key, value)) => {
                output.push_str(value);
                pos += key.len();
            }
            None => {
                let Some(c) = rest.chars().next() else { break };
                output.push(c);
                pos += c.len_utf8();
            }
        }
    }

    output
}

/// Rule: cluster (with optional vowel sign) followed by র + virama becomes
/// র + virama + cluster.
fn move_reph_before_cluster(chars: &[char]) -> Vec<char> {
    let mut output = Vec::with_capacity(chars.len());
    let mut i = 0;

    while i < chars.len() {
        match reph_after_cluster_at(chars, i) {
            Some(cluster_end) => {
                output.extend_from_slice(&[RA, VIRAMA]);
                output.extend_from_slice(&chars[i..cluster_end]);
                i = cluster_end + 2;
            }
            None => {
                output.push(chars[i]);
                i += 1;
            }
        }
    }

    output
}

/// End of the cluster (vowel included) when a reph follows it at `start`.
fn reph_after_cluster_at(chars: &[char], start: usize) -> Option<usize> {
    for end in cluster_ends(chars, start, is_consonant) {
        let with_vowel = chars.get(end).is_some_and(|&c| is_vowel_sign(c));
        if with_vowel && is_reph_at(chars, end + 1) {
            return Some(end + 1);
        }
        if is_reph_at(chars, end) {
            return Some(end);
        }
    }
    None
}

/// Rule: ি/ে/ৈ followed by an optional reph and a bare cluster moves behind
/// the cluster.
fn move_pre_base_vowels_after_cluster(chars: &[char]) -> Vec<char> {
    let mut output = Vec::with_capacity(chars.len());
    let mut i = 0;

    while i < chars.len() {
        let vowel = chars[i];
        let target_end = if is_pre_base_vowel(vowel) {
            base_after_vowel_end(chars, i + 1)
        } else {
            None
        };

        match target_end {
            Some(end) => {
                output.extend_from_slice(&chars[i + 1..end]);
                output.push(vowel);
                i = end;
            }
            None => {
                output.push(vowel);
                i += 1;
            }
        }
    }

    output
}

fn base_after_vowel_end(chars: &[char], start: usize) -> Option<usize> {
    if is_reph_at(chars, start) {
        if let Some(&end) = cluster_ends(chars, start + 2, is_consonant).first() {
            return Some(end);
        }
    }
    cluster_ends(chars, start, is_consonant).first().copied()
}

/// Rule: vowel sign followed by virama + য becomes virama + য + vowel sign.
fn move_ya_phala_before_vowel(chars: &[char]) -> Vec<char> {
    let mut output = Vec::with_capacity(chars.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if is_vowel_sign(c) && chars.get(i + 1) == Some(&VIRAMA) && chars.get(i + 2) == Some(&YA) {
            output.extend_from_slice(&[VIRAMA, YA, c]);
            i += 3;
        } else {
            output.push(c);
            i += 1;
        }
    }

    output
}

/// Rule: ে + া → ো and ে + ৗ → ৌ.
fn join_split_vowels(chars: &[char]) -> Vec<char> {
    let mut output = Vec::with_capacity(chars.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let joined = match (c, chars.get(i + 1)) {
            (E_SIGN, Some(&AA_SIGN)) => Some(O_SIGN),
            (E_SIGN, Some(&AU_LENGTH_MARK)) => Some(AU_SIGN),
            _ => None,
        };

        match joined {
            Some(vowel) => {
                output.push(vowel);
                i += 2;
            }
            None => {
                output.push(c);
                i += 1;
            }
        }
    }

    output
}
