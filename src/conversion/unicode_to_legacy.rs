/*!
 * Unicode Bengali → legacy (SutonnyMJ/Bijoy) conversion.
 *
 * Logical order is turned into visual order before substitution: the o/au
 * vowel signs are split into their two drawn halves, and ি/ে/ৈ are carried in
 * front of their (reph +) cluster. The greedy scan then handles the reph,
 * which the legacy fonts draw after the cluster, and ra-phala forms that
 * have no conjunct glyph of their own.
 */

use log::trace;

use super::clusters::{
    cluster_ends, is_legacy_consonant, is_pre_base_vowel, is_reph_at, AA_SIGN, AU_LENGTH_MARK,
    AU_SIGN, E_SIGN, O_SIGN,
};
use super::glyph_tables::{RA_PHALA_GLYPH, REPH_GLYPH, UNICODE_TO_LEGACY};
use super::typography::normalize_typography;

const REPH: &str = "\u{09B0}\u{09CD}";
const RA_PHALA: &str = "\u{09CD}\u{09B0}";

/// Convert Unicode Bengali to legacy glyph text.
///
/// Unmapped characters pass through unchanged.
pub fn convert_unicode_to_legacy(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut chars: Vec<char> = text.chars().collect();
    chars = split_two_part_vowels(&chars);
    chars = move_pre_base_vowels_before_cluster(&chars);
    let visual: String = chars.into_iter().collect();

    let result = substitute_glyphs(&visual);
    trace!("unicode→legacy: {:?} → {:?}", text, result);
    normalize_typography(&result)
}

/// Rule: cluster + ো/ৌ becomes cluster + ে + া/ৗ.
fn split_two_part_vowels(chars: &[char]) -> Vec<char> {
    let mut output = Vec::with_capacity(chars.len() + 8);
    let mut i = 0;

    while i < chars.len() {
        let matched = cluster_ends(chars, i, is_legacy_consonant)
            .into_iter()
            .find_map(|end| match chars.get(end) {
                Some(&O_SIGN) => Some((end, AA_SIGN)),
                Some(&AU_SIGN) => Some((end, AU_LENGTH_MARK)),
                _ => None,
            });

        match matched {
            Some((end, tail)) => {
                output.extend_from_slice(&chars[i..end]);
                output.extend_from_slice(&[E_SIGN, tail]);
                i = end + 1;
            }
            None => {
                output.push(chars[i]);
                i += 1;
            }
        }
    }

    output
}

/// Rule: optional reph + cluster + ি/ে/ৈ becomes vowel + reph + cluster.
fn move_pre_base_vowels_before_cluster(chars: &[char]) -> Vec<char> {
    let mut output = Vec::with_capacity(chars.len());
    let mut i = 0;

    while i < chars.len() {
        let with_reph = if is_reph_at(chars, i) {
            vowel_after_cluster(chars, i + 2)
        } else {
            None
        };

        match with_reph.or_else(|| vowel_after_cluster(chars, i)) {
            Some(end) => {
                output.push(chars[end]);
                output.extend_from_slice(&chars[i..end]);
                i = end + 1;
            }
            None => {
                output.push(chars[i]);
                i += 1;
            }
        }
    }

    output
}

/// Position of the pre-base vowel closing a cluster that starts at `start`.
fn vowel_after_cluster(chars: &[char], start: usize) -> Option<usize> {
    cluster_ends(chars, start, is_legacy_consonant)
        .into_iter()
        .find(|&end| chars.get(end).is_some_and(|&c| is_pre_base_vowel(c)))
}

/// Greedy left-to-right substitution with the Unicode table, plus the reph
/// and ra-phala rules.
fn substitute_glyphs(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    let mut pos = 0;

    while pos < text.len() {
        let rest = &text[pos..];

        if let Some(after_reph) = rest.strip_prefix(REPH) {
            if let Some((key, value)) = UNICODE_TO_LEGACY.longest_match(after_reph) {
                output.push_str(value);
                pos += REPH.len() + key.len();
                pos += push_ra_phala(&mut output, key, &text[pos..]);
                output.push_str(REPH_GLYPH);
                continue;
            }
        }

        match UNICODE_TO_LEGACY.longest_match(rest) {
            Some((key, value)) => {
                output.push_str(value);
                pos += key.len();
                pos += push_ra_phala(&mut output, key, &text[pos..]);
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

/// Emit the ra-phala glyph when a bare consonant key is followed by virama + ra.
/// Returns the number of bytes consumed from `rest`.
fn push_ra_phala(output: &mut String, key: &str, rest: &str) -> usize {
    if is_bare_legacy_consonant(key) && rest.starts_with(RA_PHALA) {
        output.push_str(RA_PHALA_GLYPH);
        RA_PHALA.len()
    } else {
        0
    }
}

fn is_bare_legacy_consonant(key: &str) -> bool {
    let mut chars = key.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if is_legacy_consonant(c))
}
