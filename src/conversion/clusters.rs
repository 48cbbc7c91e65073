/*!
 * Bengali character classes and consonant-cluster scanning.
 *
 * Both converters reorder dependent vowel signs and reph around consonant
 * clusters. The reordering passes work on `char` slices so that multi-byte
 * vowel signs are never split; this module holds the shared grammar.
 */

pub const VIRAMA: char = '\u{09CD}';
pub const RA: char = '\u{09B0}';
pub const YA: char = '\u{09AF}';

pub const AA_SIGN: char = '\u{09BE}';
pub const I_SIGN: char = '\u{09BF}';
pub const E_SIGN: char = '\u{09C7}';
pub const AI_SIGN: char = '\u{09C8}';
pub const O_SIGN: char = '\u{09CB}';
pub const AU_SIGN: char = '\u{09CC}';
pub const AU_LENGTH_MARK: char = '\u{09D7}';

pub const DANDA: char = '\u{0964}';
pub const DOUBLE_DANDA: char = '\u{0965}';

/// Consonants that have a glyph of their own in the legacy fonts.
pub const LEGACY_CONSONANTS: &str = "কখগঘঙচছজঝঞটঠডঢণতথদধনপফবভমযরলশষসহ\u{09DC}\u{09DD}\u{09DF}";

/// Any Bengali consonant, including the nukta forms.
pub fn is_consonant(c: char) -> bool {
    ('\u{0995}'..='\u{09B9}').contains(&c) || ('\u{09DC}'..='\u{09DF}').contains(&c)
}

/// A consonant the legacy encoding can render.
pub fn is_legacy_consonant(c: char) -> bool {
    LEGACY_CONSONANTS.contains(c)
}

/// Dependent vowel signs, including the au length mark.
pub fn is_vowel_sign(c: char) -> bool {
    matches!(c,
        '\u{09BE}'..='\u{09C4}'
        | '\u{09C7}'..='\u{09C8}'
        | '\u{09CB}'..='\u{09CC}'
        | AU_LENGTH_MARK)
}

/// Vowel signs drawn to the left of their base consonant.
pub fn is_pre_base_vowel(c: char) -> bool {
    matches!(c, I_SIGN | E_SIGN | AI_SIGN)
}

/// Any code point in the Bengali block.
pub fn is_bengali(c: char) -> bool {
    ('\u{0980}'..='\u{09FF}').contains(&c)
}

/// Danda, double danda.
pub fn is_danda(c: char) -> bool {
    matches!(c, DANDA | DOUBLE_DANDA)
}

/// `true` when `chars[i..]` starts with the reph sequence র + virama.
pub fn is_reph_at(chars: &[char], i: usize) -> bool {
    chars.get(i) == Some(&RA) && chars.get(i + 1) == Some(&VIRAMA)
}

/// Exclusive end positions of every consonant cluster starting at `start`,
/// longest first.
///
/// A cluster is one consonant followed by any number of virama + consonant
/// pairs; `is_member` decides what counts as a consonant. Trying the ends
/// in this order gives the same result as a greedy regex that backtracks.
pub fn cluster_ends(chars: &[char], start: usize, is_member: fn(char) -> bool) -> Vec<usize> {
    let mut ends = Vec::new();
    match chars.get(start) {
        Some(&c) if is_member(c) => {}
        _ => return ends,
    }

    let mut end = start + 1;
    ends.push(end);
    while chars.get(end) == Some(&VIRAMA) && chars.get(end + 1).is_some_and(|&c| is_member(c)) {
        end += 2;
        ends.push(end);
    }

    ends.reverse();
    ends
}
