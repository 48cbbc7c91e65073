/*!
 * Tests for the legacy ↔ Unicode text converters
 */

use bijoy_docx::conversion::glyph_tables;
use bijoy_docx::{
    convert_legacy_to_unicode, convert_unicode_to_legacy, is_likely_legacy_bengali, normalize_typography,
    ConversionDirection,
};

/// Test a full legacy sentence converts to logically ordered Unicode
#[test]
fn test_legacy_to_unicode_withSentence_shouldProduceLogicalOrder() {
    assert_eq!(
        convert_legacy_to_unicode("Avwg evsjv‡`k‡K fvjevwm"),
        "আমি বাংলাদেশকে ভালবাসি"
    );
}

/// Test the pipe becomes a danda and sentence spacing is normalized
#[test]
fn test_legacy_to_unicode_withPipe_shouldProduceDanda() {
    assert_eq!(
        convert_legacy_to_unicode("Avwg evsjvq Mvb MvB|"),
        "আমি বাংলা\u{09DF} গান গাই।"
    );
    assert_eq!(convert_legacy_to_unicode("Avwg|fvj"), "আমি। ভাল");
}

/// Test two pipes separated by a space stay two dandas
#[test]
fn test_legacy_to_unicode_withSeparatedPipes_shouldKeepTwoDandas() {
    assert_eq!(convert_legacy_to_unicode("K | | L"), "ক।। খ");
    assert_eq!(convert_legacy_to_unicode("K || L"), "ক॥ খ");
}

/// Test both converters give the same output when called twice
#[test]
fn test_converters_withRepeatedCalls_shouldBeDeterministic() {
    let legacy = "Avwg evsjv‡`k‡K fvjevwm| wbe©vPb cÖ_g ch©v‡q|";
    assert_eq!(convert_legacy_to_unicode(legacy), convert_legacy_to_unicode(legacy));

    let unicode = "আমি ভালো আছি। কর্ম ঝ্র Test case।";
    assert_eq!(convert_unicode_to_legacy(unicode), convert_unicode_to_legacy(unicode));
}

/// Test simple words converted there and back still read as legacy text
#[test]
fn test_round_trip_withSimpleWords_shouldStillClassifyAsLegacy() {
    for word in ["Avwg", "†Kv_vq", "cÖ_g", "fvj"] {
        let round_trip = convert_unicode_to_legacy(&convert_legacy_to_unicode(word));
        assert!(
            is_likely_legacy_bengali(&round_trip),
            "{:?} came back as {:?}",
            word,
            round_trip
        );
    }
}

/// Test the corrupted e-sign sequence is repaired before substitution
#[test]
fn test_legacy_to_unicode_withCorruptedSequence_shouldApplyFixupFirst() {
    assert_eq!(convert_legacy_to_unicode("GZ†"), "এতে");
}

/// Test reph and pre-base vowel reordering together
#[test]
fn test_legacy_to_unicode_withRephAndPreBaseVowel_shouldReorder() {
    assert_eq!(convert_legacy_to_unicode("Kg©"), "কর্ম");
    assert_eq!(convert_legacy_to_unicode("wbe©vPb"), "নির্বাচন");
}

/// Test split vowels join and ra-phala glyphs expand
#[test]
fn test_legacy_to_unicode_withSplitVowelAndRaPhala_shouldCompose() {
    assert_eq!(
        convert_legacy_to_unicode("Zzwg †Kv_vq?"),
        "তুমি কোথা\u{09DF}?"
    );
    assert_eq!(convert_legacy_to_unicode("cÖ_g"), "প্রথম");
}

/// Test empty input stays empty in both directions
#[test]
fn test_converters_withEmptyInput_shouldReturnEmpty() {
    assert_eq!(convert_legacy_to_unicode(""), "");
    assert_eq!(convert_unicode_to_legacy(""), "");
}

/// Test a Unicode sentence converts to visual-order legacy text
#[test]
fn test_unicode_to_legacy_withSentence_shouldReorderAndEndWithPipe() {
    assert_eq!(convert_unicode_to_legacy("আমি ভালো আছি।"), "Avwg fv‡jv AvwQ|");
    assert_eq!(
        convert_unicode_to_legacy("আমি বাংলা\u{09DF}"),
        "Avwg evsjvq"
    );
}

/// Test two-part vowels are split around the consonant
#[test]
fn test_unicode_to_legacy_withTwoPartVowels_shouldSplit() {
    assert_eq!(convert_unicode_to_legacy("কোথা\u{09DF}"), "‡Kv_vq");
    assert_eq!(convert_unicode_to_legacy("বৌ"), "‡eŠ");
}

/// Test reph and ra-phala glyphs are emitted
#[test]
fn test_unicode_to_legacy_withRephAndRaPhala_shouldEmitGlyphs() {
    assert_eq!(convert_unicode_to_legacy("কর্ম"), "Kg©");
    assert_eq!(convert_unicode_to_legacy("নির্বাচন"), "wbe©vPb");
    assert_eq!(convert_unicode_to_legacy("প্রথম"), "cÖ_g");
    assert_eq!(convert_unicode_to_legacy("ঝ্র"), "SÖ");
    assert_eq!(convert_unicode_to_legacy("র্ঝ্র"), "SÖ©");
}

/// Test Latin text passes through the Unicode converter untouched
#[test]
fn test_unicode_to_legacy_withLatinText_shouldPassThrough() {
    assert_eq!(convert_unicode_to_legacy("Hello 2024"), "Hello 2024");
}

/// Test the normalizer on both danda kinds and the pipe
#[test]
fn test_normalize_typography_withMarks_shouldFixSpacing() {
    assert_eq!(normalize_typography("আছি ।আমি"), "আছি। আমি");
    assert_eq!(normalize_typography("শেষ ॥"), "শেষ॥");
    assert_eq!(normalize_typography("AvwQ |Avwg"), "AvwQ| Avwg");
    assert_eq!(normalize_typography("এক।\nদুই"), "এক।\nদুই");
    let once = normalize_typography("ক ।  খ।।গ");
    assert_eq!(normalize_typography(&once), once);
}

/// Test the direction enum dispatches to the right converter
#[test]
fn test_direction_convert_shouldDispatch() {
    assert_eq!(ConversionDirection::LegacyToUnicode.convert("Kg©"), "কর্ম");
    assert_eq!(ConversionDirection::UnicodeToLegacy.convert("কর্ম"), "Kg©");
    assert_eq!(
        "u2l".parse::<ConversionDirection>().unwrap(),
        ConversionDirection::UnicodeToLegacy
    );
    assert!("sideways".parse::<ConversionDirection>().is_err());
}

/// Test glyph tables are exposed longest key first
#[test]
fn test_glyph_tables_sortedKeys_shouldBeLongestFirst() {
    let keys = glyph_tables::sorted_keys(ConversionDirection::LegacyToUnicode);
    assert!(!keys.is_empty());
    for pair in keys.windows(2) {
        assert!(pair[0].chars().count() >= pair[1].chars().count());
    }
}
