/*!
 * Tests for the legacy-text classifier and the script segmenter
 */

use bijoy_docx::{classify_script, is_likely_legacy_bengali, segment, VerdictReason};

/// Test each classifier rule through its observable reason
#[test]
fn test_classify_script_withEachRule_shouldReportReason() {
    let cases = [
        ("   ", false, VerdictReason::Empty),
        ("আমি Avwg", false, VerdictReason::ContainsUnicodeBengali),
        ("†Kv_vq", true, VerdictReason::LegacyMarkers),
        ("Kg©", true, VerdictReason::LegacyMarkers),
        ("evsjv", true, VerdictReason::LegacyPattern),
        ("GK", true, VerdictReason::LegacyPattern),
        ("This is about the weather", false, VerdictReason::EnglishWords),
        ("XYZ 42", true, VerdictReason::Ambiguous),
    ];

    for (text, is_legacy, reason) in cases {
        let verdict = classify_script(text);
        assert_eq!(verdict.is_legacy, is_legacy, "text: {:?}", text);
        assert_eq!(verdict.reason, reason, "text: {:?}", text);
    }
}

/// Test English words only count as whole words
#[test]
fn test_classify_script_withWordInsideToken_shouldNotCountAsEnglish() {
    // "other" contains "the" but is not the word itself
    let verdict = classify_script("other items");
    assert!(verdict.is_legacy);
    assert!(verdict.is_ambiguous());
    assert!(!is_likely_legacy_bengali("WITH CARE"));
}

/// Test segmentation keeps neutral characters with the nearest strong side
#[test]
fn test_segment_withMixedText_shouldSplitAtScriptBoundaries() {
    let segments = segment("আমি Hello আছি");
    let parts: Vec<(&str, bool)> = segments
        .iter()
        .map(|s| (s.content.as_str(), s.is_bengali))
        .collect();
    assert_eq!(
        parts,
        vec![("আমি ", true), ("Hello ", false), ("আছি", true)]
    );
}

/// Test Bengali digits and dandas are on the Bengali side
#[test]
fn test_segment_withBengaliDigitsAndDanda_shouldStayBengali() {
    let segments = segment("২০২৪ সাল। 2024");
    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0].content, "২০২৪ সাল। ");
    assert!(segments[0].is_bengali);
    assert_eq!(segments[1].content, "2024");
    assert!(!segments[1].is_bengali);
}
