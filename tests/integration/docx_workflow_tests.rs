/*!
 * End-to-end document conversion tests
 */

use bijoy_docx::app_config::Config;
use bijoy_docx::app_controller::{FileOutcome, FolderSummary};
use bijoy_docx::{ConversionDirection, Controller};
use std::fs;

use crate::common::{
    build_docx, create_temp_dir, create_test_file, document_xml, init_test_logger, minimal_docx, plain_paragraph,
    read_docx_entry, run_paragraph,
};

fn legacy_document() -> Vec<u8> {
    let body = format!(
        "{}{}",
        run_paragraph("SutonnyMJ", "Avwg evsjv‡`k‡K fvjevwm"),
        run_paragraph("Calibri", "Hello")
    );
    minimal_docx(&document_xml(&body)).unwrap()
}

/// Test converting a legacy document in memory
#[test]
fn test_convertBytes_withLegacyDocument_shouldProduceUnicode() {
    init_test_logger();
    let controller = Controller::with_config(Config::default()).unwrap();

    let (output, report) = controller.convert_bytes(legacy_document()).unwrap();

    let document = read_docx_entry(&output, "word/document.xml").unwrap();
    assert!(document.contains("আমি বাংলাদেশকে ভালবাসি"));
    assert!(document.contains("<w:t>Hello</w:t>"));
    assert!(document.contains(r#"w:ascii="Calibri""#));
    assert_eq!(report.totals().runs_converted, 1);
    assert_eq!(report.totals().runs_skipped, 1);
    assert_eq!(read_docx_entry(&output, "[Content_Types].xml").unwrap(), r#"<?xml version="1.0"?><Types/>"#);
}

/// Test the Unicode to legacy direction end to end, footnotes included
#[test]
fn test_convertBytes_toLegacy_shouldConvertBodyAndFootnotes() {
    init_test_logger();
    let config = Config {
        direction: ConversionDirection::UnicodeToLegacy,
        ..Config::default()
    };
    let controller = Controller::with_config(config).unwrap();

    let footnotes = r#"<w:footnotes xmlns:w="x"><w:footnote w:id="1"><w:p><w:r><w:t>কর্ম</w:t></w:r></w:p></w:footnote></w:footnotes>"#;
    let document = document_xml(&plain_paragraph("আমি ভালো আছি।"));
    let bytes = build_docx(&[("word/document.xml", document.as_str()), ("word/footnotes.xml", footnotes)]).unwrap();

    let (output, report) = controller.convert_bytes(bytes).unwrap();

    let document = read_docx_entry(&output, "word/document.xml").unwrap();
    assert!(document.contains(r#"<w:t xml:space="preserve">Avwg fv‡jv AvwQ|</w:t>"#));
    assert!(document.contains(r#"w:ascii="SutonnyMJ""#));
    let notes = read_docx_entry(&output, "word/footnotes.xml").unwrap();
    assert!(notes.contains("Kg©"));
    assert_eq!(report.modified_parts(), 2);
}

/// Test a malformed part is left as-is while siblings convert
#[test]
fn test_convertBytes_withMalformedPart_shouldIsolateFailure() {
    init_test_logger();
    let controller = Controller::with_config(Config::default()).unwrap();
    let broken = "<w:hdr><w:p>";
    let document = document_xml(&run_paragraph("SutonnyMJ", "Kg©"));
    let bytes = build_docx(&[("word/document.xml", document.as_str()), ("word/header1.xml", broken)]).unwrap();

    let (output, report) = controller.convert_bytes(bytes).unwrap();

    assert_eq!(report.failed_parts().len(), 1);
    assert_eq!(read_docx_entry(&output, "word/header1.xml").unwrap(), broken);
    assert!(read_docx_entry(&output, "word/document.xml").unwrap().contains("কর্ম"));
}

/// Test a single file run writes the output next to the input
#[tokio::test]
async fn test_run_withSingleFile_shouldWriteOutputAndSkipOnRerun() {
    init_test_logger();
    let dir = create_temp_dir().unwrap();
    let input = create_test_file(dir.path(), "letter.docx", &legacy_document()).unwrap();
    let controller = Controller::with_config(Config::default()).unwrap();

    let outcome = controller
        .run(input.clone(), dir.path().to_path_buf(), false)
        .await
        .unwrap();
    let expected = dir.path().join("letter.converted.docx");
    match outcome {
        FileOutcome::Converted { output, totals, failed_parts } => {
            assert_eq!(output, expected);
            assert_eq!(totals.runs_converted, 1);
            assert_eq!(failed_parts, 0);
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
    let written = fs::read(&expected).unwrap();
    assert!(read_docx_entry(&written, "word/document.xml").unwrap().contains("আমি"));

    let rerun = controller
        .run(input.clone(), dir.path().to_path_buf(), false)
        .await
        .unwrap();
    assert_eq!(rerun, FileOutcome::Skipped { output: expected.clone() });

    let forced = controller.run(input, dir.path().to_path_buf(), true).await.unwrap();
    assert!(matches!(forced, FileOutcome::Converted { .. }));
}

/// Test a missing input file is an error
#[tokio::test]
async fn test_run_withMissingFile_shouldFail() {
    let dir = create_temp_dir().unwrap();
    let controller = Controller::with_config(Config::default()).unwrap();
    let result = controller
        .run(dir.path().join("missing.docx"), dir.path().to_path_buf(), false)
        .await;
    assert!(result.is_err());
}

/// Test folder mode converts good files and counts broken ones
#[tokio::test]
async fn test_runFolder_withMixedFiles_shouldReportSummary() {
    init_test_logger();
    let dir = create_temp_dir().unwrap();
    let nested = dir.path().join("nested");
    fs::create_dir_all(&nested).unwrap();
    create_test_file(dir.path(), "one.docx", &legacy_document()).unwrap();
    create_test_file(&nested, "two.docx", &legacy_document()).unwrap();
    create_test_file(dir.path(), "broken.docx", b"not a zip").unwrap();

    let out = dir.path().join("out");
    let controller = Controller::with_config(Config::default()).unwrap();

    let summary = controller
        .run_folder(dir.path().to_path_buf(), Some(out.clone()), false)
        .await
        .unwrap();
    assert_eq!(
        summary,
        FolderSummary {
            converted: 2,
            skipped: 0,
            failed: 1,
        }
    );
    assert!(out.join("one.converted.docx").exists());
    assert!(out.join("two.converted.docx").exists());

    let again = controller
        .run_folder(dir.path().to_path_buf(), Some(out), false)
        .await
        .unwrap();
    assert_eq!(again.skipped, 2);
    assert_eq!(again.converted, 0);
}

/// Test folder mode without documents is an error
#[tokio::test]
async fn test_runFolder_withNoDocuments_shouldFail() {
    let dir = create_temp_dir().unwrap();
    create_test_file(dir.path(), "notes.txt", b"x").unwrap();
    let controller = Controller::with_config(Config::default()).unwrap();

    assert!(controller.run_folder(dir.path().to_path_buf(), None, false).await.is_err());
}

/// Test footnotes are read from a document on disk
#[test]
fn test_footnotes_withDocumentOnDisk_shouldListUserNotes() {
    let dir = create_temp_dir().unwrap();
    let footnotes = r#"<w:footnotes xmlns:w="x"><w:footnote w:id="-1"><w:p/></w:footnote><w:footnote w:id="0"><w:p/></w:footnote><w:footnote w:id="2"><w:p><w:r><w:t>টীকা</w:t></w:r></w:p></w:footnote></w:footnotes>"#;
    let document = document_xml("");
    let bytes = build_docx(&[("word/document.xml", document.as_str()), ("word/footnotes.xml", footnotes)]).unwrap();
    let input = create_test_file(dir.path(), "notes.docx", &bytes).unwrap();

    let controller = Controller::with_config(Config::default()).unwrap();
    let notes = controller.footnotes(&input).unwrap();

    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].id, "2");
    assert_eq!(notes[0].content, "টীকা");
}
