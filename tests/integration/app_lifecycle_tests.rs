/*!
 * Full app lifecycle tests: configuration on disk through to conversion
 */

use bijoy_docx::app_config::Config;
use bijoy_docx::{ConversionDirection, Controller};

use crate::common::{create_temp_dir, create_test_file, document_xml, minimal_docx, read_docx_entry, run_paragraph};

/// Test a config written to disk drives the controller
#[tokio::test]
async fn test_lifecycle_withConfigOnDisk_shouldUseItsSettings() {
    let dir = create_temp_dir().unwrap();
    let config_path = dir.path().join("conf.json");
    std::fs::write(
        &config_path,
        r#"{ "direction": "legacy-to-unicode", "fonts": { "unicode_font": "Kalpurush" }, "package": { "output_suffix": "unicode" } }"#,
    )
    .unwrap();

    let config = Config::load_or_create(&config_path).unwrap();
    let controller = Controller::with_config(config).unwrap();

    let bytes = minimal_docx(&document_xml(&run_paragraph("SutonnyMJ", "Kg©"))).unwrap();
    let input = create_test_file(dir.path(), "doc.docx", &bytes).unwrap();
    controller
        .run(input, dir.path().to_path_buf(), false)
        .await
        .unwrap();

    let output = std::fs::read(dir.path().join("doc.unicode.docx")).unwrap();
    let document = read_docx_entry(&output, "word/document.xml").unwrap();
    assert!(document.contains("কর্ম"));
    assert!(document.contains(r#"w:ascii="Kalpurush""#));
}

/// Test an invalid configuration is refused before any work
#[test]
fn test_lifecycle_withInvalidConfig_shouldRefuseController() {
    let mut config = Config::default();
    config.package.max_concurrent_files = 0;
    assert!(Controller::with_config(config).is_err());
}

/// Test text conversion follows the configured direction
#[test]
fn test_lifecycle_convertText_shouldFollowDirection() {
    let controller = Controller::with_config(Config::default()).unwrap();
    assert_eq!(controller.convert_text("Avwg"), "আমি");

    let config = Config {
        direction: ConversionDirection::UnicodeToLegacy,
        ..Config::default()
    };
    let controller = Controller::with_config(config).unwrap();
    assert_eq!(controller.convert_text("আমি ভালো আছি।"), "Avwg fv‡jv AvwQ|");
    assert_eq!(controller.config().direction, ConversionDirection::UnicodeToLegacy);
}

/// Test the default config file is created on first use
#[test]
fn test_lifecycle_withoutConfigFile_shouldCreateDefault() {
    let dir = create_temp_dir().unwrap();
    let config_path = dir.path().join("conf.json");

    let config = Config::load_or_create(&config_path).unwrap();

    let saved = std::fs::read_to_string(&config_path).unwrap();
    assert!(saved.contains("\"direction\": \"legacy-to-unicode\""));
    assert!(saved.contains("\"log_level\": \"info\""));
    assert!(Controller::with_config(config).is_ok());
}
