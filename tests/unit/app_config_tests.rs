/*!
 * Tests for application configuration functionality
 */

use bijoy_docx::app_config::{Config, LogLevel, PackageConfig};
use bijoy_docx::ConversionDirection;
use log::LevelFilter;

use crate::common::create_temp_dir;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.direction, ConversionDirection::LegacyToUnicode);
    assert!(!config.force_convert);
    assert_eq!(config.fonts.legacy_font, "SutonnyMJ");
    assert_eq!(config.fonts.unicode_font, "Bornomala");
    assert_eq!(config.package.part_prefix, "word/");
    assert_eq!(config.package.part_suffix, ".xml");
    assert_eq!(config.package.style_marker, "styles.xml");
    assert_eq!(config.package.output_suffix, "converted");
    assert_eq!(config.package.max_concurrent_files, 4);
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.validate().is_ok());
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();
    config.fonts.legacy_markers.clear();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.fonts.legacy_markers.push("  ".to_string());
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.fonts.legacy_font = String::new();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.fonts.unicode_font = " ".to_string();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.package.part_prefix = String::new();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.package.max_concurrent_files = 0;
    assert!(config.validate().is_err());
}

/// Test a partial JSON file fills the missing fields with defaults
#[test]
fn test_config_deserialization_withPartialJson_shouldUseDefaults() {
    let json = r#"{
        "direction": "unicode-to-legacy",
        "fonts": { "legacy_font": "SutonnyOMJ" },
        "package": { "max_concurrent_files": 2 },
        "log_level": "debug"
    }"#;
    let config: Config = serde_json::from_str(json).unwrap();

    assert_eq!(config.direction, ConversionDirection::UnicodeToLegacy);
    assert_eq!(config.fonts.legacy_font, "SutonnyOMJ");
    assert_eq!(config.fonts.unicode_font, "Bornomala");
    assert_eq!(config.fonts.legacy_markers.len(), 3);
    assert_eq!(config.package.max_concurrent_files, 2);
    assert_eq!(config.package.part_prefix, "word/");
    assert_eq!(config.log_level, LogLevel::Debug);
}

/// Test an unknown direction is rejected
#[test]
fn test_config_deserialization_withUnknownDirection_shouldFail() {
    let result = serde_json::from_str::<Config>(r#"{ "direction": "sideways" }"#);
    assert!(result.is_err());
}

/// Test a missing config file is created with defaults, then read back
#[test]
fn test_load_or_create_withMissingFile_shouldWriteDefaults() {
    let dir = create_temp_dir().unwrap();
    let path = dir.path().join("conf.json");

    let created = Config::load_or_create(&path).unwrap();
    assert!(path.exists());
    assert_eq!(created, Config::default());

    let mut changed = created.clone();
    changed.force_convert = true;
    changed.save(&path).unwrap();
    assert_eq!(Config::load_or_create(&path).unwrap(), changed);
}

/// Test an unparsable config file is an error
#[test]
fn test_load_or_create_withInvalidJson_shouldFail() {
    let dir = create_temp_dir().unwrap();
    let path = dir.path().join("conf.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert!(Config::load_or_create(&path).is_err());
}

/// Test log levels map onto the log facade and package options follow the config
#[test]
fn test_config_helpers_shouldMapSettings() {
    assert_eq!(LogLevel::Trace.to_level_filter(), LevelFilter::Trace);
    assert_eq!(LogLevel::Error.to_level_filter(), LevelFilter::Error);

    let config = Config {
        direction: ConversionDirection::UnicodeToLegacy,
        force_convert: true,
        package: PackageConfig {
            part_suffix: "document.xml".to_string(),
            ..PackageConfig::default()
        },
        ..Config::default()
    };
    let options = config.package_options();
    assert_eq!(options.direction, ConversionDirection::UnicodeToLegacy);
    assert!(options.force_convert);
    assert_eq!(options.parts.suffix, "document.xml");
    assert_eq!(options.parts.style_marker, "styles.xml");
}
