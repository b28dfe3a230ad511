/*!
 * Tests for application configuration functionality
 */

use subtime::app_config::{AllocationMode, Config, LogLevel, MAX_READING_RATE, MIN_READING_RATE, validate_reading_rate};
use subtime::output::OutputFormat;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.mode, AllocationMode::RoundRobin);
    assert_eq!(config.reading_rate, 15.26);
    assert_eq!(config.speaker, "Speaker 1");
    assert_eq!(config.output.srt_file_name, "translated.srt");
    assert_eq!(config.output.csv_file_name, "translated.csv");
    assert_eq!(config.output.formats(), vec![OutputFormat::Srt, OutputFormat::Csv]);
    assert_eq!(config.timeline.max_cps, 25.0);
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.validate().is_ok());
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();

    config.reading_rate = 0.5;
    assert!(config.validate().is_err());
    config.reading_rate = 30.5;
    assert!(config.validate().is_err());
    config.reading_rate = 12.0;
    assert!(config.validate().is_ok());

    config.output.srt = false;
    config.output.csv = false;
    assert!(config.validate().is_err());
    config.output.csv = true;
    assert!(config.validate().is_ok());

    config.output.csv_file_name = " ".to_string();
    assert!(config.validate().is_err());
    config.output.csv_file_name = "out.csv".to_string();

    config.timeline.max_cps = 0.0;
    assert!(config.validate().is_err());
}

/// Test the reading rate bounds are inclusive
#[test]
fn test_validate_reading_rate_withBounds_shouldBeInclusive() {
    assert!(validate_reading_rate(MIN_READING_RATE).is_ok());
    assert!(validate_reading_rate(MAX_READING_RATE).is_ok());
    assert!(validate_reading_rate(f64::NAN).is_err());
}

/// Test parsing a partial config file fills in defaults
#[test]
fn test_config_deserialization_withPartialJson_shouldUseDefaults() {
    let config: Config = serde_json::from_str(r#"{ "mode": "fixed-rate", "reading_rate": 12.5 }"#).unwrap();

    assert_eq!(config.mode, AllocationMode::FixedRate);
    assert_eq!(config.reading_rate, 12.5);
    assert_eq!(config.speaker, "Speaker 1");
    assert!(config.output.srt);
}

/// Test serialization round trip of the default config
#[test]
fn test_config_serialization_withDefaultConfig_shouldRoundTrip() {
    let config = Config::default();
    let json = serde_json::to_string_pretty(&config).unwrap();

    assert!(json.contains("\"round-robin\""));
    let parsed: Config = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, config);
}

/// Test allocation mode string conversion
#[test]
fn test_allocation_mode_fromStr_shouldAcceptKnownNames() {
    assert_eq!("round-robin".parse::<AllocationMode>().unwrap(), AllocationMode::RoundRobin);
    assert_eq!("Proportional".parse::<AllocationMode>().unwrap(), AllocationMode::Proportional);
    assert_eq!("fixed_rate".parse::<AllocationMode>().unwrap(), AllocationMode::FixedRate);
    assert!("evenly".parse::<AllocationMode>().is_err());

    assert_eq!(AllocationMode::FixedRate.to_string(), "fixed-rate");
}

/// Test which modes need a timing file
#[test]
fn test_allocation_mode_requiresTiming_withDurationOverride_shouldFollowMode() {
    assert!(AllocationMode::RoundRobin.requires_timing(false));
    assert!(AllocationMode::RoundRobin.requires_timing(true));
    assert!(AllocationMode::Proportional.requires_timing(false));
    assert!(!AllocationMode::Proportional.requires_timing(true));
    assert!(!AllocationMode::FixedRate.requires_timing(false));
}
