//! Unit tests for logging helpers

use svcscan_domain::error::Error;
use svcscan_infrastructure::config::LoggingConfig;
use svcscan_infrastructure::logging::{init_logging, parse_log_level};
use tracing::Level;

#[test]
fn test_parse_log_level_accepts_known_names() {
    assert_eq!(parse_log_level("trace").unwrap(), Level::TRACE);
    assert_eq!(parse_log_level("DEBUG").unwrap(), Level::DEBUG);
    assert_eq!(parse_log_level(" info ").unwrap(), Level::INFO);
    assert_eq!(parse_log_level("warning").unwrap(), Level::WARN);
    assert_eq!(parse_log_level("error").unwrap(), Level::ERROR);
}

#[test]
fn test_parse_log_level_rejects_unknown_names() {
    assert!(matches!(
        parse_log_level("verbose"),
        Err(Error::Configuration { .. })
    ));
}

#[test]
fn test_init_logging_rejects_invalid_level_before_installing() {
    let config = LoggingConfig {
        level: "chatty".to_string(),
        ..LoggingConfig::default()
    };
    assert!(init_logging(&config).is_err());
}

#[test]
fn test_second_initialization_fails_cleanly() {
    let config = LoggingConfig::default();
    // The first call may lose a race with another test; the second never succeeds.
    let _ = init_logging(&config);
    assert!(matches!(
        init_logging(&config),
        Err(Error::Configuration { .. })
    ));
}
