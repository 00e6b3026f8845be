//! Integration tests for reposcope-core infrastructure

use reposcope_core::{
    api_error, config_error, not_found_error, ErrorContext, ReposcopeConfig, ReposcopeError,
};

#[test]
fn test_error_handling() {
    let error = api_error!("Test API error", "test_component");

    match &error {
        ReposcopeError::Api {
            message, context, ..
        } => {
            assert_eq!(message, "Test API error");
            assert_eq!(context.component, "test_component");
            assert!(!context.error_id.is_empty());
        }
        _ => panic!("Expected Api error"),
    }

    // Logging an error should not panic
    error.log();

    let network_error = ReposcopeError::Network {
        message: "Connection failed".to_string(),
        source: None,
        context: ErrorContext::new("test"),
    };
    assert!(network_error.is_recoverable());

    let config_error = config_error!("Invalid config", "test");
    assert!(!config_error.is_recoverable());
}

#[test]
fn test_error_macros() {
    let not_found_err = not_found_error!("octocat/missing", "github_client");
    match not_found_err {
        ReposcopeError::NotFound {
            resource, context, ..
        } => {
            assert_eq!(resource, "octocat/missing");
            assert_eq!(context.component, "github_client");
            assert!(!context.recovery_suggestions.is_empty());
        }
        _ => panic!("Expected NotFound error"),
    }
}

#[test]
fn test_config_defaults() {
    let config = ReposcopeConfig::default();

    assert_eq!(config.github.api_base, "https://api.github.com");
    assert_eq!(config.shell.default_owner, "mozilla-ai");
    assert_eq!(config.shell.default_repo, "lumigator");
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_validation() {
    let mut config = ReposcopeConfig::default();
    assert!(config.validate().is_ok());

    config.github.timeout_seconds = 0;
    let result = config.validate();
    assert!(result.is_err());

    match result.unwrap_err() {
        ReposcopeError::Config { message, .. } => {
            assert!(message.contains("timeout_seconds"));
        }
        _ => panic!("Expected Config error"),
    }
}

#[test]
fn test_config_file_roundtrip() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("reposcope.toml");

    let mut config = ReposcopeConfig::default();
    config.github.timeout_seconds = 42;
    config.llm.provider = "anthropic".to_string();

    config.save_to_file(&path).expect("save config");
    let loaded = ReposcopeConfig::from_file(&path).expect("load config");

    assert_eq!(loaded.github.timeout_seconds, 42);
    assert_eq!(loaded.llm.provider, "anthropic");
    assert_eq!(loaded.github.api_base, config.github.api_base);
}

#[test]
fn test_config_file_missing() {
    let result = ReposcopeConfig::from_file("/nonexistent/reposcope.toml");
    assert!(matches!(result, Err(ReposcopeError::Config { .. })));
}
