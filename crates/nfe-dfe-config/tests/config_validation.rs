// crates/nfe-dfe-config/tests/config_validation.rs
// ============================================================================
// Module: Config Validation Tests
// Description: Defaults, TOML parsing, validation rules, and password redaction.
// Purpose: Pin the configuration contract the client relies on.
// ============================================================================

//! ## Overview
//! The configuration record is maintained by operators through an external
//! admin layer; these tests pin what that layer may rely on: defaults,
//! validation rules, and that the certificate password never leaks through
//! `Debug`.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::path::PathBuf;
use std::time::Duration;

use nfe_dfe_config::ConfigError;
use nfe_dfe_config::DEFAULT_TIMEOUT_SECS;
use nfe_dfe_config::SefazConfig;
use nfe_dfe_core::Environment;

// ============================================================================
// SECTION: Defaults and Parsing
// ============================================================================

/// Tests default record is valid.
#[test]
fn default_record_is_valid() {
    let config = SefazConfig::default();
    config.validate().unwrap();
    assert_eq!(config.environment, Environment::Production);
    assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    assert!(config.endpoints.production.is_empty());
    assert!(!config.has_certificate());
}

/// Tests TOML record parses with partial fields.
#[test]
fn toml_record_parses_with_partial_fields() {
    let config = SefazConfig::from_toml_str(
        r#"
        environment = "homologation"
        timeout_secs = 10

        [endpoints]
        homologation = ["https://sefaz.example/ws/NFeDistribuicaoDFe.asmx"]
        "#,
    )
    .unwrap();
    assert_eq!(config.environment, Environment::Homologation);
    assert_eq!(config.timeout(), Duration::from_secs(10));
    assert_eq!(config.endpoints.homologation.len(), 1);
    assert!(config.endpoints.production.is_empty());
}

/// Tests malformed TOML is a parse error.
#[test]
fn malformed_toml_is_a_parse_error() {
    let err = SefazConfig::from_toml_str("environment = ").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

// ============================================================================
// SECTION: Validation Rules
// ============================================================================

/// Tests zero timeout is rejected.
#[test]
fn zero_timeout_is_rejected() {
    let config = SefazConfig {
        timeout_secs: 0,
        ..SefazConfig::default()
    };
    assert_eq!(config.validate().unwrap_err(), ConfigError::ZeroTimeout);
}

/// Tests non HTTP endpoint override is rejected.
#[test]
fn non_http_endpoint_override_is_rejected() {
    let mut config = SefazConfig::default();
    config.endpoints.production.push("ftp://mirror.example".to_string());
    assert!(matches!(config.validate().unwrap_err(), ConfigError::InvalidEndpoint(_)));
}

/// Tests blank endpoint override is rejected.
#[test]
fn blank_endpoint_override_is_rejected() {
    let mut config = SefazConfig::default();
    config.endpoints.production.push("   ".to_string());
    assert!(matches!(config.validate().unwrap_err(), ConfigError::InvalidEndpoint(_)));
}

/// Tests password without certificate is rejected.
#[test]
fn password_without_certificate_is_rejected() {
    let config = SefazConfig {
        certificate_password: Some("secret".to_string()),
        ..SefazConfig::default()
    };
    assert_eq!(config.validate().unwrap_err(), ConfigError::PasswordWithoutCertificate);
}

/// Tests certificate requires both path and password.
#[test]
fn certificate_requires_both_path_and_password() {
    let mut config = SefazConfig {
        certificate_path: Some(PathBuf::from("/srv/certs/a1.pfx")),
        ..SefazConfig::default()
    };
    assert!(!config.has_certificate());
    config.certificate_password = Some(String::new());
    assert!(!config.has_certificate());
    config.certificate_password = Some("secret".to_string());
    assert!(config.has_certificate());
}

// ============================================================================
// SECTION: Secret Handling
// ============================================================================

/// Tests debug output redacts the password.
#[test]
fn debug_output_redacts_the_password() {
    let config = SefazConfig {
        certificate_path: Some(PathBuf::from("/srv/certs/a1.pfx")),
        certificate_password: Some("hunter2".to_string()),
        ..SefazConfig::default()
    };
    let rendered = format!("{config:?}");
    assert!(!rendered.contains("hunter2"));
    assert!(rendered.contains("<redacted>"));
}
