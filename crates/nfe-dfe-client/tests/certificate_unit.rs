// crates/nfe-dfe-client/tests/certificate_unit.rs
// ============================================================================
// Module: Certificate Loading Tests
// Description: Tests for PKCS#12 decoding, metadata derivation, and redaction.
// Purpose: Exercise bundle loading against generated A1 containers.
// Dependencies: nfe-dfe-client, nfe-dfe-core, openssl, time
// ============================================================================
//! ## Overview
//! Validates bundle decoding outcomes, derived metadata, and the rule that
//! key material never surfaces through `Debug`.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

mod common;

use std::path::Path;

use common::TEST_PASSWORD;
use common::generate_pkcs12;
use common::pkcs12_file;
use nfe_dfe_client::inspect;
use nfe_dfe_client::load;
use nfe_dfe_client::load_from_path;
use nfe_dfe_core::CertificateError;
use time::Duration;
use time::OffsetDateTime;

/// Tests load decodes generated bundle.
#[test]
fn load_decodes_generated_bundle() {
    let der = generate_pkcs12("Empresa Exemplo:12345678000195", TEST_PASSWORD);
    let bundle = load(&der, TEST_PASSWORD).unwrap();

    let metadata = bundle.metadata();
    assert!(metadata.subject.contains("Empresa Exemplo:12345678000195"));
    assert!(!metadata.serial_number.is_empty());
    assert!(bundle.certificate_pem().starts_with(b"-----BEGIN CERTIFICATE-----"));
}

/// Tests load derives validity window.
#[test]
fn load_derives_validity_window() {
    let der = generate_pkcs12("Janela", TEST_PASSWORD);
    let metadata = inspect(&der, TEST_PASSWORD).unwrap();

    let now = OffsetDateTime::now_utc();
    assert!(metadata.valid_from <= now);
    assert!(metadata.valid_until > now + Duration::days(360));
    assert!(metadata.is_valid_at(now));
    assert!(!metadata.is_valid_at(now + Duration::days(400)));

    let remaining = metadata.days_until_expiry(now);
    assert!((360..=365).contains(&remaining), "unexpected remaining days: {remaining}");
}

/// Tests load rejects wrong password.
#[test]
fn load_rejects_wrong_password() {
    let der = generate_pkcs12("Senha", TEST_PASSWORD);
    let err = load(&der, "wrong-password").unwrap_err();
    assert_eq!(err, CertificateError::Decode);
}

/// Tests load rejects empty input.
#[test]
fn load_rejects_empty_input() {
    let err = load(&[], TEST_PASSWORD).unwrap_err();
    assert_eq!(err, CertificateError::EmptyFile);
}

/// Tests load rejects garbage input.
#[test]
fn load_rejects_garbage_input() {
    let err = load(b"this is not a pkcs12 container", TEST_PASSWORD).unwrap_err();
    assert_eq!(err, CertificateError::Decode);
}

/// Tests load from path reads file.
#[test]
fn load_from_path_reads_file() {
    let file = pkcs12_file("Arquivo", TEST_PASSWORD);
    let bundle = load_from_path(file.path(), TEST_PASSWORD).unwrap();
    assert!(bundle.metadata().subject.contains("Arquivo"));
}

/// Tests load from path reports missing file.
#[test]
fn load_from_path_reports_missing_file() {
    let err =
        load_from_path(Path::new("/nonexistent/cert.pfx"), TEST_PASSWORD).unwrap_err();
    assert!(matches!(err, CertificateError::Unreadable(path) if path.contains("cert.pfx")));
}

/// Tests debug output redacts private key.
#[test]
fn debug_output_redacts_private_key() {
    let der = generate_pkcs12("Sigilo", TEST_PASSWORD);
    let bundle = load(&der, TEST_PASSWORD).unwrap();

    let rendered = format!("{bundle:?}");
    assert!(rendered.contains("<redacted>"));
    assert!(!rendered.contains("PRIVATE KEY"));
    assert!(!rendered.contains(TEST_PASSWORD));
}
