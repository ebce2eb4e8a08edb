// crates/nfe-dfe-core/src/errors.rs
// ============================================================================
// Module: NFe DFe Error Taxonomy
// Description: Typed errors for certificate handling, input validation, and distribution.
// Purpose: Give callers distinct, non-retryable vs retryable failure categories.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Three error families cover the subsystem. [`CertificateError`] means the
//! PKCS#12 bundle cannot be used and the call must not be retried.
//! [`InputError`] means a caller-supplied identifier failed validation before
//! any network I/O. [`DistributionError`] is the client-facing family: it
//! carries the certificate-not-configured case distinctly (so callers can
//! prompt for re-configuration instead of retrying) and, on endpoint
//! exhaustion, the last concrete per-endpoint failure.
//!
//! Secret material (key PEM, certificate password) never appears in any
//! variant payload.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

// ============================================================================
// SECTION: Certificate Errors
// ============================================================================

/// Failure to decode or use a PKCS#12 certificate bundle.
///
/// # Invariants
/// - Always fatal to the current call; never retried automatically.
/// - Variant payloads never contain key material or passwords.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CertificateError {
    /// The uploaded certificate file has zero bytes.
    #[error("certificate file is empty")]
    EmptyFile,
    /// The certificate file could not be read from its configured location.
    #[error("certificate file could not be read: {0}")]
    Unreadable(String),
    /// The PKCS#12 container could not be opened (wrong password or corrupt).
    #[error("certificate container could not be decoded; check the password")]
    Decode,
    /// The container holds no certificate or no private key.
    #[error("certificate container is missing the certificate or private key")]
    MissingKeyMaterial,
    /// A validity date in the certificate could not be normalized to UTC.
    #[error("certificate carries an invalid validity period")]
    InvalidValidity,
}

// ============================================================================
// SECTION: Input Errors
// ============================================================================

/// Malformed caller-supplied identifier, rejected before any network I/O.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// The CNPJ did not normalize to exactly 14 digits.
    #[error("CNPJ must normalize to exactly 14 digits")]
    InvalidCnpj,
    /// The access key is not exactly 44 digits.
    #[error("access key must be exactly 44 digits")]
    InvalidAccessKey,
    /// The NSU cursor is not numeric or exceeds 15 digits.
    #[error("NSU must be numeric with at most 15 digits")]
    InvalidNsu,
    /// More than one query mode was selected at once.
    #[error("exactly one query mode must be selected")]
    AmbiguousQuery,
}

// ============================================================================
// SECTION: Distribution Errors
// ============================================================================

/// Failure of a distribution query after input validation.
///
/// # Invariants
/// - `CertificateMissing` is surfaced distinctly so callers can prompt for
///   re-configuration rather than retry.
/// - On endpoint exhaustion the client returns the last per-endpoint variant
///   it recorded, preserving the concrete diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DistributionError {
    /// No certificate or no password is configured for the taxpayer.
    #[error("no usable certificate is configured: {0}")]
    CertificateMissing(String),
    /// The configured certificate bundle could not be decoded.
    #[error(transparent)]
    Certificate(#[from] CertificateError),
    /// A caller-supplied identifier failed validation.
    #[error(transparent)]
    Input(#[from] InputError),
    /// The HTTP exchange with an endpoint failed at the transport level.
    #[error("connection to {endpoint} failed")]
    Connection {
        /// Endpoint URL that failed.
        endpoint: String,
    },
    /// An endpoint answered with a non-200 HTTP status.
    #[error("{endpoint} returned HTTP {status}")]
    HttpStatus {
        /// Endpoint URL that answered.
        endpoint: String,
        /// HTTP status code of the answer.
        status: u16,
    },
    /// The response body did not contain the expected SOAP structure.
    #[error("malformed distribution response: {0}")]
    MalformedResponse(String),
    /// The endpoint catalog resolved to an empty list.
    #[error("no distribution endpoint is configured")]
    NoEndpoints,
    /// Scoped credential files could not be created or written.
    #[error("credential files could not be prepared: {0}")]
    CredentialFiles(String),
    /// The HTTP client could not be constructed with the mTLS identity.
    #[error("HTTP client could not be built: {0}")]
    ClientBuild(String),
}
