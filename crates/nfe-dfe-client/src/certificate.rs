// crates/nfe-dfe-client/src/certificate.rs
// ============================================================================
// Module: A1 Certificate Bundle Loading
// Description: PKCS#12 decoding into PEM material and non-secret metadata.
// Purpose: Turn an uploaded A1 bundle into TLS-usable buffers without leaking the key.
// Dependencies: openssl, nfe-dfe-core, time
// ============================================================================

//! ## Overview
//! An A1 certificate arrives as a password-protected PKCS#12 container
//! holding the private key, the leaf certificate, and usually one or more
//! intermediates. [`load`] decodes it into PEM buffers (chain leaf-first) and
//! derives [`CertificateMetadata`] once. The bundle lives for the duration of
//! one distribution call or one validation check; it is never serialized.
//!
//! Subject rendering is two-tier: a structured RFC 4514 style formatter
//! first, and a lossy `attr=value` concatenation as fallback, so an unusual
//! but well-formed subject can never fail a load.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::path::Path;

use nfe_dfe_core::CertificateError;
use nfe_dfe_core::CertificateMetadata;
use openssl::asn1::Asn1Time;
use openssl::asn1::Asn1TimeRef;
use openssl::pkcs12::Pkcs12;
use openssl::x509::X509NameRef;
use openssl::x509::X509Ref;
use time::OffsetDateTime;

// ============================================================================
// SECTION: Certificate Bundle
// ============================================================================

/// Decoded A1 bundle: PEM buffers plus metadata, scoped to one call.
///
/// # Invariants
/// - `private_key_pem` is never logged, never returned to callers, and only
///   ever written into a scoped temporary file.
/// - `chain_pem` starts with the leaf certificate, intermediates follow.
pub struct CertificateBundle {
    /// Leaf certificate, PEM encoded.
    certificate_pem: Vec<u8>,
    /// Private key, unencrypted PKCS#8 PEM.
    private_key_pem: Vec<u8>,
    /// Leaf-first certificate chain, PEM encoded.
    chain_pem: Vec<u8>,
    /// Non-secret metadata derived at load time.
    metadata: CertificateMetadata,
}

impl CertificateBundle {
    /// Returns the non-secret metadata derived at load time.
    #[must_use]
    pub const fn metadata(&self) -> &CertificateMetadata {
        &self.metadata
    }

    /// Returns the leaf certificate PEM.
    #[must_use]
    pub fn certificate_pem(&self) -> &[u8] {
        &self.certificate_pem
    }

    /// Returns the leaf-first chain PEM for the TLS layer.
    pub(crate) fn chain_pem(&self) -> &[u8] {
        &self.chain_pem
    }

    /// Returns the private key PEM for the TLS layer.
    pub(crate) fn private_key_pem(&self) -> &[u8] {
        &self.private_key_pem
    }
}

impl fmt::Debug for CertificateBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CertificateBundle")
            .field("metadata", &self.metadata)
            .field("private_key_pem", &"<redacted>")
            .finish_non_exhaustive()
    }
}

// ============================================================================
// SECTION: Loading
// ============================================================================

/// Decodes a PKCS#12 container into a [`CertificateBundle`].
///
/// # Errors
///
/// Returns [`CertificateError::EmptyFile`] for zero bytes,
/// [`CertificateError::Decode`] when the container cannot be opened with the
/// given password, [`CertificateError::MissingKeyMaterial`] when the
/// container lacks a certificate or private key, and
/// [`CertificateError::InvalidValidity`] when a validity date cannot be
/// normalized to UTC.
pub fn load(data: &[u8], password: &str) -> Result<CertificateBundle, CertificateError> {
    if data.is_empty() {
        return Err(CertificateError::EmptyFile);
    }
    let container = Pkcs12::from_der(data).map_err(|_| CertificateError::Decode)?;
    let parsed = container.parse2(password).map_err(|_| CertificateError::Decode)?;
    let (Some(cert), Some(key)) = (parsed.cert, parsed.pkey) else {
        return Err(CertificateError::MissingKeyMaterial);
    };

    let certificate_pem = cert.to_pem().map_err(|_| CertificateError::Decode)?;
    let private_key_pem =
        key.private_key_to_pem_pkcs8().map_err(|_| CertificateError::Decode)?;
    let mut chain_pem = certificate_pem.clone();
    if let Some(extras) = parsed.ca {
        for extra in &extras {
            let extra_pem = extra.to_pem().map_err(|_| CertificateError::Decode)?;
            chain_pem.extend_from_slice(&extra_pem);
        }
    }

    let metadata = derive_metadata(&cert)?;
    Ok(CertificateBundle {
        certificate_pem,
        private_key_pem,
        chain_pem,
        metadata,
    })
}

/// Reads a PKCS#12 container from `path` and decodes it.
///
/// A missing or unreadable file is a certificate problem from the caller's
/// point of view, so it surfaces as [`CertificateError::Unreadable`] rather
/// than an I/O error.
///
/// # Errors
///
/// Returns [`CertificateError`] as described for [`load`], plus
/// [`CertificateError::Unreadable`] when the file cannot be read.
pub fn load_from_path(
    path: &Path,
    password: &str,
) -> Result<CertificateBundle, CertificateError> {
    let data = std::fs::read(path)
        .map_err(|_| CertificateError::Unreadable(path.display().to_string()))?;
    load(&data, password)
}

/// Decodes a container and returns only its metadata, for validation checks
/// that never open a TLS session.
///
/// # Errors
///
/// Returns [`CertificateError`] as described for [`load`].
pub fn inspect(data: &[u8], password: &str) -> Result<CertificateMetadata, CertificateError> {
    Ok(load(data, password)?.metadata)
}

// ============================================================================
// SECTION: Metadata Derivation
// ============================================================================

/// Derives non-secret metadata from the leaf certificate.
fn derive_metadata(cert: &X509Ref) -> Result<CertificateMetadata, CertificateError> {
    let serial_number = cert
        .serial_number()
        .to_bn()
        .and_then(|bn| bn.to_hex_str().map(|hex| hex.to_string()))
        .map_err(|_| CertificateError::Decode)?;
    Ok(CertificateMetadata {
        subject: format_subject(cert.subject_name()),
        serial_number,
        valid_from: to_utc_instant(cert.not_before())?,
        valid_until: to_utc_instant(cert.not_after())?,
    })
}

/// Normalizes an ASN.1 validity time to a UTC instant.
fn to_utc_instant(value: &Asn1TimeRef) -> Result<OffsetDateTime, CertificateError> {
    let epoch = Asn1Time::from_unix(0).map_err(|_| CertificateError::InvalidValidity)?;
    let diff = epoch.diff(value).map_err(|_| CertificateError::InvalidValidity)?;
    let seconds = i64::from(diff.days) * 86_400 + i64::from(diff.secs);
    OffsetDateTime::from_unix_timestamp(seconds).map_err(|_| CertificateError::InvalidValidity)
}

/// Renders the subject with the structured formatter, falling back to lossy
/// concatenation so an unusual subject can never fail a load.
fn format_subject(name: &X509NameRef) -> String {
    subject_structured(name).unwrap_or_else(|| subject_fallback(name))
}

/// Preferred formatter: `attr=value` pairs with short attribute names, most
/// specific component first (RFC 4514 ordering).
fn subject_structured(name: &X509NameRef) -> Option<String> {
    let mut parts = Vec::new();
    for entry in name.entries() {
        let attribute = entry.object().nid().short_name().ok()?;
        let value = entry.data().as_utf8().ok()?;
        parts.push(format!("{attribute}={value}"));
    }
    if parts.is_empty() {
        return None;
    }
    parts.reverse();
    Some(parts.join(","))
}

/// Fallback formatter: numeric OIDs and lossy UTF-8, never fails.
fn subject_fallback(name: &X509NameRef) -> String {
    let mut parts = Vec::new();
    for entry in name.entries() {
        let attribute = entry.object().to_string();
        let value = String::from_utf8_lossy(entry.data().as_slice()).into_owned();
        parts.push(format!("{attribute}={value}"));
    }
    parts.join(", ")
}
