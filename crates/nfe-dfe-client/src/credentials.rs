// crates/nfe-dfe-client/src/credentials.rs
// ============================================================================
// Module: Scoped Credential Files
// Description: Short-lived owner-only temp files backing a TLS configuration.
// Purpose: Guarantee secret material on disk is removed on every exit path.
// Dependencies: tempfile, nfe-dfe-core
// ============================================================================

//! ## Overview
//! The TLS layer needs the certificate chain and the private key as files
//! for the duration of one distribution call. [`ScopedCredentialFiles`] is
//! the only place in the subsystem that writes secret material to durable
//! storage: two temporary files created owner-readable only, filled and
//! flushed at construction, and removed when the value drops — on normal
//! return, on error, and on unwind alike. Removal failure is swallowed, so
//! cleanup can never mask the primary result or error.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::Path;

use nfe_dfe_core::DistributionError;
use tempfile::Builder;
use tempfile::TempPath;

use crate::certificate::CertificateBundle;

// ============================================================================
// SECTION: Scoped Files
// ============================================================================

/// Two owner-only temporary files (chain, key) scoped to one TLS setup.
///
/// # Invariants
/// - Both files exist, flushed, for the whole lifetime of the value.
/// - Both files are removed when the value drops, on every exit path;
///   removal failure is swallowed.
#[derive(Debug)]
pub struct ScopedCredentialFiles {
    /// Certificate chain PEM file, leaf first.
    chain: TempPath,
    /// Private key PEM file.
    key: TempPath,
}

impl ScopedCredentialFiles {
    /// Writes the bundle's chain and key PEM into fresh temporary files.
    ///
    /// # Errors
    ///
    /// Returns [`DistributionError::CredentialFiles`] when a file cannot be
    /// created, written, or flushed.
    pub fn create(bundle: &CertificateBundle) -> Result<Self, DistributionError> {
        Ok(Self {
            chain: write_secret_file(bundle.chain_pem())?,
            key: write_secret_file(bundle.private_key_pem())?,
        })
    }

    /// Path of the certificate chain file.
    #[must_use]
    pub fn chain_path(&self) -> &Path {
        &self.chain
    }

    /// Path of the private key file.
    #[must_use]
    pub fn key_path(&self) -> &Path {
        &self.key
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Creates one temporary PEM file, owner-readable only, and flushes `bytes`
/// into it. The returned [`TempPath`] removes the file on drop and swallows
/// removal errors.
fn write_secret_file(bytes: &[u8]) -> Result<TempPath, DistributionError> {
    // tempfile creates with mode 0o600 on Unix; no other principal can read.
    let mut file = Builder::new()
        .prefix("nfe-dfe-")
        .suffix(".pem")
        .tempfile()
        .map_err(|err| DistributionError::CredentialFiles(err.to_string()))?;
    file.write_all(bytes)
        .map_err(|err| DistributionError::CredentialFiles(err.to_string()))?;
    file.flush()
        .map_err(|err| DistributionError::CredentialFiles(err.to_string()))?;
    Ok(file.into_temp_path())
}
