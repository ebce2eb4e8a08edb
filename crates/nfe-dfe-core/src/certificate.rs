// crates/nfe-dfe-core/src/certificate.rs
// ============================================================================
// Module: NFe DFe Certificate Metadata
// Description: Non-secret metadata derived from a loaded A1 certificate.
// Purpose: Let callers display and check certificate validity without key material.
// Dependencies: serde, time
// ============================================================================

//! ## Overview
//! [`CertificateMetadata`] is the only certificate-derived value that may
//! leave the distribution subsystem: subject, serial, and the validity
//! window, all derived once at load time. The admin layer uses it to render
//! the certificate status panel and warn about upcoming expiry. It carries no
//! key material by construction.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use time::OffsetDateTime;

// ============================================================================
// SECTION: Certificate Metadata
// ============================================================================

/// Non-secret metadata of a loaded A1 certificate.
///
/// # Invariants
/// - Derived exactly once per load; immutable afterwards.
/// - `valid_from` and `valid_until` are timezone-aware UTC instants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateMetadata {
    /// Distinguished name of the subject, RFC 4514 style.
    pub subject: String,
    /// Serial number as an uppercase hex string.
    pub serial_number: String,
    /// Start of the validity window.
    #[serde(with = "time::serde::rfc3339")]
    pub valid_from: OffsetDateTime,
    /// End of the validity window.
    #[serde(with = "time::serde::rfc3339")]
    pub valid_until: OffsetDateTime,
}

impl CertificateMetadata {
    /// Returns true when `instant` falls inside the validity window.
    #[must_use]
    pub fn is_valid_at(&self, instant: OffsetDateTime) -> bool {
        self.valid_from <= instant && instant <= self.valid_until
    }

    /// Whole days remaining until expiry at `now`; negative once expired.
    #[must_use]
    pub fn days_until_expiry(&self, now: OffsetDateTime) -> i64 {
        (self.valid_until - now).whole_days()
    }
}
