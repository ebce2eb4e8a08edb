// crates/nfe-dfe-core/src/document.rs
// ============================================================================
// Module: NFe DFe Distribution Results
// Description: Distribution result and per-document summaries.
// Purpose: Give callers a typed batch with pagination cursors and per-invoice fields.
// Dependencies: serde, time, bigdecimal
// ============================================================================

//! ## Overview
//! A successful distribution call yields one [`DistributionResult`]: the
//! authority status pair, the two pagination cursors, and zero or more
//! [`DocumentSummary`] values in stream order. Zero documents is a valid
//! outcome (nothing new since the cursor), signalled by authority status
//! `137`. Each summary keeps the embedded document verbatim in `raw_xml` for
//! downstream archival; the parsed fields are a convenience extraction, not a
//! replacement for the document.

// ============================================================================
// SECTION: Imports
// ============================================================================

use bigdecimal::BigDecimal;
use serde::Deserialize;
use serde::Serialize;
use time::OffsetDateTime;

// ============================================================================
// SECTION: Status Codes
// ============================================================================

/// Authority status: documents were located for the query.
pub const STAT_DOCUMENTS_FOUND: &str = "138";

/// Authority status: no documents newer than the supplied cursor.
pub const STAT_NO_DOCUMENTS: &str = "137";

// ============================================================================
// SECTION: Document Summary
// ============================================================================

/// Coarse classification of an embedded distribution document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Invoice resume (`resNFe`), the metadata-only event.
    Resume,
    /// Full authorized invoice (`procNFe` / `nfeProc`).
    Full,
    /// Invoice event such as a cancellation (`resEvento`, `procEventoNFe`).
    Event,
    /// Any tag this subsystem does not classify.
    Other,
}

/// One embedded document extracted from a `docZip` element.
///
/// # Invariants
/// - Created once per parsed `docZip`; immutable afterwards.
/// - `raw_xml` is the decompressed embedded document, verbatim.
/// - Timestamps are timezone-aware; naive source values were assumed UTC.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSummary {
    /// Stream position of this document.
    pub nsu: String,
    /// Authority schema/version identifier of the embedded document.
    pub schema: String,
    /// Tag name of the embedded document, without namespace.
    pub document_type: String,
    /// 44-digit access key, empty when the document carries none.
    pub access_key: String,
    /// Issuer tax identifier, normalized to 14 digits when possible.
    pub issuer_tax_id: String,
    /// Issuer legal name, empty when absent.
    pub issuer_name: String,
    /// Issue instant of the invoice, when present and parseable.
    #[serde(with = "time::serde::rfc3339::option")]
    pub issue_datetime: Option<OffsetDateTime>,
    /// Authorization instant, when present and parseable.
    #[serde(with = "time::serde::rfc3339::option")]
    pub authorization_datetime: Option<OffsetDateTime>,
    /// Total invoice value; `None` when absent or non-numeric.
    pub total_value: Option<BigDecimal>,
    /// The embedded document, verbatim, for downstream archival.
    pub raw_xml: String,
}

impl DocumentSummary {
    /// Classifies the embedded document by its tag name.
    #[must_use]
    pub fn kind(&self) -> DocumentKind {
        match self.document_type.as_str() {
            "resNFe" => DocumentKind::Resume,
            "procNFe" | "nfeProc" => DocumentKind::Full,
            "resEvento" | "procEventoNFe" => DocumentKind::Event,
            _ => DocumentKind::Other,
        }
    }
}

// ============================================================================
// SECTION: Distribution Result
// ============================================================================

/// The outcome of one successful distribution exchange.
///
/// # Invariants
/// - `documents` preserves authority stream order.
/// - `last_nsu` and `max_nsu` are 15-digit cursor strings, defaulted to all
///   zeros when the authority omitted them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionResult {
    /// Authority-defined numeric status code, e.g. `138`.
    pub status_code: String,
    /// Human-readable authority status message.
    pub status_message: String,
    /// Cursor of the last document in this batch; resume point for paging.
    pub last_nsu: String,
    /// Highest cursor currently available for the taxpayer.
    pub max_nsu: String,
    /// Parsed documents in stream order; may be empty.
    pub documents: Vec<DocumentSummary>,
}

impl DistributionResult {
    /// Returns true when the authority reported documents for the query.
    #[must_use]
    pub fn has_documents(&self) -> bool {
        self.status_code == STAT_DOCUMENTS_FOUND
    }

    /// Returns true when nothing newer than the supplied cursor exists.
    #[must_use]
    pub fn no_new_documents(&self) -> bool {
        self.status_code == STAT_NO_DOCUMENTS
    }

    /// Returns true when further pages remain after `last_nsu`.
    #[must_use]
    pub fn has_more_pages(&self) -> bool {
        self.last_nsu < self.max_nsu
    }
}
