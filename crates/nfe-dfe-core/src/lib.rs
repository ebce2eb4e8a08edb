// crates/nfe-dfe-core/src/lib.rs
// ============================================================================
// Module: NFe DFe Core
// Description: Data model and pure logic for the NFe distribution client.
// Purpose: Provide typed queries, results, and error taxonomy shared by all crates.
// Dependencies: serde, thiserror, time, bigdecimal
// ============================================================================

//! ## Overview
//! This crate holds the data model of the NFe distribution subsystem: taxpayer
//! identifiers, the three mutually exclusive query modes, distribution results
//! with per-document summaries, certificate metadata, and the error taxonomy.
//! Everything here is pure: no I/O, no clock reads, no network. The transport
//! and certificate plumbing live in `nfe-dfe-client`.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod certificate;
pub mod document;
pub mod environment;
pub mod errors;
pub mod identifiers;
pub mod query;
pub mod timeparse;
pub mod value;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use certificate::CertificateMetadata;
pub use document::DistributionResult;
pub use document::DocumentKind;
pub use document::DocumentSummary;
pub use document::STAT_DOCUMENTS_FOUND;
pub use document::STAT_NO_DOCUMENTS;
pub use environment::Environment;
pub use errors::CertificateError;
pub use errors::DistributionError;
pub use errors::InputError;
pub use identifiers::COUNTRY_WIDE_UF;
pub use identifiers::EMPTY_NSU;
pub use identifiers::NSU_WIDTH;
pub use identifiers::normalize_cnpj;
pub use identifiers::normalize_state_code;
pub use identifiers::normalize_tax_id;
pub use identifiers::pad_nsu;
pub use identifiers::validate_access_key;
pub use query::DistributionQuery;
pub use timeparse::parse_instant;
pub use value::parse_decimal;
