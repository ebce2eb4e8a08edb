// crates/nfe-dfe-client/src/lib.rs
// ============================================================================
// Module: NFe DFe Client
// Description: Mutual-TLS SOAP client for the NFe distribution service.
// Purpose: Load A1 certificates, build distribution queries, and pull document batches.
// Dependencies: nfe-dfe-core, nfe-dfe-config, reqwest, openssl, roxmltree, flate2
// ============================================================================

//! ## Overview
//! This crate is the protocol-engineering core of the subsystem: it decodes a
//! password-protected PKCS#12 (A1) bundle into TLS-usable material, renders
//! the `nfeDistDFeInteresse` SOAP operation, walks the per-environment
//! endpoint catalog with sequential fallback, and parses responses whose
//! bodies embed zero or more DEFLATE-compressed invoice documents.
//!
//! Secret handling is the one ownership rule everything here upholds: the
//! private key exists only inside [`certificate::CertificateBundle`] (whose
//! `Debug` redacts it) and inside the two owner-only temporary files managed
//! by [`credentials::ScopedCredentialFiles`], which are removed on every exit
//! path. No log line or error carries key material or passwords.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod certificate;
pub mod client;
pub mod credentials;
pub mod endpoints;
pub mod payload;
pub mod response;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use certificate::CertificateBundle;
pub use certificate::inspect;
pub use certificate::load;
pub use certificate::load_from_path;
pub use client::DistributionClient;
pub use credentials::ScopedCredentialFiles;
pub use endpoints::endpoints_for;
pub use payload::SOAP_ACTION;
pub use payload::build_query_payload;
pub use response::parse_response;
