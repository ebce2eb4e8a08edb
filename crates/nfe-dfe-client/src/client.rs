// crates/nfe-dfe-client/src/client.rs
// ============================================================================
// Module: Distribution Client
// Description: Mutual-TLS HTTP exchange with sequential endpoint fallback.
// Purpose: Drive one distribution query across the mirror catalog, first success wins.
// Dependencies: reqwest, nfe-dfe-core, nfe-dfe-config, tracing
// ============================================================================

//! ## Overview
//! One distribution call is strictly sequential: validate input, load the
//! certificate, render the payload, then try each catalog endpoint in order
//! until one answers HTTP 200 with a parseable body. Endpoints represent the
//! same logical request at different mirrors, so attempts are never raced —
//! duplicate submissions would double-count on the authority side.
//! Per-endpoint failures (network, non-200, unparseable body) are recorded
//! and the loop continues; only exhaustion of the catalog surfaces an error,
//! carrying the last concrete failure.
//!
//! The scoped credential files live exactly as long as the endpoint loop,
//! whatever its outcome; their removal is guaranteed by
//! [`ScopedCredentialFiles`] dropping.

// ============================================================================
// SECTION: Imports
// ============================================================================

use nfe_dfe_config::SefazConfig;
use nfe_dfe_core::COUNTRY_WIDE_UF;
use nfe_dfe_core::DistributionError;
use nfe_dfe_core::DistributionQuery;
use nfe_dfe_core::DistributionResult;
use nfe_dfe_core::normalize_state_code;
use reqwest::StatusCode;
use reqwest::blocking::Client;
use reqwest::blocking::Response;
use reqwest::header::ACCEPT;
use reqwest::header::CONTENT_TYPE;
use tracing::debug;
use tracing::warn;

use crate::certificate;
use crate::certificate::CertificateBundle;
use crate::credentials::ScopedCredentialFiles;
use crate::endpoints::endpoints_for;
use crate::payload::SOAP_ACTION;
use crate::payload::SOAP_CONTENT_TYPE;
use crate::payload::build_query_payload;
use crate::response::parse_response;

// ============================================================================
// SECTION: Client
// ============================================================================

/// Stateless distribution client bound to one configuration record.
///
/// # Invariants
/// - No state is shared between calls; two concurrent queries run
///   independently.
/// - Endpoints are attempted strictly in catalog order, never concurrently.
#[derive(Debug, Clone)]
pub struct DistributionClient {
    /// Configuration record owned by the external collaborator.
    config: SefazConfig,
}

impl DistributionClient {
    /// Creates a client over `config`.
    #[must_use]
    pub const fn new(config: SefazConfig) -> Self {
        Self {
            config,
        }
    }

    /// Returns the configuration this client was built with.
    #[must_use]
    pub const fn config(&self) -> &SefazConfig {
        &self.config
    }

    /// Runs one distribution query with sequential endpoint fallback.
    ///
    /// The first endpoint that both answers HTTP 200 and parses wins; no
    /// further endpoints are tried. Zero returned documents is a valid,
    /// non-error outcome.
    ///
    /// # Errors
    ///
    /// Returns [`DistributionError::CertificateMissing`] when no certificate
    /// or password is configured, input validation errors before any network
    /// I/O, and otherwise the last recorded per-endpoint failure once the
    /// catalog is exhausted.
    pub fn query(
        &self,
        cnpj: &str,
        state_code: Option<&str>,
        query: &DistributionQuery,
    ) -> Result<DistributionResult, DistributionError> {
        let bundle = self.load_certificate()?;
        let endpoints = endpoints_for(&self.config);
        if endpoints.is_empty() {
            return Err(DistributionError::NoEndpoints);
        }
        let payload = build_query_payload(cnpj, self.config.environment, state_code, query)?;

        let files = ScopedCredentialFiles::create(&bundle)?;
        let http = self.build_http_client(&files)?;

        let mut last_error: Option<DistributionError> = None;
        for endpoint in &endpoints {
            let response = match self.post_payload(&http, endpoint, &payload) {
                Ok(response) => response,
                Err(err) => {
                    warn!(endpoint = %endpoint, error = %err, "distribution endpoint unreachable");
                    last_error = Some(err);
                    continue;
                }
            };
            let status = response.status();
            if status != StatusCode::OK {
                warn!(endpoint = %endpoint, status = status.as_u16(), "distribution endpoint refused the query");
                last_error = Some(DistributionError::HttpStatus {
                    endpoint: endpoint.clone(),
                    status: status.as_u16(),
                });
                continue;
            }
            let body = match response.bytes() {
                Ok(body) => body,
                Err(err) => {
                    warn!(endpoint = %endpoint, error = %err, "distribution response body could not be read");
                    last_error = Some(DistributionError::Connection {
                        endpoint: endpoint.clone(),
                    });
                    continue;
                }
            };
            match parse_response(&body) {
                Ok(result) => {
                    debug!(
                        endpoint = %endpoint,
                        status_code = %result.status_code,
                        documents = result.documents.len(),
                        "distribution query succeeded"
                    );
                    return Ok(result);
                }
                Err(err) => {
                    warn!(endpoint = %endpoint, error = %err, "distribution response could not be parsed");
                    last_error = Some(err);
                }
            }
        }
        Err(last_error.unwrap_or(DistributionError::NoEndpoints))
    }

    /// Runs [`Self::query`] with a one-shot state-code fallback.
    ///
    /// When the caller-specified state code fails with an HTTP 404 from every
    /// mirror, the query is retried exactly once with the country-wide code
    /// `91`. The fallback never nests and never runs when the primary code
    /// already was `91`.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`Self::query`], from the fallback attempt
    /// when one was made.
    pub fn query_with_uf_fallback(
        &self,
        cnpj: &str,
        state_code: Option<&str>,
        query: &DistributionQuery,
    ) -> Result<DistributionResult, DistributionError> {
        let primary = normalize_state_code(state_code);
        match self.query(cnpj, state_code, query) {
            Err(DistributionError::HttpStatus {
                status: 404, ..
            }) if primary != COUNTRY_WIDE_UF => {
                debug!(state_code = %primary, "retrying distribution query with country-wide UF");
                self.query(cnpj, Some(COUNTRY_WIDE_UF), query)
            }
            outcome => outcome,
        }
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// Loads the configured certificate bundle, distinguishing "not
    /// configured" from "configured but undecodable".
    fn load_certificate(&self) -> Result<CertificateBundle, DistributionError> {
        let Some(path) = self.config.certificate_path.as_deref() else {
            return Err(DistributionError::CertificateMissing(
                "no digital certificate file is configured".to_string(),
            ));
        };
        let password = self
            .config
            .certificate_password
            .as_deref()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| {
                DistributionError::CertificateMissing(
                    "certificate password is not configured".to_string(),
                )
            })?;
        certificate::load_from_path(path, password).map_err(DistributionError::from)
    }

    /// Builds the blocking HTTP client with the mTLS identity read back from
    /// the scoped credential files.
    fn build_http_client(
        &self,
        files: &ScopedCredentialFiles,
    ) -> Result<Client, DistributionError> {
        let mut pem = std::fs::read(files.key_path())
            .map_err(|err| DistributionError::CredentialFiles(err.to_string()))?;
        let chain = std::fs::read(files.chain_path())
            .map_err(|err| DistributionError::CredentialFiles(err.to_string()))?;
        pem.extend_from_slice(&chain);
        let identity = reqwest::Identity::from_pem(&pem)
            .map_err(|err| DistributionError::ClientBuild(err.to_string()))?;
        Client::builder()
            .timeout(self.config.timeout())
            .identity(identity)
            .build()
            .map_err(|err| DistributionError::ClientBuild(err.to_string()))
    }

    /// Sends the SOAP payload to one endpoint with the fixed headers.
    fn post_payload(
        &self,
        http: &Client,
        endpoint: &str,
        payload: &str,
    ) -> Result<Response, DistributionError> {
        http.post(endpoint)
            .header(CONTENT_TYPE, SOAP_CONTENT_TYPE)
            .header("SOAPAction", SOAP_ACTION)
            .header(ACCEPT, "application/soap+xml")
            .body(payload.to_string())
            .send()
            .map_err(|_| DistributionError::Connection {
                endpoint: endpoint.to_string(),
            })
    }
}
