// crates/nfe-dfe-client/src/payload.rs
// ============================================================================
// Module: Distribution Query Payload
// Description: SOAP 1.2 envelope rendering for nfeDistDFeInteresse.
// Purpose: Emit the exact envelope shape the authority's WSDL contract expects.
// Dependencies: nfe-dfe-core
// ============================================================================

//! ## Overview
//! The distribution operation takes a fixed two-level SOAP 1.2 envelope: the
//! header carries the authoring UF code and payload version, the body wraps
//! the `distDFeInt` element with exactly one of the three query modes.
//! Element names and namespaces are contractual; the template is rendered
//! verbatim with values the core crate already validated and padded.

// ============================================================================
// SECTION: Imports
// ============================================================================

use nfe_dfe_core::DistributionQuery;
use nfe_dfe_core::Environment;
use nfe_dfe_core::InputError;
use nfe_dfe_core::normalize_cnpj;
use nfe_dfe_core::normalize_state_code;

// ============================================================================
// SECTION: Wire Constants
// ============================================================================

/// SOAP 1.2 envelope namespace.
pub const SOAP_NAMESPACE: &str = "http://www.w3.org/2003/05/soap-envelope";

/// WSDL namespace of the distribution operation.
pub const WSDL_NAMESPACE: &str = "http://www.portalfiscal.inf.br/nfe/wsdl/NFeDistribuicaoDFe";

/// Namespace of authority payload elements.
pub const NFE_NAMESPACE: &str = "http://www.portalfiscal.inf.br/nfe";

/// Payload schema version expected by the operation.
pub const PAYLOAD_VERSION: &str = "1.01";

/// Fixed SOAPAction header value of the distribution operation.
pub const SOAP_ACTION: &str =
    "http://www.portalfiscal.inf.br/nfe/wsdl/NFeDistribuicaoDFe/nfeDistDFeInteresse";

/// Content type of every request and accepted response.
pub const SOAP_CONTENT_TYPE: &str = "application/soap+xml; charset=utf-8";

// ============================================================================
// SECTION: Payload Builder
// ============================================================================

/// Renders the full SOAP envelope for one distribution query.
///
/// `state_code` is coerced to the country-wide code `91` when absent or
/// malformed; the CNPJ must normalize to 14 digits.
///
/// # Errors
///
/// Returns [`InputError::InvalidCnpj`] when the CNPJ does not normalize.
pub fn build_query_payload(
    cnpj: &str,
    environment: Environment,
    state_code: Option<&str>,
    query: &DistributionQuery,
) -> Result<String, InputError> {
    let cnpj = normalize_cnpj(cnpj)?;
    let uf = normalize_state_code(state_code);
    let mode = render_query_mode(query);
    let ambient = environment.ambient_code();
    let body = format!(
        "<distDFeInt xmlns=\"{NFE_NAMESPACE}\" versao=\"{PAYLOAD_VERSION}\">\
         <tpAmb>{ambient}</tpAmb>\
         <cUFAutor>{uf}</cUFAutor>\
         <CNPJ>{cnpj}</CNPJ>\
         {mode}\
         </distDFeInt>"
    );
    Ok(soap_envelope(&uf, &body))
}

/// Renders the single operation-specific element for the selected mode.
///
/// Values were validated and zero-padded at query construction, so they are
/// embedded verbatim.
fn render_query_mode(query: &DistributionQuery) -> String {
    match query {
        DistributionQuery::ByAccessKey { access_key } => {
            format!("<consChNFe><chNFe>{access_key}</chNFe></consChNFe>")
        }
        DistributionQuery::ByNsu { nsu } => {
            format!("<consNSU><NSU>{nsu}</NSU></consNSU>")
        }
        DistributionQuery::SinceLastNsu { last_nsu } => {
            format!("<distNSU><ultNSU>{last_nsu}</ultNSU></distNSU>")
        }
    }
}

/// Wraps an operation body in the fixed two-level SOAP 1.2 envelope.
fn soap_envelope(state_code: &str, body: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\
         <soap12:Envelope xmlns:soap12=\"{SOAP_NAMESPACE}\">\
         <soap12:Header>\
         <nfeCabecMsg xmlns=\"{WSDL_NAMESPACE}\">\
         <cUF>{state_code}</cUF>\
         <versaoDados>{PAYLOAD_VERSION}</versaoDados>\
         </nfeCabecMsg>\
         </soap12:Header>\
         <soap12:Body>\
         <nfeDadosMsg xmlns=\"{WSDL_NAMESPACE}\">{body}</nfeDadosMsg>\
         </soap12:Body>\
         </soap12:Envelope>"
    )
}
