// crates/nfe-dfe-client/src/endpoints.rs
// ============================================================================
// Module: Endpoint Catalog
// Description: Ordered candidate endpoint resolution per authority environment.
// Purpose: Give the fallback loop a deterministic, de-duplicated mirror list.
// Dependencies: nfe-dfe-config, nfe-dfe-core
// ============================================================================

//! ## Overview
//! The distribution operation is served by a small set of known regional
//! mirrors per environment. A configuration may override the list; otherwise
//! the built-in mirrors are used. Sanitization strips a trailing `?wsdl`
//! (operators habitually paste WSDL URLs), drops blank entries, and
//! de-duplicates while preserving first-seen order, because the fallback
//! loop's ordering is part of the contract.

// ============================================================================
// SECTION: Imports
// ============================================================================

use nfe_dfe_config::SefazConfig;
use nfe_dfe_core::Environment;

// ============================================================================
// SECTION: Built-In Mirrors
// ============================================================================

/// Known production mirrors, in preference order.
const PRODUCTION_MIRRORS: [&str; 3] = [
    "https://www1.nfe.fazenda.gov.br/ws/NFeDistribuicaoDFe/NFeDistribuicaoDFe.asmx",
    "https://www.nfe.fazenda.gov.br/ws/NFeDistribuicaoDFe/NFeDistribuicaoDFe.asmx",
    "https://nfe.svrs.rs.gov.br/ws/NFeDistribuicaoDFe/NFeDistribuicaoDFe.asmx",
];

/// Known homologation mirrors, in preference order.
const HOMOLOGATION_MIRRORS: [&str; 2] = [
    "https://hom.nfe.fazenda.gov.br/ws/NFeDistribuicaoDFe/NFeDistribuicaoDFe.asmx",
    "https://nfe-homologacao.svrs.rs.gov.br/ws/NFeDistribuicaoDFe/NFeDistribuicaoDFe.asmx",
];

// ============================================================================
// SECTION: Catalog Resolution
// ============================================================================

/// Resolves the ordered candidate endpoints for `config`.
///
/// Overrides from the configuration win when present; the built-in mirrors
/// of the configured environment are used otherwise. The result is
/// sanitized: blank entries dropped, trailing `?wsdl` stripped, duplicates
/// removed preserving first-seen order.
#[must_use]
pub fn endpoints_for(config: &SefazConfig) -> Vec<String> {
    let overrides = config.endpoints.for_environment(config.environment);
    if overrides.is_empty() {
        sanitize_endpoints(builtin_mirrors(config.environment).iter().map(ToString::to_string))
    } else {
        sanitize_endpoints(overrides.iter().cloned())
    }
}

/// Built-in mirror list for `environment`.
const fn builtin_mirrors(environment: Environment) -> &'static [&'static str] {
    match environment {
        Environment::Production => &PRODUCTION_MIRRORS,
        Environment::Homologation => &HOMOLOGATION_MIRRORS,
    }
}

/// Sanitizes candidate URLs: trim, strip trailing `?wsdl`, skip blanks,
/// de-duplicate preserving first-seen order.
fn sanitize_endpoints<I>(candidates: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut ordered: Vec<String> = Vec::new();
    for candidate in candidates {
        let trimmed = candidate.trim();
        let stripped = trimmed.strip_suffix("?wsdl").unwrap_or(trimmed);
        if stripped.is_empty() {
            continue;
        }
        if !ordered.iter().any(|seen| seen == stripped) {
            ordered.push(stripped.to_string());
        }
    }
    ordered
}
