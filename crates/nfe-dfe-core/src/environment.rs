// crates/nfe-dfe-core/src/environment.rs
// ============================================================================
// Module: NFe DFe Environment
// Description: Production vs homologation authority environments.
// Purpose: Select the tpAmb wire indicator and the endpoint mirror family.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! The tax authority runs two parallel service families: production and
//! homologation (the authority's staging tier). The environment selects both
//! the `tpAmb` indicator embedded in every payload and the built-in endpoint
//! mirror list.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Environment
// ============================================================================

/// Authority environment a distribution query is issued against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    /// Live production services.
    #[default]
    Production,
    /// Authority staging ("homologação") services.
    Homologation,
}

impl Environment {
    /// Returns the `tpAmb` wire indicator for this environment.
    #[must_use]
    pub const fn ambient_code(self) -> &'static str {
        match self {
            Self::Production => "1",
            Self::Homologation => "2",
        }
    }
}
