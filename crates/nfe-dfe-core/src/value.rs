// crates/nfe-dfe-core/src/value.rs
// ============================================================================
// Module: NFe DFe Monetary Values
// Description: Tolerant decimal parsing for authority monetary fields.
// Purpose: Treat a non-numeric total as absent instead of failing the document.
// Dependencies: bigdecimal
// ============================================================================

//! ## Overview
//! Monetary fields such as `vNF` are decimal strings with a dot separator.
//! A malformed value is treated as absent, never as a parse failure, because
//! one bad field must not discard the document it belongs to.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::str::FromStr;

use bigdecimal::BigDecimal;

// ============================================================================
// SECTION: Parsing
// ============================================================================

/// Parses an authority decimal field, returning `None` for blank or
/// non-numeric input.
#[must_use]
pub fn parse_decimal(raw: &str) -> Option<BigDecimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    BigDecimal::from_str(trimmed).ok()
}
