// crates/nfe-dfe-core/src/identifiers.rs
// ============================================================================
// Module: NFe DFe Identifiers
// Description: Normalization and validation for CNPJ, UF codes, NSU cursors, and access keys.
// Purpose: Reject malformed identifiers before any network I/O and fix wire widths.
// Dependencies: crate::errors
// ============================================================================

//! ## Overview
//! The authority's wire format is strict about identifier shapes: CNPJ is
//! exactly 14 digits, NSU cursors are zero-padded to 15 digits, access keys
//! are 44 digits, and the authoring UF is a 2-digit numeric code. This module
//! owns those rules. UF codes are the one place where malformed input is
//! coerced instead of rejected: the authority accepts the country-wide code
//! `91` everywhere, so an unusable UF degrades to `91` rather than failing
//! the whole query.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::errors::InputError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Country-wide authoring UF code accepted by every SEFAZ mirror.
pub const COUNTRY_WIDE_UF: &str = "91";

/// Wire width of NSU cursor values.
pub const NSU_WIDTH: usize = 15;

/// NSU cursor meaning "from the beginning of the event stream".
pub const EMPTY_NSU: &str = "000000000000000";

/// Digit count of a normalized CNPJ.
const CNPJ_WIDTH: usize = 14;

/// Digit count of an NFe access key.
const ACCESS_KEY_WIDTH: usize = 44;

// ============================================================================
// SECTION: CNPJ
// ============================================================================

/// Normalizes a CNPJ to its 14-digit wire form, stripping punctuation.
///
/// Accepts formatted input such as `12.345.678/0001-90`.
///
/// # Errors
///
/// Returns [`InputError::InvalidCnpj`] when the input does not carry exactly
/// 14 digits.
pub fn normalize_cnpj(raw: &str) -> Result<String, InputError> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.len() == CNPJ_WIDTH {
        Ok(digits)
    } else {
        Err(InputError::InvalidCnpj)
    }
}

/// Normalizes a tax identifier found inside a response document.
///
/// Response documents are tolerated rather than validated: when the field does
/// not normalize to a 14-digit CNPJ the trimmed original is kept verbatim.
#[must_use]
pub fn normalize_tax_id(raw: &str) -> String {
    normalize_cnpj(raw).unwrap_or_else(|_| raw.trim().to_string())
}

// ============================================================================
// SECTION: UF Codes
// ============================================================================

/// Normalizes an authoring UF code, coercing unusable input to [`COUNTRY_WIDE_UF`].
///
/// A usable code is exactly two ASCII digits. Anything else (absent, blank,
/// alphabetic, wrong width) degrades to `91`, matching authority conventions;
/// every real two-digit state code passes through unchanged.
#[must_use]
pub fn normalize_state_code(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return COUNTRY_WIDE_UF.to_string();
    };
    let trimmed = raw.trim();
    if trimmed.len() == 2 && trimmed.chars().all(|c| c.is_ascii_digit()) {
        trimmed.to_string()
    } else {
        COUNTRY_WIDE_UF.to_string()
    }
}

// ============================================================================
// SECTION: NSU Cursors
// ============================================================================

/// Zero-pads an NSU cursor to its 15-digit wire form.
///
/// An empty or absent value pads to all zeros, meaning "from the beginning".
///
/// # Errors
///
/// Returns [`InputError::InvalidNsu`] when the input carries a non-digit
/// character or more than 15 digits.
pub fn pad_nsu(raw: &str) -> Result<String, InputError> {
    let trimmed = raw.trim();
    if trimmed.len() > NSU_WIDTH || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(InputError::InvalidNsu);
    }
    Ok(format!("{trimmed:0>width$}", width = NSU_WIDTH))
}

// ============================================================================
// SECTION: Access Keys
// ============================================================================

/// Validates an NFe access key (exactly 44 digits, no punctuation).
///
/// # Errors
///
/// Returns [`InputError::InvalidAccessKey`] when the trimmed input is not
/// exactly 44 ASCII digits.
pub fn validate_access_key(raw: &str) -> Result<String, InputError> {
    let trimmed = raw.trim();
    if trimmed.len() == ACCESS_KEY_WIDTH && trimmed.chars().all(|c| c.is_ascii_digit()) {
        Ok(trimmed.to_string())
    } else {
        Err(InputError::InvalidAccessKey)
    }
}
