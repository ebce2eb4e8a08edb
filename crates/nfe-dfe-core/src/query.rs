// crates/nfe-dfe-core/src/query.rs
// ============================================================================
// Module: NFe DFe Distribution Query
// Description: The three mutually exclusive distribution query modes.
// Purpose: Make selecting more than one query mode unrepresentable, validated at construction.
// Dependencies: serde, crate::identifiers, crate::errors
// ============================================================================

//! ## Overview
//! A distribution query runs in exactly one of three modes: a single-document
//! lookup by 44-digit access key, a single-event lookup by NSU, or a batch
//! pull of everything after a last-seen NSU cursor. The enum makes a
//! multi-mode query unrepresentable; [`DistributionQuery::from_parts`] covers
//! callers that collect the three fields as options and must reject ambiguous
//! combinations. Values are validated and zero-padded once, at construction,
//! so the payload builder embeds them verbatim.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::errors::InputError;
use crate::identifiers::pad_nsu;
use crate::identifiers::validate_access_key;

// ============================================================================
// SECTION: Query Modes
// ============================================================================

/// One distribution query, in exactly one of the three authority modes.
///
/// # Invariants
/// - `ByAccessKey` holds exactly 44 digits.
/// - `ByNsu` and `SinceLastNsu` hold cursors already zero-padded to 15 digits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum DistributionQuery {
    /// Lookup of one document by its 44-digit access key (`consChNFe`).
    ByAccessKey {
        /// Validated 44-digit access key.
        access_key: String,
    },
    /// Lookup of one event by its NSU (`consNSU`).
    ByNsu {
        /// Cursor zero-padded to 15 digits.
        nsu: String,
    },
    /// Batch pull of every event after a cursor (`distNSU`).
    SinceLastNsu {
        /// Last processed cursor, zero-padded to 15 digits; all zeros means
        /// "from the beginning".
        last_nsu: String,
    },
}

impl DistributionQuery {
    /// Creates an access-key query.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::InvalidAccessKey`] when the key is not exactly
    /// 44 digits.
    pub fn by_access_key(access_key: &str) -> Result<Self, InputError> {
        Ok(Self::ByAccessKey {
            access_key: validate_access_key(access_key)?,
        })
    }

    /// Creates a single-event NSU query.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::InvalidNsu`] when the cursor is empty, not
    /// numeric, or longer than 15 digits.
    pub fn by_nsu(nsu: &str) -> Result<Self, InputError> {
        if nsu.trim().is_empty() {
            return Err(InputError::InvalidNsu);
        }
        Ok(Self::ByNsu {
            nsu: pad_nsu(nsu)?,
        })
    }

    /// Creates a batch query resuming after `last_nsu`.
    ///
    /// An absent or empty cursor means "from the beginning" and pads to all
    /// zeros.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::InvalidNsu`] when a supplied cursor is not
    /// numeric or longer than 15 digits.
    pub fn since_last_nsu(last_nsu: Option<&str>) -> Result<Self, InputError> {
        Ok(Self::SinceLastNsu {
            last_nsu: pad_nsu(last_nsu.unwrap_or(""))?,
        })
    }

    /// Builds a query from the three optional fields an HTTP caller supplies.
    ///
    /// Exactly one of `access_key` and `nsu` may be set; `last_nsu` is only
    /// meaningful when neither is. No field at all degrades to a batch query
    /// from the beginning of the stream.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::AmbiguousQuery`] when more than one field is
    /// set, or the mode-specific validation error for the selected field.
    pub fn from_parts(
        access_key: Option<&str>,
        nsu: Option<&str>,
        last_nsu: Option<&str>,
    ) -> Result<Self, InputError> {
        let selected = usize::from(access_key.is_some())
            + usize::from(nsu.is_some())
            + usize::from(last_nsu.is_some());
        if selected > 1 {
            return Err(InputError::AmbiguousQuery);
        }
        if let Some(key) = access_key {
            return Self::by_access_key(key);
        }
        if let Some(cursor) = nsu {
            return Self::by_nsu(cursor);
        }
        Self::since_last_nsu(last_nsu)
    }
}
