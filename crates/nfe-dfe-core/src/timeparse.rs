// crates/nfe-dfe-core/src/timeparse.rs
// ============================================================================
// Module: NFe DFe Timestamp Parsing
// Description: Tolerant ISO-8601 parsing for authority date/time fields.
// Purpose: Normalize offset-carrying, naive, and date-only values to UTC instants.
// Dependencies: time
// ============================================================================

//! ## Overview
//! Authority documents carry timestamps in three shapes: full RFC 3339 with
//! an offset (`dhEmi`, `dhRecbto`), naive date-times without an offset, and
//! bare dates (`dEmi` on older schemas). Parsing is tolerant: a naive value
//! is treated as UTC, a bare date becomes midnight UTC, and anything
//! unparseable becomes `None` rather than an error, because a bad timestamp
//! must not discard an otherwise-valid document.

// ============================================================================
// SECTION: Imports
// ============================================================================

use time::Date;
use time::OffsetDateTime;
use time::PrimitiveDateTime;
use time::format_description::BorrowedFormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;

// ============================================================================
// SECTION: Formats
// ============================================================================

/// Naive date-time without offset or subseconds.
const NAIVE: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");

/// Naive date-time with fractional seconds.
const NAIVE_SUBSECOND: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]");

/// Bare calendar date.
const DATE_ONLY: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

// ============================================================================
// SECTION: Parsing
// ============================================================================

/// Parses an authority timestamp into a timezone-aware UTC instant.
///
/// Returns `None` for absent, blank, or unparseable input. Values without an
/// offset are interpreted as UTC; bare dates become midnight UTC.
#[must_use]
pub fn parse_instant(raw: &str) -> Option<OffsetDateTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(aware) = OffsetDateTime::parse(trimmed, &Rfc3339) {
        return Some(aware);
    }
    if let Ok(naive) = PrimitiveDateTime::parse(trimmed, NAIVE) {
        return Some(naive.assume_utc());
    }
    if let Ok(naive) = PrimitiveDateTime::parse(trimmed, NAIVE_SUBSECOND) {
        return Some(naive.assume_utc());
    }
    if let Ok(date) = Date::parse(trimmed, DATE_ONLY) {
        return Some(date.midnight().assume_utc());
    }
    None
}
