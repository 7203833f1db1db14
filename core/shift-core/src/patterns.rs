//! Compiled regex patterns for clock-time strings.
//!
//! These patterns are compiled once on first use and reused by the time
//! arithmetic and edit-form validation.

use once_cell::sync::Lazy;
use regex::Regex;

// ═══════════════════════════════════════════════════════════════════════════════
// Clock Time Regexes
// ═══════════════════════════════════════════════════════════════════════════════

/// What the edit form accepts: optional leading zero on the hour, 00-23, 00-59.
pub static RE_EDIT_CLOCK_TIME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-1]?[0-9]|2[0-3]):[0-5][0-9]$").unwrap());

/// Already-normalized `HH:MM` as stored in segment columns.
pub static RE_PADDED_CLOCK_TIME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{2}:\d{2}$").unwrap());

/// Hand-typed `H:MM` that still needs zero padding.
pub static RE_LOOSE_CLOCK_TIME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2}):(\d{2})$").unwrap());
