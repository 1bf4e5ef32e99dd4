//! Human-readable attribute formatting
//!
//! Two halves of one conversion:
//!
//! - [`to_seconds`] parses the tolerant, human-entered duration grammar used
//!   by the TTL setter (`"5 DAYS 3 hours"`, `"FOREVER"`, `"50000 seconds"`)
//!   into a second count.
//! - [`format`] renders raw stored attribute bytes back into the string a
//!   user would expect, given the attribute's semantic [`Unit`]. This is a
//!   display path for diagnostics, not a re-parsing path.

use tracing::trace;

use crate::descriptor::{self, FOREVER};
use crate::error::{Result, SchemaError};

// =============================================================================
// Duration Grammar
// =============================================================================

/// Seconds per supported unit
const SECONDS_PER_DAY: i64 = 86_400;
const SECONDS_PER_HOUR: i64 = 3_600;
const SECONDS_PER_MINUTE: i64 = 60;

/// Parse a human-entered duration string into seconds.
///
/// The grammar is case-insensitive and whitespace-tolerant:
/// - `""` → 0
/// - `"FOREVER"` → [`FOREVER`]
/// - a bare integer, optionally followed by `seconds` → that integer
/// - one or more `<integer> <unit>` pairs (units: SECOND, MINUTE, HOUR,
///   DAY, singular or plural), summed in any order
/// - a trailing parenthetical comment after at least one parsed number is
///   ignored, e.g. `"43282800 SECONDS (500 Days 23 hours)"` → 43282800
///
/// Anything else fails with `ConfigParse` carrying the original input.
pub fn to_seconds(input: &str) -> Result<i64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    if trimmed.eq_ignore_ascii_case("FOREVER") {
        return Ok(FOREVER);
    }

    let parse_err = || SchemaError::ConfigParse {
        input: input.to_string(),
    };

    let mut total: i64 = 0;
    let mut parsed_any = false;
    let mut tokens = trimmed.split_whitespace().peekable();

    while let Some(token) = tokens.next() {
        // A parenthetical comment ends the parse. Only legal once a value
        // has already been read.
        if token.starts_with('(') {
            if parsed_any {
                trace!(ttl = input, "ignoring trailing duration comment");
                break;
            }
            return Err(parse_err());
        }

        let amount: i64 = token.parse().map_err(|_| parse_err())?;
        if amount < 0 {
            return Err(parse_err());
        }

        match tokens.peek().copied() {
            // `<integer> <unit>` pair
            Some(unit) if unit_seconds(unit).is_some() => {
                let multiplier = unit_seconds(unit).unwrap_or(1);
                total = total
                    .checked_add(amount.checked_mul(multiplier).ok_or_else(parse_err)?)
                    .ok_or_else(parse_err)?;
                tokens.next();
            }
            // Bare trailing integer counts as seconds
            None => {
                total = total.checked_add(amount).ok_or_else(parse_err)?;
            }
            // Integer directly followed by a comment also counts as seconds
            Some(next) if next.starts_with('(') => {
                total = total.checked_add(amount).ok_or_else(parse_err)?;
            }
            // Integer followed by something that is neither a unit nor a
            // comment is malformed
            Some(_) => return Err(parse_err()),
        }
        parsed_any = true;
    }

    Ok(total)
}

/// Seconds for a unit token, or None if the token is not a unit
fn unit_seconds(token: &str) -> Option<i64> {
    let upper = token.to_ascii_uppercase();
    match upper.as_str() {
        "DAY" | "DAYS" => Some(SECONDS_PER_DAY),
        "HOUR" | "HOURS" => Some(SECONDS_PER_HOUR),
        "MINUTE" | "MINUTES" => Some(SECONDS_PER_MINUTE),
        "SECOND" | "SECONDS" => Some(1),
        _ => None,
    }
}

// =============================================================================
// Pretty Printing
// =============================================================================

/// Semantic unit of a stored attribute value, driving its display form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    /// Opaque value, displayed literally
    None,
    /// A duration; displayed as its integer second count
    TimeInterval,
    /// A flag; displayed as `true`/`false`
    Boolean,
}

/// Semantic unit of a well-known attribute key
pub fn unit_for_key(key: &[u8]) -> Unit {
    if key == descriptor::TTL {
        Unit::TimeInterval
    } else if key == descriptor::IS_MOB
        || key == descriptor::IN_MEMORY
        || key == descriptor::BLOCKCACHE
    {
        Unit::Boolean
    } else {
        Unit::None
    }
}

/// Render raw attribute bytes as the human string for the given unit.
///
/// Falls back to the literal (lossy UTF-8) decoding when the bytes do not
/// match the unit's expected shape, so diagnostics never fail outright.
pub fn format(raw: &[u8], unit: Unit) -> String {
    let literal = String::from_utf8_lossy(raw);
    match unit {
        Unit::None => literal.into_owned(),
        Unit::Boolean => {
            if literal.trim().eq_ignore_ascii_case("true") {
                "true".to_string()
            } else if literal.trim().eq_ignore_ascii_case("false") {
                "false".to_string()
            } else {
                literal.into_owned()
            }
        }
        Unit::TimeInterval => match to_seconds(&literal) {
            Ok(seconds) => seconds.to_string(),
            Err(_) => literal.into_owned(),
        },
    }
}
