//! Activation code validation.
//!
//! Runs on the client. A code is accepted only if it decodes to the strict
//! four-field format, carries the expected salt byte-for-byte, and is bound
//! to the current device. Every failure collapses to [`CodeRejected`].

use crate::error::CodeRejected;
use crate::payload::{ActivationPayload, UNLIMITED_CREDITS};
use std::fmt;
use tracing::debug;

/// What an accepted code grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entitlement {
    /// A finite number of credits.
    Credits(i64),
    /// Unlimited usage.
    Unlimited,
    /// The credits field was neither `INF` nor a number.
    ///
    /// The code still passed the salt and device checks, so this is an
    /// accepted outcome. Callers decide what, if anything, to credit.
    NotANumber,
}

impl Entitlement {
    /// Returns true for [`Entitlement::Unlimited`].
    #[must_use]
    pub fn is_unlimited(&self) -> bool {
        matches!(self, Self::Unlimited)
    }

    /// Returns the finite credit count, if any.
    #[must_use]
    pub fn credits(&self) -> Option<i64> {
        match self {
            Self::Credits(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for Entitlement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Credits(n) => write!(f, "{n}"),
            Self::Unlimited => f.write_str("unlimited"),
            Self::NotANumber => f.write_str("NaN"),
        }
    }
}

/// Validates `code` for the current device.
///
/// `current_device` is uppercased but not trimmed before comparison.
///
/// # Errors
///
/// Returns [`CodeRejected`] if the code is malformed, uses a legacy format,
/// or was issued with a different salt or for a different device.
pub fn validate(
    code: &str,
    expected_salt: &str,
    current_device: &str,
) -> Result<Entitlement, CodeRejected> {
    let result = check(code, expected_salt, current_device);
    match &result {
        Ok(entitlement) => debug!(entitlement = %entitlement, "Activation code accepted"),
        Err(_) => debug!("Activation code rejected"),
    }
    result
}

fn check(
    code: &str,
    expected_salt: &str,
    current_device: &str,
) -> Result<Entitlement, CodeRejected> {
    let payload = ActivationPayload::decode(code)?;

    if payload.salt != expected_salt {
        return Err(CodeRejected);
    }
    if payload.device != current_device.to_uppercase() {
        return Err(CodeRejected);
    }

    if payload.credits == UNLIMITED_CREDITS {
        return Ok(Entitlement::Unlimited);
    }
    Ok(parse_int_lenient(&payload.credits).map_or(Entitlement::NotANumber, Entitlement::Credits))
}

/// Parses the leading integer of `s`, ignoring anything after it.
///
/// Leading whitespace and a sign are skipped and a `0x` prefix switches to
/// hexadecimal, so `"12abc"` is 12 and `"0x1F"` is 31. Out-of-range values
/// saturate. Returns `None` when no digit follows the prefix.
fn parse_int_lenient(s: &str) -> Option<i64> {
    let s = s.trim_start_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}');
    let (negative, s) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let (radix, digits) = match s.get(..2) {
        Some("0x" | "0X") => (16, &s[2..]),
        _ => (10, s),
    };

    let mut value: i64 = 0;
    let mut any = false;
    for d in digits.chars().map_while(|c| c.to_digit(radix)) {
        any = true;
        let d = i64::from(d);
        value = if negative {
            value.saturating_mul(i64::from(radix)).saturating_sub(d)
        } else {
            value.saturating_mul(i64::from(radix)).saturating_add(d)
        };
    }
    any.then_some(value)
}
