//! # IBAN Validation
//!
//! Three checks, each only reached when the previous one passed:
//!
//! ```text
//! raw ──► normalize ──► structure ──► country length ──► mod-97 == 1 ──► OK
//!         (strip ws,     CC 99 X{1,30}  (known countries    (ISO 7064
//!          uppercase)                    only, else warn)    MOD 97-10)
//! ```
//!
//! ## Usage
//! ```rust
//! use sepa_core::iban::{check_iban, validate_iban};
//!
//! assert!(validate_iban("de89 3704 0044 0532 0130 00"));
//! assert_eq!(check_iban("DE89370400440532013000").unwrap(), "DE89370400440532013000");
//! assert!(!validate_iban("DE89370400440532013001"));
//! ```

use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

use crate::error::IbanError;

/// Country code, two check digits, 1 to 30 alphanumerics.
static IBAN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{2}[0-9]{2}[A-Z0-9]{1,30}$").expect("valid IBAN regex"));

/// Expected IBAN lengths. Countries missing here skip the length check.
pub const IBAN_LENGTHS: &[(&str, usize)] = &[
    ("DE", 22),
    ("FR", 27),
    ("GB", 22),
    ("IT", 27),
    ("ES", 24),
    ("NL", 22),
];

/// Running remainders are reduced once they reach this value.
const REDUCE_THRESHOLD: u64 = 1_000_000_000;

/// Returns the registered IBAN length for a country code.
pub fn iban_length(country: &str) -> Option<usize> {
    IBAN_LENGTHS
        .iter()
        .find(|(code, _)| *code == country)
        .map(|(_, len)| *len)
}

/// Strips all whitespace and uppercases ASCII letters.
///
/// Non-ASCII characters are left as they are, so look-alikes such as `ß` or
/// `ﬆ` never expand into ASCII letters and fail the structure check.
/// Idempotent: normalizing a normalized IBAN returns it unchanged.
pub fn normalize_iban(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Validates an IBAN and returns its normalized form.
pub fn check_iban(raw: &str) -> Result<String, IbanError> {
    let iban = normalize_iban(raw);

    if !IBAN_PATTERN.is_match(&iban) {
        return Err(IbanError::Structure);
    }

    // The pattern guarantees at least 5 ASCII characters from here on
    let country = &iban[..2];
    match iban_length(country) {
        Some(expected) if iban.len() != expected => {
            return Err(IbanError::Length {
                country: country.to_string(),
                expected,
                actual: iban.len(),
            });
        }
        Some(_) => {}
        None => warn!("Unknown country code <{country}> in IBAN"),
    }

    let rearranged = format!("{}{}", &iban[4..], &iban[..4]);
    let remainder = mod97(&to_numeric(&rearranged)).ok_or(IbanError::Structure)?;
    if remainder != 1 {
        return Err(IbanError::Checksum { remainder });
    }

    Ok(iban)
}

/// Returns `true` when the IBAN passes structure, length and checksum checks.
pub fn validate_iban(raw: &str) -> bool {
    check_iban(raw).is_ok()
}

/// Computes the two check digits for `country` + `bban`.
///
/// ## Example
/// ```rust
/// use sepa_core::iban::iban_check_digits;
///
/// assert_eq!(iban_check_digits("DE", "370400440532013000").as_deref(), Some("89"));
/// ```
pub fn iban_check_digits(country: &str, bban: &str) -> Option<String> {
    if country.len() != 2 || !country.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    let candidate = format!("{}{}00", bban, country).to_ascii_uppercase();
    if !candidate.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    let remainder = mod97(&to_numeric(&candidate))?;
    Some(format!("{:02}", 98 - remainder))
}

/// Replaces each letter with its two-digit value (A=10 … Z=35).
///
/// Digits pass through unchanged; the input is expected to be uppercase ASCII.
fn to_numeric(iban: &str) -> String {
    let mut out = String::with_capacity(iban.len() * 2);
    for ch in iban.chars() {
        if ch.is_ascii_uppercase() {
            let value = ch as u32 - 'A' as u32 + 10;
            out.push_str(&value.to_string());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Remainder of an arbitrarily long decimal string divided by 97.
///
/// Streams one digit at a time and only reduces once the running value
/// reaches [`REDUCE_THRESHOLD`], so no big-integer arithmetic is needed.
/// Returns `None` if the input contains a non-digit.
pub fn mod97(digits: &str) -> Option<u32> {
    let mut remainder: u64 = 0;
    for ch in digits.chars() {
        let digit = ch.to_digit(10)?;
        remainder = remainder * 10 + u64::from(digit);
        if remainder >= REDUCE_THRESHOLD {
            remainder %= 97;
        }
    }
    Some((remainder % 97) as u32)
}

// =============================================================================
// Unit Tests
// =============================================================================
