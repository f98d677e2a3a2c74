//! # Amount Formatting
//!
//! Normalizes user-typed amounts into the EPC amount field: a currency code
//! directly followed by the value with exactly two decimals.
//!
//! ## Normalization Steps
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  "12,5"  ──► "12.5"  ──► leading match "12.5" ──► 12.5 ──► "EUR12.50"  │
//! │           , → .         digits[.d{1,2}]           parse     {:.2}       │
//! │                                                                         │
//! │  "3.14159" ──► leading match "3.14" ──► "EUR3.14"   (truncated, not     │
//! │                                                       rounded)          │
//! │  "abc"     ──► no leading digits    ──► None                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Only the leading match is used; trailing garbage such as `"10 EUR"` is
//! ignored. No thousands separators are accepted or emitted.

use std::sync::LazyLock;

use regex::Regex;

/// Digits with an optional 1 to 2 digit fraction, anchored at the start.
static AMOUNT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+(?:\.[0-9]{1,2})?").expect("valid amount regex"));

/// Formats `raw` as `<currency><value with 2 decimals>`.
///
/// Returns `None` when the input is blank, does not start with digits, or
/// overflows `f64`.
///
/// ## Example
/// ```rust
/// use sepa_core::amount::format_amount;
///
/// assert_eq!(format_amount("12,5", "EUR").as_deref(), Some("EUR12.50"));
/// assert_eq!(format_amount("12.5", "USD").as_deref(), Some("USD12.50"));
/// assert_eq!(format_amount("abc", "EUR"), None);
/// assert_eq!(format_amount("", "EUR"), None);
/// ```
pub fn format_amount(raw: &str, currency: &str) -> Option<String> {
    if raw.is_empty() {
        return None;
    }

    let normalized = raw.replace(',', ".");
    let matched = AMOUNT_PATTERN.find(&normalized)?;
    let value = matched
        .as_str()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())?;

    Some(format!("{currency}{value:.2}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_separators() {
        assert_eq!(format_amount("12,5", "EUR").as_deref(), Some("EUR12.50"));
        assert_eq!(format_amount("12.5", "USD").as_deref(), Some("USD12.50"));
        assert_eq!(format_amount("0,05", "EUR").as_deref(), Some("EUR0.05"));
    }

    #[test]
    fn test_whole_numbers() {
        assert_eq!(format_amount("25", "EUR").as_deref(), Some("EUR25.00"));
        assert_eq!(format_amount("007", "GBP").as_deref(), Some("GBP7.00"));
    }

    #[test]
    fn test_excess_precision_is_truncated() {
        assert_eq!(format_amount("3.14159", "EUR").as_deref(), Some("EUR3.14"));
        assert_eq!(format_amount("9.999", "EUR").as_deref(), Some("EUR9.99"));
    }

    #[test]
    fn test_trailing_input_is_ignored() {
        assert_eq!(format_amount("10 EUR", "EUR").as_deref(), Some("EUR10.00"));
        assert_eq!(format_amount("10.", "EUR").as_deref(), Some("EUR10.00"));
    }

    #[test]
    fn test_unparsable_inputs() {
        assert_eq!(format_amount("", "EUR"), None);
        assert_eq!(format_amount("abc", "EUR"), None);
        assert_eq!(format_amount(" 12", "EUR"), None);
        assert_eq!(format_amount("-5", "EUR"), None);
        assert_eq!(format_amount(".50", "EUR"), None);
    }

    #[test]
    fn test_out_of_range_amount_is_rejected() {
        assert_eq!(format_amount(&"9".repeat(400), "EUR"), None);
        assert_eq!(format_amount(&format!("{}.99", "2".repeat(309)), "EUR"), None);
        // Huge but finite values still format
        let huge = format_amount(&"9".repeat(300), "EUR").unwrap();
        assert!(huge.starts_with("EUR") && huge.ends_with(".00"));
        assert!(!huge.contains("inf"));
    }
}
