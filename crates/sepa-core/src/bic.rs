//! BIC format validation.
//!
//! Purely structural: bank code, country code, location code and an
//! optional numeric branch code, each group optionally separated by `-`.
//! Whether the bank exists is not checked.

use std::sync::LazyLock;

use regex::Regex;

static BIC_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z]{4}-?[A-Z]{2}-?[A-Z0-9]{2}(?:-?[0-9]{3})?$").expect("valid BIC regex")
});

/// Returns `true` when `bic` has a valid BIC shape.
///
/// The input must already be trimmed and uppercased. Callers treat an empty
/// BIC as "not provided" and skip this check.
///
/// ```rust
/// use sepa_core::bic::validate_bic;
///
/// assert!(validate_bic("DEUTDEFF"));
/// assert!(validate_bic("DEUTDEFF500"));
/// assert!(!validate_bic("short"));
/// ```
pub fn validate_bic(bic: &str) -> bool {
    BIC_PATTERN.is_match(bic)
}
