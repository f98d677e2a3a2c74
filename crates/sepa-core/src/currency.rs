//! # Currency Registry
//!
//! The allowed currency codes and the default currency used when a request
//! names none.
//!
//! ## Thread Safety
//! The registry is configured once at startup and then only read by request
//! handlers. Both fields sit behind a single `RwLock`, so a reader never sees
//! a new allowed set paired with a stale default (or the reverse).

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::error;

/// Default currency and the fallback for a rejected default.
pub const FALLBACK_CURRENCY: &str = "EUR";

/// Currencies allowed until configuration says otherwise.
pub const BUILTIN_CURRENCIES: &[&str] = &["EUR", "USD", "GBP", "JPY", "AUD", "CAD"];

#[derive(Debug, Clone)]
struct CurrencySettings {
    allowed: Vec<String>,
    default: String,
}

/// Allowed currencies plus the default currency.
#[derive(Debug)]
pub struct CurrencyRegistry {
    inner: RwLock<CurrencySettings>,
}

impl CurrencyRegistry {
    /// Registry with [`BUILTIN_CURRENCIES`] and [`FALLBACK_CURRENCY`].
    pub fn new() -> Self {
        CurrencyRegistry {
            inner: RwLock::new(CurrencySettings {
                allowed: BUILTIN_CURRENCIES.iter().map(|c| c.to_string()).collect(),
                default: FALLBACK_CURRENCY.to_string(),
            }),
        }
    }

    /// Replaces the allowed set verbatim. Entries are not validated.
    ///
    /// The default is left untouched, even if it is no longer allowed;
    /// call [`set_default_currency`](Self::set_default_currency) afterwards.
    pub fn set_allowed_currencies<I, S>(&self, currencies: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.write().allowed = currencies.into_iter().map(Into::into).collect();
    }

    /// Sets the default currency if it is allowed.
    ///
    /// A code outside the allowed set is logged and the default is reset to
    /// `EUR`, whether or not `EUR` itself is allowed.
    pub fn set_default_currency(&self, code: &str) {
        let mut settings = self.write();
        if settings.allowed.iter().any(|c| c == code) {
            settings.default = code.to_string();
        } else {
            error!(
                "Invalid default currency: {code}. Defaulting to {FALLBACK_CURRENCY}."
            );
            settings.default = FALLBACK_CURRENCY.to_string();
        }
    }

    /// Membership test against the allowed set.
    pub fn is_allowed(&self, code: &str) -> bool {
        self.read().allowed.iter().any(|c| c == code)
    }

    /// The current default currency.
    pub fn default_currency(&self) -> String {
        self.read().default.clone()
    }

    /// A snapshot of the allowed set.
    pub fn allowed_currencies(&self) -> Vec<String> {
        self.read().allowed.clone()
    }

    // Writes replace whole fields; a poisoned lock still holds valid settings.
    fn read(&self) -> RwLockReadGuard<'_, CurrencySettings> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, CurrencySettings> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for CurrencyRegistry {
    fn default() -> Self {
        CurrencyRegistry::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::capture_logs;

    #[test]
    fn test_builtin_defaults() {
        let registry = CurrencyRegistry::new();
        assert_eq!(registry.default_currency(), "EUR");
        for code in BUILTIN_CURRENCIES {
            assert!(registry.is_allowed(code));
        }
        assert!(!registry.is_allowed("CHF"));
        assert!(!registry.is_allowed("eur"));
    }

    #[test]
    fn test_set_allowed_replaces_verbatim() {
        let registry = CurrencyRegistry::new();
        registry.set_allowed_currencies(["CHF", "SEK", "not-a-code"]);

        assert_eq!(registry.allowed_currencies(), vec!["CHF", "SEK", "not-a-code"]);
        assert!(registry.is_allowed("not-a-code"));
        assert!(!registry.is_allowed("EUR"));
    }

    #[test]
    fn test_set_default_when_allowed() {
        let registry = CurrencyRegistry::new();
        registry.set_default_currency("USD");
        assert_eq!(registry.default_currency(), "USD");
    }

    #[test]
    fn test_invalid_default_resets_to_eur() {
        let registry = CurrencyRegistry::new();
        registry.set_default_currency("USD");
        registry.set_default_currency("XYZ");
        assert_eq!(registry.default_currency(), "EUR");
    }

    #[test]
    fn test_invalid_default_is_logged_as_error() {
        let registry = CurrencyRegistry::new();
        let ((), logs) = capture_logs(|| registry.set_default_currency("XYZ"));

        assert!(
            logs.contains("ERROR") && logs.contains("Invalid default currency: XYZ. Defaulting to EUR."),
            "{logs}"
        );

        let ((), logs) = capture_logs(|| registry.set_default_currency("USD"));
        assert!(!logs.contains("ERROR"), "{logs}");
    }

    #[test]
    fn test_invalid_default_resets_to_eur_even_if_eur_not_allowed() {
        let registry = CurrencyRegistry::new();
        registry.set_allowed_currencies(["CHF"]);
        registry.set_default_currency("USD");

        assert_eq!(registry.default_currency(), "EUR");
        assert!(!registry.is_allowed("EUR"));
    }

    #[test]
    fn test_concurrent_readers() {
        let registry = std::sync::Arc::new(CurrencyRegistry::new());
        registry.set_allowed_currencies(["EUR", "CHF"]);
        registry.set_default_currency("CHF");

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = registry.clone();
                std::thread::spawn(move || {
                    (0..100).all(|_| {
                        registry.is_allowed(&registry.default_currency())
                    })
                })
            })
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap());
        }
    }
}
