//! # Payment Request Validation
//!
//! Turns a raw [`PaymentRequest`] into [`ValidatedPaymentFields`], stopping
//! at the first failing check.
//!
//! ## Validation Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │   #  Field        Rule                                Error             │
//! │  ──  ───────────  ──────────────────────────────────  ───────────────── │
//! │   1  method       == "sepa"                           UnsupportedMethod │
//! │   2  iban         structure + length + mod-97         InvalidIban       │
//! │   3  bic          empty, or BIC grammar               InvalidBic        │
//! │   4  name         1..=70 chars                        InvalidName       │
//! │   5  currency     blank → default; must be allowed    InvalidCurrency   │
//! │   6  amount       parsable, formatted with currency   InvalidAmount     │
//! │   7  purpose      <= 4 chars                          InvalidPurpose    │
//! │   8  reference    <= 25 chars                         InvalidReference  │
//! │   9  remittance   <= 140 chars                        InvalidRemittance │
//! │  10  information  trimmed, unrestricted               -                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every failure is logged at info level with the offending value wrapped in
//! `<...>` so the log writer can redact it.
//!
//! ## Usage
//! ```rust
//! use sepa_core::{CurrencyRegistry, PaymentError, PaymentRequest, PaymentValidator};
//!
//! let currencies = CurrencyRegistry::new();
//! let validator = PaymentValidator::new(&currencies);
//!
//! let request = PaymentRequest { method: "wire".to_string(), ..Default::default() };
//! assert_eq!(validator.validate(&request), Err(PaymentError::UnsupportedMethod));
//! ```

use tracing::{debug, info};

use crate::amount::format_amount;
use crate::bic::validate_bic;
use crate::currency::CurrencyRegistry;
use crate::epc::build_epc_payload;
use crate::error::{PaymentError, PaymentResult};
use crate::iban::check_iban;
use crate::types::{PaymentRequest, ValidatedPaymentFields};
use crate::{MAX_NAME_LEN, MAX_PURPOSE_LEN, MAX_REFERENCE_LEN, MAX_REMITTANCE_LEN, SEPA_METHOD};

/// Validates payment requests against a currency configuration.
#[derive(Debug, Clone, Copy)]
pub struct PaymentValidator<'a> {
    currencies: &'a CurrencyRegistry,
}

impl<'a> PaymentValidator<'a> {
    pub fn new(currencies: &'a CurrencyRegistry) -> Self {
        PaymentValidator { currencies }
    }

    /// Runs every check in order and returns the normalized fields.
    pub fn validate(&self, request: &PaymentRequest) -> PaymentResult<ValidatedPaymentFields> {
        if request.method != SEPA_METHOD {
            info!(
                "Invalid method: <{}>. Method should be '{SEPA_METHOD}'.",
                request.method
            );
            return Err(PaymentError::UnsupportedMethod);
        }

        let iban = check_iban(request.iban.trim()).map_err(|reason| {
            info!("Invalid IBAN format: <{}> ({reason})", request.iban.trim());
            PaymentError::InvalidIban(reason)
        })?;

        let bic = request.bic.trim().to_ascii_uppercase();
        if !bic.is_empty() && !validate_bic(&bic) {
            info!("Invalid BIC format: <{bic}>");
            return Err(PaymentError::InvalidBic);
        }

        let name = request.name.trim();
        let name_len = name.chars().count();
        if name_len == 0 || name_len > MAX_NAME_LEN {
            info!("{}: <{name}>", PaymentError::InvalidName);
            return Err(PaymentError::InvalidName);
        }

        let currency = self.resolve_currency(&request.currency)?;

        let amount = format_amount(&request.amount, &currency).ok_or_else(|| {
            info!("Invalid 'amount' parameter: <{}>", request.amount);
            PaymentError::InvalidAmount
        })?;

        let purpose = within_limit(&request.purpose, MAX_PURPOSE_LEN, PaymentError::InvalidPurpose)?;
        let reference =
            within_limit(&request.reference, MAX_REFERENCE_LEN, PaymentError::InvalidReference)?;
        let remittance_text = within_limit(
            &request.remittance_text,
            MAX_REMITTANCE_LEN,
            PaymentError::InvalidRemittance,
        )?;

        Ok(ValidatedPaymentFields {
            iban,
            bic,
            name: name.to_string(),
            amount,
            purpose,
            reference,
            remittance_text,
            information: request.information.trim().to_string(),
        })
    }

    /// Validates the request and assembles its EPC payload.
    pub fn generate_payload(&self, request: &PaymentRequest) -> PaymentResult<String> {
        let fields = self.validate(request)?;
        let payload = build_epc_payload(&fields);
        info!(
            "SEPA QR Code Data generated successfully for name: <{}>",
            fields.name
        );
        Ok(payload)
    }

    fn resolve_currency(&self, requested: &str) -> PaymentResult<String> {
        let requested = requested.trim();
        let currency = if requested.is_empty() {
            let fallback = self.currencies.default_currency();
            debug!("'currency' parameter not provided, falling back to {fallback}.");
            fallback
        } else {
            requested.to_string()
        };

        if !self.currencies.is_allowed(&currency) {
            info!("Invalid 'currency' parameter: <{currency}>");
            return Err(PaymentError::InvalidCurrency);
        }
        Ok(currency)
    }
}

/// Trims `value` and rejects it when longer than `max` characters.
fn within_limit(value: &str, max: usize, err: PaymentError) -> PaymentResult<String> {
    let value = value.trim();
    if value.chars().count() > max {
        info!("{err}: <{value}>");
        return Err(err);
    }
    Ok(value.to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IbanError;

    fn request() -> PaymentRequest {
        PaymentRequest {
            method: "sepa".to_string(),
            iban: "DE89370400440532013000".to_string(),
            name: "John Doe".to_string(),
            amount: "25.00".to_string(),
            ..Default::default()
        }
    }

    fn validate(request: &PaymentRequest) -> PaymentResult<ValidatedPaymentFields> {
        PaymentValidator::new(&CurrencyRegistry::new()).validate(request)
    }

    #[test]
    fn test_end_to_end_with_default_currency() {
        let currencies = CurrencyRegistry::new();
        let payload = PaymentValidator::new(&currencies)
            .generate_payload(&request())
            .unwrap();

        let lines: Vec<&str> = payload.split('\n').collect();
        assert_eq!(lines[0], "BCD");
        assert_eq!(lines[6], "DE89370400440532013000");
        assert_eq!(lines[7], "EUR25.00");
    }

    #[test]
    fn test_method_is_case_sensitive() {
        for method in ["wire", "SEPA", "", " sepa"] {
            let req = PaymentRequest { method: method.to_string(), ..request() };
            assert_eq!(validate(&req), Err(PaymentError::UnsupportedMethod));
        }
    }

    #[test]
    fn test_method_is_checked_before_everything_else() {
        let req = PaymentRequest {
            method: "wire".to_string(),
            iban: "garbage".to_string(),
            name: String::new(),
            ..request()
        };
        assert_eq!(validate(&req), Err(PaymentError::UnsupportedMethod));
    }

    #[test]
    fn test_iban_is_normalized() {
        let req = PaymentRequest {
            iban: "  de89 3704 0044 0532 0130 00 ".to_string(),
            ..request()
        };
        assert_eq!(validate(&req).unwrap().iban, "DE89370400440532013000");
    }

    #[test]
    fn test_invalid_iban() {
        let req = PaymentRequest {
            iban: "DE89370400440532013001".to_string(),
            ..request()
        };
        assert!(matches!(
            validate(&req),
            Err(PaymentError::InvalidIban(IbanError::Checksum { .. }))
        ));
    }

    #[test]
    fn test_bic_optional_and_uppercased() {
        assert_eq!(validate(&request()).unwrap().bic, "");

        let req = PaymentRequest { bic: " cobadeff ".to_string(), ..request() };
        assert_eq!(validate(&req).unwrap().bic, "COBADEFF");

        let req = PaymentRequest { bic: "nope".to_string(), ..request() };
        assert_eq!(validate(&req), Err(PaymentError::InvalidBic));

        // U+FB00 must not uppercase into "FF"
        let req = PaymentRequest { bic: "deutde\u{FB00}".to_string(), ..request() };
        assert_eq!(validate(&req), Err(PaymentError::InvalidBic));
    }

    #[test]
    fn test_name_bounds() {
        let req = PaymentRequest { name: "   ".to_string(), ..request() };
        assert_eq!(validate(&req), Err(PaymentError::InvalidName));

        let req = PaymentRequest { name: "A".repeat(71), ..request() };
        assert_eq!(validate(&req), Err(PaymentError::InvalidName));

        // 70 characters, more than 70 bytes
        let req = PaymentRequest { name: "Ä".repeat(70), ..request() };
        assert_eq!(validate(&req).unwrap().name, "Ä".repeat(70));

        let req = PaymentRequest { name: "  Jane Roe ".to_string(), ..request() };
        assert_eq!(validate(&req).unwrap().name, "Jane Roe");
    }

    #[test]
    fn test_currency_resolution() {
        let currencies = CurrencyRegistry::new();
        currencies.set_default_currency("USD");
        let validator = PaymentValidator::new(&currencies);

        assert_eq!(validator.validate(&request()).unwrap().amount, "USD25.00");

        let req = PaymentRequest { currency: "GBP".to_string(), ..request() };
        assert_eq!(validator.validate(&req).unwrap().amount, "GBP25.00");

        let req = PaymentRequest { currency: "CHF".to_string(), ..request() };
        assert_eq!(validator.validate(&req), Err(PaymentError::InvalidCurrency));
    }

    #[test]
    fn test_custom_currency_set() {
        let currencies = CurrencyRegistry::new();
        currencies.set_allowed_currencies(["CHF"]);
        let validator = PaymentValidator::new(&currencies);

        // Default is still EUR, which is no longer allowed
        assert_eq!(validator.validate(&request()), Err(PaymentError::InvalidCurrency));

        let req = PaymentRequest { currency: "CHF".to_string(), ..request() };
        assert_eq!(validator.validate(&req).unwrap().amount, "CHF25.00");
    }

    #[test]
    fn test_currency_checked_before_amount() {
        let req = PaymentRequest {
            currency: "XXX".to_string(),
            amount: "abc".to_string(),
            ..request()
        };
        assert_eq!(validate(&req), Err(PaymentError::InvalidCurrency));
    }

    #[test]
    fn test_amount() {
        let req = PaymentRequest { amount: "12,5".to_string(), ..request() };
        assert_eq!(validate(&req).unwrap().amount, "EUR12.50");

        for amount in ["", "abc"] {
            let req = PaymentRequest { amount: amount.to_string(), ..request() };
            assert_eq!(validate(&req), Err(PaymentError::InvalidAmount));
        }
    }

    #[test]
    fn test_amount_overflow_produces_no_payload() {
        let currencies = CurrencyRegistry::new();
        let req = PaymentRequest { amount: "9".repeat(400), ..request() };

        assert_eq!(validate(&req), Err(PaymentError::InvalidAmount));
        assert_eq!(
            PaymentValidator::new(&currencies).generate_payload(&req),
            Err(PaymentError::InvalidAmount)
        );
    }

    #[test]
    fn test_optional_field_limits() {
        let req = PaymentRequest { purpose: "GDDSX".to_string(), ..request() };
        assert_eq!(validate(&req), Err(PaymentError::InvalidPurpose));

        let req = PaymentRequest { reference: "R".repeat(26), ..request() };
        assert_eq!(validate(&req), Err(PaymentError::InvalidReference));

        let req = PaymentRequest { remittance_text: "T".repeat(141), ..request() };
        assert_eq!(validate(&req), Err(PaymentError::InvalidRemittance));

        let req = PaymentRequest {
            purpose: " GDDS ".to_string(),
            reference: "R".repeat(25),
            remittance_text: "T".repeat(140),
            information: format!("  {}  ", "I".repeat(500)),
            ..request()
        };
        let fields = validate(&req).unwrap();
        assert_eq!(fields.purpose, "GDDS");
        assert_eq!(fields.reference.len(), 25);
        assert_eq!(fields.remittance_text.len(), 140);
        assert_eq!(fields.information, "I".repeat(500));
    }

    #[test]
    fn test_failure_produces_no_payload() {
        let currencies = CurrencyRegistry::new();
        let req = PaymentRequest { method: "wire".to_string(), ..request() };
        let result = PaymentValidator::new(&currencies).generate_payload(&req);

        assert_eq!(
            result.unwrap_err().to_string(),
            "Only SEPA payment method is supported"
        );
    }
}
