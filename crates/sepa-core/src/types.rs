//! # Domain Types
//!
//! The two shapes a payment takes on its way through the pipeline.
//!
//! ## Type Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ┌─────────────────────┐  validate  ┌──────────────────────────┐       │
//! │  │   PaymentRequest    │ ─────────► │  ValidatedPaymentFields  │       │
//! │  │  ─────────────────  │            │  ──────────────────────  │       │
//! │  │  raw query strings  │            │  normalized IBAN / BIC   │       │
//! │  │  nothing checked    │            │  "EUR12.50" style amount │       │
//! │  └─────────────────────┘            └────────────┬─────────────┘       │
//! │                                                  │ build_epc_payload    │
//! │                                                  ▼                      │
//! │                                       "BCD\n002\n2\nSCT\n..."           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Neither type is persisted: a request lives for exactly one HTTP call.

use serde::Deserialize;

// =============================================================================
// Payment Request
// =============================================================================

/// Raw, unvalidated payment parameters as they arrive in the query string.
///
/// Every field defaults to the empty string, so a missing parameter and a
/// blank one are indistinguishable to the validator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PaymentRequest {
    /// Payment scheme, must be `sepa`.
    pub method: String,

    /// Beneficiary account number.
    pub iban: String,

    /// Beneficiary bank identifier (optional).
    pub bic: String,

    /// Beneficiary name.
    pub name: String,

    /// Amount, `.` or `,` as decimal separator.
    pub amount: String,

    /// ISO 4217 code; the registry default is used when blank.
    pub currency: String,

    /// Four-letter purpose code (optional).
    pub purpose: String,

    /// Structured creditor reference (optional).
    pub reference: String,

    /// Unstructured remittance text (optional).
    #[serde(rename = "remittance")]
    pub remittance_text: String,

    /// Beneficiary-to-originator information (optional).
    pub information: String,
}

// =============================================================================
// Validated Fields
// =============================================================================

/// Payment fields that passed every check and are ready for encoding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidatedPaymentFields {
    /// Uppercase, whitespace-free IBAN.
    pub iban: String,

    /// Uppercase BIC, empty when not provided.
    pub bic: String,

    /// Trimmed name, 1 to 70 characters.
    pub name: String,

    /// Currency code followed by the value with exactly two decimals.
    pub amount: String,

    /// Trimmed purpose code, at most 4 characters.
    pub purpose: String,

    /// Trimmed creditor reference. Wins over `remittance_text` when set.
    pub reference: String,

    /// Trimmed remittance text.
    pub remittance_text: String,

    /// Trimmed free-form information.
    pub information: String,
}

impl ValidatedPaymentFields {
    /// Assembles the EPC payload for these fields.
    pub fn to_epc_payload(&self) -> String {
        crate::epc::build_epc_payload(self)
    }
}
