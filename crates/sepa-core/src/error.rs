//! # Error Types
//!
//! Domain-specific error types for sepa-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  sepa-core errors (this file)                                          │
//! │  ├── PaymentError  - One variant per user-facing validation failure    │
//! │  └── IbanError     - Why an IBAN was rejected (logged, never shown)    │
//! │                                                                         │
//! │  qr-api errors (separate crate)                                        │
//! │  ├── ConfigError   - Startup configuration problems                    │
//! │  ├── RenderError   - QR / PNG encoding failures                        │
//! │  └── ApiError      - What HTTP clients see                             │
//! │                                                                         │
//! │  Flow: IbanError → PaymentError → error image                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. `PaymentError`'s Display text IS the message rendered to the user
//! 3. Offending input values never appear in `PaymentError` messages

use thiserror::Error;

// =============================================================================
// Payment Error
// =============================================================================

/// Validation failures of a payment request.
///
/// All of these are expected user-input errors: none is fatal and none is
/// worth retrying. The `Display` output is rendered verbatim into the error
/// image, so it must stay stable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentError {
    /// `method` was anything other than the literal `sepa`.
    #[error("Only SEPA payment method is supported")]
    UnsupportedMethod,

    /// The IBAN failed the structure, country length or checksum check.
    #[error("Invalid IBAN format")]
    InvalidIban(#[source] IbanError),

    /// A BIC was supplied but does not match the BIC grammar.
    #[error("Invalid BIC format")]
    InvalidBic,

    /// Name is empty or longer than 70 characters.
    #[error("Invalid or missing 'name' parameter (max 70 characters)")]
    InvalidName,

    /// Currency is not in the allowed set.
    #[error("Invalid 'currency' parameter")]
    InvalidCurrency,

    /// Amount could not be parsed.
    #[error("Invalid 'amount' parameter")]
    InvalidAmount,

    /// Purpose code longer than 4 characters.
    #[error("Invalid 'purpose' parameter (max 4 characters)")]
    InvalidPurpose,

    /// Creditor reference longer than 25 characters.
    #[error("Invalid 'reference' parameter (max 25 characters)")]
    InvalidReference,

    /// Remittance text longer than 140 characters.
    #[error("Invalid 'remittance' parameter (max 140 characters)")]
    InvalidRemittance,
}

// =============================================================================
// IBAN Error
// =============================================================================

/// Why an IBAN was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IbanError {
    /// Does not match `CC99` followed by 1 to 30 alphanumerics.
    #[error("IBAN does not match the expected structure")]
    Structure,

    /// Length differs from the registered length of its country.
    #[error("IBAN for {country} must be {expected} characters, got {actual}")]
    Length {
        country: String,
        expected: usize,
        actual: usize,
    },

    /// The mod-97 remainder was not 1.
    #[error("IBAN checksum mismatch (remainder {remainder})")]
    Checksum { remainder: u32 },
}

/// Convenience type alias for Results with PaymentError.
pub type PaymentResult<T> = Result<T, PaymentError>;

// =============================================================================
// Unit Tests
// =============================================================================
