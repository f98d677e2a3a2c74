//! # sepa-core: Pure Validation Pipeline for SEPA Payment QR Codes
//!
//! Turns the raw parameters of a SEPA credit transfer into a validated EPC
//! ("BCD") payload string, ready to be encoded as a QR code.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        SEPA QR Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  qr-api (Axum HTTP service)                     │   │
//! │  │   /api/payment ──► query params ──► PNG (QR or error image)     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ PaymentRequest                         │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ sepa-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌────────┐  ┌────────┐  ┌────────┐  ┌──────────┐  ┌───────┐  │   │
//! │  │   │  iban  │  │  bic   │  │ amount │  │ currency │  │  epc  │  │   │
//! │  │   │ mod-97 │  │ regex  │  │ 2 dec. │  │ registry │  │  BCD  │  │   │
//! │  │   └────────┘  └────────┘  └────────┘  └──────────┘  └───────┘  │   │
//! │  │                 ▲ orchestrated by validation ▲                  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO LOG OUTPUT • PURE FUNCTIONS         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Request and validated-field types
//! - [`iban`] - IBAN structure, country length and mod-97 checks
//! - [`bic`] - BIC format check
//! - [`amount`] - Locale-tolerant 2-decimal amount formatting
//! - [`currency`] - Allowed currencies and the default currency
//! - [`validation`] - The sequential, short-circuiting request validator
//! - [`epc`] - EPC payload assembly
//! - [`error`] - Error types
//!
//! ## Example Usage
//!
//! ```rust
//! use sepa_core::{CurrencyRegistry, PaymentRequest, PaymentValidator};
//!
//! let currencies = CurrencyRegistry::new();
//! let request = PaymentRequest {
//!     method: "sepa".to_string(),
//!     iban: "DE89 3704 0044 0532 0130 00".to_string(),
//!     name: "John Doe".to_string(),
//!     amount: "25,00".to_string(),
//!     ..Default::default()
//! };
//!
//! let payload = PaymentValidator::new(&currencies)
//!     .generate_payload(&request)
//!     .unwrap();
//!
//! let lines: Vec<&str> = payload.split('\n').collect();
//! assert_eq!(lines[6], "DE89370400440532013000");
//! assert_eq!(lines[7], "EUR25.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod amount;
pub mod bic;
pub mod currency;
pub mod epc;
pub mod error;
pub mod iban;
pub mod types;
pub mod validation;

#[cfg(test)]
mod test_support;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use currency::CurrencyRegistry;
pub use epc::build_epc_payload;
pub use error::{IbanError, PaymentError};
pub use types::{PaymentRequest, ValidatedPaymentFields};
pub use validation::PaymentValidator;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// The only payment method the pipeline accepts (compared case-sensitively).
pub const SEPA_METHOD: &str = "sepa";

/// Maximum beneficiary name length in characters.
pub const MAX_NAME_LEN: usize = 70;

/// Maximum purpose code length in characters.
pub const MAX_PURPOSE_LEN: usize = 4;

/// Maximum structured creditor reference length in characters.
pub const MAX_REFERENCE_LEN: usize = 25;

/// Maximum unstructured remittance text length in characters.
pub const MAX_REMITTANCE_LEN: usize = 140;
