//! # EPC Payload Builder
//!
//! Assembles the EPC069-12 "BCD" payload read by banking apps when they scan
//! a SEPA credit-transfer QR code.
//!
//! ## Payload Layout
//! ```text
//! ┌──────┬──────────────────┬───────────────────────────────────────────────┐
//! │ Line │ Field            │ Value                                         │
//! ├──────┼──────────────────┼───────────────────────────────────────────────┤
//! │  1   │ Service tag      │ BCD                                           │
//! │  2   │ Version          │ 002                                           │
//! │  3   │ Character set    │ 2                                             │
//! │  4   │ Identification   │ SCT                                           │
//! │  5   │ BIC              │ may be empty (optional in version 002)        │
//! │  6   │ Name             │                                               │
//! │  7   │ IBAN             │                                               │
//! │  8   │ Amount           │ EUR12.50                                      │
//! │  9   │ Purpose          │ may be empty                                  │
//! │ 10   │ Reference        │ empty when remittance text is used            │
//! │ 11   │ Remittance text  │ empty when a reference is used                │
//! │ 12   │ Information      │ no trailing newline                           │
//! └──────┴──────────────────┴───────────────────────────────────────────────┘
//! ```
//!
//! The output always contains exactly 11 newlines. Nothing is validated
//! here; feed it [`ValidatedPaymentFields`] only.

use crate::types::ValidatedPaymentFields;

pub const SERVICE_TAG: &str = "BCD";
pub const VERSION: &str = "002";
/// Character set 2 is ISO 8859-1.
pub const CHARACTER_SET: &str = "2";
/// SEPA Credit Transfer.
pub const IDENTIFICATION: &str = "SCT";

/// Builds the newline-separated EPC payload.
///
/// A non-empty reference suppresses the remittance text, so the two are
/// never both present.
pub fn build_epc_payload(fields: &ValidatedPaymentFields) -> String {
    let (reference, remittance_text) = if fields.reference.is_empty() {
        ("", fields.remittance_text.as_str())
    } else {
        (fields.reference.as_str(), "")
    };

    [
        SERVICE_TAG,
        VERSION,
        CHARACTER_SET,
        IDENTIFICATION,
        &fields.bic,
        &fields.name,
        &fields.iban,
        &fields.amount,
        &fields.purpose,
        reference,
        remittance_text,
        &fields.information,
    ]
    .join("\n")
}
