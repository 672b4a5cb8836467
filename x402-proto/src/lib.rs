//! Wire format types for the x402 Solana-exact payment protocol.
//!
//! This crate covers the single (version 1, scheme `"exact"`, Solana) wire
//! shape consumed end to end by the rest of the workspace: the 402
//! challenge body ([`requirements`]), the facilitator capability response
//! ([`facilitator`]), and the payment envelope/settlement receipt pair
//! carried in the `X-PAYMENT`/`X-PAYMENT-RESPONSE` headers ([`envelope`]).
//! It depends on nothing beyond `serde`, `serde_json`, `base64`, and
//! `thiserror`, so it can sit underneath both the signing/RPC core and any
//! HTTP transport.

pub mod envelope;
pub mod error;
pub mod facilitator;
pub mod requirements;

pub use envelope::{PaymentEnvelope, PaymentEnvelopePayload, SettlementReceipt};
pub use error::{EnvelopeError, RequirementsError};
pub use facilitator::{FacilitatorCapability, FacilitatorKind};
pub use requirements::PaymentRequirements;

/// The only protocol version this workspace speaks.
pub const X402_VERSION: u32 = 1;

/// The only payment scheme this workspace speaks.
pub const SCHEME_EXACT: &str = "exact";
