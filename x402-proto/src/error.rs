//! Error types for wire-format parsing.

/// Errors from parsing a 402 challenge body into [`crate::PaymentRequirements`].
#[derive(Debug, thiserror::Error)]
pub enum RequirementsError {
    /// The body is not valid JSON.
    #[error("402 body is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A required field was absent or of the wrong type.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// `maxAmountRequired` did not parse to a non-zero `u64`.
    #[error("maxAmountRequired is not a non-zero u64: {0:?}")]
    InvalidAmount(String),

    /// `payTo` or `asset` was not a valid Base58 public key.
    #[error("{field} is not a valid public key: {source}")]
    InvalidPublicKey {
        /// The JSON field that failed to parse.
        field: &'static str,
        /// The underlying Base58 decode failure.
        #[source]
        source: x402_solana::Base58Error,
    },
}

/// Errors from encoding/decoding a [`crate::PaymentEnvelope`],
/// [`crate::SettlementReceipt`], or [`crate::FacilitatorCapability`].
#[derive(Debug, thiserror::Error)]
pub enum EnvelopeError {
    /// The header value was not valid standard Base64.
    #[error("base64 decode failed: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The decoded bytes were not the expected JSON shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
