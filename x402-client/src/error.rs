//! The top-level driver error (C13), one variant per §7 error kind.

/// A failure surfaced by [`crate::driver::X402Driver::fetch`].
///
/// Every variant carries a free-text context string; the driver never
/// retries locally, so each error here corresponds to exactly one
/// `FAILED(*)` transition in §4.12's state machine.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    /// An HTTP or RPC collaborator call failed.
    #[error("transport failure: {context}")]
    Transport {
        /// What was being attempted when the transport failed.
        context: String,
        /// The underlying collaborator error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The 402 body was missing required fields or was not JSON.
    #[error("failed to parse payment challenge: {0}")]
    ChallengeParse(String),

    /// The facilitator's `/supported` response lacked a matching network.
    #[error("facilitator does not support the required network: {0}")]
    FacilitatorUnsupported(String),

    /// The mint's owner was neither the classic nor the 2022 token program.
    #[error("mint is owned by an unsupported token program: {0}")]
    MintUnsupported(String),

    /// A serialization step produced more bytes than its buffer allowed.
    #[error("transaction assembly overflowed its buffer: {0}")]
    BuildOverflow(String),

    /// `maxAmountRequired` did not parse to a non-zero `u64`.
    #[error("invalid payment amount: {0}")]
    AmountInvalid(String),

    /// Signing or the on-curve test failed, indicating corrupted input.
    #[error("cryptographic operation failed: {0}")]
    Crypto(String),

    /// The retried request was rejected (402 again, or other non-2xx).
    #[error("payment was rejected: {0}")]
    PaymentRejected(String),

    /// `X-PAYMENT-RESPONSE` was present but did not decode.
    #[error("failed to decode settlement receipt: {0}")]
    ReceiptDecode(String),
}

impl DriverError {
    pub(crate) fn transport(
        context: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        Self::Transport {
            context: context.into(),
            source,
        }
    }
}
