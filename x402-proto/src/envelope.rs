//! The payment envelope carried in `X-PAYMENT`, and the settlement receipt
//! carried back in `X-PAYMENT-RESPONSE`.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::error::EnvelopeError;
use crate::{SCHEME_EXACT, X402_VERSION};

/// The inner `payload` object of a [`PaymentEnvelope`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentEnvelopePayload {
    /// Base64 of the signed legacy-transaction bytes.
    pub transaction: String,
}

/// The flat JSON envelope Base64-encoded into the `X-PAYMENT` header.
///
/// Deliberately flat — no nesting under a `kind` field — because the
/// facilitators this workspace targets reject the nested form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentEnvelope {
    #[serde(rename = "x402Version")]
    pub x402_version: u32,
    pub scheme: String,
    pub network: String,
    pub payload: PaymentEnvelopePayload,
}

impl PaymentEnvelope {
    /// Builds the canonical envelope for a signed transaction.
    #[must_use]
    pub fn new(network: impl Into<String>, transaction_base64: impl Into<String>) -> Self {
        Self {
            x402_version: X402_VERSION,
            scheme: SCHEME_EXACT.to_owned(),
            network: network.into(),
            payload: PaymentEnvelopePayload {
                transaction: transaction_base64.into(),
            },
        }
    }

    /// Serializes to compact JSON and Base64-encodes the result — the
    /// exact value to place in the `X-PAYMENT` header.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError::Json`] if serialization fails, which it
    /// cannot for this struct short of an out-of-memory condition.
    pub fn encode(&self) -> Result<String, EnvelopeError> {
        let json = serde_json::to_vec(self)?;
        Ok(STANDARD.encode(json))
    }
}

/// The settlement outcome decoded from `X-PAYMENT-RESPONSE`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementReceipt {
    /// Base58 transaction signature.
    pub transaction: String,
    /// Whether the facilitator reports settlement succeeded.
    pub success: bool,
    /// The network the settlement occurred on.
    pub network: String,
}

impl SettlementReceipt {
    /// Decodes an `X-PAYMENT-RESPONSE` header value.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError::Base64`] if `header_value` is not valid
    /// standard Base64, or [`EnvelopeError::Json`] if the decoded bytes
    /// are not the expected `{transaction, success, network}` shape.
    pub fn decode(header_value: &str) -> Result<Self, EnvelopeError> {
        let bytes = STANDARD.decode(header_value)?;
        let receipt = serde_json::from_slice(&bytes)?;
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_round_trips_through_base64_json() {
        let envelope = PaymentEnvelope::new("solana-devnet", "QUJD");
        let encoded = envelope.encode().unwrap();
        let decoded_json = STANDARD.decode(&encoded).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&decoded_json).unwrap();
        let obj = value.as_object().unwrap();
        let mut keys: Vec<&str> = obj.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["network", "payload", "scheme", "x402Version"]);
    }

    #[test]
    fn envelope_uses_fixed_version_and_scheme() {
        let envelope = PaymentEnvelope::new("solana-mainnet", "QUJD");
        assert_eq!(envelope.x402_version, 1);
        assert_eq!(envelope.scheme, "exact");
    }

    #[test]
    fn receipt_decodes_known_fixture() {
        let json = r#"{"transaction":"3xK9Lm...pQ7Zv","success":true,"network":"solana-devnet"}"#;
        let header = STANDARD.encode(json);
        let receipt = SettlementReceipt::decode(&header).unwrap();
        assert_eq!(receipt.transaction, "3xK9Lm...pQ7Zv");
        assert!(receipt.success);
        assert_eq!(receipt.network, "solana-devnet");
    }

    #[test]
    fn receipt_rejects_invalid_base64() {
        let err = SettlementReceipt::decode("not base64!!").unwrap_err();
        assert!(matches!(err, EnvelopeError::Base64(_)));
    }
}
